use crossterm::event::{KeyCode, KeyEvent};

use crate::ui::{WizardView, PREF_ROWS};

use super::super::navigator::Navigator;
use super::{advance_or_prompt, StepOutcome};

pub(in crate::app) fn handle_prefs_key(
    nav: &mut Navigator,
    view: &mut WizardView,
    key: KeyEvent,
) -> StepOutcome {
    match key.code {
        KeyCode::Up => view.prefs_row = (view.prefs_row + PREF_ROWS - 1) % PREF_ROWS,
        KeyCode::Down | KeyCode::Tab => view.prefs_row = (view.prefs_row + 1) % PREF_ROWS,
        KeyCode::Char(' ') | KeyCode::Right => match view.prefs_row {
            0 => nav.cycle_tab_layout(),
            1 => nav.cycle_theme(),
            _ => nav.cycle_search_engine(),
        },
        KeyCode::Left => match view.prefs_row {
            0 => nav.cycle_tab_layout_back(),
            1 => nav.cycle_theme_back(),
            _ => nav.cycle_search_engine_back(),
        },
        KeyCode::Enter => return advance_or_prompt(nav, view),
        KeyCode::Esc => nav.back(),
        _ => {}
    }
    StepOutcome::Stay
}
