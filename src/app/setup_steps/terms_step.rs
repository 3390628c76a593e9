use crossterm::event::{KeyCode, KeyEvent};

use crate::ui::WizardView;

use super::super::navigator::Navigator;
use super::{advance_or_prompt, StepOutcome};

pub(in crate::app) fn handle_terms_key(
    nav: &mut Navigator,
    view: &mut WizardView,
    key: KeyEvent,
) -> StepOutcome {
    match key.code {
        KeyCode::Char(' ') => nav.toggle_terms(),
        KeyCode::Enter => return advance_or_prompt(nav, view),
        _ => {}
    }
    StepOutcome::Stay
}
