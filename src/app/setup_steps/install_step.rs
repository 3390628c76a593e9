use crossterm::event::{KeyCode, KeyEvent};

use super::super::navigator::Navigator;
use super::StepOutcome;

pub(in crate::app) fn handle_install_key(nav: &mut Navigator, key: KeyEvent) -> StepOutcome {
    match key.code {
        KeyCode::Enter | KeyCode::Char('i') | KeyCode::Char('I') => StepOutcome::Finish,
        KeyCode::Esc => {
            nav.back();
            StepOutcome::Stay
        }
        _ => StepOutcome::Stay,
    }
}
