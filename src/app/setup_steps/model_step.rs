use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::{ModelFocus, WizardView};

use super::super::navigator::Navigator;
use super::{advance_or_prompt, StepOutcome};

pub(in crate::app) fn handle_model_key(
    nav: &mut Navigator,
    view: &mut WizardView,
    key: KeyEvent,
) -> StepOutcome {
    if view.model_focus != ModelFocus::Choices && !nav.custom_fields_enabled() {
        view.model_focus = ModelFocus::Choices;
    }
    match view.model_focus {
        ModelFocus::Choices => match key.code {
            KeyCode::Up => nav.select_previous_model(),
            KeyCode::Down => nav.select_next_model(),
            KeyCode::Tab if nav.custom_fields_enabled() => {
                view.model_focus = ModelFocus::CustomUrl;
            }
            KeyCode::Enter => return advance_or_prompt(nav, view),
            KeyCode::Esc => nav.back(),
            _ => {}
        },
        ModelFocus::CustomUrl | ModelFocus::CustomFilename => {
            return handle_input_key(nav, view, key);
        }
    }
    StepOutcome::Stay
}

fn handle_input_key(nav: &mut Navigator, view: &mut WizardView, key: KeyEvent) -> StepOutcome {
    match key.code {
        KeyCode::Tab => {
            view.model_focus = match view.model_focus {
                ModelFocus::CustomUrl => ModelFocus::CustomFilename,
                _ => ModelFocus::Choices,
            };
            return StepOutcome::Stay;
        }
        KeyCode::BackTab => {
            view.model_focus = match view.model_focus {
                ModelFocus::CustomFilename => ModelFocus::CustomUrl,
                _ => ModelFocus::Choices,
            };
            return StepOutcome::Stay;
        }
        KeyCode::Esc => {
            view.model_focus = ModelFocus::Choices;
            return StepOutcome::Stay;
        }
        KeyCode::Enter => {
            view.model_focus = ModelFocus::Choices;
            return advance_or_prompt(nav, view);
        }
        _ => {}
    }

    let field = match view.model_focus {
        ModelFocus::CustomUrl => nav.custom_url_mut(),
        ModelFocus::CustomFilename => nav.custom_filename_mut(),
        ModelFocus::Choices => None,
    };
    let Some(field) = field else {
        return StepOutcome::Stay;
    };
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => field.clear(),
        KeyCode::Char(ch) if !ctrl => field.push(ch),
        KeyCode::Backspace => {
            field.pop();
        }
        _ => {}
    }
    StepOutcome::Stay
}
