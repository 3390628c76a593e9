pub(super) mod install_step;
pub(super) mod model_step;
pub(super) mod prefs_step;
pub(super) mod terms_step;

use tracing::info;

use crate::ui::WizardView;

use super::navigator::Navigator;

#[derive(Debug, PartialEq, Eq)]
pub(super) enum StepOutcome {
    Stay,
    Quit,
    Finish,
}

/// Moves to the next page, or raises the blocking prompt if the page's gate
/// rejects the move.
pub(super) fn advance_or_prompt(nav: &mut Navigator, view: &mut WizardView) -> StepOutcome {
    if let Err(err) = nav.advance() {
        info!(page = nav.current_page(), %err, "page advance rejected");
        view.prompt = Some(err.to_string());
    }
    StepOutcome::Stay
}
