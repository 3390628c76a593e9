use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use installer_core::InstallConfig;

use crate::ui::{draw_wizard, WizardView};

use super::navigator::Navigator;
use super::setup_steps::install_step;
use super::setup_steps::model_step;
use super::setup_steps::prefs_step;
use super::setup_steps::terms_step;
use super::setup_steps::StepOutcome;
use super::steps::WizardPage;

/// Runs the wizard pages and returns the final choices, or `None` if the user
/// quit before installing.
pub(crate) fn run_setup_wizard(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
) -> Result<Option<InstallConfig>> {
    let mut nav = Navigator::new();
    let mut view = WizardView::default();

    loop {
        terminal
            .draw(|f| draw_wizard(f, &nav, &view))
            .context("draw wizard")?;

        if !event::poll(Duration::from_millis(100)).context("poll events")? {
            continue;
        }
        let Event::Key(key) = event::read().context("read event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match handle_key(&mut nav, &mut view, key) {
            StepOutcome::Stay => {}
            StepOutcome::Quit => return Ok(None),
            StepOutcome::Finish => {
                let config = nav.snapshot();
                info!(?config, "wizard finished");
                return Ok(Some(config));
            }
        }
    }
}

pub(super) fn handle_key(nav: &mut Navigator, view: &mut WizardView, key: KeyEvent) -> StepOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
    {
        return StepOutcome::Quit;
    }
    if view.prompt.take().is_some() {
        return StepOutcome::Stay;
    }
    match nav.page() {
        WizardPage::Terms => terms_step::handle_terms_key(nav, view, key),
        WizardPage::Model => model_step::handle_model_key(nav, view, key),
        WizardPage::Preferences => prefs_step::handle_prefs_key(nav, view, key),
        WizardPage::Install => install_step::handle_install_key(nav, key),
    }
}
