mod flow;
mod logging;
pub mod navigator;
mod progress;
mod setup;
mod setup_steps;
pub mod steps;
pub(crate) mod validation;

use anyhow::{Context, Result};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use installer_core::command::refresh_sudo;
use installer_core::{InstallerSettings, PipelineOutcome};

use self::flow::{clear_screen, RawModeGuard};

pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let settings = InstallerSettings::from_env().context("read installer settings")?;
    info!(?settings, "vox installer starting");

    if settings.needs_sudo() {
        ensure_sudo()?;
    }

    let guard = RawModeGuard::enter()?;
    let result = run_tui(settings);
    guard.restore()?;
    let Some(outcome) = result? else {
        return Ok(());
    };

    println!("{}", outcome.message());
    if outcome.is_success() {
        Ok(())
    } else {
        anyhow::bail!("installation did not complete; see {}", logging::LOG_FILE_PATH)
    }
}

/// Asks for the sudo password on the plain terminal, before raw mode.
fn ensure_sudo() -> Result<()> {
    let cached = refresh_sudo().context("run `sudo -v`")?;
    if !cached {
        warn!("sudo authentication failed");
        anyhow::bail!(
            "sudo authentication failed; set VOX_NO_SUDO=1 when running as root \
             or VOX_SKIP_SYSTEM_PACKAGES=1 to install packages yourself"
        );
    }
    Ok(())
}

fn run_tui(settings: InstallerSettings) -> Result<Option<PipelineOutcome>> {
    clear_screen()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;

    let Some(config) = setup::run_setup_wizard(&mut terminal)? else {
        return Ok(None);
    };
    progress::run_install_progress(&mut terminal, config, settings).map(Some)
}
