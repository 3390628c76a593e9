use std::io;

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, ClearType};
use crossterm::{cursor, execute, terminal::Clear};

pub(crate) fn clear_screen() -> Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0)).context("clear screen")?;
    Ok(())
}

/// Leaves raw mode and wipes the TUI before printing to the plain terminal.
fn restore_terminal() -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    let _ = clear_screen();
    execute!(io::stdout(), cursor::Show).context("show cursor")?;
    Ok(())
}

/// Holds the terminal in raw mode. Dropping it without calling
/// [`RawModeGuard::restore`] still restores the terminal, so early returns
/// through `?` never leave the shell in raw mode.
pub(crate) struct RawModeGuard {
    restore: fn() -> Result<()>,
    armed: bool,
}

impl RawModeGuard {
    pub(crate) fn enter() -> Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        Ok(Self::armed_with(restore_terminal))
    }

    fn armed_with(restore: fn() -> Result<()>) -> Self {
        Self {
            restore,
            armed: true,
        }
    }

    pub(crate) fn restore(mut self) -> Result<()> {
        self.armed = false;
        (self.restore)()
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = (self.restore)();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    static EARLY_RESTORES: AtomicUsize = AtomicUsize::new(0);
    static EXPLICIT_RESTORES: AtomicUsize = AtomicUsize::new(0);

    fn count_early() -> Result<()> {
        EARLY_RESTORES.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn count_explicit() -> Result<()> {
        EXPLICIT_RESTORES.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn fails_midway(guard: RawModeGuard) -> Result<()> {
        let _guard = guard;
        anyhow::bail!("layout could not be resolved")
    }

    #[test]
    fn error_path_restores_terminal() {
        let result = fails_midway(RawModeGuard::armed_with(count_early));
        assert!(result.is_err());
        assert_eq!(EARLY_RESTORES.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn explicit_restore_runs_once() {
        let guard = RawModeGuard::armed_with(count_explicit);
        guard.restore().unwrap();
        assert_eq!(EXPLICIT_RESTORES.load(Ordering::SeqCst), 1);
    }
}
