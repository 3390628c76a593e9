use std::fs::OpenOptions;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::model::{App, InstallerEvent, PipelineOutcome, StepFailure};
use crate::ui::{draw_progress, SPINNER_LEN};
use installer_core::{
    spawn_installer, InstallConfig, InstallLayout, Installer, InstallerSettings, SystemRunner,
    STEP_NAMES,
};

use super::flow::clear_screen;
use super::logging::{append_log_file, finish, handle_event, push_log, LOG_FILE_PATH};

pub(crate) fn run_install_progress(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    config: InstallConfig,
    settings: InstallerSettings,
) -> Result<PipelineOutcome> {
    let layout = InstallLayout::new(&settings.root)
        .with_context(|| format!("resolve install root {}", settings.root.display()))?;
    let (tx, rx) = crossbeam_channel::unbounded();
    let installer = Installer::new(SystemRunner, layout.clone(), settings);
    let _worker = spawn_installer(installer, config, tx);

    // Set up the UI for the installation progress screen
    clear_screen()?;
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_FILE_PATH)
        .ok();
    let mut app = App::new(&STEP_NAMES, log_file);
    push_log(&mut app.logs, "Starting Vox installer...".to_string());
    let line = format!("Installing into {}", layout.root().display());
    push_log(&mut app.logs, line.clone());
    append_log_file(&mut app.log_file, &line);
    if app.log_file.is_some() {
        let line = format!("Logging to {}", LOG_FILE_PATH);
        push_log(&mut app.logs, line.clone());
        append_log_file(&mut app.log_file, &line);
    }

    terminal.clear().context("clear terminal")?;

    // Installation progress screen
    let mut last_tick = Instant::now();
    loop {
        terminal
            .draw(|f| draw_progress(f, &app))
            .context("draw progress")?;

        let timeout = Duration::from_millis(100);
        if event::poll(timeout).context("poll events")? {
            if let Event::Key(key) = event::read().context("read event")? {
                if key.kind == KeyEventKind::Press && app.done {
                    match key.code {
                        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => break,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break
                        }
                        _ => {}
                    }
                }
            }
        }

        drain_events(&mut app, &rx);

        // Update the spinner animation
        if last_tick.elapsed() >= Duration::from_millis(120) {
            app.spinner_idx = (app.spinner_idx + 1) % SPINNER_LEN;
            last_tick = Instant::now();
        }
    }

    let outcome = app.outcome.unwrap_or_else(|| PipelineOutcome::Failed {
        failures: Vec::new(),
    });
    Ok(outcome)
}

/// Applies every queued installer event. A worker that hangs up without
/// reporting completion is treated as a failed run.
fn drain_events(app: &mut App, rx: &Receiver<InstallerEvent>) {
    loop {
        match rx.try_recv() {
            Ok(evt) => handle_event(app, evt),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                finish(
                    app,
                    PipelineOutcome::Failed {
                        failures: vec![StepFailure {
                            step: "Installer",
                            error: "installer thread stopped unexpectedly".to_string(),
                        }],
                    },
                );
                break;
            }
        }
    }
}
