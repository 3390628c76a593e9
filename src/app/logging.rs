use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::model::{App, InstallerEvent, PipelineOutcome, StepFailure};

pub(crate) const LOG_CAPACITY: usize = 200;
pub(crate) const LOG_FILE_PATH: &str = "/tmp/vox-installer.log";
pub(crate) const TRACE_FILE_PATH: &str = "/tmp/vox-installer-trace.log";

/// Sends `tracing` output to a file so it does not draw over the TUI.
pub(crate) fn init_tracing() {
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(TRACE_FILE_PATH)
    else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

pub(crate) fn handle_event(app: &mut App, evt: InstallerEvent) {
    match evt {
        InstallerEvent::Status(label) => {
            append_log_file(&mut app.log_file, &format!("STATUS: {}", label));
            app.status = label;
        }
        InstallerEvent::Log(line) => {
            append_log_file(&mut app.log_file, &line);
            push_log(&mut app.logs, line);
        }
        InstallerEvent::Progress(value) => app.progress = value,
        InstallerEvent::Step { index, status, err } => {
            if let Some(step) = app.steps.get_mut(index) {
                step.status = status;
                step.err = err.clone();
                let line = format!("STEP {}: {}", step.name, status.label());
                append_log_file(&mut app.log_file, &line);
                if let Some(err) = err {
                    append_log_file(&mut app.log_file, &format!("ERROR: {}", err));
                }
            }
        }
        InstallerEvent::Done(outcome) => finish(app, outcome),
    }
}

/// Records the terminal outcome. Later calls are ignored.
pub(crate) fn finish(app: &mut App, outcome: PipelineOutcome) {
    if app.done {
        return;
    }
    app.done = true;
    app.status = outcome.message();
    match &outcome {
        PipelineOutcome::Success { .. } => append_log_file(&mut app.log_file, "DONE: ok"),
        PipelineOutcome::Failed { failures } => {
            for StepFailure { step, error } in failures {
                append_log_file(&mut app.log_file, &format!("DONE: {}: {}", step, error));
            }
        }
    }
    app.outcome = Some(outcome);
}

pub(crate) fn push_log(logs: &mut VecDeque<String>, line: String) {
    if logs.len() >= LOG_CAPACITY {
        logs.pop_front();
    }
    logs.push_back(line);
}

pub(crate) fn append_log_file(log_file: &mut Option<std::fs::File>, line: &str) {
    if let Some(file) = log_file.as_mut() {
        let _ = writeln!(file, "{}", line);
        let _ = file.flush();
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Seek};

    use installer_core::StepStatus;

    use super::*;

    fn app() -> App {
        App::new(&["one", "two"], None)
    }

    #[test]
    fn log_ring_is_bounded() {
        let mut logs = VecDeque::new();
        for i in 0..LOG_CAPACITY + 5 {
            push_log(&mut logs, i.to_string());
        }
        assert_eq!(logs.len(), LOG_CAPACITY);
        assert_eq!(logs.front().map(String::as_str), Some("5"));
    }

    #[test]
    fn events_update_status_and_steps() {
        let mut app = app();
        handle_event(&mut app, InstallerEvent::Status("Cloning llama.cpp...".to_string()));
        handle_event(
            &mut app,
            InstallerEvent::Step {
                index: 1,
                status: StepStatus::Failed,
                err: Some("boom".to_string()),
            },
        );
        handle_event(&mut app, InstallerEvent::Progress(0.5));
        assert_eq!(app.status, "Cloning llama.cpp...");
        assert_eq!(app.steps[1].status, StepStatus::Failed);
        assert_eq!(app.steps[1].err.as_deref(), Some("boom"));
        assert_eq!(app.progress, 0.5);
        assert!(!app.done);
    }

    #[test]
    fn first_done_wins() {
        let mut app = app();
        handle_event(
            &mut app,
            InstallerEvent::Done(PipelineOutcome::Success {
                message: "ready".to_string(),
            }),
        );
        finish(
            &mut app,
            PipelineOutcome::Failed {
                failures: Vec::new(),
            },
        );
        assert!(app.done);
        assert_eq!(app.status, "ready");
        assert!(app.outcome.as_ref().is_some_and(PipelineOutcome::is_success));
    }

    #[test]
    fn step_changes_are_mirrored_to_log_file() {
        let mut file = tempfile::tempfile().unwrap();
        let mut app = App::new(&["Clone llama.cpp"], Some(file.try_clone().unwrap()));
        handle_event(
            &mut app,
            InstallerEvent::Step {
                index: 0,
                status: StepStatus::Skipped,
                err: None,
            },
        );
        file.rewind().unwrap();
        let mut contents = String::new();
        file.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "STEP Clone llama.cpp: SKIP\n");
    }
}
