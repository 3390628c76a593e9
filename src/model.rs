use std::collections::VecDeque;
use std::fs::File;

pub use installer_core::{InstallerEvent, PipelineOutcome, StepFailure, StepStatus};

// Single installation step
pub struct Step {
    pub name: String,        // The name of the step
    pub status: StepStatus,  // The current status of the step
    pub err: Option<String>, // An error message if the step failed
}

// State of the install progress screen, owned by the UI thread
pub struct App {
    // The list of all installation steps
    pub steps: Vec<Step>,
    // The overall progress of the installation
    pub progress: f64,
    // Label of the running step, or the final message once done
    pub status: String,
    // A queue of log messages to be displayed
    pub logs: VecDeque<String>,
    // The current frame of the loading spinner animation
    pub spinner_idx: usize,
    // A flag indicating whether the installation is finished
    pub done: bool,
    // Terminal outcome, set once when the installer reports completion
    pub outcome: Option<PipelineOutcome>,
    // An optional handle to the log file for writing logs to disk
    pub log_file: Option<File>,
}

impl App {
    pub fn new(step_names: &[&str], log_file: Option<File>) -> Self {
        Self {
            steps: step_names
                .iter()
                .map(|name| Step {
                    name: name.to_string(),
                    status: StepStatus::Pending,
                    err: None,
                })
                .collect(),
            progress: 0.0,
            status: "Ready.".to_string(),
            logs: VecDeque::new(),
            spinner_idx: 0,
            done: false,
            outcome: None,
            log_file,
        }
    }
}
