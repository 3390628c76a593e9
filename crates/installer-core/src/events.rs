use crate::pipeline::PipelineOutcome;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Running,
    Done,
    Skipped,
    Failed,
}

impl StepStatus {
    pub fn label(self) -> &'static str {
        match self {
            StepStatus::Pending => "PENDING",
            StepStatus::Running => "RUNNING",
            StepStatus::Done => "OK",
            StepStatus::Skipped => "SKIP",
            StepStatus::Failed => "FAIL",
        }
    }
}

/// Messages sent from the installer thread to the UI thread.
#[derive(Clone, Debug)]
pub enum InstallerEvent {
    /// Human-readable label of the step about to start.
    Status(String),
    Log(String),
    Progress(f64),
    Step {
        index: usize,
        status: StepStatus,
        err: Option<String>,
    },
    Done(PipelineOutcome),
}
