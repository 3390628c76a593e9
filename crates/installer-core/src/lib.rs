//! UI-free core of the Vox installer: model catalog, install configuration,
//! and the provisioning pipeline that runs on a background thread.

pub mod api_script;
pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod layout;
pub mod pipeline;
pub mod prefs;
pub mod settings;

use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;

pub use command::{CommandRunner, SystemRunner};
pub use config::{InstallConfig, ModelSelection, SearchEngine, TabLayout, Theme};
pub use events::{InstallerEvent, StepStatus};
pub use layout::InstallLayout;
pub use pipeline::{Installer, PipelineOutcome, StepFailure, STEP_NAMES};
pub use settings::{FailurePolicy, InstallerSettings};

/// Runs `installer` on a dedicated thread. Events, including the final
/// `Done`, arrive on `tx`; the installer is handed back when the thread ends.
pub fn spawn_installer<R>(
    mut installer: Installer<R>,
    config: InstallConfig,
    tx: Sender<InstallerEvent>,
) -> JoinHandle<Installer<R>>
where
    R: CommandRunner + Send + 'static,
{
    thread::spawn(move || {
        installer.run(&config, &tx);
        installer
    })
}
