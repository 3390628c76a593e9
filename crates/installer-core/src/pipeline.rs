use std::fs;
use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api_script::ApiScriptParams;
use crate::command::{tail_lines, CommandRunner, CommandSpec};
use crate::config::{InstallConfig, ResolvedModel};
use crate::error::StepError;
use crate::events::{InstallerEvent, StepStatus};
use crate::layout::{InstallLayout, API_START_COMMAND, LLAMA_REPO_URL};
use crate::prefs::BrowserPrefs;
use crate::settings::{FailurePolicy, InstallerSettings};

pub const STEP_NAMES: [&str; 7] = [
    "Install system dependencies",
    "Clone llama.cpp",
    "Build llama.cpp",
    "Download model",
    "Set up LLM API",
    "Write browser preferences",
    "Save install record",
];

const STEP_SYSTEM_PACKAGES: usize = 0;
const STEP_CLONE: usize = 1;
const STEP_BUILD: usize = 2;
const STEP_DOWNLOAD: usize = 3;
const STEP_API: usize = 4;
const STEP_PREFS: usize = 5;
const STEP_RECORD: usize = 6;

const MODEL_STEPS: [usize; 4] = [STEP_CLONE, STEP_BUILD, STEP_DOWNLOAD, STEP_API];

/// Steps that run even after an abort.
const ALWAYS_RUN: [usize; 2] = [STEP_PREFS, STEP_RECORD];

pub const SYSTEM_PACKAGES: &[&str] = &[
    "git",
    "build-essential",
    "python3",
    "python3-pip",
    "curl",
    "cmake",
    "libcurl4-openssl-dev",
    "python3-tk",
];

const DIAGNOSTIC_LINES: usize = 5;

pub fn completion_message() -> String {
    format!(
        "Vox Browser is ready!\nYou can start the local AI server with:\n  {API_START_COMMAND}\nThen launch the browser."
    )
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepFailure {
    pub step: &'static str,
    pub error: String,
}

/// Terminal result of one installer run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineOutcome {
    Success { message: String },
    Failed { failures: Vec<StepFailure> },
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Success { .. })
    }

    pub fn message(&self) -> String {
        match self {
            PipelineOutcome::Success { message } => message.clone(),
            PipelineOutcome::Failed { failures } => {
                let mut message = "Installation failed:".to_string();
                for failure in failures {
                    message.push_str(&format!("\n- {}: {}", failure.step, failure.error));
                }
                message
            }
        }
    }
}

#[derive(Serialize)]
struct InstallRecord<'a> {
    config: &'a InstallConfig,
    model: Option<&'a ResolvedModel>,
    model_path: Option<PathBuf>,
    api_script: Option<PathBuf>,
    search_url: &'static str,
    user_js: PathBuf,
}

pub struct Installer<R> {
    runner: R,
    layout: InstallLayout,
    settings: InstallerSettings,
}

impl<R: CommandRunner> Installer<R> {
    pub fn new(runner: R, layout: InstallLayout, settings: InstallerSettings) -> Self {
        Self {
            runner,
            layout,
            settings,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs every step in order and sends `Done` once at the end.
    pub fn run(&mut self, config: &InstallConfig, tx: &Sender<InstallerEvent>) -> PipelineOutcome {
        info!(root = %self.layout.root().display(), "installer started");
        let mut run = Run {
            runner: &mut self.runner,
            layout: &self.layout,
            settings: &self.settings,
            tx,
            failures: Vec::new(),
            aborted: false,
            finished: 0,
        };

        if run.settings.skip_system_packages {
            run.skip(STEP_SYSTEM_PACKAGES, "System packages skipped by configuration");
        } else {
            run.step(STEP_SYSTEM_PACKAGES, "Installing dependencies...", |r| {
                r.install_system_packages()
            });
        }

        let model = config.resolved_model();
        match &model {
            Some(model) => {
                run.step(STEP_CLONE, "Cloning llama.cpp...", |r| r.clone_llama());
                run.step(STEP_BUILD, "Building llama.cpp (CMake)...", |r| r.build_llama());
                let label = format!("Downloading model: {}...", model.filename);
                run.step(STEP_DOWNLOAD, &label, |r| r.download_model(model));
                run.step(STEP_API, "Setting up LLM API...", |r| r.set_up_api(model));
            }
            None => {
                run.log("No model selected; skipping AI setup".to_string());
                for index in MODEL_STEPS {
                    run.skip(index, "");
                }
            }
        }

        run.step(STEP_PREFS, "Writing browser preferences...", |r| {
            r.write_browser_prefs(config)
        });
        run.step(STEP_RECORD, "Saving install record...", |r| {
            r.write_install_record(config, model.as_ref())
        });

        let outcome = if run.failures.is_empty() {
            PipelineOutcome::Success {
                message: completion_message(),
            }
        } else {
            PipelineOutcome::Failed {
                failures: run.failures,
            }
        };
        info!(success = outcome.is_success(), "installer finished");
        let _ = tx.send(InstallerEvent::Status(outcome.message()));
        let _ = tx.send(InstallerEvent::Done(outcome.clone()));
        outcome
    }
}

struct Run<'a, R> {
    runner: &'a mut R,
    layout: &'a InstallLayout,
    settings: &'a InstallerSettings,
    tx: &'a Sender<InstallerEvent>,
    failures: Vec<StepFailure>,
    aborted: bool,
    finished: usize,
}

impl<R: CommandRunner> Run<'_, R> {
    fn step<F>(&mut self, index: usize, label: &str, f: F)
    where
        F: FnOnce(&mut Self) -> Result<(), StepError>,
    {
        if self.aborted && !ALWAYS_RUN.contains(&index) {
            self.skip(index, "");
            return;
        }
        let name = STEP_NAMES[index];
        info!(step = name, "step started");
        self.send(InstallerEvent::Status(label.to_string()));
        self.set_step(index, StepStatus::Running, None);

        match f(self) {
            Ok(()) => self.set_step(index, StepStatus::Done, None),
            Err(err) => {
                let error = err.to_string();
                warn!(step = name, %error, "step failed");
                self.set_step(index, StepStatus::Failed, Some(error.clone()));
                self.failures.push(StepFailure { step: name, error });
                if self.settings.failure_policy == FailurePolicy::Abort {
                    self.aborted = true;
                }
            }
        }
        self.advance_progress();
    }

    fn skip(&mut self, index: usize, reason: &str) {
        debug!(step = STEP_NAMES[index], "step skipped");
        if !reason.is_empty() {
            self.log(reason.to_string());
        }
        self.set_step(index, StepStatus::Skipped, None);
        self.advance_progress();
    }

    fn set_step(&self, index: usize, status: StepStatus, err: Option<String>) {
        self.send(InstallerEvent::Step { index, status, err });
    }

    fn advance_progress(&mut self) {
        self.finished += 1;
        self.send(InstallerEvent::Progress(
            self.finished as f64 / STEP_NAMES.len() as f64,
        ));
    }

    fn log(&self, line: String) {
        self.send(InstallerEvent::Log(line));
    }

    fn send(&self, evt: InstallerEvent) {
        let _ = self.tx.send(evt);
    }

    fn exec(&mut self, spec: CommandSpec) -> Result<(), StepError> {
        let command = spec.to_string();
        debug!(%command, cwd = ?spec.cwd, "running command");
        self.log(format!("$ {command}"));
        let output = self
            .runner
            .run(&spec)
            .map_err(|source| StepError::Spawn {
                command: command.clone(),
                source,
            })?;
        if output.success() {
            return Ok(());
        }
        let stream = if output.stderr.trim().is_empty() {
            &output.stdout
        } else {
            &output.stderr
        };
        let diagnostic = tail_lines(stream, DIAGNOSTIC_LINES);
        for line in diagnostic.lines() {
            self.log(line.to_string());
        }
        Err(StepError::ExitStatus {
            command,
            code: output.code,
            diagnostic,
        })
    }

    fn install_system_packages(&mut self) -> Result<(), StepError> {
        let sudo = self.settings.use_sudo;
        self.exec(CommandSpec::new("apt-get").arg("update").elevated(sudo))?;
        self.exec(
            CommandSpec::new("apt-get")
                .args(["install", "-y"])
                .args(SYSTEM_PACKAGES.iter().copied())
                .elevated(sudo),
        )
    }

    fn clone_llama(&mut self) -> Result<(), StepError> {
        let clone_dir = self.layout.clone_dir();
        if self.layout.source_marker().is_file() {
            self.log(format!("{} already present, skipping clone", clone_dir.display()));
            return Ok(());
        }
        self.exec(
            CommandSpec::new("git")
                .args(["clone", LLAMA_REPO_URL])
                .path_arg(&clone_dir)
                .current_dir(self.layout.root()),
        )
    }

    fn build_llama(&mut self) -> Result<(), StepError> {
        if !self.layout.source_marker().is_file() {
            return Err(StepError::MissingSources(self.layout.clone_dir()));
        }
        let build_dir = self.layout.build_dir();
        ensure_dir(&build_dir)?;
        let jobs = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        self.exec(CommandSpec::new("cmake").arg("..").current_dir(&build_dir))?;
        self.exec(
            CommandSpec::new("cmake")
                .args(["--build", ".", "--config", "Release", "-j"])
                .arg(jobs.to_string())
                .current_dir(&build_dir),
        )
    }

    fn download_model(&mut self, model: &ResolvedModel) -> Result<(), StepError> {
        ensure_dir(&self.layout.models_dir())?;
        let target = self.layout.model_path(&model.filename);
        self.exec(
            CommandSpec::new("curl")
                .args(["-L", "--fail", model.url.as_str(), "-o"])
                .path_arg(&target),
        )
    }

    fn set_up_api(&mut self, model: &ResolvedModel) -> Result<(), StepError> {
        let api_dir = self.layout.api_dir();
        ensure_dir(&api_dir)?;
        let params = ApiScriptParams::resolve(&api_dir, &model.filename);
        write_file(&self.layout.api_script(), params.render())?;
        self.log(format!("Wrote {}", self.layout.api_script().display()));
        self.exec(CommandSpec::new("pip3").args(["install", "flask"]))
    }

    fn write_browser_prefs(&mut self, config: &InstallConfig) -> Result<(), StepError> {
        ensure_dir(&self.layout.profile_dir())?;
        let prefs =
            BrowserPrefs::from_config(config, &self.layout.start_page(), self.settings.search_pref);
        write_file(&self.layout.user_js(), prefs.render())?;
        self.log(format!("Wrote {}", self.layout.user_js().display()));
        Ok(())
    }

    fn write_install_record(
        &mut self,
        config: &InstallConfig,
        model: Option<&ResolvedModel>,
    ) -> Result<(), StepError> {
        let record = InstallRecord {
            config,
            model,
            model_path: model.map(|m| self.layout.model_path(&m.filename)),
            api_script: model.map(|_| self.layout.api_script()),
            search_url: config.search_engine.search_url(),
            user_js: self.layout.user_js(),
        };
        let json = serde_json::to_string_pretty(&record)?;
        write_file(&self.layout.install_record(), json)
    }
}

fn ensure_dir(path: &Path) -> Result<(), StepError> {
    fs::create_dir_all(path).map_err(|source| StepError::io("create directory", path, source))
}

fn write_file(path: &Path, contents: String) -> Result<(), StepError> {
    fs::write(path, contents).map_err(|source| StepError::io("write", path, source))
}
