//! Installer settings read from the environment.
//!
//! | Variable                   | Effect                                         |
//! |----------------------------|------------------------------------------------|
//! | `VOX_INSTALL_ROOT`         | base directory (default: current directory)    |
//! | `VOX_FAILURE_POLICY`       | `abort` (default) or `continue`                |
//! | `VOX_NO_SUDO=1`            | run the package manager without `sudo`         |
//! | `VOX_SKIP_SYSTEM_PACKAGES=1` | skip the package manager step               |
//! | `VOX_LEGACY_SEARCH_PREF=1` | write the search URL instead of the engine name |

use std::path::PathBuf;

use crate::error::SettingsError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failed step.
    #[default]
    Abort,
    /// Keep running the remaining steps after a failure.
    Continue,
}

/// Value written under `browser.search.defaultenginename`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchPrefStyle {
    #[default]
    EngineName,
    UrlTemplate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallerSettings {
    pub root: PathBuf,
    pub failure_policy: FailurePolicy,
    pub use_sudo: bool,
    pub skip_system_packages: bool,
    pub search_pref: SearchPrefStyle,
}

impl Default for InstallerSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            failure_policy: FailurePolicy::Abort,
            use_sudo: true,
            skip_system_packages: false,
            search_pref: SearchPrefStyle::EngineName,
        }
    }
}

impl InstallerSettings {
    /// True when the run will invoke the package manager through sudo.
    pub fn needs_sudo(&self) -> bool {
        self.use_sudo && !self.skip_system_packages
    }

    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| lookup(key).as_deref() == Some("1");
        let mut settings = Self::default();

        if let Some(root) = lookup("VOX_INSTALL_ROOT").filter(|v| !v.trim().is_empty()) {
            settings.root = PathBuf::from(root.trim());
        }
        if let Some(raw) = lookup("VOX_FAILURE_POLICY") {
            settings.failure_policy = match raw.trim().to_ascii_lowercase().as_str() {
                "" | "abort" => FailurePolicy::Abort,
                "continue" => FailurePolicy::Continue,
                _ => {
                    return Err(SettingsError::Invalid {
                        key: "VOX_FAILURE_POLICY",
                        value: raw,
                    })
                }
            };
        }
        settings.use_sudo = !flag("VOX_NO_SUDO");
        settings.skip_system_packages = flag("VOX_SKIP_SYSTEM_PACKAGES");
        if flag("VOX_LEGACY_SEARCH_PREF") {
            settings.search_pref = SearchPrefStyle::UrlTemplate;
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let settings = InstallerSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, InstallerSettings::default());
    }

    #[test]
    fn flags_and_policy_are_parsed() {
        let settings = InstallerSettings::from_lookup(lookup(&[
            ("VOX_INSTALL_ROOT", "/opt/vox"),
            ("VOX_FAILURE_POLICY", "Continue"),
            ("VOX_NO_SUDO", "1"),
            ("VOX_SKIP_SYSTEM_PACKAGES", "1"),
            ("VOX_LEGACY_SEARCH_PREF", "1"),
        ]))
        .unwrap();
        assert_eq!(settings.root, PathBuf::from("/opt/vox"));
        assert_eq!(settings.failure_policy, FailurePolicy::Continue);
        assert!(!settings.use_sudo);
        assert!(settings.skip_system_packages);
        assert_eq!(settings.search_pref, SearchPrefStyle::UrlTemplate);
    }

    #[test]
    fn flags_require_exact_one() {
        let settings =
            InstallerSettings::from_lookup(lookup(&[("VOX_NO_SUDO", "true")])).unwrap();
        assert!(settings.use_sudo);
    }

    #[test]
    fn sudo_is_needed_only_for_package_step() {
        let mut settings = InstallerSettings::default();
        assert!(settings.needs_sudo());
        settings.skip_system_packages = true;
        assert!(!settings.needs_sudo());
        settings.skip_system_packages = false;
        settings.use_sudo = false;
        assert!(!settings.needs_sudo());
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let err = InstallerSettings::from_lookup(lookup(&[("VOX_FAILURE_POLICY", "retry")]))
            .unwrap_err();
        assert!(err.to_string().contains("VOX_FAILURE_POLICY"));
    }
}
