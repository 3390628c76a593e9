//! On-disk locations used by the installer, all under one install root.

use std::io;
use std::path::{Component, Path, PathBuf};

pub const LLAMA_REPO_URL: &str = "https://github.com/ggerganov/llama.cpp.git";
pub const CLONE_DIR_NAME: &str = "llama.cpp";
pub const API_SCRIPT_NAME: &str = "vox_llm_api.py";
pub const PROFILE_DIR: &str = "firefox-115.0/browser/app/profile";
pub const INSTALL_RECORD_NAME: &str = "vox-config.json";

/// Command shown to the user for starting the generated API server.
pub const API_START_COMMAND: &str = "cd llama.cpp/api && python3 vox_llm_api.py";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallLayout {
    root: PathBuf,
}

impl InstallLayout {
    /// Anchors `root` to the current directory when it is relative.
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = std::path::absolute(root.as_ref())?;
        Ok(Self {
            root: normalize_lexically(&root),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn clone_dir(&self) -> PathBuf {
        self.root.join(CLONE_DIR_NAME)
    }

    /// Present only in a completed checkout.
    pub fn source_marker(&self) -> PathBuf {
        self.clone_dir().join("CMakeLists.txt")
    }

    pub fn build_dir(&self) -> PathBuf {
        self.clone_dir().join("build")
    }

    pub fn models_dir(&self) -> PathBuf {
        self.clone_dir().join("models")
    }

    pub fn model_path(&self, filename: &str) -> PathBuf {
        self.models_dir().join(filename)
    }

    pub fn inference_binary(&self) -> PathBuf {
        self.build_dir().join("main")
    }

    pub fn api_dir(&self) -> PathBuf {
        self.clone_dir().join("api")
    }

    pub fn api_script(&self) -> PathBuf {
        self.api_dir().join(API_SCRIPT_NAME)
    }

    pub fn profile_dir(&self) -> PathBuf {
        self.root.join(PROFILE_DIR)
    }

    pub fn user_js(&self) -> PathBuf {
        self.profile_dir().join("user.js")
    }

    pub fn start_page(&self) -> PathBuf {
        self.profile_dir().join("defaults").join("vox_start.html")
    }

    pub fn install_record(&self) -> PathBuf {
        self.root.join(INSTALL_RECORD_NAME)
    }
}

/// Resolves `.` and `..` components without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_hang_off_the_clone() {
        let layout = InstallLayout::new("/opt/vox").unwrap();
        assert_eq!(layout.clone_dir(), PathBuf::from("/opt/vox/llama.cpp"));
        assert_eq!(
            layout.source_marker(),
            PathBuf::from("/opt/vox/llama.cpp/CMakeLists.txt")
        );
        assert_eq!(
            layout.api_script(),
            PathBuf::from("/opt/vox/llama.cpp/api/vox_llm_api.py")
        );
        assert_eq!(
            layout.inference_binary(),
            PathBuf::from("/opt/vox/llama.cpp/build/main")
        );
        assert_eq!(
            layout.user_js(),
            PathBuf::from("/opt/vox/firefox-115.0/browser/app/profile/user.js")
        );
    }

    #[test]
    fn relative_root_becomes_absolute() {
        let layout = InstallLayout::new("./sub/../vox").unwrap();
        assert!(layout.root().is_absolute());
        assert!(layout.root().ends_with("vox"));
        assert!(!layout.root().components().any(|c| c == Component::ParentDir));
    }

    #[test]
    fn normalize_folds_parent_components() {
        assert_eq!(
            normalize_lexically(Path::new("/a/llama.cpp/api/../models/./m.gguf")),
            PathBuf::from("/a/llama.cpp/models/m.gguf")
        );
    }
}
