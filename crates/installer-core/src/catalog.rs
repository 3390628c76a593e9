//! Fixed catalog of selectable models.

/// Filename used for a custom model when the user leaves the field empty.
pub const CUSTOM_FALLBACK_FILENAME: &str = "custom_model.gguf";

/// Catalog index preselected when the wizard opens.
pub const DEFAULT_MODEL_INDEX: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelSource {
    /// Skip every AI-related step.
    None,
    Url(&'static str),
    /// URL and filename are supplied by the user at runtime.
    Custom,
}

#[derive(Clone, Copy, Debug)]
pub struct ModelChoice {
    pub label: &'static str,
    pub source: ModelSource,
    pub filename: Option<&'static str>,
}

impl ModelChoice {
    pub fn is_custom(&self) -> bool {
        self.source == ModelSource::Custom
    }

    pub fn is_none(&self) -> bool {
        self.source == ModelSource::None
    }
}

pub const MODEL_CATALOG: &[ModelChoice] = &[
    ModelChoice {
        label: "No AI assistant (skip all AI setup)",
        source: ModelSource::None,
        filename: None,
    },
    ModelChoice {
        label: "TinyLlama-1.1B-Chat (0.5GB RAM, 0.5GB disk)",
        source: ModelSource::Url(
            "https://huggingface.co/TinyLlama/TinyLlama-1.1B-Chat-v1.0-GGUF/resolve/main/tinyllama-1.1b-chat-v1.0.Q4_K_M.gguf",
        ),
        filename: Some("tinyllama-1.1b-chat-v1.0.Q4_K_M.gguf"),
    },
    ModelChoice {
        label: "Phi-2 2.7B (1.5GB RAM, 2GB disk)",
        source: ModelSource::Url(
            "https://huggingface.co/microsoft/phi-2-GGUF/resolve/main/phi-2.Q4_K_M.gguf",
        ),
        filename: Some("phi-2.Q4_K_M.gguf"),
    },
    ModelChoice {
        label: "Mistral-7B-Instruct (4GB RAM, 4GB disk)",
        source: ModelSource::Url(
            "https://huggingface.co/TheBloke/Mistral-7B-Instruct-v0.2-GGUF/resolve/main/mistral-7b-instruct-v0.2.Q4_K_M.gguf",
        ),
        filename: Some("mistral-7b-instruct-v0.2.Q4_K_M.gguf"),
    },
    ModelChoice {
        label: "Custom GGUF model (enter URL)",
        source: ModelSource::Custom,
        filename: Some(CUSTOM_FALLBACK_FILENAME),
    },
];

pub fn model_choice(index: usize) -> Option<&'static ModelChoice> {
    MODEL_CATALOG.get(index)
}

/// Whether the custom URL/filename inputs accept input for this selection.
pub fn custom_fields_enabled(index: usize) -> bool {
    model_choice(index).is_some_and(ModelChoice::is_custom)
}

/// A plain file name: no path separators and not a relative directory marker.
pub fn valid_model_filename(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains('/')
        && !value.contains('\\')
        && !value.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_exactly_one_none_and_one_custom_entry() {
        let none: Vec<_> = MODEL_CATALOG.iter().filter(|c| c.is_none()).collect();
        let custom: Vec<_> = MODEL_CATALOG.iter().filter(|c| c.is_custom()).collect();
        assert_eq!(none.len(), 1);
        assert_eq!(custom.len(), 1);
        assert!(none[0].filename.is_none());
        assert_eq!(custom[0].filename, Some(CUSTOM_FALLBACK_FILENAME));
    }

    #[test]
    fn only_custom_entry_enables_custom_fields() {
        for (index, choice) in MODEL_CATALOG.iter().enumerate() {
            assert_eq!(custom_fields_enabled(index), choice.is_custom(), "index {index}");
        }
        assert!(!custom_fields_enabled(MODEL_CATALOG.len()));
    }

    #[test]
    fn filename_validation_rejects_paths() {
        assert!(valid_model_filename("model.gguf"));
        assert!(!valid_model_filename(""));
        assert!(!valid_model_filename(".."));
        assert!(!valid_model_filename("../etc/passwd"));
        assert!(!valid_model_filename("dir\\model.gguf"));
    }
}
