use serde::Serialize;

use crate::catalog::{
    model_choice, valid_model_filename, ModelSource, CUSTOM_FALLBACK_FILENAME,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TabLayout {
    #[default]
    Vertical,
    Horizontal,
}

impl TabLayout {
    pub const ALL: [TabLayout; 2] = [TabLayout::Vertical, TabLayout::Horizontal];

    pub fn as_str(self) -> &'static str {
        match self {
            TabLayout::Vertical => "vertical",
            TabLayout::Horizontal => "horizontal",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    #[default]
    DuckDuckGo,
    Startpage,
    Brave,
}

impl SearchEngine {
    pub const ALL: [SearchEngine; 3] = [
        SearchEngine::DuckDuckGo,
        SearchEngine::Startpage,
        SearchEngine::Brave,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchEngine::DuckDuckGo => "duckduckgo",
            SearchEngine::Startpage => "startpage",
            SearchEngine::Brave => "brave",
        }
    }

    pub fn search_url(self) -> &'static str {
        match self {
            SearchEngine::DuckDuckGo => "https://duckduckgo.com/?q=",
            SearchEngine::Startpage => "https://www.startpage.com/do/dsearch?query=",
            SearchEngine::Brave => "https://search.brave.com/search?q=",
        }
    }
}

/// Cycles to the entry after `current` in `all`, wrapping around.
pub fn next_in<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let pos = all.iter().position(|item| *item == current).unwrap_or(0);
    all[(pos + 1) % all.len()]
}

/// Cycles to the entry before `current` in `all`, wrapping around.
pub fn prev_in<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let pos = all.iter().position(|item| *item == current).unwrap_or(0);
    all[(pos + all.len() - 1) % all.len()]
}

/// Model selection as captured by the wizard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ModelSelection {
    pub index: usize,
    pub custom_url: String,
    pub custom_filename: String,
}

/// Effective download source for the selected model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedModel {
    pub url: String,
    pub filename: String,
}

impl ModelSelection {
    /// Returns `None` when no model should be installed. A custom entry with a
    /// blank URL counts as no model.
    pub fn resolve(&self) -> Option<ResolvedModel> {
        let choice = model_choice(self.index)?;
        match choice.source {
            ModelSource::None => None,
            ModelSource::Url(url) => Some(ResolvedModel {
                url: url.to_string(),
                filename: choice.filename.unwrap_or(CUSTOM_FALLBACK_FILENAME).to_string(),
            }),
            ModelSource::Custom => {
                let url = self.custom_url.trim();
                if url.is_empty() {
                    return None;
                }
                let filename = self.custom_filename.trim();
                let filename = if valid_model_filename(filename) {
                    filename
                } else {
                    CUSTOM_FALLBACK_FILENAME
                };
                Some(ResolvedModel {
                    url: url.to_string(),
                    filename: filename.to_string(),
                })
            }
        }
    }
}

/// Finalized wizard choices handed to the installer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InstallConfig {
    pub model: ModelSelection,
    pub tab_layout: TabLayout,
    pub theme: Theme,
    pub search_engine: SearchEngine,
}

impl InstallConfig {
    pub fn resolved_model(&self) -> Option<ResolvedModel> {
        self.model.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MODEL_CATALOG;

    fn custom_index() -> usize {
        MODEL_CATALOG.iter().position(|c| c.is_custom()).unwrap()
    }

    #[test]
    fn custom_model_trims_url_and_falls_back_on_empty_filename() {
        let selection = ModelSelection {
            index: custom_index(),
            custom_url: " https://x/y.gguf ".to_string(),
            custom_filename: String::new(),
        };
        let resolved = selection.resolve().unwrap();
        assert_eq!(resolved.url, "https://x/y.gguf");
        assert_eq!(resolved.filename, CUSTOM_FALLBACK_FILENAME);
    }

    #[test]
    fn custom_model_keeps_trimmed_filename() {
        let selection = ModelSelection {
            index: custom_index(),
            custom_url: "https://x/y.gguf".to_string(),
            custom_filename: "  mine.gguf\t".to_string(),
        };
        assert_eq!(selection.resolve().unwrap().filename, "mine.gguf");
    }

    #[test]
    fn custom_model_rejects_path_like_filename() {
        let selection = ModelSelection {
            index: custom_index(),
            custom_url: "https://x/y.gguf".to_string(),
            custom_filename: "../../escape.gguf".to_string(),
        };
        assert_eq!(selection.resolve().unwrap().filename, CUSTOM_FALLBACK_FILENAME);
    }

    #[test]
    fn custom_model_with_blank_url_resolves_to_none() {
        let selection = ModelSelection {
            index: custom_index(),
            custom_url: "   ".to_string(),
            custom_filename: "x.gguf".to_string(),
        };
        assert_eq!(selection.resolve(), None);
    }

    #[test]
    fn catalog_model_ignores_custom_fields() {
        let selection = ModelSelection {
            index: 2,
            custom_url: "https://ignored".to_string(),
            custom_filename: "ignored.gguf".to_string(),
        };
        let resolved = selection.resolve().unwrap();
        assert_eq!(resolved.filename, "phi-2.Q4_K_M.gguf");
        assert!(resolved.url.ends_with("/phi-2.Q4_K_M.gguf"));
    }

    #[test]
    fn no_model_resolves_to_none() {
        assert_eq!(ModelSelection::default().resolve(), None);
    }

    #[test]
    fn cycling_wraps_around() {
        assert_eq!(next_in(&Theme::ALL, Theme::Light), Theme::Dark);
        assert_eq!(
            next_in(&SearchEngine::ALL, SearchEngine::Startpage),
            SearchEngine::Brave
        );
        assert_eq!(
            prev_in(&SearchEngine::ALL, SearchEngine::DuckDuckGo),
            SearchEngine::Brave
        );
        assert_eq!(
            prev_in(&SearchEngine::ALL, SearchEngine::Brave),
            SearchEngine::Startpage
        );
        assert_eq!(prev_in(&Theme::ALL, Theme::Dark), Theme::Light);
    }
}
