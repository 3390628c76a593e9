//! Browser preferences written to the profile's `user.js`.

use std::fmt;
use std::path::Path;

use crate::api_script::quoted_literal;
use crate::config::InstallConfig;
use crate::settings::SearchPrefStyle;

pub const STYLESHEETS_KEY: &str = "toolkit.legacyUserProfileCustomizations.stylesheets";
pub const TAB_LAYOUT_KEY: &str = "userChrome.vox-tab-layout";
pub const THEME_KEY: &str = "userChrome.vox-theme";
pub const HOMEPAGE_KEY: &str = "browser.startup.homepage";
pub const SEARCH_ENGINE_KEY: &str = "browser.search.defaultenginename";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrefValue {
    Bool(bool),
    Str(String),
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Bool(value) => write!(f, "{value}"),
            PrefValue::Str(value) => f.write_str(&quoted_literal(value)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserPrefs {
    pub tab_layout: String,
    pub theme: String,
    pub homepage: String,
    pub search_engine: String,
}

impl BrowserPrefs {
    pub fn from_config(config: &InstallConfig, start_page: &Path, style: SearchPrefStyle) -> Self {
        let search_engine = match style {
            SearchPrefStyle::EngineName => config.search_engine.as_str(),
            SearchPrefStyle::UrlTemplate => config.search_engine.search_url(),
        };
        Self {
            tab_layout: config.tab_layout.as_str().to_string(),
            theme: config.theme.as_str().to_string(),
            homepage: format!("file://{}", start_page.display()),
            search_engine: search_engine.to_string(),
        }
    }

    pub fn entries(&self) -> Vec<(&'static str, PrefValue)> {
        vec![
            (STYLESHEETS_KEY, PrefValue::Bool(true)),
            (TAB_LAYOUT_KEY, PrefValue::Str(self.tab_layout.clone())),
            (THEME_KEY, PrefValue::Str(self.theme.clone())),
            (HOMEPAGE_KEY, PrefValue::Str(self.homepage.clone())),
            (SEARCH_ENGINE_KEY, PrefValue::Str(self.search_engine.clone())),
        ]
    }

    pub fn render(&self) -> String {
        self.entries()
            .into_iter()
            .map(|(key, value)| format!("user_pref({}, {value});\n", quoted_literal(key)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SearchEngine, TabLayout, Theme};

    fn config() -> InstallConfig {
        InstallConfig {
            tab_layout: TabLayout::Horizontal,
            theme: Theme::Light,
            search_engine: SearchEngine::Brave,
            ..InstallConfig::default()
        }
    }

    #[test]
    fn renders_five_prefs_with_inputs_verbatim() {
        let prefs = BrowserPrefs::from_config(
            &config(),
            Path::new("/srv/vox/profile/defaults/vox_start.html"),
            SearchPrefStyle::EngineName,
        );
        let rendered = prefs.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"user_pref("toolkit.legacyUserProfileCustomizations.stylesheets", true);"#,
                r#"user_pref("userChrome.vox-tab-layout", "horizontal");"#,
                r#"user_pref("userChrome.vox-theme", "light");"#,
                r#"user_pref("browser.startup.homepage", "file:///srv/vox/profile/defaults/vox_start.html");"#,
                r#"user_pref("browser.search.defaultenginename", "brave");"#,
            ]
        );
    }

    #[test]
    fn legacy_style_writes_search_url() {
        let prefs = BrowserPrefs::from_config(
            &config(),
            Path::new("/p/vox_start.html"),
            SearchPrefStyle::UrlTemplate,
        );
        assert!(prefs
            .render()
            .contains(r#"user_pref("browser.search.defaultenginename", "https://search.brave.com/search?q=");"#));
    }

    #[test]
    fn string_values_are_escaped() {
        let value = PrefValue::Str("a\"b\\c".to_string());
        assert_eq!(value.to_string(), r#""a\"b\\c""#);
    }
}
