use thiserror::Error;
use tracing::debug;

use installer_core::catalog::{custom_fields_enabled, DEFAULT_MODEL_INDEX, MODEL_CATALOG};
use installer_core::config::{next_in, prev_in};
use installer_core::{InstallConfig, ModelSelection, SearchEngine, TabLayout, Theme};

use super::steps::{WizardPage, PAGES};

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("You must accept the terms to continue.")]
    TermsNotAccepted,
}

/// Everything the user has entered so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WizardState {
    pub selected_model: usize,
    pub custom_url: String,
    pub custom_filename: String,
    pub tab_layout: TabLayout,
    pub theme: Theme,
    pub search_engine: SearchEngine,
    pub terms_accepted: bool,
    pub current_page: usize,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            selected_model: DEFAULT_MODEL_INDEX,
            custom_url: String::new(),
            custom_filename: String::new(),
            tab_layout: TabLayout::default(),
            theme: Theme::default(),
            search_engine: SearchEngine::default(),
            terms_accepted: false,
            current_page: 0,
        }
    }
}

/// Which navigation buttons are shown for the current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavControls {
    pub back_visible: bool,
    pub next_visible: bool,
}

impl NavControls {
    fn for_page(index: usize, page_count: usize) -> Self {
        Self {
            back_visible: index > 0,
            next_visible: index + 1 < page_count,
        }
    }
}

pub struct Navigator {
    state: WizardState,
    controls: NavControls,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::with_state(WizardState::default())
    }

    pub fn with_state(state: WizardState) -> Self {
        let mut navigator = Self {
            controls: NavControls::for_page(0, PAGES.len()),
            state,
        };
        navigator.go_to(navigator.state.current_page);
        navigator
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn page_count(&self) -> usize {
        PAGES.len()
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    pub fn page(&self) -> WizardPage {
        PAGES[self.state.current_page]
    }

    pub fn controls(&self) -> NavControls {
        self.controls
    }

    /// Jumps to `index` without validation. `index` must be a valid page.
    pub fn go_to(&mut self, index: usize) -> NavControls {
        debug_assert!(index < PAGES.len(), "page index {index} out of range");
        self.state.current_page = index;
        self.controls = NavControls::for_page(index, PAGES.len());
        self.controls
    }

    pub fn advance(&mut self) -> Result<(), WizardError> {
        let page = self.page();
        if page == WizardPage::Terms && !self.state.terms_accepted {
            debug!("advance blocked: terms not accepted");
            return Err(WizardError::TermsNotAccepted);
        }
        if !self.controls.next_visible {
            return Ok(());
        }
        if page == WizardPage::Model {
            debug!(
                enabled = self.custom_fields_enabled(),
                "custom model fields re-evaluated"
            );
        }
        self.go_to(self.state.current_page + 1);
        Ok(())
    }

    pub fn back(&mut self) {
        if self.state.current_page > 0 {
            self.go_to(self.state.current_page - 1);
        }
    }

    pub fn toggle_terms(&mut self) {
        self.state.terms_accepted = !self.state.terms_accepted;
    }

    pub fn select_model(&mut self, index: usize) {
        if index < MODEL_CATALOG.len() {
            self.state.selected_model = index;
        }
    }

    pub fn select_previous_model(&mut self) {
        self.select_model(self.state.selected_model.saturating_sub(1));
    }

    pub fn select_next_model(&mut self) {
        self.select_model(self.state.selected_model + 1);
    }

    /// Derived from the selection on every call.
    pub fn custom_fields_enabled(&self) -> bool {
        custom_fields_enabled(self.state.selected_model)
    }

    pub fn custom_url_mut(&mut self) -> Option<&mut String> {
        if self.custom_fields_enabled() {
            Some(&mut self.state.custom_url)
        } else {
            None
        }
    }

    pub fn custom_filename_mut(&mut self) -> Option<&mut String> {
        if self.custom_fields_enabled() {
            Some(&mut self.state.custom_filename)
        } else {
            None
        }
    }

    pub fn set_tab_layout(&mut self, value: TabLayout) {
        self.state.tab_layout = value;
    }

    pub fn set_theme(&mut self, value: Theme) {
        self.state.theme = value;
    }

    pub fn set_search_engine(&mut self, value: SearchEngine) {
        self.state.search_engine = value;
    }

    pub fn cycle_tab_layout(&mut self) {
        self.set_tab_layout(next_in(&TabLayout::ALL, self.state.tab_layout));
    }

    pub fn cycle_theme(&mut self) {
        self.set_theme(next_in(&Theme::ALL, self.state.theme));
    }

    pub fn cycle_search_engine(&mut self) {
        self.set_search_engine(next_in(&SearchEngine::ALL, self.state.search_engine));
    }

    pub fn cycle_tab_layout_back(&mut self) {
        self.set_tab_layout(prev_in(&TabLayout::ALL, self.state.tab_layout));
    }

    pub fn cycle_theme_back(&mut self) {
        self.set_theme(prev_in(&Theme::ALL, self.state.theme));
    }

    pub fn cycle_search_engine_back(&mut self) {
        self.set_search_engine(prev_in(&SearchEngine::ALL, self.state.search_engine));
    }

    /// Immutable copy of the choices for the installer.
    pub fn snapshot(&self) -> InstallConfig {
        InstallConfig {
            model: ModelSelection {
                index: self.state.selected_model,
                custom_url: self.state.custom_url.clone(),
                custom_filename: self.state.custom_filename.clone(),
            },
            tab_layout: self.state.tab_layout,
            theme: self.state.theme,
            search_engine: self.state.search_engine,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_index() -> usize {
        MODEL_CATALOG.iter().position(|c| c.is_custom()).unwrap()
    }

    fn on_model_page() -> Navigator {
        let mut nav = Navigator::new();
        nav.toggle_terms();
        nav.advance().unwrap();
        assert_eq!(nav.page(), WizardPage::Model);
        nav
    }

    #[test]
    fn starts_on_terms_page_without_back_button() {
        let nav = Navigator::new();
        assert_eq!(nav.current_page(), 0);
        assert_eq!(
            nav.controls(),
            NavControls {
                back_visible: false,
                next_visible: true
            }
        );
    }

    #[test]
    fn advance_without_terms_is_blocked() {
        let mut nav = Navigator::new();
        assert_eq!(nav.advance(), Err(WizardError::TermsNotAccepted));
        assert_eq!(nav.current_page(), 0);
    }

    #[test]
    fn advance_with_terms_moves_exactly_one_page() {
        let mut nav = Navigator::new();
        nav.toggle_terms();
        assert_eq!(nav.advance(), Ok(()));
        assert_eq!(nav.current_page(), 1);
    }

    #[test]
    fn pages_are_visited_in_order_and_last_has_no_next() {
        let mut nav = on_model_page();
        nav.advance().unwrap();
        assert_eq!(nav.page(), WizardPage::Preferences);
        nav.advance().unwrap();
        assert_eq!(nav.page(), WizardPage::Install);
        assert_eq!(
            nav.controls(),
            NavControls {
                back_visible: true,
                next_visible: false
            }
        );
        nav.advance().unwrap();
        assert_eq!(nav.page(), WizardPage::Install);
    }

    #[test]
    fn back_is_unguarded_and_stops_at_first_page() {
        let mut nav = on_model_page();
        nav.toggle_terms();
        nav.back();
        assert_eq!(nav.current_page(), 0);
        nav.back();
        assert_eq!(nav.current_page(), 0);
    }

    #[test]
    fn go_to_recomputes_controls() {
        let mut nav = Navigator::new();
        let controls = nav.go_to(2);
        assert!(controls.back_visible && controls.next_visible);
        assert_eq!(nav.controls(), controls);
    }

    #[test]
    fn non_custom_models_leave_custom_fields_disabled_after_advance() {
        for (index, choice) in MODEL_CATALOG.iter().enumerate() {
            if choice.is_custom() || choice.is_none() {
                continue;
            }
            let mut nav = on_model_page();
            nav.select_model(index);
            nav.advance().unwrap();
            assert!(!nav.custom_fields_enabled(), "index {index}");
        }
    }

    #[test]
    fn custom_field_enablement_follows_selection() {
        let mut nav = on_model_page();
        nav.select_model(custom_index());
        assert!(nav.custom_fields_enabled());
        nav.select_model(custom_index());
        assert!(nav.custom_fields_enabled());
        for index in 0..MODEL_CATALOG.len() {
            nav.select_model(custom_index());
            nav.select_model(index);
            assert_eq!(nav.custom_fields_enabled(), index == custom_index());
        }
    }

    #[test]
    fn disabled_custom_fields_cannot_be_edited() {
        let mut nav = on_model_page();
        nav.select_model(0);
        assert!(nav.custom_url_mut().is_none());
        nav.select_model(custom_index());
        nav.custom_url_mut().unwrap().push_str("https://x/y.gguf");
        nav.custom_filename_mut().unwrap().push_str("y.gguf");
        assert_eq!(nav.state().custom_url, "https://x/y.gguf");
        assert_eq!(nav.state().custom_filename, "y.gguf");
    }

    #[test]
    fn model_selection_is_clamped_to_catalog() {
        let mut nav = Navigator::new();
        nav.select_model(0);
        nav.select_previous_model();
        assert_eq!(nav.state().selected_model, 0);
        nav.select_model(MODEL_CATALOG.len() - 1);
        nav.select_next_model();
        assert_eq!(nav.state().selected_model, MODEL_CATALOG.len() - 1);
    }

    #[test]
    fn snapshot_carries_all_choices() {
        let mut nav = Navigator::new();
        nav.select_model(custom_index());
        nav.custom_url_mut().unwrap().push_str(" https://x/y.gguf ");
        nav.cycle_tab_layout();
        nav.cycle_theme();
        nav.set_search_engine(SearchEngine::Brave);

        let config = nav.snapshot();
        assert_eq!(config.model.index, custom_index());
        assert_eq!(config.tab_layout, TabLayout::Horizontal);
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.search_engine, SearchEngine::Brave);
        let resolved = config.resolved_model().unwrap();
        assert_eq!(resolved.url, "https://x/y.gguf");
        assert_eq!(resolved.filename, "custom_model.gguf");
    }
}
