use installer_core::catalog::{model_choice, ModelSource};

use super::navigator::WizardState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardPage {
    Terms,
    Model,
    Preferences,
    Install,
}

pub(crate) const PAGES: [WizardPage; 4] = [
    WizardPage::Terms,
    WizardPage::Model,
    WizardPage::Preferences,
    WizardPage::Install,
];

impl WizardPage {
    pub fn title(self) -> &'static str {
        match self {
            WizardPage::Terms => "Welcome",
            WizardPage::Model => "Local AI model",
            WizardPage::Preferences => "Browser preferences",
            WizardPage::Install => "Install",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SummaryItem {
    pub label: &'static str,
    pub value: String,
}

/// Review lines shown on the install page.
pub(crate) fn build_install_summary(state: &WizardState) -> Vec<SummaryItem> {
    let model = match model_choice(state.selected_model) {
        Some(choice) => match choice.source {
            ModelSource::None => "None".to_string(),
            ModelSource::Url(_) => choice.label.to_string(),
            ModelSource::Custom => {
                let url = state.custom_url.trim();
                if url.is_empty() {
                    "Custom (no URL entered, AI setup will be skipped)".to_string()
                } else {
                    format!("Custom: {url}")
                }
            }
        },
        None => "None".to_string(),
    };
    vec![
        SummaryItem {
            label: "Model",
            value: model,
        },
        SummaryItem {
            label: "Tab layout",
            value: state.tab_layout.as_str().to_string(),
        },
        SummaryItem {
            label: "Theme",
            value: state.theme.as_str().to_string(),
        },
        SummaryItem {
            label: "Search engine",
            value: state.search_engine.as_str().to_string(),
        },
    ]
}
