// ABOUTME: Steps of the site-builder wizard and their static metadata

use serde::{Deserialize, Serialize};

/// Steps in the site-builder wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Sections,
    BasicInfo,
    ContentConfig,
    Preview,
}

impl WizardStep {
    /// Get all steps in order
    pub fn all() -> &'static [WizardStep] {
        &[
            Self::Sections,
            Self::BasicInfo,
            Self::ContentConfig,
            Self::Preview,
        ]
    }

    /// Step number, 1-indexed
    pub fn number(&self) -> u8 {
        match self {
            Self::Sections => 1,
            Self::BasicInfo => 2,
            Self::ContentConfig => 3,
            Self::Preview => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Sections),
            2 => Some(Self::BasicInfo),
            3 => Some(Self::ContentConfig),
            4 => Some(Self::Preview),
            _ => None,
        }
    }

    pub fn total() -> usize {
        4
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Sections => "Sections",
            Self::BasicInfo => "Basic information",
            Self::ContentConfig => "Content",
            Self::Preview => "Preview",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Sections => "Choose and order the sections of your site",
            Self::BasicInfo => "Company details, style, colors and domain",
            Self::ContentConfig => "Fill in the content of each section",
            Self::Preview => "Review and publish",
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Sections => Some(Self::BasicInfo),
            Self::BasicInfo => Some(Self::ContentConfig),
            Self::ContentConfig => Some(Self::Preview),
            Self::Preview => None,
        }
    }

    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::Sections => None,
            Self::BasicInfo => Some(Self::Sections),
            Self::ContentConfig => Some(Self::BasicInfo),
            Self::Preview => Some(Self::ContentConfig),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_navigation() {
        let step = WizardStep::Sections;
        assert_eq!(step.next(), Some(WizardStep::BasicInfo));
        assert_eq!(step.previous(), None);

        let step = WizardStep::Preview;
        assert_eq!(step.next(), None);
        assert_eq!(step.previous(), Some(WizardStep::ContentConfig));
    }

    #[test]
    fn test_step_numbers() {
        for (index, step) in WizardStep::all().iter().enumerate() {
            assert_eq!(step.number() as usize, index + 1);
            assert_eq!(WizardStep::from_number(step.number()), Some(*step));
        }
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(5), None);
        assert_eq!(WizardStep::total(), 4);
    }

    #[test]
    fn test_steps_are_ordered() {
        assert!(WizardStep::Sections < WizardStep::BasicInfo);
        assert!(WizardStep::ContentConfig < WizardStep::Preview);
    }
}
