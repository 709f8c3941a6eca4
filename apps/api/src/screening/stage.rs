use serde::{Deserialize, Serialize};

use crate::models::candidate::CandidateField;

pub const TOTAL_STAGES: u8 = 9;

/// One step of the screening wizard. Strictly linear: every stage except
/// `Name` has exactly one previous stage, every stage except `Complete` has
/// exactly one next stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    #[default]
    Name,
    Email,
    Phone,
    Experience,
    Position,
    Location,
    TechStack,
    Answers,
    Complete,
}

impl Stage {
    const ORDER: [Stage; TOTAL_STAGES as usize] = [
        Stage::Name,
        Stage::Email,
        Stage::Phone,
        Stage::Experience,
        Stage::Position,
        Stage::Location,
        Stage::TechStack,
        Stage::Answers,
        Stage::Complete,
    ];

    /// 1-based stage number.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_number(number: u8) -> Option<Stage> {
        number
            .checked_sub(1)
            .and_then(|idx| Self::ORDER.get(idx as usize).copied())
    }

    pub fn next(self) -> Option<Stage> {
        Stage::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Stage> {
        Stage::from_number(self.number() - 1)
    }

    /// The record field a text stage writes, if any.
    pub fn field(self) -> Option<CandidateField> {
        match self {
            Stage::Name => Some(CandidateField::Name),
            Stage::Email => Some(CandidateField::Email),
            Stage::Phone => Some(CandidateField::Phone),
            Stage::Experience => Some(CandidateField::Experience),
            Stage::Position => Some(CandidateField::Position),
            Stage::Location => Some(CandidateField::Location),
            Stage::TechStack => Some(CandidateField::TechStack),
            Stage::Answers | Stage::Complete => None,
        }
    }

    /// Input label shown on the stage's screen.
    pub fn prompt(self) -> &'static str {
        match self {
            Stage::Name => "Enter your full name",
            Stage::Email => "Enter Gmail address",
            Stage::Phone => "Enter phone (+countrycode)",
            Stage::Experience => "Years of Experience",
            Stage::Position => "Desired Position",
            Stage::Location => "Current Location",
            Stage::TechStack => "Enter Tech Stack",
            Stage::Answers => "Your Answer",
            Stage::Complete => "",
        }
    }
}

/// Display and generation language, chosen from the sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Tamil,
    Hindi,
}

/// Localised strings for one language.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Translations {
    pub title: &'static str,
    pub next: &'static str,
    pub generate: &'static str,
    pub submit: &'static str,
    pub complete: &'static str,
}

pub const BACK_LABEL: &str = "\u{2b05} Back";

impl Language {
    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Tamil => "Tamil",
            Language::Hindi => "Hindi",
        }
    }

    pub fn translations(self) -> Translations {
        match self {
            Language::English => Translations {
                title: "💼 TalentScout Hiring Assistant",
                next: "Next",
                generate: "Generate Questions",
                submit: "Submit Answers",
                complete: "Screening Completed Successfully",
            },
            Language::Tamil => Translations {
                title: "💼 TalentScout ஆட்சேர்ப்பு உதவியாளர்",
                next: "அடுத்தது",
                generate: "கேள்விகள் உருவாக்கவும்",
                submit: "சமர்ப்பிக்கவும்",
                complete: "தேர்வு நிறைவடைந்தது",
            },
            Language::Hindi => Translations {
                title: "💼 TalentScout भर्ती सहायक",
                next: "आगे बढ़ें",
                generate: "प्रश्न उत्पन्न करें",
                submit: "जमा करें",
                complete: "स्क्रीनिंग पूर्ण",
            },
        }
    }

    /// Label of the forward button on `stage`, `None` on the final stage.
    pub fn forward_label(self, stage: Stage) -> Option<&'static str> {
        let t = self.translations();
        match stage {
            Stage::TechStack => Some(t.generate),
            Stage::Answers => Some(t.submit),
            Stage::Complete => None,
            _ => Some(t.next),
        }
    }
}
