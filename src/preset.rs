use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A named fasting window: hours fasting, then hours eating
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
pub enum FastingPreset {
    #[value(name = "12-12")]
    #[serde(rename = "12:12")]
    #[strum(to_string = "12:12")]
    TwelveTwelve,
    #[default]
    #[value(name = "16-8")]
    #[serde(rename = "16:8")]
    #[strum(to_string = "16:8")]
    SixteenEight,
    #[value(name = "18-6")]
    #[serde(rename = "18:6")]
    #[strum(to_string = "18:6")]
    EighteenSix,
    #[value(name = "20-4")]
    #[serde(rename = "20:4")]
    #[strum(to_string = "20:4")]
    TwentyFour,
}

impl FastingPreset {
    /// Every preset in the order the picker lists them
    pub const ALL: [FastingPreset; 4] = [
        FastingPreset::TwelveTwelve,
        FastingPreset::SixteenEight,
        FastingPreset::EighteenSix,
        FastingPreset::TwentyFour,
    ];

    pub fn hours(&self) -> u32 {
        match self {
            FastingPreset::TwelveTwelve => 12,
            FastingPreset::SixteenEight => 16,
            FastingPreset::EighteenSix => 18,
            FastingPreset::TwentyFour => 20,
        }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Position in [`FastingPreset::ALL`]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or_default()
    }
}

/// The user's current choice of fasting window. Exactly one preset is selected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct FastingConfiguration {
    selected: FastingPreset,
}

impl FastingConfiguration {
    pub fn new(selected: FastingPreset) -> Self {
        Self { selected }
    }

    pub fn selected(&self) -> FastingPreset {
        self.selected
    }

    pub fn select(&mut self, preset: FastingPreset) {
        self.selected = preset;
    }

    /// Duration handed to the next `start`
    pub fn duration_hours(&self) -> u32 {
        self.selected.hours()
    }
}
