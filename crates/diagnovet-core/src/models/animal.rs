//! Animal attributes shared by appointments and reports.

use serde::{Deserialize, Serialize};

/// Species offered by every animal picker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Dog,
    Cat,
    Bird,
    Rabbit,
    Hamster,
    GuineaPig,
    Other,
}

impl Species {
    /// Picker order.
    pub const ALL: [Species; 7] = [
        Species::Dog,
        Species::Cat,
        Species::Bird,
        Species::Rabbit,
        Species::Hamster,
        Species::GuineaPig,
        Species::Other,
    ];

    /// Stored value (e.g. "guinea_pig").
    pub fn value(&self) -> &'static str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
            Species::Bird => "bird",
            Species::Rabbit => "rabbit",
            Species::Hamster => "hamster",
            Species::GuineaPig => "guinea_pig",
            Species::Other => "other",
        }
    }

    /// Display label (e.g. "Guinea Pig").
    pub fn label(&self) -> &'static str {
        match self {
            Species::Dog => "Dog",
            Species::Cat => "Cat",
            Species::Bird => "Bird",
            Species::Rabbit => "Rabbit",
            Species::Hamster => "Hamster",
            Species::GuineaPig => "Guinea Pig",
            Species::Other => "Other",
        }
    }

    /// Accept either the stored value or the display label, any case.
    pub fn from_input(input: &str) -> Option<Self> {
        let needle = input.trim();
        Self::ALL.iter().copied().find(|s| {
            s.value().eq_ignore_ascii_case(needle) || s.label().eq_ignore_ascii_case(needle)
        })
    }
}

/// Animal sex.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn value(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}
