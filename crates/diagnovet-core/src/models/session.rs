//! Session flag models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role chosen at login or signup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Clinic staff: reports, dashboard, settings
    Veterinarian,
    /// Pet owner: appointment booking only
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Veterinarian => "veterinarian",
            Role::Client => "client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "veterinarian" => Ok(Role::Veterinarian),
            "client" => Ok(Role::Client),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// UI language. Spanish is the clinic default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" => Ok(Language::Es),
            "en" => Ok(Language::En),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

/// Snapshot of every session flag, read in one pass.
///
/// Absent flags read as `false`/`None`; there is no schema beyond that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFlags {
    /// Veterinarian completed onboarding
    pub logged_in: bool,
    /// Client signed in
    pub client_logged_in: bool,
    /// MFA step passed
    pub mfa_verified: bool,
    /// Role chosen at login/signup
    pub role: Option<Role>,
    /// Email or username entered at login
    pub email: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Phone entered at signup
    pub phone: Option<String>,
    /// UI language
    pub language: Language,
    /// Onboarding just finished (banner pending)
    pub setup_completed: bool,
}

impl SessionFlags {
    /// Check if the session belongs to an onboarded veterinarian.
    pub fn is_veterinarian(&self) -> bool {
        self.logged_in && self.role == Some(Role::Veterinarian)
    }

    /// Name for headers, falling back to a generic label.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("User")
    }
}
