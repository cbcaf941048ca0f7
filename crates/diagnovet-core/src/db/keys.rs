//! Storage keys shared by every page of the application.

use std::fmt;

/// Every key the session store knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Veterinarian finished onboarding (bool)
    LoggedIn,
    /// Client signed in (bool)
    ClientLoggedIn,
    /// MFA step passed (bool)
    MfaVerified,
    /// Role chosen at login/signup
    UserRole,
    UserEmail,
    UserName,
    UserPhone,
    UiLanguage,
    /// One-shot banner flag consumed by the dashboard (bool)
    SetupCompleted,
    /// Appointment list, newest first
    Appointments,
    /// Report list, newest first
    Reports,
    /// Report draft awaiting image analysis
    CurrentReport,
    /// Clinic profile from pre-confirmation/settings
    ClinicData,
    /// Professional profile from post-confirmation/settings
    UserData,
}

impl StorageKey {
    /// All known keys.
    pub const ALL: [StorageKey; 14] = [
        StorageKey::LoggedIn,
        StorageKey::ClientLoggedIn,
        StorageKey::MfaVerified,
        StorageKey::UserRole,
        StorageKey::UserEmail,
        StorageKey::UserName,
        StorageKey::UserPhone,
        StorageKey::UiLanguage,
        StorageKey::SetupCompleted,
        StorageKey::Appointments,
        StorageKey::Reports,
        StorageKey::CurrentReport,
        StorageKey::ClinicData,
        StorageKey::UserData,
    ];

    /// Key as stored in the `session_entries` table.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::LoggedIn => "isLoggedIn",
            StorageKey::ClientLoggedIn => "isClientLoggedIn",
            StorageKey::MfaVerified => "mfaVerified",
            StorageKey::UserRole => "userRole",
            StorageKey::UserEmail => "userEmail",
            StorageKey::UserName => "userName",
            StorageKey::UserPhone => "userPhone",
            StorageKey::UiLanguage => "uiLanguage",
            StorageKey::SetupCompleted => "setupCompleted",
            StorageKey::Appointments => "appointments",
            StorageKey::Reports => "reports",
            StorageKey::CurrentReport => "currentReport",
            StorageKey::ClinicData => "clinicData",
            StorageKey::UserData => "userData",
        }
    }

    /// Reverse lookup from the stored key string.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.as_str() == s)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
