//! Typed load/save functions, one per stored entity.

use tracing::debug;

use super::{SessionStore, StorageKey, StoreResult};
use crate::models::{
    Appointment, ClinicProfile, Language, Report, Role, SessionFlags, UserProfile,
};

impl SessionStore {
    // =========================================================================
    // Session Flags
    // =========================================================================

    /// Read every session flag. Absent or malformed flags read as unset.
    pub fn session_flags(&self) -> StoreResult<SessionFlags> {
        Ok(SessionFlags {
            logged_in: self.flag(StorageKey::LoggedIn),
            client_logged_in: self.flag(StorageKey::ClientLoggedIn),
            mfa_verified: self.flag(StorageKey::MfaVerified),
            role: self.load_or_default(StorageKey::UserRole),
            email: self.load_or_default(StorageKey::UserEmail),
            name: self.load_or_default(StorageKey::UserName),
            phone: self.load_or_default(StorageKey::UserPhone),
            language: self.load_or_default(StorageKey::UiLanguage),
            setup_completed: self.flag(StorageKey::SetupCompleted),
        })
    }

    /// Read a boolean flag.
    pub fn flag(&self, key: StorageKey) -> bool {
        self.load_or_default::<bool>(key)
    }

    /// Set a boolean flag.
    pub fn set_flag(&self, key: StorageKey, value: bool) -> StoreResult<()> {
        debug!(key = %key, value, "set session flag");
        self.save(key, &value)
    }

    pub fn set_role(&self, role: Role) -> StoreResult<()> {
        self.save(StorageKey::UserRole, &role)
    }

    pub fn set_language(&self, language: Language) -> StoreResult<()> {
        self.save(StorageKey::UiLanguage, &language)
    }

    pub fn language(&self) -> Language {
        self.load_or_default(StorageKey::UiLanguage)
    }

    /// Read a one-shot flag and clear it.
    pub fn take_flag(&self, key: StorageKey) -> StoreResult<bool> {
        let value = self.flag(key);
        if value {
            self.remove(key)?;
        }
        Ok(value)
    }

    // =========================================================================
    // Appointments
    // =========================================================================

    /// Load the appointment list, newest first.
    pub fn appointments(&self) -> StoreResult<Vec<Appointment>> {
        Ok(self.load(StorageKey::Appointments)?.unwrap_or_default())
    }

    /// Load the appointment list, or an empty list if it is unreadable.
    pub fn appointments_or_default(&self) -> Vec<Appointment> {
        self.load_or_default(StorageKey::Appointments)
    }

    pub fn save_appointments(&self, appointments: &[Appointment]) -> StoreResult<()> {
        self.save(StorageKey::Appointments, appointments)
    }

    /// Insert an appointment at the head of the list.
    pub fn prepend_appointment(&self, appointment: Appointment) -> StoreResult<()> {
        let mut appointments = self.appointments_or_default();
        appointments.insert(0, appointment);
        self.save_appointments(&appointments)
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Load the report list, newest first.
    pub fn reports(&self) -> StoreResult<Vec<Report>> {
        Ok(self.load(StorageKey::Reports)?.unwrap_or_default())
    }

    /// Load the report list, or an empty list if it is unreadable.
    pub fn reports_or_default(&self) -> Vec<Report> {
        self.load_or_default(StorageKey::Reports)
    }

    pub fn save_reports(&self, reports: &[Report]) -> StoreResult<()> {
        self.save(StorageKey::Reports, reports)
    }

    /// Insert a report at the head of the list.
    pub fn prepend_report(&self, report: Report) -> StoreResult<()> {
        let mut reports = self.reports_or_default();
        reports.insert(0, report);
        self.save_reports(&reports)
    }

    /// Load the report draft awaiting analysis.
    pub fn current_report(&self) -> StoreResult<Option<Report>> {
        self.load(StorageKey::CurrentReport)
    }

    pub fn save_current_report(&self, report: &Report) -> StoreResult<()> {
        self.save(StorageKey::CurrentReport, report)
    }

    pub fn clear_current_report(&self) -> StoreResult<bool> {
        self.remove(StorageKey::CurrentReport)
    }

    /// Move a finished draft onto the report list in one transaction.
    pub fn commit_current_report(&self, report: Report) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        self.prepend_report(report)?;
        self.clear_current_report()?;
        tx.commit()?;
        Ok(())
    }

    // =========================================================================
    // Profiles
    // =========================================================================

    pub fn clinic_profile(&self) -> StoreResult<Option<ClinicProfile>> {
        self.load(StorageKey::ClinicData)
    }

    pub fn save_clinic_profile(&self, profile: &ClinicProfile) -> StoreResult<()> {
        self.save(StorageKey::ClinicData, profile)
    }

    pub fn user_profile(&self) -> StoreResult<Option<UserProfile>> {
        self.load(StorageKey::UserData)
    }

    pub fn save_user_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        self.save(StorageKey::UserData, profile)
    }
}
