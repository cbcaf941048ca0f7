//! DiagnovetAI Core Library
//!
//! Local-first core for a veterinary clinic front end: onboarding with a demo
//! MFA step, client appointment booking, and imaging reports annotated image
//! by image. The UI shell renders; this crate owns state, validation, page
//! gating and navigation.
//!
//! # Architecture
//!
//! ```text
//!   UI shell ──► ClinicCore (FFI) ──► Gate::enter(page) ──► allow / redirect
//!                     │
//!                     ▼
//!             Form::validate()  ── errors ──► per-field messages
//!                     │
//!                     ▼
//!            submit handler (AuthFlow, AppointmentBook, ReportRegistry, ...)
//!                     │
//!                     ▼
//!           ┌─────────────────────┐
//!           │    SessionStore     │  key → JSON value (SQLite)
//!           └─────────┬───────────┘
//!                     │
//!                     ▼
//!       Redirect { page, delay } ──► UI navigates after the delay
//! ```
//!
//! # Modules
//!
//! - [`db`]: session store with one load/save function per entity
//! - [`models`]: domain types (Appointment, Report, SessionFlags, etc.)
//! - [`forms`]: form drafts and validators
//! - [`auth`]: MFA strategy, page gate, onboarding flow
//! - [`booking`]: appointment booking and cancellation
//! - [`reports`]: report creation and image analysis
//! - [`dashboard`], [`schedule`], [`settings`]: page data
//! - [`config`], [`logging`]: environment configuration and log output

pub mod auth;
pub mod booking;
pub mod collection;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod ffi;
pub mod forms;
pub mod logging;
pub mod models;
pub mod reports;
pub mod schedule;
pub mod settings;

// Re-export commonly used types
pub use auth::{AuthFlow, AuthStrategy, DemoAuthStrategy, Gate, GateOutcome, Page, Redirect};
pub use booking::AppointmentBook;
pub use config::Config;
pub use db::{SessionStore, StorageKey};
pub use models::{
    Appointment, ClinicProfile, Image, Language, Report, Role, SessionFlags, UserProfile,
};
pub use reports::{AnalysisSession, ReportRegistry};
pub use settings::SettingsPanel;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use chrono::Utc;
use ffi::*;
use std::sync::{Arc, Mutex};
use tracing::info;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicError {
    #[error("Store error: {message}")]
    Store { message: String },

    #[error("Validation failed on {} field(s)", .errors.len())]
    Validation { errors: Vec<FfiFieldError> },

    #[error("The MFA code is incorrect. Try again.")]
    MfaMismatch,

    #[error("No report draft in progress")]
    NoDraft,

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<db::StoreError> for ClinicError {
    fn from(e: db::StoreError) -> Self {
        ClinicError::Store {
            message: e.to_string(),
        }
    }
}

impl From<forms::ValidationErrors> for ClinicError {
    fn from(e: forms::ValidationErrors) -> Self {
        ClinicError::Validation {
            errors: e.into_iter().map(|f| f.into()).collect(),
        }
    }
}

impl From<auth::AuthError> for ClinicError {
    fn from(e: auth::AuthError) -> Self {
        match e {
            auth::AuthError::MfaMismatch => ClinicError::MfaMismatch,
            auth::AuthError::Validation(errors) => errors.into(),
            auth::AuthError::Store(store) => store.into(),
        }
    }
}

impl From<booking::BookingError> for ClinicError {
    fn from(e: booking::BookingError) -> Self {
        match e {
            booking::BookingError::Validation(errors) => errors.into(),
            booking::BookingError::Store(store) => store.into(),
        }
    }
}

impl From<reports::ReportError> for ClinicError {
    fn from(e: reports::ReportError) -> Self {
        match e {
            reports::ReportError::Validation(errors) => errors.into(),
            reports::ReportError::NoDraft => ClinicError::NoDraft,
            reports::ReportError::Store(store) => store.into(),
        }
    }
}

impl From<settings::SettingsError> for ClinicError {
    fn from(e: settings::SettingsError) -> Self {
        match e {
            settings::SettingsError::Validation(errors) => errors.into(),
            settings::SettingsError::Store(store) => store.into(),
        }
    }
}

impl From<config::ConfigError> for ClinicError {
    fn from(e: config::ConfigError) -> Self {
        ClinicError::Config {
            message: e.to_string(),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicError::Store {
            message: format!("Lock poisoned: {}", e),
        }
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a persistent session store at the given path.
#[uniffi::export]
pub fn open_session(path: String) -> Result<Arc<ClinicCore>, ClinicError> {
    let store = SessionStore::open(&path)?;
    Ok(Arc::new(ClinicCore::new(store, Arc::new(DemoAuthStrategy::default()))))
}

/// Create a session store that lives as long as the returned object.
#[uniffi::export]
pub fn open_session_in_memory() -> Result<Arc<ClinicCore>, ClinicError> {
    let store = SessionStore::open_in_memory()?;
    Ok(Arc::new(ClinicCore::new(store, Arc::new(DemoAuthStrategy::default()))))
}

/// Read the environment, install logging and open the configured store.
#[uniffi::export]
pub fn open_from_env() -> Result<Arc<ClinicCore>, ClinicError> {
    let config = Config::from_env()?;
    logging::init_logging(config.log_level);
    Ok(Arc::new(open_with_config(&config)?))
}

/// Open a core as described by `config`.
pub fn open_with_config(config: &Config) -> Result<ClinicCore, ClinicError> {
    let store = match &config.store_path {
        Some(path) => SessionStore::open(path)?,
        None => SessionStore::open_in_memory()?,
    };
    if !store.contains(StorageKey::UiLanguage)? {
        store.set_language(config.default_language)?;
    }
    info!(persistent = config.store_path.is_some(), "clinic core ready");
    Ok(ClinicCore::new(
        store,
        Arc::new(DemoAuthStrategy::new(&config.mfa_code)),
    ))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe session wrapper for FFI.
#[derive(uniffi::Object)]
pub struct ClinicCore {
    store: Arc<Mutex<SessionStore>>,
    strategy: Arc<dyn AuthStrategy>,
    analysis: Mutex<Option<AnalysisSession>>,
}

impl ClinicCore {
    /// Wrap a store with a custom MFA strategy.
    pub fn new(store: SessionStore, strategy: Arc<dyn AuthStrategy>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            strategy,
            analysis: Mutex::new(None),
        }
    }

    fn parse_language(code: &str) -> Result<Language, ClinicError> {
        code.parse::<Language>()
            .map_err(|message| ClinicError::InvalidInput { message })
    }
}

#[uniffi::export]
impl ClinicCore {
    // =========================================================================
    // Navigation
    // =========================================================================

    /// Decide whether the page at `path` may render.
    pub fn enter_page(&self, path: String) -> Result<FfiGateOutcome, ClinicError> {
        let page = Page::from_path(&path).ok_or_else(|| ClinicError::InvalidInput {
            message: format!("Unknown page: {}", path),
        })?;
        let store = self.store.lock()?;
        Ok(Gate::new(&store).enter(&page)?.into())
    }

    /// Current session flags.
    pub fn session_flags(&self) -> Result<FfiSessionFlags, ClinicError> {
        let store = self.store.lock()?;
        Ok(store.session_flags()?.into())
    }

    /// Header strip data.
    pub fn header(&self) -> Result<FfiHeader, ClinicError> {
        let store = self.store.lock()?;
        Ok(dashboard::Dashboard::new(&store).header()?.into())
    }

    // =========================================================================
    // Onboarding
    // =========================================================================

    /// Log in with an email or username for the given role.
    pub fn login(
        &self,
        identifier: String,
        role: String,
        language: String,
    ) -> Result<FfiRedirect, ClinicError> {
        let role = role
            .parse::<Role>()
            .map_err(|message| ClinicError::InvalidInput { message })?;
        let language = Self::parse_language(&language)?;
        let form = forms::LoginForm { identifier, role };

        let store = self.store.lock()?;
        let flow = AuthFlow::new(&store, self.strategy.as_ref());
        Ok(flow.login(&form, language)?.into())
    }

    /// Register a demo account.
    pub fn signup(&self, form: FfiSignupForm) -> Result<FfiRedirect, ClinicError> {
        let store = self.store.lock()?;
        let flow = AuthFlow::new(&store, self.strategy.as_ref());
        Ok(flow.signup(&form.into())?.into())
    }

    /// Input mask for the MFA field.
    pub fn format_mfa_code(&self, input: String) -> String {
        auth::format_mfa_code(&input)
    }

    /// Check the MFA code.
    pub fn verify_mfa(&self, code: String) -> Result<FfiRedirect, ClinicError> {
        let store = self.store.lock()?;
        let flow = AuthFlow::new(&store, self.strategy.as_ref());
        Ok(flow.verify_mfa(&code)?.into())
    }

    /// Save clinic details (pre-confirmation).
    pub fn complete_clinic_setup(&self, form: FfiClinicForm) -> Result<FfiRedirect, ClinicError> {
        let store = self.store.lock()?;
        let flow = AuthFlow::new(&store, self.strategy.as_ref());
        Ok(flow.complete_clinic_setup(&form.into())?.into())
    }

    /// Save the professional profile (post-confirmation).
    pub fn complete_profile(&self, form: FfiProfileForm) -> Result<FfiRedirect, ClinicError> {
        let store = self.store.lock()?;
        let flow = AuthFlow::new(&store, self.strategy.as_ref());
        Ok(flow.complete_profile(&form.into())?.into())
    }

    /// End the session.
    pub fn logout(&self) -> Result<FfiRedirect, ClinicError> {
        self.analysis.lock()?.take();
        let store = self.store.lock()?;
        let flow = AuthFlow::new(&store, self.strategy.as_ref());
        Ok(flow.logout()?.into())
    }

    // =========================================================================
    // Appointments
    // =========================================================================

    /// Veterinarians available for booking.
    pub fn veterinarians(&self) -> Vec<FfiVeterinarian> {
        AppointmentBook::roster().iter().map(|v| v.into()).collect()
    }

    /// Book an appointment.
    pub fn book_appointment(
        &self,
        form: FfiBookingForm,
    ) -> Result<FfiBookingConfirmation, ClinicError> {
        let store = self.store.lock()?;
        let book = AppointmentBook::new(&store);
        Ok(book.book(&form.into())?.into())
    }

    /// Appointments, newest first, optionally filtered.
    pub fn list_appointments(&self, term: Option<String>) -> Result<Vec<FfiAppointment>, ClinicError> {
        let store = self.store.lock()?;
        let book = AppointmentBook::new(&store);
        let appointments = match term {
            Some(term) => book.search(&term),
            None => book.list(),
        };
        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    /// Cancel an appointment by id.
    pub fn cancel_appointment(&self, id: String) -> Result<bool, ClinicError> {
        let store = self.store.lock()?;
        Ok(AppointmentBook::new(&store).cancel(&id)?)
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Blank report form dated today.
    pub fn new_report_form(&self) -> FfiReportForm {
        forms::ReportForm::new(Utc::now().date_naive()).into()
    }

    /// Create a report directly.
    pub fn create_report(&self, form: FfiReportForm) -> Result<FfiReportReceipt, ClinicError> {
        let store = self.store.lock()?;
        Ok(ReportRegistry::new(&store).create(&form.into())?.into())
    }

    /// Park a report with images and open the analysis page.
    pub fn start_report_draft(
        &self,
        form: FfiReportForm,
        images: Vec<FfiImageUpload>,
    ) -> Result<FfiReportReceipt, ClinicError> {
        let images = images.into_iter().map(Image::from).collect();
        let mut analysis = self.analysis.lock()?;
        let store = self.store.lock()?;
        let receipt = ReportRegistry::new(&store).start_draft(&form.into(), images)?;
        // A session over the replaced draft must not outlive it
        analysis.take();
        Ok(receipt.into())
    }

    /// Report by id.
    pub fn get_report(&self, id: String) -> Result<Option<FfiReport>, ClinicError> {
        let store = self.store.lock()?;
        Ok(ReportRegistry::new(&store).find(&id).map(|r| r.into()))
    }

    /// Reports, newest first, optionally filtered.
    pub fn list_reports(&self, term: Option<String>) -> Result<Vec<FfiReport>, ClinicError> {
        let store = self.store.lock()?;
        let registry = ReportRegistry::new(&store);
        let reports = match term {
            Some(term) => registry.search(&term),
            None => registry.list(),
        };
        Ok(reports.into_iter().map(|r| r.into()).collect())
    }

    /// Remove a report by id.
    pub fn remove_report(&self, id: String) -> Result<bool, ClinicError> {
        let store = self.store.lock()?;
        Ok(ReportRegistry::new(&store).remove(&id)?)
    }

    // =========================================================================
    // Analysis
    // =========================================================================

    /// Load the stored draft into a fresh analysis session.
    pub fn start_analysis(&self) -> Result<FfiAnalysisState, ClinicError> {
        let mut analysis = self.analysis.lock()?;
        let store = self.store.lock()?;
        let session = AnalysisSession::load(&store)?;
        let state = FfiAnalysisState::from(&session);
        *analysis = Some(session);
        Ok(state)
    }

    pub fn analysis_next(&self) -> Result<FfiAnalysisState, ClinicError> {
        let mut guard = self.analysis.lock()?;
        let session = guard.as_mut().ok_or(ClinicError::NoDraft)?;
        session.next();
        Ok(FfiAnalysisState::from(&*session))
    }

    pub fn analysis_prev(&self) -> Result<FfiAnalysisState, ClinicError> {
        let mut guard = self.analysis.lock()?;
        let session = guard.as_mut().ok_or(ClinicError::NoDraft)?;
        session.prev();
        Ok(FfiAnalysisState::from(&*session))
    }

    /// Replace the observations on the image on screen.
    pub fn set_observations(&self, text: String) -> Result<FfiAnalysisState, ClinicError> {
        let mut guard = self.analysis.lock()?;
        let session = guard.as_mut().ok_or(ClinicError::NoDraft)?;
        session.set_observations(text);
        Ok(FfiAnalysisState::from(&*session))
    }

    /// Store the analysed report and return to the dashboard.
    ///
    /// The session survives a failed finish so the notes can be retried.
    pub fn finish_analysis(&self) -> Result<FfiRedirect, ClinicError> {
        let mut analysis = self.analysis.lock()?;
        let session = analysis.as_ref().ok_or(ClinicError::NoDraft)?;
        let store = self.store.lock()?;
        let (_, redirect) = session.finish(&store)?;
        analysis.take();
        Ok(redirect.into())
    }

    // =========================================================================
    // Dashboard & Schedule
    // =========================================================================

    /// Dashboard data. Pass the banner returned by `enter_page`.
    pub fn dashboard(&self, term: String, banner: bool) -> Result<FfiDashboardSummary, ClinicError> {
        let store = self.store.lock()?;
        let summary =
            dashboard::Dashboard::new(&store).summary(&term, banner, Utc::now().date_naive())?;
        Ok(summary.into())
    }

    /// Availability grid starting today.
    pub fn schedule(&self) -> Vec<FfiVetSchedule> {
        schedule::weekly_schedule(Utc::now().date_naive())
            .into_iter()
            .map(|s| s.into())
            .collect()
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn clinic_settings(&self) -> Result<FfiClinicForm, ClinicError> {
        let store = self.store.lock()?;
        Ok(SettingsPanel::new(&store).clinic_form().into())
    }

    /// Save clinic details. Returns how long to show the saved notice (ms).
    pub fn save_clinic_settings(&self, form: FfiClinicForm) -> Result<u64, ClinicError> {
        let store = self.store.lock()?;
        let saved = SettingsPanel::new(&store).save_clinic(&form.into())?;
        Ok(saved.notice.as_millis() as u64)
    }

    pub fn profile_settings(&self) -> Result<FfiProfileForm, ClinicError> {
        let store = self.store.lock()?;
        Ok(SettingsPanel::new(&store).profile_form().into())
    }

    /// Save the professional profile. Returns the saved-notice delay (ms).
    pub fn save_profile_settings(&self, form: FfiProfileForm) -> Result<u64, ClinicError> {
        let store = self.store.lock()?;
        let saved = SettingsPanel::new(&store).save_profile(&form.into())?;
        Ok(saved.notice.as_millis() as u64)
    }

    /// UI language code.
    pub fn language(&self) -> Result<String, ClinicError> {
        let store = self.store.lock()?;
        Ok(SettingsPanel::new(&store).language().code().to_string())
    }

    pub fn set_language(&self, code: String) -> Result<(), ClinicError> {
        let language = Self::parse_language(&code)?;
        let store = self.store.lock()?;
        SettingsPanel::new(&store).set_language(language)?;
        Ok(())
    }
}
