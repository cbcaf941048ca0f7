//! Onboarding flow: login, signup, MFA, clinic and profile setup, logout.

use tracing::{info, warn};

use super::{validate_mfa_code, AuthError, AuthResult, AuthStrategy, Page, Redirect};
use crate::db::{SessionStore, StorageKey};
use crate::forms::{ClinicForm, LoginForm, ProfileForm, SignupForm};
use crate::models::{Language, Role};

/// Login spinner before moving on to MFA.
pub const LOGIN_DELAY_MS: u64 = 500;
/// Signup spinner plus the success message.
pub const SIGNUP_DELAY_MS: u64 = 1_000 + 1_500;
/// Pause after a correct MFA code.
pub const MFA_DELAY_MS: u64 = 500;
/// Pause after saving clinic details.
pub const CLINIC_SETUP_DELAY_MS: u64 = 500;
/// Pause after saving the professional profile.
pub const PROFILE_SETUP_DELAY_MS: u64 = 1_500;

/// Submit handlers for the onboarding pages.
pub struct AuthFlow<'a> {
    store: &'a SessionStore,
    strategy: &'a dyn AuthStrategy,
}

impl<'a> AuthFlow<'a> {
    pub fn new(store: &'a SessionStore, strategy: &'a dyn AuthStrategy) -> Self {
        Self { store, strategy }
    }

    /// Store the identifier, role and language, then go to MFA.
    pub fn login(&self, form: &LoginForm, language: Language) -> AuthResult<Redirect> {
        let identifier = form.validate()?;

        self.store.save(StorageKey::UserEmail, &identifier)?;
        self.store.set_role(form.role)?;
        self.store.set_language(language)?;

        info!(role = %form.role, "login accepted, awaiting MFA");
        Ok(Redirect::after(Page::Mfa, LOGIN_DELAY_MS))
    }

    /// Register a demo account.
    ///
    /// Clients are signed in straight away; veterinarians continue to MFA.
    pub fn signup(&self, form: &SignupForm) -> AuthResult<Redirect> {
        let signup = form.validate()?;

        self.store.save(StorageKey::UserEmail, &signup.email)?;
        self.store.save(StorageKey::UserName, &signup.full_name)?;
        self.store.save(StorageKey::UserPhone, &signup.phone)?;
        self.store.set_role(signup.role)?;
        self.store
            .set_flag(StorageKey::ClientLoggedIn, signup.role == Role::Client)?;

        info!(role = %signup.role, "signup stored");
        let next = match signup.role {
            Role::Client => Page::BookAppointment,
            Role::Veterinarian => Page::Mfa,
        };
        Ok(Redirect::after(next, SIGNUP_DELAY_MS))
    }

    /// Check the MFA code and route by role. Retries are unlimited.
    pub fn verify_mfa(&self, code: &str) -> AuthResult<Redirect> {
        let code = validate_mfa_code(code)?;
        if !self.strategy.verify_code(&code) {
            warn!("MFA code rejected");
            return Err(AuthError::MfaMismatch);
        }

        self.store.set_flag(StorageKey::MfaVerified, true)?;
        let role: Option<Role> = self.store.load_or_default(StorageKey::UserRole);

        if role == Some(Role::Client) {
            self.store.set_flag(StorageKey::ClientLoggedIn, true)?;
            info!("MFA verified, client signed in");
            Ok(Redirect::after(Page::BookAppointment, MFA_DELAY_MS))
        } else {
            info!("MFA verified, clinic setup pending");
            Ok(Redirect::after(Page::PreConfirmation, MFA_DELAY_MS))
        }
    }

    /// Save clinic details collected at pre-confirmation.
    pub fn complete_clinic_setup(&self, form: &ClinicForm) -> AuthResult<Redirect> {
        let clinic = form.validate()?;
        self.store.save_clinic_profile(&clinic)?;
        info!(clinic = %clinic.clinic_name, "clinic details stored");
        Ok(Redirect::after(Page::PostConfirmation, CLINIC_SETUP_DELAY_MS))
    }

    /// Save the professional profile and finish onboarding.
    ///
    /// This is the only place the veterinarian session becomes logged in.
    pub fn complete_profile(&self, form: &ProfileForm) -> AuthResult<Redirect> {
        let profile = form.validate()?;

        self.store.save_user_profile(&profile)?;
        self.store.set_flag(StorageKey::LoggedIn, true)?;
        self.store.save(StorageKey::UserName, &profile.full_name)?;
        self.store.set_flag(StorageKey::SetupCompleted, true)?;
        if !self.store.contains(StorageKey::UserRole)? {
            self.store.set_role(Role::Veterinarian)?;
        }

        info!("onboarding complete");
        Ok(Redirect::after(Page::Dashboard, PROFILE_SETUP_DELAY_MS))
    }

    /// Drop the whole session.
    pub fn logout(&self) -> AuthResult<Redirect> {
        let removed = self.store.clear()?;
        info!(removed, "logged out");
        Ok(Redirect::now(Page::Home))
    }
}
