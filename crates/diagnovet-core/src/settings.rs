//! Settings page: clinic details, professional profile and language.

use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::db::{SessionStore, StoreError};
use crate::forms::{ClinicForm, ProfileForm, ValidationErrors};
use crate::models::{ClinicProfile, Language, UserProfile};

/// How long the "saved" notice stays up.
pub const SAVED_NOTICE: Duration = Duration::from_millis(3_000);

/// Settings errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// A stored profile and how long to show the "saved" notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved<T> {
    pub value: T,
    pub notice: Duration,
}

impl<T> Saved<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            notice: SAVED_NOTICE,
        }
    }
}

pub struct SettingsPanel<'a> {
    store: &'a SessionStore,
}

impl<'a> SettingsPanel<'a> {
    pub fn new(store: &'a SessionStore) -> Self {
        Self { store }
    }

    /// Clinic form pre-filled from the store; blank if absent or unreadable.
    pub fn clinic_form(&self) -> ClinicForm {
        match self.store.clinic_profile() {
            Ok(Some(profile)) => ClinicForm::from(&profile),
            Ok(None) => ClinicForm::default(),
            Err(e) => {
                warn!(error = %e, "unreadable clinic profile, starting blank");
                ClinicForm::default()
            }
        }
    }

    /// Profile form pre-filled from the store; blank if absent or unreadable.
    pub fn profile_form(&self) -> ProfileForm {
        match self.store.user_profile() {
            Ok(Some(profile)) => ProfileForm::from(&profile),
            Ok(None) => ProfileForm::default(),
            Err(e) => {
                warn!(error = %e, "unreadable user profile, starting blank");
                ProfileForm::default()
            }
        }
    }

    pub fn save_clinic(&self, form: &ClinicForm) -> SettingsResult<Saved<ClinicProfile>> {
        let profile = form.validate()?;
        self.store.save_clinic_profile(&profile)?;
        info!("clinic profile updated");
        Ok(Saved::new(profile))
    }

    pub fn save_profile(&self, form: &ProfileForm) -> SettingsResult<Saved<UserProfile>> {
        let profile = form.validate()?;
        self.store.save_user_profile(&profile)?;
        info!("user profile updated");
        Ok(Saved::new(profile))
    }

    pub fn language(&self) -> Language {
        self.store.language()
    }

    pub fn set_language(&self, language: Language) -> SettingsResult<()> {
        self.store.set_language(language)?;
        info!(language = language.code(), "language changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::StorageKey;

    #[test]
    fn test_blank_forms_when_absent() {
        let store = SessionStore::open_in_memory().unwrap();
        let panel = SettingsPanel::new(&store);
        assert_eq!(panel.clinic_form(), ClinicForm::default());
        assert_eq!(panel.profile_form(), ProfileForm::default());
    }

    #[test]
    fn test_malformed_profile_starts_blank() {
        let store = SessionStore::open_in_memory().unwrap();
        store.set_raw(StorageKey::UserData, "[1, 2]").unwrap();
        assert_eq!(SettingsPanel::new(&store).profile_form(), ProfileForm::default());
    }

    #[test]
    fn test_save_and_reload_clinic() {
        let store = SessionStore::open_in_memory().unwrap();
        let panel = SettingsPanel::new(&store);
        let form = ClinicForm {
            clinic_name: "Clínica Norte".into(),
            address: "Av. Libertad 45".into(),
            phone_number: "+34 911 000 111".into(),
        };

        let saved = panel.save_clinic(&form).unwrap();
        assert_eq!(saved.value.clinic_name, "Clínica Norte");
        assert_eq!(saved.notice, SAVED_NOTICE);
        assert_eq!(panel.clinic_form(), form);
    }

    #[test]
    fn test_invalid_profile_not_saved() {
        let store = SessionStore::open_in_memory().unwrap();
        let panel = SettingsPanel::new(&store);

        let err = panel.save_profile(&ProfileForm::default()).unwrap_err();
        match err {
            SettingsError::Validation(errors) => {
                assert_eq!(errors.fields(), vec!["phoneNumber", "professionalTitle", "fullName"])
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.user_profile().unwrap().is_none());
    }

    #[test]
    fn test_language() {
        let store = SessionStore::open_in_memory().unwrap();
        let panel = SettingsPanel::new(&store);
        assert_eq!(panel.language(), Language::Es);
        panel.set_language(Language::En).unwrap();
        assert_eq!(panel.language(), Language::En);
    }
}
