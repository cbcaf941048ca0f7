//! Page gate.
//!
//! Runs before a page mounts. Reads the session flags and either lets the
//! page render or redirects away from it.

use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use crate::db::{SessionStore, StorageKey, StoreResult};

/// Every navigable page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    LoginVeterinarian,
    Signup,
    Mfa,
    PreConfirmation,
    PostConfirmation,
    Dashboard,
    Settings,
    NewReport,
    /// `/reports/{id}`
    ReportDetail(String),
    ReportAnalysis,
    BookAppointment,
    MyAppointments,
}

impl Page {
    pub fn path(&self) -> String {
        match self {
            Page::Home => "/".to_string(),
            Page::LoginVeterinarian => "/login-veterinarian".to_string(),
            Page::Signup => "/signup".to_string(),
            Page::Mfa => "/mfa".to_string(),
            Page::PreConfirmation => "/pre-confirmation".to_string(),
            Page::PostConfirmation => "/post-confirmation".to_string(),
            Page::Dashboard => "/dashboard".to_string(),
            Page::Settings => "/settings".to_string(),
            Page::NewReport => "/reports/new".to_string(),
            Page::ReportDetail(id) => format!("/reports/{}", id),
            Page::ReportAnalysis => "/report-analysis".to_string(),
            Page::BookAppointment => "/book-appointment".to_string(),
            Page::MyAppointments => "/my-appointments".to_string(),
        }
    }

    /// Parse a path. Trailing slashes are ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let path = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        let page = match path {
            "/" | "" => Page::Home,
            "/login-veterinarian" => Page::LoginVeterinarian,
            "/signup" => Page::Signup,
            "/mfa" => Page::Mfa,
            "/pre-confirmation" => Page::PreConfirmation,
            "/post-confirmation" => Page::PostConfirmation,
            "/dashboard" => Page::Dashboard,
            "/settings" => Page::Settings,
            "/reports/new" => Page::NewReport,
            "/report-analysis" => Page::ReportAnalysis,
            "/book-appointment" => Page::BookAppointment,
            "/my-appointments" => Page::MyAppointments,
            other => {
                let id = other.strip_prefix("/reports/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Page::ReportDetail(id.to_string())
            }
        };
        Some(page)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// A navigation the UI should perform after `delay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub page: Page,
    pub delay: Duration,
}

impl Redirect {
    pub fn now(page: Page) -> Self {
        Self {
            page,
            delay: Duration::ZERO,
        }
    }

    pub fn after(page: Page, millis: u64) -> Self {
        Self {
            page,
            delay: Duration::from_millis(millis),
        }
    }
}

/// Result of entering a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Render the page. `banner` is the one-time onboarding notice.
    Allow { banner: bool },
    Redirect(Redirect),
}

impl GateOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateOutcome::Allow { .. })
    }

    fn allow() -> Self {
        GateOutcome::Allow { banner: false }
    }

    fn redirect(page: Page) -> Self {
        GateOutcome::Redirect(Redirect::now(page))
    }
}

/// Page gate over the session store.
pub struct Gate<'a> {
    store: &'a SessionStore,
}

impl<'a> Gate<'a> {
    pub fn new(store: &'a SessionStore) -> Self {
        Self { store }
    }

    /// Decide whether `page` may render.
    ///
    /// Entering the dashboard consumes the setup-completed flag.
    pub fn enter(&self, page: &Page) -> StoreResult<GateOutcome> {
        let flags = self.store.session_flags()?;

        let outcome = match page {
            Page::Home | Page::LoginVeterinarian | Page::Signup => GateOutcome::allow(),
            Page::Mfa => {
                let has_email = flags.email.as_deref().is_some_and(|e| !e.trim().is_empty());
                Self::require(has_email)
            }
            Page::PreConfirmation => Self::require(flags.mfa_verified),
            Page::PostConfirmation => Self::require(self.store.contains(StorageKey::ClinicData)?),
            Page::Dashboard => {
                if flags.is_veterinarian() {
                    let banner = self.store.take_flag(StorageKey::SetupCompleted)?;
                    GateOutcome::Allow { banner }
                } else {
                    GateOutcome::redirect(Page::Home)
                }
            }
            Page::Settings | Page::NewReport | Page::ReportDetail(_) => {
                Self::require(flags.logged_in)
            }
            Page::ReportAnalysis => {
                if !flags.logged_in {
                    GateOutcome::redirect(Page::Home)
                } else {
                    match self.store.current_report() {
                        Ok(Some(_)) => GateOutcome::allow(),
                        Ok(None) => GateOutcome::redirect(Page::NewReport),
                        Err(e) => {
                            warn!(error = %e, "unreadable report draft");
                            GateOutcome::redirect(Page::NewReport)
                        }
                    }
                }
            }
            Page::BookAppointment | Page::MyAppointments => Self::require(flags.client_logged_in),
        };

        if let GateOutcome::Redirect(redirect) = &outcome {
            debug!(page = %page, to = %redirect.page, "gate redirect");
        }
        Ok(outcome)
    }

    fn require(ok: bool) -> GateOutcome {
        if ok {
            GateOutcome::allow()
        } else {
            GateOutcome::redirect(Page::Home)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn home() -> GateOutcome {
        GateOutcome::Redirect(Redirect::now(Page::Home))
    }

    #[test]
    fn test_paths_round_trip() {
        let pages = [
            Page::Home,
            Page::LoginVeterinarian,
            Page::Signup,
            Page::Mfa,
            Page::PreConfirmation,
            Page::PostConfirmation,
            Page::Dashboard,
            Page::Settings,
            Page::NewReport,
            Page::ReportDetail("1705312800000".into()),
            Page::ReportAnalysis,
            Page::BookAppointment,
            Page::MyAppointments,
        ];
        for page in pages {
            assert_eq!(Page::from_path(&page.path()), Some(page));
        }
        assert_eq!(Page::from_path("/dashboard/"), Some(Page::Dashboard));
        assert_eq!(Page::from_path("/reports/"), None);
        assert_eq!(Page::from_path("/nowhere"), None);
    }

    #[test]
    fn test_public_pages_always_allowed() {
        let store = SessionStore::open_in_memory().unwrap();
        let gate = Gate::new(&store);
        for page in [Page::Home, Page::LoginVeterinarian, Page::Signup] {
            assert!(gate.enter(&page).unwrap().is_allowed());
        }
    }

    #[test]
    fn test_fresh_session_redirects_home() {
        let store = SessionStore::open_in_memory().unwrap();
        let gate = Gate::new(&store);
        for page in [
            Page::Mfa,
            Page::PreConfirmation,
            Page::PostConfirmation,
            Page::Dashboard,
            Page::Settings,
            Page::NewReport,
            Page::ReportDetail("1".into()),
            Page::ReportAnalysis,
            Page::BookAppointment,
            Page::MyAppointments,
        ] {
            assert_eq!(gate.enter(&page).unwrap(), home(), "page {}", page);
        }
    }

    #[test]
    fn test_dashboard_needs_veterinarian_role() {
        let store = SessionStore::open_in_memory().unwrap();
        store.set_flag(StorageKey::LoggedIn, true).unwrap();
        let gate = Gate::new(&store);

        assert_eq!(gate.enter(&Page::Dashboard).unwrap(), home());
        assert!(gate.enter(&Page::Settings).unwrap().is_allowed());

        store.set_role(Role::Veterinarian).unwrap();
        assert!(gate.enter(&Page::Dashboard).unwrap().is_allowed());
    }

    #[test]
    fn test_dashboard_banner_shown_once() {
        let store = SessionStore::open_in_memory().unwrap();
        store.set_flag(StorageKey::LoggedIn, true).unwrap();
        store.set_role(Role::Veterinarian).unwrap();
        store.set_flag(StorageKey::SetupCompleted, true).unwrap();
        let gate = Gate::new(&store);

        assert_eq!(
            gate.enter(&Page::Dashboard).unwrap(),
            GateOutcome::Allow { banner: true }
        );
        assert_eq!(
            gate.enter(&Page::Dashboard).unwrap(),
            GateOutcome::Allow { banner: false }
        );
    }

    #[test]
    fn test_analysis_without_draft_goes_to_new_report() {
        let store = SessionStore::open_in_memory().unwrap();
        store.set_flag(StorageKey::LoggedIn, true).unwrap();
        let gate = Gate::new(&store);

        assert_eq!(
            gate.enter(&Page::ReportAnalysis).unwrap(),
            GateOutcome::Redirect(Redirect::now(Page::NewReport))
        );

        store.set_raw(StorageKey::CurrentReport, "{broken").unwrap();
        assert_eq!(
            gate.enter(&Page::ReportAnalysis).unwrap(),
            GateOutcome::Redirect(Redirect::now(Page::NewReport))
        );
    }

    #[test]
    fn test_client_pages() {
        let store = SessionStore::open_in_memory().unwrap();
        store.set_flag(StorageKey::ClientLoggedIn, true).unwrap();
        let gate = Gate::new(&store);

        assert!(gate.enter(&Page::BookAppointment).unwrap().is_allowed());
        assert!(gate.enter(&Page::MyAppointments).unwrap().is_allowed());
        assert_eq!(gate.enter(&Page::Dashboard).unwrap(), home());
    }
}
