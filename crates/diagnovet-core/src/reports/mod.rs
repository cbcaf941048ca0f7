//! Patient reports: creation, draft-and-analyse, lookup and removal.
//!
//! Two ways in:
//!
//! - [`ReportRegistry::create`] stores the report immediately.
//! - [`ReportRegistry::start_draft`] parks it with its images under the
//!   current-report key, and an [`AnalysisSession`] stores it once every
//!   image has been annotated.

mod analysis;

pub use analysis::*;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::auth::{Page, Redirect};
use crate::collection::{filter_by_term, remove_by_id};
use crate::db::{SessionStore, StoreError};
use crate::forms::{ReportForm, ValidationErrors};
use crate::models::{Image, Report};

/// Save spinner plus the "report created" screen.
pub const REPORT_CREATED_DELAY_MS: u64 = 500 + 2_000;

/// Report errors.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("No report draft in progress")]
    NoDraft,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type ReportResult<T> = Result<T, ReportError>;

/// A stored report and the page to show next.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportReceipt {
    pub report: Report,
    pub redirect: Redirect,
}

/// Report list over the session store.
pub struct ReportRegistry<'a> {
    store: &'a SessionStore,
}

impl<'a> ReportRegistry<'a> {
    pub fn new(store: &'a SessionStore) -> Self {
        Self { store }
    }

    pub fn create(&self, form: &ReportForm) -> ReportResult<ReportReceipt> {
        self.create_at(form, Utc::now())
    }

    /// Validate and store a report stamped at `now`.
    pub fn create_at(&self, form: &ReportForm, now: DateTime<Utc>) -> ReportResult<ReportReceipt> {
        let report = Report::new(form.validate()?, now);
        self.store.prepend_report(report.clone())?;

        info!(id = %report.id, "report created");
        Ok(ReportReceipt {
            report,
            redirect: Redirect::after(Page::Dashboard, REPORT_CREATED_DELAY_MS),
        })
    }

    pub fn start_draft(&self, form: &ReportForm, images: Vec<Image>) -> ReportResult<ReportReceipt> {
        self.start_draft_at(form, images, Utc::now())
    }

    /// Validate and park a report with its images for analysis.
    ///
    /// Replaces any earlier draft.
    pub fn start_draft_at(
        &self,
        form: &ReportForm,
        images: Vec<Image>,
        now: DateTime<Utc>,
    ) -> ReportResult<ReportReceipt> {
        let mut report = Report::new(form.validate()?, now);
        report.images = images;
        self.store.save_current_report(&report)?;

        info!(id = %report.id, images = report.images.len(), "report draft started");
        Ok(ReportReceipt {
            report,
            redirect: Redirect::now(Page::ReportAnalysis),
        })
    }

    /// All reports, newest first.
    pub fn list(&self) -> Vec<Report> {
        self.store.reports_or_default()
    }

    pub fn find(&self, id: &str) -> Option<Report> {
        self.list().into_iter().find(|r| r.id == id)
    }

    /// Reports whose animal or tutor name contains `term`.
    pub fn search(&self, term: &str) -> Vec<Report> {
        let reports = self.list();
        filter_by_term(&reports, term).into_iter().cloned().collect()
    }

    /// Remove a report. Returns whether one was removed.
    pub fn remove(&self, id: &str) -> ReportResult<bool> {
        let mut reports = self.list();
        if !remove_by_id(&mut reports, id) {
            return Ok(false);
        }
        self.store.save_reports(&reports)?;
        info!(id, "report removed");
        Ok(true)
    }
}
