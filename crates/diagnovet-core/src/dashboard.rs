//! Dashboard and header data.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::collection::filter_by_term;
use crate::db::{SessionStore, StoreResult};
use crate::models::{Language, Report};

/// Weeks shown in the admissions chart.
pub const CHART_WEEKS: usize = 4;

/// One bar of the admissions chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub label: String,
    pub patients: u32,
}

/// Header strip: who is signed in and in which language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub display_name: String,
    /// Avatar letter
    pub initial: char,
    pub language: Language,
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub header: Header,
    /// Show the "setup completed" notice
    pub banner: bool,
    pub total_reports: usize,
    pub total_patients: usize,
    pub active_reports: usize,
    /// Reports matching the search box, newest first
    pub reports: Vec<Report>,
    pub chart: Vec<ChartPoint>,
}

pub struct Dashboard<'a> {
    store: &'a SessionStore,
}

impl<'a> Dashboard<'a> {
    pub fn new(store: &'a SessionStore) -> Self {
        Self { store }
    }

    pub fn header(&self) -> StoreResult<Header> {
        let flags = self.store.session_flags()?;
        let display_name = flags.display_name().to_string();
        let initial = display_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('U');
        Ok(Header {
            display_name,
            initial,
            language: flags.language,
        })
    }

    /// Build the dashboard. `banner` comes from the gate.
    pub fn summary(&self, term: &str, banner: bool, today: NaiveDate) -> StoreResult<DashboardSummary> {
        let reports = self.store.reports_or_default();
        Ok(DashboardSummary {
            header: self.header()?,
            banner,
            total_reports: reports.len(),
            total_patients: distinct_patients(&reports),
            active_reports: reports.iter().filter(|r| r.is_active()).count(),
            chart: weekly_admissions(&reports, today),
            reports: filter_by_term(&reports, term).into_iter().cloned().collect(),
        })
    }
}

/// Patients counted by animal and tutor name, ignoring case.
pub fn distinct_patients(reports: &[Report]) -> usize {
    reports
        .iter()
        .map(|r| {
            (
                r.animal_name.trim().to_lowercase(),
                r.tutor.name.trim().to_lowercase(),
            )
        })
        .collect::<HashSet<_>>()
        .len()
}

/// Admissions per week over the last four weeks, oldest week first.
///
/// Week 4 covers `today` and the six days before it.
pub fn weekly_admissions(reports: &[Report], today: NaiveDate) -> Vec<ChartPoint> {
    let mut counts = [0u32; CHART_WEEKS];
    for report in reports {
        let days_ago = (today - report.admission_date).num_days();
        if !(0..(CHART_WEEKS as i64 * 7)).contains(&days_ago) {
            continue;
        }
        let week = CHART_WEEKS - 1 - (days_ago / 7) as usize;
        counts[week] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(i, &patients)| ChartPoint {
            label: format!("Week {}", i + 1),
            patients,
        })
        .collect()
}
