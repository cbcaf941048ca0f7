//! Image-by-image analysis of a report draft.

use tracing::{info, warn};

use super::{ReportError, ReportResult};
use crate::auth::{Page, Redirect};
use crate::db::SessionStore;
use crate::models::{AnalysisNote, Image, Report};

/// Walks a draft's images, one note per image.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSession {
    report: Report,
    notes: Vec<AnalysisNote>,
    index: usize,
}

impl AnalysisSession {
    /// Start from the stored draft.
    pub fn load(store: &SessionStore) -> ReportResult<Self> {
        match store.current_report() {
            Ok(Some(report)) => Ok(Self::from_report(report)),
            Ok(None) => Err(ReportError::NoDraft),
            Err(e) => {
                warn!(error = %e, "unreadable report draft");
                Err(ReportError::NoDraft)
            }
        }
    }

    /// Start from a draft, seeding each note with the report's study details.
    pub fn from_report(report: Report) -> Self {
        let notes = report
            .images
            .iter()
            .map(|img| AnalysisNote {
                image_id: img.id.clone(),
                study_type: report.study_type,
                study_reason: report.study_reason.clone(),
                partial_observations: String::new(),
            })
            .collect();
        Self {
            report,
            notes,
            index: 0,
        }
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn notes(&self) -> &[AnalysisNote] {
        &self.notes
    }

    pub fn image_count(&self) -> usize {
        self.report.images.len()
    }

    /// Zero-based position of the image on screen.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_image(&self) -> Option<&Image> {
        self.report.images.get(self.index)
    }

    pub fn current_note(&self) -> Option<&AnalysisNote> {
        self.notes.get(self.index)
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.image_count()
    }

    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    /// Move to the next image. Stays put on the last one.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous image. Stays put on the first one.
    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Replace the observations on the current image's note.
    pub fn set_observations(&mut self, text: impl Into<String>) -> bool {
        match self.notes.get_mut(self.index) {
            Some(note) => {
                note.partial_observations = text.into();
                true
            }
            None => false,
        }
    }

    /// True when `other` is the draft this session was loaded from.
    fn is_same_draft(&self, other: &Report) -> bool {
        self.report.id == other.id
            && self
                .report
                .images
                .iter()
                .map(|img| &img.id)
                .eq(other.images.iter().map(|img| &img.id))
    }

    /// Attach the notes, store the report and drop the draft.
    ///
    /// Fails with `NoDraft`, leaving the store untouched, when the stored
    /// draft is gone or has been replaced since the session was loaded.
    pub fn finish(&self, store: &SessionStore) -> ReportResult<(Report, Redirect)> {
        match store.current_report()? {
            Some(draft) if self.is_same_draft(&draft) => {}
            Some(draft) => {
                warn!(session = %self.report.id, stored = %draft.id, "stale analysis session");
                return Err(ReportError::NoDraft);
            }
            None => return Err(ReportError::NoDraft),
        }

        let mut report = self.report.clone();
        report.analysis_notes = self.notes.clone();
        store.commit_current_report(report.clone())?;

        info!(id = %report.id, notes = report.analysis_notes.len(), "analysis finished");
        Ok((report, Redirect::now(Page::Dashboard)))
    }
}
