//! Imaging report models.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::animal::{Gender, Species};

/// Imaging study requested for the patient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StudyType {
    Radiography,
    Ultrasound,
    Both,
}

impl StudyType {
    pub const ALL: [StudyType; 3] = [StudyType::Radiography, StudyType::Ultrasound, StudyType::Both];

    pub fn value(&self) -> &'static str {
        match self {
            StudyType::Radiography => "radiography",
            StudyType::Ultrasound => "ultrasound",
            StudyType::Both => "both",
        }
    }

    /// Long label used by the report form and detail view.
    pub fn label(&self) -> &'static str {
        match self {
            StudyType::Radiography => "Radiography (X-Ray)",
            StudyType::Ultrasound => "Ultrasound (Ecography)",
            StudyType::Both => "Both",
        }
    }

    /// Short label used next to analysis notes.
    pub fn short_label(&self) -> &'static str {
        match self {
            StudyType::Radiography => "Radiography",
            StudyType::Ultrasound => "Ultrasound",
            StudyType::Both => "Both",
        }
    }

    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "radiography" => Some(StudyType::Radiography),
            "ultrasound" => Some(StudyType::Ultrasound),
            "both" => Some(StudyType::Both),
            _ => None,
        }
    }
}

/// Report status. Stored with the clinic's Spanish values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReportStatus {
    #[default]
    #[serde(rename = "En progreso")]
    InProgress,
    #[serde(rename = "Finalizado")]
    Completed,
}

impl ReportStatus {
    pub fn value(&self) -> &'static str {
        match self {
            ReportStatus::InProgress => "En progreso",
            ReportStatus::Completed => "Finalizado",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::InProgress => "In Progress",
            ReportStatus::Completed => "Completed",
        }
    }

    /// Accept the stored value or the English label.
    pub fn from_input(input: &str) -> Option<Self> {
        let needle = input.trim();
        [ReportStatus::InProgress, ReportStatus::Completed]
            .into_iter()
            .find(|s| s.value().eq_ignore_ascii_case(needle) || s.label().eq_ignore_ascii_case(needle))
    }
}

/// Referring veterinarian.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferralDoctor {
    pub name: String,
    pub email: String,
}

/// Pet guardian.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tutor {
    pub name: String,
    pub phone: String,
}

/// An image attached to a report, held inline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    /// Image ID
    pub id: String,
    /// Original file name
    pub name: String,
    /// Data URL (`data:<mime>;base64,<payload>`)
    pub data: String,
    /// MIME type
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl Image {
    /// Encode raw bytes as an inline data URL.
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        let mime_type = mime_type.into();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            data: format!("data:{};base64,{}", mime_type, B64.encode(bytes)),
            mime_type,
        }
    }

    /// Decode the inline payload. `None` if the data URL is not base64.
    pub fn decode(&self) -> Option<Vec<u8>> {
        let (_, payload) = self.data.split_once(";base64,")?;
        B64.decode(payload).ok()
    }
}

/// Per-image observations written during analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisNote {
    /// Image this note belongs to
    pub image_id: String,
    /// Study type copied from the report
    pub study_type: StudyType,
    /// Study reason copied from the report
    pub study_reason: String,
    /// Free-text observations
    pub partial_observations: String,
}

/// Validated report fields, before an id and date are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDetails {
    pub admission_date: NaiveDate,
    pub animal_name: String,
    pub age: f64,
    pub species: Species,
    pub breed: String,
    pub weight: f64,
    pub gender: Gender,
    pub is_castrated: bool,
    pub referral_doctor: ReferralDoctor,
    pub tutor: Tutor,
    pub study_type: StudyType,
    pub consultation_reason: String,
    pub study_reason: String,
    pub status: ReportStatus,
}

/// A patient imaging report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Creation timestamp in milliseconds
    pub id: String,
    /// Date the animal was admitted
    pub admission_date: NaiveDate,
    /// Patient name
    pub animal_name: String,
    /// Age in years
    pub age: f64,
    /// Species
    pub species: Species,
    /// Breed
    pub breed: String,
    /// Weight in kg
    pub weight: f64,
    /// Animal sex
    pub gender: Gender,
    /// Neutered/spayed
    #[serde(default)]
    pub is_castrated: bool,
    /// Referring veterinarian
    pub referral_doctor: ReferralDoctor,
    /// Pet guardian
    pub tutor: Tutor,
    /// Imaging study
    pub study_type: StudyType,
    /// Reason for the consultation
    pub consultation_reason: String,
    /// Reason for the imaging study
    pub study_reason: String,
    /// Report status
    #[serde(default)]
    pub status: ReportStatus,
    /// Creation date (UTC)
    pub date: NaiveDate,
    /// Attached images (absent on older records)
    #[serde(default)]
    pub images: Vec<Image>,
    /// Per-image notes (absent until analysis finishes)
    #[serde(default)]
    pub analysis_notes: Vec<AnalysisNote>,
}

impl Report {
    /// Create a report stamped at `now`, with no images or notes.
    pub fn new(details: ReportDetails, now: DateTime<Utc>) -> Self {
        Self {
            id: now.timestamp_millis().to_string(),
            admission_date: details.admission_date,
            animal_name: details.animal_name,
            age: details.age,
            species: details.species,
            breed: details.breed,
            weight: details.weight,
            gender: details.gender,
            is_castrated: details.is_castrated,
            referral_doctor: details.referral_doctor,
            tutor: details.tutor,
            study_type: details.study_type,
            consultation_reason: details.consultation_reason,
            study_reason: details.study_reason,
            status: details.status,
            date: now.date_naive(),
            images: Vec::new(),
            analysis_notes: Vec::new(),
        }
    }

    /// Find the analysis note for an image.
    pub fn note_for(&self, image_id: &str) -> Option<&AnalysisNote> {
        self.analysis_notes.iter().find(|n| n.image_id == image_id)
    }

    /// Pair each image with its note, in image order.
    pub fn annotated_images(&self) -> Vec<(&Image, Option<&AnalysisNote>)> {
        self.images
            .iter()
            .map(|img| (img, self.note_for(&img.id)))
            .collect()
    }

    /// Check if the report is still open.
    pub fn is_active(&self) -> bool {
        self.status == ReportStatus::InProgress
    }
}
