//! FFI-safe records exchanged with the UI shell.
//!
//! Enums cross the boundary as their stored string values, with the display
//! text alongside in a `*_label` field. Dates are `YYYY-MM-DD`; delays are
//! milliseconds.

use crate::auth::{GateOutcome, Redirect};
use crate::booking::BookingConfirmation;
use crate::dashboard::{ChartPoint, DashboardSummary, Header};
use crate::forms::{BookingForm, ClinicForm, FieldError, ProfileForm, ReportForm, SignupForm};
use crate::models::{
    AnalysisNote, Appointment, Image, Report, SessionFlags, Veterinarian,
};
use crate::reports::{AnalysisSession, ReportReceipt};
use crate::schedule::{DayAvailability, Slot, VetSchedule};

// =========================================================================
// Navigation
// =========================================================================

/// FFI-safe redirect.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct FfiRedirect {
    pub path: String,
    pub delay_ms: u64,
}

impl From<Redirect> for FfiRedirect {
    fn from(redirect: Redirect) -> Self {
        Self {
            path: redirect.page.path(),
            delay_ms: redirect.delay.as_millis() as u64,
        }
    }
}

/// FFI-safe gate decision.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct FfiGateOutcome {
    pub allowed: bool,
    pub banner: bool,
    pub redirect: Option<FfiRedirect>,
}

impl From<GateOutcome> for FfiGateOutcome {
    fn from(outcome: GateOutcome) -> Self {
        match outcome {
            GateOutcome::Allow { banner } => Self {
                allowed: true,
                banner,
                redirect: None,
            },
            GateOutcome::Redirect(redirect) => Self {
                allowed: false,
                banner: false,
                redirect: Some(redirect.into()),
            },
        }
    }
}

/// FFI-safe field error.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct FfiFieldError {
    pub field: String,
    pub message: String,
}

impl From<FieldError> for FfiFieldError {
    fn from(error: FieldError) -> Self {
        Self {
            field: error.field.to_string(),
            message: error.message,
        }
    }
}

// =========================================================================
// Session
// =========================================================================

/// FFI-safe session flags.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSessionFlags {
    pub logged_in: bool,
    pub client_logged_in: bool,
    pub mfa_verified: bool,
    pub role: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub language: String,
}

impl From<SessionFlags> for FfiSessionFlags {
    fn from(flags: SessionFlags) -> Self {
        Self {
            logged_in: flags.logged_in,
            client_logged_in: flags.client_logged_in,
            mfa_verified: flags.mfa_verified,
            role: flags.role.map(|r| r.as_str().to_string()),
            email: flags.email,
            name: flags.name,
            phone: flags.phone,
            language: flags.language.code().to_string(),
        }
    }
}

/// FFI-safe header data.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHeader {
    pub display_name: String,
    pub initial: String,
    pub language: String,
}

impl From<Header> for FfiHeader {
    fn from(header: Header) -> Self {
        Self {
            display_name: header.display_name,
            initial: header.initial.to_string(),
            language: header.language.code().to_string(),
        }
    }
}

// =========================================================================
// Forms
// =========================================================================

/// FFI-safe signup form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSignupForm {
    pub role: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub phone: String,
}

impl From<FfiSignupForm> for SignupForm {
    fn from(form: FfiSignupForm) -> Self {
        SignupForm {
            role: form.role,
            email: form.email,
            password: form.password,
            confirm_password: form.confirm_password,
            full_name: form.full_name,
            phone: form.phone,
        }
    }
}

/// FFI-safe clinic form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinicForm {
    pub clinic_name: String,
    pub address: String,
    pub phone_number: String,
}

impl From<FfiClinicForm> for ClinicForm {
    fn from(form: FfiClinicForm) -> Self {
        ClinicForm {
            clinic_name: form.clinic_name,
            address: form.address,
            phone_number: form.phone_number,
        }
    }
}

impl From<ClinicForm> for FfiClinicForm {
    fn from(form: ClinicForm) -> Self {
        Self {
            clinic_name: form.clinic_name,
            address: form.address,
            phone_number: form.phone_number,
        }
    }
}

/// FFI-safe professional profile form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProfileForm {
    pub phone_number: String,
    pub professional_title: String,
    pub full_name: String,
    pub professional_license: String,
}

impl From<FfiProfileForm> for ProfileForm {
    fn from(form: FfiProfileForm) -> Self {
        ProfileForm {
            phone_number: form.phone_number,
            professional_title: form.professional_title,
            full_name: form.full_name,
            professional_license: form.professional_license,
        }
    }
}

impl From<ProfileForm> for FfiProfileForm {
    fn from(form: ProfileForm) -> Self {
        Self {
            phone_number: form.phone_number,
            professional_title: form.professional_title,
            full_name: form.full_name,
            professional_license: form.professional_license,
        }
    }
}

/// FFI-safe booking form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBookingForm {
    pub veterinarian: String,
    pub owner_name: String,
    pub animal_type: String,
    pub breed: String,
    pub gender: String,
    pub consultation_reason: String,
}

impl From<FfiBookingForm> for BookingForm {
    fn from(form: FfiBookingForm) -> Self {
        BookingForm {
            veterinarian: form.veterinarian,
            owner_name: form.owner_name,
            animal_type: form.animal_type,
            breed: form.breed,
            gender: form.gender,
            consultation_reason: form.consultation_reason,
        }
    }
}

/// FFI-safe report form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReportForm {
    pub admission_date: String,
    pub animal_name: String,
    pub age: String,
    pub species: String,
    pub breed: String,
    pub weight: String,
    pub gender: String,
    pub is_castrated: bool,
    pub referral_doctor_name: String,
    pub referral_doctor_email: String,
    pub tutor_name: String,
    pub tutor_phone: String,
    pub study_type: String,
    pub consultation_reason: String,
    pub study_reason: String,
    pub status: String,
}

impl From<FfiReportForm> for ReportForm {
    fn from(form: FfiReportForm) -> Self {
        ReportForm {
            admission_date: form.admission_date,
            animal_name: form.animal_name,
            age: form.age,
            species: form.species,
            breed: form.breed,
            weight: form.weight,
            gender: form.gender,
            is_castrated: form.is_castrated,
            referral_doctor_name: form.referral_doctor_name,
            referral_doctor_email: form.referral_doctor_email,
            tutor_name: form.tutor_name,
            tutor_phone: form.tutor_phone,
            study_type: form.study_type,
            consultation_reason: form.consultation_reason,
            study_reason: form.study_reason,
            status: form.status,
        }
    }
}

impl From<ReportForm> for FfiReportForm {
    fn from(form: ReportForm) -> Self {
        Self {
            admission_date: form.admission_date,
            animal_name: form.animal_name,
            age: form.age,
            species: form.species,
            breed: form.breed,
            weight: form.weight,
            gender: form.gender,
            is_castrated: form.is_castrated,
            referral_doctor_name: form.referral_doctor_name,
            referral_doctor_email: form.referral_doctor_email,
            tutor_name: form.tutor_name,
            tutor_phone: form.tutor_phone,
            study_type: form.study_type,
            consultation_reason: form.consultation_reason,
            study_reason: form.study_reason,
            status: form.status,
        }
    }
}

/// Raw image picked by the user.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiImageUpload {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl From<FfiImageUpload> for Image {
    fn from(upload: FfiImageUpload) -> Self {
        Image::from_bytes(upload.name, upload.mime_type, &upload.bytes)
    }
}

// =========================================================================
// Appointments
// =========================================================================

/// FFI-safe roster entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVeterinarian {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub initials: String,
}

impl From<&Veterinarian> for FfiVeterinarian {
    fn from(vet: &Veterinarian) -> Self {
        Self {
            id: vet.id.to_string(),
            name: vet.name.to_string(),
            specialty: vet.specialty.to_string(),
            initials: vet.initials.to_string(),
        }
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: String,
    pub veterinarian: String,
    pub owner_name: String,
    pub animal_type: String,
    pub animal_type_label: String,
    pub breed: String,
    pub gender: String,
    pub gender_label: String,
    pub consultation_reason: String,
    pub date: String,
    pub status: String,
    pub status_label: String,
    pub animal_summary: String,
}

impl From<Appointment> for FfiAppointment {
    fn from(appointment: Appointment) -> Self {
        Self {
            animal_summary: appointment.animal_summary(),
            id: appointment.id,
            veterinarian: appointment.veterinarian,
            owner_name: appointment.owner_name,
            animal_type: appointment.animal_type.value().to_string(),
            animal_type_label: appointment.animal_type.label().to_string(),
            breed: appointment.breed,
            gender: appointment.gender.value().to_string(),
            gender_label: appointment.gender.label().to_string(),
            consultation_reason: appointment.consultation_reason,
            date: appointment.date.to_string(),
            status: appointment.status.value().to_string(),
            status_label: appointment.status.label().to_string(),
        }
    }
}

/// FFI-safe booking confirmation.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBookingConfirmation {
    pub appointment: FfiAppointment,
    pub redirect: FfiRedirect,
}

impl From<BookingConfirmation> for FfiBookingConfirmation {
    fn from(confirmation: BookingConfirmation) -> Self {
        Self {
            appointment: confirmation.appointment.into(),
            redirect: confirmation.redirect.into(),
        }
    }
}

// =========================================================================
// Reports
// =========================================================================

/// FFI-safe image. Native shells read `bytes`; web views use `data_url`.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiImage {
    pub id: String,
    pub name: String,
    pub data_url: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl From<&Image> for FfiImage {
    fn from(image: &Image) -> Self {
        Self {
            id: image.id.clone(),
            name: image.name.clone(),
            data_url: image.data.clone(),
            mime_type: image.mime_type.clone(),
            bytes: image.decode().unwrap_or_default(),
        }
    }
}

/// FFI-safe analysis note.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAnalysisNote {
    pub image_id: String,
    pub study_type: String,
    pub study_type_label: String,
    pub study_reason: String,
    pub partial_observations: String,
}

impl From<&AnalysisNote> for FfiAnalysisNote {
    fn from(note: &AnalysisNote) -> Self {
        Self {
            image_id: note.image_id.clone(),
            study_type: note.study_type.value().to_string(),
            study_type_label: note.study_type.short_label().to_string(),
            study_reason: note.study_reason.clone(),
            partial_observations: note.partial_observations.clone(),
        }
    }
}

/// An image with the note written for it, if any.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAnnotatedImage {
    pub image: FfiImage,
    pub note: Option<FfiAnalysisNote>,
}

/// FFI-safe report, with display labels.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReport {
    pub id: String,
    pub admission_date: String,
    pub animal_name: String,
    pub age: f64,
    pub species: String,
    pub species_label: String,
    pub breed: String,
    pub weight: f64,
    pub gender: String,
    pub gender_label: String,
    pub is_castrated: bool,
    pub referral_doctor_name: String,
    pub referral_doctor_email: String,
    pub tutor_name: String,
    pub tutor_phone: String,
    pub study_type: String,
    pub study_type_label: String,
    pub consultation_reason: String,
    pub study_reason: String,
    pub status: String,
    pub status_label: String,
    pub date: String,
    /// Images in upload order, each paired with its analysis note
    pub images: Vec<FfiAnnotatedImage>,
}

impl From<Report> for FfiReport {
    fn from(report: Report) -> Self {
        let images = report
            .annotated_images()
            .into_iter()
            .map(|(image, note)| FfiAnnotatedImage {
                image: image.into(),
                note: note.map(FfiAnalysisNote::from),
            })
            .collect();
        Self {
            id: report.id,
            admission_date: report.admission_date.to_string(),
            animal_name: report.animal_name,
            age: report.age,
            species: report.species.value().to_string(),
            species_label: report.species.label().to_string(),
            breed: report.breed,
            weight: report.weight,
            gender: report.gender.value().to_string(),
            gender_label: report.gender.label().to_string(),
            is_castrated: report.is_castrated,
            referral_doctor_name: report.referral_doctor.name,
            referral_doctor_email: report.referral_doctor.email,
            tutor_name: report.tutor.name,
            tutor_phone: report.tutor.phone,
            study_type: report.study_type.value().to_string(),
            study_type_label: report.study_type.label().to_string(),
            consultation_reason: report.consultation_reason,
            study_reason: report.study_reason,
            status: report.status.value().to_string(),
            status_label: report.status.label().to_string(),
            date: report.date.to_string(),
            images,
        }
    }
}

/// FFI-safe report receipt.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReportReceipt {
    pub report: FfiReport,
    pub redirect: FfiRedirect,
}

impl From<ReportReceipt> for FfiReportReceipt {
    fn from(receipt: ReportReceipt) -> Self {
        Self {
            report: receipt.report.into(),
            redirect: receipt.redirect.into(),
        }
    }
}

/// FFI-safe view of the analysis page.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAnalysisState {
    pub report_id: String,
    pub animal_name: String,
    pub index: u32,
    pub image_count: u32,
    pub current_image: Option<FfiImage>,
    pub current_note: Option<FfiAnalysisNote>,
    pub has_prev: bool,
    pub has_next: bool,
}

impl From<&AnalysisSession> for FfiAnalysisState {
    fn from(session: &AnalysisSession) -> Self {
        Self {
            report_id: session.report().id.clone(),
            animal_name: session.report().animal_name.clone(),
            index: session.index() as u32,
            image_count: session.image_count() as u32,
            current_image: session.current_image().map(FfiImage::from),
            current_note: session.current_note().map(FfiAnalysisNote::from),
            has_prev: session.has_prev(),
            has_next: session.has_next(),
        }
    }
}

// =========================================================================
// Dashboard & Schedule
// =========================================================================

/// FFI-safe chart bar.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiChartPoint {
    pub label: String,
    pub patients: u32,
}

impl From<ChartPoint> for FfiChartPoint {
    fn from(point: ChartPoint) -> Self {
        Self {
            label: point.label,
            patients: point.patients,
        }
    }
}

/// FFI-safe dashboard.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDashboardSummary {
    pub header: FfiHeader,
    pub banner: bool,
    pub total_reports: u32,
    pub total_patients: u32,
    pub active_reports: u32,
    pub reports: Vec<FfiReport>,
    pub chart: Vec<FfiChartPoint>,
}

impl From<DashboardSummary> for FfiDashboardSummary {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            header: summary.header.into(),
            banner: summary.banner,
            total_reports: summary.total_reports as u32,
            total_patients: summary.total_patients as u32,
            active_reports: summary.active_reports as u32,
            reports: summary.reports.into_iter().map(|r| r.into()).collect(),
            chart: summary.chart.into_iter().map(|p| p.into()).collect(),
        }
    }
}

/// FFI-safe schedule slot.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSlot {
    pub id: String,
    pub time: String,
    pub booked: bool,
}

impl From<Slot> for FfiSlot {
    fn from(slot: Slot) -> Self {
        Self {
            booked: slot.status == crate::schedule::SlotStatus::Booked,
            id: slot.id,
            time: slot.time.to_string(),
        }
    }
}

/// FFI-safe free-slot count.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDayAvailability {
    pub date: String,
    pub label: String,
    pub available: u32,
}

impl From<DayAvailability> for FfiDayAvailability {
    fn from(day: DayAvailability) -> Self {
        Self {
            date: day.date.to_string(),
            label: day.label,
            available: day.available as u32,
        }
    }
}

/// FFI-safe schedule column.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVetSchedule {
    pub veterinarian: FfiVeterinarian,
    pub today: Vec<FfiSlot>,
    pub upcoming: Vec<FfiDayAvailability>,
}

impl From<VetSchedule> for FfiVetSchedule {
    fn from(schedule: VetSchedule) -> Self {
        Self {
            veterinarian: schedule.veterinarian.into(),
            today: schedule.today.into_iter().map(|s| s.into()).collect(),
            upcoming: schedule.upcoming.into_iter().map(|d| d.into()).collect(),
        }
    }
}
