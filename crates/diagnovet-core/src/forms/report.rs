//! New-report form.

use chrono::NaiveDate;

use super::{Checker, FieldErrorKind, ValidationErrors};
use crate::models::{
    Gender, ReferralDoctor, ReportDetails, ReportStatus, Species, StudyType, Tutor,
};

/// Report draft as typed into the new-report page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportForm {
    /// ISO date (YYYY-MM-DD)
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

impl ReportForm {
    /// Blank form: admission date is `today`, status is in progress.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            admission_date: today.format("%Y-%m-%d").to_string(),
            animal_name: String::new(),
            age: String::new(),
            species: String::new(),
            breed: String::new(),
            weight: String::new(),
            gender: String::new(),
            is_castrated: false,
            referral_doctor_name: String::new(),
            referral_doctor_email: String::new(),
            tutor_name: String::new(),
            tutor_phone: String::new(),
            study_type: String::new(),
            consultation_reason: String::new(),
            study_reason: String::new(),
            status: ReportStatus::InProgress.value().to_string(),
        }
    }

    pub fn validate(&self) -> Result<ReportDetails, ValidationErrors> {
        let mut v = Checker::new();

        let admission_date = NaiveDate::parse_from_str(self.admission_date.trim(), "%Y-%m-%d").ok();
        if admission_date.is_none() {
            v.fail(
                "admissionDate",
                FieldErrorKind::InvalidDate,
                "Admission date is required",
            );
        }

        let animal_name = v.required("animalName", &self.animal_name, "Animal name is required");
        let age = v.number("age", &self.age, "Age is required", "Age must be a number");
        let species = v.choice("species", &self.species, Species::from_input, "Species is required");
        let breed = v.required("breed", &self.breed, "Breed is required");
        let weight = v.number(
            "weight",
            &self.weight,
            "Weight is required",
            "Weight must be a number",
        );
        let gender = v.choice("gender", &self.gender, Gender::from_input, "Gender is required");
        let doctor_name = v.required(
            "referralDoctorName",
            &self.referral_doctor_name,
            "Doctor name is required",
        );
        let doctor_email = v.email(
            "referralDoctorEmail",
            &self.referral_doctor_email,
            "Doctor email is required",
            "Invalid email format",
        );
        let tutor_name = v.required("tutorName", &self.tutor_name, "Tutor name is required");
        let tutor_phone = v.required("tutorPhone", &self.tutor_phone, "Tutor phone is required");
        let study_type = v.choice(
            "studyType",
            &self.study_type,
            StudyType::from_input,
            "Study type is required",
        );
        let consultation_reason = v.required(
            "consultationReason",
            &self.consultation_reason,
            "Consultation reason is required",
        );
        let study_reason = v.required("studyReason", &self.study_reason, "Study reason is required");

        // Blank status falls back to in progress
        let status = if self.status.trim().is_empty() {
            Some(ReportStatus::InProgress)
        } else {
            v.choice("status", &self.status, ReportStatus::from_input, "Unknown status")
        };

        let errors = v.into_errors();
        match (admission_date, species, gender, study_type, status) {
            (Some(admission_date), Some(species), Some(gender), Some(study_type), Some(status))
                if errors.is_empty() =>
            {
                Ok(ReportDetails {
                    admission_date,
                    animal_name,
                    age,
                    species,
                    breed,
                    weight,
                    gender,
                    is_castrated: self.is_castrated,
                    referral_doctor: ReferralDoctor {
                        name: doctor_name,
                        email: doctor_email,
                    },
                    tutor: Tutor {
                        name: tutor_name,
                        phone: tutor_phone,
                    },
                    study_type,
                    consultation_reason,
                    study_reason,
                    status,
                })
            }
            _ => Err(errors),
        }
    }
}
