//! Clinic and professional profile forms.

use super::{Checker, ValidationErrors};
use crate::models::{ClinicProfile, ProfessionalTitle, UserProfile};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClinicForm {
    pub clinic_name: String,
    pub address: String,
    pub phone_number: String,
}

impl ClinicForm {
    pub fn validate(&self) -> Result<ClinicProfile, ValidationErrors> {
        let mut v = Checker::new();
        let clinic_name = v.required("clinicName", &self.clinic_name, "Clinic name is required");
        let address = v.required("address", &self.address, "Address is required");
        let phone_number = v.required(
            "phoneNumber",
            &self.phone_number,
            "Phone number is required",
        );

        v.into_errors().into_result()?;
        Ok(ClinicProfile {
            clinic_name,
            address,
            phone_number,
        })
    }
}

impl From<&ClinicProfile> for ClinicForm {
    fn from(profile: &ClinicProfile) -> Self {
        Self {
            clinic_name: profile.clinic_name.clone(),
            address: profile.address.clone(),
            phone_number: profile.phone_number.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub phone_number: String,
    /// Title value or label
    pub professional_title: String,
    pub full_name: String,
    /// Optional; blank means none
    pub professional_license: String,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<UserProfile, ValidationErrors> {
        let mut v = Checker::new();
        let phone_number = v.required(
            "phoneNumber",
            &self.phone_number,
            "Phone number is required",
        );
        let title = v.choice(
            "professionalTitle",
            &self.professional_title,
            ProfessionalTitle::from_input,
            "Professional title is required",
        );
        let full_name = v.required("fullName", &self.full_name, "Full name is required");

        let errors = v.into_errors();
        match title {
            Some(professional_title) if errors.is_empty() => {
                let license = self.professional_license.trim();
                Ok(UserProfile {
                    phone_number,
                    professional_title,
                    full_name,
                    professional_license: (!license.is_empty()).then(|| license.to_string()),
                })
            }
            _ => Err(errors),
        }
    }
}

impl From<&UserProfile> for ProfileForm {
    fn from(profile: &UserProfile) -> Self {
        Self {
            phone_number: profile.phone_number.clone(),
            professional_title: profile.professional_title.value().to_string(),
            full_name: profile.full_name.clone(),
            professional_license: profile.professional_license.clone().unwrap_or_default(),
        }
    }
}
