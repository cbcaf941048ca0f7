//! Clinic and professional profile models.

use serde::{Deserialize, Serialize};

/// Clinic details collected at pre-confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClinicProfile {
    /// Legal name of the clinic
    pub clinic_name: String,
    /// Street address
    pub address: String,
    /// Clinic phone
    pub phone_number: String,
}

/// Professional title of the signed-in veterinarian.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProfessionalTitle {
    Veterinarian,
    Technician,
    Assistant,
    Surgeon,
}

impl ProfessionalTitle {
    pub const ALL: [ProfessionalTitle; 4] = [
        ProfessionalTitle::Veterinarian,
        ProfessionalTitle::Technician,
        ProfessionalTitle::Assistant,
        ProfessionalTitle::Surgeon,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            ProfessionalTitle::Veterinarian => "veterinarian",
            ProfessionalTitle::Technician => "technician",
            ProfessionalTitle::Assistant => "assistant",
            ProfessionalTitle::Surgeon => "surgeon",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfessionalTitle::Veterinarian => "Veterinarian",
            ProfessionalTitle::Technician => "Veterinary Technician",
            ProfessionalTitle::Assistant => "Veterinary Assistant",
            ProfessionalTitle::Surgeon => "Veterinary Surgeon",
        }
    }

    pub fn from_input(input: &str) -> Option<Self> {
        let needle = input.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.value().eq_ignore_ascii_case(needle) || t.label().eq_ignore_ascii_case(needle))
    }
}

/// Professional profile collected at post-confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Contact phone
    pub phone_number: String,
    /// Professional title
    pub professional_title: ProfessionalTitle,
    /// Full name
    pub full_name: String,
    /// License number (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_license: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_value_or_label() {
        assert_eq!(
            ProfessionalTitle::from_input("surgeon"),
            Some(ProfessionalTitle::Surgeon)
        );
        assert_eq!(
            ProfessionalTitle::from_input("Veterinary Technician"),
            Some(ProfessionalTitle::Technician)
        );
        assert_eq!(ProfessionalTitle::from_input(""), None);
    }

    #[test]
    fn test_license_is_optional_on_the_wire() {
        let json = r#"{"phoneNumber":"40","professionalTitle":"veterinarian","fullName":"Fernanda Barbero"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert!(profile.professional_license.is_none());
    }
}
