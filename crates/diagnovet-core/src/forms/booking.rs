//! Appointment booking form.

use super::{Checker, ValidationErrors};
use crate::models::{find_veterinarian, AppointmentRequest, Gender, Species};

/// Booking draft. Every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    /// Veterinarian id or name from the roster
    pub veterinarian: String,
    pub owner_name: String,
    pub animal_type: String,
    pub breed: String,
    pub gender: String,
    pub consultation_reason: String,
}

impl BookingForm {
    /// Field names in form order.
    pub const FIELDS: [&'static str; 6] = [
        "veterinarian",
        "ownerName",
        "animalType",
        "breed",
        "gender",
        "consultationReason",
    ];

    pub fn validate(&self) -> Result<AppointmentRequest, ValidationErrors> {
        let mut v = Checker::new();

        let veterinarian = v.choice(
            "veterinarian",
            &self.veterinarian,
            find_veterinarian,
            "Please select a veterinarian",
        );
        let owner_name = v.required("ownerName", &self.owner_name, "Full name is required");
        let animal_type = v.choice(
            "animalType",
            &self.animal_type,
            Species::from_input,
            "Animal type is required",
        );
        let breed = v.required("breed", &self.breed, "Breed is required");
        let gender = v.choice("gender", &self.gender, Gender::from_input, "Gender is required");
        let consultation_reason = v.required(
            "consultationReason",
            &self.consultation_reason,
            "Consultation reason is required",
        );

        let errors = v.into_errors();
        match (veterinarian, animal_type, gender) {
            (Some(vet), Some(animal_type), Some(gender)) if errors.is_empty() => {
                Ok(AppointmentRequest {
                    veterinarian: vet.name.to_string(),
                    owner_name,
                    animal_type,
                    breed,
                    gender,
                    consultation_reason,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> BookingForm {
        BookingForm {
            veterinarian: "vet1".into(),
            owner_name: "Maria Garcia".into(),
            animal_type: "Dog".into(),
            breed: "Beagle".into(),
            gender: "Female".into(),
            consultation_reason: "Limping on the left leg".into(),
        }
    }

    #[test]
    fn test_valid_booking_resolves_vet_name() {
        let request = valid_form().validate().unwrap();
        assert_eq!(request.veterinarian, "Dr. Ana Martinez");
        assert_eq!(request.animal_type, Species::Dog);
        assert_eq!(request.gender, Gender::Female);
    }

    #[test]
    fn test_all_fields_required() {
        let errors = BookingForm::default().validate().unwrap_err();
        assert_eq!(errors.fields(), BookingForm::FIELDS.to_vec());
        assert_eq!(
            errors.get("veterinarian").unwrap().message,
            "Please select a veterinarian"
        );
    }

    #[test]
    fn test_unknown_veterinarian_rejected() {
        let mut form = valid_form();
        form.veterinarian = "Dr. House".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields(), vec!["veterinarian"]);
    }
}
