//! Appointment models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::animal::{Gender, Species};

/// A veterinarian clients can book with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Veterinarian {
    pub id: &'static str,
    pub name: &'static str,
    pub specialty: &'static str,
    pub initials: &'static str,
}

/// The clinic roster. Bookings store the veterinarian's name.
pub static VETERINARIANS: [Veterinarian; 3] = [
    Veterinarian {
        id: "vet1",
        name: "Dr. Ana Martinez",
        specialty: "Ultrasound Specialist",
        initials: "AM",
    },
    Veterinarian {
        id: "vet2",
        name: "Dr. Carlos Ruiz",
        specialty: "Radiography Specialist",
        initials: "CR",
    },
    Veterinarian {
        id: "vet3",
        name: "Dr. Sofia Hernandez",
        specialty: "Ultrasound Specialist",
        initials: "SH",
    },
];

/// Find a roster entry by id or name.
pub fn find_veterinarian(id_or_name: &str) -> Option<&'static Veterinarian> {
    let needle = id_or_name.trim();
    VETERINARIANS
        .iter()
        .find(|vet| vet.id == needle || vet.name.eq_ignore_ascii_case(needle))
}

/// Appointment status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Requested by the client
    #[default]
    Pending,
    /// Accepted by the clinic
    Confirmed,
}

impl AppointmentStatus {
    pub fn value(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Confirmed => "Confirmed",
        }
    }
}

/// A booked appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Creation timestamp in milliseconds
    pub id: String,
    /// Veterinarian name
    pub veterinarian: String,
    /// Pet owner's full name
    pub owner_name: String,
    /// Animal type
    pub animal_type: Species,
    /// Breed
    pub breed: String,
    /// Animal sex
    pub gender: Gender,
    /// Why the client is booking
    pub consultation_reason: String,
    /// Booking date (UTC)
    pub date: NaiveDate,
    /// Appointment status
    #[serde(default)]
    pub status: AppointmentStatus,
}

/// Validated booking details, before an id and date are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentRequest {
    pub veterinarian: String,
    pub owner_name: String,
    pub animal_type: Species,
    pub breed: String,
    pub gender: Gender,
    pub consultation_reason: String,
}

impl Appointment {
    /// Create a pending appointment stamped at `now`.
    pub fn new(request: AppointmentRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: now.timestamp_millis().to_string(),
            veterinarian: request.veterinarian,
            owner_name: request.owner_name,
            animal_type: request.animal_type,
            breed: request.breed,
            gender: request.gender,
            consultation_reason: request.consultation_reason,
            date: now.date_naive(),
            status: AppointmentStatus::Pending,
        }
    }

    /// One-line summary for list rows ("Dog - Beagle").
    pub fn animal_summary(&self) -> String {
        format!("{} - {}", self.animal_type.label(), self.breed)
    }
}
