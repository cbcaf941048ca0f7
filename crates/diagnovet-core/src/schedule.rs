//! Veterinarian availability grid.
//!
//! Availability is a fixed pattern, not a scheduler: the first slot of each
//! three is booked, every day, for every veterinarian.

use chrono::{Days, NaiveDate};

use crate::models::{Veterinarian, VETERINARIANS};

/// Bookable hours, same every day.
pub const SLOT_HOURS: [&str; 6] = ["09:00", "10:00", "11:00", "14:00", "15:00", "16:00"];

/// Days shown after today.
pub const UPCOMING_DAYS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Available,
    Booked,
}

impl SlotStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SlotStatus::Available => "Free",
            SlotStatus::Booked => "Booked",
        }
    }
}

/// One hour on one day for one veterinarian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// `{vet}-{date}-{time}`
    pub id: String,
    pub veterinarian_id: &'static str,
    pub date: NaiveDate,
    pub time: &'static str,
    pub status: SlotStatus,
}

/// Free-slot count for a later day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAvailability {
    pub date: NaiveDate,
    /// e.g. "Tue, Jan 16"
    pub label: String,
    pub available: usize,
}

/// A veterinarian's column in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VetSchedule {
    pub veterinarian: &'static Veterinarian,
    pub today: Vec<Slot>,
    pub upcoming: Vec<DayAvailability>,
}

/// Slots for one veterinarian on one day.
pub fn slots_for(veterinarian: &'static Veterinarian, date: NaiveDate) -> Vec<Slot> {
    SLOT_HOURS
        .iter()
        .enumerate()
        .map(|(index, &time)| Slot {
            id: format!("{}-{}-{}", veterinarian.id, date.format("%Y-%m-%d"), time),
            veterinarian_id: veterinarian.id,
            date,
            time,
            status: if index % 3 == 0 {
                SlotStatus::Booked
            } else {
                SlotStatus::Available
            },
        })
        .collect()
}

/// Short day label used in the grid.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// The whole grid: today's slots and the next few days' free counts.
pub fn weekly_schedule(today: NaiveDate) -> Vec<VetSchedule> {
    VETERINARIANS
        .iter()
        .map(|vet| {
            let upcoming = (1..=UPCOMING_DAYS)
                .filter_map(|offset| today.checked_add_days(Days::new(offset)))
                .map(|date| DayAvailability {
                    date,
                    label: day_label(date),
                    available: slots_for(vet, date)
                        .iter()
                        .filter(|s| s.status == SlotStatus::Available)
                        .count(),
                })
                .collect();
            VetSchedule {
                veterinarian: vet,
                today: slots_for(vet, today),
                upcoming,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_booked_pattern() {
        let slots = slots_for(&VETERINARIANS[0], monday());
        let booked: Vec<&str> = slots
            .iter()
            .filter(|s| s.status == SlotStatus::Booked)
            .map(|s| s.time)
            .collect();
        assert_eq!(booked, vec!["09:00", "14:00"]);
        assert_eq!(slots[0].id, "vet1-2024-01-15-09:00");
    }

    #[test]
    fn test_weekly_schedule_shape() {
        let grid = weekly_schedule(monday());
        assert_eq!(grid.len(), 3);
        for column in &grid {
            assert_eq!(column.today.len(), 6);
            assert_eq!(column.upcoming.len(), 3);
            assert!(column.upcoming.iter().all(|d| d.available == 4));
        }
        assert_eq!(grid[1].veterinarian.initials, "CR");
        assert_eq!(grid[0].upcoming[0].label, "Tue, Jan 16");
    }
}
