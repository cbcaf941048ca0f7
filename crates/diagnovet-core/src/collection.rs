//! List helpers shared by the appointment and report views.

use crate::models::{Appointment, Report};

/// A stored record that list views can filter and remove by id.
pub trait Searchable {
    fn id(&self) -> &str;

    /// Text fields the search box matches against.
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match over [`Searchable::search_fields`].
    fn matches(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl Searchable for Appointment {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.owner_name.as_str(), self.veterinarian.as_str()]
    }
}

impl Searchable for Report {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.animal_name.as_str(), self.tutor.name.as_str()]
    }
}

/// Items matching `term`, order kept. A blank term keeps everything.
pub fn filter_by_term<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.matches(term)).collect()
}

/// Remove the first item with `id`. Returns whether one was removed.
pub fn remove_by_id<T: Searchable>(items: &mut Vec<T>, id: &str) -> bool {
    match items.iter().position(|item| item.id() == id) {
        Some(index) => {
            items.remove(index);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        id: String,
        name: String,
        owner: String,
    }

    impl Searchable for Row {
        fn id(&self) -> &str {
            &self.id
        }

        fn search_fields(&self) -> Vec<&str> {
            vec![self.name.as_str(), self.owner.as_str()]
        }
    }

    fn rows() -> Vec<Row> {
        [("3", "Bella", "Maria Garcia"), ("2", "Max", "Juan Pérez"), ("1", "Luna", "Ana Garcia")]
            .into_iter()
            .map(|(id, name, owner)| Row {
                id: id.into(),
                name: name.into(),
                owner: owner.into(),
            })
            .collect()
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let rows = rows();
        let ids: Vec<&str> = filter_by_term(&rows, "GARCIA").iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn test_blank_term_keeps_all() {
        let rows = rows();
        assert_eq!(filter_by_term(&rows, "  ").len(), 3);
    }

    #[test]
    fn test_remove_by_id() {
        let mut rows = rows();
        assert!(remove_by_id(&mut rows, "2"));
        assert!(!remove_by_id(&mut rows, "2"));

        let ids: Vec<&str> = rows.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }
}
