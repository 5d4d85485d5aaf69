//! Row diffing between two displayed lists.
//!
//! Countries are identified by display name; two rows with the same name are the
//! same item, and they have the same contents only if every field matches.

use crate::domain::Country;
use std::collections::HashMap;

/// Item identity and content equality for list rows.
pub struct CountryListDiff;

impl CountryListDiff {
    #[must_use]
    pub fn same_item(old: &Country, new: &Country) -> bool {
        old.name == new.name
    }

    #[must_use]
    pub fn same_contents(old: &Country, new: &Country) -> bool {
        old == new
    }

    /// Changes needed to go from `old` to `new`.
    #[must_use]
    pub fn compute(old: &[Country], new: &[Country]) -> ListChanges {
        let old_by_name: HashMap<&str, &Country> = old.iter().map(|c| (c.name.as_str(), c)).collect();
        let new_by_name: HashMap<&str, &Country> = new.iter().map(|c| (c.name.as_str(), c)).collect();

        let removed = old
            .iter()
            .filter(|c| !new_by_name.contains_key(c.name.as_str()))
            .map(|c| c.name.clone())
            .collect();

        let mut inserted = Vec::new();
        let mut changed = Vec::new();
        for country in new {
            match old_by_name.get(country.name.as_str()) {
                None => inserted.push(country.name.clone()),
                Some(previous) if !Self::same_contents(previous, country) => changed.push(country.name.clone()),
                Some(_) => {}
            }
        }

        let kept_old: Vec<&str> = old
            .iter()
            .map(|c| c.name.as_str())
            .filter(|name| new_by_name.contains_key(name))
            .collect();
        let kept_new: Vec<&str> = new
            .iter()
            .map(|c| c.name.as_str())
            .filter(|name| old_by_name.contains_key(name))
            .collect();

        ListChanges {
            inserted,
            removed,
            changed,
            reordered: kept_old != kept_new,
        }
    }
}

/// Summary of row changes between two lists, by country name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListChanges {
    pub inserted: Vec<String>,
    pub removed: Vec<String>,
    pub changed: Vec<String>,
    /// Rows present in both lists appear in a different order.
    pub reordered: bool,
}

impl ListChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.removed.is_empty() && self.changed.is_empty() && !self.reordered
    }
}
