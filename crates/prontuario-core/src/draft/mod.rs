//! Form drafts.
//!
//! A draft holds what the user is typing, validates it on `submit()`, and
//! produces the `*Details` value the repository persists. Errors are kept per
//! field; editing a field clears only that field's error.

mod patient;
mod session;

use std::collections::BTreeMap;

use serde::Serialize;

pub use patient::{PatientDraft, PatientField, PatientInput};
pub use session::{SessionDraft, SessionField, SessionInput};

/// Validation failures keyed by field, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors<F: Ord> {
    errors: BTreeMap<F, String>,
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FieldErrors<F> {
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear(&mut self, field: F) {
        self.errors.remove(&field);
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: F) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> + '_ {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Trimmed text, or `None` when blank.
pub(crate) fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Add `item` if absent, remove it otherwise. Order of the rest is kept.
pub(crate) fn toggle<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if let Some(pos) = items.iter().position(|i| *i == item) {
        items.remove(pos);
    } else {
        items.push(item);
    }
}
