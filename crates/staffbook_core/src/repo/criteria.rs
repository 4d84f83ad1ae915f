//! Composable conjunctive predicates for `Repository::get`.

use std::fmt::{Debug, Formatter};

type Condition<T> = Box<dyn Fn(&T) -> bool>;

/// Conjunction of per-field conditions.
///
/// An empty criteria value accepts every item.
pub struct Criteria<T> {
    conditions: Vec<Condition<T>>,
}

impl<T> Criteria<T> {
    /// Criteria that accepts everything.
    pub fn all() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    /// Adds an unconditional condition.
    pub fn and(mut self, condition: impl Fn(&T) -> bool + 'static) -> Self {
        self.conditions.push(Box::new(condition));
        self
    }

    /// Adds a condition only when the filter value is present.
    pub fn and_some<V: 'static>(
        self,
        value: Option<V>,
        condition: impl Fn(&T, &V) -> bool + 'static,
    ) -> Self {
        match value {
            Some(value) => self.and(move |item| condition(item, &value)),
            None => self,
        }
    }

    pub fn matches(&self, item: &T) -> bool {
        self.conditions.iter().all(|condition| condition(item))
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl<T> Default for Criteria<T> {
    fn default() -> Self {
        Self::all()
    }
}

impl<T> Debug for Criteria<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Criteria")
            .field("conditions", &self.conditions.len())
            .finish()
    }
}

/// Case-insensitive substring test used by text filters.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
