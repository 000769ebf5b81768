//! Read model of a sectioned result set and the source that produces it.

use std::sync::Weak;

use crate::error::FetchError;
use crate::position::{ChangeKind, Position};

/// A contiguous run of items sharing a grouping key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<T> {
    /// Value of the grouping key, if the source groups by one
    pub name: Option<String>,
    /// Items of the group, in presentation order
    pub items: Vec<T>,
}

impl<T> Group<T> {
    /// Creates a group with a grouping key.
    pub fn named(name: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            name: Some(name.into()),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Immutable snapshot of a sectioned result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet<T> {
    groups: Vec<Group<T>>,
}

impl<T> ResultSet<T> {
    pub fn new(groups: Vec<Group<T>>) -> Self {
        Self { groups }
    }

    /// A result set with no groups.
    pub fn empty() -> Self {
        Self { groups: Vec::new() }
    }

    pub fn groups(&self) -> &[Group<T>] {
        &self.groups
    }

    pub fn group(&self, group: usize) -> Option<&Group<T>> {
        self.groups.get(group)
    }

    /// Number of groups actually present (may be 0).
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of items in `group`, or `None` if the group does not exist.
    pub fn item_count(&self, group: usize) -> Option<usize> {
        self.groups.get(group).map(Group::len)
    }

    /// Returns the item at `position`.
    pub fn get(&self, position: Position) -> Option<&T> {
        self.groups
            .get(position.group)
            .and_then(|group| group.items.get(position.item))
    }

    /// Total number of items across all groups.
    pub fn total_items(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }
}

impl<T> Default for ResultSet<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> FromIterator<Group<T>> for ResultSet<T> {
    fn from_iter<I: IntoIterator<Item = Group<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Receives the change notifications of a result source.
///
/// A source reports one cycle as `begin_cycle`, any number of section and
/// row changes, then `end_cycle`. Cycles never overlap.
pub trait ChangeObserver: Send + Sync {
    fn begin_cycle(&self);

    fn section_changed(&self, kind: ChangeKind, index: usize);

    /// # Arguments
    /// * `kind` - Reported change kind
    /// * `at` - Position before the change (deletes, updates, moves)
    /// * `new_position` - Position after the change (inserts, moves)
    fn row_changed(&self, kind: ChangeKind, at: Option<Position>, new_position: Option<Position>);

    fn end_cycle(&self);
}

/// A persistence-backed, observable, sectioned result set.
pub trait ResultSource<T>: Send + Sync {
    /// Executes the query and returns the loaded result set.
    fn perform_fetch(&self) -> Result<ResultSet<T>, FetchError>;

    /// Returns the result set as of the most recently finished cycle.
    fn current(&self) -> ResultSet<T>;

    /// Registers the observer that receives change cycles.
    fn subscribe(&self, observer: Weak<dyn ChangeObserver>);
}
