use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use tracing::debug;

use crate::record::{Named, Record};

/// A shared handle to a repository.
///
/// Repositories are shared mutable state: the analytics engine holds
/// non-exclusive handles and any caller may create, update, or delete records
/// between analytic calls. Execution is single-threaded and synchronous, so
/// `Rc<RefCell<..>>` models the sharing without locks.
pub type SharedRepository<T> = Rc<RefCell<Repository<T>>>;

/// A generic, insertion-ordered, in-memory store of one entity type.
///
/// Owns identifier generation (`next_id`), lookup, and mutation. All scans
/// are O(n), which is acceptable for datasets in the low thousands of rows.
#[derive(Debug, Clone)]
pub struct Repository<T: Record> {
    rows: Vec<T>,
}

impl<T: Record> Repository<T> {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Wraps the repository in a shared handle for the analytics engine.
    pub fn into_shared(self) -> SharedRepository<T> {
        Rc::new(RefCell::new(self))
    }

    /// All current records, in insertion order.
    pub fn all(&self) -> &[T] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a pre-built record (e.g. one parsed by the external loader).
    /// No validation is performed, by contract.
    pub fn add(&mut self, row: T) {
        self.rows.push(row);
    }

    pub fn find_by_id(&self, id: u64) -> Option<&T> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// The id the next created record will receive: 1 for an empty store,
    /// otherwise one past the current maximum. Monotonic, but not contiguous
    /// once records have been deleted.
    pub fn next_id(&self) -> u64 {
        self.rows
            .iter()
            .map(Record::id)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Builds a record from the given attributes with a generated id and
    /// `created_at == updated_at == now`, appends it, and returns a copy.
    pub fn create(&mut self, attributes: T::Attributes) -> T {
        let row = T::build(self.next_id(), Utc::now(), attributes);
        debug!(id = row.id(), "created record");
        self.rows.push(row.clone());
        row
    }

    /// Merges a partial update into the record with the given id, refreshing
    /// its `updated_at`. A missing id is a silent no-op.
    pub fn update(&mut self, id: u64, update: T::Update) {
        if let Some(row) = self.rows.iter_mut().find(|row| row.id() == id) {
            row.apply(update, Utc::now());
            debug!(id, "updated record");
        }
    }

    /// Removes and returns the record with the given id, preserving the order
    /// of the remaining rows. A missing id is a silent no-op.
    pub fn delete(&mut self, id: u64) -> Option<T> {
        let at = self.rows.iter().position(|row| row.id() == id)?;
        debug!(id, "deleted record");
        Some(self.rows.remove(at))
    }
}

impl<T: Record> Default for Repository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record + Named> Repository<T> {
    /// First record whose name matches exactly, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&T> {
        let needle = name.to_lowercase();
        self.rows
            .iter()
            .find(|row| row.name().to_lowercase() == needle)
    }

    /// All records whose name contains the fragment, ignoring case, in
    /// insertion order.
    pub fn find_all_by_name(&self, fragment: &str) -> Vec<&T> {
        let needle = fragment.to_lowercase();
        self.rows
            .iter()
            .filter(|row| row.name().to_lowercase().contains(&needle))
            .collect()
    }
}
