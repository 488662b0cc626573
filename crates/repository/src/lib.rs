//! # In-Memory Entity Repositories
//!
//! Insertion-ordered, in-memory stores for the six entity types of the sales
//! ledger. One generic store, `Repository<T>`, owns identifier generation,
//! lookup, and mutation; per-entity inherent impls add the domain predicate
//! queries (price ranges, foreign-key filters, status filters).
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This crate performs no I/O. An external loader
//!   populates the repositories before any analytics run.
//! - **Lookups never fail:** every query returns an `Option` or an empty
//!   `Vec`; `update` and `delete` on a missing id are silent no-ops.
//! - **Insertion order is contract:** results are returned in the order rows
//!   were added, which downstream consumers rely on for tie-breaking.
//!
//! ## Public API
//!
//! - `Repository<T>`: the generic store, with `SharedRepository<T>` for the
//!   shared-mutable handles handed to the analytics engine.
//! - `Record` / `Named`: the traits an entity implements to be storable and
//!   name-searchable.
//! - Type aliases (`ItemRepository`, `MerchantRepository`, ...) for the six
//!   concrete instantiations.

// Declare the modules that constitute this crate.
pub mod queries;
pub mod record;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use queries::{
    CustomerRepository, InvoiceItemRepository, InvoiceRepository, ItemRepository,
    MerchantRepository, TransactionRepository,
};
pub use record::{Named, Record};
pub use store::{Repository, SharedRepository};
