//! Repository implementations for data access
//!
//! Each repository borrows a `&dyn Store` and follows these patterns:
//! - One statement per operation, no transactions
//! - Rows hydrate through `TryFrom<&Record>`; no caching, no identity map
//! - Store errors propagate unchanged

pub mod customers;
pub mod reservations;

pub use customers::{search_message, CustomerRepo, SearchResult, DEFAULT_TOP_LIMIT};
pub use reservations::ReservationRepo;
