//! Entities and the generic row record they hydrate from
//!
//! Hydration is a pure `TryFrom<&Record>`; SQL aliasing stays in the repos.

pub mod record;
pub mod customer;
pub mod reservation;

pub use record::{Record, Value};
pub use customer::{Customer, CustomerFields, CustomerId, Identity};
pub use reservation::Reservation;
