//! Database layer - schema setup and the store seam
//!
//! Repositories never touch a pool directly; they talk to a [`Store`],
//! which `PgStore` backs with Postgres and `MockStore` fakes in tests.

pub mod schema;
pub mod store;

pub use store::{Call, MockStore, PgStore, Store};
