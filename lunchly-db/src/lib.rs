//! lunchly-db: data-access layer for the Lunchly restaurant app
//!
//! Maps customers (and, read-only, their reservations) to and from
//! Postgres. Repositories take an injected [`Store`] so they can be
//! exercised without a live database.
//!
//! ```ignore
//! let store = DbConfig::load().connect_store().await?;
//! let customers = CustomerRepo::new(&store);
//!
//! let mut ada = Customer::new(CustomerFields::new("Ada", "Lovelace"));
//! customers.save(&mut ada).await?;
//! let found = customers.search("love").await?;
//! println!("{}", found.message);
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod repos;

pub use config::DbConfig;
pub use db::{MockStore, PgStore, Store};
pub use error::{DbError, DbResult};
pub use models::{Customer, CustomerFields, CustomerId, Identity, Record, Reservation, Value};
pub use repos::{CustomerRepo, ReservationRepo, SearchResult};
