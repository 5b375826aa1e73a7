//! Reservation repository (read side)

use tracing::instrument;

use crate::db::Store;
use crate::error::DbResult;
use crate::models::{CustomerId, Reservation};

const FOR_CUSTOMER_SQL: &str = r#"
    SELECT id,
           customer_id AS "customerId",
           num_guests AS "numGuests",
           start_at AS "startAt",
           notes
    FROM reservations
    WHERE customer_id = $1
"#;

/// Reservation repository
pub struct ReservationRepo<'a> {
    store: &'a dyn Store,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// All reservations belonging to one customer, in store order.
    #[instrument(skip(self, customer_id), fields(customer_id = %customer_id))]
    pub async fn for_customer(&self, customer_id: CustomerId) -> DbResult<Vec<Reservation>> {
        let rows = self
            .store
            .query(FOR_CUSTOMER_SQL, vec![customer_id.get().into()])
            .await?;

        tracing::debug!(count = rows.len(), "loaded reservations");
        rows.iter().map(Reservation::try_from).collect()
    }
}
