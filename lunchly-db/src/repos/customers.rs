//! Customer repository
//!
//! Each operation is a single statement against the store:
//! - list/search: ordered by last name, then first name
//! - top N: JOIN + COUNT grouped by customer (customers without
//!   reservations drop out of the inner join)
//! - save: INSERT ... RETURNING id when unsaved, UPDATE when saved

use serde::Serialize;
use tracing::instrument;

use super::ReservationRepo;
use crate::db::Store;
use crate::error::{DbError, DbResult};
use crate::models::{Customer, CustomerId, Identity, Record, Reservation, Value};

/// Default size of the ranked customer list
pub const DEFAULT_TOP_LIMIT: i64 = 10;

const LIST_SQL: &str = r#"
    SELECT id,
           first_name AS "firstName",
           last_name AS "lastName",
           phone,
           notes
    FROM customers
    ORDER BY last_name, first_name
"#;

const TOP_SQL: &str = r#"
    SELECT cust.id,
           cust.first_name AS "firstName",
           cust.last_name AS "lastName",
           cust.phone,
           cust.notes,
           COUNT(res.id) AS "nbrOfRes"
    FROM customers AS cust
    JOIN reservations AS res ON cust.id = res.customer_id
    GROUP BY cust.id
    ORDER BY COUNT(res.id) DESC
    LIMIT $1
"#;

const SEARCH_SQL: &str = r#"
    SELECT id,
           first_name AS "firstName",
           last_name AS "lastName",
           phone,
           notes
    FROM customers
    WHERE first_name ILIKE $1 OR last_name ILIKE $1
    ORDER BY last_name, first_name
"#;

const GET_SQL: &str = r#"
    SELECT id,
           first_name AS "firstName",
           last_name AS "lastName",
           phone,
           notes
    FROM customers
    WHERE id = $1
"#;

const INSERT_SQL: &str = r#"
    INSERT INTO customers (first_name, last_name, phone, notes)
    VALUES ($1, $2, $3, $4)
    RETURNING id
"#;

const UPDATE_SQL: &str = r#"
    UPDATE customers SET first_name=$1, last_name=$2, phone=$3, notes=$4
    WHERE id=$5
"#;

/// Matches of a name search plus a sentence describing them
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub customers: Vec<Customer>,
    pub message: String,
}

/// Customer repository
pub struct CustomerRepo<'a> {
    store: &'a dyn Store,
}

impl<'a> CustomerRepo<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Every customer, ordered by (last name, first name).
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> DbResult<Vec<Customer>> {
        let rows = self.store.query(LIST_SQL, vec![]).await?;
        tracing::debug!(count = rows.len(), "listed customers");
        hydrate(&rows)
    }

    /// The ten customers with the most reservations.
    pub async fn best10(&self) -> DbResult<Vec<Customer>> {
        self.top_by_reservation_count(DEFAULT_TOP_LIMIT).await
    }

    /// At most `limit` customers ranked by reservation count, descending.
    ///
    /// Each customer carries its count in `nbr_of_res`. Ties come back in
    /// whatever order the store produces. A negative limit is treated as 0.
    #[instrument(skip(self))]
    pub async fn top_by_reservation_count(&self, limit: i64) -> DbResult<Vec<Customer>> {
        let rows = self
            .store
            .query(TOP_SQL, vec![Value::Int(limit.max(0))])
            .await?;
        tracing::debug!(count = rows.len(), "ranked customers");
        hydrate(&rows)
    }

    /// Case-insensitive substring search on first or last name.
    ///
    /// The term is trimmed; an empty term matches everyone.
    #[instrument(skip(self, term), fields(term = %term.trim()))]
    pub async fn search(&self, term: &str) -> DbResult<SearchResult> {
        let term = term.trim();
        let rows = self
            .store
            .query(SEARCH_SQL, vec![Value::Text(format!("%{}%", term))])
            .await?;

        tracing::debug!(count = rows.len(), "searched customers");
        Ok(SearchResult {
            message: search_message(term, rows.len()),
            customers: hydrate(&rows)?,
        })
    }

    /// Fetch one customer by primary key.
    ///
    /// # Errors
    ///
    /// `DbError::NotFound` ("No such customer: <id>") when no row matches.
    #[instrument(skip(self, id), fields(id = %id))]
    pub async fn get(&self, id: CustomerId) -> DbResult<Customer> {
        let rows = self.store.query(GET_SQL, vec![id.get().into()]).await?;
        let row = rows
            .first()
            .ok_or_else(|| DbError::not_found("customer", id))?;

        Customer::try_from(row)
    }

    /// All reservations for this customer.
    ///
    /// A customer that was never saved cannot own reservations, so no
    /// query is issued for it.
    pub async fn reservations(&self, customer: &Customer) -> DbResult<Vec<Reservation>> {
        match customer.id() {
            Some(id) => ReservationRepo::new(self.store).for_customer(id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Insert an unsaved customer (and record its new id), or update every
    /// mutable column of a saved one.
    ///
    /// Updating an id with no matching row is not detected here.
    #[instrument(skip(self, customer), fields(identity = ?customer.identity()))]
    pub async fn save(&self, customer: &mut Customer) -> DbResult<()> {
        let mut params = vec![
            Value::from(customer.first_name.as_str()),
            Value::from(customer.last_name.as_str()),
            Value::from(customer.phone.clone()),
            Value::from(customer.notes.clone()),
        ];

        match customer.identity() {
            Identity::Unsaved => {
                let rows = self.store.query(INSERT_SQL, params).await?;
                let row = rows
                    .first()
                    .ok_or(DbError::MissingReturning { table: "customers" })?;
                let id = CustomerId::new(row.int("id")?);

                customer.assign_id(id);
                tracing::debug!(%id, "inserted customer");
            }
            Identity::Saved(id) => {
                params.push(id.get().into());
                self.store.query(UPDATE_SQL, params).await?;
                tracing::debug!(%id, "updated customer");
            }
        }

        Ok(())
    }
}

fn hydrate(rows: &[Record]) -> DbResult<Vec<Customer>> {
    rows.iter().map(Customer::try_from).collect()
}

/// Summary sentence for a name search, e.g.
/// `3 customers were found with 'Lee' in their name.`
pub fn search_message(term: &str, count: usize) -> String {
    let found = match count {
        0 => "No customers were found with ".to_string(),
        1 => "1 customer was found with ".to_string(),
        n => format!("{} customers were found with ", n),
    };

    format!("{}'{}' in their name.", found, term.trim())
}
