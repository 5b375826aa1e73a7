//! Customer entity
//!
//! A restaurant patron. Persistence state is explicit: a customer is either
//! `Unsaved` (no id yet) or `Saved` with the id the store assigned on insert.

use std::fmt;

use serde::{Serialize, Serializer};

use super::Record;
use crate::error::{DbError, DbResult};

/// Surrogate key of a stored customer row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CustomerId(i64);

impl CustomerId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a customer has been written to the store yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Unsaved,
    Saved(CustomerId),
}

impl Identity {
    pub fn id(self) -> Option<CustomerId> {
        match self {
            Self::Unsaved => None,
            Self::Saved(id) => Some(id),
        }
    }
}

/// Input for [`Customer::new`].
///
/// `id` is only set when rehydrating an existing row; `nbr_of_res`
/// defaults to zero.
#[derive(Debug, Clone, Default)]
pub struct CustomerFields {
    pub id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub nbr_of_res: Option<i64>,
}

impl CustomerFields {
    /// Fields for a brand-new customer with no id.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Customer of the restaurant.
///
/// The name, phone and notes fields are public and may be reassigned before
/// calling [`CustomerRepo::save`](crate::repos::CustomerRepo::save).
/// `full_name` is computed once, at construction, and does not follow later
/// edits to `first_name`/`last_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "id", serialize_with = "serialize_identity")]
    identity: Identity,
    pub first_name: String,
    pub last_name: String,
    full_name: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    nbr_of_res: i64,
}

impl Customer {
    pub fn new(fields: CustomerFields) -> Self {
        let full_name = full_name(&fields.first_name, &fields.last_name);
        Self {
            identity: fields.id.map_or(Identity::Unsaved, Identity::Saved),
            first_name: fields.first_name,
            last_name: fields.last_name,
            full_name,
            phone: fields.phone,
            notes: fields.notes,
            nbr_of_res: fields.nbr_of_res.unwrap_or(0),
        }
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// Store-assigned id, `None` until the first save.
    pub fn id(&self) -> Option<CustomerId> {
        self.identity.id()
    }

    /// Display name snapshot taken at construction.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Reservation count; only populated by the ranking query.
    pub fn nbr_of_res(&self) -> i64 {
        self.nbr_of_res
    }

    /// Record the id the store generated. Only an unsaved customer takes an
    /// id; a saved one keeps the id it already has.
    pub(crate) fn assign_id(&mut self, id: CustomerId) {
        if self.identity == Identity::Unsaved {
            self.identity = Identity::Saved(id);
        }
    }
}

/// Views read a flat `id`: the store id once saved, `null` before.
fn serialize_identity<S>(identity: &Identity, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    identity.id().serialize(serializer)
}

/// `first.trim() + "  " + last.trim()` (two spaces)
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{}  {}", first_name.trim(), last_name.trim())
}

impl TryFrom<&Record> for Customer {
    type Error = DbError;

    fn try_from(record: &Record) -> DbResult<Self> {
        Ok(Customer::new(CustomerFields {
            id: Some(CustomerId(record.int("id")?)),
            first_name: record.text("firstName")?,
            last_name: record.text("lastName")?,
            phone: record.opt_text("phone")?,
            notes: record.opt_text("notes")?,
            nbr_of_res: record.opt_int("nbrOfRes")?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;

    #[test]
    fn full_name_trims_and_uses_two_spaces() {
        let customer = Customer::new(CustomerFields::new("  Ada ", " Lovelace  "));
        assert_eq!(customer.full_name(), "Ada  Lovelace");
    }

    #[test]
    fn full_name_is_a_construction_snapshot() {
        let mut customer = Customer::new(CustomerFields::new("Ada", "Lovelace"));
        customer.first_name = "Grace".into();
        customer.last_name = "Hopper".into();

        assert_eq!(customer.full_name(), "Ada  Lovelace");
    }

    #[test]
    fn new_customer_is_unsaved_with_zero_reservations() {
        let customer = Customer::new(CustomerFields::new("Ada", "Lovelace").phone("555-0100"));

        assert_eq!(customer.identity(), Identity::Unsaved);
        assert_eq!(customer.id(), None);
        assert_eq!(customer.nbr_of_res(), 0);
        assert_eq!(customer.phone.as_deref(), Some("555-0100"));
        assert_eq!(customer.notes, None);
    }

    #[test]
    fn id_is_assigned_at_most_once() {
        let mut customer = Customer::new(CustomerFields::new("Ada", "Lovelace"));
        customer.assign_id(CustomerId::new(3));
        customer.assign_id(CustomerId::new(9));

        assert_eq!(customer.identity(), Identity::Saved(CustomerId::new(3)));
    }

    #[test]
    fn hydrates_from_aliased_record() {
        let record = Record::new()
            .with("id", 12i64)
            .with("firstName", "Lee")
            .with("lastName", "Smith")
            .with("phone", Value::Null)
            .with("notes", "window seat");

        let customer = Customer::try_from(&record).unwrap();

        assert_eq!(customer.id(), Some(CustomerId::new(12)));
        assert_eq!(customer.full_name(), "Lee  Smith");
        assert_eq!(customer.phone, None);
        assert_eq!(customer.notes.as_deref(), Some("window seat"));
        assert_eq!(customer.nbr_of_res(), 0);
    }

    #[test]
    fn hydrates_reservation_count_when_present() {
        let record = Record::new()
            .with("id", 1i64)
            .with("firstName", "Lee")
            .with("lastName", "Smith")
            .with("nbrOfRes", 4i64);

        let customer = Customer::try_from(&record).unwrap();
        assert_eq!(customer.nbr_of_res(), 4);
    }

    #[test]
    fn missing_name_fails_to_hydrate() {
        let record = Record::new().with("id", 1i64).with("lastName", "Smith");

        let err = Customer::try_from(&record).unwrap_err();
        assert!(matches!(err, DbError::Decode { ref field, .. } if field == "firstName"));
    }

    #[test]
    fn serializes_camel_case() {
        let customer = Customer::new(CustomerFields {
            id: Some(CustomerId::new(5)),
            ..CustomerFields::new("Ada", "Lovelace")
        });
        let json = serde_json::to_value(&customer).unwrap();

        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["fullName"], "Ada  Lovelace");
        assert_eq!(json["id"], 5);
        assert!(json.get("identity").is_none());
    }

    #[test]
    fn unsaved_customer_serializes_null_id() {
        let customer = Customer::new(CustomerFields::new("Ada", "Lovelace"));
        let json = serde_json::to_value(&customer).unwrap();

        assert!(json["id"].is_null());
        assert_eq!(json["nbrOfRes"], 0);
    }
}
