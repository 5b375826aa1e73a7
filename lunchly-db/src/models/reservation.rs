//! Reservation entity (read side only)

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

use super::{CustomerId, Record};
use crate::error::{DbError, DbResult};

/// A table booking made by a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub customer_id: CustomerId,
    pub num_guests: i64,
    pub start_at: NaiveDateTime,
    pub notes: Option<String>,
}

impl Reservation {
    /// Start time for display, e.g. `January 3rd 2020, 5:30 pm`
    pub fn formatted_start_at(&self) -> String {
        let start = self.start_at;
        let (pm, hour) = start.hour12();
        let meridiem = if pm { "pm" } else { "am" };

        format!(
            "{} {}{} {}, {}:{:02} {}",
            start.format("%B"),
            start.day(),
            ordinal_suffix(start.day()),
            start.year(),
            hour,
            start.minute(),
            meridiem
        )
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

impl TryFrom<&Record> for Reservation {
    type Error = DbError;

    fn try_from(record: &Record) -> DbResult<Self> {
        Ok(Reservation {
            id: record.int("id")?,
            customer_id: CustomerId::new(record.int("customerId")?),
            num_guests: record.int("numGuests")?,
            start_at: record.timestamp("startAt")?,
            notes: record.opt_text("notes")?,
        })
    }
}
