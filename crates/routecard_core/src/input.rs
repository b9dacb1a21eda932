//! Raw form input and its early validation.

use crate::error::{LedgerError, LedgerResult};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use routecard_storage::FormRecord;

/// Date format used by the form, e.g. `14.03.2025`.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Time format used by the form, e.g. `09:30`.
pub const TIME_FORMAT: &str = "%H:%M";

/// Parses a form date (`dd.mm.yyyy`).
///
/// # Errors
///
/// Returns [`LedgerError::Input`] if the text is not a valid calendar date in
/// that format.
pub fn parse_form_date(text: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| LedgerError::input(format!("invalid date {text:?}, expected dd.mm.yyyy")))
}

/// Parses a form time (`HH:MM`).
///
/// # Errors
///
/// Returns [`LedgerError::Input`] if the text is not a valid time in that
/// format.
pub fn parse_form_time(text: &str) -> LedgerResult<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), TIME_FORMAT)
        .map_err(|_| LedgerError::input(format!("invalid time {text:?}, expected HH:MM")))
}

/// The form as typed by the user, before validation.
///
/// Every field is raw text. [`FormDraft::into_record`] checks the parts the
/// ledger depends on and rejects bad input before anything is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    /// Cluster number.
    pub cluster_number: String,
    /// Cast (model) number; empty means none.
    pub cast_number: String,
    /// Cast (model) name; empty means none.
    pub cast_name: String,
    /// Gluing date, `dd.mm.yyyy`.
    pub gluing_date: String,
    /// Gluing executor.
    pub gluing_executor: String,
    /// Gluing quantity.
    pub gluing_quantity: String,
    /// Gluing notes.
    pub gluing_notes: String,
    /// Control date, `dd.mm.yyyy` or empty.
    pub control_date: String,
    /// Control time, `HH:MM` or empty.
    pub control_time: String,
    /// Control executor.
    pub control_executor: String,
    /// Control quantity.
    pub control_quantity: String,
    /// Control notes.
    pub control_notes: String,
}

impl FormDraft {
    /// A blank form with the dates and control time prefilled from the
    /// local clock.
    #[must_use]
    pub fn today() -> Self {
        Self::dated(Local::now().naive_local())
    }

    /// A blank form with the dates and control time prefilled from `now`.
    #[must_use]
    pub fn dated(now: NaiveDateTime) -> Self {
        let date = now.format(DATE_FORMAT).to_string();
        Self {
            gluing_date: date.clone(),
            control_date: date,
            control_time: now.format(TIME_FORMAT).to_string(),
            ..Self::default()
        }
    }

    /// The gluing date, parsed.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Input`] if the gluing date is malformed.
    pub fn gluing_day(&self) -> LedgerResult<NaiveDate> {
        parse_form_date(&self.gluing_date)
    }

    /// Validates the draft and converts it into a record for the ledger.
    ///
    /// The cluster number format itself is checked by the ledger on save.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Input`] when the cluster number is empty, the
    /// gluing date is malformed, or a non-empty control date or time is
    /// malformed.
    pub fn into_record(self) -> LedgerResult<FormRecord> {
        let cluster_number = self.cluster_number.trim().to_string();
        if cluster_number.is_empty() {
            return Err(LedgerError::input("cluster number must not be empty"));
        }
        self.gluing_day()?;
        if !self.control_date.trim().is_empty() {
            parse_form_date(&self.control_date)?;
        }
        if !self.control_time.trim().is_empty() {
            parse_form_time(&self.control_time)?;
        }

        Ok(FormRecord {
            cluster_number,
            cast_number: non_empty(self.cast_number),
            cast_name: non_empty(self.cast_name),
            gluing_date: self.gluing_date,
            gluing_executor: self.gluing_executor,
            gluing_quantity: self.gluing_quantity,
            gluing_notes: self.gluing_notes,
            control_date: self.control_date,
            control_time: self.control_time,
            control_executor: self.control_executor,
            control_quantity: self.control_quantity,
            control_notes: self.control_notes,
        })
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
