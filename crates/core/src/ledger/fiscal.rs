//! Financial-year validation for posting dates.
//!
//! The financial year runs April to March: a posting dated before April 1
//! of the active year belongs to a closed book and is rejected.

use chrono::{Datelike, NaiveDate};

use super::error::LedgerError;

/// Date format accepted for posting dates.
const POSTING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns April 1 of the active financial year for the given date.
///
/// When `today` falls in April or later the active year started this
/// calendar year; January through March belong to the year that started the
/// previous April.
#[must_use]
pub fn financial_year_start(today: NaiveDate) -> NaiveDate {
    let year = if today.month() >= 4 {
        today.year()
    } else {
        today.year() - 1
    };
    NaiveDate::from_ymd_opt(year, 4, 1).expect("April 1 exists in every year")
}

/// Parses a posting date and checks it against the active financial year.
///
/// The boundary itself (April 1) is accepted; anything strictly before it
/// is rejected. Pure function: `today` is supplied by the caller's clock.
///
/// # Errors
///
/// Returns `LedgerError::InvalidDate` when `raw` is not a `YYYY-MM-DD`
/// calendar date, and `LedgerError::OutOfFinancialYear` when the date
/// precedes the boundary.
pub fn validate_posting_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, LedgerError> {
    let posting_date = NaiveDate::parse_from_str(raw, POSTING_DATE_FORMAT)
        .map_err(|_| LedgerError::InvalidDate(raw.to_string()))?;

    let year_start = financial_year_start(today);
    if posting_date < year_start {
        return Err(LedgerError::OutOfFinancialYear {
            posting_date,
            year_start,
        });
    }

    Ok(posting_date)
}
