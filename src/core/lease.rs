//! Lease term calculator.
//!
//! A lease covers `duration_years` whole years and includes its last day, so
//! the end date is the anniversary of the start date minus one day. The
//! countdown to that end date is done on year/month/day fields, borrowing
//! days from the month that precedes the end date's month.
//!
//! All functions here are pure. "Now" is always a parameter.

use crate::utils::error::{RentalError, Result};
use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseTerm {
    pub start_date: NaiveDate,
    pub duration_years: u32,
}

impl LeaseTerm {
    /// Rejects zero, negative and absurdly large durations.
    pub fn new(start_date: NaiveDate, duration_years: i64) -> Result<Self> {
        let years = u32::try_from(duration_years)
            .ok()
            .filter(|y| *y > 0)
            .ok_or(RentalError::InvalidDuration {
                years: duration_years,
            })?;

        Ok(Self {
            start_date,
            duration_years: years,
        })
    }

    pub fn parse(start_date: &str, duration_years: i64) -> Result<Self> {
        Self::new(parse_date(start_date)?, duration_years)
    }

    pub fn end_date(&self) -> Result<NaiveDate> {
        compute_end_date(self.start_date, self.duration_years)
    }

    pub fn remaining(&self, now: NaiveDate) -> Result<RemainingTerm> {
        Ok(compute_remaining(self.end_date()?, now))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemainingTerm {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub total_days: i64,
}

impl RemainingTerm {
    pub fn has_ended(&self) -> bool {
        self.total_days <= 0
    }

    /// Adds the breakdown back onto `now`.
    ///
    /// Years and months are applied as one month offset so a Feb 29 `now`
    /// is clamped at most once.
    pub fn recombine(&self, now: NaiveDate) -> Option<NaiveDate> {
        let months = u32::try_from(self.years * 12 + self.months).ok()?;
        let days = u64::try_from(self.days).ok()?;
        now.checked_add_months(Months::new(months))?
            .checked_add_days(chrono::Days::new(days))
    }
}

/// Start date plus `duration_years`, minus one day.
///
/// Feb 29 landing on a non-leap year is clamped to Feb 28 before the day is
/// subtracted, so 2024-02-29 for one year ends on 2025-02-27.
pub fn compute_end_date(start_date: NaiveDate, duration_years: u32) -> Result<NaiveDate> {
    if duration_years == 0 {
        return Err(RentalError::InvalidDuration { years: 0 });
    }

    add_years(start_date, duration_years)
        .and_then(|anniversary| anniversary.pred_opt())
        .ok_or_else(|| {
            RentalError::invalid_date(
                start_date.to_string(),
                format!("end date after {} years is out of range", duration_years),
            )
        })
}

pub fn compute_remaining(end_date: NaiveDate, now: NaiveDate) -> RemainingTerm {
    let total_days = end_date.signed_duration_since(now).num_days();
    if total_days <= 0 {
        return RemainingTerm {
            total_days,
            ..RemainingTerm::default()
        };
    }

    let mut years = end_date.year() - now.year();
    let mut months = end_date.month() as i32 - now.month() as i32;
    let mut days = end_date.day() as i32 - now.day() as i32;

    if days < 0 {
        months -= 1;
        let (year, month) = previous_month(end_date.year(), end_date.month());
        // now.day 超過前一個月天數時（例如 1/31 → 3/1），以 now.day 借位
        let borrowed = days_in_month(year, month).max(now.day());
        days += borrowed as i32;
    }

    if months < 0 {
        years -= 1;
        months += 12;
    }

    RemainingTerm {
        years,
        months,
        days,
        total_days,
    }
}

pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(years.checked_mul(12)?))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp, or a naive ISO timestamp.
/// Any time of day is dropped.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RentalError::invalid_date(value, "date is empty"));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(timestamp.date());
    }

    Err(RentalError::invalid_date(
        value,
        "expected YYYY-MM-DD or an RFC 3339 timestamp",
    ))
}

/// Rent after compounding `increment_percent` once per full
/// `increment_interval` years since `start_date`.
pub fn escalated_rent(
    amount: f64,
    increment_percent: f64,
    increment_interval: u32,
    start_date: NaiveDate,
    on: NaiveDate,
) -> f64 {
    if increment_interval == 0 || increment_percent == 0.0 || on < start_date {
        return amount;
    }

    let steps = full_years_between(start_date, on) / increment_interval;
    let factor = (1.0 + increment_percent / 100.0).powi(steps as i32);
    (amount * factor * 100.0).round() / 100.0
}

fn full_years_between(start_date: NaiveDate, on: NaiveDate) -> u32 {
    let mut years = u32::try_from(on.year() - start_date.year()).unwrap_or(0);
    while years > 0 && add_years(start_date, years).map_or(true, |d| d > on) {
        years -= 1;
    }
    years
}
