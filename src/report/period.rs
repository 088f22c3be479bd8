use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::currency::CurrencyCode;

use super::span::{month_label, month_start};

/// A parsed API date. Unparsable input is kept as a marker rather than
/// rejected, so one bad row cannot take down a whole report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportDate {
    Valid(NaiveDate),
    Invalid(String),
}

impl ReportDate {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return ReportDate::Valid(date);
        }
        if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
            return ReportDate::Valid(stamp.date_naive());
        }
        if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
            return ReportDate::Valid(stamp.date());
        }
        ReportDate::Invalid(raw.to_string())
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ReportDate::Valid(date) => Some(*date),
            ReportDate::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ReportDate::Valid(_))
    }

    /// Short month label such as `Nov 20`.
    pub fn month_label(&self) -> String {
        match self {
            ReportDate::Valid(date) => format!(
                "{} {:02}",
                month_label(date.month()),
                date.year().rem_euclid(100)
            ),
            ReportDate::Invalid(_) => "Invalid date".to_string(),
        }
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportDate::Valid(date) => write!(f, "{}", date),
            ReportDate::Invalid(raw) => write!(f, "invalid date `{}`", raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyTotal {
    pub currency: CurrencyCode,
    #[serde(default)]
    pub converted_amount: f64,
}

/// One row of the donation-history query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationHistoryRow {
    pub start_date: String,
    #[serde(default)]
    pub converted_total: f64,
    #[serde(default)]
    pub totals: Vec<CurrencyTotal>,
}

impl DonationHistoryRow {
    pub fn new(start_date: impl Into<String>, converted_total: f64) -> Self {
        Self {
            start_date: start_date.into(),
            converted_total,
            totals: Vec::new(),
        }
    }

    pub fn with_total(mut self, currency: &str, converted_amount: f64) -> Self {
        self.totals.push(CurrencyTotal {
            currency: CurrencyCode::new(currency),
            converted_amount,
        });
        self
    }
}

/// A calendar-month bucket of donation totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Period {
    /// First day of the month, or the invalid marker of the source row.
    pub start: ReportDate,
    pub total: f64,
    pub currencies: BTreeMap<CurrencyCode, f64>,
    pub goal: Option<f64>,
    pub sources: Vec<DonationHistoryRow>,
}

impl Period {
    fn empty(start: ReportDate) -> Self {
        Self {
            start,
            total: 0.0,
            currencies: BTreeMap::new(),
            goal: None,
            sources: Vec::new(),
        }
    }

    fn absorb(&mut self, row: &DonationHistoryRow) {
        self.total += finite_or_zero(row.converted_total);
        for entry in &row.totals {
            *self.currencies.entry(entry.currency.clone()).or_insert(0.0) +=
                finite_or_zero(entry.converted_amount);
        }
        self.sources.push(row.clone());
    }

    pub fn month(&self) -> Option<NaiveDate> {
        self.start.date()
    }

    pub fn label(&self) -> String {
        self.start.month_label()
    }

    pub fn currency_amount(&self, code: &str) -> f64 {
        self.currencies
            .get(&CurrencyCode::new(code))
            .copied()
            .unwrap_or(0.0)
    }
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Groups donation rows into one [`Period`] per calendar month, oldest
/// first. Months without rows are absent. Rows with unparsable dates each
/// become a trailing period carrying the invalid marker.
pub fn bucket_by_month(rows: &[DonationHistoryRow]) -> Vec<Period> {
    let mut months: BTreeMap<NaiveDate, Period> = BTreeMap::new();
    let mut invalid = Vec::new();

    for row in rows {
        match ReportDate::parse(&row.start_date) {
            ReportDate::Valid(date) => {
                let key = month_start(date);
                months
                    .entry(key)
                    .or_insert_with(|| Period::empty(ReportDate::Valid(key)))
                    .absorb(row);
            }
            marker @ ReportDate::Invalid(_) => {
                tracing::warn!(start_date = %row.start_date, "donation period has an invalid start date");
                let mut period = Period::empty(marker);
                period.absorb(row);
                invalid.push(period);
            }
        }
    }

    let mut periods: Vec<Period> = months.into_values().collect();
    periods.extend(invalid);
    tracing::debug!(rows = rows.len(), periods = periods.len(), "bucketed donation history");
    periods
}
