use std::fmt;

use serde::Serialize;

use crate::{
    config::ReportConfig,
    errors::{ReportError, Result},
};

use super::{
    average::round_half_up,
    contacts::{ContactReportRow, CurrencyTable},
    period::finite_or_zero,
};

/// One cell of an exported table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CsvCell {
    Text(String),
    Number(f64),
    Blank,
}

impl CsvCell {
    fn text(value: impl Into<String>) -> Self {
        CsvCell::Text(value.into())
    }

    fn rounded(value: f64) -> Self {
        CsvCell::Number(round_half_up(value))
    }

    fn rounded_or_blank(value: Option<f64>) -> Self {
        value.map(CsvCell::rounded).unwrap_or(CsvCell::Blank)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CsvCell::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for CsvCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvCell::Text(value) => f.write_str(value),
            CsvCell::Number(value) => write!(f, "{:.0}", value),
            CsvCell::Blank => Ok(()),
        }
    }
}

pub type CsvRow = Vec<CsvCell>;

/// Monthly-equivalent figures for one contact, before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContactEquivalents {
    pub committed: Option<f64>,
    pub in_hand: Option<f64>,
    pub missing: Option<f64>,
    pub special: f64,
    /// Length of the trailing in-hand window, in months.
    pub window: usize,
}

/// Committed and in-hand monthly equivalents.
///
/// Both are only defined for contacts holding the financial-partner status
/// with a pledge amount and frequency; everyone else gets blanks and their
/// whole total counted as special gifts.
pub fn contact_equivalents(contact: &ContactReportRow, config: &ReportConfig) -> ContactEquivalents {
    let min_window = config.min_in_hand_months.max(1) as usize;
    let qualifies = contact.status.as_ref() == Some(&config.financial_partner_status);

    let pledge = match (contact.pledge_amount, contact.pledge_frequency) {
        (Some(amount), Some(frequency)) if qualifies && amount.is_finite() => {
            Some((amount, frequency))
        }
        _ => None,
    };

    let Some((amount, frequency)) = pledge else {
        return ContactEquivalents {
            committed: None,
            in_hand: None,
            missing: None,
            special: finite_or_zero(contact.total),
            window: min_window,
        };
    };

    let window = min_window.max(frequency.months().ceil() as usize);
    let committed = amount / frequency.months();
    let recent: f64 = contact
        .months
        .iter()
        .rev()
        .take(window)
        .map(|month| finite_or_zero(month.total))
        .sum();
    let in_hand = recent / window as f64;

    ContactEquivalents {
        committed: Some(committed),
        in_hand: Some(in_hand),
        missing: Some(-(committed - in_hand).max(0.0)),
        special: (in_hand - committed).max(0.0) * window as f64,
        window,
    }
}

const FIXED_COLUMNS: [&str; 9] = [
    "Partner",
    "Status",
    "Commitment Amount",
    "Commitment Currency",
    "Commitment Frequency",
    "Committed Monthly Equivalent",
    "In Hand Monthly Equivalent",
    "Missing In Hand Monthly Equivalent",
    "In Hand Special Gifts",
];

fn contact_row(contact: &ContactReportRow, table: &CurrencyTable, config: &ReportConfig) -> CsvRow {
    let equivalents = contact_equivalents(contact, config);
    let mut row = vec![
        CsvCell::text(contact.name.clone()),
        contact
            .status
            .as_ref()
            .map(|status| CsvCell::text(status.label()))
            .unwrap_or(CsvCell::Blank),
        CsvCell::rounded_or_blank(contact.pledge_amount.filter(|value| value.is_finite())),
        contact
            .pledge_currency
            .as_ref()
            .map(|code| CsvCell::text(code.as_str()))
            .unwrap_or(CsvCell::Blank),
        contact
            .pledge_frequency
            .map(|frequency| CsvCell::text(frequency.label()))
            .unwrap_or(CsvCell::Blank),
        CsvCell::rounded_or_blank(equivalents.committed),
        CsvCell::rounded_or_blank(equivalents.in_hand),
        CsvCell::rounded_or_blank(equivalents.missing),
        CsvCell::rounded(equivalents.special),
    ];
    for index in 0..table.months.len() {
        row.push(CsvCell::rounded(contact.month_total(index)));
    }
    row.push(CsvCell::rounded(finite_or_zero(contact.total)));
    row
}

/// Flattens currency tables into CSV cells: per currency a currency row, a
/// column-title row, one row per contact and a totals row.
///
/// Numbers are rounded as cells are emitted; the totals row sums the
/// unrounded values of every numeric column.
pub fn build_csv_rows(tables: &[CurrencyTable], config: &ReportConfig) -> Vec<CsvRow> {
    let mut rows = Vec::new();

    for table in tables {
        rows.push(vec![
            CsvCell::text("Currency"),
            CsvCell::text(table.currency.as_str()),
            CsvCell::text(table.currency.symbol()),
        ]);

        let mut titles: CsvRow = FIXED_COLUMNS.iter().map(|title| CsvCell::text(*title)).collect();
        titles.extend(table.months.iter().map(|month| CsvCell::text(month.month_label())));
        titles.push(CsvCell::text("Total"));
        rows.push(titles);

        let mut pledged = 0.0;
        let mut committed = 0.0;
        let mut in_hand = 0.0;
        let mut missing = 0.0;
        let mut special = 0.0;
        for contact in &table.ordered_contacts {
            let equivalents = contact_equivalents(contact, config);
            pledged += contact.pledge_amount.map(finite_or_zero).unwrap_or(0.0);
            committed += equivalents.committed.unwrap_or(0.0);
            in_hand += equivalents.in_hand.unwrap_or(0.0);
            missing += equivalents.missing.unwrap_or(0.0);
            special += equivalents.special;
            rows.push(contact_row(contact, table, config));
        }

        let mut totals = vec![
            CsvCell::text("Totals"),
            CsvCell::Blank,
            CsvCell::rounded(pledged),
            CsvCell::Blank,
            CsvCell::Blank,
            CsvCell::rounded(committed),
            CsvCell::rounded(in_hand),
            CsvCell::rounded(missing),
            CsvCell::rounded(special),
        ];
        for index in 0..table.months.len() {
            totals.push(CsvCell::rounded(table.totals.get(index).copied().unwrap_or(0.0)));
        }
        totals.push(CsvCell::rounded(table.grand_total()));
        rows.push(totals);
    }

    tracing::debug!(tables = tables.len(), rows = rows.len(), "built csv rows");
    rows
}

/// Serializes rows as CSV text. Rows may differ in length.
pub fn to_csv_string(rows: &[CsvRow]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ReportError::Io(err.into_error()))?;
    String::from_utf8(bytes).map_err(|err| ReportError::InvalidInput(err.to_string()))
}
