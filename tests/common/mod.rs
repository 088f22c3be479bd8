#![allow(dead_code)]

use donor_reports::{
    currency::CurrencyCode,
    report::{ContactReportRow, ContactStatus, MonthTotal, PledgeFrequency},
};

pub const REPORT_MONTHS: [&str; 6] = [
    "2020-09-01",
    "2020-10-01",
    "2020-11-01",
    "2020-12-01",
    "2021-01-01",
    "2021-02-01",
];

/// Builds a contact whose month list lines up with [`REPORT_MONTHS`].
pub fn contact(
    name: &str,
    status: Option<&str>,
    pledge: Option<(f64, PledgeFrequency)>,
    months: &[f64],
) -> ContactReportRow {
    ContactReportRow {
        id: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        status: status.map(ContactStatus::from),
        pledge_amount: pledge.map(|(amount, _)| amount),
        pledge_currency: pledge.map(|_| CurrencyCode::new("USD")),
        pledge_frequency: pledge.map(|(_, frequency)| frequency),
        months: REPORT_MONTHS
            .iter()
            .zip(months)
            .map(|(month, total)| MonthTotal {
                month: month.to_string(),
                total: *total,
            })
            .collect(),
        total: months.iter().sum(),
    }
}

/// In hand matches committed here, so special gifts stay at 0.
pub fn quarterly_partner() -> ContactReportRow {
    contact(
        "Quarterly Partner",
        Some("PARTNER_FINANCIAL"),
        Some((450.0, PledgeFrequency::Quarterly)),
        &[450.0, 0.0, 0.0, 150.0, 0.0, 450.0],
    )
}

pub fn monthly_partner() -> ContactReportRow {
    contact(
        "Monthly Partner",
        Some("PARTNER_FINANCIAL"),
        Some((100.0, PledgeFrequency::Monthly)),
        &[100.0, 100.0, 100.0, 100.0, 0.0, 100.0],
    )
}

pub fn special_giver() -> ContactReportRow {
    contact(
        "Special Giver",
        Some("PARTNER_SPECIAL"),
        None,
        &[0.0, 50.0, 0.0, 0.0, 0.0, 25.0],
    )
}
