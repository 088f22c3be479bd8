mod common;

use common::{contact, monthly_partner, quarterly_partner, special_giver};
use donor_reports::{
    config::ReportConfig,
    currency::CurrencyCode,
    report::{
        build_csv_rows, build_currency_tables, contact_equivalents, to_csv_string, ContactOrder,
        CsvCell, CurrencyGroup, PledgeFrequency, SortDirection,
    },
};

fn usd_tables() -> Vec<donor_reports::report::CurrencyTable> {
    let groups = vec![CurrencyGroup {
        currency: CurrencyCode::new("USD"),
        contacts: vec![special_giver(), quarterly_partner(), monthly_partner()],
    }];
    build_currency_tables(&groups, ContactOrder::Name, SortDirection::Ascending)
}

fn numbers(row: &[CsvCell]) -> Vec<Option<f64>> {
    row.iter().map(CsvCell::as_number).collect()
}

#[test]
fn quarterly_partner_row_matches_commitment() {
    let rows = build_csv_rows(&usd_tables(), &ReportConfig::default());
    let row = rows
        .iter()
        .find(|row| row.first() == Some(&CsvCell::Text("Quarterly Partner".into())))
        .expect("quarterly partner row");

    assert_eq!(row[1], CsvCell::Text("Partner - Financial".into()));
    assert_eq!(row[4], CsvCell::Text("Quarterly".into()));
    assert_eq!(row[5], CsvCell::Number(150.0));
    assert_eq!(row[6], CsvCell::Number(150.0));
    assert_eq!(row[7], CsvCell::Number(0.0));
    assert!(row[7].as_number().unwrap().is_sign_negative());
    assert_eq!(row[8], CsvCell::Number(0.0));
    assert_eq!(row.last(), Some(&CsvCell::Number(1050.0)));
}

#[test]
fn in_hand_uses_trailing_four_months() {
    let partner = contact(
        "Quarterly Partner",
        Some("PARTNER_FINANCIAL"),
        Some((450.0, PledgeFrequency::Quarterly)),
        &[0.0, 0.0, 300.0, 225.0, 0.0, 300.0],
    );
    let eq = contact_equivalents(&partner, &ReportConfig::default());
    assert_eq!(eq.window, 4);
    assert_eq!(eq.committed, Some(150.0));
    assert_eq!(eq.in_hand, Some(206.25));
    assert_eq!(eq.missing, Some(-0.0));
    assert!((eq.special - 225.0).abs() < 1e-9);
}

#[test]
fn blocks_repeat_per_currency() {
    let groups = vec![
        CurrencyGroup {
            currency: CurrencyCode::new("USD"),
            contacts: vec![monthly_partner()],
        },
        CurrencyGroup {
            currency: CurrencyCode::new("EUR"),
            contacts: vec![special_giver(), special_giver()],
        },
    ];
    let tables = build_currency_tables(&groups, ContactOrder::Total, SortDirection::Descending);
    let rows = build_csv_rows(&tables, &ReportConfig::default());

    // currency row, titles, contacts, totals
    assert_eq!(rows.len(), (2 + 1 + 1) + (2 + 2 + 1));
    assert_eq!(
        rows[4],
        vec![
            CsvCell::Text("Currency".into()),
            CsvCell::Text("EUR".into()),
            CsvCell::Text("€".into()),
        ]
    );
    let eur_totals = rows.last().unwrap();
    assert_eq!(eur_totals[0], CsvCell::Text("Totals".into()));
    assert_eq!(eur_totals[1], CsvCell::Blank);
    assert_eq!(
        numbers(&eur_totals[8..]),
        vec![
            Some(150.0),
            Some(0.0),
            Some(100.0),
            Some(0.0),
            Some(0.0),
            Some(0.0),
            Some(50.0),
            Some(150.0)
        ]
    );
}

#[test]
fn totals_row_sums_numeric_columns() {
    let rows = build_csv_rows(&usd_tables(), &ReportConfig::default());
    let totals = rows.last().unwrap();
    assert_eq!(
        numbers(totals),
        vec![
            None,
            None,
            Some(550.0),
            None,
            None,
            Some(250.0),
            Some(225.0),
            Some(-25.0),
            Some(75.0),
            Some(550.0),
            Some(150.0),
            Some(100.0),
            Some(250.0),
            Some(0.0),
            Some(575.0),
            Some(1625.0),
        ]
    );
}

#[test]
fn empty_table_still_has_headers_and_totals() {
    let groups = vec![CurrencyGroup {
        currency: CurrencyCode::new("NZD"),
        contacts: Vec::new(),
    }];
    let tables = build_currency_tables(&groups, ContactOrder::Name, SortDirection::Ascending);
    let rows = build_csv_rows(&tables, &ReportConfig::default());
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][2], CsvCell::Text("NZ$".into()));
    assert_eq!(rows[2].last(), Some(&CsvCell::Number(0.0)));
}

#[test]
fn csv_text_snapshot() {
    let rows = build_csv_rows(&usd_tables(), &ReportConfig::default());
    let csv = to_csv_string(&rows).expect("serialize csv");
    insta::assert_snapshot!(csv.trim_end(), @r###"
    Currency,USD,$
    Partner,Status,Commitment Amount,Commitment Currency,Commitment Frequency,Committed Monthly Equivalent,In Hand Monthly Equivalent,Missing In Hand Monthly Equivalent,In Hand Special Gifts,Sep 20,Oct 20,Nov 20,Dec 20,Jan 21,Feb 21,Total
    Monthly Partner,Partner - Financial,100,USD,Monthly,100,75,-25,0,100,100,100,100,0,100,500
    Quarterly Partner,Partner - Financial,450,USD,Quarterly,150,150,-0,0,450,0,0,150,0,450,1050
    Special Giver,Partner - Special,,,,,,,75,0,50,0,0,0,25,75
    Totals,,550,,,250,225,-25,75,550,150,100,250,0,575,1625
    "###);
}
