//! Pure aggregation over already-fetched report data: monthly buckets,
//! span-weighted averages, goal resolution, currency totals and CSV rows.
//!
//! Nothing here performs I/O or keeps state between calls; callers own
//! memoization and discard stale results themselves.

pub mod average;
pub mod contacts;
pub mod csv_export;
pub mod goal;
pub mod graph;
pub mod health;
pub mod period;
pub mod span;

pub use average::{round_half_up, round_optional, weighted_average};
pub use contacts::{
    build_currency_tables, calculate_totals, sort_contacts, ContactOrder, ContactReportRow,
    ContactStatus, CurrencyGroup, CurrencyTable, MonthTotal, PledgeFrequency, SortDirection,
};
pub use csv_export::{
    build_csv_rows, contact_equivalents, to_csv_string, ContactEquivalents, CsvCell, CsvRow,
};
pub use goal::{
    find_indicator_for, goal_for_month, resolve_goal, GoalSource, IndicatorRecord, ResolvedGoal,
};
pub use graph::{
    assign_currency_colors, average_ignoring_current, calculate_graph_data, domain_max, is_empty,
    DonationHistory, GraphData,
};
pub use health::{health_indicator_periods, HealthPeriod};
pub use period::{bucket_by_month, CurrencyTotal, DonationHistoryRow, Period, ReportDate};
pub use span::calculate_period_spans;
