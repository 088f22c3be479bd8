use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    config::{AccountConfig, ReportConfig},
    currency::{CurrencyCode, CurrencyColor, CurrencyPalette},
    time::Clock,
};

use super::{
    goal::{goal_for_month, IndicatorRecord},
    period::{bucket_by_month, finite_or_zero, DonationHistoryRow, Period},
    span::same_month,
};

/// Donation-history query result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationHistory {
    #[serde(default)]
    pub periods: Vec<DonationHistoryRow>,
    /// Running average excluding the current month, when the API sends it.
    #[serde(default)]
    pub average_ignore_current: Option<f64>,
}

/// Everything the donation bar chart needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphData {
    pub periods: Vec<Period>,
    pub currencies: Vec<CurrencyColor>,
    pub average: f64,
    /// Account-level monthly goal drawn as a reference line.
    pub goal: Option<f64>,
    pub pledged: Option<f64>,
    pub domain_max: f64,
    pub empty: bool,
}

/// Buckets the donation history by month, resolves each month's goal and
/// derives the chart-wide scalars.
pub fn calculate_graph_data(
    history: &DonationHistory,
    indicators: &[IndicatorRecord],
    account: &AccountConfig,
    config: &ReportConfig,
    clock: &dyn Clock,
) -> GraphData {
    let today = clock.today();
    let mut periods = bucket_by_month(&history.periods);
    for period in periods.iter_mut() {
        period.goal = period
            .month()
            .and_then(|month| goal_for_month(month, indicators, account, today))
            .map(|goal| goal.value);
    }

    let average = history
        .average_ignore_current
        .filter(|value| value.is_finite())
        .unwrap_or_else(|| average_ignoring_current(&periods, today));
    let goal = account.monthly_goal.filter(|value| value.is_finite());
    let pledged = account.total_pledges;
    let currencies = assign_currency_colors(&history.periods, &config.palette);
    let domain_max = domain_max(&periods, goal, pledged, Some(average));
    let empty = is_empty(&periods);

    tracing::debug!(
        periods = periods.len(),
        currencies = currencies.len(),
        domain_max,
        empty,
        "calculated donation graph data"
    );

    GraphData {
        periods,
        currencies,
        average,
        goal,
        pledged,
        domain_max,
        empty,
    }
}

/// Distinct currencies in first-seen order, each with a palette color.
pub fn assign_currency_colors(
    rows: &[DonationHistoryRow],
    palette: &CurrencyPalette,
) -> Vec<CurrencyColor> {
    let mut seen: Vec<CurrencyCode> = Vec::new();
    for row in rows {
        for entry in &row.totals {
            if !seen.contains(&entry.currency) {
                seen.push(entry.currency.clone());
            }
        }
    }
    seen.into_iter()
        .enumerate()
        .map(|(index, code)| CurrencyColor {
            color: palette.color_for(index).to_string(),
            code,
        })
        .collect()
}

/// Largest value the chart axis has to show.
pub fn domain_max(
    periods: &[Period],
    goal: Option<f64>,
    pledged: Option<f64>,
    average: Option<f64>,
) -> f64 {
    let period_values = periods
        .iter()
        .flat_map(|period| std::iter::once(Some(period.total)).chain(std::iter::once(period.goal)));
    period_values
        .chain([goal, pledged, average])
        .flatten()
        .filter(|value| value.is_finite())
        .fold(0.0, f64::max)
}

/// A chart is empty when its period totals sum to exactly zero, which also
/// covers having no periods at all.
pub fn is_empty(periods: &[Period]) -> bool {
    periods.iter().map(|period| period.total).sum::<f64>() == 0.0
}

/// Mean monthly total, leaving out the in-progress current month.
pub fn average_ignoring_current(periods: &[Period], today: NaiveDate) -> f64 {
    let totals: Vec<f64> = periods
        .iter()
        .filter(|period| {
            period
                .month()
                .map(|month| !same_month(month, today))
                .unwrap_or(false)
        })
        .map(|period| finite_or_zero(period.total))
        .collect();
    if totals.is_empty() {
        return 0.0;
    }
    totals.iter().sum::<f64>() / totals.len() as f64
}
