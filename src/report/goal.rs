use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{config::AccountConfig, currency::CurrencyCode};

use super::{
    period::ReportDate,
    span::{month_end, same_month},
};

/// One health-indicator sample as returned by the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorRecord {
    pub indication_period_begin: String,
    #[serde(default)]
    pub overall_hi: Option<f64>,
    #[serde(default)]
    pub ownership_hi: Option<f64>,
    #[serde(default)]
    pub success_hi: Option<f64>,
    #[serde(default)]
    pub consistency_hi: Option<f64>,
    #[serde(default)]
    pub depth_hi: Option<f64>,
    #[serde(default)]
    pub staff_entered_goal: Option<f64>,
    #[serde(default)]
    pub machine_calculated_goal: Option<f64>,
    #[serde(default)]
    pub machine_calculated_goal_currency: Option<CurrencyCode>,
}

impl IndicatorRecord {
    pub fn new(indication_period_begin: impl Into<String>) -> Self {
        Self {
            indication_period_begin: indication_period_begin.into(),
            ..Self::default()
        }
    }

    pub fn begin(&self) -> ReportDate {
        ReportDate::parse(&self.indication_period_begin)
    }

    pub fn begin_date(&self) -> Option<NaiveDate> {
        self.begin().date()
    }
}

/// Where an effective goal came from, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalSource {
    Preference,
    StaffEntered,
    MachineCalculated,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGoal {
    pub value: f64,
    pub source: GoalSource,
}

/// Latest indicator whose begin date is on or before `period_end`.
///
/// A plain scan: indicator histories are a few hundred entries at most.
/// Indicators with unparsable dates are never matched.
pub fn find_indicator_for(
    indicators: &[IndicatorRecord],
    period_end: NaiveDate,
) -> Option<&IndicatorRecord> {
    let mut best: Option<(NaiveDate, &IndicatorRecord)> = None;
    for indicator in indicators {
        let Some(begin) = indicator.begin_date() else {
            continue;
        };
        if begin > period_end {
            continue;
        }
        match best {
            Some((best_begin, _)) if best_begin > begin => {}
            _ => best = Some((begin, indicator)),
        }
    }
    best.map(|(_, indicator)| indicator)
}

/// Effective goal for the month starting at `period_month`.
///
/// The preference goal wins for the current month; otherwise the matched
/// indicator's staff-entered goal, then its machine-calculated goal when
/// that goal is in the account currency.
pub fn resolve_goal(
    period_month: NaiveDate,
    indicator: Option<&IndicatorRecord>,
    account: &AccountConfig,
    today: NaiveDate,
) -> Option<ResolvedGoal> {
    if same_month(period_month, today) {
        if let Some(value) = account.monthly_goal {
            return Some(ResolvedGoal {
                value,
                source: GoalSource::Preference,
            });
        }
    }

    let indicator = indicator?;
    if let Some(value) = indicator.staff_entered_goal {
        return Some(ResolvedGoal {
            value,
            source: GoalSource::StaffEntered,
        });
    }

    match (
        indicator.machine_calculated_goal,
        indicator.machine_calculated_goal_currency.as_ref(),
    ) {
        (Some(value), Some(currency)) if *currency == account.currency => Some(ResolvedGoal {
            value,
            source: GoalSource::MachineCalculated,
        }),
        _ => None,
    }
}

/// Matches `period_month` to its indicator and resolves the goal.
pub fn goal_for_month(
    period_month: NaiveDate,
    indicators: &[IndicatorRecord],
    account: &AccountConfig,
    today: NaiveDate,
) -> Option<ResolvedGoal> {
    let indicator = find_indicator_for(indicators, month_end(period_month));
    resolve_goal(period_month, indicator, account, today)
}
