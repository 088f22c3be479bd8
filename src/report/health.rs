use chrono::NaiveDate;
use serde::Serialize;

use super::{
    average::{round_optional, weighted_average},
    goal::IndicatorRecord,
    period::ReportDate,
    span::{calculate_period_spans, month_start},
};

/// Monthly health-indicator point for the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthPeriod {
    pub month: NaiveDate,
    pub overall: Option<f64>,
    pub ownership: Option<f64>,
    pub success: Option<f64>,
    pub consistency: Option<f64>,
    pub depth: Option<f64>,
}

impl HealthPeriod {
    pub fn label(&self) -> String {
        ReportDate::Valid(self.month).month_label()
    }
}

/// Collapses indicator samples into one rounded, span-weighted point per
/// calendar month.
///
/// Spans come from the whole sorted history, so a sample near the end of
/// a month still carries the days it covers into the next one.
pub fn health_indicator_periods(records: &[IndicatorRecord]) -> Vec<HealthPeriod> {
    let mut dated: Vec<(NaiveDate, &IndicatorRecord)> = Vec::with_capacity(records.len());
    for record in records {
        match record.begin_date() {
            Some(begin) => dated.push((begin, record)),
            None => tracing::warn!(
                begin = %record.indication_period_begin,
                "dropping health indicator with invalid begin date"
            ),
        }
    }
    dated.sort_by_key(|(begin, _)| *begin);

    let begins: Vec<NaiveDate> = dated.iter().map(|(begin, _)| *begin).collect();
    let spans: Vec<f64> = calculate_period_spans(&begins)
        .into_iter()
        .map(|span| span as f64)
        .collect();

    let mut periods = Vec::new();
    let mut start = 0;
    while start < dated.len() {
        let month = month_start(dated[start].0);
        let mut end = start + 1;
        while end < dated.len() && month_start(dated[end].0) == month {
            end += 1;
        }

        let group: Vec<&IndicatorRecord> = dated[start..end].iter().map(|(_, r)| *r).collect();
        let weights = &spans[start..end];
        let field = |pick: fn(&IndicatorRecord) -> Option<f64>| {
            round_optional(weighted_average(&group, |record| pick(record), weights))
        };

        periods.push(HealthPeriod {
            month,
            overall: field(|r: &IndicatorRecord| r.overall_hi),
            ownership: field(|r: &IndicatorRecord| r.ownership_hi),
            success: field(|r: &IndicatorRecord| r.success_hi),
            consistency: field(|r: &IndicatorRecord| r.consistency_hi),
            depth: field(|r: &IndicatorRecord| r.depth_hi),
        });
        start = end;
    }

    tracing::debug!(samples = begins.len(), months = periods.len(), "computed health indicator periods");
    periods
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(begin: &str, overall: Option<f64>, depth: Option<f64>) -> IndicatorRecord {
        IndicatorRecord {
            overall_hi: overall,
            depth_hi: depth,
            ..IndicatorRecord::new(begin)
        }
    }

    #[test]
    fn averages_each_month_by_span() {
        let records = vec![
            sample("2021-01-01", Some(50.0), None),
            sample("2021-01-10", Some(80.0), Some(40.0)),
            sample("2021-02-01", Some(70.0), None),
        ];
        let periods = health_indicator_periods(&records);
        assert_eq!(periods.len(), 2);

        // January: 50 for 9 days, 80 for 22 days.
        let expected = ((50.0 * 9.0 + 80.0 * 22.0) / 31.0_f64).round();
        assert_eq!(periods[0].overall, Some(expected));
        assert_eq!(periods[0].depth, Some(40.0));
        assert_eq!(periods[0].ownership, None);
        assert_eq!(periods[0].label(), "Jan 21");

        assert_eq!(periods[1].overall, Some(70.0));
        assert_eq!(periods[1].depth, None);
    }

    #[test]
    fn unsorted_and_invalid_samples_are_handled() {
        let records = vec![
            sample("2021-03-05", Some(10.0), None),
            sample("bad", Some(99.0), None),
            sample("2021-03-01", Some(30.0), None),
        ];
        let periods = health_indicator_periods(&records);
        assert_eq!(periods.len(), 1);
        // 30 for 4 days, 10 for 1 day.
        assert_eq!(periods[0].overall, Some(26.0));
    }

    #[test]
    fn empty_history_yields_no_periods() {
        assert!(health_indicator_periods(&[]).is_empty());
    }
}
