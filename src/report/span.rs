use chrono::{Datelike, Duration, NaiveDate};

/// Whole calendar days from `from` to `to`. Dates carry no time zone, so
/// daylight-saving changes cannot shift the count.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Number of days each record is extrapolated to cover.
///
/// Every record spans the gap to the next record's begin date; the last
/// record always spans one day. Out-of-order neighbours clamp to zero so
/// spans stay non-negative.
pub fn calculate_period_spans(begin_dates: &[NaiveDate]) -> Vec<i64> {
    let mut spans = Vec::with_capacity(begin_dates.len());
    for (index, begin) in begin_dates.iter().enumerate() {
        let span = match begin_dates.get(index + 1) {
            Some(next) => {
                let days = days_between(*begin, *next);
                if days < 0 {
                    tracing::warn!(%begin, %next, "indicator periods out of order; span clamped to 0");
                }
                days.max(0)
            }
            None => 1,
        };
        spans.push(span);
    }
    spans
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(shift_month(date, 1)) - Duration::days(1)
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

pub fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}
