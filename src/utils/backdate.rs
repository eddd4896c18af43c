use chrono::{Datelike, NaiveDate};

/// Walk backwards from `date` one calendar month at a time, producing the
/// anchor date plus the equivalent day in each of the 13 preceding months.
///
/// The day-of-month is clamped to the target month's length (the 31st
/// becomes the 28th/29th/30th in shorter months). Output is ordered anchor
/// first; the caller reverses it when ascending order is wanted. An
/// unparseable date yields an empty list.
pub fn backdate(date: &str) -> Vec<NaiveDate> {
    let parsed = match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => return Vec::new(),
    };

    let mut dates = Vec::with_capacity(14);

    for i in 0..14 {
        let mut target_year = parsed.year();
        let mut target_month = parsed.month() as i32 - i;

        // Year rollover
        while target_month <= 0 {
            target_month += 12;
            target_year -= 1;
        }

        let last_day = last_day_of_month(target_year, target_month as u32);
        let target_day = parsed.day().min(last_day);

        let target_date = NaiveDate::from_ymd_opt(target_year, target_month as u32, target_day)
            .expect("day clamped to month length");
        dates.push(target_date);
    }

    dates
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("first of month is always valid")
        .pred_opt()
        .expect("predecessor of first of month exists")
        .day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_fourteen_months_anchor_first() {
        let dates = backdate("2026-01-01");
        assert_eq!(dates.len(), 14);
        assert_eq!(dates[0], d("2026-01-01"));
        assert_eq!(dates[1], d("2025-12-01"));
        assert_eq!(dates[13], d("2024-12-01"));
    }

    #[test]
    fn test_day_clamping_short_months() {
        let dates = backdate("2025-12-31");
        assert_eq!(dates.len(), 14);
        assert_eq!(dates[0], d("2025-12-31"));
        // November has 30 days
        assert_eq!(dates[1], d("2025-11-30"));
        // February 2025 is not a leap year
        assert_eq!(dates[10], d("2025-02-28"));
    }

    #[test]
    fn test_day_clamping_leap_february() {
        let dates = backdate("2024-03-31");
        assert_eq!(dates[1], d("2024-02-29"));
    }

    #[test]
    fn test_year_rollover() {
        let dates = backdate("2025-03-15");
        assert_eq!(dates[3], d("2024-12-15"));
        assert_eq!(dates[13], d("2024-02-15"));
    }

    #[test]
    fn test_invalid_date_yields_empty() {
        assert!(backdate("not-a-date").is_empty());
        assert!(backdate("2025-13-01").is_empty());
        assert!(backdate("").is_empty());
    }
}
