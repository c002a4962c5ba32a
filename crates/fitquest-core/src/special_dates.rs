//! Calendar and clock coincidence detection.
//!
//! These are instantaneous point-in-time facts -- "trained at 3 AM",
//! "trained on New Year's Day" -- that cannot be expressed as monotone
//! counters over accumulated stats. They must be captured at the
//! moment of the triggering event; the general requirement evaluator
//! never satisfies them after the fact.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// A recognizable calendar/clock coincidence. Catalog entries bind
/// one moment each via `Requirement::SpecialDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialMoment {
    /// Exactly the 3 AM hour.
    NightOwl,
    /// January 1st.
    NewYearDay,
    /// The user's birthday (month and day match).
    Birthday,
    /// Monday during the 5 AM hour.
    EarlyMonday,
    /// Saturday or Sunday before 09:00.
    WeekendSunrise,
}

/// All moments matched by the given instant. Predicates are
/// independent and order-independent; several can match at once
/// (a Sunday 3 AM workout is both `NightOwl` and `WeekendSunrise`).
pub fn detect(at: DateTime<Utc>, birthday: Option<NaiveDate>) -> Vec<SpecialMoment> {
    let mut matched = Vec::new();

    if at.hour() == 3 {
        matched.push(SpecialMoment::NightOwl);
    }

    if at.month() == 1 && at.day() == 1 {
        matched.push(SpecialMoment::NewYearDay);
    }

    if let Some(birthday) = birthday {
        if at.month() == birthday.month() && at.day() == birthday.day() {
            matched.push(SpecialMoment::Birthday);
        }
    }

    if at.weekday() == Weekday::Mon && at.hour() == 5 {
        matched.push(SpecialMoment::EarlyMonday);
    }

    let weekend = matches!(at.weekday(), Weekday::Sat | Weekday::Sun);
    if weekend && at.hour() < 9 {
        matched.push(SpecialMoment::WeekendSunrise);
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_night_owl_at_three() {
        // 2025-01-08 is a Wednesday
        assert_eq!(
            detect(at("2025-01-08T03:30:00Z"), None),
            vec![SpecialMoment::NightOwl]
        );
        assert!(detect(at("2025-01-08T04:00:00Z"), None).is_empty());
    }

    #[test]
    fn test_new_year_day() {
        // 2025-01-01 is a Wednesday, 10 AM avoids other matches
        assert_eq!(
            detect(at("2025-01-01T10:00:00Z"), None),
            vec![SpecialMoment::NewYearDay]
        );
    }

    #[test]
    fn test_birthday_match_ignores_year() {
        let birthday: NaiveDate = "1990-06-15".parse().unwrap();
        // 2026-06-15 is a Monday
        assert_eq!(
            detect(at("2026-06-15T12:00:00Z"), Some(birthday)),
            vec![SpecialMoment::Birthday]
        );
        assert!(detect(at("2026-06-16T12:00:00Z"), Some(birthday)).is_empty());
    }

    #[test]
    fn test_early_monday() {
        // 2025-01-06 is a Monday
        assert_eq!(
            detect(at("2025-01-06T05:15:00Z"), None),
            vec![SpecialMoment::EarlyMonday]
        );
        assert!(detect(at("2025-01-07T05:15:00Z"), None).is_empty());
    }

    #[test]
    fn test_weekend_sunrise() {
        // 2025-01-11 is a Saturday
        assert_eq!(
            detect(at("2025-01-11T08:59:00Z"), None),
            vec![SpecialMoment::WeekendSunrise]
        );
        assert!(detect(at("2025-01-11T09:00:00Z"), None).is_empty());
    }

    #[test]
    fn test_multiple_moments_can_match() {
        // Sunday 3 AM: night owl and weekend sunrise together
        let matched = detect(at("2025-01-12T03:00:00Z"), None);
        assert!(matched.contains(&SpecialMoment::NightOwl));
        assert!(matched.contains(&SpecialMoment::WeekendSunrise));
        assert_eq!(matched.len(), 2);
    }
}
