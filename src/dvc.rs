use crate::calendar::DateRange;
use time::{Date, Month, Weekday};

/// Mocked nightly point rates; real charts vary by resort, room, and season.
const WEEKNIGHT_POINTS: u32 = 18;
const WEEKEND_NIGHT_POINTS: u32 = 22;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DvcContract {
    pub(crate) nickname: String,
    pub(crate) home_resort: String,
    pub(crate) use_year_month: Month,
    pub(crate) total_points: u32,
    pub(crate) annual_dues: Option<f64>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DvcUseYear {
    pub(crate) year: i32,
    pub(crate) contract_nickname: String,
    pub(crate) starting_points: u32,
    pub(crate) points_allocated: u32,
    pub(crate) points_remaining: u32,
    pub(crate) points_expiring: u32,
    pub(crate) banking_deadline: Date,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DvcScenario {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) total_points_used: u32,
    /// Points drawn from each target use year.
    pub(crate) target_years: Vec<(i32, u32)>,
}

pub(crate) fn total_points(contracts: &[DvcContract]) -> u32 {
    contracts.iter().map(|c| c.total_points).sum()
}

pub(crate) fn expiring_points(use_years: &[DvcUseYear]) -> u32 {
    use_years.iter().map(|y| y.points_expiring).sum()
}

/// A mocked point quote for a stay: one entry per night, Friday and Saturday
/// nights at the weekend rate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PointQuote {
    pub(crate) nightly: Vec<(Date, u32)>,
    pub(crate) total: u32,
}

pub(crate) fn quote_stay(range: DateRange) -> PointQuote {
    // The last day of the range is checkout, not a night.
    let nightly = range
        .days()
        .filter(|&d| d < range.end())
        .map(|d| (d, night_rate(d)))
        .collect::<Vec<_>>();
    let total = nightly.iter().map(|&(_, pts)| pts).sum();
    PointQuote { nightly, total }
}

fn night_rate(date: Date) -> u32 {
    match date.weekday() {
        Weekday::Friday | Weekday::Saturday => WEEKEND_NIGHT_POINTS,
        _ => WEEKNIGHT_POINTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn contract(points: u32) -> DvcContract {
        DvcContract {
            nickname: "Main Contract".to_owned(),
            home_resort: "Saratoga Springs".to_owned(),
            use_year_month: Month::April,
            total_points: points,
            annual_dues: Some(1100.0),
        }
    }

    #[test]
    fn test_total_points() {
        assert_eq!(total_points(&[contract(150), contract(75)]), 225);
        assert_eq!(total_points(&[]), 0);
    }

    #[test]
    fn test_expiring_points() {
        let year = DvcUseYear {
            year: 2025,
            contract_nickname: "Main Contract".to_owned(),
            starting_points: 150,
            points_allocated: 90,
            points_remaining: 60,
            points_expiring: 10,
            banking_deadline: date!(2025 - 07 - 31),
        };
        assert_eq!(expiring_points(&[year]), 10);
    }

    #[test]
    fn test_quote_charges_per_night() {
        // Saturday checkin, Wednesday checkout: four nights, of which only
        // Saturday the 10th is a weekend night.
        let range = DateRange::new(date!(2026 - 10 - 10), date!(2026 - 10 - 14)).unwrap();
        let quote = quote_stay(range);
        assert_eq!(quote.nightly.len(), 4);
        assert_eq!(quote.nightly[0], (date!(2026 - 10 - 10), 22));
        assert_eq!(quote.nightly[1], (date!(2026 - 10 - 11), 18));
        assert_eq!(quote.total, 22 + 18 * 3);
    }

    #[test]
    fn test_single_day_stay_has_no_nights() {
        let range = DateRange::new(date!(2026 - 10 - 10), date!(2026 - 10 - 10)).unwrap();
        let quote = quote_stay(range);
        assert!(quote.nightly.is_empty());
        assert_eq!(quote.total, 0);
    }
}
