use super::lookup::DayIndex;
use std::iter::successors;
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date, Duration, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

static ISO_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

/// Canonical `YYYY-MM-DD` key for a date, used to join calendar cells to
/// domain records.  `Date` carries no time-of-day or UTC offset, so the key
/// can never shift across a midnight boundary.
pub(crate) fn iso_key(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parses a `YYYY-MM-DD` string into a `Date`.
pub(crate) fn parse_iso(s: &str) -> Result<Date, MatrixError> {
    Date::parse(s, &ISO_FMT).map_err(|_| MatrixError::InvalidDate(s.to_owned()))
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum MatrixError {
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: Date, end: Date },
    #[error("not a resolvable calendar date: {0}")]
    InvalidDate(String),
}

/// An inclusive span of calendar dates with `start <= end`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    pub(crate) fn new(start: Date, end: Date) -> Result<DateRange, MatrixError> {
        if start > end {
            Err(MatrixError::InvalidRange { start, end })
        } else {
            Ok(DateRange { start, end })
        }
    }

    pub(crate) fn start(&self) -> Date {
        self.start
    }

    pub(crate) fn end(&self) -> Date {
        self.end
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    pub(crate) fn day_count(&self) -> i64 {
        (self.end - self.start).whole_days() + 1
    }

    /// Iterates over every date in the range, earliest first.
    pub(crate) fn days(&self) -> impl Iterator<Item = Date> {
        let end = self.end;
        successors(Some(self.start), |&d| d.next_day()).take_while(move |&d| d <= end)
    }

    /// The first and last days of `seed`'s month.
    pub(crate) fn month_of(seed: Date) -> Result<DateRange, MatrixError> {
        let year = seed.year();
        let month = seed.month();
        let first = Date::from_calendar_date(year, month, 1)
            .map_err(|_| MatrixError::InvalidDate(iso_key(seed)))?;
        let last = Date::from_calendar_date(year, month, month.length(year))
            .map_err(|_| MatrixError::InvalidDate(iso_key(seed)))?;
        DateRange::new(first, last)
    }
}

/// One day of a [`CalendarMatrix`], annotated with the domain record (if any)
/// whose date matches the cell's.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DayCell<T> {
    pub(crate) date: Date,
    pub(crate) iso_key: String,
    pub(crate) in_range: bool,
    pub(crate) in_month: bool,
    pub(crate) payload: Option<T>,
}

/// Exactly seven cells, Sunday first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarWeek<T>([DayCell<T>; DAYS_IN_WEEK]);

impl<T> CalendarWeek<T> {
    pub(crate) fn get(&self, wd: Weekday) -> &DayCell<T> {
        &self.0[usize::from(wd.index0())]
    }

    pub(crate) fn cells(&self) -> impl Iterator<Item = &DayCell<T>> {
        self.0.iter()
    }
}

/// A rectangular grid of calendar cells covering the minimum number of full
/// Sunday-to-Saturday weeks that contains the anchor span.  A derived,
/// disposable value: it is rebuilt from scratch whenever its inputs change
/// and never written back into.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarMatrix<T> {
    weeks: Vec<CalendarWeek<T>>,
}

impl<T: Clone> CalendarMatrix<T> {
    /// Builds the matrix for `seed`'s month, or for `range` when one is
    /// given.  The span is widened to the nearest Sunday on or before its
    /// start and the nearest Saturday on or after its end; `in_range` is
    /// judged against the unwidened span, `in_month` against `seed`'s month.
    pub(crate) fn build(
        seed: Date,
        range: Option<DateRange>,
        index: &DayIndex<T>,
    ) -> Result<CalendarMatrix<T>, MatrixError> {
        let anchor = match range {
            Some(r) => r,
            None => DateRange::month_of(seed)?,
        };
        let first = back_to_sunday(anchor.start())?;
        let last = forward_to_saturday(anchor.end())?;
        let mut cells = Vec::new();
        for date in DateRange::new(first, last)?.days() {
            let key = iso_key(date);
            let payload = index.get(&key).cloned();
            cells.push(DayCell {
                date,
                iso_key: key,
                in_range: anchor.contains(date),
                in_month: date.month() == seed.month() && date.year() == seed.year(),
                payload,
            });
        }
        let mut weeks = Vec::with_capacity(cells.len() / DAYS_IN_WEEK);
        let mut cells = cells.into_iter();
        loop {
            let chunk = cells.by_ref().take(DAYS_IN_WEEK).collect::<Vec<_>>();
            if chunk.is_empty() {
                break;
            }
            let Ok(week) = <[DayCell<T>; DAYS_IN_WEEK]>::try_from(chunk) else {
                unreachable!("a Sunday-to-Saturday span chunks into whole weeks");
            };
            weeks.push(CalendarWeek(week));
        }
        Ok(CalendarMatrix { weeks })
    }

    pub(crate) fn week_count(&self) -> usize {
        self.weeks.len()
    }

    pub(crate) fn weeks(&self) -> impl Iterator<Item = &CalendarWeek<T>> {
        self.weeks.iter()
    }

    /// All cells in walk order, earliest first.
    pub(crate) fn cells(&self) -> impl Iterator<Item = &DayCell<T>> {
        self.weeks.iter().flat_map(CalendarWeek::cells)
    }

    pub(crate) fn first_date(&self) -> Option<Date> {
        self.cells().map(|c| c.date).next()
    }

    pub(crate) fn last_date(&self) -> Option<Date> {
        self.cells().map(|c| c.date).last()
    }
}

fn back_to_sunday(date: Date) -> Result<Date, MatrixError> {
    let offset = i64::from(date.weekday().index0());
    date.checked_sub(Duration::days(offset))
        .ok_or_else(|| MatrixError::InvalidDate(iso_key(date)))
}

fn forward_to_saturday(date: Date) -> Result<Date, MatrixError> {
    let offset = i64::from(Weekday::Saturday.index0() - date.weekday().index0());
    date.checked_add(Duration::days(offset))
        .ok_or_else(|| MatrixError::InvalidDate(iso_key(date)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn no_payload() -> DayIndex<()> {
        DayIndex::empty()
    }

    #[test]
    fn test_iso_key() {
        assert_eq!(iso_key(date!(2026 - 10 - 01)), "2026-10-01");
        assert_eq!(iso_key(date!(0097 - 01 - 09)), "0097-01-09");
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(parse_iso("2026-10-14"), Ok(date!(2026 - 10 - 14)));
        assert_eq!(
            parse_iso("2026-13-01"),
            Err(MatrixError::InvalidDate("2026-13-01".into()))
        );
        assert_eq!(
            parse_iso("next tuesday"),
            Err(MatrixError::InvalidDate("next tuesday".into()))
        );
    }

    #[test]
    fn test_rejects_backwards_range() {
        let r = DateRange::new(date!(2026 - 10 - 14), date!(2026 - 10 - 10));
        assert_eq!(
            r,
            Err(MatrixError::InvalidRange {
                start: date!(2026 - 10 - 14),
                end: date!(2026 - 10 - 10),
            })
        );
    }

    #[test]
    fn test_single_day_range() {
        let r = DateRange::new(date!(2026 - 10 - 10), date!(2026 - 10 - 10)).unwrap();
        assert_eq!(r.day_count(), 1);
        assert_eq!(r.days().collect::<Vec<_>>(), vec![date!(2026 - 10 - 10)]);
    }

    #[test]
    fn test_month_of_seed() {
        // October 2026 starts on a Thursday and ends on a Saturday, so the
        // grid runs from Sunday, September 27 through Saturday, October 31
        // with no trailing week.
        let matrix =
            CalendarMatrix::build(date!(2026 - 10 - 15), None, &no_payload()).unwrap();
        assert_eq!(matrix.first_date(), Some(date!(2026 - 09 - 27)));
        assert_eq!(matrix.last_date(), Some(date!(2026 - 10 - 31)));
        assert_eq!(matrix.week_count(), 5);
        let in_month = matrix.cells().filter(|c| c.in_month).count();
        assert_eq!(in_month, 31);
        assert!(matrix
            .cells()
            .all(|c| c.in_range == (c.date.month() == time::Month::October)));
    }

    #[test]
    fn test_weeks_are_sunday_to_saturday() {
        let matrix =
            CalendarMatrix::build(date!(2026 - 10 - 15), None, &no_payload()).unwrap();
        for week in matrix.weeks() {
            let days = week.cells().collect::<Vec<_>>();
            assert_eq!(days.len(), DAYS_IN_WEEK);
            assert_eq!(days[0].date.weekday(), Weekday::Sunday);
            assert_eq!(days[6].date.weekday(), Weekday::Saturday);
        }
    }

    #[test]
    fn test_keys_increase_by_one_day() {
        let matrix =
            CalendarMatrix::build(date!(2026 - 10 - 15), None, &no_payload()).unwrap();
        let dates = matrix.cells().map(|c| c.date).collect::<Vec<_>>();
        for pair in dates.windows(2) {
            assert_eq!(pair[0].next_day(), Some(pair[1]));
        }
        let keys = matrix.cells().map(|c| c.iso_key.clone()).collect::<Vec<_>>();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_explicit_range() {
        // Saturday through Wednesday straddles a week boundary.
        let range = DateRange::new(date!(2026 - 10 - 10), date!(2026 - 10 - 14)).unwrap();
        let matrix =
            CalendarMatrix::build(date!(2026 - 10 - 10), Some(range), &no_payload()).unwrap();
        assert_eq!(matrix.week_count(), 2);
        assert_eq!(matrix.first_date(), Some(date!(2026 - 10 - 04)));
        assert_eq!(matrix.last_date(), Some(date!(2026 - 10 - 17)));
        let highlighted = matrix
            .cells()
            .filter(|c| c.in_range)
            .map(|c| c.iso_key.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            highlighted,
            vec![
                "2026-10-10",
                "2026-10-11",
                "2026-10-12",
                "2026-10-13",
                "2026-10-14",
            ]
        );
    }

    #[test]
    fn test_subweek_range_fills_whole_week() {
        let range = DateRange::new(date!(2026 - 10 - 12), date!(2026 - 10 - 14)).unwrap();
        let matrix =
            CalendarMatrix::build(date!(2026 - 10 - 12), Some(range), &no_payload()).unwrap();
        assert_eq!(matrix.week_count(), 1);
        assert_eq!(matrix.first_date(), Some(date!(2026 - 10 - 11)));
        assert_eq!(matrix.last_date(), Some(date!(2026 - 10 - 17)));
        assert_eq!(matrix.cells().filter(|c| c.in_range).count(), 3);
    }

    #[test]
    fn test_range_spanning_months() {
        let range = DateRange::new(date!(2026 - 09 - 28), date!(2026 - 10 - 02)).unwrap();
        let matrix =
            CalendarMatrix::build(date!(2026 - 10 - 02), Some(range), &no_payload()).unwrap();
        assert_eq!(matrix.week_count(), 1);
        // in_month follows the seed's month, not the range.
        let in_month = matrix
            .cells()
            .filter(|c| c.in_month)
            .map(|c| c.date.day())
            .collect::<Vec<_>>();
        assert_eq!(in_month, vec![1, 2, 3]);
    }

    #[test]
    fn test_week_count_matches_span() {
        for seed in [
            date!(2026 - 02 - 01),
            date!(2026 - 10 - 15),
            date!(2027 - 01 - 31),
        ] {
            let matrix = CalendarMatrix::build(seed, None, &no_payload()).unwrap();
            let span = DateRange::new(
                matrix.first_date().unwrap(),
                matrix.last_date().unwrap(),
            )
            .unwrap();
            assert_eq!(span.day_count() % 7, 0);
            assert_eq!(
                matrix.week_count(),
                usize::try_from(span.day_count() / 7).unwrap()
            );
        }
    }

    #[test]
    fn test_rebuild_is_deep_equal() {
        let range = DateRange::new(date!(2026 - 10 - 10), date!(2026 - 10 - 14)).unwrap();
        let a = CalendarMatrix::build(date!(2026 - 10 - 10), Some(range), &no_payload()).unwrap();
        let b = CalendarMatrix::build(date!(2026 - 10 - 10), Some(range), &no_payload()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_week_get_by_weekday() {
        let matrix =
            CalendarMatrix::build(date!(2026 - 10 - 15), None, &no_payload()).unwrap();
        let first = matrix.weeks().next().unwrap();
        assert_eq!(first.get(Weekday::Sunday).date, date!(2026 - 09 - 27));
        assert_eq!(first.get(Weekday::Thursday).date, date!(2026 - 10 - 01));
        assert_eq!(first.get(Weekday::Saturday).date, date!(2026 - 10 - 03));
    }
}
