use super::matrix::iso_key;
use std::collections::HashMap;
use time::Date;

/// A domain record that lives on a single calendar date.
pub(crate) trait Dated {
    fn date(&self) -> Date;
}

/// An `iso_key -> record` map built once per render and used only to
/// annotate matrix cells.  Duplicate dates are last-write-wins; source data
/// is assumed de-duplicated upstream, so this is a tolerance rather than an
/// invariant.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DayIndex<T> {
    by_key: HashMap<String, T>,
}

impl<T> DayIndex<T> {
    pub(crate) fn empty() -> DayIndex<T> {
        DayIndex {
            by_key: HashMap::new(),
        }
    }

    pub(crate) fn from_records<I>(records: I) -> DayIndex<T>
    where
        I: IntoIterator<Item = T>,
        T: Dated,
    {
        DayIndex {
            by_key: records
                .into_iter()
                .map(|r| (iso_key(r.date()), r))
                .collect(),
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&T> {
        self.by_key.get(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.by_key.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[derive(Clone, Debug, Eq, PartialEq)]
    struct Rec {
        date: Date,
        label: &'static str,
    }

    impl Dated for Rec {
        fn date(&self) -> Date {
            self.date
        }
    }

    #[test]
    fn test_lookup_by_key() {
        let index = DayIndex::from_records([
            Rec {
                date: date!(2026 - 10 - 10),
                label: "arrival",
            },
            Rec {
                date: date!(2026 - 10 - 11),
                label: "epcot",
            },
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("2026-10-11").map(|r| r.label), Some("epcot"));
        assert_eq!(index.get("2026-10-12"), None);
        assert!(DayIndex::<Rec>::empty().is_empty());
    }

    #[test]
    fn test_duplicate_dates_last_write_wins() {
        let index = DayIndex::from_records([
            Rec {
                date: date!(2026 - 10 - 10),
                label: "first",
            },
            Rec {
                date: date!(2026 - 10 - 10),
                label: "second",
            },
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("2026-10-10").map(|r| r.label), Some("second"));
    }
}
