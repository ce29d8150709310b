mod lookup;
mod matrix;
mod widget;
pub(crate) use self::lookup::{Dated, DayIndex};
pub(crate) use self::matrix::{iso_key, parse_iso, DateRange};
pub(crate) use self::widget::{CalendarAnchor, TripCalendar};
