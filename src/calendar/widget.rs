use super::matrix::{CalendarMatrix, DayCell, WeekdayExt};
use crate::theme::{
    park_style, BASE_STYLE, IN_RANGE_STYLE, OUT_OF_MONTH_STYLE, SELECTED_STYLE, TITLE_STYLE,
    TODAY_STYLE, WEEKDAY_STYLE,
};
use crate::trip::{Trip, TripDay};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Span, Text},
    widgets::{Paragraph, Widget},
};
use time::Date;

static HEADER: &str = " Su     Mo     Tu     We     Th     Fr     Sa ";

/// Width of the grid in columns
const MAIN_WIDTH: u16 = 46;

/// Number of lines taken up by the title, the weekday header, and its rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the grid
const WEEK_LINES: u16 = 3;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 7;

const ACS_HLINE: char = '\u{2500}';

/// Whether the grid is anchored to the month under the cursor or to the
/// trip's own date range.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum CalendarAnchor {
    #[default]
    Month,
    TripSpan,
}

/// Renders a trip's calendar matrix as a seven-column grid.  The matrix is a
/// derived value rebuilt on every draw; nothing here writes back into the
/// trip.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TripCalendar<'a> {
    trip: &'a Trip,
    today: Date,
    cursor: Date,
    anchor: CalendarAnchor,
}

impl<'a> TripCalendar<'a> {
    pub(crate) fn new(
        trip: &'a Trip,
        today: Date,
        cursor: Date,
        anchor: CalendarAnchor,
    ) -> TripCalendar<'a> {
        TripCalendar {
            trip,
            today,
            cursor,
            anchor,
        }
    }

    fn cell_style(&self, cell: &DayCell<TripDay>) -> Style {
        if cell.date == self.cursor {
            SELECTED_STYLE
        } else if cell.date == self.today {
            TODAY_STYLE
        } else if cell.payload.is_some() {
            IN_RANGE_STYLE
        } else if cell.in_month {
            BASE_STYLE
        } else {
            OUT_OF_MONTH_STYLE
        }
    }

    fn day_span(&self, cell: &DayCell<TripDay>) -> Span<'static> {
        let s = if cell.date == self.cursor {
            format!("[{:2}]", cell.date.day())
        } else {
            format!(" {:2} ", cell.date.day())
        };
        Span::styled(s, self.cell_style(cell))
    }

    fn park_span(cell: &DayCell<TripDay>) -> Option<Span<'static>> {
        let day = cell.payload.as_ref()?;
        let count = day.activity_count();
        let s = if count > 0 {
            format!(" {} \u{b7}{count}", day.park.code())
        } else {
            format!(" {} ", day.park.code())
        };
        Some(Span::styled(s, park_style(day.park)))
    }
}

impl Widget for TripCalendar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let range = match self.anchor {
            CalendarAnchor::Month => None,
            CalendarAnchor::TripSpan => Some(self.trip.range),
        };
        let index = self.trip.day_index();
        let Ok(matrix) = CalendarMatrix::build(self.cursor, range, &index) else {
            return;
        };
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(left),
                Constraint::Length(MAIN_WIDTH.min(area.width)),
                Constraint::Min(0),
            ])
            .split(area);
        let mut canvas = GridCanvas::new(chunks[1], buf);
        let title = format!("{} {}", self.cursor.month(), self.cursor.year());
        let centered = (MAIN_WIDTH.saturating_sub(
            u16::try_from(title.len()).unwrap_or(MAIN_WIDTH),
        )) / 2;
        canvas.mvprint(0, centered, &title, Some(TITLE_STYLE));
        canvas.mvprint(1, 0, HEADER, Some(WEEKDAY_STYLE));
        canvas.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
        for (i, week) in std::iter::zip(0u16.., matrix.weeks()) {
            let y = i * WEEK_LINES + HEADER_LINES;
            for cell in week.cells() {
                let x = DAY_WIDTH * cell.date.weekday().index0();
                let day = self.day_span(cell);
                canvas.mvprint(y, x, day.content, Some(day.style));
                if let Some(park) = Self::park_span(cell) {
                    canvas.mvprint(y + 1, x, park.content, Some(park.style));
                }
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct GridCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> GridCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> GridCanvas<'a> {
        GridCanvas { area, buf }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // A Paragraph truncates text that would overrun the grid's area,
            // as long as the Rect handed to it stays inside the frame.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SampleStore;
    use time::macros::date;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area().width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn all_text(buf: &Buffer) -> String {
        (0..buf.area().height)
            .map(|y| row_text(buf, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_month_anchored_render() {
        let store = SampleStore::load();
        let trip = store.trip(0).unwrap();
        let widget = TripCalendar::new(
            trip,
            date!(2026 - 10 - 12),
            date!(2026 - 10 - 10),
            CalendarAnchor::Month,
        );
        let area = Rect::new(0, 0, 60, 20);
        let mut buffer = Buffer::empty(area);
        widget.render(area, &mut buffer);
        let text = all_text(&buffer);
        assert!(text.contains("October 2026"));
        assert!(text.contains("Su"));
        assert!(text.contains("[10]"));
        assert!(text.contains("MK"));
    }

    #[test]
    fn test_trip_span_anchored_render() {
        let store = SampleStore::load();
        let trip = store.trip(0).unwrap();
        let widget = TripCalendar::new(
            trip,
            date!(2026 - 10 - 12),
            date!(2026 - 10 - 11),
            CalendarAnchor::TripSpan,
        );
        let area = Rect::new(0, 0, 60, 12);
        let mut buffer = Buffer::empty(area);
        widget.render(area, &mut buffer);
        let text = all_text(&buffer);
        // The span Oct 10-14 expands to two weeks: Oct 4 through Oct 17.
        assert!(text.contains("[11]"));
        assert!(text.contains("17"));
        assert!(!text.contains("18"));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let store = SampleStore::load();
        let trip = store.trip(0).unwrap();
        let widget = TripCalendar::new(
            trip,
            date!(2026 - 10 - 12),
            date!(2026 - 10 - 10),
            CalendarAnchor::Month,
        );
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        widget.render(area, &mut buffer);
    }
}
