use crate::theme::{park_style, BASE_STYLE, MUST_DO_STYLE, NOTE_STYLE, TITLE_STYLE};
use crate::trip::{display_date, Activity, ActivityKind, Trip, TripDay};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Widget},
};

/// Full-day schedule for one park day: every blueprint block in order, with
/// its planned activities.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DayView<'a> {
    trip: &'a Trip,
    day: &'a TripDay,
}

impl<'a> DayView<'a> {
    pub(crate) fn new(trip: &'a Trip, day: &'a TripDay) -> DayView<'a> {
        DayView { trip, day }
    }

    fn header_lines(&self) -> Vec<Line<'static>> {
        let position = self
            .trip
            .day_position(self.day.date)
            .map_or_else(String::new, |i| {
                format!(" (day {} of {})", i + 1, self.trip.days.len())
            });
        let mut lines = vec![
            Line::styled(
                format!("{}{position}", display_date(self.day.date)),
                TITLE_STYLE,
            ),
            Line::from(vec![
                Span::styled(self.day.park.name().to_owned(), park_style(self.day.park)),
                Span::styled(
                    format!("  {}", self.day.park.hours()),
                    NOTE_STYLE,
                ),
            ]),
        ];
        if let Some(notes) = &self.day.notes {
            lines.push(Line::styled(notes.clone(), NOTE_STYLE));
        }
        lines.push(Line::raw(""));
        lines
    }

    fn activity_line(kind_width: usize, activity: &Activity) -> Line<'static> {
        let mut spans = vec![
            Span::styled(format!("  {}  ", activity.start_display()), BASE_STYLE),
            Span::styled(
                format!("{:kind_width$}  ", activity.kind.tag()),
                NOTE_STYLE,
            ),
            Span::styled(activity.name.clone(), BASE_STYLE),
        ];
        if activity.kind == ActivityKind::Dining && activity.credits > 0 {
            let plural = if activity.credits == 1 { "" } else { "s" };
            spans.push(Span::styled(
                format!("  ({} credit{plural})", activity.credits),
                NOTE_STYLE,
            ));
        }
        if activity.genie_plus {
            spans.push(Span::styled("  [G+]".to_owned(), NOTE_STYLE));
        }
        if activity.must_do {
            spans.push(Span::styled("  must-do".to_owned(), MUST_DO_STYLE));
        }
        Line::from(spans)
    }
}

impl Widget for DayView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = self.header_lines();
        for block in self.day.schedule() {
            lines.push(Line::styled(block.label.display().to_owned(), TITLE_STYLE));
            if block.activities.is_empty() {
                lines.push(Line::styled("  nothing planned".to_owned(), NOTE_STYLE));
            } else {
                for activity in &block.activities {
                    lines.push(Self::activity_line(6, activity));
                }
            }
        }
        let para = Paragraph::new(Text::from(lines))
            .block(
                Block::bordered()
                    .title(" Day Planner ")
                    .title_alignment(Alignment::Center),
            )
            .style(BASE_STYLE);
        para.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SampleStore;
    use time::macros::date;

    fn all_text(buf: &Buffer) -> String {
        (0..buf.area().height)
            .map(|y| {
                (0..buf.area().width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_day_view_lists_blocks() {
        let store = SampleStore::load();
        let trip = store.trip(0).unwrap();
        let day = trip.day_on(date!(2026 - 10 - 10)).unwrap();
        let area = Rect::new(0, 0, 70, 24);
        let mut buffer = Buffer::empty(area);
        DayView::new(trip, day).render(area, &mut buffer);
        let text = all_text(&buffer);
        assert!(text.contains("October 10, 2026 (day 1 of 5)"));
        assert!(text.contains("Magic Kingdom"));
        assert!(text.contains("Breakfast"));
        assert!(text.contains("Space Mountain"));
        assert!(text.contains("must-do"));
        assert!(text.contains("(2 credits)"));
    }
}
