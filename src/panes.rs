use crate::calendar::iso_key;
use crate::dvc::{expiring_points, quote_stay, total_points, DvcContract, DvcScenario, DvcUseYear};
use crate::theme::{BASE_STYLE, NOTE_STYLE, TITLE_STYLE};
use crate::trip::{display_range, BudgetItem, BudgetReport, Trip};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Widget},
};

fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

fn titled_paragraph(title: &'static str, lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(Text::from(lines))
        .block(
            Block::bordered()
                .title(title)
                .title_alignment(Alignment::Center),
        )
        .style(BASE_STYLE)
}

fn labelled(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<22}"), NOTE_STYLE),
        Span::styled(value, BASE_STYLE),
    ])
}

/// Budget totals, dining-credit balance, and trip prep for one trip.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BudgetView<'a> {
    trip: &'a Trip,
    items: &'a [BudgetItem],
}

impl<'a> BudgetView<'a> {
    pub(crate) fn new(trip: &'a Trip, items: &'a [BudgetItem]) -> BudgetView<'a> {
        BudgetView { trip, items }
    }
}

impl Widget for BudgetView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let report = BudgetReport::new(self.trip.budget_target, self.items);
        let mut lines = vec![
            Line::styled(
                format!("{} \u{b7} {}", self.trip.name, display_range(self.trip.range)),
                TITLE_STYLE,
            ),
            Line::raw(""),
            labelled(
                "Budget target",
                self.trip
                    .budget_target
                    .map_or_else(|| "\u{2014}".to_owned(), money),
            ),
            labelled("Spent so far", money(report.spent)),
            labelled(
                "Remaining",
                report.remaining.map_or_else(|| "\u{2014}".to_owned(), money),
            ),
            Line::raw(""),
        ];
        if report.by_category.is_empty() {
            lines.push(Line::styled("No expenses logged yet.".to_owned(), NOTE_STYLE));
        } else {
            lines.push(Line::styled("By category".to_owned(), TITLE_STYLE));
            for (category, subtotal) in &report.by_category {
                lines.push(labelled(category.label(), money(*subtotal)));
            }
        }
        lines.push(Line::raw(""));
        for item in self.items {
            let when = item
                .date
                .map_or_else(|| "trip total".to_owned(), iso_key);
            lines.push(Line::from(vec![
                Span::styled(format!("  {when}  "), NOTE_STYLE),
                Span::styled(item.description.clone(), BASE_STYLE),
                Span::styled(format!("  {}", money(item.amount)), NOTE_STYLE),
            ]));
        }
        lines.push(Line::raw(""));
        match self.trip.dining_credit_status() {
            Some((used, total)) => lines.push(labelled(
                "Dining plan",
                format!("{used} of {total} credits used"),
            )),
            None => lines.push(labelled("Dining plan", "none".to_owned())),
        }
        let (done, total) = self.trip.checklist.completed();
        lines.push(labelled("Trip prep", format!("{done} of {total} complete")));
        for (label, checked) in self.trip.checklist.items() {
            let mark = if checked { 'x' } else { ' ' };
            lines.push(Line::styled(format!("  [{mark}] {label}"), NOTE_STYLE));
        }
        if let Some(flight) = &self.trip.logistics.outbound {
            lines.push(labelled(
                "Outbound",
                format!(
                    "{} {} \u{b7} {} {} \u{2192} {} {}",
                    flight.airline, flight.number, flight.from, flight.departs, flight.to,
                    flight.arrives
                ),
            ));
        }
        if let Some(flight) = &self.trip.logistics.inbound {
            lines.push(labelled(
                "Return",
                format!(
                    "{} {} \u{b7} {} {} \u{2192} {} {}",
                    flight.airline, flight.number, flight.from, flight.departs, flight.to,
                    flight.arrives
                ),
            ));
        }
        titled_paragraph(" Budget & Prep ", lines).render(area, buf);
    }
}

/// DVC contracts, use years, scenarios, and a mocked point quote for the
/// trip's stay.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DvcView<'a> {
    trip: &'a Trip,
    contracts: &'a [DvcContract],
    use_years: &'a [DvcUseYear],
    scenarios: &'a [DvcScenario],
}

impl<'a> DvcView<'a> {
    pub(crate) fn new(
        trip: &'a Trip,
        contracts: &'a [DvcContract],
        use_years: &'a [DvcUseYear],
        scenarios: &'a [DvcScenario],
    ) -> DvcView<'a> {
        DvcView {
            trip,
            contracts,
            use_years,
            scenarios,
        }
    }
}

impl Widget for DvcView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![
            Line::styled("DVC Membership".to_owned(), TITLE_STYLE),
            labelled(
                "Total points",
                format!("{}", total_points(self.contracts)),
            ),
            labelled(
                "Expiring points",
                format!("{}", expiring_points(self.use_years)),
            ),
            Line::raw(""),
        ];
        for contract in self.contracts {
            lines.push(labelled(
                "Contract",
                format!(
                    "{} \u{b7} {} \u{b7} {} use year \u{b7} {} pts",
                    contract.nickname,
                    contract.home_resort,
                    contract.use_year_month,
                    contract.total_points
                ),
            ));
            if let Some(dues) = contract.annual_dues {
                lines.push(labelled("Annual dues", money(dues)));
            }
        }
        for year in self.use_years {
            lines.push(labelled(
                &format!("Use year {}", year.year),
                format!(
                    "{} start \u{b7} {} allocated \u{b7} {} left \u{b7} {} expiring",
                    year.starting_points,
                    year.points_allocated,
                    year.points_remaining,
                    year.points_expiring
                ),
            ));
            lines.push(labelled(
                "Banking deadline",
                iso_key(year.banking_deadline),
            ));
        }
        lines.push(Line::raw(""));
        for scenario in self.scenarios {
            lines.push(Line::styled(
                format!("Scenario: {}", scenario.name),
                TITLE_STYLE,
            ));
            if let Some(description) = &scenario.description {
                lines.push(Line::styled(format!("  {description}"), NOTE_STYLE));
            }
            lines.push(labelled(
                "  Points used",
                format!("{}", scenario.total_points_used),
            ));
            for (year, points) in &scenario.target_years {
                lines.push(Line::styled(
                    format!("    {year}: {points} pts"),
                    NOTE_STYLE,
                ));
            }
        }
        lines.push(Line::raw(""));
        match &self.trip.dvc {
            Some(summary) => {
                lines.push(labelled(
                    "This trip",
                    format!(
                        "{} \u{b7} {} \u{b7} {} pts allocated",
                        summary.contract_nickname, summary.use_year, summary.points_allocated
                    ),
                ));
            }
            None => lines.push(labelled("This trip", "not using DVC points".to_owned())),
        }
        let quote = quote_stay(self.trip.range);
        lines.push(labelled(
            "Mocked stay quote",
            format!("{} pts over {} nights", quote.total, quote.nightly.len()),
        ));
        for (date, points) in &quote.nightly {
            lines.push(Line::styled(
                format!("    {}  {points} pts", iso_key(*date)),
                NOTE_STYLE,
            ));
        }
        titled_paragraph(" DVC Points ", lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SampleStore;

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
    fn test_budget_view_totals() {
        let store = SampleStore::load();
        let trip = store.trip(0).unwrap();
        let area = Rect::new(0, 0, 78, 30);
        let mut buffer = Buffer::empty(area);
        BudgetView::new(trip, store.budget_for(0)).render(area, &mut buffer);
        let text = all_text(&buffer);
        assert!(text.contains("$4200.00"));
        assert!(text.contains("$2520.50"));
        assert!(text.contains("$1679.50"));
        assert!(text.contains("10 of 12 credits used"));
        assert!(text.contains("3 of 5 complete"));
    }

    #[test]
    fn test_dvc_view_quote() {
        let store = SampleStore::load();
        let trip = store.trip(0).unwrap();
        let area = Rect::new(0, 0, 78, 30);
        let mut buffer = Buffer::empty(area);
        DvcView::new(
            trip,
            store.contracts(),
            store.use_years(),
            store.scenarios(),
        )
        .render(area, &mut buffer);
        let text = all_text(&buffer);
        assert!(text.contains("Total points          150"));
        assert!(text.contains("76 pts over 4 nights"));
        assert!(text.contains("2025-07-31"));
    }
}
