use crate::calendar::{iso_key, Dated, DateRange, DayIndex};
use time::{format_description::FormatItem, macros::format_description, Date, Time};

static MONTH_DAY_FMT: &[FormatItem<'_>] = format_description!("[month repr:long] [day padding:none]");
static FULL_FMT: &[FormatItem<'_>] =
    format_description!("[month repr:long] [day padding:none], [year]");

/// `October 12, 2026`, falling back to the ISO key if formatting fails.
pub(crate) fn display_date(date: Date) -> String {
    date.format(&FULL_FMT).unwrap_or_else(|_| iso_key(date))
}

/// Collapses a range into the shortest unambiguous form, e.g.
/// `October 10–14, 2026` or `September 28 – October 2, 2026`.
pub(crate) fn display_range(range: DateRange) -> String {
    let (start, end) = (range.start(), range.end());
    if start == end {
        return display_date(start);
    }
    if start.year() == end.year() {
        if start.month() == end.month() {
            return format!(
                "{} {}\u{2013}{}, {}",
                start.month(),
                start.day(),
                end.day(),
                start.year()
            );
        }
        let left = start.format(&MONTH_DAY_FMT).unwrap_or_else(|_| iso_key(start));
        let right = end.format(&MONTH_DAY_FMT).unwrap_or_else(|_| iso_key(end));
        return format!("{left} \u{2013} {right}, {}", start.year());
    }
    format!("{} \u{2013} {}", display_date(start), display_date(end))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParkCode {
    MagicKingdom,
    Epcot,
    HollywoodStudios,
    AnimalKingdom,
    Offsite,
    Unset,
}

impl ParkCode {
    pub(crate) fn code(self) -> &'static str {
        match self {
            ParkCode::MagicKingdom => "MK",
            ParkCode::Epcot => "EP",
            ParkCode::HollywoodStudios => "HS",
            ParkCode::AnimalKingdom => "AK",
            ParkCode::Offsite => "--",
            ParkCode::Unset => "??",
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            ParkCode::MagicKingdom => "Magic Kingdom",
            ParkCode::Epcot => "EPCOT",
            ParkCode::HollywoodStudios => "Hollywood Studios",
            ParkCode::AnimalKingdom => "Animal Kingdom",
            ParkCode::Offsite => "Off-site",
            ParkCode::Unset => "No park set",
        }
    }

    pub(crate) fn hours(self) -> &'static str {
        match self {
            ParkCode::MagicKingdom => "8:30 AM \u{2013} 10:00 PM",
            ParkCode::Epcot => "9:00 AM \u{2013} 9:00 PM",
            ParkCode::HollywoodStudios => "8:30 AM \u{2013} 9:30 PM",
            ParkCode::AnimalKingdom => "8:00 AM \u{2013} 7:00 PM",
            ParkCode::Offsite | ParkCode::Unset => "Hours TBD",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TimeBlockLabel {
    Breakfast,
    Morning,
    Lunch,
    Afternoon,
    Dinner,
    Evening,
    Snacks,
}

/// Canonical block order for a park day; days with missing blocks are
/// normalized against this before display.
pub(crate) static BLUEPRINT: [TimeBlockLabel; 7] = [
    TimeBlockLabel::Breakfast,
    TimeBlockLabel::Morning,
    TimeBlockLabel::Lunch,
    TimeBlockLabel::Afternoon,
    TimeBlockLabel::Dinner,
    TimeBlockLabel::Evening,
    TimeBlockLabel::Snacks,
];

impl TimeBlockLabel {
    pub(crate) fn display(self) -> &'static str {
        match self {
            TimeBlockLabel::Breakfast => "Breakfast",
            TimeBlockLabel::Morning => "Morning",
            TimeBlockLabel::Lunch => "Lunch",
            TimeBlockLabel::Afternoon => "Afternoon",
            TimeBlockLabel::Dinner => "Dinner",
            TimeBlockLabel::Evening => "Evening",
            TimeBlockLabel::Snacks => "Snacks",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ActivityKind {
    Dining,
    Ride,
    Show,
    Note,
    Other,
}

impl ActivityKind {
    pub(crate) fn tag(self) -> &'static str {
        match self {
            ActivityKind::Dining => "Dining",
            ActivityKind::Ride => "Ride",
            ActivityKind::Show => "Show",
            ActivityKind::Note => "Note",
            ActivityKind::Other => "Other",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Activity {
    pub(crate) kind: ActivityKind,
    pub(crate) name: String,
    pub(crate) start: Option<Time>,
    pub(crate) end: Option<Time>,
    pub(crate) must_do: bool,
    pub(crate) genie_plus: bool,
    /// Dining-plan credits this activity consumes; zero for anything that is
    /// not a dining reservation.
    pub(crate) credits: u32,
}

impl Activity {
    pub(crate) fn start_display(&self) -> String {
        match self.start {
            Some(t) => format!("{:02}:{:02}", t.hour(), t.minute()),
            None => "\u{2014}".to_owned(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TimeBlock {
    pub(crate) label: TimeBlockLabel,
    pub(crate) activities: Vec<Activity>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TripDay {
    pub(crate) date: Date,
    pub(crate) park: ParkCode,
    pub(crate) notes: Option<String>,
    pub(crate) blocks: Vec<TimeBlock>,
}

impl TripDay {
    /// The day's blocks in blueprint order, with empty blocks filled in for
    /// any labels the day does not carry.
    pub(crate) fn schedule(&self) -> Vec<TimeBlock> {
        BLUEPRINT
            .iter()
            .map(|&label| {
                self.blocks
                    .iter()
                    .find(|b| b.label == label)
                    .cloned()
                    .unwrap_or_else(|| TimeBlock {
                        label,
                        activities: Vec::new(),
                    })
            })
            .collect()
    }

    pub(crate) fn activity_count(&self) -> usize {
        self.blocks.iter().map(|b| b.activities.len()).sum()
    }

    fn dining_credits(&self) -> u32 {
        self.blocks
            .iter()
            .flat_map(|b| &b.activities)
            .filter(|a| a.kind == ActivityKind::Dining)
            .map(|a| a.credits)
            .sum()
    }
}

impl Dated for TripDay {
    fn date(&self) -> Date {
        self.date
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TripChecklist {
    pub(crate) tickets_purchased: bool,
    pub(crate) park_reservations_made: bool,
    pub(crate) genie_strategy_decided: bool,
    pub(crate) magic_bands_ready: bool,
    pub(crate) memory_maker: bool,
}

impl TripChecklist {
    pub(crate) fn items(&self) -> [(&'static str, bool); 5] {
        [
            ("Tickets purchased", self.tickets_purchased),
            ("Park reservations made", self.park_reservations_made),
            ("Genie+ strategy decided", self.genie_strategy_decided),
            ("MagicBands ready", self.magic_bands_ready),
            ("Memory Maker", self.memory_maker),
        ]
    }

    pub(crate) fn completed(&self) -> (usize, usize) {
        let items = self.items();
        (items.iter().filter(|(_, done)| *done).count(), items.len())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Flight {
    pub(crate) airline: String,
    pub(crate) number: String,
    pub(crate) from: String,
    pub(crate) to: String,
    pub(crate) departs: String,
    pub(crate) arrives: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct TripLogistics {
    pub(crate) outbound: Option<Flight>,
    pub(crate) inbound: Option<Flight>,
    pub(crate) ground_transport: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DiningPlan {
    pub(crate) total_credits: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DvcSummary {
    pub(crate) contract_nickname: String,
    pub(crate) use_year: String,
    pub(crate) points_allocated: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Trip {
    pub(crate) name: String,
    pub(crate) range: DateRange,
    pub(crate) hotel: String,
    pub(crate) budget_target: Option<f64>,
    pub(crate) checklist: TripChecklist,
    pub(crate) dining_plan: Option<DiningPlan>,
    pub(crate) dvc: Option<DvcSummary>,
    pub(crate) logistics: TripLogistics,
    pub(crate) days: Vec<TripDay>,
}

impl Trip {
    /// Per-render join index from ISO keys to park days.
    pub(crate) fn day_index(&self) -> DayIndex<TripDay> {
        DayIndex::from_records(self.days.iter().cloned())
    }

    pub(crate) fn day_on(&self, date: Date) -> Option<&TripDay> {
        self.days.iter().find(|d| d.date == date)
    }

    pub(crate) fn day_position(&self, date: Date) -> Option<usize> {
        self.days.iter().position(|d| d.date == date)
    }

    pub(crate) fn used_dining_credits(&self) -> u32 {
        self.days.iter().map(TripDay::dining_credits).sum()
    }

    /// `(used, total)` dining credits; `None` when the trip has no plan.
    pub(crate) fn dining_credit_status(&self) -> Option<(u32, u32)> {
        let plan = self.dining_plan?;
        Some((
            self.used_dining_credits().min(plan.total_credits),
            plan.total_credits,
        ))
    }

    pub(crate) fn remaining_dining_credits(&self) -> Option<u32> {
        self.dining_credit_status()
            .map(|(used, total)| total - used)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum BudgetCategory {
    Lodging,
    Food,
    Transport,
    Merch,
    Tickets,
    Other,
}

impl BudgetCategory {
    pub(crate) const ALL: [BudgetCategory; 6] = [
        BudgetCategory::Lodging,
        BudgetCategory::Food,
        BudgetCategory::Transport,
        BudgetCategory::Merch,
        BudgetCategory::Tickets,
        BudgetCategory::Other,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            BudgetCategory::Lodging => "Lodging",
            BudgetCategory::Food => "Food",
            BudgetCategory::Transport => "Transport",
            BudgetCategory::Merch => "Merchandise",
            BudgetCategory::Tickets => "Tickets",
            BudgetCategory::Other => "Other",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BudgetItem {
    pub(crate) date: Option<Date>,
    pub(crate) category: BudgetCategory,
    pub(crate) amount: f64,
    pub(crate) description: String,
    pub(crate) paid_by: Option<String>,
}

/// Totals derived from a trip's budget items; a disposable value recomputed
/// whenever the items change.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BudgetReport {
    pub(crate) spent: f64,
    pub(crate) remaining: Option<f64>,
    pub(crate) by_category: Vec<(BudgetCategory, f64)>,
}

impl BudgetReport {
    pub(crate) fn new(target: Option<f64>, items: &[BudgetItem]) -> BudgetReport {
        let spent = items.iter().map(|i| i.amount).sum::<f64>();
        let by_category = BudgetCategory::ALL
            .iter()
            .filter_map(|&cat| {
                let subtotal = items
                    .iter()
                    .filter(|i| i.category == cat)
                    .map(|i| i.amount)
                    .sum::<f64>();
                (subtotal > 0.0).then_some((cat, subtotal))
            })
            .collect();
        BudgetReport {
            spent,
            remaining: target.map(|t| t - spent),
            by_category,
        }
    }
}
