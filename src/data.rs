use crate::calendar::DateRange;
use crate::dvc::{DvcContract, DvcScenario, DvcUseYear};
use crate::trip::{
    Activity, ActivityKind, BudgetCategory, BudgetItem, DiningPlan, DvcSummary, Flight, ParkCode,
    TimeBlock, TimeBlockLabel, Trip, TripChecklist, TripDay, TripLogistics,
};
use std::iter::successors;
use time::{
    macros::{date, time},
    Date, Month,
};

const DAYS_PER_TRIP: usize = 5;
const PARK_ROTATION: [ParkCode; 4] = [
    ParkCode::MagicKingdom,
    ParkCode::Epcot,
    ParkCode::HollywoodStudios,
    ParkCode::AnimalKingdom,
];

/// In-memory stand-in for a backend: built once at startup and handed to the
/// app, never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SampleStore {
    trips: Vec<Trip>,
    budgets: Vec<Vec<BudgetItem>>,
    contracts: Vec<DvcContract>,
    use_years: Vec<DvcUseYear>,
    scenarios: Vec<DvcScenario>,
}

impl SampleStore {
    pub(crate) fn load() -> SampleStore {
        SampleStore {
            trips: vec![
                make_trip(0, date!(2026 - 10 - 10)),
                make_trip(1, date!(2026 - 10 - 17)),
            ],
            budgets: vec![
                vec![
                    BudgetItem {
                        date: Some(date!(2026 - 10 - 11)),
                        category: BudgetCategory::Food,
                        amount: 120.5,
                        description: "Lunch at EPCOT".to_owned(),
                        paid_by: Some("Logan".to_owned()),
                    },
                    BudgetItem {
                        date: Some(date!(2026 - 10 - 12)),
                        category: BudgetCategory::Tickets,
                        amount: 800.0,
                        description: "Mickey's Not-So-Scary Halloween Party".to_owned(),
                        paid_by: None,
                    },
                    BudgetItem {
                        date: None,
                        category: BudgetCategory::Lodging,
                        amount: 1600.0,
                        description: "DVC point rental".to_owned(),
                        paid_by: None,
                    },
                ],
                Vec::new(),
            ],
            contracts: vec![DvcContract {
                nickname: "Main Contract".to_owned(),
                home_resort: "Saratoga Springs".to_owned(),
                use_year_month: Month::April,
                total_points: 150,
                annual_dues: Some(1100.0),
            }],
            use_years: vec![DvcUseYear {
                year: 2025,
                contract_nickname: "Main Contract".to_owned(),
                starting_points: 150,
                points_allocated: 90,
                points_remaining: 60,
                points_expiring: 10,
                banking_deadline: date!(2025 - 07 - 31),
            }],
            scenarios: vec![DvcScenario {
                name: "All-in 2026".to_owned(),
                description: Some("Use most points for a deluxe stay.".to_owned()),
                total_points_used: 142,
                target_years: vec![(2026, 120), (2027, 22)],
            }],
        }
    }

    pub(crate) fn trip(&self, idx: usize) -> Option<&Trip> {
        self.trips.get(idx)
    }

    pub(crate) fn trip_count(&self) -> usize {
        self.trips.len()
    }

    pub(crate) fn budget_for(&self, idx: usize) -> &[BudgetItem] {
        self.budgets.get(idx).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn contracts(&self) -> &[DvcContract] {
        &self.contracts
    }

    pub(crate) fn use_years(&self) -> &[DvcUseYear] {
        &self.use_years
    }

    pub(crate) fn scenarios(&self) -> &[DvcScenario] {
        &self.scenarios
    }
}

fn make_trip(idx: usize, start: Date) -> Trip {
    let days = successors(Some(start), |&d| d.next_day())
        .take(DAYS_PER_TRIP)
        .enumerate()
        .map(|(day_idx, date)| park_day(date, PARK_ROTATION[(day_idx + idx) % 4], day_idx == 0))
        .collect::<Vec<_>>();
    let end = days.last().map_or(start, |d| d.date);
    let range = DateRange::new(start, end).expect("sample trip dates run forward");
    let first = idx == 0;
    Trip {
        name: if first {
            "Fall 2026 Family Trip".to_owned()
        } else {
            "Explorers 2026".to_owned()
        },
        range,
        hotel: if first {
            "Pop Century".to_owned()
        } else {
            "Saratoga Springs".to_owned()
        },
        budget_target: Some(if first { 4200.0 } else { 3800.0 }),
        checklist: TripChecklist {
            tickets_purchased: true,
            park_reservations_made: first,
            genie_strategy_decided: first,
            magic_bands_ready: !first,
            memory_maker: false,
        },
        dining_plan: first.then_some(DiningPlan { total_credits: 12 }),
        dvc: first.then(|| DvcSummary {
            contract_nickname: "Main Contract".to_owned(),
            use_year: "2025 April".to_owned(),
            points_allocated: 118,
        }),
        logistics: TripLogistics {
            outbound: Some(flight(first, true)),
            inbound: Some(flight(first, false)),
            ground_transport: Some(if first {
                "Rideshare".to_owned()
            } else {
                "Rental car".to_owned()
            }),
        },
        days,
    }
}

fn flight(first_trip: bool, outbound: bool) -> Flight {
    let (airline, number) = match (first_trip, outbound) {
        (true, true) => ("Delta", "DL 1782"),
        (true, false) => ("Delta", "DL 1905"),
        (false, true) => ("JetBlue", "B6 612"),
        (false, false) => ("JetBlue", "B6 623"),
    };
    let (from, to, departs, arrives) = if outbound {
        ("BOS", "MCO", "7:25 AM", "10:35 AM")
    } else {
        ("MCO", "BOS", "6:45 PM", "10:05 PM")
    };
    Flight {
        airline: airline.to_owned(),
        number: number.to_owned(),
        from: from.to_owned(),
        to: to.to_owned(),
        departs: departs.to_owned(),
        arrives: arrives.to_owned(),
    }
}

struct DayMenu {
    breakfast: &'static str,
    morning_ride: &'static str,
    lunch: &'static str,
    afternoon_ride: &'static str,
    show: &'static str,
    dinner: &'static str,
    evening_note: &'static str,
}

fn menu_for(park: ParkCode) -> DayMenu {
    match park {
        ParkCode::Epcot => DayMenu {
            breakfast: "Connections Cafe",
            morning_ride: "Test Track",
            lunch: "Sunshine Seasons",
            afternoon_ride: "Frozen Ever After",
            show: "Voices of Liberty",
            dinner: "Le Cellier",
            evening_note: "Stake out Luminous viewing early",
        },
        ParkCode::HollywoodStudios => DayMenu {
            breakfast: "Woody's Lunch Box",
            morning_ride: "Rise of the Resistance",
            lunch: "Docking Bay 7",
            afternoon_ride: "Tower of Terror",
            show: "Indiana Jones Epic Stunt Spectacular",
            dinner: "Sci-Fi Dine-In Theater",
            evening_note: "Fantasmic seating by 8:00",
        },
        ParkCode::AnimalKingdom => DayMenu {
            breakfast: "Tusker House",
            morning_ride: "Flight of Passage",
            lunch: "Satu'li Canteen",
            afternoon_ride: "Expedition Everest",
            show: "Festival of the Lion King",
            dinner: "Tiffins",
            evening_note: "Park closes early; dinner off-site backup",
        },
        // Magic Kingdom doubles as the fallback for off-site days, which the
        // sample rotation never produces.
        _ => DayMenu {
            breakfast: "Crystal Palace",
            morning_ride: "Space Mountain",
            lunch: "Columbia Harbour House",
            afternoon_ride: "Haunted Mansion",
            show: "Festival of Fantasy Parade",
            dinner: "Be Our Guest",
            evening_note: "Fireworks from the hub grass",
        },
    }
}

fn park_day(date: Date, park: ParkCode, arrival: bool) -> TripDay {
    let menu = menu_for(park);
    let blocks = vec![
        TimeBlock {
            label: TimeBlockLabel::Breakfast,
            activities: vec![Activity {
                kind: ActivityKind::Dining,
                name: menu.breakfast.to_owned(),
                start: Some(time!(08:00)),
                end: Some(time!(09:00)),
                must_do: false,
                genie_plus: false,
                credits: 0,
            }],
        },
        TimeBlock {
            label: TimeBlockLabel::Morning,
            activities: vec![Activity {
                kind: ActivityKind::Ride,
                name: menu.morning_ride.to_owned(),
                start: Some(time!(09:30)),
                end: None,
                must_do: true,
                genie_plus: true,
                credits: 0,
            }],
        },
        TimeBlock {
            label: TimeBlockLabel::Lunch,
            activities: vec![Activity {
                kind: ActivityKind::Dining,
                name: menu.lunch.to_owned(),
                start: Some(time!(12:15)),
                end: Some(time!(13:30)),
                must_do: false,
                genie_plus: false,
                credits: 0,
            }],
        },
        TimeBlock {
            label: TimeBlockLabel::Afternoon,
            activities: vec![
                Activity {
                    kind: ActivityKind::Ride,
                    name: menu.afternoon_ride.to_owned(),
                    start: Some(time!(14:00)),
                    end: None,
                    must_do: true,
                    genie_plus: true,
                    credits: 0,
                },
                Activity {
                    kind: ActivityKind::Show,
                    name: menu.show.to_owned(),
                    start: Some(time!(15:00)),
                    end: None,
                    must_do: false,
                    genie_plus: false,
                    credits: 0,
                },
            ],
        },
        TimeBlock {
            label: TimeBlockLabel::Dinner,
            activities: vec![Activity {
                kind: ActivityKind::Dining,
                name: menu.dinner.to_owned(),
                start: Some(time!(18:00)),
                end: Some(time!(19:30)),
                must_do: false,
                genie_plus: false,
                credits: 2,
            }],
        },
        TimeBlock {
            label: TimeBlockLabel::Evening,
            activities: vec![Activity {
                kind: ActivityKind::Note,
                name: menu.evening_note.to_owned(),
                start: Some(time!(20:30)),
                end: None,
                must_do: false,
                genie_plus: false,
                credits: 0,
            }],
        },
        TimeBlock {
            label: TimeBlockLabel::Snacks,
            activities: Vec::new(),
        },
    ];
    TripDay {
        date,
        park,
        notes: arrival.then(|| "Arrival day; rope drop planned.".to_owned()),
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_shape() {
        let store = SampleStore::load();
        assert_eq!(store.trip_count(), 2);
        for idx in 0..store.trip_count() {
            let trip = store.trip(idx).unwrap();
            assert_eq!(trip.days.len(), DAYS_PER_TRIP);
            assert!(trip.days.iter().all(|d| trip.range.contains(d.date)));
        }
        assert!(store.trip(2).is_none());
    }

    #[test]
    fn test_park_rotation_offsets_by_trip() {
        let store = SampleStore::load();
        let first = store.trip(0).unwrap();
        let second = store.trip(1).unwrap();
        assert_eq!(first.days[0].park, ParkCode::MagicKingdom);
        assert_eq!(second.days[0].park, ParkCode::Epcot);
    }

    #[test]
    fn test_trip_ranges() {
        let store = SampleStore::load();
        let first = store.trip(0).unwrap();
        assert_eq!(first.range.start(), date!(2026 - 10 - 10));
        assert_eq!(first.range.end(), date!(2026 - 10 - 14));
        let second = store.trip(1).unwrap();
        assert_eq!(second.range.start(), date!(2026 - 10 - 17));
    }

    #[test]
    fn test_budget_totals() {
        let store = SampleStore::load();
        let items = store.budget_for(0);
        assert_eq!(items.len(), 3);
        let spent = items.iter().map(|i| i.amount).sum::<f64>();
        assert!((spent - 2520.5).abs() < f64::EPSILON);
        assert!(store.budget_for(1).is_empty());
        assert!(store.budget_for(9).is_empty());
    }

    #[test]
    fn test_dining_plan_usage() {
        let store = SampleStore::load();
        let first = store.trip(0).unwrap();
        // One two-credit dinner per day across five days against a
        // twelve-credit plan.
        assert_eq!(first.dining_credit_status(), Some((10, 12)));
        assert_eq!(first.remaining_dining_credits(), Some(2));
        assert_eq!(store.trip(1).unwrap().dining_credit_status(), None);
    }

    #[test]
    fn test_dvc_records() {
        let store = SampleStore::load();
        assert_eq!(crate::dvc::total_points(store.contracts()), 150);
        assert_eq!(crate::dvc::expiring_points(store.use_years()), 10);
        assert_eq!(store.scenarios()[0].target_years, vec![(2026, 120), (2027, 22)]);
    }
}
