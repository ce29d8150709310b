use crate::calendar::{CalendarAnchor, TripCalendar};
use crate::data::SampleStore;
use crate::detail::DayView;
use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::panes::{BudgetView, DvcView};
use crate::theme::{BASE_STYLE, NOTE_STYLE};
use crate::trip::{display_date, display_range, Trip};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Paragraph, StatefulWidget, Widget},
    DefaultTerminal,
};
use std::io::{self, Write};
use time::{Date, Duration, Month};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct App {
    store: SampleStore,
    trip_idx: usize,
    today: Date,
    cursor: Date,
    anchor: CalendarAnchor,
    state: AppState,
}

impl App {
    pub(crate) fn new(store: SampleStore, trip_idx: usize, today: Date, cursor: Date) -> App {
        App {
            store,
            trip_idx,
            today,
            cursor,
            anchor: CalendarAnchor::Month,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(&mut *self, area);
        })?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.cursor_step(Duration::days(-1)),
                KeyCode::Char('l') | KeyCode::Right => self.cursor_step(Duration::days(1)),
                KeyCode::Char('k') | KeyCode::Up => self.cursor_step(Duration::days(-7)),
                KeyCode::Char('j') | KeyCode::Down => self.cursor_step(Duration::days(7)),
                KeyCode::Char('[') => self.month_step(false),
                KeyCode::Char(']') => self.month_step(true),
                KeyCode::Char('m') => {
                    self.anchor = match self.anchor {
                        CalendarAnchor::Month => CalendarAnchor::TripSpan,
                        CalendarAnchor::TripSpan => CalendarAnchor::Month,
                    };
                    true
                }
                KeyCode::Enter => {
                    if self.trip().day_on(self.cursor).is_some() {
                        self.state = AppState::Day;
                        true
                    } else {
                        false
                    }
                }
                KeyCode::Char('b') => {
                    self.state = AppState::Budget;
                    true
                }
                KeyCode::Char('v') => {
                    self.state = AppState::Dvc;
                    true
                }
                KeyCode::Tab => self.next_trip(),
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('0') | KeyCode::Home => {
                    self.cursor = self.trip().range.start();
                    true
                }
                KeyCode::Char('t') => {
                    self.cursor = self.today;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Day => match key {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => {
                    self.state = AppState::Calendar;
                    true
                }
                KeyCode::Char('h') | KeyCode::Left => self.trip_day_step(false),
                KeyCode::Char('l') | KeyCode::Right => self.trip_day_step(true),
                _ => false,
            },
            AppState::Budget | AppState::Dvc => match key {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => {
                    self.state = AppState::Calendar;
                    true
                }
                KeyCode::Char('b') => {
                    self.state = AppState::Budget;
                    true
                }
                KeyCode::Char('v') => {
                    self.state = AppState::Dvc;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('0') => state.handle_input(JumpToInput::Digit(0)),
                        KeyCode::Char('1') => state.handle_input(JumpToInput::Digit(1)),
                        KeyCode::Char('2') => state.handle_input(JumpToInput::Digit(2)),
                        KeyCode::Char('3') => state.handle_input(JumpToInput::Digit(3)),
                        KeyCode::Char('4') => state.handle_input(JumpToInput::Digit(4)),
                        KeyCode::Char('5') => state.handle_input(JumpToInput::Digit(5)),
                        KeyCode::Char('6') => state.handle_input(JumpToInput::Digit(6)),
                        KeyCode::Char('7') => state.handle_input(JumpToInput::Digit(7)),
                        KeyCode::Char('8') => state.handle_input(JumpToInput::Digit(8)),
                        KeyCode::Char('9') => state.handle_input(JumpToInput::Digit(9)),
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(date) => {
                            self.state = AppState::Calendar;
                            self.cursor = date;
                            true
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn trip(&self) -> &Trip {
        self.store
            .trip(self.trip_idx)
            .expect("trip index is validated at startup")
    }

    fn cursor_step(&mut self, step: Duration) -> bool {
        match self.cursor.checked_add(step) {
            Some(date) => {
                self.cursor = date;
                true
            }
            None => false,
        }
    }

    fn month_step(&mut self, forwards: bool) -> bool {
        let year = self.cursor.year();
        let (year, month) = if forwards {
            match self.cursor.month().next() {
                Month::January => (year + 1, Month::January),
                m => (year, m),
            }
        } else {
            match self.cursor.month().previous() {
                Month::December => (year - 1, Month::December),
                m => (year, m),
            }
        };
        match Date::from_calendar_date(year, month, 1) {
            Ok(date) => {
                self.cursor = date;
                true
            }
            Err(_) => false,
        }
    }

    fn next_trip(&mut self) -> bool {
        self.trip_idx = (self.trip_idx + 1) % self.store.trip_count();
        self.cursor = self.trip().range.start();
        true
    }

    fn trip_day_step(&mut self, forwards: bool) -> bool {
        let trip = self.trip();
        let Some(pos) = trip.day_position(self.cursor) else {
            return false;
        };
        let next = if forwards {
            pos + 1
        } else {
            let Some(prev) = pos.checked_sub(1) else {
                return false;
            };
            prev
        };
        match trip.days.get(next).map(|d| d.date) {
            Some(date) => {
                self.cursor = date;
                true
            }
            None => false,
        }
    }

    fn status_line(&self, trip: &Trip) -> Line<'static> {
        let date = display_date(self.cursor);
        let text = match trip.day_on(self.cursor) {
            Some(day) => format!(
                "{date} \u{b7} {} \u{b7} {} plans \u{b7} ENTER to open \u{b7} ? for help",
                day.park.name(),
                day.activity_count()
            ),
            None => format!(
                "{date} \u{b7} outside trip ({}) \u{b7} ? for help",
                display_range(trip.range)
            ),
        };
        Line::styled(text, NOTE_STYLE)
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let trip = self
            .store
            .trip(self.trip_idx)
            .expect("trip index is validated at startup");
        match self.state {
            AppState::Day => {
                if let Some(day) = trip.day_on(self.cursor) {
                    DayView::new(trip, day).render(area, buf);
                    return;
                }
            }
            AppState::Budget => {
                BudgetView::new(trip, self.store.budget_for(self.trip_idx)).render(area, buf);
                return;
            }
            AppState::Dvc => {
                DvcView::new(
                    trip,
                    self.store.contracts(),
                    self.store.use_years(),
                    self.store.scenarios(),
                )
                .render(area, buf);
                return;
            }
            _ => {}
        }
        TripCalendar::new(trip, self.today, self.cursor, self.anchor).render(area, buf);
        if area.height > 1 {
            let status_area = Rect {
                x: area.x,
                y: area.y + area.height - 1,
                width: area.width,
                height: 1,
            };
            Paragraph::new(self.status_line(trip)).render(status_area, buf);
        }
        if self.state == AppState::Helping {
            Help.render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Day,
    Budget,
    Dvc,
    Helping,
    Jumping(JumpToState),
    Quitting,
}
