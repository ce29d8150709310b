use crate::trip::ParkCode;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

/// Cells outside the seed month.
pub(crate) const OUT_OF_MONTH_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

/// Cells inside the trip's date range.
pub(crate) const IN_RANGE_STYLE: Style = BASE_STYLE
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

pub(crate) const TODAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);

pub(crate) const SELECTED_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

pub(crate) const NOTE_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const MUST_DO_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

pub(crate) fn park_style(park: ParkCode) -> Style {
    match park {
        ParkCode::MagicKingdom => BASE_STYLE.fg(Color::LightMagenta),
        ParkCode::Epcot => BASE_STYLE.fg(Color::LightBlue),
        ParkCode::HollywoodStudios => BASE_STYLE.fg(Color::LightYellow),
        ParkCode::AnimalKingdom => BASE_STYLE.fg(Color::LightGreen),
        ParkCode::Offsite | ParkCode::Unset => BASE_STYLE.fg(Color::DarkGray),
    }
}

pub(crate) mod jumpto {
    use super::{Color, Modifier, Style, BASE_STYLE};

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
