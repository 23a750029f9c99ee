use crate::calendar::IntensityLevel;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const MONTH_STYLE: Style = Style::new().fg(Color::Gray).bg(Color::Black);

pub(crate) const WEEKDAY_STYLE: Style = Style::new().fg(Color::Gray).bg(Color::Black);

pub(crate) const SUMMARY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const DETAIL_STYLE: Style = BASE_STYLE;

pub(crate) const LEGEND_STYLE: Style = Style::new().fg(Color::Gray).bg(Color::Black);

// GitHub-style green ramp from the 256-color palette, indexed by intensity
const INTENSITY_RAMP: [Color; 5] = [
    Color::Indexed(236),
    Color::Indexed(22),
    Color::Indexed(28),
    Color::Indexed(34),
    Color::Indexed(40),
];

pub(crate) fn intensity_style(level: IntensityLevel) -> Style {
    let color = INTENSITY_RAMP
        .get(usize::from(level.index()))
        .copied()
        .unwrap_or(Color::Reset);
    Style::new().fg(color).bg(Color::Black)
}
