use super::days::WeekdayExt;
use super::engine::CalendarLayout;
use super::intensity::IntensityLevel;
use super::width::ColumnMetrics;
use crate::theme::{
    intensity_style, DETAIL_STYLE, LEGEND_STYLE, MONTH_STYLE, SUMMARY_STYLE, WEEKDAY_STYLE,
};
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use std::iter::successors;
use time::{Date, Weekday};

/// Number of columns taken up by each day's cell
const COLUMN_WIDTH: u16 = 2;

/// Number of blank columns between consecutive weeks
const GAP: u16 = 1;

const PITCH: u16 = COLUMN_WIDTH + GAP;

/// Number of columns on the left side of the grid, used as the margin in
/// which weekday names are written
const WEEKDAY_MARGIN: u16 = 4;

/// Number of lines above the grid, used for month names
const HEADER_LINES: u16 = 1;

const WEEK_ROWS: u16 = 7;

/// Number of blank lines between the grid and the summary
const FOOTER_GAP: u16 = 1;

const CELL: &str = "██";

const SELECTED_CELL: &str = "[]";

/// Column metrics to pass to the layout engine when the container width is
/// measured in terminal cells.
///
/// The reserve covers the weekday margin plus one extra week column, as a
/// range that does not begin on the first weekday spills into one more
/// column than the week count.
pub(crate) const HEATMAP_METRICS: ColumnMetrics =
    match ColumnMetrics::new(COLUMN_WIDTH, GAP, WEEKDAY_MARGIN + PITCH) {
        Ok(m) => m,
        Err(_) => panic!("heatmap column pitch should be nonzero"),
    };

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Heatmap<'a> {
    layout: &'a CalendarLayout,
    selected: Date,
}

impl<'a> Heatmap<'a> {
    pub(crate) fn new(layout: &'a CalendarLayout, selected: Date) -> Self {
        Heatmap { layout, selected }
    }
}

impl Widget for Heatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let first_weekday = self.layout.first_weekday;
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_weekdays(first_weekday);
        for (i, week) in std::iter::zip(0u16.., &self.layout.weeks) {
            if let Some(name) = self.layout.label_at(usize::from(i)) {
                canvas.draw_month(i, name);
            }
            for day in week.days() {
                let level = IntensityLevel::from(day.count());
                let row = day.weekday().offset_from(first_weekday);
                canvas.draw_day(i, row, level, day.date() == self.selected);
            }
        }
        canvas.draw_summary(self.layout.total_contributions(), self.layout.week_count);
        if let Some(day) = self.layout.day(self.selected) {
            canvas.draw_detail(day.count(), day.date());
        }
        canvas.draw_legend();
    }
}

fn weekday_name(wd: Weekday) -> &'static str {
    use Weekday::*;
    match wd {
        Sunday => "Sun",
        Monday => "Mon",
        Tuesday => "Tue",
        Wednesday => "Wed",
        Thursday => "Thu",
        Friday => "Fri",
        Saturday => "Sat",
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    // Only every other row is labelled, starting with the second
    fn draw_weekdays(&mut self, first: Weekday) {
        let weekdays = successors(Some(first), |wd| Some(wd.next()));
        for (row, wd) in std::iter::zip(0..WEEK_ROWS, weekdays) {
            if row % 2 == 1 {
                self.mvprint(HEADER_LINES + row, 0, weekday_name(wd), WEEKDAY_STYLE);
            }
        }
    }

    fn draw_month(&mut self, week_no: u16, name: &str) {
        self.mvprint(0, column_x(week_no), name, MONTH_STYLE);
    }

    fn draw_day(&mut self, week_no: u16, row: u16, level: IntensityLevel, selected: bool) {
        let glyph = if selected { SELECTED_CELL } else { CELL };
        self.mvprint(
            HEADER_LINES + row,
            column_x(week_no),
            glyph,
            intensity_style(level),
        );
    }

    fn draw_summary(&mut self, total: u64, weeks: usize) {
        self.mvprint(
            footer_y(0),
            0,
            format!("{total} contributions in the last {weeks} weeks"),
            SUMMARY_STYLE,
        );
    }

    fn draw_detail(&mut self, count: u32, date: Date) {
        self.mvprint(
            footer_y(1),
            0,
            format!("{count} contributions on {date}"),
            DETAIL_STYLE,
        );
    }

    fn draw_legend(&mut self) {
        let y = footer_y(2);
        self.mvprint(y, 0, "Less", LEGEND_STYLE);
        let mut x = 5;
        for level in IntensityLevel::ALL {
            self.mvprint(y, x, CELL, intensity_style(level));
            x += PITCH;
        }
        self.mvprint(y, x, "More", LEGEND_STYLE);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            self.buf.set_stringn(
                x + self.area.x,
                y + self.area.y,
                s,
                usize::from(self.area.width - x),
                style,
            );
        }
    }
}

fn column_x(week_no: u16) -> u16 {
    WEEKDAY_MARGIN.saturating_add(week_no.saturating_mul(PITCH))
}

fn footer_y(line: u16) -> u16 {
    HEADER_LINES + WEEK_ROWS + FOOTER_GAP + line
}
