mod days;
mod engine;
mod intensity;
mod labels;
mod weeks;
mod width;
mod widget;
pub(crate) use self::engine::{layout, CalendarLayout, LayoutError, ViewConfig};
pub(crate) use self::intensity::IntensityLevel;
pub(crate) use self::width::{WeekBounds, DEFAULT_MAX_WEEKS, DEFAULT_MIN_WEEKS};
pub(crate) use self::widget::{Heatmap, HEATMAP_METRICS};
use time::Date;

/// A source of per-day contribution counts
pub(crate) trait CountSource {
    fn count(&self, date: Date) -> u32;
}

impl<F: Fn(Date) -> u32> CountSource for F {
    fn count(&self, date: Date) -> u32 {
        self(date)
    }
}
