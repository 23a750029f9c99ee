use super::days::{date_range, Day};
use super::labels::{place_labels, MonthLabel};
use super::weeks::{bucket, Week};
use super::width::{compute_weeks, ColumnMetrics, WeekBounds};
use super::CountSource;
use thiserror::Error;
use time::{Date, Weekday};

/// Everything needed to lay out a heatmap apart from the container width
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ViewConfig<S> {
    pub(crate) today: Date,
    pub(crate) first_weekday: Weekday,
    pub(crate) bounds: WeekBounds,
    pub(crate) metrics: ColumnMetrics,
    pub(crate) count_source: Option<S>,
}

impl<S: CountSource> ViewConfig<S> {
    pub(crate) fn new(today: Date, metrics: ColumnMetrics) -> Self {
        ViewConfig {
            today,
            first_weekday: Weekday::Sunday,
            bounds: WeekBounds::default(),
            metrics,
            count_source: None,
        }
    }

    pub(crate) fn first_weekday(mut self, wd: Weekday) -> Self {
        self.first_weekday = wd;
        self
    }

    pub(crate) fn bounds(mut self, bounds: WeekBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub(crate) fn count_source(mut self, source: S) -> Self {
        self.count_source = Some(source);
        self
    }
}

/// The weeks to show and where to put month names above them
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarLayout {
    pub(crate) today: Date,
    pub(crate) first_weekday: Weekday,
    /// Number of weeks the container width allows for.  There may be one
    /// more entry in `weeks` than this when the range does not begin on the
    /// first weekday.
    pub(crate) week_count: usize,
    pub(crate) weeks: Vec<Week>,
    pub(crate) month_labels: Vec<MonthLabel>,
}

impl CalendarLayout {
    pub(crate) fn days(&self) -> impl Iterator<Item = &Day> + '_ {
        self.weeks.iter().flat_map(Week::days)
    }

    pub(crate) fn first_date(&self) -> Option<Date> {
        self.weeks.first().map(|w| w.first().date())
    }

    pub(crate) fn last_date(&self) -> Option<Date> {
        self.days().last().map(Day::date)
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        self.first_date().is_some_and(|d| d <= date)
            && self.last_date().is_some_and(|d| date <= d)
    }

    pub(crate) fn day(&self, date: Date) -> Option<&Day> {
        self.days().find(|d| d.date() == date)
    }

    pub(crate) fn total_contributions(&self) -> u64 {
        self.days().map(|d| u64::from(d.count())).sum()
    }

    pub(crate) fn label_at(&self, week_index: usize) -> Option<&'static str> {
        self.month_labels
            .iter()
            .find(|l| l.week_index == week_index)
            .map(|l| l.name)
    }
}

/// Computes the heatmap layout for a container `container_width` wide.
///
/// Nothing is cached; calling this again with the same arguments produces an
/// equal layout.
pub(crate) fn layout<S: CountSource>(
    config: &ViewConfig<S>,
    container_width: Option<u16>,
) -> Result<CalendarLayout, LayoutError> {
    let source = config
        .count_source
        .as_ref()
        .ok_or(LayoutError::MissingCountSource)?;
    let week_count = compute_weeks(container_width, config.metrics, config.bounds).get();
    let days = date_range(config.today, week_count, source)?;
    let weeks = bucket(days, config.first_weekday);
    let month_labels = place_labels(&weeks);
    tracing::debug!(
        today = %config.today,
        week_count,
        columns = weeks.len(),
        labels = month_labels.len(),
        "laid out calendar"
    );
    Ok(CalendarLayout {
        today: config.today,
        first_weekday: config.first_weekday,
        week_count,
        weeks,
        month_labels,
    })
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum LayoutError {
    #[error("no contribution count source configured")]
    MissingCountSource,
    #[error("number of weeks must be positive")]
    ZeroWeeks,
    #[error("invalid week bounds: need 1 <= minimum ({min}) <= maximum ({max})")]
    InvalidWeekBounds { min: usize, max: usize },
    #[error("column width and gap cannot both be zero")]
    ZeroColumnPitch,
    #[error("cannot count back {days} days from {today}")]
    DateOutOfRange { today: Date, days: usize },
}
