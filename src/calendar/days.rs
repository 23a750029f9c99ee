use super::engine::LayoutError;
use super::CountSource;
use std::iter::successors;
use time::{Date, Duration, Month, Weekday};

pub(super) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    /// Number of days since Sunday, 0 through 6
    fn index0(&self) -> u16;

    /// Number of days from `first` forwards to `self`, 0 through 6
    fn offset_from(&self, first: Weekday) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }

    fn offset_from(&self, first: Weekday) -> u16 {
        (self.index0() + 7 - first.index0()) % 7
    }
}

/// A single calendar date together with its contribution count
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Day {
    date: Date,
    count: u32,
}

impl Day {
    pub(crate) fn new(date: Date, count: u32) -> Day {
        Day { date, count }
    }

    pub(crate) fn date(&self) -> Date {
        self.date
    }

    pub(crate) fn count(&self) -> u32 {
        self.count
    }

    pub(crate) fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub(crate) fn month(&self) -> Month {
        self.date.month()
    }

    pub(crate) fn day_of_month(&self) -> u8 {
        self.date.day()
    }
}

/// Returns the `weeks * 7` consecutive days ending on `today`, oldest first,
/// each counted with `source`.
///
/// All arithmetic is done on calendar dates, so the result never skips or
/// repeats a day around daylight-saving changes.
pub(super) fn date_range<S: CountSource>(
    today: Date,
    weeks: usize,
    source: &S,
) -> Result<Vec<Day>, LayoutError> {
    if weeks == 0 {
        return Err(LayoutError::ZeroWeeks);
    }
    let total_days = weeks.saturating_mul(DAYS_IN_WEEK);
    let start = i64::try_from(total_days - 1)
        .ok()
        .and_then(|back| today.checked_sub(Duration::days(back)))
        .ok_or(LayoutError::DateOutOfRange {
            today,
            days: total_days,
        })?;
    let days = successors(Some(start), |&d| d.next_day())
        .take(total_days)
        .map(|date| Day::new(date, source.count(date)))
        .collect::<Vec<_>>();
    // `today` is representable, so walking forwards from `start` always
    // reaches it
    debug_assert_eq!(days.len(), total_days, "date range should be complete");
    Ok(days)
}
