use super::days::{Day, DAYS_IN_WEEK};
use time::Weekday;

#[derive(Clone, Debug, Eq, PartialEq)]
// Invariant: Once returned from `bucket()`, non-empty and ascending by date,
// with at most one day per weekday
pub(crate) struct Week(Vec<Day>);

impl Week {
    fn new() -> Week {
        Week(Vec::with_capacity(DAYS_IN_WEEK))
    }

    /// The earliest day in the week
    pub(crate) fn first(&self) -> &Day {
        self.0.first().expect("Week should contain at least one day")
    }

    pub(crate) fn days(&self) -> &[Day] {
        &self.0
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Splits `days` into weeks, starting a new week at every `first_weekday`.
///
/// The first and last weeks are short whenever `days` does not begin on
/// `first_weekday` or does not end on the day before it.
pub(super) fn bucket<I>(days: I, first_weekday: Weekday) -> Vec<Week>
where
    I: IntoIterator<Item = Day>,
{
    let mut weeks = Vec::new();
    let mut current = Week::new();
    for day in days {
        if day.weekday() == first_weekday && !current.is_empty() {
            tracing::trace!(
                start = %current.first().date(),
                len = current.len(),
                "flushing week"
            );
            weeks.push(std::mem::replace(&mut current, Week::new()));
        }
        current.0.push(day);
    }
    if !current.is_empty() {
        weeks.push(current);
    }
    weeks
}
