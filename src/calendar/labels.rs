use super::weeks::Week;
use time::Month;

/// A month name to be drawn above the week column at `week_index`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthLabel {
    pub(crate) name: &'static str,
    pub(crate) week_index: usize,
}

/// Labels every week whose first day falls within the first seven days of a
/// month.
///
/// This is an approximation of "the week in which the month starts": a short
/// leading week can cause the same month to be labelled on two consecutive
/// weeks, and both labels are kept.
pub(super) fn place_labels(weeks: &[Week]) -> Vec<MonthLabel> {
    weeks
        .iter()
        .enumerate()
        .filter_map(|(week_index, week)| {
            let lead = week.first();
            (lead.day_of_month() <= 7).then(|| MonthLabel {
                name: short_name(lead.month()),
                week_index,
            })
        })
        .collect()
}

fn short_name(month: Month) -> &'static str {
    use Month::*;
    match month {
        January => "Jan",
        February => "Feb",
        March => "Mar",
        April => "Apr",
        May => "May",
        June => "Jun",
        July => "Jul",
        August => "Aug",
        September => "Sep",
        October => "Oct",
        November => "Nov",
        December => "Dec",
    }
}
