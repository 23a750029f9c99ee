use super::engine::LayoutError;
use std::num::NonZeroUsize;

/// Horizontal dimensions of the heatmap, in whatever unit the container width
/// is measured in
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ColumnMetrics {
    column_width: u16,
    gap: u16,
    /// Space to the left of the first column that is not available to weeks,
    /// e.g., for weekday labels
    label_reserve: u16,
}

impl ColumnMetrics {
    pub(crate) const fn new(
        column_width: u16,
        gap: u16,
        label_reserve: u16,
    ) -> Result<ColumnMetrics, LayoutError> {
        if column_width == 0 && gap == 0 {
            return Err(LayoutError::ZeroColumnPitch);
        }
        Ok(ColumnMetrics {
            column_width,
            gap,
            label_reserve,
        })
    }

    /// Distance from the start of one week column to the start of the next
    pub(crate) fn pitch(&self) -> u16 {
        self.column_width.saturating_add(self.gap)
    }
}

pub(crate) const DEFAULT_MIN_WEEKS: usize = 4;

pub(crate) const DEFAULT_MAX_WEEKS: usize = 52;

/// Inclusive range for the number of visible weeks
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WeekBounds {
    min: NonZeroUsize,
    max: NonZeroUsize,
}

impl WeekBounds {
    pub(crate) fn new(min: usize, max: usize) -> Result<WeekBounds, LayoutError> {
        match (NonZeroUsize::new(min), NonZeroUsize::new(max)) {
            (Some(lo), Some(hi)) if lo <= hi => Ok(WeekBounds { min: lo, max: hi }),
            _ => Err(LayoutError::InvalidWeekBounds { min, max }),
        }
    }
}

impl Default for WeekBounds {
    fn default() -> WeekBounds {
        WeekBounds {
            min: NonZeroUsize::new(DEFAULT_MIN_WEEKS).unwrap_or(NonZeroUsize::MIN),
            max: NonZeroUsize::new(DEFAULT_MAX_WEEKS).unwrap_or(NonZeroUsize::MAX),
        }
    }
}

/// Returns how many week columns fit in a container `container_width` wide.
///
/// `None` means the container has not been measured yet; both that and a
/// zero width produce the minimum.
pub(super) fn compute_weeks(
    container_width: Option<u16>,
    metrics: ColumnMetrics,
    bounds: WeekBounds,
) -> NonZeroUsize {
    let Some(width) = container_width.filter(|&w| w > 0) else {
        tracing::debug!(
            min = bounds.min.get(),
            "container width unavailable; using minimum week count"
        );
        return bounds.min;
    };
    let effective = width.saturating_sub(metrics.label_reserve);
    let raw = usize::from(effective / metrics.pitch());
    let weeks = NonZeroUsize::new(raw)
        .unwrap_or(NonZeroUsize::MIN)
        .clamp(bounds.min, bounds.max);
    tracing::debug!(width, raw, weeks = weeks.get(), "computed visible week count");
    weeks
}
