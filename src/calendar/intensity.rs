/// How strongly a day's cell is highlighted, from no activity to the maximum
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum IntensityLevel {
    None,
    Low,
    Medium,
    High,
    Max,
}

impl IntensityLevel {
    pub(crate) const ALL: [IntensityLevel; 5] = [
        IntensityLevel::None,
        IntensityLevel::Low,
        IntensityLevel::Medium,
        IntensityLevel::High,
        IntensityLevel::Max,
    ];

    pub(crate) fn index(self) -> u8 {
        match self {
            IntensityLevel::None => 0,
            IntensityLevel::Low => 1,
            IntensityLevel::Medium => 2,
            IntensityLevel::High => 3,
            IntensityLevel::Max => 4,
        }
    }
}

impl From<u32> for IntensityLevel {
    fn from(count: u32) -> IntensityLevel {
        match count {
            0 => IntensityLevel::None,
            1 => IntensityLevel::Low,
            2 => IntensityLevel::Medium,
            3 => IntensityLevel::High,
            _ => IntensityLevel::Max,
        }
    }
}
