use crate::consts::{
    LEVEL_EMPTY_BELOW, LEVEL_GOOD_BELOW, LEVEL_LOW_BELOW, LEVEL_MEDIUM_BELOW, LEVEL_VERY_LOW_BELOW,
};

/// Discrete fill bucket, ordered from most urgent to fullest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FillStatus {
    Empty,
    VeryLow,
    Low,
    Medium,
    Good,
    Full,
}

impl FillStatus {
    /// Every status, in ascending fill order.
    pub const ALL: [FillStatus; 6] = [
        Self::Empty,
        Self::VeryLow,
        Self::Low,
        Self::Medium,
        Self::Good,
        Self::Full,
    ];

    /// Bucket a level percentage.
    pub fn from_level(level: f64) -> Self {
        if level < LEVEL_EMPTY_BELOW {
            Self::Empty
        } else if level < LEVEL_VERY_LOW_BELOW {
            Self::VeryLow
        } else if level < LEVEL_LOW_BELOW {
            Self::Low
        } else if level < LEVEL_MEDIUM_BELOW {
            Self::Medium
        } else if level < LEVEL_GOOD_BELOW {
            Self::Good
        } else {
            Self::Full
        }
    }

    /// Overlay color (RGB) used when drawing this status.
    pub fn color(self) -> [u8; 3] {
        match self {
            Self::Empty => [255, 0, 0],
            Self::VeryLow => [255, 100, 0],
            Self::Low => [255, 165, 0],
            Self::Medium => [255, 255, 0],
            Self::Good => [100, 255, 100],
            Self::Full => [0, 255, 0],
        }
    }
}

impl std::fmt::Display for FillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty - refill now"),
            Self::VeryLow => write!(f, "Very low"),
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::Good => write!(f, "Good"),
            Self::Full => write!(f, "Full"),
        }
    }
}
