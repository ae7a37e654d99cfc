use crate::level::LevelReading;

/// Controller state, used for transition logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Measuring,
    Evaluating,
    NoAction,
    Replenishing,
    PostCheck,
}

impl std::fmt::Display for CycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Measuring => write!(f, "Measuring"),
            Self::Evaluating => write!(f, "Evaluating"),
            Self::NoAction => write!(f, "No action"),
            Self::Replenishing => write!(f, "Replenishing"),
            Self::PostCheck => write!(f, "Post-check"),
        }
    }
}

/// What happened during one cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum CycleOutcome {
    /// Measurement or dispensing could not proceed; retried next cycle.
    Abandoned { reason: String },
    /// Level was at or above the minimum.
    NoAction { reading: LevelReading },
    /// The dispenser ran. `after` is `None` when the post-check measurement failed.
    Replenished {
        before: LevelReading,
        after: Option<LevelReading>,
    },
}

impl CycleOutcome {
    pub fn replenished(&self) -> bool {
        matches!(self, Self::Replenished { .. })
    }

    /// The reading that drove the evaluation, if the cycle got that far.
    pub fn reading(&self) -> Option<&LevelReading> {
        match self {
            Self::Abandoned { .. } => None,
            Self::NoAction { reading } => Some(reading),
            Self::Replenished { before, .. } => Some(before),
        }
    }
}
