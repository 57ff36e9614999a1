use serde::{Deserialize, Serialize};

/// One stage of the four-phase breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Inhale,
    HoldIn,
    Exhale,
    HoldOut,
}

impl Phase {
    /// Next phase in cycle order: Inhale -> HoldIn -> Exhale -> HoldOut -> Inhale.
    pub fn next(self) -> Phase {
        match self {
            Phase::Inhale => Phase::HoldIn,
            Phase::HoldIn => Phase::Exhale,
            Phase::Exhale => Phase::HoldOut,
            Phase::HoldOut => Phase::Inhale,
        }
    }

    /// Whether advancing past this phase closes a full cycle.
    pub fn is_cycle_end(self) -> bool {
        self == Phase::HoldOut
    }

    /// Display label for presentation collaborators.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Inhale => "Inhale",
            Phase::HoldIn => "Hold",
            Phase::Exhale => "Exhale",
            Phase::HoldOut => "Rest",
        }
    }

    /// All phases in cycle order, starting from Inhale.
    pub const CYCLE: [Phase; 4] = [Phase::Inhale, Phase::HoldIn, Phase::Exhale, Phase::HoldOut];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_order_is_fixed() {
        assert_eq!(Phase::Inhale.next(), Phase::HoldIn);
        assert_eq!(Phase::HoldIn.next(), Phase::Exhale);
        assert_eq!(Phase::Exhale.next(), Phase::HoldOut);
        assert_eq!(Phase::HoldOut.next(), Phase::Inhale);
    }

    #[test]
    fn four_steps_return_to_start() {
        for start in Phase::CYCLE {
            let mut p = start;
            for _ in 0..4 {
                p = p.next();
            }
            assert_eq!(p, start);
        }
    }

    #[test]
    fn only_hold_out_ends_cycle() {
        assert!(Phase::HoldOut.is_cycle_end());
        assert!(!Phase::Inhale.is_cycle_end());
        assert!(!Phase::HoldIn.is_cycle_end());
        assert!(!Phase::Exhale.is_cycle_end());
    }
}
