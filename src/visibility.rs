//! Settings surface / status indicator visibility
//!
//! Exactly one of the two is shown at any time.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Settings surface shown, status indicator hidden
    #[default]
    OverlayVisible,
    /// Settings surface hidden, status indicator shown
    StatusIndicatorVisible,
}

impl Visibility {
    pub fn toggled(self) -> Self {
        match self {
            Visibility::OverlayVisible => Visibility::StatusIndicatorVisible,
            Visibility::StatusIndicatorVisible => Visibility::OverlayVisible,
        }
    }

    pub fn settings_shown(self) -> bool {
        self == Visibility::OverlayVisible
    }

    pub fn indicator_shown(self) -> bool {
        self == Visibility::StatusIndicatorVisible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_is_identity() {
        for start in [Visibility::OverlayVisible, Visibility::StatusIndicatorVisible] {
            assert_eq!(start.toggled().toggled(), start);
            assert_ne!(start.toggled(), start);
        }
    }

    #[test]
    fn test_exactly_one_shown() {
        for state in [Visibility::OverlayVisible, Visibility::StatusIndicatorVisible] {
            assert_ne!(state.settings_shown(), state.indicator_shown());
        }
    }

    #[test]
    fn test_starts_with_settings_shown() {
        assert!(Visibility::default().settings_shown());
    }
}
