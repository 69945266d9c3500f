//! Consecutive-repeat suppression.
//!
//! Frames are keyed on their resolved function name only. Two consecutive
//! frames of the same function are treated as duplicates even when their
//! payloads differ, so a burst of radar updates collapses to its first frame
//! until some other function interleaves.

/// State carried across frames for one stream session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoderState {
    /// Name of the last function that passed the suppressor.
    pub last_function: Option<&'static str>,
}

/// Drops a frame when its function matches the previously admitted one.
#[derive(Debug, Clone, Default)]
pub struct RepeatSuppressor {
    state: DecoderState,
}

impl RepeatSuppressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the frame should proceed, recording `name` as the
    /// last admitted function. Returns `false` for a repeat; state is left
    /// unchanged.
    pub fn admit(&mut self, name: &'static str) -> bool {
        if self.state.last_function == Some(name) {
            return false;
        }
        self.state.last_function = Some(name);
        true
    }

    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    /// Forget the last admitted function, as on a session restart.
    pub fn reset(&mut self) {
        self.state = DecoderState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_a_b_a_admits_first_third_and_fourth() {
        let mut s = RepeatSuppressor::new();
        let admitted: Vec<bool> = ["A", "A", "B", "A"].into_iter().map(|n| s.admit(n)).collect();
        assert_eq!(admitted, [true, false, true, true]);
    }

    #[test]
    fn starts_empty() {
        let s = RepeatSuppressor::new();
        assert_eq!(s.state().last_function, None);
    }

    #[test]
    fn repeat_leaves_state_untouched() {
        let mut s = RepeatSuppressor::new();
        assert!(s.admit("RadarFront"));
        assert!(!s.admit("RadarFront"));
        assert_eq!(s.state().last_function, Some("RadarFront"));
    }

    #[test]
    fn reset_readmits_last_function() {
        let mut s = RepeatSuppressor::new();
        assert!(s.admit("ACState"));
        s.reset();
        assert!(s.admit("ACState"));
    }
}
