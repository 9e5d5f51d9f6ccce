//! Cancel-input handling and app dismissal.

use crate::ring::{AmbientPatterns, RingOwnership};

/// Button collaborator contract. Reports a latched "cancel" press that
/// stays pending until cleared.
pub trait CancelInput {
    /// Whether a cancel press is pending.
    fn cancel_pressed(&mut self) -> bool;

    /// Discard all pending input.
    fn clear(&mut self);
}

/// Maps the cancel input onto "give the ring back and exit to the
/// background".
pub struct InputController<B: CancelInput> {
    buttons: B,
}

impl<B: CancelInput> InputController<B> {
    pub fn new(buttons: B) -> Self {
        Self { buttons }
    }

    /// Consume a pending cancel press, if any.
    ///
    /// Returns `true` when dismissal was requested; the caller must then
    /// skip all remaining per-tick work for this frame. Releases the
    /// ring on the way out so the ambient patterns resume.
    pub fn handle_cancel<P: AmbientPatterns>(
        &mut self,
        ownership: &mut RingOwnership,
        patterns: &mut P,
    ) -> bool {
        if !self.buttons.cancel_pressed() {
            return false;
        }
        self.buttons.clear();
        if ownership.is_claimed() {
            ownership.release(patterns);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeButtons {
        pressed: bool,
        cleared: u32,
    }

    impl CancelInput for FakeButtons {
        fn cancel_pressed(&mut self) -> bool {
            self.pressed
        }

        fn clear(&mut self) {
            self.pressed = false;
            self.cleared += 1;
        }
    }

    #[derive(Default)]
    struct CountingPatterns {
        disables: u32,
        enables: u32,
    }

    impl AmbientPatterns for CountingPatterns {
        fn disable(&mut self) {
            self.disables += 1;
        }

        fn enable(&mut self) {
            self.enables += 1;
        }
    }

    #[test]
    fn test_no_press_is_a_noop() {
        let mut input = InputController::new(FakeButtons {
            pressed: false,
            cleared: 0,
        });
        let mut ownership = RingOwnership::new();
        let mut patterns = CountingPatterns::default();

        assert!(!input.handle_cancel(&mut ownership, &mut patterns));
        assert_eq!(input.buttons.cleared, 0);
    }

    #[test]
    fn test_cancel_releases_claimed_ring_and_clears_input() {
        let mut input = InputController::new(FakeButtons {
            pressed: true,
            cleared: 0,
        });
        let mut ownership = RingOwnership::new();
        let mut patterns = CountingPatterns::default();
        ownership.claim(&mut patterns);

        assert!(input.handle_cancel(&mut ownership, &mut patterns));
        assert_eq!(input.buttons.cleared, 1);
        assert_eq!(patterns.enables, 1);
        assert!(!ownership.is_claimed());
    }

    #[test]
    fn test_cancel_before_claim_emits_no_enable() {
        let mut input = InputController::new(FakeButtons {
            pressed: true,
            cleared: 0,
        });
        let mut ownership = RingOwnership::new();
        let mut patterns = CountingPatterns::default();

        assert!(input.handle_cancel(&mut ownership, &mut patterns));
        assert_eq!(patterns.enables, 0);
    }
}
