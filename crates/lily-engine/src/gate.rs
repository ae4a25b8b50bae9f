//! Gate counter for overlapping notes.

/// Number of held notes. Idle at zero, active above.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gate {
    held: u16,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A note was pressed.
    pub fn on(&mut self) {
        self.held = self.held.saturating_add(1);
    }

    /// A note was released. No-op when idle.
    pub fn off(&mut self) {
        self.held = self.held.saturating_sub(1);
    }

    /// Forget all held notes.
    pub fn reset(&mut self) {
        self.held = 0;
    }

    pub fn is_active(&self) -> bool {
        self.held > 0
    }

    pub fn held(&self) -> u16 {
        self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_notes_count_up_and_down() {
        let mut g = Gate::new();
        g.on();
        g.on();
        assert_eq!(g.held(), 2);
        g.off();
        assert!(g.is_active());
        g.off();
        assert!(!g.is_active());
    }

    #[test]
    fn extra_note_offs_floor_at_zero() {
        let mut g = Gate::new();
        g.on();
        for _ in 0..5 {
            g.off();
        }
        assert_eq!(g.held(), 0);
        g.on();
        assert_eq!(g.held(), 1);
    }

    #[test]
    fn reset_goes_idle() {
        let mut g = Gate::new();
        g.on();
        g.on();
        g.reset();
        assert_eq!(g, Gate::new());
    }
}
