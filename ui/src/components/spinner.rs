// Busy state for a submit control. While busy the spinner is visible, the
// label is hidden, and the control refuses input; all three always move
// together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpinnerButton {
    busy: bool,
}

impl SpinnerButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles the busy state. Setting the current state again is a no-op.
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn spinner_visible(&self) -> bool {
        self.busy
    }

    pub fn label_visible(&self) -> bool {
        !self.busy
    }

    pub fn accepts_input(&self) -> bool {
        !self.busy
    }
}
