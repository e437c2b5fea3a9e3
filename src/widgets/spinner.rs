//! Tick-driven spinner.

use crate::core::style::Style;

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Interval at which callers are expected to deliver ticks.
pub const SPINNER_INTERVAL_MS: u64 = 100;

/// A spinner with no thread of its own; the owner advances it on each tick message.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spinner {
    frame: usize,
    style: Style,
}

impl Spinner {
    pub fn new(style: Style) -> Self {
        Self { frame: 0, style }
    }

    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn view(&self) -> String {
        self.style.paint(SPINNER_FRAMES[self.frame])
    }
}

#[cfg(test)]
mod tests {
    use super::{Spinner, SPINNER_FRAMES};
    use crate::core::style::Style;

    #[test]
    fn ticks_cycle_through_frames() {
        let mut spinner = Spinner::new(Style::new());
        assert_eq!(spinner.view(), SPINNER_FRAMES[0]);
        for _ in 0..SPINNER_FRAMES.len() {
            spinner.tick();
        }
        assert_eq!(spinner.frame(), 0);
        spinner.tick();
        assert_eq!(spinner.view(), SPINNER_FRAMES[1]);
    }
}
