use std::fmt::{Display, Formatter};
use std::time::Duration as StdDuration;

use humantime::format_duration;

pub mod average;
pub mod tracing;

/// Monotonic instant which displays its elapsed time in a human-readable form.
pub struct Instant(std::time::Instant);

impl Instant {
    pub fn now() -> Self {
        Self(std::time::Instant::now())
    }

    pub fn elapsed(&self) -> Elapsed {
        Elapsed(self.0.elapsed())
    }
}

pub struct Elapsed(StdDuration);

impl Display for Elapsed {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&format_duration(self.0).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_display_ok() {
        let elapsed = Elapsed(StdDuration::from_millis(1500));
        assert_eq!(elapsed.to_string(), "1s 500ms");
    }
}
