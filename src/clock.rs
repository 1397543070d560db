//! Clock display fragment.
//!
//! Writes the current time in the configured zone (Mountain Time,
//! `America/Denver`, by default) as zero-padded 24-hour `HH:MM` into the clock
//! element once at startup. The browser's `Intl` formatter does the zone
//! conversion; this module only validates its output and writes it. There is
//! no update loop and no recovery: a missing element fails this fragment and
//! nothing else.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use crate::config::ClockConfig;
use crate::error::HostError;

/// Hour and minute on a wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    pub hour: u32,
    pub minute: u32,
}

impl WallTime {
    /// Parse `HH:MM` as produced by a 24-hour locale formatter.
    ///
    /// Some engines ignore `hourCycle` and report midnight as `24`; that is
    /// folded to `00`.
    #[must_use]
    pub fn parse(formatted: &str) -> Option<Self> {
        let (hour, minute) = formatted.trim().split_once(':')?;
        let (Ok(hour), Ok(minute)) = (hour.trim().parse::<u32>(), minute.trim().get(..2)?.parse::<u32>()) else {
            return None;
        };
        let hour = if hour == 24 { 0 } else { hour };
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }
}

/// Source of the current wall-clock time in a named zone.
pub trait ZonedClock {
    fn now_in_zone(&self, time_zone: &str) -> Result<WallTime, HostError>;
}

/// Anything that can set the text content of an element by id.
pub trait TextTarget {
    fn set_text_by_id(&self, id: &str, text: &str) -> Result<(), HostError>;
}

/// Write the current time into the configured element.
pub fn render_clock<C, T>(clock: &C, target: &T, config: &ClockConfig) -> Result<String, HostError>
where
    C: ZonedClock + ?Sized,
    T: TextTarget + ?Sized,
{
    let text = format_clock(clock.now_in_zone(&config.time_zone)?);
    target.set_text_by_id(&config.element_id, &text)?;
    log::debug!("clock set to {text} ({})", config.time_zone);
    Ok(text)
}

#[must_use]
pub fn format_clock(time: WallTime) -> String {
    format!("{:02}:{:02}", time.hour, time.minute)
}
