use serde::Serialize;
use std::time::{Duration, Instant};

/// How often the phase of an animated block moves forward.
pub const PHASE_INTERVAL: Duration = Duration::from_millis(50);

/// How much the phase moves forward on every interval.
pub const PHASE_INCREMENT: f64 = 0.02;

/// A cyclic offset in `[0, 1)` used to shift gradient sampling over time.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize)]
pub struct Phase(f64);

impl Phase {
    pub const ZERO: Phase = Phase(0.0);

    /// Build a phase, wrapping the value into `[0, 1)`.
    pub fn new(value: f64) -> Self {
        Self(wrap_unit(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

fn wrap_unit(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(1.0);
    // rem_euclid rounds tiny negative values up to exactly 1.0
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// Move `phase` forward by `elapsed_intervals` steps of `increment`, wrapping around 1.
pub fn advance_phase(phase: f64, increment: f64, elapsed_intervals: u64) -> f64 {
    wrap_unit(phase + increment * elapsed_intervals as f64)
}

/// The state of a ticker after being polled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollableState {
    Modified,
    Unmodified,
    Done,
}

/// Owned phase clock for a single animated block.
///
/// The ticker doesn't spawn anything: whoever renders the block polls it and
/// feeds [PhaseTicker::phase] into the frame computation. Dropping the ticker
/// is all it takes to tear it down.
#[derive(Debug)]
pub struct PhaseTicker {
    phase: Phase,
    interval: Duration,
    increment: f64,
    last_tick: Option<Instant>,
    cancelled: bool,
}

impl PhaseTicker {
    pub fn new() -> Self {
        Self::with_rate(PHASE_INTERVAL, PHASE_INCREMENT)
    }

    pub fn with_rate(interval: Duration, increment: f64) -> Self {
        Self {
            phase: Phase::ZERO,
            interval: interval.max(Duration::from_millis(1)),
            increment,
            last_tick: None,
            cancelled: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Advance the phase by however many whole intervals elapsed since the last tick.
    ///
    /// The first poll only anchors the clock. Partial intervals are carried
    /// over to the next poll.
    pub fn poll(&mut self, now: Instant) -> PollableState {
        if self.cancelled {
            return PollableState::Done;
        }
        let Some(last_tick) = self.last_tick else {
            self.last_tick = Some(now);
            return PollableState::Modified;
        };

        let elapsed = now.saturating_duration_since(last_tick);
        let intervals = elapsed.as_nanos() / self.interval.as_nanos();
        if intervals == 0 {
            return PollableState::Unmodified;
        }

        let intervals = u64::try_from(intervals).unwrap_or(u64::MAX);
        self.phase = Phase::new(advance_phase(self.phase.value(), self.increment, intervals));
        let consumed = self.interval.as_nanos().saturating_mul(intervals as u128);
        self.last_tick = Some(last_tick + Duration::from_nanos(u64::try_from(consumed).unwrap_or(u64::MAX)));
        PollableState::Modified
    }

    /// When the next interval boundary falls, if the ticker is running.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.cancelled {
            return None;
        }
        self.last_tick.map(|tick| tick + self.interval)
    }

    /// Stop advancing. Further polls report [PollableState::Done].
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Go back to phase zero and re-anchor on the next poll.
    pub fn reset(&mut self) {
        self.phase = Phase::ZERO;
        self.last_tick = None;
        self.cancelled = false;
    }
}

impl Default for PhaseTicker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn approx(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn advance_wraps_past_one() {
        assert!(approx(advance_phase(0.99, 0.02, 1), 0.01));
    }

    #[rstest]
    #[case(0.0, 0.02, 0, 0.0)]
    #[case(0.5, 0.02, 10, 0.7)]
    #[case(0.5, 0.25, 2, 0.0)]
    #[case(0.1, -0.2, 1, 0.9)]
    fn advance(#[case] phase: f64, #[case] increment: f64, #[case] intervals: u64, #[case] expected: f64) {
        let next = advance_phase(phase, increment, intervals);
        assert!(approx(next, expected), "{next} != {expected}");
        assert!((0.0..1.0).contains(&next));
    }

    #[test]
    fn phase_wraps_on_construction() {
        assert!(approx(Phase::new(1.25).value(), 0.25));
        assert!(approx(Phase::new(-0.25).value(), 0.75));
        assert_eq!(Phase::new(f64::NAN), Phase::ZERO);
        assert_eq!(Phase::new(-1e-20), Phase::ZERO);
    }

    #[test]
    fn first_poll_anchors() {
        let mut ticker = PhaseTicker::new();
        let start = Instant::now();
        assert_eq!(ticker.poll(start), PollableState::Modified);
        assert_eq!(ticker.phase(), Phase::ZERO);
        assert_eq!(ticker.poll(start + Duration::from_millis(10)), PollableState::Unmodified);
    }

    #[test]
    fn poll_counts_whole_intervals() {
        let mut ticker = PhaseTicker::new();
        let start = Instant::now();
        ticker.poll(start);

        assert_eq!(ticker.poll(start + Duration::from_millis(120)), PollableState::Modified);
        assert!(approx(ticker.phase().value(), 0.04));

        // the 20ms left over from the previous poll count towards the next interval
        assert_eq!(ticker.poll(start + Duration::from_millis(150)), PollableState::Modified);
        assert!(approx(ticker.phase().value(), 0.06));
        assert_eq!(ticker.next_deadline(), Some(start + Duration::from_millis(200)));
    }

    #[test]
    fn cancelled_ticker_is_done() {
        let mut ticker = PhaseTicker::new();
        let start = Instant::now();
        ticker.poll(start);
        ticker.cancel();
        assert_eq!(ticker.poll(start + Duration::from_secs(1)), PollableState::Done);
        assert_eq!(ticker.phase(), Phase::ZERO);
        assert_eq!(ticker.next_deadline(), None);
    }

    #[test]
    fn reset_goes_back_to_zero() {
        let mut ticker = PhaseTicker::new();
        let start = Instant::now();
        ticker.poll(start);
        ticker.poll(start + Duration::from_millis(500));
        ticker.cancel();
        ticker.reset();
        assert_eq!(ticker.phase(), Phase::ZERO);
        assert!(!ticker.is_cancelled());
        assert_eq!(ticker.poll(start), PollableState::Modified);
    }
}
