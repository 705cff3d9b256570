use std::time::{Duration, Instant};

/// Monotonic time source for the simulation, measured from session start.
pub enum FrameClock {
    Real { start: Instant },
    /// Advances by a constant period per tick; used for scripted runs.
    Fixed { period: Duration, elapsed: Duration },
}

impl FrameClock {
    pub fn real() -> Self {
        FrameClock::Real { start: Instant::now() }
    }

    pub fn fixed(period: Duration) -> Self {
        FrameClock::Fixed { period, elapsed: Duration::ZERO }
    }

    pub fn now(&self) -> Duration {
        match self {
            FrameClock::Real { start } => start.elapsed(),
            FrameClock::Fixed { elapsed, .. } => *elapsed,
        }
    }

    /// Moves to the next frame and returns its timestamp.
    pub fn tick(&mut self) -> Duration {
        if let FrameClock::Fixed { period, elapsed } = self {
            *elapsed += *period;
        }
        self.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances_one_period_per_tick() {
        let mut clock = FrameClock::fixed(Duration::from_millis(16));
        assert_eq!(clock.now(), Duration::ZERO);
        clock.tick();
        clock.tick();
        assert_eq!(clock.tick(), Duration::from_millis(48));
    }

    #[test]
    fn real_clock_never_goes_backwards() {
        let mut clock = FrameClock::real();
        let first = clock.now();
        assert!(clock.tick() >= first);
    }
}
