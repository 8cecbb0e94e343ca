use std::time::Duration;

use crate::clock::Clock;
use crate::error::BenchError;

/// Runs a body `loops` times per trial for `repeat` trials.
#[derive(Debug, Clone)]
pub struct Timer<C> {
    clock: C,
    loops: usize,
    repeat: usize,
}

impl<C: Clock> Timer<C> {
    pub fn new(clock: C, loops: usize, repeat: usize) -> Result<Self, BenchError> {
        if loops == 0 {
            return Err(BenchError::InvalidTiming(
                "loops must be greater than zero".into(),
            ));
        }
        if repeat == 0 {
            return Err(BenchError::InvalidTiming(
                "repeat must be greater than zero".into(),
            ));
        }
        Ok(Self {
            clock,
            loops,
            repeat,
        })
    }

    pub fn loops(&self) -> usize {
        self.loops
    }

    pub fn repeat(&self) -> usize {
        self.repeat
    }

    /// Elapsed time of each trial, in trial order.
    pub fn trials<F>(&self, mut body: F) -> Result<Vec<Duration>, BenchError>
    where
        F: FnMut() -> Result<(), BenchError>,
    {
        let mut trials = Vec::with_capacity(self.repeat);
        for _ in 0..self.repeat {
            let start = self.clock.now();
            for _ in 0..self.loops {
                body()?;
            }
            trials.push(self.clock.now().saturating_sub(start));
        }
        Ok(trials)
    }

    /// Fastest trial.
    pub fn min_of<F>(&self, body: F) -> Result<Duration, BenchError>
    where
        F: FnMut() -> Result<(), BenchError>,
    {
        let trials = self.trials(body)?;
        Ok(trials.into_iter().min().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::MapError;

    #[test]
    fn rejects_zero_loops_or_repeat() {
        assert!(matches!(
            Timer::new(ManualClock::new(), 0, 3),
            Err(BenchError::InvalidTiming(_))
        ));
        assert!(matches!(
            Timer::new(ManualClock::new(), 3, 0),
            Err(BenchError::InvalidTiming(_))
        ));
    }

    #[test]
    fn constant_body_gives_exact_minimum_for_any_repeat() {
        for repeat in 1..=5 {
            let clock = ManualClock::new();
            let handle = clock.clone();
            let timer = Timer::new(clock, 4, repeat).unwrap();
            let elapsed = timer
                .min_of(|| {
                    handle.advance(Duration::from_millis(500));
                    Ok(())
                })
                .unwrap();
            assert_eq!(elapsed, Duration::from_secs(2));
        }
    }

    #[test]
    fn minimum_ignores_slow_trials() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let timer = Timer::new(clock, 1, 4).unwrap();
        let mut costs = [5_u64, 3, 7, 4].into_iter();
        let trials = timer
            .trials(|| {
                handle.advance(Duration::from_secs(costs.next().unwrap_or(0)));
                Ok(())
            })
            .unwrap();
        assert_eq!(trials.len(), 4);
        assert_eq!(trials.iter().min(), Some(&Duration::from_secs(3)));
    }

    #[test]
    fn body_failure_stops_timing() {
        let timer = Timer::new(ManualClock::new(), 10, 10).unwrap();
        let mut calls = 0;
        let result = timer.min_of(|| {
            calls += 1;
            Err(MapError::Empty.into())
        });
        assert!(matches!(result, Err(BenchError::Map(MapError::Empty))));
        assert_eq!(calls, 1);
    }
}
