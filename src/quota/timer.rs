use std::time::{Duration, Instant};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy)]
enum State {
    /// Never started, or stopped without being started.
    Invalid,
    Started(Instant),
    Ended { start: Instant, end: Instant },
}

/// Measures wall-clock time between `start` and `stop`, keeping only the latest measurement.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    state: State,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self {
            state: State::Invalid,
        }
    }

    /// Starts (or restarts) timing, discarding any previous measurement.
    pub fn start(&mut self) {
        self.state = State::Started(Instant::now());
    }

    /// Stops timing. Stopping a timer that is not running invalidates it.
    pub fn stop(&mut self) -> Result<()> {
        let end = Instant::now();
        match self.state {
            State::Started(start) => {
                self.state = State::Ended { start, end };
                Ok(())
            }
            _ => {
                self.state = State::Invalid;
                Err(Error::Timer("can't stop a timer that hasn't been started"))
            }
        }
    }

    /// Time between the most recent `start` and `stop`.
    pub fn read(&self) -> Result<Duration> {
        match self.state {
            State::Ended { start, end } => Ok(end - start),
            _ => Err(Error::Timer(
                "can't read a timer that has not been started and then stopped",
            )),
        }
    }

    pub fn read_millis(&self) -> Result<u128> {
        Ok(self.read()?.as_millis())
    }
}
