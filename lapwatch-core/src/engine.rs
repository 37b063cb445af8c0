/// Time added to the elapsed counter by every tick, in milliseconds.
pub const TICK_MS: u64 = 10;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TimerState {
    #[default]
    Paused,
    Running,
}

/// Read-only view of the engine handed to the session store and renderers.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TimerSnapshot {
    pub elapsed_ms: u64,
    pub running: bool,
}

/// Tick-driven elapsed time counter.
///
/// Time only moves through [`TimerEngine::tick`], so `elapsed_ms` is always a
/// whole multiple of the tick quantum and can never decrease except via
/// [`TimerEngine::reset`].
#[derive(Debug)]
pub struct TimerEngine {
    state: TimerState,
    elapsed_ms: u64,
    tick_ms: u64,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    pub fn new() -> Self {
        Self::with_tick_ms(TICK_MS)
    }

    pub fn with_tick_ms(tick_ms: u64) -> Self {
        Self {
            state: TimerState::Paused,
            elapsed_ms: 0,
            tick_ms: tick_ms.max(1),
        }
    }

    /// Returns `true` if the engine went from paused to running.
    pub fn start(&mut self) -> bool {
        if self.state == TimerState::Running {
            return false;
        }
        self.state = TimerState::Running;
        log::debug!("timer started at {} ms", self.elapsed_ms);
        true
    }

    /// Returns `true` if the engine went from running to paused.
    pub fn pause(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.state = TimerState::Paused;
        log::debug!("timer paused at {} ms", self.elapsed_ms);
        true
    }

    pub fn reset(&mut self) {
        self.state = TimerState::Paused;
        self.elapsed_ms = 0;
    }

    /// Advances by one quantum while running and returns the elapsed time.
    pub fn tick(&mut self) -> u64 {
        if self.state == TimerState::Running {
            self.elapsed_ms = self.elapsed_ms.saturating_add(self.tick_ms);
        }
        self.elapsed_ms
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            elapsed_ms: self.elapsed_ms,
            running: self.is_running(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_basic() {
        let mut engine = TimerEngine::new();
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.elapsed_ms(), 0);

        assert!(engine.start());
        assert_eq!(engine.tick(), 10);
        assert_eq!(engine.tick(), 20);

        assert!(engine.pause());
        assert_eq!(engine.tick(), 20); // Paused ticks are ignored

        engine.start();
        engine.tick();
        assert_eq!(engine.elapsed_ms(), 30);

        engine.reset();
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.elapsed_ms(), 0);
    }

    #[test]
    fn test_start_pause_idempotent() {
        let mut engine = TimerEngine::new();
        assert!(!engine.pause());
        assert!(engine.start());
        assert!(!engine.start());
        assert!(engine.is_running());
        assert!(engine.pause());
        assert!(!engine.pause());
    }

    #[test]
    fn test_reset_while_running() {
        let mut engine = TimerEngine::new();
        engine.start();
        engine.tick();
        engine.reset();
        assert_eq!(
            engine.snapshot(),
            TimerSnapshot {
                elapsed_ms: 0,
                running: false
            }
        );
    }

    #[test]
    fn test_custom_quantum() {
        let mut engine = TimerEngine::with_tick_ms(250);
        engine.start();
        engine.tick();
        engine.tick();
        assert_eq!(engine.elapsed_ms(), 500);

        assert_eq!(TimerEngine::with_tick_ms(0).tick_ms(), 1);
    }
}
