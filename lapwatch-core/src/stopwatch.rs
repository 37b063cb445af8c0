use crate::engine::{TimerEngine, TimerSnapshot};
use crate::laps::{self, Lap, LapRow};
use crate::session::{Session, SessionId, SessionStore, ValidationError};

/// One engine and its session store, wired together.
///
/// `start`, `pause` and `toggle` report whether the running state changed so
/// the host can acquire or release its tick source.
#[derive(Debug, Default)]
pub struct Stopwatch {
    engine: TimerEngine,
    store: SessionStore,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(engine: TimerEngine) -> Self {
        Self {
            engine,
            store: SessionStore::new(),
        }
    }

    pub fn start(&mut self) -> bool {
        self.engine.start()
    }

    pub fn pause(&mut self) -> bool {
        self.engine.pause()
    }

    pub fn toggle(&mut self) -> bool {
        if self.engine.is_running() {
            self.engine.pause()
        } else {
            self.engine.start()
        }
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.store.clear_laps();
    }

    pub fn tick(&mut self) -> u64 {
        self.engine.tick()
    }

    pub fn lap(&mut self) -> Option<Lap> {
        self.store.record_lap(self.engine.snapshot())
    }

    /// Saving needs a paused run with time on the clock.
    pub fn can_save(&self) -> bool {
        !self.engine.is_running() && self.engine.elapsed_ms() > 0
    }

    pub fn save_session(&mut self, name: &str) -> Result<SessionId, ValidationError> {
        if !self.can_save() {
            return Err(ValidationError::NotReady);
        }
        self.store.save_current(name, self.engine.elapsed_ms())
    }

    pub fn delete_session(&mut self, id: SessionId) {
        self.store.delete_session(id);
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.engine.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.engine.elapsed_ms()
    }

    pub fn laps(&self) -> &[Lap] {
        self.store.laps()
    }

    pub fn lap_rows(&self) -> Vec<LapRow> {
        laps::lap_rows(self.store.laps())
    }

    pub fn sessions(&self) -> &[Session] {
        self.store.sessions()
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::laps::LapMark;

    fn run_ticks(sw: &mut Stopwatch, ticks: usize) {
        for _ in 0..ticks {
            sw.tick();
        }
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut sw = Stopwatch::new();
        sw.start();
        run_ticks(&mut sw, 5);
        sw.lap();
        sw.reset();
        assert_eq!(sw.elapsed_ms(), 0);
        assert!(!sw.is_running());
        assert!(sw.laps().is_empty());
    }

    #[test]
    fn test_lap_only_while_running() {
        let mut sw = Stopwatch::new();
        assert_eq!(sw.lap(), None);
        sw.start();
        run_ticks(&mut sw, 3);
        assert_eq!(sw.lap(), Some(Lap { number: 1, absolute_ms: 30 }));
        sw.pause();
        assert_eq!(sw.lap(), None);
        assert_eq!(sw.laps().len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut sw = Stopwatch::new();
        assert!(sw.toggle());
        assert!(sw.is_running());
        assert!(sw.toggle());
        assert!(!sw.is_running());
    }

    #[test]
    fn test_save_requires_paused_time() {
        let mut sw = Stopwatch::new();
        assert_eq!(sw.save_session("Empty"), Err(ValidationError::NotReady));

        sw.start();
        run_ticks(&mut sw, 10);
        assert!(!sw.can_save());
        assert_eq!(sw.save_session("Running"), Err(ValidationError::NotReady));

        sw.pause();
        assert!(sw.can_save());
        assert!(sw.save_session("Done").is_ok());
    }

    #[test]
    fn test_saved_session_unaffected_by_later_activity() {
        let mut sw = Stopwatch::new();
        sw.start();
        run_ticks(&mut sw, 50);
        sw.lap();
        run_ticks(&mut sw, 20);
        sw.lap();
        sw.pause();
        let id = sw.save_session("Run A").unwrap();

        sw.start();
        run_ticks(&mut sw, 100);
        sw.lap();
        sw.pause();
        sw.reset();

        let session = sw.store().get(id).unwrap();
        assert_eq!(session.total_ms(), 700);
        assert_eq!(
            session.laps(),
            &[
                Lap { number: 1, absolute_ms: 500 },
                Lap { number: 2, absolute_ms: 700 },
            ]
        );
    }

    #[test]
    fn test_lap_rows_highlight() {
        let mut sw = Stopwatch::new();
        sw.start();
        for ticks in [50, 20, 80] {
            run_ticks(&mut sw, ticks);
            sw.lap();
        }
        let marks: Vec<_> = sw.lap_rows().iter().map(|r| r.mark).collect();
        assert_eq!(marks, vec![None, Some(LapMark::Best), Some(LapMark::Worst)]);
    }
}
