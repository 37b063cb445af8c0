use crate::engine::TimerSnapshot;

/// A checkpoint holding the cumulative elapsed time when it was marked.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Lap {
    pub number: u32,
    pub absolute_ms: u64,
}

/// Laps with the shortest and longest interval. Both are `None` with fewer
/// than two laps.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct LapExtremes {
    pub best: Option<Lap>,
    pub worst: Option<Lap>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LapMark {
    Best,
    Worst,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LapRow {
    pub lap: Lap,
    pub interval_ms: u64,
    pub mark: Option<LapMark>,
}

/// Append-only lap sequence for the current run.
#[derive(Debug, Default)]
pub struct LapLog {
    laps: Vec<Lap>,
}

impl LapLog {
    pub fn new() -> Self {
        Self { laps: Vec::new() }
    }

    /// Appends a lap at the snapshot's elapsed time. Ignored while paused.
    pub fn record(&mut self, timer: TimerSnapshot) -> Option<Lap> {
        if !timer.running {
            return None;
        }
        let lap = Lap {
            number: self.laps.len() as u32 + 1,
            absolute_ms: timer.elapsed_ms,
        };
        self.laps.push(lap);
        Some(lap)
    }

    pub fn clear(&mut self) {
        self.laps.clear();
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }
}

/// Time between each lap and the one before it (or the start, for lap 1).
pub fn intervals(laps: &[Lap]) -> impl Iterator<Item = u64> + '_ {
    laps.iter().scan(0u64, |prev, lap| {
        let interval = lap.absolute_ms.saturating_sub(*prev);
        *prev = lap.absolute_ms;
        Some(interval)
    })
}

/// Finds the fastest and slowest laps.
///
/// Equal intervals resolve like a stable ascending sort: the earliest of the
/// shortest laps is best, the latest of the longest laps is worst.
pub fn best_and_worst_lap(laps: &[Lap]) -> LapExtremes {
    if laps.len() < 2 {
        return LapExtremes::default();
    }
    let timed = || laps.iter().copied().zip(intervals(laps));
    // min_by_key keeps the first minimum, max_by_key the last maximum.
    LapExtremes {
        best: timed().min_by_key(|&(_, interval)| interval).map(|(lap, _)| lap),
        worst: timed().max_by_key(|&(_, interval)| interval).map(|(lap, _)| lap),
    }
}

pub fn lap_rows(laps: &[Lap]) -> Vec<LapRow> {
    let extremes = best_and_worst_lap(laps);
    laps.iter()
        .copied()
        .zip(intervals(laps))
        .map(|(lap, interval_ms)| {
            let mark = if extremes.best.map(|b| b.number) == Some(lap.number) {
                Some(LapMark::Best)
            } else if extremes.worst.map(|w| w.number) == Some(lap.number) {
                Some(LapMark::Worst)
            } else {
                None
            };
            LapRow {
                lap,
                interval_ms,
                mark,
            }
        })
        .collect()
}
