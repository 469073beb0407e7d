use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStatsSnapshot {
    pub attempts: u64,
    pub matches: u64,
    pub mismatches: u64,
}

#[derive(Debug, Default)]
pub struct MatchStats {
    matches: AtomicU64,
    mismatches: AtomicU64,
}

impl MatchStats {
    pub fn record_match(&self) {
        self.matches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_mismatch(&self) {
        self.mismatches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MatchStatsSnapshot {
        let matches = self.matches.load(Ordering::Relaxed);
        let mismatches = self.mismatches.load(Ordering::Relaxed);
        MatchStatsSnapshot {
            attempts: matches + mismatches,
            matches,
            mismatches,
        }
    }
}
