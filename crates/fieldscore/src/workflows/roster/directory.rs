use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::{CompanyRoster, RosterImportError, RosterSource};

/// TTL cache in front of a roster source.
///
/// Snapshots are shared through `Arc`, so a scoring pass keeps the roster it
/// started with even while a refresh swaps the cache underneath it. There is
/// no write-path invalidation; staleness is bounded by the TTL alone.
pub struct CachedRosterDirectory<S> {
    source: S,
    ttl: Duration,
    cached: Mutex<Option<Snapshot>>,
}

struct Snapshot {
    roster: Arc<CompanyRoster>,
    refreshed_at: Instant,
}

impl<S: RosterSource> CachedRosterDirectory<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            cached: Mutex::new(None),
        }
    }

    /// The current snapshot, reloading from the source once the TTL lapses.
    /// A failed reload leaves the cache slot untouched, so the next call
    /// retries the source.
    pub fn current(&self) -> Result<Arc<CompanyRoster>, RosterImportError> {
        let mut cached = self.cached.lock().expect("roster cache mutex poisoned");
        if let Some(snapshot) = cached.as_ref() {
            if snapshot.refreshed_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&snapshot.roster));
            }
        }

        let roster = Arc::new(self.source.load()?);
        tracing::debug!(companies = roster.len(), "roster snapshot refreshed");
        *cached = Some(Snapshot {
            roster: Arc::clone(&roster),
            refreshed_at: Instant::now(),
        });

        Ok(roster)
    }
}
