//! Projection table caching using Moka.
//!
//! Entries are keyed by the ledger revision, so any mutation of the ledger
//! makes older entries unreachable; they age out through capacity and TTL.

use chrono::NaiveDate;
use lendbook_shared::types::CalendarMonth;
use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::error::ProjectionError;
use super::projector::CashFlowProjector;
use super::scenario::Scenario;
use super::types::CashFlowProjection;
use crate::ledger::LedgerReader;

/// Default cache capacity (number of tables).
const DEFAULT_CACHE_CAPACITY: u64 = 64;

/// Default time-to-live for cache entries (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

/// Identity of a projection table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectionKey {
    /// Ledger revision the table was computed from.
    pub revision: u64,
    /// Month the projection was requested in.
    pub current_month: CalendarMonth,
    /// Horizon in months.
    pub months: u32,
    /// Scenario applied.
    pub scenario: Scenario,
    /// Baseline lookback of the projector.
    pub lookback_months: u32,
}

/// Cache for projection tables.
///
/// Thread-safe; clones share the same underlying cache.
#[derive(Clone)]
pub struct ProjectionCache {
    cache: Cache<ProjectionKey, Arc<Vec<CashFlowProjection>>>,
}

impl ProjectionCache {
    /// Creates a cache with default settings (64 tables, 5 minute TTL).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache with a custom capacity and time-to-live.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Returns the cached table for the request, computing it on a miss.
    ///
    /// # Errors
    ///
    /// Propagates the projector's error; failures are not cached.
    pub fn project_cached<R>(
        &self,
        projector: &CashFlowProjector,
        months: u32,
        scenario: Scenario,
        reader: &R,
        today: NaiveDate,
    ) -> Result<Arc<Vec<CashFlowProjection>>, ProjectionError>
    where
        R: LedgerReader + ?Sized,
    {
        let key = ProjectionKey {
            revision: reader.revision(),
            current_month: CalendarMonth::from_date(today),
            months,
            scenario,
            lookback_months: projector.lookback_months(),
        };

        if let Some(table) = self.cache.get(&key) {
            debug!(revision = key.revision, %scenario, months, "projection cache hit");
            return Ok(table);
        }

        let table = Arc::new(projector.project_cash_flow(months, scenario, reader, today)?);
        self.cache.insert(key, Arc::clone(&table));

        Ok(table)
    }

    /// Returns true if a table is cached for `key`.
    #[must_use]
    pub fn contains(&self, key: &ProjectionKey) -> bool {
        self.cache.contains_key(key)
    }

    /// Invalidates all cached entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs pending cache maintenance.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for ProjectionCache {
    fn default() -> Self {
        Self::new()
    }
}
