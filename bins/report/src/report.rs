//! Ledger report assembly.

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use lendbook_core::credit::{CreditProfile, CreditScoreCalculator};
use lendbook_core::ledger::LedgerReader;
use lendbook_core::projection::{CashFlowProjector, ProjectionCache, Scenario, ScenarioProjections};
use lendbook_core::snapshot::{MonthlySnapshot, SnapshotService};
use lendbook_shared::AppConfig;
use lendbook_shared::types::CalendarMonth;
use lendbook_store::InMemoryLedger;
use serde::Serialize;
use tracing::info;

/// Everything the report prints, as of one instant.
#[derive(Debug, Serialize)]
pub struct LedgerReport {
    pub generated_at: DateTime<Utc>,
    pub as_of: NaiveDate,
    pub revision: u64,
    /// Closed lookback months followed by the current month.
    pub snapshots: Vec<MonthlySnapshot>,
    /// One profile per non-archived debtor.
    pub credit_profiles: Vec<CreditProfile>,
    pub projections: ScenarioProjections,
}

/// Builds reports against one store, reusing projection tables while the
/// ledger revision is unchanged.
pub struct ReportBuilder {
    projector: CashFlowProjector,
    cache: ProjectionCache,
    projection_months: u32,
}

impl ReportBuilder {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            projector: CashFlowProjector::new(config.analysis.lookback_months),
            cache: ProjectionCache::with_config(config.cache.capacity, config.cache.ttl_secs),
            projection_months: config.analysis.projection_months,
        }
    }

    pub fn build(
        &self,
        store: &InMemoryLedger,
        now: DateTime<Utc>,
    ) -> anyhow::Result<LedgerReport> {
        let today = now.date_naive();
        let current = CalendarMonth::from_date(today);
        let lookback = i32::try_from(self.projector.lookback_months()).unwrap_or(i32::MAX);

        let snapshots =
            SnapshotService::compute_range(store, current.offset(-lookback), current, today)
                .context("Failed to compute monthly snapshots")?;

        let debtors: Vec<_> = store
            .debtors()
            .context("Failed to list debtors")?
            .into_iter()
            .filter(|debtor| !debtor.is_archived)
            .collect();
        let credit_profiles = CreditScoreCalculator::calculate_profiles(&debtors, store, now)
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to score debtors")?;

        let projections = self.projections(store, today)?;

        info!(
            debtors = credit_profiles.len(),
            months = snapshots.len(),
            projection_months = self.projection_months,
            "built ledger report"
        );

        Ok(LedgerReport {
            generated_at: now,
            as_of: today,
            revision: store.revision(),
            snapshots,
            credit_profiles,
            projections,
        })
    }

    fn projections(
        &self,
        store: &InMemoryLedger,
        today: NaiveDate,
    ) -> anyhow::Result<ScenarioProjections> {
        let table = |scenario: Scenario| {
            self.cache
                .project_cached(&self.projector, self.projection_months, scenario, store, today)
                .map(|table| table.as_ref().clone())
                .with_context(|| format!("Failed to project the {scenario} scenario"))
        };

        Ok(ScenarioProjections {
            baseline: self
                .projector
                .historical_baseline(store, today)
                .context("Failed to compute the historical baseline")?,
            optimistic: table(Scenario::Optimistic)?,
            realistic: table(Scenario::Realistic)?,
            pessimistic: table(Scenario::Pessimistic)?,
        })
    }
}
