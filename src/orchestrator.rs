//! Run Orchestrator
//!
//! Drives the fan-out/fan-in pipeline for one analysis run at a time,
//! tracks per-stage status, and owns the session history. This is the
//! only place that mutates shared state; the presentation layer reads
//! cloned snapshots and issues commands.
//!
//! A run either completes with a fully-populated [`AnalysisRecord`] or
//! fails as a whole: a fault in any of the five stages flips every
//! stage to `Error` and no partial record is ever exposed. There is no
//! retry, timeout, or cancellation.

use crate::agents::{AgentOutputs, AgentSet};
use crate::models::{AgentStates, AgentStatus, AnalysisRecord, Stage};
use crate::types::{AppError, AppResult};
use chrono::Utc;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info};
use uuid::Uuid;

#[derive(Debug, Default)]
struct SessionState {
    stages: AgentStates,
    current: Option<AnalysisRecord>,
    history: Vec<AnalysisRecord>,
    in_flight: bool,
}

pub struct Orchestrator {
    agents: AgentSet,
    state: Mutex<SessionState>,
}

impl Orchestrator {
    pub fn new(agents: AgentSet) -> Self {
        Self {
            agents,
            state: Mutex::new(SessionState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // === Read surface ===

    /// Snapshot of the five per-stage statuses.
    pub fn agent_states(&self) -> AgentStates {
        self.lock().stages
    }

    /// The currently displayed record, if any.
    pub fn current(&self) -> Option<AnalysisRecord> {
        self.lock().current.clone()
    }

    /// Session history, most recent first.
    pub fn history(&self) -> Vec<AnalysisRecord> {
        self.lock().history.clone()
    }

    pub fn is_running(&self) -> bool {
        self.lock().in_flight
    }

    // === Commands ===

    /// Run the full pipeline for one molecule.
    ///
    /// Rejects empty names and re-entrant invocation; runs are strictly
    /// serialized. On success the new record is prepended to history
    /// and becomes current; on any fault every stage is set to `Error`
    /// and the current record stays cleared.
    pub async fn start_run(&self, molecule: &str) -> AppResult<AnalysisRecord> {
        let molecule = molecule.trim();
        if molecule.is_empty() {
            return Err(AppError::InvalidRequest(
                "molecule name must not be empty".to_string(),
            ));
        }

        {
            let mut state = self.lock();
            if state.in_flight {
                return Err(AppError::RunInProgress);
            }
            state.in_flight = true;
            state.current = None;
            state.stages = AgentStates::fan_out();
        }
        info!(molecule, "starting analysis run");

        let result = self.execute(molecule).await;

        let mut state = self.lock();
        state.in_flight = false;
        match result {
            Ok(record) => {
                info!(
                    id = %record.id,
                    confidence = record.synthesis.confidence_score,
                    "analysis run complete"
                );
                state.current = Some(record.clone());
                state.history.insert(0, record.clone());
                Ok(record)
            }
            Err(err) => {
                error!(molecule, error = %err, "analysis run failed");
                state.stages.set_all(AgentStatus::Error);
                state.current = None;
                Err(err)
            }
        }
    }

    async fn execute(&self, molecule: &str) -> AppResult<AnalysisRecord> {
        // Fan-out: all four producers issued back-to-back; each stage
        // flips to Complete the moment its own task resolves, in
        // whatever order the latencies finish. The join is a hard
        // barrier, short-circuiting to the failure path on first fault.
        let (market, clinical, patent, research) = tokio::try_join!(
            self.producer(Stage::Market, self.agents.market.produce(molecule)),
            self.producer(Stage::Clinical, self.agents.clinical.produce(molecule)),
            self.producer(Stage::Patent, self.agents.patent.produce(molecule)),
            self.producer(Stage::Research, self.agents.research.produce(molecule)),
        )?;

        let outputs = AgentOutputs {
            market,
            clinical,
            patent,
            research,
        };

        self.lock().stages.set(Stage::Synthesis, AgentStatus::Running);
        let synthesis = self.agents.synthesizer.synthesize(molecule, &outputs).await?;
        self.lock().stages.set(Stage::Synthesis, AgentStatus::Complete);

        Ok(AnalysisRecord {
            id: Uuid::new_v4(),
            molecule: molecule.to_string(),
            timestamp: Utc::now(),
            market: outputs.market,
            clinical: outputs.clinical,
            patent: outputs.patent,
            research: outputs.research,
            synthesis,
        })
    }

    async fn producer<T>(
        &self,
        stage: Stage,
        task: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        let output = task.await?;
        self.lock().stages.set(stage, AgentStatus::Complete);
        debug!(stage = stage.name(), "producer stage complete");
        Ok(output)
    }

    /// Display a past record. A pure view-state change: no agents run.
    pub fn select_from_history(&self, id: Uuid) -> AppResult<AnalysisRecord> {
        let mut state = self.lock();
        if state.in_flight {
            return Err(AppError::RunInProgress);
        }
        let record = state
            .history
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("analysis record {id}")))?;
        state.stages.set_all(AgentStatus::Complete);
        state.current = Some(record.clone());
        Ok(record)
    }

    /// Remove a record from history. If it was being displayed, the
    /// current record is cleared and every stage resets to idle.
    pub fn delete_from_history(&self, id: Uuid) -> AppResult<()> {
        let mut state = self.lock();
        let before = state.history.len();
        state.history.retain(|r| r.id != id);
        if state.history.len() == before {
            return Err(AppError::NotFound(format!("analysis record {id}")));
        }
        if state.current.as_ref().map(|r| r.id) == Some(id) {
            state.current = None;
            state.stages.reset();
        }
        info!(%id, "deleted record from history");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{Agent, Latency, MarketAgent};
    use crate::models::{ClinicalData, MarketData};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn instant_agents() -> AgentSet {
        AgentSet::simulated(0.0)
    }

    struct FailingClinical;

    #[async_trait]
    impl Agent for FailingClinical {
        type Output = ClinicalData;

        async fn produce(&self, _molecule: &str) -> AppResult<ClinicalData> {
            Err(AppError::Agent {
                agent: "clinical",
                message: "simulated outage".to_string(),
            })
        }
    }

    struct CountingMarket {
        calls: Arc<AtomicUsize>,
        inner: MarketAgent,
    }

    #[async_trait]
    impl Agent for CountingMarket {
        type Output = MarketData;

        async fn produce(&self, molecule: &str) -> AppResult<MarketData> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.produce(molecule).await
        }
    }

    #[tokio::test]
    async fn successful_run_builds_complete_record() {
        let orchestrator = Orchestrator::new(instant_agents());
        let record = orchestrator.start_run("Metformin").await.unwrap();

        assert_eq!(record.molecule, "Metformin");
        assert!((0.65..0.95).contains(&record.synthesis.confidence_score));
        assert!(!record.synthesis.key_opportunities.is_empty());
        assert!(!record.synthesis.risks.is_empty());

        let states = orchestrator.agent_states();
        assert!(states.all_complete());

        let history = orchestrator.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, record.id);
        assert_eq!(orchestrator.current(), Some(record));
        assert!(!orchestrator.is_running());
    }

    #[tokio::test]
    async fn empty_molecule_is_rejected() {
        let orchestrator = Orchestrator::new(instant_agents());
        let err = orchestrator.start_run("   ").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
        assert_eq!(orchestrator.agent_states(), AgentStates::default());
        assert!(orchestrator.history().is_empty());
    }

    #[tokio::test]
    async fn history_is_most_recent_first() {
        let orchestrator = Orchestrator::new(instant_agents());
        let first = orchestrator.start_run("Metformin").await.unwrap();
        let second = orchestrator.start_run("Aspirin").await.unwrap();

        let history = orchestrator.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, second.id);
        assert_eq!(history[1].id, first.id);
    }

    #[tokio::test]
    async fn producer_fault_fails_whole_run() {
        let mut agents = instant_agents();
        agents.clinical = Arc::new(FailingClinical);
        let orchestrator = Orchestrator::new(agents);

        let err = orchestrator.start_run("Metformin").await.unwrap_err();
        assert!(matches!(err, AppError::Agent { agent: "clinical", .. }));

        let states = orchestrator.agent_states();
        for stage in Stage::ALL {
            assert_eq!(states.get(stage), AgentStatus::Error);
        }
        assert!(orchestrator.current().is_none());
        assert!(orchestrator.history().is_empty());
        assert!(!orchestrator.is_running());
    }

    #[tokio::test]
    async fn failed_run_leaves_prior_history_intact() {
        let orchestrator = Orchestrator::new(instant_agents());
        let kept = orchestrator.start_run("Metformin").await.unwrap();

        let mut agents = instant_agents();
        agents.clinical = Arc::new(FailingClinical);
        let failing = Orchestrator::new(agents);
        failing.start_run("Aspirin").await.unwrap_err();
        assert!(failing.history().is_empty());

        // The original session is untouched by the other session's failure.
        assert_eq!(orchestrator.history().len(), 1);
        assert_eq!(orchestrator.history()[0].id, kept.id);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn reentrant_run_is_rejected() {
        // Small real latencies so the first run is still in flight when
        // the second is issued.
        let orchestrator = Arc::new(Orchestrator::new(AgentSet::simulated(0.02)));

        let background = {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move { orchestrator.start_run("Metformin").await })
        };

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(orchestrator.is_running());
        let err = orchestrator.start_run("Aspirin").await.unwrap_err();
        assert!(matches!(err, AppError::RunInProgress));

        let record = background.await.unwrap().unwrap();
        assert_eq!(record.molecule, "Metformin");
        assert_eq!(orchestrator.history().len(), 1);
    }

    #[tokio::test]
    async fn select_restores_stored_record_without_recomputation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut agents = instant_agents();
        agents.market = Arc::new(CountingMarket {
            calls: calls.clone(),
            inner: MarketAgent::new(Latency::ZERO),
        });
        let orchestrator = Orchestrator::new(agents);

        let first = orchestrator.start_run("Metformin").await.unwrap();
        let second = orchestrator.start_run("Aspirin").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(orchestrator.current(), Some(second));

        let selected = orchestrator.select_from_history(first.id).unwrap();
        assert_eq!(selected, first);
        assert_eq!(orchestrator.current(), Some(first));
        assert!(orchestrator.agent_states().all_complete());
        // A pure view-state change: no agent ran again.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn select_unknown_id_is_not_found() {
        let orchestrator = Orchestrator::new(instant_agents());
        orchestrator.start_run("Metformin").await.unwrap();
        let err = orchestrator.select_from_history(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_preserving_order() {
        let orchestrator = Orchestrator::new(instant_agents());
        let a = orchestrator.start_run("Metformin").await.unwrap();
        let b = orchestrator.start_run("Aspirin").await.unwrap();
        let c = orchestrator.start_run("Sildenafil").await.unwrap();

        orchestrator.delete_from_history(b.id).unwrap();
        let history = orchestrator.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, c.id);
        assert_eq!(history[1].id, a.id);

        // C is still displayed; deleting B left view state alone.
        assert_eq!(orchestrator.current().map(|r| r.id), Some(c.id));
        assert!(orchestrator.agent_states().all_complete());
    }

    #[tokio::test]
    async fn deleting_displayed_record_resets_view_state() {
        let orchestrator = Orchestrator::new(instant_agents());
        let record = orchestrator.start_run("Metformin").await.unwrap();

        orchestrator.delete_from_history(record.id).unwrap();
        assert!(orchestrator.current().is_none());
        assert_eq!(orchestrator.agent_states(), AgentStates::default());
        assert!(orchestrator.history().is_empty());

        let err = orchestrator.delete_from_history(record.id).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
