// Core models for analysis runs and per-stage status tracking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Market landscape output of the market agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    /// Compound annual growth rate, percent.
    pub cagr_pct: f64,
    /// Estimated market size in billions of USD.
    pub market_size_bn: f64,
    pub leading_competitors: Vec<String>,
    pub summary: String,
    pub growth_drivers: Vec<String>,
}

/// Trial count for a single clinical phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseCount {
    pub phase: String,
    pub count: u32,
}

/// Clinical development output of the clinical agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalData {
    pub total_trials: u32,
    pub phases: Vec<PhaseCount>,
    pub sponsors: Vec<String>,
    pub insights: String,
    pub indications: Vec<String>,
}

/// IP landscape output of the patent agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatentData {
    pub total_patents: u32,
    pub expiry_years: Vec<i32>,
    pub holders: Vec<String>,
    pub notes: String,
    /// Preliminary freedom-to-operate assessment.
    pub fto_status: String,
}

/// A single publication reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    pub year: i32,
    pub journal: String,
}

/// Overall tone of the published literature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Mixed,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Mixed => write!(f, "Mixed"),
        }
    }
}

/// Literature output of the research agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchData {
    pub publications_count: u32,
    pub publications: Vec<Publication>,
    pub sentiment: Sentiment,
    pub key_findings: Vec<String>,
}

/// Combined recommendation derived from all four agent outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisResult {
    pub recommendation: String,
    /// Indicative confidence in [0.65, 0.95).
    pub confidence_score: f64,
    pub key_opportunities: Vec<String>,
    pub risks: Vec<String>,
    pub next_steps: Vec<String>,
}

/// Immutable aggregate result of one successful analysis run.
///
/// Constructed exactly once, after every stage has completed. A record
/// is never partially populated: while a run is in flight only the
/// per-stage [`AgentStates`] are observable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: uuid::Uuid,
    pub molecule: String,
    pub timestamp: DateTime<Utc>,
    pub market: MarketData,
    pub clinical: ClinicalData,
    pub patent: PatentData,
    pub research: ResearchData,
    pub synthesis: SynthesisResult,
}

/// Status of a single pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AgentStatus {
    #[default]
    Idle,
    Running,
    Complete,
    Error,
}

/// One of the five work units in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Market,
    Clinical,
    Patent,
    Research,
    Synthesis,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Market,
        Stage::Clinical,
        Stage::Patent,
        Stage::Research,
        Stage::Synthesis,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Market => "Market",
            Stage::Clinical => "Clinical",
            Stage::Patent => "Patent",
            Stage::Research => "Research",
            Stage::Synthesis => "Synthesis",
        }
    }
}

/// Per-stage status record for the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgentStates {
    pub market: AgentStatus,
    pub clinical: AgentStatus,
    pub patent: AgentStatus,
    pub research: AgentStatus,
    pub synthesis: AgentStatus,
}

impl AgentStates {
    /// Statuses at the start of a run: all four producers running,
    /// synthesis waiting on the fan-in barrier.
    pub fn fan_out() -> Self {
        Self {
            market: AgentStatus::Running,
            clinical: AgentStatus::Running,
            patent: AgentStatus::Running,
            research: AgentStatus::Running,
            synthesis: AgentStatus::Idle,
        }
    }

    pub fn get(&self, stage: Stage) -> AgentStatus {
        match stage {
            Stage::Market => self.market,
            Stage::Clinical => self.clinical,
            Stage::Patent => self.patent,
            Stage::Research => self.research,
            Stage::Synthesis => self.synthesis,
        }
    }

    pub fn set(&mut self, stage: Stage, status: AgentStatus) {
        match stage {
            Stage::Market => self.market = status,
            Stage::Clinical => self.clinical = status,
            Stage::Patent => self.patent = status,
            Stage::Research => self.research = status,
            Stage::Synthesis => self.synthesis = status,
        }
    }

    pub fn set_all(&mut self, status: AgentStatus) {
        for stage in Stage::ALL {
            self.set(stage, status);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn all_complete(&self) -> bool {
        Stage::ALL
            .iter()
            .all(|s| self.get(*s) == AgentStatus::Complete)
    }

    pub fn any_error(&self) -> bool {
        Stage::ALL.iter().any(|s| self.get(*s) == AgentStatus::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_out_runs_producers_only() {
        let states = AgentStates::fan_out();
        assert_eq!(states.market, AgentStatus::Running);
        assert_eq!(states.clinical, AgentStatus::Running);
        assert_eq!(states.patent, AgentStatus::Running);
        assert_eq!(states.research, AgentStatus::Running);
        assert_eq!(states.synthesis, AgentStatus::Idle);
    }

    #[test]
    fn set_all_and_reset() {
        let mut states = AgentStates::fan_out();
        states.set_all(AgentStatus::Complete);
        assert!(states.all_complete());

        states.set(Stage::Clinical, AgentStatus::Error);
        assert!(!states.all_complete());
        assert!(states.any_error());

        states.reset();
        assert_eq!(states, AgentStates::default());
        for stage in Stage::ALL {
            assert_eq!(states.get(stage), AgentStatus::Idle);
        }
    }
}
