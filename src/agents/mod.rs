//! Agent System
//!
//! The analysis pipeline fans four category agents out in parallel and
//! fans their outputs into a synthesis agent:
//!
//! ```text
//!            Molecule name
//!                  │
//!    ┌───────┬─────┴─────┬──────────┐
//!    ▼       ▼           ▼          ▼
//! ┌──────┐┌────────┐┌────────┐┌──────────┐
//! │Market││Clinical││ Patent ││ Research │   (concurrent)
//! └──────┘└────────┘└────────┘└──────────┘
//!    └───────┴─────┬─────┴──────────┘
//!                  ▼
//!           ┌─────────────┐
//!           │  Synthesis  │  → recommendation + confidence
//!           └─────────────┘
//! ```
//!
//! Every agent sits behind a capability trait so the randomized
//! reference implementations can later be swapped for real data-source
//! integrations (market databases, ClinicalTrials.gov, patent offices,
//! PubMed) without touching the orchestrator.

pub mod clinical;
pub mod market;
pub mod patent;
pub mod research;
pub mod synthesis;

pub use clinical::ClinicalAgent;
pub use market::MarketAgent;
pub use patent::PatentAgent;
pub use research::ResearchAgent;
pub use synthesis::OpportunitySynthesizer;

use crate::models::{
    ClinicalData, MarketData, PatentData, ResearchData, SynthesisResult,
};
use crate::types::AppResult;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// A single analysis category agent.
///
/// Implementations must be side-effect free: each `produce` call stands
/// alone and shares no mutable state with other calls.
#[async_trait]
pub trait Agent: Send + Sync {
    type Output;

    async fn produce(&self, molecule: &str) -> AppResult<Self::Output>;
}

/// The fan-in stage: combines all four category outputs into a
/// recommendation.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(
        &self,
        molecule: &str,
        inputs: &AgentOutputs,
    ) -> AppResult<SynthesisResult>;
}

/// The four producer outputs handed to the synthesizer after the
/// fan-in barrier.
#[derive(Debug, Clone)]
pub struct AgentOutputs {
    pub market: MarketData,
    pub clinical: ClinicalData,
    pub patent: PatentData,
    pub research: ResearchData,
}

/// The full set of agents an orchestrator drives.
#[derive(Clone)]
pub struct AgentSet {
    pub market: Arc<dyn Agent<Output = MarketData>>,
    pub clinical: Arc<dyn Agent<Output = ClinicalData>>,
    pub patent: Arc<dyn Agent<Output = PatentData>>,
    pub research: Arc<dyn Agent<Output = ResearchData>>,
    pub synthesizer: Arc<dyn Synthesizer>,
}

impl AgentSet {
    /// The reference randomized agents, with their latency windows
    /// scaled by `latency_scale` (0 disables delays, used in tests).
    pub fn simulated(latency_scale: f64) -> Self {
        Self {
            market: Arc::new(MarketAgent::new(MarketAgent::LATENCY.scaled(latency_scale))),
            clinical: Arc::new(ClinicalAgent::new(
                ClinicalAgent::LATENCY.scaled(latency_scale),
            )),
            patent: Arc::new(PatentAgent::new(PatentAgent::LATENCY.scaled(latency_scale))),
            research: Arc::new(ResearchAgent::new(
                ResearchAgent::LATENCY.scaled(latency_scale),
            )),
            synthesizer: Arc::new(OpportunitySynthesizer::new(
                OpportunitySynthesizer::LATENCY.scaled(latency_scale),
            )),
        }
    }
}

/// A randomized delay window modelling an unpredictable-duration
/// background computation. Each call draws an independent delay.
#[derive(Debug, Clone, Copy)]
pub struct Latency {
    base: Duration,
    jitter: Duration,
}

impl Latency {
    pub const ZERO: Latency = Latency::from_millis(0, 0);

    pub const fn from_millis(base: u64, jitter: u64) -> Self {
        Self {
            base: Duration::from_millis(base),
            jitter: Duration::from_millis(jitter),
        }
    }

    pub fn scaled(self, factor: f64) -> Self {
        let factor = factor.max(0.0);
        Self {
            base: self.base.mul_f64(factor),
            jitter: self.jitter.mul_f64(factor),
        }
    }

    pub(crate) async fn sleep(self) {
        // Draw the delay before awaiting; ThreadRng must not be held
        // across a suspension point.
        let delay = {
            let mut rng = rand::thread_rng();
            self.base + self.jitter.mul_f64(rng.gen::<f64>())
        };
        tokio::time::sleep(delay).await;
    }
}

// Choice pools shared by the simulated agents.

pub(crate) const THERAPEUTIC_AREAS: &[&str] = &[
    "Oncology",
    "Immunology",
    "Neurology",
    "Cardiology",
    "Metabolic Disorders",
    "Infectious Diseases",
    "Rare Diseases",
    "Respiratory",
    "Dermatology",
];

pub(crate) const COMPANIES: &[&str] = &[
    "Pfizer",
    "Novartis",
    "Roche",
    "Johnson & Johnson",
    "Merck",
    "AbbVie",
    "Bristol-Myers Squibb",
    "Eli Lilly",
    "AstraZeneca",
    "Sanofi",
];

pub(crate) const JOURNALS: &[&str] = &[
    "Nature Medicine",
    "The Lancet",
    "NEJM",
    "JAMA",
    "Cell",
    "Science Translational Medicine",
    "JCI",
    "Cancer Research",
];

/// Pick one entry from a pool.
pub(crate) fn pick<R: Rng>(rng: &mut R, pool: &'static [&'static str]) -> &'static str {
    pool.choose(rng).copied().unwrap_or("")
}

/// Sample `n` distinct entries from a pool, in random order.
pub(crate) fn sample<R: Rng>(
    rng: &mut R,
    pool: &'static [&'static str],
    n: usize,
) -> Vec<String> {
    pool.choose_multiple(rng, n.min(pool.len()))
        .map(|s| s.to_string())
        .collect()
}

/// Take a randomized-length prefix (between `min` and `max` entries)
/// of a fixed candidate pool.
pub(crate) fn prefix<R: Rng>(
    rng: &mut R,
    pool: &'static [&'static str],
    min: usize,
    max: usize,
) -> Vec<String> {
    let n = rng.gen_range(min..=max).min(pool.len());
    pool[..n].iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_distinct_and_bounded() {
        let mut rng = rand::thread_rng();
        let picked = sample(&mut rng, COMPANIES, 4);
        assert_eq!(picked.len(), 4);
        let mut unique = picked.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 4);

        // Requests beyond the pool size are clamped.
        assert_eq!(sample(&mut rng, JOURNALS, 100).len(), JOURNALS.len());
    }

    #[test]
    fn prefix_length_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let picked = prefix(&mut rng, THERAPEUTIC_AREAS, 2, 3);
            assert!((2..=3).contains(&picked.len()));
            assert_eq!(picked[0], THERAPEUTIC_AREAS[0]);
        }
    }

    #[tokio::test]
    async fn zero_latency_resolves_immediately() {
        tokio::time::timeout(Duration::from_millis(50), Latency::ZERO.sleep())
            .await
            .expect("zero latency should not block");
    }
}
