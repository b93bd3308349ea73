//! Clinical Agent
//!
//! Surveys the clinical development pipeline: trial counts by phase,
//! sponsors and candidate indications. Randomized templates stand in
//! for a ClinicalTrials.gov integration.

use crate::agents::{pick, sample, Agent, Latency, COMPANIES, THERAPEUTIC_AREAS};
use crate::models::{ClinicalData, PhaseCount};
use crate::types::AppResult;
use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

pub struct ClinicalAgent {
    latency: Latency,
}

impl ClinicalAgent {
    pub const LATENCY: Latency = Latency::from_millis(1800, 1000);

    pub fn new(latency: Latency) -> Self {
        Self { latency }
    }

    fn generate(molecule: &str) -> ClinicalData {
        let mut rng = rand::thread_rng();

        let total_trials = rng.gen_range(5..20);
        let area = pick(&mut rng, THERAPEUTIC_AREAS);
        let secondary = pick(&mut rng, THERAPEUTIC_AREAS);

        let phases = vec![
            PhaseCount {
                phase: "Phase I".to_string(),
                count: rng.gen_range(1..=5),
            },
            PhaseCount {
                phase: "Phase II".to_string(),
                count: rng.gen_range(2..=7),
            },
            PhaseCount {
                phase: "Phase III".to_string(),
                count: rng.gen_range(1..=4),
            },
            PhaseCount {
                phase: "Phase IV".to_string(),
                count: rng.gen_range(0..=2),
            },
        ];

        ClinicalData {
            total_trials,
            phases,
            sponsors: sample(&mut rng, COMPANIES, 3),
            insights: format!(
                "Active clinical development with {total_trials} trials investigating \
                 {molecule} for novel {} applications. Strong Phase II pipeline \
                 suggests high commercial interest.",
                area.to_lowercase()
            ),
            indications: vec![
                format!("{area} - Primary indication"),
                format!("{secondary} - Secondary"),
                "Supportive care applications".to_string(),
            ],
        }
    }
}

#[async_trait]
impl Agent for ClinicalAgent {
    type Output = ClinicalData;

    async fn produce(&self, molecule: &str) -> AppResult<ClinicalData> {
        self.latency.sleep().await;
        let data = Self::generate(molecule);
        debug!(
            molecule,
            total_trials = data.total_trials,
            "clinical agent finished"
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn produce_respects_value_ranges() {
        let agent = ClinicalAgent::new(Latency::ZERO);
        let data = agent.produce("Metformin").await.unwrap();

        assert!((5..20).contains(&data.total_trials));
        assert_eq!(data.phases.len(), 4);
        assert_eq!(data.phases[0].phase, "Phase I");
        assert!((1..=5).contains(&data.phases[0].count));
        assert!((2..=7).contains(&data.phases[1].count));
        assert!(data.phases[3].count <= 2);
        assert_eq!(data.sponsors.len(), 3);
        assert_eq!(data.indications.len(), 3);
        assert!(data.insights.contains("Metformin"));
    }

    #[tokio::test]
    async fn primary_indication_carries_area_label() {
        let agent = ClinicalAgent::new(Latency::ZERO);
        let data = agent.produce("Sildenafil").await.unwrap();
        assert!(data.indications[0].ends_with(" - Primary indication"));
        let area = data.indications[0].split(" - ").next().unwrap();
        assert!(THERAPEUTIC_AREAS.contains(&area));
    }
}
