//! Research Agent
//!
//! Scans the published literature: publication volume, recent key
//! papers, overall sentiment. Randomized templates stand in for a
//! PubMed/OpenScholar integration.

use crate::agents::{pick, prefix, Agent, Latency, JOURNALS, THERAPEUTIC_AREAS};
use crate::models::{Publication, ResearchData, Sentiment};
use crate::types::AppResult;
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use rand::Rng;
use tracing::debug;

const KEY_FINDINGS: &[&str] = &[
    "Demonstrated efficacy in novel therapeutic targets",
    "Favorable safety profile in long-term studies",
    "Synergistic effects with existing treatments",
    "Emerging evidence for precision medicine applications",
];

pub struct ResearchAgent {
    latency: Latency,
}

impl ResearchAgent {
    pub const LATENCY: Latency = Latency::from_millis(2000, 1000);

    pub fn new(latency: Latency) -> Self {
        Self { latency }
    }

    fn generate(molecule: &str) -> ResearchData {
        let mut rng = rand::thread_rng();
        let current_year = Utc::now().year();
        let area = pick(&mut rng, THERAPEUTIC_AREAS).to_lowercase();

        let publications = vec![
            Publication {
                title: format!("Novel mechanisms of {molecule} in {area} treatment"),
                year: current_year - rng.gen_range(0..=1),
                journal: pick(&mut rng, JOURNALS).to_string(),
            },
            Publication {
                title: format!("Repurposing {molecule}: A systematic review"),
                year: current_year - 1,
                journal: pick(&mut rng, JOURNALS).to_string(),
            },
            Publication {
                title: format!("{molecule} combination therapy: Phase II results"),
                year: current_year,
                journal: pick(&mut rng, JOURNALS).to_string(),
            },
            Publication {
                title: format!("Biomarker-guided {molecule} therapy in precision medicine"),
                year: current_year,
                journal: pick(&mut rng, JOURNALS).to_string(),
            },
        ];

        ResearchData {
            publications_count: rng.gen_range(50..250),
            publications,
            sentiment: if rng.gen_bool(0.8) {
                Sentiment::Positive
            } else {
                Sentiment::Mixed
            },
            key_findings: prefix(&mut rng, KEY_FINDINGS, 2, 3),
        }
    }
}

#[async_trait]
impl Agent for ResearchAgent {
    type Output = ResearchData;

    async fn produce(&self, molecule: &str) -> AppResult<ResearchData> {
        self.latency.sleep().await;
        let data = Self::generate(molecule);
        debug!(
            molecule,
            publications = data.publications_count,
            sentiment = %data.sentiment,
            "research agent finished"
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn produce_respects_value_ranges() {
        let agent = ResearchAgent::new(Latency::ZERO);
        let data = agent.produce("Metformin").await.unwrap();
        let current_year = Utc::now().year();

        assert!((50..250).contains(&data.publications_count));
        assert_eq!(data.publications.len(), 4);
        for publication in &data.publications {
            assert!(publication.title.contains("Metformin"));
            assert!((current_year - 1..=current_year).contains(&publication.year));
            assert!(JOURNALS.contains(&publication.journal.as_str()));
        }
        assert!((2..=3).contains(&data.key_findings.len()));
    }
}
