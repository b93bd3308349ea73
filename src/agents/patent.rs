//! Patent Agent
//!
//! Maps the IP landscape: patent counts, expiry windows, holders and a
//! preliminary freedom-to-operate read. Randomized templates stand in
//! for patent office queries.

use crate::agents::{sample, Agent, Latency, COMPANIES};
use crate::models::PatentData;
use crate::types::AppResult;
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use rand::Rng;
use tracing::debug;

pub struct PatentAgent {
    latency: Latency,
}

impl PatentAgent {
    pub const LATENCY: Latency = Latency::from_millis(1600, 1000);

    pub fn new(latency: Latency) -> Self {
        Self { latency }
    }

    fn generate(_molecule: &str) -> PatentData {
        let mut rng = rand::thread_rng();
        let current_year = Utc::now().year();

        // Three expiry estimates in increasingly distant windows.
        let expiry_years = vec![
            current_year + rng.gen_range(1..=3),
            current_year + rng.gen_range(3..=7),
            current_year + rng.gen_range(5..=12),
        ];

        let fto_status = if rng.gen_bool(0.7) {
            "Favorable - Clear path for new indications"
        } else {
            "Requires licensing - Core composition patents active"
        };

        PatentData {
            total_patents: rng.gen_range(10..30),
            expiry_years,
            holders: sample(&mut rng, COMPANIES, 4),
            notes: format!(
                "Upcoming patent cliff in {}-{} creates significant repurposing \
                 opportunity. Multiple formulation patents expiring, enabling \
                 generic competition and new indication development.",
                current_year + 2,
                current_year + 4
            ),
            fto_status: fto_status.to_string(),
        }
    }
}

#[async_trait]
impl Agent for PatentAgent {
    type Output = PatentData;

    async fn produce(&self, molecule: &str) -> AppResult<PatentData> {
        self.latency.sleep().await;
        let data = Self::generate(molecule);
        debug!(
            molecule,
            total_patents = data.total_patents,
            fto = %data.fto_status,
            "patent agent finished"
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn produce_respects_value_ranges() {
        let agent = PatentAgent::new(Latency::ZERO);
        let data = agent.produce("Metformin").await.unwrap();
        let current_year = Utc::now().year();

        assert!((10..30).contains(&data.total_patents));
        assert_eq!(data.expiry_years.len(), 3);
        assert!(data.expiry_years.iter().all(|y| *y > current_year));
        assert_eq!(data.holders.len(), 4);
        assert!(data.notes.contains("patent cliff"));
        assert!(
            data.fto_status.starts_with("Favorable")
                || data.fto_status.starts_with("Requires licensing")
        );
    }
}
