//! Market Agent
//!
//! Estimates the commercial landscape for a molecule: market size,
//! growth rate, leading competitors and growth drivers. The reference
//! implementation fabricates every figure from randomized choice sets;
//! a real variant would query market intelligence databases.

use crate::agents::{pick, prefix, sample, Agent, Latency, COMPANIES, THERAPEUTIC_AREAS};
use crate::models::MarketData;
use crate::types::AppResult;
use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

const GROWTH_DRIVERS: &[&str] = &[
    "Increasing prevalence of target conditions",
    "Favorable regulatory environment",
    "Growing healthcare expenditure in emerging markets",
    "Patent expiration of competing molecules",
];

pub struct MarketAgent {
    latency: Latency,
}

impl MarketAgent {
    pub const LATENCY: Latency = Latency::from_millis(1500, 1000);

    pub fn new(latency: Latency) -> Self {
        Self { latency }
    }

    fn generate(molecule: &str) -> MarketData {
        let mut rng = rand::thread_rng();

        let cagr_pct = rng.gen_range(5.0..15.0);
        let market_size_bn = rng.gen_range(10.0..60.0);
        let competitor_count = rng.gen_range(2..=5);
        let area = pick(&mut rng, THERAPEUTIC_AREAS);

        MarketData {
            cagr_pct,
            market_size_bn,
            leading_competitors: sample(&mut rng, COMPANIES, competitor_count),
            summary: format!(
                "{molecule} shows strong market potential in the {area} segment \
                 with sustained demand growth projected through 2030."
            ),
            growth_drivers: prefix(&mut rng, GROWTH_DRIVERS, 2, 3),
        }
    }
}

#[async_trait]
impl Agent for MarketAgent {
    type Output = MarketData;

    async fn produce(&self, molecule: &str) -> AppResult<MarketData> {
        self.latency.sleep().await;
        let data = Self::generate(molecule);
        debug!(
            molecule,
            cagr_pct = data.cagr_pct,
            competitors = data.leading_competitors.len(),
            "market agent finished"
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn produce_respects_value_ranges() {
        let agent = MarketAgent::new(Latency::ZERO);
        let data = agent.produce("Metformin").await.unwrap();

        assert!((5.0..15.0).contains(&data.cagr_pct));
        assert!((10.0..60.0).contains(&data.market_size_bn));
        assert!((2..=5).contains(&data.leading_competitors.len()));
        assert!((2..=3).contains(&data.growth_drivers.len()));
        assert!(data.summary.contains("Metformin"));
    }

    #[tokio::test]
    async fn calls_are_independent() {
        let agent = MarketAgent::new(Latency::ZERO);
        let a = agent.produce("Aspirin").await.unwrap();
        let b = agent.produce("Aspirin").await.unwrap();
        // Both valid on their own; the second call is not influenced by
        // the first beyond sharing the same pools.
        assert!(a.summary.contains("Aspirin"));
        assert!(b.summary.contains("Aspirin"));
    }
}
