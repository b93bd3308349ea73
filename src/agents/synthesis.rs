//! Opportunity Synthesizer
//!
//! Fan-in stage of the pipeline: folds the four category outputs into a
//! recommendation with an indicative confidence score. The phrase-slot
//! thresholds are presentation heuristics kept for behavioral
//! compatibility with the original demo, not domain logic.

use crate::agents::{prefix, AgentOutputs, Latency, Synthesizer};
use crate::models::SynthesisResult;
use crate::types::AppResult;
use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

const RISKS: &[&str] = &[
    "Competitive landscape requires differentiation strategy",
    "Regulatory pathway complexity for new indications",
    "Manufacturing scalability considerations",
    "Market access and pricing pressures",
];

const NEXT_STEPS: &[&str] = &[
    "Conduct detailed FTO analysis for target indication",
    "Initiate biomarker identification studies",
    "Engage regulatory affairs for pathway assessment",
    "Develop partnership strategy with key stakeholders",
    "Prepare proof-of-concept study design",
];

pub struct OpportunitySynthesizer {
    latency: Latency,
}

impl OpportunitySynthesizer {
    pub const LATENCY: Latency = Latency::from_millis(2500, 1000);

    pub fn new(latency: Latency) -> Self {
        Self { latency }
    }

    fn generate(molecule: &str, inputs: &AgentOutputs) -> SynthesisResult {
        let mut rng = rand::thread_rng();

        // Deterministic floor, randomized ceiling: [0.65, 0.95).
        let confidence_score = 0.65 + rng.gen::<f64>() * 0.3;

        // Each phrase slot is selected independently by a single
        // threshold test.
        let strength = if confidence_score > 0.8 {
            "high"
        } else if confidence_score > 0.7 {
            "strong"
        } else {
            "moderate"
        };
        let patent_clause = if inputs.patent.notes.contains("expiring") {
            "favorable patent landscape"
        } else {
            "manageable IP considerations"
        };
        let market_clause = if inputs.market.cagr_pct > 7.0 {
            "robust market growth"
        } else {
            "stable market conditions"
        };
        let clinical_clause = if inputs.clinical.total_trials > 10 {
            "extensive clinical activity"
        } else {
            "growing clinical interest"
        };
        let lead_indication = inputs
            .clinical
            .indications
            .first()
            .and_then(|i| i.split(" - ").next())
            .unwrap_or("novel therapeutic areas");

        let recommendation = format!(
            "Based on comprehensive multi-agent analysis, {molecule} demonstrates \
             {strength} potential for drug repurposing. The convergence of \
             {patent_clause}, {market_clause}, and {clinical_clause} suggests a \
             compelling opportunity for new indication development in {lead_indication}."
        );

        let near_expiry = inputs.patent.expiry_years.first().copied().unwrap_or_default();
        let mid_expiry = inputs.patent.expiry_years.get(1).copied().unwrap_or(near_expiry);

        SynthesisResult {
            recommendation,
            confidence_score,
            key_opportunities: vec![
                format!(
                    "Market CAGR of {:.1}% indicates sustained growth potential",
                    inputs.market.cagr_pct
                ),
                format!(
                    "{} active clinical trials demonstrate ongoing research interest",
                    inputs.clinical.total_trials
                ),
                format!(
                    "Patent expirations in {near_expiry}-{mid_expiry} create development window"
                ),
                format!(
                    "{}+ publications with {} sentiment",
                    inputs.research.publications_count,
                    inputs.research.sentiment.to_string().to_lowercase()
                ),
            ],
            risks: prefix(&mut rng, RISKS, 2, 3),
            next_steps: NEXT_STEPS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Synthesizer for OpportunitySynthesizer {
    async fn synthesize(
        &self,
        molecule: &str,
        inputs: &AgentOutputs,
    ) -> AppResult<SynthesisResult> {
        self.latency.sleep().await;
        let result = Self::generate(molecule, inputs);
        debug!(
            molecule,
            confidence = result.confidence_score,
            "synthesis finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ClinicalData, MarketData, PatentData, PhaseCount, Publication, ResearchData, Sentiment,
    };

    fn fixture_outputs() -> AgentOutputs {
        AgentOutputs {
            market: MarketData {
                cagr_pct: 9.3,
                market_size_bn: 24.0,
                leading_competitors: vec!["Pfizer".to_string(), "Roche".to_string()],
                summary: "Test summary".to_string(),
                growth_drivers: vec!["Driver".to_string()],
            },
            clinical: ClinicalData {
                total_trials: 14,
                phases: vec![PhaseCount {
                    phase: "Phase II".to_string(),
                    count: 4,
                }],
                sponsors: vec!["Merck".to_string()],
                insights: "Test insights".to_string(),
                indications: vec![
                    "Oncology - Primary indication".to_string(),
                    "Neurology - Secondary".to_string(),
                ],
            },
            patent: PatentData {
                total_patents: 18,
                expiry_years: vec![2027, 2030, 2034],
                holders: vec!["Sanofi".to_string()],
                notes: "Multiple formulation patents expiring soon.".to_string(),
                fto_status: "Favorable - Clear path for new indications".to_string(),
            },
            research: ResearchData {
                publications_count: 120,
                publications: vec![Publication {
                    title: "Test paper".to_string(),
                    year: 2026,
                    journal: "NEJM".to_string(),
                }],
                sentiment: Sentiment::Positive,
                key_findings: vec!["Finding".to_string()],
            },
        }
    }

    #[tokio::test]
    async fn confidence_stays_in_range() {
        let synthesizer = OpportunitySynthesizer::new(Latency::ZERO);
        for _ in 0..50 {
            let result = synthesizer
                .synthesize("Metformin", &fixture_outputs())
                .await
                .unwrap();
            assert!((0.65..0.95).contains(&result.confidence_score));
        }
    }

    #[tokio::test]
    async fn recommendation_reflects_inputs() {
        let synthesizer = OpportunitySynthesizer::new(Latency::ZERO);
        let result = synthesizer
            .synthesize("Metformin", &fixture_outputs())
            .await
            .unwrap();

        assert!(result.recommendation.contains("Metformin"));
        // Notes mention "expiring" and CAGR/trials exceed their thresholds.
        assert!(result.recommendation.contains("favorable patent landscape"));
        assert!(result.recommendation.contains("robust market growth"));
        assert!(result.recommendation.contains("extensive clinical activity"));
        assert!(result.recommendation.contains("Oncology"));
    }

    #[tokio::test]
    async fn lists_have_expected_shape() {
        let synthesizer = OpportunitySynthesizer::new(Latency::ZERO);
        let result = synthesizer
            .synthesize("Metformin", &fixture_outputs())
            .await
            .unwrap();

        assert_eq!(result.key_opportunities.len(), 4);
        assert!(result.key_opportunities[2].contains("2027-2030"));
        assert!((2..=3).contains(&result.risks.len()));
        assert_eq!(result.next_steps.len(), NEXT_STEPS.len());
    }

    #[tokio::test]
    async fn below_threshold_inputs_pick_alternate_phrases() {
        let mut outputs = fixture_outputs();
        outputs.market.cagr_pct = 5.5;
        outputs.clinical.total_trials = 6;
        outputs.patent.notes = "Core composition patents active.".to_string();

        let synthesizer = OpportunitySynthesizer::new(Latency::ZERO);
        let result = synthesizer.synthesize("Aspirin", &outputs).await.unwrap();

        assert!(result.recommendation.contains("manageable IP considerations"));
        assert!(result.recommendation.contains("stable market conditions"));
        assert!(result.recommendation.contains("growing clinical interest"));
    }
}
