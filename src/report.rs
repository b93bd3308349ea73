//! Report Export
//!
//! Serializes a completed [`AnalysisRecord`] into a downloadable
//! artifact: a formatted plain-text report or a JSON document. Only the
//! field set is load-bearing; layout is presentation.

use crate::models::AnalysisRecord;
use crate::types::AppResult;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::info;

const RULE: &str =
    "--------------------------------------------------------------------------------";
const BANNER: &str =
    "================================================================================";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    fn extension(self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

/// Render the full plain-text report.
pub fn render_text(record: &AnalysisRecord) -> String {
    let mut out = String::new();

    out.push_str(BANNER);
    out.push_str("\n                      DRUG REPURPOSING ANALYSIS REPORT\n");
    out.push_str("                      AI-Assisted Decision Support Demo\n");
    out.push_str(BANNER);
    out.push_str("\n\nIMPORTANT DISCLAIMER\n");
    out.push_str(RULE);
    out.push_str(
        "\nThis report contains AI-simulated, indicative insights for early-stage\n\
         drug repurposing analysis. All data, estimates, and recommendations are\n\
         fabricated and require validation by qualified experts before any\n\
         clinical, business, or regulatory decisions.\n\n\
         For decision-support only. Human-in-the-loop validation required.\n",
    );
    out.push_str(RULE);
    out.push_str(&format!(
        "\n\nMolecule: {}\nGenerated: {}\nReport ID: {}\n",
        record.molecule.to_uppercase(),
        record.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        record.id
    ));

    section(&mut out, "EXECUTIVE SUMMARY");
    out.push_str(&format!(
        "{}\n\nConfidence Level (Indicative): ~{:.0}%\n\
         Note: This is an AI-estimated confidence range, not a validated metric.\n",
        record.synthesis.recommendation,
        record.synthesis.confidence_score * 100.0
    ));

    section(&mut out, "MARKET INSIGHTS (Indicative)");
    out.push_str(&format!(
        "Est. Market Size: ~${:.1}B (AI-estimated range)\nEst. CAGR: ~{:.1}% (Approximate)\n\n",
        record.market.market_size_bn, record.market.cagr_pct
    ));
    out.push_str("Key Market Players (Illustrative):\n");
    bullets(&mut out, &record.market.leading_competitors);
    out.push_str(&format!("\nSummary: {}\n\nGrowth Drivers:\n", record.market.summary));
    bullets(&mut out, &record.market.growth_drivers);

    section(&mut out, "CLINICAL TRIALS (Indicative)");
    out.push_str(&format!(
        "Est. Active Trials: ~{} (Approximate)\n\nTrial Distribution by Phase:\n",
        record.clinical.total_trials
    ));
    for phase in &record.clinical.phases {
        out.push_str(&format!("  * {}: {} trials\n", phase.phase, phase.count));
    }
    out.push_str("\nKey Sponsors:\n");
    bullets(&mut out, &record.clinical.sponsors);
    out.push_str(&format!(
        "\nClinical Insights: {}\n\nTarget Indications:\n",
        record.clinical.insights
    ));
    bullets(&mut out, &record.clinical.indications);

    section(&mut out, "PATENT LANDSCAPE (Indicative)");
    let expiry: Vec<String> = record
        .patent
        .expiry_years
        .iter()
        .map(|y| y.to_string())
        .collect();
    out.push_str(&format!(
        "Est. Related Patents: ~{} (Approximate count)\n\
         Potential Expiry Window: {} (Subject to verification)\n\n",
        record.patent.total_patents,
        expiry.join(", ")
    ));
    out.push_str("Potential Patent Holders (Illustrative):\n");
    bullets(&mut out, &record.patent.holders);
    out.push_str(&format!(
        "\nPreliminary FTO Assessment: {}\n\
         Note: Requires formal legal review for actual FTO determination.\n\n\
         Notes: {}\n",
        record.patent.fto_status, record.patent.notes
    ));

    section(&mut out, "RESEARCH & PUBLICATIONS (Indicative)");
    out.push_str(&format!(
        "Est. Publications: ~{}+ (Approximate)\nLiterature Sentiment: {} (AI-assessed)\n\n\
         Recent Key Publications:\n",
        record.research.publications_count, record.research.sentiment
    ));
    for publication in &record.research.publications {
        out.push_str(&format!(
            "  * \"{}\" ({}) - {}\n",
            publication.title, publication.year, publication.journal
        ));
    }
    out.push_str("\nKey Research Findings:\n");
    bullets(&mut out, &record.research.key_findings);

    section(&mut out, "KEY OPPORTUNITIES");
    numbered(&mut out, &record.synthesis.key_opportunities);

    section(&mut out, "RISK CONSIDERATIONS (Requires Review)");
    numbered(&mut out, &record.synthesis.risks);
    out.push_str(
        "\nNote: These risk factors are AI-identified and should be validated by\n\
         domain experts before proceeding with any decisions.\n",
    );

    section(&mut out, "RECOMMENDED NEXT STEPS");
    numbered(&mut out, &record.synthesis.next_steps);

    out.push('\n');
    out.push_str(BANNER);
    out.push_str("\n                                  DISCLAIMER\n");
    out.push_str(BANNER);
    out.push_str(
        "\n\nThe insights, estimates, and recommendations contained herein are:\n\n\
         * AI-simulated and indicative in nature\n\
         * Not validated clinical or regulatory data\n\
         * Subject to significant uncertainty and require expert verification\n\
         * Not intended as medical, legal, or investment advice\n\n\
         Human-in-the-loop: Final decisions remain with R&D experts and qualified\n\
         professionals. All data should be independently verified before use in\n\
         clinical, business, or regulatory contexts.\n",
    );
    out.push_str(BANNER);
    out.push('\n');

    out
}

/// Render the record as pretty-printed JSON.
pub fn render_json(record: &AnalysisRecord) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Write the report into `output_dir` and return the artifact path.
pub fn export(
    record: &AnalysisRecord,
    output_dir: &Path,
    format: ReportFormat,
) -> AppResult<PathBuf> {
    let content = match format {
        ReportFormat::Text => render_text(record),
        ReportFormat::Json => render_json(record)?,
    };

    let stem: String = record
        .molecule
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    let filename = format!(
        "{}_Repurposing_Report_{}.{}",
        stem,
        Utc::now().format("%Y-%m-%d"),
        format.extension()
    );

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(filename);
    std::fs::write(&path, content)?;
    info!(path = %path.display(), "report exported");
    Ok(path)
}

fn section(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(RULE);
    out.push_str(&format!("\n{:^80}\n", title));
    out.push_str(RULE);
    out.push('\n');
}

fn bullets(out: &mut String, items: &[String]) {
    for item in items {
        out.push_str(&format!("  * {item}\n"));
    }
}

fn numbered(out: &mut String, items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, item));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ClinicalData, MarketData, PatentData, PhaseCount, Publication, ResearchData, Sentiment,
        SynthesisResult,
    };
    use chrono::Utc;
    use uuid::Uuid;

    fn fixture_record() -> AnalysisRecord {
        AnalysisRecord {
            id: Uuid::new_v4(),
            molecule: "Metformin Extended".to_string(),
            timestamp: Utc::now(),
            market: MarketData {
                cagr_pct: 8.4,
                market_size_bn: 31.2,
                leading_competitors: vec!["Pfizer".to_string()],
                summary: "Strong segment outlook.".to_string(),
                growth_drivers: vec!["Favorable regulatory environment".to_string()],
            },
            clinical: ClinicalData {
                total_trials: 12,
                phases: vec![PhaseCount {
                    phase: "Phase II".to_string(),
                    count: 5,
                }],
                sponsors: vec!["Roche".to_string()],
                insights: "Active development.".to_string(),
                indications: vec!["Oncology - Primary indication".to_string()],
            },
            patent: PatentData {
                total_patents: 21,
                expiry_years: vec![2028, 2031, 2036],
                holders: vec!["Merck".to_string()],
                notes: "Cliff approaching.".to_string(),
                fto_status: "Favorable - Clear path for new indications".to_string(),
            },
            research: ResearchData {
                publications_count: 140,
                publications: vec![Publication {
                    title: "Repurposing Metformin Extended: A systematic review".to_string(),
                    year: 2025,
                    journal: "The Lancet".to_string(),
                }],
                sentiment: Sentiment::Positive,
                key_findings: vec!["Favorable safety profile in long-term studies".to_string()],
            },
            synthesis: SynthesisResult {
                recommendation: "Compelling repurposing opportunity.".to_string(),
                confidence_score: 0.82,
                key_opportunities: vec!["Window 2028-2031".to_string()],
                risks: vec!["Pricing pressure".to_string()],
                next_steps: vec!["Design proof-of-concept study".to_string()],
            },
        }
    }

    #[test]
    fn text_report_contains_required_fields() {
        let record = fixture_record();
        let text = render_text(&record);

        assert!(text.contains("METFORMIN EXTENDED"));
        assert!(text.contains(&record.id.to_string()));
        assert!(text.contains("Compelling repurposing opportunity."));
        assert!(text.contains("~82%"));
        assert!(text.contains("MARKET INSIGHTS"));
        assert!(text.contains("CLINICAL TRIALS"));
        assert!(text.contains("PATENT LANDSCAPE"));
        assert!(text.contains("RESEARCH & PUBLICATIONS"));
        assert!(text.contains("2028, 2031, 2036"));
        assert!(text.contains("AI-simulated and indicative in nature"));
        assert!(text.contains("Human-in-the-loop"));
    }

    #[test]
    fn json_report_round_trips() {
        let record = fixture_record();
        let json = render_json(&record).unwrap();
        let parsed: AnalysisRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn export_writes_file_with_sanitized_name() {
        let record = fixture_record();
        let dir = std::env::temp_dir().join(format!("molscout-test-{}", record.id));

        let path = export(&record, &dir, ReportFormat::Text).unwrap();
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("Metformin_Extended_Repurposing_Report_"));
        assert!(name.ends_with(".txt"));
        assert!(std::fs::read_to_string(&path).unwrap().contains("Report ID"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
