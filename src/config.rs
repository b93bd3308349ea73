use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Multiplier applied to every agent's built-in latency window.
    /// 0 disables the artificial delays entirely.
    pub latency_scale: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            simulation: SimulationConfig {
                latency_scale: env::var("MOLSCOUT_LATENCY_SCALE")
                    .unwrap_or_else(|_| "1.0".to_string())
                    .parse()?,
            },
            report: ReportConfig {
                output_dir: env::var("MOLSCOUT_REPORT_DIR")
                    .unwrap_or_else(|_| ".".to_string())
                    .into(),
            },
        })
    }
}
