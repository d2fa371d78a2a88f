use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;

use super::types::{ModelConfig, ScoreWeights, WealthDataset};

pub const REFERENCE_DATA_VERSION: &str = "2024.05";

// JPY
pub fn japan_dataset() -> WealthDataset {
    WealthDataset {
        population: 125_800_000,
        gini_coefficient: 0.38,
        median_wealth: 15_000_000.0,
        mean_wealth: 25_000_000.0,
        top10_percent_threshold: 8_000_000.0,
        top1_percent_threshold: 15_000_000.0,
        top1_percent_wealth_share: 0.20,
        top10_percent_wealth_share: 0.50,
        pareto_alpha: 1.5,
        pareto_xm: 50_000_000.0,
        log_normal_mu: 15.5,
        log_normal_sigma: 0.8,
        total_wealth: 1.8e15,
        region_multipliers: BTreeMap::new(),
    }
}

// USD
pub fn world_dataset() -> WealthDataset {
    let region_multipliers = [
        ("japan", 0.85),
        ("northAmerica", 1.0),
        ("europe", 0.95),
        ("asia", 0.7),
        ("africa", 0.5),
        ("southAmerica", 0.6),
        ("oceania", 0.9),
    ]
    .into_iter()
    .map(|(region, multiplier)| (region.to_string(), multiplier))
    .collect();

    WealthDataset {
        population: 8_000_000_000,
        gini_coefficient: 0.82,
        median_wealth: 8_654.0,
        mean_wealth: 87_489.0,
        top10_percent_threshold: 138_000.0,
        top1_percent_threshold: 1_000_000.0,
        top1_percent_wealth_share: 0.47,
        top10_percent_wealth_share: 0.85,
        pareto_alpha: 1.3,
        pareto_xm: 100_000.0,
        log_normal_mu: 9.5,
        log_normal_sigma: 1.2,
        total_wealth: 5e14,
        region_multipliers,
    }
}

impl ModelConfig {
    pub fn reference() -> Self {
        Self {
            japan: japan_dataset(),
            world: world_dataset(),
            japan_score_threshold: 100_000_000.0,
            world_score_threshold: 1_000_000.0,
            usd_to_jpy: 150.0,
            score_weights: ScoreWeights {
                annual_income_years: 10.0,
                asset_weight: 1.0,
            },
            data_version: REFERENCE_DATA_VERSION.to_string(),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading dataset file {}", path.display()))?;
        let config: ModelConfig = serde_json::from_str(&data)
            .with_context(|| format!("parsing dataset file {}", path.display()))?;
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    pub fn with_exchange_rate(mut self, usd_to_jpy: f64) -> Result<Self, String> {
        self.usd_to_jpy = usd_to_jpy;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_dataset("japan", &self.japan)?;
        validate_dataset("world", &self.world)?;

        if !self.japan_score_threshold.is_finite() || self.japan_score_threshold <= 0.0 {
            return Err("japanScoreThreshold must be > 0".to_string());
        }

        if !self.usd_to_jpy.is_finite() || self.usd_to_jpy <= 0.0 {
            return Err("usdToJpy must be > 0".to_string());
        }

        let weights = self.score_weights;
        if !weights.annual_income_years.is_finite() || weights.annual_income_years < 0.0 {
            return Err("scoreWeights.annualIncomeYears must be >= 0".to_string());
        }
        if !weights.asset_weight.is_finite() || weights.asset_weight < 0.0 {
            return Err("scoreWeights.assetWeight must be >= 0".to_string());
        }

        if self.data_version.trim().is_empty() {
            return Err("dataVersion must not be empty".to_string());
        }

        Ok(())
    }
}

fn validate_dataset(name: &str, dataset: &WealthDataset) -> Result<(), String> {
    if dataset.population == 0 {
        return Err(format!("{name}.population must be > 0"));
    }

    for (field, value) in [
        ("paretoAlpha", dataset.pareto_alpha),
        ("paretoXm", dataset.pareto_xm),
        ("logNormalSigma", dataset.log_normal_sigma),
        ("top10PercentThreshold", dataset.top10_percent_threshold),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(format!("{name}.{field} must be > 0"));
        }
    }

    if !dataset.log_normal_mu.is_finite() {
        return Err(format!("{name}.logNormalMu must be finite"));
    }

    for (field, share) in [
        ("top1PercentWealthShare", dataset.top1_percent_wealth_share),
        ("top10PercentWealthShare", dataset.top10_percent_wealth_share),
    ] {
        if !(0.0..=1.0).contains(&share) {
            return Err(format!("{name}.{field} must be between 0 and 1"));
        }
    }

    if dataset.top1_percent_wealth_share > dataset.top10_percent_wealth_share {
        return Err(format!(
            "{name}.top1PercentWealthShare cannot exceed top10PercentWealthShare"
        ));
    }

    for (region, multiplier) in &dataset.region_multipliers {
        if !multiplier.is_finite() || *multiplier <= 0.0 {
            return Err(format!("{name}.regionMultipliers.{region} must be > 0"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "wealth-position-{}-{name}.json",
            std::process::id()
        ))
    }

    #[test]
    fn reference_configuration_is_valid() {
        let config = ModelConfig::reference();
        config.validate().expect("reference config must validate");
        assert_eq!(config.usd_to_jpy, 150.0);
        assert_eq!(config.data_version, "2024.05");
        assert!(config.japan.region_multipliers.is_empty());
        assert_eq!(config.world.region_multipliers.get("japan"), Some(&0.85));
    }

    #[test]
    fn validate_rejects_non_positive_pareto_shape() {
        let mut config = ModelConfig::reference();
        config.world.pareto_alpha = 0.0;

        let err = config.validate().expect_err("must reject alpha <= 0");
        assert!(err.contains("world.paretoAlpha"));
    }

    #[test]
    fn validate_rejects_inverted_wealth_shares() {
        let mut config = ModelConfig::reference();
        config.japan.top1_percent_wealth_share = 0.6;

        let err = config.validate().expect_err("must reject top1 > top10");
        assert!(err.contains("japan.top1PercentWealthShare"));
    }

    #[test]
    fn validate_rejects_negative_region_multiplier() {
        let mut config = ModelConfig::reference();
        config
            .world
            .region_multipliers
            .insert("asia".to_string(), -0.7);

        let err = config.validate().expect_err("must reject negative multiplier");
        assert!(err.contains("world.regionMultipliers.asia"));
    }

    #[test]
    fn with_exchange_rate_overrides_and_validates() {
        let config = ModelConfig::reference()
            .with_exchange_rate(140.0)
            .expect("valid rate");
        assert_eq!(config.usd_to_jpy, 140.0);

        let err = ModelConfig::reference()
            .with_exchange_rate(0.0)
            .expect_err("must reject zero rate");
        assert!(err.contains("usdToJpy"));
    }

    #[test]
    fn load_from_file_reads_serialized_configuration() {
        let mut expected = ModelConfig::reference();
        expected.usd_to_jpy = 155.0;
        expected.data_version = "2025.01".to_string();

        let path = temp_config_path("roundtrip");
        let json = serde_json::to_string_pretty(&expected).expect("config should serialize");
        fs::write(&path, json).expect("failed to write dataset file");

        let loaded = ModelConfig::load_from_file(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.expect("config should load"), expected);
    }

    #[test]
    fn load_from_file_reports_validation_errors() {
        let mut invalid = ModelConfig::reference();
        invalid.japan.population = 0;

        let path = temp_config_path("invalid");
        let json = serde_json::to_string(&invalid).expect("config should serialize");
        fs::write(&path, json).expect("failed to write dataset file");

        let err = ModelConfig::load_from_file(&path).expect_err("must reject population 0");
        let _ = fs::remove_file(&path);
        assert!(format!("{err:#}").contains("japan.population"));
    }

    #[test]
    fn load_from_file_reports_missing_file() {
        let err = ModelConfig::load_from_file(temp_config_path("missing"))
            .expect_err("missing file must fail");
        assert!(format!("{err:#}").contains("reading dataset file"));
    }
}
