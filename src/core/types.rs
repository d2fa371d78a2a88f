use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionParams {
    pub threshold: f64,
    pub pareto_alpha: f64,
    pub pareto_xm: f64,
    pub log_normal_mu: f64,
    pub log_normal_sigma: f64,
    pub mixing_proportion: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WealthInputs {
    pub annual_income: f64,
    pub total_assets: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WealthDataset {
    pub population: u64,
    pub gini_coefficient: f64,
    pub median_wealth: f64,
    pub mean_wealth: f64,
    pub top10_percent_threshold: f64,
    pub top1_percent_threshold: f64,
    pub top1_percent_wealth_share: f64,
    pub top10_percent_wealth_share: f64,
    pub pareto_alpha: f64,
    pub pareto_xm: f64,
    pub log_normal_mu: f64,
    pub log_normal_sigma: f64,
    pub total_wealth: f64,
    #[serde(default)]
    pub region_multipliers: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreWeights {
    pub annual_income_years: f64,
    pub asset_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub japan: WealthDataset,
    pub world: WealthDataset,
    pub japan_score_threshold: f64,
    // Informational; the world model switches at `world.top10_percent_threshold`.
    pub world_score_threshold: f64,
    pub usd_to_jpy: f64,
    pub score_weights: ScoreWeights,
    pub data_version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionPosition {
    // 0 is the wealthiest
    pub percentile: f64,
    pub wealth_share: f64,
    pub wealth_score: f64,
    pub estimated_rank: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMetadata {
    pub exchange_rate: f64,
    pub calculation_method: &'static str,
    pub data_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WealthPositionResult {
    pub japan: RegionPosition,
    pub world: RegionPosition,
    pub metadata: ResultMetadata,
}
