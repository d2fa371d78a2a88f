use super::distributions::{
    HOME_REGION, TAIL_MIXING_PROPORTION, percentile_with_mixed_distribution, wealth_share,
    world_percentile,
};
use super::input::{NumericInput, parse_number_input};
use super::types::{
    DistributionParams, ModelConfig, RegionPosition, ResultMetadata, ScoreWeights, WealthDataset,
    WealthInputs, WealthPositionResult,
};

pub const CALCULATION_METHOD: &str = "mixed_distribution";

pub fn wealth_score(annual_income: f64, total_assets: f64, weights: ScoreWeights) -> f64 {
    annual_income * weights.annual_income_years + total_assets * weights.asset_weight
}

impl WealthInputs {
    pub fn new(annual_income: f64, total_assets: f64) -> Self {
        Self {
            annual_income: non_negative(annual_income),
            total_assets: non_negative(total_assets),
        }
    }

    pub fn parse(annual_income: &NumericInput, total_assets: &NumericInput) -> Self {
        Self::new(
            parse_number_input(annual_income),
            parse_number_input(total_assets),
        )
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}

pub fn japan_params(config: &ModelConfig) -> DistributionParams {
    DistributionParams {
        threshold: config.japan_score_threshold,
        pareto_alpha: config.japan.pareto_alpha,
        pareto_xm: config.japan.pareto_xm,
        log_normal_mu: config.japan.log_normal_mu,
        log_normal_sigma: config.japan.log_normal_sigma,
        mixing_proportion: TAIL_MIXING_PROPORTION,
    }
}

pub fn calculate_wealth_position(
    config: &ModelConfig,
    annual_income: f64,
    total_assets: f64,
) -> WealthPositionResult {
    let inputs = WealthInputs::new(annual_income, total_assets);
    let score = wealth_score(
        inputs.annual_income,
        inputs.total_assets,
        config.score_weights,
    );

    let japan = percentile_with_mixed_distribution(score, &japan_params(config));

    let score_usd = score / config.usd_to_jpy;
    let world = world_percentile(score_usd, &config.world, HOME_REGION);

    WealthPositionResult {
        japan: region_position(japan, score, &config.japan),
        world: region_position(world, score_usd, &config.world),
        metadata: ResultMetadata {
            exchange_rate: config.usd_to_jpy,
            calculation_method: CALCULATION_METHOD,
            data_version: config.data_version.clone(),
        },
    }
}

fn region_position(percentile: f64, score: f64, dataset: &WealthDataset) -> RegionPosition {
    let above = 1.0 - percentile;
    RegionPosition {
        percentile: above * 100.0,
        wealth_share: wealth_share(percentile, dataset),
        wealth_score: score,
        estimated_rank: (above * dataset.population as f64).round() as u64,
    }
}

// Japan and world ranks are not compared; the purchasing-power adjustment
// can invert them.
pub fn validate_results(result: &WealthPositionResult) -> bool {
    [&result.japan, &result.world].into_iter().all(|region| {
        (0.0..=100.0).contains(&region.percentile) && (0.0..=1.0).contains(&region.wealth_share)
    })
}
