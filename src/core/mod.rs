mod calculator;
mod datasets;
mod distributions;
mod input;
mod types;

pub use calculator::{
    CALCULATION_METHOD, calculate_wealth_position, japan_params, validate_results, wealth_score,
};
pub use datasets::{REFERENCE_DATA_VERSION, japan_dataset, world_dataset};
pub use distributions::{
    HOME_REGION, TAIL_MIXING_PROPORTION, log_normal_cdf, normal_cdf, pareto_cdf,
    percentile_with_mixed_distribution, wealth_share, world_params, world_percentile,
};
pub use input::{NumericInput, parse_number_input};
pub use types::{
    DistributionParams, ModelConfig, RegionPosition, ResultMetadata, ScoreWeights, WealthDataset,
    WealthInputs, WealthPositionResult,
};
