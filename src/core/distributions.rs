use std::f64::consts::SQRT_2;

use super::types::{DistributionParams, WealthDataset};

pub const TAIL_MIXING_PROPORTION: f64 = 0.1;

pub const HOME_REGION: &str = "japan";

const TOP1_BAND_START: f64 = 0.99;
const TOP10_BAND_START: f64 = 0.9;

// Abramowitz-Stegun 7.1.26, absolute error below 1.5e-7
pub fn normal_cdf(z: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if z >= 0.0 { 1.0 } else { -1.0 };
    let x = z.abs() / SQRT_2;

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    0.5 * (1.0 + sign * y)
}

/// Pareto CDF. `alpha` and `xm` must be positive; they are not checked.
pub fn pareto_cdf(x: f64, alpha: f64, xm: f64) -> f64 {
    if x < xm {
        return 0.0;
    }
    1.0 - (xm / x).powf(alpha)
}

pub fn log_normal_cdf(x: f64, mu: f64, sigma: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    normal_cdf((x.ln() - mu) / sigma)
}

/// The log-normal body and Pareto tail are fitted independently, so the
/// percentile jumps at `threshold`.
pub fn percentile_with_mixed_distribution(score: f64, params: &DistributionParams) -> f64 {
    if score >= params.threshold {
        let tail = pareto_cdf(score, params.pareto_alpha, params.pareto_xm);
        1.0 - params.mixing_proportion * (1.0 - tail)
    } else {
        let body = log_normal_cdf(score, params.log_normal_mu, params.log_normal_sigma);
        body * (1.0 - params.mixing_proportion)
    }
}

pub fn wealth_share(percentile: f64, dataset: &WealthDataset) -> f64 {
    let population = dataset.population as f64;
    let top1 = dataset.top1_percent_wealth_share;
    let top10 = dataset.top10_percent_wealth_share;

    if percentile >= TOP1_BAND_START {
        let position = (percentile - TOP1_BAND_START) / 0.01;
        (top1 / population) * position.powf(0.5) * 100.0
    } else if percentile >= TOP10_BAND_START {
        let position = (percentile - TOP10_BAND_START) / 0.09;
        ((top10 - top1) / population) * position * 10.0
    } else {
        ((1.0 - top10) / population) * (percentile / TOP10_BAND_START)
    }
}

pub fn world_params(world: &WealthDataset) -> DistributionParams {
    DistributionParams {
        threshold: world.top10_percent_threshold,
        pareto_alpha: world.pareto_alpha,
        pareto_xm: world.pareto_xm,
        log_normal_mu: world.log_normal_mu,
        log_normal_sigma: world.log_normal_sigma,
        mixing_proportion: TAIL_MIXING_PROPORTION,
    }
}

// Unknown regions use a multiplier of 1.0.
pub fn world_percentile(score_usd: f64, world: &WealthDataset, region: &str) -> f64 {
    let multiplier = world.region_multipliers.get(region).copied().unwrap_or(1.0);
    percentile_with_mixed_distribution(score_usd * multiplier, &world_params(world))
}
