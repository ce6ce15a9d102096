//! Synthetic random-walk price series.
//!
//! close[k] = 100.0 + sum(z[0..=k]) with z ~ N(0, 1), one point per calendar
//! day starting at [`reference_date`].

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::domain::price::{PricePoint, PriceSeries};

pub const SYNTHETIC_DAYS: usize = 100;
pub const SYNTHETIC_BASE_PRICE: f64 = 100.0;

/// 2023-01-01, first day of the synthetic series.
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Builds a generator from an optional seed; `None` draws from OS entropy.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn random_walk<R: Rng>(rng: &mut R, start: NaiveDate, days: usize) -> Vec<PricePoint> {
    let mut points = Vec::with_capacity(days);
    let mut level = SYNTHETIC_BASE_PRICE;

    for date in start.iter_days().take(days) {
        let step: f64 = rng.sample(StandardNormal);
        level += step;
        points.push(PricePoint::new(date, level));
    }

    points
}

/// The fallback series: [`SYNTHETIC_DAYS`] points from [`reference_date`].
pub fn generate_series<R: Rng>(rng: &mut R) -> PriceSeries {
    let points = random_walk(rng, reference_date(), SYNTHETIC_DAYS);
    PriceSeries::from_generated(points)
}
