//! The GDP estimator — a deliberately rough, randomised scaling heuristic.
//!
//! `estimated_gdp = population * factor / exchange_rate`, where `factor` is
//! drawn uniformly from `[1000, 2000)` independently for every country on
//! every refresh. The non-determinism is documented behavior, not an
//! accident: the estimate is a reproducibility-agnostic proxy, never an
//! authoritative statistic. The randomness lives behind [`FactorSource`] so
//! tests can pin the factor and assert the formula exactly.

/// Source of the per-country scaling factor.
pub trait FactorSource {
  /// Draw one factor. Production sources return a value in `[1000, 2000)`.
  fn factor(&mut self) -> f64;
}

/// Production source: a fresh uniform draw per call from the thread RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngFactors;

impl FactorSource for ThreadRngFactors {
  fn factor(&mut self) -> f64 {
    use rand::Rng as _;
    rand::thread_rng().gen_range(1000.0..2000.0)
  }
}

/// Test source: always returns the same factor.
#[derive(Debug, Clone, Copy)]
pub struct FixedFactors(pub f64);

impl FactorSource for FixedFactors {
  fn factor(&mut self) -> f64 { self.0 }
}

/// Estimate GDP for one country.
///
/// Absent or non-positive exchange rates yield `0.0` — no factor is drawn
/// in that case.
pub fn estimate_gdp(
  population: u64,
  exchange_rate: Option<f64>,
  factors: &mut impl FactorSource,
) -> f64 {
  match exchange_rate {
    Some(rate) if rate > 0.0 => population as f64 * factors.factor() / rate,
    _ => 0.0,
  }
}
