//! Log-normal distributions parameterised by mean and coefficient of variation.

use rand::Rng;

use crate::core::error::{DprError, Result};

/// Draw a standard normal variate using the Box-Muller transform.
#[inline]
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1 = rng.gen::<f64>().max(1e-15);
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Log-space parameters of a log-normal distribution.
///
/// `mu` and `sigma` are the mean and standard deviation of `ln(X)`. They are
/// chosen so that `E[X]` equals the requested mean and `std(X) / E[X]` equals
/// the requested coefficient of variation:
///
/// ```text
/// sigma = sqrt(ln(1 + cv^2))
/// mu    = ln(mean) - sigma^2 / 2
/// ```
///
/// Draws are always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNormalParams {
    pub mu: f64,
    pub sigma: f64,
    mean: f64,
}

impl LogNormalParams {
    /// Derive parameters from a positive mean and a non-negative coefficient of variation.
    pub fn from_mean_cv(mean: f64, cv: f64) -> Result<Self> {
        if !mean.is_finite() || mean <= 0.0 {
            return Err(DprError::invalid_parameter(format!(
                "log-normal mean must be a finite value > 0, got {}",
                mean
            )));
        }
        if !cv.is_finite() || cv < 0.0 {
            return Err(DprError::invalid_parameter(format!(
                "coefficient of variation must be a finite value >= 0, got {}",
                cv
            )));
        }

        let sigma = (1.0 + cv * cv).ln().sqrt();
        let mu = mean.ln() - 0.5 * sigma * sigma;
        Ok(Self { mu, sigma, mean })
    }

    /// Mean the parameters were derived from.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// True when the distribution is a point mass at the mean.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.sigma == 0.0
    }

    /// Theoretical median, `exp(mu)`.
    #[inline]
    pub fn median(&self) -> f64 {
        if self.is_degenerate() {
            self.mean
        } else {
            self.mu.exp()
        }
    }

    /// Draw one sample.
    ///
    /// One normal variate is consumed even for a point mass, so the generator
    /// advances identically regardless of the coefficient of variation.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z = standard_normal(rng);
        if self.is_degenerate() {
            self.mean
        } else {
            (self.mu + self.sigma * z).exp()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_parameters() {
        let params = LogNormalParams::from_mean_cv(100.0, 0.2).unwrap();
        let expected_sigma = (1.04f64).ln().sqrt();
        assert!((params.sigma - expected_sigma).abs() < 1e-12);
        assert!((params.mu - (100f64.ln() - 0.5 * expected_sigma * expected_sigma)).abs() < 1e-12);

        // E[X] = exp(mu + sigma^2 / 2) recovers the mean.
        let implied_mean = (params.mu + 0.5 * params.sigma * params.sigma).exp();
        assert!((implied_mean - 100.0).abs() < 1e-9);

        // CV recovered from sigma.
        let implied_cv = ((params.sigma * params.sigma).exp() - 1.0).sqrt();
        assert!((implied_cv - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_zero_cv_is_point_mass() {
        let params = LogNormalParams::from_mean_cv(123.45, 0.0).unwrap();
        assert!(params.is_degenerate());
        assert_eq!(params.median(), 123.45);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(params.sample(&mut rng), 123.45);
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(LogNormalParams::from_mean_cv(0.0, 0.2).is_err());
        assert!(LogNormalParams::from_mean_cv(-5.0, 0.2).is_err());
        assert!(LogNormalParams::from_mean_cv(f64::NAN, 0.2).is_err());
        assert!(LogNormalParams::from_mean_cv(100.0, -0.1).is_err());
        assert!(LogNormalParams::from_mean_cv(100.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_samples_positive() {
        let params = LogNormalParams::from_mean_cv(10.0, 2.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!((0..10_000).all(|_| params.sample(&mut rng) > 0.0));
    }

    #[test]
    fn test_standard_normal_moments() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let n = 50_000;
        let draws: Vec<f64> = (0..n).map(|_| standard_normal(&mut rng)).collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|z| (z - mean).powi(2)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.03);
        assert!((var - 1.0).abs() < 0.05);
    }
}
