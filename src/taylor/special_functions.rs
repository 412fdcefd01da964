// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Real-valued special functions needed by the coefficient table:
//! factorials, log-gamma, digamma and polygamma.
//!
//! Gamma-family functions push the argument up with the recurrence
//! relations until it is large and then use the asymptotic (Stirling /
//! Bernoulli) series, which converges very quickly there.
use crate::taylor::taylor_errors::{TaylorResult, domain_error};
use std::f64::consts::PI;

/// Bernoulli numbers B2, B4, ..., B20
const BERNOULLI: [f64; 10] = [
    1.0 / 6.0,
    -1.0 / 30.0,
    1.0 / 42.0,
    -1.0 / 30.0,
    5.0 / 66.0,
    -691.0 / 2730.0,
    7.0 / 6.0,
    -3617.0 / 510.0,
    43867.0 / 798.0,
    -174611.0 / 330.0,
];

/// arguments are shifted above this value before the asymptotic series is used
const ASYMPTOTIC_THRESHOLD: f64 = 10.0;

/// n! as a float
pub fn factorial(n: usize) -> f64 {
    (1..=n).map(|i| i as f64).product()
}

/// k (k-1) (k-2) ... (k-n+1), with the empty product 1 for n = 0
pub fn falling_factorial(k: f64, n: usize) -> f64 {
    let mut product = 1.0;
    for i in 0..n {
        product *= k - i as f64;
    }
    product
}

fn is_pole(x: f64) -> bool {
    x <= 0.0 && x == x.floor()
}

/// ln Γ(x) for x > 0
pub fn ln_gamma(x: f64) -> TaylorResult<f64> {
    if !x.is_finite() || x <= 0.0 {
        return Err(domain_error("ln_gamma", x, "argument must be positive"));
    }
    // Γ(z) = Γ(x) x (x+1) ... (z-1)
    let mut z = x;
    let mut shift = 0.0;
    while z < ASYMPTOTIC_THRESHOLD {
        shift += z.ln();
        z += 1.0;
    }
    let inv = 1.0 / z;
    let inv2 = inv * inv;
    let mut power = inv;
    let mut correction = 0.0;
    for (k, b) in BERNOULLI.iter().take(7).enumerate() {
        let m = 2.0 * (k + 1) as f64;
        correction += b / (m * (m - 1.0)) * power;
        power *= inv2;
    }
    Ok((z - 0.5) * z.ln() - z + 0.5 * (2.0 * PI).ln() + correction - shift)
}

/// ψ(x) = d/dx ln Γ(x), defined away from the non-positive integers
pub fn digamma(x: f64) -> TaylorResult<f64> {
    if !x.is_finite() || is_pole(x) {
        return Err(domain_error("digamma", x, "pole at non-positive integers"));
    }
    // ψ(x) = ψ(x+1) - 1/x
    let mut z = x;
    let mut acc = 0.0;
    while z < ASYMPTOTIC_THRESHOLD {
        acc -= 1.0 / z;
        z += 1.0;
    }
    let inv2 = 1.0 / (z * z);
    let mut power = inv2;
    let mut series = 0.0;
    for (k, b) in BERNOULLI.iter().take(7).enumerate() {
        let m = 2.0 * (k + 1) as f64;
        series += b / m * power;
        power *= inv2;
    }
    Ok(acc + z.ln() - 0.5 / z - series)
}

/// ψ⁽ⁿ⁾(x), the n-th derivative of the digamma function
pub fn polygamma(n: usize, x: f64) -> TaylorResult<f64> {
    if n == 0 {
        return digamma(x);
    }
    if !x.is_finite() || is_pole(x) {
        return Err(domain_error("polygamma", x, "pole at non-positive integers"));
    }
    // (-1)^(n+1)
    let sign = if n % 2 == 1 { 1.0 } else { -1.0 };
    let n_factorial = factorial(n);
    let nf = n as f64;
    // the Bernoulli tail behaves well once z is large compared to n
    let threshold = ASYMPTOTIC_THRESHOLD.max(2.0 * nf);

    // ψ⁽ⁿ⁾(x) = ψ⁽ⁿ⁾(x+1) + (-1)^(n+1) n! / x^(n+1)
    let mut z = x;
    let mut acc = 0.0;
    while z < threshold {
        acc += sign * n_factorial / z.powi(n as i32 + 1);
        z += 1.0;
    }

    let leading = factorial(n - 1) / z.powi(n as i32);
    let mut series = leading + n_factorial / (2.0 * z.powi(n as i32 + 1));
    // r_k = (2k+n-1)! / ((2k)! z^(2k+n))
    let mut r = leading;
    for (k, b) in BERNOULLI.iter().take(8).enumerate() {
        let m = 2.0 * (k + 1) as f64;
        r *= (m + nf - 2.0) * (m + nf - 1.0) / ((m - 1.0) * m * z * z);
        series += b * r;
    }
    Ok(acc + sign * series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

    #[test]
    fn test_factorials() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(5), 120.0);
        assert_eq!(falling_factorial(5.0, 0), 1.0);
        assert_eq!(falling_factorial(5.0, 2), 20.0);
        assert_eq!(falling_factorial(3.0, 5), 0.0);
        assert_relative_eq!(falling_factorial(0.5, 2), -0.25, epsilon = 1e-15);
    }

    #[test]
    fn test_ln_gamma_known_values() {
        assert_relative_eq!(ln_gamma(1.0).unwrap(), 0.0, epsilon = 1e-13);
        assert_relative_eq!(ln_gamma(2.0).unwrap(), 0.0, epsilon = 1e-13);
        assert_relative_eq!(ln_gamma(0.5).unwrap(), PI.sqrt().ln(), epsilon = 1e-13);
        assert_relative_eq!(ln_gamma(10.0).unwrap(), 362880.0_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(
            ln_gamma(30.5).unwrap(),
            ln_gamma(29.5).unwrap() + 29.5_f64.ln(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_ln_gamma_domain() {
        assert!(ln_gamma(0.0).is_err());
        assert!(ln_gamma(-1.5).is_err());
        assert!(ln_gamma(f64::NAN).is_err());
    }

    #[test]
    fn test_digamma() {
        assert_relative_eq!(digamma(1.0).unwrap(), -EULER_GAMMA, epsilon = 1e-13);
        assert_relative_eq!(
            digamma(0.5).unwrap(),
            -EULER_GAMMA - 2.0 * 2.0_f64.ln(),
            epsilon = 1e-13
        );
        // ψ(x+1) = ψ(x) + 1/x holds for negative non-integers too
        assert_relative_eq!(
            digamma(-0.5).unwrap() + 1.0 / -0.5,
            digamma(0.5).unwrap(),
            epsilon = 1e-12
        );
        assert!(digamma(-2.0).is_err());
    }

    #[test]
    fn test_polygamma() {
        let zeta3 = 1.202_056_903_159_594_2;
        assert_relative_eq!(polygamma(1, 1.0).unwrap(), PI * PI / 6.0, epsilon = 1e-12);
        assert_relative_eq!(polygamma(2, 1.0).unwrap(), -2.0 * zeta3, epsilon = 1e-12);
        assert_relative_eq!(polygamma(3, 1.0).unwrap(), PI.powi(4) / 15.0, epsilon = 1e-11);
        // trigamma(1/2) = π²/2
        assert_relative_eq!(polygamma(1, 0.5).unwrap(), PI * PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(polygamma(0, 2.0).unwrap(), 1.0 - EULER_GAMMA, epsilon = 1e-13);
        assert!(polygamma(1, 0.0).is_err());
    }
}
