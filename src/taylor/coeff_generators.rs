// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Closed-form Taylor coefficients of the elementary functions.
//!
//! | function   | coefficient n about c                     |
//! |------------|-------------------------------------------|
//! | exp        | exp(c) / n!                               |
//! | log        | log(c) for n = 0, (-1)^(n+1) c^(-n) / n   |
//! | sin        | sin(c + nπ/2) / n!                        |
//! | cos        | cos(c + nπ/2) / n!                        |
//! | 1/x        | (-1)^n c^(-(n+1))                         |
//! | x^k        | k(k-1)...(k-n+1) / n! · c^(k-n)           |
//! | log Γ      | log Γ(c) for n = 0, ψ⁽ⁿ⁻¹⁾(c) / n!         |
use crate::taylor::special_functions::{factorial, falling_factorial, ln_gamma, polygamma};
use crate::taylor::taylor_errors::{TaylorError, TaylorResult, domain_error};
use crate::taylor::truncated_series::TruncatedSeries;
use std::fmt;

/// A primitive function: direct evaluation plus the n-th Taylor coefficient
/// about an arbitrary center.
pub trait CoeffGenerator {
    fn name(&self) -> String;

    fn coefficient(&self, center: f64, n: usize) -> TaylorResult<f64>;

    fn evaluate(&self, x: f64) -> f64;

    fn inverse_evaluate(&self, _y: f64) -> Option<f64> {
        None
    }

    /// the first `truncation_order` coefficients as a series about `center`
    fn expansion(&self, center: f64, truncation_order: usize) -> TaylorResult<TruncatedSeries> {
        if truncation_order == 0 {
            return Err(TaylorError::InvalidTruncationOrder(truncation_order));
        }
        let coefficients = (0..truncation_order)
            .map(|n| self.coefficient(center, n))
            .collect::<TaylorResult<Vec<f64>>>()?;
        TruncatedSeries::new(coefficients, center, truncation_order)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementaryFunction {
    Exponential,
    Logarithm,
    Sine,
    Cosine,
    /// 1/x
    Reciprocal,
    /// x^k for real k
    Power(f64),
    LogGamma,
}

impl fmt::Display for ElementaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ElementaryFunction::Exponential => write!(f, "exp"),
            ElementaryFunction::Logarithm => write!(f, "log"),
            ElementaryFunction::Sine => write!(f, "sin"),
            ElementaryFunction::Cosine => write!(f, "cos"),
            ElementaryFunction::Reciprocal => write!(f, "reciprocal"),
            ElementaryFunction::Power(k) if *k == 1.0 => write!(f, "x"),
            ElementaryFunction::Power(k) => write!(f, "x^{}", k),
            ElementaryFunction::LogGamma => write!(f, "log_gamma"),
        }
    }
}

/// (-1)^n
fn alternating(n: usize) -> f64 {
    if n % 2 == 0 { 1.0 } else { -1.0 }
}

/// sin(c + nπ/2) reduced by the period so that the zeros at c = 0 stay exact
fn shifted_sine(center: f64, n: usize) -> f64 {
    match n % 4 {
        0 => center.sin(),
        1 => center.cos(),
        2 => -center.sin(),
        _ => -center.cos(),
    }
}

/// base^exponent for an integral exponent; `powi` only while the exponent fits an i32
fn integer_power(base: f64, exponent: f64) -> f64 {
    if exponent.abs() <= i32::MAX as f64 {
        base.powi(exponent as i32)
    } else {
        base.powf(exponent)
    }
}

fn power_coefficient(k: f64, center: f64, n: usize) -> TaylorResult<f64> {
    if !k.is_finite() {
        return Err(domain_error("power", k, "exponent must be finite"));
    }
    let binomial = falling_factorial(k, n) / factorial(n);
    if k.fract() == 0.0 {
        if k >= 0.0 {
            // polynomial: everything past degree k vanishes
            if n as f64 > k {
                return Ok(0.0);
            }
        } else if center == 0.0 {
            return Err(domain_error("power", center, "negative power is singular at 0"));
        }
        return Ok(binomial * integer_power(center, k - n as f64));
    }
    if center <= 0.0 {
        return Err(domain_error(
            "power",
            center,
            "non-integer power needs a positive center",
        ));
    }
    Ok(binomial * center.powf(k - n as f64))
}

impl CoeffGenerator for ElementaryFunction {
    fn name(&self) -> String {
        self.to_string()
    }

    fn coefficient(&self, center: f64, n: usize) -> TaylorResult<f64> {
        match self {
            ElementaryFunction::Exponential => Ok(center.exp() / factorial(n)),
            ElementaryFunction::Logarithm => {
                if !(center > 0.0) {
                    return Err(domain_error("log", center, "center must be positive"));
                }
                if n == 0 {
                    Ok(center.ln())
                } else {
                    Ok(-alternating(n) * center.powi(-(n as i32)) / n as f64)
                }
            }
            ElementaryFunction::Sine => Ok(shifted_sine(center, n) / factorial(n)),
            // cos(c + nπ/2) = sin(c + (n+1)π/2)
            ElementaryFunction::Cosine => Ok(shifted_sine(center, n + 1) / factorial(n)),
            ElementaryFunction::Reciprocal => {
                if center == 0.0 {
                    return Err(domain_error("reciprocal", center, "singular at 0"));
                }
                Ok(alternating(n) * center.powi(-(n as i32 + 1)))
            }
            ElementaryFunction::Power(k) => power_coefficient(*k, center, n),
            ElementaryFunction::LogGamma => {
                if !(center > 0.0) {
                    return Err(domain_error("log_gamma", center, "center must be positive"));
                }
                if n == 0 {
                    ln_gamma(center)
                } else {
                    Ok(polygamma(n - 1, center)? / factorial(n))
                }
            }
        }
    }

    fn evaluate(&self, x: f64) -> f64 {
        match self {
            ElementaryFunction::Exponential => x.exp(),
            ElementaryFunction::Logarithm => x.ln(),
            ElementaryFunction::Sine => x.sin(),
            ElementaryFunction::Cosine => x.cos(),
            ElementaryFunction::Reciprocal => 1.0 / x,
            ElementaryFunction::Power(k) if k.fract() == 0.0 => integer_power(x, *k),
            ElementaryFunction::Power(k) => x.powf(*k),
            ElementaryFunction::LogGamma => ln_gamma(x).unwrap_or(f64::NAN),
        }
    }

    fn inverse_evaluate(&self, y: f64) -> Option<f64> {
        match self {
            ElementaryFunction::Exponential => Some(y.ln()),
            ElementaryFunction::Logarithm => Some(y.exp()),
            ElementaryFunction::Sine => Some(y.asin()),
            ElementaryFunction::Cosine => Some(y.acos()),
            ElementaryFunction::Reciprocal => Some(1.0 / y),
            ElementaryFunction::Power(k) if *k == 0.0 => None,
            // odd integer powers are invertible over the whole line
            ElementaryFunction::Power(k) if y < 0.0 && k.fract() == 0.0 && k % 2.0 != 0.0 => {
                Some(-(-y).powf(1.0 / k))
            }
            ElementaryFunction::Power(k) => Some(y.powf(1.0 / k)),
            ElementaryFunction::LogGamma => None,
        }
    }
}

type Evaluator = Box<dyn Fn(f64) -> f64>;
type CoefficientFormula = Box<dyn Fn(f64, usize) -> TaylorResult<f64>>;

/// user supplied primitive: an evaluator and a coefficient formula
pub struct ClosureGenerator {
    name: String,
    evaluator: Evaluator,
    formula: CoefficientFormula,
    inverse: Option<Evaluator>,
}

impl ClosureGenerator {
    pub fn new<E, C>(name: &str, evaluator: E, formula: C) -> Self
    where
        E: Fn(f64) -> f64 + 'static,
        C: Fn(f64, usize) -> TaylorResult<f64> + 'static,
    {
        ClosureGenerator {
            name: name.to_string(),
            evaluator: Box::new(evaluator),
            formula: Box::new(formula),
            inverse: None,
        }
    }

    pub fn with_inverse<I>(mut self, inverse: I) -> Self
    where
        I: Fn(f64) -> f64 + 'static,
    {
        self.inverse = Some(Box::new(inverse));
        self
    }
}

impl CoeffGenerator for ClosureGenerator {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn coefficient(&self, center: f64, n: usize) -> TaylorResult<f64> {
        (self.formula)(center, n)
    }

    fn evaluate(&self, x: f64) -> f64 {
        (self.evaluator)(x)
    }

    fn inverse_evaluate(&self, y: f64) -> Option<f64> {
        self.inverse.as_ref().map(|inverse| inverse(y))
    }
}
