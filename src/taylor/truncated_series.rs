// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! # Truncated Series Module
//!
//! A finite power series Σ aₖ (x - c)^k about a center c that never keeps more
//! than `truncation_order` coefficients. All arithmetic works on the
//! coefficient vectors only and produces a fresh series.
//!
//! ## Main Structures and Methods
//! - `TruncatedSeries` - the series value type. `+ - *` (and `/` with its
//!   fallible twin `try_div`), `compose`, `invert`, `recenter`, `evaluate`
//! - `SeriesInverse` - the series of 1/y about y = a₀, used to build reciprocals
//!
//! ## Truncation bookkeeping
//! The result of a binary operation carries the smaller of the two truncation
//! orders, so an operand that was expanded to fewer terms never pretends to be
//! more accurate after being combined.
use crate::taylor::settings::ExpansionSettings;
use crate::taylor::taylor_errors::{TaylorError, TaylorResult};
use approx::{AbsDiffEq, RelativeEq};
use itertools::{EitherOrBoth, Itertools};
use ndarray::Array1;
use std::fmt;
use std::ops::{Add, Div, Index, Mul, Neg, Sub};
use tabled::{builder::Builder, settings::Style};

#[derive(Clone, Debug, PartialEq)]
pub struct TruncatedSeries {
    /// index = power of (x - center)
    coefficients: Vec<f64>,
    center: f64,
    truncation_order: usize,
}

impl TruncatedSeries {
    /// Creates a series from its coefficients. Coefficients past
    /// `truncation_order` are dropped.
    pub fn new(
        coefficients: Vec<f64>,
        center: f64,
        truncation_order: usize,
    ) -> TaylorResult<Self> {
        if truncation_order == 0 {
            return Err(TaylorError::InvalidTruncationOrder(truncation_order));
        }
        if coefficients.is_empty() {
            return Err(TaylorError::EmptyCoefficients);
        }
        if !center.is_finite() {
            return Err(TaylorError::NonFiniteCenter(center));
        }
        if let Some((index, &value)) = coefficients
            .iter()
            .enumerate()
            .find(|(_, a)| !a.is_finite())
        {
            return Err(TaylorError::NonFiniteCoefficient { index, value });
        }
        Ok(Self::from_raw(coefficients, center, truncation_order))
    }

    /// series about 0
    pub fn from_coefficients(
        coefficients: Vec<f64>,
        truncation_order: usize,
    ) -> TaylorResult<Self> {
        Self::new(coefficients, 0.0, truncation_order)
    }

    pub fn constant(value: f64, center: f64, truncation_order: usize) -> TaylorResult<Self> {
        Self::new(vec![value], center, truncation_order)
    }

    /// Internal constructor for results of arithmetic: inputs are already known
    /// to be well formed (non-empty, order >= 1).
    pub(crate) fn from_raw(
        mut coefficients: Vec<f64>,
        center: f64,
        truncation_order: usize,
    ) -> Self {
        debug_assert!(truncation_order > 0 && !coefficients.is_empty());
        coefficients.truncate(truncation_order);
        TruncatedSeries {
            coefficients,
            center,
            truncation_order,
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn truncation_order(&self) -> usize {
        self.truncation_order
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// always false: a series keeps at least its constant term
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// value of the series at its own center
    pub fn constant_term(&self) -> f64 {
        self.coefficients[0]
    }

    /// coefficient of (x - center)^n, zero past the stored terms
    pub fn coefficient(&self, n: usize) -> f64 {
        self.coefficients.get(n).copied().unwrap_or(0.0)
    }

    /// Σ aₖ (x - center)^k in Horner form
    pub fn evaluate(&self, x: f64) -> f64 {
        let h = x - self.center;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &a| acc * h + a)
    }

    pub fn evaluate_array(&self, x: &Array1<f64>) -> Array1<f64> {
        x.mapv(|xi| self.evaluate(xi))
    }

    pub fn add_scalar(&self, value: f64) -> Self {
        let mut coefficients = self.coefficients.clone();
        coefficients[0] += value;
        Self::from_raw(coefficients, self.center, self.truncation_order)
    }

    pub fn scale(&self, factor: f64) -> Self {
        let coefficients = self.coefficients.iter().map(|a| factor * a).collect();
        Self::from_raw(coefficients, self.center, self.truncation_order)
    }

    fn assert_same_center(&self, other: &Self, operation: &str) {
        assert!(
            self.center == other.center,
            "cannot {} series centered at {} and {}",
            operation,
            self.center,
            other.center
        );
    }

    fn add_series(&self, other: &Self) -> Self {
        self.assert_same_center(other, "add");
        let truncation_order = self.truncation_order.min(other.truncation_order);
        let coefficients = self
            .coefficients
            .iter()
            .zip_longest(other.coefficients.iter())
            .map(|pair| match pair {
                EitherOrBoth::Both(a, b) => a + b,
                EitherOrBoth::Left(a) | EitherOrBoth::Right(a) => *a,
            })
            .collect();
        Self::from_raw(coefficients, self.center, truncation_order)
    }

    /// Cauchy product, never computing terms past the combined truncation order
    fn mul_series(&self, other: &Self) -> Self {
        self.assert_same_center(other, "multiply");
        let truncation_order = self.truncation_order.min(other.truncation_order);
        let n_terms = (self.len() + other.len() - 1).min(truncation_order);
        let coefficients = (0..n_terms)
            .map(|n| {
                let lowest = n.saturating_sub(other.len() - 1);
                let highest = n.min(self.len() - 1);
                (lowest..=highest)
                    .map(|k| self.coefficients[k] * other.coefficients[n - k])
                    .sum()
            })
            .collect();
        Self::from_raw(coefficients, self.center, truncation_order)
    }

    /// self multiplied by itself n times; n = 0 gives the constant 1
    pub fn powi(&self, n: usize) -> Self {
        let mut result = Self::from_raw(vec![1.0], self.center, self.truncation_order);
        for _ in 0..n {
            result = result.mul_series(self);
        }
        result
    }

    /// Multiplicative inverse: 1/y expanded about a₀ (the constant term),
    /// substituted with this series.
    pub fn invert(&self) -> TaylorResult<Self> {
        let a0 = self.constant_term();
        if a0 == 0.0 {
            return Err(TaylorError::DivisionByZero {
                center: self.center,
            });
        }
        SeriesInverse::new(a0, self.truncation_order)?.compose(self)
    }

    pub fn try_div(&self, other: &Self) -> TaylorResult<Self> {
        self.assert_same_center(other, "divide");
        Ok(self.mul_series(&other.invert()?))
    }

    /// f(g(x)) for f = self, g = other with default (strict) settings
    pub fn compose(&self, other: &Self) -> TaylorResult<Self> {
        self.compose_with(other, &ExpansionSettings::default())
    }

    /// Substitutes `other` for the variable of `self`.
    ///
    /// `self` must be expanded about the value `other` takes at its own center,
    /// so that u = other - self.center has no constant term. Then uᵏ only
    /// touches orders >= k and Σ aₖ uᵏ is exact up to the truncation order.
    /// The result is a series about `other.center`.
    pub fn compose_with(&self, other: &Self, settings: &ExpansionSettings) -> TaylorResult<Self> {
        settings.check_composition(self.center, other.constant_term())?;
        let truncation_order = self.truncation_order.min(other.truncation_order);
        let shifted = Self::from_raw(
            other.add_scalar(-self.center).coefficients,
            other.center,
            truncation_order,
        );
        let mut power = shifted.clone();
        let mut result = Self::from_raw(vec![self.coefficients[0]], other.center, truncation_order);
        for k in 1..self.len().min(truncation_order) {
            result = result.add_series(&power.scale(self.coefficients[k]));
            power = power.mul_series(&shifted);
        }
        Ok(result)
    }

    /// Re-expands the stored polynomial about `new_center` using the binomial
    /// shift (x - c)^n = Σⱼ C(n, j) (x - c')^j (c' - c)^(n-j).
    pub fn recenter(&self, new_center: f64) -> TaylorResult<Self> {
        if !new_center.is_finite() {
            return Err(TaylorError::NonFiniteCenter(new_center));
        }
        let delta = new_center - self.center;
        let mut coefficients = vec![0.0; self.len()];
        for (n, &a) in self.coefficients.iter().enumerate() {
            // running binomial C(n, j) and delta^(n-j), j from n down to 0
            let mut binomial = 1.0;
            let mut delta_power = 1.0;
            for j in (0..=n).rev() {
                coefficients[j] += a * binomial * delta_power;
                binomial = binomial * j as f64 / (n - j + 1) as f64;
                delta_power *= delta;
            }
        }
        Ok(Self::from_raw(coefficients, new_center, self.truncation_order))
    }

    /// coefficient listing for logs and reports
    pub fn to_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(vec!["term".to_string(), "coefficient".to_string()]);
        for (k, a) in self.coefficients.iter().enumerate() {
            builder.push_record(vec![
                format!("(x - {})^{}", self.center, k),
                format!("{:.10e}", a),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }

    fn coefficient_pairs<'a>(&'a self, other: &'a Self) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.coefficients
            .iter()
            .zip_longest(other.coefficients.iter())
            .map(|pair| match pair {
                EitherOrBoth::Both(a, b) => (*a, *b),
                EitherOrBoth::Left(a) => (*a, 0.0),
                EitherOrBoth::Right(b) => (0.0, *b),
            })
    }
}

impl fmt::Display for TruncatedSeries {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{}] (center {}, truncation order {})",
            self.coefficients.iter().join(", "),
            self.center,
            self.truncation_order
        )
    }
}

impl Index<usize> for TruncatedSeries {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.coefficients[index]
    }
}

/// Trailing coefficients missing from the shorter series compare as zero.
impl AbsDiffEq for TruncatedSeries {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.center.abs_diff_eq(&other.center, epsilon)
            && self
                .coefficient_pairs(other)
                .all(|(a, b)| a.abs_diff_eq(&b, epsilon))
    }
}

impl RelativeEq for TruncatedSeries {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.center.relative_eq(&other.center, epsilon, max_relative)
            && self
                .coefficient_pairs(other)
                .all(|(a, b)| a.relative_eq(&b, epsilon, max_relative))
    }
}

//////////////////////////////////OPERATORS/////////////////////////////////

impl Add<&TruncatedSeries> for &TruncatedSeries {
    type Output = TruncatedSeries;

    /// # Panics
    /// when the centers differ
    fn add(self, rhs: &TruncatedSeries) -> TruncatedSeries {
        self.add_series(rhs)
    }
}

impl Add<f64> for &TruncatedSeries {
    type Output = TruncatedSeries;

    fn add(self, rhs: f64) -> TruncatedSeries {
        self.add_scalar(rhs)
    }
}

impl Sub<&TruncatedSeries> for &TruncatedSeries {
    type Output = TruncatedSeries;

    fn sub(self, rhs: &TruncatedSeries) -> TruncatedSeries {
        self.add_series(&rhs.scale(-1.0))
    }
}

impl Sub<f64> for &TruncatedSeries {
    type Output = TruncatedSeries;

    fn sub(self, rhs: f64) -> TruncatedSeries {
        self.add_scalar(-rhs)
    }
}

impl Mul<&TruncatedSeries> for &TruncatedSeries {
    type Output = TruncatedSeries;

    fn mul(self, rhs: &TruncatedSeries) -> TruncatedSeries {
        self.mul_series(rhs)
    }
}

impl Mul<f64> for &TruncatedSeries {
    type Output = TruncatedSeries;

    fn mul(self, rhs: f64) -> TruncatedSeries {
        self.scale(rhs)
    }
}

impl Div<&TruncatedSeries> for &TruncatedSeries {
    type Output = TruncatedSeries;

    /// # Panics
    /// when the divisor has a zero constant term or the centers differ;
    /// use `try_div` to get the error instead
    fn div(self, rhs: &TruncatedSeries) -> TruncatedSeries {
        match self.try_div(rhs) {
            Ok(quotient) => quotient,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Div<f64> for &TruncatedSeries {
    type Output = TruncatedSeries;

    /// # Panics
    /// when dividing by zero
    fn div(self, rhs: f64) -> TruncatedSeries {
        assert!(rhs != 0.0, "division of a series by zero");
        self.scale(1.0 / rhs)
    }
}

impl Neg for &TruncatedSeries {
    type Output = TruncatedSeries;

    fn neg(self) -> TruncatedSeries {
        self.scale(-1.0)
    }
}

impl Neg for TruncatedSeries {
    type Output = TruncatedSeries;

    fn neg(self) -> TruncatedSeries {
        self.scale(-1.0)
    }
}

/// owned forms delegate to the by-reference implementations
macro_rules! forward_series_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<TruncatedSeries> for TruncatedSeries {
            type Output = TruncatedSeries;
            fn $method(self, rhs: TruncatedSeries) -> TruncatedSeries {
                (&self).$method(&rhs)
            }
        }
        impl $imp<&TruncatedSeries> for TruncatedSeries {
            type Output = TruncatedSeries;
            fn $method(self, rhs: &TruncatedSeries) -> TruncatedSeries {
                (&self).$method(rhs)
            }
        }
        impl $imp<TruncatedSeries> for &TruncatedSeries {
            type Output = TruncatedSeries;
            fn $method(self, rhs: TruncatedSeries) -> TruncatedSeries {
                self.$method(&rhs)
            }
        }
        impl $imp<f64> for TruncatedSeries {
            type Output = TruncatedSeries;
            fn $method(self, rhs: f64) -> TruncatedSeries {
                (&self).$method(rhs)
            }
        }
    };
}

forward_series_binop!(Add, add);
forward_series_binop!(Sub, sub);
forward_series_binop!(Mul, mul);
forward_series_binop!(Div, div);

impl Add<&TruncatedSeries> for f64 {
    type Output = TruncatedSeries;

    fn add(self, rhs: &TruncatedSeries) -> TruncatedSeries {
        rhs.add_scalar(self)
    }
}

impl Add<TruncatedSeries> for f64 {
    type Output = TruncatedSeries;

    fn add(self, rhs: TruncatedSeries) -> TruncatedSeries {
        rhs.add_scalar(self)
    }
}

impl Sub<&TruncatedSeries> for f64 {
    type Output = TruncatedSeries;

    fn sub(self, rhs: &TruncatedSeries) -> TruncatedSeries {
        rhs.scale(-1.0).add_scalar(self)
    }
}

impl Sub<TruncatedSeries> for f64 {
    type Output = TruncatedSeries;

    fn sub(self, rhs: TruncatedSeries) -> TruncatedSeries {
        rhs.scale(-1.0).add_scalar(self)
    }
}

impl Mul<&TruncatedSeries> for f64 {
    type Output = TruncatedSeries;

    fn mul(self, rhs: &TruncatedSeries) -> TruncatedSeries {
        rhs.scale(self)
    }
}

impl Mul<TruncatedSeries> for f64 {
    type Output = TruncatedSeries;

    fn mul(self, rhs: TruncatedSeries) -> TruncatedSeries {
        rhs.scale(self)
    }
}

impl Div<&TruncatedSeries> for f64 {
    type Output = TruncatedSeries;

    /// # Panics
    /// when the divisor has a zero constant term
    fn div(self, rhs: &TruncatedSeries) -> TruncatedSeries {
        match rhs.invert() {
            Ok(inverse) => inverse.scale(self),
            Err(e) => panic!("{}", e),
        }
    }
}

impl Div<TruncatedSeries> for f64 {
    type Output = TruncatedSeries;

    fn div(self, rhs: TruncatedSeries) -> TruncatedSeries {
        self / &rhs
    }
}

//////////////////////////////////SERIES INVERSE/////////////////////////////////

/// The Taylor series of y ↦ 1/y about y = a:
/// coefficient[n] = (-a)^(-n) / a, i.e. 1/a · Σ (-(y - a)/a)^n.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesInverse {
    value: f64,
    series: TruncatedSeries,
}

impl SeriesInverse {
    pub fn new(value: f64, truncation_order: usize) -> TaylorResult<Self> {
        if truncation_order == 0 {
            return Err(TaylorError::InvalidTruncationOrder(truncation_order));
        }
        if value == 0.0 {
            return Err(TaylorError::DivisionByZero { center: value });
        }
        if !value.is_finite() {
            return Err(TaylorError::NonFiniteCenter(value));
        }
        let coefficients = (0..truncation_order)
            .map(|n| (-value).powi(-(n as i32)) / value)
            .collect();
        Ok(SeriesInverse {
            value,
            series: TruncatedSeries::from_raw(coefficients, value, truncation_order),
        })
    }

    /// the point a the reciprocal is expanded about
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_series(&self) -> &TruncatedSeries {
        &self.series
    }

    pub fn into_series(self) -> TruncatedSeries {
        self.series
    }

    /// reciprocal series of `other`; requires other.constant_term() == value
    pub fn compose(&self, other: &TruncatedSeries) -> TaylorResult<TruncatedSeries> {
        self.series.compose(other)
    }
}
