// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! # Symbolic Function Module
//!
//! Lazy expression trees of elementary functions. Building an expression with
//! `+ - * /`, `compose` or the power methods only allocates a node; numbers are
//! produced on demand by two recursive walks:
//! - `evaluate(x)` - plain numeric evaluation, composition is real function composition
//! - `get_expansion(center, order)` - a `TruncatedSeries` of the whole tree about `center`
//!
//! ## Main Structures
//! - `SymbolicFunction` - cheap to clone handle on a `Node`
//! - `Node::Primitive` - an elementary function with a memo of its expansions
//! - `Node::Composite` - an `Operator` applied to two `Operand`s (functions or plain numbers)
//!
//! ## Composition
//! For f(g) the inner function g is expanded first. Its constant term g(center)
//! is the point the outer function f is expanded about, and the two series are
//! then substituted into each other. Nested compositions recenter at every level.
//!
//! # Examples
//! ```
//! use RustedTaylor::taylor::symbolic_function::SymbolicFunction;
//! let x = SymbolicFunction::identity();
//! let exp = SymbolicFunction::exponential();
//! let f = exp.compose(&x);
//! let series = f.get_expansion(0.0, 5).unwrap();
//! assert!((series[2] - 0.5).abs() < 1e-14);
//! ```
use crate::taylor::coeff_generators::{CoeffGenerator, ElementaryFunction};
use crate::taylor::settings::ExpansionSettings;
use crate::taylor::taylor_errors::{TaylorError, TaylorResult, domain_error};
use crate::taylor::truncated_series::TruncatedSeries;
use log::debug;
use ndarray::Array1;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Power,
    Compose,
}

/// One side of a composite node
#[derive(Debug, Clone)]
pub enum Operand {
    Function(SymbolicFunction),
    Scalar(f64),
}

impl From<SymbolicFunction> for Operand {
    fn from(function: SymbolicFunction) -> Self {
        Operand::Function(function)
    }
}

impl From<&SymbolicFunction> for Operand {
    fn from(function: &SymbolicFunction) -> Self {
        Operand::Function(function.clone())
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl Operand {
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            Operand::Function(function) => function.evaluate(x),
            Operand::Scalar(value) => *value,
        }
    }

    fn expand(
        &self,
        center: f64,
        order: usize,
        settings: &ExpansionSettings,
    ) -> TaylorResult<Expansion> {
        match self {
            Operand::Function(function) => {
                Ok(Expansion::Series(function.expand(center, order, settings)?))
            }
            Operand::Scalar(value) => Ok(Expansion::Scalar(*value)),
        }
    }

    fn cache_size(&self) -> usize {
        match self {
            Operand::Function(function) => function.cache_size(),
            Operand::Scalar(_) => 0,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Function(function) => write!(f, "{}", function),
            Operand::Scalar(value) => write!(f, "{}", value),
        }
    }
}

/// An operand after expansion: scalars are carried as they are
#[derive(Debug, Clone)]
enum Expansion {
    Series(TruncatedSeries),
    Scalar(f64),
}

impl Expansion {
    fn into_series(self, center: f64, order: usize) -> TaylorResult<TruncatedSeries> {
        match self {
            Expansion::Series(series) => Ok(series),
            Expansion::Scalar(value) => TruncatedSeries::constant(value, center, order),
        }
    }
}

//////////////////////////////////PRIMITIVES/////////////////////////////////

/// memo key; -0.0 and 0.0 share an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ExpansionKey {
    center_bits: u64,
    truncation_order: usize,
}

impl ExpansionKey {
    fn new(center: f64, truncation_order: usize) -> Self {
        let center = if center == 0.0 { 0.0 } else { center };
        ExpansionKey {
            center_bits: center.to_bits(),
            truncation_order,
        }
    }
}

/// An elementary function together with the expansions computed so far.
/// Entries are only ever added: a coefficient generator is a pure function
/// of (center, order).
pub struct PrimitiveFunction {
    generator: Box<dyn CoeffGenerator>,
    cache: RefCell<HashMap<ExpansionKey, TruncatedSeries>>,
}

impl PrimitiveFunction {
    pub fn new(generator: Box<dyn CoeffGenerator>) -> Self {
        PrimitiveFunction {
            generator,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn generator(&self) -> &dyn CoeffGenerator {
        self.generator.as_ref()
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.generator.evaluate(x)
    }

    pub fn inverse_evaluate(&self, y: f64) -> Option<f64> {
        self.generator.inverse_evaluate(y)
    }

    pub fn get_expansion(
        &self,
        center: f64,
        truncation_order: usize,
    ) -> TaylorResult<TruncatedSeries> {
        let key = ExpansionKey::new(center, truncation_order);
        if let Some(series) = self.cache.borrow().get(&key) {
            debug!(
                "cache hit for {} at center {} order {}",
                self.generator.name(),
                center,
                truncation_order
            );
            return Ok(series.clone());
        }
        let series = self.generator.expansion(center, truncation_order)?;
        self.cache.borrow_mut().insert(key, series.clone());
        Ok(series)
    }

    pub fn cache_len(&self) -> usize {
        self.cache.borrow().len()
    }
}

//////////////////////////////////COMPOSITES/////////////////////////////////

#[derive(Debug, Clone)]
pub struct CompositeFunction {
    operator: Operator,
    left: Operand,
    right: Operand,
}

impl CompositeFunction {
    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn left(&self) -> &Operand {
        &self.left
    }

    pub fn right(&self) -> &Operand {
        &self.right
    }

    fn evaluate(&self, x: f64) -> f64 {
        match self.operator {
            Operator::Add => self.left.evaluate(x) + self.right.evaluate(x),
            Operator::Subtract => self.left.evaluate(x) - self.right.evaluate(x),
            Operator::Multiply => self.left.evaluate(x) * self.right.evaluate(x),
            Operator::Power => self.left.evaluate(x).powf(self.right.evaluate(x)),
            Operator::Compose => {
                let inner = self.right.evaluate(x);
                self.left.evaluate(inner)
            }
        }
    }

    fn expand(
        &self,
        center: f64,
        order: usize,
        settings: &ExpansionSettings,
    ) -> TaylorResult<Expansion> {
        if self.operator == Operator::Compose {
            return self.expand_composition(center, order, settings);
        }
        let left = self.left.expand(center, order, settings)?;
        let right = self.right.expand(center, order, settings)?;
        match self.operator {
            Operator::Add => Ok(add_expansions(left, right)),
            Operator::Subtract => Ok(subtract_expansions(left, right)),
            Operator::Multiply => Ok(multiply_expansions(left, right)),
            _ => power_expansions(left, right, settings),
        }
    }

    /// f(g): expand g, then expand f about g's constant term and substitute
    fn expand_composition(
        &self,
        center: f64,
        order: usize,
        settings: &ExpansionSettings,
    ) -> TaylorResult<Expansion> {
        let inner = match self.right.expand(center, order, settings)? {
            Expansion::Series(series) => series,
            Expansion::Scalar(value) => return Ok(Expansion::Scalar(self.left.evaluate(value))),
        };
        match &self.left {
            Operand::Scalar(value) => Ok(Expansion::Scalar(*value)),
            Operand::Function(outer) => {
                let outer_center = inner.constant_term();
                debug!(
                    "expanding {} about {} to compose with {} at {}",
                    outer, outer_center, self.right, center
                );
                let outer_series = outer.get_expansion_with(outer_center, order, settings)?;
                Ok(Expansion::Series(
                    outer_series.compose_with(&inner, settings)?,
                ))
            }
        }
    }

    fn inverse_evaluate(&self, y: f64) -> Option<f64> {
        use Operand::{Function, Scalar};
        match (self.operator, &self.left, &self.right) {
            (Operator::Compose, Function(outer), Function(inner)) => {
                inner.inverse_evaluate(outer.inverse_evaluate(y)?)
            }
            (Operator::Add, Function(f), Scalar(k)) | (Operator::Add, Scalar(k), Function(f)) => {
                f.inverse_evaluate(y - k)
            }
            (Operator::Subtract, Function(f), Scalar(k)) => f.inverse_evaluate(y + k),
            (Operator::Subtract, Scalar(k), Function(f)) => f.inverse_evaluate(k - y),
            (Operator::Multiply, Function(f), Scalar(k))
            | (Operator::Multiply, Scalar(k), Function(f))
                if *k != 0.0 =>
            {
                f.inverse_evaluate(y / k)
            }
            _ => None,
        }
    }
}

fn add_expansions(left: Expansion, right: Expansion) -> Expansion {
    use Expansion::{Scalar, Series};
    match (left, right) {
        (Series(a), Series(b)) => Series(&a + &b),
        (Series(a), Scalar(k)) | (Scalar(k), Series(a)) => Series(a.add_scalar(k)),
        (Scalar(a), Scalar(b)) => Scalar(a + b),
    }
}

fn subtract_expansions(left: Expansion, right: Expansion) -> Expansion {
    use Expansion::{Scalar, Series};
    match (left, right) {
        (Series(a), Series(b)) => Series(&a - &b),
        (Series(a), Scalar(k)) => Series(a.add_scalar(-k)),
        (Scalar(k), Series(b)) => Series(k - &b),
        (Scalar(a), Scalar(b)) => Scalar(a - b),
    }
}

fn multiply_expansions(left: Expansion, right: Expansion) -> Expansion {
    use Expansion::{Scalar, Series};
    match (left, right) {
        (Series(a), Series(b)) => Series(&a * &b),
        (Series(a), Scalar(k)) | (Scalar(k), Series(a)) => Series(a.scale(k)),
        (Scalar(a), Scalar(b)) => Scalar(a * b),
    }
}

/// exp(s) by substituting s into the exponential expanded about s(center)
fn series_exp(
    series: &TruncatedSeries,
    settings: &ExpansionSettings,
) -> TaylorResult<TruncatedSeries> {
    ElementaryFunction::Exponential
        .expansion(series.constant_term(), series.truncation_order())?
        .compose_with(series, settings)
}

fn series_ln(
    series: &TruncatedSeries,
    settings: &ExpansionSettings,
) -> TaylorResult<TruncatedSeries> {
    ElementaryFunction::Logarithm
        .expansion(series.constant_term(), series.truncation_order())?
        .compose_with(series, settings)
}

/// non-negative integer exponents multiply out, everything else goes through exp(e·log b)
fn power_expansions(
    base: Expansion,
    exponent: Expansion,
    settings: &ExpansionSettings,
) -> TaylorResult<Expansion> {
    use Expansion::{Scalar, Series};
    match (base, exponent) {
        (Scalar(b), Scalar(e)) => Ok(Scalar(b.powf(e))),
        (Series(b), Scalar(e)) if e >= 0.0 && e.fract() == 0.0 => Ok(Series(b.powi(e as usize))),
        (Series(b), Scalar(e)) => {
            let exponent_times_log = series_ln(&b, settings)?.scale(e);
            Ok(Series(series_exp(&exponent_times_log, settings)?))
        }
        (Scalar(b), Series(e)) => {
            if !(b > 0.0) {
                return Err(domain_error(
                    "power",
                    b,
                    "base must be positive for a symbolic exponent",
                ));
            }
            Ok(Series(series_exp(&e.scale(b.ln()), settings)?))
        }
        (Series(b), Series(e)) => {
            let exponent_times_log = &e * &series_ln(&b, settings)?;
            Ok(Series(series_exp(&exponent_times_log, settings)?))
        }
    }
}

//////////////////////////////////SYMBOLIC FUNCTION/////////////////////////////////

pub enum Node {
    Primitive(PrimitiveFunction),
    Composite(CompositeFunction),
}

/// Handle on an immutable expression node. Cloning shares the node, so a
/// primitive used in several expressions keeps one memo.
#[derive(Clone)]
pub struct SymbolicFunction {
    node: Rc<Node>,
}

impl SymbolicFunction {
    /// wraps any coefficient generator, including user supplied ones
    pub fn primitive<G: CoeffGenerator + 'static>(generator: G) -> Self {
        SymbolicFunction {
            node: Rc::new(Node::Primitive(PrimitiveFunction::new(Box::new(generator)))),
        }
    }

    pub fn exponential() -> Self {
        Self::primitive(ElementaryFunction::Exponential)
    }

    pub fn logarithm() -> Self {
        Self::primitive(ElementaryFunction::Logarithm)
    }

    pub fn sine() -> Self {
        Self::primitive(ElementaryFunction::Sine)
    }

    pub fn cosine() -> Self {
        Self::primitive(ElementaryFunction::Cosine)
    }

    /// 1/x
    pub fn reciprocal() -> Self {
        Self::primitive(ElementaryFunction::Reciprocal)
    }

    /// x^k
    pub fn power(k: f64) -> Self {
        Self::primitive(ElementaryFunction::Power(k))
    }

    /// the variable itself, x^1
    pub fn identity() -> Self {
        Self::power(1.0)
    }

    pub fn log_gamma() -> Self {
        Self::primitive(ElementaryFunction::LogGamma)
    }

    pub fn composite(operator: Operator, left: Operand, right: Operand) -> Self {
        SymbolicFunction {
            node: Rc::new(Node::Composite(CompositeFunction {
                operator,
                left,
                right,
            })),
        }
    }

    pub(crate) fn added(left: Operand, right: Operand) -> Self {
        Self::composite(Operator::Add, left, right)
    }

    pub(crate) fn subtracted(left: Operand, right: Operand) -> Self {
        Self::composite(Operator::Subtract, left, right)
    }

    pub(crate) fn multiplied(left: Operand, right: Operand) -> Self {
        Self::composite(Operator::Multiply, left, right)
    }

    /// division by a function becomes multiplication by 1/x composed with it
    ///
    /// # Panics
    /// when dividing by the number zero
    pub(crate) fn divided(left: Operand, right: Operand) -> Self {
        match right {
            Operand::Function(divisor) => Self::multiplied(
                left,
                Operand::Function(Self::reciprocal().compose(divisor)),
            ),
            Operand::Scalar(value) => {
                assert!(value != 0.0, "division of a symbolic function by zero");
                Self::multiplied(left, Operand::Scalar(1.0 / value))
            }
        }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.node.as_ref(), Node::Primitive(_))
    }

    /// self(inner)
    pub fn compose(&self, inner: impl Into<Operand>) -> Self {
        Self::composite(Operator::Compose, Operand::from(self), inner.into())
    }

    /// self^n as the primitive x^n composed with self
    pub fn powi(&self, n: i32) -> Self {
        Self::power(n as f64).compose(self)
    }

    /// integral k goes through `powi`, anything else is exp(k · log(self))
    pub fn powf(&self, k: f64) -> Self {
        if k.fract() == 0.0 && k.abs() <= i32::MAX as f64 {
            self.powi(k as i32)
        } else {
            Self::exponential().compose(Self::logarithm().compose(self) * k)
        }
    }

    /// numeric exponents behave like `powf`; a symbolic exponent builds a power node
    pub fn pow(&self, exponent: impl Into<Operand>) -> Self {
        match exponent.into() {
            Operand::Scalar(k) => self.powf(k),
            function => Self::composite(Operator::Power, Operand::from(self), function),
        }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        match self.node.as_ref() {
            Node::Primitive(primitive) => primitive.evaluate(x),
            Node::Composite(composite) => composite.evaluate(x),
        }
    }

    pub fn evaluate_array(&self, x: &Array1<f64>) -> Array1<f64> {
        x.mapv(|xi| self.evaluate(xi))
    }

    /// x with f(x) = y when the tree is built from invertible pieces
    pub fn inverse_evaluate(&self, y: f64) -> Option<f64> {
        match self.node.as_ref() {
            Node::Primitive(primitive) => primitive.inverse_evaluate(y),
            Node::Composite(composite) => composite.inverse_evaluate(y),
        }
    }

    /// Taylor expansion about `center` keeping `truncation_order` terms
    pub fn get_expansion(
        &self,
        center: f64,
        truncation_order: usize,
    ) -> TaylorResult<TruncatedSeries> {
        self.get_expansion_with(center, truncation_order, &ExpansionSettings::default())
    }

    pub fn get_expansion_with(
        &self,
        center: f64,
        truncation_order: usize,
        settings: &ExpansionSettings,
    ) -> TaylorResult<TruncatedSeries> {
        if truncation_order == 0 {
            return Err(TaylorError::InvalidTruncationOrder(truncation_order));
        }
        if !center.is_finite() {
            return Err(TaylorError::NonFiniteCenter(center));
        }
        self.expand(center, truncation_order, settings)
    }

    fn expand(
        &self,
        center: f64,
        truncation_order: usize,
        settings: &ExpansionSettings,
    ) -> TaylorResult<TruncatedSeries> {
        match self.node.as_ref() {
            Node::Primitive(primitive) => primitive.get_expansion(center, truncation_order),
            Node::Composite(composite) => composite
                .expand(center, truncation_order, settings)?
                .into_series(center, truncation_order),
        }
    }

    /// expansions memoized by all primitives reachable from this node
    pub fn cache_size(&self) -> usize {
        match self.node.as_ref() {
            Node::Primitive(primitive) => primitive.cache_len(),
            Node::Composite(composite) => {
                composite.left.cache_size() + composite.right.cache_size()
            }
        }
    }
}

impl fmt::Display for SymbolicFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.node.as_ref() {
            Node::Primitive(primitive) => write!(f, "{}", primitive.generator.name()),
            Node::Composite(composite) => {
                let (l, r) = (&composite.left, &composite.right);
                match composite.operator {
                    Operator::Add => write!(f, "({} + {})", l, r),
                    Operator::Subtract => write!(f, "({} - {})", l, r),
                    Operator::Multiply => write!(f, "({} * {})", l, r),
                    Operator::Power => write!(f, "({} ^ {})", l, r),
                    Operator::Compose => write!(f, "{}({})", l, r),
                }
            }
        }
    }
}

impl fmt::Debug for SymbolicFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SymbolicFunction({})", self)
    }
}
