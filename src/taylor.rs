// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! # Taylor Algebra
//!
//! Arithmetic on truncated Taylor series and lazy symbolic functions that
//! produce them on demand.
//!
//! ## Modules
//! - `truncated_series` - the series value type: `+ - * /`, composition, reciprocal, recentering
//! - `coeff_generators` - closed-form coefficients of exp, log, sin, cos, 1/x, x^k, log Γ
//! - `symbolic_function` - expression trees over the primitives, memoized expansion
//!   about any center
//! - `special_functions` - log Γ, digamma and polygamma for the log Γ coefficients
//! - `expansion_table` - sampling a function against its expansions of several orders
//! - `settings` - composition policy and TOML settings
//!
//! # Examples
//! ```
//! use RustedTaylor::taylor::symbolic_function::SymbolicFunction;
//! let x = SymbolicFunction::identity();
//! let f = SymbolicFunction::exponential().compose(-x.powi(4));
//! let series = f.get_expansion(0.5, 7).unwrap();
//! assert!((series.evaluate(0.6) - f.evaluate(0.6)).abs() < 1e-3);
//! ```
pub mod coeff_generators;
pub mod expansion_table;
pub mod settings;
pub mod special_functions;
pub mod symbolic_function;
/// operator overloads for symbolic functions
pub mod symbolic_function_ops;
pub mod taylor_errors;
pub mod truncated_series;
mod truncated_series_tests;
