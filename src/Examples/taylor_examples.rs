// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::taylor::expansion_table::ExpansionTable;
use crate::taylor::settings::{CompositionCheck, ExpansionSettings};
use crate::taylor::special_functions::factorial;
use crate::taylor::symbolic_function::SymbolicFunction;
use crate::taylor::truncated_series::TruncatedSeries;
use strum_macros::{Display, EnumIter};
use strum::IntoEnumIterator;

/// functions used to compare expansions of increasing order
#[derive(Debug, PartialEq, Eq, Display, EnumIter)]
pub enum TestFunction {
    ExpMinusX4,
    SinOfExp,
    Gamma,
    SqrtOnePlusX,
    LogOfCos,
}

impl TestFunction {
    pub fn setup(&self) -> SymbolicFunction {
        let x = SymbolicFunction::identity();
        match self {
            TestFunction::ExpMinusX4 => SymbolicFunction::exponential().compose(-x.powi(4)),
            TestFunction::SinOfExp => {
                SymbolicFunction::sine().compose(SymbolicFunction::exponential().compose(&x))
            }
            TestFunction::Gamma => {
                SymbolicFunction::exponential().compose(SymbolicFunction::log_gamma().compose(&x))
            }
            TestFunction::SqrtOnePlusX => (1.0 + &x).powf(0.5),
            TestFunction::LogOfCos => {
                SymbolicFunction::logarithm().compose(SymbolicFunction::cosine().compose(&x))
            }
        }
    }

    /// (center, start, end)
    pub fn interval(&self) -> (f64, f64, f64) {
        match self {
            TestFunction::ExpMinusX4 => (0.5, 0.0, 1.0),
            TestFunction::SinOfExp => (0.0, -0.5, 0.5),
            TestFunction::Gamma => (2.0, 1.5, 2.5),
            TestFunction::SqrtOnePlusX => (0.0, -0.5, 0.5),
            TestFunction::LogOfCos => (0.0, -0.7, 0.7),
        }
    }
}

fn exp_coefficients(n_terms: usize) -> Vec<f64> {
    (0..n_terms).map(|k| 1.0 / factorial(k)).collect()
}

pub fn taylor_examples(example: usize) {
    match example {
        0 => {
            // series arithmetic on plain coefficient vectors
            for K in [2, 5, 9] {
                let f = TruncatedSeries::from_coefficients(exp_coefficients(K), K).unwrap();
                let g = TruncatedSeries::from_coefficients(vec![1.0, 1.0, 3.0], K).unwrap();
                let h = &f * &g;
                let x = 0.5;
                println!(
                    "K = {}: exp(x)(1 + x + 3x^2) at {} ~ {}, exact {}",
                    K,
                    x,
                    h.evaluate(x),
                    (1.0 + x + 3.0 * x * x) * f64::exp(x)
                );
            }
        }
        1 => {
            // exp expanded about g(0) = 1 and substituted with g = 1 + x + x^2/2
            for K in [2, 5, 9] {
                let exp_at_one: Vec<f64> =
                    exp_coefficients(K).iter().map(|a| a * f64::exp(1.0)).collect();
                let f = TruncatedSeries::new(exp_at_one, 1.0, K).unwrap();
                let g = TruncatedSeries::from_coefficients(vec![1.0, 1.0, 0.5], K).unwrap();
                let h = f.compose(&g).unwrap();
                let x = 0.3;
                println!(
                    "K = {}: exp(1 + x + x^2/2) at {} ~ {}, exact {}",
                    K,
                    x,
                    h.evaluate(x),
                    f64::exp(1.0 + x + 0.5 * x * x)
                );
            }
            // the same substitution about the wrong center is rejected by default
            let f = TruncatedSeries::from_coefficients(exp_coefficients(5), 5).unwrap();
            let g = TruncatedSeries::from_coefficients(vec![1.0, 1.0, 0.5], 5).unwrap();
            match f.compose(&g) {
                Ok(h) => println!("composed {}", h),
                Err(e) => println!("strict composition: {}", e),
            }
            let relaxed =
                ExpansionSettings::default().with_composition_check(CompositionCheck::Warn);
            let approximate = f.compose_with(&g, &relaxed).unwrap();
            println!("relaxed composition: {}", approximate);
        }
        2 => {
            // division through the multiplicative inverse
            for K in [2, 5, 9] {
                let f = TruncatedSeries::from_coefficients(exp_coefficients(K), K).unwrap();
                let g = TruncatedSeries::from_coefficients(vec![1.0, 1.0, 0.5], K).unwrap();
                let h = f.try_div(&g).unwrap();
                let x = 0.2;
                println!(
                    "K = {}: exp(x)/(1 + x + x^2/2) at {} ~ {}, exact {}",
                    K,
                    x,
                    h.evaluate(x),
                    f64::exp(x) / (1.0 + x + 0.5 * x * x)
                );
            }
            let g = TruncatedSeries::from_coefficients(vec![2.0, 1.0, 3.0], 6).unwrap();
            println!("{}", g.invert().unwrap().to_table());
        }
        3 => {
            // (f/g)(g) on symbolic functions: f/g is re-expanded about g(0)
            let x = SymbolicFunction::identity();
            let exp = SymbolicFunction::exponential();
            let g = 1.0 + &x + 0.5 * x.powi(2);
            let h = (exp.compose(&x) / &g).compose(&g);
            println!("h = {}", h);
            for K in [2, 5, 9] {
                let series = h.get_expansion(0.0, K).unwrap();
                let x = -0.25;
                println!("K = {}: h({}) ~ {}, exact {}", K, x, series.evaluate(x), h.evaluate(x));
            }
        }
        4 => {
            // exp(-x^4) about 0.5 with orders 1..7 on [0, 1]
            let x = SymbolicFunction::identity();
            let f = SymbolicFunction::exponential().compose(-x.powi(4));
            let orders: Vec<usize> = (1..=7).collect();
            let table = ExpansionTable::sample(&f, 0.5, &orders, 0.0, 1.0, 100).unwrap();
            table.pretty_print();
            for (order, error) in table.max_abs_errors() {
                println!("order {}: max abs error {:.3e}", order, error);
            }
            println!("primitive expansions cached: {}", f.cache_size());
        }
        5 => {
            for function in TestFunction::iter() {
                let (center, start, end) = function.interval();
                let f = function.setup();
                let table =
                    ExpansionTable::sample(&f, center, &[2, 4, 8], start, end, 50).unwrap();
                println!("{} = {}: {:?}", function, f, table.max_abs_errors());
            }
        }
        6 => {
            let document = r#"
                [expansion]
                composition_check = "warn"
                center_tolerance = 1e-10
                loglevel = "debug"
            "#;
            let settings = ExpansionSettings::from_toml_str(document).unwrap();
            println!("{:?}", settings);
            let gamma = SymbolicFunction::exponential().compose(SymbolicFunction::log_gamma());
            let series = gamma.get_expansion_with(3.0, 6, &settings).unwrap();
            println!("Gamma about 3: {}", series);
            println!("{}", series.to_table());
        }
        _ => {
            println!("example {} does not exist", example);
        }
    }
}
