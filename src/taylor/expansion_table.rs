// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Samples a function and a family of its truncated expansions over an
//! interval, to see how the approximation improves with the order.
use crate::Utils::logger::save_expansion_table_to_csv;
use crate::taylor::settings::ExpansionSettings;
use crate::taylor::symbolic_function::SymbolicFunction;
use crate::taylor::taylor_errors::{TaylorError, TaylorResult};
use log::info;
use nalgebra::{DMatrix, DVector};
use ndarray::Array1;
use tabled::{builder::Builder, settings::Style};

#[derive(Debug, Clone)]
pub struct ExpansionTable {
    pub center: f64,
    pub orders: Vec<usize>,
    pub x_mesh: DVector<f64>,
    /// row per mesh point; column 0 is the exact value, then one column per order
    pub values: DMatrix<f64>,
    pub headers: Vec<String>,
}

impl ExpansionTable {
    pub fn sample(
        function: &SymbolicFunction,
        center: f64,
        orders: &[usize],
        start: f64,
        end: f64,
        num_points: usize,
    ) -> TaylorResult<Self> {
        Self::sample_with(
            function,
            center,
            orders,
            start,
            end,
            num_points,
            &ExpansionSettings::default(),
        )
    }

    pub fn sample_with(
        function: &SymbolicFunction,
        center: f64,
        orders: &[usize],
        start: f64,
        end: f64,
        num_points: usize,
        settings: &ExpansionSettings,
    ) -> TaylorResult<Self> {
        if num_points < 2 {
            return Err(TaylorError::InvalidSampling(format!(
                "need at least 2 points, got {}",
                num_points
            )));
        }
        if !(start.is_finite() && end.is_finite()) || start >= end {
            return Err(TaylorError::InvalidSampling(format!(
                "interval [{}, {}] is empty or not finite",
                start, end
            )));
        }
        let x = Array1::linspace(start, end, num_points);
        let mut columns = vec![function.evaluate_array(&x)];
        let mut headers = vec!["f(x)".to_string()];
        for &order in orders {
            let series = function.get_expansion_with(center, order, settings)?;
            columns.push(series.evaluate_array(&x));
            headers.push(format!("order {}", order));
        }
        let values = DMatrix::from_fn(num_points, columns.len(), |i, j| columns[j][i]);
        info!(
            "sampled {} on [{}, {}] with {} points, expansions about {} of orders {:?}",
            function, start, end, num_points, center, orders
        );
        Ok(ExpansionTable {
            center,
            orders: orders.to_vec(),
            x_mesh: DVector::from_iterator(num_points, x.iter().copied()),
            values,
            headers,
        })
    }

    /// (order, max |expansion - exact|) for every sampled order
    pub fn max_abs_errors(&self) -> Vec<(usize, f64)> {
        let exact = self.values.column(0);
        self.orders
            .iter()
            .enumerate()
            .map(|(j, &order)| {
                let error = self
                    .values
                    .column(j + 1)
                    .iter()
                    .zip(exact.iter())
                    .map(|(approx, exact)| (approx - exact).abs())
                    .fold(0.0, f64::max);
                (order, error)
            })
            .collect()
    }

    pub fn pretty_print(&self) {
        let mut builder = Builder::default();
        builder.push_record(vec!["order".to_string(), "max abs error".to_string()]);
        for (order, error) in self.max_abs_errors() {
            builder.push_record(vec![order.to_string(), format!("{:.3e}", error)]);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        info!("\n \n EXPANSIONS ABOUT {} \n \n {}", self.center, table);
    }

    pub fn save_csv(&self, filename: &str) -> TaylorResult<()> {
        save_expansion_table_to_csv(self, filename)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_shape_and_exact_column() {
        let x = SymbolicFunction::identity();
        let f = SymbolicFunction::exponential().compose(&x);
        let table = ExpansionTable::sample(&f, 0.0, &[2, 4, 8], -1.0, 1.0, 21).unwrap();
        assert_eq!(table.values.shape(), (21, 4));
        assert_eq!(table.headers, vec!["f(x)", "order 2", "order 4", "order 8"]);
        assert_relative_eq!(table.x_mesh[0], -1.0);
        assert_relative_eq!(table.x_mesh[20], 1.0);
        assert_relative_eq!(table.values[(20, 0)], 1.0_f64.exp(), epsilon = 1e-14);
    }

    #[test]
    fn test_errors_shrink_with_order() {
        let x = SymbolicFunction::identity();
        let f = SymbolicFunction::exponential().compose(-x.powi(4));
        let table = ExpansionTable::sample(&f, 0.5, &[1, 3, 5, 7], 0.0, 1.0, 50).unwrap();
        let errors = table.max_abs_errors();
        assert_eq!(errors.len(), 4);
        assert!(errors[3].1 < errors[0].1);
    }

    #[test]
    fn test_rejects_bad_grid() {
        let f = SymbolicFunction::sine();
        assert!(matches!(
            ExpansionTable::sample(&f, 0.0, &[3], 0.0, 1.0, 1),
            Err(TaylorError::InvalidSampling(_))
        ));
        assert!(ExpansionTable::sample(&f, 0.0, &[3], 1.0, 0.0, 10).is_err());
        assert!(ExpansionTable::sample(&f, 0.0, &[0], 0.0, 1.0, 10).is_err());
    }

    #[test]
    fn test_save_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expansions.csv");
        let f = SymbolicFunction::cosine();
        let table = ExpansionTable::sample(&f, 0.0, &[2, 6], 0.0, 1.0, 5).unwrap();
        table.save_csv(path.to_str().unwrap()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "x,f(x),order 2,order 6");
        assert!(lines[1].starts_with("0,1,1,1"));
    }
}
