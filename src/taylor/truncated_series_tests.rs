#[cfg(test)]
mod tests {
    use crate::taylor::settings::{CompositionCheck, ExpansionSettings};
    use crate::taylor::taylor_errors::TaylorError;
    use crate::taylor::truncated_series::{SeriesInverse, TruncatedSeries};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::array;
    use std::f64::consts::E;

    fn series(coefficients: &[f64], center: f64, order: usize) -> TruncatedSeries {
        TruncatedSeries::new(coefficients.to_vec(), center, order).unwrap()
    }

    fn exp_series(order: usize) -> TruncatedSeries {
        let mut factorial = 1.0;
        let coefficients = (0..order)
            .map(|n| {
                if n > 0 {
                    factorial *= n as f64;
                }
                1.0 / factorial
            })
            .collect();
        TruncatedSeries::from_coefficients(coefficients, order).unwrap()
    }

    #[test]
    fn test_construction_validates_input() {
        assert_eq!(
            TruncatedSeries::new(vec![1.0], 0.0, 0),
            Err(TaylorError::InvalidTruncationOrder(0))
        );
        assert_eq!(
            TruncatedSeries::new(vec![], 0.0, 3),
            Err(TaylorError::EmptyCoefficients)
        );
        assert!(matches!(
            TruncatedSeries::new(vec![1.0, f64::NAN], 0.0, 3),
            Err(TaylorError::NonFiniteCoefficient { index: 1, .. })
        ));
        assert!(matches!(
            TruncatedSeries::new(vec![1.0], f64::INFINITY, 3),
            Err(TaylorError::NonFiniteCenter(_))
        ));
    }

    #[test]
    fn test_construction_truncates() {
        let s = series(&[1.0, 2.0, 3.0, 4.0], 0.5, 2);
        assert_eq!(s.coefficients(), &[1.0, 2.0]);
        assert_eq!(s.truncation_order(), 2);
        assert_eq!(s.degree(), 1);
        assert_eq!(s.center(), 0.5);
        assert_eq!(s.coefficient(7), 0.0);
        assert!(!s.is_empty());
    }

    #[test]
    fn test_add_pads_and_takes_smaller_order() {
        let a = series(&[1.0, 2.0, 3.0], 0.0, 5);
        let b = series(&[1.0, 1.0], 0.0, 3);
        let sum = &a + &b;
        assert_eq!(sum.coefficients(), &[2.0, 3.0, 3.0]);
        assert_eq!(sum.truncation_order(), 3);

        let short = series(&[1.0, 2.0], 0.0, 2);
        let long = series(&[0.0, 0.0, 5.0], 0.0, 4);
        let sum = &short + &long;
        assert_eq!(sum.coefficients(), &[1.0, 2.0]);
        assert_eq!(sum.truncation_order(), 2);
    }

    #[test]
    fn test_scalar_arithmetic() {
        let s = series(&[1.0, 2.0], 0.0, 3);
        assert_eq!((&s + 1.0).coefficients(), &[2.0, 2.0]);
        assert_eq!((2.0 - &s).coefficients(), &[1.0, -2.0]);
        assert_eq!((3.0 * s.clone()).coefficients(), &[3.0, 6.0]);
        assert_eq!((&s / 2.0).coefficients(), &[0.5, 1.0]);
        assert_eq!((-&s).coefficients(), &[-1.0, -2.0]);
    }

    #[test]
    fn test_multiplication() {
        let a = series(&[1.0, 1.0], 0.0, 5);
        let b = series(&[1.0, -1.0], 0.0, 5);
        let product = &a * &b;
        assert_eq!(product.coefficients(), &[1.0, 0.0, -1.0]);

        // only min(len_a + len_b - 1, order) terms are kept
        let a = series(&[1.0, 1.0, 1.0], 0.0, 3);
        let product = &a * &a;
        assert_eq!(product.coefficients(), &[1.0, 2.0, 3.0]);
        assert_eq!(product.truncation_order(), 3);
    }

    #[test]
    fn test_exp_times_quadratic() {
        let product = &exp_series(6) * &series(&[1.0, 1.0, 3.0], 0.0, 6);
        let expected = [
            1.0,
            2.0,
            4.5,
            1.0 / 6.0 + 0.5 + 3.0,
            1.0 / 24.0 + 1.0 / 6.0 + 1.5,
            1.0 / 120.0 + 1.0 / 24.0 + 0.5,
        ];
        assert_eq!(product.len(), 6);
        for (n, &a) in expected.iter().enumerate() {
            assert_relative_eq!(product[n], a, epsilon = 1e-14);
        }
        assert_abs_diff_eq!(product.evaluate(0.1), 0.1_f64.exp() * 1.13, epsilon = 1e-6);
    }

    #[test]
    fn test_inverse_times_series_is_one() {
        let s = series(&[2.0, 1.0, 3.0], 0.0, 6);
        let inverse = s.invert().unwrap();
        assert_eq!(inverse.len(), 6);
        let one = &s * &inverse;
        assert_abs_diff_eq!(one, series(&[1.0], 0.0, 6), epsilon = 1e-12);

        let shifted = series(&[-0.5, 2.0, 0.25, 1.0], 1.5, 5);
        let one = &shifted * &shifted.invert().unwrap();
        assert_eq!(one.center(), 1.5);
        assert_abs_diff_eq!(one, series(&[1.0], 1.5, 5), epsilon = 1e-10);
    }

    #[test]
    fn test_division_matches_direct_evaluation() {
        let g = series(&[1.0, 1.0, 0.5], 0.0, 6);
        let h = exp_series(6).try_div(&g).unwrap();
        let direct = 0.2_f64.exp() / (1.0 + 0.2 + 0.5 * 0.04);
        assert_abs_diff_eq!(h.evaluate(0.2), direct, epsilon = 1e-3);
        let h_operator = exp_series(6) / g;
        assert_eq!(h, h_operator);
    }

    #[test]
    fn test_division_by_zero_constant_term() {
        let s = series(&[0.0, 1.0], 0.0, 4);
        assert_eq!(s.invert(), Err(TaylorError::DivisionByZero { center: 0.0 }));
        assert!(exp_series(4).try_div(&s).is_err());
    }

    #[test]
    #[should_panic]
    fn test_division_operator_panics_on_zero_constant_term() {
        let s = series(&[0.0, 1.0], 0.0, 4);
        let _ = &exp_series(4) / &s;
    }

    #[test]
    #[should_panic]
    fn test_add_panics_on_center_mismatch() {
        let _ = &series(&[1.0], 0.0, 2) + &series(&[1.0], 1.0, 2);
    }

    #[test]
    fn test_compose_exp_with_quadratic() {
        // exp expanded about 1 = g(0), then substituted with g = 1 + x + x²/2
        let exp_at_one = series(&exp_series(6).scale(E).coefficients().to_vec(), 1.0, 6);
        let g = series(&[1.0, 1.0, 0.5], 0.0, 6);
        let composed = exp_at_one.compose(&g).unwrap();
        assert_eq!(composed.center(), 0.0);
        // exp(x + x²/2) = 1 + x + x² + 2/3 x³ + 5/12 x⁴ + ...
        let expected = [1.0, 1.0, 1.0, 2.0 / 3.0, 5.0 / 12.0];
        for (n, &a) in expected.iter().enumerate() {
            assert_relative_eq!(composed[n], E * a, epsilon = 1e-13);
        }
        assert_abs_diff_eq!(
            composed.evaluate(0.1),
            (1.0 + 0.1 + 0.005_f64).exp(),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_compose_center_check() {
        let g = series(&[1.0, 1.0, 0.5], 0.0, 6);
        let result = exp_series(6).compose(&g);
        assert_eq!(
            result,
            Err(TaylorError::CenterMismatch {
                outer_center: 0.0,
                inner_value: 1.0
            })
        );
        let relaxed = ExpansionSettings::default().with_composition_check(CompositionCheck::Off);
        assert!(exp_series(6).compose_with(&g, &relaxed).is_ok());
        let warn = ExpansionSettings::default().with_composition_check(CompositionCheck::Warn);
        assert!(exp_series(6).compose_with(&g, &warn).is_ok());
    }

    #[test]
    fn test_compose_takes_smaller_order() {
        let outer = series(&[1.0, 1.0, 1.0, 1.0], 0.0, 4);
        let inner = series(&[0.0, 2.0], 0.0, 2);
        let composed = outer.compose(&inner).unwrap();
        assert_eq!(composed.truncation_order(), 2);
        assert_eq!(composed.coefficients(), &[1.0, 2.0]);
    }

    #[test]
    fn test_distributivity() {
        let a = series(&[1.0, -2.0, 0.5], 0.3, 5);
        let b = series(&[0.2, 1.0, 4.0, -1.0], 0.3, 5);
        let c = series(&[3.0, 0.0, 1.5], 0.3, 5);
        let left = &a * &(&b + &c);
        let right = &(&a * &b) + &(&a * &c);
        assert_relative_eq!(left, right, epsilon = 1e-14);
    }

    #[test]
    fn test_powi() {
        let s = series(&[1.0, 1.0], 0.0, 4);
        assert_eq!(s.powi(0).coefficients(), &[1.0]);
        assert_eq!(s.powi(3).coefficients(), &[1.0, 3.0, 3.0, 1.0]);
        assert_eq!(s.powi(5).coefficients(), &[1.0, 5.0, 10.0, 10.0]);
    }

    #[test]
    fn test_recenter() {
        let p = series(&[1.0, 2.0, 3.0], 0.0, 3);
        let q = p.recenter(1.0).unwrap();
        assert_eq!(q.center(), 1.0);
        assert_relative_eq!(q[0], 6.0, epsilon = 1e-14);
        assert_relative_eq!(q[1], 8.0, epsilon = 1e-14);
        assert_relative_eq!(q[2], 3.0, epsilon = 1e-14);
        assert_relative_eq!(q.evaluate(0.3), p.evaluate(0.3), epsilon = 1e-14);
        assert!(p.recenter(f64::NAN).is_err());
    }

    #[test]
    fn test_series_inverse_coefficients() {
        let inverse = SeriesInverse::new(2.0, 4).unwrap();
        assert_eq!(inverse.value(), 2.0);
        assert_eq!(inverse.as_series().center(), 2.0);
        let expected = [0.5, -0.25, 0.125, -0.0625];
        for (a, b) in inverse.as_series().coefficients().iter().zip(expected.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-15);
        }
        assert_relative_eq!(inverse.as_series().evaluate(2.5), 1.0 / 2.5, epsilon = 2e-3);
        assert!(SeriesInverse::new(0.0, 4).is_err());
        assert!(SeriesInverse::new(2.0, 0).is_err());
    }

    #[test]
    fn test_evaluate_array_and_display() {
        let s = series(&[1.0, 0.5], 0.0, 3);
        let values = s.evaluate_array(&array![0.0, 2.0, -2.0]);
        assert_eq!(values, array![1.0, 2.0, 0.0]);
        assert_eq!(s.to_string(), "[1, 0.5] (center 0, truncation order 3)");
        assert!(s.to_table().contains("(x - 0)^1"));
    }

    #[test]
    fn test_approx_ignores_missing_trailing_zeros() {
        let short = series(&[1.0, 2.0], 0.0, 4);
        let long = series(&[1.0, 2.0, 0.0, 1e-16], 0.0, 4);
        assert_abs_diff_eq!(short, long, epsilon = 1e-14);
        let moved = series(&[1.0, 2.0], 1.0, 4);
        assert!(!approx::abs_diff_eq!(short, moved, epsilon = 1e-14));
    }
}
