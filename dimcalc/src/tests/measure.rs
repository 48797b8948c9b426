use super::mechanics;
use crate::algebra::{frac, int};
use crate::{CalcError, ComparisonPolicy, Dimension, Measure, Settings};
use std::cmp::Ordering;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_addition_requires_equal_dimensions() {
    let (_, _, length, time) = mechanics();
    let settings = Settings::default();

    let sum = Measure::new(1.0, length.clone())
        .checked_add(&Measure::new(1.0, length.clone()), &settings)
        .unwrap();
    assert_eq!(sum.value(), 2.0);
    assert_eq!(sum.dim(), &length);

    let mixed = Measure::new(1.0, length).checked_add(&Measure::new(1.0, time), &settings);
    assert!(matches!(mixed, Err(CalcError::Dimension(_))));
}

#[test]
fn test_subtraction_requires_equal_dimensions() {
    let (_, mass, length, _) = mechanics();
    let settings = Settings::default();

    let diff = Measure::new(5.0, mass.clone())
        .checked_sub(&Measure::new(2.0, mass), &settings)
        .unwrap();
    assert_eq!(diff.value(), 3.0);

    let bad = Measure::new(5.0, length).checked_sub(&Measure::number(2.0), &settings);
    assert!(bad.is_err());
}

#[test]
fn test_dimension_override_keeps_left_dimension() {
    let (_, _, length, time) = mechanics();
    let settings = Settings::default().with_dimension_mismatch(true);

    let sum = Measure::new(1.0, length.clone())
        .checked_add(&Measure::new(2.0, time), &settings)
        .unwrap();
    assert_eq!(sum.value(), 3.0);
    assert_eq!(sum.dim(), &length);
}

#[test]
fn test_bare_numbers_only_add_to_dimensionless() {
    let (_, _, length, _) = mechanics();
    let settings = Settings::default();

    let ratio = Measure::number(0.5).add_number(1.0, &settings).unwrap();
    assert_eq!(ratio.value(), 1.5);

    let err = Measure::new(1.0, length).add_number(1.0, &settings);
    assert!(matches!(err, Err(CalcError::Dimension(_))));
}

#[test]
fn test_multiplication_is_permissive() {
    let (_, _, length, time) = mechanics();
    let product = Measure::new(2.0, length.clone()) * Measure::new(3.0, time.clone());

    assert_eq!(product.value(), 6.0);
    assert_eq!(product.dim(), &(&length * &time));
    assert_eq!(product.stddev(), None);
}

#[test]
fn test_division_combines_dimensions() {
    let (_, _, length, time) = mechanics();
    let speed = &Measure::new(100.0, length.clone()) / &Measure::new(8.0, time.clone());

    assert_eq!(speed.value(), 12.5);
    assert_eq!(speed.dim(), &(&length / &time));
}

#[test]
fn test_uncertainty_quadrature_for_products() {
    let a = Measure::with_stddev(2.0, 0.2, Dimension::dimensionless()).unwrap();
    let b = Measure::with_stddev(3.0, 0.3, Dimension::dimensionless()).unwrap();
    let product = &a * &b;

    let expected = 6.0 * ((0.2f64 / 2.0).powi(2) + (0.3f64 / 3.0).powi(2)).sqrt();
    assert_eq!(product.value(), 6.0);
    assert!(close(product.stddev().unwrap(), expected));
}

#[test]
fn test_uncertainty_quadrature_for_quotients() {
    let a = Measure::with_stddev(6.0, 0.6, Dimension::dimensionless()).unwrap();
    let b = Measure::with_stddev(3.0, 0.3, Dimension::dimensionless()).unwrap();
    let quotient = &a / &b;

    let expected = 2.0 * (0.1f64.powi(2) + 0.1f64.powi(2)).sqrt();
    assert_eq!(quotient.value(), 2.0);
    assert!(close(quotient.stddev().unwrap(), expected));
}

#[test]
fn test_one_exact_operand_contributes_no_uncertainty() {
    let a = Measure::with_stddev(2.0, 0.2, Dimension::dimensionless()).unwrap();
    let product = &a * &Measure::number(10.0);

    assert_eq!(product.value(), 20.0);
    assert!(close(product.stddev().unwrap(), 2.0));
}

#[test]
fn test_additive_uncertainty_is_absolute_quadrature() {
    let (_, _, length, _) = mechanics();
    let a = Measure::with_stddev(10.0, 3.0, length.clone()).unwrap();
    let b = Measure::with_stddev(5.0, 4.0, length).unwrap();
    let settings = Settings::default();

    assert!(close(a.checked_add(&b, &settings).unwrap().stddev().unwrap(), 5.0));
    assert!(close(a.checked_sub(&b, &settings).unwrap().stddev().unwrap(), 5.0));
}

#[test]
fn test_power_linearizes_uncertainty() {
    let (_, _, length, _) = mechanics();
    let side = Measure::with_stddev(2.0, 0.2, length.clone()).unwrap();
    let area = side.powi(2);

    assert_eq!(area.value(), 4.0);
    assert_eq!(area.dim(), &length.powi(2));
    // value^n * epsilon * n = 4 * 0.1 * 2
    assert!(close(area.stddev().unwrap(), 0.8));
}

#[test]
fn test_fractional_power() {
    let (_, _, length, _) = mechanics();
    let area = Measure::new(9.0, length.powi(2));
    let side = area.powr(frac(1, 2));

    assert!(close(side.value(), 3.0));
    assert_eq!(side.dim(), &length);
    assert_eq!(area.powr(int(0)).dim(), &Dimension::dimensionless());
}

#[test]
fn test_epsilon() {
    let m = Measure::with_stddev(4.0, 0.5, Dimension::dimensionless()).unwrap();
    assert_eq!(m.epsilon(), Some(0.125));
    assert_eq!(Measure::number(4.0).epsilon(), None);

    let zero = Measure::with_stddev(0.0, 0.5, Dimension::dimensionless()).unwrap();
    assert_eq!(zero.epsilon(), None);
}

#[test]
fn test_negative_stddev_is_rejected() {
    let result = Measure::with_stddev(1.0, -0.1, Dimension::dimensionless());
    assert!(matches!(result, Err(CalcError::Value(_))));
}

#[test]
fn test_non_finite_numbers_are_type_errors() {
    let (_, _, length, _) = mechanics();

    assert!(matches!(
        Measure::try_new(f64::NAN, length.clone()),
        Err(CalcError::Type(_))
    ));
    assert!(matches!(
        Measure::try_new(f64::NEG_INFINITY, length.clone()),
        Err(CalcError::Type(_))
    ));
    assert!(matches!(
        Measure::with_stddev(f64::INFINITY, 0.1, length.clone()),
        Err(CalcError::Type(_))
    ));
    assert!(matches!(
        Measure::with_stddev(1.0, f64::NAN, length.clone()),
        Err(CalcError::Type(_))
    ));
    assert_eq!(Measure::try_new(2.5, length).unwrap().value(), 2.5);
}

#[test]
fn test_equality_is_false_on_dimension_mismatch() {
    let (_, _, length, time) = mechanics();
    let a = Measure::new(1.0, length.clone());
    let b = Measure::new(1.0, time);

    assert_ne!(a, b);
    assert!(!a.equals(&b, &Settings::default()));
    assert_eq!(a, Measure::new(1.0, length));
}

#[test]
fn test_comparison_errors_on_dimension_mismatch() {
    let (_, _, length, time) = mechanics();
    let a = Measure::new(1.0, length);
    let b = Measure::new(2.0, time);

    assert!(matches!(
        a.compare(&b, &Settings::default()),
        Err(CalcError::Dimension(_))
    ));
}

#[test]
fn test_exact_comparison() {
    let (_, mass, ..) = mechanics();
    let light = Measure::with_stddev(1.0, 0.5, mass.clone()).unwrap();
    let heavy = Measure::with_stddev(1.4, 0.5, mass).unwrap();
    let settings = Settings::default();

    assert_eq!(light.compare(&heavy, &settings).unwrap(), Ordering::Less);
    assert_eq!(heavy.compare(&light, &settings).unwrap(), Ordering::Greater);
    assert!(!light.equals(&heavy, &settings));
}

#[test]
fn test_overlap_comparison() {
    let (_, mass, ..) = mechanics();
    let light = Measure::with_stddev(1.0, 0.5, mass.clone()).unwrap();
    let heavy = Measure::with_stddev(1.4, 0.5, mass.clone()).unwrap();
    let far = Measure::with_stddev(3.0, 0.1, mass).unwrap();
    let settings = Settings::default().with_comparison(ComparisonPolicy::Overlap);

    assert_eq!(light.compare(&heavy, &settings).unwrap(), Ordering::Equal);
    assert!(light.equals(&heavy, &settings));
    assert_eq!(light.compare(&far, &settings).unwrap(), Ordering::Less);
    assert!(!light.equals(&far, &settings));
}

#[test]
fn test_operands_are_not_mutated() {
    let (_, _, length, _) = mechanics();
    let a = Measure::with_stddev(2.0, 0.1, length.clone()).unwrap();
    let b = Measure::new(3.0, length.clone());
    let _ = &a * &b;
    let _ = a.checked_add(&b, &Settings::default()).unwrap();

    assert_eq!(a.value(), 2.0);
    assert_eq!(a.stddev(), Some(0.1));
    assert_eq!(b.dim(), &length);
}

#[test]
fn test_scaling_by_numbers() {
    let (_, _, length, _) = mechanics();
    let a = Measure::with_stddev(2.0, 0.1, length).unwrap();

    let tripled = &a * 3.0;
    assert_eq!(tripled.value(), 6.0);
    assert!(close(tripled.stddev().unwrap(), 0.3));

    let negated = -2.0 * &a;
    assert_eq!(negated.value(), -4.0);
    assert!(close(negated.stddev().unwrap(), 0.2));
}

#[test]
fn test_display() {
    let (_, _, length, time) = mechanics();
    assert_eq!(Measure::number(2.5).to_string(), "2.5");
    assert_eq!(
        Measure::new(3.0, &length / &time).to_string(),
        "3 length time^-1"
    );
    assert_eq!(
        Measure::with_stddev(3.0, 0.5, length).unwrap().to_string(),
        "3 ± 0.5 length"
    );
}
