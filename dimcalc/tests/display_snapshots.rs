use dimcalc::algebra::int;
use dimcalc::{standard, CalcResult, Measure, Settings};

#[test]
fn test_dimension_display() -> CalcResult<()> {
    let catalogue = standard::si()?;
    let energy = catalogue.dimension("energy")?;

    insta::assert_snapshot!(energy, @"length^2 mass time^-2");
    insta::assert_snapshot!(catalogue.registry().format(&energy), @"M L^2 T^-2");
    insta::assert_snapshot!(
        catalogue.registry().format(&catalogue.dimension("frequency")?),
        @"T^-1"
    );
    Ok(())
}

#[test]
fn test_measure_display() -> CalcResult<()> {
    let catalogue = standard::si()?;
    let acceleration = catalogue.dimension("acceleration")?;
    let gravity = Measure::with_stddev(9.81, 0.02, acceleration)?;

    insta::assert_snapshot!(gravity, @"9.81 ± 0.02 length time^-2");
    insta::assert_snapshot!(catalogue.format_measure(&gravity), @"9.81 ± 0.02 L T^-2");
    Ok(())
}

#[test]
fn test_composite_symbols() -> CalcResult<()> {
    let catalogue = standard::si()?;
    let km = catalogue.unit("km")?;
    let hour = catalogue.unit("h")?;
    let newton = catalogue.unit("N")?;
    let meter = catalogue.unit("m")?;
    let joule = catalogue.unit("J")?;
    let kg = catalogue.unit("kg")?;
    let kelvin = catalogue.unit("K")?;

    insta::assert_snapshot!(km.per(&hour)?, @"km/h");
    insta::assert_snapshot!(newton.times(&meter)?, @"N·m");
    insta::assert_snapshot!(joule.per(&kg.times(&kelvin)?)?, @"J/(K·kg)");
    insta::assert_snapshot!(hour.powr(int(-1))?, @"1/h");
    Ok(())
}

#[test]
fn test_best_unit_display() -> CalcResult<()> {
    let catalogue = standard::si()?;
    let force = catalogue.dimension("force")?;

    insta::assert_snapshot!(catalogue.format_measure(&Measure::new(1500.0, force)), @"1500 N");
    Ok(())
}

#[test]
fn test_error_display() -> CalcResult<()> {
    let catalogue = standard::si()?;
    let meter = catalogue.unit("meter")?;
    let second = catalogue.unit("second")?;

    let err = meter
        .quantity(1.0)
        .checked_add(&second.quantity(1.0), &Settings::default())
        .unwrap_err();
    insta::assert_snapshot!(
        err,
        @"Dimension error: Cannot apply addition to quantities of dimension 'length' and 'time'"
    );
    Ok(())
}
