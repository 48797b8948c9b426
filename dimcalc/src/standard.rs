//! Built-in SI catalogue
//!
//! Populated purely through the public registration API. It is a working
//! default for the CLI and for tests, not an exhaustive unit database.

use crate::prefix::{Prefix, PrefixSet};
use crate::{CalcResult, Catalogue, Dimension, DimensionRegistry, Entry, Measure, Unit};

/// The seven SI base dimensions plus information, in display order
pub const BASE_DIMENSIONS: [(&str, &str, i32); 8] = [
    ("mass", "M", 0),
    ("length", "L", 1),
    ("time", "T", 2),
    ("current", "I", 3),
    ("temperature", "Θ", 4),
    ("amount", "N", 5),
    ("luminosity", "J", 6),
    ("information", "B", 7),
];

const SI_SMALL: [(&str, &str, f64); 10] = [
    ("deci", "d", 1e-1),
    ("centi", "c", 1e-2),
    ("milli", "m", 1e-3),
    ("micro", "µ", 1e-6),
    ("nano", "n", 1e-9),
    ("pico", "p", 1e-12),
    ("femto", "f", 1e-15),
    ("atto", "a", 1e-18),
    ("zepto", "z", 1e-21),
    ("yocto", "y", 1e-24),
];

const SI_LARGE: [(&str, &str, f64); 10] = [
    ("deca", "da", 1e1),
    ("hecto", "h", 1e2),
    ("kilo", "k", 1e3),
    ("mega", "M", 1e6),
    ("giga", "G", 1e9),
    ("tera", "T", 1e12),
    ("peta", "P", 1e15),
    ("exa", "E", 1e18),
    ("zetta", "Z", 1e21),
    ("yotta", "Y", 1e24),
];

const IEC: [(&str, &str, f64); 6] = [
    ("kibi", "Ki", 1024.0),
    ("mebi", "Mi", 1_048_576.0),
    ("gibi", "Gi", 1_073_741_824.0),
    ("tebi", "Ti", 1_099_511_627_776.0),
    ("pebi", "Pi", 1_125_899_906_842_624.0),
    ("exbi", "Ei", 1_152_921_504_606_846_976.0),
];

fn linear(names: &[&str], symbols: &[&str], value: f64, dim: &Dimension) -> Unit {
    Unit::new(names, symbols, Measure::new(value, dim.clone()))
}

fn prefix_set(name: &str, table: &[(&str, &str, f64)]) -> CalcResult<PrefixSet> {
    let prefixes = table
        .iter()
        .map(|(prefix, symbol, value)| Prefix::new(prefix, symbol, *value))
        .collect::<CalcResult<Vec<_>>>()?;
    Ok(PrefixSet::new(name, prefixes))
}

/// Build the standard catalogue
pub fn si() -> CalcResult<Catalogue> {
    let mut registry = DimensionRegistry::new();
    for (name, symbol, order) in BASE_DIMENSIONS {
        registry.new_base(name, symbol, order);
    }
    let mass = registry.base("mass")?;
    let length = registry.base("length")?;
    let time = registry.base("time")?;
    let current = registry.base("current")?;
    let temperature = registry.base("temperature")?;
    let amount = registry.base("amount")?;
    let luminosity = registry.base("luminosity")?;
    let information = registry.base("information")?;

    let area = length.powi(2);
    let volume = length.powi(3);
    let velocity = &length / &time;
    let acceleration = &velocity / &time;
    let force = &mass * &acceleration;
    let energy = &force * &length;
    let power = &energy / &time;
    let pressure = &force / &area;
    let frequency = time.recip();

    let si_small = prefix_set("SI_small", &SI_SMALL)?;
    let si_large = prefix_set("SI_large", &SI_LARGE)?;
    let si = (&si_small | &si_large).renamed("SI");
    let iec = prefix_set("IEC", &IEC)?;
    let data_prefixes = (&si_large | &iec).renamed("SI_large|IEC");

    let meter = linear(&["meter", "meters", "metre", "metres"], &["m"], 1.0, &length);
    let gram = linear(&["gram", "grams"], &["g"], 1e-3, &mass);
    let second = linear(&["second", "seconds"], &["s"], 1.0, &time);
    let kelvin = linear(&["kelvin"], &["K"], 1.0, &temperature);
    let unity = linear(&["unity"], &[], 1.0, &Dimension::dimensionless());

    let units = vec![
        meter.with_prefixes(si.clone()),
        gram.with_prefixes(si.clone()),
        second.with_prefixes(si_small.clone()),
        linear(&["ampere", "amperes", "amp"], &["A"], 1.0, &current).with_prefixes(si.clone()),
        kelvin.clone().with_prefixes(si.clone()),
        linear(&["mole", "moles"], &["mol"], 1.0, &amount).with_prefixes(si.clone()),
        linear(&["candela"], &["cd"], 1.0, &luminosity).with_prefixes(si.clone()),
        linear(&["liter", "liters", "litre", "litres"], &["L", "l"], 1e-3, &volume)
            .with_prefixes(si.clone()),
        linear(&["newton", "newtons"], &["N"], 1.0, &force).with_prefixes(si.clone()),
        linear(&["joule", "joules"], &["J"], 1.0, &energy).with_prefixes(si.clone()),
        linear(&["watt", "watts"], &["W"], 1.0, &power).with_prefixes(si.clone()),
        linear(&["pascal", "pascals"], &["Pa"], 1.0, &pressure).with_prefixes(si.clone()),
        linear(&["hertz"], &["Hz"], 1.0, &frequency).with_prefixes(si.clone()),
        linear(&["byte", "bytes"], &["B"], 1.0, &information).with_prefixes(data_prefixes.clone()),
        linear(&["bit", "bits"], &["b"], 0.125, &information).with_prefixes(data_prefixes),
        linear(&["foot", "feet"], &["ft"], 0.3048, &length),
        linear(&["inch", "inches"], &["in"], 0.0254, &length),
        linear(&["yard", "yards"], &["yd"], 0.9144, &length),
        linear(&["mile", "miles"], &["mi"], 1609.344, &length),
        linear(&["pound", "pounds"], &["lb"], 0.45359237, &mass),
        linear(&["minute", "minutes"], &["min"], 60.0, &time),
        linear(&["hour", "hours"], &["h"], 3600.0, &time),
        Unit::affine(
            &["celsius", "degree_celsius"],
            &["°C", "degC"],
            kelvin.measure().clone(),
            kelvin.measure().scale(273.15),
        )?,
        Unit::affine(
            &["fahrenheit", "degree_fahrenheit"],
            &["°F", "degF"],
            kelvin.measure().scale(5.0 / 9.0),
            kelvin.measure().scale(459.67 * 5.0 / 9.0),
        )?
        .with_info("Zero point at -459.67 °F, absolute zero"),
        Unit::logarithmic(&["decibel", "decibels"], &["dB"], unity.clone(), 10.0)?
            .with_info("Power ratio; 10 dB is a factor of ten"),
        Unit::logarithmic(&["bel", "bels"], &[], unity, 1.0)?,
    ];

    let mut catalogue = Catalogue::new(registry);
    catalogue.register_all([
        ("SI_small", Entry::PrefixSet(si_small)),
        ("SI_large", Entry::PrefixSet(si_large)),
        ("SI", Entry::PrefixSet(si)),
        ("IEC", Entry::PrefixSet(iec)),
    ])?;

    for (name, dimension) in [
        ("dimensionless", Dimension::dimensionless()),
        ("mass", mass),
        ("length", length),
        ("time", time),
        ("current", current),
        ("temperature", temperature),
        ("amount", amount),
        ("luminosity", luminosity),
        ("information", information),
        ("area", area),
        ("volume", volume),
        ("velocity", velocity.clone()),
        ("speed", velocity),
        ("acceleration", acceleration),
        ("force", force),
        ("energy", energy),
        ("power", power),
        ("pressure", pressure),
        ("frequency", frequency),
    ] {
        catalogue.register(name, Entry::Dimension(dimension))?;
    }

    for unit in units {
        let name = unit.name().to_string();
        catalogue.register(&name, Entry::Unit(unit))?;
    }

    Ok(catalogue)
}
