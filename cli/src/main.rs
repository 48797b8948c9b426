mod error_formatter;
mod formatter;
mod quantity;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use dimcalc::{standard, Catalogue, ComparisonPolicy, Settings, Unit};
use formatter::Formatter;
use quantity::Amount;
use std::io;
use tracing::debug;

#[derive(Parser)]
#[command(name = "dimcalc")]
#[command(about = "Quantities that know what they measure.")]
#[command(
    long_about = "dimcalc resolves unit names (with SI and binary prefixes), converts between units of the same dimension, and propagates uncertainty.\nValues may carry a standard deviation, written 1.5+-0.1."
)]
#[command(version)]
struct Cli {
    /// Accept any known prefix in front of any unit
    #[arg(long, global = true)]
    allow_any_prefix: bool,
    /// Treat measures whose uncertainty intervals overlap as equal
    #[arg(long, global = true)]
    overlap: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what a name resolves to
    ///
    /// Names are looked up as prefix sets, dimensions and units, in that
    /// order, falling back to a prefixed unit (kilometer, KiB, ms).
    Lookup {
        /// Unit, dimension or prefix set name
        name: String,
    },
    /// Convert an amount from one unit to another
    ///
    /// Examples:
    ///   dimcalc convert 1.5 km mi
    ///   dimcalc convert 1.5+-0.1 m "ft & in"
    ///   dimcalc convert -40 degC degF
    Convert {
        /// Amount, optionally with uncertainty (1.5+-0.1)
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Unit of the amount
        from: String,
        /// Target unit, or units joined with '&' for a mixed display
        to: String,
        /// Output the converted number only
        #[arg(short = 'r', long)]
        raw: bool,
    },
    /// Compare two quantities of the same dimension
    ///
    /// Example: dimcalc compare "1 km" "1 mi"
    Compare {
        /// First quantity (format: value[+-stddev] unit)
        #[arg(allow_hyphen_values = true)]
        left: String,
        /// Second quantity (format: value[+-stddev] unit)
        #[arg(allow_hyphen_values = true)]
        right: String,
    },
    /// List units, optionally restricted to one dimension
    List {
        /// Dimension name (length, velocity, ...)
        #[arg(short = 'D', long)]
        dimension: Option<String>,
    },
    /// Print the catalogue as JSON
    Export,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dimcalc=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::new()
        .with_any_prefix(cli.allow_any_prefix)
        .with_comparison(if cli.overlap {
            ComparisonPolicy::Overlap
        } else {
            ComparisonPolicy::Exact
        });

    let result = load_catalogue(settings).and_then(|catalogue| match &cli.command {
        Commands::Lookup { name } => lookup_command(&catalogue, name),
        Commands::Convert {
            value,
            from,
            to,
            raw,
        } => convert_command(&catalogue, value, from, to, *raw),
        Commands::Compare { left, right } => compare_command(&catalogue, left, right),
        Commands::List { dimension } => list_command(&catalogue, dimension.as_deref()),
        Commands::Export => export_command(&catalogue),
    });

    if let Err(e) = result {
        if let Some(calc_err) = e.downcast_ref::<dimcalc::CalcError>() {
            eprintln!("{}", error_formatter::format_error(calc_err));
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn load_catalogue(settings: Settings) -> Result<Catalogue> {
    debug!(?settings, "loading standard catalogue");
    Ok(standard::si()?.with_settings(settings))
}

fn lookup_command(catalogue: &Catalogue, name: &str) -> Result<()> {
    let entry = catalogue.get(name)?;
    let formatter = Formatter::default();
    print!("{}", formatter.format_entry(catalogue, name, &entry));
    Ok(())
}

fn convert_command(
    catalogue: &Catalogue,
    value: &str,
    from: &str,
    to: &str,
    raw: bool,
) -> Result<()> {
    let amount = Amount::parse(value)?;
    if let Some(unit) = &amount.unit {
        bail!(
            "The amount '{}' already names a unit ('{}'); pass the unit as FROM",
            value,
            unit
        );
    }
    let from_unit = catalogue.unit(from)?;
    let target = resolve_target(catalogue, to)?;
    let measure = from_unit.of(&amount.measure()?)?;

    let formatter = Formatter::default();
    print!(
        "{}",
        formatter.format_conversion(&amount, &from_unit, &measure, &target, raw)?
    );
    Ok(())
}

/// `a & b & c` becomes one chained unit
fn resolve_target(catalogue: &Catalogue, to: &str) -> Result<Unit> {
    let names: Vec<&str> = to.split('&').map(str::trim).collect();
    if names.iter().any(|n| n.is_empty()) {
        bail!("Invalid target unit '{}'", to);
    }
    if let [single] = names.as_slice() {
        return Ok(catalogue.unit(single)?);
    }
    let units = names
        .iter()
        .map(|name| catalogue.unit(name))
        .collect::<dimcalc::CalcResult<Vec<_>>>()?;
    Ok(Unit::chained(units)?)
}

fn compare_command(catalogue: &Catalogue, left: &str, right: &str) -> Result<()> {
    let (left_amount, left_measure) = quantity_of(catalogue, left)?;
    let (right_amount, right_measure) = quantity_of(catalogue, right)?;
    let ordering = left_measure.compare(&right_measure, catalogue.settings())?;

    let formatter = Formatter::default();
    print!(
        "{}",
        formatter.format_comparison(&left_amount, &right_amount, ordering)
    );
    Ok(())
}

fn quantity_of(catalogue: &Catalogue, text: &str) -> Result<(Amount, dimcalc::Measure)> {
    let amount = Amount::parse(text)?;
    let Some(name) = &amount.unit else {
        bail!("Quantity '{}' needs a unit (format: value[+-stddev] unit)", text);
    };
    let measure = catalogue.unit(name)?.of(&amount.measure()?)?;
    Ok((amount, measure))
}

fn list_command(catalogue: &Catalogue, dimension: Option<&str>) -> Result<()> {
    let units: Vec<&Unit> = match dimension {
        Some(name) => catalogue
            .units_for(&catalogue.dimension(name)?)
            .iter()
            .collect(),
        None => catalogue.units(),
    };
    if units.is_empty() {
        println!("No units found");
        return Ok(());
    }

    let formatter = Formatter::default();
    print!("{}", formatter.format_units_table(catalogue, &units));
    Ok(())
}

fn export_command(catalogue: &Catalogue) -> Result<()> {
    println!("{}", catalogue.to_json()?);
    Ok(())
}
