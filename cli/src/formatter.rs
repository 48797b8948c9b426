use crate::quantity::Amount;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use dimcalc::{CalcResult, Catalogue, Dimension, Entry, Measure, PrefixSet, Unit, UnitKind};
use std::cmp::Ordering;
use std::f64::consts::LN_10;

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn format_entry(&self, catalogue: &Catalogue, name: &str, entry: &Entry) -> String {
        match entry {
            Entry::Dimension(dimension) => self.format_dimension(catalogue, name, dimension),
            Entry::Unit(unit) => self.format_unit(catalogue, unit),
            Entry::PrefixSet(set) => self.format_prefix_set(set),
        }
    }

    fn format_dimension(&self, catalogue: &Catalogue, name: &str, dimension: &Dimension) -> String {
        let mut output = String::new();
        output.push_str(&format!("Dimension: {}\n\n", name));
        output.push_str(&format!(
            "names: {}\n",
            catalogue.dimension_names(dimension).join(", ")
        ));
        output.push_str(&format!(
            "fundamental: {}\n",
            catalogue.registry().format(dimension)
        ));

        let units = catalogue.units_for(dimension);
        output.push_str(&format!("\nunits ({}):\n", units.len()));
        for unit in units {
            output.push_str(&format!("  - {} ({})\n", unit.name(), unit.symbol()));
        }
        output
    }

    fn format_unit(&self, catalogue: &Catalogue, unit: &Unit) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Unit").set_alignment(CellAlignment::Left),
            Cell::new(unit.name()).set_alignment(CellAlignment::Left),
        ]));

        let mut rows: Vec<(&str, String)> = vec![
            ("kind", unit.kind().name().to_string()),
            ("names", unit.names().join(", ")),
            ("symbols", unit.symbols().join(", ")),
            ("value", self.fundamental(catalogue, unit.measure())),
            ("dimension", self.dimension_label(catalogue, unit.dim())),
        ];
        match unit.kind() {
            UnitKind::Affine { zero_point } => {
                rows.push(("zero point", self.fundamental(catalogue, zero_point)));
            }
            UnitKind::Logarithmic {
                reference,
                units_per_ten,
            } => {
                rows.push(("reference", reference.name().to_string()));
                rows.push(("per decade", units_per_ten.to_string()));
            }
            UnitKind::Chained { units } => {
                let members: Vec<&str> = units.iter().map(|u| u.symbol()).collect();
                rows.push(("members", members.join(", ")));
            }
            UnitKind::Prefixed { prefix, base } => {
                rows.push(("prefix", prefix.to_string()));
                rows.push(("base", base.name().to_string()));
            }
            UnitKind::Linear | UnitKind::Composite { .. } => {}
        }
        if let Some(prefixes) = unit.prefixes() {
            rows.push(("prefixes", prefixes.name().to_string()));
        }
        if let Some(info) = unit.info() {
            rows.push(("info", info.to_string()));
        }

        for (label, value) in rows {
            table.add_row(Row::from(vec![Cell::new(label), Cell::new(value)]));
        }
        format!("{}\n", table)
    }

    fn format_prefix_set(&self, set: &PrefixSet) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Prefix").set_alignment(CellAlignment::Left),
            Cell::new("Symbol").set_alignment(CellAlignment::Left),
            Cell::new("Value").set_alignment(CellAlignment::Right),
        ]));
        for prefix in set.prefixes() {
            table.add_row(Row::from(vec![
                Cell::new(prefix.prefix()),
                Cell::new(prefix.symbol()),
                Cell::new(format!("{:e}", prefix.value())).set_alignment(CellAlignment::Right),
            ]));
        }
        format!("Prefix set: {}\n{}\n", set.name(), table)
    }

    pub fn format_units_table(&self, catalogue: &Catalogue, units: &[&Unit]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Name").set_alignment(CellAlignment::Left),
            Cell::new("Symbol").set_alignment(CellAlignment::Left),
            Cell::new("Kind").set_alignment(CellAlignment::Left),
            Cell::new("Value").set_alignment(CellAlignment::Right),
            Cell::new("Dimension").set_alignment(CellAlignment::Left),
            Cell::new("Prefixes").set_alignment(CellAlignment::Left),
        ]));

        for unit in units {
            table.add_row(Row::from(vec![
                Cell::new(unit.name()),
                Cell::new(unit.symbol()),
                Cell::new(unit.kind().name()),
                Cell::new(unit.value()).set_alignment(CellAlignment::Right),
                Cell::new(self.dimension_label(catalogue, unit.dim())),
                Cell::new(unit.prefixes().map(|p| p.name()).unwrap_or("")),
            ]));
        }
        format!("{}\n", table)
    }

    /// `1.5 km = 0.932 mi`, or just the converted number when `raw`
    pub fn format_conversion(
        &self,
        amount: &Amount,
        from: &Unit,
        measure: &Measure,
        target: &Unit,
        raw: bool,
    ) -> CalcResult<String> {
        let converted = match target.kind() {
            UnitKind::Chained { .. } => target.format(measure)?,
            _ => {
                let magnitude = target.magnitude_of(measure)?;
                let spread = measure.stddev().map(|s| match target.kind() {
                    UnitKind::Logarithmic { units_per_ten, .. } => {
                        (units_per_ten * s / (measure.value() * LN_10)).abs()
                    }
                    _ => s / target.value().abs(),
                });
                if raw {
                    return Ok(format!("{}\n", magnitude));
                }
                format!("{} {}", with_spread(magnitude, spread), target.symbol())
            }
        };
        if raw {
            return Ok(format!("{}\n", converted));
        }
        Ok(format!(
            "{} {} = {}\n",
            with_spread(amount.value, amount.stddev),
            from.symbol(),
            converted
        ))
    }

    pub fn format_comparison(&self, left: &Amount, right: &Amount, ordering: Ordering) -> String {
        let symbol = match ordering {
            Ordering::Less => "<",
            Ordering::Equal => "=",
            Ordering::Greater => ">",
        };
        format!("{} {} {}\n", left.text, symbol, right.text)
    }

    /// First registered name of the dimension, else its fundamental form
    fn dimension_label(&self, catalogue: &Catalogue, dimension: &Dimension) -> String {
        match catalogue.dimension_names(dimension).first() {
            Some(name) => name.clone(),
            None => catalogue.registry().format(dimension),
        }
    }

    fn fundamental(&self, catalogue: &Catalogue, measure: &Measure) -> String {
        let value = with_spread(measure.value(), measure.stddev());
        if measure.dim().is_dimensionless() {
            value
        } else {
            format!("{} {}", value, catalogue.registry().format(measure.dim()))
        }
    }
}

fn with_spread(value: f64, spread: Option<f64>) -> String {
    match spread {
        Some(spread) => format!("{} ± {}", value, spread),
        None => value.to_string(),
    }
}
