use anyhow::{anyhow, Result};
use dimcalc::{Dimension, Measure};
use regex::Regex;

const NUMBER: &str = r"(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";

/// A number typed on the command line: `1.5`, `1.5+-0.1`, `2 km`, `20±0.5 °C`
#[derive(Debug, Clone, PartialEq)]
pub struct Amount {
    pub text: String,
    pub value: f64,
    pub stddev: Option<f64>,
    pub unit: Option<String>,
}

impl Amount {
    pub fn parse(text: &str) -> Result<Self> {
        let pattern = format!(
            r"^\s*(?P<value>[-+]?{n})\s*(?:(?:\+-|±)\s*(?P<stddev>{n}))?\s*(?P<unit>[^\s\d+\-±.].*?)?\s*$",
            n = NUMBER
        );
        let re = Regex::new(&pattern)?;
        let caps = re.captures(text).ok_or_else(|| {
            anyhow!(
                "Invalid amount '{}' (expected value[+-stddev] [unit], e.g. 1.5+-0.1 km)",
                text
            )
        })?;

        let value = caps["value"].parse::<f64>()?;
        let stddev = caps
            .name("stddev")
            .map(|m| m.as_str().parse::<f64>())
            .transpose()?;
        let unit = caps.name("unit").map(|m| m.as_str().to_string());

        Ok(Self {
            text: text.trim().to_string(),
            value,
            stddev,
            unit,
        })
    }

    /// The dimensionless amount, ready for `Unit::of`
    pub fn measure(&self) -> Result<Measure> {
        Ok(match self.stddev {
            Some(stddev) => Measure::with_stddev(self.value, stddev, Dimension::dimensionless())?,
            None => Measure::try_new(self.value, Dimension::dimensionless())?,
        })
    }
}
