use dimcalc::CalcError;

/// Format a CalcError for the terminal, with a hint where one helps
pub fn format_error(error: &CalcError) -> String {
    let help = match error {
        CalcError::UnknownUnit(_) => Some(
            "run `dimcalc list` to see known units, or pass --allow-any-prefix to accept any prefix",
        ),
        CalcError::Dimension(_) => {
            Some("only quantities of the same dimension can be converted, added or compared")
        }
        CalcError::IncompatibleUnit(_) => {
            Some("affine and logarithmic units cannot be chained, prefixed or composed")
        }
        CalcError::Value(_) | CalcError::Type(_) => None,
    };

    match help {
        Some(help) => format!("{}\n  help: {}", error, help),
        None => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_unit_has_help() {
        let formatted = format_error(&CalcError::unknown_unit("furlongs"));
        assert!(formatted.starts_with("Unknown unit: No unit found for 'furlongs'"));
        assert!(formatted.contains("help: run `dimcalc list`"));
    }

    #[test]
    fn test_value_error_is_plain() {
        let formatted = format_error(&CalcError::Value("bad".to_string()));
        assert_eq!(formatted, "Invalid value: bad");
    }
}
