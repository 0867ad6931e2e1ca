//! FILENAME: core/pivot-engine/src/format.rs
//! PURPOSE: Number formatting for pivot value cells.
//! CONTEXT: Converts a cell's aggregated value to its display string. Absent
//! cells format as the empty string. An integer format applied to a
//! non-integral value is an error; no fallback format is tried.

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::matrix::Cell;

/// Display format for value cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NumberFormat {
    /// Integers without a decimal point, other values with trailing zeros trimmed.
    General,
    /// Whole numbers only.
    Integer {
        #[serde(default)]
        thousands_separator: bool,
    },
    /// Fixed number of decimal places.
    Fixed {
        decimal_places: u8,
        #[serde(default)]
        thousands_separator: bool,
    },
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::Fixed {
            decimal_places: 2,
            thousands_separator: false,
        }
    }
}

impl NumberFormat {
    pub fn integer() -> Self {
        NumberFormat::Integer {
            thousands_separator: false,
        }
    }

    pub fn fixed(decimal_places: u8) -> Self {
        NumberFormat::Fixed {
            decimal_places,
            thousands_separator: false,
        }
    }
}

/// Formats a cell; `None` becomes the empty string.
pub fn format_cell(value: Cell, format: &NumberFormat) -> Result<String, FormatError> {
    match value {
        None => Ok(String::new()),
        Some(v) => format_number(v, format),
    }
}

/// Formats a number according to `format`.
pub fn format_number(value: f64, format: &NumberFormat) -> Result<String, FormatError> {
    if !value.is_finite() {
        return Err(FormatError::NotFinite(value));
    }
    match format {
        NumberFormat::General => Ok(format_general(value)),
        NumberFormat::Integer { thousands_separator } => {
            if value.fract() != 0.0 {
                return Err(FormatError::NonIntegral(value));
            }
            Ok(format_decimal(value, 0, *thousands_separator))
        }
        NumberFormat::Fixed {
            decimal_places,
            thousands_separator,
        } => Ok(format_decimal(value, *decimal_places, *thousands_separator)),
    }
}

fn format_general(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }

    let formatted = format!("{:.10}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn format_decimal(value: f64, decimal_places: u8, use_thousands_separator: bool) -> String {
    let rounded = format!("{:.prec$}", value, prec = decimal_places as usize);

    if use_thousands_separator {
        add_thousands_separator(&rounded)
    } else {
        rounded
    }
}

/// Add thousands separators to a numeric string.
fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: Vec<char> = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::with_capacity(s.len() + digits.len() / 3 + 1);
    if negative {
        result.push('-');
    }
    let len = digits.len();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}
