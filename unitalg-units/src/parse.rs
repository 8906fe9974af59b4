//! Unit string parsing - parse expressions like "kg*m/s^2" or "m^2/s"
//!
//! Grammar, after all whitespace is stripped:
//! - `*` switches the running sign to +1, `/` switches it to -1
//! - a unit name `[a-zA-Z_][a-zA-Z0-9_]*`, optionally followed by `^`
//!   and an integer exponent (`-?[0-9]+`, default 1)
//!
//! Each name adds `sign * exponent` to its entry; entries that reach
//! zero are removed. There are no parentheses and no precedence.

use tracing::trace;
use unitalg_core::UnitError;

use crate::DimensionMap;

/// Parse a unit expression into a dimension map
///
/// Supported formats:
/// - Simple: "m", "kg", "s"
/// - Powers: "m^2", "s^-1"
/// - Products: "m*s", "kg*m"
/// - Quotients: "m/s", "kg/m^2"
/// - Combined: "kg*m/s^2", "m^2*kg/s^3"
///
/// An empty (or all-whitespace) input is dimensionless. Error indices are
/// byte offsets into the whitespace-stripped input.
pub fn parse_dimensions(input: &str) -> Result<DimensionMap, UnitError> {
    let stripped: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = stripped.as_bytes();

    let mut map = DimensionMap::new();
    let mut sign = 1i32;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'*' => {
                sign = 1;
                i += 1;
            }
            b'/' => {
                sign = -1;
                i += 1;
            }
            _ => {
                let name_len = identifier_len(&bytes[i..]);
                if name_len == 0 {
                    return Err(UnitError::parse(input, i, "expected unit name"));
                }
                let name = &stripped[i..i + name_len];
                i += name_len;

                let mut exp = 1i32;
                if bytes.get(i) == Some(&b'^') {
                    i += 1;
                    let (value, len) = exponent_prefix(&bytes[i..])
                        .map_err(|message| UnitError::parse(input, i, message))?;
                    exp = value;
                    i += len;
                }

                let delta = exp.checked_mul(sign).ok_or_else(|| {
                    UnitError::arithmetic(format!("exponent overflow for '{}'", name))
                })?;
                map.accumulate(name.to_string(), delta)?;
            }
        }
    }

    trace!(input, dimensions = %map, "parsed unit expression");
    Ok(map)
}

/// Length of the identifier at the start of `bytes`, 0 if none
fn identifier_len(bytes: &[u8]) -> usize {
    match bytes.first() {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => {}
        _ => return 0,
    }
    bytes
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count()
}

/// Parse `-?[0-9]+` at the start of `bytes`, returning value and length
fn exponent_prefix(bytes: &[u8]) -> Result<(i32, usize), &'static str> {
    let sign_len = usize::from(bytes.first() == Some(&b'-'));
    let digits = bytes[sign_len..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return Err("expected integer exponent after '^'");
    }

    let len = sign_len + digits;
    // ASCII-only slice, so the conversion can't fail
    let text = std::str::from_utf8(&bytes[..len]).map_err(|_| "invalid exponent")?;
    let value = text.parse::<i32>().map_err(|_| "exponent out of range")?;
    Ok((value, len))
}

/// Parse a quantity string like "5 m", "100kg" or "-3.5e2 m/s"
///
/// The leading real literal becomes the value and the remainder is parsed
/// as a unit expression.
pub fn parse_quantity(s: &str) -> Result<(f64, DimensionMap), UnitError> {
    let s = s.trim();
    let split_pos = number_prefix_len(s.as_bytes());

    if split_pos == 0 {
        return Err(UnitError::parse(s, 0, "no number found"));
    }

    let num_str = &s[..split_pos];
    let value: f64 = num_str
        .parse()
        .map_err(|_| UnitError::parse(s, 0, format!("invalid number: {}", num_str)))?;

    let dims = parse_dimensions(&s[split_pos..])?;
    Ok((value, dims))
}

/// Length of the real literal `[+-]?digits[.digits][(e|E)[+-]?digits]`
fn number_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        bytes[start.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut i = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));
    let int_digits = digits_from(i);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = digits_from(i + 1);
        i += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    // Exponent only counts when digits follow, so "2 exa" keeps its unit
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_digits = digits_from(j);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }
    i
}
