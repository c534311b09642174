//! Numeric literal parsing: radix integers, floats and imaginary numbers.

use num_bigint::BigInt;
use num_traits::Num;
use taipan_ast::Constant;

/// Parses the raw text of a NUMBER token into a constant. Underscore
/// validation and the feature-version gate happen in the caller; here
/// underscores are simply stripped.
pub(crate) fn parse_number_literal(text: &str) -> Result<Constant, String> {
    let cleaned: String;
    let digits = if text.contains('_') {
        cleaned = text.chars().filter(|c| *c != '_').collect();
        cleaned.as_str()
    } else {
        text
    };

    if let Some(real) = digits
        .strip_suffix('j')
        .or_else(|| digits.strip_suffix('J'))
    {
        let imag = parse_float(real)?;
        return Ok(Constant::Complex { real: 0.0, imag });
    }

    if let Some(rest) = strip_radix_prefix(digits, &['x', 'X']) {
        return parse_radix(rest, 16);
    }
    if let Some(rest) = strip_radix_prefix(digits, &['o', 'O']) {
        return parse_radix(rest, 8);
    }
    if let Some(rest) = strip_radix_prefix(digits, &['b', 'B']) {
        return parse_radix(rest, 2);
    }

    if digits.contains(['.', 'e', 'E']) {
        return Ok(Constant::Float(parse_float(digits)?));
    }

    BigInt::from_str_radix(digits, 10)
        .map(Constant::Int)
        .map_err(|_| "invalid decimal literal".to_owned())
}

fn strip_radix_prefix<'a>(digits: &'a str, markers: &[char]) -> Option<&'a str> {
    let rest = digits.strip_prefix('0')?;
    markers.iter().find_map(|m| rest.strip_prefix(*m))
}

fn parse_radix(digits: &str, radix: u32) -> Result<Constant, String> {
    BigInt::from_str_radix(digits, radix)
        .map(Constant::Int)
        .map_err(|_| {
            let kind = match radix {
                16 => "hexadecimal",
                8 => "octal",
                _ => "binary",
            };
            format!("invalid {kind} literal")
        })
}

fn parse_float(text: &str) -> Result<f64, String> {
    text.parse::<f64>()
        .map_err(|_| "invalid decimal literal".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(parse_number_literal("42"), Ok(Constant::Int(42.into())));
        assert_eq!(parse_number_literal("0"), Ok(Constant::Int(0.into())));
        assert_eq!(
            parse_number_literal("1_000_000"),
            Ok(Constant::Int(1_000_000.into()))
        );
    }

    #[test]
    fn test_radix_integers() {
        assert_eq!(parse_number_literal("0xff"), Ok(Constant::Int(255.into())));
        assert_eq!(parse_number_literal("0o755"), Ok(Constant::Int(493.into())));
        assert_eq!(parse_number_literal("0b1010"), Ok(Constant::Int(10.into())));
        assert_eq!(parse_number_literal("0x_ff"), Ok(Constant::Int(255.into())));
    }

    #[test]
    fn test_huge_integer_round_trips() {
        let Ok(Constant::Int(value)) = parse_number_literal("123456789012345678901234567890")
        else {
            panic!("expected an int");
        };
        assert_eq!(value.to_string(), "123456789012345678901234567890");
    }

    #[test]
    fn test_floats() {
        assert_eq!(parse_number_literal("1.5"), Ok(Constant::Float(1.5)));
        assert_eq!(parse_number_literal(".5"), Ok(Constant::Float(0.5)));
        assert_eq!(parse_number_literal("1."), Ok(Constant::Float(1.0)));
        assert_eq!(parse_number_literal("1e3"), Ok(Constant::Float(1000.0)));
        assert_eq!(parse_number_literal("1_0.2_5e1_0"), Ok(Constant::Float(10.25e10)));
    }

    #[test]
    fn test_imaginary() {
        assert_eq!(
            parse_number_literal("2j"),
            Ok(Constant::Complex {
                real: 0.0,
                imag: 2.0
            })
        );
        assert_eq!(
            parse_number_literal("1.5J"),
            Ok(Constant::Complex {
                real: 0.0,
                imag: 1.5
            })
        );
    }
}
