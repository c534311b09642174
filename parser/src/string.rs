//! String literal parsing: prefix handling, escape decoding, adjacent
//! literal concatenation and f-string assembly.

use itertools::Itertools;
use taipan_ast::{
    Constant, ConversionFlag, Expr, ExprConstant, ExprFormattedValue, ExprJoinedStr, Located,
    SourceRange,
};

use crate::lexer::StringPrefix;
use crate::parser::{ParseResult, Parser};
use crate::token::Token;

/// A parsed sub-result paired with the side data of the token that
/// produced it (the f-string debug text).
#[derive(Clone, Debug)]
pub(crate) struct ResultTokenWithMetadata {
    pub result: Expr,
    pub metadata: Option<Box<str>>,
    pub range: SourceRange,
}

// --- escape decoding ---------------------------------------------------

struct EscapeDecoder<'s> {
    chars: std::iter::Peekable<std::str::CharIndices<'s>>,
    input: &'s str,
}

impl<'s> EscapeDecoder<'s> {
    fn new(input: &'s str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            input,
        }
    }

    fn take_hex(&mut self, count: usize) -> Option<u32> {
        let mut value = 0u32;
        for _ in 0..count {
            let (_, c) = self.chars.next()?;
            value = value.checked_mul(16)? + c.to_digit(16)?;
        }
        Some(value)
    }
}

fn decode_error_at(
    p: &Parser,
    range: SourceRange,
    codec: &str,
    pos: usize,
    reason: &str,
) -> crate::error::ParseError {
    p.syntax_error_known_location(
        range,
        format!("(unicode error) '{codec}' codec can't decode bytes in position {pos}: {reason}"),
    )
}

/// Runs the escape decoder over cooked (non-raw) string content.
pub(crate) fn decode_str_escapes(
    p: &mut Parser,
    s: &str,
    range: SourceRange,
) -> ParseResult<String> {
    let mut out = String::with_capacity(s.len());
    let mut dec = EscapeDecoder::new(s);
    while let Some((i, c)) = dec.chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((_, esc)) = dec.chars.next() else {
            out.push('\\');
            break;
        };
        match esc {
            '\n' => {}
            '\r' => {
                // A cooked `\` before `\r\n` swallows the whole line break.
                if matches!(dec.chars.peek(), Some((_, '\n'))) {
                    dec.chars.next();
                }
            }
            '\\' | '\'' | '"' => out.push(esc),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut value = esc.to_digit(8).expect("octal digit");
                for _ in 0..2 {
                    match dec.chars.peek() {
                        Some((_, c)) if ('0'..='7').contains(c) => {
                            value = value * 8 + c.to_digit(8).expect("octal digit");
                            dec.chars.next();
                        }
                        _ => break,
                    }
                }
                out.push(char::from_u32(value).expect("three octal digits fit in a char"));
            }
            'x' => {
                let Some(value) = dec.take_hex(2) else {
                    return Err(decode_error_at(p, range, "unicodeescape", i, "truncated \\xXX escape"));
                };
                out.push(char::from_u32(value).expect("a byte fits in a char"));
            }
            'u' => {
                let Some(value) = dec.take_hex(4) else {
                    return Err(decode_error_at(p, range, "unicodeescape", i, "truncated \\uXXXX escape"));
                };
                let Some(c) = char::from_u32(value) else {
                    return Err(decode_error_at(p, range, "unicodeescape", i, "illegal Unicode character"));
                };
                out.push(c);
            }
            'U' => {
                let Some(value) = dec.take_hex(8) else {
                    return Err(decode_error_at(p, range, "unicodeescape", i, "truncated \\UXXXXXXXX escape"));
                };
                let Some(c) = char::from_u32(value) else {
                    return Err(decode_error_at(p, range, "unicodeescape", i, "illegal Unicode character"));
                };
                out.push(c);
            }
            'N' => {
                if !matches!(dec.chars.peek(), Some((_, '{'))) {
                    return Err(decode_error_at(p, range, "unicodeescape", i, "malformed \\N character escape"));
                }
                dec.chars.next();
                let name_start = dec.chars.peek().map(|(j, _)| *j).unwrap_or(dec.input.len());
                let mut name_end = name_start;
                loop {
                    match dec.chars.next() {
                        Some((j, '}')) => {
                            name_end = j;
                            break;
                        }
                        Some(_) => {}
                        None => {
                            return Err(decode_error_at(p, range, "unicodeescape", i, "malformed \\N character escape"));
                        }
                    }
                }
                let name = &dec.input[name_start..name_end];
                let Some(c) = unicode_names2::character(name) else {
                    return Err(decode_error_at(p, range, "unicodeescape", i, "unknown Unicode character name"));
                };
                out.push(c);
            }
            other => {
                p.warn_invalid_escape_sequence(other, range);
                out.push('\\');
                out.push(other);
            }
        }
    }
    Ok(out)
}

/// Escape decoding for bytes literals; `\u`/`\U`/`\N` are not escapes here.
pub(crate) fn decode_bytes_escapes(
    p: &mut Parser,
    s: &str,
    range: SourceRange,
) -> ParseResult<Vec<u8>> {
    let mut out = Vec::with_capacity(s.len());
    let mut dec = EscapeDecoder::new(s);
    while let Some((i, c)) = dec.chars.next() {
        if c != '\\' {
            out.push(c as u8);
            continue;
        }
        let Some((_, esc)) = dec.chars.next() else {
            out.push(b'\\');
            break;
        };
        match esc {
            '\n' => {}
            '\r' => {
                if matches!(dec.chars.peek(), Some((_, '\n'))) {
                    dec.chars.next();
                }
            }
            '\\' | '\'' | '"' => out.push(esc as u8),
            'a' => out.push(0x07),
            'b' => out.push(0x08),
            'f' => out.push(0x0c),
            'n' => out.push(b'\n'),
            'r' => out.push(b'\r'),
            't' => out.push(b'\t'),
            'v' => out.push(0x0b),
            '0'..='7' => {
                let mut value = esc.to_digit(8).expect("octal digit");
                for _ in 0..2 {
                    match dec.chars.peek() {
                        Some((_, c)) if ('0'..='7').contains(c) => {
                            value = value * 8 + c.to_digit(8).expect("octal digit");
                            dec.chars.next();
                        }
                        _ => break,
                    }
                }
                if value > 0xff {
                    return Err(decode_error_at(
                        p,
                        range,
                        "bytesescape",
                        i,
                        "octal escape value out of range (0-255)",
                    ));
                }
                out.push(value as u8);
            }
            'x' => {
                let Some(value) = dec.take_hex(2) else {
                    return Err(decode_error_at(p, range, "bytesescape", i, "truncated \\xXX escape"));
                };
                out.push(value as u8);
            }
            other => {
                p.warn_invalid_escape_sequence(other, range);
                out.push(b'\\');
                let mut buf = [0u8; 4];
                out.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    Ok(out)
}

// --- literal parsing ---------------------------------------------------

/// Strips the quotes off a literal's text, returning the content and
/// whether the literal was triple-quoted.
fn strip_quotes(text: &str) -> (&str, bool) {
    let quote = text
        .chars()
        .next()
        .expect("literal text starts with its quote");
    let triple = text.len() >= 6 && text.as_bytes()[1] == quote as u8 && text.as_bytes()[2] == quote as u8;
    if triple {
        (&text[3..text.len() - 3], true)
    } else {
        (&text[1..text.len() - 1], false)
    }
}

/// Parses a complete STRING token into a Constant node.
pub(crate) fn parse_string_literal(p: &mut Parser, token: &Token) -> ParseResult<Expr> {
    let text = &*token.text;
    let quote_pos = text
        .find(['\'', '"'])
        .expect("a string token contains a quote");
    let prefix =
        StringPrefix::parse(&text[..quote_pos]).expect("the tokenizer validated the prefix");
    let (content, _triple) = strip_quotes(&text[quote_pos..]);

    let range = token.range;
    if prefix.bytes {
        if !content.is_ascii() {
            return Err(p.syntax_error_known_location(
                range,
                "bytes can only contain ASCII literal characters",
            ));
        }
        let value = if prefix.raw || memchr::memchr(b'\\', content.as_bytes()).is_none() {
            content.as_bytes().to_vec()
        } else {
            decode_bytes_escapes(p, content, range)?
        };
        return Ok(ExprConstant {
            range,
            value: Constant::Bytes(value),
            kind: None,
        }
        .into());
    }

    let value = if prefix.raw || memchr::memchr(b'\\', content.as_bytes()).is_none() {
        content.to_owned()
    } else {
        decode_str_escapes(p, content, range)?
    };
    Ok(ExprConstant {
        range,
        value: Constant::Str(value),
        kind: prefix.unicode.then(|| "u".to_owned()),
    }
    .into())
}

// --- f-string assembly -------------------------------------------------

/// Decodes one FSTRING_MIDDLE constant. Doubled braces arrive as their
/// two-character raw slice and decode to a single brace.
fn decode_fstring_part(
    p: &mut Parser,
    is_raw: bool,
    constant: ExprConstant,
) -> ParseResult<ExprConstant> {
    let Constant::Str(text) = &constant.value else {
        unreachable!("f-string middles are string constants");
    };
    let decoded = if text == "{{" || text == "}}" {
        text[..1].to_owned()
    } else if is_raw || memchr::memchr(b'\\', text.as_bytes()).is_none() {
        text.clone()
    } else {
        decode_str_escapes(p, text, constant.range)?
    };
    Ok(ExprConstant {
        range: constant.range,
        value: Constant::Str(decoded),
        kind: None,
    })
}

fn is_empty_str_constant(expr: &Expr) -> bool {
    matches!(expr, Expr::Constant(c) if matches!(&c.value, Constant::Str(s) if s.is_empty()))
}

/// Builds the JoinedStr for one f-string literal: decodes middles, drops
/// the empty ones and splices debug-expression pairs in place.
pub(crate) fn joined_str(
    p: &mut Parser,
    start: &Token,
    raw_expressions: Vec<Expr>,
    end: &Token,
) -> ParseResult<Expr> {
    let is_raw = start.text.contains(['r', 'R']);
    let mut values = Vec::with_capacity(raw_expressions.len());
    for item in raw_expressions {
        match item {
            // A two-element JoinedStr here is the debug form produced by
            // formatted_value: the `expr=` text plus the formatted value.
            Expr::JoinedStr(inner) => {
                debug_assert_eq!(inner.values.len(), 2);
                values.extend(inner.values);
            }
            Expr::Constant(constant) => {
                let part = decode_fstring_part(p, is_raw, constant)?;
                if !matches!(&part.value, Constant::Str(s) if s.is_empty()) {
                    values.push(part.into());
                }
            }
            other => values.push(other),
        }
    }
    Ok(ExprJoinedStr {
        range: SourceRange::new(start.range.start, end.range.end),
        values,
    }
    .into())
}

/// Validates the conversion after `!` and pairs it with the `!` token's
/// side data.
pub(crate) fn check_fstring_conversion(
    p: &mut Parser,
    conv_token: &Token,
    conv: Expr,
) -> ParseResult<ResultTokenWithMetadata> {
    if conv_token.range.end != conv.range().start {
        return Err(p.syntax_error_known_range(
            conv_token.range,
            conv.range(),
            "f-string: conversion type must come right after the exclamation mark",
        ));
    }
    Ok(ResultTokenWithMetadata {
        result: conv,
        metadata: conv_token.metadata.clone(),
        range: conv_token.range,
    })
}

/// Normalizes a format spec: empty specs stay an empty JoinedStr, single
/// constants are kept as-is, and anything longer goes through string
/// concatenation.
pub(crate) fn setup_full_format_spec(
    p: &mut Parser,
    colon: &Token,
    spec: Vec<Expr>,
    range: SourceRange,
) -> ParseResult<ResultTokenWithMetadata> {
    let spec: Vec<Expr> = spec
        .into_iter()
        .filter(|item| !is_empty_str_constant(item))
        .collect();
    let result = if spec.is_empty() || (spec.len() == 1 && spec[0].is_constant()) {
        ExprJoinedStr {
            range,
            values: spec,
        }
        .into()
    } else {
        concatenate_strings(p, spec, range)?
    };
    Ok(ResultTokenWithMetadata {
        result,
        metadata: colon.metadata.clone(),
        range: colon.range,
    })
}

/// Builds a FormattedValue (or the debug JoinedStr pair) for one
/// replacement field.
pub(crate) fn formatted_value(
    p: &mut Parser,
    expression: Expr,
    debug: Option<&Token>,
    conversion: Option<&ResultTokenWithMetadata>,
    format_spec: Option<&ResultTokenWithMetadata>,
    closing_brace: &Token,
    range: SourceRange,
) -> ParseResult<Expr> {
    let mut conversion_flag = ConversionFlag::None;
    if let Some(conversion) = conversion {
        let Expr::Name(name) = &conversion.result else {
            unreachable!("conversions parse as names");
        };
        let id = name.id.as_str();
        let flag = if id.len() == 1 {
            ConversionFlag::try_from_byte(id.as_bytes()[0])
        } else {
            None
        };
        let Some(flag) = flag else {
            return Err(p.syntax_error_known_location(
                name.range,
                format!("f-string: invalid conversion character '{id}': expected 's', 'r', or 'a'"),
            ));
        };
        conversion_flag = flag;
    } else if debug.is_some() && format_spec.is_none() {
        // Debug expressions default to repr when nothing is specified.
        conversion_flag = ConversionFlag::Repr;
    }

    let value = ExprFormattedValue {
        range,
        value: Box::new(expression),
        conversion: conversion_flag,
        format_spec: format_spec.map(|spec| Box::new(spec.result.clone())),
    };

    let Some(_) = debug else {
        return Ok(value.into());
    };

    let (debug_end, metadata) = if let Some(conversion) = conversion {
        (conversion.result.range().start, conversion.metadata.clone())
    } else if let Some(format_spec) = format_spec {
        (
            format_spec.result.range().start.with_col_offset(1),
            format_spec.metadata.clone(),
        )
    } else {
        (range.end, closing_brace.metadata.clone())
    };

    let text = metadata.map(|m| m.to_string()).unwrap_or_default();
    let debug_text = ExprConstant {
        range: SourceRange::new(
            range.start.with_col_offset(1),
            debug_end.with_col_offset(-1),
        ),
        value: Constant::Str(text),
        kind: None,
    };
    Ok(ExprJoinedStr {
        range: SourceRange::new(range.start, debug_end),
        values: vec![debug_text.into(), value.into()],
    }
    .into())
}

// --- adjacent-literal concatenation ------------------------------------

/// Concatenates adjacent string literals per source order: pure-bytes
/// sequences collapse into one Constant; anything involving an f-string
/// flattens and folds into a JoinedStr; a plain run of strings folds to a
/// single Constant.
pub(crate) fn concatenate_strings(
    p: &mut Parser,
    strings: Vec<Expr>,
    range: SourceRange,
) -> ParseResult<Expr> {
    debug_assert!(!strings.is_empty());

    let mut bytes_found = false;
    let mut unicode_found = false;
    let mut fstring_found = false;
    for elem in &strings {
        match elem {
            Expr::Constant(c) => match &c.value {
                Constant::Bytes(_) => bytes_found = true,
                _ => unicode_found = true,
            },
            Expr::JoinedStr(_) => fstring_found = true,
            _ => fstring_found = true,
        }
    }

    if (unicode_found || fstring_found) && bytes_found {
        return Err(p.syntax_error_known_location(range, "cannot mix bytes and nonbytes literals"));
    }

    if bytes_found {
        let kind = match &strings[0] {
            Expr::Constant(c) => c.kind.clone(),
            _ => None,
        };
        let mut data = Vec::new();
        for elem in &strings {
            if let Expr::Constant(c) = elem {
                if let Constant::Bytes(b) = &c.value {
                    data.extend_from_slice(b);
                }
            }
        }
        return Ok(ExprConstant {
            range,
            value: Constant::Bytes(data),
            kind,
        }
        .into());
    }

    if !fstring_found && strings.len() == 1 {
        return Ok(strings.into_iter().next().expect("length checked"));
    }

    // Flatten JoinedStr children into one level.
    let mut flattened: Vec<Expr> = Vec::new();
    for elem in strings {
        match elem {
            Expr::JoinedStr(joined) => flattened.extend(joined.values),
            other => flattened.push(other),
        }
    }

    // Fold maximal runs of string constants, dropping empty ones when the
    // result stays a JoinedStr.
    let mut values: Vec<Expr> = Vec::new();
    let mut i = 0;
    while i < flattened.len() {
        let is_str_constant = |e: &Expr| {
            matches!(e, Expr::Constant(c) if matches!(c.value, Constant::Str(_)))
        };
        if !is_str_constant(&flattened[i]) {
            values.push(flattened[i].clone());
            i += 1;
            continue;
        }
        let run_start = i;
        let mut folded = String::new();
        let (mut kind, mut last_range) = (None, SourceRange::default());
        let first_range = flattened[i].range();
        while i < flattened.len() && is_str_constant(&flattened[i]) {
            let Expr::Constant(c) = &flattened[i] else {
                unreachable!()
            };
            if i == run_start {
                kind = c.kind.clone();
            }
            if let Constant::Str(s) = &c.value {
                folded.push_str(s);
            }
            last_range = c.range;
            i += 1;
        }
        if fstring_found && folded.is_empty() {
            continue;
        }
        if i == run_start + 1 {
            values.push(flattened[run_start].clone());
        } else {
            values.push(
                ExprConstant {
                    range: SourceRange::new(first_range.start, last_range.end),
                    value: Constant::Str(folded),
                    kind,
                }
                .into(),
            );
        }
    }

    if !fstring_found {
        return Ok(values
            .into_iter()
            .exactly_one()
            .expect("a plain run folds to one constant"));
    }

    Ok(ExprJoinedStr { range, values }.into())
}
