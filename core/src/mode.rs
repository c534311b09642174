/// The start rule driving a parse run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, is_macro::Is)]
pub enum Mode {
    /// A module body: a sequence of statements terminated by ENDMARKER.
    Module,
    /// A single interactive statement; ENDMARKER after the statement is
    /// rewritten to NEWLINE so that the REPL can keep feeding lines.
    Interactive,
    /// A single expression, as for `eval()`.
    Expression,
    /// An expression snippet embedded in an f-string; locations are
    /// projected into the enclosing source's coordinate system.
    FStringInput,
    /// A `(type, ...) -> type` function signature from a type comment.
    FunctionType,
}

impl std::str::FromStr for Mode {
    type Err = ModeParseError;

    // To support the `mode` argument of a `builtins.compile()`-alike
    fn from_str(s: &str) -> Result<Self, ModeParseError> {
        match s {
            "exec" => Ok(Mode::Module),
            "eval" => Ok(Mode::Expression),
            "single" => Ok(Mode::Interactive),
            _ => Err(ModeParseError(())),
        }
    }
}

#[derive(Debug)]
pub struct ModeParseError(());

impl std::fmt::Display for ModeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, r#"mode must be "exec", "eval", or "single""#)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("exec".parse::<Mode>().unwrap(), Mode::Module);
        assert_eq!("eval".parse::<Mode>().unwrap(), Mode::Expression);
        assert_eq!("single".parse::<Mode>().unwrap(), Mode::Interactive);
        assert!("block".parse::<Mode>().is_err());
    }
}
