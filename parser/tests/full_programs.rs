//! End-to-end runs over realistic program shapes, exercising the public
//! API only.

use taipan_ast::{Located, Mod, Stmt};
use taipan_parser::{parse, parse_program, Mode};

const PROGRAM: &str = r#"
"""Module docstring."""
from __future__ import annotations

import os.path as osp
from collections import OrderedDict

CONSTANT = 0x_FF
GREETING = f"hello {name!r:>{width}}"


class Registry:
    """Keeps named handlers."""

    def __init__(self, *handlers, strict=True, **extra):
        self._handlers = {h.name: h for h in handlers if h is not None}
        self._strict = strict

    async def dispatch(self, event):
        match event:
            case {"kind": "call", "args": [first, *rest]}:
                return await self._call(first, rest)
            case Point(x=0, y=0) | None:
                return None
            case _ if self._strict:
                raise ValueError(f"unhandled {event=}")

    @property
    def names(self):
        return sorted(self._handlers)


def scan(paths, *, follow_links=False):
    try:
        for path in paths:
            with open(path, encoding="utf-8") as fh:
                yield from (line.strip() for line in fh)
    except OSError as exc:
        raise RuntimeError("scan failed") from exc
    finally:
        log.debug("done")


type Handler = OrderedDict[str, int]

while pending := queue.pop():
    total += pending.weight if pending else 0
    del cache[pending.key]
    assert total >= 0, "weights must not go negative"
"#;

#[test]
fn test_full_program_parses() {
    let suite = parse_program(PROGRAM, "program.py").expect("program should parse");
    assert_eq!(suite.len(), 10);
    assert!(matches!(&suite[0], Stmt::Expr(e) if e.value.is_constant()));
    assert!(suite[6].is_class_def());
    assert!(suite[7].is_function_def());
    assert!(suite[8].is_type_alias());
    assert!(suite[9].is_while());
}

#[test]
fn test_parse_is_deterministic() {
    let first = parse_program(PROGRAM, "program.py").expect("should parse");
    let second = parse_program(PROGRAM, "program.py").expect("should parse");
    assert_eq!(first, second);
}

#[test]
fn test_node_spans_nest_and_are_ordered() {
    let suite = parse_program(PROGRAM, "program.py").expect("should parse");
    let mut previous_end = None;
    for stmt in &suite {
        let range = stmt.range();
        assert!(range.start <= range.end, "span must not be inverted");
        if let Some(previous_end) = previous_end {
            assert!(range.start >= previous_end, "statements must not overlap");
        }
        previous_end = Some(range.end);

        // A compound statement covers every statement of its body.
        if let Stmt::ClassDef(class) = stmt {
            for inner in &class.body {
                assert!(range.contains(&inner.range()));
            }
        }
    }
}

#[test]
fn test_interactive_and_eval_modes_roundtrip() {
    assert!(parse("total + 1", Mode::Expression, "<eval>").is_ok());
    let module = parse("x = 1\n", Mode::Interactive, "<stdin>").expect("should parse");
    assert!(matches!(module, Mod::Interactive(_)));
}

#[test]
fn test_windows_line_endings() {
    let suite = parse_program("a = 1\r\nif a:\r\n    b = 2\r\n", "<crlf>")
        .expect("CRLF sources should parse");
    assert_eq!(suite.len(), 2);
}

#[test]
fn test_line_continuations() {
    let suite = parse_program("total = 1 + \\\n    2\n", "<test>").expect("should parse");
    assert_eq!(suite.len(), 1);
}
