//! Target validation: "cannot assign to ..." / "cannot delete ..." with
//! the innermost offending expression named and located.

use crate::parse_suite;

fn error_message(source: &str) -> String {
    parse_suite(source).unwrap_err().to_string()
}

#[test]
fn test_assign_to_call() {
    insta::assert_snapshot!(
        error_message("a() = 1\n"),
        @"cannot assign to function call at line 1 column 0"
    );
}

#[test]
fn test_assign_to_literal() {
    assert!(error_message("1 = x\n").contains("cannot assign to literal"));
    assert!(error_message("'s' = x\n").contains("cannot assign to literal"));
    assert!(error_message("... = x\n").contains("cannot assign to ellipsis"));
}

#[test]
fn test_assign_to_comparison_and_friends() {
    assert!(error_message("a < b = 1\n").contains("cannot assign to comparison"));
    assert!(error_message("a if b else c = 1\n").contains("cannot assign to conditional expression"));
    assert!(error_message("[x for x in y] = 1\n").contains("cannot assign to list comprehension"));
    assert!(error_message("{1: 2} = x\n").contains("cannot assign to dict literal"));
    assert!(error_message("lambda: 0 = x\n").contains("cannot assign to lambda"));
}

#[test]
fn test_innermost_offender_wins() {
    // The tuple itself is assignable; the call inside it is the offender.
    assert!(error_message("(a, b()) = 1\n").contains("cannot assign to function call"));
    assert!(error_message("[a, *b()] = 1\n").contains("cannot assign to function call"));
}

#[test]
fn test_valid_targets_accepted() {
    for source in [
        "a = 1\n",
        "a.b = 1\n",
        "a[b] = 1\n",
        "(a, b) = 1, 2\n",
        "[a, b] = 1, 2\n",
        "a, *b = xs\n",
    ] {
        assert!(parse_suite(source).is_ok(), "{source:?} should parse");
    }
}

#[test]
fn test_delete_targets() {
    assert!(parse_suite("del a, b.c, d[0]\n").is_ok());
    assert!(error_message("del f()\n").contains("cannot delete function call"));
    // Starred expressions can never be deleted.
    assert!(error_message("del *a\n").contains("cannot delete starred"));
}

#[test]
fn test_for_targets() {
    assert!(error_message("for a() in b: pass\n").contains("cannot assign to function call"));
    assert!(parse_suite("for a.b in c: pass\n").is_ok());
}

#[test]
fn test_augmented_assignment_targets() {
    assert!(
        error_message("(a, b) += 1\n").contains("is an illegal expression for augmented assignment")
    );
}

#[test]
fn test_assign_to_yield() {
    assert!(
        error_message("def f():\n    yield x = 1\n")
            .contains("assignment to yield expression not possible")
    );
}

#[test]
fn test_annotated_targets() {
    assert!(error_message("(a, b): int = 1\n").contains("only single target (not tuple) can be annotated"));
    assert!(error_message("[a]: int = 1\n").contains("only single target (not list) can be annotated"));
    assert!(error_message("a + b: int = 1\n").contains("illegal target for annotation"));
    assert!(parse_suite("a.b: int = 1\n").is_ok());
    assert!(parse_suite("a[0]: int = 1\n").is_ok());
}

#[test]
fn test_named_expression_target() {
    assert!(error_message("(a.b := 1)\n").contains("cannot use assignment expressions with attribute"));
}
