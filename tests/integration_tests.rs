//! Integration tests for compiling and evaluating time comparisons
//!
//! These tests drive the public API end to end: source text through `Env`
//! into the evaluator.

use chrono::{DateTime, Duration, Utc};
use timecheck_rs::env::{DeclType, DeclarationLoader, Env};
use timecheck_rs::eval::{format_timestamp, parse_timestamp};
use timecheck_rs::expr::{CompareOp, Expr};
use timecheck_rs::{evaluate, EvalError, TimeCheckError};

// ============================================================================
// Helpers
// ============================================================================

const CUTOFF: &str = "2020-07-01T00:00:00.000Z";

fn at(s: &str) -> DateTime<Utc> {
    parse_timestamp(s).unwrap()
}

fn eval_src(src: &str, now: DateTime<Utc>) -> Result<bool, TimeCheckError> {
    let checked = Env::default().compile(src)?;
    Ok(checked.evaluate(now)?)
}

/// `timestamp("<t>") <op> timestamp("<u>")`
fn between(op: CompareOp, t: DateTime<Utc>, u: DateTime<Utc>) -> Expr {
    Expr::compare(
        op,
        Expr::timestamp(format_timestamp(&t)),
        Expr::timestamp(format_timestamp(&u)),
    )
}

fn sample_pairs() -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let base = at(CUTOFF);
    vec![
        (base, base + Duration::milliseconds(1)),
        (base - Duration::days(365), base),
        (at("1970-01-01T00:00:00.000Z"), at("2038-01-19T03:14:07.000Z")),
        (base + Duration::seconds(59), base + Duration::minutes(1)),
    ]
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_request_time_before_cutoff() {
    let src = r#"request.time < timestamp("2020-07-01T00:00:00.000Z")"#;
    assert!(eval_src(src, at("2020-06-01T00:00:00.000Z")).unwrap());
}

#[test]
fn test_request_time_after_cutoff() {
    let src = r#"request.time < timestamp("2020-07-01T00:00:00.000Z")"#;
    assert!(!eval_src(src, at("2021-01-01T00:00:00.000Z")).unwrap());
}

#[test]
fn test_non_strict_with_equal_instants() {
    let src = r#"timestamp("2020-07-01T00:00:00.000Z") >= request.time"#;
    assert!(eval_src(src, at(CUTOFF)).unwrap());
}

#[test]
fn test_equality_operator_is_unknown() {
    let src = r#"request.time == timestamp("2020-07-01T00:00:00.000Z")"#;
    let err = eval_src(src, at(CUTOFF)).unwrap_err();
    assert!(matches!(
        err,
        TimeCheckError::Eval(EvalError::UnknownOperator(ref f)) if f == "=="
    ));
}

#[test]
fn test_unparseable_timestamp_literal() {
    let src = r#"request.time < timestamp("not-a-date")"#;
    let err = eval_src(src, at(CUTOFF)).unwrap_err();
    assert!(matches!(
        err,
        TimeCheckError::Eval(EvalError::TimestampParse { .. })
    ));
}

// ============================================================================
// Ordering properties
// ============================================================================

#[test]
fn test_strictly_ordered_pairs() {
    let now = at(CUTOFF);
    for (a, b) in sample_pairs() {
        assert!(evaluate(&between(CompareOp::Lt, a, b), now).unwrap());
        assert!(!evaluate(&between(CompareOp::Lt, b, a), now).unwrap());
        assert!(evaluate(&between(CompareOp::Lte, a, b), now).unwrap());
        assert!(!evaluate(&between(CompareOp::Lte, b, a), now).unwrap());
        assert!(evaluate(&between(CompareOp::Gt, b, a), now).unwrap());
        assert!(evaluate(&between(CompareOp::Gte, b, a), now).unwrap());
    }
}

#[test]
fn test_equal_instants_satisfy_non_strict_only() {
    let now = at(CUTOFF);
    for (a, _) in sample_pairs() {
        assert!(evaluate(&between(CompareOp::Lte, a, a), now).unwrap());
        assert!(evaluate(&between(CompareOp::Gte, a, a), now).unwrap());
        assert!(!evaluate(&between(CompareOp::Lt, a, a), now).unwrap());
        assert!(!evaluate(&between(CompareOp::Gt, a, a), now).unwrap());
    }
}

#[test]
fn test_non_strict_is_negated_swapped_strict() {
    let now = at(CUTOFF);
    for (a, b) in sample_pairs() {
        for (x, y) in [(a, b), (b, a), (a, a)] {
            let lte = evaluate(&between(CompareOp::Lte, x, y), now).unwrap();
            let swapped_lt = evaluate(&between(CompareOp::Lt, y, x), now).unwrap();
            assert_eq!(lte, !swapped_lt);
        }
    }
}

#[test]
fn test_request_time_resolves_to_now() {
    let request_time = Expr::select(Expr::ident("request"), "time");
    for (a, _) in sample_pairs() {
        let literal = Expr::timestamp(format_timestamp(&a));
        let eq_lte = Expr::compare(CompareOp::Lte, request_time.clone(), literal.clone());
        let eq_gte = Expr::compare(CompareOp::Gte, request_time.clone(), literal.clone());
        let lt = Expr::compare(CompareOp::Lt, request_time.clone(), literal);
        assert!(evaluate(&eq_lte, a).unwrap());
        assert!(evaluate(&eq_gte, a).unwrap());
        assert!(!evaluate(&lt, a).unwrap());
    }
}

#[test]
fn test_timestamp_round_trip() {
    assert_eq!(format_timestamp(&at(CUTOFF)), CUTOFF);
}

// ============================================================================
// Environment
// ============================================================================

#[test]
fn test_declarations_file() {
    let path = std::env::temp_dir().join(format!(
        "timecheck-decls-{}.yaml",
        std::process::id()
    ));
    std::fs::write(
        &path,
        "deadline:\n  type: timestamp\nrequest.time:\n  type: timestamp\n",
    )
    .unwrap();

    let decls = DeclarationLoader::new().load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(decls.lookup("deadline"), Some(DeclType::Timestamp));

    let env = Env::new(decls);
    let checked = env
        .compile("request.time >= timestamp('2020-01-01T00:00:00Z')")
        .unwrap();
    assert!(checked.evaluate(at(CUTOFF)).unwrap());

    // Declared but not bound by the evaluator
    let checked = env
        .compile("deadline < timestamp('2020-01-01T00:00:00Z')")
        .unwrap();
    assert!(matches!(
        checked.evaluate(at(CUTOFF)),
        Err(EvalError::UnsupportedExpression(_))
    ));
}

#[test]
fn test_type_errors_stop_before_evaluation() {
    let err = eval_src("request.time < 42", at(CUTOFF)).unwrap_err();
    assert!(matches!(err, TimeCheckError::Check(_)));
}

#[test]
fn test_concurrent_evaluation() {
    let checked = Env::default()
        .compile(r#"request.time < timestamp("2020-07-01T00:00:00.000Z")"#)
        .unwrap();
    let base = at(CUTOFF);

    std::thread::scope(|s| {
        for offset in -4i64..4 {
            let checked = &checked;
            s.spawn(move || {
                let now = base + Duration::seconds(offset);
                assert_eq!(checked.evaluate(now).unwrap(), offset < 0);
            });
        }
    });
}
