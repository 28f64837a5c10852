//! Integration tests for the `as_int` and `coalesce` fragments.

use json_mapper::{as_int, coalesce, evaluate, Expr, Mapping};
use serde_json::{json, Number, Value};

fn eval(expr: Expr, data: Value) -> Value {
    evaluate(&expr, &data).unwrap()
}

// ----------------------------------------------------------------- as_int

#[test]
fn test_as_int_coerces_strings_and_floats() {
    assert_eq!(eval(as_int("n", None), json!({"n": "42"})), json!(42));
    assert_eq!(eval(as_int("n", None), json!({"n": 12.9})), json!(12));
    assert_eq!(eval(as_int("n", None), json!({"n": " 7 items"})), json!(7));
}

#[test]
fn test_as_int_keeps_zero() {
    assert_eq!(eval(as_int("n", Some(5.into())), json!({"n": 0})), json!(0));
    assert_eq!(eval(as_int("n", Some(5.into())), json!({"n": "0"})), json!(0));
}

#[test]
fn test_as_int_default_on_failure() {
    assert_eq!(eval(as_int("n", Some((-1).into())), json!({"n": "abc"})), json!(-1));
    assert_eq!(eval(as_int("missing", Some(3.into())), json!({"n": 1})), json!(3));
    assert_eq!(eval(as_int("n", Some(0.into())), json!({"n": true})), json!(0));
}

#[test]
fn test_as_int_large_whole_floats() {
    assert_eq!(
        eval(as_int("n", None), json!({"n": 1.7e18})),
        json!(1_700_000_000_000_000_000_i64)
    );
    assert_eq!(
        eval(as_int("n", None), json!({"n": 12345678901234567.0})),
        json!(12_345_678_901_234_568_i64)
    );
    assert_eq!(eval(as_int("n", None), json!({"n": 0.00001})), json!(0));
}

#[test]
fn test_as_int_fractional_default() {
    let default = Number::from_f64(2.5);
    assert_eq!(eval(as_int("n", default), json!({"n": "abc"})), json!(2.5));
}

#[test]
fn test_as_int_without_default_yields_null() {
    assert_eq!(eval(as_int("n", None), json!({"n": "abc"})), json!(null));
    assert_eq!(eval(as_int("missing", None), json!({"n": 1})), json!(null));
}

#[test]
fn test_as_int_nested_path() {
    let expr: Expr = Mapping::new()
        .field("total", as_int("order.total", None))
        .field("count", as_int("order.lines.length", None))
        .into();
    assert_eq!(
        eval(expr, json!({"order": {"total": "99.95", "lines": [1, 2, 3]}})),
        json!({"total": 99, "count": 3})
    );
}

#[test]
fn test_as_int_broadcasts_over_array() {
    let expr: Expr = Mapping::new()
        .select("items")
        .field("qty", as_int("qty", Some(0.into())))
        .into();
    assert_eq!(
        eval(expr, json!({"items": [{"qty": "2"}, {"qty": "x"}]})),
        json!([{"qty": 2}, {"qty": 0}])
    );
}

// ----------------------------------------------------------------- coalesce

#[test]
fn test_coalesce_default_for_missing_and_null() {
    assert_eq!(eval(coalesce("a", "dflt"), json!({"b": 1})), json!("dflt"));
    assert_eq!(eval(coalesce("a", "dflt"), json!({"a": null})), json!("dflt"));
    assert_eq!(eval(coalesce("a.b.c", 0), json!({"a": {}})), json!(0));
}

#[test]
fn test_coalesce_keeps_falsy_values() {
    assert_eq!(eval(coalesce("a", 10), json!({"a": 0})), json!(0));
    assert_eq!(eval(coalesce("a", true), json!({"a": false})), json!(false));
    assert_eq!(eval(coalesce("a", "x"), json!({"a": ""})), json!(""));
}

#[test]
fn test_coalesce_returns_resolved_value() {
    assert_eq!(
        eval(coalesce("a", json!([])), json!({"a": {"b": [1]}})),
        json!({"b": [1]})
    );
}

#[test]
fn test_coalesce_in_mapping() {
    let expr: Expr = Mapping::new()
        .field("name", "name")
        .field("nickname", coalesce("nickname", "n/a"))
        .into();
    assert_eq!(
        eval(expr, json!({"name": "John"})),
        json!({"name": "John", "nickname": "n/a"})
    );
}
