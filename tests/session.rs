use macro_calc::{CalcError, ErrorKind, Session};

fn assert_failure(session: &mut Session, input: &str, kind: ErrorKind) {
    match session.handle(input) {
        Ok(reply) => panic!("'{input}' succeeded with '{reply}' but was expected to fail"),
        Err(e) => assert_eq!(e.kind(), kind, "'{input}' failed with the wrong kind of error: {e}"),
    }
}

#[test]
fn bare_expressions_get_generated_names() {
    let mut session = Session::new();
    assert_eq!(session.handle("2 + 2").unwrap(), "x0 = 4");
    assert_eq!(session.handle("7-3*2").unwrap(), "x1 = 1");
    assert_eq!(session.handle("(2+2)*2").unwrap(), "x2 = 8");
    assert_eq!(session.handle("2^2^3").unwrap(), "x3 = 256");
}

#[test]
fn generated_names_skip_assigned_ones() {
    let mut session = Session::new();
    session.handle("x1 = 10").unwrap();
    assert_eq!(session.handle("1").unwrap(), "x0 = 1");
    assert_eq!(session.handle("2").unwrap(), "x2 = 2");
}

#[test]
fn create_variable() {
    let mut session = Session::new();
    assert_eq!(session.handle("y = 5 * 5").unwrap(), "y = 25");
    assert_eq!(session.handle("cos(y)").unwrap(), format!("x0 = {}", 25f64.cos()));
}

#[test]
fn change_variable() {
    let mut session = Session::new();
    session.handle("2 + 2").unwrap();
    assert_eq!(session.handle("x0 = 3 * 3").unwrap(), "x0 = 9");
    assert_eq!(session.handle("x0+1").unwrap(), "x1 = 10");
}

#[test]
fn add_macros() {
    let mut session = Session::new();
    assert_eq!(session.handle("$r(x)=x+2").unwrap(), "$r");
    assert_eq!(session.handle("r(2)*2").unwrap(), "x0 = 8");
    session.handle("1+1").unwrap();
    assert_eq!(session.handle("r(r(x1))*2").unwrap(), "x2 = 12");
    assert_eq!(session.handle("r(r(2))*2").unwrap(), "x3 = 12");
}

#[test]
fn change_macros() {
    let mut session = Session::new();
    session.handle("$r(x)=x+2").unwrap();
    assert_eq!(session.handle("r(1)/4").unwrap(), "x0 = 0.75");
    session.handle("$r(x)=x+0.5").unwrap();
    assert_eq!(session.handle("r(2)").unwrap(), "x1 = 2.5");
    assert_eq!(session.variables().get("x0"), Some(&0.75));
}

#[test]
fn numeration() {
    let mut session = Session::new();
    assert_eq!(session.handle("sin(Pi)").unwrap(), "x0 = 0");
    session.handle("$r(x0)=x0^2+2").unwrap();
    assert_eq!(session.handle("r(3)*3").unwrap(), "x1 = 33");
    session.handle("2+2").unwrap();
    assert_eq!(session.handle("x2^3").unwrap(), "x3 = 64");
}

#[test]
fn macros_in_assignments() {
    let mut session = Session::new();
    session.handle("$double(v)=v*2").unwrap();
    assert_eq!(session.handle("y = double(4) + 1").unwrap(), "y = 9");
}

#[test]
fn recursive_macros_stop() {
    let mut session = Session::new();
    session.handle("$r(x)=f(x)").unwrap();
    session.handle("$f(x)=r(x)").unwrap();
    assert!(matches!(session.handle("r(x)"), Err(CalcError::recursion_limit(_))));
    assert_eq!(session.handle("1").unwrap(), "x0 = 1");
}

#[test]
fn math_errors() {
    let mut session = Session::new();
    assert_failure(&mut session, "2/0", ErrorKind::math);
    assert_failure(&mut session, "ln(-1)", ErrorKind::math);
    assert_failure(&mut session, "myUndeclaredFunc(3)", ErrorKind::math);
    assert_failure(&mut session, "y+5", ErrorKind::math);
}

#[test]
fn parse_errors() {
    let mut session = Session::new();
    assert_failure(&mut session, "(3+2", ErrorKind::parse);
    assert_failure(&mut session, "1^-1", ErrorKind::parse);
    assert_failure(&mut session, "2y+5", ErrorKind::parse);
    assert_failure(&mut session, "2 ** 2.0", ErrorKind::parse);
    assert_failure(&mut session, "a = b = 1", ErrorKind::parse);
    assert_failure(&mut session, "$r(1)=2", ErrorKind::parse);
    session.handle("$r(x)=x").unwrap();
    assert_failure(&mut session, "r(2", ErrorKind::parse);
}

#[test]
fn failures_do_not_touch_state() {
    let mut session = Session::new();
    session.handle("y = 1").unwrap();
    assert_failure(&mut session, "y = 1/0", ErrorKind::math);
    assert_eq!(session.variables().get("y"), Some(&1.0));
    assert_eq!(session.variables().len(), 3);
}

#[test]
fn reset_keeps_only_constants() {
    let mut session = Session::new();
    session.handle("Pi = 3").unwrap();
    session.handle("$r(x)=x").unwrap();
    session.reset();
    assert_eq!(session.handle("Pi*2").unwrap(), format!("x0 = {}", std::f64::consts::PI * 2.0));
    assert_failure(&mut session, "r(1)", ErrorKind::math);
}

#[test]
fn sessions_are_independent() {
    let mut first = Session::new();
    let mut second = Session::new();
    first.handle("y = 2").unwrap();
    first.handle("$r(x)=x").unwrap();
    assert_failure(&mut second, "y", ErrorKind::math);
    assert_eq!(second.handle("1").unwrap(), "x0 = 1");
}

#[test]
fn oversized_input_is_rejected_and_session_survives() {
    let mut session = Session::new();
    let sum = format!("1{}", "+1".repeat(200_000));
    assert_failure(&mut session, &sum, ErrorKind::parse);
    assert_eq!(session.handle("1+1").unwrap(), "x0 = 2");
}
