use eqt_engine::{
    error::{InvalidGesture, UnresolvableOperator},
    Click,
    EngineOptionsBuilder,
    EquationState,
    Gesture,
    Role,
    Session,
    Side,
    Term,
};
use pretty_assertions::assert_eq;

fn find(session: &Session, side: Side, content: &str) -> Term {
    session.state()
        .side(side)
        .iter()
        .find(|term| term.content == content)
        .unwrap_or_else(|| panic!("no `{content}` on the {side} side of `{}`", session.render()))
        .clone()
}

fn contents(terms: &[Term]) -> Vec<&str> {
    terms.iter().map(|term| term.content.as_str()).collect()
}

fn descriptions(session: &Session) -> Vec<&str> {
    session.steps().iter().map(|step| step.description.as_str()).collect()
}

/// Strips ANSI escapes from a rendered report.
fn plain(report: String) -> String {
    String::from_utf8(strip_ansi_escapes::strip(report)).unwrap()
}

#[test]
fn solve_two_x_plus_three() {
    let mut session = Session::new("2x + 3 = 5").unwrap();
    assert_eq!(contents(session.state().left()), vec!["2x", "+", "3"]);
    assert_eq!(contents(session.state().right()), vec!["5"]);

    let three = find(&session, Side::Left, "3");
    let applied = session.drag(&Gesture::for_term(&three, true)).unwrap();
    assert!(applied.changed);
    assert_eq!(applied.moved, Some(three));
    assert_eq!(session.render(), "2x = 5 - 3");

    let minus = find(&session, Side::Right, "-");
    let applied = session.click(&Click::on(&minus)).unwrap();
    assert_eq!(applied.step, Some(3));
    assert_eq!(session.render(), "2x = 2");

    assert_eq!(descriptions(&session), vec!["2x + 3 = 5", "2x = 5 - 3", "2x = 2"]);
    assert!(session.steps()[0].completed);
    assert!(!session.steps()[2].completed);
    assert!(!session.is_solved());

    // finish the job: expand `2x`, then divide both sides by 2
    let two_x = find(&session, Side::Left, "2x");
    session.click(&Click::on(&two_x)).unwrap();
    assert_eq!(session.render(), "2 * x = 2");

    let two = find(&session, Side::Left, "2");
    assert_eq!(two.role, Role::Multiplicative);
    session.drag(&Gesture::for_term(&two, true)).unwrap();
    assert_eq!(session.render(), "x = 1/2 * 2");

    let times = find(&session, Side::Right, "*");
    session.click(&Click::on(&times)).unwrap();
    assert_eq!(session.render(), "x = 1");
    assert!(session.is_solved());
    assert_eq!(session.steps().len(), 6);
}

#[test]
fn additive_move_conserves_term_counts() {
    for (equation, content) in [
        ("x + 4 = 9", "4"),
        ("x - 2 + 7 = 1 * 3", "7"),
        ("5 + x = 2", "5"),
    ] {
        let mut session = Session::new(equation).unwrap();
        let before = session.state().clone();
        let term = find(&session, Side::Left, content);
        session.drag(&Gesture::for_term(&term, true)).unwrap();

        let after = session.state();
        assert_eq!(after.left().len(), before.left().len() - 2, "{equation}");
        assert_eq!(after.right().len(), before.right().len() + 2, "{equation}");
        assert_eq!(contents(&after.right()[after.right().len() - 2..]), vec!["-", content]);
    }
}

#[test]
fn multiplicative_move_prepends_reciprocal() {
    let mut session = Session::new("x * 3 = 12").unwrap();
    let three = find(&session, Side::Left, "3");
    session.drag(&Gesture::for_term(&three, true)).unwrap();

    assert_eq!(contents(session.state().right()), vec!["1/3", "*", "12"]);
    assert_eq!(session.state().right()[0].id, three.id);
}

#[test]
fn resolve_sum_and_fraction_product() {
    let mut session = Session::new("x = 2 + 3").unwrap();
    let plus = find(&session, Side::Right, "+");
    session.click(&Click::on(&plus)).unwrap();
    assert_eq!(session.render(), "x = 5");

    let state = EquationState::from_contents(&["2/3", "*", "3/4"], &["x"]).unwrap();
    let times = state.left()[1].clone();
    let next = eqt_engine::rules::resolve(&state, &Click::on(&times), &Default::default()).unwrap();
    assert_eq!(next.render(), "1/2 = x");
}

#[test]
fn resolve_expands_computed_products() {
    let mut session = Session::new("x * 2 = 8").unwrap();
    let times = find(&session, Side::Left, "*");
    session.click(&Click::on(&times)).unwrap();

    let left = session.state().left();
    assert_eq!(contents(left), vec!["2", "*", "x"]);
    assert!(left.iter().all(|term| term.role == Role::Multiplicative));
}

#[test]
fn no_op_gestures_record_nothing() {
    let mut session = Session::new("2x + 3 = 5").unwrap();
    let three = find(&session, Side::Left, "3");

    let applied = session.drag(&Gesture::for_term(&three, false)).unwrap();
    assert!(!applied.changed);
    assert_eq!(applied.step, None);

    let applied = session.drag(&Gesture::from_drop(&three, 10.0, &None::<f64>)).unwrap();
    assert!(!applied.changed);

    let neutral = Gesture { role: Role::Neutral, ..Gesture::for_term(&three, true) };
    assert!(!session.drag(&neutral).unwrap().changed);

    assert_eq!(session.render(), "2x + 3 = 5");
    assert_eq!(session.steps().len(), 1);
}

#[test]
fn drop_position_decides_crossing() {
    let mut session = Session::new("x + 1 = 4").unwrap();
    let one = find(&session, Side::Left, "1");
    session.drag(&Gesture::from_drop(&one, 320.0, &240.0)).unwrap();
    assert_eq!(session.render(), "x = 4 - 1");
}

#[test]
fn invalid_gestures_leave_the_session_untouched() {
    let mut session = Session::new("2x + 3 = 5").unwrap();
    let three = find(&session, Side::Left, "3");

    let wrong_side = Gesture { origin: Side::Right, ..Gesture::for_term(&three, true) };
    let err = session.drag(&wrong_side).unwrap_err();
    assert!(err.is::<InvalidGesture>());

    let plus = find(&session, Side::Left, "+");
    let err = session.click(&Click::on(&plus)).unwrap_err();
    assert!(err.is::<UnresolvableOperator>());

    assert_eq!(session.render(), "2x + 3 = 5");
    assert_eq!(session.steps().len(), 1);
}

#[test]
fn errors_point_at_the_block() {
    let mut session = Session::new("x + 3 = 5").unwrap();
    let plus = find(&session, Side::Left, "+");
    let rendered = session.render();
    let err = session.click(&Click::on(&plus)).unwrap_err();

    assert_eq!(err.spans, vec![2..3]);
    let report = plain(err.report_to_string("equation", &rendered));
    assert!(report.contains("cannot resolve the `+` operator"));
    assert!(report.contains("a variable cannot be combined with this operator"));
}

#[test]
fn parse_errors_are_reported() {
    let errs = Session::new("2x + = 5 = 1").unwrap_err();
    let reports = errs.iter()
        .map(|err| plain(err.report_to_string("input", "2x + = 5 = 1")))
        .collect::<Vec<_>>();
    assert!(reports.iter().any(|report| report.contains("`=`")));
}

#[test]
fn strict_options() {
    let options = EngineOptionsBuilder::new()
        .strict_fraction_inverse(true)
        .strict_operator_inverse(true)
        .build();

    let mut session = Session::with_options("x - 3 = 5", options).unwrap();
    let three = find(&session, Side::Left, "3");
    session.drag(&Gesture::for_term(&three, true)).unwrap();
    assert_eq!(session.render(), "x = 5 + 3");

    let plus = find(&session, Side::Right, "+");
    session.click(&Click::on(&plus)).unwrap();
    assert_eq!(session.render(), "x = 8");
    assert!(session.is_solved());

    session.load("x / 4 = 2").unwrap();
    let four = find(&session, Side::Left, "4");
    session.drag(&Gesture::for_term(&four, true)).unwrap();
    assert_eq!(session.render(), "x = 4 * 2");
    assert!(session.options().strict_operator_inverse);
}

#[test]
fn toggle_steps() {
    let mut session = Session::new("x + 1 = 2").unwrap();
    let one = find(&session, Side::Left, "1");
    session.drag(&Gesture::for_term(&one, true)).unwrap();

    assert_eq!(session.toggle_step(2), Some(true));
    assert!(session.steps()[1].completed);
    assert_eq!(session.toggle_step(42), None);
}
