use logic_ast::{AstError, Context, Tag};
use logic_engine::{EngineConfig, EngineError, RuleRegistry, Session};
use std::fs;

#[test]
fn reducing_a_fixed_point_again_is_a_noop() {
    let mut s = Session::with_default_rules();
    let p = s.context.predicate("P", []).unwrap();
    let q = s.context.predicate("Q", []).unwrap();
    let t = s.context.boolean(true);
    let and = s.context.add(Tag::Conjunction, [p, t, q]);

    assert!(s.reduce(and));
    let revision = s.context.revision();
    assert!(!s.reduce(and));
    assert_eq!(s.context.revision(), revision);
}

#[test]
fn quantifiers_stay_symbolic_with_reduced_body() {
    let mut s = Session::with_default_rules();
    let x = s.context.symbol("x").unwrap();
    let p = s.context.predicate("P", []).unwrap();
    let t = s.context.boolean(true);
    let body = s.context.add(Tag::Conjunction, [p, t]);
    let all = s.context.try_add(Tag::ForAll, vec![x, body]).unwrap();

    assert!(s.reduce(all));
    assert_eq!(s.context.display(all).to_string(), "ForAll(x, P)");
    assert!(s.context.is_reduced(all));
}

#[test]
fn reduce_and_get_returns_the_rewritten_slot() {
    let mut s = Session::with_default_rules();
    let f = s.context.boolean(false);
    let not = s.context.negation(f);
    let p = s.context.predicate("P", []).unwrap();
    let or = s.context.add(Tag::Disjunction, [not, p]);

    let slot = s.reduce_and_get(or, 0).unwrap();
    assert_eq!(s.context.tag(slot), Tag::True);
    assert_eq!(s.context.child(or, 0), Some(slot));
    assert_eq!(s.reduce_and_get(or, 5), None);
}

#[test]
fn steps_follow_application_order() {
    let config = EngineConfig {
        collect_steps: true,
        ..Default::default()
    };
    let mut s = Session::with_default_rules().with_config(config);
    // ¬¬(False ∨ P)
    let f = s.context.boolean(false);
    let p = s.context.predicate("P", []).unwrap();
    let or = s.context.add(Tag::Disjunction, [f, p]);
    let n1 = s.context.negation(or);
    let n2 = s.context.negation(n1);
    s.reduce(n2);

    let steps = s.take_steps();
    let rules: Vec<&str> = steps.iter().map(|st| st.rule_name.as_str()).collect();
    assert_eq!(rules, ["Logical OR", "Double Negation"]);
    assert_eq!(steps[1].node, n2);
    assert_eq!(
        steps[0].to_string(),
        "[Logical OR] Disjunction of a single operand is that operand"
    );
}

#[test]
fn steps_are_not_collected_by_default() {
    let mut s = Session::with_default_rules();
    let t = s.context.boolean(true);
    let not = s.context.negation(t);
    s.reduce(not);
    assert!(s.steps().is_empty());
}

#[test]
fn profiler_counts_rule_hits() {
    let config = EngineConfig {
        profile: true,
        ..Default::default()
    };
    let mut s = Session::with_default_rules().with_config(config);
    for _ in 0..3 {
        let t = s.context.boolean(true);
        let not = s.context.negation(t);
        s.reduce(not);
    }
    assert_eq!(s.profiler().hits("Logical NOT"), 3);
    assert_eq!(s.profiler().total(), 3);
}

#[test]
fn custom_reducer_runs_after_defaults() {
    let mut registry = RuleRegistry::with_default_rules();
    registry.add_reducer(Tag::Predicate, "Known facts", false, |session, node| {
        if session.context.name(node) != Some("Raining") {
            return false;
        }
        let t = session.context.boolean(true);
        session.context.replace(node, t);
        true
    });
    let mut s = Session::new(Context::new(), registry);
    let raining = s.context.predicate("Raining", []).unwrap();
    let wet = s.context.predicate("Wet", []).unwrap();
    let imp = s.context.add(Tag::Implication, [raining, wet]);

    s.reduce(imp);
    assert_eq!(s.context.display(imp).to_string(), "Wet");
}

#[test]
fn default_rule_names_are_listed() {
    let names = RuleRegistry::with_default_rules().rule_names();
    for expected in [
        "Logical AND",
        "Logical OR",
        "Big operator over list",
        "Big operator over range",
        "Big operator left symbolic",
        "Bound symbol",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {}", expected);
    }
}

#[test]
fn config_loads_from_file() {
    let path = std::env::temp_dir().join(format!("logic_engine_{}.toml", std::process::id()));
    fs::write(&path, "profile = true\nmax_expansion = 12\n").unwrap();
    let config = EngineConfig::load(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert!(config.profile);
    assert!(!config.collect_steps);
    assert_eq!(config.max_expansion, 12);
}

#[test]
fn config_errors_are_reported() {
    let missing = EngineConfig::load("/nonexistent/logic_engine.toml");
    assert!(matches!(missing, Err(EngineError::ConfigRead { .. })));

    let malformed = EngineConfig::from_toml_str("max_expansion = \"many\"");
    assert!(matches!(malformed, Err(EngineError::ConfigParse(_))));
}

#[test]
fn construction_errors_convert_into_engine_errors() {
    let mut ctx = Context::new();
    let err: EngineError = ctx.predicate("", []).unwrap_err().into();
    assert!(matches!(
        err,
        EngineError::Ast(AstError::EmptyName {
            tag: Tag::Predicate
        })
    ));
}
