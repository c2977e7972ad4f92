//! Behavioral acceptance suite for the guarded-namespace policy.
//!
//! The rejection messages asserted here are the external contract: consumers
//! match on them literally, so every assertion compares the full string.

use std::sync::Arc;

use namespace_guard::{callable, GuardError, Namespace, NamespaceBuilder, StaticPromotion};
use serde_json::{json, Value};

fn guarded(name: &str) -> Namespace {
    let mut ns = Namespace::new(name);
    ns.apply_policy(Arc::new(StaticPromotion)).unwrap();
    ns
}

fn noop() -> namespace_guard::Callable {
    callable(|_| Ok(Value::Null))
}

// ---- attachment ----

#[test]
fn extending_with_a_guarded_namespace_fails() {
    let source = guarded("source");
    let mut target = Namespace::new("target");
    let err = target.extend_with(&source).unwrap_err();
    assert_eq!(err.to_string(), "Module extend is disabled.");
}

#[test]
fn including_a_guarded_namespace_fails() {
    let source = guarded("source");
    let mut target = Namespace::new("target");
    let err = target.include(&source).unwrap_err();
    assert_eq!(err.to_string(), "Module include is disabled.");
}

#[test]
fn prepending_a_guarded_namespace_fails() {
    let source = guarded("source");
    let mut target = Namespace::new("target");
    let err = target.prepend(&source).unwrap_err();
    assert_eq!(err.to_string(), "Module prepend is disabled.");
}

#[test]
fn reapplying_the_policy_fails() {
    let mut ns = guarded("n");
    let err = ns.apply_policy(Arc::new(StaticPromotion)).unwrap_err();
    assert_eq!(err.to_string(), "Module extend is disabled.");
}

#[test]
fn including_the_policy_itself_fails() {
    let mut ns = Namespace::new("n");
    let err = ns.include_policy(Arc::new(StaticPromotion)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Module include is disabled, use extend instead."
    );
    assert!(!ns.is_guarded());
}

#[test]
fn prepending_the_policy_itself_fails() {
    let mut ns = Namespace::new("n");
    let err = ns.prepend_policy(Arc::new(StaticPromotion)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Module prepend is disabled, use extend instead."
    );
    assert!(!ns.is_guarded());
}

// ---- disabled mutation operations ----

#[test]
fn module_function_behavior_is_disabled() {
    let mut ns = guarded("n");
    let err = ns.set_module_function().unwrap_err();
    assert_eq!(err.to_string(), "Module function behavior is disabled.");
}

#[test]
fn public_visibility_is_disabled() {
    let mut ns = guarded("n");
    let err = ns.set_public().unwrap_err();
    assert_eq!(err.to_string(), "Public visibility is disabled.");
}

#[test]
fn protected_visibility_is_disabled() {
    let mut ns = guarded("n");
    let err = ns.set_protected().unwrap_err();
    assert_eq!(err.to_string(), "Protected visibility is disabled.");
}

#[test]
fn private_visibility_is_disabled() {
    let mut ns = guarded("n");
    let err = ns.set_private().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Private visibility is disabled, use conceal instead."
    );
}

#[test]
fn aliasing_is_disabled() {
    let mut ns = guarded("n");
    ns.declare("one", callable(|_| Ok(json!(1)))).unwrap();
    let err = ns.alias_member("one", "two").unwrap_err();
    assert_eq!(err.to_string(), "Aliasing two as one is disabled.");
}

#[test]
fn setting_a_class_variable_is_disabled() {
    let mut ns = guarded("n");
    let err = ns.set_class_variable("test", json!("test")).unwrap_err();
    assert_eq!(err.to_string(), "Setting class variable test is disabled.");
}

#[test]
fn getting_a_class_variable_is_disabled() {
    let ns = guarded("n");
    let err = ns.class_variable("test").unwrap_err();
    assert_eq!(err.to_string(), "Getting class variable test is disabled.");
}

#[test]
fn setting_a_constant_is_disabled() {
    let mut ns = guarded("n");
    let err = ns.define_constant("TEST", json!("test")).unwrap_err();
    assert_eq!(err.to_string(), "Setting constant TEST is disabled.");
}

#[test]
fn defining_a_member_dynamically_is_disabled() {
    let mut ns = guarded("n");
    let err = ns.define_member("test", noop()).unwrap_err();
    assert_eq!(err.to_string(), "Defining method test is disabled.");
}

#[test]
fn removing_a_member_is_disabled() {
    let mut ns = guarded("n");
    ns.declare("test", noop()).unwrap();
    let err = ns.remove_member("test").unwrap_err();
    assert_eq!(err.to_string(), "Removing method test is disabled.");
}

#[test]
fn undefining_a_member_is_disabled() {
    let mut ns = guarded("n");
    let err = ns.undefine_member("test").unwrap_err();
    assert_eq!(err.to_string(), "Undefining method test is disabled.");
}

#[test]
fn rejected_mutations_leave_the_namespace_unchanged() {
    let mut ns = guarded("n");
    ns.declare("test", noop()).unwrap();
    let statics = ns.static_members();

    assert!(ns.remove_member("test").is_err());
    assert!(ns.define_member("extra", noop()).is_err());
    assert!(ns.set_class_variable("v", json!(1)).is_err());

    assert_eq!(ns.static_members(), statics);
    assert!(ns.instance_members().is_empty());
}

// ---- promotion ----

#[test]
fn declared_members_become_namespace_scope_callables() {
    let mut ns = guarded("n");
    ns.declare("test", callable(|_| Ok(json!("A test.")))).unwrap();
    assert_eq!(ns.call("test", &[]).unwrap(), json!("A test."));
    assert!(!ns.has_instance_member("test"));
    assert!(!ns.promoting());
}

#[test]
fn promotion_handles_members_declared_before_attachment() {
    let mut ns = Namespace::new("n");
    ns.declare("early", callable(|_| Ok(json!("early")))).unwrap();
    ns.apply_policy(Arc::new(StaticPromotion)).unwrap();
    assert_eq!(ns.call("early", &[]).unwrap(), json!("early"));
    assert!(!ns.has_instance_member("early"));
}

#[test]
fn direct_static_declarations_are_rejected() {
    let mut ns = guarded("n");
    let err = ns.declare_static("test", noop()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Avoid defining test as a class method because the method will be \
         automatically converted to a class method for you."
    );
    assert!(!ns.has_static_member("test"));
}

#[test]
fn reserved_bookkeeping_hooks_may_be_declared_static() {
    let mut ns = guarded("n");
    ns.declare_static("member_declared", noop()).unwrap();
    ns.declare_static("static_member_declared", noop()).unwrap();
    assert!(ns.has_static_member("member_declared"));
    assert!(ns.has_static_member("static_member_declared"));
}

// ---- conceal ----

#[test]
fn conceal_restricts_a_single_member() {
    let mut ns = guarded("n");
    ns.declare("test", callable(|_| Ok(json!("test")))).unwrap();
    ns.conceal("test").unwrap();

    let err = ns.call("test", &[]).unwrap_err();
    assert!(matches!(err, GuardError::VisibilityViolation { .. }));
    assert_eq!(
        err.to_string(),
        "private method 'test' called for namespace 'n'"
    );
}

#[test]
fn conceal_accepts_multiple_names() {
    let mut ns = guarded("n");
    ns.declare("one", callable(|_| Ok(json!(1)))).unwrap();
    ns.declare("two", callable(|_| Ok(json!(2)))).unwrap();
    ns.conceal(["one", "two"]).unwrap();

    let err = ns.call("two", &[]).unwrap_err();
    assert!(matches!(err, GuardError::VisibilityViolation { .. }));
}

#[test]
fn conceal_accepts_a_sequence_of_names() {
    let mut ns = guarded("n");
    ns.declare("one", callable(|_| Ok(json!(1)))).unwrap();
    ns.declare("two", callable(|_| Ok(json!(2)))).unwrap();
    ns.conceal(vec!["one", "two"]).unwrap();

    let err = ns.call("two", &[]).unwrap_err();
    assert!(matches!(err, GuardError::VisibilityViolation { .. }));
}

#[test]
fn concealed_members_remain_internally_reachable() {
    let mut ns = guarded("n");
    ns.declare("secret", callable(|_| Ok(json!("shh")))).unwrap();
    ns.conceal("secret").unwrap();

    assert_eq!(ns.call_internal("secret", &[]).unwrap(), json!("shh"));
}

#[test]
fn concealing_an_unknown_member_fails_with_unknown_member() {
    let mut ns = guarded("n");
    let err = ns.conceal("missing").unwrap_err();
    assert!(matches!(err, GuardError::UnknownMember { .. }));
}

#[test]
fn calls_to_unknown_members_are_not_visibility_errors() {
    let ns = guarded("n");
    let err = ns.call("missing", &[]).unwrap_err();
    assert!(matches!(err, GuardError::UnknownMember { .. }));
}

// ---- builder ----

#[test]
fn builder_constructs_a_guarded_namespace() {
    let ns = NamespaceBuilder::new("n")
        .guarded()
        .declare("test", callable(|_| Ok(json!("A test."))))
        .declare("one", callable(|_| Ok(json!(1))))
        .declare("two", callable(|_| Ok(json!(2))))
        .conceal(["one", "two"])
        .build()
        .unwrap();

    assert_eq!(ns.call("test", &[]).unwrap(), json!("A test."));
    let err = ns.call("two", &[]).unwrap_err();
    assert!(matches!(err, GuardError::VisibilityViolation { .. }));
}

// ---- ungoverned namespaces are unaffected ----

#[test]
fn ungoverned_namespaces_keep_permissive_semantics() {
    let mut ns = Namespace::new("plain");
    ns.declare("test", noop()).unwrap();
    ns.alias_member("alias", "test").unwrap();
    ns.set_class_variable("v", json!(1)).unwrap();
    assert_eq!(ns.class_variable("v").unwrap(), json!(1));
    ns.define_constant("C", json!("c")).unwrap();
    ns.remove_member("alias").unwrap();
    ns.undefine_member("test").unwrap();
    ns.set_module_function().unwrap();
    ns.set_private().unwrap();
    assert!(!ns.is_guarded());
}
