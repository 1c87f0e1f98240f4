/// Chain construction: duplicate detection and per-lineage token scoping.

use chain_di::{create_injector, Args, BoxError, Class, DiError, Function, Injector, Token};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Unit;

impl Class for Unit {
    fn construct(_: Args) -> Result<Self, BoxError> {
        Ok(Unit)
    }
}

#[test]
fn test_duplicate_of_parent_token_fails() {
    let injector = create_injector().provide_value("a", 1u8).unwrap();
    match injector.provide_value("a", 2u8) {
        Err(DiError::DuplicateToken(token)) => assert_eq!(token, Token::new("a")),
        other => panic!("Expected DuplicateToken, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_duplicate_of_distant_ancestor_fails_for_every_variant() {
    let injector = create_injector()
        .provide_value("a", 1u8)
        .unwrap()
        .provide_value("b", 2u8)
        .unwrap()
        .provide_value("c", 3u8)
        .unwrap();

    assert!(matches!(
        injector.provide_class::<Unit>("a"),
        Err(DiError::DuplicateToken(_))
    ));
    assert!(matches!(
        injector.provide_factory("a", Function::new("a", |_| Ok(0u8))),
        Err(DiError::DuplicateToken(_))
    ));
    assert!(matches!(
        injector.provide_value(String::from("b"), 0u8),
        Err(DiError::DuplicateToken(_))
    ));
}

#[test]
fn test_duplicate_fails_before_any_resolution() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let injector = create_injector()
        .provide_factory(
            "a",
            Function::new("a", move |_| Ok(calls_clone.fetch_add(1, Ordering::SeqCst))),
        )
        .unwrap();

    assert!(injector
        .provide_factory("a", Function::new("a2", |_| Ok(0usize)))
        .is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_error_message() {
    let err = create_injector()
        .provide_value("a", 1u8)
        .unwrap()
        .provide_value("a", 1u8)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Tokens must be unique in an injector chain: \"a\" is already provided by an ancestor"
    );
}

/// Tokens are unique per lineage only: sibling branches may reuse a token
/// because neither is an ancestor of the other.
#[test]
fn test_sibling_branches_may_reuse_tokens() {
    let base = create_injector().provide_value("shared", 0u8).unwrap();
    let left = base.provide_value("local", 1u8).unwrap();
    let right = base.provide_value("local", 2u8).unwrap();

    assert_eq!(*left.get::<u8>(&Token::new("local")).unwrap(), 1);
    assert_eq!(*right.get::<u8>(&Token::new("local")).unwrap(), 2);
}

#[test]
fn test_separate_roots_are_isolated() {
    let a = Injector::new_root().provide_value("x", 1u8).unwrap();
    let b = Injector::new_root().provide_value("x", 2u8).unwrap();

    assert_eq!(*a.get::<u8>(&Token::new("x")).unwrap(), 1);
    assert_eq!(*b.get::<u8>(&Token::new("x")).unwrap(), 2);
    assert!(!Injector::same_node(&a, &b));
}

#[test]
fn test_node_accessors() {
    let root = create_injector();
    assert_eq!(root.token(), None);
    assert_eq!(root.scope(), None);
    assert!(!root.is_disposed());

    let child = root.provide_class::<Unit>("unit").unwrap();
    assert_eq!(child.token(), Some(&Token::new("unit")));
    assert!(!child.is_root());

    let clone = child.clone();
    assert!(Injector::same_node(&child, &clone));
}
