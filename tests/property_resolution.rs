/// Property-based tests for chain resolution
///
/// These verify lookup, caching and duplicate detection over arbitrary
/// chains of tokens.

use chain_di::{create_injector, DiError, Function, Injector, Scope, Token};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn build_chain(names: &[String]) -> Injector {
    names.iter().enumerate().fold(create_injector(), |injector, (index, name)| {
        injector.provide_value(name.clone(), index).unwrap()
    })
}

fn unique_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{1,8}", 1..12).prop_map(|set| set.into_iter().collect())
}

// Property: every token in a chain resolves to the value its own node provides
proptest! {
    #[test]
    fn every_token_resolves_from_leaf(names in unique_names()) {
        let leaf = build_chain(&names);
        for (index, name) in names.iter().enumerate() {
            let value = leaf.get::<usize>(&Token::from(name.clone())).unwrap();
            prop_assert_eq!(*value, index);
        }
    }
}

// Property: tokens never provided fail with NoProviderFound naming the token
proptest! {
    #[test]
    fn unknown_tokens_are_reported(names in unique_names(), probe in "[A-Z]{1,8}") {
        let leaf = build_chain(&names);
        match leaf.resolve(&Token::from(probe.clone())) {
            Err(DiError::NoProviderFound(token)) => {
                prop_assert_eq!(token, Token::from(probe));
            }
            _ => {
                prop_assert!(false, "expected NoProviderFound");
            }
        }
    }
}

// Property: re-providing any token of the lineage fails, new tokens succeed
proptest! {
    #[test]
    fn duplicates_are_detected(names in unique_names(), extra in "[a-z]{1,8}") {
        let leaf = build_chain(&names);
        let known: HashSet<&String> = names.iter().collect();

        for name in &names {
            let is_duplicate = matches!(
                leaf.provide_value(name.clone(), 0usize),
                Err(DiError::DuplicateToken(_))
            );
            prop_assert!(is_duplicate);
        }
        prop_assert_eq!(leaf.provide_value(extra.clone(), 0usize).is_ok(), !known.contains(&extra));
    }
}

// Property: production count matches scope semantics
proptest! {
    #[test]
    fn production_count_follows_scope(resolutions in 1usize..20, transient in any::<bool>()) {
        let produced = Arc::new(AtomicUsize::new(0));
        let produced_clone = produced.clone();
        let scope = if transient { Scope::Transient } else { Scope::Singleton };

        let injector = create_injector()
            .provide_factory_with_scope(
                "n",
                Function::new("n", move |_| Ok(produced_clone.fetch_add(1, Ordering::SeqCst))),
                scope,
            )
            .unwrap();

        for _ in 0..resolutions {
            injector.resolve(&Token::new("n")).unwrap();
        }

        let expected = if transient { resolutions } else { 1 };
        prop_assert_eq!(produced.load(Ordering::SeqCst), expected);
    }
}
