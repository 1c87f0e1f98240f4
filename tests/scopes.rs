use chain_di::{create_injector, Args, BoxError, Class, Function, Scope, Token};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

struct Tracked {
    id: usize,
}

impl Class for Tracked {
    fn construct(_: Args) -> Result<Self, BoxError> {
        Ok(Tracked {
            id: CONSTRUCTED.fetch_add(1, Ordering::SeqCst),
        })
    }
}

#[test]
fn test_singleton_factory_runs_once() {
    let counter = Arc::new(Mutex::new(0));
    let counter_clone = counter.clone();

    let injector = create_injector()
        .provide_factory(
            "request",
            Function::new("request", move |_| {
                let mut c = counter_clone.lock().unwrap();
                *c += 1;
                Ok(format!("req-{}", *c))
            }),
        )
        .unwrap();

    let a = injector.get::<String>(&Token::new("request")).unwrap();
    let b = injector.get::<String>(&Token::new("request")).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(*a, "req-1");
    assert_eq!(*counter.lock().unwrap(), 1);
}

#[test]
fn test_transient_factory_runs_every_time() {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();

    let injector = create_injector()
        .provide_factory_with_scope(
            "n",
            Function::new("n", move |_| Ok(counter_clone.fetch_add(1, Ordering::SeqCst))),
            Scope::Transient,
        )
        .unwrap();

    let a = injector.get::<usize>(&Token::new("n")).unwrap();
    let b = injector.get::<usize>(&Token::new("n")).unwrap();

    assert_eq!(*a, 0);
    assert_eq!(*b, 1);
    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn test_class_scopes() {
    let singleton = create_injector().provide_class::<Tracked>("single").unwrap();
    let transient = create_injector()
        .provide_class_with_scope::<Tracked>("many", Scope::Transient)
        .unwrap();

    assert_eq!(singleton.scope(), Some(Scope::Singleton));
    assert_eq!(transient.scope(), Some(Scope::Transient));

    let s1 = singleton.get::<Tracked>(&Token::new("single")).unwrap();
    let s2 = singleton.get::<Tracked>(&Token::new("single")).unwrap();
    assert_eq!(s1.id, s2.id);
    assert!(Arc::ptr_eq(&s1, &s2));

    let t1 = transient.get::<Tracked>(&Token::new("many")).unwrap();
    let t2 = transient.get::<Tracked>(&Token::new("many")).unwrap();
    assert_ne!(t1.id, t2.id);
}

#[test]
fn test_singleton_is_shared_by_descendants() {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();

    let base = create_injector()
        .provide_factory(
            "shared",
            Function::new("shared", move |_| Ok(counter_clone.fetch_add(1, Ordering::SeqCst))),
        )
        .unwrap();
    let left = base.provide_value("left", 1u8).unwrap();
    let right = base.provide_value("right", 2u8).unwrap();

    let from_left = left.get::<usize>(&Token::new("shared")).unwrap();
    let from_right = right.get::<usize>(&Token::new("shared")).unwrap();
    let from_base = base.get::<usize>(&Token::new("shared")).unwrap();

    assert!(Arc::ptr_eq(&from_left, &from_right));
    assert!(Arc::ptr_eq(&from_left, &from_base));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failed_production_is_not_cached() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let attempts_clone = attempts.clone();

    let injector = create_injector()
        .provide_factory(
            "flaky",
            Function::new("flaky", move |_| {
                if attempts_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err("not yet".into())
                } else {
                    Ok(42u32)
                }
            }),
        )
        .unwrap();

    assert!(injector.resolve(&Token::new("flaky")).is_err());
    assert_eq!(*injector.get::<u32>(&Token::new("flaky")).unwrap(), 42);
    assert_eq!(*injector.get::<u32>(&Token::new("flaky")).unwrap(), 42);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_value_is_returned_as_is() {
    let injector = create_injector().provide_value("v", vec![1, 2, 3]).unwrap();
    let a = injector.get::<Vec<i32>>(&Token::new("v")).unwrap();
    let b = injector.get::<Vec<i32>>(&Token::new("v")).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(injector.scope(), Some(Scope::Transient));
}
