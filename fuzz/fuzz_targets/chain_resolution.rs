#![no_main]

use chain_di::{create_injector, DiError, Function, Scope, Token};
use libfuzzer_sys::fuzz_target;

// Each byte either extends the chain (low bit clear) or resolves a token
// (low bit set). Only 16 distinct tokens exist, so duplicates are common.
fuzz_target!(|data: &[u8]| {
    let mut injector = create_injector();
    let mut provided: Vec<u8> = Vec::new();

    for &byte in data {
        let id = (byte >> 1) & 0x0f;
        let token = Token::from(format!("t{}", id));

        if byte & 1 == 0 {
            let scope = if byte & 0x80 == 0 { Scope::Singleton } else { Scope::Transient };
            let result = injector.provide_factory_with_scope(
                token,
                Function::new("value", move |_| Ok(id)),
                scope,
            );
            match result {
                Ok(child) => {
                    injector = child;
                    provided.push(id);
                }
                Err(DiError::DuplicateToken(_)) => assert!(provided.contains(&id)),
                Err(other) => panic!("unexpected error: {}", other),
            }
        } else {
            match injector.get::<u8>(&token) {
                Ok(value) => assert_eq!(*value, id),
                Err(DiError::NoProviderFound(_)) => assert!(!provided.contains(&id)),
                Err(other) => panic!("unexpected error: {}", other),
            }
        }
    }
});
