use std::rc::Rc;

use prism_bootstrap::ResourceMemoizer;
use proptest::prelude::*;

#[test]
fn same_source_reuses_resource() {
    let mut memo = ResourceMemoizer::new();
    let source = Rc::new("canvas");
    let mut derivations = 0;

    let first = memo
        .get_or_derive(&source, |_| -> Result<_, ()> {
            derivations += 1;
            Ok(Rc::new(1))
        })
        .unwrap();

    let second = memo
        .get_or_derive(&Rc::clone(&source), |_| -> Result<_, ()> {
            derivations += 1;
            Ok(Rc::new(2))
        })
        .unwrap();

    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(derivations, 1);
    assert!(memo.is_cached_for(&source));
}

#[test]
fn equal_but_distinct_source_derives_again() {
    let mut memo = ResourceMemoizer::new();
    let first_source = Rc::new(String::from("canvas"));
    let second_source = Rc::new(String::from("canvas"));

    let first = memo
        .get_or_derive(&first_source, |_| -> Result<_, ()> { Ok(Rc::new(1)) })
        .unwrap();
    let second = memo
        .get_or_derive(&second_source, |_| -> Result<_, ()> { Ok(Rc::new(1)) })
        .unwrap();

    assert!(!Rc::ptr_eq(&first, &second));
    assert!(memo.is_cached_for(&second_source));
    assert!(!memo.is_cached_for(&first_source));
}

#[test]
fn source_change_releases_previous_resource() {
    let mut memo = ResourceMemoizer::new();
    let first_source = Rc::new(1);
    let second_source = Rc::new(2);

    let first = {
        let strong = memo
            .get_or_derive(&first_source, |_| -> Result<_, ()> { Ok(Rc::new("first")) })
            .unwrap();
        Rc::downgrade(&strong)
    };

    // Only the memoizer holds the resource now.
    assert!(first.upgrade().is_some());

    memo.get_or_derive(&second_source, |_| -> Result<_, ()> { Ok(Rc::new("second")) })
        .unwrap();

    assert!(first.upgrade().is_none());
    assert_eq!(memo.cached().map(|resource| **resource), Some("second"));
}

#[test]
fn failed_derivation_is_not_cached() {
    let mut memo = ResourceMemoizer::<Rc<u8>, Rc<u8>>::new();
    let source = Rc::new(0);

    let result = memo.get_or_derive(&source, |_| Err("unsupported"));
    assert_eq!(result, Err("unsupported"));
    assert!(memo.cached().is_none());

    let resource = memo.get_or_derive(&source, |_| -> Result<_, &str> { Ok(Rc::new(7)) });
    assert_eq!(resource.as_deref(), Ok(&7));
}

#[test]
fn invalidate_forces_new_derivation() {
    let mut memo = ResourceMemoizer::new();
    let source = Rc::new(0);

    memo.get_or_derive(&source, |_| -> Result<_, ()> { Ok(Rc::new(1)) })
        .unwrap();
    memo.invalidate();

    assert!(!memo.is_cached_for(&source));

    let resource = memo
        .get_or_derive(&source, |_| -> Result<_, ()> { Ok(Rc::new(2)) })
        .unwrap();
    assert_eq!(*resource, 2);
}

proptest! {
    #[test]
    fn derives_once_per_identity_change(picks in proptest::collection::vec(0usize..3, 1..32)) {
        let pool: Vec<Rc<u8>> = (0..3).map(|_| Rc::new(0)).collect();
        let mut memo = ResourceMemoizer::new();
        let mut derivations = 0usize;

        for &pick in &picks {
            let resource = memo
                .get_or_derive(&pool[pick], |source| -> Result<_, ()> {
                    derivations += 1;
                    Ok(Rc::clone(source))
                })
                .unwrap();

            prop_assert!(Rc::ptr_eq(&resource, &pool[pick]));
        }

        let changes = picks.windows(2).filter(|pair| pair[0] != pair[1]).count();
        prop_assert_eq!(derivations, changes + 1);
    }
}
