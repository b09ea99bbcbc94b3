use std::rc::Rc;

use expect_test::expect;
use prism_bootstrap::{BootstrapErrorKind, ContextAcquirer, DEFAULT_CONTEXT_KIND};
use prism_testsuite::{Call, CallLog, MockSurface};

#[test]
fn absent_surface_does_nothing() {
    let mut acquirer = ContextAcquirer::<Rc<MockSurface>>::default();

    let context = acquirer.acquire(None).unwrap();

    assert!(context.is_none());
    assert_eq!(acquirer.context_kind(), DEFAULT_CONTEXT_KIND);
}

#[test]
fn same_surface_reuses_context() {
    let log = CallLog::new();
    let surface = MockSurface::new(1, &log);
    let mut acquirer = ContextAcquirer::default();

    let first = acquirer.acquire(Some(&surface)).unwrap().unwrap();
    let second = acquirer.acquire(Some(&Rc::clone(&surface))).unwrap().unwrap();

    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(surface.contexts_created(), 1);
    assert_eq!(
        log.calls(),
        [Call::GetContext {
            surface: 1,
            kind: "webgl".to_owned(),
        }]
    );
}

#[test]
fn surface_change_acquires_new_context() {
    let log = CallLog::new();
    let first_surface = MockSurface::new(1, &log);
    let second_surface = MockSurface::new(2, &log);
    let mut acquirer = ContextAcquirer::default();

    let first = acquirer.acquire_for(&first_surface).unwrap();
    let second = acquirer.acquire_for(&second_surface).unwrap();

    assert_eq!(first.surface, 1);
    assert_eq!(second.surface, 2);
    assert!(acquirer.is_acquired_for(&second_surface));
    assert!(!acquirer.is_acquired_for(&first_surface));

    // Only the context of the latest surface is kept around.
    let again = acquirer.acquire_for(&first_surface).unwrap();
    assert_eq!(again.serial, 2);
    assert_eq!(first_surface.contexts_created(), 2);
}

#[test]
fn unavailable_context_is_reported() {
    let log = CallLog::new();
    let surface = MockSurface::without_webgl(1, &log);
    let mut acquirer = ContextAcquirer::default();

    let error = acquirer.acquire(Some(&surface)).unwrap_err();

    assert_eq!(
        error.kind(),
        &BootstrapErrorKind::ContextUnavailable {
            context_kind: "webgl".to_owned()
        }
    );
    expect!["[acquire drawing context] webgl is needed to run this"].assert_eq(&error.to_string());
}

#[test]
fn unavailable_context_is_not_cached() {
    let log = CallLog::new();
    let surface = MockSurface::without_webgl(1, &log);
    let mut acquirer = ContextAcquirer::default();

    assert!(acquirer.acquire_for(&surface).is_err());
    assert!(!acquirer.is_acquired_for(&surface));

    surface.set_supports_webgl(true);

    let context = acquirer.acquire_for(&surface).unwrap();
    assert_eq!(context.serial, 1);
    assert_eq!(log.count(|call| matches!(call, Call::GetContext { .. })), 2);
}

#[test]
fn requested_context_kind_is_forwarded() {
    let log = CallLog::new();
    let surface = MockSurface::new(1, &log);
    let mut acquirer = ContextAcquirer::new("webgl2");

    let error = acquirer.acquire_for(&surface).unwrap_err();

    assert_eq!(
        log.calls(),
        [Call::GetContext {
            surface: 1,
            kind: "webgl2".to_owned(),
        }]
    );
    expect!["[acquire drawing context] webgl2 is needed to run this"].assert_eq(&error.to_string());
}
