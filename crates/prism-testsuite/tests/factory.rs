use std::rc::Rc;

use prism_bootstrap::{BootstrapErrorKind, RuntimeFactory};
use prism_testsuite::{Call, CallLog, Faults, MockModule};

#[test]
fn absent_module_yields_nothing() {
    let mut factory = RuntimeFactory::<Rc<MockModule>>::new();

    assert!(factory.get(None).unwrap().is_none());
}

#[test]
fn same_module_reuses_runtime() {
    let log = CallLog::new();
    let module = MockModule::new(&log);
    let mut factory = RuntimeFactory::new();

    let first = factory.get(Some(&module)).unwrap().unwrap();
    let second = factory.get(Some(&Rc::clone(&module))).unwrap().unwrap();

    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(log.calls(), [Call::DirectRuntime]);
}

#[test]
fn module_change_creates_new_runtime() {
    let log = CallLog::new();
    let first_module = MockModule::new(&log);
    let second_module = MockModule::new(&log);
    let mut factory = RuntimeFactory::new();

    let first = factory.get(Some(&first_module)).unwrap().unwrap();
    let second = factory.get(Some(&second_module)).unwrap().unwrap();

    assert!(!Rc::ptr_eq(&first, &second));
    assert_eq!(log.count(|call| matches!(call, Call::DirectRuntime)), 2);
}

#[test]
fn creation_failure_is_a_construction_error() {
    let log = CallLog::new();
    let module = MockModule::with_faults(
        &log,
        Faults {
            construction: true,
            ..Faults::default()
        },
    );
    let mut factory = RuntimeFactory::new();

    let error = factory.get(Some(&module)).unwrap_err();

    assert_eq!(error.kind(), &BootstrapErrorKind::Construction);
    assert_eq!(
        error.report().to_string(),
        "[create runtime from module] runtime construction failed, caused by: cannot create runtime"
    );
}
