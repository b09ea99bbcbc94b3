use core::any::Any;
use core::panic::AssertUnwindSafe;
use std::panic::PanicHookInfo;
use std::sync::Once;

use crate::error::{BootstrapResult, PanicMessage};

static PANIC_HOOK: Once = Once::new();

/// Installs the process-wide panic hook, once.
///
/// The hook logs the panic and then hands it over to `forward`, typically a platform hook
/// such as `console_error_panic_hook::hook`. Subsequent calls do nothing, whatever `forward` is.
pub fn set_panic_hook_once<F>(forward: F)
where
    F: Fn(&PanicHookInfo<'_>) + Send + Sync + 'static,
{
    PANIC_HOOK.call_once(|| {
        std::panic::set_hook(Box::new(move |info| {
            error!(%info, "Runtime panicked");
            forward(info);
        }));
    });
}

pub fn is_panic_hook_set() -> bool {
    PANIC_HOOK.is_completed()
}

/// Runs `f`, turning a panic into a `RuntimePanic` error.
///
/// Unwinding is required for the panic to be caught. On targets aborting on panic (e.g.:
/// `wasm32-unknown-unknown`), the panic hook is the only trace left.
pub(crate) fn catch_panic<T, F>(context: &'static str, f: F) -> BootstrapResult<T>
where
    F: FnOnce() -> BootstrapResult<T>,
{
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(runtime_panic_err!(context, panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> PanicMessage {
    let message = if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_owned()
    };

    PanicMessage(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BootstrapError, BootstrapErrorKind};

    #[test]
    fn panic_payload_becomes_error() {
        let result: BootstrapResult<()> = catch_panic("tick", || panic!("boom {}", 42));
        let error = result.unwrap_err();

        assert_eq!(error.kind(), &BootstrapErrorKind::RuntimePanic);
        assert_eq!(error.report().to_string(), "[tick] runtime panicked, caused by: boom 42");
    }

    #[test]
    fn errors_pass_through() {
        let result: BootstrapResult<()> = catch_panic("tick", || Err(BootstrapError::construction("create runtime")));
        assert_eq!(result.unwrap_err().kind(), &BootstrapErrorKind::Construction);
    }
}
