/// Creates a `BootstrapError` with `Link` kind and a source error attached to it
///
/// Shorthand for
/// ```rust
/// crate::BootstrapError::link(stage).with_source(source)
/// ```
#[macro_export]
macro_rules! link_err {
    ( $stage:expr, $source:expr $(,)? ) => {{
        $crate::BootstrapError::link($stage).with_source($source)
    }};
}

/// Creates a `BootstrapError` with `Construction` kind and a source error attached to it
///
/// Shorthand for
/// ```rust
/// crate::BootstrapError::construction(context).with_source(source)
/// ```
#[macro_export]
macro_rules! construction_err {
    ( $context:expr, $source:expr $(,)? ) => {{
        $crate::BootstrapError::construction($context).with_source($source)
    }};
}

/// Creates a `BootstrapError` with `RuntimePanic` kind and a source error attached to it
///
/// Shorthand for
/// ```rust
/// crate::BootstrapError::runtime_panic(context).with_source(source)
/// ```
#[macro_export]
macro_rules! runtime_panic_err {
    ( $context:expr, $source:expr $(,)? ) => {{
        $crate::BootstrapError::runtime_panic($context).with_source($source)
    }};
}
