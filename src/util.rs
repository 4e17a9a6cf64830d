#![cfg_attr(not(any(feature = "tracing", test)), allow(unused_macros))]

macro_rules! trace {
    ($($arg:tt)+) => {
        #[cfg(any(feature = "tracing", test))]
        {
            tracing::trace!($($arg)+)
        }
    };
}

macro_rules! debug {
    ($($arg:tt)+) => {
        #[cfg(any(feature = "tracing", test))]
        {
            tracing::debug!($($arg)+)
        }
    };
}

#[cfg(test)]
pub(crate) fn trace_init() -> impl Drop {
    use tracing_subscriber::{prelude::*, EnvFilter};
    let filter = EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("trace"));
    tracing_subscriber::fmt()
        .with_test_writer()
        .without_time()
        .with_target(false)
        .with_env_filter(filter)
        .set_default()
}

#[cfg(test)]
pub(crate) fn assert_send_sync<T: Send + Sync>() {}
