//! Shared fixtures and proptest strategies for unit tests.

use proptest::prelude::*;

use crate::{Handshake, Principal};

/// Handshake for a plain relative URI with no headers.
pub(crate) fn handshake() -> Handshake {
    Handshake::new(http::Uri::from_static("/ws"))
}

pub(crate) fn alice() -> Principal {
    Principal {
        id: "user-1".to_string(),
        name: "Alice".to_string(),
    }
}

/// Routes `tracing` output through the test harness.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Cookie names: token characters only, never containing `=`, `;` or space.
pub(crate) fn arb_cookie_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9_.-]{1,12}").unwrap()
}

/// Cookie values: may be empty and may contain `=`, never `"; "`.
pub(crate) fn arb_cookie_value() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9=/+_.-]{0,16}").unwrap()
}
