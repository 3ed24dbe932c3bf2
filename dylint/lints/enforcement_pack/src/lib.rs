//! Enforcement pack: custom lints for handshake-adapter invariants.
//!
//! ## Implemented Lints
//!
//! - `NO_PRINTLN`: forbids `println!`, `eprintln!` and `dbg!` so that all
//!   output goes through `tracing`, where cookie values are never written.
//! - `NO_PANIC_STUBS`: forbids `todo!` and `unimplemented!` so that an
//!   operation the adapter cannot serve always returns an error instead of
//!   panicking.

#![feature(rustc_private)]
#![warn(unused_extern_crates)]

extern crate rustc_ast;
extern crate rustc_lint;
extern crate rustc_session;
extern crate rustc_span;

use rustc_ast::{Expr, ExprKind, MacCall};
use rustc_lint::{EarlyContext, EarlyLintPass, LintContext};
use rustc_session::{declare_lint_pass, declare_tool_lint};
use rustc_span::Span;

declare_tool_lint! {
    /// **What it does:** Forbids `println!`, `eprintln!` and `dbg!` in library code.
    ///
    /// **Why is this bad?** They write straight to stdout/stderr:
    /// - output is unstructured and cannot be filtered by level or target
    /// - `dbg!` on a handshake or cookie list prints credential-bearing values
    ///
    /// **Known problems:** None.
    ///
    /// **Example:**
    /// ```rust,ignore
    /// // Bad
    /// println!("cookies: {:?}", cookies);
    ///
    /// // Good
    /// tracing::debug!(cookies = cookies.len(), "derived handshake cookies");
    /// ```
    pub enforcement_pack::NO_PRINTLN,
    Deny,
    "use of println!, eprintln!, or dbg! macros; use tracing instead"
}

declare_tool_lint! {
    /// **What it does:** Forbids `todo!` and `unimplemented!` in library code.
    ///
    /// **Why is this bad?** Request consumers expect an unsupported operation
    /// to come back as `Err(UnsupportedCapability)`. A panicking stub turns a
    /// capability gap into a crashed connection handler.
    ///
    /// **Known problems:** None.
    ///
    /// **Example:**
    /// ```rust,ignore
    /// // Bad
    /// fn remote_addr(&self) -> Result<IpAddr> {
    ///     unimplemented!()
    /// }
    ///
    /// // Good: leave the contract's default in place
    /// ```
    pub enforcement_pack::NO_PANIC_STUBS,
    Deny,
    "use of todo! or unimplemented!; return an UnsupportedCapability error instead"
}

declare_lint_pass!(EnforcementPack => [NO_PRINTLN, NO_PANIC_STUBS]);

impl EarlyLintPass for EnforcementPack {
    fn check_expr(&mut self, cx: &EarlyContext<'_>, expr: &Expr) {
        if let ExprKind::MacCall(mac) = &expr.kind {
            check_macro(cx, mac, expr.span);
        }
    }
}

fn check_macro(cx: &EarlyContext<'_>, mac: &MacCall, span: Span) {
    let path = &mac.path;

    // Only bare macro names (println!, not std::println!)
    if path.segments.len() != 1 {
        return;
    }

    match path.segments[0].ident.name.as_str() {
        name @ ("println" | "eprintln" | "dbg") => {
            cx.span_lint(NO_PRINTLN, span, |diag| {
                diag.help("use `tracing::debug!` or another `tracing` macro");
                diag.note(format!("`{}!` bypasses structured logging", name));
            });
        }
        name @ ("todo" | "unimplemented") => {
            cx.span_lint(NO_PANIC_STUBS, span, |diag| {
                diag.help("return `Err(Error::unsupported(..))` or keep the default method");
                diag.note(format!("`{}!` panics where callers expect an error", name));
            });
        }
        _ => {}
    }
}

#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn register_lints(_sess: &rustc_session::Session, lint_store: &mut rustc_lint::LintStore) {
    lint_store.register_lints(&[&NO_PRINTLN, &NO_PANIC_STUBS]);
    lint_store.register_early_pass(|| Box::new(EnforcementPack));
}

#[unsafe(no_mangle)]
pub fn dylint_version() -> *mut std::os::raw::c_char {
    std::ffi::CString::new(dylint_linting::DYLINT_VERSION)
        .expect("version string contains null byte")
        .into_raw()
}
