//! The engine's boundary error type.
//!
//! Internally the engine propagates bare [`ExecError`] values so nested
//! invocations pass failures up unchanged. Only the public boundary wraps
//! the kind into an [`EngineError`], attaching the rewritten trace when
//! the failing invocation was the root and the error was a domain error.

use thiserror::Error;

use refract_common::ExecError;

use crate::traceback::Traceback;

/// Failure returned by [`Engine::execute`](crate::Engine::execute).
///
/// Displays as the underlying kind; the kind is also the error source, so
/// callers can match on it or walk the chain. `trace` is populated only
/// for domain errors that reached the root invocation.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct EngineError {
    /// The declared error kind.
    #[source]
    pub kind: ExecError,
    /// Interpreted-only call trace, when rewriting happened.
    pub trace: Option<Traceback>,
}

impl EngineError {
    /// Diagnostic rendering: the rewritten trace (when present) followed
    /// by the error message.
    pub fn render(&self) -> String {
        match &self.trace {
            Some(trace) => trace.render(&self.kind),
            None => self.kind.to_string(),
        }
    }
}
