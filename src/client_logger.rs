//! Logging trait for backend client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to
//! capture and log the wire-level interactions passing through the
//! [`BackendClient`](crate::client::BackendClient). Transport failures are
//! always reported here so the underlying cause is available for
//! diagnostics even though the session surfaces only a short notice.

use crate::client::{ChatReply, ChatRequest};
use crate::error::Error;

/// A trait for logging backend client operations.
///
/// # Example
///
/// ```rust,ignore
/// use samvad::{ChatReply, ChatRequest, ClientLogger, Error};
/// use std::io::Write;
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_request(&self, request: &ChatRequest) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "request: {} ({})", request.text, request.lang).unwrap();
///     }
///
///     fn log_reply(&self, reply: &ChatReply) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "reply: {:?}", reply.reply).unwrap();
///     }
///
///     fn log_failure(&self, error: &Error) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "failure: {}", error).unwrap();
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log an outbound request, before it is sent.
    fn log_request(&self, request: &ChatRequest);

    /// Log a successfully parsed reply.
    fn log_reply(&self, reply: &ChatReply);

    /// Log a failed exchange with its underlying cause.
    ///
    /// This is called for transport failures, non-success statuses, and
    /// malformed reply bodies, including the cases the session converts
    /// into transcript notices rather than surfacing as errors.
    fn log_failure(&self, error: &Error);
}
