//! Error reporting for failed command actions.

use tracing::error;

use crate::error::PaletteError;

/// Receives errors the palette catches instead of propagating.
pub trait ErrorReporter {
    /// Report `error`; `context` is the id of the command involved.
    fn report(&self, error: &PaletteError, context: &str);
}

/// Reports errors to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, err: &PaletteError, context: &str) {
        error!(command = context, error = %err, "Command action failed");
    }
}

impl<T: ErrorReporter + ?Sized> ErrorReporter for std::sync::Arc<T> {
    fn report(&self, error: &PaletteError, context: &str) {
        (**self).report(error, context)
    }
}
