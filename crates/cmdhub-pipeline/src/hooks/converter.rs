//! Translation of unrecognized failures into command errors.

use cmdhub_core::context::InvocationContext;
use cmdhub_core::error::CommandError;

/// Translates an unrecognized command failure into a recognized
/// [`CommandError`].
///
/// Converters registered later are consulted first, so a converter for a
/// specific failure can intercept it before an earlier, more general one.
/// The first converter to return `Some` ends consultation.
pub trait ExceptionConverter: Send + Sync + std::fmt::Debug {
    /// Short name used in logs and unhandled-failure reports.
    fn name(&self) -> &str;

    /// Attempts to claim `failure`, typically by downcasting it to the
    /// concrete error types the converter knows.
    fn convert(
        &self,
        ctx: &InvocationContext,
        failure: &(dyn std::error::Error + Send + Sync + 'static),
    ) -> Option<CommandError>;
}
