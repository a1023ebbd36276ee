//! Alias-indexed command registry.

use crate::descriptor::CommandDescriptor;

/// An alias-indexed registry of compiled commands.
///
/// External collaborator: CommandHub produces [`CommandDescriptor`]s and
/// hands them over; how aliases are indexed, matched, and what happens on an
/// alias collision is entirely the dispatcher's policy.
pub trait Dispatcher: Send + Sync {
    /// Installs a compiled command under its aliases.
    fn register_command(&mut self, command: CommandDescriptor);
}
