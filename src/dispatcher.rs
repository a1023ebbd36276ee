//! Alias-indexed command dispatcher owned by the console.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use cmdhub_core::descriptor::CommandDescriptor;
use cmdhub_core::traits::{CommandCallable, Dispatcher};

/// Maps aliases to compiled commands.
///
/// Registration is last-wins: a command registered under an alias already
/// in use replaces the earlier holder of that alias.
#[derive(Debug, Default)]
pub struct AliasDispatcher {
    commands: HashMap<String, Arc<dyn CommandCallable>>,
}

impl AliasDispatcher {
    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// The command registered under `alias`, if any.
    pub fn get(&self, alias: &str) -> Option<&Arc<dyn CommandCallable>> {
        self.commands.get(alias)
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// One sorted help line per command, listed under its primary alias.
    pub fn help_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .commands
            .iter()
            .filter(|(alias, command)| command.descriptor().primary_alias() == alias.as_str())
            .map(|(_, command)| {
                let descriptor = command.descriptor();
                if descriptor.description.is_empty() {
                    descriptor.usage_line()
                } else {
                    format!("{}  {}", descriptor.usage_line(), descriptor.description)
                }
            })
            .collect();
        lines.sort();
        lines
    }
}

impl Dispatcher for AliasDispatcher {
    fn register_command(&mut self, command: CommandDescriptor) {
        for alias in command.aliases() {
            let callable = Arc::clone(command.callable());
            if self.commands.insert(alias.clone(), callable).is_some() {
                warn!(alias = %alias, "Alias collision, replacing earlier command");
            }
        }
    }
}

/// Splits a raw console line into its alias and argument text.
///
/// Returns `None` for blank lines. The argument text keeps its internal
/// spacing; only the leading whitespace after the alias is dropped.
pub fn split_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((alias, rest)) => Some((alias, rest.trim_start())),
        None => Some((line, "")),
    }
}

#[cfg(test)]
mod tests {
    use cmdhub_core::descriptor::{CommandMethod, MethodDescriptor};
    use cmdhub_core::traits::FnHandler;
    use cmdhub_pipeline::PipelineAssembler;

    use super::*;

    fn method(aliases: &[&str], description: &str) -> CommandMethod {
        CommandMethod::new(
            MethodDescriptor::new(aliases.iter().copied(), description),
            FnHandler::shared(|_ctx| async { Ok(None) }),
        )
    }

    fn register(dispatcher: &mut AliasDispatcher, aliases: &[&str], description: &str) {
        let assembler = PipelineAssembler::new();
        let command = assembler.build(&method(aliases, description)).unwrap();
        dispatcher.register_command(command);
    }

    #[test]
    fn test_every_alias_is_indexed() {
        let mut dispatcher = AliasDispatcher::new();
        register(&mut dispatcher, &["tp", "teleport"], "Teleport a player");

        assert_eq!(dispatcher.len(), 2);
        assert!(dispatcher.get("tp").is_some());
        assert!(dispatcher.get("teleport").is_some());
        assert!(dispatcher.get("fly").is_none());
    }

    #[test]
    fn test_collision_replaces_earlier_command() {
        let mut dispatcher = AliasDispatcher::new();
        register(&mut dispatcher, &["ping"], "first");
        register(&mut dispatcher, &["ping"], "second");

        assert_eq!(dispatcher.len(), 1);
        let command = dispatcher.get("ping").unwrap();
        assert_eq!(command.descriptor().description, "second");
    }

    #[test]
    fn test_help_lists_each_command_once() {
        let mut dispatcher = AliasDispatcher::new();
        register(&mut dispatcher, &["echo", "say"], "Repeat the arguments");
        register(&mut dispatcher, &["ping"], "");

        assert_eq!(
            dispatcher.help_lines(),
            vec!["echo  Repeat the arguments".to_string(), "ping".to_string()]
        );
    }

    #[test]
    fn test_split_line_separates_alias_and_arguments() {
        assert_eq!(split_line("kick steve  griefing"), Some(("kick", "steve  griefing")));
        assert_eq!(split_line("  ping  "), Some(("ping", "")));
        assert_eq!(split_line(""), None);
        assert_eq!(split_line("   "), None);
    }
}
