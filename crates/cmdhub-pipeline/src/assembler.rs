//! The front door: assembles command modules into a dispatcher.

use std::sync::Arc;

use tracing::info;

use cmdhub_core::descriptor::{CommandDescriptor, CommandMethod};
use cmdhub_core::traits::{CommandModule, Dispatcher};

use crate::compiler::{MethodCompiler, SimpleMethodCompiler};
use crate::error::CompileError;
use crate::hooks::registry::HookRegistry;

/// Builds commands out of module methods and registers them into a
/// dispatcher.
///
/// Owns the [`HookRegistry`] that configures every command it builds. Each
/// build captures a snapshot of the registry, so hooks added afterwards
/// only affect commands built afterwards.
#[derive(Debug)]
pub struct PipelineAssembler {
    hooks: HookRegistry,
    compiler: Arc<dyn MethodCompiler>,
}

impl PipelineAssembler {
    /// Creates an assembler with default hooks and the built-in compiler.
    pub fn new() -> Self {
        Self::with_compiler(Arc::new(SimpleMethodCompiler))
    }

    /// Creates an assembler with default hooks and a custom compiler.
    pub fn with_compiler(compiler: Arc<dyn MethodCompiler>) -> Self {
        Self {
            hooks: HookRegistry::new(),
            compiler,
        }
    }

    /// The hook configuration commands are built against.
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Mutable access for configuring hooks before building commands.
    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    /// Compiles one bound method against a snapshot of the current hooks.
    pub fn build(&self, method: &CommandMethod) -> Result<CommandDescriptor, CompileError> {
        self.compiler.compile(method, self.hooks.snapshot())
    }

    /// Builds and registers every command method of `module`.
    ///
    /// Aborts on the first method that fails to compile: commands
    /// registered earlier in the same call stay registered and later
    /// methods are not attempted. Returns the number of commands
    /// registered.
    pub fn register_commands(
        &self,
        dispatcher: &mut dyn Dispatcher,
        module: &dyn CommandModule,
    ) -> Result<usize, CompileError> {
        let mut registered = 0;
        for method in module.command_methods() {
            let command = self.build(&method)?;
            info!(
                module = %module.module_name(),
                command = %method.descriptor.primary_alias(),
                aliases = method.descriptor.aliases.len(),
                "Command registered"
            );
            dispatcher.register_command(command);
            registered += 1;
        }
        Ok(registered)
    }
}

impl Default for PipelineAssembler {
    fn default() -> Self {
        Self::new()
    }
}
