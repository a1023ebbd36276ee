//! Compilation of bound command methods into dispatchable commands.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use cmdhub_core::descriptor::{CommandDescriptor, CommandMethod, MethodDescriptor, ParamKind};

use crate::callable::PipelineCallable;
use crate::error::CompileError;
use crate::hooks::registry::HookSnapshot;

/// Turns a bound command method into a dispatch-ready command, wiring the
/// supplied hooks through its invocation path.
///
/// Implementations other than the built-in [`SimpleMethodCompiler`] can
/// bring their own binding strategies; the pipeline only requires that the
/// produced callable honor the invocation phases.
pub trait MethodCompiler: Send + Sync + std::fmt::Debug {
    /// Compiles `method` against the hooks captured in `hooks`.
    fn compile(
        &self,
        method: &CommandMethod,
        hooks: HookSnapshot,
    ) -> Result<CommandDescriptor, CompileError>;
}

/// The built-in compiler for descriptor-bound handlers.
///
/// Argument binding is the handler's own affair (it receives the raw
/// context); the compiler validates the declared shape and wraps the body
/// in a [`PipelineCallable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleMethodCompiler;

impl MethodCompiler for SimpleMethodCompiler {
    fn compile(
        &self,
        method: &CommandMethod,
        hooks: HookSnapshot,
    ) -> Result<CommandDescriptor, CompileError> {
        validate(&method.descriptor)?;
        debug!(
            command = %method.descriptor.primary_alias(),
            params = method.descriptor.params.len(),
            "Compiled command method"
        );
        let callable =
            PipelineCallable::new(method.descriptor.clone(), Arc::clone(&method.handler), hooks);
        Ok(CommandDescriptor::new(
            method.descriptor.aliases.clone(),
            Arc::new(callable),
        ))
    }
}

fn validate(descriptor: &MethodDescriptor) -> Result<(), CompileError> {
    if descriptor.aliases.is_empty() {
        return Err(CompileError::NoAliases);
    }
    let method = descriptor.primary_alias();

    let mut seen_aliases = HashSet::new();
    for alias in &descriptor.aliases {
        if alias.trim().is_empty() {
            return Err(CompileError::BlankAlias {
                method: method.to_string(),
            });
        }
        if !seen_aliases.insert(alias.as_str()) {
            return Err(CompileError::DuplicateAlias {
                method: method.to_string(),
                alias: alias.clone(),
            });
        }
    }

    let mut seen_params = HashSet::new();
    let mut seen_flags = HashSet::new();
    let mut optional_seen = false;
    let mut variadic: Option<&str> = None;
    for param in &descriptor.params {
        if !seen_params.insert(param.name.as_str()) {
            return Err(CompileError::DuplicateParam {
                method: method.to_string(),
                param: param.name.clone(),
            });
        }
        // Switches are exempt from the positional ordering rules.
        if let ParamKind::Switch { flag } = &param.kind {
            if !seen_flags.insert(*flag) {
                return Err(CompileError::DuplicateSwitch {
                    method: method.to_string(),
                    flag: *flag,
                });
            }
            continue;
        }
        if let Some(variadic_name) = variadic {
            return Err(CompileError::VariadicNotLast {
                method: method.to_string(),
                param: variadic_name.to_string(),
            });
        }
        match &param.kind {
            ParamKind::Required if optional_seen => {
                return Err(CompileError::RequiredAfterOptional {
                    method: method.to_string(),
                    param: param.name.clone(),
                });
            }
            ParamKind::Required => {}
            ParamKind::Optional { .. } => optional_seen = true,
            ParamKind::Variadic => variadic = Some(&param.name),
            ParamKind::Switch { .. } => {}
        }
    }
    Ok(())
}
