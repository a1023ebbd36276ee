//! Command metadata descriptors and their compiled forms.
//!
//! A [`MethodDescriptor`] is the declarative half of a command: aliases,
//! help text, permissions, and parameter specs. Paired with a bound
//! [`CommandHandler`](crate::traits::CommandHandler) body it becomes a
//! [`CommandMethod`], the unit a method compiler turns into a dispatchable
//! [`CommandDescriptor`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::traits::{CommandCallable, CommandHandler};

/// How one declared parameter consumes invocation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// A positional parameter that must be present.
    Required,
    /// A positional parameter that may be absent, optionally falling back
    /// to a default value.
    Optional {
        /// Value bound when the parameter is absent.
        default: Option<String>,
    },
    /// Consumes all remaining positional input. Must be declared last.
    Variadic,
    /// A boolean flag parameter (`-f`) that may appear anywhere.
    Switch {
        /// Single-character flag name.
        flag: char,
    },
}

/// One declared parameter of a command method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name, unique within the method.
    pub name: String,
    /// How the parameter consumes input.
    pub kind: ParamKind,
}

impl ParamSpec {
    /// A required positional parameter.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Required,
        }
    }

    /// An optional positional parameter without a default.
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Optional { default: None },
        }
    }

    /// An optional positional parameter bound to `default` when absent.
    pub fn optional_with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Optional {
                default: Some(default.into()),
            },
        }
    }

    /// A variadic parameter consuming the rest of the input.
    pub fn variadic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Variadic,
        }
    }

    /// A single-character switch flag.
    pub fn switch(name: impl Into<String>, flag: char) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Switch { flag },
        }
    }
}

/// Declarative metadata for one command method.
///
/// Serializable so build-time discovery facilities can also load descriptors
/// from data files rather than constructing them in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Aliases the command is registered under. The first alias is primary.
    pub aliases: Vec<String>,
    /// Help text describing the command.
    #[serde(default)]
    pub description: String,
    /// Permission strings; holding any one of them authorizes the caller.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Declared parameters, in binding order.
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

impl MethodDescriptor {
    /// Creates a descriptor with aliases and help text and no parameters.
    pub fn new(
        aliases: impl IntoIterator<Item = impl Into<String>>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            description: description.into(),
            permissions: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Adds a permission string.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    /// Adds a parameter spec.
    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// The primary (first) alias, or the empty string for an alias-less
    /// descriptor. Method compilers reject empty alias lists.
    pub fn primary_alias(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or("")
    }

    /// Derives the one-line usage string shown in help output, e.g.
    /// `tp <target> [destination=spawn] [-f]`.
    pub fn usage_line(&self) -> String {
        let mut usage = self.primary_alias().to_string();
        for param in &self.params {
            usage.push(' ');
            match &param.kind {
                ParamKind::Required => {
                    usage.push_str(&format!("<{}>", param.name));
                }
                ParamKind::Optional { default: None } => {
                    usage.push_str(&format!("[{}]", param.name));
                }
                ParamKind::Optional {
                    default: Some(default),
                } => {
                    usage.push_str(&format!("[{}={}]", param.name, default));
                }
                ParamKind::Variadic => {
                    usage.push_str(&format!("[{}...]", param.name));
                }
                ParamKind::Switch { flag } => {
                    usage.push_str(&format!("[-{flag}]"));
                }
            }
        }
        usage
    }
}

/// A [`MethodDescriptor`] bound to the body that executes it.
///
/// This is the unit a [`CommandModule`](crate::traits::CommandModule)
/// enumerates: the handler is already closed over whatever module state the
/// body needs.
#[derive(Debug, Clone)]
pub struct CommandMethod {
    /// Declarative metadata.
    pub descriptor: MethodDescriptor,
    /// The bound body.
    pub handler: Arc<dyn CommandHandler>,
}

impl CommandMethod {
    /// Pairs a descriptor with its bound body.
    pub fn new(descriptor: MethodDescriptor, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            descriptor,
            handler,
        }
    }
}

/// Immutable binding of an alias set to a compiled callable, produced once
/// per build and handed to a dispatcher for registration.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    aliases: Vec<String>,
    callable: Arc<dyn CommandCallable>,
}

impl CommandDescriptor {
    /// Binds `aliases` to a compiled callable.
    pub fn new(aliases: Vec<String>, callable: Arc<dyn CommandCallable>) -> Self {
        Self { aliases, callable }
    }

    /// Aliases the command should be registered under.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The compiled callable.
    pub fn callable(&self) -> &Arc<dyn CommandCallable> {
        &self.callable
    }
}
