//! Errors raised while configuring hooks and compiling command methods.

use thiserror::Error;

/// A hook registry mutator was given no value.
///
/// Raised before any state mutation, so the previously configured value
/// stays in effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("a {slot} must be supplied")]
pub struct ConfigurationError {
    /// Which registry slot the caller tried to configure.
    pub slot: &'static str,
}

impl ConfigurationError {
    pub(crate) fn missing(slot: &'static str) -> Self {
        Self { slot }
    }
}

/// Why a command method could not be compiled into a command.
///
/// Batch registration aborts on the first failing method; commands already
/// registered in the same call remain registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The descriptor declares no aliases at all.
    #[error("command method declares no aliases")]
    NoAliases,

    /// An alias is empty or whitespace.
    #[error("command method '{method}' declares a blank alias")]
    BlankAlias {
        /// Primary alias of the offending method.
        method: String,
    },

    /// The same alias appears twice on one method.
    #[error("command method '{method}' declares duplicate alias '{alias}'")]
    DuplicateAlias {
        /// Primary alias of the offending method.
        method: String,
        /// The repeated alias.
        alias: String,
    },

    /// The same parameter name appears twice.
    #[error("command method '{method}' declares duplicate parameter '{param}'")]
    DuplicateParam {
        /// Primary alias of the offending method.
        method: String,
        /// The repeated parameter name.
        param: String,
    },

    /// A required positional parameter is declared after an optional one.
    #[error("command method '{method}': required parameter '{param}' follows an optional one")]
    RequiredAfterOptional {
        /// Primary alias of the offending method.
        method: String,
        /// The misplaced required parameter.
        param: String,
    },

    /// A variadic parameter is not the last positional parameter.
    #[error("command method '{method}': variadic parameter '{param}' must be declared last")]
    VariadicNotLast {
        /// Primary alias of the offending method.
        method: String,
        /// The variadic parameter that has positional parameters after it.
        param: String,
    },

    /// The same switch flag appears twice.
    #[error("command method '{method}' declares duplicate switch '-{flag}'")]
    DuplicateSwitch {
        /// Primary alias of the offending method.
        method: String,
        /// The repeated flag character.
        flag: char,
    },
}
