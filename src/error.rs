//! Error types for namespace policy enforcement.
//!
//! Every policy rejection is a permanent decision, not a transient failure,
//! and downstream consumers match on the message text. The `#[error]` literals
//! on the disabled-operation variants are therefore part of the external
//! contract and must not be reworded.

use thiserror::Error;

use crate::member::Visibility;

/// Result type for namespace operations.
pub type Result<T> = std::result::Result<T, GuardError>;

/// Errors produced by the namespace host and its guard policy.
///
/// The `*Disabled` variants are the closed set of policy rejections; the
/// remaining variants are ordinary host errors (unknown member, visibility
/// violation, unset class variable) that occur on guarded and unguarded
/// namespaces alike.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// A guarded namespace was used as the source of an extend, or a policy
    /// was re-applied to a namespace that is already guarded.
    #[error("Module extend is disabled.")]
    ExtendDisabled,

    /// A guarded namespace was used as the source of an include.
    #[error("Module include is disabled.")]
    IncludeDisabled,

    /// A guarded namespace was used as the source of a prepend.
    #[error("Module prepend is disabled.")]
    PrependDisabled,

    /// The policy definition itself was merged in via include.
    #[error("Module include is disabled, use extend instead.")]
    PolicyIncludeDisabled,

    /// The policy definition itself was inserted ahead via prepend.
    #[error("Module prepend is disabled, use extend instead.")]
    PolicyPrependDisabled,

    /// Module-function declaration mode was requested on a guarded namespace.
    #[error("Module function behavior is disabled.")]
    ModuleFunctionDisabled,

    /// Public default visibility was requested on a guarded namespace.
    #[error("Public visibility is disabled.")]
    PublicDisabled,

    /// Protected default visibility was requested on a guarded namespace.
    #[error("Protected visibility is disabled.")]
    ProtectedDisabled,

    /// Private default visibility was requested on a guarded namespace.
    #[error("Private visibility is disabled, use conceal instead.")]
    PrivateDisabled,

    /// A member alias was requested on a guarded namespace.
    #[error("Aliasing {from} as {to} is disabled.")]
    AliasDisabled {
        /// The new name the alias would have created.
        to: String,
        /// The existing member that would have been aliased.
        from: String,
    },

    /// A class variable write was requested on a guarded namespace.
    #[error("Setting class variable {name} is disabled.")]
    ClassVariableSetDisabled {
        /// The class variable name.
        name: String,
    },

    /// A class variable read was requested on a guarded namespace.
    #[error("Getting class variable {name} is disabled.")]
    ClassVariableGetDisabled {
        /// The class variable name.
        name: String,
    },

    /// A constant definition was requested on a guarded namespace.
    #[error("Setting constant {name} is disabled.")]
    ConstantDisabled {
        /// The constant name.
        name: String,
    },

    /// A dynamic member definition was requested on a guarded namespace.
    #[error("Defining method {name} is disabled.")]
    DefineDisabled {
        /// The member name.
        name: String,
    },

    /// A member removal was requested on a guarded namespace outside an
    /// active promotion transaction.
    #[error("Removing method {name} is disabled.")]
    RemoveDisabled {
        /// The member name.
        name: String,
    },

    /// A member undefine was requested on a guarded namespace.
    #[error("Undefining method {name} is disabled.")]
    UndefineDisabled {
        /// The member name.
        name: String,
    },

    /// A namespace-scope callable was declared directly on a guarded
    /// namespace, bypassing the promotion transaction.
    #[error("Avoid defining {name} as a class method because the method will be automatically converted to a class method for you.")]
    StaticDeclarationDisabled {
        /// The member name.
        name: String,
    },

    /// A member was invoked, removed, aliased, or concealed under a name the
    /// namespace does not carry.
    #[error("undefined member '{name}' for namespace '{namespace}'")]
    UnknownMember {
        /// The namespace the lookup ran against.
        namespace: String,
        /// The missing member name.
        name: String,
    },

    /// A non-public member was invoked from an external call context.
    #[error("{visibility} method '{name}' called for namespace '{namespace}'")]
    VisibilityViolation {
        /// The namespace the call ran against.
        namespace: String,
        /// The member name.
        name: String,
        /// The member's effective visibility.
        visibility: Visibility,
    },

    /// A class variable was read before any value was assigned.
    #[error("uninitialized class variable {name} in namespace '{namespace}'")]
    UninitializedClassVariable {
        /// The namespace the read ran against.
        namespace: String,
        /// The class variable name.
        name: String,
    },
}
