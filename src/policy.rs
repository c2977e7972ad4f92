//! The observer contract a namespace invokes on declaration and mutation
//! events.
//!
//! A namespace with a policy installed routes every mutation through
//! [`NamespacePolicy::authorize`] before acting, and fires the declaration
//! hooks as members are registered. Namespaces without a policy skip the
//! contract entirely, so ungoverned namespaces behave as plain registries.

use std::fmt;

use crate::error::Result;
use crate::namespace::Namespace;

/// A namespace-mutation request, classified for authorization.
///
/// Each variant corresponds to one operation on the namespace surface. The
/// policy either allows the request or rejects it with a fixed error; there
/// is no partial grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationRequest<'a> {
    /// Attach a policy to this namespace.
    ApplyPolicy,
    /// Use this namespace as the source of an extend into another namespace.
    ExtendSource,
    /// Use this namespace as the source of an include into another namespace.
    IncludeSource,
    /// Use this namespace as the source of a prepend into another namespace.
    PrependSource,
    /// Switch to module-function declaration mode.
    ModuleFunction,
    /// Set public default visibility for subsequent declarations.
    SetPublic,
    /// Set protected default visibility for subsequent declarations.
    SetProtected,
    /// Set private default visibility for subsequent declarations.
    SetPrivate,
    /// Alias an existing member under a new name.
    Alias {
        /// The alias to create.
        to: &'a str,
        /// The existing member.
        from: &'a str,
    },
    /// Write a class variable.
    SetClassVariable {
        /// The class variable name.
        name: &'a str,
    },
    /// Read a class variable.
    GetClassVariable {
        /// The class variable name.
        name: &'a str,
    },
    /// Define a constant.
    DefineConstant {
        /// The constant name.
        name: &'a str,
    },
    /// Dynamically define an instance member.
    DefineMember {
        /// The member name.
        name: &'a str,
    },
    /// Remove an instance member.
    RemoveMember {
        /// The member name.
        name: &'a str,
    },
    /// Undefine an instance member, tombstoning the name.
    UndefineMember {
        /// The member name.
        name: &'a str,
    },
    /// Declare a namespace-scope callable directly.
    DeclareStatic {
        /// The member name.
        name: &'a str,
    },
    /// Restrict the visibility of namespace-scope members.
    Conceal {
        /// The normalized member names.
        names: &'a [String],
    },
}

/// Policy hooks invoked by a namespace on declaration and mutation events.
///
/// The namespace calls [`authorize`](Self::authorize) before every mutation
/// in the [`MutationRequest`] set and [`member_declared`](Self::member_declared)
/// after each instance-scope declaration. The attach-path hooks
/// ([`applied`](Self::applied), [`policy_included`](Self::policy_included),
/// [`policy_prepended`](Self::policy_prepended)) fire when the policy itself
/// is attached via the respective mechanism.
///
/// All hooks default to allowing the event, so a policy only overrides the
/// events it cares about.
pub trait NamespacePolicy: fmt::Debug + Send + Sync {
    /// Called once when the policy is applied to `namespace`.
    fn applied(&self, namespace: &mut Namespace) -> Result<()> {
        let _ = namespace;
        Ok(())
    }

    /// Called when a caller attempts to attach this policy via include.
    fn policy_included(&self, namespace: &mut Namespace) -> Result<()> {
        let _ = namespace;
        Ok(())
    }

    /// Called when a caller attempts to attach this policy via prepend.
    fn policy_prepended(&self, namespace: &mut Namespace) -> Result<()> {
        let _ = namespace;
        Ok(())
    }

    /// Called after an instance-scope callable is declared on a governed
    /// namespace.
    fn member_declared(&self, namespace: &mut Namespace, name: &str) -> Result<()> {
        let _ = (namespace, name);
        Ok(())
    }

    /// Classify and decide a mutation request on a governed namespace.
    fn authorize(&self, namespace: &Namespace, request: MutationRequest<'_>) -> Result<()> {
        let _ = (namespace, request);
        Ok(())
    }
}
