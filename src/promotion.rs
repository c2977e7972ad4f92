//! The guard policy: static promotion of declared members and the closed set
//! of rejected mutations.
//!
//! [`StaticPromotion`] is the policy the crate is built around. Once applied
//! to a namespace, every instance-style declaration is promoted to namespace
//! scope through a short transaction, and the namespace's dynamic-mutation
//! surface is locked down: visibility changes, aliasing, member removal,
//! shared-state mutation, and re-application of the policy all fail with
//! fixed messages. [`Namespace::conceal`] is the one sanctioned channel left
//! open.
//!
//! # The promotion transaction
//!
//! On each declaration the policy captures the definition, raises the
//! namespace's `promoting` flag, removes the instance-scope copy (the only
//! removal the policy permits), and re-declares the name at namespace scope.
//! The flag is cleared by a drop guard, so it resets on every exit path and
//! the namespace can never get stuck mid-transaction.

use tracing::debug;

use crate::error::{GuardError, Result};
use crate::namespace::Namespace;
use crate::policy::{MutationRequest, NamespacePolicy};

/// Names exempt from the direct static-declaration guard.
///
/// These are the bookkeeping hooks the policy mechanism itself relies on: the
/// member-declared hook and the static-member-declared hook. A host that
/// declares them at namespace scope is wiring the declaration machinery, not
/// bypassing promotion.
pub const RESERVED_STATIC_HOOKS: [&str; 2] = ["member_declared", "static_member_declared"];

/// Clears a namespace's `promoting` flag when dropped.
///
/// Holding the transaction open as a value ties the flag's lifetime to the
/// transaction scope: early returns and unwinds both run the drop.
struct PromotionTxn<'a> {
    namespace: &'a mut Namespace,
}

impl<'a> PromotionTxn<'a> {
    fn begin(namespace: &'a mut Namespace) -> Self {
        namespace.set_promoting(true);
        Self { namespace }
    }

    fn namespace(&mut self) -> &mut Namespace {
        &mut *self.namespace
    }
}

impl Drop for PromotionTxn<'_> {
    fn drop(&mut self) {
        self.namespace.set_promoting(false);
    }
}

/// The guarded-namespace policy.
///
/// Apply with [`Namespace::apply_policy`]; the include and prepend attach
/// paths are permanently disabled and point callers back at apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPromotion;

impl StaticPromotion {
    /// Run the promotion transaction for one declared member.
    fn promote(&self, namespace: &mut Namespace, name: &str) -> Result<()> {
        let Some(definition) = namespace.instance_definition(name) else {
            return Ok(());
        };
        debug!(
            namespace = %namespace.name(),
            member = %name,
            "promoting declared member to namespace scope"
        );
        let mut txn = PromotionTxn::begin(namespace);
        txn.namespace().remove_member(name)?;
        txn.namespace().declare_static(name, definition)?;
        Ok(())
    }
}

impl NamespacePolicy for StaticPromotion {
    /// Enable guarded mode and promote any members declared before attach.
    fn applied(&self, namespace: &mut Namespace) -> Result<()> {
        debug!(namespace = %namespace.name(), "guarded mode enabled");
        for name in namespace.instance_members() {
            self.member_declared(namespace, &name)?;
        }
        Ok(())
    }

    fn policy_included(&self, _namespace: &mut Namespace) -> Result<()> {
        Err(GuardError::PolicyIncludeDisabled)
    }

    fn policy_prepended(&self, _namespace: &mut Namespace) -> Result<()> {
        Err(GuardError::PolicyPrependDisabled)
    }

    fn member_declared(&self, namespace: &mut Namespace, name: &str) -> Result<()> {
        self.promote(namespace, name)
    }

    fn authorize(&self, namespace: &Namespace, request: MutationRequest<'_>) -> Result<()> {
        match request {
            MutationRequest::ApplyPolicy | MutationRequest::ExtendSource => {
                Err(GuardError::ExtendDisabled)
            }
            MutationRequest::IncludeSource => Err(GuardError::IncludeDisabled),
            MutationRequest::PrependSource => Err(GuardError::PrependDisabled),
            MutationRequest::ModuleFunction => Err(GuardError::ModuleFunctionDisabled),
            MutationRequest::SetPublic => Err(GuardError::PublicDisabled),
            MutationRequest::SetProtected => Err(GuardError::ProtectedDisabled),
            MutationRequest::SetPrivate => Err(GuardError::PrivateDisabled),
            MutationRequest::Alias { to, from } => Err(GuardError::AliasDisabled {
                to: to.to_owned(),
                from: from.to_owned(),
            }),
            MutationRequest::SetClassVariable { name } => {
                Err(GuardError::ClassVariableSetDisabled { name: name.to_owned() })
            }
            MutationRequest::GetClassVariable { name } => {
                Err(GuardError::ClassVariableGetDisabled { name: name.to_owned() })
            }
            MutationRequest::DefineConstant { name } => {
                Err(GuardError::ConstantDisabled { name: name.to_owned() })
            }
            MutationRequest::DefineMember { name } => {
                Err(GuardError::DefineDisabled { name: name.to_owned() })
            }
            MutationRequest::RemoveMember { name } => {
                // The promotion transaction's own removal step.
                if namespace.promoting() {
                    Ok(())
                } else {
                    Err(GuardError::RemoveDisabled { name: name.to_owned() })
                }
            }
            MutationRequest::UndefineMember { name } => {
                Err(GuardError::UndefineDisabled { name: name.to_owned() })
            }
            MutationRequest::DeclareStatic { name } => {
                if namespace.promoting() || RESERVED_STATIC_HOOKS.contains(&name) {
                    Ok(())
                } else {
                    Err(GuardError::StaticDeclarationDisabled { name: name.to_owned() })
                }
            }
            MutationRequest::Conceal { .. } => Ok(()),
        }
    }
}
