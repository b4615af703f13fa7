//! Per-call record of which rules already ran.

use crate::composition::RuleId;

/// Set of rule identities already invoked during one configure, validate or
/// mutate call.
///
/// The linearizer already removes duplicates from a chain; this cache also
/// suppresses a second invocation when a caller re-enters the chain with the
/// same cache. A cache is never shared between instances or calls unless the
/// caller passes it explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationCache {
    invoked: Vec<RuleId>,
}

impl InvocationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` as invoked. Returns `false` if it already was, in which
    /// case the caller must skip the rule.
    pub fn begin(&mut self, id: RuleId) -> bool {
        if self.invoked.contains(&id) {
            return false;
        }
        self.invoked.push(id);
        true
    }

    /// Forget `id` after its invocation failed, so a retry runs it again.
    pub fn rollback(&mut self, id: RuleId) {
        self.invoked.retain(|invoked| *invoked != id);
    }

    pub fn contains(&self, id: RuleId) -> bool {
        self.invoked.contains(&id)
    }

    /// Invoked identities in invocation order.
    pub fn invoked(&self) -> &[RuleId] {
        &self.invoked
    }

    pub fn len(&self) -> usize {
        self.invoked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoked.is_empty()
    }

    pub fn clear(&mut self) {
        self.invoked.clear();
    }
}
