//! Rule identities and rule types.
//!
//! A [`RuleType`] is the definition-time description of a rule: either a
//! leaf that knows how to instantiate one rule object, or a composite built by
//! [`combine`](super::combine). Every rule type carries its precomputed chain
//! as an arena of distinct leaf nodes plus an index list giving execution
//! order, so field descriptors never re-run the linearization.

use crate::composition::combinator::combine;
use crate::composition::error::CompositionError;
use crate::core::Rule;
use std::any::TypeId;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_UNIQUE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a rule type.
///
/// Rule types declared from a Rust type share that type's identity; rule
/// types built from closures and every composite get a fresh identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId(Identity);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Identity {
    Type(TypeId),
    Unique(u64),
}

impl RuleId {
    pub fn of<R: 'static>() -> Self {
        RuleId(Identity::Type(TypeId::of::<R>()))
    }

    pub(crate) fn unique() -> Self {
        RuleId(Identity::Unique(
            NEXT_UNIQUE_ID.fetch_add(1, Ordering::Relaxed),
        ))
    }
}

/// Creates a fresh, unconfigured rule object.
pub type RuleFactory = Arc<dyn Fn() -> Box<dyn Rule> + Send + Sync>;

/// One distinct leaf rule in a chain's arena.
#[derive(Clone)]
pub struct RuleNode {
    id: RuleId,
    name: String,
    factory: RuleFactory,
}

impl RuleNode {
    pub fn id(&self) -> RuleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create an unconfigured rule object for this node.
    pub fn instantiate(&self) -> Box<dyn Rule> {
        (self.factory)()
    }
}

impl fmt::Debug for RuleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleNode")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

/// Definition of a rule, leaf or composite.
///
/// Cheap to clone; clones share identity.
///
/// # Example
///
/// ```rust
/// use fieldrule::composition::{combine, RuleType};
/// use fieldrule::rules::{Sized, Type};
///
/// let name_rule = combine([RuleType::of::<Sized>(), RuleType::of::<Type>()]).unwrap();
/// assert_eq!(name_rule.chain_names(), vec!["Sized", "Type"]);
/// assert_eq!(name_rule.to_string(), "CombinedRule(Sized, Type)");
/// ```
#[derive(Clone)]
pub struct RuleType {
    inner: Arc<RuleTypeInner>,
}

struct RuleTypeInner {
    id: RuleId,
    name: String,
    members: Vec<RuleType>,
    nodes: Vec<RuleNode>,
    chain: Vec<usize>,
}

impl RuleType {
    /// Leaf rule type for a Rust rule type. Calling this twice for the same
    /// `R` yields the same identity.
    pub fn of<R>() -> Self
    where
        R: Rule + Default + 'static,
    {
        let name = R::default().name().to_string();
        Self::leaf(
            RuleId::of::<R>(),
            name,
            Arc::new(|| Box::new(R::default()) as Box<dyn Rule>),
        )
    }

    /// Leaf rule type built from a factory closure. Every call creates a new
    /// identity.
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Rule> + Send + Sync + 'static,
    {
        Self::leaf(RuleId::unique(), name.into(), Arc::new(factory))
    }

    fn leaf(id: RuleId, name: String, factory: RuleFactory) -> Self {
        let node = RuleNode {
            id,
            name: name.clone(),
            factory,
        };
        Self {
            inner: Arc::new(RuleTypeInner {
                id,
                name,
                members: Vec::new(),
                nodes: vec![node],
                chain: vec![0],
            }),
        }
    }

    pub(crate) fn composite(
        id: RuleId,
        members: Vec<RuleType>,
        nodes: Vec<RuleNode>,
        chain: Vec<usize>,
    ) -> Self {
        Self {
            inner: Arc::new(RuleTypeInner {
                id,
                name: "CombinedRule".to_string(),
                members,
                nodes,
                chain,
            }),
        }
    }

    pub fn id(&self) -> RuleId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn is_composite(&self) -> bool {
        !self.inner.members.is_empty()
    }

    /// Direct inputs of a composite, in declaration order. Empty for leaves.
    pub fn members(&self) -> &[RuleType] {
        &self.inner.members
    }

    /// Arena of distinct leaf rules reachable from this rule type, in
    /// first-discovery order.
    pub fn nodes(&self) -> &[RuleNode] {
        &self.inner.nodes
    }

    /// Execution order as indices into [`RuleType::nodes`].
    pub fn chain(&self) -> &[usize] {
        &self.inner.chain
    }

    pub fn chain_ids(&self) -> Vec<RuleId> {
        self.chain().iter().map(|&index| self.nodes()[index].id()).collect()
    }

    pub fn chain_names(&self) -> Vec<&str> {
        self.chain().iter().map(|&index| self.nodes()[index].name()).collect()
    }

    /// Combine with another rule type. A composite receiver is flattened, so
    /// `a.and(&b)?.and(&c)?` has the direct inputs `[a, b, c]`.
    pub fn and(&self, other: &RuleType) -> Result<RuleType, CompositionError> {
        if self.is_composite() {
            let mut inputs = self.members().to_vec();
            inputs.push(other.clone());
            combine(inputs)
        } else {
            combine([self.clone(), other.clone()])
        }
    }

    /// This rule type or any nested member with identity `id`.
    pub(crate) fn find(&self, id: RuleId) -> Option<&RuleType> {
        if self.id() == id {
            return Some(self);
        }
        self.members().iter().find_map(|member| member.find(id))
    }
}

impl PartialEq for RuleType {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for RuleType {}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_composite() {
            return f.write_str(self.name());
        }
        let members = self
            .members()
            .iter()
            .map(|member| member.name().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({})", self.name(), members)
    }
}

impl fmt::Debug for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleType")
            .field("name", &self.to_string())
            .field("chain", &self.chain_names())
            .finish()
    }
}
