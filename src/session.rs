//! The node registry, held by an explicit differentiation session.
//!
//! A [`Session`] maps canonical symbols to the single [`Node`] built for
//! them. Every leaf constructor and combinator routes through it:
//! canonicalise the symbol, look it up, and only on a miss compute the
//! forward/tangent traces and register the result. Independent sessions
//! never share nodes.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use log::{debug, trace, warn};
use ndarray::Array1;

use crate::derivative::Derivative;
use crate::errors::{ADError, Result};
use crate::node::Node;
use crate::operand::{Numeral, Operand};

/// Start-up options for a [`Session`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// When set, lookups always miss and nothing is registered, so every
    /// expression is recomputed.
    pub overwrite_mode: bool,
}

struct Registry {
    nodes: HashMap<String, Node>,
    overwrite: bool,
}

pub(crate) struct Shared {
    registry: Mutex<Registry>,
    computed: AtomicUsize,
}

/// A differentiation context owning the symbol → node registry.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone)]
pub struct Session {
    shared: Arc<Shared>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Creates a session already in the configured mode, without advisories.
    pub fn with_config(config: SessionConfig) -> Self {
        Session {
            shared: Arc::new(Shared {
                registry: Mutex::new(Registry {
                    nodes: HashMap::new(),
                    overwrite: config.overwrite_mode,
                }),
                computed: AtomicUsize::new(0),
            }),
        }
    }

    pub(crate) fn from_shared(shared: Arc<Shared>) -> Self {
        Session { shared }
    }

    #[inline]
    pub(crate) fn downgrade(&self) -> Weak<Shared> {
        Arc::downgrade(&self.shared)
    }

    /// Rejects nodes built by another session. Literals always pass.
    pub(crate) fn check_owned(&self, operand: &Operand) -> Result<()> {
        match operand {
            Operand::Node(node) if !node.belongs_to(self) => {
                Err(ADError::SessionMismatch(node.symbol().to_owned()))
            }
            _ => Ok(()),
        }
    }

    pub fn config(&self) -> SessionConfig {
        SessionConfig {
            overwrite_mode: self.registry().overwrite,
        }
    }

    #[inline]
    fn registry(&self) -> MutexGuard<'_, Registry> {
        // The registry is never left half-updated, so a poisoned lock is still usable.
        self.shared
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached node for `symbol`; always `None` in overwrite mode.
    pub fn lookup(&self, symbol: &str) -> Option<Node> {
        let reg = self.registry();
        if reg.overwrite {
            return None;
        }
        reg.nodes.get(symbol).cloned()
    }

    /// Leaf constructor, idempotent by symbol.
    ///
    /// If `symbol` is already registered the existing node is returned and
    /// `value`/`derivative` are ignored. Otherwise both are type-checked:
    /// anything that is not a plain integer or float (or, for the derivative,
    /// a numeric vector) fails with [`ADError::TypeError`].
    pub fn node<V, D>(&self, symbol: impl Into<String>, value: V, derivative: D) -> Result<Node>
    where
        V: TryInto<Numeral>,
        D: TryInto<Derivative>,
        ADError: From<V::Error> + From<D::Error>,
    {
        self.leaf(symbol.into(), value, derivative, None)
    }

    /// Leaf constructor storing `derivative * seed` as a directional derivative.
    pub fn seeded_node<V, D, S>(
        &self,
        symbol: impl Into<String>,
        value: V,
        derivative: D,
        seed: S,
    ) -> Result<Node>
    where
        V: TryInto<Numeral>,
        D: TryInto<Derivative>,
        S: Into<Array1<f64>>,
        ADError: From<V::Error> + From<D::Error>,
    {
        self.leaf(symbol.into(), value, derivative, Some(seed.into()))
    }

    fn leaf<V, D>(
        &self,
        symbol: String,
        value: V,
        derivative: D,
        seed: Option<Array1<f64>>,
    ) -> Result<Node>
    where
        V: TryInto<Numeral>,
        D: TryInto<Derivative>,
        ADError: From<V::Error> + From<D::Error>,
    {
        if let Some(existing) = self.lookup(&symbol) {
            return Ok(existing);
        }
        let value: Numeral = value.try_into()?;
        let mut derivative: Derivative = derivative.try_into()?;
        if let Some(seed) = seed {
            derivative = derivative.seeded(&seed)?;
        }
        Ok(self.construct(symbol, value.as_f64(), derivative))
    }

    /// A free variable with unit derivative.
    pub fn variable(&self, symbol: impl Into<String>, value: f64) -> Result<Node> {
        self.node(symbol, value, 1.0)
    }

    /// Builds one leaf per `(symbol, value)` pair, the i-th seeded with the
    /// i-th unit vector, so results carry full partial-derivative vectors.
    pub fn variables(&self, vars: &[(&str, f64)]) -> Result<Vec<Node>> {
        let m = vars.len();
        vars.iter()
            .enumerate()
            .map(|(i, &(symbol, value))| {
                let mut seed = Array1::<f64>::zeros(m);
                seed[i] = 1.0;
                self.seeded_node(symbol, value, 1.0, seed)
            })
            .collect()
    }

    /// A literal leaf: its symbol is the literal's own text, its derivative 0.
    pub fn constant(&self, value: impl Into<Numeral>) -> Result<Node> {
        let value = value.into();
        self.node(value.to_string(), value, Derivative::ZERO)
    }

    /// Normalises an operand into a node, turning literals into constants.
    /// Nodes from another session fail with [`ADError::SessionMismatch`].
    pub fn coerce(&self, operand: impl Into<Operand>) -> Result<Node> {
        let operand = operand.into();
        self.check_owned(&operand)?;
        match operand {
            Operand::Node(node) => Ok(node),
            Operand::Literal(n) => self.constant(n),
        }
    }

    /// Construct-or-fetch for combinators: returns the cached node for
    /// `symbol`, or evaluates `compute` and registers its result.
    pub(crate) fn memoize<F>(&self, symbol: String, compute: F) -> Result<Node>
    where
        F: FnOnce(&Session) -> Result<(f64, Derivative)>,
    {
        if let Some(hit) = self.lookup(&symbol) {
            debug!("registry hit for {symbol}");
            return Ok(hit);
        }
        let (value, derivative) = compute(self)?;
        Ok(self.construct(symbol, value, derivative))
    }

    /// Builds a node and publishes it unless overwrite mode is on. If another
    /// handle registered the same symbol in the meantime, that node wins.
    pub(crate) fn construct(&self, symbol: String, value: f64, derivative: Derivative) -> Node {
        let node = Node::new(symbol, value, derivative, self.downgrade());
        self.shared.computed.fetch_add(1, Ordering::Relaxed);
        trace!("computed {:?}", node);

        let mut reg = self.registry();
        if reg.overwrite {
            return node;
        }
        match reg.nodes.entry(node.symbol().to_owned()) {
            Entry::Occupied(e) => e.get().clone(),
            Entry::Vacant(e) => {
                e.insert(node.clone());
                node
            }
        }
    }

    /// Number of nodes currently held by the registry.
    pub fn count_nodes_stored(&self) -> usize {
        self.registry().nodes.len()
    }

    /// Total node constructions so far, including recomputations and nodes
    /// built in overwrite mode. Survives [`Session::clear`].
    pub fn nodes_computed(&self) -> usize {
        self.shared.computed.load(Ordering::Relaxed)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.registry().nodes.contains_key(symbol)
    }

    /// Returns the registered node for `symbol` or [`ADError::NodeNotFound`].
    pub fn get(&self, symbol: &str) -> Result<Node> {
        self.registry()
            .nodes
            .get(symbol)
            .cloned()
            .ok_or_else(|| ADError::NodeNotFound(symbol.to_owned()))
    }

    /// Drops every registered node. Previously computed results are lost.
    pub fn clear(&self) {
        let mut reg = self.registry();
        debug!("clearing {} registered nodes", reg.nodes.len());
        reg.nodes.clear();
    }

    pub fn overwrite_mode(&self) -> bool {
        self.registry().overwrite
    }

    /// Switches memoization off (`true`) or back on (`false`).
    ///
    /// Enabling purges the registry. Every call logs an advisory, including
    /// a request for the mode already in effect, which changes nothing.
    pub fn set_overwrite_mode(&self, enabled: bool) {
        let mut reg = self.registry();
        if reg.overwrite == enabled {
            warn!("Overwrite mode is already set to {enabled}. Expect no changes");
            return;
        }
        if enabled {
            warn!(
                "Overwrite mode is enabled. Nodes with the same symbolic representation \
                 will be recomputed. Expect potential performance decrease"
            );
            reg.nodes.clear();
        } else {
            warn!(
                "Overwrite mode is disabled. Nodes with the same symbolic representation \
                 will not be recomputed"
            );
        }
        reg.overwrite = enabled;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = self.registry();
        f.debug_struct("Session")
            .field("stored", &reg.nodes.len())
            .field("overwrite_mode", &reg.overwrite)
            .field("computed", &self.nodes_computed())
            .finish()
    }
}
