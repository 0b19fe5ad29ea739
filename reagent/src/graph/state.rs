//! Graph state and merge semantics.
//!
//! A node reads the current state and returns a partial update (`S::Update`); the
//! compiled graph merges that update back with a [`StateUpdater`]. The default
//! updater calls [`GraphState::merge`], which overwrites: any field present in the
//! update replaces the current value, nothing is deep-merged.
//!
//! A graph can swap the updater for the whole graph (`StateGraph::with_state_updater`)
//! or for a single node (`StateGraph::add_node_with_updater`), e.g. to append to a
//! list instead of replacing it.
//!
//! # Example
//!
//! ```rust
//! use reagent::graph::{FieldBasedUpdater, GraphState, StateUpdater};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Counter { hits: u32, log: Vec<String> }
//!
//! #[derive(Debug, Default)]
//! struct CounterUpdate { hits: Option<u32>, log: Vec<String> }
//!
//! impl GraphState for Counter {
//!     type Update = CounterUpdate;
//!     fn merge(&mut self, update: CounterUpdate) {
//!         if let Some(h) = update.hits { self.hits = h; }
//!         if !update.log.is_empty() { self.log = update.log; }
//!     }
//! }
//!
//! // Appends instead of replacing.
//! let appending = FieldBasedUpdater::<Counter, _>::new(|current: &mut Counter, update: CounterUpdate| {
//!     current.log.extend(update.log);
//! });
//! let mut c = Counter::default();
//! appending.apply_update(&mut c, CounterUpdate { hits: None, log: vec!["a".into()] });
//! appending.apply_update(&mut c, CounterUpdate { hits: None, log: vec!["b".into()] });
//! assert_eq!(c.log, vec!["a", "b"]);
//! ```

use std::collections::HashMap;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;

/// State that flows through a [`StateGraph`](super::StateGraph).
///
/// `Update` is what nodes return. `Default` must mean "change nothing".
pub trait GraphState: Clone + Send + Sync + Debug + 'static {
    type Update: Default + Send + Sync + Debug + 'static;

    /// Overwrite-merge `update` into `self`.
    fn merge(&mut self, update: Self::Update);
}

/// Untyped shared state: string key to JSON value.
pub type SharedState = HashMap<String, serde_json::Value>;

/// Keys in the update replace keys in the state; other keys are kept.
impl GraphState for SharedState {
    type Update = SharedState;

    fn merge(&mut self, update: SharedState) {
        self.extend(update);
    }
}

/// Applies a node's update to the current state.
pub trait StateUpdater<S>: Send + Sync + Debug
where
    S: GraphState,
{
    fn apply_update(&self, current: &mut S, update: S::Update);
}

/// Default updater: delegates to [`GraphState::merge`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeUpdater;

impl<S> StateUpdater<S> for MergeUpdater
where
    S: GraphState,
{
    fn apply_update(&self, current: &mut S, update: S::Update) {
        current.merge(update);
    }
}

/// Updater backed by a closure, for per-field strategies such as append.
pub struct FieldBasedUpdater<S, F>
where
    S: GraphState,
    F: Fn(&mut S, S::Update) + Send + Sync + 'static,
{
    updater_fn: F,
    _marker: PhantomData<fn(S)>,
}

impl<S, F> FieldBasedUpdater<S, F>
where
    S: GraphState,
    F: Fn(&mut S, S::Update) + Send + Sync + 'static,
{
    pub fn new(updater_fn: F) -> Self {
        Self {
            updater_fn,
            _marker: PhantomData,
        }
    }
}

impl<S, F> Debug for FieldBasedUpdater<S, F>
where
    S: GraphState,
    F: Fn(&mut S, S::Update) + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBasedUpdater")
            .field("updater_fn", &"<function>")
            .finish()
    }
}

impl<S, F> StateUpdater<S> for FieldBasedUpdater<S, F>
where
    S: GraphState,
    F: Fn(&mut S, S::Update) + Send + Sync + 'static,
{
    fn apply_update(&self, current: &mut S, update: S::Update) {
        (self.updater_fn)(current, update);
    }
}

/// Type-erased updater as stored by the graph.
pub type BoxedStateUpdater<S> = Arc<dyn StateUpdater<S>>;
