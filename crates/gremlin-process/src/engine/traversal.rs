//! The traversal and its iteration engine.

use std::collections::VecDeque;
use std::sync::{Arc, Weak};

use gremlin_bytecode::{Arguments, Bytecode, Value, Values};
use tracing::{debug, warn};

use super::error::{Error, Result};
use super::strategy::TraversalStrategies;
use super::stream::TraversalStream;
use super::traverser::Traverser;

/// What to do with a traverser whose bulk is zero or negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BulkPolicy {
    /// Fail the consuming call with [`Error::InvalidBulk`]. The offending
    /// traverser stays at the front, so later calls fail the same way.
    #[default]
    Reject,
    /// Treat it as zero occurrences and move on.
    Skip,
}

#[derive(Debug)]
enum ApplyState {
    Unapplied,
    /// Upgradable while the applying future is alive. A dead handle means
    /// that future was dropped before finishing.
    Applying(Weak<()>),
    Applied,
}

/// A traversal program together with its strategies and results.
///
/// Steps are appended through the DSL until the first consuming call
/// (`next`, `has_next`, `to_list`, `iterate` or a stream poll). That call
/// applies the strategies exactly once; afterwards the bytecode is frozen and
/// values are served from the traverser queue.
///
/// A traversal is single pass: once drained it reports done forever.
#[derive(Debug)]
pub struct Traversal {
    bytecode: Bytecode,
    strategies: TraversalStrategies,
    /// `None` until a strategy populates it.
    traversers: Option<VecDeque<Traverser>>,
    state: ApplyState,
    bound: bool,
    bulk_policy: BulkPolicy,
    /// Bytecode as it was before application started.
    /// Restored when application fails or is interrupted.
    snapshot: Option<Bytecode>,
}

impl Traversal {
    /// Create a bound traversal that executes through `strategies`.
    pub fn new(strategies: TraversalStrategies, bytecode: Bytecode) -> Self {
        Self {
            bytecode,
            strategies,
            traversers: None,
            state: ApplyState::Unapplied,
            bound: true,
            bulk_policy: BulkPolicy::default(),
            snapshot: None,
        }
    }

    /// Create an unbound traversal, usable as a nested step argument.
    pub fn anonymous() -> Self {
        Self {
            bound: false,
            ..Self::new(TraversalStrategies::new(), Bytecode::new())
        }
    }

    pub fn with_bulk_policy(mut self, policy: BulkPolicy) -> Self {
        self.bulk_policy = policy;
        self
    }

    pub fn bulk_policy(&self) -> BulkPolicy {
        self.bulk_policy
    }

    /// True when spawned from a traversal source.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn is_anonymous(&self) -> bool {
        !self.bound
    }

    /// True once strategies have been applied successfully.
    pub fn is_applied(&self) -> bool {
        matches!(self.state, ApplyState::Applied)
    }

    pub fn bytecode(&self) -> &Bytecode {
        &self.bytecode
    }

    /// Mutable bytecode for strategies. `None` once the traversal is applied.
    pub fn bytecode_mut(&mut self) -> Option<&mut Bytecode> {
        if self.is_applied() {
            return None;
        }
        Some(&mut self.bytecode)
    }

    pub fn into_bytecode(self) -> Bytecode {
        self.bytecode
    }

    pub fn strategies(&self) -> &TraversalStrategies {
        &self.strategies
    }

    /// Remaining traversers, or `None` if no strategy populated them.
    pub fn traversers(&self) -> Option<&VecDeque<Traverser>> {
        self.traversers.as_ref()
    }

    /// Replace the traverser queue. Intended for strategies.
    pub fn set_traversers(&mut self, traversers: impl IntoIterator<Item = Traverser>) {
        if self.is_applied() {
            warn!("ignoring traversers set on an applied traversal");
            return;
        }
        self.traversers = Some(traversers.into_iter().collect());
    }

    pub(crate) fn append_step(&mut self, name: &str, args: impl Values) {
        if self.is_applied() {
            warn!(step = name, "ignoring step appended to an applied traversal");
            return;
        }
        self.bytecode.push_step(name, args);
    }

    pub(crate) fn append_nested_step(&mut self, name: &str, args: impl Arguments) -> Result<()> {
        if self.is_applied() {
            Bytecode::bind_arguments(name, args)?;
            warn!(step = name, "ignoring step appended to an applied traversal");
            return Ok(());
        }
        self.bytecode.add_step(name, args)?;
        Ok(())
    }

    /// Apply the strategies unless already applied.
    ///
    /// On failure the bytecode snapshot is restored, the queue is cleared and
    /// the traversal returns to the unapplied state, so a later call applies
    /// again. An application whose future was dropped midway is treated the
    /// same way on the next call.
    ///
    /// A consuming call made by a strategy on the traversal it is applying to
    /// fails with [`Error::Reentrant`] and leaves the running application
    /// untouched.
    pub(crate) async fn apply_strategies(&mut self) -> Result<()> {
        match self.state {
            ApplyState::Applied => return Ok(()),
            ApplyState::Applying(ref running) if running.strong_count() > 0 => {
                return Err(Error::Reentrant);
            }
            ApplyState::Applying(_) => {
                warn!("strategy application was interrupted; applying again");
                self.rollback();
            }
            ApplyState::Unapplied => {}
        }

        let strategies = self.strategies.clone();
        let running = Arc::new(());
        self.snapshot = Some(self.bytecode.clone());
        self.state = ApplyState::Applying(Arc::downgrade(&running));
        debug!(
            strategies = strategies.len(),
            steps = self.bytecode.step_instructions().len(),
            "applying strategies"
        );

        let applied = strategies.apply_strategies(self).await;
        drop(running);

        match applied {
            Ok(()) => {
                self.snapshot = None;
                self.state = ApplyState::Applied;
                debug!(
                    traversers = self.traversers.as_ref().map_or(0, VecDeque::len),
                    "strategies applied"
                );
                Ok(())
            }
            Err(err) => {
                self.rollback();
                Err(err)
            }
        }
    }

    fn rollback(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.bytecode = snapshot;
        }
        self.traversers = None;
        self.state = ApplyState::Unapplied;
    }

    /// Front traverser after applying the bulk policy to malformed entries.
    fn front(&mut self) -> Result<Option<&mut Traverser>> {
        let Some(queue) = self.traversers.as_mut() else {
            return Ok(None);
        };
        while let Some(front) = queue.front() {
            if front.bulk > 0 {
                break;
            }
            match self.bulk_policy {
                BulkPolicy::Reject => return Err(Error::InvalidBulk { bulk: front.bulk }),
                BulkPolicy::Skip => {
                    warn!(bulk = front.bulk, "skipping traverser with non-positive bulk");
                    queue.pop_front();
                }
            }
        }
        Ok(queue.front_mut())
    }

    /// Take one logical item from an applied traversal.
    ///
    /// Decrements the front bulk and drops the traverser when it reaches
    /// zero, so `(v, b)` yields `v` exactly `b` times in a row.
    pub(crate) fn pull_one(&mut self) -> Result<Option<Value>> {
        let Some(front) = self.front()? else {
            return Ok(None);
        };
        front.bulk -= 1;
        if front.bulk > 0 {
            return Ok(Some(front.value.clone()));
        }
        let exhausted = self.traversers.as_mut().and_then(VecDeque::pop_front);
        Ok(exhausted.map(|t| t.value))
    }

    /// Next value, or `None` when the traversal is exhausted.
    ///
    /// The first call applies the strategies and propagates their failure.
    pub async fn next(&mut self) -> Result<Option<Value>> {
        self.apply_strategies().await?;
        self.pull_one()
    }

    /// Whether another value is available. Does not consume it.
    pub async fn has_next(&mut self) -> Result<bool> {
        self.apply_strategies().await?;
        Ok(self.front()?.is_some())
    }

    /// Drain all values in order, expanding bulk.
    pub async fn to_list(&mut self) -> Result<Vec<Value>> {
        self.apply_strategies().await?;
        let mut values = Vec::new();
        while let Some(value) = self.pull_one()? {
            values.push(value);
        }
        Ok(values)
    }

    /// Drain all values, discarding them. Used when only side effects matter.
    pub async fn iterate(&mut self) -> Result<&mut Self> {
        self.apply_strategies().await?;
        while self.front()?.is_some() {
            self.traversers.as_mut().and_then(VecDeque::pop_front);
        }
        Ok(self)
    }

    /// Lazy stream over the remaining values.
    pub fn stream(&mut self) -> TraversalStream<'_> {
        TraversalStream::new(self)
    }
}
