//! Component registry, dependency table, and the failure evaluation rule.
//!
//! [`FailureSystem`] owns two insertion-ordered tables: the component
//! registry (name to failure flag + base probability) and the conditional
//! dependency table (directed edge to override probability). A single
//! evaluation runs one stochastic trial for one component, using the first
//! matching failed predecessor's override if there is one.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{SimulationError, SimulationResult};
use crate::random::{RandomProvider, SeededRandomProvider};

/// A registered component: its failure flag and base failure probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Whether the component has failed in the current run.
    pub failed: bool,
    /// Failure probability used when no failed predecessor overrides it.
    pub base_failure_probability: f64,
}

impl Component {
    fn healthy(base_failure_probability: f64) -> Self {
        Self {
            failed: false,
            base_failure_probability,
        }
    }
}

/// Dependency-aware failure simulator over a set of named components.
///
/// Each component starts healthy and carries a base failure probability.
/// A dependency edge `(source, destination)` overrides the destination's
/// effective probability once the source has failed. Evaluation order is
/// the caller's responsibility; the system only runs one trial at a time.
///
/// Both tables preserve insertion order. When several edges target the
/// same destination, the first-inserted edge whose source has failed wins
/// and later edges are not considered.
///
/// The random source is injected at construction, so a seeded provider
/// makes every run reproducible.
///
/// # Example
///
/// ```rust
/// use cascade::FailureSystem;
///
/// let mut system = FailureSystem::seeded(42);
/// system.register_component("PowerSupply", 0.05)?;
/// system.register_component("Disk", 0.03)?;
/// system.register_dependency("PowerSupply", "Disk", 0.8)?;
///
/// system.evaluate_failure("PowerSupply")?;
/// system.evaluate_failure("Disk")?;
/// # Ok::<(), cascade::SimulationError>(())
/// ```
pub struct FailureSystem<R: RandomProvider> {
    components: IndexMap<String, Component>,
    dependencies: IndexMap<(String, String), f64>,
    random: R,
}

impl<R: RandomProvider> FailureSystem<R> {
    /// Create an empty system using the given random provider.
    pub fn new(random: R) -> Self {
        Self {
            components: IndexMap::new(),
            dependencies: IndexMap::new(),
            random,
        }
    }

    /// Register a component with its base failure probability.
    ///
    /// Inserting an existing name overwrites it: the failure flag resets to
    /// healthy and the base probability is replaced. Fails with
    /// [`SimulationError::InvalidProbability`] when the probability is
    /// outside [0.0, 1.0], leaving the registry unchanged.
    pub fn register_component(
        &mut self,
        name: impl Into<String>,
        base_failure_probability: f64,
    ) -> SimulationResult<()> {
        validate_probability(base_failure_probability)?;
        let name = name.into();
        tracing::debug!(
            "registered component {} with base probability {}",
            name,
            base_failure_probability
        );
        self.components
            .insert(name, Component::healthy(base_failure_probability));
        Ok(())
    }

    /// Register a dependency edge from `source` to `destination`.
    ///
    /// Once `source` has failed, `conditional_probability` replaces the
    /// destination's base probability in evaluations. Re-registering the
    /// same pair overwrites the probability but keeps the edge's original
    /// position in the scan order. Fails with
    /// [`SimulationError::InvalidProbability`] when the probability is
    /// outside [0.0, 1.0], leaving the table unchanged. Endpoint names are
    /// not checked here; a missing endpoint surfaces at evaluation time.
    pub fn register_dependency(
        &mut self,
        source: impl Into<String>,
        destination: impl Into<String>,
        conditional_probability: f64,
    ) -> SimulationResult<()> {
        validate_probability(conditional_probability)?;
        let source = source.into();
        let destination = destination.into();
        tracing::debug!(
            "registered dependency {} -> {} with conditional probability {}",
            source,
            destination,
            conditional_probability
        );
        self.dependencies
            .insert((source, destination), conditional_probability);
        Ok(())
    }

    /// Run one failure trial for the named component.
    ///
    /// The effective probability is the component's base probability,
    /// unless an edge targeting it from an already-failed source exists:
    /// the first such edge in insertion order supplies the override and the
    /// scan stops. One uniform draw in [0.0, 1.0) decides the trial; on
    /// failure the component's flag is set and `Ok(true)` returned. A
    /// surviving trial leaves the flag untouched, so a component that
    /// failed earlier stays failed even when a later trial survives.
    ///
    /// Fails with [`SimulationError::UnknownComponent`] when `name` is not
    /// registered, or when the scan reads the state of an edge source that
    /// is not registered.
    pub fn evaluate_failure(&mut self, name: &str) -> SimulationResult<bool> {
        let base = self
            .components
            .get(name)
            .ok_or_else(|| SimulationError::UnknownComponent(name.to_string()))?
            .base_failure_probability;

        let mut probability = base;
        for ((source, destination), conditional) in &self.dependencies {
            if destination != name {
                continue;
            }
            let predecessor = self
                .components
                .get(source)
                .ok_or_else(|| SimulationError::UnknownComponent(source.clone()))?;
            if predecessor.failed {
                tracing::debug!(
                    "evaluating {}: predecessor {} failed, probability {} -> {}",
                    name,
                    source,
                    base,
                    conditional
                );
                probability = *conditional;
                break;
            }
        }

        let draw = self.random.random_ratio();
        tracing::trace!(
            "evaluating {}: draw {} against probability {}",
            name,
            draw,
            probability
        );
        if draw < probability {
            if let Some(component) = self.components.get_mut(name) {
                component.failed = true;
            }
            tracing::debug!("component {} failed", name);
            return Ok(true);
        }
        Ok(false)
    }

    /// Reset every component to healthy.
    ///
    /// The dependency table is untouched. No-op on an empty registry.
    pub fn reset(&mut self) {
        for component in self.components.values_mut() {
            component.failed = false;
        }
        tracing::debug!("reset {} components to healthy", self.components.len());
    }

    /// Snapshot of every component's failure flag.
    ///
    /// Returns a copy, not a live view: later mutations do not show up in
    /// a snapshot taken earlier.
    pub fn get_state(&self) -> HashMap<String, bool> {
        self.components
            .iter()
            .map(|(name, component)| (name.clone(), component.failed))
            .collect()
    }

    /// Failure flag of a single component, or `None` if unregistered.
    pub fn is_failed(&self, name: &str) -> Option<bool> {
        self.components.get(name).map(|component| component.failed)
    }

    /// Look up a registered component.
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    /// Number of registered components.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Number of registered dependency edges.
    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }
}

impl FailureSystem<SeededRandomProvider> {
    /// Create an empty system with a seeded deterministic random source.
    ///
    /// The same seed and the same call sequence always produce the same
    /// failure outcomes.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SeededRandomProvider::new(seed))
    }
}

impl<R: RandomProvider + Default> Default for FailureSystem<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

fn validate_probability(value: f64) -> SimulationResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimulationError::InvalidProbability { value })
    }
}
