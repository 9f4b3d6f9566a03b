//! # cascade
//!
//! Dependency-aware failure simulation for small component systems.
//!
//! A [`FailureSystem`] holds a set of named components, each with a base
//! failure probability, plus a table of conditional dependencies: once a
//! component fails, edges leaving it override the failure probability of
//! the components that depend on it. Evaluating a component runs one
//! stochastic trial against its effective probability.
//!
//! The caller drives everything, from registration to evaluation order to
//! reading results back. The system itself never schedules evaluations and
//! never detects dependency cycles; at most one override applies per trial,
//! taken from the first-inserted edge whose source has failed.
//!
//! ## Determinism
//!
//! Randomness is injected through the [`RandomProvider`] trait, so the same
//! seed replays the same run:
//!
//! - [`SeededRandomProvider`]: ChaCha8-seeded, reproducible
//! - [`ThreadRandomProvider`]: thread-local entropy for production
//! - [`ScriptedRandomProvider`]: explicit draw sequence for tests
//!
//! ## Quick Start
//!
//! ```rust
//! use cascade::FailureSystem;
//!
//! let mut system = FailureSystem::seeded(42);
//! system.register_component("PowerSupply", 0.05)?;
//! system.register_component("Disk", 0.03)?;
//! system.register_component("RAM", 0.02)?;
//!
//! // If the power supply fails, the disk is very likely to follow.
//! system.register_dependency("PowerSupply", "Disk", 0.8)?;
//! system.register_dependency("PowerSupply", "RAM", 0.7)?;
//!
//! for name in ["PowerSupply", "Disk", "RAM"] {
//!     if system.evaluate_failure(name)? {
//!         println!("component {name} has failed");
//!     }
//! }
//!
//! let state = system.get_state();
//! system.reset();
//! # let _ = state;
//! # Ok::<(), cascade::SimulationError>(())
//! ```
//!
//! Scenarios can also be loaded from data via [`SystemTopology`].

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

mod error;
mod random;
mod system;
mod topology;

pub use error::{SimulationError, SimulationResult};
pub use random::{
    RandomProvider, ScriptedRandomProvider, SeededRandomProvider, ThreadRandomProvider,
};
pub use system::{Component, FailureSystem};
pub use topology::{ComponentSpec, DependencySpec, SystemTopology};
