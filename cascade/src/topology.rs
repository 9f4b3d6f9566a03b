//! Serde-backed scenario definition.
//!
//! A [`SystemTopology`] describes a simulation scenario (components and
//! dependency edges) as plain data, so scenarios can live in JSON files or
//! test fixtures instead of imperative registration code. Loading a
//! topology performs the same registrations, with the same validation, as
//! the individual calls would.

use serde::{Deserialize, Serialize};

use crate::error::SimulationResult;
use crate::random::RandomProvider;
use crate::system::FailureSystem;

/// A component declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// Unique component name.
    pub name: String,
    /// Failure probability when no failed predecessor overrides it.
    pub base_failure_probability: f64,
}

/// A directed dependency edge declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencySpec {
    /// Component whose failure triggers the override.
    pub source: String,
    /// Component whose effective probability is overridden.
    pub destination: String,
    /// Probability used for `destination` once `source` has failed.
    pub conditional_probability: f64,
}

/// A complete scenario: components plus dependency edges.
///
/// Declaration order matters for dependencies: it becomes the scan order
/// that decides which edge wins when several failed predecessors target
/// the same component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemTopology {
    /// Components, registered in declaration order.
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
    /// Dependency edges, registered in declaration order after components.
    #[serde(default)]
    pub dependencies: Vec<DependencySpec>,
}

impl SystemTopology {
    /// Decode a topology from JSON.
    pub fn from_json(json: &str) -> SimulationResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode this topology as JSON.
    pub fn to_json(&self) -> SimulationResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<R: RandomProvider> FailureSystem<R> {
    /// Register every component and edge from `topology`, in declaration
    /// order.
    ///
    /// Validation matches the individual registration calls. Loading is not
    /// transactional: entries registered before a failing entry stay
    /// registered.
    pub fn load_topology(&mut self, topology: &SystemTopology) -> SimulationResult<()> {
        for component in &topology.components {
            self.register_component(component.name.clone(), component.base_failure_probability)?;
        }
        for dependency in &topology.dependencies {
            self.register_dependency(
                dependency.source.clone(),
                dependency.destination.clone(),
                dependency.conditional_probability,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimulationError;
    use crate::random::ScriptedRandomProvider;

    fn hardware_topology() -> SystemTopology {
        SystemTopology {
            components: vec![
                ComponentSpec {
                    name: "PowerSupply".to_string(),
                    base_failure_probability: 0.05,
                },
                ComponentSpec {
                    name: "Disk".to_string(),
                    base_failure_probability: 0.03,
                },
            ],
            dependencies: vec![DependencySpec {
                source: "PowerSupply".to_string(),
                destination: "Disk".to_string(),
                conditional_probability: 0.8,
            }],
        }
    }

    #[test]
    fn test_load_topology_registers_everything() {
        let mut system = FailureSystem::new(ScriptedRandomProvider::new([0.0, 0.5]));
        system.load_topology(&hardware_topology()).unwrap();

        assert_eq!(system.component_count(), 2);
        assert_eq!(system.dependency_count(), 1);
        assert_eq!(
            system.component("Disk").unwrap().base_failure_probability,
            0.03
        );

        // The loaded edge behaves like a manually registered one.
        assert!(system.evaluate_failure("PowerSupply").unwrap());
        assert!(system.evaluate_failure("Disk").unwrap());
    }

    #[test]
    fn test_load_topology_is_not_transactional() {
        let mut topology = hardware_topology();
        topology.dependencies.push(DependencySpec {
            source: "Disk".to_string(),
            destination: "PowerSupply".to_string(),
            conditional_probability: 1.5,
        });

        let mut system = FailureSystem::new(ScriptedRandomProvider::new([]));
        assert!(matches!(
            system.load_topology(&topology),
            Err(SimulationError::InvalidProbability { .. })
        ));

        // Entries before the invalid one are already registered.
        assert_eq!(system.component_count(), 2);
        assert_eq!(system.dependency_count(), 1);
    }

    #[test]
    fn test_from_json() {
        let topology = SystemTopology::from_json(
            r#"{
                "components": [
                    {"name": "PowerSupply", "base_failure_probability": 0.05}
                ],
                "dependencies": [
                    {
                        "source": "PowerSupply",
                        "destination": "Disk",
                        "conditional_probability": 0.8
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(topology.components.len(), 1);
        assert_eq!(topology.components[0].name, "PowerSupply");
        assert_eq!(topology.dependencies[0].conditional_probability, 0.8);
    }

    #[test]
    fn test_from_json_defaults_missing_sections() {
        let topology = SystemTopology::from_json("{}").unwrap();
        assert!(topology.components.is_empty());
        assert!(topology.dependencies.is_empty());
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        assert!(matches!(
            SystemTopology::from_json("{not json"),
            Err(SimulationError::TopologyCodec(_))
        ));
    }

    #[test]
    fn test_to_json_is_loadable() {
        let topology = hardware_topology();
        let decoded = SystemTopology::from_json(&topology.to_json().unwrap()).unwrap();
        assert_eq!(decoded, topology);
    }
}
