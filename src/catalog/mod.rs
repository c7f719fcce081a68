//! Scenario data model and the built-in practice catalog.
//!
//! A [`Scenario`] is immutable once selected. Scenarios come either from
//! the built-in catalog or from a model generation call; generated JSON is
//! never trusted as-is and passes through [`Scenario::from_completion`]
//! exactly once at the boundary.

mod builtins;

pub use builtins::builtin_catalog;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::StakeholderRole;

/// A named practice situation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub brief_description: String,
    pub hidden_details: HiddenDetails,
}

/// Knowledge the persona reveals only when asked good questions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HiddenDetails {
    pub current_process: ProcessSnapshot,
    pub data_landscape: DataLandscape,
    pub stakeholder_concerns: StakeholderConcerns,
    pub guardrails_needed: Vec<String>,
    pub success_metrics: SuccessMetrics,
    pub adoption_challenges: Vec<String>,
}

/// Current manual process: steps, pain points, and scale
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessSnapshot {
    pub steps: Vec<String>,
    pub pain_points: Vec<String>,
    pub volume: String,
}

/// Data sources and their quality issues
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataLandscape {
    pub sources: Vec<String>,
    pub quality_issues: Vec<String>,
}

/// Worries and hopes, recorded per role
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StakeholderConcerns {
    pub agent_owner: Concerns,
    pub business_owner: Concerns,
}

/// One role's worries and hopes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Concerns {
    pub worries: String,
    pub hopes: String,
}

/// Baseline and target metric pairs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessMetrics {
    pub baseline: BTreeMap<String, Value>,
    pub targets: BTreeMap<String, Value>,
}

impl Scenario {
    /// Normalize a model-generated completion into a usable scenario.
    ///
    /// Defensive by design: an array reply is reduced to its first object
    /// element, any non-object reply becomes an empty record, and absent
    /// name/description fields are filled with defaults. Returns `None`
    /// only when the completion is not parseable JSON at all or the
    /// hidden-details shape is unusable; the caller falls back to a
    /// catalog scenario in that case.
    pub fn from_completion(completion: &str) -> Option<Scenario> {
        let value: Value = serde_json::from_str(completion).ok()?;

        let value = match value {
            Value::Array(items) => match items.into_iter().next() {
                Some(first) if first.is_object() => first,
                _ => Value::Object(Default::default()),
            },
            Value::Object(_) => value,
            _ => Value::Object(Default::default()),
        };

        let mut scenario: Scenario = serde_json::from_value(value).ok()?;

        if scenario.id.is_empty() {
            scenario.id = "generated".to_string();
        }
        if scenario.name.is_empty() {
            scenario.name = "Generated Scenario".to_string();
        }
        if scenario.brief_description.is_empty() {
            scenario.brief_description = "A dynamically generated practice scenario".to_string();
        }

        Some(scenario)
    }

    /// Visible portion of the scenario (name and description)
    pub fn brief(&self) -> String {
        format!("{}\n\n{}", self.name, self.brief_description)
    }
}

impl StakeholderConcerns {
    /// Concerns for the given role
    pub fn for_role(&self, role: StakeholderRole) -> &Concerns {
        match role {
            StakeholderRole::AgentOwner => &self.agent_owner,
            StakeholderRole::BusinessOwner => &self.business_owner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_completion_object() {
        let scenario = Scenario::from_completion(
            r#"{"name": "Claims Agent", "brief_description": "Processes claims end-to-end.",
                "hidden_details": {"guardrails_needed": ["Human approval for payouts"]}}"#,
        )
        .unwrap();

        assert_eq!(scenario.name, "Claims Agent");
        assert_eq!(
            scenario.hidden_details.guardrails_needed,
            vec!["Human approval for payouts"]
        );
    }

    #[test]
    fn test_from_completion_array_reduced_to_first_object() {
        let scenario =
            Scenario::from_completion(r#"[{"name": "First"}, {"name": "Second"}]"#).unwrap();

        assert_eq!(scenario.name, "First");
        assert_eq!(
            scenario.brief_description,
            "A dynamically generated practice scenario"
        );
        assert!(scenario.hidden_details.guardrails_needed.is_empty());
    }

    #[test]
    fn test_from_completion_non_object_becomes_defaults() {
        let scenario = Scenario::from_completion(r#""just a string""#).unwrap();

        assert_eq!(scenario.name, "Generated Scenario");
        assert_eq!(scenario.id, "generated");
    }

    #[test]
    fn test_from_completion_array_of_non_objects_becomes_defaults() {
        let scenario = Scenario::from_completion(r#"[1, 2, 3]"#).unwrap();
        assert_eq!(scenario.name, "Generated Scenario");
    }

    #[test]
    fn test_from_completion_malformed_json_is_none() {
        assert!(Scenario::from_completion("not json at all").is_none());
    }

    #[test]
    fn test_concerns_for_role() {
        let concerns = StakeholderConcerns {
            agent_owner: Concerns {
                worries: "adoption".to_string(),
                hopes: "less toil".to_string(),
            },
            business_owner: Concerns {
                worries: "cost".to_string(),
                hopes: "savings".to_string(),
            },
        };

        assert_eq!(
            concerns.for_role(StakeholderRole::AgentOwner).worries,
            "adoption"
        );
        assert_eq!(
            concerns.for_role(StakeholderRole::BusinessOwner).hopes,
            "savings"
        );
    }

    #[test]
    fn test_builtin_catalog_is_complete() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.len(), 5);

        for scenario in catalog {
            assert!(!scenario.id.is_empty());
            assert!(!scenario.name.is_empty());
            assert!(!scenario.brief_description.is_empty());
            assert!(!scenario.hidden_details.guardrails_needed.is_empty());
            assert!(!scenario.hidden_details.success_metrics.baseline.is_empty());
        }
    }
}
