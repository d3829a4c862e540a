//! Built-in catalog of training methodologies.
//!
//! Each entry carries the attributes the rule-based scorer needs. Catalog
//! order is significant: it breaks ties between equally scored entries.

use crate::{ExperienceLevel, MethodKey};
use once_cell::sync::Lazy;

/// Recovery demand of a methodology
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryCost {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RecoveryCost {
    /// High or very high
    pub fn is_demanding(self) -> bool {
        matches!(self, RecoveryCost::High | RecoveryCost::VeryHigh)
    }
}

/// Scoring attributes of one methodology
#[derive(Clone, Debug)]
pub struct MethodProfile {
    pub key: MethodKey,
    pub name: &'static str,
    pub best_for: &'static [&'static str],
    pub phases: &'static [&'static str],
    pub avoid_phases: &'static [&'static str],
    pub min_experience: ExperienceLevel,
    pub min_rpe_tolerance: f64,
    pub recovery_cost: RecoveryCost,
    /// Fraction of session time saved, if any
    pub time_saving: Option<f64>,
    /// Sports this methodology is specific to; empty means general
    pub sports: &'static [&'static str],
    pub contraindications: &'static [&'static str],
    pub high_cardio: bool,
}

impl MethodProfile {
    pub fn is_sport_specific(&self) -> bool {
        !self.sports.is_empty()
    }

    pub fn matches_phase(&self, phase: &str) -> bool {
        self.phases.contains(&phase)
    }

    pub fn avoids_phase(&self, phase: &str) -> bool {
        self.avoid_phases.contains(&phase)
    }
}

/// The methodology catalog
#[derive(Clone, Debug)]
pub struct MethodCatalog {
    pub methods: Vec<MethodProfile>,
}

impl MethodCatalog {
    pub fn get(&self, key: &MethodKey) -> Option<&MethodProfile> {
        self.methods.iter().find(|m| &m.key == key)
    }
}

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<MethodCatalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static MethodCatalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference.
pub fn build_default_catalog() -> MethodCatalog {
    use ExperienceLevel::*;
    use RecoveryCost::*;

    let methods = vec![
        MethodProfile {
            key: MethodKey::DropSet,
            name: "Drop Set",
            best_for: &["hypertrophy", "muscle_endurance"],
            phases: &["accumulation", "intensification"],
            avoid_phases: &["deload", "peaking"],
            min_experience: Intermediate,
            min_rpe_tolerance: 8.0,
            recovery_cost: High,
            time_saving: None,
            sports: &[],
            contraindications: &["high_fatigue", "joint_pain", "beginner"],
            high_cardio: false,
        },
        MethodProfile {
            key: MethodKey::Superset,
            name: "Superset",
            best_for: &["hypertrophy", "conditioning", "time_efficiency"],
            phases: &["accumulation", "intensification", "maintenance"],
            avoid_phases: &["peaking"],
            min_experience: Beginner,
            min_rpe_tolerance: 6.0,
            recovery_cost: Medium,
            time_saving: Some(0.3),
            sports: &[],
            contraindications: &["cardiovascular_issues", "very_high_fatigue"],
            high_cardio: false,
        },
        MethodProfile {
            key: MethodKey::GiantSet,
            name: "Giant Set",
            best_for: &["hypertrophy", "conditioning", "muscle_endurance"],
            phases: &["accumulation"],
            avoid_phases: &["deload", "peaking", "intensification"],
            min_experience: Advanced,
            min_rpe_tolerance: 9.0,
            recovery_cost: VeryHigh,
            time_saving: None,
            sports: &[],
            contraindications: &["beginner", "intermediate", "high_fatigue"],
            high_cardio: false,
        },
        MethodProfile {
            key: MethodKey::RestPause,
            name: "Rest-Pause",
            best_for: &["strength", "hypertrophy"],
            phases: &["intensification"],
            avoid_phases: &["deload", "accumulation"],
            min_experience: Intermediate,
            min_rpe_tolerance: 9.0,
            recovery_cost: VeryHigh,
            time_saving: None,
            sports: &[],
            contraindications: &["beginner", "joint_issues", "high_fatigue"],
            high_cardio: false,
        },
        MethodProfile {
            key: MethodKey::Cluster,
            name: "Cluster Set",
            best_for: &["strength", "power"],
            phases: &["intensification", "peaking"],
            avoid_phases: &["accumulation", "deload"],
            min_experience: Advanced,
            min_rpe_tolerance: 8.0,
            recovery_cost: High,
            time_saving: None,
            sports: &[],
            contraindications: &["beginner", "intermediate", "technique_issues"],
            high_cardio: false,
        },
        MethodProfile {
            key: MethodKey::MyoReps,
            name: "Myo-Reps",
            best_for: &["hypertrophy", "time_efficiency"],
            phases: &["accumulation", "intensification"],
            avoid_phases: &["deload"],
            min_experience: Intermediate,
            min_rpe_tolerance: 8.0,
            recovery_cost: Medium,
            time_saving: Some(0.4),
            sports: &[],
            contraindications: &["beginner", "compound_exercises"],
            high_cardio: false,
        },
        MethodProfile {
            key: MethodKey::Circuit,
            name: "Circuit Training",
            best_for: &["conditioning", "fat_loss", "time_efficiency", "muscle_endurance"],
            phases: &["accumulation", "maintenance"],
            avoid_phases: &["peaking"],
            min_experience: Beginner,
            min_rpe_tolerance: 7.0,
            recovery_cost: Medium,
            time_saving: Some(0.5),
            sports: &[],
            contraindications: &["cardiovascular_issues", "very_high_fatigue"],
            high_cardio: true,
        },
        MethodProfile {
            key: MethodKey::Emom,
            name: "EMOM (Every Minute On the Minute)",
            best_for: &["conditioning", "power_endurance", "technique"],
            phases: &["accumulation", "intensification", "maintenance"],
            avoid_phases: &["deload"],
            min_experience: Beginner,
            min_rpe_tolerance: 6.0,
            recovery_cost: Medium,
            time_saving: None,
            sports: &[],
            contraindications: &["very_deconditioned"],
            high_cardio: false,
        },
        MethodProfile {
            key: MethodKey::Tabata,
            name: "Tabata Protocol",
            best_for: &["conditioning", "fat_loss", "vo2max"],
            phases: &["accumulation", "intensification"],
            avoid_phases: &["deload"],
            min_experience: Intermediate,
            min_rpe_tolerance: 9.0,
            recovery_cost: High,
            time_saving: None,
            sports: &[],
            contraindications: &["beginner", "cardiovascular_issues", "joint_issues"],
            high_cardio: false,
        },
        MethodProfile {
            key: MethodKey::TempoTraining,
            name: "Tempo Training",
            best_for: &["hypertrophy", "technique", "muscle_control"],
            phases: &["accumulation", "intensification", "rehabilitation"],
            avoid_phases: &[],
            min_experience: Beginner,
            min_rpe_tolerance: 6.0,
            recovery_cost: Medium,
            time_saving: None,
            sports: &[],
            contraindications: &[],
            high_cardio: false,
        },
        MethodProfile {
            key: MethodKey::ContrastTraining,
            name: "Contrast Training",
            best_for: &["power", "sport_performance", "explosiveness"],
            phases: &["intensification", "peaking"],
            avoid_phases: &["accumulation", "deload"],
            min_experience: Advanced,
            min_rpe_tolerance: 7.0,
            recovery_cost: High,
            time_saving: None,
            sports: &[],
            contraindications: &["beginner", "intermediate", "technique_issues", "fatigue"],
            high_cardio: false,
        },
        MethodProfile {
            key: MethodKey::Gvt,
            name: "German Volume Training",
            best_for: &["hypertrophy", "volume_accumulation"],
            phases: &["accumulation"],
            avoid_phases: &["intensification", "peaking", "deload"],
            min_experience: Intermediate,
            min_rpe_tolerance: 8.0,
            recovery_cost: VeryHigh,
            time_saving: None,
            sports: &["gym", "bodybuilding"],
            contraindications: &["beginner", "time_limited", "high_fatigue"],
            high_cardio: false,
        },
        MethodProfile {
            key: MethodKey::BoxingCircuit,
            name: "Boxing Circuit",
            best_for: &["conditioning", "sport_specific", "endurance"],
            phases: &["accumulation", "intensification", "fight_camp"],
            avoid_phases: &["deload"],
            min_experience: Beginner,
            min_rpe_tolerance: 7.0,
            recovery_cost: High,
            time_saving: None,
            sports: &["boxing", "mma"],
            contraindications: &["shoulder_issues", "wrist_issues"],
            high_cardio: false,
        },
        MethodProfile {
            key: MethodKey::HeavyBagIntervals,
            name: "Heavy Bag Intervals",
            best_for: &["power_endurance", "conditioning", "technique"],
            phases: &["accumulation", "intensification", "fight_camp"],
            avoid_phases: &["deload"],
            min_experience: Beginner,
            min_rpe_tolerance: 7.0,
            recovery_cost: Medium,
            time_saving: None,
            sports: &["boxing", "mma", "kickboxing"],
            contraindications: &["hand_injury", "shoulder_issues"],
            high_cardio: false,
        },
        MethodProfile {
            key: MethodKey::ShadowBoxingDrills,
            name: "Shadow Boxing Drills",
            best_for: &["technique", "conditioning", "warm_up"],
            phases: &[
                "accumulation",
                "intensification",
                "fight_camp",
                "deload",
                "maintenance",
            ],
            avoid_phases: &[],
            min_experience: Beginner,
            min_rpe_tolerance: 4.0,
            recovery_cost: Low,
            time_saving: None,
            sports: &["boxing", "mma", "kickboxing"],
            contraindications: &[],
            high_cardio: false,
        },
        MethodProfile {
            key: MethodKey::PunchResistanceTraining,
            name: "Punch Resistance Training",
            best_for: &["power", "rotational_strength", "punch_power"],
            phases: &["accumulation", "intensification"],
            avoid_phases: &["fight_week", "deload"],
            min_experience: Intermediate,
            min_rpe_tolerance: 7.0,
            recovery_cost: Medium,
            time_saving: None,
            sports: &["boxing", "mma"],
            contraindications: &["shoulder_issues", "core_weakness"],
            high_cardio: false,
        },
    ];

    MethodCatalog { methods }
}

impl MethodCatalog {
    /// Validate the catalog for internal consistency
    ///
    /// Returns a list of validation errors, or an empty vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (i, method) in self.methods.iter().enumerate() {
            if self.methods[..i].iter().any(|m| m.key == method.key) {
                errors.push(format!("Duplicate methodology key '{}'", method.key));
            }

            if let MethodKey::Other(raw) = &method.key {
                errors.push(format!("Methodology '{}' has no known key", raw));
            }

            if let Some(saving) = method.time_saving {
                if !(0.0..=1.0).contains(&saving) {
                    errors.push(format!(
                        "Methodology '{}' has time saving {} outside [0, 1]",
                        method.key, saving
                    ));
                }
            }

            if let Some(phase) = method
                .phases
                .iter()
                .find(|p| method.avoid_phases.contains(p))
            {
                errors.push(format!(
                    "Methodology '{}' both targets and avoids phase '{}'",
                    method.key, phase
                ));
            }
        }

        errors
    }
}
