//! Pairwise methodology compatibility.

use crate::{Compatibility, MethodKey};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Decides whether two methodologies may share a session
pub trait CompatibilityOracle: Send + Sync {
    fn check(&self, a: &MethodKey, b: &MethodKey) -> Compatibility;
}

impl<F> CompatibilityOracle for F
where
    F: Fn(&MethodKey, &MethodKey) -> Compatibility + Send + Sync,
{
    fn check(&self, a: &MethodKey, b: &MethodKey) -> Compatibility {
        self(a, b)
    }
}

/// One row of the incompatibility table
#[derive(Clone, Debug)]
pub struct Incompatibility {
    pub incompatible_with: Vec<&'static str>,
    pub reason: &'static str,
}

/// Symmetric lookup over a fixed table keyed by canonical method key
#[derive(Clone, Debug)]
pub struct IncompatibilityTable {
    rows: HashMap<&'static str, Incompatibility>,
}

static DEFAULT_TABLE: Lazy<IncompatibilityTable> = Lazy::new(IncompatibilityTable::build_default);

impl Default for IncompatibilityTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

impl IncompatibilityTable {
    fn build_default() -> Self {
        let rows = [
            (
                "drop_set",
                vec!["rest_pause", "gvt", "cluster", "myo_reps"],
                "Too much combined metabolic stress, overtraining risk",
            ),
            (
                "rest_pause",
                vec!["drop_set", "gvt", "myo_reps", "amrap"],
                "Both go to failure, too much CNS stress",
            ),
            (
                "gvt",
                vec!["drop_set", "rest_pause", "tri_set", "giant_set", "cluster"],
                "GVT is already maximal volume",
            ),
            (
                "cluster",
                vec!["drop_set", "gvt", "myo_reps"],
                "Cluster sets target strength and power, not metabolic work",
            ),
            (
                "contrast_training",
                vec!["gvt", "circuit", "amrap", "tabata"],
                "Potentiation needs a fresh CNS, not prior metabolic work",
            ),
            (
                "tabata",
                vec!["amrap", "gvt", "rsa_repeated_sprint"],
                "Two HIIT protocols in one session means overreaching",
            ),
            (
                "rsa_repeated_sprint",
                vec!["tabata", "amrap", "heavy_bag_intervals"],
                "Repeated sprints plus other HIIT is too much cardiovascular stress",
            ),
            (
                "heavy_bag_intervals",
                vec!["rsa_repeated_sprint", "tabata", "fast_break_conditioning"],
                "Do not combine two interval protocols in one session",
            ),
        ];

        let rows = rows
            .into_iter()
            .map(|(key, incompatible_with, reason)| {
                (
                    key,
                    Incompatibility {
                        incompatible_with,
                        reason,
                    },
                )
            })
            .collect();

        Self { rows }
    }
}

impl CompatibilityOracle for IncompatibilityTable {
    fn check(&self, a: &MethodKey, b: &MethodKey) -> Compatibility {
        let row_a = self.rows.get(a.as_str());
        let row_b = self.rows.get(b.as_str());

        let conflict = row_a.is_some_and(|r| r.incompatible_with.contains(&b.as_str()))
            || row_b.is_some_and(|r| r.incompatible_with.contains(&a.as_str()));

        if !conflict {
            return Compatibility::compatible();
        }

        let reason = row_a
            .or(row_b)
            .map(|r| r.reason)
            .unwrap_or("General incompatibility");
        Compatibility::incompatible(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incompatible_pair_is_symmetric() {
        let table = IncompatibilityTable::default();

        let ab = table.check(&MethodKey::DropSet, &MethodKey::RestPause);
        let ba = table.check(&MethodKey::RestPause, &MethodKey::DropSet);

        assert!(!ab.compatible);
        assert!(!ba.compatible);
        assert!(!ab.reason.is_empty());
    }

    #[test]
    fn test_one_sided_row_still_conflicts() {
        let table = IncompatibilityTable::default();

        // Only the contrast_training row lists circuit
        let result = table.check(&MethodKey::Circuit, &MethodKey::ContrastTraining);
        assert!(!result.compatible);
        assert_eq!(
            result.reason,
            "Potentiation needs a fresh CNS, not prior metabolic work"
        );
    }

    #[test]
    fn test_unlisted_pair_is_compatible() {
        let table = IncompatibilityTable::default();

        assert!(table.check(&MethodKey::Superset, &MethodKey::DropSet).compatible);
        assert!(table
            .check(&MethodKey::Other("amrap".into()), &MethodKey::Superset)
            .compatible);
    }

    #[test]
    fn test_aliases_resolve_to_rows() {
        let table = IncompatibilityTable::default();
        let gvt = MethodKey::parse("german_volume_training");
        let cluster = MethodKey::parse("cluster_set");

        assert!(!table.check(&gvt, &cluster).compatible);
    }
}
