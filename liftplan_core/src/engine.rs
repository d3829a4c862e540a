//! Methodology engine.
//!
//! Ranks methodologies for an athlete, narrows the ranking with the context
//! filters and rewrites the main exercises of a workout with at most two
//! structural patterns:
//!
//! 1. Score candidates and run the filter chain
//! 2. Classify main exercises; too few means nothing to structure
//! 3. Apply the top candidate's structure
//! 4. Optionally add a secondary drop set or tempo prescription
//!
//! Every failure degrades to leaving the workout untouched.

use crate::filters::apply_context_filters;
use crate::transform::Structure;
use crate::{
    classify_main, CompatibilityOracle, Config, IncompatibilityTable, MethodKey,
    MethodologyCandidate, MethodologyScorer, Profile, Result, RuleBasedScorer, SelectorParams,
    Workout,
};

/// Scorer, oracle and tunables for one engine instance
pub struct MethodEngine {
    config: Config,
    scorer: Box<dyn MethodologyScorer>,
    oracle: Option<Box<dyn CompatibilityOracle>>,
}

impl Default for MethodEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl MethodEngine {
    /// Engine with the built-in scorer and incompatibility table
    pub fn new(config: Config) -> Self {
        Self {
            config,
            scorer: Box::new(RuleBasedScorer::default()),
            oracle: Some(Box::new(IncompatibilityTable::default())),
        }
    }

    pub fn with_scorer(mut self, scorer: impl MethodologyScorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    pub fn with_oracle(mut self, oracle: impl CompatibilityOracle + 'static) -> Self {
        self.oracle = Some(Box::new(oracle));
        self
    }

    /// Disable the compatibility veto
    pub fn without_oracle(mut self) -> Self {
        self.oracle = None;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn selector_params(&self, profile: &Profile) -> SelectorParams {
        SelectorParams::from_profile(profile, &self.config.selector)
    }

    /// Filtered candidate ranking for a profile
    ///
    /// Scorer errors are returned as-is; [`MethodEngine::apply`] swallows them.
    pub fn rank(&self, profile: &Profile) -> Result<Vec<MethodologyCandidate>> {
        let params = self.selector_params(profile);
        let candidates = self.scorer.score(&params)?;

        Ok(apply_context_filters(
            candidates,
            &params,
            &self.config.filters,
            self.oracle.as_deref(),
        ))
    }

    /// Restructure `workout` in place and return the methodologies applied
    ///
    /// `methodsApplied` is only written when at least one structure changed
    /// the workout.
    pub fn apply(&self, workout: &mut Workout, profile: &Profile) -> Vec<MethodKey> {
        let candidates = match self.rank(profile) {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!("Methodology scorer unavailable, workout left unchanged: {}", e);
                return Vec::new();
            }
        };

        let Some(primary) = candidates.first() else {
            tracing::info!("No methodology candidates survived filtering");
            return Vec::new();
        };

        let main = classify_main(&workout.exercises);
        if main.len() < self.config.engine.min_main_exercises {
            tracing::info!(
                "Only {} main exercises (need {}), skipping methodologies",
                main.len(),
                self.config.engine.min_main_exercises
            );
            return Vec::new();
        }

        let mut applied = Vec::new();

        let structure = Structure::for_key(&primary.key);
        if structure.apply(&mut workout.exercises, &main) {
            tracing::info!(
                "Applied {} (score {:.1}): {}",
                primary.key,
                primary.score,
                primary.reason
            );
            applied.push(structure.applied_key());
        } else {
            tracing::debug!("{} found nothing to restructure", primary.key);
        }

        if let Some(secondary) = self.secondary_structure(&candidates, &applied) {
            if secondary.apply(&mut workout.exercises, &main) {
                tracing::info!("Applied secondary {}", secondary.applied_key());
                applied.push(secondary.applied_key());
            }
        }

        if !applied.is_empty() {
            workout.methods_applied = Some(applied.clone());
        }
        applied
    }

    /// Only drop sets and tempo layer cleanly over another structure
    fn secondary_structure(
        &self,
        candidates: &[MethodologyCandidate],
        applied: &[MethodKey],
    ) -> Option<Structure> {
        if applied.len() >= self.config.engine.max_methods {
            return None;
        }

        let structure = match candidates.get(1)?.key {
            MethodKey::DropSet => Structure::DropSet { skip_first: true },
            MethodKey::TempoTraining => Structure::TempoTraining,
            _ => return None,
        };

        (!applied.contains(&structure.applied_key())).then_some(structure)
    }
}

/// Apply methodologies with the built-in scorer, table and default config
pub fn apply_training_methods(workout: &mut Workout, profile: &Profile) -> Vec<MethodKey> {
    MethodEngine::default().apply(workout, profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CnsState, Compatibility, Dose, Error, Exercise, ExerciseKind};

    fn fixed(entries: &'static [(&'static str, f64)]) -> impl MethodologyScorer {
        move |_: &SelectorParams| -> Result<Vec<MethodologyCandidate>> {
            Ok(entries
                .iter()
                .map(|(key, score)| MethodologyCandidate::new(*key, *score, "fixed"))
                .collect())
        }
    }

    fn workout(main: usize) -> Workout {
        let names = [
            ("Back Squat", ExerciseKind::Strength, "5"),
            ("Bench Press", ExerciseKind::Strength, "8"),
            ("Barbell Row", ExerciseKind::Strength, "10"),
            ("Romanian Deadlift", ExerciseKind::Strength, "8"),
            ("Leg Curl", ExerciseKind::Isolation, "12"),
            ("Cable Fly", ExerciseKind::Hypertrophy, "12"),
        ];

        let mut exercises = vec![Exercise::new("General Warm-up", ExerciseKind::Warmup)];
        exercises.extend(names.iter().take(main).map(|(name, kind, reps)| {
            Exercise::new(*name, kind.clone())
                .with_sets(3)
                .with_reps(*reps)
                .with_rest("90s")
        }));
        exercises.push(Exercise::new("Static Stretch", ExerciseKind::Cooldown));
        Workout::new(exercises)
    }

    #[test]
    fn test_superset_scenario() {
        crate::logging::init_test();
        let engine = MethodEngine::default().with_scorer(fixed(&[("superset", 90.0)]));
        let mut w = workout(6);

        let applied = engine.apply(&mut w, &Profile::default());

        assert_eq!(applied, vec![MethodKey::Superset]);
        assert_eq!(w.exercises[1].name, "A1: Back Squat (superset)");
        assert_eq!(w.exercises[1].rest.as_deref(), Some("0s"));
        assert_eq!(w.exercises[2].name, "A2: Bench Press (superset)");
        assert_eq!(w.exercises[2].superset_pair.as_deref(), Some("A1"));
        assert_eq!(w.methods_applied, Some(vec![MethodKey::Superset]));
    }

    #[test]
    fn test_drop_set_scenario() {
        let engine = MethodEngine::default().with_scorer(fixed(&[("drop_set", 90.0)]));
        let mut w = workout(5);

        engine.apply(&mut w, &Profile::default());

        assert_eq!(w.exercises[5].name, "Leg Curl (drop set)");
        assert_eq!(
            w.exercises[5].reps,
            Some(Dose::Text("12 + drop 8 + drop 4".into()))
        );
        assert_eq!(w.methods_applied, Some(vec![MethodKey::DropSet]));
    }

    #[test]
    fn test_fatigued_cns_removes_cluster() {
        let engine =
            MethodEngine::default().with_scorer(fixed(&[("cluster", 95.0), ("superset", 80.0)]));
        let profile = Profile {
            cns_state: Some(CnsState::Fatigued),
            ..Default::default()
        };
        let mut w = workout(6);

        engine.apply(&mut w, &profile);

        assert_eq!(w.methods_applied, Some(vec![MethodKey::Superset]));
        assert!(w.exercises.iter().all(|e| e.cluster_note.is_none()));
    }

    #[test]
    fn test_too_few_main_exercises_is_noop() {
        let engine = MethodEngine::default().with_scorer(fixed(&[("superset", 90.0)]));
        let mut w = workout(3);
        let before = w.clone();

        let applied = engine.apply(&mut w, &Profile::default());

        assert!(applied.is_empty());
        assert_eq!(w, before);
        assert!(w.methods_applied.is_none());
    }

    #[test]
    fn test_age_limit_removes_tabata() {
        let engine =
            MethodEngine::default().with_scorer(fixed(&[("tabata", 95.0), ("circuit", 80.0)]));
        let profile = Profile {
            age: Some(55),
            ..Default::default()
        };
        let mut w = workout(6);

        engine.apply(&mut w, &profile);

        assert_eq!(w.methods_applied, Some(vec![MethodKey::Circuit]));
        assert!(w.exercises.iter().all(|e| e.tabata_block.is_none()));
    }

    #[test]
    fn test_secondary_drop_set_lands_on_second_to_last() {
        let engine = MethodEngine::default()
            .with_scorer(fixed(&[("superset", 90.0), ("drop_set", 80.0)]))
            .without_oracle();
        let mut w = workout(6);

        let applied = engine.apply(&mut w, &Profile::default());

        assert_eq!(applied, vec![MethodKey::Superset, MethodKey::DropSet]);
        assert_eq!(w.exercises[5].name, "Leg Curl (drop set)");
        assert_eq!(w.exercises[6].name, "Cable Fly");
    }

    #[test]
    fn test_secondary_tempo() {
        let engine = MethodEngine::default()
            .with_scorer(fixed(&[("giant_set", 90.0), ("tempo_training", 80.0)]));
        let mut w = workout(6);

        let applied = engine.apply(&mut w, &Profile::default());

        assert_eq!(applied, vec![MethodKey::GiantSet, MethodKey::TempoTraining]);
        assert_eq!(w.exercises[1].tempo.as_deref(), Some("3-1-2-0"));
    }

    #[test]
    fn test_other_runner_up_is_not_layered() {
        let engine =
            MethodEngine::default().with_scorer(fixed(&[("superset", 90.0), ("emom", 80.0)]));
        let mut w = workout(6);

        let applied = engine.apply(&mut w, &Profile::default());

        assert_eq!(applied, vec![MethodKey::Superset]);
        assert!(w.exercises.iter().all(|e| e.emom_minute.is_none()));
    }

    #[test]
    fn test_max_methods_one_disables_secondary() {
        let mut config = Config::default();
        config.engine.max_methods = 1;
        let engine =
            MethodEngine::new(config).with_scorer(fixed(&[("superset", 90.0), ("drop_set", 80.0)]));
        let mut w = workout(6);

        let applied = engine.apply(&mut w, &Profile::default());
        assert_eq!(applied, vec![MethodKey::Superset]);
    }

    #[test]
    fn test_veto_removes_incompatible_runner_up() {
        let engine = MethodEngine::default()
            .with_scorer(fixed(&[("superset", 90.0), ("drop_set", 80.0)]))
            .with_oracle(|_: &MethodKey, _: &MethodKey| Compatibility::incompatible("no"));
        let mut w = workout(6);

        let applied = engine.apply(&mut w, &Profile::default());
        assert_eq!(applied, vec![MethodKey::Superset]);
    }

    #[test]
    fn test_scorer_error_leaves_workout_unchanged() {
        crate::logging::init_test();
        let failing = |_: &SelectorParams| -> Result<Vec<MethodologyCandidate>> {
            Err(Error::Scorer("offline".into()))
        };
        let engine = MethodEngine::default().with_scorer(failing);
        let mut w = workout(6);
        let before = w.clone();

        assert!(engine.apply(&mut w, &Profile::default()).is_empty());
        assert_eq!(w, before);
        assert!(engine.rank(&Profile::default()).is_err());
    }

    #[test]
    fn test_empty_ranking_is_noop() {
        let engine = MethodEngine::default().with_scorer(fixed(&[]));
        let mut w = workout(6);
        let before = w.clone();

        engine.apply(&mut w, &Profile::default());
        assert_eq!(w, before);
    }

    #[test]
    fn test_unchanged_pass_keeps_previous_record() {
        let engine = MethodEngine::default().with_scorer(fixed(&[("superset", 90.0)]));
        let mut w = workout(6);

        engine.apply(&mut w, &Profile::default());
        let after_first = w.clone();
        let second = engine.apply(&mut w, &Profile::default());

        assert!(second.is_empty());
        assert_eq!(w, after_first);
        assert_eq!(w.methods_applied, Some(vec![MethodKey::Superset]));
    }

    #[test]
    fn test_passthrough_key_falls_back_to_superset() {
        let engine =
            MethodEngine::default().with_scorer(fixed(&[("shadow_boxing_drills", 90.0)]));
        let mut w = workout(4);

        let applied = engine.apply(&mut w, &Profile::default());
        assert_eq!(applied, vec![MethodKey::Superset]);
    }

    #[test]
    fn test_default_engine_structures_a_gym_session() {
        let mut w = workout(6);
        let applied = apply_training_methods(&mut w, &Profile::default());

        assert!(!applied.is_empty());
        assert!(applied.len() <= 2);
        assert_eq!(w.exercises[0].name, "General Warm-up");
        assert_eq!(w.exercises[7].name, "Static Stretch");
    }
}
