//! Methodology scoring.
//!
//! The engine consumes candidates through [`MethodologyScorer`]; the
//! built-in [`RuleBasedScorer`] ranks the default catalog against the
//! athlete context.

use crate::catalog::{get_default_catalog, MethodCatalog, MethodProfile, RecoveryCost};
use crate::{CnsState, MethodKey, MethodologyCandidate, Result, SelectorParams};

/// Maximum number of candidates returned by the rule-based scorer
pub const MAX_CANDIDATES: usize = 5;

/// Source of ranked methodology candidates
///
/// Implementations return candidates sorted by descending score. Scores
/// are expected to be positive; the filter chain drops anything at or below
/// zero. An error means the scorer is unavailable; the engine then leaves
/// the workout alone.
pub trait MethodologyScorer: Send + Sync {
    fn score(&self, params: &SelectorParams) -> Result<Vec<MethodologyCandidate>>;
}

impl<F> MethodologyScorer for F
where
    F: Fn(&SelectorParams) -> Result<Vec<MethodologyCandidate>> + Send + Sync,
{
    fn score(&self, params: &SelectorParams) -> Result<Vec<MethodologyCandidate>> {
        self(params)
    }
}

/// Scores every catalog entry with a fixed set of additive rules
#[derive(Clone, Debug)]
pub struct RuleBasedScorer {
    catalog: &'static MethodCatalog,
}

impl Default for RuleBasedScorer {
    fn default() -> Self {
        Self {
            catalog: get_default_catalog(),
        }
    }
}

impl RuleBasedScorer {
    pub fn with_catalog(catalog: &'static MethodCatalog) -> Self {
        Self { catalog }
    }
}

impl MethodologyScorer for RuleBasedScorer {
    fn score(&self, params: &SelectorParams) -> Result<Vec<MethodologyCandidate>> {
        let mut candidates: Vec<MethodologyCandidate> = self
            .catalog
            .methods
            .iter()
            .filter_map(|method| {
                let score = score_method(method, params);
                (score > 0.0).then(|| MethodologyCandidate {
                    key: method.key.clone(),
                    score,
                    reason: explain_choice(method, params),
                })
            })
            .collect();

        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(MAX_CANDIDATES);

        tracing::debug!(
            "Scored {} candidates: {:?}",
            candidates.len(),
            candidates
                .iter()
                .map(|c| format!("{}={}", c.key, c.score))
                .collect::<Vec<_>>()
        );

        Ok(candidates)
    }
}

/// Score one methodology; zero means excluded
fn score_method(method: &MethodProfile, ctx: &SelectorParams) -> f64 {
    let mut score = 50.0;
    let name = method.name.to_lowercase();
    let demanding = method.recovery_cost.is_demanding();
    let phase = ctx.phase.as_str();

    if method.is_sport_specific() {
        if method.sports.contains(&ctx.sport.as_str()) {
            score += 50.0;
        } else {
            score -= 30.0;
        }
    }

    let goal_tags = ctx.goal.best_for_tags();
    if method.best_for.iter().any(|b| goal_tags.contains(b)) {
        score += 30.0;
    }

    if method.matches_phase(phase) {
        score += 20.0;
    }
    if method.avoids_phase(phase) {
        return 0.0;
    }

    if ctx.experience < method.min_experience {
        return 0.0;
    }
    if ctx.experience > method.min_experience {
        score += 10.0;
    }

    if ctx.fatigue >= 7.0 && method.recovery_cost == RecoveryCost::High {
        score -= 30.0;
    }
    if ctx.fatigue >= 8.0 && method.recovery_cost == RecoveryCost::VeryHigh {
        return 0.0;
    }

    if ctx.time_available < 45 {
        if let Some(saving) = method.time_saving {
            score += saving * 30.0;
        }
    }

    if ctx.rpe_tolerance < method.min_rpe_tolerance {
        score -= 20.0;
    }

    if !ctx.pain_areas.is_empty() {
        if method.contraindications.contains(&"joint_pain") {
            score -= 40.0;
        }
        for area in &ctx.pain_areas {
            let issue = format!("{}_issues", area);
            if method.contraindications.contains(&issue.as_str()) {
                score -= 50.0;
            }
        }
    }

    if ctx.age > 50 {
        if demanding {
            score -= 25.0;
        }
        if name.contains("tempo") || name.contains("iso") || method.recovery_cost == RecoveryCost::Low
        {
            score += 15.0;
        }
    }
    if ctx.age > 60
        && matches!(
            method.key,
            MethodKey::Cluster | MethodKey::Gvt | MethodKey::Tabata | MethodKey::PlyometricComplex
        )
    {
        return 0.0;
    }

    if ctx.weight > 100.0
        && (name.contains("plyo") || name.contains("jump") || name.contains("tabata"))
    {
        score -= 20.0;
    }
    if ctx.weight < 60.0
        && (method.best_for.contains(&"power") || method.best_for.contains(&"speed"))
    {
        score += 10.0;
    }

    let preferred: &[&str] = match ctx.session_type.as_str() {
        "strength" => &["cluster", "contrast_training", "rest_pause"],
        "power" => &["contrast_training", "plyometric", "cluster"],
        "hypertrophy" => &["drop_set", "myo_reps", "giant_set", "superset"],
        "conditioning" => &["circuit", "emom", "tabata"],
        _ => &[],
    };
    if preferred
        .iter()
        .any(|pm| method.key.as_str() == *pm || name.contains(pm))
    {
        score += 25.0;
    }
    if matches!(ctx.session_type.as_str(), "technique" | "recovery") && demanding {
        return 0.0;
    }

    match ctx.week_number % 4 {
        0 => {
            if demanding {
                score -= 30.0;
            }
            if method.time_saving.is_some() {
                score += 20.0;
            }
        }
        2 | 3 => {
            if method.best_for.contains(&"strength") || method.best_for.contains(&"power") {
                score += 15.0;
            }
        }
        _ => {}
    }

    match ctx.cns_state {
        CnsState::Fatigued | CnsState::Depleted if demanding => return 0.0,
        CnsState::Fresh if demanding => score += 15.0,
        _ => {}
    }

    score.max(0.0)
}

/// Human-readable justification for a candidate
fn explain_choice(method: &MethodProfile, ctx: &SelectorParams) -> String {
    let mut reasons = Vec::new();

    if method.sports.contains(&ctx.sport.as_str()) {
        reasons.push(format!("specific to {}", ctx.sport));
    }

    if method.matches_phase(ctx.phase.as_str()) {
        reasons.push(format!("ideal for the {} phase", ctx.phase.as_str()));
    }

    if let Some(saving) = method.time_saving {
        if ctx.time_available < 45 {
            reasons.push(format!("saves {:.0}% of session time", saving * 100.0));
        }
    }

    if ctx.goal == crate::TrainingGoal::Definition && method.high_cardio {
        reasons.push("high cardiovascular impact".to_string());
    }

    if reasons.is_empty() {
        "suits the profile".to_string()
    } else {
        reasons.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorConfig;
    use crate::{ExperienceLevel, Profile, TrainingGoal, TrainingPhase};

    fn params() -> SelectorParams {
        SelectorParams::from_profile(&Profile::default(), &SelectorConfig::default())
    }

    fn keys(candidates: &[MethodologyCandidate]) -> Vec<MethodKey> {
        candidates.iter().map(|c| c.key.clone()).collect()
    }

    #[test]
    fn test_returns_at_most_five_sorted() {
        let candidates = RuleBasedScorer::default().score(&params()).unwrap();

        assert!(!candidates.is_empty());
        assert!(candidates.len() <= MAX_CANDIDATES);
        assert!(candidates.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(candidates.iter().all(|c| c.score > 0.0));
    }

    #[test]
    fn test_beginner_excludes_advanced_methods() {
        let mut p = params();
        p.experience = ExperienceLevel::Beginner;

        let candidates = RuleBasedScorer::default().score(&p).unwrap();
        let keys = keys(&candidates);

        assert!(!keys.contains(&MethodKey::GiantSet));
        assert!(!keys.contains(&MethodKey::Cluster));
        assert!(!keys.contains(&MethodKey::ContrastTraining));
    }

    #[test]
    fn test_avoided_phase_excludes_method() {
        let mut p = params();
        p.phase = TrainingPhase::Deload;

        let candidates = RuleBasedScorer::default().score(&p).unwrap();
        let keys = keys(&candidates);

        assert!(!keys.contains(&MethodKey::DropSet));
        assert!(!keys.contains(&MethodKey::Emom));
    }

    #[test]
    fn test_depleted_cns_drops_demanding_methods() {
        let mut p = params();
        p.cns_state = CnsState::Depleted;

        let candidates = RuleBasedScorer::default().score(&p).unwrap();
        let catalog = get_default_catalog();

        for c in &candidates {
            let profile = catalog.get(&c.key).unwrap();
            assert!(!profile.recovery_cost.is_demanding(), "{} kept", c.key);
        }
    }

    #[test]
    fn test_sport_specific_methods_favour_matching_sport() {
        let mut p = params();
        p.sport = "boxing".into();
        p.goal = TrainingGoal::Performance;

        let candidates = RuleBasedScorer::default().score(&p).unwrap();
        assert!(keys(&candidates).contains(&MethodKey::HeavyBagIntervals));
    }

    #[test]
    fn test_reason_falls_back() {
        let catalog = get_default_catalog();
        let mut p = params();
        p.phase = TrainingPhase::Other("off_season".into());

        let reason = explain_choice(catalog.get(&MethodKey::Emom).unwrap(), &p);
        assert_eq!(reason, "suits the profile");
    }

    #[test]
    fn test_closure_scorer() {
        let scorer = |_: &SelectorParams| -> Result<Vec<MethodologyCandidate>> {
            Ok(vec![MethodologyCandidate::new("emom", 80.0, "fixed")])
        };

        let candidates = scorer.score(&params()).unwrap();
        assert_eq!(candidates[0].key, MethodKey::Emom);
    }
}
