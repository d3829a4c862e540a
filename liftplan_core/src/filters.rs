//! Context filters over ranked methodology candidates.
//!
//! Each filter takes the candidate list by value and returns the narrowed
//! or re-ranked list. None of them touches the workout. They run in a
//! fixed order: CNS, age, weight, recency, compatibility.

use crate::config::FilterConfig;
use crate::{CnsState, CompatibilityOracle, MethodKey, MethodologyCandidate, SelectorParams};

/// Methods too costly for a fatigued or depleted CNS
fn is_high_cns_cost(key: &MethodKey) -> bool {
    matches!(
        key,
        MethodKey::Cluster
            | MethodKey::ContrastTraining
            | MethodKey::Gvt
            | MethodKey::DropSet
            | MethodKey::RestPause
    )
}

/// Methods too intense above the age limit
fn is_high_intensity(key: &MethodKey) -> bool {
    matches!(key, MethodKey::Gvt | MethodKey::Cluster | MethodKey::Tabata)
}

/// Methods with high joint impact for heavy athletes
fn is_high_impact(key: &MethodKey) -> bool {
    matches!(key, MethodKey::Tabata | MethodKey::PlyometricComplex)
}

const RECENTLY_USED_MARKER: &str = " (recently used)";

/// Stable descending sort by score
fn sort_by_score(candidates: &mut [MethodologyCandidate]) {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Drop high-CNS-cost methods when the athlete is fatigued or depleted
pub fn filter_cns(
    candidates: Vec<MethodologyCandidate>,
    cns_state: CnsState,
) -> Vec<MethodologyCandidate> {
    if !cns_state.is_compromised() {
        return candidates;
    }

    candidates
        .into_iter()
        .filter(|c| {
            let keep = !is_high_cns_cost(&c.key);
            if !keep {
                tracing::debug!("CNS {:?}: excluded {}", cns_state, c.key);
            }
            keep
        })
        .collect()
}

/// Drop high-intensity methods for athletes above the age limit
pub fn filter_age(
    candidates: Vec<MethodologyCandidate>,
    age: u32,
    config: &FilterConfig,
) -> Vec<MethodologyCandidate> {
    if age <= config.age_limit {
        return candidates;
    }

    candidates
        .into_iter()
        .filter(|c| {
            let keep = !is_high_intensity(&c.key);
            if !keep {
                tracing::debug!("Age {} > {}: excluded {}", age, config.age_limit, c.key);
            }
            keep
        })
        .collect()
}

/// Scale down high-impact methods for heavy athletes, then re-rank
pub fn penalize_weight(
    mut candidates: Vec<MethodologyCandidate>,
    weight: f64,
    config: &FilterConfig,
) -> Vec<MethodologyCandidate> {
    if weight <= config.heavy_weight_kg {
        return candidates;
    }

    for c in candidates.iter_mut().filter(|c| is_high_impact(&c.key)) {
        c.score *= config.weight_penalty;
        tracing::debug!("Weight {}kg: penalised {} to {}", weight, c.key, c.score);
    }
    sort_by_score(&mut candidates);
    candidates
}

/// Halve the score of recently used methods, then re-rank
pub fn penalize_recent(
    mut candidates: Vec<MethodologyCandidate>,
    previous: &[MethodKey],
    config: &FilterConfig,
) -> Vec<MethodologyCandidate> {
    if previous.is_empty() {
        return candidates;
    }

    for c in candidates.iter_mut().filter(|c| previous.contains(&c.key)) {
        c.score *= config.recency_penalty;
        c.reason.push_str(RECENTLY_USED_MARKER);
    }
    sort_by_score(&mut candidates);
    tracing::debug!("Penalised recently used methods: {:?}", previous);
    candidates
}

/// Drop the runner-up when it cannot share a session with the leader
///
/// Only the top two are inspected; later candidates simply move up.
pub fn veto_incompatible(
    mut candidates: Vec<MethodologyCandidate>,
    oracle: &dyn CompatibilityOracle,
) -> Vec<MethodologyCandidate> {
    if candidates.len() < 2 {
        return candidates;
    }

    let verdict = oracle.check(&candidates[0].key, &candidates[1].key);
    if !verdict.compatible {
        tracing::info!(
            "Incompatible methods {} + {}: {}",
            candidates[0].key,
            candidates[1].key,
            verdict.reason
        );
        candidates.remove(1);
    }
    candidates
}

/// Drop candidates a scorer marked as excluded (zero, negative or NaN)
pub fn drop_excluded(candidates: Vec<MethodologyCandidate>) -> Vec<MethodologyCandidate> {
    candidates
        .into_iter()
        .filter(|c| {
            let keep = c.score > 0.0;
            if !keep {
                tracing::debug!("Excluded {} with score {}", c.key, c.score);
            }
            keep
        })
        .collect()
}

/// Run the full filter chain in order
///
/// Non-positive scores are dropped first, so every penalty strictly lowers
/// a surviving score. Without an oracle the compatibility veto is skipped.
pub fn apply_context_filters(
    candidates: Vec<MethodologyCandidate>,
    params: &SelectorParams,
    config: &FilterConfig,
    oracle: Option<&dyn CompatibilityOracle>,
) -> Vec<MethodologyCandidate> {
    let candidates = drop_excluded(candidates);
    let candidates = filter_cns(candidates, params.cns_state);
    let candidates = filter_age(candidates, params.age, config);
    let candidates = penalize_weight(candidates, params.weight, config);
    let candidates = penalize_recent(candidates, &params.previous_methods, config);

    match oracle {
        Some(oracle) => veto_incompatible(candidates, oracle),
        None => candidates,
    }
}
