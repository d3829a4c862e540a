//! Main-exercise classification.
//!
//! Separates structurable work from warm-up, cooldown and activation
//! entries. Transformers only ever touch the indices returned here.

use crate::Exercise;

/// Name fragments that mark warm-up or mobility content
const WARMUP_KEYWORDS: &[&str] = &[
    "warm",
    "stretch",
    "mobility",
    "jump rope",
    "band pull",
    "shadow boxing light",
    "dynamic",
    "activation",
    "foam roll",
    "cat-cow",
    "world greatest",
    "locomotion",
    "glute bridge",
    "dead bug",
    "bird dog",
];

/// Whether a single exercise is eligible for structural transformation
pub fn is_main_exercise(exercise: &Exercise) -> bool {
    if exercise.kind.is_preparatory() {
        return false;
    }

    let name = exercise.lower_name();
    !WARMUP_KEYWORDS.iter().any(|kw| name.contains(kw))
}

/// Indices of the main exercises, in workout order
pub fn classify_main(exercises: &[Exercise]) -> Vec<usize> {
    exercises
        .iter()
        .enumerate()
        .filter(|(_, e)| is_main_exercise(e))
        .map(|(i, _)| i)
        .collect()
}
