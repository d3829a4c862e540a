//! Structural transformers.
//!
//! Each transformer receives the full exercise list and the indices of the
//! main exercises, mutates the selected entries in place and reports whether
//! anything changed. Entries are never moved, added or removed; grouping is
//! expressed through the explicit order fields on [`Exercise`].
//!
//! Every transformer checks for its own marker (a name fragment or a
//! metadata field) before touching an exercise, so a second application
//! over the same main set is a no-op.

use crate::types::reps_or;
use crate::{Dose, Exercise, ExerciseKind, MethodKey};

const SUPERSET_MARKER: &str = "(superset)";
const DROP_SET_MARKER: &str = "drop set";
const REST_PAUSE_MARKER: &str = "rest-pause";
const MYO_REPS_MARKER: &str = "myo-reps";
const CLUSTER_MARKER: &str = "cluster";
const PAP_HEAVY_TAG: &str = "PAP-A";
const PAP_EXPLOSIVE_TAG: &str = "PAP-B";

const TEMPO: &str = "3-1-2-0";
const TEMPO_MAX_EXERCISES: usize = 3;

/// Names that are conditioning or skill work, not loadable sets
const DROP_SET_BAD_NAMES: &[&str] = &["shadow", "drill", "round", "combo", "interval", "tabata"];
const MYO_REPS_BAD_NAMES: &[&str] = &["shadow", "drill", "round", "combo"];

const COMPOUND_NAMES: &[&str] = &["deadlift", "squat", "press", "row", "pull", "push"];
const CLUSTER_NAMES: &[&str] = &["squat", "deadlift", "press", "row"];
const HEAVY_NAMES: &[&str] = &["squat", "press", "deadlift"];
const EXPLOSIVE_NAMES: &[&str] = &["jump", "throw", "plyometric", "explosive"];
const TABATA_UNSUITED_NAMES: &[&str] = &["deadlift", "heavy squat", "squat pesante", "press"];

/// The structural pattern a methodology key resolves to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Structure {
    Superset,
    DropSet { skip_first: bool },
    RestPause,
    MyoReps,
    TempoTraining,
    Circuit,
    Emom,
    Tabata,
    GiantSet,
    Cluster,
    ContrastTraining,
}

impl Structure {
    /// Resolve a methodology key to its transformer
    ///
    /// Keys without a structural pattern of their own (boxing passthrough
    /// keys, GVT, unknown keys) fall back to a superset.
    pub fn for_key(key: &MethodKey) -> Self {
        match key {
            MethodKey::Superset => Structure::Superset,
            MethodKey::DropSet => Structure::DropSet { skip_first: false },
            MethodKey::RestPause => Structure::RestPause,
            MethodKey::MyoReps => Structure::MyoReps,
            MethodKey::TempoTraining => Structure::TempoTraining,
            MethodKey::Circuit | MethodKey::BoxingCircuit => Structure::Circuit,
            MethodKey::Emom => Structure::Emom,
            MethodKey::Tabata => Structure::Tabata,
            MethodKey::GiantSet => Structure::GiantSet,
            MethodKey::Cluster => Structure::Cluster,
            MethodKey::ContrastTraining => Structure::ContrastTraining,
            MethodKey::HeavyBagIntervals
            | MethodKey::ShadowBoxingDrills
            | MethodKey::PunchResistanceTraining
            | MethodKey::Gvt
            | MethodKey::PlyometricComplex
            | MethodKey::Other(_) => Structure::Superset,
        }
    }

    /// Key recorded in `methodsApplied` when this structure changes the workout
    pub fn applied_key(self) -> MethodKey {
        match self {
            Structure::Superset => MethodKey::Superset,
            Structure::DropSet { .. } => MethodKey::DropSet,
            Structure::RestPause => MethodKey::RestPause,
            Structure::MyoReps => MethodKey::MyoReps,
            Structure::TempoTraining => MethodKey::TempoTraining,
            Structure::Circuit => MethodKey::Circuit,
            Structure::Emom => MethodKey::Emom,
            Structure::Tabata => MethodKey::Tabata,
            Structure::GiantSet => MethodKey::GiantSet,
            Structure::Cluster => MethodKey::Cluster,
            Structure::ContrastTraining => MethodKey::ContrastTraining,
        }
    }

    /// Apply the structure; returns true if any exercise was mutated
    pub fn apply(self, exercises: &mut [Exercise], main: &[usize]) -> bool {
        match self {
            Structure::Superset => apply_superset(exercises, main),
            Structure::DropSet { skip_first } => apply_drop_set(exercises, main, skip_first),
            Structure::RestPause => apply_rest_pause(exercises, main),
            Structure::MyoReps => apply_myo_reps(exercises, main),
            Structure::TempoTraining => apply_tempo(exercises, main),
            Structure::Circuit => apply_circuit(exercises, main),
            Structure::Emom => apply_emom(exercises, main),
            Structure::Tabata => apply_tabata(exercises, main),
            Structure::GiantSet => apply_giant_set(exercises, main),
            Structure::Cluster => apply_cluster(exercises, main),
            Structure::ContrastTraining => apply_contrast(exercises, main),
        }
    }
}

fn name_has_any(exercise: &Exercise, keywords: &[&str]) -> bool {
    let name = exercise.lower_name();
    keywords.iter().any(|kw| name.contains(kw))
}

/// `floor(base * factor)` on integer reps
fn scale_reps(base: i64, factor: f64) -> i64 {
    (base as f64 * factor).floor() as i64
}

/// Strip a leading group tag such as `A1: ` or `G3:`
fn strip_group_prefix(name: &str) -> &str {
    let mut chars = name.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_uppercase()) {
        return name;
    }

    let rest = &name[1..];
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return name;
    }

    match rest[digits..].strip_prefix(':') {
        Some(tail) => tail.trim_start(),
        None => name,
    }
}

/// Pair the first two adjacent main exercises as A1/A2
pub fn apply_superset(exercises: &mut [Exercise], main: &[usize]) -> bool {
    if main
        .iter()
        .any(|&i| exercises[i].name.contains(SUPERSET_MARKER))
    {
        return false;
    }

    for pair in main.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        if exercises[first].name.contains("A1:") || exercises[second].name.contains("A2:") {
            continue;
        }

        let a = &mut exercises[first];
        a.name = format!("A1: {} {}", a.name, SUPERSET_MARKER);
        a.rest = Some("0s".into());

        let b = &mut exercises[second];
        b.name = format!("A2: {} {}", b.name, SUPERSET_MARKER);
        b.superset_pair = Some("A1".into());

        tracing::debug!("Superset on exercises {} and {}", first, second);
        return true;
    }

    false
}

/// Turn the last suitable exercise into a double drop set
///
/// With `skip_first` the second-to-last candidate is used instead, so a
/// secondary drop set lands away from the primary structure.
pub fn apply_drop_set(exercises: &mut [Exercise], main: &[usize], skip_first: bool) -> bool {
    let candidates: Vec<usize> = main
        .iter()
        .copied()
        .filter(|&i| {
            let e = &exercises[i];
            let good_kind = matches!(
                e.kind,
                ExerciseKind::Hypertrophy
                    | ExerciseKind::Isolation
                    | ExerciseKind::Strength
                    | ExerciseKind::Power
                    | ExerciseKind::Core
            );
            good_kind || (e.kind.is_untyped() && !name_has_any(e, DROP_SET_BAD_NAMES))
        })
        .collect();

    let Some(&target) = (match candidates.len() {
        0 => None,
        n if skip_first && n > 1 => candidates.get(n - 2),
        n => candidates.get(n - 1),
    }) else {
        return false;
    };

    let e = &mut exercises[target];
    if e.name.contains(DROP_SET_MARKER) {
        return false;
    }

    let base = reps_or(e.reps.as_ref(), 12);
    e.name = format!("{} ({})", e.name, DROP_SET_MARKER);
    e.reps = Some(Dose::Text(format!(
        "{} + drop {} + drop {}",
        base,
        base.saturating_sub(4),
        base.saturating_sub(8)
    )));
    true
}

/// Rest-pause on the middle compound lift
pub fn apply_rest_pause(exercises: &mut [Exercise], main: &[usize]) -> bool {
    let candidates: Vec<usize> = main
        .iter()
        .copied()
        .filter(|&i| {
            let e = &exercises[i];
            let good_kind = matches!(e.kind, ExerciseKind::Strength | ExerciseKind::Power);
            (good_kind || name_has_any(e, COMPOUND_NAMES)) && !e.lower_name().contains("superset")
        })
        .collect();

    let Some(&target) = candidates.get(candidates.len() / 2) else {
        return false;
    };

    let e = &mut exercises[target];
    if e.name.contains(REST_PAUSE_MARKER) {
        return false;
    }

    let base = reps_or(e.reps.as_ref(), 8);
    e.name = format!("{} ({})", e.name, REST_PAUSE_MARKER);
    e.reps = Some(Dose::Text(format!(
        "{} → 15s → {} → 15s → max",
        base,
        base.div_euclid(2)
    )));
    true
}

/// Myo-reps on the first accessory-style exercise
pub fn apply_myo_reps(exercises: &mut [Exercise], main: &[usize]) -> bool {
    let target = main.iter().copied().find(|&i| {
        let e = &exercises[i];
        matches!(
            e.kind,
            ExerciseKind::Hypertrophy | ExerciseKind::Isolation | ExerciseKind::Core
        ) || (!name_has_any(e, MYO_REPS_BAD_NAMES)
            && !matches!(
                e.kind,
                ExerciseKind::Strength | ExerciseKind::Power | ExerciseKind::Technique
            ))
    });

    let Some(target) = target else {
        return false;
    };

    let e = &mut exercises[target];
    if e.name.contains(MYO_REPS_MARKER) {
        return false;
    }

    e.name = format!("{} ({})", e.name, MYO_REPS_MARKER);
    e.reps = Some(Dose::Text("15 + 5x4".into()));
    e.rest = Some("5s tra mini-set".into());
    true
}

/// 3-1-2-0 tempo on up to three strength exercises
pub fn apply_tempo(exercises: &mut [Exercise], main: &[usize]) -> bool {
    let marker = format!("(tempo {})", TEMPO);
    let mut applied = main
        .iter()
        .filter(|&&i| exercises[i].name.contains(&marker))
        .count();
    let mut changed = false;

    for &i in main {
        if applied >= TEMPO_MAX_EXERCISES {
            break;
        }

        let e = &mut exercises[i];
        if e.kind != ExerciseKind::Strength || e.tempo.is_some() {
            continue;
        }

        e.tempo = Some(TEMPO.into());
        e.name = format!("{} {}", e.name, marker);
        applied += 1;
        changed = true;
    }

    changed
}

/// Group the first four to six main exercises into a circuit
pub fn apply_circuit(exercises: &mut [Exercise], main: &[usize]) -> bool {
    if main.len() < 4 {
        return false;
    }

    let group = &main[..main.len().min(6)];
    let total = group.len() as u32;
    let mut changed = false;

    for (pos, &i) in group.iter().enumerate() {
        let e = &mut exercises[i];
        if e.circuit_order.is_some() {
            continue;
        }

        let order = pos as u32 + 1;
        let base = reps_or(e.reps.as_ref(), 10);
        e.name = format!("C{}: {}", order, e.name);
        e.circuit_order = Some(order);
        e.circuit_total = Some(total);
        e.rest = Some(if order < total { "0s" } else { "90-120s" }.into());
        e.reps = Some(Dose::Count(scale_reps(base, 0.7).max(6)));
        if pos == 0 {
            e.circuit_note = Some(format!("CIRCUIT x3 rounds ({} exercises)", total));
        }
        changed = true;
    }

    changed
}

/// Alternate the first two or three main exercises minute by minute
pub fn apply_emom(exercises: &mut [Exercise], main: &[usize]) -> bool {
    let group = &main[..main.len().min(3)];
    if group.len() < 2 {
        return false;
    }

    let mut changed = false;
    for (pos, &i) in group.iter().enumerate() {
        let e = &mut exercises[i];
        if e.emom_minute.is_some() {
            continue;
        }

        let minute = pos as u32 + 1;
        let base = reps_or(e.reps.as_ref(), 10);
        e.name = format!("EMOM Min {}: {}", minute, e.name);
        e.emom_minute = Some(minute);
        e.reps = Some(Dose::Count(scale_reps(base, 0.6).min(8)));
        e.rest = Some("resto del minuto".into());
        e.sets = Some(Dose::Text("4 rounds (12 min)".into()));
        if pos == 0 {
            e.emom_note = Some(format!(
                "EMOM 12 minutes - alternate {} exercises",
                group.len()
            ));
        }
        changed = true;
    }

    changed
}

/// 20s on / 10s off blocks for up to four bodyweight-friendly exercises
pub fn apply_tabata(exercises: &mut [Exercise], main: &[usize]) -> bool {
    let mut group: Vec<usize> = main
        .iter()
        .copied()
        .filter(|&i| {
            let e = &exercises[i];
            !name_has_any(e, TABATA_UNSUITED_NAMES) && e.kind != ExerciseKind::Strength
        })
        .take(4)
        .collect();

    if group.len() < 2 {
        group = main.iter().copied().take(2).collect();
    }

    let mut changed = false;
    for (pos, &i) in group.iter().enumerate() {
        let e = &mut exercises[i];
        if e.tabata_block.is_some() {
            continue;
        }

        let block = pos as u32 + 1;
        e.name = format!("TABATA {}: {}", block, e.name);
        e.reps = Some(Dose::Text("20s max effort".into()));
        e.rest = Some("10s".into());
        e.sets = Some(Dose::Text("8 rounds (4 min)".into()));
        e.tabata_block = Some(block);
        if pos == 0 {
            e.tabata_note = Some("TABATA protocol - 20s on / 10s off x8".into());
        }
        changed = true;
    }

    changed
}

/// Four consecutive main exercises without rest
pub fn apply_giant_set(exercises: &mut [Exercise], main: &[usize]) -> bool {
    if main.len() < 4 {
        return false;
    }

    let group = &main[..4];
    let mut changed = false;

    for (pos, &i) in group.iter().enumerate() {
        let e = &mut exercises[i];
        if e.giant_set_order.is_some() {
            continue;
        }

        let order = pos as u32 + 1;
        e.name = format!("G{}: {}", order, e.name);
        e.giant_set_order = Some(order);
        e.rest = Some(if pos < group.len() - 1 { "0s" } else { "120-180s" }.into());
        e.sets = Some(Dose::Count(3));
        if pos == 0 {
            e.giant_set_note = Some(format!(
                "GIANT SET x3 rounds - {} exercises without rest",
                group.len()
            ));
        }
        changed = true;
    }

    changed
}

/// Cluster the first compound lift into 2+2+2
pub fn apply_cluster(exercises: &mut [Exercise], main: &[usize]) -> bool {
    let target = main.iter().copied().find(|&i| {
        let e = &exercises[i];
        name_has_any(e, CLUSTER_NAMES)
            || matches!(e.kind, ExerciseKind::Strength | ExerciseKind::Power)
    });

    let Some(target) = target else {
        return false;
    };

    let e = &mut exercises[target];
    if e.name.contains(CLUSTER_MARKER) {
        return false;
    }

    e.name = format!("{} ({})", strip_group_prefix(&e.name), CLUSTER_MARKER);
    e.reps = Some(Dose::Text("(2+2+2) = 6 reps".into()));
    e.rest = Some("15s intra-set, 180s inter-set".into());
    e.cluster_note = Some("CLUSTER SET - 15s pause every 2 reps".into());
    true
}

/// Pair a heavy lift with an explosive movement for potentiation
pub fn apply_contrast(exercises: &mut [Exercise], main: &[usize]) -> bool {
    let tagged = |e: &Exercise| {
        e.name.contains(&format!("{}:", PAP_HEAVY_TAG))
            || e.name.contains(&format!("{}:", PAP_EXPLOSIVE_TAG))
    };
    if main.iter().any(|&i| tagged(&exercises[i])) {
        return false;
    }

    let heavy = main.iter().copied().find(|&i| {
        let e = &exercises[i];
        name_has_any(e, HEAVY_NAMES) || e.kind == ExerciseKind::Strength
    });
    let explosive = main.iter().copied().find(|&i| {
        let e = &exercises[i];
        name_has_any(e, EXPLOSIVE_NAMES)
            || matches!(e.kind, ExerciseKind::Power | ExerciseKind::Plyometric)
    });

    match (heavy, explosive) {
        (Some(h), Some(x)) if h != x => {
            let a = &mut exercises[h];
            a.name = format!("{}: {} (heavy)", PAP_HEAVY_TAG, a.name);
            a.rest = Some("30s".into());
            a.reps = Some(Dose::Text("3-5".into()));
            a.contrast_note = Some("PAP - post-activation potentiation".into());

            let b = &mut exercises[x];
            b.name = format!("{}: {} (explosive)", PAP_EXPLOSIVE_TAG, b.name);
            b.rest = Some("180-240s".into());
            b.reps = Some(Dose::Text("5-6 max velocity".into()));
            b.contrast_pair = Some(PAP_HEAVY_TAG.into());
            true
        }
        _ => {
            let [first, second, ..] = main else {
                return false;
            };

            let a = &mut exercises[*first];
            a.name = format!("{}: {}", PAP_HEAVY_TAG, a.name);
            a.rest = Some("30s".into());
            a.contrast_note = Some("CONTRAST - heavy then explosive".into());

            let b = &mut exercises[*second];
            b.name = format!("{}: {}", PAP_EXPLOSIVE_TAG, b.name);
            b.rest = Some("180s".into());
            b.contrast_pair = Some(PAP_HEAVY_TAG.into());

            tracing::debug!("No heavy/explosive pair found, contrast on first two exercises");
            true
        }
    }
}
