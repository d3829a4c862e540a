//! Core domain types for the Liftplan methodology engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercises, their kinds and set/rep doses
//! - Workouts and the methodologies applied to them
//! - Athlete profiles and the defaulted selector parameters
//! - Methodology keys and ranked candidates

use crate::config::SelectorConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// ============================================================================
// Exercise Types
// ============================================================================

/// Kind of exercise, as tagged by the upstream template stage
///
/// `Untyped` is distinct from `Other`: several transformers treat an exercise
/// without any type differently from one with an unrecognised type.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ExerciseKind {
    Strength,
    Power,
    Hypertrophy,
    Isolation,
    Core,
    Technique,
    Plyometric,
    Warmup,
    Cooldown,
    Activation,
    Other(String),
    #[default]
    Untyped,
}

impl ExerciseKind {
    pub fn is_untyped(&self) -> bool {
        matches!(self, ExerciseKind::Untyped)
    }

    /// Warm-up, cooldown and activation entries are never structured
    pub fn is_preparatory(&self) -> bool {
        matches!(
            self,
            ExerciseKind::Warmup | ExerciseKind::Cooldown | ExerciseKind::Activation
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ExerciseKind::Strength => Some("strength"),
            ExerciseKind::Power => Some("power"),
            ExerciseKind::Hypertrophy => Some("hypertrophy"),
            ExerciseKind::Isolation => Some("isolation"),
            ExerciseKind::Core => Some("core"),
            ExerciseKind::Technique => Some("technique"),
            ExerciseKind::Plyometric => Some("plyometric"),
            ExerciseKind::Warmup => Some("warmup"),
            ExerciseKind::Cooldown => Some("cooldown"),
            ExerciseKind::Activation => Some("activation"),
            ExerciseKind::Other(s) => Some(s),
            ExerciseKind::Untyped => None,
        }
    }
}

impl From<Option<String>> for ExerciseKind {
    fn from(value: Option<String>) -> Self {
        let Some(raw) = value else {
            return ExerciseKind::Untyped;
        };

        match raw.trim().to_lowercase().as_str() {
            "" => ExerciseKind::Untyped,
            "strength" => ExerciseKind::Strength,
            "power" => ExerciseKind::Power,
            "hypertrophy" => ExerciseKind::Hypertrophy,
            "isolation" => ExerciseKind::Isolation,
            "core" => ExerciseKind::Core,
            "technique" => ExerciseKind::Technique,
            "plyometric" => ExerciseKind::Plyometric,
            "warmup" => ExerciseKind::Warmup,
            "cooldown" => ExerciseKind::Cooldown,
            "activation" => ExerciseKind::Activation,
            _ => ExerciseKind::Other(raw),
        }
    }
}

impl From<ExerciseKind> for Option<String> {
    fn from(kind: ExerciseKind) -> Self {
        kind.as_str().map(str::to_string)
    }
}

/// A set or rep prescription: either a plain count or free text
/// such as `"8-10"` or `"4 rounds (12 min)"`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Dose {
    Count(i64),
    Text(String),
}

/// Wire shape of a dose; upstream templates sometimes emit `8.0` for reps
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDose {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<RawDose> for Dose {
    fn from(raw: RawDose) -> Self {
        match raw {
            RawDose::Int(n) => Dose::Count(n),
            RawDose::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Dose::Count(f as i64)
            }
            RawDose::Float(f) => Dose::Text(f.to_string()),
            RawDose::Text(s) => Dose::Text(s),
        }
    }
}

impl<'de> Deserialize<'de> for Dose {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawDose::deserialize(deserializer).map(Dose::from)
    }
}

impl Dose {
    /// Best-effort integer extraction from the leading digits
    ///
    /// Zero counts as "no value", matching how upstream templates leave
    /// placeholder reps.
    pub fn leading_int(&self) -> Option<i64> {
        let value = match self {
            Dose::Count(n) => Some(*n),
            Dose::Text(s) => parse_leading_int(s),
        };
        value.filter(|n| *n != 0)
    }
}

impl From<i64> for Dose {
    fn from(n: i64) -> Self {
        Dose::Count(n)
    }
}

impl From<&str> for Dose {
    fn from(s: &str) -> Self {
        Dose::Text(s.to_string())
    }
}

impl From<String> for Dose {
    fn from(s: String) -> Self {
        Dose::Text(s)
    }
}

impl fmt::Display for Dose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dose::Count(n) => write!(f, "{}", n),
            Dose::Text(s) => write!(f, "{}", s),
        }
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Parse reps from an optional dose, falling back to `default`
pub fn reps_or(reps: Option<&Dose>, default: i64) -> i64 {
    reps.and_then(Dose::leading_int).unwrap_or(default)
}

/// A single exercise entry in a workout
///
/// Structural metadata fields are written only by transformers. Their
/// absence is meaningful and they are never defaulted on output. Fields
/// this engine does not know about are kept in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "ExerciseKind::is_untyped")]
    pub kind: ExerciseKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<Dose>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<Dose>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superset_pair: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emom_minute: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emom_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabata_block: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabata_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub giant_set_order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub giant_set_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast_pair: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Exercise {
    pub fn new(name: impl Into<String>, kind: ExerciseKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Default::default()
        }
    }

    pub fn with_sets(mut self, sets: impl Into<Dose>) -> Self {
        self.sets = Some(sets.into());
        self
    }

    pub fn with_reps(mut self, reps: impl Into<Dose>) -> Self {
        self.reps = Some(reps.into());
        self
    }

    pub fn with_rest(mut self, rest: impl Into<String>) -> Self {
        self.rest = Some(rest.into());
        self
    }

    /// Lowercased name for keyword matching
    pub fn lower_name(&self) -> String {
        self.name.to_lowercase()
    }
}

// ============================================================================
// Workout
// ============================================================================

/// A generated workout document
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    #[serde(default)]
    pub exercises: Vec<Exercise>,

    /// Methodologies applied by the last engine pass that changed anything
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods_applied: Option<Vec<MethodKey>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Workout {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self {
            exercises,
            ..Default::default()
        }
    }
}

// ============================================================================
// Methodology Keys and Candidates
// ============================================================================

/// Identifier of a training methodology
///
/// Aliases collapse onto one variant when parsed (`cluster_set` is
/// `Cluster`, `pap` is `ContrastTraining`). Unrecognised keys are kept
/// verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MethodKey {
    Superset,
    DropSet,
    RestPause,
    MyoReps,
    TempoTraining,
    Circuit,
    BoxingCircuit,
    Emom,
    Tabata,
    GiantSet,
    Cluster,
    ContrastTraining,
    Gvt,
    PlyometricComplex,
    HeavyBagIntervals,
    ShadowBoxingDrills,
    PunchResistanceTraining,
    Other(String),
}

impl MethodKey {
    pub fn as_str(&self) -> &str {
        match self {
            MethodKey::Superset => "superset",
            MethodKey::DropSet => "drop_set",
            MethodKey::RestPause => "rest_pause",
            MethodKey::MyoReps => "myo_reps",
            MethodKey::TempoTraining => "tempo_training",
            MethodKey::Circuit => "circuit",
            MethodKey::BoxingCircuit => "boxing_circuit",
            MethodKey::Emom => "emom",
            MethodKey::Tabata => "tabata",
            MethodKey::GiantSet => "giant_set",
            MethodKey::Cluster => "cluster",
            MethodKey::ContrastTraining => "contrast_training",
            MethodKey::Gvt => "gvt",
            MethodKey::PlyometricComplex => "plyometric_complex",
            MethodKey::HeavyBagIntervals => "heavy_bag_intervals",
            MethodKey::ShadowBoxingDrills => "shadow_boxing_drills",
            MethodKey::PunchResistanceTraining => "punch_resistance_training",
            MethodKey::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "superset" => MethodKey::Superset,
            "drop_set" => MethodKey::DropSet,
            "rest_pause" => MethodKey::RestPause,
            "myo_reps" => MethodKey::MyoReps,
            "tempo_training" => MethodKey::TempoTraining,
            "circuit" => MethodKey::Circuit,
            "boxing_circuit" => MethodKey::BoxingCircuit,
            "emom" => MethodKey::Emom,
            "tabata" => MethodKey::Tabata,
            "giant_set" => MethodKey::GiantSet,
            "cluster" | "cluster_set" => MethodKey::Cluster,
            "contrast_training" | "pap" | "post_activation_potentiation" => {
                MethodKey::ContrastTraining
            }
            "gvt" | "german_volume_training" => MethodKey::Gvt,
            "plyometric_complex" => MethodKey::PlyometricComplex,
            "heavy_bag_intervals" => MethodKey::HeavyBagIntervals,
            "shadow_boxing_drills" => MethodKey::ShadowBoxingDrills,
            "punch_resistance_training" => MethodKey::PunchResistanceTraining,
            _ => MethodKey::Other(s.to_string()),
        }
    }
}

impl From<String> for MethodKey {
    fn from(s: String) -> Self {
        MethodKey::parse(&s)
    }
}

impl From<&str> for MethodKey {
    fn from(s: &str) -> Self {
        MethodKey::parse(s)
    }
}

impl From<MethodKey> for String {
    fn from(key: MethodKey) -> Self {
        key.as_str().to_string()
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A ranked methodology suggestion
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MethodologyCandidate {
    pub key: MethodKey,
    pub score: f64,
    pub reason: String,
}

impl MethodologyCandidate {
    pub fn new(key: impl Into<MethodKey>, score: f64, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            score,
            reason: reason.into(),
        }
    }
}

/// Result of a pairwise compatibility check
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compatibility {
    pub compatible: bool,
    pub reason: String,
}

impl Compatibility {
    pub fn compatible() -> Self {
        Self {
            compatible: true,
            reason: String::new(),
        }
    }

    pub fn incompatible(reason: impl Into<String>) -> Self {
        Self {
            compatible: false,
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Athlete Profile
// ============================================================================

/// Coarse central-nervous-system fatigue classification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CnsState {
    #[default]
    Fresh,
    Fatigued,
    Depleted,
}

impl CnsState {
    /// Fatigued or depleted
    pub fn is_compromised(self) -> bool {
        matches!(self, CnsState::Fatigued | CnsState::Depleted)
    }
}

impl From<String> for CnsState {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "fatigued" => CnsState::Fatigued,
            "depleted" => CnsState::Depleted,
            _ => CnsState::Fresh,
        }
    }
}

impl From<CnsState> for String {
    fn from(state: CnsState) -> Self {
        match state {
            CnsState::Fresh => "fresh".into(),
            CnsState::Fatigued => "fatigued".into(),
            CnsState::Depleted => "depleted".into(),
        }
    }
}

/// Athlete profile as handed over by the upstream pipeline
///
/// Every field is optional; `SelectorParams::from_profile` fills the gaps.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub goal: Option<String>,
    pub phase: Option<String>,
    #[serde(alias = "experience")]
    pub level: Option<String>,
    pub fatigue: Option<f64>,
    #[serde(alias = "timeAvailable")]
    pub duration: Option<u32>,
    pub equipment: Option<Vec<String>>,
    pub sport: Option<String>,
    pub pain_areas: Option<Vec<String>>,
    #[serde(alias = "rpe_tolerance")]
    pub rpe_tolerance: Option<f64>,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub week_number: Option<u32>,
    pub role: Option<String>,
    pub session_type: Option<String>,
    #[serde(default)]
    pub previous_methods: Vec<MethodKey>,
    pub cns_state: Option<CnsState>,
}

// ============================================================================
// Selector Parameters
// ============================================================================

/// Goal family used by the scorer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingGoal {
    Strength,
    Mass,
    Definition,
    Performance,
}

impl TrainingGoal {
    pub fn from_profile_goal(goal: &str) -> Self {
        match goal.trim().to_lowercase().as_str() {
            "strength" | "power" | "forza" | "potenza" => TrainingGoal::Strength,
            "mass" | "hypertrophy" | "muscle" | "massa" | "ipertrofia" => TrainingGoal::Mass,
            "definition" | "fat_loss" | "endurance" | "cut" | "definizione" | "dimagrimento"
            | "resistenza" => TrainingGoal::Definition,
            "performance" | "sport" | "technique" | "athletic" | "tecnica" | "atletica" => {
                TrainingGoal::Performance
            }
            _ => TrainingGoal::Mass,
        }
    }

    /// Catalog `best_for` tags that count as a goal match
    pub fn best_for_tags(self) -> &'static [&'static str] {
        match self {
            TrainingGoal::Strength => &["strength", "power"],
            TrainingGoal::Mass => &["hypertrophy"],
            TrainingGoal::Definition => &["conditioning", "fat_loss", "muscle_endurance"],
            TrainingGoal::Performance => &[
                "power",
                "sport_performance",
                "conditioning",
                "agility",
                "speed_endurance",
            ],
        }
    }
}

/// Mesocycle phase
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
    Accumulation,
    Intensification,
    Peaking,
    Deload,
    Maintenance,
    Rehabilitation,
    FightCamp,
    Other(String),
}

impl TrainingPhase {
    pub fn as_str(&self) -> &str {
        match self {
            TrainingPhase::Accumulation => "accumulation",
            TrainingPhase::Intensification => "intensification",
            TrainingPhase::Peaking => "peaking",
            TrainingPhase::Deload => "deload",
            TrainingPhase::Maintenance => "maintenance",
            TrainingPhase::Rehabilitation => "rehabilitation",
            TrainingPhase::FightCamp => "fight_camp",
            TrainingPhase::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "accumulation" => TrainingPhase::Accumulation,
            "intensification" => TrainingPhase::Intensification,
            "peaking" => TrainingPhase::Peaking,
            "deload" => TrainingPhase::Deload,
            "maintenance" => TrainingPhase::Maintenance,
            "rehabilitation" | "rehab" => TrainingPhase::Rehabilitation,
            "fight_camp" => TrainingPhase::FightCamp,
            other => TrainingPhase::Other(other.to_string()),
        }
    }
}

/// Training experience, ordered from least to most
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    /// Unknown levels rank as beginner
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "intermediate" => ExperienceLevel::Intermediate,
            "advanced" => ExperienceLevel::Advanced,
            _ => ExperienceLevel::Beginner,
        }
    }
}

/// Fully defaulted view of a profile, fed to the scorer and filters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectorParams {
    pub goal: TrainingGoal,
    pub phase: TrainingPhase,
    pub experience: ExperienceLevel,
    pub fatigue: f64,
    pub time_available: u32,
    pub equipment: Vec<String>,
    pub sport: String,
    pub pain_areas: Vec<String>,
    pub rpe_tolerance: f64,
    pub age: u32,
    pub weight: f64,
    pub week_number: u32,
    pub role: Option<String>,
    pub session_type: String,
    pub previous_methods: Vec<MethodKey>,
    pub cns_state: CnsState,
}

impl SelectorParams {
    /// Build selector parameters, taking every missing field from `defaults`
    pub fn from_profile(profile: &Profile, defaults: &SelectorConfig) -> Self {
        Self {
            goal: profile
                .goal
                .as_deref()
                .map(TrainingGoal::from_profile_goal)
                .unwrap_or(TrainingGoal::Mass),
            phase: TrainingPhase::parse(profile.phase.as_deref().unwrap_or(&defaults.phase)),
            experience: ExperienceLevel::parse(
                profile.level.as_deref().unwrap_or(&defaults.experience),
            ),
            fatigue: profile.fatigue.unwrap_or(defaults.fatigue),
            time_available: profile.duration.unwrap_or(defaults.time_available),
            equipment: profile
                .equipment
                .clone()
                .unwrap_or_else(|| defaults.equipment.clone()),
            sport: profile.sport.clone().unwrap_or_else(|| defaults.sport.clone()),
            pain_areas: profile.pain_areas.clone().unwrap_or_default(),
            rpe_tolerance: profile.rpe_tolerance.unwrap_or(defaults.rpe_tolerance),
            age: profile.age.unwrap_or(defaults.age),
            weight: profile.weight.unwrap_or(defaults.weight),
            week_number: profile.week_number.unwrap_or(1),
            role: profile.role.clone(),
            session_type: profile
                .session_type
                .clone()
                .unwrap_or_else(|| defaults.session_type.clone()),
            previous_methods: profile.previous_methods.clone(),
            cns_state: profile.cns_state.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_int_extraction() {
        assert_eq!(Dose::from("12").leading_int(), Some(12));
        assert_eq!(Dose::from("8-10").leading_int(), Some(8));
        assert_eq!(Dose::from("  6 reps").leading_int(), Some(6));
        assert_eq!(Dose::from("max").leading_int(), None);
        assert_eq!(Dose::from("0").leading_int(), None);
        assert_eq!(Dose::Count(10).leading_int(), Some(10));
        assert_eq!(reps_or(None, 12), 12);
        assert_eq!(reps_or(Some(&Dose::from("AMRAP")), 8), 8);
    }

    #[test]
    fn test_float_doses_load() {
        let json = r#"{"exercises": [
            {"name": "Squat", "type": "strength", "sets": 3.0, "reps": 8.0},
            {"name": "Curl", "sets": 3, "reps": 8.5}
        ]}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();

        let squat = &workout.exercises[0];
        assert_eq!(squat.sets, Some(Dose::Count(3)));
        assert_eq!(reps_or(squat.reps.as_ref(), 12), 8);

        let curl = &workout.exercises[1];
        assert_eq!(curl.reps, Some(Dose::Text("8.5".into())));
        assert_eq!(reps_or(curl.reps.as_ref(), 12), 8);
    }

    #[test]
    fn test_goal_aliases() {
        assert_eq!(TrainingGoal::from_profile_goal("forza"), TrainingGoal::Strength);
        assert_eq!(TrainingGoal::from_profile_goal("potenza"), TrainingGoal::Strength);
        assert_eq!(TrainingGoal::from_profile_goal("ipertrofia"), TrainingGoal::Mass);
        assert_eq!(TrainingGoal::from_profile_goal("dimagrimento"), TrainingGoal::Definition);
        assert_eq!(TrainingGoal::from_profile_goal("resistenza"), TrainingGoal::Definition);
        assert_eq!(TrainingGoal::from_profile_goal("atletica"), TrainingGoal::Performance);
        assert_eq!(TrainingGoal::from_profile_goal("bulk"), TrainingGoal::Mass);
    }

    #[test]
    fn test_exercise_kind_parsing() {
        assert_eq!(ExerciseKind::from(Some("Strength".to_string())), ExerciseKind::Strength);
        assert_eq!(ExerciseKind::from(Some(String::new())), ExerciseKind::Untyped);
        assert_eq!(ExerciseKind::from(None), ExerciseKind::Untyped);
        assert_eq!(
            ExerciseKind::from(Some("cardio".to_string())),
            ExerciseKind::Other("cardio".into())
        );
    }

    #[test]
    fn test_exercise_json_preserves_unknown_fields() {
        let json = r#"{
            "name": "Back Squat",
            "type": "strength",
            "sets": 4,
            "reps": "6-8",
            "rest": "120s",
            "notes": "belt optional"
        }"#;

        let ex: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(ex.kind, ExerciseKind::Strength);
        assert_eq!(ex.sets, Some(Dose::Count(4)));
        assert_eq!(ex.reps, Some(Dose::Text("6-8".into())));
        assert_eq!(ex.extra.get("notes").and_then(|v| v.as_str()), Some("belt optional"));

        let out = serde_json::to_value(&ex).unwrap();
        assert_eq!(out["notes"], "belt optional");
        assert!(out.get("tempo").is_none());
        assert!(out.get("supersetPair").is_none());
    }

    #[test]
    fn test_untyped_exercise_omits_type() {
        let ex = Exercise::new("Cable Fly", ExerciseKind::Untyped);
        let out = serde_json::to_value(&ex).unwrap();
        assert!(out.get("type").is_none());
    }

    #[test]
    fn test_method_key_aliases() {
        assert_eq!(MethodKey::parse("cluster_set"), MethodKey::Cluster);
        assert_eq!(MethodKey::parse("pap"), MethodKey::ContrastTraining);
        assert_eq!(MethodKey::parse("german_volume_training"), MethodKey::Gvt);
        assert_eq!(MethodKey::parse("boxing_circuit"), MethodKey::BoxingCircuit);
        assert_eq!(
            MethodKey::parse("farmer_carry_finisher"),
            MethodKey::Other("farmer_carry_finisher".into())
        );
        assert_eq!(MethodKey::Cluster.to_string(), "cluster");
    }

    #[test]
    fn test_profile_defaults() {
        let profile: Profile = serde_json::from_str("{}").unwrap();
        let params = SelectorParams::from_profile(&profile, &SelectorConfig::default());

        assert_eq!(params.goal, TrainingGoal::Mass);
        assert_eq!(params.fatigue, 5.0);
        assert_eq!(params.rpe_tolerance, 7.0);
        assert_eq!(params.age, 30);
        assert_eq!(params.weight, 75.0);
        assert_eq!(params.week_number, 1);
        assert_eq!(params.cns_state, CnsState::Fresh);
        assert_eq!(params.experience, ExperienceLevel::Intermediate);
        assert_eq!(params.phase, TrainingPhase::Accumulation);
    }

    #[test]
    fn test_profile_parses_camel_case() {
        let json = r#"{
            "goal": "strength",
            "cnsState": "depleted",
            "previousMethods": ["superset", "cluster_set"],
            "rpe_tolerance": 9
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.cns_state, Some(CnsState::Depleted));
        assert_eq!(
            profile.previous_methods,
            vec![MethodKey::Superset, MethodKey::Cluster]
        );
        assert_eq!(profile.rpe_tolerance, Some(9.0));
    }
}
