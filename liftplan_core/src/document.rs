//! Workout and profile documents on disk.
//!
//! Documents are JSON. Reads take a shared lock; writes go to a locked
//! temp file in the same directory which is then renamed over the target.

use crate::{Error, Profile, Result, Workout};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

fn read_locked<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    if !path.exists() {
        return Err(Error::Document(format!(
            "{} file not found: {}",
            what,
            path.display()
        )));
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let mut contents = String::new();
    let read = BufReader::new(&file).read_to_string(&mut contents);
    file.unlock()?;
    read?;

    let value = serde_json::from_str(&contents).map_err(|e| {
        tracing::warn!("Failed to parse {} file {:?}: {}", what, path, e);
        Error::Json(e)
    })?;

    tracing::debug!("Loaded {} from {:?}", what, path);
    Ok(value)
}

fn write_atomic<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Saved document to {:?}", path);
    Ok(())
}

impl Workout {
    /// Load a workout document; a missing or malformed file is an error
    pub fn load(path: &Path) -> Result<Self> {
        read_locked(path, "workout")
    }

    /// Write the workout as pretty JSON, replacing `path` atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        write_atomic(self, path)
    }

    /// Load, modify and save back in one step
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut Workout) -> Result<()>,
    {
        let mut workout = Self::load(path)?;
        f(&mut workout)?;
        workout.save(path)?;
        Ok(workout)
    }
}

impl Profile {
    /// Load an athlete profile; a missing or malformed file is an error
    pub fn load(path: &Path) -> Result<Self> {
        read_locked(path, "profile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CnsState, Exercise, ExerciseKind, MethodKey};

    const WORKOUT_JSON: &str = r#"{
        "title": "Push day",
        "exercises": [
            {"name": "Bench Press", "type": "strength", "sets": 4, "reps": "8-10", "rest": "120s", "notes": "pause reps"},
            {"name": "Dips", "sets": "3", "reps": 12}
        ]
    }"#;

    #[test]
    fn test_load_preserves_unknown_fields() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("workout.json");
        std::fs::write(&path, WORKOUT_JSON).unwrap();

        let workout = Workout::load(&path).unwrap();
        assert_eq!(workout.exercises.len(), 2);
        assert_eq!(workout.exercises[0].kind, ExerciseKind::Strength);
        assert!(workout.exercises[1].kind.is_untyped());
        assert_eq!(workout.extra["title"], "Push day");

        workout.save(&path).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["title"], "Push day");
        assert_eq!(raw["exercises"][0]["notes"], "pause reps");
        assert_eq!(raw["exercises"][0]["type"], "strength");
        assert!(raw["exercises"][1].get("type").is_none());
        assert!(raw["exercises"][0].get("supersetPair").is_none());
        assert!(raw.get("methodsApplied").is_none());
    }

    #[test]
    fn test_missing_file_is_document_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = Workout::load(&temp_dir.path().join("missing.json"));

        assert!(matches!(result, Err(Error::Document(_))));
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Profile::load(&path), Err(Error::Json(_))));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out").join("nested").join("w.json");

        Workout::new(vec![Exercise::new("Squat", ExerciseKind::Strength)])
            .save(&path)
            .unwrap();
        assert_eq!(Workout::load(&path).unwrap().exercises[0].name, "Squat");
    }

    #[test]
    fn test_update_pattern() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("workout.json");
        std::fs::write(&path, WORKOUT_JSON).unwrap();

        Workout::update(&path, |w| {
            w.methods_applied = Some(vec![MethodKey::Superset]);
            Ok(())
        })
        .unwrap();

        let loaded = Workout::load(&path).unwrap();
        assert_eq!(loaded.methods_applied, Some(vec![MethodKey::Superset]));
    }

    #[test]
    fn test_profile_accepts_aliases() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("profile.json");
        std::fs::write(
            &path,
            r#"{"goal": "strength", "experience": "advanced", "timeAvailable": 40,
                "cnsState": "depleted", "previousMethods": ["pap", "superset"]}"#,
        )
        .unwrap();

        let profile = Profile::load(&path).unwrap();
        assert_eq!(profile.level.as_deref(), Some("advanced"));
        assert_eq!(profile.duration, Some(40));
        assert_eq!(profile.cns_state, Some(CnsState::Depleted));
        assert_eq!(
            profile.previous_methods,
            vec![MethodKey::ContrastTraining, MethodKey::Superset]
        );
    }
}
