use clap::{Parser, Subcommand};
use liftplan_core::catalog::build_default_catalog;
use liftplan_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "liftplan")]
#[command(about = "Training methodology selection and workout structuring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the best-fitting methodologies to a workout
    Apply {
        /// Workout JSON file
        #[arg(long)]
        workout: PathBuf,

        /// Athlete profile JSON file (defaults when omitted)
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Write the result here instead of stdout
        #[arg(long, conflicts_with = "in_place")]
        out: Option<PathBuf>,

        /// Rewrite the workout file itself
        #[arg(long)]
        in_place: bool,

        /// Show the ranking decision without touching the workout
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the filtered methodology ranking for a profile
    Rank {
        /// Athlete profile JSON file (defaults when omitted)
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// List the methodology catalog
    Methods,
}

fn main() -> Result<()> {
    liftplan_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!("Effective config: {:?}", config);
    let engine = MethodEngine::new(config);

    match cli.command {
        Commands::Apply {
            workout,
            profile,
            out,
            in_place,
            dry_run,
        } => cmd_apply(
            &engine,
            &workout,
            profile.as_deref(),
            out.as_deref(),
            in_place,
            dry_run,
        ),
        Commands::Rank { profile } => cmd_rank(&engine, profile.as_deref()),
        Commands::Methods => cmd_methods(),
    }
}

fn load_profile(path: Option<&Path>) -> Result<Profile> {
    match path {
        Some(path) => Profile::load(path),
        None => Ok(Profile::default()),
    }
}

fn print_ranking(candidates: &[MethodologyCandidate]) {
    if candidates.is_empty() {
        println!("No suitable methodologies");
        return;
    }

    for (i, c) in candidates.iter().enumerate() {
        println!("{}. {:<26} {:>6.1}  {}", i + 1, c.key, c.score, c.reason);
    }
}

fn cmd_apply(
    engine: &MethodEngine,
    workout_path: &Path,
    profile_path: Option<&Path>,
    out: Option<&Path>,
    in_place: bool,
    dry_run: bool,
) -> Result<()> {
    let profile = load_profile(profile_path)?;

    if dry_run {
        let workout = Workout::load(workout_path)?;
        let main = classify_main(&workout.exercises);

        println!("Dry run - workout not modified");
        println!(
            "Main exercises: {} (need {})",
            main.len(),
            engine.config().engine.min_main_exercises
        );
        print_ranking(&engine.rank(&profile)?);
        return Ok(());
    }

    if in_place {
        let mut applied = Vec::new();
        Workout::update(workout_path, |workout| {
            applied = engine.apply(workout, &profile);
            Ok(())
        })?;
        print_applied(&applied);
        return Ok(());
    }

    let mut workout = Workout::load(workout_path)?;
    let applied = engine.apply(&mut workout, &profile);

    match out {
        Some(out) => {
            workout.save(out)?;
            print_applied(&applied);
        }
        None => println!("{}", serde_json::to_string_pretty(&workout)?),
    }

    Ok(())
}

fn print_applied(applied: &[MethodKey]) {
    if applied.is_empty() {
        println!("No methodologies applied");
    } else {
        let keys: Vec<&str> = applied.iter().map(MethodKey::as_str).collect();
        println!("Applied: {}", keys.join(", "));
    }
}

fn cmd_rank(engine: &MethodEngine, profile_path: Option<&Path>) -> Result<()> {
    let profile = load_profile(profile_path)?;
    print_ranking(&engine.rank(&profile)?);
    Ok(())
}

fn cmd_methods() -> Result<()> {
    let catalog = build_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::Other("Invalid methodology catalog".into()));
    }

    for method in &catalog.methods {
        println!("{:<26} {}", method.key, method.name);
    }
    Ok(())
}
