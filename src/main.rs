//! Cadence - Spaced-Repetition Review Scheduler
//!
//! CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use cadence::cli::add::{AddOptions, AddOutput};
use cadence::cli::due::{DueOptions, DueOutput};
use cadence::cli::grade::{GradeOptions, GradeOutput};
use cadence::cli::plan::PlanOutput;
use cadence::cli::predict::PredictOutput;
use cadence::cli::recommend::{RecommendOptions, RecommendOutput};
use cadence::cli::stats::StatsOutput;
use cadence::config::{stats_snapshot_path, Config};
use cadence::{
    AddCommand, DueCommand, FileReviewStore, GradeCommand, PlanCommand, PredictCommand,
    RecommendCommand, StatsCommand,
};

// =============================================================================
// CLI Definition
// =============================================================================

/// Cadence - Spaced-Repetition Review Scheduler
#[derive(Parser)]
#[command(name = "cadence")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an item to the learning set
    Add {
        /// The term to learn
        term: String,
        /// Its meaning or translation
        meaning: String,
        /// Content difficulty (easy, medium, hard)
        #[arg(long, short)]
        difficulty: Option<String>,
        /// Grouping category
        #[arg(long, short)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Grade a review response for an item
    Grade {
        /// The item id
        id: String,
        /// Response quality (again, hard, good, easy)
        quality: String,
        /// Also run the Leitner escalation pass
        #[arg(long)]
        escalate: bool,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// List items due for review, forced reviews first
    Due {
        /// Maximum number of results
        #[arg(long, short)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Build a priority-ranked review session
    Recommend {
        /// Session size (defaults to the configured maximum)
        #[arg(long, short)]
        count: Option<usize>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show the upcoming review horizon
    Plan {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show session efficiency statistics
    Stats {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Predict learning progress and days to mastery
    Predict {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("cadence error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load();
    let now = chrono::Utc::now();

    match cli.command {
        Commands::Add {
            term,
            meaning,
            difficulty,
            category,
            json,
            quiet,
        } => {
            let store = open_store(&config)?;
            let output = AddCommand::new(store).run(
                &AddOptions {
                    term,
                    meaning,
                    difficulty,
                    category,
                },
                now,
            );
            print_add(&output, json, quiet)?;
            Ok(exit_for(output.success))
        }

        Commands::Grade {
            id,
            quality,
            escalate,
            json,
            quiet,
        } => {
            let store = open_store(&config)?;
            let output = GradeCommand::new(store, snapshot_path()).run(
                &GradeOptions {
                    id,
                    quality,
                    escalate,
                },
                now,
            );
            print_grade(&output, json, quiet)?;
            Ok(exit_for(output.success))
        }

        Commands::Due { limit, json, quiet } => {
            let store = open_store(&config)?;
            let output = DueCommand::new(store).run(&DueOptions { limit }, now);
            print_due(&output, json, quiet)?;
            Ok(exit_for(output.success))
        }

        Commands::Recommend { count, json, quiet } => {
            let store = open_store(&config)?;
            let output =
                RecommendCommand::new(store, config).run(&RecommendOptions { count }, now);
            print_recommend(&output, json, quiet)?;
            Ok(exit_for(output.success))
        }

        Commands::Plan { json, quiet } => {
            let store = open_store(&config)?;
            let output = PlanCommand::new(store).run(now);
            print_plan(&output, json, quiet)?;
            Ok(exit_for(output.success))
        }

        Commands::Stats { json, quiet } => {
            let path = snapshot_path()
                .ok_or("could not determine stats snapshot path (no home directory)")?;
            let output = StatsCommand::new(path).run();
            print_stats(&output, json, quiet)?;
            Ok(exit_for(output.success))
        }

        Commands::Predict { json, quiet } => {
            let store = open_store(&config)?;
            let path = snapshot_path()
                .ok_or("could not determine stats snapshot path (no home directory)")?;
            let output = PredictCommand::new(store, path).run();
            print_predict(&output, json, quiet)?;
            Ok(exit_for(output.success))
        }
    }
}

/// Open the file-backed store at the configured location.
fn open_store(config: &Config) -> Result<FileReviewStore, Box<dyn std::error::Error>> {
    let dir = config
        .resolved_data_dir()
        .ok_or("could not determine data directory (no home directory)")?;
    Ok(FileReviewStore::with_dir(dir)?)
}

/// The stats snapshot path, if a home directory is available.
fn snapshot_path() -> Option<PathBuf> {
    stats_snapshot_path()
}

fn exit_for(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

// =============================================================================
// Output Printing
// =============================================================================

fn print_add(output: &AddOutput, json: bool, quiet: bool) -> serde_json::Result<()> {
    if quiet {
        return Ok(());
    }
    if json {
        println!("{}", serde_json::to_string_pretty(output)?);
        return Ok(());
    }
    if output.success {
        println!(
            "added '{}' ({}) - first review {}",
            output.term.as_deref().unwrap_or(""),
            output.difficulty.as_deref().unwrap_or(""),
            output.next_review.as_deref().unwrap_or("")
        );
    } else {
        eprintln!("add failed: {}", output.error.as_deref().unwrap_or("unknown"));
    }
    Ok(())
}

fn print_grade(output: &GradeOutput, json: bool, quiet: bool) -> serde_json::Result<()> {
    if quiet {
        return Ok(());
    }
    if json {
        println!("{}", serde_json::to_string_pretty(output)?);
        return Ok(());
    }
    if output.success {
        println!(
            "graded '{}' as {} - mastery {:.1}, next review {}{}",
            output.id.as_deref().unwrap_or(""),
            output.quality.as_deref().unwrap_or(""),
            output.mastery_level.unwrap_or(0.0),
            output.next_review.as_deref().unwrap_or(""),
            if output.force_review == Some(true) {
                " (forced review pending)"
            } else {
                ""
            }
        );
    } else {
        eprintln!(
            "grade failed: {}",
            output.error.as_deref().unwrap_or("unknown")
        );
    }
    Ok(())
}

fn print_due(output: &DueOutput, json: bool, quiet: bool) -> serde_json::Result<()> {
    if quiet {
        return Ok(());
    }
    if json {
        println!("{}", serde_json::to_string_pretty(output)?);
        return Ok(());
    }
    if output.success {
        println!("{} item(s) due", output.count);
        for item in &output.items {
            println!(
                "  {}{} - {} (mastery {:.1}, {} reviews)",
                if item.forced { "! " } else { "" },
                item.term,
                item.meaning,
                item.mastery_level,
                item.review_count
            );
        }
    } else {
        eprintln!("due failed: {}", output.error.as_deref().unwrap_or("unknown"));
    }
    Ok(())
}

fn print_recommend(output: &RecommendOutput, json: bool, quiet: bool) -> serde_json::Result<()> {
    if quiet {
        return Ok(());
    }
    if json {
        println!("{}", serde_json::to_string_pretty(output)?);
        return Ok(());
    }
    if output.success {
        println!("{} recommendation(s)", output.count);
        for rec in &output.recommendations {
            println!(
                "  {}{} (score {:.0}, mastery {:.1})",
                if rec.forced { "! " } else { "" },
                rec.term,
                rec.score,
                rec.mastery_level
            );
        }
    } else {
        eprintln!(
            "recommend failed: {}",
            output.error.as_deref().unwrap_or("unknown")
        );
    }
    Ok(())
}

fn print_plan(output: &PlanOutput, json: bool, quiet: bool) -> serde_json::Result<()> {
    if quiet {
        return Ok(());
    }
    if json {
        println!("{}", serde_json::to_string_pretty(output)?);
        return Ok(());
    }
    if output.success {
        println!("today:      {}", output.today.len());
        println!("this week:  {}", output.this_week.len());
        println!("this month: {}", output.this_month.len());
        println!("later:      {}", output.later.len());
    } else {
        eprintln!("plan failed: {}", output.error.as_deref().unwrap_or("unknown"));
    }
    Ok(())
}

fn print_stats(output: &StatsOutput, json: bool, quiet: bool) -> serde_json::Result<()> {
    if quiet {
        return Ok(());
    }
    if json {
        println!("{}", serde_json::to_string_pretty(output)?);
        return Ok(());
    }
    match &output.efficiency {
        Some(eff) => {
            println!(
                "accuracy {}% ({}/{} correct), streak {} day(s)",
                eff.accuracy_percent, eff.correct_reviews, eff.total_reviews, eff.learning_streak
            );
        }
        None => {
            eprintln!(
                "stats failed: {}",
                output.error.as_deref().unwrap_or("unknown")
            );
        }
    }
    Ok(())
}

fn print_predict(output: &PredictOutput, json: bool, quiet: bool) -> serde_json::Result<()> {
    if quiet {
        return Ok(());
    }
    if json {
        println!("{}", serde_json::to_string_pretty(output)?);
        return Ok(());
    }
    match &output.prediction {
        Some(p) => {
            println!(
                "{} of {} mastered ({}%), {} learned",
                p.mastered_words, p.total_words, p.progress_percentage, p.learned_words
            );
            match p.estimated_days_to_master {
                Some(days) => println!(
                    "at {:.1}/day, roughly {:.0} day(s) to mastery",
                    p.daily_learning_rate,
                    days.ceil()
                ),
                None => println!("no learning rate yet - grade some reviews first"),
            }
        }
        None => {
            eprintln!(
                "predict failed: {}",
                output.error.as_deref().unwrap_or("unknown")
            );
        }
    }
    Ok(())
}
