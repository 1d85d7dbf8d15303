use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

mod capture;
mod db;
mod grades;
mod models;
mod report;

use models::{GradeBand, GradeOutcome};

#[derive(Parser)]
#[command(name = "course-grade-projector")]
#[command(about = "Weighted grade tracker and threshold projector for university courses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load a realistic sample course
    Seed,
    /// Import assignment records from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Parse assignment rows out of a saved grade-report text file
    Capture {
        #[arg(long)]
        report: PathBuf,
        #[arg(long)]
        course: String,
        /// Course title to record when the course is new
        #[arg(long)]
        title: Option<String>,
    },
    /// Show the current weighted grade and required scores per band
    Grade {
        #[arg(long)]
        course: String,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        course: String,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let stored = db::import_csv(&pool, &csv).await?;
            println!("Stored {stored} assignments from {}.", csv.display());
        }
        Commands::Capture {
            report,
            course,
            title,
        } => {
            let text = std::fs::read_to_string(&report)
                .with_context(|| format!("failed to read {}", report.display()))?;
            let rows = capture::parse_report_text(&text);

            if rows.is_empty() {
                println!("No assignment rows recognized in {}.", report.display());
                return Ok(());
            }

            let title = title.unwrap_or_else(|| course.clone());
            let course_id = db::upsert_course(&pool, &course, &title).await?;
            let stored = db::store_captured(&pool, course_id, &rows).await?;
            println!("Stored {stored} assignments for {course}.");
        }
        Commands::Grade { course, json } => {
            let Some(found) = db::fetch_course(&pool, &course).await? else {
                println!("Unknown course {course}. Import or capture records first.");
                return Ok(());
            };
            let records = db::fetch_assignments(&pool, found.id).await?;

            if records.is_empty() {
                println!("No assignment records for {course}.");
                return Ok(());
            }

            let summary = grades::aggregate(&records);
            let band = GradeBand::from_percentage(summary.current_percentage);
            let projections = if summary.missing_weight > 0.0 {
                Some(grades::project_targets(&summary))
            } else {
                None
            };

            if json {
                let outcome = GradeOutcome {
                    course: found.code,
                    band,
                    summary,
                    projections,
                };
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                return Ok(());
            }

            println!(
                "Current grade for {}: {} ({})",
                found.code,
                report::format_percentage(Some(summary.current_percentage)),
                band.code()
            );
            println!(
                "Completed weight: {:.0}% of {:.0}%",
                summary.completed_weight * 100.0,
                summary.total_weight * 100.0
            );
            if summary.weight_sum_warning {
                println!(
                    "Warning: recorded weights total {:.0}%, not 100%; results may be incomplete.",
                    summary.total_weight * 100.0
                );
            }

            match projections {
                Some(projections) => {
                    println!(
                        "Required average on the remaining {:.0}%:",
                        summary.missing_weight * 100.0
                    );
                    for projection in &projections {
                        println!(
                            "- {} (>={:.0}%): {}",
                            projection.band.code(),
                            projection.threshold,
                            report::format_requirement(&projection.requirement)
                        );
                    }
                }
                None => println!("All weighted work is graded."),
            }
        }
        Commands::Report { course, out } => {
            let Some(found) = db::fetch_course(&pool, &course).await? else {
                println!("Unknown course {course}. Import or capture records first.");
                return Ok(());
            };
            let records = db::fetch_assignments(&pool, found.id).await?;
            let summary = grades::aggregate(&records);
            let projections = grades::project_targets(&summary);

            let report = report::build_report(&found, &records, &summary, &projections);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
