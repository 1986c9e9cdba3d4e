//! gcstats CLI - command-line interface for GoalConnect Stats
//!
//! Commands:
//! - summarize: Build a dashboard report from an activity batch
//! - classify: Classify goals against a reference date
//! - validate: Validate an activity batch against the input schema
//! - doctor: Diagnose configuration and environment
//! - schema: Print schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Datelike, NaiveDate, Utc};
use goalconnect_stats::schema::{RawActivityBatch, RawGoal, RecordAdapter, SCHEMA_VERSION};
use goalconnect_stats::status::ClassifierConfig;
use goalconnect_stats::{StatsEngine, PRODUCER_NAME, REPORT_VERSION, STATS_VERSION};

/// gcstats - Activity aggregation and status engine for GoalConnect
#[derive(Parser)]
#[command(name = "gcstats")]
#[command(author = "GoalConnect")]
#[command(version = STATS_VERSION)]
#[command(about = "Derive dashboard stats from activity records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a dashboard report from an activity batch
    Summarize {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Reference date (YYYY-MM-DD); defaults to the current date
        #[arg(long)]
        today: Option<String>,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        format: OutputFormat,

        /// Fixed report instance id, for reproducible output
        #[arg(long)]
        instance_id: Option<String>,

        /// Due-soon window in days
        #[arg(long, default_value = "14")]
        due_soon_days: i64,

        /// Behind threshold as a fraction of expected pace
        #[arg(long, default_value = "0.85")]
        behind_ratio: f64,
    },

    /// Classify goals against a reference date
    Classify {
        /// Input file with a JSON array of goals (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Reference date (YYYY-MM-DD); defaults to the current date
        #[arg(long)]
        today: Option<String>,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Validate an activity batch against the input schema
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose configuration and environment
    Doctor {
        /// Check an activity batch file
        #[arg(long)]
        batch: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print (input or output)
        #[arg(value_enum)]
        schema_type: SchemaType,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// JSON array of records
    Json,
    /// Newline-delimited JSON (one record per line)
    Ndjson,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (goalconnect.activity.v1)
    Input,
    /// Output schema (dashboard report)
    Output,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), GcStatsError> {
    match cli.command {
        Commands::Summarize {
            input,
            output,
            today,
            format,
            instance_id,
            due_soon_days,
            behind_ratio,
        } => cmd_summarize(
            &input,
            &output,
            today.as_deref(),
            format,
            instance_id,
            due_soon_days,
            behind_ratio,
        ),

        Commands::Classify {
            input,
            today,
            input_format,
            json,
        } => cmd_classify(&input, today.as_deref(), input_format, json),

        Commands::Validate { input, json } => cmd_validate(&input, json),

        Commands::Doctor { batch, json } => cmd_doctor(batch.as_deref(), json),

        Commands::Schema { schema_type } => cmd_schema(schema_type),
    }
}

fn read_input(path: &PathBuf) -> Result<String, GcStatsError> {
    if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn resolve_today(arg: Option<&str>) -> Result<NaiveDate, GcStatsError> {
    match arg {
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| GcStatsError::ParseError(format!("'{value}' is not a YYYY-MM-DD date"))),
        None => Ok(Utc::now().date_naive()),
    }
}

fn cmd_summarize(
    input: &PathBuf,
    output: &PathBuf,
    today: Option<&str>,
    format: OutputFormat,
    instance_id: Option<String>,
    due_soon_days: i64,
    behind_ratio: f64,
) -> Result<(), GcStatsError> {
    let input_data = read_input(input)?;
    let today = resolve_today(today)?;

    let config = ClassifierConfig {
        due_soon_days,
        behind_ratio,
    };
    let mut engine = StatsEngine::with_config(config);
    if let Some(id) = instance_id {
        engine = engine.with_instance_id(id);
    }

    let pretty = engine.dashboard_from_json(&input_data, today, Utc::now())?;

    let output_data = match format {
        OutputFormat::JsonPretty => pretty,
        OutputFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(&pretty)?;
            serde_json::to_string(&value)?
        }
    };

    if output.to_string_lossy() == "-" {
        println!("{output_data}");
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_classify(
    input: &PathBuf,
    today: Option<&str>,
    input_format: InputFormat,
    json: bool,
) -> Result<(), GcStatsError> {
    let input_data = read_input(input)?;
    let today = resolve_today(today)?;

    let raw_goals: Vec<RawGoal> = match input_format {
        InputFormat::Json => RecordAdapter::parse_array(&input_data)?,
        InputFormat::Ndjson => RecordAdapter::parse_ndjson(&input_data)?,
    };

    if raw_goals.is_empty() {
        return Err(GcStatsError::NoRecords);
    }

    let goals = RecordAdapter::goals(&raw_goals)?;
    let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
    let summary = goalconnect_stats::pipeline::goal_summary(
        &goals,
        today,
        year_start,
        &ClassifierConfig::default(),
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{:<6} {:<40} {:<16} {:>9}", "ID", "TITLE", "STATUS", "PROGRESS");
        for entry in &summary.goals {
            println!(
                "{:<6} {:<40} {:<16} {:>8}%",
                entry.id,
                truncate(&entry.title, 40),
                entry.status.as_str(),
                entry.progress_percent
            );
        }
        println!();
        for (status, count) in &summary.counts {
            println!("  {status}: {count}");
        }
    }

    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

fn cmd_validate(input: &PathBuf, json: bool) -> Result<(), GcStatsError> {
    let input_data = read_input(input)?;
    let batch: RawActivityBatch = serde_json::from_str(&input_data)?;

    let total = batch.habit_logs.len()
        + batch.goals.len()
        + batch.progress.len()
        + batch.climb_sessions.len();
    let issues = RecordAdapter::validate_batch(&batch);

    let report = ValidationReport {
        schema: SCHEMA_VERSION,
        total_records: total,
        valid_records: total - issues.len(),
        invalid_records: issues.len(),
        issues,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Schema:          {}", report.schema);
        println!("Total records:   {}", report.total_records);
        println!("Valid records:   {}", report.valid_records);
        println!("Invalid records: {}", report.invalid_records);

        if !report.issues.is_empty() {
            println!("\nIssues:");
            for issue in &report.issues {
                println!(
                    "  - {}[{}]: {}",
                    issue.section, issue.index, issue.error
                );
            }
        }
    }

    if report.invalid_records > 0 {
        Err(GcStatsError::ValidationFailed(report.invalid_records))
    } else {
        Ok(())
    }
}

fn cmd_doctor(batch: Option<&std::path::Path>, json: bool) -> Result<(), GcStatsError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "engine_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("goalconnect-stats version {STATS_VERSION}"),
    });

    checks.push(DoctorCheck {
        name: "input_schema".to_string(),
        status: CheckStatus::Ok,
        message: format!("Input schema: {SCHEMA_VERSION}"),
    });

    checks.push(DoctorCheck {
        name: "report_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Report payload version: {REPORT_VERSION}"),
    });

    if let Some(batch_path) = batch {
        if batch_path.exists() {
            match fs::read_to_string(batch_path) {
                Ok(content) => match serde_json::from_str::<RawActivityBatch>(&content) {
                    Ok(parsed) => {
                        let issues = RecordAdapter::validate_batch(&parsed);
                        if issues.is_empty() {
                            checks.push(DoctorCheck {
                                name: "batch".to_string(),
                                status: CheckStatus::Ok,
                                message: "Batch file valid".to_string(),
                            });
                        } else {
                            checks.push(DoctorCheck {
                                name: "batch".to_string(),
                                status: CheckStatus::Error,
                                message: format!("{} records failed validation", issues.len()),
                            });
                        }
                    }
                    Err(e) => {
                        checks.push(DoctorCheck {
                            name: "batch".to_string(),
                            status: CheckStatus::Error,
                            message: format!("Invalid batch JSON: {e}"),
                        });
                    }
                },
                Err(e) => {
                    checks.push(DoctorCheck {
                        name: "batch".to_string(),
                        status: CheckStatus::Error,
                        message: format!("Cannot read batch file: {e}"),
                    });
                }
            }
        } else {
            checks.push(DoctorCheck {
                name: "batch".to_string(),
                status: CheckStatus::Warning,
                message: "Batch file does not exist".to_string(),
            });
        }
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (batch mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: STATS_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("gcstats Doctor Report");
        println!("=====================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(GcStatsError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn cmd_schema(schema_type: SchemaType) -> Result<(), GcStatsError> {
    match schema_type {
        SchemaType::Input => {
            println!("Input Schema: {SCHEMA_VERSION}");
            println!();
            println!("An activity batch is a JSON object with four record sections:");
            println!();
            println!("1. habitLogs - one row per habit per day");
            println!("   - habitId, date (YYYY-MM-DD), completed");
            println!();
            println!("2. goals - tracked goals with progress");
            println!("   - id, title, currentValue, targetValue, dueDate");
            println!("   - optional: completed, goalType (count, binary, milestone)");
            println!();
            println!("3. progress - incremental contributions toward a goal");
            println!("   - goalId, date, value (multiple rows per date are summed)");
            println!();
            println!("4. climbSessions - Kilter Board sessions");
            println!("   - sessionDate, durationMinutes, maxGrade");
            println!("   - climbs: [{{ grade, attempts, sent }}]");
            println!();
            println!("Optional batch settings: habitCount, bodyWeightLbs");
        }
        SchemaType::Output => {
            println!("Output Schema: dashboard report v{REPORT_VERSION}");
            println!();
            println!("The report payload contains:");
            println!();
            println!("- reportVersion: Payload version ({REPORT_VERSION})");
            println!("- producer: {{ name, version, instanceId }}");
            println!("- generatedFor: Reference date the summaries were computed against");
            println!("- computedAtUtc: Computation timestamp");
            println!("- habits: {{ currentStreak, longestStreak, weekly, dayOfWeek, ... }}");
            println!("- goals: {{ goals: [{{ id, title, status, progressPercent }}], counts }}");
            println!("- climbing: {{ sendRate, flashRate, gradeDistribution, absurd, ... }}");
        }
    }

    Ok(())
}

// Error types

#[derive(Debug)]
enum GcStatsError {
    Io(io::Error),
    Stats(goalconnect_stats::StatsError),
    Json(serde_json::Error),
    NoRecords,
    ValidationFailed(usize),
    DoctorFailed,
    ParseError(String),
}

impl From<io::Error> for GcStatsError {
    fn from(e: io::Error) -> Self {
        GcStatsError::Io(e)
    }
}

impl From<goalconnect_stats::StatsError> for GcStatsError {
    fn from(e: goalconnect_stats::StatsError) -> Self {
        GcStatsError::Stats(e)
    }
}

impl From<serde_json::Error> for GcStatsError {
    fn from(e: serde_json::Error) -> Self {
        GcStatsError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<GcStatsError> for CliError {
    fn from(e: GcStatsError) -> Self {
        match e {
            GcStatsError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            GcStatsError::Stats(e) => CliError {
                code: "STATS_ERROR".to_string(),
                message: e.to_string(),
                hint: Some(format!("Ensure input matches the {SCHEMA_VERSION} schema")),
            },
            GcStatsError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            GcStatsError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            GcStatsError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{count} records failed validation"),
                hint: Some("Fix validation issues and retry".to_string()),
            },
            GcStatsError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
            GcStatsError::ParseError(msg) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: msg,
                hint: Some("Check input format".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationReport {
    schema: &'static str,
    total_records: usize,
    valid_records: usize,
    invalid_records: usize,
    issues: Vec<goalconnect_stats::schema::ValidationIssue>,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
