// File: ./src/bin/schedai.rs
use anyhow::{Context, Result};
use chrono::Local;
use schedai::cli::{self, Command};
use schedai::config::Config;
use schedai::context::{AppContext, StandardContext};
use schedai::engine::{Engine, to_record};
use schedai::model::TaskDisplay;
use schedai::prompt::build_system_prompt;
use schedai::storage::ScheduleStore;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::fs;
use std::io::Read;
use std::path::Path;

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // Ignore the error if a logger is already installed.
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let binary_name = args
        .first()
        .and_then(|a| Path::new(a).file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "schedai".to_string());

    let cli = match cli::parse_args(args.get(1..).unwrap_or_default()) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!("Try '{} --help'.", binary_name);
            std::process::exit(2);
        }
    };
    init_logging(cli.verbose);

    if cli.command == Command::Help {
        cli::print_help(&binary_name);
        return Ok(());
    }

    let ctx = StandardContext::new(cli.root.clone());
    let config = Config::load_or_default(&ctx)?;
    let locale = config.resolve_locale();
    log::debug!(
        "Using locale '{}' with separator '{}'",
        locale.tag,
        locale.separator
    );

    match cli.command {
        Command::Parse {
            input,
            today,
            json,
            save,
        } => {
            let raw = read_input(input.as_deref())?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let engine = Engine::new(locale)?;
            let extraction = engine.extract(&raw, &config.categories, today);
            let records: Vec<_> = extraction
                .tasks
                .iter()
                .map(|t| to_record(t, &config.categories))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for task in &extraction.tasks {
                    println!(
                        "{}",
                        task.to_preview_line(&config.categories, engine.locale())
                    );
                }
            }
            if let Some(warning) = &extraction.warning {
                eprintln!("Warning: {}", warning);
            }

            if save && !records.is_empty() {
                let total = ScheduleStore::append(&ctx, &records)?;
                eprintln!(
                    "Saved {} task(s) to {} ({} total)",
                    records.len(),
                    ctx.get_schedules_path()?.display(),
                    total
                );
            }
            if records.is_empty() {
                std::process::exit(1);
            }
        }
        Command::Prompt { today } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            print!(
                "{}",
                build_system_prompt(&config.profile, &config.categories, &locale, today)
            );
        }
        Command::List => {
            for record in ScheduleStore::load(&ctx)? {
                let category = record
                    .category_id
                    .as_ref()
                    .and_then(|id| config.categories.iter().find(|c| &c.id == id))
                    .map(|c| format!(" [{}]", c.name))
                    .unwrap_or_default();
                let done = if record.completed { "x" } else { " " };
                println!("[{}] {}  {}{}", done, record.start, record.title, category);
            }
        }
        Command::Help => cli::print_help(&binary_name),
    }

    Ok(())
}
