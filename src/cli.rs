// File: ./src/cli.rs
//! Command-line parsing and help text for the `schedai` binary.
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Parse an assistant reply from a file, or stdin when `None` or "-".
    Parse {
        input: Option<PathBuf>,
        today: Option<NaiveDate>,
        json: bool,
        save: bool,
    },
    Prompt {
        today: Option<NaiveDate>,
    },
    List,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub verbose: bool,
    pub command: Command,
}

fn parse_today(value: Option<&String>) -> Result<NaiveDate> {
    let value = value.ok_or_else(|| anyhow!("--today needs a date (YYYY-MM-DD)"))?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| anyhow!("Invalid --today '{}': {}", value, e))
}

/// Parse arguments, without the program name.
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut root = None;
    let mut verbose = false;
    let mut help = false;
    let mut today = None;
    let mut json = false;
    let mut save = false;
    let mut positional: Vec<&String> = Vec::new();

    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => help = true,
            "-v" | "--verbose" => verbose = true,
            "-r" | "--root" => {
                let path = it.next().ok_or_else(|| anyhow!("--root needs a path"))?;
                root = Some(PathBuf::from(path));
            }
            "--today" => today = Some(parse_today(it.next())?),
            "--json" => json = true,
            "--save" => save = true,
            "-" => positional.push(arg),
            s if s.starts_with('-') => return Err(anyhow!("Unknown option '{}'", s)),
            _ => positional.push(arg),
        }
    }

    let command = if help {
        Command::Help
    } else {
        match positional.first().map(|s| s.as_str()) {
            None => Command::Help,
            Some("parse") => {
                if positional.len() > 2 {
                    return Err(anyhow!("parse takes at most one input file"));
                }
                let input = positional
                    .get(1)
                    .filter(|p| p.as_str() != "-")
                    .map(|p| PathBuf::from(p.as_str()));
                Command::Parse {
                    input,
                    today,
                    json,
                    save,
                }
            }
            Some("prompt") => Command::Prompt { today },
            Some("list") => Command::List,
            Some(other) => return Err(anyhow!("Unknown command '{}'", other)),
        }
    };

    Ok(CliArgs {
        root,
        verbose,
        command,
    })
}

pub fn print_help(binary_name: &str) {
    println!(
        "schedai v{} - turns an AI assistant's reply into calendar tasks",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!(
        "    {} parse [FILE|-] [--today YYYY-MM-DD] [--json] [--save]",
        binary_name
    );
    println!("    {} prompt [--today YYYY-MM-DD]", binary_name);
    println!("    {} list", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -v, --verbose         Log every extraction decision to stderr.");
    println!("    --today <date>        Resolve relative dates against this day.");
    println!("    --json                Print records as JSON instead of a preview.");
    println!("    --save                Append parsed records to the saved schedules.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("EXAMPLES:");
    println!(
        "    {} prompt > system.txt                 System prompt for your assistant",
        binary_name
    );
    println!(
        "    {} parse reply.txt                     Preview the tasks in a reply",
        binary_name
    );
    println!(
        "    pbpaste | {} parse --json --save       Parse stdin, store and print JSON",
        binary_name
    );
    println!();
    println!("CONFIG:");
    println!("    config.toml sets locale (auto, en, ru), separator, categories and profile.");
}
