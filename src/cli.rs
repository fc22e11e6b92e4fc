// File: ./src/cli.rs
//! Shared command-line interface logic: argument parsing and help text.
use anyhow::{Result, anyhow, bail};
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Schedule(PathBuf),
    Alerts(PathBuf),
    InitConfig,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub root: Option<PathBuf>,
    pub today: Option<NaiveDate>,
    pub json: bool,
    pub verbose: bool,
}

impl CliArgs {
    /// Parses arguments, excluding the binary name.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut root = None;
        let mut today = None;
        let mut json = false;
        let mut verbose = false;
        let mut positional = Vec::new();

        let mut iter = args.into_iter().map(Into::into);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" | "help" => positional.insert(0, "help".to_string()),
                "-r" | "--root" => {
                    let value = iter.next().ok_or_else(|| anyhow!("{} needs a path", arg))?;
                    root = Some(PathBuf::from(value));
                }
                "--today" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| anyhow!("--today needs a date (YYYY-MM-DD)"))?;
                    let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                        .map_err(|e| anyhow!("Invalid --today '{}': {}", value, e))?;
                    today = Some(date);
                }
                "--json" => json = true,
                "-v" | "--verbose" => verbose = true,
                other if other.starts_with('-') => bail!("Unknown option '{}'", other),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let command = match positional.next().as_deref() {
            None | Some("help") => Command::Help,
            Some("init-config") => Command::InitConfig,
            Some(cmd @ ("schedule" | "alerts")) => {
                let path = positional
                    .next()
                    .map(PathBuf::from)
                    .ok_or_else(|| anyhow!("'{}' needs a workbook file", cmd))?;
                if cmd == "schedule" {
                    Command::Schedule(path)
                } else {
                    Command::Alerts(path)
                }
            }
            Some(other) => bail!("Unknown command '{}'", other),
        };

        Ok(Self {
            command,
            root,
            today,
            json,
            verbose,
        })
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Graissage v{} - lubrication schedule and due-date alerts",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} schedule <workbook.json> [--today <date>] [--json]", binary_name);
    println!("    {} alerts <workbook.json> [--today <date>] [--json]", binary_name);
    println!("    {} init-config", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("COMMANDS:");
    println!("    schedule       Compute the next intervention of every row, per sheet.");
    println!("    alerts         List interventions due today or within the alert horizon.");
    println!("    init-config    Write a default config.toml and print its location.");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for the configuration.");
    println!("    --today <date>        Compute as if today were <date> (YYYY-MM-DD).");
    println!("    --json                Print JSON instead of tables.");
    println!("    -v, --verbose         Log every computed record to stderr.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("WORKBOOK FORMAT:");
    println!("    {{ \"sheets\": [ {{ \"name\": \"Presse 1\", \"rows\": [ {{ \"Equipement\": \"...\",");
    println!("      \"Derniere intervention\": \"2024-01-01\", \"Frequence\": \"1 fois/sem\" }} ] }} ] }}");
    println!();
    println!("RECOGNIZED FREQUENCIES:");
    println!("    1 fois/sem, 1 fois/mois, 1 fois/2mois, 1 fois/45jours,");
    println!("    1 fois/an, 2 fois/an, 3 fois/an, 1 fois/2ans, décembre, janvier");
    println!("    Anything else is scheduled every 30 days (with a warning).");
    println!();
    println!("Due dates are moved back to the preceding Sunday.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_alerts_with_options() {
        let args = CliArgs::parse([
            "alerts",
            "wb.json",
            "--today",
            "2024-06-14",
            "--json",
            "-r",
            "/tmp/g",
        ])
        .unwrap();
        assert_eq!(args.command, Command::Alerts(PathBuf::from("wb.json")));
        assert_eq!(args.today, NaiveDate::from_ymd_opt(2024, 6, 14));
        assert!(args.json);
        assert!(!args.verbose);
        assert_eq!(args.root, Some(PathBuf::from("/tmp/g")));
    }

    #[test]
    fn test_no_arguments_is_help() {
        let args = CliArgs::parse(Vec::<String>::new()).unwrap();
        assert_eq!(args.command, Command::Help);
        let args = CliArgs::parse(["schedule", "x.json", "--help"]).unwrap();
        assert_eq!(args.command, Command::Help);
    }

    #[test]
    fn test_errors() {
        assert!(CliArgs::parse(["schedule"]).is_err());
        assert!(CliArgs::parse(["frobnicate"]).is_err());
        assert!(CliArgs::parse(["alerts", "x.json", "--today", "14/06/2024"]).is_err());
        assert!(CliArgs::parse(["alerts", "x.json", "--bogus"]).is_err());
    }
}
