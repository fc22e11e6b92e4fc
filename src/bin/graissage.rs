// File: ./src/bin/graissage.rs
use anyhow::Result;
use graissage::cli::{CliArgs, Command, print_help};
use graissage::config::Config;
use graissage::context::{AppContext, StandardContext};
use graissage::report;
use graissage::workbook::Workbook;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::env;

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    // A logger may already be installed when embedded; keep going without ours.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn main() -> Result<()> {
    let args = CliArgs::parse(env::args().skip(1))?;
    init_logging(args.verbose);

    let ctx = StandardContext::new(args.root.clone());
    let today = args
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match &args.command {
        Command::Help => {
            print_help("graissage");
        }
        Command::InitConfig => {
            let path = ctx.get_config_file_path()?;
            if path.exists() {
                println!("Config already exists: {}", path.display());
            } else {
                Config::default().save(&ctx)?;
                println!("Wrote default config: {}", Config::get_path_string(&ctx)?);
            }
        }
        Command::Schedule(path) => {
            let config = Config::load_or_default(&ctx)?;
            let computed = Workbook::load(path, &config.columns)?.compute(today);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&computed)?);
            } else {
                print!("{}", report::render_schedule(&computed));
            }
        }
        Command::Alerts(path) => {
            let config = Config::load_or_default(&ctx)?;
            let computed = Workbook::load(path, &config.columns)?.compute(today);
            let alerts = computed.alerts(today, config.alert_horizon_days);
            log::info!("{} alert(s) for {}", alerts.len(), today);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&alerts)?);
            } else {
                print!(
                    "{}",
                    report::render_alerts(&alerts, config.alert_horizon_days)
                );
            }
        }
    }

    Ok(())
}
