use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use payroll::database::{init_registry, utils::parse_date};
use payroll::services::report;
use payroll::{Config, PayrollSystem};

#[derive(Parser, Debug)]
#[command(name = "payroll", version, about = "Compute and run payroll for the worker roster")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the gross payroll due on a date without paying anyone
    Total {
        /// Pay date, d/M/yyyy or yyyy-mm-dd
        date: String,
    },
    /// Pay everyone due on a date and write the report
    Run {
        date: String,
        /// Report file (defaults to the configured report directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the number of workers on the roster
    Count,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    log::debug!("Configuration loaded (environment: {})", config.environment);

    let registry = init_registry(&config.data_file)?;
    let mut system = PayrollSystem::new(registry);

    match cli.command {
        Command::Total { date } => {
            let date = parse_date(&date, "pay")?;
            println!("{}", report::format_total(&system.total_payroll(date)));
        }
        Command::Run { date, output } => {
            let date = parse_date(&date, "pay")?;
            let output = output.unwrap_or_else(|| config.report_path(date));
            let result = system.run_payroll(date, Some(&output))?;
            system.save(&config.data_file)?;
            println!(
                "Paid {} workers, total {} (report: {})",
                result.entries.len(),
                report::format_total(&result.total_gross()),
                output.display()
            );
        }
        Command::Count => println!("{}", system.worker_count()),
    }

    Ok(())
}
