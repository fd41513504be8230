mod config;

use clap::{Parser, Subcommand};
use config::Config;
use owo_colors::OwoColorize;
use reforge_api::ApiState;
use reforge_core::Rarity;
use reforge_ledger::Ledger;
use reforge_storage::{load_seed, save_seed, Database};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "reforged")]
#[command(about = "CS Reforge case economy daemon")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Validate and import a catalog seed file
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Write the stored catalog to a seed file
    Export {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// List cases and their contents
    Cases,
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    init_tracing(&config.log_level);

    let db_path = config.database_path();
    let db = Arc::new(Database::open(&db_path)?);
    info!(path = %db_path, "database opened");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, db).await?,
        Command::Import { file } => {
            let seed = load_seed(&file)?;
            let report = db.import_catalog(&seed)?;
            println!(
                "{} {} items, {} cases from {}",
                "✓ Imported".green().bold(),
                report.items,
                report.cases,
                file.display()
            );
        }
        Command::Export { file } => {
            let seed = db.export_catalog()?;
            save_seed(&file, &seed)?;
            println!(
                "{} {} items, {} cases to {}",
                "✓ Exported".green().bold(),
                seed.items.len(),
                seed.cases.len(),
                file.display()
            );
        }
        Command::Cases => print_cases(&db)?,
    }

    Ok(())
}

async fn serve(config: Config, db: Arc<Database>) -> Result<(), Box<dyn std::error::Error>> {
    if config.catalog.import_on_start {
        if let Some(seed_file) = config.seed_file() {
            let seed = load_seed(&seed_file)?;
            db.import_catalog(&seed)?;
        }
    }

    let cases = db.all_cases()?.len();
    if cases == 0 {
        warn!("catalog has no cases, import a seed file with `reforged import`");
    }

    let addr = config.socket_addr()?;
    let ledger = Arc::new(Ledger::new(Arc::clone(&db), config.economy.clone()));

    println!("{}", "CS Reforge v0.1.0".cyan().bold());
    println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
    println!("{}: {}", "Listening".yellow().bold(), addr);
    println!("{}: {}", "Cases".yellow().bold(), cases);
    println!("{}: {}", "Users".yellow().bold(), db.user_count());
    println!(
        "{}: ${} start, {}% scan fee (min ${}), {}% sell-back",
        "Economy".yellow().bold(),
        config.economy.starting_balance,
        config.economy.scan_fee_percent,
        config.economy.min_scan_fee,
        config.economy.sell_back_percent
    );

    reforge_api::start_server(addr, ApiState::new(ledger)).await?;

    db.flush()?;
    Ok(())
}

fn print_cases(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let cases = db.all_cases()?;
    if cases.is_empty() {
        println!("{}", "No cases in catalog".bright_black());
        return Ok(());
    }

    for case in cases {
        let mode = if case.has_explicit_weights() {
            "weighted"
        } else {
            "by rarity"
        };
        println!(
            "\n{} {} {} {}",
            case.name.bright_white().bold(),
            format!("({})", case.id).bright_black(),
            format!("${}", case.price).green(),
            format!("[{}]", mode).bright_black()
        );

        let Some(contents) = db.case_contents(&case.id)? else {
            continue;
        };
        for (item, drop_chance) in &contents.items {
            let chance = drop_chance
                .map(|w| format!("{:>6.2}", w))
                .unwrap_or_else(|| "     -".to_string());
            println!(
                "  {} {} {}",
                chance.bright_black(),
                colored_rarity(item.rarity),
                item.name
            );
        }
    }
    println!();
    Ok(())
}

fn colored_rarity(rarity: Rarity) -> String {
    let label = format!("{:<16}", rarity.display_name());
    match rarity {
        Rarity::Consumer => label.white().to_string(),
        Rarity::Industrial => label.bright_blue().to_string(),
        Rarity::MilSpec => label.blue().to_string(),
        Rarity::Restricted => label.purple().to_string(),
        Rarity::Classified => label.magenta().to_string(),
        Rarity::Covert => label.red().to_string(),
        Rarity::ExceedinglyRare => label.yellow().to_string(),
    }
}
