mod commands;
mod output;

use std::error::Error;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "payslip",
    version,
    about = "Convert paystub layout dumps (pdfminer XML) into ledger entries"
)]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace); RUST_LOG also works
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a paystub and print it as a ledger entry
    Paystub {
        /// Layout XML file, or - for stdin
        input: PathBuf,

        /// JSON file overriding payee and posting accounts
        #[arg(long, value_name = "FILE")]
        accounts: Option<PathBuf>,

        /// Print only the pay date (YYYY-MM-DD)
        #[arg(long)]
        date_only: bool,

        /// Output format: ledger (default) or json
        #[arg(short, long, default_value = "ledger")]
        format: String,
    },
    /// List every bounding box on the first page, in traversal order
    Boxes {
        /// Layout XML file, or - for stdin
        input: PathBuf,

        /// Draw the boxes into a PNG file instead of listing them
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,
    },
    /// List every text line on the first page with its bounding box
    Lines {
        /// Layout XML file, or - for stdin
        input: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Paystub {
            input,
            accounts,
            date_only,
            format,
        } => commands::paystub::run(&input, accounts.as_deref(), date_only, &format),
        Commands::Boxes { input, png } => commands::boxes::run(&input, png.as_deref()),
        Commands::Lines { input } => commands::lines::run(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}
