pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use guesthouse_core::domain::quote::InvoiceStatus;

#[derive(Debug, Parser)]
#[command(
    name = "guesthouse",
    about = "Guesthouse front-desk operator CLI",
    long_about = "Price stays, manage clients and quotes, and invoice bookings against the \
                  guesthouse booking backend.",
    after_help = "Examples:\n  guesthouse doctor --json\n  guesthouse price --file draft.json\n  \
                  guesthouse quotes list --search naidoo\n  guesthouse quotes invoice 12"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config and booking backend reachability")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Price a quote draft file without saving it")]
    Price {
        #[arg(long, help = "Path to a quote draft JSON file")]
        file: PathBuf,
    },
    #[command(about = "List, inspect, create, update, invoice, or delete quotes")]
    Quotes {
        #[command(subcommand)]
        action: QuoteAction,
    },
    #[command(about = "List invoiced quotes")]
    Invoices {
        #[command(subcommand)]
        action: InvoiceAction,
    },
    #[command(about = "List, inspect, create, or delete clients")]
    Clients {
        #[command(subcommand)]
        action: ClientAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum QuoteAction {
    List {
        #[arg(long, value_parser = parse_status, help = "unpaid or invoiced")]
        status: Option<InvoiceStatus>,
        #[arg(long, help = "Match quote number or client name")]
        search: Option<String>,
    },
    Show {
        id: u64,
    },
    Create {
        #[arg(long, help = "Path to a quote draft JSON file")]
        file: PathBuf,
    },
    Update {
        id: u64,
        #[arg(long, help = "Path to a quote draft JSON file")]
        file: PathBuf,
    },
    Invoice {
        id: u64,
    },
    Delete {
        id: u64,
    },
}

#[derive(Debug, Subcommand)]
pub enum InvoiceAction {
    List {
        #[arg(long, help = "Match quote number or client name")]
        search: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ClientAction {
    List {
        #[arg(long, help = "Match client name or email address")]
        search: Option<String>,
    },
    Show {
        id: u64,
    },
    Create(commands::clients::NewClient),
    Update {
        id: u64,
        #[command(flatten)]
        client: commands::clients::NewClient,
    },
    Delete {
        id: u64,
    },
}

fn parse_status(raw: &str) -> Result<InvoiceStatus, String> {
    InvoiceStatus::parse(raw)
        .ok_or_else(|| format!("unknown invoice status `{raw}` (expected unpaid|invoiced)"))
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Price { file } => commands::price::run(&file),
        Command::Quotes { action } => commands::quotes::run(action),
        Command::Invoices { action: InvoiceAction::List { search } } => {
            commands::invoices::run(search.as_deref())
        }
        Command::Clients { action } => commands::clients::run(action),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
