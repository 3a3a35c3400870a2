use chamabook::application::ledger::LedgerService;
use chamabook::domain::member::MemberId;
use chamabook::domain::month::MonthKey;
use chamabook::infrastructure::in_memory::{
    InMemoryMemberStore, InMemoryMonthStore, InMemoryPaymentStore,
};
#[cfg(feature = "storage-rocksdb")]
use chamabook::infrastructure::rocksdb::RocksDbStore;
use chamabook::interfaces::csv::member_reader::MemberReader;
use chamabook::interfaces::csv::payment_reader::PaymentReader;
use chamabook::interfaces::csv::report_writer::ReportWriter;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Members CSV file (id, name, phone, joined, active)
    #[arg(long)]
    members: Option<PathBuf>,

    /// Payments CSV file (member, month, amount, paid_date)
    #[arg(long)]
    payments: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[cfg(feature = "storage-rocksdb")]
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the member and payment CSV files into the ledger
    Import,
    /// Open a contribution month; the due date is the 5th
    OpenMonth { month: String },
    /// Lock a month against further payment entry
    LockMonth { month: String },
    /// Generate a report as CSV on stdout
    Report {
        #[command(subcommand)]
        report: Report,
    },
}

#[derive(Subcommand)]
enum Report {
    /// Collection summary for one month
    Monthly { month: String },
    /// Payment statement for one member
    Member {
        id: MemberId,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Members who have not paid for a month
    Outstanding { month: String },
    /// Fined payments, grouped per month unless --flat
    Fines {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        flat: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let service = build_service(&cli).into_diagnostic()?;
    let (members_loaded, payments_recorded) = load_inputs(&service, &cli).await.into_diagnostic()?;

    match &cli.command {
        Command::Import => {
            println!("members: {members_loaded}");
            println!("payments: {payments_recorded}");
        }
        Command::OpenMonth { month } => {
            let key = parse_month(month)?;
            let opened = service.open_month(key).await.into_diagnostic()?;
            println!("opened {} (due {})", opened.month, opened.due_date);
        }
        Command::LockMonth { month } => {
            let key = parse_month(month)?;
            service.lock_month(key).await.into_diagnostic()?;
            println!("locked {key}");
        }
        Command::Report { report } => {
            let stdout = io::stdout();
            let mut writer = ReportWriter::new(stdout.lock());
            match report {
                Report::Monthly { month } => {
                    let stats = service
                        .monthly_stats(parse_month(month)?)
                        .await
                        .into_diagnostic()?;
                    writer.write_monthly(&stats).into_diagnostic()?;
                }
                Report::Member { id, from, to } => {
                    let statement = service
                        .member_statement(*id, parse_opt_month(from)?, parse_opt_month(to)?)
                        .await
                        .into_diagnostic()?;
                    writer.write_statement(&statement).into_diagnostic()?;
                }
                Report::Outstanding { month } => {
                    let outstanding = service
                        .outstanding_payments(parse_month(month)?)
                        .await
                        .into_diagnostic()?;
                    writer.write_outstanding(&outstanding).into_diagnostic()?;
                }
                Report::Fines { from, to, flat } => {
                    let summary = service
                        .fines_summary(parse_opt_month(from)?, parse_opt_month(to)?, !flat)
                        .await
                        .into_diagnostic()?;
                    writer.write_fines(&summary).into_diagnostic()?;
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "chamabook=debug"
    } else {
        "chamabook=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn build_service(cli: &Cli) -> chamabook::error::Result<LedgerService> {
    #[cfg(feature = "storage-rocksdb")]
    if let Some(db_path) = &cli.db_path {
        let store = RocksDbStore::open(db_path)?;
        return Ok(LedgerService::new(
            Box::new(store.clone()),
            Box::new(store.clone()),
            Box::new(store),
        ));
    }
    #[cfg(not(feature = "storage-rocksdb"))]
    let _ = cli;

    Ok(LedgerService::new(
        Box::new(InMemoryMemberStore::new()),
        Box::new(InMemoryMonthStore::new()),
        Box::new(InMemoryPaymentStore::new()),
    ))
}

/// Loads whichever CSV inputs were given. Rows that fail to parse or to
/// validate are logged and skipped; one bad line must not abort a run.
async fn load_inputs(
    service: &LedgerService,
    cli: &Cli,
) -> chamabook::error::Result<(usize, usize)> {
    let mut members_loaded = 0;
    if let Some(path) = &cli.members {
        let file = File::open(path)?;
        for row in MemberReader::new(file).members() {
            match row {
                Ok(member) => match service.register_member(member).await {
                    Ok(()) => members_loaded += 1,
                    Err(e) => warn!("skipping member row: {e}"),
                },
                Err(e) => warn!("skipping unreadable member row: {e}"),
            }
        }
    }

    let mut payments_recorded = 0;
    if let Some(path) = &cli.payments {
        let file = File::open(path)?;
        for row in PaymentReader::new(file).payments() {
            match row {
                Ok(record) => {
                    service.ensure_month(record.month).await?;
                    match service
                        .record_payment(
                            record.member,
                            record.month,
                            record.amount_paid(),
                            record.paid_date,
                        )
                        .await
                    {
                        Ok(_) => payments_recorded += 1,
                        Err(e) => warn!("skipping payment row: {e}"),
                    }
                }
                Err(e) => warn!("skipping unreadable payment row: {e}"),
            }
        }
    }

    Ok((members_loaded, payments_recorded))
}

fn parse_month(value: &str) -> Result<MonthKey> {
    value.parse().into_diagnostic()
}

fn parse_opt_month(value: &Option<String>) -> Result<Option<MonthKey>> {
    value.as_deref().map(|v| parse_month(v)).transpose()
}
