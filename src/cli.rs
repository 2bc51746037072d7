//! Command-line interface
//!
//! Each subcommand maps to one data-access operation; `serve` starts the
//! HTTP API over the same repository.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    api,
    config::AppConfig,
    db,
    error::{AppError, AppResult},
    repository::Repository,
    seed, AppState,
};

#[derive(Parser)]
#[command(name = "libris", about = "Library catalog manager", version)]
pub struct Cli {
    /// Path to the SQLite database file (overrides configuration)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the database schema if it does not exist
    InitDb,
    /// Populate the database with sample data
    Seed,
    /// List books, optionally filtered by a title substring
    ListBooks {
        /// Title substring to filter on
        #[arg(long)]
        filter: Option<String>,
    },
    /// Add a book, creating its author if needed
    AddBook {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long, default_value_t = 1)]
        qty: i64,
    },
    /// Loan a book to a borrower
    LoanBook {
        #[arg(long)]
        book_id: i64,
        #[arg(long)]
        borrower: String,
        /// Loan date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Mark a loan as returned
    ReturnLoan {
        #[arg(long)]
        loan_id: i64,
        /// Return date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List loans within an inclusive date range
    ReportLoans {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
    /// Show loan totals and per-book loan counts
    Stats,
    /// Start the HTTP API server
    Serve,
}

/// Run a parsed CLI invocation to completion
pub async fn run(cli: Cli) -> AppResult<()> {
    let mut config = AppConfig::load()?;
    if let Some(path) = cli.db {
        config.database.path = path;
    }

    init_tracing(&config);

    let pool = db::connect(&config.database.path, config.database.max_connections).await?;
    // Idempotent, so every command tolerates a fresh database file
    db::ensure_schema(&pool).await?;
    let repository = Repository::new(pool);

    match cli.command {
        Command::InitDb => {
            println!("initialized database at {}", config.database.path.display());
        }
        Command::Seed => {
            seed::seed(&repository).await?;
            println!(
                "seeded sample data into {}",
                config.database.path.display()
            );
        }
        Command::ListBooks { filter } => {
            let books = repository.books.list(filter.as_deref()).await?;
            for book in books {
                println!(
                    "{:3}  {:<40}  {:<20}  qty={}",
                    book.id, book.title, book.author, book.qty
                );
            }
        }
        Command::AddBook { title, author, qty } => {
            let book_id = repository.books.create(&title, &author, qty).await?;
            println!("added book id={}", book_id);
        }
        Command::LoanBook {
            book_id,
            borrower,
            date,
        } => {
            let loan_id = repository.loans.create(book_id, &borrower, date).await?;
            println!("loan created id={}", loan_id);
        }
        Command::ReturnLoan { loan_id, date } => {
            repository.loans.return_loan(loan_id, date).await?;
            println!("loan {} marked returned", loan_id);
        }
        Command::ReportLoans { from, to } => {
            let loans = repository.reports.loans_in_date_range(from, to).await?;
            if loans.is_empty() {
                println!("no loans in range");
            }
            for loan in loans {
                let returned = loan
                    .return_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:3}  {:<40}  {:<15}  {} -> {}",
                    loan.id, loan.title, loan.borrower, loan.loan_date, returned
                );
            }
        }
        Command::Stats => {
            let aggregates = repository.reports.loan_aggregates().await?;
            let counts = repository.reports.book_loan_counts().await?;
            println!(
                "total loans: {}, avg loans/book: {:.2}\n",
                aggregates.total_loans, aggregates.avg_loans_per_book
            );
            println!("Top books by times loaned:");
            for entry in counts {
                println!(
                    "{:3}  {:<40}  {}",
                    entry.times_loaned, entry.title, entry.author
                );
            }
        }
        Command::Serve => {
            serve(config, repository).await?;
        }
    }

    Ok(())
}

/// Start the HTTP API server and block until shutdown
async fn serve(config: AppConfig, repository: Repository) -> AppResult<()> {
    let addr = SocketAddr::new(
        config
            .server
            .host
            .parse()
            .map_err(|_| AppError::Validation(format!("Invalid host address {}", config.server.host)))?,
        config.server.port,
    );

    let state = AppState {
        config: Arc::new(config),
        repository,
    };

    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("libris={},tower_http=debug", config.logging.level).into()
    });

    // try_init: the CLI may be invoked repeatedly from tests in one process
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
