//! Command-line entry point for the staffbook core.
//!
//! # Responsibility
//! - Resolve storage, paging and logging settings from flags or environment.
//! - Run one maintenance command against the configured database.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use staffbook_core::{
    core_version, export_all, init_logging, ping, AnnualLeaveDto, BusinessTripDto, CoreConfig,
    DepartmentDto, EmployeeDto, EntityBinding, EntityService, LeaveScheduleDto, OrganizationDto,
    PostDto, Repository, StorageTarget, UnitOfWork,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "staffbook",
    about = "Maintenance commands for the staffbook HR database",
    version,
    arg_required_else_help = true
)]
struct Cli {
    /// Connection string: a file path, `sqlite://<path>`, `Data Source=<path>` or `:memory:`.
    #[arg(long, env = "STAFFBOOK_DB", default_value = "staffbook.db", global = true)]
    db: String,
    /// Items per page for paged listings.
    #[arg(long, env = "STAFFBOOK_PAGE_SIZE", global = true)]
    page_size: Option<usize>,
    /// Directory for rolling log files. Logging is off when omitted.
    #[arg(long, env = "STAFFBOOK_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,
    /// Log level: trace, debug, info, warn or error.
    #[arg(long, env = "STAFFBOOK_LOG_LEVEL", global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Collection {
    Organizations,
    Departments,
    Posts,
    Employees,
    LeaveSchedules,
    AnnualLeaves,
    BusinessTrips,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the core library is linked.
    Ping,
    /// Print the core library version.
    Version,
    /// Print the number of stored records per collection.
    Counts,
    /// Print one page of a collection as JSON.
    List {
        collection: Collection,
        /// 1-based page number; out-of-range values are clamped.
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Write every collection as `<Collection>.json` into a directory.
    Export {
        /// Target directory, created when missing.
        #[arg(short, long, value_name = "DIR", default_value = "export")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(log_dir) = &cli.log_dir {
        let log_dir = absolute(log_dir)?;
        init_logging(config.log_level, &log_dir)
            .with_context(|| format!("failed to start logging in {}", log_dir.display()))?;
    }

    match cli.command {
        Commands::Ping => println!("staffbook_core ping={}", ping()),
        Commands::Version => println!("staffbook_core version={}", core_version()),
        Commands::Counts => print_counts(&config)?,
        Commands::List { collection, page } => match collection {
            Collection::Organizations => print_page::<OrganizationDto>(&config, page)?,
            Collection::Departments => print_page::<DepartmentDto>(&config, page)?,
            Collection::Posts => print_page::<PostDto>(&config, page)?,
            Collection::Employees => print_page::<EmployeeDto>(&config, page)?,
            Collection::LeaveSchedules => print_page::<LeaveScheduleDto>(&config, page)?,
            Collection::AnnualLeaves => print_page::<AnnualLeaveDto>(&config, page)?,
            Collection::BusinessTrips => print_page::<BusinessTripDto>(&config, page)?,
        },
        Commands::Export { output } => {
            let uow = open(&config)?;
            let written = export_all(&uow, &output)
                .with_context(|| format!("export into {} failed", output.display()))?;
            for path in written {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig> {
    let storage = StorageTarget::parse(&cli.db).context("invalid --db connection string")?;
    let mut config = CoreConfig::new(storage);
    if let Some(page_size) = cli.page_size {
        config = config.with_page_size(page_size)?;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = known_level(level)
            .with_context(|| format!("unsupported log level `{level}`"))?;
    }
    Ok(config)
}

fn known_level(level: &str) -> Option<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

fn open(config: &CoreConfig) -> Result<UnitOfWork> {
    UnitOfWork::open(&config.storage)
        .with_context(|| format!("failed to open database {}", config.storage))
}

fn print_counts(config: &CoreConfig) -> Result<()> {
    let uow = open(config)?;
    let counts = [
        ("Organizations", uow.organizations().get_all()?.len()),
        ("Departments", uow.departments().get_all()?.len()),
        ("Posts", uow.posts().get_all()?.len()),
        ("Employees", uow.employees().get_all()?.len()),
        ("LeaveSchedules", uow.leave_schedules().get_all()?.len()),
        ("AnnualLeaves", uow.annual_leaves().get_all()?.len()),
        ("BusinessTrips", uow.business_trips().get_all()?.len()),
    ];
    for (collection, count) in counts {
        println!("{collection}={count}");
    }
    Ok(())
}

/// Prints the requested page, then `page=<n>/<total> items=<count>` on stderr.
fn print_page<M: EntityBinding>(config: &CoreConfig, page: usize) -> Result<()> {
    let mut service = EntityService::<M>::from_config(config)
        .with_context(|| format!("failed to open database {}", config.storage))?;
    let all = service.get_all()?;
    let items = service.get_page(all, page);
    println!("{}", serde_json::to_string_pretty(&items)?);

    let info = service.page_info();
    eprintln!(
        "{} page={}/{} items={}",
        M::COLLECTION,
        info.page_number,
        info.total_pages().max(1),
        info.total_items
    );
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("cannot resolve current directory")?;
    Ok(cwd.join(path))
}
