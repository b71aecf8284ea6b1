use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use workorder_dash::format::format_rub;
use workorder_dash::{config, Dashboard, DashboardView, FilterOptions, Selection};

/// Print the work-order dashboard for a selection of months, departments,
/// customers and responsibles
#[derive(Parser)]
#[command(name = "workorder-dash")]
#[command(about = "Invoice/work-order dashboard over a DuckDB or PostgreSQL table")]
struct Args {
    /// Month key to include (repeatable, e.g. --month 2024-01 --month 2024-02)
    #[arg(short, long)]
    month: Vec<String>,

    /// Department to include (repeatable)
    #[arg(short, long)]
    department: Vec<String>,

    /// Customer to include (repeatable)
    #[arg(short, long)]
    customer: Vec<String>,

    /// Responsible party to include (repeatable)
    #[arg(short, long)]
    responsible: Vec<String>,

    /// Show every month instead of defaulting to the latest one
    #[arg(long)]
    all_months: bool,

    /// Data source (defaults to $DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Source table
    #[arg(long, default_value = config::DEFAULT_TABLE)]
    table: String,

    /// Print the available filter values instead of the dashboard
    #[arg(long)]
    options: bool,

    /// Emit JSON instead of text panels
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = Dashboard::builder().table(&args.table);
    if let Some(url) = &args.database_url {
        builder = builder.database_url(url);
    }
    let dashboard = match builder.build() {
        Ok(d) => d,
        Err(e) => {
            error!(error = %e, "failed to initialize dashboard");
            return ExitCode::FAILURE;
        }
    };

    match run(&dashboard, args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "dashboard refresh failed");
            ExitCode::FAILURE
        }
    }
}

fn run(dashboard: &Dashboard, args: Args) -> workorder_dash::Result<()> {
    if args.options {
        let options = dashboard.filter_options()?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&options)?);
        } else {
            print_options(&options);
        }
        return Ok(());
    }

    let selection = Selection::new()
        .months(args.month)
        .departments(args.department)
        .customers(args.customer)
        .responsibles(args.responsible);

    let view = if args.all_months {
        dashboard.refresh(&selection)?
    } else {
        dashboard.open(selection)?.1
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Text panels
// ---------------------------------------------------------------------------

fn print_view(view: &DashboardView) {
    println!("Суммы по отделам");
    for row in &view.dept_month.rows {
        println!("  {:<16} {:<24} {}", row.label, row.department, format_rub(row.sum));
    }

    println!("\nЛиния тренда");
    for point in &view.dept_month.trend {
        println!("  {:<16} {}", point.label, format_rub(point.value));
    }

    println!("\nСуммы по заказчикам");
    for c in &view.customers {
        println!("  {:<32} {}", c.customer, format_rub(c.sum));
    }

    println!("\nРаспределение по ответственным");
    for r in &view.responsibles {
        println!("  {:<32} {}", r.responsible, format_rub(r.sum));
    }

    println!("\nСтатистика");
    for entry in view.stats.entries() {
        println!("  {}: {}", entry.label, entry.value);
    }
}

fn print_options(options: &FilterOptions) {
    println!("Месяцы");
    for m in &options.months {
        println!("  {} ({})", m.label, m.value);
    }
    for (title, values) in [
        ("Отделы", &options.departments),
        ("Заказчики", &options.customers),
        ("Ответственные", &options.responsibles),
    ] {
        println!("\n{title}");
        for v in values {
            println!("  {v}");
        }
    }
}
