use clap::Parser;
use small_rental::core::lease::{escalated_rent, parse_date, LeaseTerm};
use small_rental::utils::error::RentalError;
use small_rental::utils::logger;

#[derive(Debug, Parser)]
#[command(name = "lease-calc")]
#[command(about = "Compute a lease's end date and the time left on it")]
struct Args {
    /// Lease start date (YYYY-MM-DD)
    #[arg(short, long)]
    start: String,

    /// Contract length in whole years
    #[arg(short, long, allow_negative_numbers = true)]
    years: i64,

    /// Date to count from, defaults to today
    #[arg(short, long)]
    today: Option<String>,

    /// Monthly rent, prints the escalated amount when given
    #[arg(long)]
    rent: Option<f64>,

    #[arg(long, default_value_t = 0.0)]
    increment_percent: f64,

    #[arg(long, default_value_t = 0)]
    increment_interval: u32,

    #[arg(short, long, help = "Enable verbose output")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    if let Err(e) = run(&args) {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), RentalError> {
    let term = LeaseTerm::parse(&args.start, args.years)?;
    let today = match &args.today {
        Some(value) => parse_date(value)?,
        None => chrono::Local::now().date_naive(),
    };
    tracing::debug!("Lease {:?} counted from {}", term, today);

    let end_date = term.end_date()?;
    let remaining = term.remaining(today)?;

    println!("📅 Start:     {}", term.start_date);
    println!("🏁 End:       {}", end_date);
    if remaining.has_ended() {
        println!("⌛ Lease ended {} day(s) ago", -remaining.total_days);
    } else {
        println!(
            "⏳ Remaining: {} year(s), {} month(s), {} day(s) ({} days)",
            remaining.years, remaining.months, remaining.days, remaining.total_days
        );
    }

    if let Some(rent) = args.rent {
        let current = escalated_rent(
            rent,
            args.increment_percent,
            args.increment_interval,
            term.start_date,
            today,
        );
        println!("💰 Rent on {}: {:.2}", today, current);
    }

    Ok(())
}
