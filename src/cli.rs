use std::{env, io, path::PathBuf};

use chrono::{Local, NaiveDate, Timelike};

use groomsched::{
    records::ServiceDirectory,
    reports::{self, Granularity},
    schedule,
    storage::{ShopConfig, Snapshot},
};

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    Agenda(NaiveDate),
    Report { granularity: Granularity, reference: NaiveDate },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub mode: CliMode,
    pub data_path: PathBuf,
}

pub fn parse_cli_options() -> Result<CliOptions, String> {
    parse_args(env::args().skip(1))
}

fn parse_args(raw: impl Iterator<Item = String>) -> Result<CliOptions, String> {
    let today = Local::now().date_naive();
    let mut mode = None;
    let mut data_path = None;
    let mut args = raw.peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--agenda" => {
                let date = parse_optional_date(&mut args, today)?;
                mode = Some(CliMode::Agenda(date));
            }
            "--report" => {
                let granularity = match args.next().as_deref() {
                    Some("day") => Granularity::Day,
                    Some("week") => Granularity::Week,
                    Some("month") => Granularity::Month,
                    Some("year") => Granularity::Year,
                    other => {
                        return Err(format!(
                            "--report needs day|week|month|year, got '{}'",
                            other.unwrap_or("")
                        ));
                    }
                };
                let reference = parse_optional_date(&mut args, today)?;
                mode = Some(CliMode::Report { granularity, reference });
            }
            "--data" => {
                let path = args
                    .next()
                    .ok_or_else(|| "--data needs a file path".to_string())?;
                data_path = Some(PathBuf::from(path));
            }
            "--help" => {
                println!(
                    "Usage: groomsched [--data FILE] (--agenda [YYYY-MM-DD] | --report day|week|month|year [YYYY-MM-DD])"
                );
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    let mode = mode.ok_or_else(|| "Pick a mode: --agenda or --report".to_string())?;
    let data_path = data_path.unwrap_or_else(default_data_path);
    Ok(CliOptions { mode, data_path })
}

fn parse_optional_date(
    args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
    fallback: NaiveDate,
) -> Result<NaiveDate, String> {
    if let Some(next) = args.peek() {
        if !next.starts_with("--") {
            let date_str = args.next().expect("peeked value must exist");
            return NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD.", date_str));
        }
    }
    Ok(fallback)
}

fn default_data_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("groomsched")
        .join("data.json")
}

pub fn run(options: CliOptions) -> Result<(), io::Error> {
    let config = ShopConfig::load_or_create().map_err(|e| io::Error::other(e.to_string()))?;
    let snapshot =
        Snapshot::load(&options.data_path).map_err(|e| io::Error::other(e.to_string()))?;

    match options.mode {
        CliMode::Agenda(date) => run_agenda(date, &snapshot, &config),
        CliMode::Report { granularity, reference } => {
            run_report(reference, granularity, &snapshot, &config)
        }
    }
}

fn run_agenda(date: NaiveDate, snapshot: &Snapshot, config: &ShopConfig) -> Result<(), io::Error> {
    let services = ServiceDirectory::new(snapshot.services.iter().cloned())
        .with_default_duration(config.default_duration_minutes);
    let day_bookings: Vec<_> = snapshot
        .bookings
        .iter()
        .filter(|b| !b.is_canceled() && b.start.date() == date)
        .cloned()
        .collect();

    let mut items = schedule::layout(&day_bookings, &services)
        .map_err(|e| io::Error::other(e.to_string()))?;
    items.sort_by_key(|item| item.interval.start);

    println!("Agenda - {}", date.format("%A, %B %d, %Y"));
    println!();

    if items.is_empty() {
        println!("No bookings scheduled.");
        return Ok(());
    }

    for item in &items {
        let booking = day_bookings
            .iter()
            .find(|b| b.id == item.booking_id)
            .expect("layout items come from the input set");
        let slot_note = if item.column_count > 1 {
            format!("  [{}/{}]", item.column_index + 1, item.column_count)
        } else {
            String::new()
        };
        let service_name = services
            .get(&booking.service_id)
            .map(|s| s.name.as_str())
            .unwrap_or("(unknown service)");
        println!(
            "{:>5}-{:<5}  pet {}  {}{}",
            item.interval.start.format("%H:%M"),
            item.interval.end.format("%H:%M"),
            booking.pet_id,
            service_name,
            slot_note
        );
    }

    if let Some(first) = items.first() {
        if first.interval.start.hour() < config.opening_hour {
            tracing::warn!(opening_hour = config.opening_hour, "booking before opening hour");
        }
    }

    Ok(())
}

fn run_report(
    reference: NaiveDate,
    granularity: Granularity,
    snapshot: &Snapshot,
    config: &ShopConfig,
) -> Result<(), io::Error> {
    let services = ServiceDirectory::new(snapshot.services.iter().cloned())
        .with_default_duration(config.default_duration_minutes);
    let report = reports::analyze(
        reference,
        granularity,
        &snapshot.bookings,
        &services,
        &snapshot.costs,
        config,
    );

    println!("Report - {}", report.period_label);
    println!();
    let pairs = [
        ("Pets", report.current.total_pets as f64, report.previous.total_pets as f64),
        ("Haircuts", report.current.total_haircuts as f64, report.previous.total_haircuts as f64),
        ("Gross revenue", report.current.gross_revenue, report.previous.gross_revenue),
        ("Paid revenue", report.current.paid_revenue, report.previous.paid_revenue),
        ("Pending revenue", report.current.pending_revenue, report.previous.pending_revenue),
        ("Average ticket", report.current.average_ticket, report.previous.average_ticket),
        ("Revenue / day", report.current.daily_average_revenue, report.previous.daily_average_revenue),
        ("Pets / day", report.current.daily_average_pets, report.previous.daily_average_pets),
    ];
    for (label, current, previous) in pairs {
        println!(
            "{:<16} {:>10.2}  ({:+.0}%)",
            label,
            current,
            reports::growth(current, previous)
        );
    }
    println!("{:<16} {:>10.2}", "Cost / day", report.current.daily_cost);

    if !report.series.is_empty() {
        println!();
        for point in &report.series {
            println!(
                "{:<10} {:>10.2}  {:>3} pets  ({:+.0}%)",
                point.label, point.revenue, point.pets, point.growth
            );
        }
    }

    Ok(())
}
