//! `fleetlog` - CLI for fleet tracking
//!
//! This binary provides the command-line interface over the in-memory fleet
//! store and the derivation engine: listing cars, logging records, and
//! rendering reminders and consumption statistics.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::{debug, info};

use fleetlog::cli::{
    AddCommand, CarsCommand, Cli, Command, ConfigCommand, ConsumptionCommand, RemindersCommand,
    ShowCommand,
};
use fleetlog::{fuel_price_trend, init_logging, Config, Fleet, Snapshot};

/// How many recent fills the price trend covers.
const PRICE_TREND_FILLS: usize = 5;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    let today = Local::now().date_naive();
    let fleet = load_fleet(&cli, &config)?;

    // Execute the command
    match cli.command {
        Command::Cars(cmd) => handle_cars(&fleet, &cmd),
        Command::Show(cmd) => handle_show(&fleet, &cmd),
        Command::Add(add_cmd) => handle_add(fleet, &add_cmd, today),
        Command::Reminders(cmd) => handle_reminders(&fleet, &config, &cmd, today),
        Command::Consumption(cmd) => handle_consumption(&fleet, &cmd),
        Command::Status(cmd) => handle_status(&fleet, &config, cmd.json, today),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

/// Resolve the fleet the command operates on.
///
/// `--sample` seeds the demo fleet; `--input` loads a snapshot and must
/// exist; a configured `fleet.snapshot_path` is loaded when present but is
/// allowed to not exist yet.
fn load_fleet(cli: &Cli, config: &Config) -> anyhow::Result<Fleet> {
    if cli.sample {
        return Ok(Fleet::sample());
    }

    if let Some(path) = &cli.input {
        return read_snapshot(path)
            .with_context(|| format!("failed to load fleet from {}", path.display()));
    }

    if let Some(path) = config.snapshot_path() {
        if path.exists() {
            return read_snapshot(&path)
                .with_context(|| format!("failed to load fleet from {}", path.display()));
        }
        debug!(
            "configured snapshot {} does not exist, starting empty",
            path.display()
        );
    }

    Ok(Fleet::new())
}

fn read_snapshot(path: &Path) -> fleetlog::Result<Fleet> {
    let data = fs::read_to_string(path).map_err(|source| fleetlog::Error::SnapshotRead {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot: Snapshot = serde_json::from_str(&data)?;
    Ok(Fleet::from_snapshot(snapshot))
}

/// Write the updated snapshot to `output`, or pretty-print it to stdout.
fn write_snapshot(fleet: &Fleet, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&fleet.snapshot())?;
    match output {
        Some(path) => {
            fs::write(path, json).map_err(|source| fleetlog::Error::SnapshotWrite {
                path: path.to_path_buf(),
                source,
            })?;
            info!("wrote snapshot to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn handle_cars(fleet: &Fleet, cmd: &CarsCommand) -> anyhow::Result<()> {
    if cmd.json {
        let cars: Vec<serde_json::Value> = fleet
            .cars()
            .iter()
            .map(|car| {
                serde_json::json!({
                    "car": car,
                    "average_consumption": fleet.average_consumption(car.id),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&cars)?);
        return Ok(());
    }

    if fleet.is_empty() {
        println!("No cars yet. Add your first vehicle to get started.");
        return Ok(());
    }

    println!("Your fleet");
    println!("----------");
    for car in fleet.cars() {
        let avg = fleet
            .average_consumption(car.id)
            .map_or_else(|| "-".to_string(), |avg| format!("{avg} L/100km"));
        println!(
            "  [{}] {} {} ({}) | {} km | {}",
            car.id,
            car.label(),
            car.year,
            car.license_plate,
            car.mileage,
            avg
        );
    }
    Ok(())
}

fn handle_show(fleet: &Fleet, cmd: &ShowCommand) -> anyhow::Result<()> {
    let car = fleet.require_car(cmd.car)?;
    let maintenance = fleet.maintenance_for(car.id);
    let fuel = fleet.fuel_for(car.id);
    let avg = fleet.average_consumption(car.id);
    let trend = fuel_price_trend(car.id, fleet.fuel_records(), PRICE_TREND_FILLS);

    if cmd.json {
        let value = serde_json::json!({
            "car": car,
            "average_consumption": avg,
            "price_trend": trend,
            "maintenance": maintenance,
            "fuel": fuel,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", car.label());
    println!("{} • {}", car.license_plate, car.year);
    println!();
    println!("Total mileage:    {} km", car.mileage);
    println!(
        "Avg consumption:  {}",
        avg.map_or_else(|| "-".to_string(), |avg| format!("{avg} L/100km"))
    );

    if trend.len() > 1 {
        println!();
        println!("Fuel price trend");
        for point in &trend {
            println!("  {}  {}/L", point.date, point.price_per_liter);
        }
    }

    println!();
    println!("Service history");
    if maintenance.is_empty() {
        println!("  No maintenance records");
    } else {
        for record in maintenance {
            println!(
                "  {}  {} | {} km | {}",
                record.date, record.service_type, record.mileage, record.cost
            );
        }
    }

    println!();
    println!("Fuel history");
    if fuel.is_empty() {
        println!("  No fuel records");
    } else {
        for record in fuel {
            println!(
                "  {}  {} L | {} km | {}",
                record.date, record.liters, record.mileage, record.cost
            );
        }
    }
    Ok(())
}

fn handle_add(mut fleet: Fleet, cmd: &AddCommand, today: NaiveDate) -> anyhow::Result<()> {
    let output = cmd.output().cloned();
    match cmd {
        AddCommand::Car(cmd) => {
            let id = fleet.add_car(cmd.record());
            info!("added car {id}");
        }
        AddCommand::Service(cmd) => {
            let id = fleet.add_maintenance(cmd.record(today))?;
            info!("added maintenance record {id} for car {}", cmd.car);
        }
        AddCommand::Fuel(cmd) => {
            let id = fleet.add_fuel(cmd.record(today))?;
            info!("added fuel record {id} for car {}", cmd.car);
        }
    }
    write_snapshot(&fleet, output.as_deref())
}

fn handle_reminders(
    fleet: &Fleet,
    config: &Config,
    cmd: &RemindersCommand,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let as_of = cmd.date.unwrap_or(today);
    let reminders = fleet.reminders_with(as_of, &config.reminder_windows());

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&reminders)?);
        return Ok(());
    }

    if reminders.is_empty() {
        println!("No reminders.");
        return Ok(());
    }

    println!("Attention needed");
    println!("----------------");
    for reminder in &reminders {
        println!("  [{}] {}", reminder.severity, reminder.text);
    }
    Ok(())
}

fn handle_consumption(fleet: &Fleet, cmd: &ConsumptionCommand) -> anyhow::Result<()> {
    let car = fleet.require_car(cmd.car)?;
    let avg = fleet.average_consumption(car.id);

    if cmd.json {
        let value = serde_json::json!({
            "car_id": car.id,
            "liters_per_100km": avg,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match avg {
        Some(avg) => println!("{}: {avg} L/100km", car.label()),
        None => println!(
            "{}: not enough fuel records to compute consumption",
            car.label()
        ),
    }
    Ok(())
}

fn handle_status(
    fleet: &Fleet,
    config: &Config,
    json: bool,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let stats = fleet.stats();
    let reminders = fleet.reminders_with(today, &config.reminder_windows());
    let critical = reminders.iter().filter(|r| r.is_critical()).count();

    if json {
        let status = serde_json::json!({
            "stats": stats,
            "reminders": reminders.len(),
            "critical_reminders": critical,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("fleetlog status");
    println!("---------------");
    println!("Cars:                 {}", stats.cars);
    println!("Maintenance records:  {}", stats.maintenance_records);
    println!("Fuel records:         {}", stats.fuel_records);
    println!("Maintenance spend:    {}", stats.maintenance_cost);
    println!("Fuel spend:           {}", stats.fuel_cost);
    println!("Reminders:            {} ({critical} critical)", reminders.len());
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Reminders]");
                println!(
                    "  Date window (days):     {}",
                    config.reminders.date_window_days
                );
                println!(
                    "  Date critical (days):   {}",
                    config.reminders.date_critical_days
                );
                println!(
                    "  Mileage window (km):    {}",
                    config.reminders.mileage_window_km
                );
                println!(
                    "  Mileage critical (km):  {}",
                    config.reminders.mileage_critical_km
                );
                println!();
                println!("[Fleet]");
                match config.snapshot_path() {
                    Some(path) => println!("  Snapshot path:          {}", path.display()),
                    None => println!("  Snapshot path:          (none)"),
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
