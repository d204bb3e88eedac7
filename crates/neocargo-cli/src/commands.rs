//! Command handlers

use std::path::PathBuf;

use neocargo_app::config::Config;
use neocargo_app::order::NewOrder;
use neocargo_app::{assignment, issue, order, quote};
use neocargo_domain::repository::{CityRepository, DriverRepository};
use neocargo_store::{seed, Store};
use neocargo_types::{Error, IssueType, OutputFormat, Result};

use crate::cli::{Cli, Commands};
use crate::output::{output_order, output_preview, truncate};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(ref dir) = cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Seed { file } => cmd_seed(&config, file),

        Commands::Quote {
            origin,
            destination,
            weight,
            max_hours,
        } => {
            let store = open_store(&config)?;
            let preview = quote::preview(&store, &origin, &destination, weight, max_hours)?;
            output_preview(output_format, &preview)
        }

        Commands::OrderCreate {
            client,
            origin,
            destination,
            weight,
            deadline_days,
            notes,
        } => {
            let mut store = open_store(&config)?;
            let created = order::create_order(
                &mut store,
                NewOrder {
                    client,
                    origin,
                    destination,
                    cargo_weight_kg: weight,
                    deadline_days,
                    notes,
                },
            )?;
            println!("Order #{} created ({})", created.id, created.status);
            println!("Next: neocargo order-quote {}", created.id);
            Ok(())
        }

        Commands::OrderQuote { id } => {
            let mut store = open_store(&config)?;
            let quoted = quote::quote_order(&mut store, id)?;
            if quoted.quote_options.is_none() {
                println!("No vehicle can take order #{id}; it remains in quoting.");
                return Ok(());
            }
            output_order(output_format, &quoted)
        }

        Commands::OrderConfirm { id, choice } => {
            let mut store = open_store(&config)?;
            let confirmed = order::confirm_option(&mut store, id, choice)?;
            output_order(output_format, &confirmed)
        }

        Commands::OrderApprove { id } => {
            let mut store = open_store(&config)?;
            let approved = order::approve(&mut store, id)?;
            println!("Order #{} approved", approved.id);
            Ok(())
        }

        Commands::OrderReject { id } => {
            let mut store = open_store(&config)?;
            let rejected = order::reject(&mut store, id)?;
            println!("Order #{} rejected", rejected.id);
            Ok(())
        }

        Commands::OrderCancel { id } => {
            let mut store = open_store(&config)?;
            let cancelled = order::cancel_order(&mut store, id)?;
            println!("Order #{} cancelled", cancelled.id);
            Ok(())
        }

        Commands::Orders => {
            let store = open_store(&config)?;
            cmd_orders(&store, output_format)
        }

        Commands::Assign { order_id } => {
            let mut store = open_store(&config)?;
            let created = assignment::assign(&mut store, order_id)?;
            println!(
                "Delivery #{} created: driver {} with vehicle {} (order #{})",
                created.id, created.driver_id, created.vehicle_id, created.order_id
            );
            println!("Next: neocargo start {}", created.id);
            Ok(())
        }

        Commands::Start { assignment_id } => {
            let mut store = open_store(&config)?;
            let started = assignment::start(&mut store, assignment_id)?;
            println!("Delivery #{} is on the road", started.id);
            Ok(())
        }

        Commands::Complete { assignment_id } => {
            let mut store = open_store(&config)?;
            let completed = assignment::complete(&mut store, assignment_id)?;
            println!("Delivery #{} completed", completed.id);
            Ok(())
        }

        Commands::CancelDelivery {
            assignment_id,
            reason,
        } => {
            let mut store = open_store(&config)?;
            let cancelled = assignment::cancel(&mut store, assignment_id, reason.as_deref())?;
            println!(
                "Delivery #{} cancelled; order #{} is back to approved",
                cancelled.id, cancelled.order_id
            );
            Ok(())
        }

        Commands::Deliveries => {
            let store = open_store(&config)?;
            cmd_deliveries(&store, output_format)
        }

        Commands::IssueReport {
            assignment_id,
            issue_type,
            description,
        } => {
            let mut store = open_store(&config)?;
            cmd_issue_report(&mut store, assignment_id, issue_type, &description)
        }

        Commands::IssueReview { id } => {
            let mut store = open_store(&config)?;
            let reviewed = issue::review_issue(&mut store, id)?;
            println!("Issue #{} is under review", reviewed.id);
            Ok(())
        }

        Commands::IssueResolve { id, resolution } => {
            let mut store = open_store(&config)?;
            let resolved = issue::resolve_issue(&mut store, id, &resolution)?;
            println!("Issue #{} resolved", resolved.id);
            Ok(())
        }

        Commands::Issues => {
            let store = open_store(&config)?;
            cmd_issues(&store, output_format)
        }

        Commands::Fleet => {
            let store = open_store(&config)?;
            cmd_fleet(&store, output_format)
        }

        Commands::Drivers => {
            let store = open_store(&config)?;
            cmd_drivers(&store, output_format)
        }

        Commands::Config {
            show,
            set_data_dir,
            set_output,
            set_seed_file,
            reset,
        } => cmd_config(show, set_data_dir, set_output, set_seed_file, reset),
    }
}

fn open_store(config: &Config) -> Result<Store> {
    Store::open(config.data_dir()?)
}

fn cmd_seed(config: &Config, file: Option<PathBuf>) -> Result<()> {
    let path = file.or_else(|| config.seed_file.clone()).ok_or_else(|| {
        Error::validation(
            "no seed file given; pass a path or set one with: neocargo config --set-seed-file <path>",
        )
    })?;

    let seed_file = seed::load_file(&path)?;
    let mut store = open_store(config)?;
    let summary = seed::apply(&mut store, &seed_file)?;

    println!("Seed applied from: {}", path.display());
    println!("  Cities:   {}", summary.cities);
    println!("  Routes:   {}", summary.routes);
    println!("  Specs:    {}", summary.specs);
    println!("  Vehicles: {}", summary.vehicles);
    println!("  Drivers:  {}", summary.drivers);
    Ok(())
}

fn cmd_orders(store: &Store, output_format: OutputFormat) -> Result<()> {
    let orders: Vec<_> = store.tables().all_orders().collect();

    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&orders)?);
        return Ok(());
    }

    if orders.is_empty() {
        println!("No orders.");
        return Ok(());
    }

    println!(
        "{:>5} {:<20} {:<34} {:>10} {:>12} {:<12}",
        "Id", "Client", "Route", "Kg", "Price", "Status"
    );
    println!("{}", "-".repeat(98));
    for order in orders {
        let route = format!("{} -> {}", order.origin, order.destination);
        let price = order
            .final_price
            .map(|p| format!("{:.2}", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5} {:<20} {:<34} {:>10.0} {:>12} {:<12}",
            order.id,
            truncate(&order.client, 18),
            truncate(&route, 32),
            order.cargo_weight_kg,
            price,
            order.status
        );
    }
    Ok(())
}

fn cmd_deliveries(store: &Store, output_format: OutputFormat) -> Result<()> {
    let deliveries: Vec<_> = store.tables().all_assignments().collect();

    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&deliveries)?);
        return Ok(());
    }

    if deliveries.is_empty() {
        println!("No deliveries.");
        return Ok(());
    }

    println!(
        "{:>5} {:>7} {:>7} {:>8} {:<12} {}",
        "Id", "Order", "Driver", "Vehicle", "Status", "Notes"
    );
    println!("{}", "-".repeat(64));
    for delivery in deliveries {
        println!(
            "{:>5} {:>7} {:>7} {:>8} {:<12} {}",
            delivery.id,
            delivery.order_id,
            delivery.driver_id,
            delivery.vehicle_id,
            delivery.status,
            delivery.notes.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn cmd_issue_report(
    store: &mut Store,
    assignment_id: u64,
    issue_type: IssueType,
    description: &str,
) -> Result<()> {
    let reported = issue::report_issue(store, assignment_id, issue_type, description)?;
    println!(
        "Issue #{} ({}) reported on delivery #{}",
        reported.id, reported.issue_type, reported.assignment_id
    );
    Ok(())
}

fn cmd_issues(store: &Store, output_format: OutputFormat) -> Result<()> {
    let issues: Vec<_> = store.tables().all_issues().collect();

    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&issues)?);
        return Ok(());
    }

    if issues.is_empty() {
        println!("No issues.");
        return Ok(());
    }

    println!(
        "{:>5} {:>9} {:<10} {:<14} {}",
        "Id", "Delivery", "Type", "Status", "Description"
    );
    println!("{}", "-".repeat(76));
    for item in issues {
        println!(
            "{:>5} {:>9} {:<10} {:<14} {}",
            item.id,
            item.assignment_id,
            item.issue_type,
            item.status,
            truncate(&item.description, 34)
        );
    }
    Ok(())
}

fn cmd_fleet(store: &Store, output_format: OutputFormat) -> Result<()> {
    let vehicles: Vec<_> = store.tables().all_vehicles().collect();

    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&vehicles)?);
        return Ok(());
    }

    if vehicles.is_empty() {
        println!("No vehicles.");
        return Ok(());
    }

    println!(
        "{:>5} {:<26} {:<11} {:>11} {:>8} {:<18} {}",
        "Id", "Vehicle", "Type", "Payload kg", "License", "City", "Active"
    );
    println!("{}", "-".repeat(92));
    for vehicle in vehicles {
        let spec = store.tables().find_spec(vehicle.spec_id);
        let vehicle_type = spec.map(|s| s.vehicle_type.label()).unwrap_or("-");
        let payload = spec
            .map(|s| format!("{:.0}", s.max_payload_kg))
            .unwrap_or_else(|| "-".to_string());
        let license = vehicle
            .min_license
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5} {:<26} {:<11} {:>11} {:>8} {:<18} {}",
            vehicle.id,
            truncate(&vehicle.description(), 24),
            vehicle_type,
            payload,
            license,
            city_label(store, vehicle.current_city)?,
            if vehicle.active { "yes" } else { "no" }
        );
    }
    Ok(())
}

fn cmd_drivers(store: &Store, output_format: OutputFormat) -> Result<()> {
    let drivers = store.drivers()?;

    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&drivers)?);
        return Ok(());
    }

    if drivers.is_empty() {
        println!("No drivers.");
        return Ok(());
    }

    println!(
        "{:>5} {:<22} {:>8} {:<18} {:>10} {:>11}",
        "Id", "Name", "License", "City", "Available", "Deliveries"
    );
    println!("{}", "-".repeat(80));
    for driver in drivers {
        println!(
            "{:>5} {:<22} {:>8} {:<18} {:>10} {:>11}",
            driver.id,
            truncate(&driver.name, 20),
            driver.license,
            city_label(store, Some(driver.current_city))?,
            if driver.available { "yes" } else { "no" },
            driver.completed_deliveries
        );
    }
    Ok(())
}

fn city_label(store: &Store, city_id: Option<u64>) -> Result<String> {
    let Some(id) = city_id else {
        return Ok("-".to_string());
    };
    Ok(store
        .find_city(id)?
        .map(|c| c.full_name())
        .unwrap_or_else(|| format!("#{id}")))
}

fn cmd_config(
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_seed_file: Option<PathBuf>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(data_dir) = set_data_dir {
        config.data_dir = Some(data_dir);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(seed_file) = set_seed_file {
        config.seed_file = Some(seed_file);
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
