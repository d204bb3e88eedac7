//! Output formatting module

use neocargo_app::quote::QuotePreview;
use neocargo_domain::model::Order;
use neocargo_domain::service::CostResult;
use neocargo_types::{OutputFormat, Result};

pub fn output_preview(output_format: OutputFormat, preview: &QuotePreview) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(preview)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nQuote: {} -> {}", preview.origin.full_name(), preview.destination.full_name());
    println!("Distance: {:.0} km | Toll: R$ {:.2}", preview.route.distance_km, preview.route.toll_cost);
    println!();
    println!(
        "{:<28} {:>10} {:>8} {:>12} {:>8}  {}",
        "Vehicle", "Fuel", "Litres", "Price", "Hours", "Status"
    );
    println!("{}", "-".repeat(80));

    for result in &preview.selection.all_results {
        print_result_row(result);
    }

    println!();
    match (&preview.selection.cheapest, &preview.selection.fastest, &preview.selection.balanced) {
        (Some(cheapest), Some(fastest), Some(balanced)) => {
            println!("Economical: {}", option_line(cheapest));
            println!("Fast:       {}", option_line(fastest));
            println!("Balanced:   {}", option_line(balanced));
        }
        _ => println!("No vehicle can take this shipment."),
    }

    Ok(())
}

fn print_result_row(result: &CostResult) {
    let fuel = result
        .fuel_type
        .map(|f| f.to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = if result.feasible {
        "ok".to_string()
    } else {
        result.reason.clone().unwrap_or_else(|| "infeasible".to_string())
    };
    println!(
        "{:<28} {:>10} {:>8.2} {:>12.2} {:>8.2}  {}",
        truncate(&result.vehicle, 26),
        fuel,
        result.litres_needed,
        result.cost_with_margin,
        result.travel_hours,
        status
    );
}

fn option_line(result: &CostResult) -> String {
    format!(
        "{} | R$ {:.2} | {:.1} h",
        result.vehicle, result.cost_with_margin, result.travel_hours
    )
}

pub fn output_order(output_format: OutputFormat, order: &Order) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(order)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nOrder #{}", order.id);
    println!("==========");
    println!("Client:      {}", order.client);
    println!("Route:       {} -> {}", order.origin, order.destination);
    println!("Cargo:       {:.0} kg", order.cargo_weight_kg);
    println!("Deadline:    {} day(s)", order.deadline_days);
    println!("Status:      {}", order.status);

    if let Some(options) = &order.quote_options {
        println!();
        println!("Economical:  R$ {:.2} | {:.1} h | {}", options.economical.price, options.economical.hours, options.economical.vehicle);
        println!("Fast:        R$ {:.2} | {:.1} h | {}", options.fast.price, options.fast.hours, options.fast.vehicle);
        println!("Balanced:    R$ {:.2} | {:.1} h | {}", options.balanced.price, options.balanced.hours, options.balanced.vehicle);
    }

    if let Some(choice) = order.chosen_option {
        println!();
        println!("Chosen:      {}", choice);
        if let (Some(price), Some(hours)) = (order.final_price, order.final_hours) {
            println!("Final terms: R$ {:.2} | {:.1} h | {}", price, hours, order.final_vehicle.as_deref().unwrap_or("-"));
        }
    }

    if let Some(notes) = &order.notes {
        println!("Notes:       {}", notes);
    }

    Ok(())
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}
