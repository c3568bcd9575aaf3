use colored::Colorize;
use drivescore_core::DriverRecord;
use tabled::builder::Builder;
use tabled::settings::Style;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_drivers_json(drivers: &[DriverRecord]) {
    println!("{}", serde_json::to_string_pretty(drivers).unwrap());
}

pub fn print_drivers_table(drivers: &[DriverRecord]) {
    if drivers.is_empty() {
        println!("No drivers found.");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record([
        "ID",
        "Name",
        "Active",
        "Speeding",
        "Acceleration",
        "Braking",
        "Cornering",
    ]);
    for driver in drivers {
        builder.push_record([
            driver.id.clone(),
            driver.name.clone(),
            (if driver.is_active { "yes" } else { "no" }).to_string(),
            risk_cell(driver.risk.speeding),
            risk_cell(driver.risk.acceleration),
            risk_cell(driver.risk.braking),
            risk_cell(driver.risk.cornering),
        ]);
    }

    let table = builder.build().with(Style::rounded()).to_string();
    println!("{table}");
    println!("Total: {}", drivers.len());
}

fn risk_cell(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{value:.1}"),
        None => "N/A".to_string(),
    }
}
