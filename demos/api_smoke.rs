//! Smoke test against a running HR management server.
//!
//! Usage: cargo run --example api_smoke [URL]
//!
//! Default URL: http://localhost:8000

use std::time::Duration;

use hrdesk::api::{ApiClient, ListQuery};
use hrdesk::models::{AttendanceRecord, Employee};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8000".to_string());

    println!("Smoke testing HR server at {base_url}");
    println!("======================================");

    let api = ApiClient::new(&base_url, Duration::from_secs(10));

    println!("\n[1] Pinging server...");
    if api.ping().await? {
        println!("    Server is up.");
    } else {
        println!("    Server answered with an error status.");
    }

    println!("\n[2] Fetching first page of employees...");
    let employees = api.fetch_list::<Employee>(&ListQuery::page(1)).await?;
    println!(
        "    {} employees total, page {} of {}",
        employees.pagination.total,
        employees.pagination.current_page,
        employees.pagination.last_page
    );

    if !employees.items.is_empty() {
        println!("\n    First {} employees:", employees.items.len().min(5));
        for (i, employee) in employees.items.iter().take(5).enumerate() {
            println!(
                "      {}. {:8} | {:25} | {} | {}",
                i + 1,
                employee.employee_code,
                employee.name,
                employee.department.as_deref().unwrap_or("-"),
                if employee.is_active { "active" } else { "inactive" }
            );
        }
    }

    println!("\n[3] Fetching today's attendance...");
    let today = chrono::Local::now().date_naive();
    let query = ListQuery::page(1).filter("date", today.format("%Y-%m-%d"));
    match api.fetch_list::<AttendanceRecord>(&query).await {
        Ok(page) => println!("    {} attendance records for {today}", page.pagination.total),
        Err(e) => println!("    Warning: Could not fetch attendance: {e}"),
    }

    println!("\nDone.");
    Ok(())
}
