//! ledgerdesk console entry point
//!
//! Wires config and logging, probes the backend, and prints a short
//! overview of the book of business. Pass `--mock` (with the `mock-api`
//! feature) to run against an in-process seeded backend.

use ledgerdesk::config::AppConfig;
use ledgerdesk::gateway::{ApiClient, Backend};
use ledgerdesk::logging::init_logging;
use tracing::info;

// ============================================================
// ARGUMENTS
// ============================================================

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

fn get_base_url_override() -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--base-url" && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

#[cfg(feature = "mock-api")]
fn use_mock_mode() -> bool {
    std::env::args().any(|a| a == "--mock")
}

// ============================================================
// MOCK SEED
// ============================================================

#[cfg(feature = "mock-api")]
fn demo_bank() -> ledgerdesk::mock_api::MockBank {
    use ledgerdesk::model::{Account, AccountStatus, Customer, CustomerStatus};
    use rust_decimal::Decimal;

    let bank = ledgerdesk::mock_api::MockBank::new();
    bank.insert_customer(Customer {
        id: "cli-1".to_string(),
        display_name: "Ada Lovelace".to_string(),
        status: CustomerStatus::Verified,
    });
    bank.insert_customer(Customer {
        id: "cli-2".to_string(),
        display_name: "Charles Babbage".to_string(),
        status: CustomerStatus::Verified,
    });
    bank.insert_account(Account {
        id: "acc-1".to_string(),
        account_number: "1000001".to_string(),
        status: AccountStatus::Active,
        currency: "USD".to_string(),
        balance: Decimal::from(500),
        available_balance: Decimal::from(500),
        client_id: Some("cli-1".to_string()),
        product_id: None,
    });
    bank.insert_account(Account {
        id: "acc-2".to_string(),
        account_number: "1000002".to_string(),
        status: AccountStatus::Active,
        currency: "USD".to_string(),
        balance: Decimal::from(100),
        available_balance: Decimal::from(100),
        client_id: Some("cli-2".to_string()),
        product_id: None,
    });
    bank
}

// ============================================================
// MAIN
// ============================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load_or_default(&env);
    let _guard = init_logging(&config);

    let base_url = get_base_url_override().unwrap_or_else(|| config.api_base_url());

    #[cfg(feature = "mock-api")]
    let (base_url, _mock_server) = if use_mock_mode() {
        let (addr, handle) = ledgerdesk::mock_api::serve(demo_bank()).await?;
        (format!("http://{}", addr), Some(handle))
    } else {
        (base_url, None)
    };

    info!(env = %env, base_url = %base_url, "ledgerdesk starting");

    let client = ApiClient::new(&base_url, config.api.timeout_secs)?;

    client.health().await?;
    println!("backend OK at {}", base_url);

    let customers = client.list_customers().await?;
    println!("{} customer(s)", customers.len());
    for customer in &customers {
        let accounts = client.accounts_for_client(&customer.id).await?;
        println!(
            "  {} [{}] - {} account(s)",
            customer.display_name,
            customer.status,
            accounts.len()
        );
        for account in &accounts {
            println!(
                "    {} {} {} (available {})",
                account.account_number, account.currency, account.status, account.available_balance
            );
        }
    }

    Ok(())
}
