/*
[INPUT]:  IMP_KEY / IMP_SECRET and optional IAMPORT_* settings from the environment
[OUTPUT]: Token, payment lookup and prepare round trip against the gateway
[POS]:    Examples - payment flow demonstration
[UPDATE]: When public client API changes
*/

use iamport_adapter::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// Example: payment flow
///
/// 1. Load credentials and config from the environment
/// 2. Fetch an access token
/// 3. Register an expected amount and check it
/// 4. Look a payment up by imp_uid (IMP_UID, optional)
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Iamport Payment Example ===\n");

    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load credentials: {}", e);
            eprintln!("  Set IMP_KEY and IMP_SECRET to run this example");
            return;
        }
    };
    let config = match ClientConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return;
        }
    };

    let client = match IamportClient::with_config(credentials, config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ Client created for {}", client.config().base_url);

    match client.get_token().await {
        Ok(_) => println!("✓ Access token issued"),
        Err(e) => {
            eprintln!("✗ Token exchange failed: {}", e);
            return;
        }
    }

    let merchant_uid = format!("example_{}", chrono::Utc::now().timestamp_millis());
    let amount = Decimal::from(1000);
    match client.prepare(&merchant_uid, amount).await {
        Ok(_) => println!("✓ Prepared {} for {}", amount, merchant_uid),
        Err(e) => eprintln!("✗ Prepare failed: {}", e),
    }
    match client.prepare_validate(&merchant_uid, amount).await {
        Ok(matches) => println!("✓ Prepared amount matches: {}", matches),
        Err(e) => eprintln!("✗ Prepare lookup failed: {}", e),
    }

    if let Ok(imp_uid) = std::env::var("IMP_UID") {
        match client.find_by_imp_uid(&imp_uid).await {
            Ok(payment) => {
                println!("\n--- Payment {} ---", imp_uid);
                println!("  status: {:?}", payment_status(&payment));
                println!("  amount: {:?}", payment_amount(&payment));
            }
            Err(e) => eprintln!("✗ Payment lookup failed: {}", e),
        }
    }

    client.close().await;
    println!("\n=== Example Complete ===");
}
