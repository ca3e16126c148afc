use std::collections::HashMap;

use mock_server::{app_with, seed, Account};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let accounts: HashMap<String, Account> = match std::env::var("SEED_FILE") {
        Ok(path) => serde_json::from_str(&tokio::fs::read_to_string(&path).await?)?,
        Err(_) => HashMap::new(),
    };
    let token = std::env::var("MOCK_TOKEN").ok();

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("listening on {addr} with {} accounts", accounts.len());
    mock_server::run(listener, app_with(seed(accounts), token)).await?;
    Ok(())
}
