//! FX CLI
//!
//! Command-line interface for the Currency Converter API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use fx_client::CurrencyClient;
use fx_types::History;

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "Currency Converter API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Currency Converter API
    #[arg(long, env = "FX_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the service description
    Info,
    /// Show runtime status and storage mode
    Status,
    /// List currencies supported by the rate provider
    Currencies,
    /// Convert an amount between two currencies
    Convert {
        /// Base currency code
        #[arg(long)]
        from: String,
        /// Target currency code
        #[arg(long)]
        to: String,
        /// Amount in the base currency
        amount: f64,
    },
    /// Show recent conversions
    History,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = CurrencyClient::new(&cli.api_url);

    match cli.command {
        Commands::Info => {
            let info = client.info().await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Commands::Status => {
            let status = client.status().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::Currencies => {
            let currencies = client.list_currencies().await?;
            println!("{}", serde_json::to_string_pretty(&currencies)?);
        }
        Commands::Convert { from, to, amount } => {
            let response = client.convert(&from, &to, amount).await?;
            println!(
                "{} {} = {} {} (rate {})",
                amount,
                from.to_uppercase(),
                response.result,
                to.to_uppercase(),
                response.exchange_rate
            );
        }
        Commands::History => match client.history().await? {
            History::Records(records) if records.is_empty() => {
                println!("No conversions yet");
            }
            History::ClientSide(info) => {
                println!("{}", info.message);
                println!("{}", info.instructions);
            }
            history => {
                println!("{}", serde_json::to_string_pretty(&history)?);
            }
        },
    }

    Ok(())
}
