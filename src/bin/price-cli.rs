use clap::{Parser, Subcommand};
use price_calculator::client::{ClientError, PriceClient};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "price-cli")]
#[command(about = "Command-line client for the price calculator", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the total price from the stored settings
    Calculate,
    /// Set the base price
    SetBasePrice { value: String },
    /// Set the tax rate (percent)
    SetTaxRate { value: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = PriceClient::new(&cli.url);

    match cli.command {
        Commands::Calculate => print_result(client.calculate().await)?,
        Commands::SetBasePrice { value } => print_result(client.set_base_price(value).await)?,
        Commands::SetTaxRate { value } => print_result(client.set_tax_rate(value).await)?,
    }

    Ok(())
}

fn print_result<T: Serialize>(result: Result<T, ClientError>) -> Result<(), Box<dyn std::error::Error>> {
    match result {
        Ok(body) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        Err(ClientError::Status { status, body }) => {
            eprintln!("Error: server returned status {}", status);
            eprintln!("Response: {}", body.trim_end());
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
