use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "saferoute-cli")]
#[command(about = "Command-line client for the SafeRoute API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show service version and hazard summary
    Status,
    /// Plan a route between two coordinates
    Route {
        #[arg(allow_negative_numbers = true)]
        start_lat: f64,
        #[arg(allow_negative_numbers = true)]
        start_lon: f64,
        #[arg(allow_negative_numbers = true)]
        dest_lat: f64,
        #[arg(allow_negative_numbers = true)]
        dest_lon: f64,
    },
    /// Route from an address to the nearest safe zone
    AddressRoute { address: String },
    /// Find the nearest safe zone and nearby hazards
    SafeZone {
        address: String,
        /// Search radius in meters
        #[arg(short, long)]
        radius: Option<f64>,
    },
    /// Show the canned Kalispell flood scenario
    Scenario,
    /// Submit an emergency beacon
    Sos {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        #[arg(short, long, default_value = "")]
        message: String,
        #[arg(short, long, default_value_t = 1)]
        survivors: u32,
    },
    /// List persisted beacons, newest first
    Beacons,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Status => client.get(format!("{base}/status")).send().await?,
        Commands::Route {
            start_lat,
            start_lon,
            dest_lat,
            dest_lon,
        } => {
            client
                .get(format!("{base}/compute_route"))
                .query(&[
                    ("start_lat", start_lat),
                    ("start_lon", start_lon),
                    ("dest_lat", dest_lat),
                    ("dest_lon", dest_lon),
                ])
                .send()
                .await?
        }
        Commands::AddressRoute { address } => {
            client
                .get(format!("{base}/route"))
                .query(&[("address", address)])
                .send()
                .await?
        }
        Commands::SafeZone { address, radius } => {
            let mut req = client
                .get(format!("{base}/find_safe_zone"))
                .query(&[("address", address)]);
            if let Some(radius) = radius {
                req = req.query(&[("radius", radius)]);
            }
            req.send().await?
        }
        Commands::Sos {
            lat,
            lon,
            message,
            survivors,
        } => {
            client
                .post(format!("{base}/sos"))
                .json(&json!({ "lat": lat, "lon": lon, "message": message, "survivors": survivors }))
                .send()
                .await?
        }
        Commands::Scenario => client.get(format!("{base}/scenario")).send().await?,
        Commands::Beacons => client.get(format!("{base}/sos")).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: SafeRoute API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
