use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fuel_prices::config::AppConfig;
use fuel_prices::context::{AppContext, assemble};
use fuel_prices::credentials::{CredentialStore, EnvCredentials, STATIONS_API_KEY};
use fuel_prices::domain::{Address, FuelType, Station};
use fuel_prices::messages::{Localizer, Messages};
use fuel_prices::services::{GeocodingService, StationService};
use fuel_prices::transport::{FixtureTransport, HttpConfig, HttpTransport};

const USAGE: &str = "usage: fuel-prices <street> <postcode> <city> [house-number]";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let address = match parse_address(&args) {
        Some(address) => address,
        None => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    let config = AppConfig::from_env().expect("Invalid configuration");
    let credentials: Arc<dyn CredentialStore> = Arc::new(EnvCredentials::new());
    if credentials.read(STATIONS_API_KEY).is_none() {
        eprintln!(
            "Warning: {} not set. Station lookups will fail.",
            EnvCredentials::var_name(STATIONS_API_KEY)
        );
    }
    let messages: Arc<dyn Localizer> = Arc::new(Messages::english());

    match &config.fixture_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "serving responses from fixtures");
            let transport = FixtureTransport::new(dir).expect("Failed to open fixture directory");
            let context = assemble(
                &config,
                transport.clone(),
                transport,
                credentials,
                messages,
            );
            run(&context, address).await;
        }
        None => {
            let stations = HttpTransport::new(http_config(&config, &config.stations_url))
                .expect("Failed to create station client");
            let geocoder = HttpTransport::new(http_config(&config, &config.geocoder_url))
                .expect("Failed to create geocoding client");
            let context = assemble(&config, stations, geocoder, credentials, messages);
            run(&context, address).await;
        }
    }
}

fn parse_address(args: &[String]) -> Option<Address> {
    let [street, post_code, city, rest @ ..] = args else {
        return None;
    };
    if rest.len() > 1 {
        return None;
    }

    let address = match Address::new(street.as_str(), post_code.as_str(), city.as_str()) {
        Ok(address) => address,
        Err(e) => {
            eprintln!("{e}");
            return None;
        }
    };
    Some(match rest.first() {
        Some(number) => address.with_house_number(number.as_str()),
        None => address,
    })
}

fn http_config(config: &AppConfig, base_url: &str) -> HttpConfig {
    HttpConfig::new(base_url)
        .with_timeout(config.http_timeout_secs)
        .with_max_concurrent(config.max_concurrent)
}

async fn run<G, S>(context: &AppContext<G, S>, address: Address)
where
    G: GeocodingService + 'static,
    S: StationService + 'static,
{
    let (tx, rx) = oneshot::channel();
    if let Err(e) = context
        .geocode(address.clone())
        .with_callback(move |geo| {
            let _ = tx.send(geo);
        })
        .run()
    {
        error!(error = %e, "could not start geocoding");
        return;
    }

    let Ok(Some(geo)) = rx.await else {
        println!("No location found for {address}");
        return;
    };
    println!("{address} -> {geo}");

    let (tx, rx) = oneshot::channel();
    if let Err(e) = context
        .nearby(&geo)
        .with_callback(move |stations| {
            let _ = tx.send(stations);
        })
        .run()
    {
        error!(error = %e, "could not start station search");
        return;
    }

    let stations = rx.await.unwrap_or_default();
    if stations.is_empty() {
        println!("No stations found");
    }
    for station in &stations {
        print_station(station);
    }
}

fn print_station(station: &Station) {
    let open = match station.is_open() {
        Some(true) => " (open)",
        Some(false) => " (closed)",
        None => "",
    };
    println!(
        "{} [{}] {}, {}{}",
        station.name(),
        station.brand(),
        station.place(),
        station.distance(),
        open
    );
    for fuel in FuelType::ALL {
        match station.price(fuel) {
            Ok(price) => println!("  {fuel:<10} {price:.3}"),
            Err(e) => println!("  {fuel:<10} - ({e})"),
        }
    }
}
