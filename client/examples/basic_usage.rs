use std::process::exit;

use onesignal_client::{
    ApiError, Client, ClientConfig, CreateNotificationResponse, CsvExport, CsvExportResponse,
    Error, Notification, NotificationList, NotificationsQuery, PlayerList, Result,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Credentials come from ONESIGNAL_APP_ID / ONESIGNAL_API_KEY, or from
    // the first two arguments when given.
    let args: Vec<String> = std::env::args().collect();
    let config = if args.len() >= 3 {
        ClientConfig::new(args[1].clone(), args[2].clone())
    } else {
        match ClientConfig::from_env() {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{}", err);
                eprintln!("Usage: {} <app_id> <api_key>", args[0]);
                exit(1);
            }
        }
    };
    let client = Client::new(config)?;

    // Send a notification to every subscribed user
    let notification = Notification::new()
        .heading("en", "Hello")
        .content("en", "Sent from the Rust client")
        .included_segments(["Subscribed Users"]);
    let created: CreateNotificationResponse = client.create_notification(&notification)?.json()?;
    println!(
        "Created notification {} for {} recipients",
        created.id, created.recipients
    );

    // Look it up again
    let fetched = client.fetch_notification(&created.id)?;
    println!("Notification body: {}", fetched.text());

    // First page of notifications
    let page: NotificationList = client
        .fetch_notifications(&NotificationsQuery::default())?
        .json()?;
    println!("{} notifications in total", page.total_count);

    // Players
    let players: PlayerList = client.fetch_players()?.json()?;
    println!("{} players in total", players.total_count);

    // Classified errors can be matched on
    match client.fetch_player("00000000-0000-0000-0000-000000000000") {
        Ok(response) => println!("Player: {}", response.text()),
        Err(Error::Api(ApiError::RateLimit(message))) => println!("Slow down: {}", message),
        Err(Error::Api(err)) if err.is_client_error() => println!("Lookup failed: {}", err),
        Err(err) => return Err(err),
    }

    // Export players active in the last day
    let export: CsvExportResponse = client
        .csv_export(&CsvExport {
            extra_fields: Some(vec!["country".to_string(), "location".to_string()]),
            last_active_since: Some(chrono::Utc::now() - chrono::Duration::days(1)),
            segment_name: None,
        })?
        .json()?;
    println!("CSV export available at {}", export.csv_file_url);

    Ok(())
}
