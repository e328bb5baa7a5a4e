use std::process;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use departure_board::domain::{Moment, StopId};
use departure_board::engine::{BoardConfig, DepartureQueryEngine, formatted_clock_time};
use departure_board::store::SqliteStore;
use departure_board::task::BoardTask;

fn init_tracing() {
    // RUST_LOG overrides the default filter when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("departure_board=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn usage() -> ! {
    eprintln!("Usage: departure-board <dataset.db> <stop_id> [stop_id ...]");
    process::exit(2);
}

#[tokio::main]
async fn main() {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let Some(dataset) = args.next() else { usage() };
    let stops: Vec<StopId> = args.map(StopId::new).collect();
    if stops.is_empty() {
        usage();
    }

    let store = match SqliteStore::open(&dataset) {
        Ok(store) => Arc::new(store),
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    let config = BoardConfig::default();
    let twelve_hour = config.twelve_hour_clock;
    let look_ahead = config.look_ahead_hours;
    let engine = Arc::new(DepartureQueryEngine::new(store, config));

    let now = Moment::from_datetime(chrono::Local::now().naive_local());

    // Two boards: today's departures, plus the carryover/next-day
    // supplement for the midnight-adjacent cases.
    let today = BoardTask::spawn(engine.clone(), now, stops.clone(), true)
        .join()
        .await;
    let supplement = BoardTask::spawn(engine, now, stops, false).join().await;

    let mut board = Vec::new();
    for result in if now.hour() <= look_ahead {
        // Late night: the still-running carryover trips come first.
        [supplement, today]
    } else {
        [today, supplement]
    } {
        match result {
            Ok(Some(mut departures)) => board.append(&mut departures),
            Ok(None) => {}
            Err(err) => {
                eprintln!("query failed: {err}");
                process::exit(1);
            }
        }
    }

    if board.is_empty() {
        println!("No departures within the next {look_ahead} hour(s).");
        return;
    }

    for departure in &board {
        println!(
            "{:<10} {:>9}  {:>6}  {}  {}",
            departure.stop_id.as_str(),
            formatted_clock_time(&departure.departure.to_string(), twelve_hour),
            departure.route_label,
            departure.destination,
            departure.countdown,
        );
    }
}
