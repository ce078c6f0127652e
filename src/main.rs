#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate prometheus;
#[macro_use]
extern crate rocket;

use config::Config;
use meinsenec_rs::api;
use meinsenec_rs::model::Session;
use rocket::{Build, Rocket, State};
use std::sync::Mutex;
use std::time::Instant;

mod metrics;

const API_URL: &str = "https://app-gateway-prod.senecops.com/v1/senec";

#[derive(Clone, serde::Deserialize)]
pub struct MeinSenecConfig {
    api_url: String,
    username: String,
    password: String,
    device_id: String,
    interval: u64,
}

/// Structure containing state for API handlers.
pub struct StateData {
    session: Session,
    interval: u64,
    /// Timestamp of last successful metric collection via `metrics::collect()`
    timestamp: Mutex<Option<Instant>>,
}

impl StateData {
    /// Updates `timestamp` to `now()`.
    fn touch(&self) {
        if let Ok(mut ts) = self.timestamp.lock() {
            *ts = Some(Instant::now());
        } else {
            log::trace!("Unable to lock timestamp mutex, will refresh again")
        }
    }

    /// Checks whether `interval_secs` elapsed since last `touch()`
    fn interval_elapsed(&self, interval_secs: u64) -> bool {
        let elapsed_opt = self
            .timestamp
            .lock()
            .ok()
            .and_then(|a| a.map(|b| b.elapsed().as_secs()));

        if let Some(elapsed) = elapsed_opt {
            elapsed > interval_secs
        } else {
            /* If there is None timestamp/elapsed, always return true to trigger action */
            true
        }
    }
}

pub fn read_settings() -> MeinSenecConfig {
    let mut settings = Config::default();
    settings
        .merge(config::Environment::with_prefix("SENEC"))
        .unwrap()
        .set_default("api_url", API_URL)
        .unwrap()
        .set_default("username", "")
        .unwrap()
        .set_default("password", "")
        .unwrap()
        .set_default("device_id", "")
        .unwrap()
        .set_default("interval", 300)
        .unwrap();

    settings.try_into().expect("Configuration error")
}

#[get("/metrics")]
async fn metrics_route(state: &State<StateData>) -> Result<String, api::Error> {
    if state.interval_elapsed(state.interval) {
        metrics::collect(&state.session).await;
        state.touch();
    } else {
        log::info!("interval time not yet elapsed since last run; returning cached result")
    }
    metrics::read().await
}

#[get("/dashboard")]
async fn dashboard_route(state: &State<StateData>) -> Result<String, api::Error> {
    if !state.session.is_enabled() {
        return Err(api::Error::LoginError(String::from(
            "mein-senec.de is disabled",
        )));
    }

    let dashboard = meinsenec_rs::fetch_dashboard(&state.session).await;
    Ok(format!("{:#?}", dashboard))
}

#[launch]
async fn rocket() -> Rocket<Build> {
    env_logger::init();

    let settings = read_settings();
    let api = meinsenec_rs::api(settings.api_url, settings.username, settings.password);
    let session = meinsenec_rs::login(&api, &settings.device_id).await;

    if !session.is_enabled() {
        log::warn!("mein-senec.de is disabled, restart with valid credentials to collect metrics");
    }

    let state = StateData {
        session,
        interval: settings.interval,
        timestamp: Mutex::new(None),
    };

    rocket::build()
        .manage(state)
        .mount("/", routes![metrics_route, dashboard_route])
}
