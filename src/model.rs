use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct Api {
    pub api_url: String,
    pub username: String,
    pub password: String,
}

/// Authenticated, device-bound state required to call the dashboard endpoint.
///
/// Constructed exclusively by [`crate::login`] and immutable afterwards: a
/// session is enabled only when one login sequence produced both a token and
/// a device id, and running `login` again is the only way to obtain an
/// enabled session after a failure.
#[derive(Debug)]
pub struct Session {
    pub(crate) api_url: String,
    pub(crate) token: String,
    pub(crate) device_id: String,
    /// Shared HTTP client, built once during login and reused by every
    /// dashboard call. `None` only when the client could not be built, in
    /// which case every call degrades to its failure default.
    pub(crate) client: Option<reqwest::Client>,
    enabled: bool,
}

impl Session {
    pub(crate) fn new(
        api_url: String,
        token: String,
        device_id: String,
        client: Option<reqwest::Client>,
    ) -> Session {
        let enabled = client.is_some() && !token.is_empty() && !device_id.is_empty();
        Session {
            api_url,
            token,
            device_id,
            client,
            enabled,
        }
    }

    pub(crate) fn disabled(api_url: &str) -> Session {
        Session::new(api_url.to_owned(), String::new(), String::new(), None)
    }

    /// Whether mein-senec.de can be accessed. Hosts poll this before every
    /// fetch cycle.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Resolved installation id; empty while unresolved.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }
}

/// One point-in-time read of the mein-senec.de dashboard.
///
/// Field names bind to the (German) wire contract through serde renames and
/// values pass through exactly as received. Every field defaults, so a
/// partial payload still deserializes; the `Default` value doubles as the
/// degraded return of [`crate::fetch_dashboard`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Dashboard {
    #[serde(default, rename = "aktuell")]
    pub current: MetricGroup,
    #[serde(default, rename = "heute")]
    pub today: MetricGroup,
    #[serde(default, rename = "zeitstempel")]
    pub timestamp: String,
    #[serde(default, rename = "electricVehicleConnected")]
    pub electric_vehicle_connected: bool,
}

/// The nine metrics reported for both the `current` and `today` groups.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetricGroup {
    #[serde(default, rename = "stromerzeugung")]
    pub generation: Metric,
    #[serde(default, rename = "stromverbrauch")]
    pub consumption: Metric,
    #[serde(default, rename = "netzeinspeisung")]
    pub grid_feed_in: Metric,
    #[serde(default, rename = "netzbezug")]
    pub grid_draw: Metric,
    #[serde(default, rename = "speicherbeladung")]
    pub battery_charge: Metric,
    #[serde(default, rename = "speicherentnahme")]
    pub battery_discharge: Metric,
    #[serde(default, rename = "speicherfuellstand")]
    pub battery_level: Metric,
    #[serde(default, rename = "autarkie")]
    pub self_sufficiency: Metric,
    #[serde(default, rename = "wallbox")]
    pub wallbox: Metric,
}

impl MetricGroup {
    /// Stable `(name, metric)` pairs in wire order, used by the exporter to
    /// publish one labeled series per metric.
    pub fn named_metrics(&self) -> [(&'static str, &Metric); 9] {
        [
            ("generation", &self.generation),
            ("consumption", &self.consumption),
            ("grid_feed_in", &self.grid_feed_in),
            ("grid_draw", &self.grid_draw),
            ("battery_charge", &self.battery_charge),
            ("battery_discharge", &self.battery_discharge),
            ("battery_level", &self.battery_level),
            ("self_sufficiency", &self.self_sufficiency),
            ("wallbox", &self.wallbox),
        ]
    }
}

/// A single reading: raw value plus the unit string reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Metric {
    #[serde(default, rename = "wert")]
    pub value: f64,
    #[serde(default, rename = "einheit")]
    pub unit: String,
}

#[cfg(test)]
mod test {
    use super::Dashboard;
    use std::fs;
    use std::path::PathBuf;

    fn read_resource(filename: &str) -> String {
        let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        d.push(format!("resources/test/{}", filename));
        fs::read_to_string(d.as_path()).unwrap()
    }

    #[test]
    fn dashboard_values_pass_through_unchanged() {
        let input = read_resource("dashboard.json");
        let output: Dashboard = serde_json::from_str(&input).unwrap();

        assert_eq!(4.67, output.current.generation.value);
        assert_eq!("kW", output.current.generation.unit);
        assert_eq!(0.362, output.current.consumption.value);
        assert_eq!(3.0, output.current.grid_feed_in.value);
        assert_eq!(0.0, output.current.grid_draw.value);
        assert_eq!(1.308, output.current.battery_charge.value);
        assert_eq!(0.0, output.current.battery_discharge.value);
        assert_eq!(72.0, output.current.battery_level.value);
        assert_eq!("%", output.current.battery_level.unit);
        assert_eq!(100.0, output.current.self_sufficiency.value);
        assert_eq!(0.0, output.current.wallbox.value);

        assert_eq!(21.51, output.today.generation.value);
        assert_eq!("kWh", output.today.generation.unit);
        assert_eq!(9.15, output.today.consumption.value);
        assert_eq!(14.67, output.today.grid_feed_in.value);
        assert_eq!(0.233, output.today.grid_draw.value);
        assert_eq!(8.98, output.today.battery_charge.value);
        assert_eq!(3.5, output.today.battery_discharge.value);
        assert_eq!(72.0, output.today.battery_level.value);
        assert_eq!(97.4, output.today.self_sufficiency.value);
        assert_eq!("%", output.today.self_sufficiency.unit);
        assert_eq!(0.0, output.today.wallbox.value);

        assert_eq!("2023-08-12T11:42:00Z", output.timestamp);
        assert!(output.electric_vehicle_connected);
    }

    #[test]
    fn dashboard_missing_fields_default_to_zero() {
        let input = read_resource("dashboard_sparse.json");
        let output: Dashboard = serde_json::from_str(&input).unwrap();

        assert_eq!("2023-08-12T11:42:00Z", output.timestamp);
        assert!(!output.electric_vehicle_connected);
        /* the one delivered metric survives */
        assert_eq!(1.5, output.current.generation.value);
        assert_eq!("kW", output.current.generation.unit);
        /* everything absent comes back zeroed */
        assert_eq!(0.0, output.current.consumption.value);
        assert_eq!("", output.current.consumption.unit);
        assert_eq!(super::MetricGroup::default(), output.today);
    }

    #[test]
    fn metric_names_follow_wire_order() {
        let group = super::MetricGroup::default();
        let names: Vec<&str> = group.named_metrics().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            vec![
                "generation",
                "consumption",
                "grid_feed_in",
                "grid_draw",
                "battery_charge",
                "battery_discharge",
                "battery_level",
                "self_sufficiency",
                "wallbox",
            ],
            names
        );
    }
}
