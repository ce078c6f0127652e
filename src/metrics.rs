use meinsenec_rs::model::{MetricGroup, Session};
use prometheus::{Encoder, GaugeVec, TextEncoder};

lazy_static! {
    static ref CURRENT_GAUGE: GaugeVec = register_gauge_vec!(
        opts!(
            "dashboard_current_value",
            "instantaneous dashboard reading, in the unit reported by mein-senec.de",
        ),
        &["device_id", "metric", "unit"],
    )
    .unwrap();
    static ref TODAY_GAUGE: GaugeVec = register_gauge_vec!(
        opts!(
            "dashboard_today_value",
            "dashboard reading accumulated since midnight, in the unit reported by mein-senec.de",
        ),
        &["device_id", "metric", "unit"],
    )
    .unwrap();
    static ref EV_CONNECTED_GAUGE: GaugeVec = register_gauge_vec!(
        opts!(
            "electric_vehicle_connected",
            "1 when an electric vehicle is connected to the wallbox",
        ),
        &["device_id"],
    )
    .unwrap();
}

/// Feed one dashboard metric group to `gauge`, one labeled series per metric.
fn record_group(gauge: &GaugeVec, device_id: &str, group: &MetricGroup) {
    for (name, metric) in group.named_metrics() {
        gauge
            .with_label_values(&[device_id, name, &metric.unit])
            .set(metric.value);
    }
}

/// Collect the dashboard of `session`, updating the Prometheus exporter
/// registry. A disabled session is skipped.
pub async fn collect(session: &Session) {
    if !session.is_enabled() {
        log::info!("mein-senec.de is disabled, nothing to collect");
        return;
    }

    let dashboard = meinsenec_rs::fetch_dashboard(session).await;

    record_group(&CURRENT_GAUGE, session.device_id(), &dashboard.current);
    record_group(&TODAY_GAUGE, session.device_id(), &dashboard.today);
    EV_CONNECTED_GAUGE
        .with_label_values(&[session.device_id()])
        .set(if dashboard.electric_vehicle_connected {
            1.0
        } else {
            0.0
        });
}

/// Read metrics from Prometheus exporter registry.
pub async fn read() -> Result<String, meinsenec_rs::Error> {
    // Gather the metrics.
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).or(Err(meinsenec_rs::Error::FormatError))
}
