pub type Endpoint = str;

pub const LOGIN: &Endpoint = "/login";
pub const DEVICES: &Endpoint = "/anlagen";

pub fn dashboard(device_id: &str) -> String {
    format!("/anlagen/{}/dashboard", device_id)
}
