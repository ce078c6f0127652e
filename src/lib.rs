pub mod api;
pub mod model;

use api::response::get_devices::Device;
pub use api::Error;

pub fn api(api_url: String, username: String, password: String) -> model::Api {
    model::Api {
        api_url,
        username,
        password,
    }
}

/// Log in to mein-senec.de and resolve the installation to read from.
///
/// Never fails: whatever goes wrong is logged and yields a disabled session.
/// Callers check [`model::Session::is_enabled`] and run `login` again to
/// recover.
pub async fn login(api: &model::Api, device_hint: &str) -> model::Session {
    /* the account name is the e-mail address used on mein-senec.de */
    if api.username.is_empty() || !api.username.contains('@') {
        log::debug!("No username given, mein-senec.de stays disabled");
        return model::Session::disabled(&api.api_url);
    }
    if api.password.is_empty() {
        log::debug!("No password given, mein-senec.de stays disabled");
        return model::Session::disabled(&api.api_url);
    }

    let client = match reqwest::ClientBuilder::new().build() {
        Ok(client) => client,
        Err(e) => {
            log::error!("An error occurred during login: {}", e);
            return model::Session::disabled(&api.api_url);
        }
    };

    let token = api::authenticate(&client, api).await.unwrap_or_default();

    /* device resolution runs even when no token was obtained */
    let device_id = match api::devices(&client, &api.api_url, &token).await {
        Ok(devices) => {
            let device_id = select_device(&devices, device_hint);
            if device_id.is_empty() {
                log::debug!("Device ID not found in the devices response");
            } else {
                log::debug!("Device ID {} found and verified", device_id);
            }
            device_id
        }
        Err(_) => String::new(),
    };

    let session = model::Session::new(api.api_url.to_owned(), token, device_id, Some(client));
    if !session.is_enabled() {
        log::debug!("Problems with token or deviceId, mein-senec.de stays disabled");
    }
    session
}

/// Pick the installation to read from. A single device is always taken; with
/// several devices the configured device id decides, and without one every
/// candidate is logged so the user can pick.
fn select_device(devices: &[Device], device_hint: &str) -> String {
    match devices {
        [] => String::new(),
        [device] => device.id.to_owned(),
        devices if device_hint.is_empty() => {
            log::warn!(
                "There are {} devices configured in mein-senec.de, but no device id was configured.",
                devices.len()
            );
            for device in devices {
                log::warn!("{}", device);
            }
            String::new()
        }
        devices => devices
            .iter()
            .find(|device| device.id == device_hint)
            .map(|device| device.id.to_owned())
            .unwrap_or_default(),
    }
}

/// Read the current dashboard of `session`'s installation.
///
/// Never fails: transport and decoding problems yield the all-default
/// snapshot instead.
pub async fn fetch_dashboard(session: &model::Session) -> model::Dashboard {
    api::dashboard(session).await.unwrap_or_default()
}
