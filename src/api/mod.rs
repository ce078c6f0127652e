pub mod endpoint;
pub mod error;
pub mod response;

use crate::model;
pub use error::Error;
use response::get_devices::Device;
use response::login::Login;

use std::collections::HashMap;

/// Obtain an access token for `api`'s credentials.
pub async fn authenticate(client: &reqwest::Client, api: &model::Api) -> Result<String, Error> {
    let url = format!("{}{}", api.api_url, endpoint::LOGIN);

    let request_body = HashMap::from([
        ("username", api.username.to_owned()),
        ("password", api.password.to_owned()),
    ]);

    let response = match client.post(url).json(&request_body).send().await {
        Ok(response) => response,
        Err(e) => {
            log::error!("An error occurred during login: {}", e);
            return Err(Error::ApiError(e.to_string()));
        }
    };

    if response.status() != http::StatusCode::OK {
        log::debug!("Login failed with status code: {}", response.status());
        return Err(Error::LoginError(format!(
            "server responded {}",
            response.status()
        )));
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            log::error!("An error occurred during login: {}", e);
            return Err(Error::ApiError(e.to_string()));
        }
    };

    match serde_json::from_str::<Login>(&body) {
        Ok(login) => {
            log::debug!("Login successful!");
            Ok(login.token)
        }
        Err(e) => {
            log::error!("Login failed. Token not found in response.");
            Err(Error::InvalidResponse(body, e.to_string()))
        }
    }
}

/// GET `url` with the access token. The service expects the raw token in the
/// `Authorization` header, without a scheme prefix.
async fn get_authenticated(
    client: &reqwest::Client,
    url: &str,
    token: &str,
    context: &str,
) -> Result<String, Error> {
    let request = client
        .get(url)
        .header(reqwest::header::AUTHORIZATION, token)
        .build()
        .map_err(|e| Error::ApiError(e.to_string()))?;
    let headers = request.headers().clone();

    let response = match client.execute(request).await {
        Ok(response) => response,
        Err(e) => {
            log::error!("An error occurred while retrieving {}: {}", context, e);
            return Err(Error::ApiError(e.to_string()));
        }
    };

    if response.status() == http::StatusCode::OK {
        response.text().await.map_err(|e| {
            log::error!("An error occurred while retrieving {}: {}", context, e);
            Error::ApiError(format!("Error reading API response: {}", e))
        })
    } else {
        log::debug!(
            "Failed to retrieve {} with status code: {}",
            context,
            response.status()
        );
        log::debug!("Request URL: {}", url);
        for (name, value) in headers.iter() {
            log::debug!("Header Name: {}", name);
            log::debug!("Header Value: {}", value.to_str().unwrap_or("(opaque)"));
        }
        Err(Error::ApiError(format!(
            "server responded {}",
            response.status()
        )))
    }
}

/// List the installations visible to `token`.
pub async fn devices(
    client: &reqwest::Client,
    api_url: &str,
    token: &str,
) -> Result<Vec<Device>, Error> {
    let url = format!("{}{}", api_url, endpoint::DEVICES);
    let body = get_authenticated(client, &url, token, "devices").await?;

    log::debug!("Devices Data:");
    log::debug!("{}", body);

    serde_json::from_str::<Vec<Device>>(&body).map_err(|e| {
        log::error!("An error occurred while retrieving devices: {}", e);
        Error::InvalidResponse(body, e.to_string())
    })
}

/// Read the dashboard of the installation bound to `session`.
pub async fn dashboard(session: &model::Session) -> Result<model::Dashboard, Error> {
    let client = session.client.as_ref().ok_or(Error::InternalError)?;
    let url = format!(
        "{}{}",
        session.api_url,
        endpoint::dashboard(&session.device_id)
    );
    let body = get_authenticated(client, &url, &session.token, "dashboard data").await?;

    serde_json::from_str::<model::Dashboard>(&body).map_err(|e| {
        log::error!("An error occurred while retrieving dashboard data: {}", e);
        Error::InvalidResponse(body, e.to_string())
    })
}
