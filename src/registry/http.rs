use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::FleetError;
use crate::models::vehicle::{Vehicle, VehicleUpdate};
use crate::registry::{FleetRegistry, RegistryError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PatchRequest<'a> {
    vehicle_id: &'a str,
    updates: &'a VehicleUpdate,
}

#[derive(Debug, Deserialize)]
struct FleetListResponse {
    success: bool,
    #[serde(default)]
    vehicles: Vec<Vehicle>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FleetUpdateResponse {
    success: bool,
    #[serde(default)]
    vehicle: Option<Vehicle>,
    #[serde(default)]
    error: Option<String>,
}

/// Registry backed by the fleet management HTTP endpoint:
/// `GET /api/store/fleet` for the snapshot, `PATCH /api/store/fleet` for the
/// single-vehicle update.
pub struct HttpFleetRegistry {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpFleetRegistry {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FleetError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| FleetError::Config(format!("http client: {err}")))?;

        Ok(Self {
            endpoint: format!("{}/api/store/fleet", base_url.trim_end_matches('/')),
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FleetError> {
        Self::new(&config.fleet_api_url, config.http_timeout)
    }
}

#[async_trait]
impl FleetRegistry for HttpFleetRegistry {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, RegistryError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|err| RegistryError::Unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Unavailable(format!(
                "fleet fetch returned {status}"
            )));
        }

        let body: FleetListResponse = response
            .json()
            .await
            .map_err(|err| RegistryError::Unavailable(format!("fleet fetch decode: {err}")))?;

        if !body.success {
            return Err(RegistryError::Unavailable(
                body.error.unwrap_or_else(|| "fleet fetch rejected".to_string()),
            ));
        }

        debug!(vehicles = body.vehicles.len(), "fleet snapshot fetched");
        Ok(body.vehicles)
    }

    async fn update_vehicle(
        &self,
        id: &str,
        update: VehicleUpdate,
    ) -> Result<Vehicle, RegistryError> {
        let payload = PatchRequest {
            vehicle_id: id,
            updates: &update,
        };

        let response = self
            .client
            .patch(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| RegistryError::Unavailable(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| RegistryError::Unavailable(format!("fleet update read: {err}")))?;

        match status {
            StatusCode::NOT_FOUND => return Err(RegistryError::NotFound(id.to_string())),
            StatusCode::CONFLICT => {
                return Err(RegistryError::Conflict {
                    id: id.to_string(),
                    detail: text,
                });
            }
            s if !s.is_success() => {
                return Err(RegistryError::Unavailable(format!(
                    "fleet update returned {s}: {text}"
                )));
            }
            _ => {}
        }

        let body: FleetUpdateResponse = serde_json::from_str(&text)
            .map_err(|err| RegistryError::Unavailable(format!("fleet update decode: {err}")))?;

        if !body.success {
            return Err(RegistryError::Conflict {
                id: id.to_string(),
                detail: body.error.unwrap_or_else(|| "fleet update rejected".to_string()),
            });
        }

        body.vehicle
            .ok_or_else(|| RegistryError::Unavailable("fleet update returned no vehicle".to_string()))
    }
}
