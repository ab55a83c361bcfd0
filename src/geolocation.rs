//! Current-location lookup for the location field.
//!
//! A terminal has no location sensor, so the default [`IpLocator`] asks an
//! IP-geolocation endpoint. Any failure is reported as a [`GeolocationError`]
//! and the form keeps whatever location it had.

use crate::config::GeolocationConfig;
use crate::error::GeolocationError;
use crate::messages;
use anyhow::anyhow;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[async_trait]
pub trait Locator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// Text placed in the location field for a resolved position
pub fn describe_position(coords: Coordinates) -> String {
    messages::current_location(coords.latitude, coords.longitude)
}

/// Used when geolocation is turned off in config
pub struct DisabledLocator;

#[async_trait]
impl Locator for DisabledLocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

pub struct IpLocator {
    client: Client,
    endpoint: String,
}

impl IpLocator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { client: Client::new(), endpoint: endpoint.into() }
    }
}

#[async_trait]
impl Locator for IpLocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        debug!("Requesting position from {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| GeolocationError::Unavailable(e.into()))?;

        if !response.status().is_success() {
            return Err(GeolocationError::Unavailable(anyhow!(
                "geolocation service returned {}",
                response.status()
            )));
        }

        let coords: Coordinates =
            response.json().await.map_err(|e| GeolocationError::Unavailable(e.into()))?;
        if !(-90.0..=90.0).contains(&coords.latitude) || !(-180.0..=180.0).contains(&coords.longitude)
        {
            return Err(GeolocationError::Unavailable(anyhow!(
                "coordinates out of range: {:?}",
                coords
            )));
        }
        Ok(coords)
    }
}

/// Build the locator described by config
pub fn create_locator(config: &GeolocationConfig) -> Box<dyn Locator> {
    if config.enabled {
        Box::new(IpLocator::new(config.endpoint.clone()))
    } else {
        Box::new(DisabledLocator)
    }
}
