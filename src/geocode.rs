//! Reverse geocoding of request coordinates to a state name

use crate::error::{GatewayError, Result};
use crate::models::AddressResponse;
use reqwest::StatusCode;
use tracing::debug;

const SERVICE: &str = "reverse geocoder";

pub struct GeocodeClient {
    http: reqwest::Client,
    endpoint: String,
    key: Option<String>,
}

impl GeocodeClient {
    pub fn new(http: reqwest::Client, endpoint: &str, key: Option<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
            key,
        }
    }

    /// Resolve coordinates to the state name reported by the provider.
    ///
    /// `Ok(None)` means the provider had no state for the point. Transport
    /// problems fail only the calling request.
    pub async fn resolve_state(&self, lat: f64, lon: f64) -> Result<Option<String>> {
        let key = self.key.as_deref().ok_or(GatewayError::GeocodeDisabled)?;

        let unavailable = |source| GatewayError::Unavailable {
            service: SERVICE,
            source,
        };

        let (lat_param, lon_param) = (lat.to_string(), lon.to_string());
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("key", key),
                ("lat", lat_param.as_str()),
                ("lon", lon_param.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("No address at {}, {}", lat, lon);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(GatewayError::UpstreamStatus {
                service: SERVICE,
                status,
            });
        }

        let body = response.bytes().await.map_err(unavailable)?;
        let reply: AddressResponse =
            serde_json::from_slice(&body).map_err(|source| GatewayError::Decode {
                service: SERVICE,
                source,
            })?;

        debug!("{}, {} resolved to {:?}", lat, lon, reply.address.state);
        Ok(reply.address.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{closed_url, serve};
    use axum::{extract::Query, response::IntoResponse, routing::get, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    async fn fake_provider() -> String {
        serve(Router::new().route(
            "/v1/reverse.php",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                assert_eq!(q.get("key").map(String::as_str), Some("test-key"));
                assert_eq!(q.get("format").map(String::as_str), Some("json"));
                match q.get("lat").map(String::as_str) {
                    Some("10.5") => Json(json!({"address": {"state": "Kerala", "country": "India"}}))
                        .into_response(),
                    Some("0") => (
                        StatusCode::NOT_FOUND,
                        Json(json!({"error": "Unable to geocode"})),
                    )
                        .into_response(),
                    Some("1") => "not json".into_response(),
                    Some("2") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
                    _ => Json(json!({"address": {"country": "India"}})).into_response(),
                }
            }),
        ))
        .await
    }

    fn client(base: &str) -> GeocodeClient {
        GeocodeClient::new(
            reqwest::Client::new(),
            &format!("{}/v1/reverse.php", base),
            Some("test-key".to_string()),
        )
    }

    #[tokio::test]
    async fn test_resolves_state() {
        let base = fake_provider().await;
        let state = client(&base).resolve_state(10.5, 76.2).await.unwrap();
        assert_eq!(state.as_deref(), Some("Kerala"));
    }

    #[tokio::test]
    async fn test_address_without_state() {
        let base = fake_provider().await;
        assert_eq!(client(&base).resolve_state(20.0, 76.2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_provider_not_found() {
        let base = fake_provider().await;
        assert_eq!(client(&base).resolve_state(0.0, 0.0).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_undecodable_reply() {
        let base = fake_provider().await;
        let err = client(&base).resolve_state(1.0, 1.0).await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_provider_error_status() {
        let base = fake_provider().await;
        let err = client(&base).resolve_state(2.0, 76.2).await.unwrap_err();
        match &err {
            GatewayError::UpstreamStatus { status, .. } => {
                assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR)
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_unreachable_provider() {
        let err = client(&closed_url().await)
            .resolve_state(10.5, 76.2)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_missing_key() {
        let geocoder = GeocodeClient::new(reqwest::Client::new(), "http://127.0.0.1:1", None);
        let err = geocoder.resolve_state(10.5, 76.2).await.unwrap_err();
        assert!(matches!(err, GatewayError::GeocodeDisabled));
    }
}
