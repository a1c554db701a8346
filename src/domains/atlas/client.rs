//! Blocking HTTP client for the ArcGIS REST API.
//!
//! Tool executions run on blocking threads, so `reqwest::blocking` is used
//! directly rather than an async client.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::error::{AtlasError, AtlasResult};
use super::layers::{self, Layer};
use super::query::{LayerQuery, sql_string_literal};
use crate::core::config::AtlasConfig;

/// Client for querying Living Atlas feature layers.
#[derive(Debug, Clone)]
pub struct AtlasClient {
    http: Client,
}

impl AtlasClient {
    /// Build a client with the configured timeout and user agent.
    pub fn new(config: &AtlasConfig) -> AtlasResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http })
    }

    /// Run a query against a layer's `/query` endpoint and return the raw JSON.
    #[instrument(skip_all, fields(layer = layer.name))]
    pub fn query(&self, layer: &Layer, query: &LayerQuery) -> AtlasResult<Value> {
        let url = layer.query_url();
        let params = query.form_params();
        debug!("Query parameters: {}", query.encoded());

        let request = if query.uses_post() {
            info!("POST {}", url);
            self.http.post(&url).form(&params)
        } else {
            info!("GET {}", url);
            self.http.get(&url).query(&params)
        };

        let response = request.header(ACCEPT, "application/json").send()?;
        read_json(response, &url)
    }

    /// Fetch the field definitions of a layer.
    #[instrument(skip_all, fields(layer = layer.name))]
    pub fn layer_fields(&self, layer: &Layer) -> AtlasResult<Vec<Value>> {
        info!("Fetching layer metadata from {}", layer.url);
        let response = self
            .http
            .get(layer.url)
            .query(&[("f", "json")])
            .header(ACCEPT, "application/json")
            .send()?;
        let body = read_json(response, layer.url)?;
        debug!("Layer metadata for {}: {}", layer.name, body);

        Ok(body
            .get("fields")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    /// Fetch the Esri geometry of a state by its full name.
    #[instrument(skip(self))]
    pub fn state_geometry(&self, state_name: &str) -> AtlasResult<Value> {
        let query = LayerQuery::new()
            .where_clause(format!("STATE_NAME = {}", sql_string_literal(state_name)))
            .out_fields("")
            .with_geometry(true);
        let body = self.query(&layers::STATES, &query)?;
        first_geometry(&body).ok_or_else(|| AtlasError::StateNotFound(state_name.to_string()))
    }
}

/// Geometry of the first feature in a query response, if any.
pub fn first_geometry(body: &Value) -> Option<Value> {
    body.get("features")
        .and_then(Value::as_array)
        .and_then(|features| features.first())
        .and_then(|feature| feature.get("geometry"))
        .filter(|geometry| !geometry.is_null())
        .cloned()
}

/// Check the status, decode the body, and surface ArcGIS error payloads.
fn read_json(response: Response, url: &str) -> AtlasResult<Value> {
    let status = response.status();
    if !status.is_success() {
        warn!("HTTP {} from {}", status, url);
        return Err(AtlasError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body: Value = response.json()?;
    check_service_error(body)
}

/// ArcGIS reports failures as `{"error": {"code": .., "message": ..}}` with a 200 status.
fn check_service_error(body: Value) -> AtlasResult<Value> {
    if let Some(error) = body.get("error") {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
        let mut message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        if let Some(details) = error.get("details").and_then(Value::as_array) {
            let details: Vec<&str> = details.iter().filter_map(Value::as_str).collect();
            if !details.is_empty() {
                message = format!("{} ({})", message, details.join("; "));
            }
        }
        warn!("ArcGIS service error {}: {}", code, message);
        return Err(AtlasError::Service { code, message });
    }
    Ok(body)
}
