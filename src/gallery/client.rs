//! Blocking HTTP client for the Artwork Store API

use super::url::{api_url, normalize_url};
use super::Artwork;
use crate::{ClientConfig, Error, Result};
use reqwest::blocking::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Fields of an error body checked for a message, highest priority first
const MESSAGE_FIELDS: [&str; 3] = ["detail", "error", "message"];

/// Thin wrapper over `reqwest` for list/save/delete against the store.
///
/// Every returned `Artwork` has its `url` resolved against the configured
/// base so it can be fetched directly.
#[derive(Debug, Clone)]
pub struct GalleryClient {
    client: Client,
    config: ClientConfig,
}

impl GalleryClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// All stored artworks, newest first. A JSON body that is not an array
    /// yields an empty list.
    pub fn list(&self) -> Result<Vec<Artwork>> {
        let url = api_url(self.base_url(), "/art");
        log::debug!("GET {}", url);
        let resp = self.client.get(&url).send()?;
        let body: Value = handle_response(resp)?;

        if !body.is_array() {
            log::warn!("{} returned a non-array body; treating as empty", url);
            return Ok(Vec::new());
        }
        let items: Vec<Artwork> = serde_json::from_value(body)
            .map_err(|e| Error::MalformedResponse(format!("artwork list: {}", e)))?;
        Ok(items.into_iter().map(|a| self.normalize(a)).collect())
    }

    /// Upload a PNG data URL with its grid dimensions
    pub fn save(&self, data_url: &str, width: u32, height: u32) -> Result<Artwork> {
        let url = api_url(self.base_url(), "/save");
        let form = multipart::Form::new()
            .text("data_url", data_url.to_string())
            .text("width", width.to_string())
            .text("height", height.to_string());

        log::debug!("POST {} ({}x{}, {} bytes)", url, width, height, data_url.len());
        let resp = self.client.post(&url).multipart(form).send()?;
        let art: Artwork = handle_response(resp)?;
        Ok(self.normalize(art))
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let url = api_url(self.base_url(), &format!("/art/{}", id));
        log::debug!("DELETE {}", url);
        let resp = self.client.delete(&url).send()?;
        check_status(resp).map(|_| ())
    }

    /// PNG bytes behind an artwork's URL
    pub fn fetch_image(&self, artwork: &Artwork) -> Result<Vec<u8>> {
        self.fetch_url(&normalize_url(self.base_url(), &artwork.url))
    }

    /// Raw bytes from an absolute URL
    pub fn fetch_url(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("GET {}", url);
        let resp = check_status(self.client.get(url).send()?)?;
        Ok(resp.bytes()?.to_vec())
    }

    /// The store's health message
    pub fn health(&self) -> Result<String> {
        #[derive(serde::Deserialize)]
        struct Health {
            message: String,
        }

        let resp = self.client.get(api_url(self.base_url(), "/health")).send()?;
        let h: Health = handle_response(resp)?;
        Ok(h.message)
    }

    fn normalize(&self, mut art: Artwork) -> Artwork {
        art.url = normalize_url(self.base_url(), &art.url);
        art
    }
}

/// Turn a non-2xx response into `RequestFailed`, passing successes through
fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| format!("Request failed ({})", status.as_u16()));
    log::warn!("request failed with {}: {}", status, message);
    Err(Error::RequestFailed { status: status.as_u16(), message })
}

fn handle_response<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let resp = check_status(resp)?;
    let text = resp.text()?;
    serde_json::from_str(&text).map_err(|e| Error::MalformedResponse(e.to_string()))
}

/// Message from an error body: the first usable `detail`, `error` or
/// `message` field. Strings must be non-empty; structured values are
/// rendered as JSON.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let obj = value.as_object()?;
    MESSAGE_FIELDS.iter().find_map(|key| match obj.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        v @ (Value::Array(_) | Value::Object(_)) => Some(v.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_priority() {
        assert_eq!(error_message(r#"{"detail":"too large"}"#).as_deref(), Some("too large"));
        assert_eq!(
            error_message(r#"{"message":"m","error":"e"}"#).as_deref(),
            Some("e")
        );
        assert_eq!(error_message(r#"{"detail":"","message":"m"}"#).as_deref(), Some("m"));
    }

    #[test]
    fn error_message_falls_back_to_none() {
        assert_eq!(error_message("not json"), None);
        assert_eq!(error_message("[1,2]"), None);
        assert_eq!(error_message(r#"{"other":"x"}"#), None);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let cfg = ClientConfig { base_url: "not a url".into(), ..Default::default() };
        assert!(matches!(GalleryClient::new(cfg), Err(Error::ConfigError(_))));
    }
}
