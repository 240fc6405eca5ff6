//! Mastodon-compatible status API client.

use crate::config::{HttpConfig, PlatformConfig};
use crate::error::BotError;
use crate::event::Image;
use crate::post::contract::PostReceipt;
use crate::post::platform::PlatformClient;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct StatusResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MediaResponse {
    id: String,
}

pub struct MastodonClient {
    name: String,
    instance: String,
    access_token: String,
    max_length: usize,
    user_agent: String,
    client: Client,
}

impl MastodonClient {
    pub fn from_config(platform: &PlatformConfig, http: &HttpConfig) -> Result<Self, BotError> {
        let instance = platform.instance.clone().ok_or_else(|| {
            BotError::ConfigError(format!("Platform {} requires an instance URL", platform.name))
        })?;
        let access_token = platform.access_token.clone().ok_or_else(|| {
            BotError::ConfigError(format!("Platform {} requires an access token", platform.name))
        })?;

        let mut builder = Client::builder();
        if let Some(secs) = http.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| BotError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            name: platform.name.clone(),
            instance: instance.trim_end_matches('/').to_string(),
            access_token,
            max_length: platform.max_length,
            user_agent: http.user_agent.clone(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.instance, path)
    }

    fn upload(&self, image: &Image) -> Result<String, BotError> {
        let part = Part::bytes(image.data.clone())
            .file_name("image")
            .mime_str(&image.mime_type)
            .map_err(|e| self.failure("invalid image type", e))?;
        let response = self
            .client
            .post(self.endpoint("/api/v2/media"))
            .header(USER_AGENT, &self.user_agent)
            .bearer_auth(&self.access_token)
            .multipart(Form::new().part("file", part))
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.failure("media upload failed", e))?;
        let media: MediaResponse = response
            .json()
            .map_err(|e| self.failure("unreadable media response", e))?;
        Ok(media.id)
    }

    fn failure(&self, what: &str, err: reqwest::Error) -> BotError {
        BotError::PostFailed(format!("{}: {}: {}", self.name, what, err))
    }
}

impl PlatformClient for MastodonClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_length(&self) -> usize {
        self.max_length
    }

    fn send(
        &self,
        text: &str,
        image: Option<&Image>,
        in_reply_to: Option<&str>,
    ) -> Result<PostReceipt, BotError> {
        let mut form: Vec<(&str, String)> = vec![("status", text.to_string())];
        if let Some(parent) = in_reply_to {
            form.push(("in_reply_to_id", parent.to_string()));
        }
        if let Some(image) = image {
            form.push(("media_ids[]", self.upload(image)?));
        }

        let response = self
            .client
            .post(self.endpoint("/api/v1/statuses"))
            .header(USER_AGENT, &self.user_agent)
            .bearer_auth(&self.access_token)
            .form(&form)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.failure("status post failed", e))?;
        let status: StatusResponse = response
            .json()
            .map_err(|e| self.failure("unreadable status response", e))?;

        Ok(PostReceipt {
            id: status.id,
            url: status.url,
        })
    }
}
