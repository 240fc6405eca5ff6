use crate::config::HttpConfig;
use crate::error::{BotError, TransportError};
use crate::fetch::transport::{is_remote, Content, FetchMode, Transport};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use std::path::PathBuf;
use std::time::Duration;

/// reqwest-backed transport that also reads local files.
pub struct HttpTransport {
    client: Client,
    user_agent: String,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, BotError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| BotError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }

    fn get_remote(&self, url: &str, mode: FetchMode) -> Result<Content, TransportError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .map_err(|e| classify(url, e))?;

        match mode {
            FetchMode::Text => response.text().map(Content::Text).map_err(|e| classify(url, e)),
            FetchMode::Binary => {
                let status = response.status();
                if !status.is_success() {
                    return Err(TransportError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }
                response
                    .bytes()
                    .map(|b| Content::Binary(b.to_vec()))
                    .map_err(|e| classify(url, e))
            }
        }
    }

    fn get_local(&self, path: &str, mode: FetchMode) -> Result<Content, TransportError> {
        let local = |source| TransportError::Local {
            path: PathBuf::from(path),
            source,
        };
        match mode {
            FetchMode::Text => std::fs::read_to_string(path).map(Content::Text).map_err(local),
            FetchMode::Binary => std::fs::read(path).map(Content::Binary).map_err(local),
        }
    }
}

impl Transport for HttpTransport {
    fn get(&self, location: &str, mode: FetchMode) -> Result<Content, TransportError> {
        if is_remote(location) {
            self.get_remote(location, mode)
        } else {
            self.get_local(location, mode)
        }
    }
}

fn classify(url: &str, err: reqwest::Error) -> TransportError {
    if err.is_connect() {
        TransportError::Connect {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else {
        TransportError::Request {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_local_files_in_both_modes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("schedule.json");
        std::fs::write(&path, "{}").unwrap();
        let transport = HttpTransport::new(&HttpConfig::default()).unwrap();
        let location = path.to_str().unwrap();

        assert_eq!(
            transport.get(location, FetchMode::Text).unwrap(),
            Content::Text("{}".to_string())
        );
        assert_eq!(
            transport.get(location, FetchMode::Binary).unwrap(),
            Content::Binary(b"{}".to_vec())
        );
    }

    #[test]
    fn missing_local_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing");
        let transport = HttpTransport::new(&HttpConfig::default()).unwrap();

        let err = transport.get(path.to_str().unwrap(), FetchMode::Text).unwrap_err();
        assert!(matches!(err, TransportError::Local { .. }));
    }
}
