use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreFileRequest {
    pub file: String,
    pub data: String,
}

/// `file` plus either `message` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreFileResponse {
    pub file: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StoreFileResponse {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.message.is_some()
    }
}

pub struct ServiceClient {
    client: Client,
    base_url: String,
}

impl ServiceClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .no_proxy()
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Store `data` under `file`.
    pub async fn store_file(&self, file: &str, data: &str) -> Result<StoreFileResponse, reqwest::Error> {
        self.client
            .post(format!("{}/store-file", self.base_url))
            .json(&StoreFileRequest {
                file: file.to_string(),
                data: data.to_string(),
            })
            .send()
            .await?
            .json()
            .await
    }

    /// Send a raw calculate body. The response is whatever the service
    /// relayed, so it stays untyped.
    pub async fn calculate(&self, body: &Value) -> Result<Value, reqwest::Error> {
        self.client
            .post(format!("{}/calculate", self.base_url))
            .json(body)
            .send()
            .await?
            .json()
            .await
    }

    pub async fn health(&self) -> Result<Value, reqwest::Error> {
        self.client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?
            .json()
            .await
    }
}
