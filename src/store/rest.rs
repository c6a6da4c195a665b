//! HTTP client for the search engine's REST API.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use super::models::{Document, StoreStats, TaskRecord};
use super::IndexStore;
use crate::config::Config;
use crate::error::StoreError;
use crate::Result;

#[derive(Deserialize)]
struct TasksResponse {
    results: Vec<TaskRecord>,
}

/// REST index store adapter.
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    collection: String,
    api_key: Option<String>,
    vector_field: String,
}

impl RestStore {
    /// Create a store client for the configured engine and collection.
    ///
    /// `vector_field` names the document slot holding embeddings,
    /// normally the embedder's name.
    #[must_use]
    pub fn new(config: &Config, vector_field: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.store_url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
            api_key: config.store_api_key.clone(),
            vector_field: vector_field.to_string(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        builder
    }

    async fn create_collection(&self) -> Result<()> {
        let response = self
            .request(Method::POST, "/collections")
            .json(&json!({ "name": self.collection, "primaryKey": "id" }))
            .send()
            .await
            .map_err(StoreError::Request)?;

        let status = response.status();
        if status.is_success() || status == StatusCode::CONFLICT {
            return Ok(());
        }

        // Another writer may have created the collection between our
        // existence check and this call.
        let detail = response.text().await.unwrap_or_default();
        if detail.contains("already exists") {
            return Ok(());
        }
        Err(StoreError::Api {
            status: status.as_u16(),
            detail,
        }
        .into())
    }
}

#[async_trait]
impl IndexStore for RestStore {
    async fn ensure_index(&self, dimension: usize) -> Result<()> {
        let response = self
            .request(Method::GET, &format!("/collections/{}", self.collection))
            .send()
            .await
            .map_err(StoreError::Request)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            self.create_collection().await?;
        } else if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                detail,
            }
            .into());
        }

        let mut embedders = serde_json::Map::new();
        embedders.insert(
            self.vector_field.clone(),
            json!({ "dimensions": dimension }),
        );
        let settings = json!({
            "filterableAttributes": ["filePath"],
            "embedders": embedders,
        });

        let response = self
            .request(
                Method::PATCH,
                &format!("/collections/{}/settings", self.collection),
            )
            .json(&settings)
            .send()
            .await
            .map_err(StoreError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                detail,
            }
            .into());
        }

        tracing::debug!(collection = %self.collection, dimension, "Collection configured");
        Ok(())
    }

    async fn add_documents(&self, docs: &[Document], batch_size: usize) -> Result<()> {
        if docs.is_empty() {
            return Ok(());
        }

        for (batch_index, batch) in docs.chunks(batch_size).enumerate() {
            let payload: Vec<Value> = batch
                .iter()
                .map(|doc| doc.to_wire(&self.vector_field))
                .collect();

            let response = self
                .request(
                    Method::POST,
                    &format!("/collections/{}/documents", self.collection),
                )
                .json(&payload)
                .send()
                .await
                .map_err(StoreError::Request)?;

            let status = response.status();
            if !status.is_success() {
                let detail = response.text().await.unwrap_or_default();
                return Err(StoreError::Batch {
                    offset: batch_index * batch_size,
                    status: status.as_u16(),
                    detail,
                }
                .into());
            }
        }

        Ok(())
    }

    async fn delete_by_file_path(&self, file_path: &str) -> Result<()> {
        let filter = format!("filePath = \"{}\"", escape_filter_value(file_path));

        let response = self
            .request(
                Method::POST,
                &format!("/collections/{}/documents/delete", self.collection),
            )
            .json(&json!({ "filter": filter }))
            .send()
            .await
            .map_err(StoreError::Request)?;

        let status = response.status();
        // Nothing to delete is the same outcome as a successful delete
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        Err(StoreError::Api {
            status: status.as_u16(),
            detail,
        }
        .into())
    }

    async fn stats(&self) -> Result<StoreStats> {
        let response = self
            .request(
                Method::GET,
                &format!("/collections/{}/stats", self.collection),
            )
            .send()
            .await
            .map_err(StoreError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                detail,
            }
            .into());
        }

        Ok(response.json().await.map_err(StoreError::Request)?)
    }

    async fn recent_tasks(&self, limit: usize) -> Result<Vec<TaskRecord>> {
        let response = self
            .request(Method::GET, &format!("/tasks?limit={limit}"))
            .send()
            .await
            .map_err(StoreError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                detail,
            }
            .into());
        }

        let parsed: TasksResponse = response.json().await.map_err(StoreError::Request)?;
        Ok(parsed.results)
    }
}

/// Escape a value for use inside a double-quoted filter string.
fn escape_filter_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
