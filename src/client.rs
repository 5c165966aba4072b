use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::schema::Table;
use crate::service::{DeleteTableRequest, EditTableRequest, RenameTableRequest, SchemaService};

/// REST client for the remote migration service.
pub struct HttpSchemaService {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl HttpSchemaService {
    pub fn new(config: ServiceConfig) -> Self {
        HttpSchemaService {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Client pointed at `base_url` with the default endpoint paths.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(ServiceConfig {
            base_url: base_url.to_string(),
            ..ServiceConfig::default()
        })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    async fn read_body(response: reqwest::Response) -> Result<String, ServiceError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<serde_json::Value, ServiceError> {
        let url = self.config.url(path);
        debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        let body = Self::read_body(response).await?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        let value: serde_json::Value = serde_json::from_str(&body)?;
        debug!(%url, response = %value, "service confirmed");
        Ok(value)
    }
}

#[async_trait]
impl SchemaService for HttpSchemaService {
    async fn list_tables(&self) -> Result<Vec<Table>, ServiceError> {
        let url = self.config.url(&self.config.list_path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        let body = Self::read_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn create_table(&self, table: &Table) -> Result<serde_json::Value, ServiceError> {
        self.post(&self.config.create_path, table).await
    }

    async fn delete_table(
        &self,
        request: &DeleteTableRequest,
    ) -> Result<serde_json::Value, ServiceError> {
        self.post(&self.config.delete_path, request).await
    }

    async fn rename_table(
        &self,
        request: &RenameTableRequest,
    ) -> Result<serde_json::Value, ServiceError> {
        self.post(&self.config.rename_path, request).await
    }

    async fn edit_table(
        &self,
        request: &EditTableRequest,
    ) -> Result<serde_json::Value, ServiceError> {
        self.post(&self.config.edit_path, request).await
    }
}
