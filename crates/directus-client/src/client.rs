//! HTTP client for the Directus schema endpoints
//!
//! Implements [`SchemaAccessor`] on top of the REST API. The `fetch_*`
//! methods are the fallible reads; the trait implementation turns their
//! failures into empty results after logging them.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::config::DirectusConfig;
use crate::error::{DirectusError, DirectusResult};
use crate::models::{
    is_system_collection, Collection, CollectionMetaUpdate, DataEnvelope, Field, FieldUpdate,
    Relation, RelationUpdate,
};
use crate::traits::SchemaAccessor;

/// HTTP methods used for schema writes.
#[derive(Debug, Clone, Copy)]
enum WriteMethod {
    Post,
    Patch,
}

impl WriteMethod {
    fn as_str(self) -> &'static str {
        match self {
            WriteMethod::Post => "POST",
            WriteMethod::Patch => "PATCH",
        }
    }
}

/// Client for one Directus instance.
pub struct DirectusClient {
    config: DirectusConfig,
    client: Client,
}

impl std::fmt::Debug for DirectusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectusClient")
            .field("config", &self.config)
            .finish()
    }
}

impl DirectusClient {
    /// Create a client for the configured instance.
    pub fn new(config: DirectusConfig) -> DirectusResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(|e| {
            DirectusError::InvalidConfiguration(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self { config, client })
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &DirectusConfig {
        &self.config
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.config.token)
    }

    /// Turn a non-success response into an `Api` error carrying the body.
    async fn check(method: &'static str, path: &str, response: Response) -> DirectusResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(DirectusError::Api {
            method,
            path: path.to_string(),
            status: status.as_u16(),
            body,
        })
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> DirectusResult<T> {
        let url = self.config.endpoint(path);
        debug!(url = %url, "GET");

        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(|source| DirectusError::Transport {
                method: "GET",
                path: path.to_string(),
                source,
            })?;
        let response = Self::check("GET", path, response).await?;

        let envelope: DataEnvelope<T> =
            response.json().await.map_err(|e| DirectusError::Decode {
                method: "GET",
                path: path.to_string(),
                message: e.to_string(),
            })?;
        Ok(envelope.data)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        write: WriteMethod,
        path: &str,
        body: &B,
    ) -> DirectusResult<()> {
        let url = self.config.endpoint(path);
        let method = write.as_str();
        debug!(url = %url, method, "sending write");

        let request = match write {
            WriteMethod::Post => self.client.post(&url),
            WriteMethod::Patch => self.client.patch(&url),
        };

        let result = async {
            let response = self
                .authorized(request.json(body))
                .send()
                .await
                .map_err(|source| DirectusError::Transport {
                    method,
                    path: path.to_string(),
                    source,
                })?;
            Self::check(method, path, response).await.map(|_| ())
        }
        .await;

        if let Err(e) = &result {
            let payload = serde_json::to_string_pretty(body).unwrap_or_default();
            error!(
                instance = %self.config.url,
                method,
                path,
                payload = %payload,
                error = %e,
                "write request failed"
            );
        }

        result
    }

    async fn send_delete(&self, path: &str) -> DirectusResult<()> {
        let url = self.config.endpoint(path);
        debug!(url = %url, "DELETE");

        let response = self
            .authorized(self.client.delete(&url))
            .send()
            .await
            .map_err(|source| DirectusError::Transport {
                method: "DELETE",
                path: path.to_string(),
                source,
            })?;

        let result = Self::check("DELETE", path, response).await.map(|_| ());
        if let Err(e) = &result {
            error!(instance = %self.config.url, path, error = %e, "delete request failed");
        }
        result
    }

    /// Fetch all user collections, excluding system ones.
    pub async fn fetch_collections(&self) -> DirectusResult<Vec<Collection>> {
        let collections: Vec<Collection> = self.get_data("collections").await?;
        Ok(collections
            .into_iter()
            .filter(|c| !is_system_collection(&c.collection))
            .collect())
    }

    /// Fetch one collection. Missing collections come back as `Ok(None)`.
    pub async fn fetch_collection(&self, name: &str) -> DirectusResult<Option<Collection>> {
        match self.get_data(&format!("collections/{name}")).await {
            Ok(collection) => Ok(Some(collection)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Fetch every field of a collection, with server ids stripped.
    pub async fn fetch_fields(&self, collection: &str) -> DirectusResult<Vec<Field>> {
        let fields: Vec<Field> = self.get_data(&format!("fields/{collection}")).await?;
        Ok(fields.into_iter().map(Field::without_server_id).collect())
    }

    /// Fetch the relations of a collection, with server ids stripped.
    pub async fn fetch_relations(&self, collection: &str) -> DirectusResult<Vec<Relation>> {
        let relations: Vec<Relation> = self.get_data(&format!("relations/{collection}")).await?;
        Ok(relations
            .into_iter()
            .map(Relation::without_server_id)
            .collect())
    }

    fn log_read_failure(&self, operation: &str, e: &DirectusError) {
        warn!(
            instance = %self.config.url,
            operation,
            error = %e,
            "read failed, continuing with an empty result"
        );
    }
}

#[async_trait]
impl SchemaAccessor for DirectusClient {
    fn display_name(&self) -> &str {
        &self.config.url
    }

    #[instrument(skip(self), fields(instance = %self.config.url))]
    async fn list_collections(&self) -> Vec<Collection> {
        self.fetch_collections().await.unwrap_or_else(|e| {
            self.log_read_failure("GET /collections", &e);
            Vec::new()
        })
    }

    #[instrument(skip(self), fields(instance = %self.config.url))]
    async fn get_collection(&self, name: &str) -> Option<Collection> {
        self.fetch_collection(name).await.unwrap_or_else(|e| {
            self.log_read_failure(&format!("GET /collections/{name}"), &e);
            None
        })
    }

    #[instrument(skip(self, collection), fields(instance = %self.config.url, collection = %collection.collection))]
    async fn create_collection(&self, collection: &Collection) -> DirectusResult<()> {
        self.send_json(WriteMethod::Post, "collections", collection).await?;
        info!("collection created");
        Ok(())
    }

    #[instrument(skip(self, collection), fields(instance = %self.config.url, collection = %collection.collection))]
    async fn update_collection(&self, collection: &Collection) -> DirectusResult<()> {
        let path = format!("collections/{}", collection.collection);
        self.send_json(WriteMethod::Patch, &path, &CollectionMetaUpdate::from(collection))
            .await?;
        info!("collection meta updated");
        Ok(())
    }

    #[instrument(skip(self), fields(instance = %self.config.url))]
    async fn delete_collection(&self, name: &str) -> DirectusResult<()> {
        self.send_delete(&format!("collections/{name}")).await?;
        info!("collection deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(instance = %self.config.url))]
    async fn list_fields(&self, collection: &str, primary_key: bool) -> Vec<Field> {
        match self.fetch_fields(collection).await {
            Ok(fields) => fields
                .into_iter()
                .filter(|f| f.is_primary_key() == primary_key)
                .collect(),
            Err(e) => {
                self.log_read_failure(&format!("GET /fields/{collection}"), &e);
                Vec::new()
            }
        }
    }

    #[instrument(skip(self, field), fields(instance = %self.config.url, field = %field.field))]
    async fn create_field(&self, collection: &str, field: &Field) -> DirectusResult<()> {
        self.send_json(WriteMethod::Post, &format!("fields/{collection}"), field)
            .await?;
        info!("field created");
        Ok(())
    }

    #[instrument(skip(self, field), fields(instance = %self.config.url, field = %field.field))]
    async fn update_field(&self, collection: &str, field: &Field) -> DirectusResult<()> {
        let path = format!("fields/{collection}/{}", field.field);
        self.send_json(WriteMethod::Patch, &path, &FieldUpdate::from(field))
            .await?;
        info!("field meta updated");
        Ok(())
    }

    #[instrument(skip(self), fields(instance = %self.config.url))]
    async fn delete_field(&self, collection: &str, field: &str) -> DirectusResult<()> {
        self.send_delete(&format!("fields/{collection}/{field}"))
            .await?;
        info!("field deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(instance = %self.config.url))]
    async fn list_relations(&self, collection: &str) -> Vec<Relation> {
        self.fetch_relations(collection).await.unwrap_or_else(|e| {
            self.log_read_failure(&format!("GET /relations/{collection}"), &e);
            Vec::new()
        })
    }

    #[instrument(skip(self, relation), fields(instance = %self.config.url, collection = %relation.collection, field = %relation.field))]
    async fn create_relation(&self, relation: &Relation) -> DirectusResult<()> {
        self.send_json(WriteMethod::Post, "relations", relation).await?;
        info!("relation created");
        Ok(())
    }

    #[instrument(skip(self, relation), fields(instance = %self.config.url, collection = %relation.collection, field = %relation.field))]
    async fn update_relation(&self, relation: &Relation) -> DirectusResult<()> {
        let path = format!("relations/{}/{}", relation.collection, relation.field);
        self.send_json(WriteMethod::Patch, &path, &RelationUpdate::from(relation))
            .await?;
        info!("relation meta updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client =
            DirectusClient::new(DirectusConfig::new("https://cms.example.com", "token")).unwrap();
        assert_eq!(client.display_name(), "https://cms.example.com");
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let result = DirectusClient::new(DirectusConfig::new("cms.example.com", "token"));
        assert!(matches!(
            result,
            Err(DirectusError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let client =
            DirectusClient::new(DirectusConfig::new("https://cms.example.com", "s3cr3t")).unwrap();
        assert!(!format!("{:?}", client).contains("s3cr3t"));
    }
}
