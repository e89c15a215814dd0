use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{CatalogueError, CatalogueResult};
use crate::transport::{ApiResponse, HttpTransport, Transport};
use crate::validate::{is_good_api_key, is_good_api_url, require_uuid};
use crate::wire::{
    DataClassItem, DataElementItem, Items, MetadataItem, SemanticLinkItem,
};

/// Catalogue endpoints used by both pipelines.
#[derive(Clone)]
pub struct CatalogueClient {
    transport: Arc<dyn Transport>,
}

impl CatalogueClient {
    /// Validate `config` and connect over HTTP.
    pub fn new(config: ClientConfig) -> CatalogueResult<Self> {
        validate_config(&config)?;
        debug!(base_url = %config.base_url, "Catalogue client configured");
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config))))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// `GET /dataModels/path/{path}` with the path passed through as given.
    pub async fn find_by_path(&self, path_expression: &str) -> CatalogueResult<ApiResponse> {
        let endpoint = format!("/dataModels/path/{}", path_expression.trim_start_matches('/'));
        self.transport.get(&endpoint).await
    }

    /// Overwrite the description of the item at an id-based path such as
    /// `/dataModels/{m}/dataClasses/{c}`.
    pub async fn update_description(
        &self,
        id_based_path: &str,
        new_description: &str,
    ) -> CatalogueResult<ApiResponse> {
        let endpoint = format!("/{}", id_based_path.trim_start_matches('/'));
        let body = serde_json::json!({ "description": new_description }).to_string();
        self.transport.put(&endpoint, body).await
    }

    pub async fn classes_in_model(&self, model_id: &str) -> CatalogueResult<Vec<DataClassItem>> {
        require_uuid("model id", model_id)?;
        self.get_items(&format!("/dataModels/{}/dataClasses", model_id))
            .await
    }

    pub async fn elements_in_class(
        &self,
        model_id: &str,
        class_id: &str,
    ) -> CatalogueResult<Vec<DataElementItem>> {
        require_uuid("model id", model_id)?;
        require_uuid("class id", class_id)?;
        self.get_items(&format!(
            "/dataModels/{}/dataClasses/{}/dataElements",
            model_id, class_id
        ))
        .await
    }

    pub async fn element_metadata(&self, element_id: &str) -> CatalogueResult<Vec<MetadataItem>> {
        require_uuid("element id", element_id)?;
        self.get_items(&format!("/dataElements/{}/metadata", element_id))
            .await
    }

    pub async fn links_in_class(&self, class_id: &str) -> CatalogueResult<Vec<SemanticLinkItem>> {
        require_uuid("class id", class_id)?;
        self.get_items(&format!("/dataClasses/{}/semanticLinks", class_id))
            .await
    }

    /// Absent collections come back empty rather than as an error.
    async fn get_items<T: DeserializeOwned>(&self, endpoint: &str) -> CatalogueResult<Vec<T>> {
        let response = self.transport.get(endpoint).await?;

        if !response.is_success() {
            warn!(
                endpoint,
                status = response.status_code,
                reason = %response.reason,
                "Listing not available, treating as empty"
            );
            return Ok(Vec::new());
        }

        let listing: Items<T> =
            serde_json::from_str(&response.full_text).map_err(|source| CatalogueError::Decode {
                endpoint: endpoint.to_string(),
                source,
            })?;

        Ok(listing.items)
    }
}

/// Eager checks on a configuration before any request is made.
pub fn validate_config(config: &ClientConfig) -> CatalogueResult<()> {
    if !is_good_api_url(&config.base_url) {
        return Err(CatalogueError::InvalidBaseUrl(config.base_url.clone()));
    }
    if !is_good_api_key(&config.api_key) {
        return Err(CatalogueError::InvalidApiKey);
    }
    Ok(())
}
