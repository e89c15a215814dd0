use anyhow::{Context, Result, bail};
use catalogue::{CatalogueClient, ClientConfig, RetryConfig, TypeCodeTable};
use extract::ModelExtractor;
use render::DiagramLayout;
use resolve::{PathResolver, ResolvedPath};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Connection settings shared by every command that talks to the service.
#[derive(Debug, Clone, Default)]
pub struct ApiOptions {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub retries: Option<usize>,
}

impl ApiOptions {
    /// Flags win over `CATALOGUE_URL` / `CATALOGUE_API_KEY`.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &self.url {
            config.base_url = url.clone();
        }
        if let Some(key) = &self.api_key {
            config.api_key = key.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeouts.get_timeout_secs = secs;
            config.timeouts.put_timeout_secs = secs;
        }
        if let Some(retries) = self.retries {
            config = config.with_retry(RetryConfig {
                max_retries: retries,
                ..RetryConfig::default()
            });
        }
        config
    }

    pub fn connect(&self) -> Result<CatalogueClient> {
        let config = self.client_config();
        info!(base_url = %config.base_url, "Connecting to catalogue API");
        debug!("Incoming API key not logged, as it's secret.");
        CatalogueClient::new(config).context("Could not create catalogue API client")
    }
}

/// Model id -> JSON document on disk.
pub async fn extract_model(client: CatalogueClient, model_id: &str, output: &Path) -> Result<()> {
    let graph = ModelExtractor::new(client)
        .extract(model_id)
        .await
        .with_context(|| format!("Failed to extract model {}", model_id))?;

    let json = serde_json::to_string_pretty(&graph).context("Failed to serialize model")?;
    info!(output = ?output, "Attempting to output model");
    tokio::fs::write(output, json)
        .await
        .with_context(|| format!("Failed to write {:?}", output))?;
    Ok(())
}

/// Extracted JSON -> draw.io markup on disk.
pub async fn render_model(input: &Path, output: &Path, layout: &DiagramLayout) -> Result<()> {
    let json = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {:?}", input))?;

    let xml = render::render_json(&json, layout)
        .with_context(|| format!("{:?} is not an extracted model", input))?;

    info!(output = ?output, "Attempting to output diagram");
    tokio::fs::write(output, xml)
        .await
        .with_context(|| format!("Failed to write {:?}", output))?;
    Ok(())
}

pub async fn resolve_path(client: CatalogueClient, path_expression: &str) -> Result<ResolvedPath> {
    let resolver = PathResolver::new(client, Arc::new(TypeCodeTable::standard()));
    let resolved = resolver
        .resolve(path_expression)
        .await
        .with_context(|| format!("Failed to resolve {}", path_expression))?;
    Ok(resolved)
}

/// Resolve a path and overwrite the description of the item it names.
/// Finalised models are read-only on the service, so they are refused here.
pub async fn describe_path(
    client: CatalogueClient,
    path_expression: &str,
    description: &str,
) -> Result<catalogue::ApiResponse> {
    let resolved = resolve_path(client.clone(), path_expression).await?;

    let Some(id_based_url) = resolved.id_based_url.as_deref().filter(|_| resolved.url_found) else {
        bail!(
            "No entity found for {} (status {} {})",
            path_expression,
            resolved.status_code,
            resolved.reason
        );
    };
    if resolved.model_finalised {
        bail!("Model for {} is finalised and cannot be edited", path_expression);
    }

    let response = client
        .update_description(id_based_url, description)
        .await
        .with_context(|| format!("Failed to update description of {}", id_based_url))?;

    if !response.is_success() {
        bail!(
            "Description update for {} rejected: {} {}",
            id_based_url,
            response.status_code,
            response.reason
        );
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogue::ApiResponse;
    use catalogue::mock::MockTransport;
    use serde_json::json;

    const MODEL: &str = "5d2a6e4c-8b1f-4a3e-9c7d-1e2f3a4b5c6d";

    fn lookup(finalised: bool) -> MockTransport {
        MockTransport::new().with_json(
            "/dataModels/path/dm:ModelA|dc:ClassA",
            json!({
                "id": "c1",
                "domainType": "DataClass",
                "label": "ClassA",
                "breadcrumbs": [{ "id": "m1", "domainType": "DataModel", "label": "ModelA", "finalised": finalised }]
            }),
        )
    }

    #[test]
    fn test_flags_override_config() {
        let options = ApiOptions {
            url: Some("http://catalogue:8082/api".to_string()),
            api_key: Some(MODEL.to_string()),
            timeout_secs: Some(5),
            retries: Some(2),
        };

        let config = options.client_config();

        assert_eq!(config.base_url, "http://catalogue:8082/api");
        assert_eq!(config.api_key, MODEL);
        assert_eq!(config.timeouts.get_timeout_secs, 5);
        assert_eq!(config.timeouts.put_timeout_secs, 5);
        assert_eq!(config.retry.max_retries, 2);
    }

    #[test]
    fn test_bad_key_rejected_before_connecting() {
        let options = ApiOptions {
            url: Some("http://catalogue:8082/api".to_string()),
            api_key: Some("letmein".to_string()),
            ..ApiOptions::default()
        };
        assert!(options.connect().is_err());
    }

    #[tokio::test]
    async fn test_extract_then_render() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("output.json");
        let xml_path = dir.path().join("new_model.xml");

        let class = "7a8b9c0d-1e2f-4a3b-8c4d-5e6f7a8b9c0d";
        let transport = MockTransport::new().with_json(
            &format!("/dataModels/{}/dataClasses", MODEL),
            json!({ "items": [{ "id": class, "label": "Person" }] }),
        );
        let client = CatalogueClient::with_transport(Arc::new(transport));

        extract_model(client, MODEL, &json_path).await.unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(written["model_id"], MODEL);
        assert_eq!(written["classes"][0]["label"], "Person");

        render_model(&json_path, &xml_path, &DiagramLayout::default())
            .await
            .unwrap();
        let xml = std::fs::read_to_string(&xml_path).unwrap();
        assert!(xml.contains(r#"value="Person""#));
    }

    #[tokio::test]
    async fn test_render_rejects_other_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.json");
        std::fs::write(&input, "[1, 2, 3]").unwrap();

        let result = render_model(&input, &dir.path().join("out.xml"), &DiagramLayout::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_describe_updates_resolved_item() {
        let transport = Arc::new(
            lookup(false).with_response("/dataModels/m1/dataClasses/c1", ApiResponse::ok("{}")),
        );
        let client = CatalogueClient::with_transport(transport.clone());

        describe_path(client, "dm:ModelA|dc:ClassA", "People we know")
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1], ("PUT".to_string(), "dataModels/m1/dataClasses/c1".to_string()));
    }

    #[tokio::test]
    async fn test_describe_refuses_finalised_model() {
        let transport = Arc::new(lookup(true));
        let client = CatalogueClient::with_transport(transport.clone());

        let result = describe_path(client, "dm:ModelA|dc:ClassA", "People we know").await;

        assert!(result.is_err());
        assert!(transport.put_bodies().is_empty());
    }

    #[tokio::test]
    async fn test_describe_refuses_finalised_model_itself() {
        let transport = Arc::new(MockTransport::new().with_json(
            "/dataModels/path/dm:Frozen",
            json!({ "id": "m2", "domainType": "DataModel", "label": "Frozen", "finalised": true, "breadcrumbs": [] }),
        ));
        let client = CatalogueClient::with_transport(transport.clone());

        let result = describe_path(client, "dm:Frozen", "text").await;

        assert!(result.is_err());
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_describe_never_writes_to_parent() {
        let transport = Arc::new(MockTransport::new().with_json(
            "/dataModels/path/dm:ModelA|dt:Colour",
            json!({
                "id": "t1",
                "domainType": "EnumerationType",
                "label": "Colour",
                "breadcrumbs": [{ "id": "m1", "domainType": "DataModel", "label": "ModelA", "finalised": false }]
            }),
        ));
        let client = CatalogueClient::with_transport(transport.clone());

        let result = describe_path(client, "dm:ModelA|dt:Colour", "enum text").await;

        assert!(result.is_err());
        assert!(transport.put_bodies().is_empty());
    }

    #[tokio::test]
    async fn test_describe_unknown_path() {
        let client = CatalogueClient::with_transport(Arc::new(MockTransport::new()));
        let result = describe_path(client, "dm:Nope", "text").await;
        assert!(result.is_err());
    }
}
