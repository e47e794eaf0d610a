//! HTTP client for the indexing backend.
//!
//! Wraps the backend's REST surface: embedding artifact listing, index
//! construction, and collection management. Heterogeneous per-provider
//! response shapes are normalized here into the canonical `Collection` and
//! `IndexingOutcome` types; callers never see raw wire payloads.

use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// A previously produced embedding file available for indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingArtifact {
    pub id: String,
    pub display_name: String,
}

/// A provider-scoped collection of indexed vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

/// Normalized result of building or inspecting a collection's index.
///
/// Optional fields are present only when the backend reported them;
/// serialization omits them entirely rather than emitting placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexingOutcome {
    pub database: String,
    pub collection_name: String,
    pub total_vectors: u64,
    pub index_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ListEmbeddedResponse {
    #[serde(default)]
    documents: Vec<EmbeddedDocument>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedDocument {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CollectionsResponse {
    #[serde(default)]
    collections: Vec<Collection>,
}

#[derive(Debug, Serialize)]
struct IndexRequest<'a> {
    file_id: &'a str,
    vector_db: &'a str,
    index_mode: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CollectionInfoResponse {
    name: String,
    #[serde(default)]
    num_entities: u64,
    #[serde(default)]
    schema: Option<CollectionSchema>,
    #[serde(default)]
    processing_time: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CollectionSchema {
    #[serde(default)]
    fields: Vec<FieldSpec>,
}

#[derive(Debug, Deserialize)]
struct FieldSpec {
    name: String,
    #[serde(default)]
    index_params: Option<IndexParams>,
}

#[derive(Debug, Deserialize)]
struct IndexParams {
    #[serde(default)]
    index_type: Option<String>,
}

/// Map a collection-info response into the normalized outcome shape.
///
/// The backend reports one entity count; it feeds both `total_vectors` and
/// `index_size`. The index mode is taken from the vector field's index
/// parameters when the schema exposes them, and omitted otherwise.
fn outcome_from_info(provider_id: &str, info: CollectionInfoResponse) -> IndexingOutcome {
    let index_mode = info
        .schema
        .as_ref()
        .and_then(|schema| schema.fields.iter().find(|field| field.name == "vector"))
        .and_then(|field| field.index_params.as_ref())
        .and_then(|params| params.index_type.clone());

    IndexingOutcome {
        database: provider_id.to_string(),
        collection_name: info.name,
        total_vectors: info.num_entities,
        index_size: info.num_entities,
        index_mode,
        processing_time: info.processing_time,
    }
}

/// Client for the indexing backend's REST API.
pub struct BackendClient {
    client: Client,
    base_url: Url,
    retries: usize,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            retries: 2,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.backend_url,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("Invalid backend URL: {}", e)))
    }

    /// Issue an idempotent GET, retrying transient failures.
    async fn get_with_retry<T: for<'de> Deserialize<'de>>(&self, url: Url) -> Result<T> {
        let mut last_err: Option<Error> = None;
        for attempt in 0..=self.retries {
            match self.client.get(url.clone()).send().await {
                Ok(response) => match response.error_for_status() {
                    Ok(ok) => return Ok(ok.json::<T>().await?),
                    Err(e) => last_err = Some(e.into()),
                },
                Err(e) => last_err = Some(e.into()),
            }

            if attempt < self.retries {
                tokio::time::sleep(Duration::from_millis(200 * (attempt + 1) as u64)).await;
            }
        }

        Err(last_err.unwrap_or_else(|| Error::Backend("Backend request failed".to_string())))
    }

    /// List the embedding artifacts available for indexing.
    pub async fn list_artifacts(&self) -> Result<Vec<EmbeddingArtifact>> {
        let url = self.endpoint("/list-embedded")?;
        let response: ListEmbeddedResponse = self.get_with_retry(url).await?;
        Ok(response
            .documents
            .into_iter()
            .map(|doc| EmbeddingArtifact {
                id: doc.name.clone(),
                display_name: doc.name,
            })
            .collect())
    }

    /// List the collections for a provider.
    ///
    /// Listing failures degrade to an empty result: a broken listing should
    /// read as "no collections", not take the session down. The failure is
    /// still logged for observability.
    pub async fn list_collections(&self, provider_id: &str) -> Vec<Collection> {
        match self.try_list_collections(provider_id).await {
            Ok(collections) => collections,
            Err(e) => {
                warn!("Failed to list collections for '{}': {}", provider_id, e);
                Vec::new()
            }
        }
    }

    async fn try_list_collections(&self, provider_id: &str) -> Result<Vec<Collection>> {
        let mut url = self.endpoint("/collections")?;
        url.query_pairs_mut().append_pair("provider", provider_id);
        let response: CollectionsResponse = self.get_with_retry(url).await?;
        debug!(
            "Found {} collections for provider '{}'",
            response.collections.len(),
            provider_id
        );
        Ok(response.collections)
    }

    /// Build an index for an embedding artifact on the given provider.
    ///
    /// Not idempotent, so issued exactly once. A non-success response is
    /// surfaced with the backend's error detail when it sends one.
    pub async fn build_index(
        &self,
        artifact_id: &str,
        provider_id: &str,
        index_mode: &str,
    ) -> Result<IndexingOutcome> {
        let url = self.endpoint("/index")?;
        let request = IndexRequest {
            file_id: artifact_id,
            vector_db: provider_id,
            index_mode,
        };

        let response = self.client.post(url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or_else(|| format!("backend returned status {}", status));
            return Err(Error::Indexing(detail));
        }

        Ok(response.json::<IndexingOutcome>().await?)
    }

    /// Fetch and normalize a collection's details.
    pub async fn describe_collection(
        &self,
        provider_id: &str,
        collection_name: &str,
    ) -> Result<IndexingOutcome> {
        let url = self.endpoint(&format!("/collections/{}/{}", provider_id, collection_name))?;
        let info: CollectionInfoResponse =
            self.get_with_retry(url).await.map_err(|e| match e {
                Error::Http(ref http)
                    if http.status() == Some(reqwest::StatusCode::NOT_FOUND) =>
                {
                    Error::CollectionNotFound(collection_name.to_string())
                }
                other => other,
            })?;
        Ok(outcome_from_info(provider_id, info))
    }

    /// Delete a collection. Any 2xx response is success.
    pub async fn delete_collection(&self, provider_id: &str, collection_name: &str) -> Result<()> {
        let url = self.endpoint(&format!("/collections/{}/{}", provider_id, collection_name))?;
        self.client
            .delete(url)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(uri: &str) -> BackendClient {
        BackendClient::new(uri, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_list_artifacts_derives_ids_from_names() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/list-embedded"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documents": [
                    {"name": "docs_embeddings.json", "size": 1024},
                    {"name": "faq_embeddings.json"}
                ]
            })))
            .mount(&server)
            .await;

        let artifacts = test_client(&server.uri()).list_artifacts().await.unwrap();
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].id, "docs_embeddings.json");
        assert_eq!(artifacts[0].display_name, "docs_embeddings.json");
    }

    #[tokio::test]
    async fn test_list_collections_is_idempotent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections"))
            .and(query_param("provider", "chroma"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "collections": [
                    {"id": "docs", "name": "docs", "count": 42},
                    {"id": "faq", "name": "faq", "count": 7}
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let first = client.list_collections("chroma").await;
        let second = client.list_collections("chroma").await;
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].count, 42);
    }

    #[tokio::test]
    async fn test_list_collections_degrades_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let collections = test_client(&server.uri()).list_collections("chroma").await;
        assert!(collections.is_empty());
    }

    #[tokio::test]
    async fn test_list_collections_degrades_on_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"collections": "nope"})),
            )
            .mount(&server)
            .await;

        let collections = test_client(&server.uri()).list_collections("chroma").await;
        assert!(collections.is_empty());
    }

    #[tokio::test]
    async fn test_list_collections_degrades_when_unreachable() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let collections = test_client(&uri).list_collections("chroma").await;
        assert!(collections.is_empty());
    }

    #[tokio::test]
    async fn test_build_index_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/index"))
            .and(body_json(json!({
                "file_id": "docs_embeddings.json",
                "vector_db": "qdrant",
                "index_mode": "hnsw"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "database": "qdrant",
                "collection_name": "docs_embeddings",
                "total_vectors": 1200,
                "index_size": 1200,
                "index_mode": "hnsw",
                "processing_time": 3.4
            })))
            .mount(&server)
            .await;

        let outcome = test_client(&server.uri())
            .build_index("docs_embeddings.json", "qdrant", "hnsw")
            .await
            .unwrap();
        assert_eq!(outcome.database, "qdrant");
        assert_eq!(outcome.collection_name, "docs_embeddings");
        assert_eq!(outcome.total_vectors, 1200);
        assert_eq!(outcome.index_mode.as_deref(), Some("hnsw"));
        assert_eq!(outcome.processing_time, Some(3.4));
    }

    #[tokio::test]
    async fn test_build_index_propagates_backend_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/index"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "detail": "Unsupported vector database provider: pinecone"
            })))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .build_index("docs_embeddings.json", "pinecone", "standard")
            .await
            .unwrap_err();
        match err {
            Error::Indexing(detail) => {
                assert_eq!(detail, "Unsupported vector database provider: pinecone")
            }
            other => panic!("expected Indexing error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_build_index_generic_message_without_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/index"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .build_index("docs_embeddings.json", "chroma", "hnsw")
            .await
            .unwrap_err();
        match err {
            Error::Indexing(detail) => assert!(detail.contains("500")),
            other => panic!("expected Indexing error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_describe_collection_with_index_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/milvus/docs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "docs",
                "num_entities": 512,
                "schema": {
                    "fields": [
                        {"name": "id"},
                        {"name": "vector", "index_params": {"index_type": "ivf_flat"}}
                    ]
                },
                "processing_time": 1.25
            })))
            .mount(&server)
            .await;

        let outcome = test_client(&server.uri())
            .describe_collection("milvus", "docs")
            .await
            .unwrap();
        assert_eq!(outcome.database, "milvus");
        assert_eq!(outcome.total_vectors, 512);
        assert_eq!(outcome.index_size, 512);
        assert_eq!(outcome.index_mode.as_deref(), Some("ivf_flat"));
        assert_eq!(outcome.processing_time, Some(1.25));
    }

    #[tokio::test]
    async fn test_describe_collection_without_schema_omits_mode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/chroma/docs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "docs",
                "num_entities": 64
            })))
            .mount(&server)
            .await;

        let outcome = test_client(&server.uri())
            .describe_collection("chroma", "docs")
            .await
            .unwrap();
        assert_eq!(outcome.index_mode, None);
        assert_eq!(outcome.processing_time, None);

        // Absent fields are omitted from serialized output, not nulled.
        let serialized = serde_json::to_string(&outcome).unwrap();
        assert!(!serialized.contains("index_mode"));
        assert!(!serialized.contains("processing_time"));
    }

    #[tokio::test]
    async fn test_describe_collection_ignores_non_vector_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/milvus/docs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "docs",
                "num_entities": 10,
                "schema": {
                    "fields": [
                        {"name": "content", "index_params": {"index_type": "trie"}}
                    ]
                }
            })))
            .mount(&server)
            .await;

        let outcome = test_client(&server.uri())
            .describe_collection("milvus", "docs")
            .await
            .unwrap();
        assert_eq!(outcome.index_mode, None);
    }

    #[tokio::test]
    async fn test_describe_missing_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/chroma/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .describe_collection("chroma", "ghost")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CollectionNotFound(name) if name == "ghost"));
    }

    #[tokio::test]
    async fn test_delete_collection() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/collections/chroma/docs"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server.uri())
            .delete_collection("chroma", "docs")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_collection_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/collections/chroma/docs"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = test_client(&server.uri())
            .delete_collection("chroma", "docs")
            .await;
        assert!(result.is_err());
    }
}
