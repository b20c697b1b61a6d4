//! REST adapter for a live retrieval backend.

use std::collections::HashMap;

use async_trait::async_trait;
use docdeck_core::error::{DocdeckError, Result};
use docdeck_core::models::{
    Collection, DistanceMetric, DocumentDetail, DocumentListing, FileUpload, SearchResponse,
};
use docdeck_core::{RetrievalGateway, SearchFilter};
use serde::Serialize;

/// HTTP implementation of `RetrievalGateway`.
pub struct HttpGateway {
    /// Base URL of the backend (e.g. "http://localhost:8200")
    base_url: String,

    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transport(e: reqwest::Error) -> DocdeckError {
        DocdeckError::Transport { reason: e.to_string() }
    }

    /// Map backend status codes onto the error taxonomy; 404 and 409 carry
    /// meaning for the state machine, everything else is transport.
    async fn check(response: reqwest::Response, subject: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(%status, subject, "backend returned an error");
        match status.as_u16() {
            404 => Err(DocdeckError::NotFound { what: subject.to_string() }),
            409 => Err(DocdeckError::Conflict { name: subject.to_string() }),
            _ => Err(DocdeckError::Transport { reason: format!("{}: {}", status, body) }),
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateCollectionRequest<'a> {
    collection_name: &'a str,
    distance_metric: DistanceMetric,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[async_trait]
impl RetrievalGateway for HttpGateway {
    async fn list_collections(&self) -> Result<Vec<Collection>> {
        let response = self
            .client
            .get(self.url("/collections"))
            .send()
            .await
            .map_err(Self::transport)?;
        let response = Self::check(response, "collections").await?;
        response.json().await.map_err(Self::transport)
    }

    async fn create_collection(
        &self,
        name: &str,
        distance_metric: DistanceMetric,
        description: Option<&str>,
    ) -> Result<()> {
        let request = CreateCollectionRequest { collection_name: name, distance_metric, description };
        let response = self
            .client
            .post(self.url("/collections"))
            .json(&request)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(response, name).await?;
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/collections/{}", name)))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(response, &format!("collection '{}'", name)).await?;
        Ok(())
    }

    async fn list_documents(&self, collection: &str) -> Result<DocumentListing> {
        let response = self
            .client
            .get(self.url(&format!("/collections/{}/documents", collection)))
            .send()
            .await
            .map_err(Self::transport)?;
        let response = Self::check(response, &format!("collection '{}'", collection)).await?;
        response.json().await.map_err(Self::transport)
    }

    async fn document_detail(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<DocumentDetail> {
        let response = self
            .client
            .get(self.url(&format!("/collections/{}/documents/{}", collection, document_id)))
            .send()
            .await
            .map_err(Self::transport)?;
        let response = Self::check(
            response,
            &format!("document '{}' in collection '{}'", document_id, collection),
        )
        .await?;
        response.json().await.map_err(Self::transport)
    }

    async fn delete_document(&self, collection: &str, document_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/collections/{}/documents/{}", collection, document_id)))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(
            response,
            &format!("document '{}' in collection '{}'", document_id, collection),
        )
        .await?;
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: &str,
        limit: usize,
        min_score: f32,
        filter: Option<&SearchFilter>,
    ) -> Result<SearchResponse> {
        let mut request = self
            .client
            .get(self.url(&format!("/collections/{}/search", collection)))
            .query(&[("query", query)])
            .query(&[("limit", limit.to_string()), ("min_score", min_score.to_string())]);
        if let Some(filter) = filter {
            request = request.query(&[("document_id", filter.document_id.as_str())]);
        }

        let response = request.send().await.map_err(Self::transport)?;
        let response = Self::check(response, &format!("collection '{}'", collection)).await?;
        response.json().await.map_err(Self::transport)
    }

    async fn upload_document(
        &self,
        collection: &str,
        file: &FileUpload,
        max_chunk_size: usize,
        chunk_overlap: usize,
        tags: &HashMap<String, String>,
    ) -> Result<()> {
        let upload_error = |reason: String| DocdeckError::Upload {
            file_name: file.file_name.clone(),
            reason,
        };

        let tags_json = serde_json::to_string(tags)
            .map_err(|e| upload_error(format!("failed to encode tags: {}", e)))?;

        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("max_chunk_size", max_chunk_size.to_string())
            .text("chunk_overlap", chunk_overlap.to_string())
            .text("tags", tags_json);

        let response = self
            .client
            .post(self.url(&format!("/collections/{}/upload", collection)))
            .multipart(form)
            .send()
            .await
            .map_err(|e| upload_error(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status.as_u16() == 404 {
            return Err(DocdeckError::NotFound { what: format!("collection '{}'", collection) });
        }
        let body = response.text().await.unwrap_or_default();
        Err(upload_error(format!("{}: {}", status, body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let gateway = HttpGateway::new("http://localhost:8200/");
        assert_eq!(gateway.base_url(), "http://localhost:8200");
        assert_eq!(gateway.url("/collections"), "http://localhost:8200/collections");
    }
}
