//! HTTP client for the text-embedding inference service.
//!
//! The service exposes a single `/embed` endpoint mapping a list of texts to
//! mean-pooled, L2-normalized sentence vectors. Ranking needs two shapes of
//! call — one query text, then every item text — so the client exposes both
//! on top of a shared request path that enforces the one-vector-per-input
//! contract. One client is built per [`crate::Analyzer`] and shared by every
//! ranking call.

use serde::Serialize;

use crate::error::AnalysisError;

/// Upper bound on texts per request; longer batches are split.
const MAX_BATCH: usize = 64;

pub(crate) struct EmbedClient {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [&'a str],
}

impl EmbedClient {
    #[must_use]
    pub(crate) fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/embed", base_url.trim_end_matches('/')),
        }
    }

    /// Embed a single text — the query side of a ranking call.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Embed`] if the request fails or the service
    /// returns no vector.
    pub(crate) async fn embed_one(&self, text: &str) -> Result<Vec<f32>, AnalysisError> {
        self.request_vectors(&[text])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::Embed("embedding service returned no vector".to_string()))
    }

    /// Embed the item texts of a ranking call, splitting into requests of at
    /// most [`MAX_BATCH`]. Returns one vector per text, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Embed`] if any request fails or a response
    /// does not carry one vector per input.
    pub(crate) async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, AnalysisError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(MAX_BATCH) {
            vectors.extend(self.request_vectors(chunk).await?);
        }
        Ok(vectors)
    }

    /// One POST to the embed endpoint, validated.
    async fn request_vectors(&self, inputs: &[&str]) -> Result<Vec<Vec<f32>>, AnalysisError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&EmbedRequest { inputs })
            .send()
            .await
            .map_err(|e| AnalysisError::Embed(format!("embedding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Embed(format!(
                "embedding service returned status {status}"
            )));
        }

        let vectors: Vec<Vec<f32>> = response
            .json()
            .await
            .map_err(|e| AnalysisError::Embed(format!("embedding response parse error: {e}")))?;

        if vectors.len() != inputs.len() {
            return Err(AnalysisError::Embed(format!(
                "embedding count mismatch: {} vectors for {} texts",
                vectors.len(),
                inputs.len()
            )));
        }

        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn embed_one_returns_the_single_vector() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embed"))
            .and(body_json(serde_json::json!({ "inputs": ["hello"] })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([[0.6, 0.8]])),
            )
            .mount(&server)
            .await;

        let client = EmbedClient::new(&server.uri());
        let vector = client.embed_one("hello").await.unwrap();
        assert_eq!(vector, vec![0.6, 0.8]);
    }

    #[tokio::test]
    async fn embed_batch_preserves_input_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                [1.0, 0.0],
                [0.0, 1.0]
            ])))
            .mount(&server)
            .await;

        let client = EmbedClient::new(&server.uri());
        let vectors = client.embed_batch(&["first", "second"]).await.unwrap();
        assert_eq!(vectors[0], vec![1.0, 0.0]);
        assert_eq!(vectors[1], vec![0.0, 1.0]);
    }

    #[tokio::test]
    async fn vector_count_mismatch_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embed"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([[1.0, 0.0]])),
            )
            .mount(&server)
            .await;

        let client = EmbedClient::new(&server.uri());
        let err = client.embed_batch(&["first", "second"]).await.unwrap_err();
        assert!(
            err.to_string().contains("count mismatch"),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embed"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = EmbedClient::new(&server.uri());
        let err = client.embed_one("hello").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Embed(_)));
        assert!(err.to_string().contains("503"), "unexpected error: {err}");
    }
}
