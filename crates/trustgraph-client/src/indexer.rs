//! GraphQL client for the external graph indexer.
//!
//! [`GraphSource`] is the seam the read paths depend on; [`IndexerClient`]
//! is the HTTP implementation. The indexer is eventually consistent with the
//! chain: a read issued right after a successful write may not reflect it
//! yet, which is why the write paths invalidate caches instead of asserting
//! freshness.

use crate::error::IndexerError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use trustgraph_core::model::{RawAtom, RawTriple};
use url::Url;

/// Result rows requested by the main search surface.
pub const SEARCH_LIMIT: u32 = 20;

/// Relationship rows requested per subject.
pub const TRIPLES_LIMIT: u32 = 50;

/// Read access to the graph projection.
#[async_trait]
pub trait GraphSource: Send + Sync {
    async fn search_atoms(&self, text: &str, limit: u32) -> Result<Vec<RawAtom>, IndexerError>;

    async fn atom_details(&self, id: &str) -> Result<Option<RawAtom>, IndexerError>;

    async fn triples_for_subject(
        &self,
        subject_id: &str,
        limit: u32,
    ) -> Result<Vec<RawTriple>, IndexerError>;
}

const ATOM_FIELDS: &str = "\
    term_id\n\
    label\n\
    data\n\
    value {\n\
      thing { name description }\n\
      person { name description }\n\
      organization { name description }\n\
    }\n\
    term { vaults { total_shares position_count } }";

fn global_search_query() -> String {
    format!(
        "query GlobalSearch($likeStr: String, $limit: Int) {{\n\
           atoms(where: {{ label: {{ _ilike: $likeStr }} }}, limit: $limit) {{\n\
             {ATOM_FIELDS}\n\
           }}\n\
         }}"
    )
}

fn atom_details_query() -> String {
    format!(
        "query GetAtomDetails($id: String!) {{\n\
           atom(term_id: $id) {{\n\
             creator {{ id label }}\n\
             {ATOM_FIELDS}\n\
           }}\n\
         }}"
    )
}

const TRIPLES_QUERY: &str = "\
    query GetTriplesWithPositions($subjectId: String!, $limit: Int) {\n\
      triples(where: { subject_id: { _eq: $subjectId } }, limit: $limit) {\n\
        term_id\n\
        subject { term_id label }\n\
        predicate { term_id label }\n\
        object { term_id label }\n\
        term {\n\
          vaults {\n\
            total_shares\n\
            position_count\n\
            positions { shares account { id label } }\n\
          }\n\
        }\n\
      }\n\
    }";

#[derive(Deserialize)]
struct GraphqlEnvelope {
    data: Option<Value>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

/// HTTP GraphQL client.
pub struct IndexerClient {
    http: reqwest::Client,
    endpoint: Url,
    auth_token: Option<String>,
}

impl IndexerClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    async fn execute(
        &self,
        operation: &'static str,
        query: &str,
        variables: Value,
    ) -> Result<Value, IndexerError> {
        tracing::debug!(operation, "indexer query");
        let mut request = self.http.post(self.endpoint.clone()).json(&json!({
            "operationName": operation,
            "query": query,
            "variables": variables,
        }));
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let envelope: GraphqlEnvelope = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(errors) = envelope.errors {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            tracing::warn!(operation, %message, "indexer returned errors");
            return Err(IndexerError::Graphql {
                operation: operation.to_string(),
                message,
            });
        }
        Ok(envelope.data.unwrap_or(Value::Null))
    }
}

#[async_trait]
impl GraphSource for IndexerClient {
    async fn search_atoms(&self, text: &str, limit: u32) -> Result<Vec<RawAtom>, IndexerError> {
        let data = self
            .execute(
                "GlobalSearch",
                &global_search_query(),
                json!({ "likeStr": format!("%{text}%"), "limit": limit }),
            )
            .await?;
        Ok(serde_json::from_value(
            data.get("atoms").cloned().unwrap_or(Value::Array(vec![])),
        )?)
    }

    async fn atom_details(&self, id: &str) -> Result<Option<RawAtom>, IndexerError> {
        let data = self
            .execute("GetAtomDetails", &atom_details_query(), json!({ "id": id }))
            .await?;
        match data.get("atom") {
            None | Some(Value::Null) => Ok(None),
            Some(atom) => Ok(Some(serde_json::from_value(atom.clone())?)),
        }
    }

    async fn triples_for_subject(
        &self,
        subject_id: &str,
        limit: u32,
    ) -> Result<Vec<RawTriple>, IndexerError> {
        let data = self
            .execute(
                "GetTriplesWithPositions",
                TRIPLES_QUERY,
                json!({ "subjectId": subject_id, "limit": limit }),
            )
            .await?;
        Ok(serde_json::from_value(
            data.get("triples").cloned().unwrap_or(Value::Array(vec![])),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_request_the_fields_the_model_decodes() {
        let search = global_search_query();
        for field in ["term_id", "label", "total_shares", "position_count"] {
            assert!(search.contains(field), "search query missing {field}");
        }
        assert!(atom_details_query().contains("creator { id label }"));
        for field in ["subject", "predicate", "object", "positions"] {
            assert!(TRIPLES_QUERY.contains(field), "triples query missing {field}");
        }
    }
}
