//! Cliente JSON enxuto sobre `gloo-net`.
//!
//! Toda requisição leva `Accept: application/json` e, se o login deixou um
//! token no localStorage, `Authorization: Bearer ...`. Os caminhos são
//! relativos a [`api_base`](super::api_utils::api_base).

use super::api_utils::api_url;
use super::error::{extract_error_message, ApiError};
use crate::system::auth::storage::get_access_token;
use futures::future::join_all;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

fn builder(method: Method, path: &str) -> RequestBuilder {
    let url = api_url(path);
    log::debug!("{} {}", method.as_str(), url);
    let builder = match method {
        Method::Get => Request::get(&url),
        Method::Post => Request::post(&url),
        Method::Put => Request::put(&url),
        Method::Delete => Request::delete(&url),
    }
    .header("Accept", "application/json");

    match get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn check(method: Method, path: &str, response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::warn!("{} {} -> HTTP {}", method.as_str(), path, status);
    Err(ApiError::Status {
        status,
        message: extract_error_message(&body),
    })
}

async fn send(method: Method, path: &str, body: Option<String>) -> Result<Response, ApiError> {
    let builder = builder(method, path);
    let result = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(json)
            .map_err(|e| ApiError::Serialize(e.to_string()))?
            .send()
            .await,
        None => builder.send().await,
    };
    let response = result.map_err(|e| {
        log::error!("{} {} failed: {}", method.as_str(), path, e);
        ApiError::Network(e.to_string())
    })?;
    check(method, path, response).await
}

fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Serialize(e.to_string()))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = send(Method::Get, path, None).await?;
    decode(response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = send(Method::Post, path, Some(encode(body)?)).await?;
    decode(response).await
}

/// POST sem corpo de resposta
pub async fn post<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    send(Method::Post, path, Some(encode(body)?)).await.map(|_| ())
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = send(Method::Put, path, Some(encode(body)?)).await?;
    decode(response).await
}

/// PUT sem corpo de resposta
pub async fn put<B: Serialize>(path: &str, body: &B) -> Result<(), ApiError> {
    send(Method::Put, path, Some(encode(body)?)).await.map(|_| ())
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    send(Method::Delete, path, None).await.map(|_| ())
}

/// Resultado de um lote de chamadas independentes. Nada é desfeito.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, ApiError)>,
}

impl BatchOutcome {
    pub fn from_results(results: Vec<(String, Result<(), ApiError>)>) -> Self {
        let mut outcome = Self::default();
        for (id, result) in results {
            match result {
                Ok(()) => outcome.succeeded.push(id),
                Err(e) => outcome.failed.push((id, e)),
            }
        }
        outcome
    }

    pub fn all_ok(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Texto do toast de resumo
    pub fn summary(&self, verb_past_plural: &str) -> String {
        if self.all_ok() {
            format!("{} registro(s) {}", self.succeeded.len(), verb_past_plural)
        } else {
            format!(
                "{} de {} registro(s) {}; {} falharam",
                self.succeeded.len(),
                self.total(),
                verb_past_plural,
                self.failed.len()
            )
        }
    }
}

/// `DELETE {collection_path}/{id}` para cada id, todos em paralelo
pub async fn delete_many(collection_path: &str, ids: Vec<String>) -> BatchOutcome {
    let calls = ids.into_iter().map(|id| {
        let path = format!("{}/{}", collection_path, id);
        async move {
            let result = delete(&path).await;
            (id, result)
        }
    });
    let outcome = BatchOutcome::from_results(join_all(calls).await);
    if !outcome.all_ok() {
        log::warn!(
            "batch delete on {}: {} of {} failed",
            collection_path,
            outcome.failed.len(),
            outcome.total()
        );
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_outcome_counts_and_summary() {
        let outcome = BatchOutcome::from_results(vec![
            ("a".into(), Ok(())),
            ("b".into(), Err(ApiError::Network("timeout".into()))),
            ("c".into(), Ok(())),
        ]);
        assert!(!outcome.all_ok());
        assert_eq!(outcome.total(), 3);
        assert_eq!(outcome.succeeded, vec!["a", "c"]);
        assert_eq!(outcome.summary("excluído(s)"), "2 de 3 registro(s) excluído(s); 1 falharam");

        let ok = BatchOutcome::from_results(vec![("a".into(), Ok(()))]);
        assert_eq!(ok.summary("excluído(s)"), "1 registro(s) excluído(s)");
    }
}
