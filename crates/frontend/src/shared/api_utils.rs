//! Montagem das URLs da API

use super::config::config;

/// URL base das requisições.
///
/// Usa `api.base_url_override` se configurado; senão o host da página com a
/// porta do backend.
///
/// # Retorno
/// - URL base, como "http://localhost:3000" ou "https://loja.com.br:3000"
/// - String vazia quando não há `window`
pub fn api_base() -> String {
    let api = &config().api;
    if let Some(base) = api.base_url_override.as_deref() {
        return base.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, api.port)
}

/// URL completa da API a partir de um caminho
///
/// # Exemplo
/// ```rust,ignore
/// let url = api_url("/api/order/123");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
