//! Erros das chamadas à API, com mensagens prontas para o usuário

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Falha de rede / CORS / servidor fora do ar
    #[error("Falha de conexão com o servidor: {0}")]
    Network(String),

    #[error("{}", status_message(.status, .message))]
    Status { status: u16, message: String },

    #[error("Resposta inesperada do servidor: {0}")]
    Decode(String),

    #[error("Não foi possível montar a requisição: {0}")]
    Serialize(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

fn status_message(status: &u16, message: &str) -> String {
    let base = match *status {
        400 | 422 => "Dados inválidos",
        401 => "Sessão expirada, entre novamente",
        403 => "Sem permissão para esta operação",
        404 => "Registro não encontrado",
        409 => "Registro alterado por outro usuário",
        500..=599 => "Erro no servidor",
        _ => "Erro na requisição",
    };
    if message.trim().is_empty() {
        format!("{base} (HTTP {status})")
    } else {
        format!("{base}: {}", message.trim())
    }
}

/// Extrai a mensagem de erro do corpo da resposta.
///
/// O backend responde `{"error": "..."}` ou `{"message": "..."}`; qualquer
/// outro corpo é usado como texto, limitado a 200 caracteres.
pub fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message", "detail"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    body.trim().chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_messages_are_localized() {
        let err = ApiError::Status {
            status: 404,
            message: String::new(),
        };
        assert_eq!(err.to_string(), "Registro não encontrado (HTTP 404)");
        assert!(err.is_not_found());

        let err = ApiError::Status {
            status: 422,
            message: "valor negativo".into(),
        };
        assert_eq!(err.to_string(), "Dados inválidos: valor negativo");
    }

    #[test]
    fn error_body_parsing() {
        assert_eq!(extract_error_message(r#"{"error":"Cliente obrigatório"}"#), "Cliente obrigatório");
        assert_eq!(extract_error_message(r#"{"message":"x"}"#), "x");
        assert_eq!(extract_error_message("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(extract_error_message(&"a".repeat(500)).len(), 200);
    }
}
