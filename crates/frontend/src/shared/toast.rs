//! Toasts de sucesso/erro.
//!
//! `Notifier` é criado uma vez dentro do `ToasterProvider` e distribuído via
//! contexto; é `Copy`, então pode ser capturado em closures e em
//! `spawn_local` sem clones.

use super::config::config;
use contracts::shared::validation::ValidationError;
use leptos::prelude::*;
use std::fmt::Display;
use std::time::Duration;
use thaw::*;

#[derive(Clone, Copy)]
pub struct Notifier {
    toaster: StoredValue<ToasterInjection, LocalStorage>,
    timeout_ms: u64,
}

impl Notifier {
    /// Precisa ser chamado abaixo de `ToasterProvider`
    pub fn new() -> Self {
        Self {
            toaster: StoredValue::new_local(ToasterInjection::expect_context()),
            timeout_ms: config().ui.toast_timeout_ms,
        }
    }

    fn dispatch(&self, intent: ToastIntent, title: String, body: Option<String>) {
        let options = ToastOptions::default()
            .with_intent(intent)
            .with_timeout(Duration::from_millis(self.timeout_ms));
        let delivered = self.toaster.try_with_value(|toaster| {
            toaster.dispatch_toast(
                move || {
                    view! {
                        <Toast>
                            <ToastTitle>{title}</ToastTitle>
                            {body.map(|b| view! { <ToastBody>{b}</ToastBody> })}
                        </Toast>
                    }
                },
                options,
            )
        });
        if delivered.is_none() {
            log::warn!("toaster disposed, toast dropped");
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.dispatch(ToastIntent::Success, message.into(), None);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.dispatch(ToastIntent::Warning, message.into(), None);
    }

    /// Erro de uma operação: "Erro ao salvar" + detalhe
    pub fn error(&self, context: &str, err: impl Display) {
        let detail = err.to_string();
        log::error!("{}", error_text(context, &detail));
        self.dispatch(ToastIntent::Error, context.to_string(), Some(detail));
    }

    /// Campo obrigatório faltando: toast de aviso, sem chamada HTTP
    pub fn invalid(&self, err: &ValidationError) {
        log::debug!("validation failed on '{}': {}", err.field, err.message);
        self.dispatch(ToastIntent::Warning, err.message.clone(), None);
    }
}

pub fn use_notifier() -> Notifier {
    expect_context::<Notifier>()
}

pub fn error_text(context: &str, detail: &str) -> String {
    if detail.is_empty() {
        context.to_string()
    } else {
        format!("{context}: {detail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_text_joins_context_and_detail() {
        assert_eq!(error_text("Erro ao salvar", "HTTP 500"), "Erro ao salvar: HTTP 500");
        assert_eq!(error_text("Erro ao salvar", ""), "Erro ao salvar");
    }
}
