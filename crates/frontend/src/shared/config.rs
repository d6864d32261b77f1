//! Configuração da aplicação.
//!
//! O TOML padrão vai embutido no bundle. Um fragmento TOML em
//! `localStorage["app_config_override"]` é mesclado por cima, chave a chave:
//! assim uma instalação aponta para outro backend ou ajusta taxas sem
//! recompilar.

use contracts::domain::a006_order::pricing::FeeSchedule;
use once_cell::sync::OnceCell;
use serde::Deserialize;

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

pub const OVERRIDE_STORAGE_KEY: &str = "app_config_override";

/// Configuração padrão embutida no bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000

[ui]
toast_timeout_ms = 4000
page_size = 50
locale = "pt-BR"

[pricing]
debit_rate = 1.99
credit_rates = [3.49, 4.99, 5.99, 6.99, 7.99, 8.99, 9.99, 10.99, 11.99, 12.99, 13.99, 14.99]
"#;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub pricing: PricingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    /// URL base completa ("https://api.loja.com.br"); tem prioridade sobre `port`
    #[serde(default)]
    pub base_url_override: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UiConfig {
    pub toast_timeout_ms: u64,
    pub page_size: usize,
    pub locale: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PricingConfig {
    pub debit_rate: f64,
    pub credit_rates: Vec<f64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fees = FeeSchedule::default();
        Self {
            api: ApiConfig {
                port: 3000,
                base_url_override: None,
            },
            ui: UiConfig {
                toast_timeout_ms: 4000,
                page_size: 50,
                locale: "pt-BR".to_string(),
            },
            pricing: PricingConfig {
                debit_rate: fees.debit_rate,
                credit_rates: fees.credit_rates,
            },
        }
    }
}

impl PricingConfig {
    pub fn fee_schedule(&self) -> FeeSchedule {
        FeeSchedule {
            debit_rate: self.debit_rate,
            credit_rates: self.credit_rates.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Mescla tabelas recursivamente: valores de `overlay` substituem os de `base`
fn merge(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Lê o padrão embutido e aplica o fragmento de override, se houver
pub fn parse_config(override_toml: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut value: toml::Value = toml::from_str(DEFAULT_CONFIG)?;
    if let Some(fragment) = override_toml.filter(|s| !s.trim().is_empty()) {
        let overlay: toml::Value = toml::from_str(fragment)?;
        merge(&mut value, overlay);
    }
    Ok(value.try_into()?)
}

fn read_override() -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()??
        .get_item(OVERRIDE_STORAGE_KEY)
        .ok()?
}

/// Carrega a configuração. Override inválido vai para o log e é ignorado.
pub fn load_config() -> AppConfig {
    let fragment = read_override();
    parse_config(fragment.as_deref()).unwrap_or_else(|e| {
        log::warn!("Ignoring {}: {}", OVERRIDE_STORAGE_KEY, e);
        AppConfig::default()
    })
}

/// Configuração carregada uma vez por carga da página
pub fn config() -> &'static AppConfig {
    CONFIG.get_or_init(load_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = parse_config(None).unwrap();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.api.base_url_override, None);
        assert_eq!(config.ui.locale, "pt-BR");
        assert_eq!(config.pricing.fee_schedule(), FeeSchedule::default());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn override_replaces_only_given_keys() {
        let config = parse_config(Some(
            r#"
            [api]
            base_url_override = "https://api.moldura.local"

            [pricing]
            debit_rate = 1.5
            "#,
        ))
        .unwrap();
        assert_eq!(config.api.port, 3000);
        assert_eq!(
            config.api.base_url_override.as_deref(),
            Some("https://api.moldura.local")
        );
        assert_eq!(config.pricing.debit_rate, 1.5);
        assert_eq!(config.pricing.credit_rates.len(), 12);
    }

    #[test]
    fn broken_override_is_an_error() {
        assert!(parse_config(Some("[api\nport = ")).is_err());
        assert!(parse_config(Some("[api]\nport = \"abc\"")).is_err());
        assert!(parse_config(Some("   ")).is_ok());
    }
}
