//! Contrato do endpoint de cálculo de preço (`POST /api/order/calcular`)
//!
//! O preço-base de cada item (moldura por metro linear, vidro e fundo por
//! m², passe-partout) é tabela do backend. O frontend só envia as medidas e
//! opções e guarda o preço unitário devolvido.

use super::aggregate::GlassType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Código do perfil de moldura
    pub molding_code: String,
    pub width_cm: f64,
    pub height_cm: f64,
    pub glass: GlassType,
    /// Fundo (eucatex / MDF)
    pub backing: bool,
    /// Passe-partout
    pub mat: bool,
    pub quantity: u32,
}

/// Parcela do preço, para exibir a composição ao cliente
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceComponent {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Preço de uma peça
    pub unit_price: f64,
    pub area_m2: f64,
    pub perimeter_m: f64,
    #[serde(default)]
    pub breakdown: Vec<PriceComponent>,
}
