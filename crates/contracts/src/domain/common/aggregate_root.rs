use super::{AggregateId, BaseAggregate};

/// Trait dos agregados consumidos pelo frontend
///
/// Liga o registro aos seus metadados estáticos: índice, coleção REST e os
/// nomes mostrados em abas e cabeçalhos.
pub trait AggregateRoot {
    type Id: AggregateId;

    // ============================================================================
    // Dados da instância
    // ============================================================================

    fn base(&self) -> &BaseAggregate<Self::Id>;

    fn id(&self) -> Self::Id {
        self.base().id
    }

    fn code(&self) -> &str {
        &self.base().code
    }

    fn description(&self) -> &str {
        &self.base().description
    }

    // ============================================================================
    // Metadados estáticos
    // ============================================================================

    /// Índice do agregado (ex.: "a006")
    fn aggregate_index() -> &'static str;

    /// Nome da coleção REST (ex.: "order")
    fn collection_name() -> &'static str;

    /// Nome no singular (ex.: "Pedido")
    fn element_name() -> &'static str;

    /// Nome no plural (ex.: "Pedidos")
    fn list_name() -> &'static str;

    // ============================================================================
    // Implementações padrão
    // ============================================================================

    /// Nome completo, também chave da aba da lista (ex.: "a006_order")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// Caminho REST da coleção (ex.: "/api/order")
    fn api_path() -> String {
        format!("/api/{}", Self::collection_name())
    }

    /// Caminho REST de um registro
    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::api_path(), id)
    }
}
