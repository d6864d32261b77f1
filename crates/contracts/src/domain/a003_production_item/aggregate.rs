use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate};
use crate::shared::validation::{
    optional_date, parse_date, require_text, ValidationError, ValidationResult,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(ProductionItemId);

crate::labeled_enum! {
    /// Etapa da oficina, na ordem em que a peça passa por elas
    ProductionStage, "production_stage" {
        Queued => "queued",
        Cutting => "cutting",
        Assembly => "assembly",
        Finishing => "finishing",
        Ready => "ready",
        Delivered => "delivered",
    }
}

impl ProductionStage {
    pub fn next(&self) -> Option<ProductionStage> {
        let pos = Self::ALL.iter().position(|s| s == self)?;
        Self::ALL.get(pos + 1).copied()
    }

    /// Peça já saiu da bancada
    pub fn is_finished(&self) -> bool {
        matches!(self, ProductionStage::Ready | ProductionStage::Delivered)
    }
}

/// Item em produção (agregado a003)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionItem {
    #[serde(flatten)]
    pub base: BaseAggregate<ProductionItemId>,

    pub order_number: String,

    #[serde(default)]
    pub customer: String,

    pub stage: ProductionStage,

    /// Responsável pela bancada
    #[serde(default)]
    pub assignee: Option<String>,

    /// Prazo de entrega (YYYY-MM-DD)
    #[serde(default)]
    pub deadline: Option<String>,

    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

impl ProductionItem {
    pub fn next_stage(&self) -> Option<ProductionStage> {
        self.stage.next()
    }

    pub fn deadline_date(&self) -> Option<NaiveDate> {
        self.deadline.as_deref().and_then(parse_date)
    }

    /// Prazo vencido e a peça ainda não ficou pronta
    pub fn is_late(&self, today: NaiveDate) -> bool {
        !self.stage.is_finished() && self.deadline_date().map_or(false, |d| d < today)
    }
}

impl AggregateRoot for ProductionItem {
    type Id = ProductionItemId;

    fn base(&self) -> &BaseAggregate<Self::Id> {
        &self.base
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "production_item"
    }

    fn element_name() -> &'static str {
        "Item de produção"
    }

    fn list_name() -> &'static str {
        "Produção"
    }
}

/// Coluna do quadro de produção
#[derive(Debug, Clone, PartialEq)]
pub struct StageBucket {
    pub stage: ProductionStage,
    pub items: Vec<ProductionItem>,
}

/// Agrupa por etapa, na ordem da oficina. Dentro da etapa: atrasados
/// primeiro, depois por prazo (sem prazo no fim) e por número do pedido.
pub fn group_by_stage(items: &[ProductionItem], today: NaiveDate) -> Vec<StageBucket> {
    ProductionStage::ALL
        .iter()
        .map(|stage| {
            let mut bucket: Vec<ProductionItem> = items
                .iter()
                .filter(|i| i.stage == *stage && !i.base.metadata.is_deleted)
                .cloned()
                .collect();
            bucket.sort_by(|a, b| {
                b.is_late(today)
                    .cmp(&a.is_late(today))
                    .then_with(|| match (a.deadline_date(), b.deadline_date()) {
                        (Some(x), Some(y)) => x.cmp(&y),
                        (Some(_), None) => std::cmp::Ordering::Less,
                        (None, Some(_)) => std::cmp::Ordering::Greater,
                        (None, None) => std::cmp::Ordering::Equal,
                    })
                    .then_with(|| a.order_number.cmp(&b.order_number))
            });
            StageBucket {
                stage: *stage,
                items: bucket,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionItemDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub order_number: String,
    pub customer: String,
    pub stage: ProductionStage,
    pub assignee: Option<String>,
    pub deadline: Option<String>,
    pub quantity: u32,
    pub comment: Option<String>,
}

impl Default for ProductionItemDto {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            description: String::new(),
            order_number: String::new(),
            customer: String::new(),
            stage: ProductionStage::Queued,
            assignee: None,
            deadline: None,
            quantity: 1,
            comment: None,
        }
    }
}

impl From<ProductionItem> for ProductionItemDto {
    fn from(p: ProductionItem) -> Self {
        Self {
            id: Some(p.base.id.as_string()),
            code: Some(p.base.code),
            description: p.base.description,
            order_number: p.order_number,
            customer: p.customer,
            stage: p.stage,
            assignee: p.assignee,
            deadline: p.deadline,
            quantity: p.quantity,
            comment: p.base.comment,
        }
    }
}

impl ProductionItemDto {
    pub fn validate(&self) -> ValidationResult {
        require_text(&self.order_number, "order_number", "Número do pedido")?;
        require_text(&self.description, "description", "Descrição")?;
        if self.quantity == 0 {
            return Err(ValidationError::new(
                "quantity",
                "Quantidade deve ser ao menos 1",
            ));
        }
        optional_date(self.deadline.as_deref(), "deadline", "Prazo")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(order: &str, stage: ProductionStage, deadline: Option<&str>) -> ProductionItem {
        ProductionItem {
            base: BaseAggregate::new(
                ProductionItemId::new_v4(),
                String::new(),
                "Moldura 30x40".into(),
            ),
            order_number: order.into(),
            customer: String::new(),
            stage,
            assignee: None,
            deadline: deadline.map(String::from),
            quantity: 1,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn stages_advance_in_workshop_order() {
        assert_eq!(ProductionStage::Queued.next(), Some(ProductionStage::Cutting));
        assert_eq!(ProductionStage::Finishing.next(), Some(ProductionStage::Ready));
        assert_eq!(ProductionStage::Delivered.next(), None);
    }

    #[test]
    fn lateness_ignores_finished_pieces() {
        assert!(item("1", ProductionStage::Assembly, Some("2024-06-02")).is_late(today()));
        assert!(!item("1", ProductionStage::Ready, Some("2024-06-02")).is_late(today()));
        assert!(!item("1", ProductionStage::Assembly, Some("2024-06-03")).is_late(today()));
        assert!(!item("1", ProductionStage::Assembly, None).is_late(today()));
    }

    #[test]
    fn grouping_puts_late_items_first() {
        let items = vec![
            item("P-3", ProductionStage::Cutting, None),
            item("P-2", ProductionStage::Cutting, Some("2024-06-10")),
            item("P-1", ProductionStage::Cutting, Some("2024-06-01")),
            item("P-9", ProductionStage::Ready, Some("2024-05-01")),
        ];
        let buckets = group_by_stage(&items, today());
        assert_eq!(buckets.len(), ProductionStage::ALL.len());
        assert_eq!(buckets[0].stage, ProductionStage::Queued);
        assert!(buckets[0].items.is_empty());

        let cutting: Vec<&str> = buckets[1]
            .items
            .iter()
            .map(|i| i.order_number.as_str())
            .collect();
        assert_eq!(cutting, vec!["P-1", "P-2", "P-3"]);
        assert_eq!(buckets[4].items.len(), 1);
    }

    #[test]
    fn quantity_must_be_positive() {
        let dto = ProductionItemDto {
            order_number: "P-1".into(),
            description: "Quadro".into(),
            quantity: 0,
            ..Default::default()
        };
        assert_eq!(dto.validate().unwrap_err().field, "quantity");
    }
}
