use super::calculation::{CalculationRequest, CalculationResponse, PriceComponent};
use super::pricing::{self, FeeSchedule, OrderPricing, PricingError};
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate};
use crate::enums::PaymentMethod;
use crate::shared::money::round2;
use crate::shared::validation::{optional_date, require_text, ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(OrderId);

crate::labeled_enum! {
    /// Orçamento vira pedido quando o cliente aprova
    OrderKind, "order_kind" {
        Quote => "quote",
        Order => "order",
    }
}

crate::labeled_enum! {
    OrderStatus, "order_status" {
        Open => "open",
        Approved => "approved",
        InProduction => "in_production",
        Ready => "ready",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
}

crate::labeled_enum! {
    GlassType, "glass_type" {
        None => "none",
        Common => "common",
        AntiGlare => "anti_glare",
        Mirror => "mirror",
    }
}

impl Default for GlassType {
    fn default() -> Self {
        GlassType::Common
    }
}

fn one() -> u32 {
    1
}

/// Linha do pedido: uma peça emoldurada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub description: String,

    pub molding_code: String,

    pub width_cm: f64,
    pub height_cm: f64,

    #[serde(default = "one")]
    pub quantity: u32,

    #[serde(default)]
    pub glass: GlassType,

    #[serde(default)]
    pub backing: bool,

    /// Passe-partout
    #[serde(default)]
    pub mat: bool,

    /// Preço de uma peça devolvido por `/calcular`; `None` até calcular
    #[serde(default)]
    pub unit_price: Option<f64>,

    #[serde(default)]
    pub breakdown: Vec<PriceComponent>,
}

impl Default for OrderItem {
    fn default() -> Self {
        Self {
            description: String::new(),
            molding_code: String::new(),
            width_cm: 0.0,
            height_cm: 0.0,
            quantity: 1,
            glass: GlassType::default(),
            backing: true,
            mat: false,
            unit_price: None,
            breakdown: Vec::new(),
        }
    }
}

impl OrderItem {
    pub fn area_m2(&self) -> Option<f64> {
        pricing::area_m2(self.width_cm, self.height_cm).ok()
    }

    pub fn perimeter_m(&self) -> Option<f64> {
        pricing::perimeter_m(self.width_cm, self.height_cm).ok()
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price
            .map(|p| round2(p * self.quantity as f64))
            .unwrap_or(0.0)
    }

    pub fn is_priced(&self) -> bool {
        self.unit_price.is_some()
    }

    /// Campos que entram no preço; mudou algum, o preço antigo não vale mais
    fn price_inputs(&self) -> (String, f64, f64, u32, GlassType, bool, bool) {
        (
            self.molding_code.trim().to_string(),
            self.width_cm,
            self.height_cm,
            self.quantity,
            self.glass,
            self.backing,
            self.mat,
        )
    }

    /// Monta a requisição de `/calcular`, rejeitando medidas inválidas antes
    /// de ir ao servidor
    pub fn calculation_request(&self) -> Result<CalculationRequest, PricingError> {
        if self.molding_code.trim().is_empty() {
            return Err(PricingError::MissingMolding);
        }
        pricing::area_m2(self.width_cm, self.height_cm)?;
        if self.quantity == 0 {
            return Err(PricingError::InvalidQuantity);
        }
        Ok(CalculationRequest {
            molding_code: self.molding_code.trim().to_string(),
            width_cm: self.width_cm,
            height_cm: self.height_cm,
            glass: self.glass,
            backing: self.backing,
            mat: self.mat,
            quantity: self.quantity,
        })
    }
}

/// Pedido ou orçamento (agregado a006)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(flatten)]
    pub base: BaseAggregate<OrderId>,

    /// Número sequencial dado pelo backend
    #[serde(default)]
    pub number: String,

    pub customer: String,

    #[serde(default)]
    pub customer_phone: Option<String>,

    pub kind: OrderKind,

    pub status: OrderStatus,

    #[serde(default)]
    pub items: Vec<OrderItem>,

    #[serde(default)]
    pub pricing: OrderPricing,

    #[serde(default)]
    pub delivery_date: Option<String>,

    #[serde(default)]
    pub notes: String,
}

impl Order {
    pub fn total(&self) -> f64 {
        self.pricing.total
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

impl AggregateRoot for Order {
    type Id = OrderId;

    fn base(&self) -> &BaseAggregate<Self::Id> {
        &self.base
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "order"
    }

    fn element_name() -> &'static str {
        "Pedido"
    }

    fn list_name() -> &'static str {
        "Pedidos"
    }
}

/// Estado do formulário de pedido/orçamento.
///
/// Toda edição passa pelos métodos abaixo, que recalculam `pricing` na hora.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: Option<String>,
    pub number: Option<String>,
    pub customer: String,
    pub customer_phone: Option<String>,
    pub kind: OrderKind,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub pricing: OrderPricing,
    pub delivery_date: Option<String>,
    pub notes: String,
}

impl Default for OrderDto {
    fn default() -> Self {
        Self {
            id: None,
            number: None,
            customer: String::new(),
            customer_phone: None,
            kind: OrderKind::Quote,
            status: OrderStatus::Open,
            items: Vec::new(),
            pricing: OrderPricing::default(),
            delivery_date: None,
            notes: String::new(),
        }
    }
}

impl From<Order> for OrderDto {
    fn from(o: Order) -> Self {
        Self {
            id: Some(o.base.id.as_string()),
            number: Some(o.number).filter(|n| !n.is_empty()),
            customer: o.customer,
            customer_phone: o.customer_phone,
            kind: o.kind,
            status: o.status,
            items: o.items,
            pricing: o.pricing,
            delivery_date: o.delivery_date,
            notes: o.notes,
        }
    }
}

impl OrderDto {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn items_subtotal(&self) -> f64 {
        round2(self.items.iter().map(OrderItem::line_total).sum())
    }

    pub fn recalculate(&mut self, fees: &FeeSchedule) {
        let subtotal = self.items_subtotal();
        self.pricing.recompute(subtotal, fees);
    }

    fn check_index(&self, index: usize) -> Result<(), PricingError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(PricingError::ItemOutOfRange(index))
        }
    }

    pub fn add_item(&mut self, fees: &FeeSchedule) -> usize {
        self.items.push(OrderItem::default());
        self.recalculate(fees);
        self.items.len() - 1
    }

    /// Cópia logo abaixo da original, com o mesmo preço
    pub fn duplicate_item(&mut self, index: usize, fees: &FeeSchedule) -> Result<usize, PricingError> {
        self.check_index(index)?;
        let copy = self.items[index].clone();
        self.items.insert(index + 1, copy);
        self.recalculate(fees);
        Ok(index + 1)
    }

    pub fn remove_item(&mut self, index: usize, fees: &FeeSchedule) -> Result<OrderItem, PricingError> {
        self.check_index(index)?;
        let removed = self.items.remove(index);
        self.recalculate(fees);
        Ok(removed)
    }

    /// Edita um item. Se mudou algo que entra no preço, o preço é limpo até
    /// o item ser recalculado.
    pub fn update_item<F>(&mut self, index: usize, fees: &FeeSchedule, edit: F) -> Result<(), PricingError>
    where
        F: FnOnce(&mut OrderItem),
    {
        self.check_index(index)?;
        let item = &mut self.items[index];
        let before = item.price_inputs();
        edit(item);
        if item.price_inputs() != before {
            item.unit_price = None;
            item.breakdown.clear();
        }
        self.recalculate(fees);
        Ok(())
    }

    /// Grava a resposta de `/calcular` no item
    pub fn apply_calculation(
        &mut self,
        index: usize,
        response: CalculationResponse,
        fees: &FeeSchedule,
    ) -> Result<(), PricingError> {
        self.check_index(index)?;
        let item = &mut self.items[index];
        item.unit_price = Some(round2(response.unit_price.max(0.0)));
        item.breakdown = response.breakdown;
        self.recalculate(fees);
        Ok(())
    }

    pub fn unpriced_items(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, i)| !i.is_priced())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn set_discount_percent(&mut self, percent: f64, fees: &FeeSchedule) {
        self.pricing.set_discount_percent(percent, fees);
    }

    pub fn set_discount_value(&mut self, value: f64, fees: &FeeSchedule) {
        self.pricing.set_discount_value(value, fees);
    }

    pub fn set_surcharge_percent(&mut self, percent: f64, fees: &FeeSchedule) {
        self.pricing.set_surcharge_percent(percent, fees);
    }

    pub fn set_surcharge_value(&mut self, value: f64, fees: &FeeSchedule) {
        self.pricing.set_surcharge_value(value, fees);
    }

    pub fn set_payment(&mut self, method: PaymentMethod, installments: u32, fees: &FeeSchedule) {
        self.pricing.set_payment(method, installments, fees);
    }

    pub fn set_pass_fee_to_customer(&mut self, pass: bool, fees: &FeeSchedule) {
        self.pricing.set_pass_fee_to_customer(pass, fees);
    }

    pub fn set_down_payment(&mut self, value: f64, fees: &FeeSchedule) {
        self.pricing.set_down_payment(value, fees);
    }

    pub fn set_down_payment_percent(&mut self, percent: f64, fees: &FeeSchedule) {
        self.pricing.set_down_payment_percent(percent, fees);
    }

    pub fn validate(&self) -> ValidationResult {
        require_text(&self.customer, "customer", "Cliente")?;
        if self.items.is_empty() {
            return Err(ValidationError::new("items", "Adicione ao menos um item"));
        }
        for (idx, item) in self.items.iter().enumerate() {
            if item.molding_code.trim().is_empty() {
                return Err(ValidationError::new(
                    "items",
                    format!("Item {}: informe a moldura", idx + 1),
                ));
            }
            if !item.is_priced() {
                return Err(ValidationError::new(
                    "items",
                    format!("Item {}: calcule o preço antes de salvar", idx + 1),
                ));
            }
        }
        optional_date(self.delivery_date.as_deref(), "delivery_date", "Data de entrega")
    }

    /// Só orçamento salvo, em aberto e válido pode ser aprovado
    pub fn can_approve(&self) -> bool {
        self.kind == OrderKind::Quote
            && self.status == OrderStatus::Open
            && !self.is_new()
            && self.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fees() -> FeeSchedule {
        FeeSchedule::default()
    }

    fn priced(molding: &str, w: f64, h: f64, qty: u32, price: f64) -> OrderItem {
        OrderItem {
            description: "Quadro".into(),
            molding_code: molding.into(),
            width_cm: w,
            height_cm: h,
            quantity: qty,
            unit_price: Some(price),
            ..Default::default()
        }
    }

    fn response(unit_price: f64) -> CalculationResponse {
        CalculationResponse {
            unit_price,
            area_m2: 0.0,
            perimeter_m: 0.0,
            breakdown: vec![PriceComponent {
                label: "Moldura".into(),
                value: unit_price,
            }],
        }
    }

    #[test]
    fn item_geometry_and_line_total() {
        let item = priced("M-101", 30.0, 40.0, 3, 89.9);
        assert_eq!(item.area_m2(), Some(0.12));
        assert_eq!(item.perimeter_m(), Some(1.4));
        assert_eq!(item.line_total(), 269.7);

        let unpriced = OrderItem::default();
        assert_eq!(unpriced.line_total(), 0.0);
        assert_eq!(unpriced.area_m2(), None);
    }

    #[test]
    fn calculation_request_is_checked_locally() {
        let mut item = priced("  M-7 ", 20.0, 25.0, 1, 10.0);
        let req = item.calculation_request().unwrap();
        assert_eq!(req.molding_code, "M-7");

        item.width_cm = 0.5;
        assert!(matches!(
            item.calculation_request(),
            Err(PricingError::InvalidDimensions { .. })
        ));

        item.width_cm = 20.0;
        item.quantity = 0;
        assert_eq!(item.calculation_request(), Err(PricingError::InvalidQuantity));

        item.molding_code = " ".into();
        assert_eq!(item.calculation_request(), Err(PricingError::MissingMolding));
    }

    #[test]
    fn running_totals_follow_item_edits() {
        let mut dto = OrderDto::default();
        let first = dto.add_item(&fees());
        dto.update_item(first, &fees(), |i| {
            i.molding_code = "M-1".into();
            i.width_cm = 50.0;
            i.height_cm = 70.0;
        })
        .unwrap();
        dto.apply_calculation(first, response(120.0), &fees()).unwrap();
        assert_eq!(dto.pricing.items_subtotal, 120.0);

        let second = dto.duplicate_item(first, &fees()).unwrap();
        assert_eq!(second, 1);
        assert_eq!(dto.pricing.total, 240.0);

        dto.update_item(second, &fees(), |i| i.quantity = 2).unwrap();
        assert_eq!(dto.items[second].unit_price, None);
        assert!(dto.items[second].breakdown.is_empty());
        assert_eq!(dto.pricing.total, 120.0);

        dto.apply_calculation(second, response(115.0), &fees()).unwrap();
        assert_eq!(dto.pricing.items_subtotal, 350.0);

        dto.remove_item(first, &fees()).unwrap();
        assert_eq!(dto.pricing.items_subtotal, 230.0);
        assert_eq!(dto.items.len(), 1);
    }

    #[test]
    fn description_edit_keeps_the_price() {
        let mut dto = OrderDto {
            items: vec![priced("M-1", 10.0, 10.0, 1, 50.0)],
            ..Default::default()
        };
        dto.update_item(0, &fees(), |i| i.description = "Diploma".into())
            .unwrap();
        assert_eq!(dto.items[0].unit_price, Some(50.0));
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let mut dto = OrderDto::default();
        assert_eq!(
            dto.apply_calculation(0, response(1.0), &fees()),
            Err(PricingError::ItemOutOfRange(0))
        );
        assert!(dto.remove_item(3, &fees()).is_err());
        assert!(dto.duplicate_item(0, &fees()).is_err());
    }

    #[test]
    fn percent_discount_follows_new_items() {
        let mut dto = OrderDto {
            items: vec![priced("M-1", 10.0, 10.0, 1, 200.0)],
            ..Default::default()
        };
        dto.recalculate(&fees());
        dto.set_discount_percent(10.0, &fees());
        assert_eq!(dto.pricing.total, 180.0);

        let idx = dto.add_item(&fees());
        dto.update_item(idx, &fees(), |i| i.molding_code = "M-2".into())
            .unwrap();
        dto.apply_calculation(idx, response(100.0), &fees()).unwrap();
        assert_eq!(dto.pricing.discount.value, 30.0);
        assert_eq!(dto.pricing.total, 270.0);
    }

    #[test]
    fn save_is_blocked_until_customer_items_and_prices() {
        let mut dto = OrderDto::default();
        assert_eq!(dto.validate().unwrap_err().field, "customer");

        dto.customer = "Ana".into();
        assert_eq!(dto.validate().unwrap_err().field, "items");

        let idx = dto.add_item(&fees());
        dto.update_item(idx, &fees(), |i| {
            i.molding_code = "M-1".into();
            i.width_cm = 20.0;
            i.height_cm = 30.0;
        })
        .unwrap();
        assert_eq!(dto.unpriced_items(), vec![0]);
        assert!(dto.validate().is_err());

        dto.apply_calculation(idx, response(75.0), &fees()).unwrap();
        assert!(dto.validate().is_ok());
        assert!(!dto.can_approve(), "unsaved quote cannot be approved");

        dto.id = Some(OrderId::new_v4().as_string());
        assert!(dto.can_approve());
        dto.kind = OrderKind::Order;
        assert!(!dto.can_approve());
    }

    #[test]
    fn order_round_trips_through_json() {
        let json = r#"{
            "id": "2f1b0c3e-5a6d-4e7f-8a9b-0c1d2e3f4a5b",
            "code": "P-0042",
            "description": "",
            "number": "42",
            "customer": "Bruno",
            "kind": "quote",
            "status": "open",
            "items": [
                {"molding_code": "M-1", "width_cm": 30, "height_cm": 40, "glass": "anti_glare", "unit_price": 99.5}
            ]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.items[0].glass, GlassType::AntiGlare);
        assert_eq!(order.items[0].quantity, 1);
        assert_eq!(order.item_count(), 1);

        let dto = OrderDto::from(order);
        assert_eq!(dto.number.as_deref(), Some("42"));
        assert_eq!(dto.items_subtotal(), 99.5);
    }
}
