//! Cálculo de valores do pedido/orçamento
//!
//! Fluxo: subtotal dos itens → desconto → acréscimo → taxa da maquininha →
//! total → sinal/saldo/parcelas. Desconto e acréscimo podem ser digitados em
//! % ou em R$; o campo digitado por último é a "âncora" e o outro é sempre
//! derivado dele. Quando o subtotal muda, a âncora é mantida.
//!
//! Todos os valores são arredondados para centavos a cada etapa.

use crate::enums::PaymentMethod;
use crate::shared::money::{percent_of_value, round2, value_of_percent};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Medida mínima aceita pela oficina
pub const MIN_DIMENSION_CM: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("Medidas inválidas: {width} x {height} cm (mínimo {min} cm)")]
    InvalidDimensions { width: f64, height: f64, min: f64 },

    #[error("Quantidade deve ser ao menos 1")]
    InvalidQuantity,

    #[error("Informe o código da moldura")]
    MissingMolding,

    #[error("Item {0} não existe no pedido")]
    ItemOutOfRange(usize),
}

fn check_dimensions(width_cm: f64, height_cm: f64) -> Result<(), PricingError> {
    let ok = |v: f64| v.is_finite() && v >= MIN_DIMENSION_CM;
    if ok(width_cm) && ok(height_cm) {
        Ok(())
    } else {
        Err(PricingError::InvalidDimensions {
            width: width_cm,
            height: height_cm,
            min: MIN_DIMENSION_CM,
        })
    }
}

/// Área em m² a partir de medidas em cm
pub fn area_m2(width_cm: f64, height_cm: f64) -> Result<f64, PricingError> {
    check_dimensions(width_cm, height_cm)?;
    Ok(width_cm * height_cm / 10_000.0)
}

/// Perímetro em metros lineares (consumo de moldura)
pub fn perimeter_m(width_cm: f64, height_cm: f64) -> Result<f64, PricingError> {
    check_dimensions(width_cm, height_cm)?;
    Ok(2.0 * (width_cm + height_cm) / 100.0)
}

crate::labeled_enum! {
    /// Qual dos dois campos do ajuste foi digitado por último
    AdjustmentAnchor, "adjustment_anchor" {
        Percent => "percent",
        Value => "value",
    }
}

/// Desconto ou acréscimo, guardado nas duas formas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub percent: f64,
    pub value: f64,
    pub anchor: AdjustmentAnchor,
}

impl Default for Adjustment {
    fn default() -> Self {
        Self {
            percent: 0.0,
            value: 0.0,
            anchor: AdjustmentAnchor::Percent,
        }
    }
}

fn non_negative(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 {
        x
    } else {
        0.0
    }
}

impl Adjustment {
    /// Digitado em %. Com `cap_at_base`, limita a 100% da base.
    pub fn set_percent(&mut self, percent: f64, base: f64, cap_at_base: bool) {
        let base = non_negative(base);
        let mut p = non_negative(percent);
        if cap_at_base {
            p = p.min(100.0);
        }
        self.anchor = AdjustmentAnchor::Percent;
        self.percent = round2(p);
        self.value = value_of_percent(base, self.percent);
        if cap_at_base {
            self.value = self.value.min(round2(base));
        }
    }

    /// Digitado em R$. Com `cap_at_base`, limita ao valor da base.
    pub fn set_value(&mut self, value: f64, base: f64, cap_at_base: bool) {
        let base = non_negative(base);
        let mut v = non_negative(value);
        if cap_at_base {
            v = v.min(base);
        }
        self.anchor = AdjustmentAnchor::Value;
        self.value = round2(v);
        self.percent = percent_of_value(base, self.value);
    }

    /// Base mudou: mantém o campo âncora, recalcula o outro
    pub fn rebase(&mut self, base: f64, cap_at_base: bool) {
        match self.anchor {
            AdjustmentAnchor::Percent => self.set_percent(self.percent, base, cap_at_base),
            AdjustmentAnchor::Value => self.set_value(self.value, base, cap_at_base),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0.0 && self.percent == 0.0
    }
}

/// Taxas da maquininha, em %
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub debit_rate: f64,
    /// `credit_rates[n - 1]` é a taxa do crédito em n parcelas
    pub credit_rates: Vec<f64>,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            debit_rate: 1.99,
            credit_rates: vec![
                3.49, 4.99, 5.99, 6.99, 7.99, 8.99, 9.99, 10.99, 11.99, 12.99, 13.99, 14.99,
            ],
        }
    }
}

impl FeeSchedule {
    pub fn max_installments(&self) -> u32 {
        self.credit_rates.len().max(1) as u32
    }

    /// Taxa aplicável; parcelas acima da tabela usam a última taxa
    pub fn rate_for(&self, method: PaymentMethod, installments: u32) -> f64 {
        match method {
            PaymentMethod::Debit => self.debit_rate,
            PaymentMethod::Credit => {
                if self.credit_rates.is_empty() {
                    return 0.0;
                }
                let n = installments.clamp(1, self.credit_rates.len() as u32) as usize;
                self.credit_rates[n - 1]
            }
            PaymentMethod::Cash
            | PaymentMethod::Pix
            | PaymentMethod::Boleto
            | PaymentMethod::Transfer => 0.0,
        }
    }
}

/// Valores derivados do pedido. Os campos editáveis são `discount`,
/// `surcharge`, forma de pagamento, `pass_fee_to_customer` e `down_payment`;
/// o resto é recalculado por [`OrderPricing::recompute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPricing {
    pub items_subtotal: f64,
    pub discount: Adjustment,
    /// Acréscimo sobre o valor já com desconto
    pub surcharge: Adjustment,
    pub payment_method: PaymentMethod,
    pub installments: u32,
    /// Taxa repassada ao cliente (soma no total) ou absorvida pela loja
    pub pass_fee_to_customer: bool,
    pub fee_rate: f64,
    pub fee_value: f64,
    pub total: f64,
    /// Quanto a loja recebe de fato, descontada a taxa
    pub net_received: f64,
    /// Sinal pago na encomenda
    pub down_payment: f64,
    /// Saldo a receber na entrega
    pub balance: f64,
    pub installment_value: f64,
}

impl Default for OrderPricing {
    fn default() -> Self {
        Self {
            items_subtotal: 0.0,
            discount: Adjustment::default(),
            surcharge: Adjustment::default(),
            payment_method: PaymentMethod::default(),
            installments: 1,
            pass_fee_to_customer: false,
            fee_rate: 0.0,
            fee_value: 0.0,
            total: 0.0,
            net_received: 0.0,
            down_payment: 0.0,
            balance: 0.0,
            installment_value: 0.0,
        }
    }
}

impl OrderPricing {
    pub fn after_discount(&self) -> f64 {
        round2(self.items_subtotal - self.discount.value)
    }

    pub fn after_surcharge(&self) -> f64 {
        round2(self.after_discount() + self.surcharge.value)
    }

    /// Recalcula tudo a partir do subtotal dos itens
    pub fn recompute(&mut self, items_subtotal: f64, fees: &FeeSchedule) {
        self.items_subtotal = round2(non_negative(items_subtotal));

        self.discount.rebase(self.items_subtotal, true);
        let after_discount = self.after_discount();

        self.surcharge.rebase(after_discount, false);
        let after_surcharge = self.after_surcharge();

        self.installments = if self.payment_method.allows_installments() {
            self.installments.clamp(1, fees.max_installments())
        } else {
            1
        };

        self.fee_rate = fees.rate_for(self.payment_method, self.installments);
        self.fee_value = value_of_percent(after_surcharge, self.fee_rate);

        self.total = if self.pass_fee_to_customer {
            round2(after_surcharge + self.fee_value)
        } else {
            after_surcharge
        };
        self.net_received = round2(self.total - self.fee_value);

        self.down_payment = round2(non_negative(self.down_payment).min(self.total));
        self.balance = round2(self.total - self.down_payment);
        self.installment_value = round2(self.total / self.installments as f64);
    }

    pub fn set_discount_percent(&mut self, percent: f64, fees: &FeeSchedule) {
        self.discount.set_percent(percent, self.items_subtotal, true);
        self.recompute(self.items_subtotal, fees);
    }

    pub fn set_discount_value(&mut self, value: f64, fees: &FeeSchedule) {
        self.discount.set_value(value, self.items_subtotal, true);
        self.recompute(self.items_subtotal, fees);
    }

    pub fn set_surcharge_percent(&mut self, percent: f64, fees: &FeeSchedule) {
        self.surcharge
            .set_percent(percent, self.after_discount(), false);
        self.recompute(self.items_subtotal, fees);
    }

    pub fn set_surcharge_value(&mut self, value: f64, fees: &FeeSchedule) {
        self.surcharge.set_value(value, self.after_discount(), false);
        self.recompute(self.items_subtotal, fees);
    }

    pub fn set_payment(&mut self, method: PaymentMethod, installments: u32, fees: &FeeSchedule) {
        self.payment_method = method;
        self.installments = installments;
        self.recompute(self.items_subtotal, fees);
    }

    pub fn set_pass_fee_to_customer(&mut self, pass: bool, fees: &FeeSchedule) {
        self.pass_fee_to_customer = pass;
        self.recompute(self.items_subtotal, fees);
    }

    pub fn set_down_payment(&mut self, value: f64, fees: &FeeSchedule) {
        self.down_payment = value;
        self.recompute(self.items_subtotal, fees);
    }

    /// Sinal como % do total (ex.: 50% na encomenda)
    pub fn set_down_payment_percent(&mut self, percent: f64, fees: &FeeSchedule) {
        self.recompute(self.items_subtotal, fees);
        self.down_payment = value_of_percent(self.total, non_negative(percent).min(100.0));
        self.recompute(self.items_subtotal, fees);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fees() -> FeeSchedule {
        FeeSchedule::default()
    }

    #[test]
    fn geometry() {
        assert_eq!(area_m2(50.0, 70.0).unwrap(), 0.35);
        assert_eq!(perimeter_m(50.0, 70.0).unwrap(), 2.4);
        assert!(matches!(
            area_m2(0.5, 70.0),
            Err(PricingError::InvalidDimensions { .. })
        ));
        assert!(perimeter_m(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn percent_and_value_stay_in_sync() {
        let mut d = Adjustment::default();
        d.set_percent(10.0, 480.0, true);
        assert_eq!(d.value, 48.0);
        assert_eq!(d.anchor, AdjustmentAnchor::Percent);

        d.set_value(60.0, 480.0, true);
        assert_eq!(d.percent, 12.5);
        assert_eq!(d.anchor, AdjustmentAnchor::Value);
    }

    #[test]
    fn round_trip_percent_value_percent() {
        for base in [100.0, 137.9, 480.0, 1234.56, 9999.99] {
            for p in [0.0, 1.0, 3.33, 7.5, 12.34, 33.33, 50.0, 99.99] {
                let mut a = Adjustment::default();
                a.set_percent(p, base, true);
                let v = a.value;
                a.set_value(v, base, true);
                assert!(
                    (a.percent - p).abs() <= 0.01 + 1e-9,
                    "base {base} p {p} -> v {v} -> p {}",
                    a.percent
                );
            }
        }
    }

    #[test]
    fn round_trip_value_percent_value() {
        for base in [10.0, 37.9, 99.99] {
            for v in [0.0, 0.01, 1.99, 5.0, 9.99] {
                let mut a = Adjustment::default();
                a.set_value(v, base, true);
                let p = a.percent;
                a.set_percent(p, base, true);
                assert!((a.value - v).abs() <= 0.01 + 1e-9, "base {base} v {v} -> p {p}");
            }
        }
    }

    #[test]
    fn discount_is_capped_and_negatives_clamped() {
        let mut d = Adjustment::default();
        d.set_value(500.0, 200.0, true);
        assert_eq!(d.value, 200.0);
        assert_eq!(d.percent, 100.0);

        d.set_percent(-5.0, 200.0, true);
        assert_eq!(d.value, 0.0);

        let mut s = Adjustment::default();
        s.set_percent(150.0, 200.0, false);
        assert_eq!(s.value, 300.0);
    }

    #[test]
    fn anchor_survives_subtotal_change() {
        let mut p = OrderPricing::default();
        p.recompute(200.0, &fees());
        p.set_discount_percent(10.0, &fees());
        assert_eq!(p.discount.value, 20.0);

        p.recompute(300.0, &fees());
        assert_eq!(p.discount.percent, 10.0);
        assert_eq!(p.discount.value, 30.0);

        p.set_discount_value(15.0, &fees());
        p.recompute(600.0, &fees());
        assert_eq!(p.discount.value, 15.0);
        assert_eq!(p.discount.percent, 2.5);
    }

    #[test]
    fn value_anchored_discount_shrinks_with_subtotal() {
        let mut p = OrderPricing::default();
        p.recompute(100.0, &fees());
        p.set_discount_value(80.0, &fees());
        p.recompute(50.0, &fees());
        assert_eq!(p.discount.value, 50.0);
        assert_eq!(p.total, 0.0);
    }

    #[test]
    fn full_chain_with_fee_passed_to_customer() {
        let mut p = OrderPricing::default();
        p.recompute(1000.0, &fees());
        p.set_discount_percent(10.0, &fees()); // 900
        p.set_surcharge_value(45.0, &fees()); // 945, 5% sobre 900
        assert_eq!(p.surcharge.percent, 5.0);

        p.set_payment(PaymentMethod::Credit, 3, &fees());
        p.set_pass_fee_to_customer(true, &fees());
        assert_eq!(p.fee_rate, 5.99);
        assert_eq!(p.fee_value, 56.61); // 945 * 5,99%
        assert_eq!(p.total, 1001.61);
        assert_eq!(p.net_received, 945.0);
        assert_eq!(p.installment_value, 333.87);
    }

    #[test]
    fn fee_absorbed_by_shop() {
        let mut p = OrderPricing::default();
        p.set_payment(PaymentMethod::Debit, 1, &fees());
        p.recompute(500.0, &fees());
        assert_eq!(p.total, 500.0);
        assert_eq!(p.fee_value, 9.95);
        assert_eq!(p.net_received, 490.05);
    }

    #[test]
    fn installments_only_for_credit_and_within_table() {
        let mut p = OrderPricing::default();
        p.set_payment(PaymentMethod::Pix, 6, &fees());
        p.recompute(100.0, &fees());
        assert_eq!(p.installments, 1);
        assert_eq!(p.fee_value, 0.0);

        p.set_payment(PaymentMethod::Credit, 40, &fees());
        assert_eq!(p.installments, 12);
        assert_eq!(p.fee_rate, 14.99);
    }

    #[test]
    fn down_payment_and_balance() {
        let mut p = OrderPricing::default();
        p.recompute(300.0, &fees());
        p.set_down_payment_percent(50.0, &fees());
        assert_eq!(p.down_payment, 150.0);
        assert_eq!(p.balance, 150.0);

        p.set_down_payment(1000.0, &fees());
        assert_eq!(p.down_payment, 300.0);
        assert_eq!(p.balance, 0.0);

        p.recompute(100.0, &fees());
        assert_eq!(p.down_payment, 100.0);
    }

    #[test]
    fn total_never_negative() {
        let mut p = OrderPricing::default();
        p.recompute(10.0, &fees());
        p.set_discount_percent(250.0, &fees());
        assert_eq!(p.discount.percent, 100.0);
        assert_eq!(p.total, 0.0);
        assert!(p.balance >= 0.0);
    }
}
