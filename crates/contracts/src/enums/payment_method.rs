crate::labeled_enum! {
    /// Forma de pagamento (pedidos e contas a pagar)
    PaymentMethod, "payment_method" {
        Cash => "cash",
        Pix => "pix",
        Debit => "debit",
        Credit => "credit",
        Boleto => "boleto",
        Transfer => "transfer",
    }
}

impl PaymentMethod {
    /// Passa pela maquininha e paga taxa
    pub fn is_card(&self) -> bool {
        matches!(self, PaymentMethod::Debit | PaymentMethod::Credit)
    }

    /// Aceita parcelamento
    pub fn allows_installments(&self) -> bool {
        matches!(self, PaymentMethod::Credit)
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Pix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_serde() {
        for method in PaymentMethod::ALL {
            let json = serde_json::to_string(method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.code()));
            assert_eq!(PaymentMethod::from_code(method.code()), Some(*method));
        }
    }

    #[test]
    fn labels_come_from_translation_table() {
        assert_eq!(PaymentMethod::Credit.label(), "Cartão de crédito");
        assert_eq!(PaymentMethod::Pix.to_string(), "Pix");
    }

    #[test]
    fn only_cards_pay_fees() {
        assert!(PaymentMethod::Debit.is_card());
        assert!(!PaymentMethod::Pix.is_card());
        assert!(PaymentMethod::Credit.allows_installments());
        assert!(!PaymentMethod::Debit.allows_installments());
    }
}
