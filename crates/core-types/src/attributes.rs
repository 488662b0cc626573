//! Creation and partial-update payloads for each entity.
//!
//! The original data model merged loosely-typed attribute bags into records.
//! Here that contract is structured: `*Attributes` types carry exactly the
//! caller-supplied fields of a new record (ids and timestamps are generated
//! by the store), and `*Update` types make every mutable field optional so
//! untouched fields survive an update. `id` and `created_at` are not
//! representable in an update at all.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::{InvoiceStatus, TransactionResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAttributes {
    pub name: String,
    pub description: String,
    pub unit_price: Decimal,
    pub merchant_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantAttributes {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MerchantUpdate {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceAttributes {
    pub customer_id: u64,
    pub merchant_id: u64,
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceUpdate {
    pub status: Option<InvoiceStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItemAttributes {
    pub invoice_id: u64,
    pub item_id: u64,
    pub quantity: u32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItemUpdate {
    pub quantity: Option<u32>,
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionAttributes {
    pub invoice_id: u64,
    pub credit_card_number: String,
    pub credit_card_expiration_date: String,
    pub result: TransactionResult,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    pub credit_card_number: Option<String>,
    pub credit_card_expiration_date: Option<String>,
    pub result: Option<TransactionResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAttributes {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn updates_default_to_leaving_every_field_alone() {
        assert_eq!(ItemUpdate::default(), ItemUpdate {
            name: None,
            description: None,
            unit_price: None,
        });
        assert_eq!(InvoiceItemUpdate::default(), InvoiceItemUpdate {
            quantity: None,
            unit_price: None,
        });
    }

    #[test]
    fn prices_keep_their_exact_decimal_scale() {
        let attributes = InvoiceItemAttributes {
            invoice_id: 1,
            item_id: 7,
            quantity: 3,
            unit_price: dec!(10.99),
        };
        // Fixed point, not float: the cents survive exactly.
        assert_eq!(attributes.unit_price.to_string(), "10.99");
        assert_eq!(
            attributes.unit_price * rust_decimal::Decimal::from(attributes.quantity),
            dec!(32.97)
        );
    }
}
