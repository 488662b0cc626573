use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::{InvoiceStatus, TransactionResult};

/// A product offered by a merchant.
///
/// `unit_price` is the item's *current* listed price as a fixed-point decimal.
/// Prices never pass through binary floating point; every aggregation over
/// them happens in `Decimal`.
///
/// Derives `Eq + Hash` so items can key the quantity-sold and revenue
/// mappings produced by the analytics layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub unit_price: Decimal,
    pub merchant_id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A seller. The name is the only mutable field; merchants carry no
/// `updated_at` in the source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// An order placed by a customer with a merchant.
///
/// Foreign keys are not validated: an invoice may reference a customer or
/// merchant id with no matching record, and lookups simply come back empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: u64,
    pub customer_id: u64,
    pub merchant_id: u64,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single line of an invoice.
///
/// `unit_price` is the price at the time of sale, deliberately decoupled from
/// the item's current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: u64,
    pub invoice_id: u64,
    pub item_id: u64,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A payment attempt against an invoice. An invoice may accumulate several
/// transactions; a single success marks it paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub invoice_id: u64,
    pub credit_card_number: String,
    pub credit_card_expiration_date: String,
    pub result: TransactionResult,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A buyer. Part of the shared model; the analytics layer does not currently
/// join through customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
