//! The seam between the generic store and the entity types.

use chrono::{DateTime, Utc};
use core_types::{
    Customer, CustomerAttributes, CustomerUpdate, Invoice, InvoiceAttributes, InvoiceItem,
    InvoiceItemAttributes, InvoiceItemUpdate, InvoiceUpdate, Item, ItemAttributes, ItemUpdate,
    Merchant, MerchantAttributes, MerchantUpdate, Transaction, TransactionAttributes,
    TransactionUpdate,
};

/// A storable entity record.
///
/// `build` constructs a record from a generated id, a single creation instant
/// (so `created_at == updated_at` initially), and the caller-supplied
/// attributes. `apply` merges a partial update, overwriting only the fields
/// that are present and refreshing `updated_at`; `id` and `created_at` are
/// never touched.
pub trait Record: Clone {
    type Attributes;
    type Update;

    fn id(&self) -> u64;
    fn build(id: u64, now: DateTime<Utc>, attributes: Self::Attributes) -> Self;
    fn apply(&mut self, update: Self::Update, now: DateTime<Utc>);
}

/// An entity with a display name, searchable case-insensitively.
pub trait Named {
    fn name(&self) -> &str;
}

impl Record for Item {
    type Attributes = ItemAttributes;
    type Update = ItemUpdate;

    fn id(&self) -> u64 {
        self.id
    }

    fn build(id: u64, now: DateTime<Utc>, attributes: ItemAttributes) -> Self {
        Item {
            id,
            name: attributes.name,
            description: attributes.description,
            unit_price: attributes.unit_price,
            merchant_id: attributes.merchant_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, update: ItemUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(unit_price) = update.unit_price {
            self.unit_price = unit_price;
        }
        self.updated_at = now;
    }
}

impl Named for Item {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for Merchant {
    type Attributes = MerchantAttributes;
    type Update = MerchantUpdate;

    fn id(&self) -> u64 {
        self.id
    }

    fn build(id: u64, now: DateTime<Utc>, attributes: MerchantAttributes) -> Self {
        Merchant {
            id,
            name: attributes.name,
            created_at: now,
        }
    }

    // Merchants carry no `updated_at`, so only the name moves.
    fn apply(&mut self, update: MerchantUpdate, _now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
    }
}

impl Named for Merchant {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for Invoice {
    type Attributes = InvoiceAttributes;
    type Update = InvoiceUpdate;

    fn id(&self) -> u64 {
        self.id
    }

    fn build(id: u64, now: DateTime<Utc>, attributes: InvoiceAttributes) -> Self {
        Invoice {
            id,
            customer_id: attributes.customer_id,
            merchant_id: attributes.merchant_id,
            status: attributes.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, update: InvoiceUpdate, now: DateTime<Utc>) {
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = now;
    }
}

impl Record for InvoiceItem {
    type Attributes = InvoiceItemAttributes;
    type Update = InvoiceItemUpdate;

    fn id(&self) -> u64 {
        self.id
    }

    fn build(id: u64, now: DateTime<Utc>, attributes: InvoiceItemAttributes) -> Self {
        InvoiceItem {
            id,
            invoice_id: attributes.invoice_id,
            item_id: attributes.item_id,
            quantity: attributes.quantity,
            unit_price: attributes.unit_price,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, update: InvoiceItemUpdate, now: DateTime<Utc>) {
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(unit_price) = update.unit_price {
            self.unit_price = unit_price;
        }
        self.updated_at = now;
    }
}

impl Record for Transaction {
    type Attributes = TransactionAttributes;
    type Update = TransactionUpdate;

    fn id(&self) -> u64 {
        self.id
    }

    fn build(id: u64, now: DateTime<Utc>, attributes: TransactionAttributes) -> Self {
        Transaction {
            id,
            invoice_id: attributes.invoice_id,
            credit_card_number: attributes.credit_card_number,
            credit_card_expiration_date: attributes.credit_card_expiration_date,
            result: attributes.result,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, update: TransactionUpdate, now: DateTime<Utc>) {
        if let Some(credit_card_number) = update.credit_card_number {
            self.credit_card_number = credit_card_number;
        }
        if let Some(credit_card_expiration_date) = update.credit_card_expiration_date {
            self.credit_card_expiration_date = credit_card_expiration_date;
        }
        if let Some(result) = update.result {
            self.result = result;
        }
        self.updated_at = now;
    }
}

impl Record for Customer {
    type Attributes = CustomerAttributes;
    type Update = CustomerUpdate;

    fn id(&self) -> u64 {
        self.id
    }

    fn build(id: u64, now: DateTime<Utc>, attributes: CustomerAttributes) -> Self {
        Customer {
            id,
            first_name: attributes.first_name,
            last_name: attributes.last_name,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, update: CustomerUpdate, now: DateTime<Utc>) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        self.updated_at = now;
    }
}
