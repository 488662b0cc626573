//! Domain predicate queries on the concrete repository instantiations.
//!
//! Every query returns matches in insertion order and comes back empty rather
//! than erroring when nothing matches. Foreign keys are not validated against
//! the referenced repository; a dangling id simply finds nothing.

use std::ops::RangeInclusive;

use core_types::{
    Customer, Invoice, InvoiceItem, InvoiceStatus, Item, Merchant, Transaction, TransactionResult,
};
use rust_decimal::Decimal;

use crate::store::Repository;

pub type ItemRepository = Repository<Item>;
pub type MerchantRepository = Repository<Merchant>;
pub type InvoiceRepository = Repository<Invoice>;
pub type InvoiceItemRepository = Repository<InvoiceItem>;
pub type TransactionRepository = Repository<Transaction>;
pub type CustomerRepository = Repository<Customer>;

impl Repository<Item> {
    /// Substring match on the description as written (case-sensitive).
    pub fn find_all_with_description(&self, fragment: &str) -> Vec<&Item> {
        self.iter()
            .filter(|item| item.description.contains(fragment))
            .collect()
    }

    /// Exact match on the current unit price.
    pub fn find_all_by_price(&self, price: Decimal) -> Vec<&Item> {
        self.iter()
            .filter(|item| item.unit_price == price)
            .collect()
    }

    /// Items whose unit price falls inside the range, both ends inclusive.
    pub fn find_all_by_price_in_range(&self, range: RangeInclusive<Decimal>) -> Vec<&Item> {
        self.iter()
            .filter(|item| range.contains(&item.unit_price))
            .collect()
    }

    pub fn find_all_by_merchant_id(&self, merchant_id: u64) -> Vec<&Item> {
        self.iter()
            .filter(|item| item.merchant_id == merchant_id)
            .collect()
    }
}

impl Repository<Invoice> {
    pub fn find_all_by_merchant_id(&self, merchant_id: u64) -> Vec<&Invoice> {
        self.iter()
            .filter(|invoice| invoice.merchant_id == merchant_id)
            .collect()
    }

    pub fn find_all_by_customer_id(&self, customer_id: u64) -> Vec<&Invoice> {
        self.iter()
            .filter(|invoice| invoice.customer_id == customer_id)
            .collect()
    }

    pub fn find_all_by_status(&self, status: InvoiceStatus) -> Vec<&Invoice> {
        self.iter()
            .filter(|invoice| invoice.status == status)
            .collect()
    }
}

impl Repository<InvoiceItem> {
    pub fn find_all_by_invoice_id(&self, invoice_id: u64) -> Vec<&InvoiceItem> {
        self.iter()
            .filter(|line| line.invoice_id == invoice_id)
            .collect()
    }

    pub fn find_all_by_item_id(&self, item_id: u64) -> Vec<&InvoiceItem> {
        self.iter().filter(|line| line.item_id == item_id).collect()
    }
}

impl Repository<Transaction> {
    pub fn find_all_by_invoice_id(&self, invoice_id: u64) -> Vec<&Transaction> {
        self.iter()
            .filter(|transaction| transaction.invoice_id == invoice_id)
            .collect()
    }

    pub fn find_all_by_result(&self, result: TransactionResult) -> Vec<&Transaction> {
        self.iter()
            .filter(|transaction| transaction.result == result)
            .collect()
    }

    pub fn find_all_by_credit_card_number(&self, number: &str) -> Vec<&Transaction> {
        self.iter()
            .filter(|transaction| transaction.credit_card_number == number)
            .collect()
    }
}

impl Repository<Customer> {
    /// Customers whose first name contains the fragment, ignoring case.
    pub fn find_all_by_first_name(&self, fragment: &str) -> Vec<&Customer> {
        let needle = fragment.to_lowercase();
        self.iter()
            .filter(|customer| customer.first_name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Customers whose last name contains the fragment, ignoring case.
    pub fn find_all_by_last_name(&self, fragment: &str) -> Vec<&Customer> {
        let needle = fragment.to_lowercase();
        self.iter()
            .filter(|customer| customer.last_name.to_lowercase().contains(&needle))
            .collect()
    }
}
