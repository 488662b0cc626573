pub mod attributes;
pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use attributes::{
    CustomerAttributes, CustomerUpdate, InvoiceAttributes, InvoiceItemAttributes,
    InvoiceItemUpdate, InvoiceUpdate, ItemAttributes, ItemUpdate, MerchantAttributes,
    MerchantUpdate, TransactionAttributes, TransactionUpdate,
};
pub use enums::{InvoiceStatus, TransactionResult};
pub use error::CoreError;
pub use structs::{Customer, Invoice, InvoiceItem, Item, Merchant, Transaction};
