use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The lifecycle state of an invoice, as recorded in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Shipped,
    Returned,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Shipped => "shipped",
            InvoiceStatus::Returned => "returned",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = CoreError;

    /// Parses a raw status field. Unrecognized text is caller misuse rather
    /// than a data condition, so it fails fast instead of defaulting.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(InvoiceStatus::Pending),
            "shipped" => Ok(InvoiceStatus::Shipped),
            "returned" => Ok(InvoiceStatus::Returned),
            _ => Err(CoreError::InvalidInput(
                "invoice status".to_string(),
                s.to_string(),
            )),
        }
    }
}

/// The outcome of a payment attempt against an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionResult {
    Success,
    Failed,
}

impl TransactionResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionResult::Success => "success",
            TransactionResult::Failed => "failed",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TransactionResult::Success)
    }
}

impl fmt::Display for TransactionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionResult {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(TransactionResult::Success),
            "failed" => Ok(TransactionResult::Failed),
            _ => Err(CoreError::InvalidInput(
                "transaction result".to_string(),
                s.to_string(),
            )),
        }
    }
}
