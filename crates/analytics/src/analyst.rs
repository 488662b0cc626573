use std::collections::HashMap;

use chrono::NaiveDate;
use core_types::{Customer, Invoice, InvoiceItem, InvoiceStatus, Item, Merchant, Transaction};
use repository::SharedRepository;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::stats;

/// How many merchants `top_revenue_earners` is conventionally asked for.
pub const DEFAULT_TOP_EARNERS: usize = 20;

/// Weekday names in the tie-breaking order used by the day-of-week reports.
const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A read-mostly aggregation engine over the six entity repositories.
///
/// The analyst holds shared, non-exclusive handles: any caller may mutate the
/// underlying repositories between calls, and every method recomputes from
/// the current contents rather than caching. All id-taking methods are total;
/// an unknown id yields a zero, empty, or `false`/`None` result, never an
/// error.
#[derive(Debug, Clone)]
pub struct SalesAnalyst {
    pub items: SharedRepository<Item>,
    pub merchants: SharedRepository<Merchant>,
    pub invoices: SharedRepository<Invoice>,
    pub customers: SharedRepository<Customer>,
    pub invoice_items: SharedRepository<InvoiceItem>,
    pub transactions: SharedRepository<Transaction>,
}

impl SalesAnalyst {
    pub fn new(
        items: SharedRepository<Item>,
        merchants: SharedRepository<Merchant>,
        invoices: SharedRepository<Invoice>,
        customers: SharedRepository<Customer>,
        invoice_items: SharedRepository<InvoiceItem>,
        transactions: SharedRepository<Transaction>,
    ) -> Self {
        Self {
            items,
            merchants,
            invoices,
            customers,
            invoice_items,
            transactions,
        }
    }

    // ==========================================================================
    // Items per merchant
    // ==========================================================================

    /// Mean item count per merchant, rounded to two decimal places.
    pub fn average_items_per_merchant(&self) -> Decimal {
        let merchant_count = self.merchants.borrow().len();
        if merchant_count == 0 {
            return Decimal::ZERO;
        }
        let item_count = self.items.borrow().len();
        stats::round2(Decimal::from(item_count) / Decimal::from(merchant_count))
    }

    /// Item counts per merchant, one entry per merchant in insertion order.
    pub fn array_of_items_per_merchant(&self) -> Vec<usize> {
        let merchants = self.merchants.borrow();
        let items = self.items.borrow();
        merchants
            .iter()
            .map(|merchant| items.find_all_by_merchant_id(merchant.id).len())
            .collect()
    }

    /// Sample standard deviation of the per-merchant item counts, measured
    /// around the rounded average.
    pub fn average_items_per_merchant_standard_deviation(&self) -> Decimal {
        let counts: Vec<Decimal> = self
            .array_of_items_per_merchant()
            .into_iter()
            .map(Decimal::from)
            .collect();
        stats::sample_std_dev(&counts, self.average_items_per_merchant())
    }

    /// Average plus one standard deviation, truncated to a whole count.
    /// Truncation, not rounding: 5.61 must become 5, not 6.
    pub fn avg_plus_std_dev(&self) -> i64 {
        let threshold =
            self.average_items_per_merchant() + self.average_items_per_merchant_standard_deviation();
        threshold.trunc().to_i64().unwrap_or(0)
    }

    /// Merchants stocking strictly more items than one standard deviation
    /// above the average.
    pub fn merchants_with_high_item_count(&self) -> Vec<Merchant> {
        let threshold = self.avg_plus_std_dev();
        let merchants = self.merchants.borrow();
        let items = self.items.borrow();
        merchants
            .iter()
            .filter(|merchant| items.find_all_by_merchant_id(merchant.id).len() as i64 > threshold)
            .cloned()
            .collect()
    }

    // ==========================================================================
    // Item prices
    // ==========================================================================

    /// Mean unit price of one merchant's items, rounded to two decimal
    /// places. A merchant with no items (or an unknown id) averages zero.
    pub fn average_item_price_for_merchant(&self, merchant_id: u64) -> Decimal {
        let items = self.items.borrow();
        let prices: Vec<Decimal> = items
            .find_all_by_merchant_id(merchant_id)
            .into_iter()
            .map(|item| item.unit_price)
            .collect();
        if prices.is_empty() {
            return Decimal::ZERO;
        }
        stats::round2(stats::mean(&prices))
    }

    /// Mean, over merchants, of each merchant's average item price.
    pub fn average_average_price_per_merchant(&self) -> Decimal {
        let merchant_ids: Vec<u64> = self.merchants.borrow().iter().map(|m| m.id).collect();
        let averages: Vec<Decimal> = merchant_ids
            .into_iter()
            .map(|id| self.average_item_price_for_merchant(id))
            .collect();
        stats::round2(stats::mean(&averages))
    }

    /// Global mean unit price across all items, unrounded.
    pub fn average_item_price(&self) -> Decimal {
        stats::mean(&self.array_of_items_price())
    }

    /// Sample standard deviation of all item prices, two decimal places.
    pub fn average_item_price_std_dev(&self) -> Decimal {
        let prices = self.array_of_items_price();
        stats::sample_std_dev(&prices, stats::mean(&prices))
    }

    /// Every item's unit price, in item-repository insertion order.
    pub fn array_of_items_price(&self) -> Vec<Decimal> {
        self.items.borrow().iter().map(|item| item.unit_price).collect()
    }

    /// Items priced strictly above two standard deviations over the mean.
    pub fn golden_items(&self) -> Vec<Item> {
        let threshold = self.average_item_price() + dec!(2) * self.average_item_price_std_dev();
        self.items
            .borrow()
            .iter()
            .filter(|item| item.unit_price > threshold)
            .cloned()
            .collect()
    }

    // ==========================================================================
    // Invoices per merchant
    // ==========================================================================

    /// Mean invoice count per merchant, rounded to two decimal places.
    pub fn average_invoices_per_merchant(&self) -> Decimal {
        let merchant_count = self.merchants.borrow().len();
        if merchant_count == 0 {
            return Decimal::ZERO;
        }
        let invoice_count = self.invoices.borrow().len();
        stats::round2(Decimal::from(invoice_count) / Decimal::from(merchant_count))
    }

    /// Invoice counts per merchant, one entry per merchant in insertion order.
    pub fn invoices_for_each_of_the_merchants(&self) -> Vec<usize> {
        let merchants = self.merchants.borrow();
        let invoices = self.invoices.borrow();
        merchants
            .iter()
            .map(|merchant| invoices.find_all_by_merchant_id(merchant.id).len())
            .collect()
    }

    /// Sample standard deviation of the per-merchant invoice counts, measured
    /// around the rounded average.
    pub fn average_invoices_per_merchant_standard_deviation(&self) -> Decimal {
        let counts: Vec<Decimal> = self
            .invoices_for_each_of_the_merchants()
            .into_iter()
            .map(Decimal::from)
            .collect();
        stats::sample_std_dev(&counts, self.average_invoices_per_merchant())
    }

    /// Merchants whose invoice count is strictly above two standard
    /// deviations over the average.
    pub fn top_merchants_by_invoice_count(&self) -> Vec<Merchant> {
        let threshold = self.average_invoices_per_merchant()
            + dec!(2) * self.average_invoices_per_merchant_standard_deviation();
        self.merchants_filtered_by_invoice_count(|count| Decimal::from(count) > threshold)
    }

    /// Merchants whose invoice count is strictly below two standard
    /// deviations under the average.
    pub fn bottom_merchants_by_invoice_count(&self) -> Vec<Merchant> {
        let threshold = self.average_invoices_per_merchant()
            - dec!(2) * self.average_invoices_per_merchant_standard_deviation();
        self.merchants_filtered_by_invoice_count(|count| Decimal::from(count) < threshold)
    }

    fn merchants_filtered_by_invoice_count(
        &self,
        keep: impl Fn(usize) -> bool,
    ) -> Vec<Merchant> {
        let merchants = self.merchants.borrow();
        let invoices = self.invoices.borrow();
        merchants
            .iter()
            .filter(|merchant| keep(invoices.find_all_by_merchant_id(merchant.id).len()))
            .cloned()
            .collect()
    }

    // ==========================================================================
    // Invoice calendar distribution
    // ==========================================================================

    /// Invoice counts keyed by full English weekday name, over all invoices.
    pub fn invoice_days(&self) -> HashMap<String, usize> {
        let invoices = self.invoices.borrow();
        let mut days: HashMap<String, usize> = HashMap::new();
        for invoice in invoices.iter() {
            *days
                .entry(invoice.created_at.format("%A").to_string())
                .or_insert(0) += 1;
        }
        days
    }

    /// The highest single-weekday invoice count; zero with no invoices.
    pub fn max_invoices_in_a_day(&self) -> usize {
        self.invoice_days().values().copied().max().unwrap_or(0)
    }

    /// Every weekday achieving the maximum count, ties included, in
    /// Monday-first weekday order.
    pub fn top_days_by_invoice_count(&self) -> Vec<String> {
        let days = self.invoice_days();
        let max = days.values().copied().max().unwrap_or(0);
        if max == 0 {
            return Vec::new();
        }
        WEEKDAYS
            .iter()
            .filter(|day| days.get(**day) == Some(&max))
            .map(|day| (*day).to_string())
            .collect()
    }

    /// The percentage of invoices carrying the given status, rounded to two
    /// decimal places. Zero when there are no invoices at all.
    pub fn invoice_status(&self, status: InvoiceStatus) -> Decimal {
        let invoices = self.invoices.borrow();
        if invoices.is_empty() {
            return Decimal::ZERO;
        }
        let matching = invoices.find_all_by_status(status).len();
        stats::round2(Decimal::from(matching * 100) / Decimal::from(invoices.len()))
    }

    // ==========================================================================
    // Payment state and revenue
    // ==========================================================================

    /// True iff the invoice exists and at least one of its transactions
    /// succeeded. One success is enough; later failures do not unpay it.
    pub fn invoice_paid_in_full(&self, invoice_id: u64) -> bool {
        if self.invoices.borrow().find_by_id(invoice_id).is_none() {
            return false;
        }
        self.transactions
            .borrow()
            .find_all_by_invoice_id(invoice_id)
            .into_iter()
            .any(|transaction| transaction.result.is_success())
    }

    /// The invoice's total across its line items at their sale-time prices.
    /// An unknown invoice, or one with no line items, totals exactly zero.
    pub fn invoice_total(&self, invoice_id: u64) -> Decimal {
        self.invoice_items
            .borrow()
            .find_all_by_invoice_id(invoice_id)
            .into_iter()
            .map(|line| line.unit_price * Decimal::from(line.quantity))
            .sum()
    }

    /// True iff every one of the merchant's invoices is individually paid in
    /// full. Vacuously true for a merchant with no invoices.
    pub fn merchant_paid_in_full(&self, merchant_id: u64) -> bool {
        let invoice_ids: Vec<u64> = self
            .invoices
            .borrow()
            .find_all_by_merchant_id(merchant_id)
            .into_iter()
            .map(|invoice| invoice.id)
            .collect();
        invoice_ids
            .into_iter()
            .all(|invoice_id| self.invoice_paid_in_full(invoice_id))
    }

    /// Merchants with at least one invoice still awaiting a successful
    /// payment.
    pub fn merchants_with_pending_invoices(&self) -> Vec<Merchant> {
        let merchants: Vec<Merchant> = self.merchants.borrow().iter().cloned().collect();
        merchants
            .into_iter()
            .filter(|merchant| !self.merchant_paid_in_full(merchant.id))
            .collect()
    }

    /// The merchant's invoices that have been successfully transacted.
    fn paid_invoices_for_merchant(&self, merchant_id: u64) -> Vec<Invoice> {
        let invoices: Vec<Invoice> = self
            .invoices
            .borrow()
            .find_all_by_merchant_id(merchant_id)
            .into_iter()
            .cloned()
            .collect();
        invoices
            .into_iter()
            .filter(|invoice| self.invoice_paid_in_full(invoice.id))
            .collect()
    }

    /// Total quantity sold per item across the merchant's successfully
    /// transacted invoices. Line items referencing an unknown item id are
    /// skipped, per the unvalidated foreign-key policy.
    pub fn merchants_items_and_quantities_sold(&self, merchant_id: u64) -> HashMap<Item, u64> {
        let mut sold: HashMap<Item, u64> = HashMap::new();
        for invoice in self.paid_invoices_for_merchant(merchant_id) {
            let lines: Vec<InvoiceItem> = self
                .invoice_items
                .borrow()
                .find_all_by_invoice_id(invoice.id)
                .into_iter()
                .cloned()
                .collect();
            let items = self.items.borrow();
            for line in lines {
                if let Some(item) = items.find_by_id(line.item_id) {
                    *sold.entry(item.clone()).or_insert(0) += u64::from(line.quantity);
                }
            }
        }
        sold
    }

    /// The item(s) the merchant has sold the most units of, ties included,
    /// ordered by item id.
    pub fn most_sold_items_for_merchant(&self, merchant_id: u64) -> Vec<Item> {
        let sold = self.merchants_items_and_quantities_sold(merchant_id);
        let Some(max) = sold.values().copied().max() else {
            return Vec::new();
        };
        let mut best: Vec<Item> = sold
            .into_iter()
            .filter(|(_, quantity)| *quantity == max)
            .map(|(item, _)| item)
            .collect();
        best.sort_by_key(|item| item.id);
        best
    }

    /// Revenue per item (sale-time unit price times quantity) across the
    /// merchant's successfully transacted invoices.
    pub fn items_and_dollar_amount_sold_for(&self, merchant_id: u64) -> HashMap<Item, Decimal> {
        let mut revenue: HashMap<Item, Decimal> = HashMap::new();
        for invoice in self.paid_invoices_for_merchant(merchant_id) {
            let lines: Vec<InvoiceItem> = self
                .invoice_items
                .borrow()
                .find_all_by_invoice_id(invoice.id)
                .into_iter()
                .cloned()
                .collect();
            let items = self.items.borrow();
            for line in lines {
                if let Some(item) = items.find_by_id(line.item_id) {
                    *revenue.entry(item.clone()).or_insert(Decimal::ZERO) +=
                        line.unit_price * Decimal::from(line.quantity);
                }
            }
        }
        revenue
    }

    /// The merchant's highest-revenue item; `None` when nothing has sold.
    /// Revenue ties prefer the lowest item id.
    pub fn best_item_for_merchant(&self, merchant_id: u64) -> Option<Item> {
        let mut ranked: Vec<(Item, Decimal)> = self
            .items_and_dollar_amount_sold_for(merchant_id)
            .into_iter()
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.id.cmp(&b.0.id)));
        ranked.into_iter().next().map(|(item, _)| item)
    }

    /// The merchant's total revenue across successfully transacted invoices.
    pub fn revenue_by_merchant(&self, merchant_id: u64) -> Decimal {
        self.paid_invoices_for_merchant(merchant_id)
            .into_iter()
            .map(|invoice| self.invoice_total(invoice.id))
            .sum()
    }

    /// The top `count` merchants by revenue, descending. Ties keep merchant
    /// insertion order (the sort is stable); asking for more merchants than
    /// exist returns them all.
    pub fn top_revenue_earners(&self, count: usize) -> Vec<Merchant> {
        let merchants: Vec<Merchant> = self.merchants.borrow().iter().cloned().collect();
        debug!(count, merchants = merchants.len(), "ranking merchants by revenue");
        let mut ranked: Vec<(Merchant, Decimal)> = merchants
            .into_iter()
            .map(|merchant| {
                let revenue = self.revenue_by_merchant(merchant.id);
                (merchant, revenue)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(count);
        ranked.into_iter().map(|(merchant, _)| merchant).collect()
    }

    // ==========================================================================
    // Single-item merchants and daily revenue
    // ==========================================================================

    /// Merchants stocking exactly one item.
    pub fn merchants_with_only_one_item(&self) -> Vec<Merchant> {
        let merchants = self.merchants.borrow();
        let items = self.items.borrow();
        merchants
            .iter()
            .filter(|merchant| items.find_all_by_merchant_id(merchant.id).len() == 1)
            .cloned()
            .collect()
    }

    /// Merchants whose single item was registered in the named month of any
    /// year. The month name is matched case-insensitively.
    pub fn merchants_with_only_one_item_registered_in_month(
        &self,
        month_name: &str,
    ) -> Vec<Merchant> {
        let single_item_merchants = self.merchants_with_only_one_item();
        let items = self.items.borrow();
        single_item_merchants
            .into_iter()
            .filter(|merchant| {
                items
                    .find_all_by_merchant_id(merchant.id)
                    .first()
                    .is_some_and(|item| {
                        item.created_at
                            .format("%B")
                            .to_string()
                            .eq_ignore_ascii_case(month_name)
                    })
            })
            .collect()
    }

    /// Total revenue of successfully transacted invoices created on the given
    /// civil date, ignoring time of day.
    pub fn total_revenue_by_date(&self, date: NaiveDate) -> Decimal {
        let invoice_ids: Vec<u64> = self
            .invoices
            .borrow()
            .iter()
            .filter(|invoice| invoice.created_at.date_naive() == date)
            .map(|invoice| invoice.id)
            .collect();
        invoice_ids
            .into_iter()
            .filter(|&invoice_id| self.invoice_paid_in_full(invoice_id))
            .map(|invoice_id| self.invoice_total(invoice_id))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use core_types::{InvoiceAttributes, TransactionAttributes, TransactionResult};
    use repository::{
        CustomerRepository, InvoiceItemRepository, InvoiceRepository, ItemRepository,
        MerchantRepository, TransactionRepository,
    };

    use super::*;

    fn empty_analyst() -> SalesAnalyst {
        SalesAnalyst::new(
            ItemRepository::new().into_shared(),
            MerchantRepository::new().into_shared(),
            InvoiceRepository::new().into_shared(),
            CustomerRepository::new().into_shared(),
            InvoiceItemRepository::new().into_shared(),
            TransactionRepository::new().into_shared(),
        )
    }

    fn transaction(invoice_id: u64, result: TransactionResult) -> TransactionAttributes {
        TransactionAttributes {
            invoice_id,
            credit_card_number: "4242424242424242".to_string(),
            credit_card_expiration_date: "0220".to_string(),
            result,
        }
    }

    #[test]
    fn zero_repositories_yield_zero_statistics() {
        let analyst = empty_analyst();
        assert_eq!(analyst.average_items_per_merchant(), Decimal::ZERO);
        assert_eq!(analyst.average_invoices_per_merchant(), Decimal::ZERO);
        assert_eq!(analyst.average_item_price(), Decimal::ZERO);
        assert_eq!(analyst.invoice_status(InvoiceStatus::Pending), Decimal::ZERO);
        assert_eq!(analyst.max_invoices_in_a_day(), 0);
        assert!(analyst.top_days_by_invoice_count().is_empty());
        assert!(analyst.golden_items().is_empty());
    }

    #[test]
    fn truncation_not_rounding_for_the_item_count_threshold() {
        // One merchant with 14 items, twelve with 1: average 2.00, sample
        // std dev 3.61. 2.00 + 3.61 = 5.61, which must truncate to 5 where
        // rounding would give 6.
        let analyst = empty_analyst();
        for index in 0..13 {
            analyst.merchants.borrow_mut().create(
                core_types::MerchantAttributes {
                    name: format!("Merchant {index}"),
                },
            );
        }
        for merchant_id in 1..=13u64 {
            let count = if merchant_id == 1 { 14 } else { 1 };
            for _ in 0..count {
                analyst.items.borrow_mut().create(core_types::ItemAttributes {
                    name: "Widget".to_string(),
                    description: "A widget".to_string(),
                    unit_price: dec!(1.00),
                    merchant_id,
                });
            }
        }

        assert_eq!(analyst.average_items_per_merchant(), dec!(2.00));
        assert_eq!(
            analyst.average_items_per_merchant_standard_deviation(),
            dec!(3.61)
        );
        assert_eq!(analyst.avg_plus_std_dev(), 5);
        let high: Vec<u64> = analyst
            .merchants_with_high_item_count()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(high, vec![1]);
    }

    #[test]
    fn merchant_with_no_invoices_is_vacuously_paid_in_full() {
        let analyst = empty_analyst();
        analyst
            .merchants
            .borrow_mut()
            .create(core_types::MerchantAttributes {
                name: "Idle".to_string(),
            });

        assert!(analyst.merchant_paid_in_full(1));
        assert!(analyst.merchants_with_pending_invoices().is_empty());
    }

    #[test]
    fn unknown_invoice_is_not_paid_and_totals_zero() {
        let analyst = empty_analyst();
        assert!(!analyst.invoice_paid_in_full(131_321_354_054_203));
        assert_eq!(analyst.invoice_total(131_321_354_054_203), Decimal::ZERO);
    }

    #[test]
    fn one_success_among_failures_pays_an_invoice() {
        let analyst = empty_analyst();
        analyst.invoices.borrow_mut().create(InvoiceAttributes {
            customer_id: 1,
            merchant_id: 1,
            status: InvoiceStatus::Shipped,
        });
        analyst
            .transactions
            .borrow_mut()
            .create(transaction(1, TransactionResult::Failed));
        assert!(!analyst.invoice_paid_in_full(1));

        analyst
            .transactions
            .borrow_mut()
            .create(transaction(1, TransactionResult::Success));
        assert!(analyst.invoice_paid_in_full(1));

        analyst
            .transactions
            .borrow_mut()
            .create(transaction(1, TransactionResult::Failed));
        assert!(analyst.invoice_paid_in_full(1));
    }

    #[test]
    fn invoice_count_outliers_use_two_sigma_strict_thresholds() {
        // Twenty merchants with five invoices each and one with none:
        // average 4.76, std dev 1.09. Top threshold 6.94 catches nobody;
        // bottom threshold 2.58 catches only the idle merchant.
        let analyst = empty_analyst();
        for index in 0..21 {
            analyst.merchants.borrow_mut().create(
                core_types::MerchantAttributes {
                    name: format!("Merchant {index}"),
                },
            );
        }
        for merchant_id in 1..=20 {
            for _ in 0..5 {
                analyst.invoices.borrow_mut().create(InvoiceAttributes {
                    customer_id: 1,
                    merchant_id,
                    status: InvoiceStatus::Pending,
                });
            }
        }

        assert_eq!(analyst.average_invoices_per_merchant(), dec!(4.76));
        assert_eq!(
            analyst.average_invoices_per_merchant_standard_deviation(),
            dec!(1.09)
        );
        assert!(analyst.top_merchants_by_invoice_count().is_empty());
        let bottom: Vec<u64> = analyst
            .bottom_merchants_by_invoice_count()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(bottom, vec![21]);
    }

    #[test]
    fn weekday_histogram_counts_every_invoice() {
        let analyst = empty_analyst();
        let saturday = Utc.with_ymd_and_hms(2009, 2, 7, 8, 26, 45).unwrap();
        let monday = Utc.with_ymd_and_hms(2009, 2, 9, 23, 59, 59).unwrap();
        for (id, created_at) in [(1, saturday), (2, saturday), (3, monday)] {
            analyst.invoices.borrow_mut().add(Invoice {
                id,
                customer_id: 1,
                merchant_id: 1,
                status: InvoiceStatus::Shipped,
                created_at,
                updated_at: created_at,
            });
        }

        let days = analyst.invoice_days();
        assert_eq!(days.get("Saturday"), Some(&2));
        assert_eq!(days.get("Monday"), Some(&1));
        assert_eq!(days.get("Tuesday"), None);
        assert_eq!(analyst.max_invoices_in_a_day(), 2);
        assert_eq!(analyst.top_days_by_invoice_count(), vec!["Saturday"]);
    }
}
