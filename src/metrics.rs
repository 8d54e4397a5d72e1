//! Derived metrics over order snapshots.
//!
//! Everything here is a pure function of the orders passed in plus a
//! reference date, so the dashboard can be recomputed on any snapshot.
//! Empty input always yields zeroed or empty output.

use std::collections::{BTreeMap, HashMap, HashSet};
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use crate::domain::{compare_names, Customer, Order, Stage};

pub const DEFAULT_VAT_RATE: f64 = 0.20;
pub const URGENCY_WINDOW_DAYS: i64 = 5;
/// Product families charted on the statistics page.
pub const DEFAULT_CHART_KEYWORDS: [&str; 3] = ["koltuk", "masa", "dolap"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounters {
    pub active: usize,
    pub critical_delays: usize,
    pub in_paint: usize,
    pub completed_this_month: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyProduction {
    pub year: i32,
    pub month: u32,
    pub quantity: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub vat: f64,
    pub total: f64,
}

/// Shipped sales of one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveMonth {
    pub year: i32,
    pub month: u32,
    pub orders: Vec<Order>,
    pub total_revenue: f64,
    pub total_orders: usize,
    pub unique_customers: usize,
}

/// Whole calendar days from `today` to `delivery`; negative once overdue.
pub fn days_until_delivery(delivery: NaiveDate, today: NaiveDate) -> i64 {
    (delivery - today).num_days()
}

pub fn is_urgent(order: &Order, today: NaiveDate) -> bool {
    is_urgent_within(order, today, URGENCY_WINDOW_DAYS)
}

/// Flagged by hand, due within `window_days` (inclusive), or already late.
pub fn is_urgent_within(order: &Order, today: NaiveDate, window_days: i64) -> bool {
    if order.is_urgent {
        return true;
    }
    match order.delivery_date {
        Some(delivery) => days_until_delivery(delivery, today) <= window_days,
        None => false,
    }
}

pub fn delay_days(order: &Order, today: NaiveDate) -> u32 {
    order
        .delivery_date
        .map(|delivery| (-days_until_delivery(delivery, today)).max(0))
        .map_or(0, |days| u32::try_from(days).unwrap_or(u32::MAX))
}

pub fn dashboard_counters(orders: &[Order], now: NaiveDateTime) -> DashboardCounters {
    let today = now.date();
    orders.iter().fold(DashboardCounters::default(), |mut counters, order| {
        if order.is_active() {
            counters.active += 1;
            if order.delivery_date.is_some_and(|delivery| delivery < today) {
                counters.critical_delays += 1;
            }
        }
        if order.status == Stage::Paint {
            counters.in_paint += 1;
        }
        if order.status == Stage::Shipment && same_month(order.created_at.date(), today) {
            counters.completed_this_month += 1;
        }
        counters
    })
}

/// Revenue of confirmed shipments created between `month_start` 00:00:00.000
/// and `month_end` 23:59:59.999, both inclusive.
pub fn monthly_revenue(orders: &[Order], month_start: NaiveDate, month_end: NaiveDate) -> f64 {
    let from = month_start.and_time(NaiveTime::default());
    let until = month_end.and_time(end_of_day());
    orders
        .iter()
        .filter(|o| o.status == Stage::Shipment && o.is_shipped)
        .filter(|o| o.created_at >= from && o.created_at <= until)
        .map(|o| finite_or_zero(o.price))
        .sum()
}

/// Ordered quantity per creation month, most recent month first.
pub fn monthly_production_series(orders: &[Order]) -> Vec<MonthlyProduction> {
    let mut buckets: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for order in orders {
        let key = (order.created_at.year(), order.created_at.month());
        *buckets.entry(key).or_default() += u64::from(order.quantity.max(1));
    }
    buckets
        .into_iter()
        .rev()
        .map(|((year, month), quantity)| MonthlyProduction { year, month, quantity })
        .collect()
}

/// Splits a VAT-inclusive price. The gross amount is the anchor; subtotal
/// and VAT are derived from it so they never drift from the stored total.
pub fn invoice_totals(gross: f64, vat_rate: f64) -> InvoiceTotals {
    let subtotal = gross / (1.0 + vat_rate);
    InvoiceTotals { subtotal, vat: subtotal * vat_rate, total: gross }
}

/// Distinct customers keyed by name. The first occurrence in iteration
/// order supplies company and phone.
pub fn unique_customers(orders: &[Order]) -> Vec<Customer> {
    let mut seen: HashMap<&str, Customer> = HashMap::new();
    for order in orders {
        seen.entry(order.customer_name.as_str()).or_insert_with(|| Customer {
            name: order.customer_name.clone(),
            company_name: order.company_name.clone(),
            phone: order.customer_phone.clone(),
        });
    }
    let mut customers: Vec<Customer> = seen.into_values().collect();
    customers.sort_by(|a, b| compare_names(&a.name, &b.name));
    customers
}

/// Urgent orders still in production, soonest delivery first.
pub fn urgent_orders(orders: &[Order], today: NaiveDate, window_days: i64) -> Vec<Order> {
    let mut urgent: Vec<Order> = orders
        .iter()
        .filter(|o| o.is_active() && is_urgent_within(o, today, window_days))
        .cloned()
        .collect();
    urgent.sort_by_key(|o| (o.delivery_date.is_none(), o.delivery_date));
    urgent
}

pub fn stage_distribution(orders: &[Order]) -> [(Stage, usize); 5] {
    Stage::ALL.map(|stage| (stage, orders.iter().filter(|o| o.status == stage).count()))
}

/// Orders at the shipment stage, newest first.
pub fn sales_archive(orders: &[Order]) -> Vec<Order> {
    let mut sales: Vec<Order> = orders.iter().filter(|o| o.status == Stage::Shipment).cloned().collect();
    sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sales
}

/// Confirmed shipments grouped by creation month, most recent month first.
pub fn monthly_archive(orders: &[Order]) -> Vec<ArchiveMonth> {
    let mut grouped: BTreeMap<(i32, u32), Vec<Order>> = BTreeMap::new();
    for order in orders.iter().filter(|o| o.status == Stage::Shipment && o.is_shipped) {
        let key = (order.created_at.year(), order.created_at.month());
        grouped.entry(key).or_default().push(order.clone());
    }
    grouped
        .into_iter()
        .rev()
        .map(|((year, month), orders)| {
            let total_revenue: f64 = orders.iter().map(|o| finite_or_zero(o.price)).sum();
            let unique_customers = orders.iter().map(|o| o.customer_name.as_str()).collect::<HashSet<_>>().len();
            ArchiveMonth {
                year,
                month,
                total_orders: orders.len(),
                total_revenue,
                unique_customers,
                orders,
            }
        })
        .collect()
}

/// Orders created on one day, counted per product keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyProductCount {
    pub date: NaiveDate,
    pub counts: Vec<(String, usize)>,
}

/// Orders currently at `stage`, in input order.
pub fn orders_in_stage(orders: &[Order], stage: Stage) -> Vec<Order> {
    orders.iter().filter(|o| o.status == stage).cloned().collect()
}

/// Production board: one column per stage, in pipeline order. Archived
/// sales have left the floor and are not shown.
pub fn orders_by_stage(orders: &[Order]) -> Vec<(Stage, Vec<Order>)> {
    Stage::ALL
        .iter()
        .map(|&stage| {
            let column = orders.iter().filter(|o| o.status == stage && !o.is_archived()).cloned().collect();
            (stage, column)
        })
        .collect()
}

/// Orders created on each of the seven days ending with `today`, oldest day
/// first. An order counts for every keyword its product name contains,
/// ignoring case.
pub fn weekly_product_counts(orders: &[Order], today: NaiveDate, keywords: &[String]) -> Vec<DailyProductCount> {
    let keywords: Vec<(&String, String)> = keywords.iter().map(|k| (k, k.to_lowercase())).collect();
    (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let products: Vec<String> = orders
                .iter()
                .filter(|o| o.created_at.date() == date)
                .map(|o| o.product_name.to_lowercase())
                .collect();
            let counts = keywords
                .iter()
                .map(|(keyword, needle)| {
                    let count = products.iter().filter(|p| p.contains(needle.as_str())).count();
                    (keyword.to_string(), count)
                })
                .collect();
            DailyProductCount { date, counts }
        })
        .collect()
}

/// Everything the statistics page shows, computed in one pass over a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub counters: DashboardCounters,
    pub monthly_revenue: f64,
    pub production: Vec<MonthlyProduction>,
    pub stages: [(Stage, usize); 5],
    pub total_orders: usize,
    pub unique_customers: usize,
    /// Orders created in the current calendar month, whatever their stage.
    pub created_this_month: usize,
    /// Total orders per order at the shipment stage; 0 when none got there.
    pub completion_ratio: f64,
}

pub fn statistics(orders: &[Order], now: NaiveDateTime) -> Statistics {
    let (month_start, month_end) = month_bounds(now.date());
    let completed = orders.iter().filter(|o| o.status == Stage::Shipment).count();
    let completion_ratio = if completed > 0 { orders.len() as f64 / completed as f64 } else { 0.0 };
    Statistics {
        counters: dashboard_counters(orders, now),
        monthly_revenue: monthly_revenue(orders, month_start, month_end),
        production: monthly_production_series(orders),
        stages: stage_distribution(orders),
        total_orders: orders.len(),
        unique_customers: orders.iter().map(|o| o.customer_name.as_str()).collect::<HashSet<_>>().len(),
        created_this_month: orders.iter().filter(|o| same_month(o.created_at.date(), now.date())).count(),
        completion_ratio,
    }
}

/// First and last calendar day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date - Duration::days(i64::from(date.day0()));
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (first, last)
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or_default()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
