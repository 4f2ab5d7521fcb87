use docsmith_composer::KeyNormalizer;
use docsmith_model::{EntityStore, Page};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

const QTY: &str = "qty";
const RATE: &str = "rate";
const AMOUNT: &str = "amount";
const SUBTOTAL: &str = "subtotal";
const TAX_RATE: &str = "tax-rate";
const TAX: &str = "tax";
const TOTAL: &str = "total";

/// Upstream arithmetic step. Writes row amounts and the calculated totals
/// entities; the value resolver only selects among the results and never
/// computes. Cells that don't parse as decimals are left exactly as the
/// caller supplied them.
pub fn recalculate(page: &mut Page, store: &mut EntityStore, normalizer: &KeyNormalizer) {
    let mut subtotal = Decimal::ZERO;

    for table in &mut page.tables {
        for row in &mut table.rows {
            let normalized = normalizer.normalize_row(row);
            let qty = normalized.get(QTY).and_then(parse_decimal);
            let rate = normalized.get(RATE).and_then(parse_decimal);

            let amount = match (qty, rate) {
                (Some(qty), Some(rate)) => {
                    let amount = (qty * rate).round_dp(2);
                    row.set(AMOUNT, money(amount));
                    Some(amount)
                }
                // keep whatever amount the caller supplied
                _ => normalized.get(AMOUNT).and_then(parse_decimal),
            };

            if let Some(amount) = amount {
                subtotal += amount;
            }
        }
    }

    let tax_rate = find_field_value(page, store, TAX_RATE)
        .and_then(|value| parse_decimal(&value))
        .unwrap_or(Decimal::ZERO);
    let tax = (subtotal * tax_rate / Decimal::ONE_HUNDRED).round_dp(2);
    let total = subtotal + tax;

    debug!(%subtotal, %tax, %total, "Recalculated totals");

    set_calculated_field(page, store, SUBTOTAL, subtotal);
    set_calculated_field(page, store, TAX, tax);
    set_calculated_field(page, store, TOTAL, total);
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text.trim()).ok()
}

/// Stable two-decimal rendering regardless of input scale
fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

fn find_field_value(page: &Page, store: &EntityStore, field_id: &str) -> Option<String> {
    page.sections.iter().find_map(|section| {
        store
            .entity(&section.id, field_id)
            .filter(|entity| !entity.value.is_empty())
            .map(|entity| entity.value.clone())
    })
}

/// Write a calculated entity's value wherever the field lives; fields that
/// are absent or not marked calculated are left alone
fn set_calculated_field(page: &Page, store: &mut EntityStore, field_id: &str, value: Decimal) {
    for section in &page.sections {
        if let Some(entity) = store.entity_mut(&section.id, field_id) {
            if entity.is_calculated {
                entity.value = money(value);
            }
        }
    }
}
