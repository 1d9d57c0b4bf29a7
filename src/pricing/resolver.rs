use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::models::{Product, Size};

const CURRENCY_SYMBOL: &str = "₹";

/// Display price derived from a product's variant/size matrix.
///
/// Never stored; recomputed from upstream data on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EffectivePrice {
    pub min_price: Decimal,
    /// List price of the size that produced `min_price`.
    pub reference_mrp: Decimal,
    pub discount_percent: Option<u32>,
    pub sold_out: bool,
}

impl EffectivePrice {
    pub fn price_label(&self) -> String {
        format_price(self.min_price)
    }

    pub fn mrp_label(&self) -> String {
        format_price(self.reference_mrp)
    }

    pub fn discount_label(&self) -> Option<String> {
        self.discount_percent.map(|pct| format!("{}% OFF", pct))
    }
}

/// Discount price when it is set and positive, list price otherwise.
pub fn effective_price(size: &Size) -> Decimal {
    let price = size.price.unwrap_or(Decimal::ZERO);
    match size.discount_price {
        Some(discount) if discount > Decimal::ZERO => discount,
        _ => price,
    }
}

pub fn resolve(product: &Product) -> EffectivePrice {
    let mut min_price: Option<Decimal> = None;
    let mut reference_mrp = Decimal::ZERO;

    // The MRP follows the size holding the minimum, not the largest list
    // price. First size wins ties.
    for size in product.sizes() {
        let effective = effective_price(size);
        if min_price.is_none_or(|current| effective < current) {
            min_price = Some(effective);
            reference_mrp = size.price.unwrap_or(Decimal::ZERO);
        }
    }

    let min_price = min_price.unwrap_or(Decimal::ZERO);

    EffectivePrice {
        min_price,
        reference_mrp,
        discount_percent: discount_percent(min_price, reference_mrp),
        sold_out: is_sold_out(product),
    }
}

pub fn format_price(amount: Decimal) -> String {
    format!(
        "{} {:.2}",
        CURRENCY_SYMBOL,
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn discount_percent(min_price: Decimal, reference_mrp: Decimal) -> Option<u32> {
    if reference_mrp <= min_price {
        return None;
    }

    ((reference_mrp - min_price) / reference_mrp * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
}

fn is_sold_out(product: &Product) -> bool {
    if product.stock.is_some_and(|stock| stock <= 0) {
        return true;
    }

    // A product with no sizes at all, however its variants are shaped, has
    // missing data rather than an empty shelf.
    let mut sizes = product.sizes().peekable();
    sizes.peek().is_some() && !sizes.any(Size::is_purchasable)
}
