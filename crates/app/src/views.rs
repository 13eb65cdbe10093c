//! Terminal rendering of reconciled cart and order state.
//!
//! Renderers consume only the snapshot's items and summary. Every money value
//! printed here was computed server-side; this module formats, it never
//! derives.

use storefront::{
    cart::{CartLine, CartSnapshot, CartSummary},
    orders::Order,
};
use tabled::{builder::Builder, settings::Style};

/// Render the cart's lines as a table.
#[must_use]
pub fn cart_table(snapshot: &CartSnapshot) -> String {
    if snapshot.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Item", "Qty", "Tier", "Unit", "Subtotal", "Savings"]);

    for line in snapshot.items() {
        builder.push_record([
            line.product.name.clone(),
            line.quantity.to_string(),
            tier_cell(line),
            line.item_price.formatted(),
            line.subtotal.formatted(),
            line.savings.formatted(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::sharp());

    table.to_string()
}

/// Tier badge plus the wholesale MOQ hint when the server supplies one.
fn tier_cell(line: &CartLine) -> String {
    if !line.pricing_tier.is_wholesale() && line.wholesale.can_wholesale {
        return format!(
            "{} ({}+ for wholesale)",
            line.pricing_tier.label(),
            line.wholesale.moq_required
        );
    }

    line.pricing_tier.label().to_string()
}

/// Render the server-computed summary block.
#[must_use]
pub fn summary_block(summary: &CartSummary) -> String {
    format!(
        "Items: {}\nSubtotal: {}\nShipping: {}\nSavings: {}\nTotal: {}",
        summary.total_items,
        summary.subtotal.formatted(),
        summary.shipping.formatted(),
        summary.savings.formatted(),
        summary.total.formatted(),
    )
}

/// Render the user's orders as a table.
#[must_use]
pub fn orders_table(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders yet.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Order", "Status", "Payment", "Items", "Total", "Placed"]);

    for order in orders {
        builder.push_record([
            order.id.to_string(),
            order.status.to_string(),
            order.payment_method.to_string(),
            order.item_count.to_string(),
            order.total.formatted(),
            order.created_at.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::sharp());

    table.to_string()
}

/// Render a single order.
#[must_use]
pub fn order_detail(order: &Order) -> String {
    format!(
        "Order: {}\nStatus: {}\nPayment: {}\nItems: {}\nTotal: {}\nPlaced: {}",
        order.id,
        order.status,
        order.payment_method,
        order.item_count,
        order.total.formatted(),
        order.created_at,
    )
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use storefront::{
        cart::LineId,
        money::Price,
        orders::{OrderId, OrderStatus, PaymentMethod},
        pricing::{PricingTier, WholesaleHint},
        product::{ProductId, ProductSnapshot, ProductStatus},
    };
    use testresult::TestResult;

    use super::*;

    fn widget_line(quantity: u32, tier: PricingTier) -> CartLine {
        CartLine {
            line_id: LineId::from("line_1"),
            product: ProductSnapshot {
                id: ProductId::from("prod_1"),
                name: "Widget".to_string(),
                image: None,
                stock: 42,
                brand: Some("Acme".to_string()),
                status: ProductStatus::Active,
            },
            quantity,
            pricing_tier: tier,
            item_price: Price::from_minor(1000),
            subtotal: Price::from_minor(1000 * u64::from(quantity)),
            savings: Price::from_minor(0),
            wholesale: WholesaleHint {
                can_wholesale: true,
                moq_required: 3,
            },
        }
    }

    #[test]
    fn empty_cart_renders_the_empty_message() {
        assert_eq!(cart_table(&CartSnapshot::empty()), "Your cart is empty.");
    }

    #[test]
    fn cart_table_shows_the_moq_hint_for_retail_lines() {
        let snapshot = CartSnapshot::new(
            vec![widget_line(2, PricingTier::Retail)],
            CartSummary::default(),
        );

        let rendered = cart_table(&snapshot);

        assert!(rendered.contains("Widget"), "rendered: {rendered}");
        assert!(
            rendered.contains("retail (3+ for wholesale)"),
            "rendered: {rendered}"
        );
        assert!(rendered.contains("$20.00"), "rendered: {rendered}");
    }

    #[test]
    fn wholesale_lines_drop_the_hint() {
        let snapshot = CartSnapshot::new(
            vec![widget_line(3, PricingTier::Wholesale)],
            CartSummary::default(),
        );

        let rendered = cart_table(&snapshot);

        assert!(rendered.contains("wholesale"), "rendered: {rendered}");
        assert!(
            !rendered.contains("for wholesale)"),
            "rendered: {rendered}"
        );
    }

    #[test]
    fn summary_block_prints_server_totals_verbatim() {
        let rendered = summary_block(&CartSummary {
            subtotal: Price::from_minor(2400),
            shipping: Price::from_minor(500),
            savings: Price::from_minor(600),
            total: Price::from_minor(2900),
            total_items: 3,
        });

        assert!(rendered.contains("Items: 3"), "rendered: {rendered}");
        assert!(rendered.contains("Subtotal: $24.00"), "rendered: {rendered}");
        assert!(rendered.contains("Savings: $6.00"), "rendered: {rendered}");
        assert!(rendered.contains("Total: $29.00"), "rendered: {rendered}");
    }

    #[test]
    fn orders_table_lists_each_order() -> TestResult {
        let orders = vec![Order {
            id: OrderId::from("ord_9"),
            status: OrderStatus::Shipped,
            payment_method: PaymentMethod::Cod,
            item_count: 4,
            total: Price::from_minor(5600),
            created_at: "2026-08-01T12:00:00Z".parse::<Timestamp>()?,
        }];

        let rendered = orders_table(&orders);

        assert!(rendered.contains("ord_9"), "rendered: {rendered}");
        assert!(rendered.contains("shipped"), "rendered: {rendered}");
        assert!(rendered.contains("$56.00"), "rendered: {rendered}");

        Ok(())
    }

    #[test]
    fn no_orders_renders_the_empty_message() {
        assert_eq!(orders_table(&[]), "No orders yet.");
    }
}
