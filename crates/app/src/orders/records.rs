//! Wire records for the order endpoints.
//!
//! The create request uses snake_case field names; order payloads come back
//! camelCase, like the cart endpoints.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use storefront::{
    money::Price,
    orders::{Order, OrderId, OrderStatus, PaymentMethod},
};

/// `POST /api/orders/create` body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateOrderRequest<'a> {
    pub delivery_address: &'a str,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
}

/// `POST /api/orders/create` payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderCreatedRecord {
    pub order_id: String,
}

/// One order on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderRecord {
    pub order_id: String,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub item_count: u32,
    pub total: Price,
    pub created_at: Timestamp,
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: OrderId::from(record.order_id),
            status: record.status,
            payment_method: record.payment_method,
            item_count: record.item_count,
            total: record.total,
            created_at: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn create_request_uses_snake_case_fields() -> TestResult {
        let body = serde_json::to_value(CreateOrderRequest {
            delivery_address: "addr_1",
            payment_method: PaymentMethod::Cod,
            notes: None,
        })?;

        assert_eq!(body["delivery_address"], "addr_1");
        assert_eq!(body["payment_method"], "cod");
        assert!(
            body.get("notes").is_none(),
            "absent notes should be omitted entirely"
        );

        Ok(())
    }

    #[test]
    fn order_records_map_into_the_domain_model() -> TestResult {
        let record: OrderRecord = serde_json::from_str(
            r#"{
                "orderId": "ord_9",
                "status": "shipped",
                "paymentMethod": "cod",
                "itemCount": 4,
                "total": 5600,
                "createdAt": "2026-08-01T12:00:00Z"
            }"#,
        )?;

        let order = Order::from(record);

        assert_eq!(order.id, OrderId::from("ord_9"));
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.total, Price::from_minor(5600));
        assert_eq!(order.item_count, 4);

        Ok(())
    }
}
