//! Order service adapter.

use async_trait::async_trait;
use mockall::automock;
use storefront::orders::{Order, OrderDraft, OrderId};

use crate::{
    http::ApiClient,
    orders::{
        errors::OrdersServiceError,
        records::{CreateOrderRequest, OrderCreatedRecord, OrderRecord},
    },
};

/// Typed operations over the order endpoints.
#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order from the current cart.
    async fn create_order(&self, draft: &OrderDraft) -> Result<OrderId, OrdersServiceError>;

    /// Every order for the signed-in user, in server order.
    async fn user_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// A single order.
    async fn order(&self, order_id: &OrderId) -> Result<Order, OrdersServiceError>;
}

/// Order adapter over the REST backend.
#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    api: ApiClient,
}

impl HttpOrdersService {
    /// Create the adapter.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    async fn create_order(&self, draft: &OrderDraft) -> Result<OrderId, OrdersServiceError> {
        if draft.delivery_address.trim().is_empty() {
            return Err(OrdersServiceError::Validation(
                "a delivery address is required".to_string(),
            ));
        }

        // The UI disables unavailable methods, but the adapter enforces the
        // enumeration too so no caller can slip one through.
        if !draft.payment_method.is_available() {
            return Err(OrdersServiceError::Validation(format!(
                "payment method `{}` is not yet available",
                draft.payment_method
            )));
        }

        let created: OrderCreatedRecord = self
            .api
            .post(
                "/api/orders/create",
                &CreateOrderRequest {
                    delivery_address: &draft.delivery_address,
                    payment_method: draft.payment_method,
                    notes: draft.notes.as_deref(),
                },
            )
            .await?
            .into_data()?;

        Ok(OrderId::from(created.order_id))
    }

    async fn user_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let records: Vec<OrderRecord> = self.api.get("/api/orders").await?.into_data()?;

        Ok(records.into_iter().map(Order::from).collect())
    }

    async fn order(&self, order_id: &OrderId) -> Result<Order, OrdersServiceError> {
        let record: OrderRecord = self
            .api
            .get(&format!("/api/orders/{order_id}"))
            .await?
            .into_data()?;

        Ok(Order::from(record))
    }
}
