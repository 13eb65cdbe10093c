//! Cart service adapter.

use async_trait::async_trait;
use mockall::automock;
use storefront::{
    cart::{CartSnapshot, LineId},
    product::ProductId,
};

use crate::{
    carts::{
        errors::CartsServiceError,
        records::{AddItemRequest, CartCountRecord, CartPayload, UpdateItemRequest},
    },
    http::ApiClient,
};

/// Typed operations over the cart endpoints.
///
/// Mutating calls return the server's immediate cart echo so callers can
/// contract-check it, but display state must come from a follow-up
/// [`CartsService::get_cart`]; the reconciliation flow never installs a
/// mutation response.
#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Fetch the current cart; an absent payload is an empty cart.
    async fn get_cart(&self) -> Result<CartSnapshot, CartsServiceError>;

    /// Add `quantity` units of a product.
    async fn add_to_cart(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartsServiceError>;

    /// Set an existing line's quantity.
    ///
    /// Callers translate "below 1" into [`CartsService::remove_item`]; the
    /// adapter refuses such a payload rather than sending it.
    async fn update_item(
        &self,
        line_id: &LineId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartsServiceError>;

    /// Remove a line.
    async fn remove_item(&self, line_id: &LineId) -> Result<CartSnapshot, CartsServiceError>;

    /// Remove every line.
    async fn clear_cart(&self) -> Result<(), CartsServiceError>;

    /// Lightweight unit count for header chrome, without the full snapshot.
    async fn cart_count(&self) -> Result<u64, CartsServiceError>;
}

/// Cart adapter over the REST backend.
///
/// No caching here; snapshot state is the reconciliation flow's job.
#[derive(Debug, Clone)]
pub struct HttpCartsService {
    api: ApiClient,
}

impl HttpCartsService {
    /// Create the adapter.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CartsService for HttpCartsService {
    async fn get_cart(&self) -> Result<CartSnapshot, CartsServiceError> {
        let envelope = self.api.get::<CartPayload>("/api/cart").await?;

        Ok(envelope.data.map(CartSnapshot::from).unwrap_or_default())
    }

    async fn add_to_cart(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartsServiceError> {
        if product_id.is_empty() {
            return Err(CartsServiceError::Validation(
                "product id must not be empty".to_string(),
            ));
        }

        if quantity < 1 {
            return Err(CartsServiceError::Validation(
                "quantity must be at least 1".to_string(),
            ));
        }

        let envelope = self
            .api
            .post::<CartPayload, _>(
                "/api/cart/add",
                &AddItemRequest {
                    product_id: product_id.as_str(),
                    quantity,
                },
            )
            .await?;

        Ok(envelope.data.map(CartSnapshot::from).unwrap_or_default())
    }

    async fn update_item(
        &self,
        line_id: &LineId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartsServiceError> {
        if quantity < 1 {
            return Err(CartsServiceError::Validation(
                "a quantity below 1 is a removal, not an update".to_string(),
            ));
        }

        let envelope = self
            .api
            .put::<CartPayload, _>(
                &format!("/api/cart/update/{line_id}"),
                &UpdateItemRequest { quantity },
            )
            .await?;

        Ok(envelope.data.map(CartSnapshot::from).unwrap_or_default())
    }

    async fn remove_item(&self, line_id: &LineId) -> Result<CartSnapshot, CartsServiceError> {
        let envelope = self
            .api
            .delete::<CartPayload>(&format!("/api/cart/remove/{line_id}"))
            .await?;

        Ok(envelope.data.map(CartSnapshot::from).unwrap_or_default())
    }

    async fn clear_cart(&self) -> Result<(), CartsServiceError> {
        let _confirmation = self
            .api
            .delete::<serde_json::Value>("/api/cart/clear")
            .await?;

        Ok(())
    }

    async fn cart_count(&self) -> Result<u64, CartsServiceError> {
        let envelope = self.api.get::<CartCountRecord>("/api/cart/count").await?;

        Ok(envelope.into_data()?.total_items)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::http::TokenCell;

    use super::*;

    fn offline_service() -> HttpCartsService {
        // Points at a closed port; validation must reject before any dial.
        HttpCartsService::new(ApiClient::new(
            "http://127.0.0.1:9",
            Arc::new(TokenCell::new()),
        ))
    }

    #[tokio::test]
    async fn add_rejects_an_empty_product_id_before_dispatch() {
        let result = offline_service()
            .add_to_cart(&ProductId::from(""), 1)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_rejects_a_zero_quantity_before_dispatch() {
        let result = offline_service()
            .add_to_cart(&ProductId::from("prod_1"), 0)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_refuses_a_zero_quantity_before_dispatch() {
        let result = offline_service()
            .update_item(&LineId::from("line_1"), 0)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }
}
