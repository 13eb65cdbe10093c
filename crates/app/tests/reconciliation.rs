//! End-to-end reconciliation scenarios over mocked adapters.

use std::sync::Arc;

use storefront::{
    cart::{CartLine, CartSnapshot, CartSummary, LineId},
    money::Price,
    pricing::{PricingTier, WholesaleHint},
    product::{ProductId, ProductSnapshot, ProductStatus},
};
use storefront_app::{
    carts::{CartController, CartEvents, CartPhase, MockCartsService, MutationOutcome},
    http::TokenCell,
    notify::{AlwaysConfirm, MemoryNotifier, Notifier},
    session::{AuthSession, Credentials, CurrentUser, MockAuthService, Session},
};
use testresult::TestResult;

fn bulk_widget_line(quantity: u32, tier: PricingTier, unit: u64, savings: u64) -> CartLine {
    CartLine {
        line_id: LineId::from("line_1"),
        product: ProductSnapshot {
            id: ProductId::from("prod_1"),
            name: "Bulk Widget".to_string(),
            image: None,
            stock: 100,
            brand: Some("Acme".to_string()),
            status: ProductStatus::Active,
        },
        quantity,
        pricing_tier: tier,
        item_price: Price::from_minor(unit),
        subtotal: Price::from_minor(unit * u64::from(quantity)),
        savings: Price::from_minor(savings),
        wholesale: WholesaleHint {
            can_wholesale: true,
            moq_required: 3,
        },
    }
}

fn snapshot(line: CartLine) -> CartSnapshot {
    let summary = CartSummary {
        subtotal: line.subtotal,
        shipping: Price::from_minor(0),
        savings: line.savings,
        total: line.subtotal,
        total_items: u64::from(line.quantity),
    };

    CartSnapshot::new(vec![line], summary)
}

async fn signed_in_session() -> Arc<Session> {
    let mut auth = MockAuthService::new();
    auth.expect_login().returning(|_| {
        Ok(AuthSession {
            token: "tok_abc".to_string(),
            user: CurrentUser {
                id: "u1".to_string(),
                name: "Test".to_string(),
                email: "t@example.com".to_string(),
            },
        })
    });

    let session = Session::new(Arc::new(auth), Arc::new(TokenCell::new()), None);
    session
        .login(&Credentials {
            email: "t@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .expect("test login should succeed");

    Arc::new(session)
}

/// Crossing the MOQ boundary flips the tier and recomputes the whole summary;
/// the displayed values are the server's, not anything derived locally.
#[tokio::test]
async fn incrementing_across_the_moq_boundary_flips_the_tier() -> TestResult {
    // Quantity 2 at retail $10.00; MOQ 3; wholesale $8.00.
    let before = snapshot(bulk_widget_line(2, PricingTier::Retail, 1000, 0));
    // After the increment the server recomputes every line and the summary.
    let after = snapshot(bulk_widget_line(3, PricingTier::Wholesale, 800, 600));

    let mut carts = MockCartsService::new();
    let mut fetches = vec![after.clone(), before.clone()];
    carts
        .expect_get_cart()
        .times(2)
        .returning(move || Ok(fetches.pop().unwrap_or_default()));
    carts
        .expect_update_item()
        .times(1)
        .withf(|line_id, quantity| line_id == &LineId::from("line_1") && *quantity == 3)
        .returning(|_, _| Ok(CartSnapshot::empty()));

    let controller = CartController::new(
        Arc::new(carts),
        signed_in_session().await,
        Arc::new(MemoryNotifier::new()) as Arc<dyn Notifier>,
        Arc::new(AlwaysConfirm),
        CartEvents::new(),
    );

    controller.start().await;
    assert_eq!(
        controller
            .snapshot()
            .line(&LineId::from("line_1"))
            .map(|line| line.pricing_tier),
        Some(PricingTier::Retail)
    );

    let outcome = controller.increment(&LineId::from("line_1")).await;
    assert_eq!(outcome, MutationOutcome::Applied);

    let displayed = controller.snapshot();
    let line = displayed
        .line(&LineId::from("line_1"))
        .ok_or("expected line_1 after the increment")?;

    assert_eq!(line.pricing_tier, PricingTier::Wholesale);
    assert_eq!(line.subtotal, Price::from_minor(2400), "3 x $8.00");
    assert_eq!(line.savings, Price::from_minor(600), "3 x ($10.00 - $8.00)");
    assert_eq!(displayed.summary().savings, Price::from_minor(600));
    assert_eq!(displayed.summary().total, Price::from_minor(2400));

    Ok(())
}

/// Without a session, mutating entry points short-circuit client-side.
#[tokio::test]
async fn signed_out_mutations_never_reach_the_adapter() {
    // Any adapter call would panic this expectation-less mock.
    let carts = MockCartsService::new();

    let session = Arc::new(Session::new(
        Arc::new(MockAuthService::new()),
        Arc::new(TokenCell::new()),
        None,
    ));

    let notifier = Arc::new(MemoryNotifier::new());
    let controller = CartController::new(
        Arc::new(carts),
        session,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
        Arc::new(AlwaysConfirm),
        CartEvents::new(),
    );

    controller.start().await;
    assert_eq!(controller.phase(), CartPhase::Idle);

    let outcome = controller.add(&ProductId::from("prod_1"), 1).await;

    assert_eq!(outcome, MutationOutcome::Denied);
    assert!(
        notifier.messages().iter().any(|m| m.contains("Sign in")),
        "an auth-required notice should appear"
    );
}

/// Refreshing twice with no intervening mutation leaves the summary untouched.
#[tokio::test]
async fn repeated_reads_are_idempotent() -> TestResult {
    let fixture = snapshot(bulk_widget_line(2, PricingTier::Retail, 1000, 0));

    let mut carts = MockCartsService::new();
    let response = fixture.clone();
    carts
        .expect_get_cart()
        .times(2)
        .returning(move || Ok(response.clone()));

    let controller = CartController::new(
        Arc::new(carts),
        signed_in_session().await,
        Arc::new(MemoryNotifier::new()) as Arc<dyn Notifier>,
        Arc::new(AlwaysConfirm),
        CartEvents::new(),
    );

    controller.start().await;
    let first = *controller.snapshot().summary();

    controller.start().await;
    let second = *controller.snapshot().summary();

    assert_eq!(first, second, "reads must not change the summary");

    Ok(())
}
