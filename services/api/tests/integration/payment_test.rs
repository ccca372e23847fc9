use rust_decimal::Decimal;
use uuid::Uuid;

use storefront_api::error::ApiError;
use storefront_api::usecase::payment::{CheckoutInput, CheckoutUseCase, ClientTokenUseCase};
use storefront_domain::cart::Cart;
use storefront_domain::order::OrderStatus;

use crate::helpers::{
    GatewayOutcome, MockCartRepo, MockGateway, MockOrderRepo, MockPaymentAttemptRepo, cart_item,
};

type Checkout = CheckoutUseCase<MockGateway, MockOrderRepo, MockPaymentAttemptRepo, MockCartRepo>;

fn checkout(
    gateway: MockGateway,
    orders: MockOrderRepo,
    attempts: MockPaymentAttemptRepo,
) -> Checkout {
    CheckoutUseCase {
        gateway,
        orders,
        attempts,
        carts: MockCartRepo::empty(),
    }
}

fn two_item_cart() -> Cart {
    Cart::default()
        .with_item(cart_item("Pen", Decimal::new(150, 2)))
        .with_item(cart_item("Ink", Decimal::new(300, 2)))
}

fn input(cart: Cart, key: Option<&str>) -> CheckoutInput {
    CheckoutInput {
        nonce: "fake-valid-nonce".into(),
        cart,
        idempotency_key: key.map(str::to_owned),
    }
}

#[tokio::test]
async fn should_return_client_token() {
    let usecase = ClientTokenUseCase {
        gateway: MockGateway::approving(),
    };
    assert_eq!(usecase.execute().await.unwrap(), "client-token-123");
}

#[tokio::test]
async fn should_reject_empty_cart_without_charging() {
    let gateway = MockGateway::approving();
    let usecase = checkout(
        gateway.clone(),
        MockOrderRepo::empty(),
        MockPaymentAttemptRepo::empty(),
    );
    let err = usecase
        .execute(Uuid::now_v7(), input(Cart::default(), None))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "cart is empty");
    assert!(gateway.charged().is_empty());
}

#[tokio::test]
async fn should_charge_sum_of_prices_and_record_order() {
    let buyer = Uuid::now_v7();
    let cart = two_item_cart();
    let gateway = MockGateway::approving();
    let orders = MockOrderRepo::empty();
    let carts = MockCartRepo::with_cart(buyer, cart.clone());
    let usecase = CheckoutUseCase {
        gateway: gateway.clone(),
        orders: orders.clone(),
        attempts: MockPaymentAttemptRepo::empty(),
        carts: carts.clone(),
    };

    let order_id = usecase
        .execute(buyer, input(cart.clone(), None))
        .await
        .unwrap();

    assert_eq!(gateway.charged(), vec![Decimal::new(450, 2)]);
    let stored = orders.orders.lock().unwrap()[0].clone();
    assert_eq!(stored.id, order_id);
    assert_eq!(stored.buyer_id, buyer);
    assert_eq!(stored.product_ids, cart.product_ids());
    assert_eq!(stored.status, OrderStatus::NotProcessed);
    assert_eq!(stored.payment["id"], "tx_1");
    assert!(carts.stored(buyer).is_none());
}

#[tokio::test]
async fn should_replay_completed_key_without_charging() {
    let buyer = Uuid::now_v7();
    let gateway = MockGateway::approving();
    let orders = MockOrderRepo::empty();
    let usecase = checkout(gateway.clone(), orders.clone(), MockPaymentAttemptRepo::empty());

    let first = usecase
        .execute(buyer, input(two_item_cart(), Some("key-1")))
        .await
        .unwrap();
    let second = usecase
        .execute(buyer, input(two_item_cart(), Some("key-1")))
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(gateway.charged().len(), 1);
    assert_eq!(orders.count(), 1);
}

#[tokio::test]
async fn should_scope_keys_to_the_buyer() {
    let gateway = MockGateway::approving();
    let usecase = checkout(
        gateway.clone(),
        MockOrderRepo::empty(),
        MockPaymentAttemptRepo::empty(),
    );

    let a = usecase
        .execute(Uuid::now_v7(), input(two_item_cart(), Some("shared")))
        .await
        .unwrap();
    let b = usecase
        .execute(Uuid::now_v7(), input(two_item_cart(), Some("shared")))
        .await
        .unwrap();

    assert_ne!(a, b);
    assert_eq!(gateway.charged().len(), 2);
}

#[tokio::test]
async fn should_reject_replay_while_first_attempt_in_flight() {
    let buyer = Uuid::now_v7();
    let gateway = MockGateway::approving();
    let usecase = checkout(
        gateway.clone(),
        MockOrderRepo::empty(),
        MockPaymentAttemptRepo::with_attempt(buyer, "key-1", None),
    );

    let result = usecase
        .execute(buyer, input(two_item_cart(), Some("key-1")))
        .await;
    assert!(matches!(result, Err(ApiError::PaymentInProgress)));
    assert!(gateway.charged().is_empty());
}

#[tokio::test]
async fn should_release_key_after_decline() {
    let buyer = Uuid::now_v7();
    let attempts = MockPaymentAttemptRepo::empty();
    let orders = MockOrderRepo::empty();
    let usecase = checkout(
        MockGateway::new(GatewayOutcome::Decline),
        orders.clone(),
        attempts.clone(),
    );

    let err = usecase
        .execute(buyer, input(two_item_cart(), Some("key-1")))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::PaymentDeclined(_)));
    assert_eq!(attempts.get(buyer, "key-1"), None);
    assert_eq!(orders.count(), 0);
}

#[tokio::test]
async fn should_surface_gateway_outage() {
    let usecase = checkout(
        MockGateway::new(GatewayOutcome::Unavailable),
        MockOrderRepo::empty(),
        MockPaymentAttemptRepo::empty(),
    );
    let result = usecase
        .execute(Uuid::now_v7(), input(two_item_cart(), None))
        .await;
    assert!(matches!(result, Err(ApiError::Gateway(_))));
}

#[tokio::test]
async fn should_keep_reservation_when_order_cannot_be_recorded() {
    let buyer = Uuid::now_v7();
    let attempts = MockPaymentAttemptRepo::empty();
    let gateway = MockGateway::approving();
    let usecase = checkout(gateway.clone(), MockOrderRepo::failing(), attempts.clone());

    let result = usecase
        .execute(buyer, input(two_item_cart(), Some("key-1")))
        .await;
    assert!(matches!(result, Err(ApiError::Internal(_))));
    assert_eq!(attempts.get(buyer, "key-1"), Some(None));

    let retry = usecase
        .execute(buyer, input(two_item_cart(), Some("key-1")))
        .await;
    assert!(matches!(retry, Err(ApiError::PaymentInProgress)));
    assert_eq!(gateway.charged().len(), 1);
}

#[tokio::test]
async fn should_keep_key_reserved_when_charge_outcome_is_unknown() {
    let buyer = Uuid::now_v7();
    let gateway = MockGateway::timing_out_once();
    let attempts = MockPaymentAttemptRepo::empty();
    let orders = MockOrderRepo::empty();
    let usecase = checkout(gateway.clone(), orders.clone(), attempts.clone());

    let first = usecase
        .execute(buyer, input(two_item_cart(), Some("key-1")))
        .await;
    assert!(matches!(first, Err(ApiError::Gateway(_))));
    assert_eq!(attempts.get(buyer, "key-1"), Some(None));

    let retry = usecase
        .execute(buyer, input(two_item_cart(), Some("key-1")))
        .await;
    assert!(matches!(retry, Err(ApiError::PaymentInProgress)));
    assert_eq!(gateway.charged().len(), 1);
    assert_eq!(orders.count(), 0);
}

#[tokio::test]
async fn should_allow_retry_without_key_after_gateway_outage() {
    let buyer = Uuid::now_v7();
    let gateway = MockGateway::timing_out_once();
    let usecase = checkout(
        gateway.clone(),
        MockOrderRepo::empty(),
        MockPaymentAttemptRepo::empty(),
    );

    let first = usecase.execute(buyer, input(two_item_cart(), None)).await;
    assert!(matches!(first, Err(ApiError::Gateway(_))));
    assert!(usecase.execute(buyer, input(two_item_cart(), None)).await.is_ok());
    assert_eq!(gateway.charged().len(), 2);
}

#[tokio::test]
async fn should_return_order_when_attempt_cannot_be_completed() {
    let buyer = Uuid::now_v7();
    let gateway = MockGateway::approving();
    let orders = MockOrderRepo::empty();
    let attempts = MockPaymentAttemptRepo::failing_complete();
    let usecase = checkout(gateway.clone(), orders.clone(), attempts.clone());

    let order_id = usecase
        .execute(buyer, input(two_item_cart(), Some("key-1")))
        .await
        .unwrap();

    assert_eq!(orders.orders.lock().unwrap()[0].id, order_id);
    assert_eq!(gateway.charged().len(), 1);
    assert_eq!(attempts.get(buyer, "key-1"), Some(None));
}
