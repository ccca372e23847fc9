use uuid::Uuid;

use storefront_api::error::ApiError;
use storefront_api::usecase::order::{ListAllOrdersUseCase, UpdateOrderStatusUseCase};
use storefront_domain::order::OrderStatus;

use crate::helpers::{MockOrderRepo, test_order, test_user};

#[tokio::test]
async fn should_reject_invalid_status_before_looking_up_order() {
    let usecase = UpdateOrderStatusUseCase {
        repo: MockOrderRepo::empty(),
    };
    let err = usecase
        .execute(Uuid::now_v7(), "Refunded")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(err.to_string(), "Invalid order status");
}

#[tokio::test]
async fn should_return_not_found_for_unknown_order() {
    let usecase = UpdateOrderStatusUseCase {
        repo: MockOrderRepo::empty(),
    };
    let result = usecase.execute(Uuid::now_v7(), "Shipped").await;
    assert!(matches!(result, Err(ApiError::OrderNotFound)));
}

#[tokio::test]
async fn should_update_order_status() {
    let buyer = test_user("ada@example.com");
    let order = test_order(buyer.id, vec![Uuid::now_v7()]);
    let repo = MockOrderRepo::new(vec![buyer], vec![order.clone()]);
    let usecase = UpdateOrderStatusUseCase { repo: repo.clone() };

    let updated = usecase.execute(order.id, "Shipped").await.unwrap();
    assert_eq!(updated.status, OrderStatus::Shipped);
    assert_eq!(updated.product_ids, order.product_ids);
    assert_eq!(
        repo.orders.lock().unwrap()[0].status,
        OrderStatus::Shipped
    );
}

#[tokio::test]
async fn should_list_every_order_newest_first() {
    let a = test_user("a@example.com");
    let b = test_user("b@example.com");
    let mut older = test_order(a.id, vec![]);
    older.created_at -= chrono::Duration::hours(1);
    let newer = test_order(b.id, vec![]);
    let usecase = ListAllOrdersUseCase {
        repo: MockOrderRepo::new(vec![a, b], vec![older.clone(), newer.clone()]),
    };

    let all = usecase.execute().await.unwrap();
    let ids: Vec<Uuid> = all.iter().map(|view| view.order.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}
