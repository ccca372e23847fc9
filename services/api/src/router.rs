use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use storefront_core::health::{healthz, readyz};
use storefront_core::middleware::{cors_layer, propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{admin_auth, all_users, forgot_password, login, register, update_profile, user_auth},
    cart::{add_item, clear_cart, get_cart, remove_item},
    category::{
        create_category, delete_category, get_category, list_categories, update_category,
    },
    order::{all_orders, my_orders, update_order_status},
    payment::{checkout, client_token},
    product::{
        PRODUCT_FORM_LIMIT, create_product, delete_product, filter_products, get_product,
        latest_products, product_count, product_page, product_photo, products_by_category,
        related_products, search_products, update_product,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(cors_layer()),
        )
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/user-auth", get(user_auth))
        .route("/auth/admin-auth", get(admin_auth))
        .route("/auth/profile", put(update_profile))
        .route("/auth/all-users", get(all_users))
        // Orders
        .route("/auth/orders", get(my_orders))
        .route("/auth/all-orders", get(all_orders))
        .route("/auth/order-status/{order_id}", put(update_order_status))
        // Categories
        .route("/category/create-category", post(create_category))
        .route("/category/update-category/{id}", put(update_category))
        .route("/category/get-category", get(list_categories))
        .route("/category/single-category/{slug}", get(get_category))
        .route("/category/delete-category/{id}", delete(delete_category))
        // Product admin
        .route(
            "/product/create-product",
            post(create_product).layer(DefaultBodyLimit::max(PRODUCT_FORM_LIMIT)),
        )
        .route(
            "/product/update-product/{pid}",
            put(update_product).layer(DefaultBodyLimit::max(PRODUCT_FORM_LIMIT)),
        )
        .route("/product/delete-product/{pid}", delete(delete_product))
        // Catalog
        .route("/product/get-product", get(latest_products))
        .route("/product/get-product/{slug}", get(get_product))
        .route("/product/product-photo/{pid}", get(product_photo))
        .route("/product/product-filters", post(filter_products))
        .route("/product/product-count", get(product_count))
        .route("/product/product-list/{page}", get(product_page))
        .route("/product/search/{keyword}", get(search_products))
        .route("/product/related-product/{pid}/{cid}", get(related_products))
        .route("/product/product-category/{slug}", get(products_by_category))
        // Payment
        .route("/product/braintree/token", get(client_token))
        .route("/product/braintree/payment", post(checkout))
        // Cart
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/{index}", delete(remove_item))
}
