#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use storefront_api::domain::repository::{
    CartRepository, CategoryRepository, OrderRepository, PaymentAttemptRepository,
    PaymentGateway, ProductQueryRepository, ProductRepository, UserRepository,
};
use storefront_api::domain::types::{
    CatalogProduct, Category, ChargeResult, Order, OrderView, Product, ProductFilter,
    ProductPhoto, ProfileChanges, Reservation, User,
};
use storefront_api::error::ApiError;
use storefront_auth_types::password::hash_password;
use storefront_domain::cart::{Cart, CartItem};
use storefront_domain::order::OrderStatus;
use storefront_domain::pagination::PageRequest;
use storefront_domain::slug::slugify;
use storefront_domain::user::UserRole;

pub use storefront_testing::auth::TEST_JWT_SECRET;

pub const TEST_PASSWORD: &str = "hunter22";

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(email: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        name: "Test User".to_owned(),
        email: email.to_owned(),
        password: hash_password(TEST_PASSWORD).unwrap(),
        phone: "010-0000-0000".to_owned(),
        address: "1 Test Street".to_owned(),
        answer: "blue".to_owned(),
        role: UserRole::Customer,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_admin() -> User {
    User {
        role: UserRole::Admin,
        ..test_user("admin@example.com")
    }
}

pub fn test_category(name: &str) -> Category {
    Category {
        id: Uuid::now_v7(),
        name: name.to_owned(),
        slug: slugify(name),
    }
}

/// A product created `age_minutes` ago.
pub fn test_product(name: &str, price: Decimal, category: &Category, age_minutes: i64) -> Product {
    let at = Utc::now() - Duration::minutes(age_minutes);
    Product {
        id: Uuid::now_v7(),
        name: name.to_owned(),
        slug: slugify(name),
        description: format!("{name} description"),
        price,
        category_id: category.id,
        quantity: 5,
        shipping: true,
        created_at: at,
        updated_at: at,
    }
}

pub fn cart_item(name: &str, price: Decimal) -> CartItem {
    CartItem {
        product_id: Uuid::now_v7(),
        name: name.to_owned(),
        price,
        slug: slugify(name),
        quantity: 1,
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_email_and_answer(
        &self,
        email: &str,
        answer: &str,
    ) -> Result<Option<User>, ApiError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.email == email && u.answer == answer)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Option<User>, ApiError> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(password) = changes.password {
            user.password = password;
        }
        if let Some(phone) = changes.phone {
            user.phone = phone;
        }
        if let Some(address) = changes.address {
            user.address = address;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.password = password_hash.to_owned();
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.users.lock().unwrap().clone())
    }
}

// ── MockCategoryRepo ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockCategoryRepo {
    pub categories: Arc<Mutex<Vec<Category>>>,
}

impl MockCategoryRepo {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: Arc::new(Mutex::new(categories)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl CategoryRepository for MockCategoryRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, ApiError> {
        let categories = self.categories.lock().unwrap();
        Ok(categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, ApiError> {
        let categories = self.categories.lock().unwrap();
        Ok(categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, ApiError> {
        let categories = self.categories.lock().unwrap();
        Ok(categories.iter().find(|c| c.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn create(&self, category: &Category) -> Result<(), ApiError> {
        self.categories.lock().unwrap().push(category.clone());
        Ok(())
    }

    async fn update(&self, category: &Category) -> Result<(), ApiError> {
        let mut categories = self.categories.lock().unwrap();
        if let Some(c) = categories.iter_mut().find(|c| c.id == category.id) {
            *c = category.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.id != id);
        Ok(categories.len() < before)
    }
}

// ── MockProductRepo ──────────────────────────────────────────────────────────

/// In-memory catalog implementing both the read and the write side.
#[derive(Clone)]
pub struct MockProductRepo {
    pub products: Arc<Mutex<Vec<Product>>>,
    pub photos: Arc<Mutex<HashMap<Uuid, ProductPhoto>>>,
    pub categories: Vec<Category>,
}

impl MockProductRepo {
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(Mutex::new(products)),
            photos: Arc::new(Mutex::new(HashMap::new())),
            categories,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![], vec![])
    }

    fn populate(&self, products: Vec<Product>) -> Vec<CatalogProduct> {
        products
            .into_iter()
            .filter_map(|product| {
                let category = self
                    .categories
                    .iter()
                    .find(|c| c.id == product.category_id)?
                    .clone();
                Some(CatalogProduct { product, category })
            })
            .collect()
    }

    fn newest_first(&self) -> Vec<Product> {
        let mut products = self.products.lock().unwrap().clone();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        products
    }
}

impl ProductQueryRepository for MockProductRepo {
    async fn filter(&self, filter: &ProductFilter) -> Result<Vec<CatalogProduct>, ApiError> {
        let matched = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| filter.categories.is_empty() || filter.categories.contains(&p.category_id))
            .filter(|p| {
                filter
                    .price
                    .as_ref()
                    .is_none_or(|range| range.min <= p.price && p.price <= range.max)
            })
            .cloned()
            .collect();
        Ok(self.populate(matched))
    }

    async fn page(&self, page: PageRequest) -> Result<Vec<CatalogProduct>, ApiError> {
        let products = self
            .newest_first()
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(self.populate(products))
    }

    async fn latest(&self, limit: u64) -> Result<Vec<CatalogProduct>, ApiError> {
        let products = self.newest_first().into_iter().take(limit as usize).collect();
        Ok(self.populate(products))
    }

    async fn search(&self, keyword: &str) -> Result<Vec<CatalogProduct>, ApiError> {
        let needle = keyword.to_lowercase();
        let matched = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        Ok(self.populate(matched))
    }

    async fn related(
        &self,
        product_id: Uuid,
        category_id: Uuid,
        limit: u64,
    ) -> Result<Vec<CatalogProduct>, ApiError> {
        let matched = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.category_id == category_id && p.id != product_id)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(self.populate(matched))
    }

    async fn in_category(&self, category_id: Uuid) -> Result<Vec<CatalogProduct>, ApiError> {
        let matched = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect();
        Ok(self.populate(matched))
    }

    async fn estimated_count(&self) -> Result<u64, ApiError> {
        Ok(self.products.lock().unwrap().len() as u64)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CatalogProduct>, ApiError> {
        let found: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.slug == slug)
            .take(1)
            .cloned()
            .collect();
        Ok(self.populate(found).into_iter().next())
    }

    async fn photo(&self, product_id: Uuid) -> Result<Option<ProductPhoto>, ApiError> {
        Ok(self.photos.lock().unwrap().get(&product_id).cloned())
    }
}

impl ProductRepository for MockProductRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ApiError> {
        let products = self.products.lock().unwrap();
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ApiError> {
        let products = self.products.lock().unwrap();
        Ok(products.iter().find(|p| p.name == name).cloned())
    }

    async fn create(
        &self,
        product: &Product,
        photo: Option<&ProductPhoto>,
    ) -> Result<(), ApiError> {
        self.products.lock().unwrap().push(product.clone());
        if let Some(photo) = photo {
            self.photos
                .lock()
                .unwrap()
                .insert(product.id, photo.clone());
        }
        Ok(())
    }

    async fn update(
        &self,
        product: &Product,
        photo: Option<&ProductPhoto>,
    ) -> Result<(), ApiError> {
        let mut products = self.products.lock().unwrap();
        if let Some(p) = products.iter_mut().find(|p| p.id == product.id) {
            *p = product.clone();
        }
        if let Some(photo) = photo {
            self.photos
                .lock()
                .unwrap()
                .insert(product.id, photo.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        self.photos.lock().unwrap().remove(&id);
        Ok(products.len() < before)
    }
}

// ── MockOrderRepo ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockOrderRepo {
    pub orders: Arc<Mutex<Vec<Order>>>,
    pub users: Vec<User>,
    pub fail_create: bool,
}

impl MockOrderRepo {
    pub fn new(users: Vec<User>, orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(Mutex::new(orders)),
            users,
            fail_create: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![], vec![])
    }

    /// Every `create` fails as if the database went away mid-checkout.
    pub fn failing() -> Self {
        Self {
            fail_create: true,
            ..Self::empty()
        }
    }

    pub fn count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    fn views(&self, mut orders: Vec<Order>) -> Vec<OrderView> {
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
            .into_iter()
            .map(|order| OrderView {
                buyer_name: self
                    .users
                    .iter()
                    .find(|u| u.id == order.buyer_id)
                    .map(|u| u.name.clone())
                    .unwrap_or_default(),
                products: vec![],
                order,
            })
            .collect()
    }
}

impl OrderRepository for MockOrderRepo {
    async fn create(&self, order: &Order) -> Result<(), ApiError> {
        if self.fail_create {
            return Err(anyhow::anyhow!("connection reset").into());
        }
        self.orders.lock().unwrap().push(order.clone());
        Ok(())
    }

    async fn list_by_buyer(&self, buyer_id: Uuid) -> Result<Vec<OrderView>, ApiError> {
        let orders = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.buyer_id == buyer_id)
            .cloned()
            .collect();
        Ok(self.views(orders))
    }

    async fn list_all(&self) -> Result<Vec<OrderView>, ApiError> {
        let orders = self.orders.lock().unwrap().clone();
        Ok(self.views(orders))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, ApiError> {
        let mut orders = self.orders.lock().unwrap();
        let Some(order) = orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        order.status = status;
        order.updated_at = Utc::now();
        Ok(Some(order.clone()))
    }
}

pub fn test_order(buyer_id: Uuid, product_ids: Vec<Uuid>) -> Order {
    let now = Utc::now();
    Order {
        id: Uuid::now_v7(),
        buyer_id,
        product_ids,
        payment: json!({ "id": "tx_test", "status": "SUBMITTED_FOR_SETTLEMENT" }),
        status: OrderStatus::NotProcessed,
        created_at: now,
        updated_at: now,
    }
}

// ── MockPaymentAttemptRepo ───────────────────────────────────────────────────

/// `(buyer, key) -> order` where `None` marks an attempt still in flight.
#[derive(Clone, Default)]
pub struct MockPaymentAttemptRepo {
    pub attempts: Arc<Mutex<HashMap<(Uuid, String), Option<Uuid>>>>,
    pub fail_complete: bool,
}

impl MockPaymentAttemptRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reserves and releases normally but cannot mark an attempt completed.
    pub fn failing_complete() -> Self {
        Self {
            fail_complete: true,
            ..Self::default()
        }
    }

    pub fn with_attempt(buyer_id: Uuid, key: &str, order_id: Option<Uuid>) -> Self {
        let repo = Self::default();
        repo.attempts
            .lock()
            .unwrap()
            .insert((buyer_id, key.to_owned()), order_id);
        repo
    }

    pub fn get(&self, buyer_id: Uuid, key: &str) -> Option<Option<Uuid>> {
        self.attempts
            .lock()
            .unwrap()
            .get(&(buyer_id, key.to_owned()))
            .copied()
    }
}

impl PaymentAttemptRepository for MockPaymentAttemptRepo {
    async fn reserve(&self, buyer_id: Uuid, key: &str) -> Result<Reservation, ApiError> {
        let mut attempts = self.attempts.lock().unwrap();
        match attempts.get(&(buyer_id, key.to_owned())) {
            Some(Some(order_id)) => Ok(Reservation::Completed(*order_id)),
            Some(None) => Ok(Reservation::InProgress),
            None => {
                attempts.insert((buyer_id, key.to_owned()), None);
                Ok(Reservation::Reserved)
            }
        }
    }

    async fn complete(&self, buyer_id: Uuid, key: &str, order_id: Uuid) -> Result<(), ApiError> {
        if self.fail_complete {
            return Err(ApiError::Internal(anyhow::anyhow!("connection closed")));
        }
        self.attempts
            .lock()
            .unwrap()
            .insert((buyer_id, key.to_owned()), Some(order_id));
        Ok(())
    }

    async fn release(&self, buyer_id: Uuid, key: &str) -> Result<(), ApiError> {
        let mut attempts = self.attempts.lock().unwrap();
        if let Some(None) = attempts.get(&(buyer_id, key.to_owned())) {
            attempts.remove(&(buyer_id, key.to_owned()));
        }
        Ok(())
    }
}

// ── MockCartRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCartRepo {
    pub carts: Arc<Mutex<HashMap<Uuid, Cart>>>,
}

impl MockCartRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_cart(user_id: Uuid, cart: Cart) -> Self {
        let repo = Self::default();
        repo.carts.lock().unwrap().insert(user_id, cart);
        repo
    }

    pub fn stored(&self, user_id: Uuid) -> Option<Cart> {
        self.carts.lock().unwrap().get(&user_id).cloned()
    }
}

impl CartRepository for MockCartRepo {
    async fn load(&self, user_id: Uuid) -> Result<Cart, ApiError> {
        Ok(self.stored(user_id).unwrap_or_default())
    }

    async fn save(&self, user_id: Uuid, cart: &Cart) -> Result<(), ApiError> {
        self.carts.lock().unwrap().insert(user_id, cart.clone());
        Ok(())
    }

    async fn clear(&self, user_id: Uuid) -> Result<(), ApiError> {
        self.carts.lock().unwrap().remove(&user_id);
        Ok(())
    }
}

// ── MockGateway ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayOutcome {
    Approve,
    Decline,
    Unavailable,
}

#[derive(Clone)]
pub struct MockGateway {
    pub outcome: GatewayOutcome,
    /// Charges that time out before `outcome` applies.
    pub outages: Arc<Mutex<usize>>,
    /// Amount of every charge attempted, in call order.
    pub charges: Arc<Mutex<Vec<Decimal>>>,
}

impl MockGateway {
    pub fn new(outcome: GatewayOutcome) -> Self {
        Self {
            outcome,
            outages: Arc::new(Mutex::new(0)),
            charges: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Times out on the first charge, then approves.
    pub fn timing_out_once() -> Self {
        let gateway = Self::approving();
        *gateway.outages.lock().unwrap() = 1;
        gateway
    }

    pub fn approving() -> Self {
        Self::new(GatewayOutcome::Approve)
    }

    pub fn charged(&self) -> Vec<Decimal> {
        self.charges.lock().unwrap().clone()
    }
}

impl PaymentGateway for MockGateway {
    async fn client_token(&self) -> Result<String, ApiError> {
        match self.outcome {
            GatewayOutcome::Unavailable => Err(ApiError::Gateway(anyhow::anyhow!("timeout"))),
            _ => Ok("client-token-123".to_owned()),
        }
    }

    async fn charge(&self, _nonce: &str, amount: Decimal) -> Result<ChargeResult, ApiError> {
        self.charges.lock().unwrap().push(amount);
        {
            let mut outages = self.outages.lock().unwrap();
            if *outages > 0 {
                *outages -= 1;
                return Err(ApiError::Gateway(anyhow::anyhow!("operation timed out")));
            }
        }
        match self.outcome {
            GatewayOutcome::Approve => Ok(ChargeResult {
                transaction_id: "tx_1".to_owned(),
                status: "SUBMITTED_FOR_SETTLEMENT".to_owned(),
                amount,
                raw: json!({ "id": "tx_1", "status": "SUBMITTED_FOR_SETTLEMENT" }),
            }),
            GatewayOutcome::Decline => Err(ApiError::PaymentDeclined(
                "transaction tx_1 was processor declined".to_owned(),
            )),
            GatewayOutcome::Unavailable => Err(ApiError::Gateway(anyhow::anyhow!("timeout"))),
        }
    }
}
