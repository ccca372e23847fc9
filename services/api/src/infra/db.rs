use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, FromQueryResult, IntoActiveModel as _,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, SqlErr, Statement,
    TransactionTrait,
    sea_query::{Expr, LikeExpr, OnConflict, extension::postgres::PgExpr},
};
use uuid::Uuid;

use storefront_api_schema::{
    carts, categories, order_products, orders, payment_attempts, product_photos, products, users,
};
use storefront_domain::cart::Cart;
use storefront_domain::order::OrderStatus;
use storefront_domain::pagination::PageRequest;
use storefront_domain::user::UserRole;

use crate::domain::repository::{
    CartRepository, CategoryRepository, OrderRepository, PaymentAttemptRepository,
    ProductQueryRepository, ProductRepository, UserRepository,
};
use crate::domain::types::{
    CatalogProduct, Category, Order, OrderView, Product, ProductFilter, ProductPhoto,
    ProfileChanges, Reservation, User,
};
use crate::error::ApiError;

/// Map a constraint violation to a domain error, anything else to `Internal`.
fn constraint_error(e: DbErr, on_violation: ApiError, context: &'static str) -> ApiError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_) | SqlErr::ForeignKeyConstraintViolation(_)) => {
            on_violation
        }
        _ => ApiError::Internal(anyhow::Error::new(e).context(context)),
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email_and_answer(
        &self,
        email: &str,
        answer: &str,
    ) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .filter(users::Column::Answer.eq(answer))
            .one(&self.db)
            .await
            .context("find user by email and answer")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password: Set(user.password.clone()),
            phone: Set(user.phone.clone()),
            address: Set(user.address.clone()),
            answer: Set(user.answer.clone()),
            role: Set(user.role.as_u8() as i16),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| constraint_error(e, ApiError::EmailAlreadyRegistered, "create user"))?;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Option<User>, ApiError> {
        let Some(model) = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user for profile update")?
        else {
            return Ok(None);
        };
        let mut am = model.into_active_model();
        if let Some(name) = changes.name {
            am.name = Set(name);
        }
        if let Some(password) = changes.password {
            am.password = Set(password);
        }
        if let Some(phone) = changes.phone {
            am.phone = Set(phone);
        }
        if let Some(address) = changes.address {
            am.address = Set(address);
        }
        am.updated_at = Set(Utc::now());
        let model = am.update(&self.db).await.context("update user profile")?;
        Ok(Some(user_from_model(model)))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(id),
            password: Set(password_hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user password")?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, ApiError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password: model.password,
        phone: model.phone,
        address: model.address,
        answer: model.answer,
        role: u8::try_from(model.role)
            .ok()
            .and_then(UserRole::from_u8)
            .unwrap_or_default(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Category repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCategoryRepository {
    pub db: DatabaseConnection,
}

impl CategoryRepository for DbCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, ApiError> {
        let model = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find category by id")?;
        Ok(model.map(category_from_model))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, ApiError> {
        // Distinct names can share a slug; v7 ids make the oldest one win.
        let model = categories::Entity::find()
            .filter(categories::Column::Slug.eq(slug))
            .order_by_asc(categories::Column::Id)
            .one(&self.db)
            .await
            .context("find category by slug")?;
        Ok(model.map(category_from_model))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, ApiError> {
        let model = categories::Entity::find()
            .filter(categories::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find category by name")?;
        Ok(model.map(category_from_model))
    }

    async fn list(&self) -> Result<Vec<Category>, ApiError> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
            .context("list categories")?;
        Ok(models.into_iter().map(category_from_model).collect())
    }

    async fn create(&self, category: &Category) -> Result<(), ApiError> {
        categories::ActiveModel {
            id: Set(category.id),
            name: Set(category.name.clone()),
            slug: Set(category.slug.clone()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| constraint_error(e, ApiError::CategoryAlreadyExists, "create category"))?;
        Ok(())
    }

    async fn update(&self, category: &Category) -> Result<(), ApiError> {
        categories::ActiveModel {
            id: Set(category.id),
            name: Set(category.name.clone()),
            slug: Set(category.slug.clone()),
        }
        .update(&self.db)
        .await
        .map_err(|e| constraint_error(e, ApiError::CategoryAlreadyExists, "update category"))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = categories::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| constraint_error(e, ApiError::CategoryInUse, "delete category"))?;
        Ok(result.rows_affected > 0)
    }
}

fn category_from_model(model: categories::Model) -> Category {
    Category {
        id: model.id,
        name: model.name,
        slug: model.slug,
    }
}

// ── Catalog queries ──────────────────────────────────────────────────────────

/// Escape LIKE metacharacters and wrap the keyword for a substring match.
pub(crate) fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub(crate) fn filter_query(filter: &ProductFilter) -> Select<products::Entity> {
    let mut query = products::Entity::find();
    if !filter.categories.is_empty() {
        query = query.filter(products::Column::CategoryId.is_in(filter.categories.iter().copied()));
    }
    if let Some(range) = filter.price {
        query = query.filter(products::Column::Price.between(range.min, range.max));
    }
    query.order_by_desc(products::Column::CreatedAt)
}

pub(crate) fn page_query(page: PageRequest) -> Select<products::Entity> {
    products::Entity::find()
        .order_by_desc(products::Column::CreatedAt)
        .offset(page.offset())
        .limit(page.limit())
}

pub(crate) fn latest_query(limit: u64) -> Select<products::Entity> {
    products::Entity::find()
        .order_by_desc(products::Column::CreatedAt)
        .limit(limit)
}

pub(crate) fn search_query(keyword: &str) -> Select<products::Entity> {
    let pattern = like_pattern(keyword);
    products::Entity::find()
        .filter(
            Condition::any()
                .add(
                    Expr::col((products::Entity, products::Column::Name))
                        .ilike(LikeExpr::new(pattern.clone()).escape('\\')),
                )
                .add(
                    Expr::col((products::Entity, products::Column::Description))
                        .ilike(LikeExpr::new(pattern).escape('\\')),
                ),
        )
        .order_by_desc(products::Column::CreatedAt)
}

pub(crate) fn related_query(
    product_id: Uuid,
    category_id: Uuid,
    limit: u64,
) -> Select<products::Entity> {
    products::Entity::find()
        .filter(products::Column::CategoryId.eq(category_id))
        .filter(products::Column::Id.ne(product_id))
        .order_by_desc(products::Column::CreatedAt)
        .limit(limit)
}

pub(crate) fn in_category_query(category_id: Uuid) -> Select<products::Entity> {
    products::Entity::find()
        .filter(products::Column::CategoryId.eq(category_id))
        .order_by_desc(products::Column::CreatedAt)
}

const ESTIMATED_PRODUCT_COUNT_SQL: &str =
    "SELECT reltuples::bigint AS estimate FROM pg_class WHERE oid = 'products'::regclass";

// ── Product repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProductRepository {
    pub db: DatabaseConnection,
}

impl DbProductRepository {
    async fn load_catalog(
        &self,
        query: Select<products::Entity>,
        context: &'static str,
    ) -> Result<Vec<CatalogProduct>, ApiError> {
        let rows = query
            .find_also_related(categories::Entity)
            .all(&self.db)
            .await
            .context(context)?;
        rows.into_iter()
            .map(|(product, category)| catalog_from_models(product, category))
            .collect()
    }
}

impl ProductQueryRepository for DbProductRepository {
    async fn filter(&self, filter: &ProductFilter) -> Result<Vec<CatalogProduct>, ApiError> {
        self.load_catalog(filter_query(filter), "filter products")
            .await
    }

    async fn page(&self, page: PageRequest) -> Result<Vec<CatalogProduct>, ApiError> {
        self.load_catalog(page_query(page), "list product page")
            .await
    }

    async fn latest(&self, limit: u64) -> Result<Vec<CatalogProduct>, ApiError> {
        self.load_catalog(latest_query(limit), "list latest products")
            .await
    }

    async fn search(&self, keyword: &str) -> Result<Vec<CatalogProduct>, ApiError> {
        self.load_catalog(search_query(keyword), "search products")
            .await
    }

    async fn related(
        &self,
        product_id: Uuid,
        category_id: Uuid,
        limit: u64,
    ) -> Result<Vec<CatalogProduct>, ApiError> {
        self.load_catalog(
            related_query(product_id, category_id, limit),
            "list related products",
        )
        .await
    }

    async fn in_category(&self, category_id: Uuid) -> Result<Vec<CatalogProduct>, ApiError> {
        self.load_catalog(in_category_query(category_id), "list products in category")
            .await
    }

    async fn estimated_count(&self) -> Result<u64, ApiError> {
        #[derive(Debug, FromQueryResult)]
        struct Estimate {
            estimate: i64,
        }

        let estimate = Estimate::find_by_statement(Statement::from_string(
            self.db.get_database_backend(),
            ESTIMATED_PRODUCT_COUNT_SQL,
        ))
        .one(&self.db)
        .await
        .context("estimate product count")?;

        // reltuples is -1 (or 0 on older servers) until the table is analysed.
        match estimate {
            Some(Estimate { estimate }) if estimate > 0 => Ok(estimate as u64),
            _ => {
                let exact = products::Entity::find()
                    .count(&self.db)
                    .await
                    .context("count products")?;
                Ok(exact)
            }
        }
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CatalogProduct>, ApiError> {
        let row = products::Entity::find()
            .filter(products::Column::Slug.eq(slug))
            .order_by_asc(products::Column::CreatedAt)
            .find_also_related(categories::Entity)
            .one(&self.db)
            .await
            .context("find product by slug")?;
        row.map(|(product, category)| catalog_from_models(product, category))
            .transpose()
    }

    async fn photo(&self, product_id: Uuid) -> Result<Option<ProductPhoto>, ApiError> {
        let model = product_photos::Entity::find_by_id(product_id)
            .one(&self.db)
            .await
            .context("find product photo")?;
        Ok(model.map(|m| ProductPhoto {
            data: m.data,
            content_type: m.content_type,
        }))
    }
}

impl ProductRepository for DbProductRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ApiError> {
        let model = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find product by id")?;
        Ok(model.map(product_from_model))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ApiError> {
        let model = products::Entity::find()
            .filter(products::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find product by name")?;
        Ok(model.map(product_from_model))
    }

    async fn create(
        &self,
        product: &Product,
        photo: Option<&ProductPhoto>,
    ) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let product = product.clone();
                let photo = photo.cloned();
                Box::pin(async move {
                    product_active_model(&product).insert(txn).await?;
                    if let Some(photo) = photo {
                        upsert_photo(txn, product.id, photo).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create product")?;
        Ok(())
    }

    async fn update(
        &self,
        product: &Product,
        photo: Option<&ProductPhoto>,
    ) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let product = product.clone();
                let photo = photo.cloned();
                Box::pin(async move {
                    product_active_model(&product).update(txn).await?;
                    if let Some(photo) = photo {
                        upsert_photo(txn, product.id, photo).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("update product")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        // The photo row goes with it via ON DELETE CASCADE.
        let result = products::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete product")?;
        Ok(result.rows_affected > 0)
    }
}

fn product_active_model(product: &Product) -> products::ActiveModel {
    products::ActiveModel {
        id: Set(product.id),
        name: Set(product.name.clone()),
        slug: Set(product.slug.clone()),
        description: Set(product.description.clone()),
        price: Set(product.price),
        category_id: Set(product.category_id),
        quantity: Set(product.quantity),
        shipping: Set(product.shipping),
        created_at: Set(product.created_at),
        updated_at: Set(product.updated_at),
    }
}

async fn upsert_photo<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    photo: ProductPhoto,
) -> Result<(), DbErr> {
    product_photos::Entity::insert(product_photos::ActiveModel {
        product_id: Set(product_id),
        data: Set(photo.data),
        content_type: Set(photo.content_type),
    })
    .on_conflict(
        OnConflict::column(product_photos::Column::ProductId)
            .update_columns([
                product_photos::Column::Data,
                product_photos::Column::ContentType,
            ])
            .to_owned(),
    )
    .exec_without_returning(conn)
    .await?;
    Ok(())
}

fn product_from_model(model: products::Model) -> Product {
    Product {
        id: model.id,
        name: model.name,
        slug: model.slug,
        description: model.description,
        price: model.price,
        category_id: model.category_id,
        quantity: model.quantity,
        shipping: model.shipping,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn catalog_from_models(
    product: products::Model,
    category: Option<categories::Model>,
) -> Result<CatalogProduct, ApiError> {
    let category = category
        .with_context(|| format!("product {} has no category", product.id))?;
    Ok(CatalogProduct {
        product: product_from_model(product),
        category: category_from_model(category),
    })
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

impl DbOrderRepository {
    /// Product ids per order, in line position order.
    async fn product_lines(
        &self,
        order_ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, Vec<Uuid>>, ApiError> {
        let lines = order_products::Entity::find()
            .filter(order_products::Column::OrderId.is_in(order_ids))
            .order_by_asc(order_products::Column::OrderId)
            .order_by_asc(order_products::Column::Position)
            .all(&self.db)
            .await
            .context("list order products")?;
        let mut by_order: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for line in lines {
            by_order
                .entry(line.order_id)
                .or_default()
                .push(line.product_id);
        }
        Ok(by_order)
    }

    async fn views(
        &self,
        rows: Vec<(orders::Model, Option<users::Model>)>,
    ) -> Result<Vec<OrderView>, ApiError> {
        if rows.is_empty() {
            return Ok(vec![]);
        }
        let mut lines = self
            .product_lines(rows.iter().map(|(order, _)| order.id).collect())
            .await?;

        let mut product_ids: Vec<Uuid> = lines.values().flatten().copied().collect();
        product_ids.sort_unstable();
        product_ids.dedup();
        let catalog: HashMap<Uuid, Product> = products::Entity::find()
            .filter(products::Column::Id.is_in(product_ids))
            .all(&self.db)
            .await
            .context("load ordered products")?
            .into_iter()
            .map(|model| (model.id, product_from_model(model)))
            .collect();

        rows.into_iter()
            .map(|(order, buyer)| {
                let product_ids = lines.remove(&order.id).unwrap_or_default();
                let ordered = product_ids
                    .iter()
                    .filter_map(|id| catalog.get(id).cloned())
                    .collect();
                Ok(OrderView {
                    order: order_from_model(order, product_ids)?,
                    buyer_name: buyer.map(|u| u.name).unwrap_or_default(),
                    products: ordered,
                })
            })
            .collect()
    }
}

impl OrderRepository for DbOrderRepository {
    async fn create(&self, order: &Order) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let order = order.clone();
                Box::pin(async move {
                    orders::ActiveModel {
                        id: Set(order.id),
                        buyer_id: Set(order.buyer_id),
                        payment: Set(order.payment.clone()),
                        status: Set(order.status.as_str().to_owned()),
                        created_at: Set(order.created_at),
                        updated_at: Set(order.updated_at),
                    }
                    .insert(txn)
                    .await?;

                    let lines: Vec<order_products::ActiveModel> = order
                        .product_ids
                        .iter()
                        .zip(0i32..)
                        .map(|(product_id, position)| order_products::ActiveModel {
                            order_id: Set(order.id),
                            position: Set(position),
                            product_id: Set(*product_id),
                        })
                        .collect();
                    if !lines.is_empty() {
                        order_products::Entity::insert_many(lines)
                            .exec_without_returning(txn)
                            .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create order")?;
        Ok(())
    }

    async fn list_by_buyer(&self, buyer_id: Uuid) -> Result<Vec<OrderView>, ApiError> {
        let rows = orders::Entity::find()
            .filter(orders::Column::BuyerId.eq(buyer_id))
            .order_by_desc(orders::Column::CreatedAt)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await
            .context("list orders by buyer")?;
        self.views(rows).await
    }

    async fn list_all(&self) -> Result<Vec<OrderView>, ApiError> {
        let rows = orders::Entity::find()
            .order_by_desc(orders::Column::CreatedAt)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await
            .context("list all orders")?;
        self.views(rows).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, ApiError> {
        let Some(model) = orders::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find order for status update")?
        else {
            return Ok(None);
        };
        let mut am = model.into_active_model();
        am.status = Set(status.as_str().to_owned());
        am.updated_at = Set(Utc::now());
        let model = am.update(&self.db).await.context("update order status")?;

        let product_ids = self
            .product_lines(vec![id])
            .await?
            .remove(&id)
            .unwrap_or_default();
        order_from_model(model, product_ids).map(Some)
    }
}

fn order_from_model(model: orders::Model, product_ids: Vec<Uuid>) -> Result<Order, ApiError> {
    let status = model
        .status
        .parse::<OrderStatus>()
        .with_context(|| format!("order {} has an unknown status", model.id))?;
    Ok(Order {
        id: model.id,
        buyer_id: model.buyer_id,
        product_ids,
        payment: model.payment,
        status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Payment attempt repository ───────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPaymentAttemptRepository {
    pub db: DatabaseConnection,
}

impl PaymentAttemptRepository for DbPaymentAttemptRepository {
    async fn reserve(&self, buyer_id: Uuid, key: &str) -> Result<Reservation, ApiError> {
        let inserted = payment_attempts::Entity::insert(payment_attempts::ActiveModel {
            buyer_id: Set(buyer_id),
            idempotency_key: Set(key.to_owned()),
            order_id: Set(None),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([
                payment_attempts::Column::BuyerId,
                payment_attempts::Column::IdempotencyKey,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("reserve payment attempt")?;
        if inserted > 0 {
            return Ok(Reservation::Reserved);
        }

        let existing = payment_attempts::Entity::find_by_id((buyer_id, key.to_owned()))
            .one(&self.db)
            .await
            .context("find payment attempt")?;
        Ok(match existing.and_then(|attempt| attempt.order_id) {
            Some(order_id) => Reservation::Completed(order_id),
            None => Reservation::InProgress,
        })
    }

    async fn complete(&self, buyer_id: Uuid, key: &str, order_id: Uuid) -> Result<(), ApiError> {
        payment_attempts::Entity::update_many()
            .col_expr(payment_attempts::Column::OrderId, Expr::value(order_id))
            .filter(payment_attempts::Column::BuyerId.eq(buyer_id))
            .filter(payment_attempts::Column::IdempotencyKey.eq(key))
            .exec(&self.db)
            .await
            .context("complete payment attempt")?;
        Ok(())
    }

    async fn release(&self, buyer_id: Uuid, key: &str) -> Result<(), ApiError> {
        payment_attempts::Entity::delete_many()
            .filter(payment_attempts::Column::BuyerId.eq(buyer_id))
            .filter(payment_attempts::Column::IdempotencyKey.eq(key))
            .filter(payment_attempts::Column::OrderId.is_null())
            .exec(&self.db)
            .await
            .context("release payment attempt")?;
        Ok(())
    }
}

// ── Cart repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCartRepository {
    pub db: DatabaseConnection,
}

impl CartRepository for DbCartRepository {
    async fn load(&self, user_id: Uuid) -> Result<Cart, ApiError> {
        let model = carts::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .context("find cart")?;
        match model {
            Some(model) => Ok(serde_json::from_value(model.items).context("decode stored cart")?),
            None => Ok(Cart::default()),
        }
    }

    async fn save(&self, user_id: Uuid, cart: &Cart) -> Result<(), ApiError> {
        let items = serde_json::to_value(cart).context("encode cart")?;
        carts::Entity::insert(carts::ActiveModel {
            user_id: Set(user_id),
            items: Set(items),
            updated_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(carts::Column::UserId)
                .update_columns([carts::Column::Items, carts::Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("save cart")?;
        Ok(())
    }

    async fn clear(&self, user_id: Uuid) -> Result<(), ApiError> {
        carts::Entity::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .context("clear cart")?;
        Ok(())
    }
}
