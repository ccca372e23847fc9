use std::str::FromStr;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use storefront_domain::pagination::{CATALOG_PAGE_SIZE, PageRequest};

use crate::domain::repository::{CategoryRepository, ProductQueryRepository, ProductRepository};
use crate::domain::types::{
    CatalogProduct, Category, LATEST_PRODUCTS_LIMIT, MAX_PHOTO_BYTES, Product, ProductFilter,
    ProductPhoto, RELATED_PRODUCTS_LIMIT,
};
use crate::error::ApiError;
use crate::usecase::{required, slug_for};

// ── Catalog queries ──────────────────────────────────────────────────────────

pub struct FilterProductsUseCase<Q: ProductQueryRepository> {
    pub repo: Q,
}

impl<Q: ProductQueryRepository> FilterProductsUseCase<Q> {
    pub async fn execute(
        &self,
        checked: Vec<Uuid>,
        radio: &[Decimal],
    ) -> Result<Vec<CatalogProduct>, ApiError> {
        let filter = ProductFilter::new(checked, radio)?;
        self.repo.filter(&filter).await
    }
}

pub struct ListProductPageUseCase<Q: ProductQueryRepository> {
    pub repo: Q,
}

impl<Q: ProductQueryRepository> ListProductPageUseCase<Q> {
    /// `raw_page` is the 1-based page number exactly as it appeared in the path.
    pub async fn execute(&self, raw_page: &str) -> Result<Vec<CatalogProduct>, ApiError> {
        let page = PageRequest::parse(raw_page, CATALOG_PAGE_SIZE)
            .map_err(|_| ApiError::validation("Invalid page param"))?;
        self.repo.page(page).await
    }
}

pub struct ListLatestProductsUseCase<Q: ProductQueryRepository> {
    pub repo: Q,
}

impl<Q: ProductQueryRepository> ListLatestProductsUseCase<Q> {
    pub async fn execute(&self) -> Result<Vec<CatalogProduct>, ApiError> {
        self.repo.latest(LATEST_PRODUCTS_LIMIT).await
    }
}

pub struct SearchProductsUseCase<Q: ProductQueryRepository> {
    pub repo: Q,
}

impl<Q: ProductQueryRepository> SearchProductsUseCase<Q> {
    pub async fn execute(&self, keyword: &str) -> Result<Vec<CatalogProduct>, ApiError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(ApiError::validation("keyword is required"));
        }
        self.repo.search(keyword).await
    }
}

pub struct RelatedProductsUseCase<Q: ProductQueryRepository> {
    pub repo: Q,
}

impl<Q: ProductQueryRepository> RelatedProductsUseCase<Q> {
    pub async fn execute(
        &self,
        product_id: Uuid,
        category_id: Uuid,
    ) -> Result<Vec<CatalogProduct>, ApiError> {
        self.repo
            .related(product_id, category_id, RELATED_PRODUCTS_LIMIT)
            .await
    }
}

pub struct ProductsByCategoryUseCase<C: CategoryRepository, Q: ProductQueryRepository> {
    pub categories: C,
    pub products: Q,
}

impl<C: CategoryRepository, Q: ProductQueryRepository> ProductsByCategoryUseCase<C, Q> {
    pub async fn execute(&self, slug: &str) -> Result<(Category, Vec<CatalogProduct>), ApiError> {
        let category = self
            .categories
            .find_by_slug(slug)
            .await?
            .ok_or(ApiError::CategoryNotFound)?;
        let products = self.products.in_category(category.id).await?;
        Ok((category, products))
    }
}

pub struct CountProductsUseCase<Q: ProductQueryRepository> {
    pub repo: Q,
}

impl<Q: ProductQueryRepository> CountProductsUseCase<Q> {
    pub async fn execute(&self) -> Result<u64, ApiError> {
        self.repo.estimated_count().await
    }
}

pub struct GetProductUseCase<Q: ProductQueryRepository> {
    pub repo: Q,
}

impl<Q: ProductQueryRepository> GetProductUseCase<Q> {
    pub async fn execute(&self, slug: &str) -> Result<CatalogProduct, ApiError> {
        self.repo
            .find_by_slug(slug)
            .await?
            .ok_or(ApiError::ProductNotFound)
    }
}

pub struct GetProductPhotoUseCase<Q: ProductQueryRepository> {
    pub repo: Q,
}

impl<Q: ProductQueryRepository> GetProductPhotoUseCase<Q> {
    pub async fn execute(&self, product_id: Uuid) -> Result<ProductPhoto, ApiError> {
        self.repo
            .photo(product_id)
            .await?
            .ok_or(ApiError::PhotoNotFound)
    }
}

// ── Admin form ───────────────────────────────────────────────────────────────

/// Raw create/update form as submitted. Text fields are unparsed.
#[derive(Debug, Default)]
pub struct ProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<String>,
    pub shipping: Option<String>,
    pub photo: Option<ProductPhoto>,
}

/// Form after validation, ready to become a [`Product`].
#[derive(Debug)]
struct ProductFields {
    name: String,
    slug: String,
    description: String,
    price: Decimal,
    category_id: Uuid,
    quantity: i32,
    shipping: bool,
    photo: Option<ProductPhoto>,
}

impl ProductInput {
    /// Required fields are checked in form order and the first missing one is
    /// reported; the photo size is checked before any value is parsed.
    fn validate(self) -> Result<ProductFields, ApiError> {
        let name = required(self.name, "Name")?;
        let description = required(self.description, "Description")?;
        let price = required(self.price, "Price")?;
        let category = required(self.category, "Category")?;
        let quantity = required(self.quantity, "Quantity")?;
        let slug = slug_for(&name)?;
        if let Some(photo) = &self.photo {
            if photo.data.len() >= MAX_PHOTO_BYTES {
                return Err(ApiError::validation("photo should be less than 1mb"));
            }
        }

        let price = Decimal::from_str(price.trim())
            .ok()
            .filter(|p| !p.is_sign_negative())
            .ok_or_else(|| ApiError::validation("Price must be a non-negative number"))?;
        let quantity = quantity
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|q| *q >= 0)
            .ok_or_else(|| ApiError::validation("Quantity must be a non-negative integer"))?;
        let category_id = category
            .trim()
            .parse::<Uuid>()
            .map_err(|_| ApiError::InvalidCategory)?;
        let shipping = matches!(
            self.shipping.as_deref().map(str::trim),
            Some("1" | "true" | "yes")
        );

        Ok(ProductFields {
            name,
            slug,
            description,
            price,
            category_id,
            quantity,
            shipping,
            photo: self.photo,
        })
    }
}

// ── CreateProduct ────────────────────────────────────────────────────────────

pub struct CreateProductUseCase<P: ProductRepository, C: CategoryRepository> {
    pub products: P,
    pub categories: C,
}

impl<P: ProductRepository, C: CategoryRepository> CreateProductUseCase<P, C> {
    pub async fn execute(&self, input: ProductInput) -> Result<Product, ApiError> {
        let fields = input.validate()?;
        if self.categories.find_by_id(fields.category_id).await?.is_none() {
            return Err(ApiError::InvalidCategory);
        }
        if self.products.find_by_name(&fields.name).await?.is_some() {
            return Err(ApiError::ProductAlreadyExists);
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::now_v7(),
            slug: fields.slug,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category_id: fields.category_id,
            quantity: fields.quantity,
            shipping: fields.shipping,
            created_at: now,
            updated_at: now,
        };
        self.products
            .create(&product, fields.photo.as_ref())
            .await?;
        Ok(product)
    }
}

// ── UpdateProduct ────────────────────────────────────────────────────────────

pub struct UpdateProductUseCase<P: ProductRepository, C: CategoryRepository> {
    pub products: P,
    pub categories: C,
}

impl<P: ProductRepository, C: CategoryRepository> UpdateProductUseCase<P, C> {
    pub async fn execute(&self, id: Uuid, input: ProductInput) -> Result<Product, ApiError> {
        let fields = input.validate()?;
        let existing = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ProductNotFound)?;
        if self.categories.find_by_id(fields.category_id).await?.is_none() {
            return Err(ApiError::InvalidCategory);
        }
        if let Some(other) = self.products.find_by_name(&fields.name).await? {
            if other.id != id {
                return Err(ApiError::ProductAlreadyExists);
            }
        }

        let product = Product {
            id,
            slug: fields.slug,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category_id: fields.category_id,
            quantity: fields.quantity,
            shipping: fields.shipping,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        self.products
            .update(&product, fields.photo.as_ref())
            .await?;
        Ok(product)
    }
}

// ── DeleteProduct ────────────────────────────────────────────────────────────

pub struct DeleteProductUseCase<P: ProductRepository> {
    pub repo: P,
}

impl<P: ProductRepository> DeleteProductUseCase<P> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::ProductNotFound);
        }
        Ok(())
    }
}
