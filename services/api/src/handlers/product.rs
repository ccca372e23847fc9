use axum::{
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::{StatusCode, header},
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::ProductPhoto;
use crate::error::ApiError;
use crate::extract::{AdminUser, Json};
use crate::handlers::{MessageResponse, parse_id};
use crate::handlers::view::{
    CategoryResponse, ProductRecordResponse, ProductResponse, catalog,
};
use crate::state::AppState;
use crate::usecase::product::{
    CountProductsUseCase, CreateProductUseCase, DeleteProductUseCase, FilterProductsUseCase,
    GetProductPhotoUseCase, GetProductUseCase, ListLatestProductsUseCase, ListProductPageUseCase,
    ProductInput, ProductsByCategoryUseCase, RelatedProductsUseCase, SearchProductsUseCase,
    UpdateProductUseCase,
};

/// Largest multipart body accepted on product create/update. Photos themselves
/// are capped lower by validation so oversize uploads get a readable 400.
pub const PRODUCT_FORM_LIMIT: usize = 8 * 1024 * 1024;

#[derive(Serialize)]
pub struct ProductsResponse {
    pub success: bool,
    pub products: Vec<ProductResponse>,
}

impl ProductsResponse {
    fn new(products: Vec<ProductResponse>) -> Json<Self> {
        Json(Self {
            success: true,
            products,
        })
    }
}

// ── POST /product/product-filters ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub checked: Vec<Uuid>,
    #[serde(default)]
    pub radio: Vec<Decimal>,
}

pub async fn filter_products(
    State(state): State<AppState>,
    Json(body): Json<FilterRequest>,
) -> Result<Json<ProductsResponse>, ApiError> {
    let usecase = FilterProductsUseCase {
        repo: state.product_repo(),
    };
    let products = usecase.execute(body.checked, &body.radio).await?;
    Ok(ProductsResponse::new(catalog(products)))
}

// ── GET /product/product-list/{page} ─────────────────────────────────────────

pub async fn product_page(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<Json<ProductsResponse>, ApiError> {
    let usecase = ListProductPageUseCase {
        repo: state.product_repo(),
    };
    let products = usecase.execute(&page).await?;
    Ok(ProductsResponse::new(catalog(products)))
}

// ── GET /product/search/{keyword} ────────────────────────────────────────────

pub async fn search_products(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<ProductsResponse>, ApiError> {
    let usecase = SearchProductsUseCase {
        repo: state.product_repo(),
    };
    let products = usecase.execute(&keyword).await?;
    Ok(ProductsResponse::new(catalog(products)))
}

// ── GET /product/related-product/{pid}/{cid} ─────────────────────────────────

pub async fn related_products(
    State(state): State<AppState>,
    Path((pid, cid)): Path<(String, String)>,
) -> Result<Json<ProductsResponse>, ApiError> {
    let usecase = RelatedProductsUseCase {
        repo: state.product_repo(),
    };
    let products = usecase.execute(parse_id(&pid)?, parse_id(&cid)?).await?;
    Ok(ProductsResponse::new(catalog(products)))
}

// ── GET /product/product-category/{slug} ─────────────────────────────────────

#[derive(Serialize)]
pub struct CategoryProductsResponse {
    pub success: bool,
    pub category: CategoryResponse,
    pub products: Vec<ProductResponse>,
}

pub async fn products_by_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryProductsResponse>, ApiError> {
    let usecase = ProductsByCategoryUseCase {
        categories: state.category_repo(),
        products: state.product_repo(),
    };
    let (category, products) = usecase.execute(&slug).await?;
    Ok(Json(CategoryProductsResponse {
        success: true,
        category: category.into(),
        products: catalog(products),
    }))
}

// ── GET /product/product-count ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct CountResponse {
    pub success: bool,
    pub total: u64,
}

pub async fn product_count(
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, ApiError> {
    let usecase = CountProductsUseCase {
        repo: state.product_repo(),
    };
    let total = usecase.execute().await?;
    Ok(Json(CountResponse {
        success: true,
        total,
    }))
}

// ── GET /product/get-product ─────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestProductsResponse {
    pub success: bool,
    pub count_total: usize,
    pub message: &'static str,
    pub products: Vec<ProductResponse>,
}

pub async fn latest_products(
    State(state): State<AppState>,
) -> Result<Json<LatestProductsResponse>, ApiError> {
    let usecase = ListLatestProductsUseCase {
        repo: state.product_repo(),
    };
    let products = catalog(usecase.execute().await?);
    Ok(Json(LatestProductsResponse {
        success: true,
        count_total: products.len(),
        message: "All Products",
        products,
    }))
}

// ── GET /product/get-product/{slug} ──────────────────────────────────────────

#[derive(Serialize)]
pub struct SingleProductResponse {
    pub success: bool,
    pub message: &'static str,
    pub product: ProductResponse,
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<SingleProductResponse>, ApiError> {
    let usecase = GetProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase.execute(&slug).await?;
    Ok(Json(SingleProductResponse {
        success: true,
        message: "Single Product Fetched",
        product: product.into(),
    }))
}

// ── GET /product/product-photo/{pid} ─────────────────────────────────────────

pub async fn product_photo(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = GetProductPhotoUseCase {
        repo: state.product_repo(),
    };
    let photo = usecase.execute(parse_id(&pid)?).await?;
    Ok(([(header::CONTENT_TYPE, photo.content_type)], photo.data))
}

// ── Admin: create / update / delete ──────────────────────────────────────────

#[derive(Serialize)]
pub struct ProductMutationResponse {
    pub success: bool,
    pub message: &'static str,
    pub product: ProductRecordResponse,
}

fn malformed_form(e: MultipartError) -> ApiError {
    ApiError::validation(format!("Invalid form data: {}", e.body_text()))
}

/// Collect the admin product form. Unknown fields are ignored and an empty
/// `photo` part counts as no photo.
async fn read_product_form(mut multipart: Multipart) -> Result<ProductInput, ApiError> {
    let mut input = ProductInput::default();
    while let Some(field) = multipart.next_field().await.map_err(malformed_form)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        if name == "photo" {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_owned();
            let data = field.bytes().await.map_err(malformed_form)?;
            if !data.is_empty() {
                input.photo = Some(ProductPhoto {
                    data: data.to_vec(),
                    content_type,
                });
            }
            continue;
        }
        let slot = match name.as_str() {
            "name" => &mut input.name,
            "description" => &mut input.description,
            "price" => &mut input.price,
            "category" => &mut input.category,
            "quantity" => &mut input.quantity,
            "shipping" => &mut input.shipping,
            _ => continue,
        };
        *slot = Some(field.text().await.map_err(malformed_form)?);
    }
    Ok(input)
}

pub async fn create_product(
    _admin: AdminUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ProductMutationResponse>), ApiError> {
    let input = read_product_form(multipart).await?;
    let usecase = CreateProductUseCase {
        products: state.product_repo(),
        categories: state.category_repo(),
    };
    let product = usecase.execute(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductMutationResponse {
            success: true,
            message: "Product Created Successfully",
            product: product.into(),
        }),
    ))
}

pub async fn update_product(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(pid): Path<String>,
    multipart: Multipart,
) -> Result<Json<ProductMutationResponse>, ApiError> {
    let id = parse_id(&pid)?;
    let input = read_product_form(multipart).await?;
    let usecase = UpdateProductUseCase {
        products: state.product_repo(),
        categories: state.category_repo(),
    };
    let product = usecase.execute(id, input).await?;
    Ok(Json(ProductMutationResponse {
        success: true,
        message: "Product Updated Successfully",
        product: product.into(),
    }))
}

pub async fn delete_product(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = DeleteProductUseCase {
        repo: state.product_repo(),
    };
    usecase.execute(parse_id(&pid)?).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Product Deleted successfully",
    }))
}
