use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::{AdminUser, Json};
use crate::handlers::{MessageResponse, parse_id};
use crate::handlers::view::CategoryResponse;
use crate::state::AppState;
use crate::usecase::category::{
    CreateCategoryUseCase, DeleteCategoryUseCase, GetCategoryUseCase, ListCategoriesUseCase,
    UpdateCategoryUseCase,
};

#[derive(Deserialize)]
pub struct CategoryRequest {
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct CategoryMutationResponse {
    pub success: bool,
    pub message: &'static str,
    pub category: CategoryResponse,
}

// ── POST /category/create-category ───────────────────────────────────────────

pub async fn create_category(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(body): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryMutationResponse>), ApiError> {
    let usecase = CreateCategoryUseCase {
        repo: state.category_repo(),
    };
    let category = usecase.execute(body.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(CategoryMutationResponse {
            success: true,
            message: "new category created",
            category: category.into(),
        }),
    ))
}

// ── PUT /category/update-category/{id} ───────────────────────────────────────

pub async fn update_category(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<CategoryRequest>,
) -> Result<Json<CategoryMutationResponse>, ApiError> {
    let usecase = UpdateCategoryUseCase {
        repo: state.category_repo(),
    };
    let category = usecase.execute(parse_id(&id)?, body.name).await?;
    Ok(Json(CategoryMutationResponse {
        success: true,
        message: "Category Updated Successfully",
        category: category.into(),
    }))
}

// ── GET /category/get-category ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct CategoryListResponse {
    pub success: bool,
    pub message: &'static str,
    pub category: Vec<CategoryResponse>,
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoryListResponse>, ApiError> {
    let usecase = ListCategoriesUseCase {
        repo: state.category_repo(),
    };
    let categories = usecase.execute().await?;
    Ok(Json(CategoryListResponse {
        success: true,
        message: "All Categories List",
        category: categories.into_iter().map(Into::into).collect(),
    }))
}

// ── GET /category/single-category/{slug} ─────────────────────────────────────

pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryMutationResponse>, ApiError> {
    let usecase = GetCategoryUseCase {
        repo: state.category_repo(),
    };
    let category = usecase.execute(&slug).await?;
    Ok(Json(CategoryMutationResponse {
        success: true,
        message: "Get Single Category Successfully",
        category: category.into(),
    }))
}

// ── DELETE /category/delete-category/{id} ────────────────────────────────────

pub async fn delete_category(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = DeleteCategoryUseCase {
        repo: state.category_repo(),
    };
    usecase.execute(parse_id(&id)?).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Category Deleted Successfully",
    }))
}
