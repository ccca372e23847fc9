use uuid::Uuid;

use crate::domain::repository::CategoryRepository;
use crate::domain::types::Category;
use crate::error::ApiError;
use crate::usecase::{required, slug_for};

// ── CreateCategory ───────────────────────────────────────────────────────────

pub struct CreateCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> CreateCategoryUseCase<R> {
    pub async fn execute(&self, name: Option<String>) -> Result<Category, ApiError> {
        let name = required(name, "Name")?;
        let slug = slug_for(&name)?;
        if self.repo.find_by_name(&name).await?.is_some() {
            return Err(ApiError::CategoryAlreadyExists);
        }
        let category = Category {
            id: Uuid::now_v7(),
            slug,
            name,
        };
        self.repo.create(&category).await?;
        Ok(category)
    }
}

// ── UpdateCategory ───────────────────────────────────────────────────────────

pub struct UpdateCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> UpdateCategoryUseCase<R> {
    pub async fn execute(&self, id: Uuid, name: Option<String>) -> Result<Category, ApiError> {
        let name = required(name, "Name")?;
        let slug = slug_for(&name)?;
        let mut category = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::CategoryNotFound)?;
        if let Some(other) = self.repo.find_by_name(&name).await? {
            if other.id != id {
                return Err(ApiError::CategoryAlreadyExists);
            }
        }
        category.slug = slug;
        category.name = name;
        self.repo.update(&category).await?;
        Ok(category)
    }
}

// ── ListCategories / GetCategory ─────────────────────────────────────────────

pub struct ListCategoriesUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> ListCategoriesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Category>, ApiError> {
        self.repo.list().await
    }
}

pub struct GetCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> GetCategoryUseCase<R> {
    pub async fn execute(&self, slug: &str) -> Result<Category, ApiError> {
        self.repo
            .find_by_slug(slug)
            .await?
            .ok_or(ApiError::CategoryNotFound)
    }
}

// ── DeleteCategory ───────────────────────────────────────────────────────────

pub struct DeleteCategoryUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> DeleteCategoryUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::CategoryNotFound);
        }
        Ok(())
    }
}
