use uuid::Uuid;

use storefront_domain::cart::{Cart, CartItem};

use crate::domain::repository::{CartRepository, ProductRepository};
use crate::error::ApiError;

pub struct GetCartUseCase<R: CartRepository> {
    pub carts: R,
}

impl<R: CartRepository> GetCartUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Cart, ApiError> {
        self.carts.load(user_id).await
    }
}

/// Append a snapshot of the product's current name and price.
pub struct AddToCartUseCase<R: CartRepository, P: ProductRepository> {
    pub carts: R,
    pub products: P,
}

impl<R: CartRepository, P: ProductRepository> AddToCartUseCase<R, P> {
    pub async fn execute(&self, user_id: Uuid, product_id: Uuid) -> Result<Cart, ApiError> {
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or(ApiError::ProductNotFound)?;
        let cart = self.carts.load(user_id).await?.with_item(CartItem {
            product_id: product.id,
            name: product.name,
            price: product.price,
            slug: product.slug,
            quantity: 1,
        });
        self.carts.save(user_id, &cart).await?;
        Ok(cart)
    }
}

pub struct RemoveFromCartUseCase<R: CartRepository> {
    pub carts: R,
}

impl<R: CartRepository> RemoveFromCartUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, index: usize) -> Result<Cart, ApiError> {
        let cart = self
            .carts
            .load(user_id)
            .await?
            .without_index(index)
            .map_err(|e| ApiError::validation(e.to_string()))?;
        self.carts.save(user_id, &cart).await?;
        Ok(cart)
    }
}

pub struct ClearCartUseCase<R: CartRepository> {
    pub carts: R,
}

impl<R: CartRepository> ClearCartUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Cart, ApiError> {
        self.carts.clear(user_id).await?;
        Ok(Cart::default())
    }
}
