use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::products::repo::Product;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: i32,
    pub image: Option<String>,
}

/// Partial update; every field optional but at least one required.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub total: i64,
    pub page: i64,
    pub pages: i64,
    pub data: Vec<Product>,
}

fn check_name(name: &str) -> Result<(), ApiError> {
    let len = name.chars().count();
    if !(3..=100).contains(&len) {
        return Err(ApiError::Validation(
            "Name must be between 3 and 100 characters".into(),
        ));
    }
    Ok(())
}

fn check_price(price: f64) -> Result<(), ApiError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ApiError::Validation("Price must be positive".into()));
    }
    Ok(())
}

fn check_quantity(quantity: i32) -> Result<(), ApiError> {
    if quantity < 0 {
        return Err(ApiError::Validation("Quantity must not be negative".into()));
    }
    Ok(())
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_name(&self.name)?;
        check_price(self.price)?;
        check_quantity(self.quantity)?;
        Ok(())
    }
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.image.is_none()
        {
            return Err(ApiError::Validation(
                "At least one field must be provided".into(),
            ));
        }
        if let Some(name) = &self.name {
            check_name(name)?;
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }
        if let Some(quantity) = self.quantity {
            check_quantity(quantity)?;
        }
        Ok(())
    }
}
