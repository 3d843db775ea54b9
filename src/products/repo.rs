use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;
use crate::products::{
    dto::{CreateProductRequest, UpdateProductRequest},
    query::{ListQuery, Pagination, Sort},
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub image: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

const COLUMNS: &str = "id, name, price, quantity, image, created_at, updated_at";

impl Product {
    pub async fn list(
        db: &PgPool,
        filter: &ListQuery,
        sort: Sort,
        pg: Pagination,
    ) -> Result<Vec<Product>, ApiError> {
        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM products WHERE true"));
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            qb.push(" AND name ILIKE ");
            qb.push_bind(format!("%{search}%"));
        }
        if let Some(min) = filter.min_price {
            qb.push(" AND price >= ");
            qb.push_bind(min);
        }
        if let Some(max) = filter.max_price {
            qb.push(" AND price <= ");
            qb.push_bind(max);
        }
        if filter.in_stock == Some(true) {
            qb.push(" AND quantity > 0");
        }
        // sort.column is whitelisted in query::parse_sort
        qb.push(" ORDER BY ");
        qb.push(sort.column);
        qb.push(if sort.descending { " DESC" } else { " ASC" });
        qb.push(" LIMIT ");
        qb.push_bind(pg.limit);
        qb.push(" OFFSET ");
        qb.push_bind(pg.offset);

        let rows = qb.build_query_as::<Product>().fetch_all(db).await?;
        Ok(rows)
    }

    pub async fn count(db: &PgPool) -> Result<i64, ApiError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(db)
            .await?;
        Ok(total)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Product>, ApiError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(product)
    }

    pub async fn create(db: &PgPool, req: &CreateProductRequest) -> Result<Product, ApiError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, price, quantity, image)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(req.price)
        .bind(req.quantity)
        .bind(&req.image)
        .fetch_one(db)
        .await?;
        Ok(product)
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        req: &UpdateProductRequest,
    ) -> Result<Option<Product>, ApiError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                price = COALESCE($3, price),
                quantity = COALESCE($4, quantity),
                image = COALESCE($5, image),
                updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&req.name)
        .bind(req.price)
        .bind(req.quantity)
        .bind(&req.image)
        .fetch_optional(db)
        .await?;
        Ok(product)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
