//! Menu category and product queries

use shared::models::{
    MenuCategory, MenuCategoryCreate, MenuCategoryUpdate, MenuProduct, MenuProductCreate,
    MenuProductUpdate, MenuSection,
};
use sqlx::PgPool;

// ── Categories ──

pub async fn list_categories(
    pool: &PgPool,
    tenant_id: &str,
) -> Result<Vec<MenuCategory>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM menu_categories WHERE tenant_id = $1 ORDER BY sort_order, name")
        .bind(tenant_id)
        .fetch_all(pool)
        .await
}

pub async fn find_category(
    pool: &PgPool,
    tenant_id: &str,
    category_id: &str,
) -> Result<Option<MenuCategory>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM menu_categories WHERE id = $1 AND tenant_id = $2")
        .bind(category_id)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
}

pub async fn create_category(
    pool: &PgPool,
    id: &str,
    tenant_id: &str,
    data: &MenuCategoryCreate,
    now: i64,
) -> Result<MenuCategory, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO menu_categories (id, tenant_id, name, sort_order, is_active,
                                      created_at, updated_at)
         VALUES ($1, $2, $3, $4, TRUE, $5, $5)
         RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(&data.name)
    .bind(data.sort_order.unwrap_or(0))
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update_category(
    pool: &PgPool,
    tenant_id: &str,
    category_id: &str,
    data: &MenuCategoryUpdate,
    now: i64,
) -> Result<Option<MenuCategory>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE menu_categories SET
            name = COALESCE($1, name),
            sort_order = COALESCE($2, sort_order),
            is_active = COALESCE($3, is_active),
            updated_at = $4
         WHERE id = $5 AND tenant_id = $6
         RETURNING *",
    )
    .bind(&data.name)
    .bind(data.sort_order)
    .bind(data.is_active)
    .bind(now)
    .bind(category_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_category(
    pool: &PgPool,
    tenant_id: &str,
    category_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM menu_categories WHERE id = $1 AND tenant_id = $2")
        .bind(category_id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_category_products(
    pool: &PgPool,
    category_id: &str,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM menu_products WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

// ── Products ──

pub async fn list_products(pool: &PgPool, tenant_id: &str) -> Result<Vec<MenuProduct>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM menu_products WHERE tenant_id = $1 ORDER BY sort_order, name")
        .bind(tenant_id)
        .fetch_all(pool)
        .await
}

pub async fn find_product(
    pool: &PgPool,
    tenant_id: &str,
    product_id: &str,
) -> Result<Option<MenuProduct>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM menu_products WHERE id = $1 AND tenant_id = $2")
        .bind(product_id)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
}

/// Products referenced by a QR order, restricted to available ones.
pub async fn find_available_products(
    pool: &PgPool,
    tenant_id: &str,
    product_ids: &[String],
) -> Result<Vec<MenuProduct>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM menu_products
         WHERE tenant_id = $1 AND is_available AND id = ANY($2)",
    )
    .bind(tenant_id)
    .bind(product_ids)
    .fetch_all(pool)
    .await
}

pub async fn create_product(
    pool: &PgPool,
    id: &str,
    tenant_id: &str,
    data: &MenuProductCreate,
    now: i64,
) -> Result<MenuProduct, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO menu_products (id, tenant_id, category_id, name, description, price,
                                    image_url, sort_order, is_available, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, $9, $9)
         RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(&data.category_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.image_url)
    .bind(data.sort_order.unwrap_or(0))
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn update_product(
    pool: &PgPool,
    tenant_id: &str,
    product_id: &str,
    data: &MenuProductUpdate,
    now: i64,
) -> Result<Option<MenuProduct>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE menu_products SET
            category_id = COALESCE($1, category_id),
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            price = COALESCE($4, price),
            image_url = COALESCE($5, image_url),
            sort_order = COALESCE($6, sort_order),
            is_available = COALESCE($7, is_available),
            updated_at = $8
         WHERE id = $9 AND tenant_id = $10
         RETURNING *",
    )
    .bind(&data.category_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.image_url)
    .bind(data.sort_order)
    .bind(data.is_available)
    .bind(now)
    .bind(product_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_product(
    pool: &PgPool,
    tenant_id: &str,
    product_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM menu_products WHERE id = $1 AND tenant_id = $2")
        .bind(product_id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ── Public menu ──

/// Active categories with their available products, as served on the QR menu.
pub async fn public_menu(pool: &PgPool, tenant_id: &str) -> Result<Vec<MenuSection>, sqlx::Error> {
    let categories: Vec<MenuCategory> = sqlx::query_as(
        "SELECT * FROM menu_categories
         WHERE tenant_id = $1 AND is_active
         ORDER BY sort_order, name",
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;

    let products: Vec<MenuProduct> = sqlx::query_as(
        "SELECT * FROM menu_products
         WHERE tenant_id = $1 AND is_available
         ORDER BY sort_order, name",
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;

    Ok(categories
        .into_iter()
        .map(|category| {
            let products = products
                .iter()
                .filter(|p| p.category_id == category.id)
                .cloned()
                .collect();
            MenuSection { category, products }
        })
        .collect())
}
