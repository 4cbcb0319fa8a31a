use crate::config::AdminBootstrap;
use crate::dto::user_dto::CreateUserPayload;
use crate::error::Result;
use crate::models::product::{NewProduct, ProductChanges};
use crate::models::user::{User, UserChanges, ROLE_ADMIN};
use crate::services::{
    account_service::AccountService, category_service::CategoryService,
    product_service::ProductService, user_service::UserService,
};
use crate::utils::crypto::{hash_password_blocking, verify_password_blocking};
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

/// (category, name, brand, sku, price, available)
const DEMO_CATALOG: &[(&str, &str, &str, &str, f64, bool)] = &[
    ("Shoes", "Trail Runner", "Acme", "ACME-TR-001", 119.0, true),
    ("Shoes", "City Sneaker", "Acme", "ACME-CS-002", 79.5, false),
    ("Running shoes", "Marathon Pro", "Stride", "STR-MP-010", 159.9, true),
    ("Socks", "Wool Socks", "Knitwear Co", "KNT-WS-100", 12.0, true),
    ("Accessories", "Water Bottle", "Hydra", "HYD-WB-750", 18.25, false),
];

/// Startup tasks that bring the store to a usable state.
#[derive(Clone)]
pub struct BootstrapService {
    accounts: AccountService,
    categories: CategoryService,
    products: ProductService,
    users: UserService,
}

impl BootstrapService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            accounts: AccountService::new(pool.clone()),
            categories: CategoryService::new(pool.clone()),
            products: ProductService::new(pool.clone()),
            users: UserService::new(pool),
        }
    }

    /// Creates the administrator and its account, or brings an existing
    /// administrator's password and roles in line with `admin`.
    pub async fn ensure_admin(&self, admin: &AdminBootstrap) -> Result<User> {
        let account = self.accounts.ensure(&admin.account_email).await?;

        let Some(existing) = self.users.find_by_email(&admin.email).await? else {
            let payload = CreateUserPayload {
                email: admin.email.clone(),
                password: admin.password.clone(),
                first_name: "Admin".to_string(),
                last_name: "Admin".to_string(),
                account: Some(account.id),
                roles: vec![ROLE_ADMIN.to_string()],
            };
            payload.validate()?;
            let user = self.users.create(payload).await?;
            info!(user_id = user.id, account_id = account.id, "administrator created");
            return Ok(user);
        };

        let password_matches =
            verify_password_blocking(admin.password.clone(), existing.password.clone())
                .await
                .unwrap_or(false);
        let password = if password_matches {
            None
        } else {
            Some(hash_password_blocking(admin.password.clone()).await?)
        };

        let mut roles = existing.roles.clone();
        if !existing.is_admin() {
            roles.push(ROLE_ADMIN.to_string());
        }

        let user = self
            .users
            .update(
                existing,
                UserChanges {
                    password,
                    roles: Some(roles),
                    ..Default::default()
                },
            )
            .await?;
        info!(user_id = user.id, "administrator verified");
        Ok(user)
    }

    /// Upserts the demo catalog by SKU. Returns how many products were
    /// created or changed.
    pub async fn seed_demo_catalog(&self) -> Result<usize> {
        let mut touched = 0;

        for &(category, name, brand, sku, price, available) in DEMO_CATALOG {
            let category = self.categories.ensure(category).await?;

            match self.products.find_by_sku(sku).await? {
                Some(product) => {
                    let before = product.updated_at;
                    let product = self
                        .products
                        .update(
                            product,
                            ProductChanges {
                                name: Some(name.to_string()),
                                brand: Some(brand.to_string()),
                                price: Some(price),
                                available: Some(available),
                                category_id: Some(Some(category.id)),
                                ..Default::default()
                            },
                        )
                        .await?;
                    if product.updated_at != before {
                        touched += 1;
                    }
                }
                None => {
                    self.products
                        .create(NewProduct {
                            name: name.to_string(),
                            description: None,
                            brand: brand.to_string(),
                            sku: sku.to_string(),
                            available,
                            price,
                            category_id: Some(category.id),
                        })
                        .await?;
                    touched += 1;
                }
            }
        }

        info!(touched, "demo catalog seeded");
        Ok(touched)
    }
}
