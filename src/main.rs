//! Runs one demo shift against the local file store and an in-process
//! order collection.

use anyhow::Context;
use async_trait::async_trait;
use coffee_pos::auth::{self, AuthError, AuthService, Role};
use coffee_pos::config::SessionConfig;
use coffee_pos::draft::OrderDraft;
use coffee_pos::lifecycle::{setup_tracing, BaristaSession};
use coffee_pos::model::{ItemStatus, MenuItem, Money, Temperature};
use coffee_pos::remote::MemoryDocumentStore;
use coffee_pos::sales::SalesRange;
use coffee_pos::storage::FileStore;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

/// Accepts any barista login with a non-empty password.
struct DemoAuth;

#[async_trait]
impl AuthService for DemoAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Role, AuthError> {
        if password.is_empty() {
            return Err(AuthError::InvalidCredentials(email.to_string()));
        }
        Ok(Role::Barista)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = SessionConfig::from_env()?;
    info!(?config, "Starting demo shift");

    let store = FileStore::open(&config.storage_dir)
        .with_context(|| format!("opening {}", config.storage_dir.display()))?;
    let documents = MemoryDocumentStore::new();
    let auth_service: Arc<dyn AuthService> = Arc::new(DemoAuth);

    let role = auth::sign_in(auth_service.as_ref(), "sara", "demo").await?;
    info!(%role, "Signed in");

    let mut session = BaristaSession::start(&config, store, Arc::new(documents.clone()), auth_service);

    let latte = MenuItem::hot_and_cold("latte", "Latte", Money::from_cents(850), Money::from_cents(950))
        .with_category("coffee");
    let croissant = MenuItem::new("croissant", "Butter Croissant", Money::from_cents(600))
        .with_category("food");

    let mut draft = OrderDraft::new();
    draft.add_with_temperature(&latte, Temperature::Cold)?;
    draft.add(&croissant)?;
    draft.set_customer("Ana", None);

    let order_id = session
        .place_order(&draft)
        .instrument(tracing::info_span!("order_placement"))
        .await?;

    for item_id in ["latte-cold", "croissant"] {
        session.update_item_status(&order_id, item_id, ItemStatus::Preparing).await?;
        session.update_item_status(&order_id, item_id, ItemStatus::Completed).await?;
    }
    let method = session.settle_payment(&order_id, Some("cash")).await?;
    session.serve_order(&order_id).await?;
    session.flush().await?;
    info!(%order_id, %method, "Order served");

    if let Some(notice) = session.notice() {
        if notice.is_error() {
            warn!(message = %notice.message, "Notice");
        } else {
            info!(message = %notice.message, "Notice");
        }
    }

    let summary = session.sales_summary(SalesRange::Day).await?;
    info!(
        revenue = %summary.revenue,
        orders = summary.orders,
        "Today's sales"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    session.logout().await?;
    info!("Demo shift complete");
    Ok(())
}
