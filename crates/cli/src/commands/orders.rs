//! Order commands: checkout, listings, status updates.

use model_store_core::{ItemId, OrderId, OrderStatus};
use model_store_storefront::AccessDenied;
use model_store_storefront::cart::Cart;
use model_store_storefront::catalog::Catalog;
use model_store_storefront::error::AppError;
use model_store_storefront::models::{Order, ShippingContact};

use super::CliStore;

/// Buy the catalog items `item_ids` for the signed-in identity.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown item,
/// `AppError::BadRequest` if the total overflows and
/// `AppError::Unauthorized` if nobody is signed in.
pub fn checkout(
    store: &mut CliStore,
    item_ids: &[ItemId],
    contact: ShippingContact,
) -> Result<OrderId, AppError> {
    let catalog = Catalog::demo();
    let mut cart = Cart::new();
    for id in item_ids {
        let item = catalog
            .get(*id)
            .ok_or_else(|| AppError::NotFound(format!("catalog item {id}")))?;
        cart.add(item.clone());
    }

    let total = cart
        .total()
        .ok_or_else(|| AppError::BadRequest("order total is too large".to_string()))?;
    let order_id = store
        .create_order(cart.line_items(), contact)
        .ok_or_else(|| AppError::Unauthorized("sign in before checking out".to_string()))?;
    cart.clear();

    tracing::info!("Placed order #{order_id} ({} items, {total})", item_ids.len());
    Ok(order_id)
}

/// List the signed-in identity's orders.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if nobody is signed in.
pub fn mine(store: &CliStore) -> Result<(), AppError> {
    require_session(store)?;
    log_orders(&store.orders_for_current_user());
    Ok(())
}

/// List every order.
///
/// # Errors
///
/// Returns `AppError::Forbidden` unless an administrator is signed in.
pub fn all(store: &CliStore) -> Result<(), AppError> {
    log_orders(store.all_orders()?);
    Ok(())
}

/// Show per-status counts for the signed-in identity.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if nobody is signed in.
pub fn summary(store: &CliStore) -> Result<(), AppError> {
    require_session(store)?;
    let summary = store.status_summary_for_current_user();
    for status in OrderStatus::ALL {
        tracing::info!("{:<20} {}", status.label(), summary.count(status));
    }
    tracing::info!("{:<20} {}", "Total", summary.total());
    Ok(())
}

/// Change an order's status. Administrators only.
///
/// # Errors
///
/// Returns `AppError::Forbidden` unless an administrator is signed in and
/// `AppError::NotFound` for an unknown order.
pub fn set_status(store: &mut CliStore, order_id: OrderId, status: OrderStatus) -> Result<(), AppError> {
    if !store
        .current_identity()
        .is_some_and(|identity| identity.is_administrator())
    {
        return Err(AccessDenied.into());
    }
    if !store.set_order_status(order_id, status) {
        return Err(AppError::NotFound(format!("order {order_id}")));
    }

    tracing::info!("Order #{order_id} is now {}", status.label());
    Ok(())
}

fn require_session(store: &CliStore) -> Result<(), AppError> {
    store
        .current_identity()
        .map(|_| ())
        .ok_or_else(|| AppError::Unauthorized("nobody is signed in".to_string()))
}

fn log_orders(orders: &[Order]) {
    if orders.is_empty() {
        tracing::info!("No orders");
        return;
    }

    for order in orders {
        let items: Vec<&str> = order
            .line_items()
            .iter()
            .map(|item| item.name.as_str())
            .collect();
        let contact = order.shipping_contact();
        tracing::info!(
            "#{} {} user {} {} [{}] {} <{}> {}",
            order.id(),
            order.created_at().format("%Y-%m-%d"),
            order.owner_id(),
            order.total(),
            order.status().label(),
            contact.name,
            contact.email,
            items.join(", ")
        );
    }
}
