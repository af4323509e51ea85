//! Order domain types.
//!
//! An order's line items, total, owner, contact snapshot and creation time
//! are fixed when it is placed. Only the status changes afterwards, and only
//! through [`SessionStore::set_order_status`](crate::SessionStore::set_order_status).
//! Fields are therefore private and exposed through getters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use model_store_core::{ItemId, OrderId, OrderStatus, Price, UserId};

/// One purchased catalog item, snapshotted at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog item ID.
    pub id: ItemId,
    /// Item name at the time of purchase.
    pub name: String,
    /// Unit price at the time of purchase.
    pub price: Price,
    /// Preview image path.
    pub image: String,
}

/// Contact and delivery details entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShippingContact {
    /// Recipient name.
    pub name: String,
    /// Recipient email, free text.
    pub email: String,
    /// Recipient phone number.
    pub phone: String,
    /// Delivery address.
    pub address: String,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: OrderId,
    #[serde(rename = "userId")]
    owner_id: UserId,
    #[serde(rename = "items")]
    line_items: Vec<LineItem>,
    total: Price,
    status: OrderStatus,
    #[serde(rename = "customerData")]
    shipping_contact: ShippingContact,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Place a new order. The total is the sum of the line item prices and
    /// the status starts as [`OrderStatus::Pending`].
    ///
    /// Returns `None` if the total overflows.
    #[must_use]
    pub fn place(
        id: OrderId,
        owner_id: UserId,
        line_items: Vec<LineItem>,
        shipping_contact: ShippingContact,
        created_at: DateTime<Utc>,
    ) -> Option<Self> {
        let total = Price::checked_sum(line_items.iter().map(|item| item.price))?;
        Some(Self {
            id,
            owner_id,
            line_items,
            total,
            status: OrderStatus::Pending,
            shipping_contact,
            created_at,
        })
    }

    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    #[must_use]
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Total captured when the order was placed.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    #[must_use]
    pub const fn shipping_contact(&self) -> &ShippingContact {
        &self.shipping_contact
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) const fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}

/// Per-status order counts, as shown on the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusSummary {
    pending: usize,
    processing: usize,
    shipped: usize,
    delivered: usize,
    cancelled: usize,
}

impl StatusSummary {
    /// Count the statuses of `orders`.
    #[must_use]
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut summary = Self::default();
        for order in orders {
            *summary.slot(order.status()) += 1;
        }
        summary
    }

    /// Number of orders with `status`.
    #[must_use]
    pub const fn count(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Pending => self.pending,
            OrderStatus::Processing => self.processing,
            OrderStatus::Shipped => self.shipped,
            OrderStatus::Delivered => self.delivered,
            OrderStatus::Cancelled => self.cancelled,
        }
    }

    /// Number of orders counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.pending + self.processing + self.shipped + self.delivered + self.cancelled
    }

    const fn slot(&mut self, status: OrderStatus) -> &mut usize {
        match status {
            OrderStatus::Pending => &mut self.pending,
            OrderStatus::Processing => &mut self.processing,
            OrderStatus::Shipped => &mut self.shipped,
            OrderStatus::Delivered => &mut self.delivered,
            OrderStatus::Cancelled => &mut self.cancelled,
        }
    }
}

/// Orders present in a fresh store: one processing order for the demo
/// shopper (user 2).
#[must_use]
pub fn demo_orders() -> Vec<Order> {
    let created_at = DateTime::from_timestamp(1_733_047_200, 0).unwrap_or_default();
    Order::place(
        OrderId::new(1),
        UserId::new(2),
        vec![LineItem {
            id: ItemId::new(1),
            name: "Chrome Geometry".to_owned(),
            price: Price::from_cents(1299),
            image: "/img/81e5bc8d-ec10-404f-8104-00f0c12d0d27.jpg".to_owned(),
        }],
        ShippingContact {
            name: "Ivan Petrov".to_owned(),
            email: "user@store.com".to_owned(),
            phone: "+7 999 123 45 67".to_owned(),
            address: "Moscow, Primernaya St. 1".to_owned(),
        },
        created_at,
    )
    .map(|mut order| {
        order.set_status(OrderStatus::Processing);
        order
    })
    .into_iter()
    .collect()
}
