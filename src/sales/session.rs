//! Cart sessions and orders.
//!
//! Each session owns exactly one cart, addressed by its session id. Nothing
//! is shared between sessions except the product catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::Product;
use crate::store::{read_lock, write_lock};

use super::cart::{Cart, CartLine, CartTotals};

const CARTS: &str = "carts";
const ORDERS: &str = "orders";

/// A checked-out cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier of the order.
    pub id: Uuid,
    /// The session that placed the order.
    pub session_id: Uuid,
    /// Lines as they were at checkout.
    pub lines: Vec<CartLine>,
    /// Totals at checkout.
    pub totals: CartTotals,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// Open cart sessions and the orders they produced.
#[derive(Debug, Default)]
pub struct CartSessions {
    carts: RwLock<HashMap<Uuid, Cart>>,
    orders: RwLock<Vec<Order>>,
}

impl CartSessions {
    /// Creates an empty session registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new session with an empty cart.
    pub fn open(&self) -> EngineResult<Cart> {
        let cart = Cart::new(Uuid::new_v4());
        write_lock(&self.carts, CARTS)?.insert(cart.session_id, cart.clone());
        debug!(session_id = %cart.session_id, "Cart session opened");
        Ok(cart)
    }

    /// Returns a session's cart.
    pub fn get(&self, session_id: Uuid) -> EngineResult<Cart> {
        read_lock(&self.carts, CARTS)?
            .get(&session_id)
            .cloned()
            .ok_or(EngineError::CartNotFound { session_id })
    }

    /// Adds units of a product to a session's cart.
    pub fn add_item(&self, session_id: Uuid, product: &Product, quantity: u32) -> EngineResult<Cart> {
        self.modify(session_id, |cart| cart.add_item(product, quantity))
    }

    /// Sets the quantity of a product in a session's cart.
    pub fn set_quantity(&self, session_id: Uuid, product_id: &str, quantity: u32) -> EngineResult<Cart> {
        self.modify(session_id, |cart| cart.set_quantity(product_id, quantity))
    }

    /// Removes a product from a session's cart.
    pub fn remove_item(&self, session_id: Uuid, product_id: &str) -> EngineResult<Cart> {
        self.modify(session_id, |cart| cart.remove_item(product_id))
    }

    /// Closes a session and drops its cart and the orders it placed.
    pub fn discard(&self, session_id: Uuid) -> EngineResult<()> {
        write_lock(&self.carts, CARTS)?
            .remove(&session_id)
            .ok_or(EngineError::CartNotFound { session_id })?;
        write_lock(&self.orders, ORDERS)?.retain(|o| o.session_id != session_id);
        debug!(session_id = %session_id, "Cart session discarded");
        Ok(())
    }

    /// Turns a session's cart into an order and empties the cart.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyCart`] if the cart has no lines.
    pub fn checkout(&self, session_id: Uuid) -> EngineResult<Order> {
        let mut carts = write_lock(&self.carts, CARTS)?;
        let cart = carts
            .get_mut(&session_id)
            .ok_or(EngineError::CartNotFound { session_id })?;
        if cart.is_empty() {
            return Err(EngineError::EmptyCart { session_id });
        }

        let order = Order {
            id: Uuid::new_v4(),
            session_id,
            lines: cart.lines.clone(),
            totals: cart.totals(),
            created_at: Utc::now(),
        };
        write_lock(&self.orders, ORDERS)?.push(order.clone());
        cart.clear();
        Ok(order)
    }

    /// Lists the orders a session has placed, oldest first.
    pub fn orders_for(&self, session_id: Uuid) -> EngineResult<Vec<Order>> {
        Ok(read_lock(&self.orders, ORDERS)?
            .iter()
            .filter(|o| o.session_id == session_id)
            .cloned()
            .collect())
    }

    fn modify<F>(&self, session_id: Uuid, change: F) -> EngineResult<Cart>
    where
        F: FnOnce(&mut Cart) -> EngineResult<()>,
    {
        let mut carts = write_lock(&self.carts, CARTS)?;
        let cart = carts
            .get_mut(&session_id)
            .ok_or(EngineError::CartNotFound { session_id })?;
        change(cart)?;
        Ok(cart.clone())
    }
}
