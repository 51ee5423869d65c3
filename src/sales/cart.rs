//! Shopping cart for a single sales session.
//!
//! A [`Cart`] holds one [`CartLine`] per product. Line amounts are kept
//! unrounded; [`CartTotals`] sums them and rounds to cents for display.
//! Product prices are capped and quantities bounded per line and per cart,
//! so the sums stay within range.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Product, round_to_cents};

/// The most units of one product a cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 9_999;

/// The most distinct products a cart may hold.
pub const MAX_CART_LINES: usize = 100;

/// One product in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product sold.
    pub product_id: String,
    /// Product name at the time it was added.
    pub name: String,
    /// Units in the cart, at least 1.
    pub quantity: u32,
    /// Price of one unit at the time it was added.
    pub unit_price: Decimal,
    /// VAT rate at the time it was added.
    pub vat_rate: Decimal,
    /// `quantity x unit_price`.
    pub subtotal: Decimal,
    /// `subtotal x vat_rate`.
    pub vat: Decimal,
    /// `subtotal + vat`.
    pub total: Decimal,
}

impl CartLine {
    fn new(product: &Product, quantity: u32) -> Self {
        let mut line = Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity,
            unit_price: product.unit_price,
            vat_rate: product.vat_rate,
            subtotal: Decimal::ZERO,
            vat: Decimal::ZERO,
            total: Decimal::ZERO,
        };
        line.refresh();
        line
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.subtotal = Decimal::from(self.quantity) * self.unit_price;
        self.vat = self.subtotal * self.vat_rate;
        self.total = self.subtotal + self.vat;
    }
}

/// Cart totals, rounded to cents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of line subtotals.
    pub subtotal: Decimal,
    /// Sum of line VAT.
    pub vat: Decimal,
    /// Amount due.
    pub total: Decimal,
    /// Number of units across all lines.
    pub item_count: u32,
}

/// The cart owned by one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// The owning session.
    pub session_id: Uuid,
    /// Lines in the order products were first added.
    pub lines: Vec<CartLine>,
    /// When the session was opened.
    pub created_at: DateTime<Utc>,
    /// When the cart last changed.
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Creates an empty cart for a session.
    pub fn new(session_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            lines: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Adds units of a product. Adding a product already in the cart
    /// increases that line's quantity.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] for an invalid product, a zero
    /// quantity, a line above [`MAX_LINE_QUANTITY`] or a cart already
    /// holding [`MAX_CART_LINES`] products.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> EngineResult<()> {
        product.validate()?;
        if quantity == 0 {
            return Err(EngineError::validation("quantity", "must be at least 1"));
        }

        match self.line_mut(&product.id) {
            Some(line) => {
                let merged = check_quantity(line.quantity.saturating_add(quantity))?;
                line.set_quantity(merged);
            }
            None => {
                if self.lines.len() >= MAX_CART_LINES {
                    return Err(EngineError::validation(
                        "product_id",
                        format!("cart already holds {} products", MAX_CART_LINES),
                    ));
                }
                self.lines.push(CartLine::new(product, check_quantity(quantity)?));
            }
        }
        self.touch();
        Ok(())
    }

    /// Sets the quantity of a product already in the cart. Zero removes it.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> EngineResult<()> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }
        let quantity = check_quantity(quantity)?;

        let line = self
            .line_mut(product_id)
            .ok_or_else(|| not_in_cart(product_id))?;
        line.set_quantity(quantity);
        self.touch();
        Ok(())
    }

    /// Removes a product's line.
    pub fn remove_item(&mut self, product_id: &str) -> EngineResult<()> {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() == before {
            return Err(not_in_cart(product_id));
        }
        self.touch();
        Ok(())
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.touch();
    }

    /// Returns true when the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sums the lines and rounds the result to cents.
    pub fn totals(&self) -> CartTotals {
        let subtotal: Decimal = self.lines.iter().map(|l| l.subtotal).sum();
        let vat: Decimal = self.lines.iter().map(|l| l.vat).sum();
        CartTotals {
            subtotal: round_to_cents(subtotal),
            vat: round_to_cents(vat),
            total: round_to_cents(subtotal + vat),
            item_count: self.lines.iter().map(|l| l.quantity).sum(),
        }
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn check_quantity(quantity: u32) -> EngineResult<u32> {
    if quantity > MAX_LINE_QUANTITY {
        return Err(EngineError::validation(
            "quantity",
            format!("must not exceed {} per product", MAX_LINE_QUANTITY),
        ));
    }
    Ok(quantity)
}

fn not_in_cart(product_id: &str) -> EngineError {
    EngineError::ProductNotFound {
        product_id: product_id.to_string(),
    }
}
