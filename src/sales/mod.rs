//! Session-scoped sales carts.
//!
//! Carts live per session id in [`CartSessions`]; the arithmetic lives in
//! [`Cart`] and does not touch shared state.

mod cart;
mod session;

pub use cart::{Cart, CartLine, CartTotals, MAX_CART_LINES, MAX_LINE_QUANTITY};
pub use session::{CartSessions, Order};
