//! # Checkout
//!
//! Cart arithmetic that turns a shopping session into an [`OrderCreate`].
//!
//! Marketplace orders are charged the cart subtotal plus the delivery fee. Errand orders are
//! placed with a total of zero; the rider settles the bill when shopping.
use crate::model::{ErrandDetails, OrderCreate, Route};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    #[error("Invalid quantity for {0}")]
    InvalidQuantity(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Items picked from vendor catalogs, in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units, merging with an existing line for the same product.
    pub fn add(
        &mut self,
        product_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: f64,
        quantity: u32,
    ) -> Result<(), CheckoutError> {
        let product_id = product_id.into();
        if quantity == 0 || !unit_price.is_finite() || unit_price < 0.0 {
            return Err(CheckoutError::InvalidQuantity(product_id));
        }

        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CheckoutError::InvalidQuantity(product_id))?;
            }
            None => self.lines.push(CartLine {
                product_id,
                name: name.into(),
                unit_price,
                quantity,
            }),
        }
        Ok(())
    }

    /// Takes one unit off a line, dropping the line when it reaches zero.
    /// Returns `false` when the product is not in the cart.
    pub fn remove_one(&mut self, product_id: &str) -> bool {
        let Some(pos) = self.lines.iter().position(|l| l.product_id == product_id) else {
            return false;
        };
        if self.lines[pos].quantity > 1 {
            self.lines[pos].quantity -= 1;
        } else {
            self.lines.remove(pos);
        }
        true
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, l| count.saturating_add(l.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Builds a marketplace order charged `subtotal + delivery_fee` and empties the cart.
    pub fn checkout(
        &mut self,
        delivery_fee: f64,
        route: Route,
    ) -> Result<OrderCreate, CheckoutError> {
        if self.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let total = self.subtotal() + delivery_fee;
        self.clear();
        Ok(OrderCreate::marketplace(total, delivery_fee).with_route(route))
    }
}

pub fn errand_order(details: ErrandDetails, route: Route) -> OrderCreate {
    OrderCreate::errand(details).with_route(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GeoPoint, OrderKind};

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add("p1", "Jollof Rice", 12.5, 2).unwrap();
        cart.add("p2", "Kelewele", 4.0, 1).unwrap();
        cart
    }

    #[test]
    fn test_add_merges_lines() {
        let mut cart = sample_cart();
        cart.add("p1", "Jollof Rice", 12.5, 1).unwrap();

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.subtotal(), 41.5);
    }

    #[test]
    fn test_add_rejects_zero_quantity() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add("p1", "Jollof Rice", 12.5, 0),
            Err(CheckoutError::InvalidQuantity("p1".to_string()))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_quantity_overflow() {
        let mut cart = Cart::new();
        cart.add("p1", "Jollof Rice", 12.5, u32::MAX).unwrap();
        assert_eq!(
            cart.add("p1", "Jollof Rice", 12.5, 1),
            Err(CheckoutError::InvalidQuantity("p1".to_string()))
        );
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_remove_one_decrements_then_drops() {
        let mut cart = sample_cart();

        assert!(cart.remove_one("p1"));
        assert_eq!(cart.lines()[0].quantity, 1);
        assert!(cart.remove_one("p1"));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].product_id, "p2");
        assert!(!cart.remove_one("p1"));
    }

    #[test]
    fn test_checkout_adds_fee() {
        let route = Route::new(GeoPoint::new(5.60, -0.18), GeoPoint::new(5.61, -0.17));
        let mut cart = sample_cart();
        let params = cart.checkout(5.0, route).unwrap();
        assert!(cart.is_empty());

        assert_eq!(params.kind, OrderKind::Marketplace);
        assert_eq!(params.total, 34.0);
        assert_eq!(params.delivery_fee, 5.0);
        assert_eq!(params.route, route);
    }

    #[test]
    fn test_checkout_empty_cart() {
        assert_eq!(
            Cart::new().checkout(5.0, Route::default()),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn test_errand_order_has_zero_total() {
        let details = ErrandDetails {
            shopping_list: "2 tins of milk, bread".to_string(),
            receipt_image: None,
            budget_limit: Some(50.0),
        };
        let params = errand_order(details.clone(), Route::default());

        assert_eq!(params.kind, OrderKind::Errand);
        assert_eq!(params.total, 0.0);
        assert_eq!(params.errand, Some(details));
    }
}
