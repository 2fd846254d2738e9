//! Session-local cart.
//!
//! A cart is an ordered list of products. Adding the same product twice adds
//! two lines; the quantity of a product is the number of lines holding it.
//! Carts live for one ordering session and are never persisted.

use frituur_core::{Price, Product, ProductId};

/// An ordered list of selected products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<Product>,
}

/// One product in the grouped cart view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummaryLine<'a> {
    pub product: &'a Product,
    pub quantity: u32,
    pub line_total: Price,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one unit of `product`.
    pub fn add(&mut self, product: Product) {
        self.lines.push(product);
    }

    /// Remove every unit of the product, returning how many were removed.
    pub fn remove(&mut self, id: ProductId) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        before - self.lines.len()
    }

    /// Remove the most recently added unit of the product.
    ///
    /// Returns false if the product was not in the cart.
    pub fn remove_one(&mut self, id: ProductId) -> bool {
        match self.lines.iter().rposition(|line| line.id == id) {
            Some(index) => {
                self.lines.remove(index);
                true
            }
            None => false,
        }
    }

    /// Sum of the prices of all lines; zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(|line| line.price).sum()
    }

    /// Number of lines (units), not distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// How many units of the product are in the cart.
    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> usize {
        self.lines.iter().filter(|line| line.id == id).count()
    }

    /// One ID per line, in order; this is what an order carries.
    #[must_use]
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.lines.iter().map(|line| line.id).collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines grouped by product, in order of first addition.
    #[must_use]
    pub fn summary(&self) -> Vec<CartSummaryLine<'_>> {
        let mut summary: Vec<CartSummaryLine<'_>> = Vec::new();
        for line in &self.lines {
            match summary.iter_mut().find(|s| s.product.id == line.id) {
                Some(entry) => {
                    entry.quantity += 1;
                    entry.line_total = line.price.times(entry.quantity);
                }
                None => summary.push(CartSummaryLine {
                    product: line,
                    quantity: 1,
                    line_total: line.price,
                }),
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use frituur_core::CategoryId;

    use super::*;

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: None,
            price: Price::from_cents(cents),
            url: None,
            category_id: CategoryId::new(1),
        }
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_total_is_sum_of_added_prices() {
        let mut cart = Cart::new();
        let items = [product(1, 250), product(2, 75), product(1, 250), product(3, 1)];
        let mut expected = Price::ZERO;
        for item in items {
            let before = cart.total();
            expected = expected + item.price;
            cart.add(item);
            assert!(cart.total() >= before);
            assert_eq!(cart.total(), expected);
        }
        assert_eq!(cart.total(), Price::from_cents(576));
    }

    #[test]
    fn test_add_does_not_dedup() {
        let mut cart = Cart::new();
        cart.add(product(1, 250));
        cart.add(product(1, 250));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.quantity_of(ProductId::new(1)), 2);
    }

    #[test]
    fn test_remove_takes_out_every_unit() {
        let mut cart = Cart::new();
        cart.add(product(1, 250));
        cart.add(product(2, 100));
        cart.add(product(1, 250));

        let removed = cart.remove(ProductId::new(1));

        assert_eq!(removed, 2);
        assert_eq!(cart.total(), Price::from_cents(100));
        assert_eq!(cart.product_ids(), vec![ProductId::new(2)]);
    }

    #[test]
    fn test_remove_missing_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(product(1, 250));
        assert_eq!(cart.remove(ProductId::new(9)), 0);
        assert_eq!(cart.total(), Price::from_cents(250));
    }

    #[test]
    fn test_remove_one_takes_out_a_single_unit() {
        let mut cart = Cart::new();
        cart.add(product(1, 250));
        cart.add(product(2, 100));
        cart.add(product(1, 250));

        assert!(cart.remove_one(ProductId::new(1)));
        assert_eq!(cart.total(), Price::from_cents(350));
        assert_eq!(
            cart.product_ids(),
            vec![ProductId::new(1), ProductId::new(2)]
        );
        assert!(!cart.remove_one(ProductId::new(9)));
    }

    #[test]
    fn test_summary_groups_in_first_added_order() {
        let mut cart = Cart::new();
        cart.add(product(2, 100));
        cart.add(product(1, 250));
        cart.add(product(2, 100));

        let summary = cart.summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].product.id, ProductId::new(2));
        assert_eq!(summary[0].quantity, 2);
        assert_eq!(summary[0].line_total, Price::from_cents(200));
        assert_eq!(summary[1].quantity, 1);
        let grouped: Price = summary.iter().map(|line| line.line_total).sum();
        assert_eq!(grouped, cart.total());
    }
}
