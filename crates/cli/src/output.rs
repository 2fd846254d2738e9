//! Terminal output.

#![allow(clippy::print_stdout)]

use std::io::{self, BufRead, Write};

use frituur_core::{Category, Order, Price, Product};
use frituur_storefront::CartSummaryLine;

pub fn products(products: &[&Product]) {
    if products.is_empty() {
        println!("No products.");
        return;
    }
    for product in products {
        println!(
            "{:>4}  {:<28}  {:>8}  category {}",
            product.id, product.name, product.price, product.category_id
        );
        if let Some(description) = &product.description {
            println!("      {description}");
        }
    }
}

pub fn categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories.");
        return;
    }
    for category in categories {
        println!("{:>4}  {}", category.id, category.name);
    }
}

pub fn orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("No orders.");
        return;
    }
    for order in orders {
        println!(
            "{:>4}  customer {:<6}  pickup {}  {} item(s)",
            order.id,
            order.customer_id,
            order.pickup.format("%Y-%m-%d %H:%M"),
            order.product_ids.len()
        );
    }
}

pub fn cart(summary: &[CartSummaryLine<'_>], total: Price) {
    for line in summary {
        println!(
            "{:>3} x {:<28}  {:>8}",
            line.quantity, line.product.name, line.line_total
        );
    }
    println!("{:>43}", format!("Total {total}"));
}

pub fn saved(kind: &str, id: impl std::fmt::Display, name: &str) {
    println!("Saved {kind} {id}: {name}");
}

pub fn deleted(kind: &str, id: impl std::fmt::Display) {
    println!("Deleted {kind} {id}");
}

pub fn placed(order: &Order) {
    println!(
        "Order {} placed, pickup at {}",
        order.id,
        order.pickup.format("%H:%M")
    );
}

/// Show the confirmation dialog and read a yes/no answer.
pub fn confirm(title: &str, warning: &str) -> io::Result<bool> {
    println!("{title}");
    println!("{warning}");
    print!("Type 'yes' to confirm: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
