//! In-memory sample data used by the demo scenarios

use crate::core::path_update::Node;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub name: String,
    pub age: u32,
    pub city: String,
    pub active: bool,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    pub id: u32,
    pub name: String,
    pub quantity: u32,
}

fn product(id: u32, name: &str, price: f64, category: &str, in_stock: bool) -> Product {
    Product {
        id,
        name: name.to_string(),
        price,
        category: category.to_string(),
        in_stock,
    }
}

pub fn products() -> Vec<Product> {
    vec![
        product(1, "iPhone", 999.0, "electronics", true),
        product(2, "MacBook", 1999.0, "electronics", false),
        product(3, "T-shirt", 29.0, "clothing", true),
        product(4, "Jeans", 79.0, "clothing", true),
        product(5, "Book", 15.0, "education", false),
    ]
}

pub fn users() -> Vec<User> {
    vec![
        User {
            name: "John".to_string(),
            age: 25,
            city: "New York".to_string(),
            active: true,
            email: "JOHN@EXAMPLE.COM".to_string(),
        },
        User {
            name: "Jane".to_string(),
            age: 30,
            city: "Boston".to_string(),
            active: false,
            email: "jane@example.com".to_string(),
        },
    ]
}

pub fn cart() -> Vec<CartItem> {
    vec![
        CartItem {
            id: 1,
            name: "Product A".to_string(),
            quantity: 2,
        },
        CartItem {
            id: 2,
            name: "Product B".to_string(),
            quantity: 1,
        },
    ]
}

/// Nested user profile as a persistent tree
pub fn profile() -> Arc<Node> {
    Node::from_json(json!({
        "id": 1,
        "name": "John Doe",
        "address": { "city": "New York", "street": "123 Main St" },
        "preferences": { "theme": "dark", "notifications": true }
    }))
}
