//! Demo scenarios exercising the functional core on sample data
//!
//! Each section returns plain values; [`render`] turns a whole report into the
//! text the CLI prints, and the report also serialises to JSON.

pub mod catalog;
pub mod fetch;
pub mod sample;

use crate::config::FnkitConfig;
use crate::core::collections::{append, remove_where, sum_by, update_where};
use crate::core::compose::{compose, partial, pipe, Stage};
use crate::core::group::{group_by, group_by_with, GroupOptions, Groups};
use crate::core::path_update::{get, update, KeyPath, Node};
use crate::core::{Counter, Form};
use crate::debounce::Debouncer;
use crate::error::{FnkitError, Result};
use catalog::{ProductQuery, SortOrder};
use fetch::{process_user_data, ProcessedUser};
use sample::{CartItem, Product, User};
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub array_methods: ArrayMethods,
    pub functions: Functions,
    pub immutability: Immutability,
    pub async_fp: AsyncFp,
    pub components: Components,
    pub practice: Practice,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayMethods {
    pub product_names: Vec<String>,
    pub discounted_prices: Vec<String>,
    pub available_products: Vec<String>,
    pub expensive_products: Vec<String>,
    pub total_price: f64,
    pub categories: Vec<String>,
    pub in_stock_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Functions {
    pub square: i64,
    pub sum: i64,
    pub greeting: String,
    pub counter: Vec<i64>,
    pub double: i64,
    pub triple: i64,
    pub composed: i64,
    pub piped: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Immutability {
    pub original_name: String,
    pub updated_name: String,
    pub updated_theme: String,
    pub updated_cart_len: usize,
    pub updated_quantity: u32,
    pub filtered_cart_len: usize,
    pub original_city: String,
    pub new_city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsyncFp {
    pub processed: ProcessedUser,
}

/// Product listing and item rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Components {
    pub listing: Listing,
    pub searched: Listing,
    pub item: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub query: ProductQuery,
    pub count: usize,
    /// The first two matches
    pub top: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Practice {
    pub users_by_city: Groups<String, String>,
    pub normalized_emails: Vec<String>,
    pub submitted_form: serde_json::Value,
    pub debounced: String,
}

/// Run every section with the given configuration
pub async fn run_all(config: &FnkitConfig) -> Result<DemoReport> {
    let products = sample::products();
    let users = sample::users();

    info!("Running demo sections");
    let report = DemoReport {
        array_methods: array_methods(&products),
        functions: functions(),
        immutability: immutability(&sample::profile(), &sample::cart())?,
        async_fp: async_fp(config.fetch.latency()).await,
        components: components(&products),
        practice: practice(&users, config.debounce.delay()).await?,
    };
    debug!("Demo finished");
    Ok(report)
}

pub fn array_methods(products: &[Product]) -> ArrayMethods {
    let names = |items: Vec<&Product>| -> Vec<String> {
        items.iter().map(|p| p.name.clone()).collect()
    };

    let in_stock: Vec<Product> = products.iter().filter(|p| p.in_stock).cloned().collect();

    ArrayMethods {
        product_names: products.iter().map(|p| p.name.clone()).collect(),
        discounted_prices: products
            .iter()
            .map(|p| format!("{}: ${:.0}", p.name, p.price * 0.9 - 10.0))
            .collect(),
        available_products: names(products.iter().filter(|p| p.in_stock).collect()),
        expensive_products: names(products.iter().filter(|p| p.price > 100.0).collect()),
        total_price: sum_by(products, |p| p.price),
        categories: group_by(products, |p| p.category.clone())
            .keys()
            .cloned()
            .collect(),
        in_stock_total: sum_by(&in_stock, |p| p.price),
    }
}

pub fn functions() -> Functions {
    let square = |x: i64| x * x;
    let add = |a: i64, b: i64| a + b;
    let greet = |name: &str| format!("Hello, {}!", name);

    let mut counter = Counter::new();
    let counts = vec![counter.increment(), counter.increment(), counter.get()];

    let multiply = |a: i64, b: i64| a * b;
    let double = partial(multiply, 2);
    let triple = partial(multiply, 3);

    let add5 = |x: i64| x + 5;
    let multiply3 = |x: i64| x * 3;
    let subtract10 = |x: i64| x - 10;
    let composed = compose(vec![
        Box::new(subtract10) as Stage<i64>,
        Box::new(multiply3),
        Box::new(add5),
    ]);
    let piped = pipe(vec![
        Box::new(add5) as Stage<i64>,
        Box::new(multiply3),
        Box::new(subtract10),
    ]);

    Functions {
        square: square(5),
        sum: add(3, 4),
        greeting: greet("John"),
        counter: counts,
        double: double(5),
        triple: triple(5),
        composed: composed(5),
        piped: piped(5),
    }
}

pub fn immutability(profile: &Arc<Node>, cart: &[CartItem]) -> Result<Immutability> {
    let renamed = update(profile, &KeyPath::parse("name"), Node::leaf("Jane Doe"))?;
    let updated = update(
        &renamed,
        &KeyPath::parse("preferences.theme"),
        Node::leaf("light"),
    )?;

    let updated_cart = append(
        cart,
        CartItem {
            id: 3,
            name: "Product C".to_string(),
            quantity: 1,
        },
    );
    let bumped = update_where(
        cart,
        |item| item.id == 1,
        |item| CartItem {
            quantity: item.quantity + 1,
            ..item.clone()
        },
    );
    let filtered = remove_where(cart, |item| item.id == 2);

    let moved = update(profile, &KeyPath::parse("address.city"), Node::leaf("Boston"))?;

    Ok(Immutability {
        original_name: leaf_string(profile, "name")?,
        updated_name: leaf_string(&updated, "name")?,
        updated_theme: leaf_string(&updated, "preferences.theme")?,
        updated_cart_len: updated_cart.len(),
        updated_quantity: bumped.first().map_or(0, |item| item.quantity),
        filtered_cart_len: filtered.len(),
        original_city: leaf_string(profile, "address.city")?,
        new_city: leaf_string(&moved, "address.city")?,
    })
}

fn leaf_string(root: &Arc<Node>, dotted: &str) -> Result<String> {
    let path = KeyPath::parse(dotted);
    match get(root, &path).map(|node| node.to_json()) {
        Some(serde_json::Value::String(text)) => Ok(text),
        _ => Err(FnkitError::other(format!("'{}' is not a string leaf", dotted))),
    }
}

pub async fn async_fp(latency: Duration) -> AsyncFp {
    AsyncFp {
        processed: process_user_data(1, latency).await,
    }
}

pub fn components(products: &[Product]) -> Components {
    let listing = |query: ProductQuery| {
        let matching = query.apply(products);
        Listing {
            count: matching.len(),
            top: matching.iter().take(2).map(|p| p.name.clone()).collect(),
            query,
        }
    };

    let mut search = ProductQuery::new();
    search.set_filter("book");
    search.set_order(SortOrder::Desc);

    Components {
        listing: listing(ProductQuery::new()),
        searched: listing(search),
        item: products.first().map(catalog::describe).unwrap_or_default(),
    }
}

/// Fill in a sign-up form and submit it
pub fn submit_form() -> serde_json::Value {
    let mut form = Form::new([("name", ""), ("email", "")]);
    form.set_value("name", "John");
    form.set_value("email", "john@example.com");
    form.submit()
}

/// Active users' names grouped by city
pub fn process_users(users: &[User]) -> Groups<String, String> {
    group_by_with(
        users,
        |user| user.city.clone(),
        GroupOptions::new()
            .filter(|user: &User| user.active)
            .transform(|user| user.name.clone()),
    )
}

/// Trimmed, lower-cased e-mails of active users
pub fn normalized_emails(users: &[User]) -> Vec<String> {
    let normalize = crate::pipe!(|email: &str| email.trim().to_string(), |email: String| {
        email.to_lowercase()
    });
    users
        .iter()
        .filter(|user| user.active)
        .map(|user| normalize(user.email.as_str()))
        .collect()
}

pub async fn practice(users: &[User], delay: Duration) -> Result<Practice> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let logger = Debouncer::from_fn(delay, move |text: String| {
        let _ = tx.send(format!("Debounced: {}", text));
    });
    logger.call("test debounce".to_string())?;

    let debounced = rx
        .recv()
        .await
        .ok_or_else(|| FnkitError::other("Debounced logger never fired"))?;

    Ok(Practice {
        users_by_city: process_users(users),
        normalized_emails: normalized_emails(users),
        submitted_form: submit_form(),
        debounced,
    })
}

/// Render the report as console text
pub fn render(report: &DemoReport) -> Result<String> {
    let users_by_city = serde_json::to_string(&report.practice.users_by_city)?;
    let form = serde_json::to_string(&report.practice.submitted_form)?;

    let mut out = String::new();
    write_sections(&mut out, report, &users_by_city, &form)
        .map_err(|e| FnkitError::other("Failed to render demo report").with_source(e))?;
    Ok(out)
}

fn write_sections(
    out: &mut String,
    report: &DemoReport,
    users_by_city: &str,
    form: &str,
) -> fmt::Result {
    let a = &report.array_methods;
    let f = &report.functions;
    let i = &report.immutability;
    let c = &report.components;
    let p = &report.practice;

    writeln!(out, "1. ARRAY METHODS")?;
    writeln!(out, "  product names: {:?}", a.product_names)?;
    writeln!(out, "  discounted prices: {:?}", a.discounted_prices)?;
    writeln!(out, "  available products: {:?}", a.available_products)?;
    writeln!(out, "  expensive products: {:?}", a.expensive_products)?;
    writeln!(out, "  total price: {}", a.total_price)?;
    writeln!(out, "  categories: {:?}", a.categories)?;
    writeln!(out, "  in-stock total: {}", a.in_stock_total)?;

    writeln!(out, "2. FUNCTIONS & CLOSURES")?;
    writeln!(out, "  square of 5: {}", f.square)?;
    writeln!(out, "  add 3 and 4: {}", f.sum)?;
    writeln!(out, "  greet: {}", f.greeting)?;
    writeln!(out, "  counter: {:?}", f.counter)?;
    writeln!(out, "  double 5: {}", f.double)?;
    writeln!(out, "  triple 5: {}", f.triple)?;
    writeln!(out, "  composed(5): {}", f.composed)?;
    writeln!(out, "  piped(5): {}", f.piped)?;

    writeln!(out, "3. IMMUTABILITY")?;
    writeln!(out, "  original user: {}", i.original_name)?;
    writeln!(out, "  updated user: {} {}", i.updated_name, i.updated_theme)?;
    writeln!(out, "  updated cart length: {}", i.updated_cart_len)?;
    writeln!(out, "  updated quantity: {}", i.updated_quantity)?;
    writeln!(out, "  filtered cart length: {}", i.filtered_cart_len)?;
    writeln!(out, "  new city: {} (was {})", i.new_city, i.original_city)?;

    writeln!(out, "4. ASYNC")?;
    writeln!(out, "  processed user: {}", report.async_fp.processed.data)?;

    writeln!(out, "5. COMPONENTS")?;
    for listing in [&c.listing, &c.searched] {
        writeln!(
            out,
            "  filter {:?}, sort {:?}: {} products, top {:?}",
            listing.query.filter(),
            listing.query.order(),
            listing.count,
            listing.top
        )?;
    }
    writeln!(out, "  item: {}", c.item)?;

    writeln!(out, "6. PRACTICE")?;
    writeln!(out, "  users by city: {}", users_by_city)?;
    writeln!(out, "  normalized emails: {:?}", p.normalized_emails)?;
    writeln!(out, "  form submitted: {}", form)?;
    writeln!(out, "  {}", p.debounced)?;
    Ok(())
}
