//! Presentation
//!
//! Text renderings of the cached lists: product and user tables and the
//! dashboard's stock bar chart.

use std::io;

use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{products::Product, users::User};

/// Currency prefix shown before prices in tables.
pub const CURRENCY_PREFIX: &str = "M";

/// Widest bar drawn by the stock chart.
pub const STOCK_CHART_WIDTH: usize = 40;

/// Shown on the dashboard in place of the chart and table.
pub const NO_PRODUCTS: &str = "No products have been added yet.";

const BAR_GLYPH: char = '█';

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the output failed.
    #[error("failed to write output")]
    Io(#[from] io::Error),
}

/// Write the product list as a table.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_products_table(
    mut out: impl io::Write,
    products: &[Product],
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Description", "Price", "Quantity"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.description.clone(),
            format!("{CURRENCY_PREFIX}{}", product.price.display()),
            product.quantity.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..5), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Write the user list as a table. Passwords are never shown.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_users_table(mut out: impl io::Write, users: &[User]) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Username"]);

    for user in users {
        builder.push_record([user.id.to_string(), user.username.clone()]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    writeln!(out, "{table}")?;

    Ok(())
}

/// One row of the stock chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockBar<'a> {
    /// Product name
    pub name: &'a str,

    /// Units in stock
    pub quantity: u64,

    /// Bar length in glyphs
    pub width: usize,
}

/// Scale product quantities into bars no wider than `max_width`.
///
/// The largest quantity gets the full width; any product with stock gets at
/// least one glyph.
#[must_use]
pub fn stock_chart(products: &[Product], max_width: usize) -> SmallVec<[StockBar<'_>; 16]> {
    let largest = products
        .iter()
        .map(|product| product.quantity)
        .max()
        .unwrap_or(0);

    products
        .iter()
        .map(|product| StockBar {
            name: &product.name,
            quantity: product.quantity,
            width: bar_width(product.quantity, largest, max_width),
        })
        .collect()
}

fn bar_width(quantity: u64, largest: u64, max_width: usize) -> usize {
    if quantity == 0 || largest == 0 {
        return 0;
    }

    let max_width_u128 = u128::try_from(max_width).unwrap_or(u128::MAX);
    let scaled = u128::from(quantity).saturating_mul(max_width_u128) / u128::from(largest);

    usize::try_from(scaled).unwrap_or(max_width).clamp(1, max_width.max(1))
}

/// Write the stock chart, one labelled bar per product.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_stock_chart(
    mut out: impl io::Write,
    products: &[Product],
) -> Result<(), RenderError> {
    let bars = stock_chart(products, STOCK_CHART_WIDTH);

    let label_width = bars
        .iter()
        .map(|bar| bar.name.chars().count())
        .max()
        .unwrap_or(0);

    for bar in &bars {
        let glyphs: String = std::iter::repeat_n(BAR_GLYPH, bar.width).collect();

        writeln!(
            out,
            "{name:<label_width$} │{glyphs} {quantity}",
            name = bar.name,
            quantity = bar.quantity,
        )?;
    }

    Ok(())
}

/// Write the dashboard: stock chart then product table, or [`NO_PRODUCTS`]
/// when the list is empty.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output cannot be written.
pub fn write_dashboard(mut out: impl io::Write, products: &[Product]) -> Result<(), RenderError> {
    if products.is_empty() {
        writeln!(out, "{NO_PRODUCTS}")?;

        return Ok(());
    }

    write_stock_chart(&mut out, products)?;
    write_products_table(&mut out, products)
}
