//! Products

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    ids::TypedId,
    price::Price,
    resource::{Resource, Resync},
    validation::{ValidationError, required},
};

/// Product Identifier
pub type ProductId = TypedId<Product>;

/// Product as held by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identifier
    #[serde(alias = "_id")]
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Unit price; missing or malformed prices are kept as unreadable
    #[serde(default)]
    pub price: Price,

    /// Units in stock
    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: u64,
}

impl Product {
    /// Request body that writes this product back unchanged.
    #[must_use]
    pub fn to_payload(&self) -> ProductPayload {
        ProductPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price.clone(),
            quantity: self.quantity,
        }
    }

    /// Request body for selling a single unit, or `None` when out of stock.
    #[must_use]
    pub fn sell_one(&self) -> Option<ProductPayload> {
        let quantity = self.quantity.checked_sub(1)?;

        Some(ProductPayload {
            quantity,
            ..self.to_payload()
        })
    }

    /// Whether at least one unit is in stock.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// Body of a product create or update request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    /// Product name
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Unit price
    pub price: Price,

    /// Units in stock
    pub quantity: u64,
}

/// Product form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    /// Product name
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Unit price
    pub price: String,

    /// Units in stock
    pub quantity: String,
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        let price = match &product.price {
            Price::Number(number) => number.to_string(),
            Price::Text(text) => text.clone(),
            Price::Other(Value::Null) => String::new(),
            Price::Other(value) => value.to_string(),
        };

        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price,
            quantity: product.quantity.to_string(),
        }
    }
}

impl TryFrom<&ProductDraft> for ProductPayload {
    type Error = ValidationError;

    fn try_from(draft: &ProductDraft) -> Result<Self, Self::Error> {
        let name = required("name", &draft.name)?;
        let description = required("description", &draft.description)?;
        let price = required("price", &draft.price)?;
        let quantity = required("quantity", &draft.quantity)?;

        let price = Decimal::from_str(price)
            .map_err(|_err| ValidationError::InvalidPrice(price.to_string()))?;

        let quantity = quantity
            .parse::<u64>()
            .map_err(|_err| ValidationError::InvalidQuantity(quantity.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            price: Price::from(price),
            quantity,
        })
    }
}

/// The products collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Products;

impl Resource for Products {
    type Entity = Product;
    type Draft = ProductDraft;
    type Payload = ProductPayload;

    const PATH: &'static str = "products";
    const SINGULAR: &'static str = "product";
    const PLURAL: &'static str = "products";
    const RESYNC: Resync = Resync::Refetch;

    fn id(entity: &Product) -> &ProductId {
        &entity.id
    }

    fn edit_draft(entity: &Product) -> ProductDraft {
        ProductDraft::from(entity)
    }

    fn validate(draft: &ProductDraft) -> Result<ProductPayload, ValidationError> {
        ProductPayload::try_from(draft)
    }
}

/// Quantities arrive as JSON integers or, from form-fed servers, numeric
/// strings.
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(u64),
        Text(String),
    }

    match Wire::deserialize(deserializer)? {
        Wire::Number(quantity) => Ok(quantity),
        Wire::Text(text) => text.trim().parse().map_err(|_err| {
            serde::de::Error::custom(format!("invalid quantity {text:?}"))
        }),
    }
}
