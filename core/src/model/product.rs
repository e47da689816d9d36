// catalog_core/src/model/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A persisted product, as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  pub price: Decimal,
  pub product_image: Option<String>,
  pub expiry_date: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// The record handed to `ProductStore::create`. Bookkeeping timestamps are the store's job.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
  pub id: Uuid,
  pub name: String,
  pub price: Decimal,
  pub product_image: Option<String>,
  pub expiry_date: DateTime<Utc>,
}

/// A partial update. `None` means "leave the stored value untouched".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
  pub name: Option<String>,
  pub price: Option<Decimal>,
}

impl ProductChanges {
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.price.is_none()
  }

  /// Applies the present fields to `product`, leaving the rest as they are.
  pub fn apply_to(&self, product: &mut Product) {
    if let Some(name) = &self.name {
      product.name = name.clone();
    }
    if let Some(price) = self.price {
      product.price = price;
    }
  }
}

/// The accepted, writable product fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
  Name,
  Price,
}

impl ProductField {
  pub const ALL: [ProductField; 2] = [ProductField::Name, ProductField::Price];

  pub fn as_str(&self) -> &'static str {
    match self {
      ProductField::Name => "name",
      ProductField::Price => "price",
    }
  }

  pub fn from_key(key: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|f| f.as_str() == key)
  }
}

/// Raw, unvalidated text values submitted by a client.
///
/// Only whitelisted fields are kept; everything else lands in `ignored`
/// so callers can log it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFields {
  pub name: Option<String>,
  pub price: Option<String>,
  pub ignored: Vec<String>,
}

impl ProductFields {
  pub fn get(&self, field: ProductField) -> Option<&str> {
    match field {
      ProductField::Name => self.name.as_deref(),
      ProductField::Price => self.price.as_deref(),
    }
  }

  fn set(&mut self, field: ProductField, value: String) {
    match field {
      ProductField::Name => self.name = Some(value),
      ProductField::Price => self.price = Some(value),
    }
  }

  /// Builds the field set from form-style key/value pairs. The first value for a key wins.
  pub fn from_pairs<I, K, V>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    let mut fields = ProductFields::default();
    for (key, value) in pairs {
      let key = key.into();
      match ProductField::from_key(&key) {
        Some(field) if fields.get(field).is_none() => fields.set(field, value.into()),
        Some(_) => {}
        None => fields.ignored.push(key),
      }
    }
    fields
  }

  /// Builds the field set from a JSON object body.
  ///
  /// Strings are taken verbatim, numbers keep their submitted JSON text
  /// (serde_json's `arbitrary_precision`), and `null` counts as
  /// a present-but-empty value so it cannot clear a required field.
  pub fn from_json(body: &Map<String, Value>) -> Self {
    Self::from_pairs(body.iter().map(|(key, value)| {
      let text = match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
      };
      (key.clone(), text)
    }))
  }
}
