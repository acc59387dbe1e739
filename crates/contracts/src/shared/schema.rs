//! Per-entity schema contract
//!
//! Every feature module (categories, products, purchases, sales, roles,
//! users) implements the same three traits on its view type. The generic
//! client, list, detail and editor code is written once against them.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::status::EntityStatus;
use super::validation::{require_fields, ValidationError};
use super::wire::{WireMode, WireRecord};

/// Identifier of a backend record
pub type EntityId = i64;

/// Mapping between the backend wire shape and the frontend view shape.
pub trait EntitySchema:
    Clone + std::fmt::Debug + PartialEq + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Default endpoint segment, e.g. `categorias`
    const ENDPOINT: &'static str;
    /// Singular label used in log lines and messages
    const LABEL: &'static str;
    /// Backend and view spellings of the id field
    const ID_KEYS: &'static [&'static str];

    fn id(&self) -> EntityId;
    fn set_id(&mut self, id: EntityId);

    /// Name shown in confirmations ("¿Eliminar «...»?")
    fn display_name(&self) -> String;

    fn status(&self) -> EntityStatus;
    fn set_status(&mut self, status: EntityStatus);

    /// Backend record (or an already mapped view object) to view shape.
    /// Never fails: absent fields take their defaults.
    fn from_wire(record: &WireRecord<'_>) -> Self;

    /// View shape to backend record. `WireMode::Create` omits the id.
    fn to_wire(&self, mode: WireMode) -> Value;

    /// `(field key, current value)` for every field an update must carry
    fn required_fields(&self) -> Vec<(&'static str, String)>;

    fn validate_required(&self) -> Result<(), ValidationError> {
        require_fields(&self.required_fields())
    }

    fn from_value(value: &Value) -> Self {
        Self::from_wire(&WireRecord::new(value))
    }

    /// Whether `value` is a record of this entity rather than, say, a bare
    /// `{"message": ...}` acknowledgement
    fn carries_id(value: &Value) -> bool {
        WireRecord::new(value).has_any(Self::ID_KEYS)
    }
}

/// One labelled line of a read-only detail view
#[derive(Debug, Clone, PartialEq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
    /// Derived alert lines (e.g. low stock) are highlighted by the view
    pub alert: bool,
}

impl DetailField {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            alert: false,
        }
    }

    pub fn alert(label: &'static str, value: impl Into<String>, alert: bool) -> Self {
        Self {
            label,
            value: value.into(),
            alert,
        }
    }
}

/// Read-only projection rendered by the detail modal
pub trait DetailProjection {
    fn detail_fields(&self) -> Vec<DetailField>;
}

/// Input kind of an editable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Date,
    Integer,
    Decimal,
    /// Comma separated list of strings
    List,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
}

impl FormField {
    pub fn new(key: &'static str, label: &'static str, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            key,
            label,
            kind,
            value: value.into(),
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Create/edit form contract
pub trait EditableEntity {
    fn form_fields(&self) -> Vec<FormField>;

    /// Apply a raw string edit to the field identified by `key`
    fn apply_field(&mut self, key: &str, raw: &str) -> Result<(), ValidationError>;
}

pub fn parse_integer(field: &str, raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| ValidationError::InvalidNumber {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

pub fn parse_decimal(field: &str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| ValidationError::InvalidNumber {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// Empty string for unset foreign keys, so `require_fields` treats them as missing
pub fn id_value(id: EntityId) -> String {
    if id > 0 {
        id.to_string()
    } else {
        String::new()
    }
}
