use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::shared::format::format_money;
use crate::shared::schema::{
    id_value, parse_decimal, parse_integer, DetailField, DetailProjection, EditableEntity, EntityId,
    EntitySchema, FieldKind, FormField,
};
use crate::shared::status::EntityStatus;
use crate::shared::validation::ValidationError;
use crate::shared::wire::{WireMode, WireRecord};

// ============================================================================
// View shape
// ============================================================================

/// Producto del inventario
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "idCategoria")]
    pub category_id: EntityId,
    /// Category name as joined by the backend, display only
    #[serde(rename = "categoria")]
    pub category_name: String,
    #[serde(rename = "precio")]
    pub price: f64,
    pub stock: i64,
    #[serde(rename = "stockMinimo")]
    pub min_stock: i64,
    #[serde(rename = "estado")]
    pub status: EntityStatus,
}

impl Product {
    /// Stock at or below the configured minimum
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }
}

// ============================================================================
// Backend mapping
// ============================================================================

const ID: &[&str] = &["id_producto", "idProducto", "id"];
const CODE: &[&str] = &["codigo_producto", "codigo"];
const NAME: &[&str] = &["nombre_producto", "nombre"];
const CATEGORY_ID: &[&str] = &["id_categoria", "idCategoria"];
const CATEGORY_NAME: &[&str] = &["nombre_categoria", "categoria"];
const PRICE: &[&str] = &["precio_venta", "precio"];
const STOCK: &[&str] = &["stock_actual", "stock"];
const MIN_STOCK: &[&str] = &["stock_minimo", "stockMinimo"];
const STATUS: &[&str] = &["estado", "activo"];

impl EntitySchema for Product {
    const ENDPOINT: &'static str = "productos";
    const LABEL: &'static str = "producto";
    const ID_KEYS: &'static [&'static str] = ID;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn status(&self) -> EntityStatus {
        self.status
    }

    fn set_status(&mut self, status: EntityStatus) {
        self.status = status;
    }

    fn from_wire(record: &WireRecord<'_>) -> Self {
        Self {
            id: record.int(ID),
            code: record.text(CODE),
            name: record.text(NAME),
            category_id: record.int(CATEGORY_ID),
            category_name: record.text(CATEGORY_NAME),
            price: record.decimal(PRICE),
            stock: record.int(STOCK),
            min_stock: record.int(MIN_STOCK),
            status: record.status(STATUS),
        }
    }

    fn to_wire(&self, mode: WireMode) -> Value {
        let mut body = json!({
            "codigo_producto": self.code,
            "nombre_producto": self.name,
            "id_categoria": self.category_id,
            "precio_venta": self.price,
            "stock_actual": self.stock,
            "stock_minimo": self.min_stock,
            "estado": self.status.label(),
        });
        if mode == WireMode::Update {
            body["id_producto"] = json!(self.id);
        }
        body
    }

    fn required_fields(&self) -> Vec<(&'static str, String)> {
        vec![("idCategoria", id_value(self.category_id)), ("nombre", self.name.clone())]
    }
}

impl DetailProjection for Product {
    fn detail_fields(&self) -> Vec<DetailField> {
        let low = self.is_low_stock();
        vec![
            DetailField::new("Código", self.code.clone()),
            DetailField::new("Nombre", self.name.clone()),
            DetailField::new("Categoría", self.category_name.clone()),
            DetailField::new("Precio", format_money(self.price)),
            DetailField::new("Stock", self.stock.to_string()),
            DetailField::new("Stock mínimo", self.min_stock.to_string()),
            DetailField::alert("Alerta de stock", if low { "Stock bajo" } else { "Normal" }, low),
            DetailField::new("Estado", self.status.label()),
        ]
    }
}

impl EditableEntity for Product {
    fn form_fields(&self) -> Vec<FormField> {
        vec![
            FormField::new("codigo", "Código", FieldKind::Text, self.code.clone()),
            FormField::new("nombre", "Nombre", FieldKind::Text, self.name.clone()).required(),
            FormField::new("idCategoria", "Categoría (id)", FieldKind::Integer, id_value(self.category_id))
                .required(),
            FormField::new("precio", "Precio", FieldKind::Decimal, self.price.to_string()),
            FormField::new("stock", "Stock", FieldKind::Integer, self.stock.to_string()),
            FormField::new("stockMinimo", "Stock mínimo", FieldKind::Integer, self.min_stock.to_string()),
        ]
    }

    fn apply_field(&mut self, key: &str, raw: &str) -> Result<(), ValidationError> {
        match key {
            "codigo" => self.code = raw.to_string(),
            "nombre" => self.name = raw.to_string(),
            "idCategoria" => self.category_id = parse_integer(key, raw)?,
            "precio" => self.price = parse_decimal(key, raw)?,
            "stock" => self.stock = parse_integer(key, raw)?,
            "stockMinimo" => self.min_stock = parse_integer(key, raw)?,
            other => return Err(ValidationError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}
