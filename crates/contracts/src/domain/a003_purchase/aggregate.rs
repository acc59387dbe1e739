use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::shared::format::{format_date, format_money};
use crate::shared::schema::{
    parse_decimal, DetailField, DetailProjection, EditableEntity, EntityId, EntitySchema, FieldKind,
    FormField,
};
use crate::shared::status::EntityStatus;
use crate::shared::validation::ValidationError;
use crate::shared::wire::{WireMode, WireRecord};

/// Compra a proveedor
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Purchase {
    pub id: EntityId,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "proveedor")]
    pub supplier: String,
    /// ISO date, `YYYY-MM-DD`
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "metodoPago")]
    pub payment_method: String,
    #[serde(rename = "total")]
    pub amount: f64,
    #[serde(rename = "estado")]
    pub status: EntityStatus,
}

const ID: &[&str] = &["id_compra", "idCompra", "id"];
const CODE: &[&str] = &["numero_compra", "codigo"];
const SUPPLIER: &[&str] = &["nombre_proveedor", "proveedor"];
const DATE: &[&str] = &["fecha_compra", "fecha"];
const METHOD: &[&str] = &["metodo_pago", "metodoPago"];
const AMOUNT: &[&str] = &["total_compra", "total", "monto"];
const STATUS: &[&str] = &["estado", "activo"];

impl EntitySchema for Purchase {
    const ENDPOINT: &'static str = "compras";
    const LABEL: &'static str = "compra";
    const ID_KEYS: &'static [&'static str] = ID;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn display_name(&self) -> String {
        if self.code.is_empty() {
            format!("Compra #{}", self.id)
        } else {
            self.code.clone()
        }
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
            supplier: record.text(SUPPLIER),
            date: record.text(DATE),
            payment_method: record.text(METHOD),
            amount: record.decimal(AMOUNT),
            status: record.status(STATUS),
        }
    }

    fn to_wire(&self, mode: WireMode) -> Value {
        let mut body = json!({
            "numero_compra": self.code,
            "nombre_proveedor": self.supplier,
            "fecha_compra": self.date,
            "metodo_pago": self.payment_method,
            "total_compra": self.amount,
            "estado": self.status.label(),
        });
        if mode == WireMode::Update {
            body["id_compra"] = json!(self.id);
        }
        body
    }

    fn required_fields(&self) -> Vec<(&'static str, String)> {
        vec![("proveedor", self.supplier.clone()), ("fecha", self.date.clone())]
    }
}

impl DetailProjection for Purchase {
    fn detail_fields(&self) -> Vec<DetailField> {
        vec![
            DetailField::new("Código", self.code.clone()),
            DetailField::new("Proveedor", self.supplier.clone()),
            DetailField::new("Fecha", format_date(&self.date)),
            DetailField::new("Método de pago", self.payment_method.clone()),
            DetailField::new("Total", format_money(self.amount)),
            DetailField::new("Estado", self.status.label()),
        ]
    }
}

impl EditableEntity for Purchase {
    fn form_fields(&self) -> Vec<FormField> {
        vec![
            FormField::new("codigo", "Código", FieldKind::Text, self.code.clone()),
            FormField::new("proveedor", "Proveedor", FieldKind::Text, self.supplier.clone()).required(),
            FormField::new("fecha", "Fecha", FieldKind::Date, self.date.clone()).required(),
            FormField::new("metodoPago", "Método de pago", FieldKind::Text, self.payment_method.clone()),
            FormField::new("total", "Total", FieldKind::Decimal, self.amount.to_string()),
        ]
    }

    fn apply_field(&mut self, key: &str, raw: &str) -> Result<(), ValidationError> {
        match key {
            "codigo" => self.code = raw.to_string(),
            "proveedor" => self.supplier = raw.to_string(),
            "fecha" => self.date = raw.to_string(),
            "metodoPago" => self.payment_method = raw.to_string(),
            "total" => self.amount = parse_decimal(key, raw)?,
            other => return Err(ValidationError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}
