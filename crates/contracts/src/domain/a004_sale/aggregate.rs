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

/// Venta a cliente
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sale {
    pub id: EntityId,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "cliente")]
    pub customer: String,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "metodoPago")]
    pub payment_method: String,
    #[serde(rename = "total")]
    pub amount: f64,
    #[serde(rename = "estado")]
    pub status: EntityStatus,
}

const ID: &[&str] = &["id_venta", "idVenta", "id"];
const CODE: &[&str] = &["numero_venta", "codigo"];
const CUSTOMER: &[&str] = &["nombre_cliente", "cliente"];
const DATE: &[&str] = &["fecha_venta", "fecha"];
const METHOD: &[&str] = &["metodo_pago", "metodoPago"];
const AMOUNT: &[&str] = &["total_venta", "total", "monto"];
const STATUS: &[&str] = &["estado", "activo"];

impl EntitySchema for Sale {
    const ENDPOINT: &'static str = "ventas";
    const LABEL: &'static str = "venta";
    const ID_KEYS: &'static [&'static str] = ID;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn display_name(&self) -> String {
        if self.code.is_empty() {
            format!("Venta #{}", self.id)
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
            customer: record.text(CUSTOMER),
            date: record.text(DATE),
            payment_method: record.text(METHOD),
            amount: record.decimal(AMOUNT),
            status: record.status(STATUS),
        }
    }

    fn to_wire(&self, mode: WireMode) -> Value {
        let mut body = json!({
            "numero_venta": self.code,
            "nombre_cliente": self.customer,
            "fecha_venta": self.date,
            "metodo_pago": self.payment_method,
            "total_venta": self.amount,
            "estado": self.status.label(),
        });
        if mode == WireMode::Update {
            body["id_venta"] = json!(self.id);
        }
        body
    }

    fn required_fields(&self) -> Vec<(&'static str, String)> {
        vec![("cliente", self.customer.clone()), ("fecha", self.date.clone())]
    }
}

impl DetailProjection for Sale {
    fn detail_fields(&self) -> Vec<DetailField> {
        vec![
            DetailField::new("Código", self.code.clone()),
            DetailField::new("Cliente", self.customer.clone()),
            DetailField::new("Fecha", format_date(&self.date)),
            DetailField::new("Método de pago", self.payment_method.clone()),
            DetailField::new("Total", format_money(self.amount)),
            DetailField::new("Estado", self.status.label()),
        ]
    }
}

impl EditableEntity for Sale {
    fn form_fields(&self) -> Vec<FormField> {
        vec![
            FormField::new("codigo", "Código", FieldKind::Text, self.code.clone()),
            FormField::new("cliente", "Cliente", FieldKind::Text, self.customer.clone()).required(),
            FormField::new("fecha", "Fecha", FieldKind::Date, self.date.clone()).required(),
            FormField::new("metodoPago", "Método de pago", FieldKind::Text, self.payment_method.clone()),
            FormField::new("total", "Total", FieldKind::Decimal, self.amount.to_string()),
        ]
    }

    fn apply_field(&mut self, key: &str, raw: &str) -> Result<(), ValidationError> {
        match key {
            "codigo" => self.code = raw.to_string(),
            "cliente" => self.customer = raw.to_string(),
            "fecha" => self.date = raw.to_string(),
            "metodoPago" => self.payment_method = raw.to_string(),
            "total" => self.amount = parse_decimal(key, raw)?,
            other => return Err(ValidationError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_body_carries_id_and_string_status() {
        let sale = Sale {
            id: 8,
            customer: "Ana".into(),
            date: "2024-01-09".into(),
            status: EntityStatus::Inactive,
            ..Default::default()
        };
        let body = sale.to_wire(WireMode::Update);
        assert_eq!(body["id_venta"], json!(8));
        assert_eq!(body["estado"], json!("Inactivo"));
        assert_eq!(body["nombre_cliente"], json!("Ana"));
    }

    #[test]
    fn test_roundtrip_through_backend_shape() {
        let sale = Sale {
            id: 8,
            code: "V-8".into(),
            customer: "Ana".into(),
            date: "2024-01-09".into(),
            payment_method: "Efectivo".into(),
            amount: 20.0,
            status: EntityStatus::Active,
        };
        assert_eq!(Sale::from_value(&sale.to_wire(WireMode::Update)), sale);
    }
}
