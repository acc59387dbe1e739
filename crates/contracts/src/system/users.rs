use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::shared::schema::{
    id_value, parse_integer, DetailField, DetailProjection, EditableEntity, EntityId, EntitySchema,
    FieldKind, FormField,
};
use crate::shared::status::EntityStatus;
use crate::shared::validation::ValidationError;
use crate::shared::wire::{WireMode, WireRecord};

/// Console user account
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "idRol")]
    pub role_id: EntityId,
    /// Role name as joined by the backend, display only
    #[serde(rename = "rol")]
    pub role_name: String,
    #[serde(rename = "estado")]
    pub status: EntityStatus,
}

const ID: &[&str] = &["id_usuario", "idUsuario", "id"];
const NAME: &[&str] = &["nombre_usuario", "nombre"];
const EMAIL: &[&str] = &["correo", "email"];
const ROLE_ID: &[&str] = &["id_rol", "idRol"];
const ROLE_NAME: &[&str] = &["nombre_rol", "rol"];
const STATUS: &[&str] = &["estado", "activo"];

impl EntitySchema for User {
    const ENDPOINT: &'static str = "usuarios";
    const LABEL: &'static str = "usuario";
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
            name: record.text(NAME),
            email: record.text(EMAIL),
            role_id: record.int(ROLE_ID),
            role_name: record.text(ROLE_NAME),
            status: record.status(STATUS),
        }
    }

    fn to_wire(&self, mode: WireMode) -> Value {
        let mut body = json!({
            "nombre_usuario": self.name,
            "correo": self.email,
            "id_rol": self.role_id,
            "estado": self.status.label(),
        });
        if mode == WireMode::Update {
            body["id_usuario"] = json!(self.id);
        }
        body
    }

    fn required_fields(&self) -> Vec<(&'static str, String)> {
        vec![("nombre", self.name.clone()), ("email", self.email.clone())]
    }
}

impl DetailProjection for User {
    fn detail_fields(&self) -> Vec<DetailField> {
        vec![
            DetailField::new("Nombre", self.name.clone()),
            DetailField::new("Email", self.email.clone()),
            DetailField::new("Rol", self.role_name.clone()),
            DetailField::new("Estado", self.status.label()),
        ]
    }
}

impl EditableEntity for User {
    fn form_fields(&self) -> Vec<FormField> {
        vec![
            FormField::new("nombre", "Nombre", FieldKind::Text, self.name.clone()).required(),
            FormField::new("email", "Email", FieldKind::Email, self.email.clone()).required(),
            FormField::new("idRol", "Rol (id)", FieldKind::Integer, id_value(self.role_id)),
        ]
    }

    fn apply_field(&mut self, key: &str, raw: &str) -> Result<(), ValidationError> {
        match key {
            "nombre" => self.name = raw.to_string(),
            "email" => self.email = raw.trim().to_string(),
            "idRol" => self.role_id = parse_integer(key, raw)?,
            other => return Err(ValidationError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}
