use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::shared::schema::{
    DetailField, DetailProjection, EditableEntity, EntityId, EntitySchema, FieldKind, FormField,
};
use crate::shared::status::EntityStatus;
use crate::shared::validation::ValidationError;
use crate::shared::wire::{WireMode, WireRecord};

// ============================================================================
// Role
// ============================================================================

/// Role with the console modules it may open.
///
/// `modules` holds the legacy `"<section>-<path>"` keys exactly as stored by
/// the backend; see [`crate::system::menu`] for how they resolve.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Role {
    pub id: EntityId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "modulos")]
    pub modules: Vec<String>,
    #[serde(rename = "cantidadPermisos")]
    pub permission_count: i64,
    #[serde(rename = "estado")]
    pub status: EntityStatus,
}

const ID: &[&str] = &["id_rol", "idRol", "id"];
const NAME: &[&str] = &["nombre_rol", "nombre"];
const DESCRIPTION: &[&str] = &["descripcion"];
const MODULES: &[&str] = &["modulos", "modules"];
const PERMISSION_COUNT: &[&str] = &["cantidad_permisos", "cantidadPermisos", "total_permisos"];
const STATUS: &[&str] = &["estado", "activo"];

impl EntitySchema for Role {
    const ENDPOINT: &'static str = "roles";
    const LABEL: &'static str = "rol";
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
            description: record.text(DESCRIPTION),
            modules: record.text_list(MODULES),
            permission_count: record.int(PERMISSION_COUNT),
            status: record.status(STATUS),
        }
    }

    fn to_wire(&self, mode: WireMode) -> Value {
        let mut body = json!({
            "nombre_rol": self.name,
            "descripcion": self.description,
            "modulos": self.modules,
            "estado": self.status.label(),
        });
        if mode == WireMode::Update {
            body["id_rol"] = json!(self.id);
        }
        body
    }

    fn required_fields(&self) -> Vec<(&'static str, String)> {
        vec![("nombre", self.name.clone())]
    }
}

impl DetailProjection for Role {
    fn detail_fields(&self) -> Vec<DetailField> {
        vec![
            DetailField::new("Nombre", self.name.clone()),
            DetailField::new("Descripción", self.description.clone()),
            DetailField::new("Módulos", self.modules.join(", ")),
            DetailField::new("Permisos", self.permission_count.to_string()),
            DetailField::new("Estado", self.status.label()),
        ]
    }
}

impl EditableEntity for Role {
    fn form_fields(&self) -> Vec<FormField> {
        vec![
            FormField::new("nombre", "Nombre", FieldKind::Text, self.name.clone()).required(),
            FormField::new("descripcion", "Descripción", FieldKind::Text, self.description.clone()),
            FormField::new("modulos", "Módulos", FieldKind::List, self.modules.join(", ")),
        ]
    }

    fn apply_field(&mut self, key: &str, raw: &str) -> Result<(), ValidationError> {
        match key {
            "nombre" => self.name = raw.to_string(),
            "descripcion" => self.description = raw.to_string(),
            "modulos" => {
                self.modules = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            }
            other => return Err(ValidationError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}

// ============================================================================
// Permissions
// ============================================================================

/// A grantable permission, fetched independently of roles
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Permission {
    pub id: EntityId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
}

impl Permission {
    pub fn from_value(value: &Value) -> Self {
        let record = WireRecord::new(value);
        Self {
            id: record.int(&["id_permiso", "idPermiso", "id"]),
            name: record.text(&["nombre_permiso", "nombre"]),
            description: record.text(&["descripcion"]),
        }
    }
}

/// Body of `POST /permisosrol/rol/{roleId}/asignar`.
///
/// The backend replaces the role's permission set with exactly this list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignPermissionsRequest {
    #[serde(rename = "permisos")]
    pub permission_ids: Vec<EntityId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_modules_from_csv() {
        let role = Role::from_value(&json!({
            "id_rol": 3,
            "nombre_rol": "Vendedor",
            "modulos": "ventas-lista,inventario-productos",
            "cantidad_permisos": 4
        }));
        assert_eq!(role.modules, vec!["ventas-lista", "inventario-productos"]);
        assert_eq!(role.permission_count, 4);
    }

    #[test]
    fn test_permission_from_backend_names() {
        let p = Permission::from_value(&json!({"id_permiso": 9, "nombre_permiso": "ventas.crear"}));
        assert_eq!(p.id, 9);
        assert_eq!(p.name, "ventas.crear");
        assert_eq!(p.description, "");
    }

    #[test]
    fn test_assign_body_shape() {
        let body = AssignPermissionsRequest {
            permission_ids: vec![1, 4],
        };
        assert_eq!(serde_json::to_value(body).unwrap(), json!({"permisos": [1, 4]}));
    }

    #[test]
    fn test_remapping_view_shape_preserves_fields() {
        let original = Role {
            id: 2,
            name: "Cajero".into(),
            description: "Ventas en caja".into(),
            modules: vec!["ventas-lista".into(), "compras-lista".into()],
            permission_count: 6,
            status: EntityStatus::Inactive,
        };
        let view = serde_json::to_value(&original).unwrap();
        assert_eq!(Role::from_value(&view), original);
    }
}
