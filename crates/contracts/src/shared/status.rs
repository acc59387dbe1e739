use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Estado of an entity record.
///
/// Status is the only gate the console uses to decide whether a row is
/// editable. Some entities expose it as a string (`"Activo"` / `"Inactivo"`),
/// others as a boolean `activo` flag; see [`as_flag`] for the latter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntityStatus {
    #[default]
    #[serde(rename = "Activo")]
    Active,
    #[serde(rename = "Inactivo")]
    Inactive,
}

impl EntityStatus {
    pub fn from_flag(active: bool) -> Self {
        if active {
            EntityStatus::Active
        } else {
            EntityStatus::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, EntityStatus::Active)
    }

    pub fn toggled(&self) -> Self {
        Self::from_flag(!self.is_active())
    }

    /// Label shown in tables and detail views
    pub fn label(&self) -> &'static str {
        match self {
            EntityStatus::Active => "Activo",
            EntityStatus::Inactive => "Inactivo",
        }
    }

    /// Lenient parse of whatever a backend puts in a status column.
    ///
    /// Accepts booleans, `1`/`0`, and the strings `activo`, `inactivo`,
    /// `true`, `false`, `1`, `0` in any letter case.
    pub fn from_wire(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::from_flag(*b)),
            Value::Number(n) => n.as_i64().map(|v| Self::from_flag(v != 0)),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "activo" | "active" | "true" | "1" => Some(EntityStatus::Active),
                "inactivo" | "inactive" | "false" | "0" => Some(EntityStatus::Inactive),
                _ => None,
            },
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Serde adapter for entities whose view shape carries a boolean `activo`.
pub mod as_flag {
    use super::EntityStatus;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(status: &EntityStatus, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(status.is_active())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EntityStatus, D::Error> {
        bool::deserialize(deserializer).map(EntityStatus::from_flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_wire_accepts_common_spellings() {
        assert_eq!(EntityStatus::from_wire(&json!(true)), Some(EntityStatus::Active));
        assert_eq!(EntityStatus::from_wire(&json!(0)), Some(EntityStatus::Inactive));
        assert_eq!(EntityStatus::from_wire(&json!("INACTIVO")), Some(EntityStatus::Inactive));
        assert_eq!(EntityStatus::from_wire(&json!(" Activo ")), Some(EntityStatus::Active));
        assert_eq!(EntityStatus::from_wire(&json!("pendiente")), None);
        assert_eq!(EntityStatus::from_wire(&json!(null)), None);
    }

    #[test]
    fn test_serde_uses_spanish_labels() {
        assert_eq!(serde_json::to_value(EntityStatus::Inactive).unwrap(), json!("Inactivo"));
        let parsed: EntityStatus = serde_json::from_value(json!("Activo")).unwrap();
        assert_eq!(parsed, EntityStatus::Active);
    }

    #[test]
    fn test_toggled() {
        assert_eq!(EntityStatus::Active.toggled(), EntityStatus::Inactive);
        assert_eq!(EntityStatus::Inactive.toggled(), EntityStatus::Active);
    }
}
