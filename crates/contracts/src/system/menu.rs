//! Navigation menu table
//!
//! Every console module is listed once in [`MENU_MODULES`] with a stable
//! [`MenuModuleId`]. Roles still store their modules as `"<section>-<path>"`
//! strings; those are resolved by exact lookup against `legacy_key`, never by
//! splitting or case folding.

use serde::{Deserialize, Serialize};

use super::roles::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuSection {
    Inventory,
    Commerce,
    Security,
}

impl MenuSection {
    pub fn label(&self) -> &'static str {
        match self {
            MenuSection::Inventory => "Inventario",
            MenuSection::Commerce => "Comercial",
            MenuSection::Security => "Seguridad",
        }
    }

    pub fn all() -> [MenuSection; 3] {
        [MenuSection::Inventory, MenuSection::Commerce, MenuSection::Security]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuModuleId {
    Categories,
    Products,
    Purchases,
    Sales,
    Roles,
    Users,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuModule {
    pub id: MenuModuleId,
    pub section: MenuSection,
    /// Route path inside the console
    pub path: &'static str,
    pub label: &'static str,
    /// Key as stored in `Role::modules`
    pub legacy_key: &'static str,
}

pub const MENU_MODULES: &[MenuModule] = &[
    MenuModule {
        id: MenuModuleId::Categories,
        section: MenuSection::Inventory,
        path: "/categorias",
        label: "Categorías",
        legacy_key: "inventario-categorias",
    },
    MenuModule {
        id: MenuModuleId::Products,
        section: MenuSection::Inventory,
        path: "/productos",
        label: "Productos",
        legacy_key: "inventario-productos",
    },
    MenuModule {
        id: MenuModuleId::Purchases,
        section: MenuSection::Commerce,
        path: "/compras",
        label: "Compras",
        legacy_key: "compras-lista",
    },
    MenuModule {
        id: MenuModuleId::Sales,
        section: MenuSection::Commerce,
        path: "/ventas",
        label: "Ventas",
        legacy_key: "ventas-lista",
    },
    MenuModule {
        id: MenuModuleId::Roles,
        section: MenuSection::Security,
        path: "/roles",
        label: "Roles",
        legacy_key: "seguridad-roles",
    },
    MenuModule {
        id: MenuModuleId::Users,
        section: MenuSection::Security,
        path: "/usuarios",
        label: "Usuarios",
        legacy_key: "seguridad-usuarios",
    },
];

impl MenuModuleId {
    pub fn from_legacy_key(key: &str) -> Option<Self> {
        MENU_MODULES.iter().find(|m| m.legacy_key == key).map(|m| m.id)
    }
}

/// Modules of one section visible to a role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGroup {
    pub section: MenuSection,
    pub modules: Vec<&'static MenuModule>,
}

/// Modules a role may open, in table order, without duplicates.
/// Unknown keys are skipped with a warning.
pub fn modules_for_role(role: &Role) -> Vec<MenuModuleId> {
    let mut granted = Vec::new();
    for key in &role.modules {
        match MenuModuleId::from_legacy_key(key) {
            Some(id) => granted.push(id),
            None => log::warn!("role {} references unknown module key '{}'", role.id, key),
        }
    }

    MENU_MODULES
        .iter()
        .map(|m| m.id)
        .filter(|id| granted.contains(id))
        .collect()
}

/// Navigation groups for a role; empty sections are omitted
pub fn menu_for_role(role: &Role) -> Vec<MenuGroup> {
    let granted = modules_for_role(role);
    MenuSection::all()
        .into_iter()
        .filter_map(|section| {
            let modules: Vec<&'static MenuModule> = MENU_MODULES
                .iter()
                .filter(|m| m.section == section && granted.contains(&m.id))
                .collect();
            (!modules.is_empty()).then_some(MenuGroup { section, modules })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role_with(modules: &[&str]) -> Role {
        Role {
            id: 1,
            name: "Cajero".into(),
            modules: modules.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_every_module_has_unique_key() {
        for (i, a) in MENU_MODULES.iter().enumerate() {
            for b in &MENU_MODULES[i + 1..] {
                assert_ne!(a.legacy_key, b.legacy_key);
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(MenuModuleId::from_legacy_key("ventas-lista"), Some(MenuModuleId::Sales));
        assert_eq!(MenuModuleId::from_legacy_key("Ventas-Lista"), None);
        assert_eq!(MenuModuleId::from_legacy_key("ventas"), None);
    }

    #[test]
    fn test_modules_in_table_order_without_duplicates() {
        let role = role_with(&["ventas-lista", "inventario-categorias", "ventas-lista", "otro-x"]);
        assert_eq!(
            modules_for_role(&role),
            vec![MenuModuleId::Categories, MenuModuleId::Sales]
        );
    }

    #[test]
    fn test_menu_groups_skip_empty_sections() {
        let role = role_with(&["seguridad-usuarios", "compras-lista"]);
        let menu = menu_for_role(&role);
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].section, MenuSection::Commerce);
        assert_eq!(menu[0].modules[0].path, "/compras");
        assert_eq!(menu[1].section, MenuSection::Security);
        assert_eq!(menu[1].modules[0].label, "Usuarios");
    }

    #[test]
    fn test_role_without_modules_gets_empty_menu() {
        assert!(menu_for_role(&role_with(&[])).is_empty());
    }
}
