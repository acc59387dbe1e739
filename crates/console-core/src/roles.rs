//! Role permission sub-API
//!
//! Roles themselves go through the generic [`EntityClient`](crate::client::EntityClient);
//! permissions are fetched and assigned separately, keyed by role id.

use std::collections::BTreeSet;

use contracts::shared::schema::EntityId;
use contracts::system::roles::{AssignPermissionsRequest, Permission};

use crate::config::ConsoleConfig;
use crate::envelope::collection_items;
use crate::error::{report, ClientError};
use crate::transport::{ApiRequest, Method, Transport};

#[derive(Clone)]
pub struct RolesClient<T> {
    transport: T,
    permissions_path: String,
    permissions_key: String,
    role_permissions_path: String,
    strict_envelopes: bool,
}

impl<T: Transport> RolesClient<T> {
    pub fn new(transport: T, config: &ConsoleConfig) -> Self {
        Self {
            transport,
            permissions_path: config.api.path(&config.endpoints.permissions),
            permissions_key: config.endpoints.permissions.clone(),
            role_permissions_path: config.api.path(&config.endpoints.role_permissions),
            strict_envelopes: config.api.strict_envelopes,
        }
    }

    async fn get_permissions(
        &self,
        path: String,
        action: &str,
        role_id: Option<EntityId>,
        fallback: &str,
    ) -> Result<Vec<Permission>, ClientError> {
        let response = self
            .transport
            .send(ApiRequest::new(Method::Get, path))
            .await
            .map_err(|e| report(action, role_id, e.into()))?;
        if !response.ok() {
            return Err(report(action, role_id, ClientError::from_response(&response, fallback)));
        }

        let label = match role_id {
            Some(id) => format!("{} (id={})", action, id),
            None => action.to_string(),
        };
        let items = collection_items(&response.body, &self.permissions_key, self.strict_envelopes, &label)
            .map_err(|shape| report(action, role_id, shape.into()))?;
        Ok(items.into_iter().map(Permission::from_value).collect())
    }

    /// `GET /permisos`
    pub async fn permissions(&self) -> Result<Vec<Permission>, ClientError> {
        self.get_permissions(
            self.permissions_path.clone(),
            "list permissions",
            None,
            "Error al obtener permisos",
        )
        .await
    }

    /// `GET /permisosrol/rol/{roleId}`
    pub async fn role_permissions(&self, role_id: EntityId) -> Result<Vec<Permission>, ClientError> {
        let path = format!("{}/rol/{}", self.role_permissions_path, role_id);
        self.get_permissions(path, "list role permissions", Some(role_id), "Error al obtener permisos del rol")
            .await
    }

    /// `POST /permisosrol/rol/{roleId}/asignar`. Replaces the whole set.
    pub async fn assign(&self, role_id: EntityId, permission_ids: &[EntityId]) -> Result<(), ClientError> {
        let path = format!("{}/rol/{}/asignar", self.role_permissions_path, role_id);
        let body = AssignPermissionsRequest {
            permission_ids: permission_ids.to_vec(),
        };
        self.post_assignment(path, &body)
            .await
            .map_err(|e| report("assign permissions", Some(role_id), e))
    }

    async fn post_assignment(&self, path: String, body: &AssignPermissionsRequest) -> Result<(), ClientError> {
        let body = serde_json::to_value(body).map_err(|e| ClientError::Request {
            status: None,
            message: e.to_string(),
        })?;
        let response = self
            .transport
            .send(ApiRequest::new(Method::Post, path).json(body))
            .await?;
        if !response.ok() {
            return Err(ClientError::from_response(&response, "Error al asignar permisos"));
        }
        Ok(())
    }
}

/// Checkbox selection in the permission assignment modal.
///
/// The request body is always the complete selection, since the backend
/// replaces rather than merges.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermissionAssignment {
    pub role_id: EntityId,
    selected: BTreeSet<EntityId>,
}

impl PermissionAssignment {
    pub fn new(role_id: EntityId, current: &[Permission]) -> Self {
        Self {
            role_id,
            selected: current.iter().map(|p| p.id).collect(),
        }
    }

    pub fn is_selected(&self, id: EntityId) -> bool {
        self.selected.contains(&id)
    }

    pub fn toggle(&mut self, id: EntityId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn select_all(&mut self, available: &[Permission]) {
        self.selected = available.iter().map(|p| p.id).collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.selected.iter().copied().collect()
    }
}
