//! Remote entity client
//!
//! One generic client per entity type. It owns the backend↔view field
//! mapping (through [`EntitySchema`]), envelope normalization and the error
//! policy; it never retries and never shows UI.

use std::marker::PhantomData;

use contracts::shared::schema::{EntityId, EntitySchema};
use contracts::shared::status::EntityStatus;
use contracts::shared::wire::WireMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::envelope::{collection_items, describe, is_empty_body, normalize_record, ShapeError};
use crate::error::{report, ClientError};
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

/// Confirmation token returned by [`EntityClient::delete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub id: EntityId,
}

pub struct EntityClient<S, T> {
    transport: T,
    base_path: String,
    endpoint: String,
    active_filter_param: String,
    strict_envelopes: bool,
    _schema: PhantomData<S>,
}

impl<S, T: Clone> Clone for EntityClient<S, T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            base_path: self.base_path.clone(),
            endpoint: self.endpoint.clone(),
            active_filter_param: self.active_filter_param.clone(),
            strict_envelopes: self.strict_envelopes,
            _schema: PhantomData,
        }
    }
}

impl<S: EntitySchema, T: Transport> EntityClient<S, T> {
    /// Client for `S` at its configured endpoint (falls back to `S::ENDPOINT`)
    pub fn new(transport: T, api: &ApiConfig, endpoint: Option<&str>) -> Self {
        let endpoint = endpoint
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(S::ENDPOINT)
            .trim_matches('/')
            .to_string();
        Self {
            transport,
            base_path: api.path(&endpoint),
            endpoint,
            active_filter_param: api.active_filter_param.clone(),
            strict_envelopes: api.strict_envelopes,
            _schema: PhantomData,
        }
    }

    fn item_path(&self, id: EntityId) -> String {
        format!("{}/{}", self.base_path, id)
    }

    async fn send(&self, request: ApiRequest, fallback: &str) -> Result<ApiResponse, ClientError> {
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ClientError::from_response(&response, fallback));
        }
        Ok(response)
    }

    fn map_record(&self, payload: &Value) -> Result<S, ClientError> {
        let record = normalize_record(payload, &self.endpoint)?;
        if !S::carries_id(record) {
            return Err(ShapeError::Record(describe(record)).into());
        }
        Ok(S::from_value(record))
    }

    /// Record echoed by a create or update. `None` when the backend only
    /// acknowledged: an empty body, or an object without any id field such
    /// as `{"message": "..."}`.
    fn echoed_record(&self, action: &str, payload: &Value) -> Result<Option<S>, ClientError> {
        if is_empty_body(payload) {
            log::debug!("{}: empty reply", action);
            return Ok(None);
        }
        let record = normalize_record(payload, &self.endpoint)?;
        if !S::carries_id(record) {
            log::debug!("{}: reply without a record ({})", action, describe(record));
            return Ok(None);
        }
        Ok(Some(S::from_value(record)))
    }

    /// `GET /<entity>`, optionally filtered to active records.
    ///
    /// An unrecognized envelope yields an empty collection (logged), unless
    /// strict envelopes are configured.
    pub async fn list(&self, active_only: Option<bool>) -> Result<Vec<S>, ClientError> {
        let action = format!("list {}", S::LABEL);
        let mut request = ApiRequest::new(Method::Get, self.base_path.clone());
        if let Some(flag) = active_only {
            request = request.query(self.active_filter_param.clone(), flag.to_string());
        }

        let response = self
            .send(request, &format!("Error al listar {}", self.endpoint))
            .await
            .map_err(|e| report(&action, None, e))?;

        let items = collection_items(&response.body, &self.endpoint, self.strict_envelopes, &action)
            .map_err(|shape| report(&action, None, shape.into()))?;
        Ok(items.into_iter().map(S::from_value).collect())
    }

    /// `GET /<entity>/{id}`
    pub async fn get_by_id(&self, id: EntityId) -> Result<S, ClientError> {
        let action = format!("get {}", S::LABEL);
        let request = ApiRequest::new(Method::Get, self.item_path(id));
        let result = match self.send(request, &format!("Error al obtener {}", S::LABEL)).await {
            Ok(response) => self.map_record(&response.body),
            Err(e) => Err(e),
        };
        result.map_err(|e| report(&action, Some(id), e))
    }

    /// `POST /<entity>`; the view's id is not sent.
    ///
    /// When the backend does not echo the record the draft comes back as
    /// sent, with whatever id it had; callers reload to learn the real one.
    pub async fn create(&self, entity: &S) -> Result<S, ClientError> {
        let action = format!("create {}", S::LABEL);
        let request = ApiRequest::new(Method::Post, self.base_path.clone())
            .json(entity.to_wire(WireMode::Create));
        let result = match self.send(request, &format!("Error al crear {}", S::LABEL)).await {
            Ok(response) => self
                .echoed_record(&action, &response.body)
                .map(|echoed| echoed.unwrap_or_else(|| entity.clone())),
            Err(e) => Err(e),
        };
        result.map_err(|e| report(&action, None, e))
    }

    /// `PUT /<entity>/{id}`. Mandatory fields are checked before anything
    /// is sent. A reply without a record yields the entity as sent.
    pub async fn update(&self, id: EntityId, entity: &S) -> Result<S, ClientError> {
        let action = format!("update {}", S::LABEL);
        if let Err(invalid) = entity.validate_required() {
            return Err(report(&action, Some(id), invalid.into()));
        }

        let mut body = entity.clone();
        body.set_id(id);
        let request = ApiRequest::new(Method::Put, self.item_path(id)).json(body.to_wire(WireMode::Update));
        let result = match self.send(request, &format!("Error al actualizar {}", S::LABEL)).await {
            Ok(response) => self
                .echoed_record(&action, &response.body)
                .map(|echoed| echoed.unwrap_or(body)),
            Err(e) => Err(e),
        };
        result.map_err(|e| report(&action, Some(id), e))
    }

    /// Read-modify-write of the status flag.
    ///
    /// Not atomic: two clients toggling the same id race and the last
    /// update wins.
    pub async fn set_active(&self, id: EntityId, active: bool) -> Result<S, ClientError> {
        let mut current = self.get_by_id(id).await?;
        current.set_status(EntityStatus::from_flag(active));
        self.update(id, &current).await
    }

    /// `DELETE /<entity>/{id}`; the response body is ignored
    pub async fn delete(&self, id: EntityId) -> Result<Deleted, ClientError> {
        let action = format!("delete {}", S::LABEL);
        let request = ApiRequest::new(Method::Delete, self.item_path(id));
        self.send(request, &format!("Error al eliminar {}", S::LABEL))
            .await
            .map_err(|e| report(&action, Some(id), e))?;
        Ok(Deleted { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use crate::testing::MockTransport;
    use contracts::domain::a001_category::aggregate::Category;
    use contracts::domain::a002_product::aggregate::Product;
    use serde_json::json;
    use std::rc::Rc;

    fn category_client(transport: &Rc<MockTransport>) -> EntityClient<Category, Rc<MockTransport>> {
        let config = load_config(None).unwrap();
        EntityClient::new(transport.clone(), &config.api, Some(&config.endpoints.categories))
    }

    #[tokio::test]
    async fn test_list_result_envelope_fills_defaults() {
        let transport = Rc::new(MockTransport::new());
        transport.reply(200, json!({"result": [{"id": 1, "nombre": "A"}]}));

        let items = category_client(&transport).list(None).await.unwrap();
        assert_eq!(
            serde_json::to_value(&items).unwrap(),
            json!([{"id": 1, "nombre": "A", "tipoCategoria": "", "descripcion": "", "activo": true}])
        );
        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].path, "/api/categorias");
        assert!(sent[0].query.is_empty());
    }

    #[tokio::test]
    async fn test_list_sends_active_filter() {
        let transport = Rc::new(MockTransport::new());
        transport.reply(200, json!([]));
        category_client(&transport).list(Some(true)).await.unwrap();
        assert_eq!(transport.requests()[0].query, vec![("activo".to_string(), "true".to_string())]);
    }

    #[tokio::test]
    async fn test_list_keeps_backend_order() {
        let transport = Rc::new(MockTransport::new());
        transport.reply(200, json!({"categorias": [{"id": 9}, {"id": 2}, {"id": 5}]}));
        let ids: Vec<i64> = category_client(&transport)
            .list(None)
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![9, 2, 5]);
    }

    #[tokio::test]
    async fn test_list_degrades_on_unknown_envelope() {
        let transport = Rc::new(MockTransport::new());
        transport.reply(200, json!({"ok": true}));
        let items = category_client(&transport).list(None).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_list_strict_envelopes_fail() {
        let transport = Rc::new(MockTransport::new());
        transport.reply(200, json!({"ok": true}));
        let mut config = load_config(None).unwrap();
        config.api.strict_envelopes = true;
        let client: EntityClient<Category, _> = EntityClient::new(transport.clone(), &config.api, None);
        assert!(matches!(client.list(None).await, Err(ClientError::Shape(_))));
    }

    #[tokio::test]
    async fn test_remapping_list_output_is_stable() {
        let transport = Rc::new(MockTransport::new());
        transport.reply(
            200,
            json!({"data": [{"id_categoria": 4, "nombre_categoria": "Frutas", "tipo_categoria": "Producto", "estado": false}]}),
        );
        let items = category_client(&transport).list(None).await.unwrap();
        let view = serde_json::to_value(&items[0]).unwrap();
        assert_eq!(Category::from_value(&view), items[0]);
    }

    #[tokio::test]
    async fn test_get_by_id_error_carries_backend_message() {
        let transport = Rc::new(MockTransport::new());
        transport.reply(404, json!({"message": "Categoría no encontrada"}));
        let err = category_client(&transport).get_by_id(3).await.unwrap_err();
        assert_eq!(err.to_string(), "Categoría no encontrada");
        assert_eq!(err.status(), Some(404));
        assert_eq!(transport.requests()[0].path, "/api/categorias/3");
    }

    #[tokio::test]
    async fn test_get_by_id_generic_message_for_non_text_body() {
        let transport = Rc::new(MockTransport::new());
        transport.reply(500, json!({"error": {"code": 17}}));
        let err = category_client(&transport).get_by_id(3).await.unwrap_err();
        assert_eq!(err.to_string(), "Error al obtener categoría");
    }

    #[tokio::test]
    async fn test_transport_failure_is_request_error() {
        let transport = Rc::new(MockTransport::new());
        transport.fail("connection refused");
        let err = category_client(&transport).delete(1).await.unwrap_err();
        assert_eq!(err, ClientError::Request { status: None, message: "connection refused".into() });
    }

    #[tokio::test]
    async fn test_update_without_name_sends_nothing() {
        let transport = Rc::new(MockTransport::new());
        let category = Category {
            id: 1,
            kind: "Producto".into(),
            ..Default::default()
        };
        let err = category_client(&transport).update(1, &category).await.unwrap_err();
        assert!(err.is_validation());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_omits_id_and_maps_back() {
        let transport = Rc::new(MockTransport::new());
        transport.reply(201, json!({"data": {"id_categoria": 11, "nombre_categoria": "Nueva"}}));
        let draft = Category {
            id: 1_700_000_000,
            name: "Nueva".into(),
            kind: "Producto".into(),
            ..Default::default()
        };
        let created = category_client(&transport).create(&draft).await.unwrap();
        assert_eq!(created.id, 11);
        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert!(sent.body.as_ref().unwrap().get("id_categoria").is_none());
    }

    #[tokio::test]
    async fn test_set_active_last_write_wins() {
        let transport = Rc::new(MockTransport::new());
        transport.seed("categorias", json!({"id_categoria": 5, "nombre_categoria": "Carnes", "tipo_categoria": "Producto", "estado": false}));
        let client = category_client(&transport);

        let on = client.set_active(5, true).await.unwrap();
        assert!(on.status.is_active());
        let off = client.set_active(5, false).await.unwrap();
        assert!(!off.status.is_active());

        let stored = client.get_by_id(5).await.unwrap();
        assert_eq!(stored.status, EntityStatus::Inactive);
        assert_eq!(stored.name, "Carnes");
    }

    #[tokio::test]
    async fn test_set_active_fails_validation_without_second_request() {
        let transport = Rc::new(MockTransport::new());
        // stored product lacks the mandatory category
        transport.seed("productos", json!({"id_producto": 2, "nombre_producto": "Sal"}));
        let config = load_config(None).unwrap();
        let client: EntityClient<Product, _> = EntityClient::new(transport.clone(), &config.api, None);

        let err = client.set_active(2, false).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(transport.requests().len(), 1);
    }

    fn bebidas() -> Category {
        Category {
            id: 3,
            name: "Bebidas".into(),
            kind: "Producto".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_update_with_empty_reply_returns_sent_entity() {
        let transport = Rc::new(MockTransport::new());
        transport.reply(204, Value::Null);
        let updated = category_client(&transport).update(3, &bebidas()).await.unwrap();
        assert_eq!(updated, bebidas());
    }

    #[tokio::test]
    async fn test_update_with_message_reply_keeps_identity() {
        let transport = Rc::new(MockTransport::new());
        transport.reply(200, json!({"message": "Categoría actualizada"}));
        let draft = Category { id: 0, ..bebidas() };
        let updated = category_client(&transport).update(3, &draft).await.unwrap();
        assert_eq!(updated.id, 3);
        assert_eq!(updated.name, "Bebidas");
    }

    #[tokio::test]
    async fn test_create_with_empty_reply_returns_draft() {
        let transport = Rc::new(MockTransport::new());
        transport.reply(201, json!(""));
        let created = category_client(&transport).create(&bebidas()).await.unwrap();
        assert_eq!(created.name, "Bebidas");
    }

    #[tokio::test]
    async fn test_set_active_with_message_reply() {
        let transport = Rc::new(MockTransport::new());
        transport.reply(200, json!({"data": {"id_categoria": 7, "nombre_categoria": "Bebidas", "tipo_categoria": "Producto", "estado": true}}));
        transport.reply(200, json!({"message": "Categoría actualizada"}));
        let toggled = category_client(&transport).set_active(7, false).await.unwrap();
        assert_eq!(toggled.id, 7);
        assert_eq!(toggled.name, "Bebidas");
        assert_eq!(toggled.status, EntityStatus::Inactive);
    }

    #[tokio::test]
    async fn test_get_by_id_without_record_is_shape_error() {
        let transport = Rc::new(MockTransport::new());
        transport.reply(200, json!({"message": "ok"}));
        let err = category_client(&transport).get_by_id(3).await.unwrap_err();
        assert!(matches!(err, ClientError::Shape(ShapeError::Record(_))));
    }

    #[tokio::test]
    async fn test_delete_returns_id_token() {
        let transport = Rc::new(MockTransport::new());
        transport.reply(200, json!("eliminado"));
        let deleted = category_client(&transport).delete(8).await.unwrap();
        assert_eq!(deleted, Deleted { id: 8 });
        assert_eq!(transport.requests()[0].method, Method::Delete);
    }
}
