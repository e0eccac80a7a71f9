use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

pub const AUTH_PREFIX: &str = "ShippoToken ";
pub const DEFAULT_RESULTS: usize = 25;
pub const OWNER: &str = "mock@shippo.test";

/// Parcel fields the API refuses to create without.
const PARCEL_REQUIRED: [&str; 6] = [
    "length",
    "width",
    "height",
    "distance_unit",
    "weight",
    "mass_unit",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Addresses,
    Parcels,
}

/// Stored objects per resource, in creation order.
pub type Db = Arc<RwLock<HashMap<Resource, Vec<Value>>>>;

type ApiFailure = (StatusCode, Json<Value>);

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub results: Option<usize>,
    pub page: Option<usize>,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    let api = Router::new()
        .route("/addresses/", get(list_addresses).post(create_address))
        .route("/addresses/{object_id}", get(get_address))
        .route("/parcels/", get(list_parcels).post(create_parcel))
        .route("/parcels/{object_id}", get(get_parcel))
        .with_state(db);
    Router::new().nest("/v1", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn failure(status: StatusCode, detail: &str) -> ApiFailure {
    (status, Json(json!({ "detail": detail })))
}

fn authorize(headers: &HeaderMap) -> Result<(), ApiFailure> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(AUTH_PREFIX))
        .filter(|token| !token.is_empty());
    match token {
        Some(_) => Ok(()),
        None => Err(failure(
            StatusCode::UNAUTHORIZED,
            "Authentication credentials were not provided.",
        )),
    }
}

async fn create(
    db: Db,
    resource: Resource,
    headers: HeaderMap,
    mut input: Map<String, Value>,
) -> Result<(StatusCode, Json<Value>), ApiFailure> {
    authorize(&headers)?;

    match resource {
        Resource::Addresses => {
            let complete = ["street1", "city", "country"]
                .iter()
                .all(|field| input.get(*field).is_some_and(|v| !v.is_null()));
            input.insert("is_complete".to_string(), Value::Bool(complete));
        }
        Resource::Parcels => {
            if let Some(missing) = PARCEL_REQUIRED.iter().find(|f| !input.contains_key(**f)) {
                return Err(failure(
                    StatusCode::BAD_REQUEST,
                    &format!("{missing}: This field is required."),
                ));
            }
            input.insert("object_state".to_string(), json!("VALID"));
        }
    }

    let object_id = Uuid::new_v4().simple().to_string();
    input.insert("object_id".to_string(), Value::String(object_id.clone()));
    input.insert("object_owner".to_string(), json!(OWNER));
    input.insert("test".to_string(), Value::Bool(true));

    let object = Value::Object(input);
    db.write()
        .await
        .entry(resource)
        .or_default()
        .push(object.clone());
    debug!(?resource, object_id = %object_id, "created object");
    Ok((StatusCode::CREATED, Json(object)))
}

async fn retrieve(
    db: Db,
    resource: Resource,
    headers: HeaderMap,
    object_id: String,
) -> Result<Json<Value>, ApiFailure> {
    authorize(&headers)?;
    let store = db.read().await;
    store
        .get(&resource)
        .and_then(|objects| {
            objects
                .iter()
                .find(|object| object["object_id"] == object_id.as_str())
        })
        .cloned()
        .map(Json)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Not found."))
}

/// One page of `resource`, with `next` as an absolute URL on the same host.
async fn list(
    db: Db,
    resource: Resource,
    headers: HeaderMap,
    path: &str,
    params: ListParams,
) -> Result<Json<Value>, ApiFailure> {
    authorize(&headers)?;

    let per_page = params.results.unwrap_or(DEFAULT_RESULTS).max(1);
    let page = params.page.unwrap_or(1).max(1);
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    let page_url = |page: usize| format!("http://{host}{path}?results={per_page}&page={page}");

    let store = db.read().await;
    let objects = store.get(&resource).map(Vec::as_slice).unwrap_or_default();
    let start = (page - 1).saturating_mul(per_page);
    let results: Vec<Value> = objects.iter().skip(start).take(per_page).cloned().collect();
    let next = (start.saturating_add(per_page) < objects.len()).then(|| page_url(page + 1));
    let previous = (page > 1).then(|| page_url(page - 1));

    Ok(Json(json!({
        "count": objects.len(),
        "next": next,
        "previous": previous,
        "results": results,
    })))
}

async fn create_address(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<Value>), ApiFailure> {
    create(db, Resource::Addresses, headers, input).await
}

async fn get_address(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(object_id): Path<String>,
) -> Result<Json<Value>, ApiFailure> {
    retrieve(db, Resource::Addresses, headers, object_id).await
}

async fn list_addresses(
    State(db): State<Db>,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiFailure> {
    list(db, Resource::Addresses, headers, uri.path(), params).await
}

async fn create_parcel(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<Value>), ApiFailure> {
    create(db, Resource::Parcels, headers, input).await
}

async fn get_parcel(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(object_id): Path<String>,
) -> Result<Json<Value>, ApiFailure> {
    retrieve(db, Resource::Parcels, headers, object_id).await
}

async fn list_parcels(
    State(db): State<Db>,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiFailure> {
    list(db, Resource::Parcels, headers, uri.path(), params).await
}
