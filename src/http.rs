//! HTTP surface over the stores, consumed by the storefront and admin screens.

use axum::{extract::{Path, Query, State}, http::StatusCode, response::{IntoResponse, Response}, routing::{get, post, put}, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::checkout::place_order;
use crate::config::AppConfig;
use crate::domain::aggregates::{
    CustomerInfo, CustomizationData, GarmentType, MeasurementField, MeasurementProfile,
    MobileMoneyNetwork, NewCartItem, Order, Payment, PaymentMethod, ProfileDraft, ProfileUpdate,
    Service, ServiceCategory, ServiceDraft, ServiceUpdate,
};
use crate::domain::analytics::{aggregate_customers, dashboard_stats, search_customers, Customer, DashboardStats};
use crate::domain::status::{timeline, OrderStatus, StatusBadge, StatusFilter, Timeline};
use crate::storage::KeyValueStore;
use crate::stores::{
    AdminSession, CartStore, CustomerSession, MeasurementStore, OrderQuery, OrderSort, OrderStore,
    ServiceCatalog, Session, SessionStore,
};
use crate::{Cart, OrderNumber, StorefrontError};

#[derive(Clone)]
pub struct AppState {
    pub catalog: ServiceCatalog,
    pub carts: CartStore,
    pub orders: OrderStore,
    pub measurements: MeasurementStore,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(kv: Arc<dyn KeyValueStore>, config: &AppConfig) -> Self {
        Self {
            catalog: ServiceCatalog::new(kv.clone()),
            carts: CartStore::new(kv.clone()),
            orders: OrderStore::new(kv.clone()),
            measurements: MeasurementStore::new(kv.clone(), config.measurement_owner.clone()),
            sessions: SessionStore::new(kv, config.admin.clone()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "kingkart"})) }))
        .route("/api/v1/services", get(list_services).post(create_service))
        .route("/api/v1/services/:id", get(get_service).put(update_service).delete(delete_service))
        .route("/api/v1/measurement-fields/:garment", get(measurement_fields))
        .route("/api/v1/cart", get(get_cart).post(add_to_cart).delete(clear_cart))
        .route("/api/v1/cart/items/:id", put(update_cart_item).delete(remove_cart_item))
        .route("/api/v1/checkout", post(checkout))
        .route("/api/v1/orders", get(list_orders))
        .route("/api/v1/orders/:number", get(get_order))
        .route("/api/v1/orders/:number/status", put(update_order_status))
        .route("/api/v1/orders/:number/timeline", get(order_timeline))
        .route("/api/v1/customers", get(list_customers))
        .route("/api/v1/dashboard", get(dashboard))
        .route("/api/v1/measurements", get(list_profiles).post(create_profile))
        .route("/api/v1/measurements/:id", get(get_profile).put(update_profile).delete(delete_profile))
        .route("/api/v1/session", get(current_session).delete(sign_out))
        .route("/api/v1/session/admin", post(sign_in_admin))
        .route("/api/v1/session/customer", post(sign_in_customer))
        .with_state(state)
}

/// Error response: a status code and a plain-text message.
#[derive(Debug)]
pub struct ApiError(StatusCode, String);

impl ApiError {
    fn not_found() -> Self { Self(StatusCode::NOT_FOUND, "Not found".to_string()) }
}

impl From<StorefrontError> for ApiError {
    fn from(e: StorefrontError) -> Self {
        let code = match &e {
            StorefrontError::Storage(_) | StorefrontError::Serialization(_) => {
                tracing::error!(error = %e, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            StorefrontError::ServiceNotFound | StorefrontError::ProfileNotFound => StatusCode::NOT_FOUND,
            StorefrontError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            StorefrontError::InvalidStatus(_) | StorefrontError::InvalidOrderNumber(_) => StatusCode::BAD_REQUEST,
            StorefrontError::Validation(_) | StorefrontError::EmptyCart
            | StorefrontError::MissingPaymentDetails | StorefrontError::InvalidPrice => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self(code, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response { (self.0, self.1).into_response() }
}

type ApiResult<T> = Result<T, ApiError>;

// Services

#[derive(Debug, Deserialize)] pub struct ServiceParams { pub category: Option<ServiceCategory> }

async fn list_services(State(s): State<AppState>, Query(p): Query<ServiceParams>) -> ApiResult<Json<Vec<Service>>> {
    let services = match p.category { Some(c) => s.catalog.services_in_category(c)?, None => s.catalog.all_services()? };
    Ok(Json(services))
}

async fn get_service(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Service>> {
    s.catalog.service(&id)?.map(Json).ok_or_else(ApiError::not_found)
}

async fn create_service(State(s): State<AppState>, Json(r): Json<ServiceDraft>) -> ApiResult<(StatusCode, Json<Service>)> {
    Ok((StatusCode::CREATED, Json(s.catalog.create_service(r)?)))
}

async fn update_service(State(s): State<AppState>, Path(id): Path<String>, Json(r): Json<ServiceUpdate>) -> ApiResult<Json<Service>> {
    s.catalog.update_service(&id, r)?.map(Json).ok_or_else(ApiError::not_found)
}

async fn delete_service(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    if s.catalog.delete_service(&id)? { Ok(StatusCode::NO_CONTENT) } else { Err(ApiError::not_found()) }
}

async fn measurement_fields(Path(garment): Path<GarmentType>) -> Json<&'static [MeasurementField]> {
    Json(garment.fields())
}

// Cart

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub service_id: String,
    pub measurement_profile_id: Option<String>,
    pub customization_data: Option<CustomizationData>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)] pub struct QuantityRequest { pub quantity: i64 }

async fn get_cart(State(s): State<AppState>) -> ApiResult<Json<Cart>> {
    Ok(Json(s.carts.get_cart()?))
}

async fn add_to_cart(State(s): State<AppState>, Json(r): Json<AddToCartRequest>) -> ApiResult<(StatusCode, Json<Cart>)> {
    let service = s.catalog.service(&r.service_id)?.ok_or(StorefrontError::ServiceNotFound)?;
    let mut item = NewCartItem::new(service).with_quantity(r.quantity.unwrap_or(1));
    if let Some(id) = r.measurement_profile_id {
        item = item.with_profile(s.measurements.get_measurement_profile(&id)?.ok_or(StorefrontError::ProfileNotFound)?);
    }
    if let Some(data) = r.customization_data {
        item = item.with_customization(data);
    }
    Ok((StatusCode::CREATED, Json(s.carts.add_to_cart(item)?)))
}

async fn update_cart_item(State(s): State<AppState>, Path(id): Path<String>, Json(r): Json<QuantityRequest>) -> ApiResult<Json<Cart>> {
    Ok(Json(s.carts.update_quantity(&id, r.quantity)?))
}

async fn remove_cart_item(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Cart>> {
    Ok(Json(s.carts.remove_item(&id)?))
}

async fn clear_cart(State(s): State<AppState>) -> ApiResult<StatusCode> {
    s.carts.clear_cart()?;
    Ok(StatusCode::NO_CONTENT)
}

// Checkout and orders

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(flatten)]
    pub customer_info: CustomerInfo,
    pub payment_method: PaymentMethod,
    pub mobile_money_network: Option<MobileMoneyNetwork>,
    pub mobile_money_phone: Option<String>,
}

async fn checkout(State(s): State<AppState>, Json(r): Json<CheckoutRequest>) -> ApiResult<(StatusCode, Json<Order>)> {
    let payment = Payment::from_parts(r.payment_method, r.mobile_money_network, r.mobile_money_phone.as_deref())?;
    let order = place_order(&s.carts, &s.orders, r.customer_info, payment)?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// `view=customer` lists newest first unless `sort` says otherwise.
#[derive(Debug, Default, Deserialize)]
pub struct OrderListParams { pub sort: Option<String>, pub status: Option<String>, pub view: Option<String>, pub search: Option<String> }

impl OrderListParams {
    fn query(self) -> crate::Result<OrderQuery> {
        let sort = match (self.sort.as_deref(), self.view.as_deref()) {
            (Some("newest"), _) | (None, Some("customer")) => OrderSort::NewestFirst,
            _ => OrderSort::Insertion,
        };
        let status = self.status.as_deref().map(str::parse::<StatusFilter>).transpose()?.unwrap_or(StatusFilter::All);
        Ok(OrderQuery { sort, status, search: self.search })
    }
}

async fn list_orders(State(s): State<AppState>, Query(p): Query<OrderListParams>) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(s.orders.list(&p.query()?)?))
}

async fn get_order(State(s): State<AppState>, Path(number): Path<String>) -> ApiResult<Json<Order>> {
    let number = OrderNumber::new(number).map_err(StorefrontError::from)?;
    s.orders.get_order_by_number(number.as_str())?.map(Json).ok_or_else(ApiError::not_found)
}

#[derive(Debug, Deserialize)] pub struct StatusRequest { pub status: OrderStatus }

async fn update_order_status(State(s): State<AppState>, Path(number): Path<String>, Json(r): Json<StatusRequest>) -> ApiResult<Json<Order>> {
    let number = OrderNumber::new(number).map_err(StorefrontError::from)?;
    s.orders.update_order_status(number.as_str(), r.status)?;
    s.orders.get_order_by_number(number.as_str())?.map(Json).ok_or_else(ApiError::not_found)
}

#[derive(Debug, Serialize)] pub struct OrderProgress { pub badge: StatusBadge, pub timeline: Timeline }

async fn order_timeline(State(s): State<AppState>, Path(number): Path<String>) -> ApiResult<Json<OrderProgress>> {
    let number = OrderNumber::new(number).map_err(StorefrontError::from)?;
    let order = s.orders.get_order_by_number(number.as_str())?.ok_or_else(ApiError::not_found)?;
    Ok(Json(OrderProgress { badge: order.status().badge(), timeline: timeline(order.status()) }))
}

// Analytics

#[derive(Debug, Deserialize)] pub struct CustomerParams { pub search: Option<String> }

async fn list_customers(State(s): State<AppState>, Query(p): Query<CustomerParams>) -> ApiResult<Json<Vec<Customer>>> {
    let customers = aggregate_customers(&s.orders.all_orders(OrderSort::Insertion)?);
    Ok(Json(match p.search { Some(term) => search_customers(customers, &term), None => customers }))
}

async fn dashboard(State(s): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(dashboard_stats(&s.orders.all_orders(OrderSort::Insertion)?)))
}

// Measurement profiles

async fn list_profiles(State(s): State<AppState>) -> ApiResult<Json<Vec<MeasurementProfile>>> {
    Ok(Json(s.measurements.get_measurement_profiles()?))
}

async fn get_profile(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<MeasurementProfile>> {
    s.measurements.get_measurement_profile(&id)?.map(Json).ok_or_else(ApiError::not_found)
}

async fn create_profile(State(s): State<AppState>, Json(r): Json<ProfileDraft>) -> ApiResult<(StatusCode, Json<MeasurementProfile>)> {
    Ok((StatusCode::CREATED, Json(s.measurements.save_measurement_profile(r)?)))
}

async fn update_profile(State(s): State<AppState>, Path(id): Path<String>, Json(r): Json<ProfileUpdate>) -> ApiResult<Json<MeasurementProfile>> {
    s.measurements.update_measurement_profile(&id, r)?.map(Json).ok_or_else(ApiError::not_found)
}

async fn delete_profile(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    if s.measurements.delete_measurement_profile(&id)? { Ok(StatusCode::NO_CONTENT) } else { Err(ApiError::not_found()) }
}

// Sessions

#[derive(Debug, Deserialize)] pub struct AdminLoginRequest { pub email: String, pub password: String }

async fn current_session(State(s): State<AppState>) -> ApiResult<Json<Option<Session>>> {
    Ok(Json(s.sessions.current()?))
}

async fn sign_in_admin(State(s): State<AppState>, Json(r): Json<AdminLoginRequest>) -> ApiResult<Json<AdminSession>> {
    Ok(Json(s.sessions.sign_in_admin(&r.email, &r.password)?.ok_or(StorefrontError::InvalidCredentials)?))
}

async fn sign_in_customer(State(s): State<AppState>, Json(r): Json<CustomerSession>) -> ApiResult<Json<CustomerSession>> {
    Ok(Json(s.sessions.sign_in_customer(r)?))
}

async fn sign_out(State(s): State<AppState>) -> ApiResult<StatusCode> {
    s.sessions.sign_out()?;
    Ok(StatusCode::NO_CONTENT)
}
