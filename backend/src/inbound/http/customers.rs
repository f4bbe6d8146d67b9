//! Customer HTTP handlers.
//!
//! ```text
//! GET    /api/customers
//! POST   /api/customers
//! PUT    /api/customers/{id}
//! DELETE /api/customers/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Customer, CustomerDraft, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_phone, require};

/// Request body for creating a customer.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    /// Display name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Request body for editing a customer; absent fields keep their value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    /// New display name.
    pub name: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// New notes.
    pub notes: Option<String>,
}

fn map_storage_error(err: crate::domain::ports::CustomerRepositoryError) -> Error {
    Error::internal(format!("customer storage unavailable: {err}"))
}

fn customer_not_found() -> Error {
    Error::not_found("customer not found")
}

/// List every customer.
#[utoipa::path(
    get,
    path = "/api/customers",
    responses(
        (status = 200, description = "Customers", body = [Customer]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["customers"],
    operation_id = "listCustomers"
)]
#[get("")]
pub async fn list_customers(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Customer>>> {
    let rows = state.customers.list().await.map_err(map_storage_error)?;
    Ok(web::Json(rows))
}

/// Add a customer.
#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["customers"],
    operation_id = "createCustomer"
)]
#[post("")]
pub async fn create_customer(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCustomerRequest>,
) -> ApiResult<HttpResponse> {
    let CreateCustomerRequest {
        name,
        email,
        phone,
        notes,
    } = payload.into_inner();

    let draft = CustomerDraft {
        name: require(name, FieldName::new("name"))?,
        email: require(email, FieldName::new("email"))?,
        phone,
        notes,
    };
    let customer = Customer::try_from_draft(draft, state.clock.utc())
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    state
        .customers
        .insert(customer.clone())
        .await
        .map_err(map_storage_error)?;
    Ok(HttpResponse::Created().json(customer))
}

/// Edit a customer.
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Updated customer", body = Customer),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown customer", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["customers"],
    operation_id = "updateCustomer"
)]
#[put("/{id}")]
pub async fn update_customer(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateCustomerRequest>,
) -> ApiResult<web::Json<Customer>> {
    let id = path.into_inner();
    let mut customer = state
        .customers
        .find(id)
        .await
        .map_err(map_storage_error)?
        .ok_or_else(customer_not_found)?;

    let UpdateCustomerRequest {
        name,
        email,
        phone,
        notes,
    } = payload.into_inner();

    if let Some(name) = name {
        customer.name = name;
    }
    if let Some(email) = email {
        customer.email = email;
    }
    if let Some(raw) = phone {
        customer.phone = if raw.trim().is_empty() {
            None
        } else {
            Some(parse_phone(&raw, FieldName::new("phone"))?)
        };
    }
    if let Some(notes) = notes {
        customer.notes = Some(notes);
    }

    state
        .customers
        .update(customer.clone())
        .await
        .map_err(map_storage_error)?;
    Ok(web::Json(customer))
}

/// Remove a customer.
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    responses(
        (status = 204, description = "Customer removed"),
        (status = 404, description = "Unknown customer", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["customers"],
    operation_id = "deleteCustomer"
)]
#[delete("/{id}")]
pub async fn delete_customer(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let removed = state
        .customers
        .remove(path.into_inner())
        .await
        .map_err(map_storage_error)?;
    if removed {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(customer_not_found())
    }
}
