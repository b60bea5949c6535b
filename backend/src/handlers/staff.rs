//! HTTP handlers for the operator registry

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::models::Employee;
use crate::services::StaffService;
use crate::AppState;

/// List all registered employees
pub async fn list_employees(State(state): State<AppState>) -> AppResult<Json<Vec<Employee>>> {
    let service = StaffService::new(state.db);
    let employees = service.list_employees().await?;
    Ok(Json(employees))
}
