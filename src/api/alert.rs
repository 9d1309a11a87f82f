use axum::{ extract::{ Path, State }, http::StatusCode, Json };
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::db::entity::alert;
use crate::error::Result;

use super::AppState;

#[derive(Deserialize)]
pub struct CreateAlertRequest {
    pub email: String,
    pub chain: String,
    pub alert_price: f64,
}

#[derive(Serialize)]
pub struct AlertResponse {
    pub id: Uuid,
    pub chain: String,
    pub alert_price: String,
    pub email: String,
    pub created_at: String,
}

impl From<alert::Model> for AlertResponse {
    fn from(alert: alert::Model) -> Self {
        Self {
            id: alert.id,
            chain: alert.chain,
            alert_price: alert.alert_price.to_string(),
            email: alert.email,
            created_at: alert.created_at.to_rfc3339(),
        }
    }
}

pub async fn create_alert(
    State(state): State<AppState>,
    Json(request): Json<CreateAlertRequest>
) -> Result<Json<AlertResponse>> {
    let alert = state.alert_service.create_alert(
        &request.email,
        &request.chain,
        request.alert_price
    ).await?;

    Ok(Json(alert.into()))
}

pub async fn list_alerts(State(state): State<AppState>) -> Result<Json<Vec<AlertResponse>>> {
    let alerts = state.alert_service.list_alerts().await?;

    Ok(Json(alerts.into_iter().map(AlertResponse::from).collect()))
}

pub async fn delete_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>
) -> Result<StatusCode> {
    state.alert_service.delete_alert(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
