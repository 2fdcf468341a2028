//! Workshop load estimation endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::debug;

use crate::api::{error::ApiError, AppState};
use crate::domain::{EquipmentDerived, EquipmentRecord, LoadAssessment};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    #[serde(default)]
    pub equipment_list: Vec<EquipmentRecord>,
}

/// POST /load/calculate - aggregate an equipment group into the group and
/// facility load summaries.
pub async fn calculate(
    State(st): State<AppState>,
    Json(request): Json<CalculationRequest>,
) -> Result<Json<LoadAssessment>, ApiError> {
    let assessment = st.aggregator.aggregate(&request.equipment_list)?;
    debug!(
        submitted = request.equipment_list.len(),
        effective_count = assessment.group.effective_equipment_count,
        "workshop load calculated"
    );
    Ok(Json(assessment))
}

/// POST /load/equipment - derived quantities for one equipment record.
pub async fn equipment(
    Json(record): Json<EquipmentRecord>,
) -> Result<Json<EquipmentDerived>, ApiError> {
    if !record.is_complete() {
        return Err(ApiError::ValidationError(
            "equipment record has missing or zero fields".to_string(),
        ));
    }
    Ok(Json(record.derive()))
}
