//! Fuel analysis endpoints.

use axum::Json;
use tracing::debug;
use validator::Validate;

use crate::api::error::ApiError;
use crate::domain::{
    analyze_mazut, analyze_solid_fuel, FuelAnalysis, FuelComposition, MazutAnalysis,
    MazutComposition,
};

/// POST /fuel/solid - dry/combustible recomposition and lower heating
/// values for a solid fuel.
pub async fn solid(
    Json(composition): Json<FuelComposition>,
) -> Result<Json<FuelAnalysis>, ApiError> {
    composition.validate()?;
    let analysis = analyze_solid_fuel(&composition);
    debug!(
        heating_value = analysis.lower_heating_value,
        "solid fuel analyzed"
    );
    Ok(Json(analysis))
}

/// POST /fuel/mazut - working-mass recomposition and heating value for
/// fuel oil.
pub async fn mazut(
    Json(composition): Json<MazutComposition>,
) -> Result<Json<MazutAnalysis>, ApiError> {
    composition.validate()?;
    let analysis = analyze_mazut(&composition);
    debug!(
        heating_value = analysis.working_heating_value,
        "mazut analyzed"
    );
    Ok(Json(analysis))
}
