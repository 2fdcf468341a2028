//! Fuel composition calculators: solid fuel mass-basis conversions with
//! lower heating values, and mazut (fuel oil) working-mass recomposition.
//! All formulas operate on mass percentages; heating values are in MJ/kg.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Working-mass composition of a solid fuel, percent by mass.
///
/// Wire names are the short element symbols used by the submission form
/// (`hp` = H^P etc.).
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
#[validate(schema(function = "solid_fuel_mass_balance"))]
pub struct FuelComposition {
    /// Hydrogen, H^P.
    #[serde(rename = "hp")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub hydrogen: f64,
    /// Carbon, C^P.
    #[serde(rename = "cp")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub carbon: f64,
    /// Sulfur, S^P.
    #[serde(rename = "sp")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub sulfur: f64,
    /// Nitrogen, N^P.
    #[serde(rename = "np")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub nitrogen: f64,
    /// Oxygen, O^P.
    #[serde(rename = "op")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub oxygen: f64,
    /// Moisture, W^P.
    #[serde(rename = "wp")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub moisture: f64,
    /// Ash, A^P.
    #[serde(rename = "ap")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub ash: f64,
}

fn solid_fuel_mass_balance(composition: &FuelComposition) -> Result<(), ValidationError> {
    if composition.moisture + composition.ash >= 100.0 {
        return Err(ValidationError::new("moisture_and_ash_exhaust_mass"));
    }
    Ok(())
}

/// Dry-mass composition, percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DryComposition {
    pub hydrogen: f64,
    pub carbon: f64,
    pub sulfur: f64,
    pub nitrogen: f64,
    pub oxygen: f64,
    pub ash: f64,
}

/// Combustible-mass composition, percent. Ash and moisture are excluded by
/// definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombustibleComposition {
    pub hydrogen: f64,
    pub carbon: f64,
    pub sulfur: f64,
    pub nitrogen: f64,
    pub oxygen: f64,
}

/// Full solid-fuel analysis; presented values rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelAnalysis {
    pub dry_mass_coefficient: f64,
    pub combustible_mass_coefficient: f64,
    pub dry_composition: DryComposition,
    pub combustible_composition: CombustibleComposition,
    /// Q_н^Р, lower heating value of the working mass.
    pub lower_heating_value: f64,
    /// Q_н^С, lower heating value of the dry mass.
    pub lower_dry_heating_value: f64,
    /// Q_н^Г, lower heating value of the combustible mass.
    pub lower_combustible_heating_value: f64,
}

/// Convert a working-mass solid-fuel composition to dry and combustible
/// bases and compute the lower heating values (Mendeleev's formula).
pub fn analyze_solid_fuel(composition: &FuelComposition) -> FuelAnalysis {
    let k_dry = 100.0 / (100.0 - composition.moisture);
    let k_combustible = 100.0 / (100.0 - composition.moisture - composition.ash);

    let dry_composition = DryComposition {
        hydrogen: round2(composition.hydrogen * k_dry),
        carbon: round2(composition.carbon * k_dry),
        sulfur: round2(composition.sulfur * k_dry),
        nitrogen: round2(composition.nitrogen * k_dry),
        oxygen: round2(composition.oxygen * k_dry),
        ash: round2(composition.ash * k_dry),
    };

    let combustible_composition = CombustibleComposition {
        hydrogen: round2(composition.hydrogen * k_combustible),
        carbon: round2(composition.carbon * k_combustible),
        sulfur: round2(composition.sulfur * k_combustible),
        nitrogen: round2(composition.nitrogen * k_combustible),
        oxygen: round2(composition.oxygen * k_combustible),
    };

    // Q_н^Р = (339·C + 1030·H − 108.8·(O − S) − 25·W) / 1000, MJ/kg
    let working = (339.0 * composition.carbon + 1030.0 * composition.hydrogen
        - 108.8 * (composition.oxygen - composition.sulfur)
        - 25.0 * composition.moisture)
        / 1000.0;

    let moisture_corrected = working + 0.025 * composition.moisture;
    let dry = moisture_corrected * 100.0 / (100.0 - composition.moisture);
    let combustible =
        moisture_corrected * 100.0 / (100.0 - composition.moisture - composition.ash);

    FuelAnalysis {
        dry_mass_coefficient: round2(k_dry),
        combustible_mass_coefficient: round2(k_combustible),
        dry_composition,
        combustible_composition,
        lower_heating_value: round2(working),
        lower_dry_heating_value: round2(dry),
        lower_combustible_heating_value: round2(combustible),
    }
}

/// Mazut input: combustible-mass element percentages, moisture of the
/// working mass, ash of the dry mass, and the combustible-mass heating
/// value in MJ/kg.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "mazut_mass_balance"))]
pub struct MazutComposition {
    #[validate(range(min = 0.0, max = 100.0))]
    pub carbon_combustible: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub hydrogen_combustible: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub oxygen_combustible: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub sulfur_combustible: f64,
    /// Vanadium content relative to the dry mass, g/t.
    #[validate(range(min = 0.0))]
    pub vanadium_combustible: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub moisture_content: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub ash_dry: f64,
    #[validate(range(min = 0.0))]
    pub heating_value_combustible: f64,
}

fn mazut_mass_balance(composition: &MazutComposition) -> Result<(), ValidationError> {
    if composition.moisture_content + composition.ash_dry >= 100.0 {
        return Err(ValidationError::new("moisture_and_ash_exhaust_mass"));
    }
    Ok(())
}

/// Working-mass composition of mazut, percent (vanadium in g/t).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MazutWorkingComposition {
    pub carbon: f64,
    pub hydrogen: f64,
    pub oxygen: f64,
    pub sulfur: f64,
    pub vanadium: f64,
    pub ash: f64,
}

/// Mazut analysis result; values rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazutAnalysis {
    pub working_composition: MazutWorkingComposition,
    /// Q_н^Р of the working mass, MJ/kg.
    pub working_heating_value: f64,
}

/// Recompute a combustible-mass mazut composition to the working mass.
pub fn analyze_mazut(composition: &MazutComposition) -> MazutAnalysis {
    let to_working =
        (100.0 - composition.moisture_content - composition.ash_dry) / 100.0;
    // Vanadium and ash are specified against the dry mass, so they scale by
    // the moisture fraction only.
    let dry_to_working = (100.0 - composition.moisture_content) / 100.0;

    let working_composition = MazutWorkingComposition {
        carbon: round2(composition.carbon_combustible * to_working),
        hydrogen: round2(composition.hydrogen_combustible * to_working),
        oxygen: round2(composition.oxygen_combustible * to_working),
        sulfur: round2(composition.sulfur_combustible * to_working),
        vanadium: round2(composition.vanadium_combustible * dry_to_working),
        ash: round2(composition.ash_dry * dry_to_working),
    };

    let working_heating_value = composition.heating_value_combustible * to_working
        - 0.025 * composition.moisture_content;

    MazutAnalysis {
        working_composition,
        working_heating_value: round2(working_heating_value),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
