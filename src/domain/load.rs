use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::equipment::{EquipmentDerived, EquipmentRecord};
use super::tables::{
    find_coefficient, find_coefficient_range, BUSBAR_DEFAULT, BUSBAR_TABLE, FEEDER_DEFAULT,
    FEEDER_TABLE,
};

/// The single user-visible failure of the aggregation: nothing to aggregate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("no complete equipment record supplied")]
    EmptyEquipmentGroup,
}

/// Surveyed totals for the whole facility, used for the busbar assessment.
/// Policy constants rather than computed values; overridable via
/// configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilityTotals {
    pub equipment_count: u32,
    /// Σ n · Pн
    pub total_power: f64,
    /// Σ n · Pн · Кв
    pub total_utilization_power: f64,
    /// Σ n · Pн · Кв · tgφ
    pub total_reactive_power: f64,
    /// Σ n · Pн²
    pub total_squared_power: f64,
}

impl Default for FacilityTotals {
    fn default() -> Self {
        Self {
            equipment_count: 81,
            total_power: 2330.0,
            total_utilization_power: 752.0,
            total_reactive_power: 657.0,
            total_squared_power: 96388.0,
        }
    }
}

/// Load summary for the submitted equipment group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupLoadSummary {
    /// Кв of the group, Σ(n·Pн·Кв) / Σ(n·Pн).
    pub utilization_rate: f64,
    /// nе, ceil(Σ(n·Pн)² / Σ(n·Pн²)).
    pub effective_equipment_count: u32,
    /// Кр from the feeder table.
    pub active_power_factor: f64,
    /// Кр · Σ(n·Pн·Кв), kW.
    pub active_load: f64,
    /// Σ(n·Pн·Кв·tgφ), kvar. Not coefficient-adjusted at group level.
    pub reactive_load: f64,
    /// √(active² + reactive²), kVA.
    pub full_power: f64,
    /// Active load over the reference voltage, A.
    pub current: f64,
}

/// Load summary at the facility's low-voltage busbars, computed from the
/// fixed [`FacilityTotals`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityLoadSummary {
    pub equipment_count: u32,
    /// Кв of the facility, rounded to one decimal as used for the lookup.
    pub utilization_rate: f64,
    /// nе, floor(Σ(n·Pн)² / Σ(n·Pн²)).
    pub effective_equipment_count: u32,
    /// Кр from the busbar table.
    pub active_power_factor: f64,
    /// Кр-adjusted active load, kW.
    pub active_load: f64,
    /// Кр-adjusted reactive load, kvar. The busbar assessment scales both
    /// components, unlike the group one.
    pub reactive_load: f64,
    /// √(active² + reactive²), kVA.
    pub full_power: f64,
    /// Active load over the reference voltage, A.
    pub current: f64,
}

/// Result of one aggregation run: the local group and the whole facility.
/// Never mutated after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadAssessment {
    pub group: GroupLoadSummary,
    pub facility: FacilityLoadSummary,
}

/// Aggregates a list of equipment records into group and facility load
/// figures. Pure and stateless apart from the configured facility totals;
/// identical input yields identical output.
#[derive(Debug, Clone)]
pub struct LoadAggregator {
    facility: FacilityTotals,
}

impl LoadAggregator {
    pub fn new(facility: FacilityTotals) -> Self {
        Self { facility }
    }

    /// Run the full assessment over `records`.
    ///
    /// Records with any zero field are discarded silently; if none survive,
    /// the whole operation is rejected. All by-zero ratios fall back to zero
    /// instead of erroring.
    pub fn aggregate(&self, records: &[EquipmentRecord]) -> Result<LoadAssessment, LoadError> {
        let complete: Vec<&EquipmentRecord> =
            records.iter().filter(|r| r.is_complete()).collect();
        if complete.is_empty() {
            return Err(LoadError::EmptyEquipmentGroup);
        }

        let derived: Vec<EquipmentDerived> = complete.iter().map(|r| r.derive()).collect();

        let total_power: f64 = derived.iter().map(|d| d.power_total).sum();
        let total_utilization_power: f64 = derived.iter().map(|d| d.utilization_power).sum();
        let total_squared_power: f64 = derived.iter().map(|d| d.squared_power).sum();
        let total_reactive_power: f64 = derived.iter().map(|d| d.reactive_power).sum();

        let utilization_rate = if total_power > 0.0 {
            total_utilization_power / total_power
        } else {
            0.0
        };

        // nе = ceil((Σ n·Pн)² / Σ n·Pн²); ceiling, not rounding, is the
        // lookup key policy for the group.
        let effective_equipment_count = if total_squared_power > 0.0 {
            (total_power.powi(2) / total_squared_power).ceil() as u32
        } else {
            0
        };

        let rounded_utilization_rate = round_to_tenth(utilization_rate);

        let active_power_factor = find_coefficient(
            effective_equipment_count,
            rounded_utilization_rate,
            FEEDER_TABLE,
            FEEDER_DEFAULT,
        );

        let active_load = active_power_factor * total_utilization_power;
        let reactive_load = total_reactive_power;
        let full_power = active_load.hypot(reactive_load);

        // Reference voltage comes from the first complete record; survey
        // sheets list a single supply voltage per group.
        let reference_voltage = complete[0].load_voltage;
        let current = if reference_voltage > 0.0 {
            active_load / reference_voltage
        } else {
            0.0
        };

        let group = GroupLoadSummary {
            utilization_rate,
            effective_equipment_count,
            active_power_factor,
            active_load,
            reactive_load,
            full_power,
            current,
        };

        Ok(LoadAssessment {
            group,
            facility: self.assess_facility(reference_voltage),
        })
    }

    /// Busbar-level assessment from the fixed facility totals. Uses the
    /// range table, truncates the effective count, and scales both the
    /// active and reactive totals by Кр.
    fn assess_facility(&self, reference_voltage: f64) -> FacilityLoadSummary {
        let totals = &self.facility;

        let utilization_rate = if totals.total_power > 0.0 {
            totals.total_utilization_power / totals.total_power
        } else {
            0.0
        };

        let effective_equipment_count = if totals.total_squared_power > 0.0 {
            (totals.total_power.powi(2) / totals.total_squared_power) as u32
        } else {
            0
        };

        let rounded_utilization_rate = round_to_tenth(utilization_rate);

        let active_power_factor = find_coefficient_range(
            effective_equipment_count,
            rounded_utilization_rate,
            BUSBAR_TABLE,
            BUSBAR_DEFAULT,
        );

        let active_load = active_power_factor * totals.total_utilization_power;
        let reactive_load = active_power_factor * totals.total_reactive_power;
        let full_power = active_load.hypot(reactive_load);

        let current = if reference_voltage > 0.0 {
            active_load / reference_voltage
        } else {
            0.0
        };

        FacilityLoadSummary {
            equipment_count: totals.equipment_count,
            utilization_rate: rounded_utilization_rate,
            effective_equipment_count,
            active_power_factor,
            active_load,
            reactive_load,
            full_power,
            current,
        }
    }
}

/// One-decimal rounding, half away from zero (`f64::round` semantics).
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(
        quantity: u32,
        rated_power: u32,
        utilization_rate: f64,
        reactive_power_factor: f64,
    ) -> EquipmentRecord {
        EquipmentRecord {
            name: String::new(),
            efficiency_factor: 0.92,
            load_power_factor: 0.9,
            load_voltage: 0.38,
            quantity,
            rated_power,
            utilization_rate,
            reactive_power_factor,
        }
    }

    /// The woodworking-shop survey sheet the service was written around.
    fn workshop() -> Vec<EquipmentRecord> {
        vec![
            record(4, 20, 0.15, 1.33),
            record(2, 14, 0.12, 1.0),
            record(4, 42, 0.15, 1.33),
            record(1, 20, 0.5, 0.75),
            record(1, 20, 0.5, 0.75),
            record(1, 40, 0.2, 1.0),
            record(2, 32, 0.2, 1.0),
            record(1, 20, 0.65, 0.75),
        ]
    }

    fn aggregator() -> LoadAggregator {
        LoadAggregator::new(FacilityTotals::default())
    }

    #[test]
    fn workshop_group_summary() {
        let assessment = aggregator().aggregate(&workshop()).unwrap();
        let group = assessment.group;

        // Σ n·Pн = 440, Σ n·Pн·Кв = 94.36, Σ n·Pн² = 13896
        assert!((group.utilization_rate - 94.36 / 440.0).abs() < 1e-12);
        // ceil(440² / 13896) = ceil(13.93) = 14
        assert_eq!(group.effective_equipment_count, 14);
        // feeder table row 14, column 0.2
        assert_eq!(group.active_power_factor, 1.27);
        assert!((group.active_load - 1.27 * 94.36).abs() < 1e-9);
        assert!((group.reactive_load - 98.386).abs() < 1e-9);
        assert!((group.current - group.active_load / 0.38).abs() < 1e-9);
    }

    #[test]
    fn workshop_facility_summary() {
        let assessment = aggregator().aggregate(&workshop()).unwrap();
        let facility = assessment.facility;

        assert_eq!(facility.equipment_count, 81);
        // 752 / 2330 ≈ 0.3227, rounded to 0.3
        assert_eq!(facility.utilization_rate, 0.3);
        // floor(2330² / 96388) = 56
        assert_eq!(facility.effective_equipment_count, 56);
        // busbar table open row, column 0.3
        assert_eq!(facility.active_power_factor, 0.70);
        assert!((facility.active_load - 526.4).abs() < 1e-9);
        assert!((facility.reactive_load - 459.9).abs() < 1e-9);
        assert!((facility.full_power - facility.active_load.hypot(facility.reactive_load)).abs()
            < 1e-12);
        assert!((facility.current - 526.4 / 0.38).abs() < 1e-9);
    }

    #[test]
    fn empty_list_is_rejected() {
        assert_eq!(
            aggregator().aggregate(&[]).unwrap_err(),
            LoadError::EmptyEquipmentGroup
        );
    }

    #[test]
    fn incomplete_records_alone_are_rejected() {
        let incomplete = vec![
            EquipmentRecord { utilization_rate: 0.0, ..record(4, 20, 0.15, 1.33) },
            EquipmentRecord { quantity: 0, ..record(4, 20, 0.15, 1.33) },
        ];
        assert_eq!(
            aggregator().aggregate(&incomplete).unwrap_err(),
            LoadError::EmptyEquipmentGroup
        );
    }

    #[test]
    fn incomplete_records_are_discarded_silently() {
        let mut records = workshop();
        records.insert(3, EquipmentRecord::default());
        records.push(EquipmentRecord { load_voltage: 0.0, ..record(9, 99, 0.9, 0.9) });

        let with_noise = aggregator().aggregate(&records).unwrap();
        let clean = aggregator().aggregate(&workshop()).unwrap();
        assert_eq!(with_noise, clean);
    }

    #[test]
    fn aggregation_is_pure() {
        let records = workshop();
        let first = aggregator().aggregate(&records).unwrap();
        let second = aggregator().aggregate(&records).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn single_record_falls_back_to_feeder_row_one() {
        let records = vec![record(1, 20, 0.1, 1.0)];
        let group = aggregator().aggregate(&records).unwrap().group;
        assert_eq!(group.effective_equipment_count, 1);
        assert_eq!(group.active_power_factor, 8.0);
    }

    #[test]
    fn lookup_miss_uses_feeder_default() {
        // Кв = 0.9 has no column in the feeder table.
        let records = vec![record(1, 20, 0.9, 1.0)];
        let group = aggregator().aggregate(&records).unwrap().group;
        assert_eq!(group.active_power_factor, FEEDER_DEFAULT);
    }

    #[test]
    fn zeroed_facility_totals_are_well_defined() {
        let aggregator = LoadAggregator::new(FacilityTotals {
            equipment_count: 0,
            total_power: 0.0,
            total_utilization_power: 0.0,
            total_reactive_power: 0.0,
            total_squared_power: 0.0,
        });
        let facility = aggregator.aggregate(&workshop()).unwrap().facility;
        assert_eq!(facility.utilization_rate, 0.0);
        assert_eq!(facility.effective_equipment_count, 0);
        assert_eq!(facility.active_power_factor, BUSBAR_DEFAULT);
        assert_eq!(facility.active_load, 0.0);
        assert_eq!(facility.full_power, 0.0);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to_tenth(0.449), 0.4);
        assert_eq!(round_to_tenth(0.45), 0.5);
        assert_eq!(round_to_tenth(0.3227), 0.3);
    }

    proptest! {
        #[test]
        fn full_power_dominates_both_components(
            entries in proptest::collection::vec(
                (1u32..10, 1u32..100, 0.05f64..1.0, 0.1f64..2.0),
                1..12,
            )
        ) {
            let records: Vec<EquipmentRecord> = entries
                .into_iter()
                .map(|(quantity, rated_power, rate, tg)| record(quantity, rated_power, rate, tg))
                .collect();

            let group = aggregator().aggregate(&records).unwrap().group;
            prop_assert!(group.full_power >= group.active_load - 1e-9);
            prop_assert!(group.full_power >= group.reactive_load - 1e-9);
        }

        #[test]
        fn group_rate_stays_in_unit_interval(
            entries in proptest::collection::vec(
                (1u32..10, 1u32..100, 0.05f64..=1.0, 0.1f64..2.0),
                1..12,
            )
        ) {
            let records: Vec<EquipmentRecord> = entries
                .into_iter()
                .map(|(quantity, rated_power, rate, tg)| record(quantity, rated_power, rate, tg))
                .collect();

            let group = aggregator().aggregate(&records).unwrap().group;
            prop_assert!(group.utilization_rate >= 0.0);
            prop_assert!(group.utilization_rate <= 1.0 + 1e-12);
        }
    }
}
