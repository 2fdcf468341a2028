use serde::{Deserialize, Serialize};

/// One electrical consumer entry as submitted by the client.
///
/// Wire names follow the submission form's payload (camelCase). Missing
/// fields deserialize to zero and mark the record as incomplete.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentRecord {
    pub name: String,
    /// Drive efficiency, nн.
    pub efficiency_factor: f64,
    /// Load power factor, cosφ.
    pub load_power_factor: f64,
    /// Nominal voltage in kV, Uн.
    pub load_voltage: f64,
    /// Number of identical units, n.
    pub quantity: u32,
    /// Rated power of one unit in kW, Pн.
    pub rated_power: u32,
    /// Utilization rate, Кв.
    pub utilization_rate: f64,
    /// Reactive power factor, tgφ.
    pub reactive_power_factor: f64,
}

/// Quantities derived from a single [`EquipmentRecord`]. Recomputed on every
/// calculation, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentDerived {
    /// n × Pн
    pub power_total: f64,
    /// n × Pн × Кв
    pub utilization_power: f64,
    /// n × Pн × Кв × tgφ
    pub reactive_power: f64,
    /// n × Pн²
    pub squared_power: f64,
    /// Ip, truncated to one decimal
    pub current: f64,
}

impl EquipmentRecord {
    /// A record takes part in aggregation only when every numeric field is
    /// non-zero. Zero and unparsable form inputs both arrive as zero.
    pub fn is_complete(&self) -> bool {
        self.efficiency_factor != 0.0
            && self.load_power_factor != 0.0
            && self.load_voltage != 0.0
            && self.quantity != 0
            && self.rated_power != 0
            && self.utilization_rate != 0.0
            && self.reactive_power_factor != 0.0
    }

    /// Compute the per-item derived quantities. Callers must filter with
    /// [`EquipmentRecord::is_complete`] first; the current divides by the
    /// voltage/cosφ/efficiency product.
    pub fn derive(&self) -> EquipmentDerived {
        let power_total = f64::from(self.quantity) * f64::from(self.rated_power);
        let utilization_power = power_total * self.utilization_rate;
        let reactive_power = utilization_power * self.reactive_power_factor;
        let squared_power = f64::from(self.quantity) * f64::from(self.rated_power).powi(2);

        // Ip = (n · Pн) / (√3 · Uн · cosφ · nн)
        let current = power_total
            / (3.0_f64.sqrt() * self.load_voltage * self.load_power_factor * self.efficiency_factor);
        let current = (current * 10.0).floor() / 10.0;

        EquipmentDerived {
            power_total,
            utilization_power,
            reactive_power,
            squared_power,
            current,
        }
    }
}
