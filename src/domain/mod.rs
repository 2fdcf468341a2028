pub mod equipment;
pub mod fuel;
pub mod load;
pub mod tables;

pub use equipment::{EquipmentDerived, EquipmentRecord};
pub use fuel::{
    analyze_mazut, analyze_solid_fuel, FuelAnalysis, FuelComposition, MazutAnalysis,
    MazutComposition,
};
pub use load::{
    FacilityLoadSummary, FacilityTotals, GroupLoadSummary, LoadAggregator, LoadAssessment,
    LoadError,
};
