//! Reference beverages and ethanol-to-beverage volume conversion

use serde::Serialize;

/// A reference beverage with its alcohol by volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Beverage {
    pub name: &'static str,
    /// Fraction of the beverage volume that is pure ethanol
    pub abv: f64,
}

impl Beverage {
    /// Display label, e.g. "Beer (5%)"
    pub fn label(&self) -> String {
        format!("{} ({:.0}%)", self.name, self.abv * 100.0)
    }

    /// Volume of this beverage that carries `ethanol_ml` of pure ethanol
    pub fn volume_for(&self, ethanol_ml: f64) -> BeverageVolume {
        BeverageVolume {
            name: self.label(),
            abv: self.abv,
            volume_ml: ethanol_to_beverage_volume(ethanol_ml, self.abv),
        }
    }
}

/// Common beverages, in display order
pub const BEVERAGES: &[Beverage] = &[
    Beverage { name: "Beer", abv: 0.05 },
    Beverage { name: "Wine", abv: 0.12 },
    Beverage { name: "Fortified Wine", abv: 0.18 },
    Beverage { name: "Spirits", abv: 0.40 },
];

/// Beverage volume equivalent to an amount of pure ethanol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeverageVolume {
    pub name: String,
    pub abv: f64,
    pub volume_ml: f64,
}

/// Convert pure ethanol mL to beverage volume in mL for a given ABV.
pub fn ethanol_to_beverage_volume(ethanol_ml: f64, abv: f64) -> f64 {
    ethanol_ml / abv
}
