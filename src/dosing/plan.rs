//! Dose plan
//!
//! A loading dose raises BAC from zero to the target assuming ethanol is
//! spread evenly through total body water; the hourly maintenance dose
//! offsets elimination at a constant rate `beta`.

use serde::{Deserialize, Serialize};

use super::beverages::{BeverageVolume, BEVERAGES};
use super::body_water::{estimate_tbw, Sex};
use super::constants::{
    DEFAULT_BETA, DL_PER_L, ETHANOL_DENSITY_G_PER_ML, STD_DRINK_12G, STD_DRINK_14G,
};

/// Validated inputs for one calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    pub sex: Sex,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub duration_hours: f64,
    /// Target BAC in g/dL
    pub target_bac: f64,
    /// Elimination rate in g/dL per hour
    pub beta: f64,
}

impl Inputs {
    /// Inputs with the default elimination rate
    pub fn new(
        sex: Sex,
        weight_kg: f64,
        height_cm: f64,
        age_years: u32,
        duration_hours: f64,
        target_bac: f64,
    ) -> Self {
        Self {
            sex,
            weight_kg,
            height_cm,
            age_years,
            duration_hours,
            target_bac,
            beta: DEFAULT_BETA,
        }
    }

    pub fn with_beta(self, beta: f64) -> Self {
        Self { beta, ..self }
    }
}

/// Full dose plan: ethanol mass, ethanol volume and beverage equivalents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub tbw_l: f64,
    pub tbw_dl: f64,
    pub duration_hours: f64,
    pub loading_grams: f64,
    pub maintenance_g_per_h: f64,
    pub total_grams: f64,
    pub loading_ml: f64,
    pub maintenance_ml_per_h: f64,
    pub total_ml: f64,
    pub std_drinks_12g: f64,
    pub std_drinks_14g: f64,
    /// Beverage volumes carrying `total_ml` of ethanol
    pub beverages_total: Vec<BeverageVolume>,
    /// Beverage volumes carrying `maintenance_ml_per_h` of ethanol
    pub beverages_per_hour: Vec<BeverageVolume>,
}

/// Mass-only view of a plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MassPlan {
    pub tbw_l: f64,
    pub tbw_dl: f64,
    pub loading_grams: f64,
    pub maintenance_g_per_h: f64,
    pub total_grams: f64,
    pub std_drinks_12g: f64,
    pub std_drinks_14g: f64,
}

impl Plan {
    pub fn mass(&self) -> MassPlan {
        MassPlan {
            tbw_l: self.tbw_l,
            tbw_dl: self.tbw_dl,
            loading_grams: self.loading_grams,
            maintenance_g_per_h: self.maintenance_g_per_h,
            total_grams: self.total_grams,
            std_drinks_12g: self.std_drinks_12g,
            std_drinks_14g: self.std_drinks_14g,
        }
    }
}

fn grams_to_ml(grams: f64) -> f64 {
    grams / ETHANOL_DENSITY_G_PER_ML
}

/// Build the dose plan for the given inputs.
pub fn build_plan(inputs: &Inputs) -> Plan {
    let tbw_l = estimate_tbw(inputs.sex, inputs.weight_kg, inputs.height_cm, inputs.age_years);
    let tbw_dl = tbw_l * DL_PER_L;

    let loading_grams = inputs.target_bac * tbw_dl;
    let maintenance_g_per_h = inputs.beta * tbw_dl;
    let total_grams = loading_grams + maintenance_g_per_h * inputs.duration_hours;

    let loading_ml = grams_to_ml(loading_grams);
    let maintenance_ml_per_h = grams_to_ml(maintenance_g_per_h);
    let total_ml = grams_to_ml(total_grams);

    Plan {
        tbw_l,
        tbw_dl,
        duration_hours: inputs.duration_hours,
        loading_grams,
        maintenance_g_per_h,
        total_grams,
        loading_ml,
        maintenance_ml_per_h,
        total_ml,
        std_drinks_12g: total_grams / STD_DRINK_12G,
        std_drinks_14g: total_grams / STD_DRINK_14G,
        beverages_total: BEVERAGES.iter().map(|b| b.volume_for(total_ml)).collect(),
        beverages_per_hour: BEVERAGES
            .iter()
            .map(|b| b.volume_for(maintenance_ml_per_h))
            .collect(),
    }
}
