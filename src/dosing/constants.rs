//! Physical constants and reference sizes used by the dose plan

/// Density of pure ethanol in grams per milliliter
pub const ETHANOL_DENSITY_G_PER_ML: f64 = 0.789;

/// Default elimination rate in g/dL per hour
pub const DEFAULT_BETA: f64 = 0.015;

/// Deciliters per liter
pub const DL_PER_L: f64 = 10.0;

/// Milliliters per liter
pub const ML_PER_L: f64 = 1000.0;

/// Grams of ethanol in a 12 g standard drink
pub const STD_DRINK_12G: f64 = 12.0;

/// Grams of ethanol in a 14 g standard drink
pub const STD_DRINK_14G: f64 = 14.0;

/// Converts a permille reading to the g/dL (percent) scale
pub const PERMILLE_TO_G_PER_DL: f64 = 0.1;
