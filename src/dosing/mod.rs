//! Dosing calculation module
//!
//! Body water estimation, target BAC parsing, and the loading/maintenance
//! dose plan with its ethanol volume and beverage projections.

pub mod bac;
pub mod beverages;
pub mod body_water;
pub mod constants;
pub mod plan;

pub use bac::{is_permille, parse_target_bac, ParseError};
pub use beverages::{ethanol_to_beverage_volume, Beverage, BeverageVolume, BEVERAGES};
pub use body_water::{estimate_tbw, Sex};
pub use plan::{build_plan, Inputs, MassPlan, Plan};
