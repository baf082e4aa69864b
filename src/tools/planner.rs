//! Planner Tools
//!
//! Validation boundary between loosely typed requests and the dosing
//! calculator, plus rendering of finished plans.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::PlannerConfig;
use crate::dosing::constants::{DL_PER_L, ML_PER_L};
use crate::dosing::{
    build_plan, estimate_tbw, is_permille, parse_target_bac, Inputs, ParseError, Plan, Sex,
    BEVERAGES,
};

/// Closed interval accepted for a numeric input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const WEIGHT_KG_BOUNDS: Bounds = Bounds::new(30.0, 200.0);
pub const HEIGHT_CM_BOUNDS: Bounds = Bounds::new(120.0, 220.0);
pub const AGE_YEARS_BOUNDS: Bounds = Bounds::new(15.0, 100.0);
pub const DURATION_HOURS_BOUNDS: Bounds = Bounds::new(0.5, 24.0);

/// Request validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Unknown sex {0:?}: expected \"male\" or \"female\"")]
    InvalidSex(String),

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} has invalid value {value}")]
    InvalidValue { field: &'static str, value: f64 },
}

pub type PlanResult<T> = Result<T, PlanError>;

/// Raw request as supplied by a client
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    pub sex: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub duration_hours: f64,
    /// Free-form target BAC, e.g. "0.05%" or "0.5‰"
    pub target_bac: String,
    /// Elimination rate in g/dL per hour; the configured default when absent
    pub beta: Option<f64>,
}

/// Response for calculate_plan
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub inputs: Inputs,
    pub plan: Plan,
    pub calculated_at: String,
}

/// Response for parse_target_bac
#[derive(Debug, Serialize)]
pub struct ParseBacResponse {
    pub input: String,
    pub target_bac_g_per_dl: f64,
    pub permille: bool,
}

/// Response for estimate_tbw
#[derive(Debug, Serialize)]
pub struct TbwResponse {
    pub sex: Sex,
    pub tbw_l: f64,
    pub tbw_dl: f64,
}

pub fn parse_sex(s: &str) -> PlanResult<Sex> {
    Sex::from_str(s).ok_or_else(|| PlanError::InvalidSex(s.to_string()))
}

fn check_finite(field: &'static str, value: f64) -> PlanResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PlanError::InvalidValue { field, value })
    }
}

fn check_range(field: &'static str, value: f64, bounds: Bounds) -> PlanResult<f64> {
    if bounds.contains(value) {
        Ok(value)
    } else {
        Err(PlanError::OutOfRange {
            field,
            value,
            min: bounds.min,
            max: bounds.max,
        })
    }
}

/// Turn a raw request into calculator inputs.
///
/// Sex, target BAC (finite, >= 0) and beta (finite, > 0) are always
/// checked. Body and duration bounds apply only when
/// `config.enforce_bounds` is set.
pub fn validate_request(req: &PlanRequest, config: &PlannerConfig) -> PlanResult<Inputs> {
    let sex = parse_sex(&req.sex)?;
    let target_bac = check_finite("target_bac", parse_target_bac(&req.target_bac)?)?;
    if target_bac < 0.0 {
        return Err(PlanError::InvalidValue { field: "target_bac", value: target_bac });
    }

    let beta = check_finite("beta", req.beta.unwrap_or(config.default_beta))?;
    if beta <= 0.0 {
        return Err(PlanError::InvalidValue { field: "beta", value: beta });
    }

    let weight_kg = check_finite("weight_kg", req.weight_kg)?;
    let height_cm = check_finite("height_cm", req.height_cm)?;
    let duration_hours = check_finite("duration_hours", req.duration_hours)?;

    if config.enforce_bounds {
        check_range("weight_kg", weight_kg, WEIGHT_KG_BOUNDS)?;
        check_range("height_cm", height_cm, HEIGHT_CM_BOUNDS)?;
        check_range("age_years", f64::from(req.age_years), AGE_YEARS_BOUNDS)?;
        check_range("duration_hours", duration_hours, DURATION_HOURS_BOUNDS)?;
    }

    Ok(Inputs {
        sex,
        weight_kg,
        height_cm,
        age_years: req.age_years,
        duration_hours,
        target_bac,
        beta,
    })
}

/// Validate a request and build its plan
pub fn calculate_plan(req: &PlanRequest, config: &PlannerConfig) -> PlanResult<PlanResponse> {
    let inputs = validate_request(req, config)?;
    let plan = build_plan(&inputs);

    tracing::debug!(
        sex = inputs.sex.as_str(),
        target_bac = inputs.target_bac,
        total_grams = plan.total_grams,
        "built dose plan"
    );
    if plan.tbw_l <= 0.0 {
        tracing::warn!(tbw_l = plan.tbw_l, "non-positive body water estimate");
    }

    Ok(PlanResponse {
        inputs,
        plan,
        calculated_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    })
}

pub fn parse_bac(text: &str) -> PlanResult<ParseBacResponse> {
    let target = parse_target_bac(text)?;
    Ok(ParseBacResponse {
        input: text.to_string(),
        target_bac_g_per_dl: target,
        permille: is_permille(text),
    })
}

pub fn body_water(
    sex: &str,
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
) -> PlanResult<TbwResponse> {
    let sex = parse_sex(sex)?;
    let tbw_l = estimate_tbw(sex, weight_kg, height_cm, age_years);
    Ok(TbwResponse {
        sex,
        tbw_l,
        tbw_dl: tbw_l * DL_PER_L,
    })
}

/// Reference beverage entry for list_beverages
#[derive(Debug, Serialize)]
pub struct BeverageEntry {
    pub name: &'static str,
    pub label: String,
    pub abv: f64,
}

pub fn list_beverages() -> Vec<BeverageEntry> {
    BEVERAGES
        .iter()
        .map(|b| BeverageEntry {
            name: b.name,
            label: b.label(),
            abv: b.abv,
        })
        .collect()
}

pub const DISCLAIMER: &str = "Educational only - not medical advice.";

/// Render a plan as Markdown
pub fn render_plan_markdown(plan: &Plan) -> String {
    let mut markdown = String::new();

    markdown.push_str("## Results (Pure Ethanol)\n\n");
    markdown.push_str(&format!("**TBW estimate:** {:.2} L\n", plan.tbw_l));
    markdown.push_str(&format!(
        "**Loading dose:** {:.1} g ({:.1} mL) ethanol\n",
        plan.loading_grams, plan.loading_ml
    ));
    markdown.push_str(&format!(
        "**Maintenance rate:** {:.1} g ({:.1} mL) ethanol/hour\n",
        plan.maintenance_g_per_h, plan.maintenance_ml_per_h
    ));
    markdown.push_str(&format!(
        "**Total ethanol for {:.1} h:** {:.1} g ({:.1} mL)\n",
        plan.duration_hours, plan.total_grams, plan.total_ml
    ));
    markdown.push_str(&format!(
        "≈ {:.1} × 12g drinks | ≈ {:.1} × 14g drinks\n",
        plan.std_drinks_12g, plan.std_drinks_14g
    ));

    markdown.push_str("\n## Equivalent Beverage Volumes (Total)\n\n");
    for b in &plan.beverages_total {
        markdown.push_str(&format!(
            "**{}:** {:.0} mL total (~{:.2} L)\n",
            b.name,
            b.volume_ml,
            b.volume_ml / ML_PER_L
        ));
    }

    markdown.push_str("\n## Per-Hour Maintenance Suggestion\n\n");
    for b in &plan.beverages_per_hour {
        markdown.push_str(&format!("**{}:** ~{:.0} mL per hour\n", b.name, b.volume_ml));
    }

    markdown.push_str(&format!(
        "\nLoading dose is taken at start, maintenance spread evenly per hour. \
         Real metabolism varies - this is only a model. {}\n",
        DISCLAIMER
    ));
    markdown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PlanRequest {
        PlanRequest {
            sex: "male".to_string(),
            weight_kg: 80.0,
            height_cm: 180.0,
            age_years: 30,
            duration_hours: 3.0,
            target_bac: "0.08".to_string(),
            beta: None,
        }
    }

    #[test]
    fn test_validate_request_defaults_beta() {
        let config = PlannerConfig { default_beta: 0.018, enforce_bounds: true };
        let inputs = validate_request(&request(), &config).unwrap();
        assert_eq!(inputs.sex, Sex::Male);
        assert_eq!(inputs.target_bac, 0.08);
        assert_eq!(inputs.beta, 0.018);
    }

    #[test]
    fn test_validate_request_explicit_beta() {
        let req = PlanRequest { beta: Some(0.02), ..request() };
        let inputs = validate_request(&req, &PlannerConfig::default()).unwrap();
        assert_eq!(inputs.beta, 0.02);
    }

    #[test]
    fn test_unknown_sex_rejected() {
        let req = PlanRequest { sex: "other".to_string(), ..request() };
        let err = validate_request(&req, &PlannerConfig::default()).unwrap_err();
        assert_eq!(err, PlanError::InvalidSex("other".to_string()));
    }

    #[test]
    fn test_parse_error_propagates() {
        let req = PlanRequest { target_bac: "abc%".to_string(), ..request() };
        let err = validate_request(&req, &PlannerConfig::default()).unwrap_err();
        assert!(matches!(err, PlanError::Parse(_)));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_bounds_enforced() {
        let req = PlanRequest { weight_kg: 20.0, ..request() };
        let err = validate_request(&req, &PlannerConfig::default()).unwrap_err();
        assert_eq!(
            err,
            PlanError::OutOfRange { field: "weight_kg", value: 20.0, min: 30.0, max: 200.0 }
        );

        let req = PlanRequest { duration_hours: 30.0, ..request() };
        assert!(validate_request(&req, &PlannerConfig::default()).is_err());

        let req = PlanRequest { age_years: 12, ..request() };
        assert!(validate_request(&req, &PlannerConfig::default()).is_err());
    }

    #[test]
    fn test_bounds_can_be_disabled() {
        let config = PlannerConfig { enforce_bounds: false, ..PlannerConfig::default() };
        let req = PlanRequest { weight_kg: 5.0, height_cm: 50.0, ..request() };
        let inputs = validate_request(&req, &config).unwrap();
        assert_eq!(inputs.weight_kg, 5.0);
    }

    #[test]
    fn test_negative_target_rejected() {
        let req = PlanRequest { target_bac: "-0.05%".to_string(), ..request() };
        let err = validate_request(&req, &PlannerConfig::default()).unwrap_err();
        assert!(matches!(err, PlanError::InvalidValue { field: "target_bac", .. }));
    }

    #[test]
    fn test_zero_beta_rejected() {
        let req = PlanRequest { beta: Some(0.0), ..request() };
        let err = validate_request(&req, &PlannerConfig::default()).unwrap_err();
        assert_eq!(err, PlanError::InvalidValue { field: "beta", value: 0.0 });

        let req = PlanRequest { beta: Some(-0.01), ..request() };
        assert!(validate_request(&req, &PlannerConfig::default()).is_err());
    }

    #[test]
    fn test_render_keeps_fractional_duration() {
        let req = PlanRequest { duration_hours: 2.5, ..request() };
        let response = calculate_plan(&req, &PlannerConfig::default()).unwrap();
        let text = render_plan_markdown(&response.plan);
        assert!(text.contains("**Total ethanol for 2.5 h:**"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let req = PlanRequest { target_bac: "nan".to_string(), ..request() };
        assert!(validate_request(&req, &PlannerConfig::default()).is_err());

        let req = PlanRequest { weight_kg: f64::INFINITY, ..request() };
        let config = PlannerConfig { enforce_bounds: false, ..PlannerConfig::default() };
        assert!(validate_request(&req, &config).is_err());
    }

    #[test]
    fn test_calculate_plan() {
        let response = calculate_plan(&request(), &PlannerConfig::default()).unwrap();
        assert!((response.plan.total_grams - 57.27525).abs() < 1e-9);
        assert_eq!(response.inputs.age_years, 30);
        assert_eq!(response.calculated_at.len(), 20);
    }

    #[test]
    fn test_parse_bac_response() {
        let resp = parse_bac("0.5‰").unwrap();
        assert!(resp.permille);
        assert!((resp.target_bac_g_per_dl - 0.05).abs() < 1e-12);
        assert!(parse_bac("x").is_err());
    }

    #[test]
    fn test_body_water() {
        let resp = body_water("male", 80.0, 180.0, 30).unwrap();
        assert!((resp.tbw_l - 45.8202).abs() < 1e-9);
        assert!((resp.tbw_dl - 458.202).abs() < 1e-9);
        assert!(body_water("x", 80.0, 180.0, 30).is_err());
    }

    #[test]
    fn test_list_beverages() {
        let entries = list_beverages();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1].label, "Wine (12%)");
        assert_eq!(entries[3].abv, 0.40);
    }

    #[test]
    fn test_render_plan_markdown() {
        let response = calculate_plan(&request(), &PlannerConfig::default()).unwrap();
        let text = render_plan_markdown(&response.plan);
        assert!(text.contains("**TBW estimate:** 45.82 L"));
        assert!(text.contains("**Loading dose:** 36.7 g (46.5 mL) ethanol"));
        assert!(text.contains("**Maintenance rate:** 6.9 g (8.7 mL) ethanol/hour"));
        assert!(text.contains("**Total ethanol for 3.0 h:** 57.3 g (72.6 mL)"));
        assert!(text.contains("≈ 4.8 × 12g drinks | ≈ 4.1 × 14g drinks"));
        assert!(text.contains("**Beer (5%):** 1452 mL total (~1.45 L)"));
        assert!(text.contains("**Spirits (40%):** ~22 mL per hour"));
        assert!(text.contains(DISCLAIMER));
    }
}
