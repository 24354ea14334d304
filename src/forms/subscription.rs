use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
/// Form data for assigning a plan to a client.
///
/// Discount and price bounds are enforced here so the UI gets a proper
/// validation error; the domain additionally clamps, so even a payload that
/// skips validation cannot produce a negative charge.
pub struct AssignPlanForm {
    /// Client identifier.
    pub id: String,
    /// Identifier of the plan to assign.
    #[validate(length(min = 1))]
    pub plan_id: String,
    /// Optional per-client price override.
    #[validate(range(min = 0.0))]
    pub custom_price: Option<f64>,
    /// Optional percentage discount applied to the base price.
    #[validate(range(min = 0.0, max = 100.0))]
    pub discount: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(custom_price: Option<f64>, discount: Option<f64>) -> AssignPlanForm {
        AssignPlanForm {
            id: "c1".to_string(),
            plan_id: "plan-pro".to_string(),
            custom_price,
            discount,
        }
    }

    #[test]
    fn accepts_absent_overrides() {
        assert!(form(None, None).validate().is_ok());
        assert!(form(Some(19.5), Some(25.0)).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_discount() {
        assert!(form(None, Some(150.0)).validate().is_err());
        assert!(form(None, Some(-1.0)).validate().is_err());
    }

    #[test]
    fn rejects_negative_price_override() {
        assert!(form(Some(-10.0), None).validate().is_err());
    }
}
