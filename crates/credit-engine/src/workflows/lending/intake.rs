//! Boundary validation turning loosely typed request payloads into typed applications.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::CustomerId;
use super::error::LendingError;

/// Loan request exactly as received from a caller, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanApplicationPayload {
    #[serde(default)]
    pub customer_id: Option<Value>,
    #[serde(default)]
    pub loan_amount: Option<Value>,
    #[serde(default)]
    pub interest_rate: Option<Value>,
    #[serde(default)]
    pub tenure: Option<Value>,
}

/// Validated loan request consumed by the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub customer_id: CustomerId,
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub tenure: u32,
}

impl TryFrom<LoanApplicationPayload> for LoanApplication {
    type Error = LendingError;

    fn try_from(payload: LoanApplicationPayload) -> Result<Self, Self::Error> {
        let fields = [
            ("customer_id", payload.customer_id.as_ref()),
            ("loan_amount", payload.loan_amount.as_ref()),
            ("interest_rate", payload.interest_rate.as_ref()),
            ("tenure", payload.tenure.as_ref()),
        ];
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| is_missing(*value))
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(LendingError::invalid(
                missing.join(", "),
                "missing required field",
            ));
        }

        let customer_id = parse_integer(payload.customer_id.as_ref(), "customer_id")?;
        let tenure = parse_integer(payload.tenure.as_ref(), "tenure")?;
        let tenure = u32::try_from(tenure)
            .map_err(|_| LendingError::invalid("tenure", "must fit in 32 bits"))?;

        Ok(Self {
            customer_id: CustomerId(customer_id),
            loan_amount: parse_decimal(payload.loan_amount.as_ref(), "loan_amount")?,
            interest_rate: parse_decimal(payload.interest_rate.as_ref(), "interest_rate")?,
            tenure,
        })
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(raw)) => raw.trim().is_empty(),
        Some(_) => false,
    }
}

fn parse_decimal(value: Option<&Value>, field: &'static str) -> Result<f64, LendingError> {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(raw)) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| LendingError::invalid(field, "expected a numeric value"))
}

fn parse_integer(value: Option<&Value>, field: &'static str) -> Result<u64, LendingError> {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|raw| *raw >= 0.0 && raw.fract() == 0.0 && *raw <= u64::MAX as f64)
                .map(|raw| raw as u64)
        }),
        Some(Value::String(raw)) => raw.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| LendingError::invalid(field, "expected a non-negative whole number"))
}
