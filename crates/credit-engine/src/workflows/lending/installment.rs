//! Equated monthly installment math.

/// Error raised when installment inputs cannot be priced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InstallmentError {
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },
    #[error("interest rate or tenure too large")]
    RateOrTenureTooLarge,
}

/// Monthly installment for an amortizing loan, rounded to 2 decimal places.
///
/// Uses `P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r = annual_rate / 12 / 100`.
/// A zero rate repays the principal in equal parts.
pub fn calculate_emi(
    principal: f64,
    annual_rate_percent: f64,
    tenure_months: u32,
) -> Result<f64, InstallmentError> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(InstallmentError::InvalidInput {
            field: "principal",
            reason: "must be a positive amount",
        });
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(InstallmentError::InvalidInput {
            field: "interest_rate",
            reason: "must be zero or positive",
        });
    }
    if tenure_months == 0 {
        return Err(InstallmentError::InvalidInput {
            field: "tenure",
            reason: "must be at least one month",
        });
    }

    if annual_rate_percent == 0.0 {
        return even_split(principal, tenure_months);
    }

    let monthly_rate = annual_rate_percent / 12.0 / 100.0;
    let exponent = i32::try_from(tenure_months).map_err(|_| InstallmentError::RateOrTenureTooLarge)?;
    let growth = (1.0 + monthly_rate).powi(exponent);
    if !growth.is_finite() {
        return Err(InstallmentError::RateOrTenureTooLarge);
    }

    // rates too small to move the growth factor price like a zero rate
    if growth - 1.0 == 0.0 {
        return even_split(principal, tenure_months);
    }

    let emi = principal * monthly_rate * growth / (growth - 1.0);
    if !emi.is_finite() {
        return Err(InstallmentError::RateOrTenureTooLarge);
    }

    round_cents(emi)
}

fn even_split(principal: f64, tenure_months: u32) -> Result<f64, InstallmentError> {
    round_cents(principal / tenure_months as f64)
}

fn round_cents(value: f64) -> Result<f64, InstallmentError> {
    let rounded = (value * 100.0).round_ties_even() / 100.0;
    if !rounded.is_finite() {
        return Err(InstallmentError::InvalidInput {
            field: "principal",
            reason: "too large to price",
        });
    }
    Ok(rounded)
}
