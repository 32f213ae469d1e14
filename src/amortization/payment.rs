//! Fixed-rate annuity payment

/// Level payment that retires `principal` over `periods` payments at `periodic_rate`
///
/// P × r × (1 + r)^n / ((1 + r)^n − 1), or straight-line P / n when the rate is zero.
pub fn annuity_payment(principal: f64, periodic_rate: f64, periods: u32) -> f64 {
    if periods == 0 {
        return 0.0;
    }
    if periodic_rate == 0.0 {
        return principal / periods as f64;
    }

    // (1 + r)^n − 1 without cancellation for tiny r
    let growth_minus_one = (periods as f64 * periodic_rate.ln_1p()).exp_m1();
    principal * periodic_rate * (growth_minus_one + 1.0) / growth_minus_one
}

/// Contractual monthly payment for a loan quoted with an annual percent rate and a term in years
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    annuity_payment(principal, annual_rate_percent / 12.0 / 100.0, term_years.saturating_mul(12))
}
