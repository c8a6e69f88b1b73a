//! Loan (EMI) calculations for the finance widgets.
//!
//! EMI = P × r × (1 + r)^n / [(1 + r)^n - 1]
//!
//! Where:
//! - P = Principal loan amount
//! - r = Monthly interest rate (annual_rate / 12 / 100)
//! - n = Number of months (tenure)

use serde::{Deserialize, Serialize};

use crate::models::{LoanParameters, LoanResult};

/// Computes the monthly installment, total interest and total payable.
///
/// Non-positive (or non-finite) principal, rate or term yields an all-zero
/// result instead of dividing by zero. Each output is rounded to whole rupees
/// on its own, so `monthly_installment * term` can differ from
/// `total_payable` by a few rupees; callers already display these values.
pub fn compute_emi(principal: f64, annual_rate_percent: f64, term_months: i64) -> LoanResult {
    let monthly_rate = annual_rate_percent / (12.0 * 100.0);

    if !principal.is_finite() || !monthly_rate.is_finite() {
        return LoanResult::default();
    }
    if principal <= 0.0 || monthly_rate <= 0.0 || term_months <= 0 {
        return LoanResult::default();
    }

    let n = term_months as f64;
    let one_plus_r_n = (1.0 + monthly_rate).powf(n);
    let emi = principal * monthly_rate * one_plus_r_n / (one_plus_r_n - 1.0);
    let total_payable = emi * n;
    let total_interest = total_payable - principal;

    LoanResult {
        monthly_installment: emi.round() as i64,
        total_interest: total_interest.round() as i64,
        total_payable: total_payable.round() as i64,
    }
}

impl LoanParameters {
    pub fn compute(&self) -> LoanResult {
        compute_emi(self.principal, self.annual_rate_percent, self.term_months)
    }
}

/// Allowed down payment as fractions of the car price.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DownPaymentBand {
    pub min_fraction: f64,
    pub max_fraction: f64,
}

impl Default for DownPaymentBand {
    fn default() -> Self {
        Self {
            min_fraction: 0.10,
            max_fraction: 0.50,
        }
    }
}

impl DownPaymentBand {
    pub fn clamp(&self, car_price: f64, down_payment: f64) -> f64 {
        let low = car_price * self.min_fraction;
        let high = car_price * self.max_fraction;
        if !down_payment.is_finite() {
            return low;
        }
        down_payment.max(low).min(high)
    }

    // Down payment the widget starts from before the user drags the slider
    pub fn initial(&self, car_price: f64) -> f64 {
        car_price * self.min_fraction
    }
}

/// Finance quote for a specific car after the down payment.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanQuote {
    pub car_price: f64,
    pub down_payment: f64,
    pub principal: f64,
    pub loan: LoanResult,
}

pub fn quote_with_down_payment(
    car_price: f64,
    down_payment: f64,
    annual_rate_percent: f64,
    term_months: i64,
    band: &DownPaymentBand,
) -> LoanQuote {
    let down_payment = band.clamp(car_price, down_payment);
    let principal = car_price - down_payment;
    LoanQuote {
        car_price,
        down_payment,
        principal,
        loan: compute_emi(principal, annual_rate_percent, term_months),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Independent evaluation of the closed form, rounded to the rupee
    fn reference_emi(p: f64, annual: f64, n: i32) -> f64 {
        let r = annual / 1200.0;
        let growth = (1.0 + r).powi(n);
        (p * r * growth / (growth - 1.0)).round()
    }

    #[test]
    fn test_compute_emi_ten_lakh() {
        let result = compute_emi(1_000_000.0, 8.5, 60);
        let expected = reference_emi(1_000_000.0, 8.5, 60);
        assert!((result.monthly_installment as f64 - expected).abs() <= 1.0);
        assert_eq!(result.monthly_installment, 20_517);
        assert_eq!(result.total_payable, 1_230_992);
        assert_eq!(result.total_interest, 230_992);
    }

    #[test]
    fn test_compute_emi_one_lakh_one_year() {
        // 1 lakh at 12% for 12 months, EMI around 8884.87
        let result = compute_emi(100_000.0, 12.0, 12);
        assert_eq!(result.monthly_installment, 8_885);
    }

    #[test]
    fn test_rounding_is_independent() {
        let result = compute_emi(1_000_000.0, 8.5, 60);
        // Rounded EMI times term overshoots the separately rounded total
        assert_ne!(result.monthly_installment * 60, result.total_payable);
        assert_eq!(result.total_payable - 1_000_000, result.total_interest);
    }

    #[test]
    fn test_invalid_parameters_give_zero() {
        assert_eq!(compute_emi(0.0, 8.5, 60), LoanResult::default());
        assert_eq!(compute_emi(-5.0, 8.5, 60), LoanResult::default());
        assert_eq!(compute_emi(500_000.0, 0.0, 60), LoanResult::default());
        assert_eq!(compute_emi(500_000.0, 8.5, 0), LoanResult::default());
        assert_eq!(compute_emi(f64::NAN, 8.5, 60), LoanResult::default());
        assert_eq!(compute_emi(500_000.0, f64::INFINITY, 60), LoanResult::default());
    }

    #[test]
    fn test_parameters_delegate() {
        let params = LoanParameters {
            principal: 100_000.0,
            annual_rate_percent: 12.0,
            term_months: 12,
        };
        assert_eq!(params.compute(), compute_emi(100_000.0, 12.0, 12));
    }

    #[test]
    fn test_down_payment_is_clamped_to_band() {
        let band = DownPaymentBand::default();
        assert_eq!(band.clamp(1_000_000.0, 50_000.0), 100_000.0);
        assert_eq!(band.clamp(1_000_000.0, 900_000.0), 500_000.0);
        assert_eq!(band.clamp(1_000_000.0, 250_000.0), 250_000.0);
        assert_eq!(band.initial(1_000_000.0), 100_000.0);
    }

    #[test]
    fn test_quote_uses_price_minus_down_payment() {
        let band = DownPaymentBand::default();
        let quote = quote_with_down_payment(800_000.0, 160_000.0, 9.5, 60, &band);
        assert_eq!(quote.principal, 640_000.0);
        assert_eq!(quote.loan, compute_emi(640_000.0, 9.5, 60));
        assert_eq!(quote.loan.monthly_installment, 13_441);

        let clamped = quote_with_down_payment(800_000.0, 0.0, 9.5, 60, &band);
        assert_eq!(clamped.down_payment, 80_000.0);
        assert_eq!(clamped.principal, 720_000.0);
    }
}
