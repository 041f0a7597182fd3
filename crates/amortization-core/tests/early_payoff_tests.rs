use amortization_core::analysis::{self, EarlyPayoffInput};
use amortization_core::early_payoff::{self, PayoffOptions, PayoffOutcome, PayoffSimulation};
use amortization_core::{summary, AmortizationError, LoanTerms};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn car_loan() -> LoanTerms {
    LoanTerms::new(dec!(50_000), dec!(5), 60).unwrap()
}

#[test]
fn test_extra_200_known_answer() {
    // 943.56 + 200 per month clears 50k at 5% in 49 months
    let r = early_payoff::calculate_early_payoff(&car_loan(), dec!(200), start()).unwrap();
    assert_eq!(r.months_to_payoff, 49);
    assert_eq!(r.months_saved, 11);
    assert!(
        (r.interest_saved - dec!(1302.02)).abs() <= dec!(0.01),
        "Expected ~1302.02 saved, got {}",
        r.interest_saved
    );
    assert!((r.new_total_cost - dec!(55311.68)).abs() <= dec!(0.01));
    assert_eq!(r.payoff_date, NaiveDate::from_ymd_opt(2028, 2, 1).unwrap());
    assert_eq!(r.outcome, PayoffOutcome::PaidOff);
}

#[test]
fn test_savings_consistent_with_summary() {
    let terms = car_loan();
    let s = summary::calculate_loan_summary(&terms).unwrap();
    let r = early_payoff::calculate_early_payoff(&terms, dec!(500), start()).unwrap();
    // new cost + saved interest = standard total payment
    assert!((r.new_total_cost + r.interest_saved - s.total_payment).abs() <= dec!(0.02));
}

#[test]
fn test_larger_extra_pays_off_faster() {
    let terms = LoanTerms::new(dec!(250_000), dec!(6.5), 360).unwrap();
    let mut last_months = u32::MAX;
    let mut last_saved = Decimal::MIN;
    for extra in [dec!(0), dec!(100), dec!(500), dec!(2_000)] {
        let r = early_payoff::calculate_early_payoff(&terms, extra, start()).unwrap();
        assert!(r.months_to_payoff <= last_months);
        assert!(r.interest_saved >= last_saved);
        last_months = r.months_to_payoff;
        last_saved = r.interest_saved;
    }
    assert!(last_months < 120);
}

#[test]
fn test_default_cap_is_600() {
    assert_eq!(PayoffOptions::default().max_iterations, 600);
    assert_eq!(early_payoff::DEFAULT_MAX_ITERATIONS, 600);
}

#[test]
fn test_cap_bounds_the_iterator() {
    let terms = LoanTerms::new(dec!(1_000_000), dec!(4), 360).unwrap();
    let opts = PayoffOptions { max_iterations: 24 };
    let mut sim = PayoffSimulation::new(&terms, dec!(10), &opts).unwrap();
    assert_eq!(sim.by_ref().count(), 24);
    assert!(!sim.is_paid_off());
    assert_eq!(sim.outcome(), PayoffOutcome::IterationCapReached);
    assert_eq!(sim.next(), None);
}

#[test]
fn test_balance_never_negative() {
    let terms = LoanTerms::new(dec!(10_000), dec!(12), 24).unwrap();
    let periods: Vec<_> = PayoffSimulation::new(&terms, dec!(3_333), &PayoffOptions::default())
        .unwrap()
        .collect();
    assert!(periods.iter().all(|p| p.balance >= Decimal::ZERO));
    assert_eq!(periods.last().unwrap().balance, Decimal::ZERO);
}

#[test]
fn test_negative_extra_is_invalid_input() {
    let err = early_payoff::calculate_early_payoff(&car_loan(), dec!(-1), start()).unwrap_err();
    assert!(matches!(err, AmortizationError::InvalidInput { .. }));
}

#[test]
fn test_envelope_reports_cap() {
    let input = EarlyPayoffInput {
        terms: car_loan(),
        start_date: start(),
        extra_monthly_payment: dec!(50),
        max_iterations: Some(10),
    };
    let out = analysis::project_early_payoff(&input).unwrap();
    assert_eq!(out.result.months_to_payoff, 10);
    assert_eq!(out.result.outcome, PayoffOutcome::IterationCapReached);
    assert!(out.warnings.iter().any(|w| w.contains("10-period cap")));
    assert_eq!(out.methodology, "Early Payoff Simulation");
}
