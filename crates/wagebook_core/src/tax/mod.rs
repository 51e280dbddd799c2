//! Tax assessment policies.
//!
//! # Responsibility
//! - Define the strategy seam mapping a salary amount to a tax amount.
//! - Provide the default progressive withholding policy.
//!
//! # Invariants
//! - Policies are pure and deterministic: equal inputs yield equal outputs.
//! - Policies are total: no salary value may panic or error.
//! - Policies compute at full precision; rounding to cents happens only at
//!   the persistence/display boundary via [`round_to_cents`].

/// Strategy contract for deriving a tax amount from a salary amount.
///
/// The bracket formula is a business rule independent of storage, so the
/// repository takes the policy as a type parameter instead of inlining
/// arithmetic.
pub trait TaxPolicy {
    /// Assesses the tax owed on one salary amount.
    fn assess(&self, salary: f64) -> f64;
}

/// One progressive bracket: taxable amounts above `floor` up to the next
/// bracket's floor are taxed at `rate`, with `quick_deduction` subtracted
/// so the full-amount formula matches per-slice accumulation.
#[derive(Debug, Clone, Copy)]
struct Bracket {
    floor: f64,
    rate: f64,
    quick_deduction: f64,
}

/// Monthly taxable income starts above this exemption threshold.
const EXEMPTION_THRESHOLD: f64 = 5000.0;

/// Bracket table ordered by ascending floor; lookup walks from the top.
const BRACKETS: &[Bracket] = &[
    Bracket {
        floor: 0.0,
        rate: 0.03,
        quick_deduction: 0.0,
    },
    Bracket {
        floor: 3000.0,
        rate: 0.10,
        quick_deduction: 210.0,
    },
    Bracket {
        floor: 12000.0,
        rate: 0.20,
        quick_deduction: 1410.0,
    },
    Bracket {
        floor: 25000.0,
        rate: 0.25,
        quick_deduction: 2660.0,
    },
    Bracket {
        floor: 35000.0,
        rate: 0.30,
        quick_deduction: 4410.0,
    },
    Bracket {
        floor: 55000.0,
        rate: 0.35,
        quick_deduction: 7160.0,
    },
    Bracket {
        floor: 80000.0,
        rate: 0.45,
        quick_deduction: 15160.0,
    },
];

/// Default policy: monthly progressive withholding with quick deductions.
///
/// Salaries at or below the exemption threshold owe nothing. Above it, the
/// taxable remainder is taxed at the rate of its bracket minus that
/// bracket's quick deduction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressiveTaxPolicy;

impl TaxPolicy for ProgressiveTaxPolicy {
    fn assess(&self, salary: f64) -> f64 {
        // max() also maps NaN to 0.0, keeping the policy total.
        let taxable = (salary - EXEMPTION_THRESHOLD).max(0.0);
        if taxable == 0.0 {
            return 0.0;
        }

        let bracket = BRACKETS
            .iter()
            .rev()
            .find(|bracket| taxable > bracket.floor)
            .unwrap_or(&BRACKETS[0]);

        taxable * bracket.rate - bracket.quick_deduction
    }
}

/// Single-rate policy.
///
/// Exists to prove the strategy seam and as a simple alternative for
/// deployments without progressive brackets.
#[derive(Debug, Clone, Copy)]
pub struct FlatTaxPolicy {
    pub rate: f64,
}

impl TaxPolicy for FlatTaxPolicy {
    fn assess(&self, salary: f64) -> f64 {
        salary.max(0.0) * self.rate
    }
}

/// Rounds a monetary amount to two decimal places.
///
/// Applied exactly once, where a derived value is persisted or displayed.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
