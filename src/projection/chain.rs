//! Year-over-year adjustment chain: performance fee, then redemptions
//!
//! Both adjustments depend on the prior year's adjusted values, so the
//! projection carries a [`ChainState`] from one year to the next.

/// Values carried from one projection year into the next
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainState {
    /// NAV after performance fee
    pub fee_adj_nav: f64,

    /// NAV after performance fee and redemptions
    pub final_adj_nav: f64,
}

/// Outcome of the performance-fee step for one year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeOutcome {
    /// Prior adjusted NAV grown at the hurdle rate
    pub hurdle_value: f64,

    /// Fee deducted (zero unless gross NAV beats the hurdle)
    pub fee: f64,

    /// Gross NAV less the fee
    pub fee_adj_nav: f64,
}

/// Performance fee on the gain above `prior_adj * (1 + hurdle_rate)`
///
/// The hurdle is based on last year's fee-adjusted NAV; there is no separate
/// peak tracking. A gross NAV exactly at the hurdle pays no fee.
pub fn apply_performance_fee(gross_nav: f64, prior_adj: f64, fee_rate: f64, hurdle_rate: f64) -> FeeOutcome {
    let hurdle_value = prior_adj * (1.0 + hurdle_rate);
    let fee = if gross_nav > hurdle_value {
        (gross_nav - hurdle_value) * fee_rate
    } else {
        0.0
    };

    FeeOutcome {
        hurdle_value,
        fee,
        fee_adj_nav: gross_nav - fee,
    }
}

/// Redemption step: shrink the carried base, then add this year's fee-adjusted change
///
/// NOTE: the period change `fee_adj_nav - prior_adj` passes through unreduced
/// while only the carried base is redeemed. This is an approximation kept for
/// parity with the reference dashboard, not a cash-flow accurate model.
pub fn apply_redemption(prior_final: f64, prior_adj: f64, fee_adj_nav: f64, redemption_rate: f64) -> f64 {
    prior_final * (1.0 - redemption_rate) + (fee_adj_nav - prior_adj)
}

impl ChainState {
    /// Anchor year: no fee and no redemption
    pub fn anchor(gross_nav: f64) -> Self {
        Self {
            fee_adj_nav: gross_nav,
            final_adj_nav: gross_nav,
        }
    }

    /// Roll the chain forward by one year, returning the new state and the fee taken
    pub fn advance(&self, gross_nav: f64, fee_rate: f64, hurdle_rate: f64, redemption_rate: f64) -> (Self, f64) {
        let fee = apply_performance_fee(gross_nav, self.fee_adj_nav, fee_rate, hurdle_rate);
        let final_adj_nav = apply_redemption(
            self.final_adj_nav,
            self.fee_adj_nav,
            fee.fee_adj_nav,
            redemption_rate,
        );

        let next = Self {
            fee_adj_nav: fee.fee_adj_nav,
            final_adj_nav,
        };
        (next, fee.fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fee_above_hurdle() {
        let out = apply_performance_fee(1_000_000.0, 900_000.0, 0.10, 0.06);
        assert_relative_eq!(out.hurdle_value, 954_000.0, max_relative = 1e-12);
        assert_relative_eq!(out.fee, 4_600.0, max_relative = 1e-9);
        assert_relative_eq!(out.fee_adj_nav, 995_400.0, max_relative = 1e-12);
    }

    #[test]
    fn test_fee_at_hurdle_is_zero() {
        // 1000 * 1.5 is exact in binary, so gross sits exactly on the hurdle
        let out = apply_performance_fee(1500.0, 1000.0, 0.20, 0.5);
        assert_eq!(out.hurdle_value, 1500.0);
        assert_eq!(out.fee, 0.0);
        assert_eq!(out.fee_adj_nav, 1500.0);
    }

    #[test]
    fn test_fee_below_hurdle_and_losses() {
        let out = apply_performance_fee(1_040_000.0, 1_000_000.0, 0.10, 0.06);
        assert_eq!(out.fee, 0.0);

        let out = apply_performance_fee(800_000.0, 1_000_000.0, 0.10, 0.0);
        assert_eq!(out.fee, 0.0);
        assert_eq!(out.fee_adj_nav, 800_000.0);
    }

    #[test]
    fn test_redemption_recurrence() {
        let adj = [1000.0, 1100.0, 1050.0];
        let f1 = apply_redemption(1000.0, adj[0], adj[1], 0.05);
        assert_relative_eq!(f1, 1050.0, max_relative = 1e-12);
        let f2 = apply_redemption(f1, adj[1], adj[2], 0.05);
        assert_relative_eq!(f2, 947.5, max_relative = 1e-12);
    }

    #[test]
    fn test_advance_combines_both_steps() {
        let state = ChainState::anchor(900_000.0);
        assert_eq!(state.fee_adj_nav, state.final_adj_nav);

        let (next, fee) = state.advance(1_000_000.0, 0.10, 0.06, 0.05);
        assert_relative_eq!(fee, 4_600.0, max_relative = 1e-9);
        assert_relative_eq!(next.fee_adj_nav, 995_400.0, max_relative = 1e-12);
        // 900k * 0.95 + (995.4k - 900k)
        assert_relative_eq!(next.final_adj_nav, 950_400.0, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_redemption_tracks_fee_chain() {
        let mut state = ChainState::anchor(100.0);
        for gross in [120.0, 90.0, 150.0] {
            state = state.advance(gross, 0.2, 0.05, 0.0).0;
            assert_relative_eq!(state.final_adj_nav, state.fee_adj_nav, max_relative = 1e-12);
        }
    }
}
