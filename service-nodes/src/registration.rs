//! Registration planning
//!
//! A registration splits one stake between the operator and up to three
//! reserved contributors. [`StakeReservation`] walks the same steps an
//! operator goes through when preparing a registration: set the fee, reserve
//! the operator's share, reserve contributor shares, then leave whatever is
//! left open to the public.

use crate::constants::{DUST, MAX_NUMBER_OF_CONTRIBUTORS, STAKING_PORTIONS};
use crate::contribution::{
    check_service_node_portions, get_min_node_contribution, get_min_node_contribution_in_portions,
};
use crate::portions::{
    get_amount_to_make_portions, get_portions_from_percent_str, get_portions_to_make_amount,
    portions_to_amount,
};
use crate::requirement::registration_staking_requirement;
use crate::{Error, Result};
use hardfork::{ChainConfig, NetworkState};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Finished registration split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationPlan {
    /// Requirement the split was computed against
    pub staking_requirement: u64,

    /// Operator fee in portions
    pub operator_fee: u64,

    /// Reserved portions, operator first
    pub portions: Vec<u64>,

    /// Atomic amount each reservation is worth. When the stake is not open
    /// the operator's entry also carries the rounding dust.
    pub amounts: Vec<u64>,

    /// Stake left open to anyone, zero once dust is folded into the operator
    pub amount_left: u64,

    /// True if more than dust is left open
    pub open: bool,
}

/// Registration being planned
#[derive(Debug, Clone)]
pub struct StakeReservation<'a> {
    config: &'a ChainConfig,
    state: NetworkState,
    staking_requirement: u64,
    operator_fee: u64,
    contributions: Vec<u64>,
    total_reserved: u64,
}

impl<'a> StakeReservation<'a> {
    /// Plan a registration submitted at `height`
    pub fn new(
        config: &'a ChainConfig,
        state: NetworkState,
        height: u64,
        operator_fee: &str,
    ) -> Result<Self> {
        let staking_requirement = registration_staking_requirement(config, state, height);
        Self::with_requirement(config, state, staking_requirement, operator_fee)
    }

    /// Plan a registration against an explicit requirement
    pub fn with_requirement(
        config: &'a ChainConfig,
        state: NetworkState,
        staking_requirement: u64,
        operator_fee: &str,
    ) -> Result<Self> {
        let operator_fee = get_portions_from_percent_str(operator_fee)
            .ok_or_else(|| Error::InvalidOperatorFee(operator_fee.to_string()))?;

        debug!(
            network = %state.network,
            version = %state.version,
            staking_requirement,
            operator_fee,
            "Planning service node registration"
        );

        Ok(Self {
            config,
            state,
            staking_requirement,
            operator_fee,
            contributions: Vec::with_capacity(MAX_NUMBER_OF_CONTRIBUTORS),
            total_reserved: 0,
        })
    }

    /// Requirement the stake must reach
    pub fn staking_requirement(&self) -> u64 {
        self.staking_requirement
    }

    /// Operator fee in portions
    pub fn operator_fee(&self) -> u64 {
        self.operator_fee
    }

    /// Reserved portions so far, operator first
    pub fn contributions(&self) -> &[u64] {
        &self.contributions
    }

    /// Portions not reserved yet
    pub fn portions_remaining(&self) -> u64 {
        let reserved: u64 = self.contributions.iter().sum();
        STAKING_PORTIONS - reserved
    }

    /// Atomic amount reserved so far
    pub fn total_reserved(&self) -> u64 {
        self.total_reserved
    }

    /// Atomic amount not reserved yet
    pub fn amount_left(&self) -> u64 {
        self.staking_requirement.saturating_sub(self.total_reserved)
    }

    /// Smallest amount the next reservation may be, `u64::MAX` when every
    /// slot is taken
    pub fn min_contribution(&self) -> u64 {
        match self.min_contribution_portions() {
            u64::MAX => u64::MAX,
            portions => get_amount_to_make_portions(self.staking_requirement, portions),
        }
    }

    /// Minimum for the next slot in portions.
    ///
    /// The amount-based minimum rounds the remaining stake down to whole
    /// atomic units, so it can fall below the minimum the finished list is
    /// checked against. The larger of the two applies.
    fn min_contribution_portions(&self) -> u64 {
        let num_contributions = self.contributions.len();
        let by_amount = get_min_node_contribution_in_portions(
            self.config,
            self.state,
            self.staking_requirement,
            self.total_reserved,
            num_contributions,
        );
        let by_portions = get_min_node_contribution(
            self.config,
            self.state,
            STAKING_PORTIONS,
            STAKING_PORTIONS - self.portions_remaining(),
            num_contributions,
        );
        by_amount.max(by_portions)
    }

    /// Reserve the operator's share. Returns the portions reserved.
    pub fn reserve_operator(&mut self, amount: u64) -> Result<u64> {
        if !self.contributions.is_empty() {
            return Err(Error::OperatorAlreadyReserved);
        }
        self.reserve(amount)
    }

    /// Reserve the next contributor's share. Returns the portions reserved.
    ///
    /// Amounts above what is left are clamped: the excess would be locked
    /// without earning anything.
    pub fn reserve_contributor(&mut self, amount: u64) -> Result<u64> {
        if self.contributions.is_empty() {
            return Err(Error::OperatorNotReserved);
        }
        self.reserve(amount)
    }

    fn reserve(&mut self, amount: u64) -> Result<u64> {
        if self.contributions.len() >= MAX_NUMBER_OF_CONTRIBUTORS {
            return Err(Error::ContributorSlotsExhausted {
                max: MAX_NUMBER_OF_CONTRIBUTORS,
            });
        }

        let min_portions = self.min_contribution_portions();
        let requested = get_portions_to_make_amount(self.staking_requirement, amount);
        if requested < min_portions {
            return Err(Error::ContributionTooSmall {
                amount,
                minimum: self.min_contribution(),
            });
        }

        let portions = requested.min(self.portions_remaining());
        let clamped = portions < requested;
        self.contributions.push(portions);
        self.total_reserved += portions_to_amount(portions, self.staking_requirement);

        debug!(
            slot = self.contributions.len(),
            amount,
            portions,
            clamped,
            amount_left = self.amount_left(),
            "Reserved stake"
        );

        Ok(portions)
    }

    /// Validate and produce the final split
    pub fn finish(self) -> Result<RegistrationPlan> {
        if self.contributions.is_empty() {
            return Err(Error::OperatorNotReserved);
        }
        if !check_service_node_portions(self.config, self.state, &self.contributions) {
            return Err(Error::InvalidPortions(format!(
                "reservation list {:?} rejected",
                self.contributions
            )));
        }

        let mut amount_left = self.amount_left();
        let open = amount_left > DUST;
        let mut amounts: Vec<u64> = self
            .contributions
            .iter()
            .map(|&portions| portions_to_amount(portions, self.staking_requirement))
            .collect();

        // Rounding dust goes to the operator
        if !open {
            if let Some(operator) = amounts.first_mut() {
                *operator += amount_left;
                amount_left = 0;
            }
        }

        Ok(RegistrationPlan {
            staking_requirement: self.staking_requirement,
            operator_fee: self.operator_fee,
            portions: self.contributions,
            amounts,
            amount_left,
            open,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::COIN;
    use hardfork::{NetworkType, NetworkVersion};

    const REQUIREMENT: u64 = 15_000 * COIN;

    fn mainnet() -> NetworkState {
        NetworkState::new(NetworkType::Mainnet, NetworkVersion::new(18, 0))
    }

    #[test]
    fn test_solo_operator() {
        let config = ChainConfig::default();
        let mut plan =
            StakeReservation::with_requirement(&config, mainnet(), REQUIREMENT, "100%").unwrap();
        assert_eq!(plan.operator_fee(), STAKING_PORTIONS);

        let portions = plan.reserve_operator(REQUIREMENT).unwrap();
        assert_eq!(portions, STAKING_PORTIONS);

        let plan = plan.finish().unwrap();
        assert_eq!(plan.amounts, vec![REQUIREMENT]);
        assert_eq!(plan.amount_left, 0);
        assert!(!plan.open);
    }

    #[test]
    fn test_pooled_node_leaves_stake_open() {
        let config = ChainConfig::default();
        let mut plan =
            StakeReservation::with_requirement(&config, mainnet(), REQUIREMENT, "10").unwrap();
        assert_eq!(plan.min_contribution(), REQUIREMENT / 4);

        plan.reserve_operator(REQUIREMENT / 4).unwrap();
        assert_eq!(plan.min_contribution(), REQUIREMENT / 4);
        plan.reserve_contributor(REQUIREMENT / 4).unwrap();
        assert_eq!(plan.amount_left(), REQUIREMENT / 2);

        let plan = plan.finish().unwrap();
        assert_eq!(plan.portions, vec![STAKING_PORTIONS / 4; 2]);
        assert_eq!(plan.amount_left, REQUIREMENT / 2);
        assert!(plan.open);
    }

    #[test]
    fn test_operator_minimum_enforced() {
        let config = ChainConfig::default();
        let mut plan =
            StakeReservation::with_requirement(&config, mainnet(), REQUIREMENT, "5%").unwrap();
        let result = plan.reserve_operator(REQUIREMENT / 4 - COIN);
        assert!(matches!(
            result,
            Err(Error::ContributionTooSmall { minimum, .. }) if minimum == REQUIREMENT / 4
        ));
        assert!(plan.contributions().is_empty());
    }

    #[test]
    fn test_excess_is_clamped() {
        let config = ChainConfig::default();
        let mut plan =
            StakeReservation::with_requirement(&config, mainnet(), REQUIREMENT, "0").unwrap();
        plan.reserve_operator(REQUIREMENT / 2).unwrap();
        let portions = plan.reserve_contributor(REQUIREMENT).unwrap();
        assert_eq!(portions, STAKING_PORTIONS - STAKING_PORTIONS / 2);
        assert_eq!(plan.portions_remaining(), 0);
        assert_eq!(plan.amount_left(), 0);
    }

    #[test]
    fn test_operator_above_requirement_takes_full_stake() {
        let config = ChainConfig::default();
        for amount in [REQUIREMENT * 5 / 4, REQUIREMENT * 8 / 5] {
            let mut plan =
                StakeReservation::with_requirement(&config, mainnet(), REQUIREMENT, "0").unwrap();
            assert_eq!(plan.reserve_operator(amount).unwrap(), STAKING_PORTIONS);
            assert_eq!(plan.portions_remaining(), 0);
            assert_eq!(plan.amount_left(), 0);
        }
    }

    #[test]
    fn test_contributor_above_requirement_is_clamped() {
        let config = ChainConfig::default();
        let mut plan =
            StakeReservation::with_requirement(&config, mainnet(), REQUIREMENT, "0").unwrap();
        plan.reserve_operator(REQUIREMENT / 4).unwrap();
        let portions = plan.reserve_contributor(REQUIREMENT * 2).unwrap();
        assert_eq!(portions, STAKING_PORTIONS - STAKING_PORTIONS / 4);
        assert_eq!(plan.amount_left(), 0);
    }

    #[test]
    fn test_dust_goes_to_operator() {
        let config = ChainConfig::default();
        let requirement = 10_000_000_000_007;
        let mut plan =
            StakeReservation::with_requirement(&config, mainnet(), requirement, "0").unwrap();
        plan.reserve_operator(requirement / 2).unwrap();
        plan.reserve_contributor(requirement).unwrap();
        assert_eq!(plan.amount_left(), 1);

        let plan = plan.finish().unwrap();
        assert!(!plan.open);
        assert_eq!(plan.amount_left, 0);
        assert_eq!(plan.amounts, vec![5_000_000_000_004, 5_000_000_000_003]);
        assert_eq!(plan.amounts.iter().sum::<u64>(), requirement);
    }

    #[test]
    fn test_reservation_order() {
        let config = ChainConfig::default();
        let mut plan =
            StakeReservation::with_requirement(&config, mainnet(), REQUIREMENT, "0").unwrap();
        assert!(matches!(plan.reserve_contributor(COIN), Err(Error::OperatorNotReserved)));
        plan.reserve_operator(REQUIREMENT / 4).unwrap();
        assert!(matches!(
            plan.reserve_operator(REQUIREMENT / 4),
            Err(Error::OperatorAlreadyReserved)
        ));
    }

    #[test]
    fn test_slots_exhausted() {
        let config = ChainConfig::default();
        let mut plan =
            StakeReservation::with_requirement(&config, mainnet(), REQUIREMENT, "0").unwrap();
        plan.reserve_operator(REQUIREMENT / 4).unwrap();
        for _ in 0..3 {
            plan.reserve_contributor(REQUIREMENT / 4).unwrap();
        }
        assert_eq!(plan.min_contribution(), u64::MAX);
        assert!(matches!(
            plan.reserve_contributor(COIN),
            Err(Error::ContributorSlotsExhausted { max: 4 })
        ));
    }

    #[test]
    fn test_invalid_fee() {
        let config = ChainConfig::default();
        let result = StakeReservation::with_requirement(&config, mainnet(), REQUIREMENT, "101%");
        assert!(matches!(result, Err(Error::InvalidOperatorFee(_))));
    }

    #[test]
    fn test_finish_without_operator() {
        let config = ChainConfig::default();
        let plan = StakeReservation::with_requirement(&config, mainnet(), REQUIREMENT, "0").unwrap();
        assert!(matches!(plan.finish(), Err(Error::OperatorNotReserved)));
    }

    #[test]
    fn test_new_uses_registration_requirement() {
        let config = ChainConfig::default();
        let plan = StakeReservation::new(&config, mainnet(), 900_000, "0").unwrap();
        assert_eq!(plan.staking_requirement(), REQUIREMENT);
    }
}
