//! Core staking engine.

use crate::error::StakingError;
use crate::record::StakeRecord;
use crate::traits::{RewardMinter, TokenOwnership};
use breakfast_types::{Address, CoinAmount, StakingParams, Timestamp, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The staking engine: one `StakeRecord` per token id, period math, and
/// reward minting through the injected collaborators.
///
/// The engine mints under its own `address`; the host registers that
/// address with the coin ledger's minter set at wiring time, the same way
/// the original deployment added the staking contract as a minter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakingEngine {
    params: StakingParams,
    address: Address,
    records: HashMap<TokenId, StakeRecord>,
}

impl StakingEngine {
    pub fn new(params: StakingParams, address: Address) -> Self {
        Self {
            params,
            address,
            records: HashMap::new(),
        }
    }

    /// The principal address this engine mints under.
    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn params(&self) -> &StakingParams {
        &self.params
    }

    /// Stake a token. The caller must be its current owner.
    ///
    /// Staking always opens a fresh record: a re-stake by the owner resets
    /// both `staked_at` and `last_withdrawal_at` to `now`.
    pub fn stake<T: TokenOwnership>(
        &mut self,
        caller: &Address,
        token_id: TokenId,
        tokens: &T,
        now: Timestamp,
    ) -> Result<(), StakingError> {
        let owner = tokens.owner_of(token_id)?;
        if owner != caller {
            return Err(StakingError::NotOwner);
        }
        self.records
            .insert(token_id, StakeRecord::opened(caller.clone(), now));
        Ok(())
    }

    /// Unstake a token. The caller must equal the recorded `staked_by`.
    ///
    /// No reward settlement happens here: any accrued-but-unwithdrawn
    /// periods are forfeited. Withdraw first to keep them.
    pub fn unstake(&mut self, caller: &Address, token_id: TokenId) -> Result<(), StakingError> {
        match self.records.get_mut(&token_id) {
            Some(record) if record.staked_by == *caller => {
                record.is_staked = false;
                Ok(())
            }
            _ => Err(StakingError::WrongStaker),
        }
    }

    /// Whether a token is currently staked. Fails for never-minted ids.
    pub fn token_is_staked<T: TokenOwnership>(
        &self,
        token_id: TokenId,
        tokens: &T,
    ) -> Result<bool, StakingError> {
        tokens.owner_of(token_id)?;
        Ok(self
            .records
            .get(&token_id)
            .map(|r| r.is_staked)
            .unwrap_or(false))
    }

    /// Withdraw accrued breakfast coins for a staked token.
    ///
    /// Mints `periods * unit_reward` to the staker, where `periods` is the
    /// floor of elapsed seconds since the last withdrawal over the reward
    /// period. `last_withdrawal_at` advances by exactly
    /// `periods * reward_period`, never to `now`: fractional leftover time
    /// keeps counting toward the next period. Returns the minted amount.
    pub fn withdraw_breakfast_coins<M: RewardMinter>(
        &mut self,
        token_id: TokenId,
        coins: &mut M,
        now: Timestamp,
    ) -> Result<CoinAmount, StakingError> {
        let record = match self.records.get_mut(&token_id) {
            Some(record) if record.is_staked => record,
            _ => return Err(StakingError::NotStaked),
        };

        let elapsed = record.last_withdrawal_at.elapsed_since(now);
        let periods = elapsed / self.params.reward_period_secs;
        if periods == 0 {
            return Err(StakingError::CooldownNotElapsed);
        }

        let reward = self
            .params
            .unit_reward
            .checked_mul(periods)
            .ok_or(StakingError::Overflow)?;
        let advance = periods
            .checked_mul(self.params.reward_period_secs)
            .ok_or(StakingError::Overflow)?;

        // Mint first; the timestamp only advances once the mint succeeded,
        // so a rejected mint leaves the record untouched.
        coins.mint_to_address(&self.address, reward, &record.staked_by)?;
        record.last_withdrawal_at = record.last_withdrawal_at.advanced_by(advance);
        Ok(reward)
    }

    /// The stake record for a token, if one was ever opened.
    pub fn record(&self, token_id: TokenId) -> Option<&StakeRecord> {
        self.records.get(&token_id)
    }

    /// Iterate all stake records.
    pub fn records(&self) -> impl Iterator<Item = (TokenId, &StakeRecord)> {
        self.records.iter().map(|(id, r)| (*id, r))
    }

    /// Number of tokens currently staked.
    pub fn staked_count(&self) -> usize {
        self.records.values().filter(|r| r.is_staked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakfast_coin::CoinLedger;
    use breakfast_tokens::TokenRegistry;
    use breakfast_types::COIN_UNIT;

    const DAY: u64 = 86_400;

    fn addr(s: &str) -> Address {
        Address::new(s)
    }

    /// Registry with one token owned by `alice`, ledger that lets the
    /// engine mint, engine wired under its own principal.
    fn fixture() -> (StakingEngine, TokenRegistry, CoinLedger) {
        let mut tokens = TokenRegistry::new();
        tokens.mint(addr("alice")).unwrap();
        let mut coins = CoinLedger::new(addr("deployer"));
        let engine = StakingEngine::new(StakingParams::default(), addr("staking-engine"));
        coins.add_minting_address(engine.address().clone());
        (engine, tokens, coins)
    }

    #[test]
    fn stake_by_owner_succeeds() {
        let (mut engine, tokens, _) = fixture();
        engine
            .stake(&addr("alice"), 0, &tokens, Timestamp::new(100))
            .unwrap();
        assert!(engine.token_is_staked(0, &tokens).unwrap());
        let record = engine.record(0).unwrap();
        assert_eq!(record.staked_at, Timestamp::new(100));
        assert_eq!(record.last_withdrawal_at, Timestamp::new(100));
    }

    #[test]
    fn stake_by_non_owner_fails() {
        let (mut engine, tokens, _) = fixture();
        let err = engine
            .stake(&addr("bob"), 0, &tokens, Timestamp::new(100))
            .unwrap_err();
        assert_eq!(err, StakingError::NotOwner);
        assert!(!engine.token_is_staked(0, &tokens).unwrap());
    }

    #[test]
    fn stake_of_unknown_token_fails_not_found() {
        let (mut engine, tokens, _) = fixture();
        let err = engine
            .stake(&addr("alice"), 42, &tokens, Timestamp::new(100))
            .unwrap_err();
        assert_eq!(err.to_string(), "Token does not exist");
    }

    #[test]
    fn restake_resets_both_clocks() {
        let (mut engine, tokens, _) = fixture();
        engine
            .stake(&addr("alice"), 0, &tokens, Timestamp::new(100))
            .unwrap();
        engine
            .stake(&addr("alice"), 0, &tokens, Timestamp::new(500))
            .unwrap();
        let record = engine.record(0).unwrap();
        assert_eq!(record.staked_at, Timestamp::new(500));
        assert_eq!(record.last_withdrawal_at, Timestamp::new(500));
    }

    #[test]
    fn unstake_by_wrong_address_fails() {
        let (mut engine, tokens, _) = fixture();
        engine
            .stake(&addr("alice"), 0, &tokens, Timestamp::new(100))
            .unwrap();
        let err = engine.unstake(&addr("bob"), 0).unwrap_err();
        assert_eq!(err, StakingError::WrongStaker);
        assert!(engine.token_is_staked(0, &tokens).unwrap());
    }

    #[test]
    fn unstake_of_never_staked_token_fails() {
        let (mut engine, _, _) = fixture();
        assert_eq!(
            engine.unstake(&addr("alice"), 0),
            Err(StakingError::WrongStaker)
        );
    }

    #[test]
    fn token_is_staked_unknown_token_fails_not_found() {
        let (engine, tokens, _) = fixture();
        let err = engine.token_is_staked(42, &tokens).unwrap_err();
        assert_eq!(err.to_string(), "Token does not exist");
    }

    #[test]
    fn withdraw_unstaked_token_fails() {
        let (mut engine, _, mut coins) = fixture();
        let err = engine
            .withdraw_breakfast_coins(0, &mut coins, Timestamp::new(100))
            .unwrap_err();
        assert_eq!(err, StakingError::NotStaked);
    }

    #[test]
    fn withdraw_before_one_period_fails() {
        let (mut engine, tokens, mut coins) = fixture();
        engine
            .stake(&addr("alice"), 0, &tokens, Timestamp::new(0))
            .unwrap();
        let err = engine
            .withdraw_breakfast_coins(0, &mut coins, Timestamp::new(23 * 3600))
            .unwrap_err();
        assert_eq!(err, StakingError::CooldownNotElapsed);
        assert_eq!(coins.balance_of(&addr("alice")), CoinAmount::ZERO);
    }

    #[test]
    fn withdraw_after_one_period_mints_ten_coins() {
        let (mut engine, tokens, mut coins) = fixture();
        engine
            .stake(&addr("alice"), 0, &tokens, Timestamp::new(0))
            .unwrap();
        let minted = engine
            .withdraw_breakfast_coins(0, &mut coins, Timestamp::new(DAY + 1))
            .unwrap();
        assert_eq!(minted.raw(), 10 * COIN_UNIT);
        assert_eq!(coins.balance_of(&addr("alice")).raw(), 10 * COIN_UNIT);
    }

    #[test]
    fn withdraw_two_periods_in_one_call() {
        let (mut engine, tokens, mut coins) = fixture();
        engine
            .stake(&addr("alice"), 0, &tokens, Timestamp::new(0))
            .unwrap();
        let minted = engine
            .withdraw_breakfast_coins(0, &mut coins, Timestamp::new(2 * DAY + 1))
            .unwrap();
        assert_eq!(minted.raw(), 20 * COIN_UNIT);
    }

    #[test]
    fn withdrawal_advances_by_whole_periods_only() {
        let (mut engine, tokens, mut coins) = fixture();
        engine
            .stake(&addr("alice"), 0, &tokens, Timestamp::new(0))
            .unwrap();
        // 1 period + 1000 leftover seconds.
        engine
            .withdraw_breakfast_coins(0, &mut coins, Timestamp::new(DAY + 1000))
            .unwrap();
        let record = engine.record(0).unwrap();
        assert_eq!(record.last_withdrawal_at, Timestamp::new(DAY));

        // The leftover carries: one more period completes 1000 seconds
        // before the naive reset-to-now schedule would allow.
        engine
            .withdraw_breakfast_coins(0, &mut coins, Timestamp::new(2 * DAY))
            .unwrap();
        assert_eq!(coins.balance_of(&addr("alice")).raw(), 20 * COIN_UNIT);
    }

    #[test]
    fn failed_mint_leaves_record_untouched() {
        let (mut engine, tokens, _) = fixture();
        // A ledger that never authorized the engine.
        let mut coins = CoinLedger::new(addr("deployer"));
        engine
            .stake(&addr("alice"), 0, &tokens, Timestamp::new(0))
            .unwrap();
        let err = engine
            .withdraw_breakfast_coins(0, &mut coins, Timestamp::new(DAY + 1))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Feature only available to minting addresses"
        );
        let record = engine.record(0).unwrap();
        assert_eq!(record.last_withdrawal_at, Timestamp::EPOCH);
    }

    #[test]
    fn unstake_forfeits_unwithdrawn_periods() {
        let (mut engine, tokens, mut coins) = fixture();
        engine
            .stake(&addr("alice"), 0, &tokens, Timestamp::new(0))
            .unwrap();
        // Three full periods accrue, then the token is unstaked without a
        // withdrawal: the periods are gone.
        engine.unstake(&addr("alice"), 0).unwrap();
        let err = engine
            .withdraw_breakfast_coins(0, &mut coins, Timestamp::new(3 * DAY + 1))
            .unwrap_err();
        assert_eq!(err, StakingError::NotStaked);
        assert_eq!(coins.balance_of(&addr("alice")), CoinAmount::ZERO);
    }
}
