//! The node: wiring and transaction ordering.

use breakfast_coin::CoinLedger;
use breakfast_staking::StakingEngine;
use breakfast_tokens::TokenRegistry;
use breakfast_types::{Address, CoinAmount, Timestamp, TokenId};
use breakfast_utils::format_duration;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::NodeConfig;
use crate::error::NodeError;
use crate::operations::{AppliedOperation, Operation, Receipt};
use crate::snapshot::StateSnapshot;

/// Principal address the staking engine mints under.
const ENGINE_ADDRESS: &str = "breakfast-staking-engine";

/// The host: owns all component state and imposes the global order.
///
/// Every mutating method is an indivisible transaction: the clock is read
/// once at admission, components validate all preconditions before writing,
/// and only successful operations reach the applied log. `&mut self` on
/// every mutating entry point is the serialization mechanism; there is no
/// intra-operation concurrency.
pub struct Node {
    tokens: TokenRegistry,
    coins: CoinLedger,
    staking: StakingEngine,
    clock: Box<dyn Clock>,
    log: Vec<AppliedOperation>,
    sequence: u64,
}

impl Node {
    /// Wire up a node from a config and a clock.
    ///
    /// Mirrors the original deployment script: the deployer is the initial
    /// authorized minter, the registry carries the supply cap, and the
    /// staking engine's address is registered as a minter.
    pub fn new(config: &NodeConfig, clock: Box<dyn Clock>) -> Self {
        let deployer = Address::new(config.deployer.clone());
        let tokens = TokenRegistry::capped(config.params.max_token_supply);
        let mut coins = CoinLedger::new(deployer);
        let staking =
            StakingEngine::new(config.params.clone(), Address::new(ENGINE_ADDRESS));
        coins.add_minting_address(staking.address().clone());
        Self {
            tokens,
            coins,
            staking,
            clock,
            log: Vec::new(),
            sequence: 0,
        }
    }

    /// Read the clock once and reserve the next sequence number.
    fn admit(&mut self) -> (u64, Timestamp) {
        self.sequence += 1;
        (self.sequence, self.clock.now())
    }

    fn commit(&mut self, sequence: u64, timestamp: Timestamp, operation: Operation) {
        self.log.push(AppliedOperation {
            sequence,
            timestamp,
            operation,
        });
    }

    /// A failed operation gives its sequence number back, so the log stays
    /// gapless.
    fn rollback(&mut self, sequence: u64) {
        debug_assert_eq!(sequence, self.sequence);
        self.sequence -= 1;
    }

    // ── Mutating operations ────────────────────────────────────────────

    /// Stake a token owned by `caller`.
    pub fn stake(&mut self, caller: &Address, token_id: TokenId) -> Result<(), NodeError> {
        let (seq, now) = self.admit();
        match self.staking.stake(caller, token_id, &self.tokens, now) {
            Ok(()) => {
                info!(seq, %caller, token_id, "token staked");
                self.commit(
                    seq,
                    now,
                    Operation::Stake {
                        caller: caller.clone(),
                        token_id,
                    },
                );
                Ok(())
            }
            Err(e) => {
                self.rollback(seq);
                Err(e.into())
            }
        }
    }

    /// Unstake a token staked by `caller`. Unclaimed periods are forfeited.
    pub fn unstake(&mut self, caller: &Address, token_id: TokenId) -> Result<(), NodeError> {
        let (seq, now) = self.admit();
        let staked_at = self.staking.record(token_id).map(|r| r.staked_at);
        match self.staking.unstake(caller, token_id) {
            Ok(()) => {
                if let Some(staked_at) = staked_at {
                    debug!(
                        token_id,
                        staked_for = %format_duration(staked_at.elapsed_since(now)),
                        "token unstaked"
                    );
                }
                self.commit(
                    seq,
                    now,
                    Operation::Unstake {
                        caller: caller.clone(),
                        token_id,
                    },
                );
                Ok(())
            }
            Err(e) => {
                self.rollback(seq);
                Err(e.into())
            }
        }
    }

    /// Withdraw accrued rewards for a staked token; coins go to the staker.
    pub fn withdraw_breakfast_coins(&mut self, token_id: TokenId) -> Result<CoinAmount, NodeError> {
        let (seq, now) = self.admit();
        match self
            .staking
            .withdraw_breakfast_coins(token_id, &mut self.coins, now)
        {
            Ok(minted) => {
                info!(seq, token_id, minted = %minted, "rewards withdrawn");
                self.commit(seq, now, Operation::WithdrawBreakfastCoins { token_id });
                Ok(minted)
            }
            Err(e) => {
                self.rollback(seq);
                Err(e.into())
            }
        }
    }

    /// Mint the next token to `caller`.
    pub fn mint_token(&mut self, caller: &Address) -> Result<TokenId, NodeError> {
        let (seq, now) = self.admit();
        match self.tokens.mint(caller.clone()) {
            Ok(token_id) => {
                info!(seq, %caller, token_id, "token minted");
                self.commit(
                    seq,
                    now,
                    Operation::MintToken {
                        caller: caller.clone(),
                    },
                );
                Ok(token_id)
            }
            Err(e) => {
                self.rollback(seq);
                Err(e.into())
            }
        }
    }

    /// Add an address to the authorized-minter set. Unrestricted, matching
    /// the observed surface; always succeeds.
    pub fn add_minting_address(&mut self, address: &Address) -> Result<(), NodeError> {
        let (seq, now) = self.admit();
        self.coins.add_minting_address(address.clone());
        info!(seq, %address, "minting address added");
        self.commit(
            seq,
            now,
            Operation::AddMintingAddress {
                address: address.clone(),
            },
        );
        Ok(())
    }

    /// Mint coins directly; `caller` must be an authorized minter.
    pub fn mint_to_address(
        &mut self,
        caller: &Address,
        amount: CoinAmount,
        to: &Address,
    ) -> Result<(), NodeError> {
        let (seq, now) = self.admit();
        match self.coins.mint_to_address(caller, amount, to) {
            Ok(()) => {
                info!(seq, %caller, %to, amount = %amount, "coins minted");
                self.commit(
                    seq,
                    now,
                    Operation::MintToAddress {
                        caller: caller.clone(),
                        amount,
                        to: to.clone(),
                    },
                );
                Ok(())
            }
            Err(e) => {
                self.rollback(seq);
                Err(e.into())
            }
        }
    }

    /// Apply an operation from the exogenous order (e.g. log replay).
    pub fn apply(&mut self, operation: Operation) -> Result<Receipt, NodeError> {
        match operation {
            Operation::Stake { caller, token_id } => {
                self.stake(&caller, token_id).map(|()| Receipt::Done)
            }
            Operation::Unstake { caller, token_id } => {
                self.unstake(&caller, token_id).map(|()| Receipt::Done)
            }
            Operation::WithdrawBreakfastCoins { token_id } => self
                .withdraw_breakfast_coins(token_id)
                .map(Receipt::CoinsMinted),
            Operation::MintToken { caller } => {
                self.mint_token(&caller).map(Receipt::TokenMinted)
            }
            Operation::AddMintingAddress { address } => {
                self.add_minting_address(&address).map(|()| Receipt::Done)
            }
            Operation::MintToAddress { caller, amount, to } => self
                .mint_to_address(&caller, amount, &to)
                .map(|()| Receipt::Done),
        }
    }

    // ── Reads ──────────────────────────────────────────────────────────

    /// Whether a token is currently staked.
    pub fn token_is_staked(&self, token_id: TokenId) -> Result<bool, NodeError> {
        Ok(self.staking.token_is_staked(token_id, &self.tokens)?)
    }

    /// Coin balance; zero for unknown addresses.
    pub fn balance_of(&self, address: &Address) -> CoinAmount {
        self.coins.balance_of(address)
    }

    /// Current owner of a token.
    pub fn owner_of(&self, token_id: TokenId) -> Result<&Address, NodeError> {
        Ok(self.tokens.owner_of(token_id)?)
    }

    /// Whether an address may mint coins.
    pub fn can_mint(&self, address: &Address) -> bool {
        self.coins.can_mint(address)
    }

    /// Number of tokens minted.
    pub fn token_supply(&self) -> u64 {
        self.tokens.supply()
    }

    /// Read access to the coin ledger (identity, balances, minters).
    pub fn coins(&self) -> &CoinLedger {
        &self.coins
    }

    /// Read access to the token registry.
    pub fn tokens(&self) -> &TokenRegistry {
        &self.tokens
    }

    /// Read access to the staking engine.
    pub fn staking(&self) -> &StakingEngine {
        &self.staking
    }

    /// The applied-operation log, in sequence order.
    pub fn log(&self) -> &[AppliedOperation] {
        &self.log
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    // ── Snapshots ──────────────────────────────────────────────────────

    /// Capture the current state as a verified snapshot.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::create(
            &self.tokens,
            &self.coins,
            &self.staking,
            self.sequence,
            self.clock.now(),
        )
    }

    /// Rebuild a node from a snapshot. Fails if the snapshot hash does not
    /// match its content. The applied log is not part of the snapshot; the
    /// sequence counter resumes where it left off.
    pub fn restore(snapshot: StateSnapshot, clock: Box<dyn Clock>) -> Result<Self, NodeError> {
        if !snapshot.verify() {
            return Err(NodeError::SnapshotCorrupt);
        }
        Ok(Self {
            tokens: snapshot.tokens,
            coins: snapshot.coins,
            staking: snapshot.staking,
            clock,
            log: Vec::new(),
            sequence: snapshot.sequence,
        })
    }
}
