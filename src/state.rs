use commons::{AuctionError, ContractResult, TokenAmount, IDLE_ROUNDS_TO_CLOSE};
use concordium_std::*;

use crate::external::{RefundPolicy, Rule, ViewableState};

/// The state in which the auction can be. It only ever moves forward.
#[derive(Debug, Clone, Copy, Serialize, SchemaType, PartialEq, Eq)]
pub enum AuctionState {
    /// Bidders are being registered.
    Created,
    /// Bidding session is open.
    Started,
    /// Auction is over, losing bidders may claim their deposits.
    Closing,
}

/// Ledger entry of a single bidder.
#[derive(Debug, Clone, Copy, Serialize, SchemaType, PartialEq, Eq)]
pub struct Bidder {
    /// Deposit, the upper bound for the bids of this bidder.
    pub token: TokenAmount,
    pub registered: bool,
    /// Set once the deposit was claimed back.
    pub refunded: bool,
}

impl Bidder {
    fn new(token: TokenAmount) -> Self {
        Self {
            token,
            registered: true,
            refunded: false,
        }
    }
}

/// Result of an announcement round.
#[derive(Debug, PartialEq, Eq)]
pub enum AnnounceOutcome {
    /// Bidding stays open, `round` idle rounds have passed so far.
    Open { round: u8 },
    /// The last idle round closed the auction.
    Closed {
        round: u8,
        winner: Option<Address>,
        price: TokenAmount,
    },
}

/// The contract state.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// The only address allowed to register bidders and drive the auction.
    pub auctioneer: Address,
    pub rule: Rule,
    pub refund_policy: RefundPolicy,
    pub auction_state: AuctionState,
    /// Registered bidders with their deposits.
    pub bidders: StateMap<Address, Bidder, S>,
    /// Highest accepted bid, the starting price until the first bid.
    pub current_price: TokenAmount,
    /// Bidder holding `current_price`.
    pub current_winner: Option<Address>,
    /// Announcements since the last accepted bid.
    pub idle_announce_count: u8,
}

impl<S: HasStateApi> State<S> {
    /// Creates a new auction with no bidders.
    pub fn new(
        state_builder: &mut StateBuilder<S>,
        auctioneer: Address,
        rule: Rule,
        refund_policy: RefundPolicy,
    ) -> Self {
        Self {
            auctioneer,
            rule,
            refund_policy,
            auction_state: AuctionState::Created,
            bidders: state_builder.new_map(),
            current_price: rule.starting_price,
            current_winner: None,
            idle_announce_count: 0,
        }
    }

    fn ensure_state(&self, expected: AuctionState) -> ContractResult<()> {
        ensure_eq!(self.auction_state, expected, AuctionError::InvalidState);
        Ok(())
    }

    fn ensure_auctioneer(&self, sender: &Address) -> ContractResult<()> {
        ensure_eq!(sender, &self.auctioneer, AuctionError::Unauthorized);
        Ok(())
    }

    /// Registration is open and `sender` is the auctioneer.
    pub fn ensure_can_register(&self, sender: &Address) -> ContractResult<()> {
        self.ensure_state(AuctionState::Created)?;
        self.ensure_auctioneer(sender)
    }

    /// Bidding is open and `sender` is registered. Returns the deposit of `sender`.
    pub fn ensure_can_bid(&self, sender: &Address) -> ContractResult<TokenAmount> {
        self.ensure_state(AuctionState::Started)?;

        let deposit = match self.bidders.get(sender) {
            Some(bidder) if bidder.registered => bidder.token,
            _ => bail!(AuctionError::Unauthorized),
        };
        Ok(deposit)
    }

    /// Insert or overwrite the deposit of `bidder`.
    pub fn register(
        &mut self,
        sender: &Address,
        bidder: Address,
        tokens: TokenAmount,
    ) -> ContractResult<()> {
        self.ensure_can_register(sender)?;

        self.bidders.insert(bidder, Bidder::new(tokens));
        Ok(())
    }

    pub fn start_session(&mut self, sender: &Address) -> ContractResult<()> {
        self.ensure_state(AuctionState::Created)?;
        self.ensure_auctioneer(sender)?;

        self.auction_state = AuctionState::Started;
        self.current_price = self.rule.starting_price;
        self.current_winner = None;
        self.idle_announce_count = 0;
        Ok(())
    }

    /// Accept `amount` from `sender` as the new leading bid.
    pub fn bid(&mut self, sender: &Address, amount: TokenAmount) -> ContractResult<()> {
        let deposit = self.ensure_can_bid(sender)?;

        // No bid can reach a threshold past `TokenAmount::MAX`
        let threshold = self
            .current_price
            .checked_add(self.rule.minimum_step)
            .ok_or(AuctionError::InsufficientIncrement)?;
        ensure!(amount >= threshold, AuctionError::InsufficientIncrement);
        ensure!(amount <= deposit, AuctionError::InsufficientFunds);

        self.current_price = amount;
        self.current_winner = Some(*sender);
        self.idle_announce_count = 0;
        Ok(())
    }

    /// Count one idle round and close the auction on the last one.
    pub fn announce(&mut self, sender: &Address) -> ContractResult<AnnounceOutcome> {
        self.ensure_state(AuctionState::Started)?;
        self.ensure_auctioneer(sender)?;

        self.idle_announce_count += 1;
        let round = self.idle_announce_count;

        if round < IDLE_ROUNDS_TO_CLOSE {
            return Ok(AnnounceOutcome::Open { round });
        }

        self.auction_state = AuctionState::Closing;
        Ok(AnnounceOutcome::Closed {
            round,
            winner: self.current_winner,
            price: self.current_price,
        })
    }

    /// Mark the deposit of a losing bidder as refunded and return its amount.
    ///
    /// The winning deposit pays for the lot and can not be claimed.
    pub fn get_deposit(&mut self, sender: &Address) -> ContractResult<TokenAmount> {
        self.ensure_state(AuctionState::Closing)?;
        ensure_ne!(
            self.current_winner.as_ref(),
            Some(sender),
            AuctionError::Unauthorized
        );

        let mut bidder = self
            .bidders
            .get(sender)
            .map(|bidder| *bidder)
            .ok_or(AuctionError::Unauthorized)?;
        ensure!(bidder.registered, AuctionError::Unauthorized);
        ensure!(!bidder.refunded, AuctionError::AlreadyRefunded);

        let amount = bidder.token;
        bidder.refunded = true;
        if let RefundPolicy::Zero = self.refund_policy {
            bidder.token = 0;
        }
        self.bidders.insert(*sender, bidder);

        Ok(amount)
    }

    pub fn bidder(&self, address: &Address) -> Option<Bidder> {
        self.bidders.get(address).map(|bidder| *bidder)
    }

    pub fn view(&self) -> ViewableState {
        ViewableState {
            auctioneer: self.auctioneer,
            rule: self.rule,
            refund_policy: self.refund_policy,
            auction_state: self.auction_state,
            current_price: self.current_price,
            current_winner: self.current_winner,
            idle_announce_count: self.idle_announce_count,
            bidder_count: self.bidders.iter().count() as u32,
        }
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    const AUCTIONEER: Address = Address::Account(AccountAddress([0; 32]));
    const ALICE: Address = Address::Account(AccountAddress([1; 32]));
    const BOB: Address = Address::Account(AccountAddress([2; 32]));
    const NFT_CONTRACT: Address = Address::Contract(ContractAddress {
        index: 7,
        subindex: 0,
    });

    const RULE: Rule = Rule {
        starting_price: 50,
        minimum_step: 5,
    };

    fn started_state(refund_policy: RefundPolicy) -> State<TestStateApi> {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder, AUCTIONEER, RULE, refund_policy);

        claim_eq!(state.register(&AUCTIONEER, ALICE, 100), Ok(()));
        claim_eq!(state.register(&AUCTIONEER, BOB, 100), Ok(()));
        claim_eq!(state.start_session(&AUCTIONEER), Ok(()));

        state
    }

    fn close(state: &mut State<TestStateApi>) {
        for _ in 0..IDLE_ROUNDS_TO_CLOSE {
            claim!(state.announce(&AUCTIONEER).is_ok());
        }
        claim_eq!(state.auction_state, AuctionState::Closing);
    }

    #[concordium_test]
    fn test_new_state_is_created() {
        let mut state_builder = TestStateBuilder::new();
        let state = State::new(&mut state_builder, AUCTIONEER, RULE, RefundPolicy::Retain);

        claim_eq!(state.auction_state, AuctionState::Created);
        claim_eq!(state.current_price, 50);
        claim_eq!(state.current_winner, None);
        claim_eq!(state.idle_announce_count, 0);
        claim_eq!(state.bidder(&ALICE), None);
    }

    #[concordium_test]
    fn test_register_accepts_contract_bidders() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder, AUCTIONEER, RULE, RefundPolicy::Retain);

        claim_eq!(state.register(&AUCTIONEER, NFT_CONTRACT, 10), Ok(()));
        claim_eq!(
            state.bidder(&NFT_CONTRACT),
            Some(Bidder {
                token: 10,
                registered: true,
                refunded: false,
            })
        );
    }

    #[concordium_test]
    fn test_register_checks_state_before_caller() {
        let mut state = started_state(RefundPolicy::Retain);

        claim_eq!(
            state.register(&AUCTIONEER, NFT_CONTRACT, 10),
            Err(AuctionError::InvalidState)
        );
        claim_eq!(
            state.register(&ALICE, NFT_CONTRACT, 10),
            Err(AuctionError::InvalidState)
        );
        claim_eq!(state.bidder(&NFT_CONTRACT), None);
    }

    #[concordium_test]
    fn test_bid_guard_checks_state_then_registration() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder, AUCTIONEER, RULE, RefundPolicy::Retain);
        claim_eq!(state.register(&AUCTIONEER, ALICE, 100), Ok(()));

        claim_eq!(state.ensure_can_bid(&ALICE), Err(AuctionError::InvalidState));
        claim_eq!(state.ensure_can_bid(&BOB), Err(AuctionError::InvalidState));

        claim_eq!(state.start_session(&AUCTIONEER), Ok(()));
        claim_eq!(state.ensure_can_bid(&ALICE), Ok(100));
        claim_eq!(state.ensure_can_bid(&BOB), Err(AuctionError::Unauthorized));
        claim_eq!(state.ensure_can_register(&AUCTIONEER), Err(AuctionError::InvalidState));
    }

    #[concordium_test]
    fn test_first_bid_needs_minimum_step_over_starting_price() {
        let mut state = started_state(RefundPolicy::Retain);

        claim_eq!(
            state.bid(&ALICE, 54),
            Err(AuctionError::InsufficientIncrement)
        );
        claim_eq!(state.current_winner, None);

        claim_eq!(state.bid(&ALICE, 55), Ok(()));
        claim_eq!(state.current_price, 55);
        claim_eq!(state.current_winner, Some(ALICE));
    }

    #[concordium_test]
    fn test_bid_threshold_overflow_is_rejected() {
        let mut state_builder = TestStateBuilder::new();
        let rule = Rule {
            starting_price: TokenAmount::MAX - 1,
            minimum_step: 5,
        };
        let mut state = State::new(&mut state_builder, AUCTIONEER, rule, RefundPolicy::Retain);
        claim_eq!(state.register(&AUCTIONEER, ALICE, TokenAmount::MAX), Ok(()));
        claim_eq!(state.start_session(&AUCTIONEER), Ok(()));

        claim_eq!(
            state.bid(&ALICE, TokenAmount::MAX),
            Err(AuctionError::InsufficientIncrement)
        );
        claim_eq!(state.current_price, TokenAmount::MAX - 1);
    }

    #[concordium_test]
    fn test_bid_above_deposit_is_rejected() {
        let mut state = started_state(RefundPolicy::Retain);

        claim_eq!(state.bid(&ALICE, 101), Err(AuctionError::InsufficientFunds));
        claim_eq!(state.bid(&ALICE, 100), Ok(()));
        claim_eq!(state.current_winner, Some(ALICE));
    }

    #[concordium_test]
    fn test_bid_resets_idle_rounds() {
        let mut state = started_state(RefundPolicy::Retain);

        for round in 1..IDLE_ROUNDS_TO_CLOSE {
            claim_eq!(
                state.announce(&AUCTIONEER),
                Ok(AnnounceOutcome::Open { round })
            );
        }
        claim_eq!(state.bid(&BOB, 60), Ok(()));
        claim_eq!(state.idle_announce_count, 0);

        for round in 1..IDLE_ROUNDS_TO_CLOSE {
            claim_eq!(
                state.announce(&AUCTIONEER),
                Ok(AnnounceOutcome::Open { round })
            );
        }
        claim_eq!(
            state.announce(&AUCTIONEER),
            Ok(AnnounceOutcome::Closed {
                round: IDLE_ROUNDS_TO_CLOSE,
                winner: Some(BOB),
                price: 60,
            })
        );
        claim_eq!(state.auction_state, AuctionState::Closing);
    }

    #[concordium_test]
    fn test_close_without_bids_has_no_winner() {
        let mut state = started_state(RefundPolicy::Retain);
        close(&mut state);

        claim_eq!(state.current_winner, None);
        claim_eq!(state.current_price, 50);

        // Nobody won, so everybody gets the deposit back
        claim_eq!(state.get_deposit(&ALICE), Ok(100));
        claim_eq!(state.get_deposit(&BOB), Ok(100));
    }

    #[concordium_test]
    fn test_get_deposit_zero_policy_clears_balance() {
        let mut state = started_state(RefundPolicy::Zero);
        claim_eq!(state.bid(&BOB, 70), Ok(()));
        close(&mut state);

        claim_eq!(state.get_deposit(&ALICE), Ok(100));
        claim_eq!(
            state.bidder(&ALICE),
            Some(Bidder {
                token: 0,
                registered: true,
                refunded: true,
            })
        );
        claim_eq!(
            state.get_deposit(&ALICE),
            Err(AuctionError::AlreadyRefunded)
        );
    }

    #[concordium_test]
    fn test_get_deposit_rejects_winner_and_strangers() {
        let mut state = started_state(RefundPolicy::Retain);
        claim_eq!(state.bid(&BOB, 70), Ok(()));
        close(&mut state);

        claim_eq!(state.get_deposit(&BOB), Err(AuctionError::Unauthorized));
        claim_eq!(
            state.get_deposit(&NFT_CONTRACT),
            Err(AuctionError::Unauthorized)
        );
        claim_eq!(
            state.bidder(&BOB),
            Some(Bidder {
                token: 100,
                registered: true,
                refunded: false,
            })
        );
    }

    #[concordium_test]
    fn test_view_counts_bidders() {
        let state = started_state(RefundPolicy::Retain);

        claim_eq!(
            state.view(),
            ViewableState {
                auctioneer: AUCTIONEER,
                rule: RULE,
                refund_policy: RefundPolicy::Retain,
                auction_state: AuctionState::Started,
                current_price: 50,
                current_winner: None,
                idle_announce_count: 0,
                bidder_count: 2,
            }
        );
    }
}
