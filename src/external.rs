use commons::TokenAmount;
use concordium_std::*;

use crate::state::AuctionState;

/// Pricing rule of the auction, fixed on initialization.
#[derive(Debug, Clone, Copy, Serialize, SchemaType, PartialEq, Eq)]
pub struct Rule {
    /// Price the bidding session opens at.
    pub starting_price: TokenAmount,
    /// Smallest amount a bid has to raise the current price by.
    pub minimum_step: TokenAmount,
}

/// What happens to a stored deposit once it was refunded.
#[derive(Debug, Clone, Copy, Serialize, SchemaType, PartialEq, Eq)]
pub enum RefundPolicy {
    /// Refunded bidders keep their recorded token balance.
    Retain,
    /// Recorded token balance is cleared on refund.
    Zero,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct InitParams {
    pub rule: Rule,
    pub refund_policy: RefundPolicy,
}

#[derive(Debug, Clone, SchemaType, Serialize)]
pub struct RegisterParams {
    /// Address allowed to bid.
    pub bidder: Address,
    /// Deposit backing the bids of this address.
    pub tokens: TokenAmount,
}

/// Everything in the state except the bidder registry.
#[derive(Debug, Clone, Serialize, SchemaType, PartialEq, Eq)]
pub struct ViewableState {
    pub auctioneer: Address,
    pub rule: Rule,
    pub refund_policy: RefundPolicy,
    pub auction_state: AuctionState,
    pub current_price: TokenAmount,
    pub current_winner: Option<Address>,
    pub idle_announce_count: u8,
    pub bidder_count: u32,
}
