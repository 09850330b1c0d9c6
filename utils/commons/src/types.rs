use super::*;

/// Result type of every ledger entrypoint and state transition.
pub type ContractResult<A> = Result<A, AuctionError>;

/// Number of tokens a bidder deposits, and the unit bids are made in.
pub type TokenAmount = u64;
