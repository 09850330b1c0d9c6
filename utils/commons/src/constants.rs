/// Consecutive `announce` calls without a new bid after which the auction closes.
pub const IDLE_ROUNDS_TO_CLOSE: u8 = 4;

/// Tag for the Register Bidder event.
pub const REGISTER_TAG: u8 = u8::MAX;

/// Tag for the Session Started event.
pub const SESSION_STARTED_TAG: u8 = u8::MAX - 1;

/// Tag for the Bid event.
pub const BID_TAG: u8 = u8::MAX - 2;

/// Tag for the Announce event.
pub const ANNOUNCE_TAG: u8 = u8::MAX - 3;

/// Tag for the Auction Closed event.
pub const CLOSED_TAG: u8 = u8::MAX - 4;

/// Tag for the Deposit Refund event.
pub const REFUND_TAG: u8 = u8::MAX - 5;
