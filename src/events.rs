use commons::{
    TokenAmount, ANNOUNCE_TAG, BID_TAG, CLOSED_TAG, REFUND_TAG, REGISTER_TAG,
    SESSION_STARTED_TAG,
};
use concordium_std::*;

/// Bidder registration event data.
#[derive(Debug, Serial)]
pub struct RegisterEvent {
    /// Registered bidder address.
    pub bidder: Address,
    /// Deposit of the bidder.
    pub tokens: TokenAmount,
}

/// Bidding session start event data.
#[derive(Debug, Serial)]
pub struct SessionStartedEvent {
    pub starting_price: TokenAmount,
    pub minimum_step: TokenAmount,
}

/// Bid event data.
#[derive(Debug, Serial)]
pub struct BidEvent {
    /// Bidder address.
    pub bidder: Address,
    /// Bid amount.
    pub amount: TokenAmount,
}

/// Announcement round event data.
#[derive(Debug, Serial)]
pub struct AnnounceEvent {
    /// Idle rounds since the last accepted bid, including this one.
    pub round: u8,
}

/// Auction closing event data.
#[derive(Debug, Serial)]
pub struct ClosedEvent {
    /// Address of the auction winner, none if nobody placed a bid.
    pub winner: Option<Address>,
    /// Winning price.
    pub price: TokenAmount,
}

/// Deposit refund event data.
#[derive(Debug, Serial)]
pub struct RefundEvent {
    pub bidder: Address,
    /// Refunded deposit.
    pub amount: TokenAmount,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug)]
pub enum AuctionEvent {
    Register(RegisterEvent),
    SessionStarted(SessionStartedEvent),
    Bid(BidEvent),
    Announce(AnnounceEvent),
    Closed(ClosedEvent),
    Refund(RefundEvent),
}

impl AuctionEvent {
    pub fn register(bidder: Address, tokens: TokenAmount) -> Self {
        Self::Register(RegisterEvent { bidder, tokens })
    }

    pub fn session_started(starting_price: TokenAmount, minimum_step: TokenAmount) -> Self {
        Self::SessionStarted(SessionStartedEvent {
            starting_price,
            minimum_step,
        })
    }

    pub fn bid(bidder: Address, amount: TokenAmount) -> Self {
        Self::Bid(BidEvent { bidder, amount })
    }

    pub fn announce(round: u8) -> Self {
        Self::Announce(AnnounceEvent { round })
    }

    pub fn closed(winner: Option<Address>, price: TokenAmount) -> Self {
        Self::Closed(ClosedEvent { winner, price })
    }

    pub fn refund(bidder: Address, amount: TokenAmount) -> Self {
        Self::Refund(RefundEvent { bidder, amount })
    }
}

impl Serial for AuctionEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            AuctionEvent::Register(event) => {
                out.write_u8(REGISTER_TAG)?;
                event.serial(out)
            }
            AuctionEvent::SessionStarted(event) => {
                out.write_u8(SESSION_STARTED_TAG)?;
                event.serial(out)
            }
            AuctionEvent::Bid(event) => {
                out.write_u8(BID_TAG)?;
                event.serial(out)
            }
            AuctionEvent::Announce(event) => {
                out.write_u8(ANNOUNCE_TAG)?;
                event.serial(out)
            }
            AuctionEvent::Closed(event) => {
                out.write_u8(CLOSED_TAG)?;
                event.serial(out)
            }
            AuctionEvent::Refund(event) => {
                out.write_u8(REFUND_TAG)?;
                event.serial(out)
            }
        }
    }
}
