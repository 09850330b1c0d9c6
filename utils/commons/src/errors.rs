use super::*;

/// The custom errors the auction ledger can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum AuctionError {
    /// Missing or malformed parameter (Error code: -1).
    #[from(ParseError)]
    InvalidArguments,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Caller is not allowed to perform this action (Error code: -4).
    Unauthorized,
    /// Action is not available in the current auction state (Error code: -5).
    InvalidState,
    /// Bid does not exceed the current price by the minimum step (Error code: -6).
    InsufficientIncrement,
    /// Bid exceeds the bidder's deposit (Error code: -7).
    InsufficientFunds,
    /// Deposit was already refunded to this bidder (Error code: -8).
    AlreadyRefunded,
}

/// Mapping the logging errors to AuctionError.
impl From<LogError> for AuctionError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}
