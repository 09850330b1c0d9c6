//! A single-auction ledger smart contract.
//!
//! # Description
//! The instance owner acts as the auctioneer. While the auction is created the
//! auctioneer registers bidders together with their token deposits and then
//! starts the bidding session. Registered bidders raise the price by at least
//! the minimum step of the auction rule and never above their own deposit.
//!
//! The auction has no clock. The auctioneer calls `announce` to run a call for
//! bids, and after four consecutive rounds without a new bid the auction moves
//! to closing with the current leader as the winner. Every other bidder can then
//! claim the deposit back exactly once through `getDeposit`.

#![cfg_attr(not(feature = "std"), no_std)]

mod contract;
mod events;
mod external;
mod state;
