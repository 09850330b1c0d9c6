use commons::{AuctionError, ContractResult, TokenAmount};
use concordium_std::*;

use crate::events::AuctionEvent;
use crate::external::*;
use crate::state::{AnnounceOutcome, AuctionState, Bidder, State};

/// Initialize the auction with its rule. The sender becomes the auctioneer.
///
/// It rejects if:
/// - Fails to parse `InitParams` parameters;
/// - The minimum step of the rule is zero.
#[init(contract = "AuctionLedger", parameter = "InitParams")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params = InitParams::deserial(&mut ctx.parameter_cursor())?;

    // A zero step would let the leader be replaced at the same price
    ensure!(
        params.rule.minimum_step > 0,
        AuctionError::InvalidArguments.into()
    );

    Ok(State::new(
        state_builder,
        Address::Account(ctx.init_origin()),
        params.rule,
        params.refund_policy,
    ))
}

/// Register a bidder with its deposit, overwriting an earlier registration.
///
/// It rejects if:
/// - The auction is not in the created state;
/// - Sender is not the auctioneer;
/// - Fails to parse `RegisterParams` parameters.
#[receive(
    mutable,
    contract = "AuctionLedger",
    name = "register",
    parameter = "RegisterParams",
    enable_logger
)]
fn register<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let sender = ctx.sender();
    let state = host.state_mut();
    state.ensure_can_register(&sender)?;

    let params = RegisterParams::deserial(&mut ctx.parameter_cursor())?;
    state.register(&sender, params.bidder, params.tokens)?;

    logger.log(&AuctionEvent::register(params.bidder, params.tokens))?;

    Ok(())
}

/// Open the bidding session at the starting price of the rule.
///
/// It rejects if:
/// - The auction is not in the created state;
/// - Sender is not the auctioneer.
#[receive(
    mutable,
    contract = "AuctionLedger",
    name = "startSession",
    enable_logger
)]
fn start_session<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let state = host.state_mut();
    state.start_session(&ctx.sender())?;

    logger.log(&AuctionEvent::session_started(
        state.rule.starting_price,
        state.rule.minimum_step,
    ))?;

    Ok(())
}

/// Place a bid on behalf of the sender.
///
/// It rejects if:
/// - The bidding session is not open;
/// - Sender is not a registered bidder;
/// - Fails to parse the bid amount;
/// - The amount does not raise the current price by the minimum step;
/// - The amount exceeds the deposit of the sender.
#[receive(
    mutable,
    contract = "AuctionLedger",
    name = "bid",
    parameter = "TokenAmount",
    enable_logger
)]
fn bid<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let bidder = ctx.sender();
    let state = host.state_mut();
    state.ensure_can_bid(&bidder)?;

    let amount = TokenAmount::deserial(&mut ctx.parameter_cursor())?;
    state.bid(&bidder, amount)?;

    logger.log(&AuctionEvent::bid(bidder, amount))?;

    Ok(())
}

/// Call for bids. The round that completes the idle streak closes the auction.
///
/// It rejects if:
/// - The bidding session is not open;
/// - Sender is not the auctioneer.
#[receive(
    mutable,
    contract = "AuctionLedger",
    name = "announce",
    enable_logger
)]
fn announce<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    match host.state_mut().announce(&ctx.sender())? {
        AnnounceOutcome::Open { round } => {
            logger.log(&AuctionEvent::announce(round))?;
        }
        AnnounceOutcome::Closed {
            round,
            winner,
            price,
        } => {
            logger.log(&AuctionEvent::announce(round))?;
            logger.log(&AuctionEvent::closed(winner, price))?;
        }
    }

    Ok(())
}

/// Refund the deposit of a losing bidder and return the refunded amount.
///
/// It rejects if:
/// - The auction is not closing;
/// - Sender is not a registered bidder or is the winner;
/// - The deposit was refunded before.
#[receive(
    mutable,
    contract = "AuctionLedger",
    name = "getDeposit",
    return_value = "TokenAmount",
    enable_logger
)]
fn get_deposit<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<TokenAmount> {
    let bidder = ctx.sender();
    let amount = host.state_mut().get_deposit(&bidder)?;

    logger.log(&AuctionEvent::refund(bidder, amount))?;

    Ok(amount)
}

#[receive(contract = "AuctionLedger", name = "getRule", return_value = "Rule")]
fn get_rule<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Rule> {
    Ok(host.state().rule)
}

#[receive(
    contract = "AuctionLedger",
    name = "getState",
    return_value = "AuctionState"
)]
fn get_state<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<AuctionState> {
    Ok(host.state().auction_state)
}

/// Ledger entry of the given address, none if it was never registered.
#[receive(
    contract = "AuctionLedger",
    name = "getBidder",
    parameter = "Address",
    return_value = "Option<Bidder>"
)]
fn get_bidder<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Option<Bidder>> {
    let address = Address::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().bidder(&address))
}

/// View function that returns the contents of the state except the bidder
/// registry.
#[receive(
    contract = "AuctionLedger",
    name = "view",
    return_value = "ViewableState"
)]
fn view<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ViewableState> {
    Ok(host.state().view())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::IDLE_ROUNDS_TO_CLOSE;
    use test_infrastructure::*;

    const AUCTIONEER: AccountAddress = AccountAddress([0; 32]);
    const ALICE: AccountAddress = AccountAddress([1; 32]);
    const BOB: AccountAddress = AccountAddress([2; 32]);
    const CAROL: AccountAddress = AccountAddress([3; 32]);

    type Host = TestHost<State<TestStateApi>>;

    fn default_params() -> InitParams {
        InitParams {
            rule: Rule {
                starting_price: 50,
                minimum_step: 5,
            },
            refund_policy: RefundPolicy::Retain,
        }
    }

    fn new_host_with(params: InitParams) -> Host {
        let mut ctx = TestInitContext::empty();
        let bytes = to_bytes(&params);
        ctx.set_init_origin(AUCTIONEER).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();

        let state =
            init(&ctx, &mut state_builder).expect_report("Failed during init_AuctionLedger");

        TestHost::new(state, state_builder)
    }

    fn receive_ctx(sender: AccountAddress, parameter: &[u8]) -> TestReceiveContext {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(sender))
            .set_parameter(parameter);
        ctx
    }

    fn call_register(
        host: &mut Host,
        logger: &mut TestLogger,
        sender: AccountAddress,
        bidder: AccountAddress,
        tokens: TokenAmount,
    ) -> ContractResult<()> {
        let bytes = to_bytes(&RegisterParams {
            bidder: Address::Account(bidder),
            tokens,
        });
        register(&receive_ctx(sender, &bytes), host, logger)
    }

    fn call_start_session(
        host: &mut Host,
        logger: &mut TestLogger,
        sender: AccountAddress,
    ) -> ContractResult<()> {
        start_session(&receive_ctx(sender, &[]), host, logger)
    }

    fn call_bid(
        host: &mut Host,
        logger: &mut TestLogger,
        sender: AccountAddress,
        amount: TokenAmount,
    ) -> ContractResult<()> {
        let bytes = to_bytes(&amount);
        bid(&receive_ctx(sender, &bytes), host, logger)
    }

    fn call_announce(
        host: &mut Host,
        logger: &mut TestLogger,
        sender: AccountAddress,
    ) -> ContractResult<()> {
        announce(&receive_ctx(sender, &[]), host, logger)
    }

    fn call_get_deposit(
        host: &mut Host,
        logger: &mut TestLogger,
        sender: AccountAddress,
    ) -> ContractResult<TokenAmount> {
        get_deposit(&receive_ctx(sender, &[]), host, logger)
    }

    fn query_state(host: &Host) -> AuctionState {
        get_state(&TestReceiveContext::empty(), host).expect_report("Failed to call getState")
    }

    fn query_bidder(host: &Host, address: AccountAddress) -> Option<Bidder> {
        let bytes = to_bytes(&Address::Account(address));
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&bytes);
        get_bidder(&ctx, host).expect_report("Failed to call getBidder")
    }

    /// Host with Alice and Bob registered for 100 tokens each and the session started.
    fn started_host(logger: &mut TestLogger) -> Host {
        let mut host = new_host_with(default_params());
        claim_eq!(call_register(&mut host, logger, AUCTIONEER, ALICE, 100), Ok(()));
        claim_eq!(call_register(&mut host, logger, AUCTIONEER, BOB, 100), Ok(()));
        claim_eq!(call_start_session(&mut host, logger, AUCTIONEER), Ok(()));
        host
    }

    fn announce_until_closed(host: &mut Host, logger: &mut TestLogger) {
        for _ in 0..IDLE_ROUNDS_TO_CLOSE {
            claim_eq!(call_announce(host, logger, AUCTIONEER), Ok(()));
        }
        claim_eq!(query_state(host), AuctionState::Closing);
    }

    #[concordium_test]
    fn test_init() {
        let host = new_host_with(default_params());

        let rule = get_rule(&TestReceiveContext::empty(), &host)
            .expect_report("Failed to call getRule");
        claim_eq!(
            rule,
            Rule {
                starting_price: 50,
                minimum_step: 5,
            }
        );
        claim_eq!(query_state(&host), AuctionState::Created);
        claim_eq!(host.state().auctioneer, Address::Account(AUCTIONEER));
    }

    #[concordium_test]
    fn test_init_rejects_zero_minimum_step() {
        let mut params = default_params();
        params.rule.minimum_step = 0;

        let mut ctx = TestInitContext::empty();
        let bytes = to_bytes(&params);
        ctx.set_init_origin(AUCTIONEER).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();

        claim!(init(&ctx, &mut state_builder).is_err());
    }

    #[concordium_test]
    fn test_init_rejects_missing_rule() {
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(AUCTIONEER).set_parameter(&[]);
        let mut state_builder = TestStateBuilder::new();

        claim!(init(&ctx, &mut state_builder).is_err());
    }

    #[concordium_test]
    fn test_register_only_auctioneer() {
        let mut host = new_host_with(default_params());
        let mut logger = TestLogger::init();

        claim_eq!(
            call_register(&mut host, &mut logger, ALICE, ALICE, 100),
            Err(AuctionError::Unauthorized)
        );
        claim_eq!(query_bidder(&host, ALICE), None);
        claim!(logger.logs.is_empty());

        claim_eq!(
            call_register(&mut host, &mut logger, AUCTIONEER, ALICE, 100),
            Ok(())
        );
        claim_eq!(
            query_bidder(&host, ALICE),
            Some(Bidder {
                token: 100,
                registered: true,
                refunded: false,
            })
        );
        claim_eq!(
            logger.logs,
            vec![to_bytes(&AuctionEvent::register(
                Address::Account(ALICE),
                100
            ))]
        );
    }

    #[concordium_test]
    fn test_register_overwrites_deposit() {
        let mut host = new_host_with(default_params());
        let mut logger = TestLogger::init();

        claim_eq!(
            call_register(&mut host, &mut logger, AUCTIONEER, ALICE, 100),
            Ok(())
        );
        claim_eq!(
            call_register(&mut host, &mut logger, AUCTIONEER, ALICE, 30),
            Ok(())
        );
        claim_eq!(query_bidder(&host, ALICE).map(|bidder| bidder.token), Some(30));
        claim_eq!(query_state(&host), AuctionState::Created);
    }

    #[concordium_test]
    fn test_register_missing_arguments() {
        let mut host = new_host_with(default_params());
        let mut logger = TestLogger::init();

        let result = register(&receive_ctx(AUCTIONEER, &[]), &mut host, &mut logger);
        claim_eq!(result, Err(AuctionError::InvalidArguments));

        // Address without the deposit
        let bytes = to_bytes(&Address::Account(ALICE));
        let result = register(&receive_ctx(AUCTIONEER, &bytes), &mut host, &mut logger);
        claim_eq!(result, Err(AuctionError::InvalidArguments));
        claim_eq!(query_bidder(&host, ALICE), None);
    }

    #[concordium_test]
    fn test_register_checks_caller_before_parameter() {
        let mut host = new_host_with(default_params());
        let mut logger = TestLogger::init();

        claim_eq!(
            register(&receive_ctx(ALICE, &[]), &mut host, &mut logger),
            Err(AuctionError::Unauthorized)
        );

        claim_eq!(call_start_session(&mut host, &mut logger, AUCTIONEER), Ok(()));
        claim_eq!(
            register(&receive_ctx(AUCTIONEER, &[]), &mut host, &mut logger),
            Err(AuctionError::InvalidState)
        );
        claim_eq!(
            register(&receive_ctx(ALICE, &[]), &mut host, &mut logger),
            Err(AuctionError::InvalidState)
        );
    }

    #[concordium_test]
    fn test_bid_checks_state_and_caller_before_parameter() {
        let mut host = new_host_with(default_params());
        let mut logger = TestLogger::init();
        claim_eq!(
            call_register(&mut host, &mut logger, AUCTIONEER, ALICE, 100),
            Ok(())
        );

        claim_eq!(
            bid(&receive_ctx(ALICE, &[]), &mut host, &mut logger),
            Err(AuctionError::InvalidState)
        );

        claim_eq!(call_start_session(&mut host, &mut logger, AUCTIONEER), Ok(()));
        claim_eq!(
            bid(&receive_ctx(CAROL, &[]), &mut host, &mut logger),
            Err(AuctionError::Unauthorized)
        );
        claim_eq!(
            bid(&receive_ctx(ALICE, &[]), &mut host, &mut logger),
            Err(AuctionError::InvalidArguments)
        );
    }

    #[concordium_test]
    fn test_register_after_start_is_rejected() {
        let mut logger = TestLogger::init();
        let mut host = started_host(&mut logger);

        claim_eq!(
            call_register(&mut host, &mut logger, AUCTIONEER, CAROL, 100),
            Err(AuctionError::InvalidState)
        );
        claim_eq!(
            call_register(&mut host, &mut logger, BOB, CAROL, 100),
            Err(AuctionError::InvalidState)
        );
        claim_eq!(query_bidder(&host, CAROL), None);
    }

    #[concordium_test]
    fn test_start_session() {
        let mut host = new_host_with(default_params());
        let mut logger = TestLogger::init();

        claim_eq!(
            call_start_session(&mut host, &mut logger, ALICE),
            Err(AuctionError::Unauthorized)
        );
        claim_eq!(query_state(&host), AuctionState::Created);

        claim_eq!(call_start_session(&mut host, &mut logger, AUCTIONEER), Ok(()));
        claim_eq!(query_state(&host), AuctionState::Started);
        claim_eq!(host.state().current_price, 50);
        claim_eq!(host.state().current_winner, None);
        claim_eq!(
            logger.logs,
            vec![to_bytes(&AuctionEvent::session_started(50, 5))]
        );

        // No way back to a fresh session
        claim_eq!(
            call_start_session(&mut host, &mut logger, AUCTIONEER),
            Err(AuctionError::InvalidState)
        );
    }

    #[concordium_test]
    fn test_bid_before_session_is_rejected() {
        let mut host = new_host_with(default_params());
        let mut logger = TestLogger::init();
        claim_eq!(
            call_register(&mut host, &mut logger, AUCTIONEER, ALICE, 100),
            Ok(())
        );

        claim_eq!(
            call_bid(&mut host, &mut logger, ALICE, 60),
            Err(AuctionError::InvalidState)
        );
    }

    #[concordium_test]
    fn test_bid_preconditions() {
        let mut logger = TestLogger::init();
        let mut host = started_host(&mut logger);

        claim_eq!(
            call_bid(&mut host, &mut logger, CAROL, 60),
            Err(AuctionError::Unauthorized)
        );
        claim_eq!(host.state().current_price, 50);
        claim_eq!(host.state().current_winner, None);

        claim_eq!(
            bid(&receive_ctx(ALICE, &[]), &mut host, &mut logger),
            Err(AuctionError::InvalidArguments)
        );
        claim_eq!(
            call_bid(&mut host, &mut logger, ALICE, 120),
            Err(AuctionError::InsufficientFunds)
        );
        claim_eq!(host.state().current_price, 50);
        claim_eq!(host.state().current_winner, None);

        claim_eq!(call_bid(&mut host, &mut logger, ALICE, 60), Ok(()));
        claim_eq!(
            call_bid(&mut host, &mut logger, BOB, 101),
            Err(AuctionError::InsufficientFunds)
        );
        claim_eq!(
            call_bid(&mut host, &mut logger, CAROL, 80),
            Err(AuctionError::Unauthorized)
        );
        claim_eq!(host.state().current_price, 60);
        claim_eq!(host.state().current_winner, Some(Address::Account(ALICE)));
        claim_eq!(logger.logs.len(), 4);

        claim_eq!(
            call_bid(&mut host, &mut logger, BOB, 64),
            Err(AuctionError::InsufficientIncrement)
        );
        claim_eq!(host.state().current_price, 60);
        claim_eq!(host.state().current_winner, Some(Address::Account(ALICE)));

        claim_eq!(call_bid(&mut host, &mut logger, BOB, 65), Ok(()));
        claim_eq!(host.state().current_winner, Some(Address::Account(BOB)));
    }

    #[concordium_test]
    fn test_leader_may_raise_own_bid() {
        let mut logger = TestLogger::init();
        let mut host = started_host(&mut logger);

        claim_eq!(call_bid(&mut host, &mut logger, ALICE, 60), Ok(()));
        claim_eq!(call_bid(&mut host, &mut logger, ALICE, 70), Ok(()));
        claim_eq!(host.state().current_price, 70);
        claim_eq!(host.state().current_winner, Some(Address::Account(ALICE)));
    }

    #[concordium_test]
    fn test_announce_only_auctioneer() {
        let mut logger = TestLogger::init();
        let mut host = started_host(&mut logger);

        claim_eq!(
            call_announce(&mut host, &mut logger, ALICE),
            Err(AuctionError::Unauthorized)
        );
        claim_eq!(host.state().idle_announce_count, 0);
    }

    #[concordium_test]
    fn test_announce_before_session_is_rejected() {
        let mut host = new_host_with(default_params());
        let mut logger = TestLogger::init();

        claim_eq!(
            call_announce(&mut host, &mut logger, AUCTIONEER),
            Err(AuctionError::InvalidState)
        );
    }

    #[concordium_test]
    fn test_bid_between_announcements_extends_auction() {
        let mut logger = TestLogger::init();
        let mut host = started_host(&mut logger);

        for _ in 1..IDLE_ROUNDS_TO_CLOSE {
            claim_eq!(call_announce(&mut host, &mut logger, AUCTIONEER), Ok(()));
        }
        claim_eq!(call_bid(&mut host, &mut logger, ALICE, 60), Ok(()));

        // The streak starts over after the bid
        for _ in 1..IDLE_ROUNDS_TO_CLOSE {
            claim_eq!(call_announce(&mut host, &mut logger, AUCTIONEER), Ok(()));
            claim_eq!(query_state(&host), AuctionState::Started);
        }
        claim_eq!(call_announce(&mut host, &mut logger, AUCTIONEER), Ok(()));
        claim_eq!(query_state(&host), AuctionState::Closing);
        claim_eq!(host.state().current_winner, Some(Address::Account(ALICE)));
    }

    #[concordium_test]
    fn test_closing_is_terminal() {
        let mut logger = TestLogger::init();
        let mut host = started_host(&mut logger);
        announce_until_closed(&mut host, &mut logger);

        claim_eq!(
            call_announce(&mut host, &mut logger, AUCTIONEER),
            Err(AuctionError::InvalidState)
        );
        claim_eq!(
            call_bid(&mut host, &mut logger, ALICE, 60),
            Err(AuctionError::InvalidState)
        );
        claim_eq!(
            call_start_session(&mut host, &mut logger, AUCTIONEER),
            Err(AuctionError::InvalidState)
        );
        claim_eq!(
            call_register(&mut host, &mut logger, AUCTIONEER, CAROL, 100),
            Err(AuctionError::InvalidState)
        );
        claim_eq!(query_state(&host), AuctionState::Closing);
    }

    #[concordium_test]
    fn test_get_deposit_only_when_closing() {
        let mut logger = TestLogger::init();
        let mut host = started_host(&mut logger);

        claim_eq!(
            call_get_deposit(&mut host, &mut logger, ALICE),
            Err(AuctionError::InvalidState)
        );
    }

    #[concordium_test]
    fn test_get_deposit_once() {
        let mut logger = TestLogger::init();
        let mut host = started_host(&mut logger);
        claim_eq!(call_bid(&mut host, &mut logger, BOB, 70), Ok(()));
        announce_until_closed(&mut host, &mut logger);

        claim_eq!(call_get_deposit(&mut host, &mut logger, ALICE), Ok(100));
        claim_eq!(
            call_get_deposit(&mut host, &mut logger, ALICE),
            Err(AuctionError::AlreadyRefunded)
        );
        claim_eq!(
            call_get_deposit(&mut host, &mut logger, CAROL),
            Err(AuctionError::Unauthorized)
        );
    }

    #[concordium_test]
    fn test_get_deposit_zero_policy() {
        let mut params = default_params();
        params.refund_policy = RefundPolicy::Zero;
        let mut host = new_host_with(params);
        let mut logger = TestLogger::init();

        claim_eq!(
            call_register(&mut host, &mut logger, AUCTIONEER, ALICE, 100),
            Ok(())
        );
        claim_eq!(
            call_register(&mut host, &mut logger, AUCTIONEER, BOB, 80),
            Ok(())
        );
        claim_eq!(call_start_session(&mut host, &mut logger, AUCTIONEER), Ok(()));
        claim_eq!(call_bid(&mut host, &mut logger, ALICE, 75), Ok(()));
        announce_until_closed(&mut host, &mut logger);

        claim_eq!(call_get_deposit(&mut host, &mut logger, BOB), Ok(80));
        claim_eq!(
            query_bidder(&host, BOB),
            Some(Bidder {
                token: 0,
                registered: true,
                refunded: true,
            })
        );
    }

    #[concordium_test]
    fn test_view() {
        let mut logger = TestLogger::init();
        let mut host = started_host(&mut logger);
        claim_eq!(call_bid(&mut host, &mut logger, ALICE, 60), Ok(()));
        claim_eq!(call_announce(&mut host, &mut logger, AUCTIONEER), Ok(()));

        let viewable = view(&TestReceiveContext::empty(), &host)
            .expect_report("Failed to call view");
        claim_eq!(
            viewable,
            ViewableState {
                auctioneer: Address::Account(AUCTIONEER),
                rule: Rule {
                    starting_price: 50,
                    minimum_step: 5,
                },
                refund_policy: RefundPolicy::Retain,
                auction_state: AuctionState::Started,
                current_price: 60,
                current_winner: Some(Address::Account(ALICE)),
                idle_announce_count: 1,
                bidder_count: 2,
            }
        );
    }

    #[concordium_test]
    /// Test the whole auction:
    /// 1. Auctioneer registers Alice and Bob with 100 tokens each and starts the session.
    /// 2. Alice bids 60 and Bob outbids her with 70.
    /// 3. Alice tries 65, which is below 70 + 5 and gets rejected.
    /// 4. Four announcements close the auction with Bob winning at 70.
    /// 5. Alice gets her 100 tokens back, Bob can not claim his deposit.
    fn test_auction_scenario() {
        let mut host = new_host_with(default_params());
        let mut logger = TestLogger::init();

        claim_eq!(
            call_register(&mut host, &mut logger, AUCTIONEER, ALICE, 100),
            Ok(())
        );
        claim_eq!(
            call_register(&mut host, &mut logger, AUCTIONEER, BOB, 100),
            Ok(())
        );
        claim_eq!(call_start_session(&mut host, &mut logger, AUCTIONEER), Ok(()));
        claim_eq!(query_state(&host), AuctionState::Started);
        claim_eq!(host.state().current_price, 50);

        claim_eq!(call_bid(&mut host, &mut logger, ALICE, 60), Ok(()));
        claim_eq!(call_bid(&mut host, &mut logger, BOB, 70), Ok(()));
        claim_eq!(
            call_bid(&mut host, &mut logger, ALICE, 65),
            Err(AuctionError::InsufficientIncrement)
        );

        announce_until_closed(&mut host, &mut logger);
        claim_eq!(host.state().current_winner, Some(Address::Account(BOB)));
        claim_eq!(host.state().current_price, 70);

        claim_eq!(call_get_deposit(&mut host, &mut logger, ALICE), Ok(100));
        claim_eq!(query_bidder(&host, ALICE).map(|bidder| bidder.token), Some(100));
        claim_eq!(
            call_get_deposit(&mut host, &mut logger, BOB),
            Err(AuctionError::Unauthorized)
        );

        let alice = Address::Account(ALICE);
        let bob = Address::Account(BOB);
        claim_eq!(
            logger.logs,
            vec![
                to_bytes(&AuctionEvent::register(alice, 100)),
                to_bytes(&AuctionEvent::register(bob, 100)),
                to_bytes(&AuctionEvent::session_started(50, 5)),
                to_bytes(&AuctionEvent::bid(alice, 60)),
                to_bytes(&AuctionEvent::bid(bob, 70)),
                to_bytes(&AuctionEvent::announce(1)),
                to_bytes(&AuctionEvent::announce(2)),
                to_bytes(&AuctionEvent::announce(3)),
                to_bytes(&AuctionEvent::announce(4)),
                to_bytes(&AuctionEvent::closed(Some(bob), 70)),
                to_bytes(&AuctionEvent::refund(alice, 100)),
            ]
        );
    }
}
