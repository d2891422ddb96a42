//! Error taxonomy for book operations.
//!
//! Every public mutating entry point is all-or-nothing: when any of these
//! errors is returned, the book's state is identical to what it was before
//! the call. The only failure that is deliberately absorbed rather than
//! surfaced is a maker-credit transfer refusal, which is redirected to the
//! claimable-balance ledger (see the settlement module).

use thiserror::Error;

/// Errors produced by order placement, cancellation, swaps and queries.
///
/// Grouped by the stage at which they fire:
///
/// - **Validation** errors fire before any state change.
/// - **Liquidity/slippage** errors fire after simulating the match but
///   before committing.
/// - **Authorization** errors fire on cancel by a non-owner.
/// - **Integrity** errors cover broken external collaborators and
///   reentrancy; they are always fatal to the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookError {
    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------
    /// Zero quantity, or a quantity whose notional rounds to nothing.
    #[error("order amount must be positive and representable at this price")]
    InvalidAmount,

    /// Price base outside the representable range for this book.
    #[error("price is outside the representable range for this book")]
    InvalidPrice,

    /// Hint must reference an order id created before the new order.
    #[error("hint id {hint} must be lower than the new order id {new}")]
    InvalidHint { hint: u64, new: u64 },

    /// Tick parameters are not powers of ten or exceed the exponent bound.
    #[error("tick parameters are invalid or exceed the maximum exponent")]
    InvalidTickCombination,

    /// The two reserved sentinel entries of each side are permanent.
    #[error("sentinel orders cannot be erased")]
    CannotEraseSentinel,

    /// Erase requires an order that is currently active.
    #[error("order {0} is not an active order")]
    OrderNotActive(u64),

    /// Pagination start must be 0 (from the best) or an active order.
    #[error("pagination start id {0} is not an active order")]
    StartNotActive(u64),

    // ------------------------------------------------------------------
    // Liquidity / slippage
    // ------------------------------------------------------------------
    /// A fill-or-kill placement left unfilled quantity after matching.
    #[error("fill-or-kill order could not be fully filled")]
    FillOrKillNotFilled,

    /// The opposite side was exhausted before the swap target was met.
    #[error("not enough liquidity on the book to satisfy the swap")]
    InsufficientLiquidity,

    /// Exact-input swap produced less output than the caller's minimum.
    #[error("swap output {got} is below the caller's minimum {min}")]
    NotEnoughOutput { got: u128, min: u128 },

    /// Exact-output swap required more input than the caller's maximum.
    #[error("swap input {need} exceeds the caller's maximum {max}")]
    TooMuchRequested { need: u128, max: u128 },

    // ------------------------------------------------------------------
    // Authorization
    // ------------------------------------------------------------------
    /// Cancel attempted by neither the owner nor the registered creator.
    #[error("caller is not the order's owner or registered creator")]
    Unauthorized,

    // ------------------------------------------------------------------
    // Integrity
    // ------------------------------------------------------------------
    /// The payment callback moved fewer tokens into the book than owed.
    #[error("payment callback supplied {got} of a required debit of {need}")]
    DebitShortfall { need: u128, got: u128 },

    /// Performance-mode debit exceeds the available claimable balance.
    #[error("claimable balance {available} is insufficient for debit {need}")]
    InsufficientClaimableBalance { need: u128, available: u128 },

    /// An outbound transfer the operation depends on was refused.
    #[error("external transfer was refused")]
    TransferFailed,

    /// Flash-loan callback returned without restoring both balances.
    #[error("flash loan was not repaid in full")]
    FlashLoanNotRepaid,

    /// A callback tried to re-enter a mutating operation on the same book.
    #[error("reentrant call into a book operation")]
    Reentrancy,
}
