//! Fixed-point tick model.
//!
//! ## Overview
//!
//! Orders store compact integer base units instead of raw token amounts.
//! A book is created with a `size_tick` (token0 units per base unit) and a
//! `price_tick` (token1 units per price unit); real amounts are derived:
//!
//! ```text
//! amount0 = amount0_base * size_tick
//! amount1 = amount0_base * price_base * price_multiplier / price_divider
//! ```
//!
//! The multiplier/divider pair is fixed at construction from
//! `size_tick * price_tick / token0_one` so the second conversion always
//! rounds the same way; at most one of the pair is greater than one.
//!
//! ## Why integer math?
//!
//! Floating point is not deterministic across hardware and cannot represent
//! token amounts exactly. All conversions here are checked u128 arithmetic;
//! overflow is rejected, never wrapped. The `rust_decimal` helpers exist
//! only for display, never in the matching path.
//!
//! ## Rounding policy
//!
//! `to_amount1` truncates. When a taker's exact-output request is expressed
//! in the quote asset, callers must round the base quantity *up*
//! ([`TickParams::base_for_amount1_ceil`]) and then re-derive the quote
//! amount from the rounded base, so the maker is never shorted.

use rust_decimal::Decimal;

use crate::types::error::BookError;

/// Largest decimal exponent allowed for ticks and the multiplier/divider.
///
/// Bounding every constant at 10^18 keeps all intermediate products of the
/// conversion arithmetic inside u128.
pub const MAX_TICK_EXPONENT: u32 = 18;

/// Reserved price of the worst-priced ask sentinel; never assignable to a
/// real order.
pub const MAX_PRICE_BASE: u64 = u64::MAX;

/// Integer ceiling division.
#[inline]
fn ceil_div(a: u128, b: u128) -> u128 {
    a / b + u128::from(a % b != 0)
}

/// Returns the exponent if `v` is an exact power of ten.
fn power_of_ten_exponent(v: u64) -> Option<u32> {
    if v == 0 {
        return None;
    }
    let mut v = v;
    let mut exp = 0u32;
    while v % 10 == 0 {
        v /= 10;
        exp += 1;
    }
    (v == 1).then_some(exp)
}

/// Per-book conversion constants, immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickParams {
    size_tick: u64,
    price_tick: u64,
    token0_one: u64,
    price_multiplier: u64,
    price_divider: u64,
}

impl TickParams {
    /// Build tick parameters for a book.
    ///
    /// # Arguments
    ///
    /// * `size_tick` - token0 units per base unit (power of ten)
    /// * `price_tick` - token1 units per price unit (power of ten)
    /// * `token0_one` - token0 units in one whole token0 (power of ten)
    ///
    /// Fails with [`BookError::InvalidTickCombination`] if any constant is
    /// not a power of ten or exceeds [`MAX_TICK_EXPONENT`].
    pub fn new(size_tick: u64, price_tick: u64, token0_one: u64) -> Result<Self, BookError> {
        let es = power_of_ten_exponent(size_tick);
        let ep = power_of_ten_exponent(price_tick);
        let eo = power_of_ten_exponent(token0_one);
        match (es, ep, eo) {
            (Some(es), Some(ep), Some(eo))
                if es <= MAX_TICK_EXPONENT && ep <= MAX_TICK_EXPONENT && eo <= MAX_TICK_EXPONENT => {}
            _ => return Err(BookError::InvalidTickCombination),
        }

        // size_tick * price_tick / token0_one, reduced to a single-sided
        // multiplier or divider. Powers of ten always divide one another.
        let combined = u128::from(size_tick) * u128::from(price_tick);
        let one = u128::from(token0_one);
        let (mul, div) = if combined >= one {
            (combined / one, 1u128)
        } else {
            (1u128, one / combined)
        };
        let bound = 10u128.pow(MAX_TICK_EXPONENT);
        if mul > bound || div > bound {
            return Err(BookError::InvalidTickCombination);
        }

        Ok(Self {
            size_tick,
            price_tick,
            token0_one,
            price_multiplier: mul as u64,
            price_divider: div as u64,
        })
    }

    #[inline]
    pub fn size_tick(&self) -> u64 {
        self.size_tick
    }

    #[inline]
    pub fn price_tick(&self) -> u64 {
        self.price_tick
    }

    #[inline]
    pub fn price_multiplier(&self) -> u64 {
        self.price_multiplier
    }

    #[inline]
    pub fn price_divider(&self) -> u64 {
        self.price_divider
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    /// token0 amount locked by `base` base units.
    #[inline]
    pub fn to_amount0(&self, base: u64) -> u128 {
        u128::from(base) * u128::from(self.size_tick)
    }

    /// token1 amount owed for `base` base units at `price_base`.
    ///
    /// Truncating integer division; rejects overflow.
    pub fn to_amount1(&self, base: u64, price_base: u64) -> Result<u128, BookError> {
        let product = u128::from(base) * u128::from(price_base);
        let scaled = product
            .checked_mul(u128::from(self.price_multiplier))
            .ok_or(BookError::InvalidAmount)?;
        Ok(scaled / u128::from(self.price_divider))
    }

    /// Largest base quantity whose token0 amount does not exceed `amount0`.
    pub fn base_for_amount0_floor(&self, amount0: u128) -> Result<u64, BookError> {
        let base = amount0 / u128::from(self.size_tick);
        u64::try_from(base).map_err(|_| BookError::InvalidAmount)
    }

    /// Smallest base quantity whose token0 amount is at least `amount0`.
    pub fn base_for_amount0_ceil(&self, amount0: u128) -> Result<u64, BookError> {
        let base = ceil_div(amount0, u128::from(self.size_tick));
        u64::try_from(base).map_err(|_| BookError::InvalidAmount)
    }

    /// Largest base quantity whose token1 amount at `price_base` does not
    /// exceed `amount1`. Used when the paid quote amount is fixed and token0
    /// handed out must never exceed what the payment covers.
    pub fn base_for_amount1_floor(&self, amount1: u128, price_base: u64) -> Result<u64, BookError> {
        let unit = u128::from(price_base) * u128::from(self.price_multiplier);
        if unit == 0 {
            return Err(BookError::InvalidPrice);
        }
        let scaled = amount1
            .checked_mul(u128::from(self.price_divider))
            .ok_or(BookError::InvalidAmount)?;
        u64::try_from(scaled / unit).map_err(|_| BookError::InvalidAmount)
    }

    /// Smallest base quantity whose token1 amount at `price_base` is at
    /// least `amount1`. The exact-output quote conversion: round the base up,
    /// then re-derive the quote amount with [`TickParams::to_amount1`] so the
    /// maker is never shorted.
    pub fn base_for_amount1_ceil(&self, amount1: u128, price_base: u64) -> Result<u64, BookError> {
        let unit = u128::from(price_base) * u128::from(self.price_multiplier);
        if unit == 0 {
            return Err(BookError::InvalidPrice);
        }
        let scaled = amount1
            .checked_mul(u128::from(self.price_divider))
            .ok_or(BookError::InvalidAmount)?;
        u64::try_from(ceil_div(scaled, unit)).map_err(|_| BookError::InvalidAmount)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check a price base against this book's bounds.
    ///
    /// Rejects zero, the reserved sentinel maximum, and prices below the
    /// minimum implied by the divider (a price at which one base unit would
    /// round to zero token1).
    pub fn validate_price(&self, price_base: u64) -> Result<(), BookError> {
        if price_base == 0 || price_base == MAX_PRICE_BASE {
            return Err(BookError::InvalidPrice);
        }
        let unit = u128::from(price_base) * u128::from(self.price_multiplier);
        if unit < u128::from(self.price_divider) {
            return Err(BookError::InvalidPrice);
        }
        Ok(())
    }

    // ========================================================================
    // Display helpers (never used in the matching path)
    // ========================================================================

    /// Base quantity as a whole-token0 decimal, if it fits in a `Decimal`.
    pub fn amount0_decimal(&self, base: u64) -> Option<Decimal> {
        Decimal::from(base)
            .checked_mul(Decimal::from(self.size_tick))?
            .checked_div(Decimal::from(self.token0_one))
    }

    /// Price base as a token1-denominated decimal, if it fits.
    pub fn price_decimal(&self, price_base: u64) -> Option<Decimal> {
        Decimal::from(price_base).checked_mul(Decimal::from(self.price_tick))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// size 10^2, price 10^1, one0 10^3: multiplier = divider = 1.
    fn unit_ticks() -> TickParams {
        TickParams::new(100, 10, 1_000).unwrap()
    }

    /// size 10^1, price 10^1, one0 10^4: divider = 100.
    fn divider_ticks() -> TickParams {
        TickParams::new(10, 10, 10_000).unwrap()
    }

    #[test]
    fn test_new_rejects_non_power_of_ten() {
        assert_eq!(
            TickParams::new(3, 10, 100),
            Err(BookError::InvalidTickCombination)
        );
        assert_eq!(
            TickParams::new(0, 10, 100),
            Err(BookError::InvalidTickCombination)
        );
    }

    #[test]
    fn test_new_rejects_large_exponent() {
        let too_big = 10u64.pow(MAX_TICK_EXPONENT + 1);
        assert_eq!(
            TickParams::new(too_big, 1, 1),
            Err(BookError::InvalidTickCombination)
        );
    }

    #[test]
    fn test_multiplier_divider_exclusive() {
        let t = TickParams::new(10_000, 100, 1_000).unwrap();
        assert_eq!(t.price_multiplier(), 1_000);
        assert_eq!(t.price_divider(), 1);

        let t = divider_ticks();
        assert_eq!(t.price_multiplier(), 1);
        assert_eq!(t.price_divider(), 100);
    }

    #[test]
    fn test_to_amount0() {
        let t = unit_ticks();
        assert_eq!(t.to_amount0(0), 0);
        assert_eq!(t.to_amount0(7), 700);
    }

    #[test]
    fn test_to_amount1_truncates() {
        let t = divider_ticks();
        // 3 base * price 150 / divider 100 = 4.5 -> 4
        assert_eq!(t.to_amount1(3, 150).unwrap(), 4);
        assert_eq!(t.to_amount1(2, 100).unwrap(), 2);
    }

    #[test]
    fn test_to_amount1_overflow_rejected() {
        // multiplier 10^18: the product with two near-max u64 factors
        // cannot fit in u128
        let t = TickParams::new(10u64.pow(10), 10u64.pow(10), 100).unwrap();
        assert_eq!(t.price_multiplier(), 10u64.pow(18));
        assert!(t.to_amount1(u64::MAX, u64::MAX).is_err());
    }

    #[test]
    fn test_base_for_amount0_roundtrip() {
        let t = unit_ticks();
        // 250 token0 is 2.5 base units: floor 2, ceil 3
        assert_eq!(t.base_for_amount0_floor(250).unwrap(), 2);
        assert_eq!(t.base_for_amount0_ceil(250).unwrap(), 3);
        // Round trip differs by less than one size tick
        let back = t.to_amount0(t.base_for_amount0_floor(250).unwrap());
        assert!(250 - back < u128::from(t.size_tick()));
    }

    #[test]
    fn test_base_for_amount1_ceil_never_shorts_maker() {
        let t = divider_ticks();
        let price = 150;
        for amount1 in 1u128..50 {
            let base = t.base_for_amount1_ceil(amount1, price).unwrap();
            // Re-derived quote amount covers the request in full
            assert!(t.to_amount1(base, price).unwrap() >= amount1);
            // And the floor variant never exceeds it
            let floor = t.base_for_amount1_floor(amount1, price).unwrap();
            assert!(t.to_amount1(floor, price).unwrap() <= amount1);
        }
    }

    #[test]
    fn test_validate_price_bounds() {
        let t = divider_ticks();
        assert_eq!(t.validate_price(0), Err(BookError::InvalidPrice));
        assert_eq!(t.validate_price(MAX_PRICE_BASE), Err(BookError::InvalidPrice));
        // Below the divider-implied minimum one base unit rounds to zero
        assert_eq!(t.validate_price(99), Err(BookError::InvalidPrice));
        assert!(t.validate_price(100).is_ok());

        let t = unit_ticks();
        assert!(t.validate_price(1).is_ok());
    }

    #[test]
    fn test_decimal_helpers() {
        let t = unit_ticks();
        assert_eq!(t.amount0_decimal(5).unwrap(), Decimal::new(5, 1)); // 0.5
        assert_eq!(t.price_decimal(1450).unwrap(), Decimal::from(14_500));
    }
}
