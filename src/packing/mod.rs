//! Exact minimum box counting over the fixed box sizes
//!
//! The solver answers one question: what is the smallest number of boxes
//! from [`BOX_SIZES`] whose sizes sum to exactly `target`?
//!
//! # Strategy
//!
//! ```text
//! for a in 0..=N/59                      (count of 59s)
//!   for b in 0..=(N - 59a)/42            (count of 42s)
//!     R = N - 59a - 42b
//!     c = largest value <= R/16 with c ≡ R (mod 5)   (16 ≡ 1 mod 5)
//!     d = (R - 16c) / 5
//!     best = min(best, a + b + c + d)
//! ```
//!
//! The two smallest sizes are resolved in closed form, so the cost is
//! `O((N/59) * (N/42))` regardless of how many 16s and 5s the answer uses.
//! Picking the largest valid `c` minimizes `c + d` because one 16 replaces
//! more than three 5s.

/// Box sizes, largest first. Shared read-only by every worker.
pub const BOX_SIZES: [u64; 4] = [59, 42, 16, 5];

const LARGEST: u64 = BOX_SIZES[0];
const LARGE: u64 = BOX_SIZES[1];
const MEDIUM: u64 = BOX_SIZES[2];
const SMALL: u64 = BOX_SIZES[3];

/// Search stopped by the caller before finishing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

/// Minimum number of boxes summing exactly to `target`, or `None` when no
/// exact packing exists.
///
/// `min_boxes(0)` is `Some(0)`.
pub fn min_boxes(target: u64) -> Option<u64> {
    min_boxes_or_stop(target, || false).unwrap_or(None)
}

/// [`min_boxes`] that polls `should_stop` once per count of 59s, so a large
/// target can be abandoned part way through.
pub fn min_boxes_or_stop<S>(target: u64, should_stop: S) -> Result<Option<u64>, Interrupted>
where
    S: Fn() -> bool,
{
    let mut best: Option<u64> = None;

    for a in 0..=target / LARGEST {
        if should_stop() {
            return Err(Interrupted);
        }
        let after_largest = target - LARGEST * a;

        for b in 0..=after_largest / LARGE {
            let rest = after_largest - LARGE * b;
            let Some((c, d)) = split_medium_small(rest) else {
                continue;
            };

            let boxes = a + b + c + d;
            if best.is_none_or(|current| boxes < current) {
                best = Some(boxes);
            }
        }
    }

    Ok(best)
}

/// Splits `rest` into `(c, d)` with `16c + 5d == rest`, maximizing `c`.
fn split_medium_small(rest: u64) -> Option<(u64, u64)> {
    let max_medium = rest / MEDIUM;
    let wanted = rest % SMALL;

    // Step down from max_medium to the nearest value congruent to `rest` mod 5
    let step_down = (max_medium + SMALL - wanted) % SMALL;
    let medium = max_medium.checked_sub(step_down)?;

    let remainder = rest - MEDIUM * medium;
    debug_assert_eq!(remainder % SMALL, 0);
    Some((medium, remainder / SMALL))
}
