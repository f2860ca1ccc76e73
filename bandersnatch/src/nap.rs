//! Process-wide hook deciding what happens when a NaP ("not a point") reaches
//! a comparison or a coordinate query.
//!
//! NaPs propagate silently through arithmetic. They only surface when a
//! point is compared, checked for being neutral, asked for its affine
//! coordinates, or serialized; at that point the installed [`NapHandler`] is
//! called. It may panic, log, or return the value the comparison should
//! report.

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::sync::{PoisonError, RwLock};

/// Called with a static description of the operation, whether the caller is
/// a comparison, and the points involved.
///
/// For comparisons (`comparison == true`) the return value is used as the
/// result. Otherwise it is ignored.
pub type NapHandler = fn(reason: &str, comparison: bool, points: &[&dyn Debug]) -> bool;

/// The default handler: ignores the NaP and makes comparisons report `false`.
pub fn ignore_nap(_reason: &str, _comparison: bool, _points: &[&dyn Debug]) -> bool {
    false
}

/// A handler that panics on every NaP it is told about.
pub fn panic_on_nap(reason: &str, _comparison: bool, points: &[&dyn Debug]) -> bool {
    panic!("NaP encountered: {reason}: {points:?}")
}

#[cfg(feature = "std")]
static NAP_HANDLER: RwLock<NapHandler> = RwLock::new(ignore_nap);

/// Returns the handler currently installed.
///
/// Without the `std` feature this is always [`ignore_nap`].
pub fn get_nap_handler() -> NapHandler {
    #[cfg(feature = "std")]
    {
        *NAP_HANDLER.read().unwrap_or_else(PoisonError::into_inner)
    }
    #[cfg(not(feature = "std"))]
    {
        ignore_nap
    }
}

/// Installs `handler` for the whole process and returns the previous one.
///
/// The lock only guards the swap. Handlers run outside of it and may be
/// called from several threads at once.
#[cfg(feature = "std")]
pub fn set_nap_handler(handler: NapHandler) -> NapHandler {
    let mut guard = NAP_HANDLER.write().unwrap_or_else(PoisonError::into_inner);
    core::mem::replace(&mut *guard, handler)
}

/// Reports a NaP to the installed handler.
pub(crate) fn nap_encountered(reason: &str, comparison: bool, points: &[&dyn Debug]) -> bool {
    let handler = get_nap_handler();
    handler(reason, comparison, points)
}
