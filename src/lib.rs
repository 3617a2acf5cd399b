mod bits;
pub mod error;
pub mod frame;
mod intbuf;
pub mod rangecount;
pub mod ranktree;
pub mod sequence;
pub mod shell;

pub use error::{Error, Result};
pub use frame::{Frame, FrameSet, FrameSummary, Occupancy, SeriesPoint};
pub use rangecount::{count_region_in_interval, count_symbol_in_interval, occupancy_fraction};
pub use ranktree::RankTree;
pub use sequence::{parse_sequence, read_sequence, SequenceStats};
pub use shell::Shell;

/// A symbol of an indexed sequence.
pub type Symbol = i32;

/// Implements a version of `std::panic::catch_unwind` that does not require unwind safety
/// for its closure argument. Our testing always moves the value under test into the
/// closure, so there is no danger of observing corrupted internal state after a panic occurs.
#[cfg(test)]
pub(crate) fn catch_unwind<F: FnOnce() -> R, R>(f: F) -> std::thread::Result<R> {
    // Register a do-nothing panic hook to prevent intended panics from printing stack traces.
    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(|_| {}));
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));
    std::panic::set_hook(prev_hook);
    result
}

/// Returns true if the function call panics.
#[cfg(test)]
pub(crate) fn panics<F: FnOnce() -> R, R>(f: F) -> bool {
    catch_unwind(f).is_err()
}
