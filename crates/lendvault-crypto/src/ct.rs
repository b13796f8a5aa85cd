//! Constant-time comparison over fixed-size buffers.

use subtle::ConstantTimeEq;

/// Compare two equally sized byte arrays without an early exit.
///
/// Callers must bring variable-length input to a fixed size first (for
/// example by hex-decoding into an array); the length check that implies
/// is allowed to be time-variable.
pub fn constant_time_eq<const N: usize>(a: &[u8; N], b: &[u8; N]) -> bool {
    a[..].ct_eq(&b[..]).into()
}
