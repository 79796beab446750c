//! Compile-time interpreter limits.
//!
//! These mirror the fixed constants in the reference implementation
//! (`MAXSTR`, `MAXRECURSION`, `DEFAULT_ARRSIZE`) — scripts may rely on
//! them, so they are `const`s rather than runtime configuration.

/// Maximum size of a single token, variable, or general-purpose buffer.
pub const MAX_STR: usize = 4096;

/// Read buffers for file I/O are sized as a multiple of `MAX_STR`.
pub const READ_BUF_MULTIPLIER: usize = 64;

/// Number of buckets in an array's open-chain hash table.
pub const ARRAY_BUCKETS: usize = 16;

/// Maximum call-frame nesting depth before "too many nested evaluations".
#[cfg(windows)]
pub const MAX_RECURSION: usize = 75;
#[cfg(not(windows))]
pub const MAX_RECURSION: usize = 160;

/// Bounded length of the persisted shell history file (`picolsh` only).
pub const HISTORY_LEN: usize = 100;
