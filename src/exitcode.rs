//! Standard Unix exit codes for the opsimate CLI.
//!
//! These codes follow the BSD convention where possible and tell scripts
//! whether the input, the referenced resource or the system was at fault.

/// Successful termination
pub const SUCCESS: i32 = 0;

/// Command line usage error - invalid arguments, ids or field values
pub const USAGE: i32 = 64;

/// Referenced tag or service does not exist
pub const NOT_FOUND: i32 = 66;

/// Internal failure, including a failing database or alert store
pub const FAILURE: i32 = 70;
