//! Exit codes of `replay` and of generated replay programs.
//! An HTTP error status is a completed exchange and exits with `SUCCESS`.

pub const SUCCESS: i32 = 0;
pub const TRANSPORT_ERROR: i32 = 1; // Request could not be built or sent
pub const CONFIG_ERROR: i32 = 2; // Bad capture, generate failure, usage error
