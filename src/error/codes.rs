/// Error code registry for fnkit
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Path update errors
/// - 3000-3999: Stage (user function) errors
/// - 4000-4999: Scheduler errors
/// - 9000-9999: Other errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_YAML: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;

    // Path update errors (2000-2999)
    pub const PATH_NOT_INDEXABLE: u16 = 2001;
    pub const PATH_MISSING_KEY: u16 = 2002;
    pub const PATH_INDEX_OUT_OF_BOUNDS: u16 = 2003;
    pub const PATH_KEY_KIND_MISMATCH: u16 = 2004;

    // Stage errors (3000-3999)
    pub const STAGE_FAILED: u16 = 3000;

    // Scheduler errors (4000-4999)
    pub const SCHEDULER_UNAVAILABLE: u16 = 4000;

    // Other errors (9000-9999)
    pub const OTHER_GENERIC: u16 = 9000;
    pub const OTHER_INVALID_INPUT: u16 = 9001;
}
