//! Shared defaults for the progress engines and the search host
//!
//! Default values used throughout the codebase to ensure consistency and
//! avoid magic numbers.

/// Cadence of the stage model's tick: 1 second
///
/// One tick advances the simulated clock by one second, so stage durations
/// are expressed in ticks.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Full-scale contribution of elapsed time to the simulated result count
pub const DEFAULT_RESULT_BASE: u32 = 15;

/// Simulated results added per completed stage
pub const DEFAULT_STAGE_BONUS: u32 = 2;

/// Exclusive upper bound of the random jitter added to the simulated count
pub const DEFAULT_JITTER_MAX: u32 = 5;

/// Delay between the completion signal and the host stopping both engines
///
/// Long enough for the dialog to visibly sit at 100% before it closes.
pub const DEFAULT_COMPLETION_GRACE_MS: u64 = 3000;

/// Platform label shown once the real search has completed
pub const COMPLETION_PLATFORM_LABEL: &str = "Search completed successfully";

/// Default search endpoint of the footprint backend
pub const DEFAULT_SEARCH_ENDPOINT: &str = "http://127.0.0.1:8001/search";

/// Request timeout for the search call
///
/// The backend answers synchronously after scanning every platform, which
/// routinely takes longer than the simulated 90 seconds.
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 300;

/// Results shown per page
pub const DEFAULT_RESULTS_PER_PAGE: usize = 25;

/// Pages shown on either side of the current page before an ellipsis
pub const PAGE_WINDOW_RADIUS: usize = 2;

/// Render refresh cadence of the CLI host
pub const RENDER_INTERVAL_MS: u64 = 250;
