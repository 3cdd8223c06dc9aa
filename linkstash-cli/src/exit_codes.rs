//! Process exit codes used by the linkstash CLI

/// Successful completion, including help output.
pub const EXIT_SUCCESS: i32 = 0;

/// Recoverable condition: the invocation was incomplete but no damage was
/// done (e.g. no subcommand given, usage displayed).
pub const EXIT_WARNING: i32 = 1;

/// Fatal error: malformed catalog, usage error, or failed request
/// composition.
pub const EXIT_ERROR: i32 = 2;
