// Small helpers shared by the provisioning steps.

// Recursive copy and delete.
pub mod file_operations;
// `~` expansion for user-supplied paths.
pub mod path_helpers;
// Per-platform capability table.
pub mod platform;
