/// Environment variable names consulted when building the default
/// logger configuration.
///
/// These are purely helpers; the core pipeline types remain decoupled
/// from environment access.

/// Machine name stamped on records when the configuration leaves it
/// unset.
pub const MACHINE_NAME_ENV: &str = "HOSTNAME";

/// Username fallbacks used by the default username source.
pub const USER_ENV: &str = "USER";
pub const USERNAME_ENV: &str = "USERNAME";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Best-effort name of the current executable, empty when unknown.
pub fn current_process_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_default()
}
