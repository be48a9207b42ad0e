use std::sync::LazyLock;

use derive_from_env::FromEnv;

#[derive(FromEnv)]
#[from_env(prefix = "HOSTLOG")]
#[allow(non_snake_case)]
pub struct HostLogConfig {
    /// Colour level names on the console.
    #[from_env(default = "false")]
    pub COLOR: bool,
    /// Treat every host as running without UI: no dialogs are opened.
    #[from_env(default = "false")]
    pub BATCH: bool,
    /// Report installed hosts as unavailable to auto-detection.
    #[from_env(default = "false")]
    pub NO_HOSTS: bool,
}

impl Default for HostLogConfig {
    fn default() -> Self {
        Self {
            COLOR: false,
            BATCH: false,
            NO_HOSTS: false,
        }
    }
}

/// Read once. A value that does not parse leaves every field at its default,
/// so a stray `HOSTLOG_*` variable can never stop loggers from being created.
pub static HOSTLOG_CONFIG: LazyLock<HostLogConfig> =
    LazyLock::new(|| HostLogConfig::from_env().unwrap_or_default());
