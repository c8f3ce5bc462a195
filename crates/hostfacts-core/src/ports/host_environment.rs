//! Process environment, identity and clock port.

use super::HostError;

/// Read-only view of the current process and host.
///
/// All methods are cheap local queries; none of them spawn processes.
pub trait HostEnvironment: Send + Sync {
    /// An environment variable, `None` when unset or not valid UTF-8.
    fn var(&self, name: &str) -> Option<String>;

    /// Raw host name as reported by the kernel.
    fn hostname(&self) -> Result<String, HostError>;

    fn current_dir(&self) -> Result<String, HostError>;

    fn uid(&self) -> Result<u32, HostError>;

    fn gid(&self) -> Result<u32, HostError>;

    fn effective_uid(&self) -> Result<u32, HostError>;

    /// Seconds since boot.
    fn uptime_secs(&self) -> u64;

    /// Boot time as seconds since the Unix epoch.
    fn boot_time_secs(&self) -> u64;
}
