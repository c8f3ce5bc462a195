//! Process environment, identity and clock.

use hostfacts_core::ports::{HostEnvironment, HostError};
use sysinfo::System;

/// Reads the live process and host state.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostEnvironment;

impl SystemHostEnvironment {
    pub const fn new() -> Self {
        Self
    }
}

impl HostEnvironment for SystemHostEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn hostname(&self) -> Result<String, HostError> {
        System::host_name().ok_or_else(|| HostError::Query("host name unavailable".to_string()))
    }

    fn current_dir(&self) -> Result<String, HostError> {
        std::env::current_dir()
            .map(|dir| dir.display().to_string())
            .map_err(|e| HostError::Query(format!("current directory: {e}")))
    }

    #[cfg(unix)]
    fn uid(&self) -> Result<u32, HostError> {
        Ok(nix::unistd::getuid().as_raw())
    }

    #[cfg(not(unix))]
    fn uid(&self) -> Result<u32, HostError> {
        Err(HostError::Unsupported("uid"))
    }

    #[cfg(unix)]
    fn gid(&self) -> Result<u32, HostError> {
        Ok(nix::unistd::getgid().as_raw())
    }

    #[cfg(not(unix))]
    fn gid(&self) -> Result<u32, HostError> {
        Err(HostError::Unsupported("gid"))
    }

    #[cfg(unix)]
    fn effective_uid(&self) -> Result<u32, HostError> {
        Ok(nix::unistd::geteuid().as_raw())
    }

    #[cfg(not(unix))]
    fn effective_uid(&self) -> Result<u32, HostError> {
        Err(HostError::Unsupported("effective uid"))
    }

    fn uptime_secs(&self) -> u64 {
        System::uptime()
    }

    fn boot_time_secs(&self) -> u64 {
        System::boot_time()
    }
}
