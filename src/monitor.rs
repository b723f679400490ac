//! @ai:module:intent Process memory and host information for benchmark samples
//! @ai:module:layer infrastructure
//! @ai:module:public_api SystemMonitor
//! @ai:module:stateless false

use crate::metrics::SystemInfo;

const KIB_PER_MIB: f64 = 1024.0;
const KIB_PER_GIB: f64 = 1024.0 * 1024.0;

/// @ai:intent Samples resident memory relative to a baseline
#[derive(Debug, Clone)]
pub struct SystemMonitor {
    baseline_memory_mb: f64,
}

impl SystemMonitor {
    /// @ai:intent Create a monitor, recording the current RSS as baseline
    /// @ai:effects fs:read
    pub fn new() -> Self {
        Self {
            baseline_memory_mb: Self::read_rss_mb(),
        }
    }

    pub fn baseline_memory_mb(&self) -> f64 {
        self.baseline_memory_mb
    }

    /// @ai:intent Current resident memory in MB
    /// @ai:post 0.0 where /proc is unavailable
    /// @ai:effects fs:read
    pub fn memory_usage_mb(&self) -> f64 {
        Self::read_rss_mb()
    }

    /// @ai:intent Describe the host
    /// @ai:effects fs:read
    pub fn system_info(&self) -> SystemInfo {
        let meminfo = std::fs::read_to_string("/proc/meminfo").unwrap_or_default();
        let gib = |key: &str| proc_field_kib(&meminfo, key).map_or(0.0, |kib| kib / KIB_PER_GIB);

        SystemInfo {
            platform: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            cpu_count: num_cpus::get(),
            total_memory: gib("MemTotal"),
            available_memory: gib("MemAvailable"),
            harness_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn read_rss_mb() -> f64 {
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|status| proc_field_kib(&status, "VmRSS"))
            .map_or(0.0, |kib| kib / KIB_PER_MIB)
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// @ai:intent Parse a "Key:   1234 kB" line from a /proc file
/// @ai:effects pure
fn proc_field_kib(content: &str, key: &str) -> Option<f64> {
    content.lines().find_map(|line| {
        let (name, rest) = line.split_once(':')?;
        if name.trim() != key {
            return None;
        }
        rest.split_whitespace().next()?.parse().ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMINFO: &str = "MemTotal:       16318480 kB\nMemFree:         1021840 kB\nMemAvailable:    8159240 kB\n";

    #[test]
    fn test_proc_field_parsing() {
        assert_eq!(proc_field_kib(MEMINFO, "MemTotal"), Some(16318480.0));
        assert_eq!(proc_field_kib(MEMINFO, "MemAvailable"), Some(8159240.0));
        assert_eq!(proc_field_kib(MEMINFO, "Mem"), None);
        assert_eq!(proc_field_kib("VmRSS:\n", "VmRSS"), None);
    }

    #[test]
    fn test_system_info_basics() {
        let info = SystemMonitor::new().system_info();
        assert!(info.cpu_count >= 1);
        assert_eq!(info.harness_version, env!("CARGO_PKG_VERSION"));
        assert!(info.total_memory >= info.available_memory);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_rss_is_reported_on_linux() {
        assert!(SystemMonitor::new().memory_usage_mb() > 0.0);
    }
}
