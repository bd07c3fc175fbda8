//! Host identification for the startup banner.
//!
//! Each supported OS has its own detector; the first applicable one fills in
//! the processor name and clock speed. Anything that can't be read is left
//! at its "unknown" default: the banner is informational and never fails.

use std::num::NonZeroUsize;
use std::process::Command;

use crate::simd::width::LANE_BITS;
use crate::simd::SimdWidth;

const UNKNOWN_CPU: &str = "Unknown CPU";

/// What the banner reports about the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    pub processor_name: String,
    /// Current clock speed in MHz, when the OS exposes it.
    pub clock_speed_mhz: Option<u32>,
    pub cores: usize,
    pub host_name: String,
    pub os: String,
}

impl Default for PlatformInfo {
    fn default() -> Self {
        Self {
            processor_name: UNKNOWN_CPU.to_string(),
            clock_speed_mhz: None,
            cores: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            host_name: host_name(),
            os: format!("{} ({})", std::env::consts::OS, std::env::consts::ARCH),
        }
    }
}

impl PlatformInfo {
    /// Queries the host.
    pub fn detect() -> Self {
        let mut info = Self::default();

        match detectors().into_iter().find(|d| d.is_applicable()) {
            Some(detector) => detector.detect(&mut info),
            None => tracing::warn!(
                os = std::env::consts::OS,
                "no CPU detector for this platform"
            ),
        }

        info
    }

    /// `CPU: <name>, cores: <n>, speed: <mhz> MHz`
    pub fn cpu_line(&self) -> String {
        let speed = self
            .clock_speed_mhz
            .map_or_else(|| "unknown".to_string(), |mhz| mhz.to_string());

        format!(
            "CPU: {}, cores: {}, speed: {} MHz",
            self.processor_name, self.cores, speed
        )
    }
}

/// `CPU SIMD instructions present: <bool>`
pub fn simd_presence_line(width: &SimdWidth) -> String {
    format!(
        "CPU SIMD instructions present: {}",
        width.is_hardware_accelerated()
    )
}

/// `CPU SIMD length: 256 bits = 4 of f64 (64 bits each) via AVX`
pub fn simd_length_line(width: &SimdWidth) -> String {
    format!(
        "CPU SIMD length: {} bits = {} of f64 ({} bits each) via {}",
        width.bits(),
        width.lanes(),
        LANE_BITS,
        width.isa()
    )
}

trait CpuDetector {
    fn detect(&self, info: &mut PlatformInfo);
    fn is_applicable(&self) -> bool;
}

fn detectors() -> Vec<Box<dyn CpuDetector>> {
    vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
}

struct LinuxDetector;

impl CpuDetector for LinuxDetector {
    fn detect(&self, info: &mut PlatformInfo) {
        match std::fs::read_to_string("/proc/cpuinfo") {
            Ok(cpuinfo) => parse_cpuinfo(&cpuinfo, info),
            Err(err) => tracing::warn!(error = %err, "could not read /proc/cpuinfo"),
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

struct MacOSDetector;

impl CpuDetector for MacOSDetector {
    fn detect(&self, info: &mut PlatformInfo) {
        if let Some(name) = sysctl("machdep.cpu.brand_string") {
            info.processor_name = name;
        }

        // Not exposed on Apple silicon.
        info.clock_speed_mhz = sysctl("hw.cpufrequency")
            .and_then(|hz| hz.parse::<u64>().ok())
            .and_then(|hz| u32::try_from(hz / 1_000_000).ok())
            .filter(|&mhz| mhz > 0);
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

fn sysctl(key: &str) -> Option<String> {
    let output = Command::new("sysctl").args(["-n", key]).output();

    match output {
        Ok(output) if output.status.success() => {
            let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
            (!value.is_empty()).then_some(value)
        }
        Ok(_) => None,
        Err(err) => {
            tracing::warn!(key, error = %err, "sysctl failed");
            None
        }
    }
}

/// Fills processor name and clock from `/proc/cpuinfo` contents.
///
/// Every core repeats the same keys, so the last occurrence wins.
fn parse_cpuinfo(cpuinfo: &str, info: &mut PlatformInfo) {
    for line in cpuinfo.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim() {
            "model name" if !value.is_empty() => info.processor_name = value.to_string(),
            "cpu MHz" => {
                if let Some(mhz) = value.parse::<f64>().ok().filter(|mhz| *mhz > 0.0) {
                    info.clock_speed_mhz = Some(mhz.round() as u32);
                }
            }
            _ => {}
        }
    }
}

fn host_name() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .or_else(|| std::env::var("COMPUTERNAME").ok())
        .or_else(|| {
            std::fs::read_to_string("/etc/hostname")
                .ok()
                .map(|name| name.trim().to_string())
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "unknown host".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::Isa;

    const CPUINFO: &str = "\
processor\t: 0
vendor_id\t: GenuineIntel
model name\t: Intel(R) Core(TM) i7-8700 CPU @ 3.20GHz
cpu MHz\t\t: 3192.612
flags\t\t: fpu vme sse2 avx

processor\t: 1
model name\t: Intel(R) Core(TM) i7-8700 CPU @ 3.20GHz
cpu MHz\t\t: 3199.501
";

    #[test]
    fn test_parse_cpuinfo() {
        let mut info = PlatformInfo::default();
        parse_cpuinfo(CPUINFO, &mut info);

        assert_eq!(
            info.processor_name,
            "Intel(R) Core(TM) i7-8700 CPU @ 3.20GHz"
        );
        assert_eq!(info.clock_speed_mhz, Some(3200));
    }

    #[test]
    fn test_parse_cpuinfo_without_known_keys() {
        let mut info = PlatformInfo::default();
        parse_cpuinfo("processor\t: 0\nBogoMIPS\t: 48.00\ncpu MHz\t: 0.000\n", &mut info);

        assert_eq!(info.processor_name, UNKNOWN_CPU);
        assert_eq!(info.clock_speed_mhz, None);
    }

    #[test]
    fn test_cpu_line() {
        let info = PlatformInfo {
            processor_name: "Test CPU".to_string(),
            clock_speed_mhz: None,
            cores: 8,
            host_name: "bench-host".to_string(),
            os: "linux (x86_64)".to_string(),
        };

        assert_eq!(info.cpu_line(), "CPU: Test CPU, cores: 8, speed: unknown MHz");
    }

    #[test]
    fn test_simd_lines() {
        let width = SimdWidth::portable(4).unwrap();

        assert_eq!(
            simd_presence_line(&width),
            "CPU SIMD instructions present: false"
        );
        assert_eq!(
            simd_length_line(&width),
            "CPU SIMD length: 256 bits = 4 of f64 (64 bits each) via portable"
        );
    }

    #[test]
    fn test_simd_length_line_names_backend() {
        if let Some(avx) = SimdWidth::for_isa(Isa::Avx) {
            assert_eq!(
                simd_length_line(&avx),
                "CPU SIMD length: 256 bits = 4 of f64 (64 bits each) via AVX"
            );
        }

        for isa in [Isa::Sse2, Isa::Neon] {
            if let Some(width) = SimdWidth::for_isa(isa) {
                assert_eq!(
                    simd_length_line(&width),
                    format!("CPU SIMD length: 128 bits = 2 of f64 (64 bits each) via {isa}")
                );
            }
        }
    }

    #[test]
    fn test_detect_never_fails() {
        let info = PlatformInfo::detect();
        assert!(info.cores >= 1);
        assert!(!info.processor_name.is_empty());
    }
}
