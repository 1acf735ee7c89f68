use sysinfo::System;

pub fn format_ram_mb(ram_mb: u64) -> String {
    if ram_mb < 1024 { format!("{} MB", ram_mb) } else { format!("{:.1} GB", ram_mb as f64 / 1024.0) }
}

#[derive(Debug, Clone)]
pub struct HostInfo {
    pub os: String,
    pub cpu: String,
    pub total_mem_mb: u64,
}

pub fn host_info() -> HostInfo {
    let mut sys = System::new();
    sys.refresh_memory();
    sys.refresh_cpu_all();
    let os = System::name().unwrap_or_else(|| "Unknown OS".into());
    let os_ver = System::os_version().unwrap_or_default();
    let cpu = sys.cpus().first().map(|c| c.brand().to_string()).unwrap_or_else(|| "Unknown CPU".into());
    HostInfo { os: format!("{} {}", os, os_ver).trim().to_string(), cpu, total_mem_mb: sys.total_memory() / (1024 * 1024) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ram_switches_to_gb_at_1024_mb() {
        assert_eq!(format_ram_mb(512), "512 MB");
        assert_eq!(format_ram_mb(1023), "1023 MB");
        assert_eq!(format_ram_mb(1024), "1.0 GB");
        assert_eq!(format_ram_mb(16_384), "16.0 GB");
    }
}
