use std::fmt;

use crate::format::{format_gb, format_percent, percent_of};

#[derive(Debug, Clone, PartialEq)]
pub struct DiskSnapshot {
    pub mount_point: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub percent_used: f64,
}

impl DiskSnapshot {
    pub fn from_space(mount_point: impl Into<String>, total_bytes: u64, free_bytes: u64) -> Self {
        let used_bytes = total_bytes.saturating_sub(free_bytes);
        DiskSnapshot {
            mount_point: mount_point.into(),
            total_bytes,
            used_bytes,
            free_bytes,
            percent_used: percent_of(used_bytes, total_bytes),
        }
    }
}

impl fmt::Display for DiskSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Disk Usage:")?;
        writeln!(f, "Total: {}", format_gb(self.total_bytes))?;
        writeln!(f, "Used: {}", format_gb(self.used_bytes))?;
        writeln!(f, "Free: {}", format_gb(self.free_bytes))?;
        write!(f, "Percentage Used: {}", format_percent(self.percent_used))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemorySnapshot {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub used_bytes: u64,
    pub percent_used: f64,
}

impl MemorySnapshot {
    /// `percent_used` counts everything that is not available, matching how
    /// the kernel reports memory pressure.
    pub fn new(total_bytes: u64, available_bytes: u64, used_bytes: u64) -> Self {
        MemorySnapshot {
            total_bytes,
            available_bytes,
            used_bytes,
            percent_used: percent_of(total_bytes.saturating_sub(available_bytes), total_bytes),
        }
    }
}

impl fmt::Display for MemorySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Memory Usage:")?;
        writeln!(f, "Total: {}", format_gb(self.total_bytes))?;
        writeln!(f, "Available: {}", format_gb(self.available_bytes))?;
        writeln!(f, "Used: {}", format_gb(self.used_bytes))?;
        write!(f, "Percentage Used: {}", format_percent(self.percent_used))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuSnapshot {
    pub percent_used: f64,
}

impl fmt::Display for CpuSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CPU Usage: {}", format_percent(self.percent_used))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceList {
    pub names: Vec<String>,
}

impl ServiceList {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for ServiceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Running Services:")?;
        for name in &self.names {
            write!(f, "\n{name}")?;
        }
        Ok(())
    }
}
