use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use sysinfo::{Disks, System};

use crate::config::GeneralConfig;
use crate::error::SampleError;

use super::services::list_running_services;
use super::snapshot::{CpuSnapshot, DiskSnapshot, MemorySnapshot, ServiceList};

/// Source of point-in-time host metrics. Every call samples afresh.
pub trait MetricsProvider: Send + Sync {
    fn disk(&self) -> Result<DiskSnapshot, SampleError>;
    fn memory(&self) -> Result<MemorySnapshot, SampleError>;
    fn cpu(&self) -> Result<CpuSnapshot, SampleError>;
    fn services(&self) -> Result<ServiceList, SampleError>;
}

pub struct SysinfoProvider {
    sys: Mutex<System>,
    mount_point: String,
    cpu_sample: Duration,
    services_command: Vec<String>,
}

impl SysinfoProvider {
    pub fn new(config: &GeneralConfig) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        SysinfoProvider {
            sys: Mutex::new(sys),
            mount_point: config.disk_mount_point.clone(),
            cpu_sample: Duration::from_millis(config.cpu_sample_ms)
                .max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
            services_command: config.services_command.clone(),
        }
    }

    fn with_system<T>(&self, f: impl FnOnce(&mut System) -> T) -> Result<T, SampleError> {
        let mut sys = self
            .sys
            .lock()
            .map_err(|_| SampleError::Unavailable("system handle poisoned".to_string()))?;
        Ok(f(&mut sys))
    }
}

impl MetricsProvider for SysinfoProvider {
    fn disk(&self) -> Result<DiskSnapshot, SampleError> {
        let disks = Disks::new_with_refreshed_list();
        let target = Path::new(&self.mount_point);
        let disk = disks
            .list()
            .iter()
            .find(|d| d.mount_point() == target)
            .ok_or_else(|| SampleError::MountNotFound {
                mount_point: self.mount_point.clone(),
            })?;

        Ok(DiskSnapshot::from_space(
            self.mount_point.clone(),
            disk.total_space(),
            disk.available_space(),
        ))
    }

    fn memory(&self) -> Result<MemorySnapshot, SampleError> {
        self.with_system(|sys| {
            sys.refresh_memory();
            MemorySnapshot::new(
                sys.total_memory(),
                sys.available_memory(),
                sys.used_memory(),
            )
        })
    }

    fn cpu(&self) -> Result<CpuSnapshot, SampleError> {
        // Usage is a delta between two refreshes taken across a window. A
        // private System keeps the shared one unlocked while we sleep.
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        std::thread::sleep(self.cpu_sample);
        sys.refresh_cpu_usage();
        Ok(CpuSnapshot {
            percent_used: f64::from(sys.global_cpu_usage()),
        })
    }

    fn services(&self) -> Result<ServiceList, SampleError> {
        list_running_services(&self.services_command)
    }
}
