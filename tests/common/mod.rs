#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use healthcheck::error::{MailError, SampleError};
use healthcheck::mail::MailSender;
use healthcheck::system::collector::MetricsProvider;
use healthcheck::system::snapshot::{CpuSnapshot, DiskSnapshot, MemorySnapshot, ServiceList};

pub const GIB: u64 = 1024 * 1024 * 1024;

/// Provider with canned snapshots; each section can be switched to fail.
#[derive(Default)]
pub struct FakeProvider {
    pub fail_disk: bool,
    pub fail_memory: bool,
    pub fail_cpu: bool,
    pub fail_services: bool,
    pub calls: AtomicUsize,
}

impl FakeProvider {
    pub fn failing(disk: bool, memory: bool, cpu: bool, services: bool) -> Self {
        FakeProvider {
            fail_disk: disk,
            fail_memory: memory,
            fail_cpu: cpu,
            fail_services: services,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn sample<T>(&self, fail: bool, what: &str, value: T) -> Result<T, SampleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if fail {
            Err(SampleError::Unavailable(format!("{what} offline")))
        } else {
            Ok(value)
        }
    }
}

impl MetricsProvider for FakeProvider {
    fn disk(&self) -> Result<DiskSnapshot, SampleError> {
        self.sample(
            self.fail_disk,
            "disk",
            DiskSnapshot::from_space("/", 100 * GIB, 60 * GIB),
        )
    }

    fn memory(&self) -> Result<MemorySnapshot, SampleError> {
        self.sample(
            self.fail_memory,
            "memory",
            MemorySnapshot::new(16 * GIB, 8 * GIB, 6 * GIB),
        )
    }

    fn cpu(&self) -> Result<CpuSnapshot, SampleError> {
        self.sample(self.fail_cpu, "cpu", CpuSnapshot { percent_used: 12.5 })
    }

    fn services(&self) -> Result<ServiceList, SampleError> {
        self.sample(
            self.fail_services,
            "services",
            ServiceList {
                names: vec!["cron.service".to_string(), "ssh.service".to_string()],
            },
        )
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    pub fail: bool,
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl MailSender for RecordingMailer {
    fn send(&self, subject: &str, body: &str) -> Result<(), MailError> {
        self.sent
            .lock()
            .unwrap()
            .push((subject.to_string(), body.to_string()));
        if self.fail {
            Err(MailError::MissingSetting("smtp_server"))
        } else {
            Ok(())
        }
    }
}
