use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::{HealthError, SampleError};
use crate::mail::MailSender;
use crate::scheduler::Job;
use crate::system::collector::MetricsProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Disk,
    Memory,
    Cpu,
    Services,
}

impl SectionKind {
    /// Report order.
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Disk,
        SectionKind::Memory,
        SectionKind::Cpu,
        SectionKind::Services,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Disk => "Disk Usage",
            SectionKind::Memory => "Memory Usage",
            SectionKind::Cpu => "CPU Usage",
            SectionKind::Services => "Running Services",
        }
    }

    fn sample(self, provider: &dyn MetricsProvider) -> Result<String, SampleError> {
        match self {
            SectionKind::Disk => provider.disk().map(|s| s.to_string()),
            SectionKind::Memory => provider.memory().map(|s| s.to_string()),
            SectionKind::Cpu => provider.cpu().map(|s| s.to_string()),
            SectionKind::Services => provider.services().map(|s| s.to_string()),
        }
    }
}

#[derive(Debug)]
pub struct Section {
    pub kind: SectionKind,
    pub outcome: Result<String, SampleError>,
}

impl Section {
    pub fn render(&self) -> String {
        match &self.outcome {
            Ok(text) => text.clone(),
            Err(err) => format!("{}: unavailable ({err})", self.kind.title()),
        }
    }
}

#[derive(Debug)]
pub struct Report {
    pub sections: Vec<Section>,
}

impl Report {
    /// Samples every section in order. A failing section is logged and kept
    /// as an error so the rest of the report still goes out.
    pub fn collect(provider: &dyn MetricsProvider) -> Self {
        let sections = SectionKind::ALL
            .into_iter()
            .map(|kind| {
                let outcome = kind.sample(provider);
                if let Err(err) = &outcome {
                    error!(section = kind.title(), error = %err, "sampling failed");
                }
                Section { kind, outcome }
            })
            .collect();
        Report { sections }
    }

    pub fn failed_sections(&self) -> usize {
        self.sections.iter().filter(|s| s.outcome.is_err()).count()
    }

    pub fn text(&self) -> String {
        self.sections
            .iter()
            .map(Section::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Samples the host and mails the rendered report.
pub struct ReportJob {
    provider: Arc<dyn MetricsProvider>,
    mailer: Arc<dyn MailSender>,
    subject: String,
}

impl ReportJob {
    pub fn new(
        provider: Arc<dyn MetricsProvider>,
        mailer: Arc<dyn MailSender>,
        subject: impl Into<String>,
    ) -> Self {
        ReportJob {
            provider,
            mailer,
            subject: subject.into(),
        }
    }

    pub fn build_report(&self) -> Report {
        Report::collect(self.provider.as_ref())
    }
}

impl Job for ReportJob {
    fn name(&self) -> &str {
        "health-report"
    }

    fn run(&self) -> Result<(), HealthError> {
        let report = self.build_report();
        debug!(
            failed_sections = report.failed_sections(),
            "report generated"
        );
        self.mailer.send(&self.subject, &report.text())?;
        info!(subject = %self.subject, "health report delivered");
        Ok(())
    }
}
