use std::fmt::Display;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, warn};

use crate::action::Action;
use crate::config::Config;
use crate::error::SampleError;
use crate::mail::MailSender;
use crate::report::ReportJob;
use crate::scheduler::{PeriodicScheduler, StartOutcome};
use crate::system::collector::MetricsProvider;

pub struct App {
    pub running: bool,
    provider: Arc<dyn MetricsProvider>,
    scheduler: PeriodicScheduler,
    report_job: Arc<ReportJob>,
    interval_hours: u64,
    interval: Duration,
}

impl App {
    pub fn new(
        config: &Config,
        provider: Arc<dyn MetricsProvider>,
        mailer: Arc<dyn MailSender>,
        scheduler: PeriodicScheduler,
    ) -> Self {
        let report_job = Arc::new(ReportJob::new(
            Arc::clone(&provider),
            mailer,
            config.mail.subject.clone(),
        ));
        let interval = config.schedule.interval();
        App {
            running: true,
            provider,
            scheduler,
            report_job,
            interval_hours: interval.as_secs() / 3600,
            interval,
        }
    }

    pub fn scheduler(&self) -> &PeriodicScheduler {
        &self.scheduler
    }

    pub fn interval_hours(&self) -> u64 {
        self.interval_hours
    }

    pub fn dispatch<W: Write>(&mut self, action: Action, out: &mut W) -> io::Result<()> {
        match action {
            Action::CheckDisk => print_check(out, "disk", self.provider.disk()),
            Action::ListServices => print_check(out, "services", self.provider.services()),
            Action::CheckMemory => print_check(out, "memory", self.provider.memory()),
            Action::CheckCpu => print_check(out, "cpu", self.provider.cpu()),
            Action::ScheduleReports => {
                let job = Arc::clone(&self.report_job);
                match self.scheduler.request_start(job, self.interval) {
                    StartOutcome::Started => writeln!(
                        out,
                        "Started sending reports {}...",
                        every_label(self.interval_hours).to_lowercase()
                    ),
                    StartOutcome::AlreadyScheduled => {
                        writeln!(out, "Reports are already scheduled.")
                    }
                }
            }
            Action::Exit => {
                self.running = false;
                writeln!(out, "Exiting the script.")
            }
            Action::Invalid(input) => {
                warn!(input = %input, "invalid menu choice");
                writeln!(out, "Invalid choice. Please select a valid option.")
            }
        }
    }
}

fn print_check<W: Write, T: Display>(
    out: &mut W,
    check: &str,
    result: Result<T, SampleError>,
) -> io::Result<()> {
    match result {
        Ok(snapshot) => writeln!(out, "{snapshot}"),
        Err(err) => {
            error!(check, error = %err, "one-shot check failed");
            Ok(())
        }
    }
}

pub fn every_label(hours: u64) -> String {
    if hours == 1 {
        "Every Hour".to_string()
    } else {
        format!("Every {hours} Hours")
    }
}
