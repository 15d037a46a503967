use thiserror::Error;

/// A single metric query that could not produce a snapshot.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("no disk mounted at {mount_point}")]
    MountNotFound { mount_point: String },

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("services command is empty")]
    EmptyCommand,

    #[error("metrics provider unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail setting `{0}` is not configured")]
    MissingSetting(&'static str),

    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Failures surfaced by jobs and menu actions. None of them is fatal.
#[derive(Debug, Error)]
pub enum HealthError {
    #[error("sampling failed: {0}")]
    Sampling(#[from] SampleError),

    #[error("mail delivery failed: {0}")]
    MailDelivery(#[from] MailError),

    #[error("job `{job}` panicked: {detail}")]
    IterationPanicked { job: String, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_error_messages_name_the_operation() {
        let err = SampleError::MountNotFound {
            mount_point: "/data".to_string(),
        };
        assert_eq!(err.to_string(), "no disk mounted at /data");
    }

    #[test]
    fn health_error_wraps_mail_error() {
        let err: HealthError = MailError::MissingSetting("smtp_server").into();
        assert_eq!(
            err.to_string(),
            "mail delivery failed: mail setting `smtp_server` is not configured"
        );
    }
}
