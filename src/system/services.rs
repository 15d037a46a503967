use std::process::Command;

use crate::error::SampleError;

use super::snapshot::ServiceList;

/// Runs the service listing command and collects the unit names it prints.
pub fn list_running_services(command: &[String]) -> Result<ServiceList, SampleError> {
    let (program, args) = command.split_first().ok_or(SampleError::EmptyCommand)?;
    let display = command.join(" ");

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| SampleError::Spawn {
            command: display.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(SampleError::CommandFailed {
            command: display,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(parse_service_listing(&String::from_utf8_lossy(&output.stdout)))
}

/// Takes the first column of each row. Legend and footer lines from
/// `systemctl` (when `--no-legend` is not passed) are skipped.
pub fn parse_service_listing(stdout: &str) -> ServiceList {
    let names = stdout
        .lines()
        .map(|line| line.trim_start_matches(['●', '*', ' ']).trim())
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.split_whitespace().next())
        .filter(|unit| unit.contains('.') && *unit != "UNIT")
        .map(str::to_string)
        .collect();
    ServiceList { names }
}
