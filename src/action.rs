#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CheckDisk,
    ListServices,
    CheckMemory,
    CheckCpu,
    ScheduleReports,
    Exit,
    Invalid(String),
}

impl Action {
    /// Maps one line of menu input, ignoring surrounding whitespace.
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => Action::CheckDisk,
            "2" => Action::ListServices,
            "3" => Action::CheckMemory,
            "4" => Action::CheckCpu,
            "5" => Action::ScheduleReports,
            "6" => Action::Exit,
            other => Action::Invalid(other.to_string()),
        }
    }
}
