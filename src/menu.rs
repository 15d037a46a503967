use std::io::{self, BufRead, Write};

use tracing::info;

use crate::action::Action;
use crate::app::{App, every_label};

pub const PROMPT: &str = "Enter your choice: ";

pub fn render_menu(interval_hours: u64) -> String {
    format!(
        "\nSystem Health Check Menu\n\
         1. Check Disk Usage\n\
         2. Monitor Running Services\n\
         3. Assess Memory Usage\n\
         4. Evaluate CPU Usage\n\
         5. Start Sending Reports {}\n\
         6. Exit\n",
        every_label(interval_hours)
    )
}

/// Shows the menu and dispatches one line at a time until the user exits
/// or input ends. Blocks on `input`.
pub fn run<R: BufRead, W: Write>(app: &mut App, mut input: R, mut out: W) -> io::Result<()> {
    let menu = render_menu(app.interval_hours());
    let mut line = String::new();

    while app.running {
        write!(out, "{menu}{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            info!("input closed, leaving menu");
            writeln!(out)?;
            app.running = false;
            break;
        }

        app.dispatch(Action::parse(&line), &mut out)?;
    }

    out.flush()
}
