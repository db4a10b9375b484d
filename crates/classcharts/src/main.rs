use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use classcharts::models::Student;
use classcharts::reports::homework::DisplayDate;
use classcharts::reports::passthrough::PassThrough;
use classcharts::reports::{
    activity, announcements, attendance, detentions, homework, passthrough, pupils, timetable,
    DateRange, DEFAULT_DAYS,
};
use classcharts::{logging, ClassChartsError, Config, HttpTransport, Session};
use dialoguer::Select;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "classcharts", version, about = "Probe for ClassCharts data")]
struct Cli {
    /// Pupil to report on (1-based, as listed), instead of being asked
    #[arg(long, global = true)]
    pupil: Option<usize>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args, Debug, Clone, Copy)]
struct Window {
    /// Number of days to query
    #[arg(long, default_value_t = DEFAULT_DAYS)]
    days: u32,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Get student academic report
    #[command(name = "academicreport")]
    AcademicReport,
    /// Get activity for the last n days (default 30)
    Activity {
        #[command(flatten)]
        window: Window,
        /// Save data to activity.csv instead of printing a table
        #[arg(long)]
        csv: bool,
    },
    /// Get announcements
    Announcements,
    /// Get attendance
    Attendance {
        #[command(flatten)]
        window: Window,
    },
    /// Get badges
    Badges,
    /// Get behaviour for the last n days (default 30)
    Behaviour {
        #[command(flatten)]
        window: Window,
    },
    /// Get classes
    Classes,
    /// Get student custom fields
    #[command(name = "customfields")]
    CustomFields,
    /// Get detentions
    Detentions {
        /// Save data to detentions.csv instead of printing a table
        #[arg(long)]
        csv: bool,
    },
    /// Get homework for the last n days (default 30)
    Homework {
        #[command(flatten)]
        window: Window,
        /// Date the window applies to
        #[arg(long = "display_date", value_enum, default_value_t = DisplayDate::IssueDate)]
        display_date: DisplayDate,
        /// Number of the homework assignment to view
        #[arg(long)]
        number: Option<usize>,
    },
    /// Get timetable
    Timetable {
        /// Date to query (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_console_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err
                .downcast_ref::<ClassChartsError>()
                .is_some_and(ClassChartsError::is_auth_failure)
            {
                println!("Login failed. Please check your credentials and try again.");
            }
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let transport = HttpTransport::new()?;
    let mut session = Session::new(config, transport);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Attempting to log in as {}...", session.config().email)?;
    let login = session.authenticate()?;
    writeln!(
        out,
        "Hello {}! You have successfully logged in to ClassCharts.",
        login.name.as_deref().unwrap_or("there")
    )?;
    writeln!(out)?;

    let all_pupils = pupils::fetch(&mut session).context("Failed to list pupils")?;

    let Some(command) = cli.command else {
        pupils::write_list(&all_pupils, &mut out)?;
        return Ok(());
    };

    let pupil = pupils::select(all_pupils, cli.pupil, prompt_for_pupil)?;
    writeln!(
        out,
        "Selected pupil: {}, ID: {} ({})",
        pupil.student,
        pupil.id,
        pupil.student.school_name.as_deref().unwrap_or_default()
    )?;
    writeln!(out)?;

    let student_id = pupil.id;
    let today = Local::now().date_naive();

    match command {
        Command::AcademicReport => {
            pass_through(&mut session, student_id, PassThrough::AcademicReport, &mut out)?;
        }
        Command::Badges => {
            pass_through(&mut session, student_id, PassThrough::Badges, &mut out)?;
        }
        Command::Classes => {
            pass_through(&mut session, student_id, PassThrough::Classes, &mut out)?;
        }
        Command::CustomFields => {
            pass_through(&mut session, student_id, PassThrough::CustomFields, &mut out)?;
        }
        Command::Behaviour { window } => {
            let range = DateRange::last_days(window.days, today)?;
            pass_through(&mut session, student_id, PassThrough::Behaviour(range), &mut out)?;
        }
        Command::Activity { window, csv } => {
            let range = DateRange::last_days(window.days, today)?;
            let activities = activity::fetch(&mut session, student_id, range)
                .context("Failed to fetch activity")?;
            let output = if csv {
                activity::Output::Csv(Path::new(activity::CSV_FILE))
            } else {
                activity::Output::Table
            };
            activity::write(&activities, output, &mut out)?;
        }
        Command::Announcements => {
            let list = announcements::fetch(&mut session, student_id)
                .context("Failed to fetch announcements")?;
            announcements::write(&list, &mut out)?;
        }
        Command::Attendance { window } => {
            let range = DateRange::last_days(window.days, today)?;
            let response = attendance::fetch(&mut session, student_id, range)
                .context("Failed to fetch attendance")?;
            attendance::write(&response, &mut out)?;
        }
        Command::Detentions { csv } => {
            let list = detentions::fetch(&mut session, student_id)
                .context("Failed to fetch detentions")?;
            let csv_path = csv.then(|| Path::new(detentions::CSV_FILE));
            detentions::write(&list, csv_path, &mut out)?;
        }
        Command::Homework {
            window,
            display_date,
            number,
        } => {
            let range = DateRange::last_days(window.days, today)?;
            let list = homework::fetch(&mut session, student_id, range, display_date)
                .context("Failed to fetch homework")?;
            homework::write(list, number, &mut out)?;
        }
        Command::Timetable { date } => {
            let days = timetable::fetch(&mut session, student_id, date.unwrap_or(today))
                .context("Failed to fetch timetable")?;
            timetable::write(days, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn pass_through<W: Write>(
    session: &mut Session<HttpTransport>,
    student_id: u64,
    report: PassThrough,
    out: &mut W,
) -> Result<()> {
    let response = passthrough::fetch(session, student_id, report)
        .with_context(|| format!("Failed to fetch {}", report.label().to_lowercase()))?;
    passthrough::write(report, &response, out)?;
    Ok(())
}

/// Asks on the terminal which pupil to view; returns a 1-based number.
fn prompt_for_pupil(pupils: &[Student]) -> classcharts::Result<usize> {
    let items: Vec<String> = pupils.iter().map(pupils::label).collect();
    Select::new()
        .with_prompt("Select a pupil to view")
        .items(&items)
        .default(0)
        .interact()
        .map(|index| index + 1)
        .map_err(|e| ClassChartsError::Precondition {
            message: format!("no pupil selected: {e}"),
        })
}
