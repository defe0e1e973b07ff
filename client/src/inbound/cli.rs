//! Command-line shell that drives the page controllers.
//!
//! Each subcommand mounts one page, feeds it the intents given on the
//! command line, and prints the resulting feedback and next route.

use std::path::{Path, PathBuf};
use std::time::Duration;

use cap_std::{ambient_authority, fs::Dir};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result, bail, eyre};

use super::pages::{
    DashboardPage, Feedback, FindMenteePage, FindMentorPage, LandingPage, LoginPage, Mount,
    MySessionsPage, NotificationsPage, PageContext, Route, SetAvailabilityPage, SignupPage,
    SubjectSelectionPage, Transition, UpdateProfilePage,
};
use crate::domain::{
    AvailabilitySlot, Email, NotificationId, ProfilePicture, Role, SessionRequestId, SignupForm,
    SlotField, StatusDecision, TimeRange,
};

/// `studierbridge` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "studierbridge",
    about = "Peer tutoring from the terminal: find mentors, request sessions, manage availability",
    version
)]
pub struct Cli {
    /// Backend base URL. Overrides `STUDIERBRIDGE_API_BASE_URL`.
    #[arg(long, global = true, value_name = "url")]
    pub api_base_url: Option<String>,
    /// Directory holding the saved session. Overrides `STUDIERBRIDGE_SESSION_DIR`.
    #[arg(long, global = true, value_name = "path")]
    pub session_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

/// One page interaction.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the subject catalogue.
    Landing {
        /// Search subjects across categories.
        #[arg(long)]
        search: Option<String>,
    },
    /// Create an account and sign in.
    Signup(SignupArgs),
    /// Sign in.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the saved session.
    Logout,
    /// Quick actions and the unread badge.
    Dashboard {
        /// Keep refreshing the unread count until interrupted.
        #[arg(long)]
        watch: bool,
    },
    /// List mentors.
    Mentors {
        /// Preferred subject for requests.
        #[arg(long)]
        subject: Option<String>,
    },
    /// Ask a mentor for a session.
    Request(RequestArgs),
    /// List mentees.
    Mentees,
    /// Show or change profile subjects.
    Subjects {
        /// Subjects to add or remove; the selection is saved when any are given.
        #[arg(long = "toggle", value_name = "subject")]
        toggles: Vec<String>,
    },
    /// List sessions involving you.
    Sessions,
    /// Accept or decline a pending request.
    Respond {
        /// Session identifier.
        id: String,
        #[arg(value_enum)]
        decision: Decision,
    },
    /// Show notifications.
    Notifications {
        /// Mark one notification read.
        #[arg(long, value_name = "id")]
        open: Option<String>,
        /// Mark everything read.
        #[arg(long, conflicts_with = "open")]
        all: bool,
    },
    /// Show or edit availability.
    Availability(AvailabilityArgs),
    /// Show or edit profile details.
    Profile(ProfileArgs),
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Decision {
    Accept,
    Decline,
}

impl From<Decision> for StatusDecision {
    fn from(value: Decision) -> Self {
        match value {
            Decision::Accept => Self::Accept,
            Decision::Decline => Self::Decline,
        }
    }
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub role: Role,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub grade: String,
    #[arg(long)]
    pub school: String,
    #[arg(long)]
    pub zip_code: String,
}

#[derive(Debug, Args)]
pub struct RequestArgs {
    /// Mentor email.
    #[arg(long)]
    pub mentor: String,
    #[arg(long)]
    pub subject: Option<String>,
    /// Date from the mentor's availability, `YYYY-MM-DD`.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Window from the mentor's availability, `HH:MM-HH:MM`.
    #[arg(long)]
    pub time: Option<TimeRange>,
    #[arg(long, default_value = "")]
    pub message: String,
}

#[derive(Debug, Args)]
pub struct AvailabilityArgs {
    /// Slot to add, `YYYY-MM-DD@HH:MM-HH:MM`.
    #[arg(long = "add", value_name = "slot", value_parser = parse_slot)]
    pub add: Vec<(NaiveDate, TimeRange)>,
    /// Position (from 1) of a slot to remove.
    #[arg(long = "remove", value_name = "position")]
    pub remove: Vec<usize>,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub grade: Option<String>,
    #[arg(long)]
    pub role: Option<Role>,
    #[arg(long)]
    pub new_password: Option<String>,
    #[arg(long)]
    pub confirm_password: Option<String>,
    /// Image to upload as the profile picture.
    #[arg(long, value_name = "path")]
    pub picture: Option<PathBuf>,
}

fn parse_slot(raw: &str) -> Result<(NaiveDate, TimeRange), String> {
    let (date, time) = raw
        .split_once('@')
        .ok_or_else(|| format!("expected YYYY-MM-DD@HH:MM-HH:MM, got {raw:?}"))?;
    let date = date
        .parse::<NaiveDate>()
        .map_err(|e| format!("invalid date {date:?}: {e}"))?;
    let time = time.parse::<TimeRange>().map_err(|e| e.to_string())?;
    Ok((date, time))
}

/// Run `command` against `ctx`.
pub async fn run(command: Command, ctx: PageContext, poll_interval: Duration) -> Result<()> {
    match command {
        Command::Landing { search } => landing(search),
        Command::Signup(args) => signup(ctx, args).await,
        Command::Login { email, password } => {
            let mut page = LoginPage::new(ctx);
            page.set_email(email);
            page.set_password(password);
            let next = page.submit().await;
            report(page.feedback(), &next)
        }
        Command::Logout => report(None, &ctx.logout()),
        Command::Dashboard { watch } => dashboard(ctx, watch, poll_interval).await,
        Command::Mentors { subject } => {
            let mut page = ready(FindMentorPage::mount(ctx, subject))?;
            let next = page.load().await;
            for mentor in page.mentors() {
                println!(
                    "{} <{}> grade {} | {}",
                    mentor.name,
                    mentor.email,
                    mentor.grade,
                    mentor.subjects.join(", ")
                );
            }
            report(page.feedback(), &next)
        }
        Command::Request(args) => request(ctx, args).await,
        Command::Mentees => {
            let mut page = ready(FindMenteePage::mount(ctx))?;
            let next = page.load().await;
            for mentee in page.mentees() {
                println!("{} <{}> grade {} | {}", mentee.name, mentee.email, mentee.grade, mentee.school);
            }
            report(page.feedback(), &next)
        }
        Command::Subjects { toggles } => subjects(ctx, toggles).await,
        Command::Sessions => sessions(ctx).await,
        Command::Respond { id, decision } => {
            let mut page = ready(MySessionsPage::mount(ctx))?;
            let next = match page.load().await {
                Transition::Stay => {
                    page.respond(&SessionRequestId::new(id), decision.into())
                        .await
                }
                other => other,
            };
            report(page.feedback(), &next)
        }
        Command::Notifications { open, all } => notifications(ctx, open, all).await,
        Command::Availability(args) => availability(ctx, args).await,
        Command::Profile(args) => profile(ctx, args).await,
    }
}

fn ready<P>(mount: Mount<P>) -> Result<P> {
    match mount {
        Mount::Ready(page) => Ok(page),
        Mount::Redirect(route) => Err(eyre!(
            "not signed in; run `studierbridge login` first ({})",
            route.path()
        )),
    }
}

fn report(feedback: Option<&Feedback>, next: &Transition) -> Result<()> {
    if let Some(Feedback::Success(text)) = feedback {
        println!("{text}");
    }
    if let Some(route) = next.route() {
        println!("-> {}", route.path());
    }
    match feedback {
        Some(Feedback::Error(text)) => bail!("{text}"),
        _ => Ok(()),
    }
}

fn landing(search: Option<String>) -> Result<()> {
    let mut page = LandingPage::new();
    println!("{}", LandingPage::tagline(0));
    match search {
        Some(query) => {
            page.set_query(query);
            for found in page.search_results() {
                println!("{} ({})", found.subject, found.category);
            }
        }
        None => {
            for (category, subjects) in page.categories() {
                println!("{category}: {}", subjects.join(", "));
            }
        }
    }
    page.unmount();
    Ok(())
}

async fn signup(ctx: PageContext, args: SignupArgs) -> Result<()> {
    let mut page = SignupPage::new(ctx);
    page.choose_role(args.role);
    *page.form_mut() = SignupForm {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        password: args.password,
        grade: args.grade,
        school: args.school,
        zip_code: args.zip_code,
    };
    let next = page.submit().await;
    report(page.feedback(), &next)
}

async fn dashboard(ctx: PageContext, watch: bool, poll_interval: Duration) -> Result<()> {
    let mut page = ready(DashboardPage::mount(ctx))?;
    println!("Welcome, {} ({})", page.user().name, page.user().role.label());
    for action in page.quick_actions() {
        println!("  {:<16} {}", action.label(), action.route().path());
    }

    let mut updates = page.unread_updates();
    let mut transitions = page.transition_updates();
    page.start_polling(poll_interval);
    if let Ok(Ok(())) = tokio::time::timeout(poll_interval, updates.changed()).await {
        println!("Unread notifications: {}", page.unread_count());
    }
    if watch {
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                changed = transitions.changed() => {
                    if changed.is_err() || page.transition() != Transition::Stay {
                        break;
                    }
                }
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    println!("Unread notifications: {}", page.unread_count());
                }
            }
        }
    }
    let next = page.transition();
    page.unmount().await;
    if next != Transition::Stay {
        report(None, &next)?;
        bail!("session expired; please log in again");
    }
    Ok(())
}

async fn request(ctx: PageContext, args: RequestArgs) -> Result<()> {
    let mentor = Email::new(&args.mentor).wrap_err("invalid mentor email")?;
    let mut page = ready(FindMentorPage::mount(ctx, args.subject.clone()))?;
    if let next @ Transition::Navigate(_) = page.load().await {
        return report(page.feedback(), &next);
    }
    if let next @ Transition::Navigate(_) = page.open_request(&mentor).await {
        return report(page.feedback(), &next);
    }
    if page.request().is_none() {
        return report(page.feedback(), &Transition::Stay);
    }
    let Some(form) = page.request_mut() else {
        return Ok(());
    };

    if let Some(subject) = &args.subject {
        form.select_subject(subject)
            .map_err(|e| eyre!("{}", e.message()))?;
    }
    form.set_message(args.message);
    if form.has_availability() {
        for option in form.date_options() {
            println!("available: {}", option.label);
        }
        if let Some(date) = args.date {
            form.select_date(date).map_err(|e| eyre!("{}", e.message()))?;
            for time in form.time_options() {
                println!("  {date}: {time}");
            }
        }
        if let Some(time) = args.time {
            form.select_time(time).map_err(|e| eyre!("{}", e.message()))?;
        }
    } else {
        println!("Mentor has not set availability; a time will be coordinated later.");
    }

    let next = page.submit_request().await;
    report(page.feedback(), &next)
}

async fn subjects(ctx: PageContext, toggles: Vec<String>) -> Result<()> {
    let mut page = ready(SubjectSelectionPage::mount(ctx))?;
    if toggles.is_empty() {
        println!("{}", page.prompt());
        for option in page.options() {
            let mark = if page.selection().contains(option) { "x" } else { " " };
            println!("[{mark}] {option}");
        }
        return Ok(());
    }
    for subject in &toggles {
        page.toggle(subject);
    }
    let next = page.save().await;
    report(page.feedback(), &next)
}

async fn sessions(ctx: PageContext) -> Result<()> {
    let mut page = ready(MySessionsPage::mount(ctx))?;
    let next = page.load().await;
    for view in page.sessions() {
        let schedule = view.schedule.as_deref().unwrap_or("time to be arranged");
        let respond = if view.can_respond { " [accept/decline]" } else { "" };
        println!(
            "{} {} with {}: {} ({}){respond}",
            view.id, view.subject, view.counterpart, view.status, schedule
        );
    }
    let upcoming = page.upcoming();
    if !upcoming.is_empty() {
        println!("Upcoming:");
        for view in upcoming {
            println!("  {} {}", view.subject, view.schedule.unwrap_or_default());
        }
    }
    report(page.feedback(), &next)
}

async fn notifications(ctx: PageContext, open: Option<String>, all: bool) -> Result<()> {
    let mut page = ready(NotificationsPage::mount(ctx))?;
    let mut next = page.load().await;
    if next == Transition::Stay {
        if let Some(id) = open {
            next = page.open(&NotificationId::new(id)).await;
        } else if all {
            next = page.mark_all_read().await;
        }
    }
    println!("{}", page.headline());
    for item in page.notifications() {
        let flag = if item.read { " " } else { "*" };
        println!("{flag} {} [{}] {}", item.id, item.kind.label(), item.message);
    }
    report(page.feedback(), &next)
}

async fn availability(ctx: PageContext, args: AvailabilityArgs) -> Result<()> {
    let mut page = ready(SetAvailabilityPage::mount(ctx))?;
    if let next @ Transition::Navigate(_) = page.load().await {
        return report(page.feedback(), &next);
    }

    let edited = !args.add.is_empty() || !args.remove.is_empty();
    let mut positions = args.remove;
    positions.sort_unstable_by(|a, b| b.cmp(a));
    for position in positions {
        page.remove_slot(position.saturating_sub(1));
        if let Some(Feedback::Error(text)) = page.feedback() {
            bail!("{text}");
        }
    }
    for (date, time) in args.add {
        page.add_slot();
        let index = page.slots().len().saturating_sub(1);
        page.update_slot(index, SlotField::Date(date));
        page.update_slot(index, SlotField::Start(time.start));
        page.update_slot(index, SlotField::End(time.end));
        if let Some(Feedback::Error(text)) = page.feedback() {
            bail!("{text}");
        }
    }

    print_slots(page.slots());
    if !edited {
        return Ok(());
    }
    let next = page.save().await;
    report(page.feedback(), &next)
}

fn print_slots(slots: &[AvailabilitySlot]) {
    for (position, slot) in slots.iter().enumerate() {
        println!("{:>2}. {} {}", position + 1, slot.date, slot.time_range());
    }
}

async fn profile(ctx: PageContext, args: ProfileArgs) -> Result<()> {
    let mut page = ready(UpdateProfilePage::mount(ctx))?;
    if let next @ Transition::Navigate(_) = page.load().await {
        return report(page.feedback(), &next);
    }
    let edited = args.name.is_some()
        || args.grade.is_some()
        || args.role.is_some()
        || args.new_password.is_some()
        || args.picture.is_some();
    if !edited {
        let user = page.user();
        println!("{} <{}>", user.name, user.email);
        println!("role: {} | grade: {}", user.role.label(), user.grade);
        if let Some(url) = &user.profile_picture_url {
            println!("picture: {url}");
        }
        return Ok(());
    }
    let form = page.form_mut();
    if let Some(name) = args.name {
        form.name = name;
    }
    if let Some(grade) = args.grade {
        form.grade = grade;
    }
    if args.role.is_some() {
        form.role = args.role;
    }
    form.new_password = args.new_password.unwrap_or_default();
    form.confirm_password = args.confirm_password.unwrap_or_default();
    if let Some(path) = &args.picture {
        page.set_picture(Some(read_picture(path)?));
    }
    let next = page.save().await;
    report(page.feedback(), &next)
}

fn read_picture(path: &Path) -> Result<ProfilePicture> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| eyre!("picture path has no file name: {}", path.display()))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .wrap_err_with(|| format!("open {}", parent.display()))?;
    let bytes = dir
        .read(name)
        .wrap_err_with(|| format!("read {}", path.display()))?;
    Ok(ProfilePicture::from_file(name.to_string_lossy(), bytes))
}

#[cfg(test)]
mod tests {
    //! Argument parsing coverage.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn slots_parse_from_date_and_window() {
        let (date, time) = parse_slot("2025-06-01@09:00-10:00").expect("valid slot");
        assert_eq!(date.to_string(), "2025-06-01");
        assert_eq!(time.to_string(), "09:00-10:00");
        assert!(parse_slot("2025-06-01 09:00").is_err());
    }

    #[rstest]
    fn request_arguments_parse() {
        let cli = Cli::try_parse_from([
            "studierbridge",
            "request",
            "--mentor",
            "mentor@example.org",
            "--subject",
            "Algebra",
            "--date",
            "2025-06-01",
            "--time",
            "09:00-10:00",
        ])
        .expect("parses");
        let Command::Request(args) = cli.command else {
            panic!("expected request command");
        };
        assert_eq!(args.subject.as_deref(), Some("Algebra"));
        assert_eq!(args.time.map(|t| t.to_string()).as_deref(), Some("09:00-10:00"));
    }

    #[rstest]
    fn respond_takes_a_decision() {
        let cli = Cli::try_parse_from(["studierbridge", "respond", "s1", "decline"]).expect("parses");
        assert!(matches!(
            cli.command,
            Command::Respond { decision: Decision::Decline, .. }
        ));
    }

    #[rstest]
    fn redirects_become_errors() {
        assert!(ready::<()>(Mount::Redirect(Route::Login)).is_err());
    }
}
