//! Terminal front end.
//!
//! With no subcommand, runs an interactive loop that renders the current
//! view and reads one command per line. The subcommands run a single step
//! against the same store, so a session created by `signup` or `login` is
//! picked up by later invocations.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;
use vitalsense::app::{Action, App, AppContext, AppError, Effect, StartupError, View};
use vitalsense::assessment::Decision;
use vitalsense::auth::SignupForm;
use vitalsense::config::{Config, ConfigError, validate_url};
use vitalsense::recommendation::ResultBody;
use vitalsense::store::StoreError;
use vitalsense::vitals::{FieldValue, Section, VitalField, VitalsError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{}", .0.user_message())]
    App(#[from] AppError),
    #[error(transparent)]
    Vitals(#[from] VitalsError),
    #[error("expected `field=value`, got `{0}`")]
    InvalidAssignment(String),
    #[error("not logged in; run `vitalsense login` first")]
    NotLoggedIn,
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "vitalsense", about = "Anxiety self-assessment from lifestyle and vitals")]
struct Cli {
    /// Directory holding the account and session store.
    #[arg(long, env = "VITALSENSE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[arg(long, env = "VITALSENSE_PREDICT_URL")]
    predict_url: Option<String>,

    #[arg(long, env = "VITALSENSE_REFERRAL_URL")]
    referral_url: Option<String>,

    /// Simulated latency of login and signup.
    #[arg(long)]
    auth_delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive session (default).
    Run,
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to `--password`.
        #[arg(long)]
        confirm_password: Option<String>,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Whoami,
    /// List assessment fields with their ranges and defaults.
    Fields,
    /// Submit one assessment for the logged-in user.
    Assess {
        /// Override a field, e.g. `--set heartRate=92`. Repeatable.
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        sets: Vec<String>,

        /// Answer the result prompt: yes or no.
        #[arg(long)]
        decide: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!(data_dir = %config.data_dir.display(), predict_url = %config.predict_url, "starting");

    let mut app = App::start(AppContext::from_config(&config)?)?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => run_interactive(&mut app).await,
        Command::Signup { name, email, password, confirm_password } => {
            let confirm_password = confirm_password.unwrap_or_else(|| password.clone());
            app.dispatch(Action::ShowSignup).await?;
            app.dispatch(Action::Signup(SignupForm { name, email, password, confirm_password }))
                .await?;
            run_whoami(&app)
        }
        Command::Login { email, password } => {
            app.dispatch(Action::Login { email, password }).await?;
            run_whoami(&app)
        }
        Command::Logout => {
            if app.session().is_some() {
                app.dispatch(Action::Logout).await?;
            }
            println!("Logged out.");
            Ok(())
        }
        Command::Whoami => run_whoami(&app),
        Command::Fields => {
            print_fields(&app);
            Ok(())
        }
        Command::Assess { sets, decide } => run_assess(&mut app, &sets, decide.as_deref()).await,
    }
}

fn load_config(cli: &Cli) -> Result<Config, CliError> {
    let mut config = Config::from_env()?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir.clone_from(dir);
    }
    if let Some(url) = &cli.predict_url {
        config.predict_url = validate_url("--predict-url", url)?;
    }
    if let Some(url) = &cli.referral_url {
        config.referral_url = validate_url("--referral-url", url)?;
    }
    if let Some(ms) = cli.auth_delay_ms {
        config.auth_delay = Duration::from_millis(ms);
    }
    Ok(config)
}

// =============================================================================
// ONE-SHOT COMMANDS
// =============================================================================

fn run_whoami(app: &App) -> Result<(), CliError> {
    let session = app.session().ok_or(CliError::NotLoggedIn)?;
    println!("{} <{}>, logged in at {}", session.name, session.email, session.login_time);
    Ok(())
}

async fn run_assess(app: &mut App, sets: &[String], decide: Option<&str>) -> Result<(), CliError> {
    if app.view() != View::VitalsForm {
        return Err(CliError::NotLoggedIn);
    }

    for assignment in sets {
        let (key, raw) = assignment
            .split_once('=')
            .ok_or_else(|| CliError::InvalidAssignment(assignment.clone()))?;
        let (field, value) = parse_assignment(key, raw)?;
        app.dispatch(Action::UpdateField { field, value }).await?;
    }

    submit(app).await?;
    if let Some(answer) = decide {
        let decision = parse_decision(answer).ok_or_else(|| CliError::InvalidAssignment(answer.to_owned()))?;
        let effect = app.dispatch(Action::Decide(decision)).await?;
        apply_effect(&effect);
    }
    render(app);
    Ok(())
}

// =============================================================================
// INTERACTIVE LOOP
// =============================================================================

struct Terminal {
    lines: Lines<BufReader<Stdin>>,
}

impl Terminal {
    fn new() -> Self {
        Self { lines: BufReader::new(tokio::io::stdin()).lines() }
    }

    /// Print `label` and read one line. `None` at end of input.
    async fn prompt(&mut self, label: &str) -> Result<Option<String>, CliError> {
        print!("{label}");
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?.map(|l| l.trim().to_owned()))
    }
}

async fn run_interactive(app: &mut App) -> Result<(), CliError> {
    let mut term = Terminal::new();
    render(app);

    loop {
        let Some(line) = term.prompt("> ").await? else {
            return Ok(());
        };
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let rest: Vec<&str> = words.collect();

        let result = match (app.view(), command) {
            (_, "quit" | "exit") => return Ok(()),
            (_, "help") => {
                print_help(app.view());
                continue;
            }
            (View::Login, "login") => {
                let Some(email) = term.prompt("Email: ").await? else { return Ok(()) };
                let Some(password) = term.prompt("Password: ").await? else { return Ok(()) };
                app.dispatch(Action::Login { email, password }).await.map(|_| ())
            }
            (View::Login, "signup") => app.dispatch(Action::ShowSignup).await.map(|_| ()),
            (View::Signup, "back") => app.dispatch(Action::ShowLogin).await.map(|_| ()),
            (View::Signup, "create") => {
                let Some(form) = read_signup_form(&mut term).await? else { return Ok(()) };
                app.dispatch(Action::Signup(form)).await.map(|_| ())
            }
            (View::VitalsForm, "set") => match rest.as_slice() {
                [key, raw] => match parse_assignment(key, raw) {
                    Ok((field, value)) => app.dispatch(Action::UpdateField { field, value }).await.map(|_| ()),
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                },
                _ => {
                    println!("usage: set <field> <value>");
                    continue;
                }
            },
            (View::VitalsForm, "submit") => submit(app).await,
            (View::Result(_), "yes" | "no") => {
                let decision = if command == "yes" { Decision::Yes } else { Decision::No };
                app.dispatch(Action::Decide(decision)).await.map(|effect| apply_effect(&effect))
            }
            (View::VitalsForm | View::Result(_), "reset") => app.dispatch(Action::Reset).await.map(|_| ()),
            (View::VitalsForm | View::Result(_), "logout") => app.dispatch(Action::Logout).await.map(|_| ()),
            (View::VitalsForm, "fields") => {
                print_fields(app);
                continue;
            }
            (view, other) => {
                println!("unknown command `{other}` on the {view} view; type `help`");
                continue;
            }
        };

        if let Err(e) = result {
            report(&e);
        }
        render(app);
    }
}

async fn read_signup_form(term: &mut Terminal) -> Result<Option<SignupForm>, CliError> {
    let Some(name) = term.prompt("Name: ").await? else { return Ok(None) };
    let Some(email) = term.prompt("Email: ").await? else { return Ok(None) };
    let Some(password) = term.prompt("Password: ").await? else { return Ok(None) };
    let Some(confirm_password) = term.prompt("Confirm password: ").await? else { return Ok(None) };
    Ok(Some(SignupForm { name, email, password, confirm_password }))
}

/// Submit in two halves so the loading view is shown while the request is
/// in flight.
async fn submit(app: &mut App) -> Result<(), AppError> {
    let input = app.begin_submit()?;
    render(app);
    let predictor = app.context().predictor.clone();
    let outcome = predictor.predict(&input).await;
    app.complete_submit(outcome)?;
    Ok(())
}

fn report(error: &AppError) {
    if error.is_blocking() {
        println!("\n!! {}\n", error.user_message());
    } else if !matches!(error, AppError::Auth(_)) {
        // Auth errors are rendered inline by the auth views.
        println!("{}", error.user_message());
    }
}

fn apply_effect(effect: &Effect) {
    if let Effect::Redirect(url) = effect {
        info!(%url, "redirect");
        println!("Continue your analysis at {url}");
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse `key` and `raw`, snapping slider values onto their range and step.
fn parse_assignment(key: &str, raw: &str) -> Result<(VitalField, FieldValue), CliError> {
    let field = VitalField::parse(key.trim())?;
    let value = match FieldValue::parse_for(field, raw)? {
        FieldValue::Number(n) => FieldValue::Number(field.spec().clamp(n)),
        flag => flag,
    };
    Ok((field, value))
}

fn parse_decision(answer: &str) -> Option<Decision> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" => Some(Decision::Yes),
        "no" | "n" => Some(Decision::No),
        _ => None,
    }
}

// =============================================================================
// RENDERING
// =============================================================================

fn render(app: &App) {
    match app.view() {
        View::Login => {
            println!("\n== VitalSense: Login ==");
            print_auth_error(app);
            println!("commands: login, signup, quit");
        }
        View::Signup => {
            println!("\n== VitalSense: Create Account ==");
            print_auth_error(app);
            println!("commands: create, back, quit");
        }
        View::VitalsForm => {
            if let Some(session) = app.session() {
                println!("\nWelcome, {}", session.name);
            }
            print_fields(app);
            println!("commands: set <field> <value>, submit, reset, logout, quit");
        }
        View::Loading => println!("\nAnalyzing your data..."),
        View::Result(_) => render_result(app),
    }
}

fn print_auth_error(app: &App) {
    if let Some(message) = app.auth_error() {
        println!("  {message}");
    }
}

fn print_fields(app: &App) {
    let vitals = app.assessment().vitals();
    for section in Section::iter() {
        println!("\n{}", section.title());
        for field in section.fields() {
            let spec = field.spec();
            println!("  {:<24} {:<28} {}", field.to_string(), spec.label, spec.display(vitals.get(field)));
        }
    }
    println!();
}

fn render_result(app: &App) {
    let Some(view) = app.result_view() else {
        return;
    };
    if let Some(prediction) = app.prediction() {
        println!("\nPredicted anxiety level: {:.2}", prediction.score());
    }
    println!("{}", view.headline);
    if let Some(subtitle) = view.subtitle {
        println!("{subtitle}");
    }
    match view.body {
        ResultBody::Prompt { question } => println!("{question} (yes/no)"),
        ResultBody::Tips { intro, tips } => {
            if let Some(intro) = intro {
                println!("{intro}");
            }
            for tip in tips {
                println!("  - {tip}");
            }
        }
        ResultBody::Message(message) => println!("{message}"),
        ResultBody::Referral { url } => println!("Referred to {url}"),
    }
    println!("commands: reset, logout, quit");
}

fn print_help(view: View) {
    let commands = match view {
        View::Login => "login, signup, quit",
        View::Signup => "create, back, quit",
        View::VitalsForm => "set <field> <value>, fields, submit, reset, logout, quit",
        View::Loading => "quit",
        View::Result(_) => "yes, no, reset, logout, quit",
    };
    println!("{commands}");
}
