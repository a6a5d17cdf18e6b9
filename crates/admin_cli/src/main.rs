use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{Engine, MIN_PASSWORD_LENGTH, RecordKind, is_acceptable_password};
use migration::MigratorTrait;
use sea_orm::Database;

#[derive(Parser, Debug)]
#[command(name = "aircargo_admin")]
#[command(about = "Admin utilities for the air-cargo back office (bootstrap users and statuses)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./aircargo.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Status(Status),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    display_name: Option<String>,
}

#[derive(Args, Debug)]
struct Status {
    #[command(subcommand)]
    command: StatusCommand,
}

#[derive(Subcommand, Debug)]
enum StatusCommand {
    /// Add a status to the catalog.
    Create(StatusCreateArgs),
    /// Make a catalog status the default of new records of one kind.
    SetDefault(StatusSetDefaultArgs),
}

#[derive(Args, Debug)]
struct StatusCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Args, Debug)]
struct StatusSetDefaultArgs {
    /// `cargo_manifest` or `weight_slip`.
    #[arg(long, value_parser = parse_kind)]
    kind: RecordKind,
    /// Name of an existing status.
    #[arg(long)]
    status: String,
}

fn parse_kind(raw: &str) -> Result<RecordKind, String> {
    RecordKind::try_from(raw).map_err(|err| err.to_string())
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn prompt_password(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;
    out.flush()?;

    let mut buf = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                break;
            }
            KeyCode::Backspace => {
                if buf.pop().is_some() {
                    execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                    out.flush()?;
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                buf.push(ch);
                execute!(out, Print("*"))?;
                out.flush()?;
            }
            _ => {}
        }
    }

    Ok(buf)
}

fn prompt_password_twice() -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stderr();
    for _ in 0..3 {
        let p1 = prompt_password("Password: ")?;
        if !is_acceptable_password(&p1) {
            execute!(
                out,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine),
                Print(format!(
                    "Password must be at least {MIN_PASSWORD_LENGTH} characters.\r\n"
                ))
            )?;
            continue;
        }

        let p2 = prompt_password("Confirm password: ")?;
        if p1 == p2 {
            return Ok(p1);
        }

        execute!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print("Passwords do not match. Try again.\r\n")
        )?;
    }

    Err("too many attempts".into())
}

async fn connect_engine(database_url: &str) -> Result<Engine, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Engine::builder().database(db).build().await?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let engine = connect_engine(&cli.database_url).await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            if engine.user_by_username(&args.username).await?.is_some() {
                eprintln!("user already exists: {}", args.username);
                std::process::exit(1);
            }

            let password = prompt_password_twice()?;
            let user = engine
                .create_user(&args.username, &password, args.display_name.as_deref())
                .await?;

            println!("created user: {} ({})", user.username, user.id);
        }
        Command::Status(Status {
            command: StatusCommand::Create(args),
        }) => {
            let status = engine
                .create_status(&args.name, args.description.as_deref())
                .await?;
            println!("created status: {} ({})", status.name, status.id);
        }
        Command::Status(Status {
            command: StatusCommand::SetDefault(args),
        }) => {
            let Some(status) = engine
                .statuses()
                .await?
                .into_iter()
                .find(|s| s.name == args.status)
            else {
                eprintln!("status not found: {}", args.status);
                std::process::exit(1);
            };

            engine.set_default_status(args.kind, status.id).await?;
            println!("default status of {} is now {}", args.kind, status.name);
        }
    }

    Ok(())
}
