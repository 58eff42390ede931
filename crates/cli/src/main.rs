mod client;
mod prefs;
mod render;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use moodlog_core::{Language, Sentiment, Theme, Translator};
use moodlog_ml::MoodMlStack;
use moodlog_observability::init_tracing;
use tracing::debug;

use crate::client::{EntryUpdate, JournalClient};
use crate::prefs::{LocalStore, AUTH_TOKEN_KEY, LANGUAGE_KEY, PROFILE_IMAGE_KEY, THEME_KEY};

#[derive(Debug, Parser)]
#[command(name = "moodlog")]
#[command(about = "Daily mood journal")]
struct Cli {
    #[arg(long, env = "MOODLOG_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    #[arg(long, env = "MOODLOG_HOME")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    Logout,
    Me,
    /// Classify text locally without contacting the server.
    Analyze { text: String },
    /// Analyze text on the server and save it as today's entry.
    Write { text: String },
    History,
    Update {
        id: i64,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        sentiment: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        suggestion: Option<String>,
    },
    Delete { id: i64 },
    DeleteAll,
    Weekly,
    Profile,
    Prefs {
        #[command(subcommand)]
        command: PrefsCommand,
    },
}

#[derive(Debug, Subcommand)]
enum PrefsCommand {
    Show,
    Language { value: String },
    Theme { value: String },
    Photo { path: PathBuf },
    ClearPhoto,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("moodlog_cli");
    let cli = Cli::parse();

    let home = LocalStore::resolve_home(cli.home)?;
    let mut store = LocalStore::open(&home)?;
    let tr = store.ui_config().translator();
    debug!(home = %home.display(), api_url = %cli.api_url, "cli started");

    let client = JournalClient::new(&cli.api_url, store.auth_token())?;

    match cli.command {
        Command::Register { email, password } => {
            let password = password_or_prompt(password, &tr)?;
            let session = client.register(&email, &password).await?;
            store.set(AUTH_TOKEN_KEY, session.token)?;
            println!("{}: {}", tr.t("auth.loggedIn"), session.user.email);
        }
        Command::Login { email, password } => {
            let password = password_or_prompt(password, &tr)?;
            let session = client.login(&email, &password).await?;
            store.set(AUTH_TOKEN_KEY, session.token)?;
            println!("{}: {}", tr.t("auth.loggedIn"), session.user.email);
        }
        Command::Logout => {
            store.remove(AUTH_TOKEN_KEY)?;
            println!("{}", tr.t("auth.loggedOut"));
        }
        Command::Me => {
            require_session(&store, &tr)?;
            let user = client.me().await?;
            println!("{}: {}", tr.t("auth.email"), user.email);
        }
        Command::Analyze { text } => {
            let text = required_text(&text, &tr)?;
            let analysis = MoodMlStack::keyword_only().analyze(text).await;
            println!(
                "{}",
                render::analysis_block(
                    &tr,
                    analysis.sentiment,
                    &analysis.summary,
                    &analysis.suggestion
                )
            );
        }
        Command::Write { text } => {
            require_session(&store, &tr)?;
            let text = required_text(&text, &tr)?;
            let analysis = client
                .analyze(text)
                .await
                .with_context(|| tr.t("home.analysisError").to_string())?;
            let entry = client.create_entry(&analysis, text).await?;
            println!(
                "{}\n{}",
                render::analysis_block(&tr, entry.sentiment, &entry.summary, &entry.suggestion),
                tr.t("home.saved")
            );
        }
        Command::History => {
            require_session(&store, &tr)?;
            let entries = client.list_entries().await?;
            println!("{}", render::history(&entries, Utc::now(), &tr));
        }
        Command::Update {
            id,
            content,
            sentiment,
            summary,
            suggestion,
        } => {
            require_session(&store, &tr)?;
            if let Some(value) = sentiment.as_deref() {
                if Sentiment::parse(value).is_none() {
                    bail!("invalid sentiment {value:?}, expected positive, neutral or negative");
                }
            }
            let update = EntryUpdate {
                content,
                sentiment,
                summary,
                suggestion,
            };
            client.update_entry(id, &update).await?;
            println!("{}", tr.t("history.updated"));
        }
        Command::Delete { id } => {
            require_session(&store, &tr)?;
            client.delete_entry(id).await?;
            println!("{}", tr.t("history.deleted"));
        }
        Command::DeleteAll => {
            require_session(&store, &tr)?;
            let deleted = client
                .delete_all_entries()
                .await
                .with_context(|| tr.t("profile.deleteError").to_string())?;
            println!("{} ({deleted})", tr.t("profile.deleteSuccess"));
        }
        Command::Weekly => {
            require_session(&store, &tr)?;
            let summary = client.weekly().await?;
            println!("{}", render::weekly(&summary, &tr));
        }
        Command::Profile => {
            require_session(&store, &tr)?;
            let user = client.me().await?;
            let entries = client.list_entries().await?;
            let photo = store
                .get(PROFILE_IMAGE_KEY)
                .map(|path| format!("{}: {}", tr.t("profile.photo"), path))
                .unwrap_or_else(|| tr.t("profile.noPhoto").to_string());
            println!(
                "{}\n{}: {}\n{}\n{}\n  {}: {}\n  {}: {}",
                tr.t("profile.title"),
                tr.t("auth.email"),
                user.email,
                photo,
                tr.t("profile.stats"),
                tr.t("profile.totalEntries"),
                entries.len(),
                tr.t("profile.thisWeek"),
                render::entries_this_week(&entries, Utc::now()),
            );
        }
        Command::Prefs { command } => run_prefs(&mut store, command)?,
    }

    Ok(())
}

fn run_prefs(store: &mut LocalStore, command: PrefsCommand) -> Result<()> {
    match command {
        PrefsCommand::Show => {
            let ui = store.ui_config();
            let tr = ui.translator();
            let language = match ui.language {
                Language::Tr => tr.t("profile.turkish"),
                Language::En => tr.t("profile.english"),
            };
            let theme = match ui.theme {
                Theme::Light => tr.t("profile.light"),
                Theme::Dark => tr.t("profile.dark"),
            };
            let palette = ui.theme.palette();
            println!("{}: {}", tr.t("profile.language"), language);
            println!(
                "{}: {} ({} / {})",
                tr.t("profile.theme"),
                theme,
                palette.background,
                palette.primary
            );
            match store.get(PROFILE_IMAGE_KEY) {
                Some(path) => println!("{}: {}", tr.t("profile.photo"), path),
                None => println!("{}", tr.t("profile.noPhoto")),
            }
        }
        PrefsCommand::Language { value } => {
            let language = Language::from_optional_str(Some(&value))
                .with_context(|| format!("unsupported language {value:?}, expected tr or en"))?;
            store.set(LANGUAGE_KEY, language.as_code())?;
            let tr = Translator::new(language);
            println!("{}: {}", tr.t("profile.language"), language.as_code());
        }
        PrefsCommand::Theme { value } => {
            let theme = Theme::parse(&value)
                .with_context(|| format!("unsupported theme {value:?}, expected light or dark"))?;
            store.set(THEME_KEY, theme.as_str())?;
            let tr = store.ui_config().translator();
            println!("{}: {}", tr.t("profile.theme"), theme.as_str());
        }
        PrefsCommand::Photo { path } => {
            if !path.is_file() {
                bail!("no image file at {}", path.display());
            }
            let path = path
                .canonicalize()
                .with_context(|| format!("failed resolving {}", path.display()))?;
            store.set(PROFILE_IMAGE_KEY, path.display().to_string())?;
            let tr = store.ui_config().translator();
            println!("{}: {}", tr.t("profile.photo"), path.display());
        }
        PrefsCommand::ClearPhoto => {
            store.remove(PROFILE_IMAGE_KEY)?;
            let tr = store.ui_config().translator();
            println!("{}", tr.t("profile.noPhoto"));
        }
    }
    Ok(())
}

fn require_session(store: &LocalStore, tr: &Translator) -> Result<()> {
    if store.auth_token().is_none() {
        bail!("{}", tr.t("auth.notLoggedIn"));
    }
    Ok(())
}

fn required_text<'a>(text: &'a str, tr: &Translator) -> Result<&'a str> {
    let text = text.trim();
    if text.is_empty() {
        bail!("{}", tr.t("home.enterText"));
    }
    Ok(text)
}

fn password_or_prompt(password: Option<String>, tr: &Translator) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    print!("{}: ", tr.t("auth.password"));
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("{}", tr.t("auth.fillAll"));
    }
    Ok(password)
}
