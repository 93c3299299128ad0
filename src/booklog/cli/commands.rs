use super::print::{print_books, print_config, print_messages, print_progress};
use super::setup::{Cli, Commands};
use booklog::api::{BooklogApi, BooklogPaths, CmdResult, ConfigAction, MessageLevel};
use booklog::config::BooklogConfig;
use booklog::error::{BooklogError, Result};
use booklog::model::{BookPatch, Scope};
use booklog::store::fs_backend::FsBackend;
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: BooklogApi<FsBackend>,
    config: BooklogConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add {
            title,
            author,
            year,
            genre,
            read,
        }) => handle_add(&mut ctx, title, author, year, genre, read),
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Search { text }) => handle_search(&ctx, &text),
        Some(Commands::Update {
            old_title,
            title,
            author,
            year,
            genre,
            read,
            unread,
        }) => {
            let patch = BookPatch {
                title,
                author,
                year,
                genre,
                read: read_flag(read, unread),
            };
            handle_update(&mut ctx, &old_title, patch)
        }
        Some(Commands::Delete { title }) => handle_delete(&mut ctx, &title),
        Some(Commands::Progress) => handle_progress(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Path) => handle_path(&ctx),
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "booklog=debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let global = ProjectDirs::from("com", "booklog", "booklog").map(|d| d.data_dir().to_path_buf());

    let scope = if cli.global {
        Scope::Global
    } else {
        Scope::Project
    };

    let paths = BooklogPaths {
        project: cwd,
        global,
    };
    let (api, config) = BooklogApi::<FsBackend>::open(paths, scope)?;
    Ok(AppContext { api, config })
}

fn read_flag(read: bool, unread: bool) -> Option<bool> {
    match (read, unread) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

fn handle_add(
    ctx: &mut AppContext,
    title: String,
    author: String,
    year: String,
    genre: String,
    read: bool,
) -> Result<()> {
    if title.is_empty() {
        return Err(BooklogError::Api("Title cannot be empty".into()));
    }

    let result = ctx.api.add_book(title, author, year, genre, read)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_books()?;
    print_books(&result.listed_books, "No books in collection.");
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, text: &str) -> Result<()> {
    let result = ctx.api.search_books(text)?;
    print_books(&result.listed_books, "No matching books found.");
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(ctx: &mut AppContext, old_title: &str, patch: BookPatch) -> Result<()> {
    if old_title.is_empty() {
        return Err(BooklogError::Api("Title of the book to update cannot be empty".into()));
    }

    // Blank values mean "keep what's there", not "clear the field".
    let result = ctx.api.update_book(old_title, &patch.without_empty())?;
    report(&result, BooklogError::Api)
}

fn handle_delete(ctx: &mut AppContext, title: &str) -> Result<()> {
    let result = ctx.api.delete_book(title)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_progress(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.progress()?;
    if let Some(progress) = &result.progress {
        print_progress(progress, ctx.config.progress_decimals);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let (Some(config), true) = (&result.config, result.messages.is_empty()) {
        print_config(config);
    }
    report(&result, BooklogError::Config)
}

fn handle_path(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.data_path()?;
    if let Some(path) = &result.data_path {
        println!("{}", path.display());
    }
    Ok(())
}

/// Prints the non-error messages and turns the first error message, if any,
/// into the command's error so `main` reports it and exits non-zero.
fn report(result: &CmdResult, into_error: fn(String) -> BooklogError) -> Result<()> {
    let (errors, others): (Vec<_>, Vec<_>) = result
        .messages
        .iter()
        .cloned()
        .partition(|m| m.level == MessageLevel::Error);
    print_messages(&others);
    match errors.into_iter().next() {
        Some(message) => Err(into_error(message.content)),
        None => Ok(()),
    }
}
