use booklog::api::{CmdMessage, MessageLevel};
use booklog::config::BooklogConfig;
use booklog::model::{Book, ReadingProgress};
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TITLE_MAX_WIDTH: usize = 40;
const BAR_WIDTH: usize = 30;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_books(books: &[Book], empty_text: &str) {
    if books.is_empty() {
        println!("{}", empty_text);
        return;
    }
    for line in format_books(books) {
        println!("{}", line);
    }
}

pub(super) fn print_progress(progress: &ReadingProgress, decimals: usize) {
    for line in format_progress(progress, decimals) {
        println!("{}", line);
    }
}

pub(super) fn print_config(config: &BooklogConfig) {
    for key in BooklogConfig::KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{} = {}", key.dimmed(), value);
    }
}

/// One line per book: `  1. <title, padded>  by <author> (<year>) - <genre> - Read`.
fn format_books(books: &[Book]) -> Vec<String> {
    let title_width = books
        .iter()
        .map(|b| b.title.width().min(TITLE_MAX_WIDTH))
        .max()
        .unwrap_or(0);
    let index_width = books.len().to_string().len();

    books
        .iter()
        .enumerate()
        .map(|(i, book)| {
            let title = truncate_to_width(&book.title, TITLE_MAX_WIDTH);
            let padding = title_width.saturating_sub(title.width());
            let status = if book.read {
                "Read".green()
            } else {
                "Unread".red()
            };
            format!(
                "{:>iw$}. {}{}  by {} ({}) - {} - {}",
                i + 1,
                title.bold(),
                " ".repeat(padding),
                book.author,
                book.year,
                book.genre,
                status,
                iw = index_width
            )
        })
        .collect()
}

fn format_progress(progress: &ReadingProgress, decimals: usize) -> Vec<String> {
    let filled = ((progress.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let bar = format!(
        "[{}{}]",
        "#".repeat(filled).green(),
        "-".repeat(BAR_WIDTH - filled).dimmed()
    );

    vec![
        format!("Total books:        {}", progress.total),
        format!("Books read:         {}", progress.read),
        format!(
            "Reading completion: {:.prec$}%",
            progress.percent,
            prec = decimals
        ),
        bar,
    ]
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
