use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "booklog", version)]
#[command(about = "Keep track of the books you own and the ones you've read", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use the per-user collection instead of the one in the current directory
    #[arg(short, long, global = true)]
    pub global: bool,

    /// Verbose output (debug logging to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book
    #[command(alias = "a")]
    Add {
        /// Title of the book
        title: String,

        #[arg(short, long, default_value = "")]
        author: String,

        /// Publication year (free text)
        #[arg(short, long, default_value = "")]
        year: String,

        #[arg(long, default_value = "")]
        genre: String,

        /// Mark the book as read
        #[arg(short, long)]
        read: bool,
    },

    /// List all books
    #[command(alias = "ls")]
    List,

    /// Search books by title or author
    #[command(alias = "s")]
    Search {
        /// Text to look for, case-insensitive (empty matches everything)
        #[arg(default_value = "")]
        text: String,
    },

    /// Update the first book with the given title
    #[command(alias = "u")]
    Update {
        /// Current title of the book (case-insensitive)
        old_title: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New author
        #[arg(short, long)]
        author: Option<String>,

        /// New publication year
        #[arg(short, long)]
        year: Option<String>,

        /// New genre
        #[arg(long)]
        genre: Option<String>,

        /// Mark as read
        #[arg(short, long, conflicts_with = "unread")]
        read: bool,

        /// Mark as unread
        #[arg(long)]
        unread: bool,
    },

    /// Delete every book with the given title
    #[command(alias = "rm")]
    Delete {
        /// Title of the book (case-insensitive)
        title: String,
    },

    /// Show how much of the collection has been read
    #[command(alias = "p")]
    Progress,

    /// Get or set configuration
    Config {
        /// Configuration key (data-file, progress-decimals)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print the path of the book file
    Path,
}
