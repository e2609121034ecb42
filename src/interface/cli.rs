//! コマンドライン入口
//!
//! bookshelf [--config FILE] search <query...>
//! bookshelf [--config FILE] saved
//! bookshelf [--config FILE] save <query> <id>

use std::path::PathBuf;

use anyhow::{bail, Context};
use futures::StreamExt;

use crate::application::repository::BookRepository;
use crate::config::Settings;
use crate::infra::google_books::GoogleBooksApi;
use crate::infra::sqlite_store::SqliteBookDao;
use crate::logging;

const USAGE: &str = "usage: bookshelf [--config FILE] <search QUERY... | saved | save QUERY ID>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search { query: String },
    Saved,
    Save { query: String, id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub config: Option<PathBuf>,
    pub command: Command,
}

/// 引数（プログラム名を除く）を解釈する。
pub fn parse_args<I>(args: I) -> anyhow::Result<Invocation>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter().peekable();
    let mut config = None;

    if args.peek().map(String::as_str) == Some("--config") {
        args.next();
        let path = args.next().context("--config requires a file path")?;
        config = Some(PathBuf::from(path));
    }

    let command = match args.next().as_deref() {
        Some("search") => {
            let query = args.collect::<Vec<_>>().join(" ");
            Command::Search { query }
        }
        Some("saved") => Command::Saved,
        Some("save") => {
            let (Some(query), Some(id)) = (args.next(), args.next()) else {
                bail!("{USAGE}");
            };
            Command::Save { query, id }
        }
        _ => bail!("{USAGE}"),
    };

    Ok(Invocation { config, command })
}

pub async fn run(invocation: Invocation) -> anyhow::Result<()> {
    let settings = Settings::load(invocation.config.as_deref()).context("failed to load settings")?;
    logging::init(&settings.log_level);

    let api = GoogleBooksApi::new(&settings.api)?;
    let dao = SqliteBookDao::open(&settings.store.path)
        .with_context(|| format!("failed to open {}", settings.store.path.display()))?;
    let repo = BookRepository::new(api, dao);

    match invocation.command {
        Command::Search { query } => {
            let books = repo.search_books(&query).await?;
            println!("{}", serde_json::to_string_pretty(&books)?);
        }
        Command::Saved => {
            let books = repo
                .get_saved_books()
                .next()
                .await
                .context("saved-books stream ended unexpectedly")??;
            println!("{}", serde_json::to_string_pretty(&books)?);
        }
        Command::Save { query, id } => {
            let books = repo.search_books(&query).await?;
            let Some(book) = books.into_iter().find(|b| b.id == id) else {
                bail!("no search result with id {id} for query {query:?}");
            };
            repo.save_book(&book).await?;
            println!("saved {} ({})", book.id, book.title);
        }
    }

    Ok(())
}
