//! Interactive terminal client for the book inventory server

use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use book_inventory::{
    client::{BookView, BooksApi, HttpBooksApi},
    config::AppConfig,
};

const HELP: &str = "\
Commands:
  list                       show the current page
  search <term>              filter by title or author (empty term clears)
  page <n> | next | prev     change page
  add <title> | <author>     add a new book
  edit <row>                 start editing the book in that row
  save <title> | <author>    save the form (updates while editing)
  cancel                     stop editing
  delete <row>               delete the book in that row
  help                       show this message
  quit                       exit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "book_inventory=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let api = HttpBooksApi::new(&config.client.base_url);
    let mut view = BookView::new(api, Duration::from_secs(config.client.alert_seconds));
    view.mount().await;

    println!("Book Inventory ({})", config.client.base_url);
    println!("{}", HELP);
    println!("\n{}", view.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" | "list" => {}
            "quit" | "exit" => break,
            "help" => {
                println!("{}", HELP);
                continue;
            }
            "search" => view.set_search(rest),
            "page" => match rest.parse() {
                Ok(page) if view.go_to_page(page) => {}
                _ => println!("No such page: {}", rest),
            },
            "next" => {
                view.next_page();
            }
            "prev" => {
                view.prev_page();
            }
            "add" => {
                view.cancel_edit();
                submit(&mut view, rest).await;
            }
            "save" => submit(&mut view, rest).await,
            "edit" => match row_id(&view, rest) {
                Some(id) => {
                    view.start_edit(&id);
                    if let Some(draft) = view.draft() {
                        println!("{}: {} | {}", view.heading(), draft.title, draft.author);
                    }
                }
                None => println!("No such row: {}", rest),
            },
            "cancel" => view.cancel_edit(),
            "delete" => match row_id(&view, rest) {
                Some(id) => {
                    view.delete(&id).await;
                }
                None => println!("No such row: {}", rest),
            },
            other => {
                println!("Unknown command: {} (try `help`)", other);
                continue;
            }
        }

        println!("\n{}", view.render());
    }

    Ok(())
}

/// Parse `<title> | <author>` and submit the form
async fn submit<A: BooksApi>(view: &mut BookView<A>, input: &str) {
    let (title, author) = input.split_once('|').unwrap_or((input, ""));
    view.submit(title.trim(), author.trim()).await;
}

fn row_id<A: BooksApi>(view: &BookView<A>, input: &str) -> Option<String> {
    let number = input.parse().ok()?;
    view.book_at(number).map(|book| book.id.clone())
}
