#![deny(clippy::all)]
use std::collections::HashMap;

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use imageboard_query::config::{find_server, load_servers};
use imageboard_query::{AuthToken, BooruClient, Entry, ResultSet, ServerConfig};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    env_logger::builder().format_timestamp(None).init();

    let servers = load_servers(args.config.as_deref()).await?;

    if args.servers {
        print_servers(&servers);
        return Ok(());
    }

    let Some(mode) = &args.mode else {
        bail!("No search given. Run with --help to see the available ones")
    };

    let server = find_server(&servers, &args.server)?;

    let auth = match (&args.api_key, &args.user_id) {
        (Some(key), Some(user)) => AuthToken::new(key.as_str(), user.as_str()),
        _ => None,
    };

    let client = BooruClient::new(server)?.with_auth(auth);
    let filter = mode.filter();

    if !args.all {
        let page = client.search(&filter).await?;
        print_page(&page);
        print_results(page.len(), 1);
        return Ok(());
    }

    let mut pages = client.paginate(filter);
    let mut total = 0;

    loop {
        match pages.next_page().await {
            Ok(Some(page)) => {
                total += page.len();
                print_page(&page);
            }
            Ok(None) => break,
            Err(error) => {
                print_results(total, pages.pages_fetched());
                return Err(error.into());
            }
        }
    }

    print_results(total, pages.pages_fetched());

    Ok(())
}

fn print_page(page: &ResultSet) {
    for entry in page.entries() {
        match entry {
            Entry::Post(post) => println!(
                "{} {} {} {}",
                format!("#{}", post.id).bold().blue(),
                post.rating.to_string().bold().yellow(),
                format!("[{}]", post.score.total).green(),
                post.file.url.as_deref().unwrap_or("-").underline(),
            ),
            Entry::Tag(tag) => println!(
                "{} {} {}",
                tag.name.bold().green(),
                format!("({})", tag.count).blue(),
                format!("{:?}", tag.category).purple(),
            ),
            Entry::User(user) => println!(
                "{} {}{}",
                format!("#{}", user.id).bold().blue(),
                user.name.bold().green(),
                if user.active { "" } else { " (inactive)" }
            ),
            Entry::Comment(comment) => println!(
                "{} {}: {}",
                format!("#{}", comment.post_id).bold().blue(),
                comment.creator.bold().green(),
                comment.body.as_deref().unwrap_or_default(),
            ),
        }
    }
}

fn print_results(total: usize, pages: usize) {
    println!(
        "{} {} {} {} {}",
        total.to_string().bold().blue(),
        "entries".bold().blue(),
        "in".bold(),
        pages.to_string().bold().blue(),
        (if pages == 1 { "page" } else { "pages" }).bold()
    );
}

fn print_servers(servers: &HashMap<String, ServerConfig>) {
    println!(
        "{}\n----------------",
        "Available Servers:".underline().bold().blue()
    );

    let mut names: Vec<&String> = servers.keys().collect();
    names.sort();

    for name in names {
        let data = &servers[name];
        let searches: Vec<&str> = data
            .supported_kinds()
            .into_iter()
            .map(|kind| kind.as_str())
            .collect();

        println!(
            "{:<12} - {}:\n - {} {}\n - {} {:?}\n",
            format!("[{}]", name),
            data.pretty_name.bold().green(),
            "Base URL:".bold().blue(),
            data.base_url.bold().purple().underline(),
            "Searches:".bold().blue(),
            searches,
        )
    }
}
