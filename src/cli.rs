use std::path::PathBuf;

use clap::{Parser, Subcommand};
use imageboard_query::{
    CommentFilter, FilterSpec, JsonPostFilter, PostFilter, TagFilter, UserFilter,
};

#[derive(Parser, Debug)]
#[clap(name = "Imageboard Query", author, version, about, long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub mode: Option<Commands>,

    /// Server to query, as named in the built-in list or the servers file
    #[clap(
        short,
        long,
        value_parser,
        default_value = "gelbooru",
        global = true,
        help_heading = "SERVER"
    )]
    pub server: String,

    /// Read extra servers from this file instead of the default location
    #[clap(
        long,
        parse(from_os_str),
        value_name = "PATH",
        global = true,
        help_heading = "SERVER"
    )]
    pub config: Option<PathBuf>,

    /// Print all available servers and exit
    #[clap(long, action, help_heading = "GENERAL")]
    pub servers: bool,

    /// API key to authenticate with. Requires --user-id
    #[clap(long, value_parser, global = true, requires = "user_id", help_heading = "AUTH")]
    pub api_key: Option<String>,

    /// Account the API key belongs to. Requires --api-key
    #[clap(long, value_parser, global = true, requires = "api_key", help_heading = "AUTH")]
    pub user_id: Option<String>,

    /// Keep fetching pages until the server runs out of results
    #[clap(short, long, action, global = true, help_heading = "GENERAL")]
    pub all: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search posts on an XML (gelbooru-style) server
    Posts {
        /// Tags to search
        #[clap(value_parser)]
        tags: Vec<String>,

        /// Results per page (at most 100)
        #[clap(short, long, value_parser)]
        limit: Option<u64>,

        /// Page to fetch, starting from 0
        #[clap(short, long, value_parser)]
        page: Option<u64>,

        /// Fetch a single post by id
        #[clap(long, value_parser)]
        id: Option<u64>,

        /// Only posts changed since this change id
        #[clap(long, value_parser)]
        change_id: Option<u64>,
    },

    /// Search tags
    Tags {
        /// Exact tag name
        #[clap(short, long, value_parser)]
        name: Option<String>,

        /// Several exact tag names
        #[clap(long, value_parser, multiple_values = true)]
        names: Vec<String>,

        /// SQL LIKE pattern (`%` any run, `_` one character)
        #[clap(long, value_parser)]
        pattern: Option<String>,

        /// Sort by date, count or name
        #[clap(short, long, value_parser)]
        order: Option<String>,

        /// Results per page (at most 1000)
        #[clap(short, long, value_parser)]
        limit: Option<u64>,

        #[clap(long, value_parser)]
        id: Option<u64>,

        /// Only tags with an id above this one
        #[clap(long, value_parser)]
        after_id: Option<u64>,
    },

    /// Search user accounts
    Users {
        /// Exact user name
        #[clap(short, long, value_parser)]
        name: Option<String>,

        /// SQL LIKE pattern (`%` any run, `_` one character)
        #[clap(long, value_parser)]
        pattern: Option<String>,

        /// Results per page (at most 100)
        #[clap(short, long, value_parser)]
        limit: Option<u64>,

        /// Page to fetch, starting from 0
        #[clap(short, long, value_parser)]
        page: Option<u64>,
    },

    /// List the comments of a post
    Comments {
        #[clap(value_parser)]
        post_id: u64,
    },

    /// Search posts on a JSON (e621-style) server
    JsonPosts {
        /// Tags to search
        #[clap(value_parser)]
        tags: Vec<String>,

        /// Results per page (at most 320)
        #[clap(short, long, value_parser)]
        limit: Option<u64>,

        /// Page to fetch, starting from 1
        #[clap(short, long, value_parser)]
        page: Option<u64>,
    },
}

impl Commands {
    pub fn filter(&self) -> FilterSpec {
        match self {
            Self::Posts {
                tags,
                limit,
                page,
                id,
                change_id,
            } => PostFilter {
                id: *id,
                limit: *limit,
                page: *page,
                change_id: *change_id,
                tags: tags.clone(),
            }
            .into(),
            Self::Tags {
                name,
                names,
                pattern,
                order,
                limit,
                id,
                after_id,
            } => TagFilter {
                id: *id,
                limit: *limit,
                after_id: *after_id,
                name: name.clone(),
                names: names.clone(),
                name_pattern: pattern.clone(),
                order_by: order.clone(),
            }
            .into(),
            Self::Users {
                name,
                pattern,
                limit,
                page,
            } => UserFilter {
                limit: *limit,
                page: *page,
                name: name.clone(),
                name_pattern: pattern.clone(),
            }
            .into(),
            Self::Comments { post_id } => CommentFilter { post_id: *post_id }.into(),
            Self::JsonPosts { tags, limit, page } => JsonPostFilter {
                page: *page,
                limit: *limit,
                tags: tags.clone(),
            }
            .into(),
        }
    }
}
