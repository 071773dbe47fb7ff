// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the docsift command-line interface.
//!
//! Four subcommands: `search` to query the backend (optionally staying open
//! to page through results), `open` to fetch a document and show it with the
//! query highlighted, `highlight` to do the same to a local file without a
//! backend, and `reindex` to ask the backend to rebuild its indexes.
//!
//! Connection settings are global flags that also read from the environment
//! (and from `.env`, loaded before parsing).

pub mod display;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use docsift::config::{BACKEND_URL_ENV, PAGE_SIZE_ENV};
use docsift::types::{MAX_RESULT_LIMIT, MIN_RESULT_LIMIT};
use docsift::{SearchOptions, ValidationError};

#[derive(Parser)]
#[command(
    name = "docsift",
    about = "Search client for a vector-space document search service",
    version
)]
pub struct Cli {
    /// Base URL of the search backend
    #[arg(long, global = true, env = BACKEND_URL_ENV)]
    pub backend_url: Option<String>,

    /// Results shown per page
    #[arg(long, global = true, env = PAGE_SIZE_ENV)]
    pub page_size: Option<usize>,

    /// More logging (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the backend and list ranked results
    Search {
        /// Search query (sent as typed)
        query: String,

        #[command(flatten)]
        flags: SearchFlags,

        /// Page of results to show
        #[arg(long, default_value = "1")]
        page: usize,

        /// Print the page as JSON instead of a table
        #[arg(long, conflicts_with = "interactive")]
        json: bool,

        /// Stay open to page through results and open documents
        ///
        /// Commands: `n` next page, `p` previous page, `g N` go to page N,
        /// `o N` open the result ranked N, `s QUERY` search again, `q` quit.
        #[arg(short, long)]
        interactive: bool,
    },

    /// Fetch a document and show it with the query highlighted
    Open {
        /// Filename as listed in search results, or a result link
        /// (`/files/<name>?q=<query>`)
        target: String,

        /// Query to highlight (overrides one carried by a result link)
        #[arg(short, long)]
        query: Option<String>,

        /// Print highlighted HTML (`<mark>`) instead of terminal output
        #[arg(long)]
        html: bool,
    },

    /// Highlight query terms in a local file (or stdin); no backend needed
    Highlight {
        /// Query to highlight
        #[arg(short, long)]
        query: String,

        /// File to read; stdin when omitted
        file: Option<PathBuf>,

        /// Print highlighted HTML (`<mark>`) instead of terminal output
        #[arg(long)]
        html: bool,
    },

    /// Ask the backend to rebuild and reload its indexes
    Reindex,
}

/// Retrieval flags, mirroring the search form's checkboxes.
#[derive(Args, Debug, Clone, Copy)]
pub struct SearchFlags {
    /// Let the backend correct misspelled terms
    #[arg(long)]
    pub spelling_correction: bool,

    /// Expand the query with synonyms
    #[arg(long)]
    pub synonyms: bool,

    /// Match terms by how they sound
    #[arg(long)]
    pub soundex: bool,

    /// Number of results to request
    #[arg(
        short = 'k',
        long,
        default_value = "10",
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_RESULT_LIMIT)..=i64::from(MAX_RESULT_LIMIT))
    )]
    pub limit: u32,
}

impl SearchFlags {
    pub fn to_options(self) -> Result<SearchOptions, ValidationError> {
        SearchOptions::new(self.spelling_correction, self.synonyms, self.soundex, self.limit)
    }
}
