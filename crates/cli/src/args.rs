use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use metascore_core::RecordKind;

pub const USAGE: &str = "\
Usage:
  metascore search <query> [--kind tv|movie|game] [--unsorted] [--config <path>]
  metascore detail <query> --kind tv|movie|game [--unsorted] [--config <path>]

Options:
  -k, --kind <kind>     Restrict to one kind (required for detail)
  -u, --unsorted        Keep upstream order instead of ranking by similarity
  -c, --config <path>   Config file (default: $METASCORE_CONFIG or ./metascore.toml)
  -h, --help            Show this help";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search {
        query: String,
        kind: Option<RecordKind>,
    },
    Detail {
        query: String,
        kind: RecordKind,
    },
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub command: Command,
    pub sort_by_similarity: bool,
    pub config: Option<PathBuf>,
}

pub fn parse_args<I>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();

    let mut subcommand: Option<String> = None;
    let mut query_parts: Vec<String> = Vec::new();
    let mut kind: Option<RecordKind> = None;
    let mut sort_by_similarity = true;
    let mut config: Option<PathBuf> = None;

    while let Some(a) = args.next() {
        match a.as_str() {
            "-k" | "--kind" => {
                let v = args.next().context("Missing value for --kind")?;
                kind = Some(v.parse().map_err(|e: String| anyhow!(e))?);
            }
            "-u" | "--unsorted" => sort_by_similarity = false,
            "-c" | "--config" => {
                config = Some(PathBuf::from(args.next().context("Missing config path")?));
            }
            "-h" | "--help" => {
                return Ok(Args {
                    command: Command::Help,
                    sort_by_similarity,
                    config,
                })
            }
            flag if flag.starts_with('-') && flag.len() > 1 => bail!("Unknown arg: {}", flag),
            _ if subcommand.is_none() => subcommand = Some(a.clone()),
            _ => query_parts.push(a.clone()),
        }
    }

    let query = query_parts.join(" ");

    let command = match subcommand.as_deref() {
        None => Command::Help,
        Some("search") => {
            if query.is_empty() {
                bail!("search requires a query");
            }
            Command::Search { query, kind }
        }
        Some("detail") => {
            if query.is_empty() {
                bail!("detail requires a query");
            }
            let kind = kind.context("detail requires --kind")?;
            Command::Detail { query, kind }
        }
        Some(other) => bail!("Unknown command: {}", other),
    };

    Ok(Args {
        command,
        sort_by_similarity,
        config,
    })
}
