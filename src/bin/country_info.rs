//! Command-line front end for the country dataset.
//!
//! Prints one answer per invocation: an attribute of a country, an ISO
//! code/name resolution, or the countries sharing an economic or military
//! status. Missing answers print `N/A`; `--json` switches to JSON output.

use anyhow::{Context, Result, anyhow, bail};
use countryfacts::{Atlas, CountryIndex, DataLayout, NOT_AVAILABLE};
use serde_json::{Value, json};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "COUNTRYFACTS_LOG";

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args = CliArgs::parse(env::args_os().skip(1))?;
    let Some(command) = args.command else {
        print_usage();
        return Ok(());
    };

    let layout = match args.root {
        Some(root) => DataLayout::new(root).with_env_overrides(),
        None => DataLayout::from_env()?,
    };
    let atlas = Atlas::open(layout)?;

    let output = match command {
        Command::Attribute { field, country } => {
            let index = atlas.index()?;
            field.read(index, &country)
        }
        Command::Iso { query } => atlas
            .country_info(&query)?
            .map(Value::String)
            .unwrap_or(Value::Null),
        Command::ByStatus { basis, status } => json!(atlas.by_status(&basis, &status)?),
        Command::List => {
            let index = atlas.index()?;
            json!(index.names().map(|key| key.as_str()).collect::<Vec<_>>())
        }
    };

    if args.json {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        print_plain(&output);
    }
    Ok(())
}

fn print_plain(value: &Value) {
    match value {
        Value::Null => println!("{NOT_AVAILABLE}"),
        Value::String(text) => println!("{text}"),
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::String(text) => println!("{text}"),
                    other => println!("{other}"),
                }
            }
        }
        other => println!("{other}"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Capital,
    Currency,
    Continent,
    Economic,
    Historical,
    Landscapes,
    Languages,
    Memberships,
    Military,
    Political,
}

impl Field {
    fn from_command(raw: &str) -> Option<Self> {
        Some(match raw {
            "capital" => Field::Capital,
            "currency" => Field::Currency,
            "continent" => Field::Continent,
            "economic" => Field::Economic,
            "historical" | "history" => Field::Historical,
            "landscapes" => Field::Landscapes,
            "languages" => Field::Languages,
            "memberships" => Field::Memberships,
            "military" => Field::Military,
            "political" => Field::Political,
            _ => return None,
        })
    }

    fn read(self, index: &CountryIndex, country: &str) -> Value {
        let text = |v: Option<&str>| v.map(|s| Value::String(s.to_string())).unwrap_or(Value::Null);
        let list = |v: Option<&[String]>| v.map(|items| json!(items)).unwrap_or(Value::Null);
        match self {
            Field::Capital => text(index.capital(country)),
            Field::Currency => text(index.currency(country)),
            Field::Continent => text(index.continent(country)),
            Field::Economic => text(index.economic(country)),
            Field::Historical => text(index.historical(country)),
            Field::Landscapes => list(index.landscapes(country)),
            Field::Languages => list(index.languages(country)),
            Field::Memberships => list(index.memberships(country)),
            Field::Military => text(index.military(country)),
            Field::Political => text(index.political(country)),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Attribute { field: Field, country: String },
    Iso { query: String },
    ByStatus { basis: String, status: String },
    List,
}

#[derive(Debug)]
struct CliArgs {
    root: Option<PathBuf>,
    json: bool,
    command: Option<Command>,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = OsString>) -> Result<Self> {
        let mut args = args.into_iter();
        let mut root: Option<PathBuf> = None;
        let mut json = false;
        let mut positional: Vec<String> = Vec::new();

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--root" => {
                    let path = next_value(&mut args, "--root")?;
                    root = Some(PathBuf::from(path));
                }
                "--json" => json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                flag if flag.starts_with("--") => bail!("unknown flag: {flag}"),
                _ => positional.push(arg),
            }
        }

        let command = match positional.split_first() {
            None => None,
            Some((name, rest)) => Some(parse_command(name, rest)?),
        };

        Ok(CliArgs {
            root,
            json,
            command,
        })
    }
}

fn parse_command(name: &str, rest: &[String]) -> Result<Command> {
    if let Some(field) = Field::from_command(name) {
        return Ok(Command::Attribute {
            field,
            country: join_words(rest).with_context(|| format!("{name} requires a country"))?,
        });
    }
    match name {
        "iso" => Ok(Command::Iso {
            query: join_words(rest).context("iso requires a code or country name")?,
        }),
        "by-status" => match rest {
            [basis, status] => Ok(Command::ByStatus {
                basis: basis.clone(),
                status: status.clone(),
            }),
            _ => bail!("by-status requires <e|m> <strong|average|weak>"),
        },
        "list" => Ok(Command::List),
        other => bail!("unknown command: {other}"),
    }
}

// Country names may be passed unquoted ("united kingdom").
fn join_words(words: &[String]) -> Result<String> {
    if words.is_empty() {
        bail!("missing argument");
    }
    Ok(words.join(" "))
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: country-info [--root PATH] [--json] <command> [args]\n\
Commands:\n  \
capital|currency|continent|economic|historical|landscapes|languages|memberships|military|political <country>\n  \
iso <code-or-name>\n  \
by-status <e|m> <strong|average|weak>\n  \
list\n\
Set COUNTRYFACTS_ROOT to the dataset root and COUNTRYFACTS_LOG to adjust logging.\n"
}

fn print_usage() {
    print!("{}", usage());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs> {
        CliArgs::parse(args.iter().map(OsString::from))
    }

    #[test]
    fn attribute_commands_join_country_words() {
        let args = parse(&["--json", "capital", "united", "kingdom"]).unwrap();
        assert!(args.json);
        assert_eq!(
            args.command,
            Some(Command::Attribute {
                field: Field::Capital,
                country: "united kingdom".to_string()
            })
        );
    }

    #[test]
    fn by_status_needs_two_arguments() {
        assert!(parse(&["by-status", "e"]).is_err());
        let args = parse(&["--root", "/srv/facts", "by-status", "E", "Strong"]).unwrap();
        assert_eq!(args.root, Some(PathBuf::from("/srv/facts")));
        assert_eq!(
            args.command,
            Some(Command::ByStatus {
                basis: "E".to_string(),
                status: "Strong".to_string()
            })
        );
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse(&["population", "chad"]).is_err());
        assert!(parse(&["capital"]).is_err());
    }
}
