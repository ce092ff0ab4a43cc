use anyhow::Context as _;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

mod commands;
mod logging;

fn cli() -> Command {
    Command::new("attendee-list")
        .version(attendee_plugin::VERSION)
        .about("Attendee list editor plugin tools")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-filter")
                .long("log-filter")
                .global(true)
                .help("Tracing filter, overridden by RUST_LOG"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("scan")
                .about("Print the hints for the attendee lists in a context dump")
                .arg(
                    Arg::new("contexts")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("JSON array of contexts"),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Print the committed markup for a list of memberships")
                .arg(
                    Arg::new("memberships")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("JSON array of memberships"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Print the effective plugin configuration")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("TOML configuration file"),
                ),
        )
}

fn read_input(args: &ArgMatches, name: &str) -> anyhow::Result<String> {
    let path = args
        .get_one::<PathBuf>(name)
        .with_context(|| format!("missing <{name}> argument"))?;
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let config_file = matches
        .subcommand_matches("config")
        .and_then(|args| args.get_one::<PathBuf>("file"))
        .cloned();
    let config = commands::config(config_file.as_deref())?;

    let filter = matches
        .get_one::<String>("log-filter")
        .cloned()
        .unwrap_or_else(|| config.log_filter.clone());
    logging::init_logging(logging::LogSettings {
        filter,
        json: matches.get_flag("json-logs"),
    })?;

    match matches.subcommand() {
        Some(("scan", args)) => {
            let raw = read_input(args, "contexts")?;
            println!("{}", commands::scan(&raw, &config)?);
        }
        Some(("render", args)) => {
            let raw = read_input(args, "memberships")?;
            println!("{}", commands::render(&raw)?);
        }
        Some(("config", _)) => {
            print!("{}", config.to_toml_string()?);
        }
        _ => {}
    }
    Ok(())
}
