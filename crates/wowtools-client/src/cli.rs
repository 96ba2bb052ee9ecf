//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// wowtools - Armory character, guild and calendar data
#[derive(Debug, Parser)]
#[command(name = "wowtools")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "WOWTOOLS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and parse a character's calendar feed
    Calendar {
        /// Realm name (defaults to `calendar.realm`)
        #[arg(long, short)]
        realm: Option<String>,

        /// Character name (defaults to `calendar.character`)
        #[arg(long, short = 'n')]
        character: Option<String>,

        /// Feed token (defaults to `calendar.token`)
        #[arg(long, env = "WOWTOOLS_CALENDAR_TOKEN")]
        token: Option<String>,
    },

    /// Parse a local iCalendar file ("-" reads stdin)
    Parse {
        file: PathBuf,
    },

    /// Fetch a character sheet
    Character {
        #[arg(long, short)]
        realm: String,

        #[arg(long, short)]
        name: String,
    },

    /// Fetch a guild roster
    Guild {
        #[arg(long, short)]
        realm: String,

        #[arg(long, short)]
        name: String,

        /// Where to fetch the roster from
        #[arg(long, short, value_enum, default_value_t = GuildSource::Armory)]
        source: GuildSource,
    },

    /// Print a request URL without fetching it
    Url {
        #[command(subcommand)]
        target: UrlTarget,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Guild roster sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GuildSource {
    Armory,
    Wowheroes,
}

/// URL kinds.
#[derive(Debug, Subcommand)]
pub enum UrlTarget {
    /// Character sheet URL
    Character {
        #[arg(long, short)]
        realm: String,
        #[arg(long, short)]
        name: String,
    },

    /// Guild roster URL
    Guild {
        #[arg(long, short)]
        realm: String,
        #[arg(long, short)]
        name: String,
        #[arg(long, short, value_enum, default_value_t = GuildSource::Armory)]
        source: GuildSource,
    },

    /// Calendar feed URL
    Calendar {
        #[arg(long, short)]
        realm: String,
        #[arg(long, short = 'n')]
        character: String,
        #[arg(long)]
        token: String,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_guild_with_source() {
        let cli = Cli::try_parse_from([
            "wowtools", "guild", "--realm", "outland", "--name", "mysth", "--source", "wowheroes",
        ])
        .unwrap();
        match cli.command {
            Command::Guild { realm, name, source } => {
                assert_eq!(realm, "outland");
                assert_eq!(name, "mysth");
                assert_eq!(source, GuildSource::Wowheroes);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["wowtools", "parse", "-", "--debug"]).unwrap();
        assert!(cli.debug);
        assert!(matches!(cli.command, Command::Parse { .. }));
    }

    #[test]
    fn url_calendar_requires_token() {
        let result = Cli::try_parse_from([
            "wowtools", "url", "calendar", "--realm", "outland", "--character", "crushzilla",
        ]);
        assert!(result.is_err());
    }
}
