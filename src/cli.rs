use crate::options::SpeedLevel;
use lexopt::{Arg, Parser, ValueExt};
use std::path::PathBuf;

pub(crate) const USAGE: &str = concat!(
    "Usage: paddlesnake [<options>]\n",
    "\n",
    "Play Snake while dodging paddles\n",
    "\n",
    "Options:\n",
    "  -c, --config <PATH>    Read configuration from the given file\n",
    "  -n, --name <NAME>      Enter scores on the leaderboard under the given name\n",
    "  -s, --speed <1-3>      Set the speed level, overriding saved options\n",
    "      --log-file <PATH>  Write logs to the given file when PADDLESNAKE_LOG is set\n",
    "  -h, --help             Display this help message and exit\n",
    "  -V, --version          Show the program version and exit\n",
);

/// What the command line asked the program to do
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Invocation {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Arguments {
    pub(crate) config: Option<PathBuf>,
    pub(crate) name: Option<String>,
    pub(crate) speed: Option<SpeedLevel>,
    pub(crate) log_file: Option<PathBuf>,
}

impl Invocation {
    pub(crate) fn from_env() -> Result<Invocation, lexopt::Error> {
        Invocation::from_parser(Parser::from_env())
    }

    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('n') | Arg::Long("name") => {
                    args.name = Some(parser.value()?.string()?);
                }
                Arg::Short('s') | Arg::Long("speed") => {
                    args.speed = Some(parser.value()?.parse::<SpeedLevel>()?);
                }
                Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Invocation, lexopt::Error> {
        Invocation::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn no_args() {
        assert_eq!(parse(&[]).unwrap(), Invocation::Run(Arguments::default()));
    }

    #[test]
    fn all_args() {
        let inv = parse(&[
            "--config",
            "cfg.toml",
            "-n",
            "Nagini",
            "--speed=2",
            "--log-file",
            "snake.log",
        ])
        .unwrap();
        assert_eq!(
            inv,
            Invocation::Run(Arguments {
                config: Some(PathBuf::from("cfg.toml")),
                name: Some(String::from("Nagini")),
                speed: Some(SpeedLevel::Two),
                log_file: Some(PathBuf::from("snake.log")),
            })
        );
    }

    #[test]
    fn help_wins() {
        assert_eq!(parse(&["-s", "3", "--help"]).unwrap(), Invocation::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Invocation::Version);
    }

    #[test]
    fn bad_speed() {
        let e = parse(&["--speed", "4"]).unwrap_err();
        assert!(
            e.to_string().contains("speed level must be 1, 2, or 3"),
            "unexpected error: {e}"
        );
    }

    #[test]
    fn unexpected_arg() {
        assert!(parse(&["--fast"]).is_err());
        assert!(parse(&["extra"]).is_err());
    }
}
