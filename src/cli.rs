use std::path::PathBuf;

use clap::Parser;

/// A desk calculator with a restricted arithmetic evaluator.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Evaluate an expression, print the result and exit
    #[arg(short, long, value_name = "EXPR", allow_hyphen_values = true)]
    pub eval: Option<String>,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let args = Args::try_parse_from(["deskcalc"]).unwrap();
        assert!(args.eval.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_eval_and_config() {
        let args =
            Args::try_parse_from(["deskcalc", "--eval", "2+2", "-c", "/tmp/calc.toml"]).unwrap();
        assert_eq!(args.eval.as_deref(), Some("2+2"));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/calc.toml")));
    }

    #[test]
    fn test_eval_accepts_leading_minus() {
        let args = Args::try_parse_from(["deskcalc", "-e", "-3*2"]).unwrap();
        assert_eq!(args.eval.as_deref(), Some("-3*2"));
    }

    #[test]
    fn test_unknown_flag() {
        assert!(Args::try_parse_from(["deskcalc", "--bogus"]).is_err());
    }
}
