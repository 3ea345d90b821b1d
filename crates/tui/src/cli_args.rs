//! Command-line argument parsing.

use clap::Parser;

/// Command-line arguments for the shelf binary.
#[derive(Parser, Debug)]
#[command(term_width = 0)]
pub struct Args {
    /// Path to the command tree config file YAML.
    ///
    /// If not provided, defaults to `~/.config/shelf/config.yaml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Print the resolved config file path and exit.
    #[arg(long, action)]
    pub print_config_path: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["shelf"]);

        assert!(args.config_path.is_none());
        assert!(!args.print_config_path);
    }

    #[test]
    fn test_args_config_path() {
        let args = Args::parse_from(["shelf", "-c", "/custom/config.yaml"]);
        assert_eq!(args.config_path, Some("/custom/config.yaml".to_string()));

        let args = Args::parse_from(["shelf", "--config-path", "/custom/config.yaml"]);
        assert_eq!(args.config_path, Some("/custom/config.yaml".to_string()));
    }

    #[test]
    fn test_args_print_config_path() {
        let args = Args::parse_from(["shelf", "--print-config-path"]);
        assert!(args.print_config_path);
    }
}
