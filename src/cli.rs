//! Command-line arguments and their merge with the settings file

use std::path::PathBuf;

use clap::Parser;

use crate::constants::LOG_FILE_NAME;
use crate::params::QueryParameters;
use crate::routes::View;
use crate::settings::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "metadict-tui",
    version,
    about = "Terminal front-end for the Metadict dictionary service"
)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "URL",
        help = "Page URL to take queryString and dictionaries parameters from"
    )]
    pub url: Option<String>,
    #[arg(
        short,
        long,
        value_name = "TEXT",
        help = "Initial query (overrides the URL parameter)"
    )]
    pub query: Option<String>,
    #[arg(
        short,
        long,
        value_name = "KEYS",
        help = "Comma-separated dictionary keys (overrides the URL parameter)"
    )]
    pub dictionaries: Option<String>,
    #[arg(
        long,
        value_name = "URL",
        env = "METADICT_API_URL",
        help = "Base URL of the Metadict REST API (default: from settings)"
    )]
    pub api_url: Option<String>,
    #[arg(
        long,
        value_name = "PATH",
        default_value = "/search",
        help = "Route to open on start"
    )]
    pub view: String,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Settings file (default: ~/.metadict/config.yaml)"
    )]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        value_name = "FILE",
        help = "Log file (default: ~/.metadict/metadict-tui.log)"
    )]
    pub log_file: Option<PathBuf>,
}

impl CliArgs {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Settings::default_path)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| Settings::config_dir().join(LOG_FILE_NAME))
    }

    pub fn api_url(&self, settings: &Settings) -> String {
        self.api_url.clone().unwrap_or_else(|| settings.api_url.clone())
    }

    pub fn initial_view(&self) -> View {
        View::from_path(&self.view)
    }

    /// Initial parameters: URL first, then CLI overrides, then the settings'
    /// default dictionaries if nothing named any
    pub fn parameters(&self, settings: &Settings) -> anyhow::Result<QueryParameters> {
        let params = match &self.url {
            Some(url) => QueryParameters::from_url(url)?,
            None => QueryParameters::default(),
        };
        let mut params = params.with_overrides(self.query.clone(), self.dictionaries.clone());
        if params.dictionaries.is_none() {
            params.dictionaries = settings.default_dictionaries.clone();
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("metadict-tui").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_overrides_url_parameters() {
        let args = parse(&[
            "--url",
            "http://localhost/#/search?queryString=haus&dictionaries=de-en",
            "--dictionaries",
            "en-fr",
        ]);
        let params = args.parameters(&Settings::default()).unwrap();
        assert_eq!(params.query_string.as_deref(), Some("haus"));
        assert_eq!(params.dictionaries.as_deref(), Some("en-fr"));
    }

    #[test]
    fn test_settings_default_dictionaries() {
        let settings = Settings {
            default_dictionaries: Some("en-de".into()),
            ..Settings::default()
        };
        let params = parse(&["-q", "tree"]).parameters(&settings).unwrap();
        assert_eq!(params.query_string.as_deref(), Some("tree"));
        assert_eq!(params.dictionaries.as_deref(), Some("en-de"));
    }

    #[test]
    fn test_api_url_and_view() {
        let args = parse(&["--api-url", "https://dict.example.org/api", "--view", "/about/"]);
        assert_eq!(args.api_url(&Settings::default()), "https://dict.example.org/api");
        assert_eq!(args.initial_view(), View::About);
        assert_eq!(parse(&[]).initial_view(), View::Search);
    }
}
