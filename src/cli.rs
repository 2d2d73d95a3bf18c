use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use gcp_scanner::application::factories::CredentialSelection;
use std::path::PathBuf;

/// Map the GCP resources and service account impersonation paths reachable from a set of credentials
#[derive(Parser, Debug)]
#[command(name = "gcp-scanner")]
#[command(version)]
#[command(
    about = "Map the GCP resources and service account impersonation paths reachable from a set of credentials",
    long_about = None
)]
pub struct Args {
    /// Directory with service account key files (*.json)
    #[arg(short = 'k', long, value_name = "DIR")]
    pub sa_key_path: Option<PathBuf>,

    /// Use the default service account of the instance metadata server
    #[arg(short = 'm', long)]
    pub use_metadata: bool,

    /// gcloud configuration directory with cached credentials
    #[arg(short = 'g', long, value_name = "DIR")]
    pub gcloud_profile_path: Option<PathBuf>,

    /// Only use gcloud accounts whose name contains this substring
    #[arg(long, value_name = "SUBSTR", requires = "gcloud_profile_path")]
    pub key_name: Option<String>,

    /// Comma-separated files holding raw access tokens
    #[arg(short = 't', long, value_name = "FILES", value_delimiter = ',')]
    pub access_token_files: Vec<PathBuf>,

    /// Comma-separated JSON files with OAuth client credentials and a refresh token
    #[arg(short = 'r', long, value_name = "FILES", value_delimiter = ',')]
    pub refresh_token_files: Vec<PathBuf>,

    /// Directory the scan results are written to
    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        required_unless_present = "print_default_config"
    )]
    pub output_dir: Option<PathBuf>,

    /// Scan configuration file (JSON); without it everything is fetched and nothing impersonated
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only scan projects whose id contains this substring
    #[arg(short = 'p', long, value_name = "SUBSTR")]
    pub project: Option<String>,

    /// Comma-separated project ids to scan even if they cannot be listed
    #[arg(short = 'f', long, value_name = "IDS", value_delimiter = ',')]
    pub force_projects: Vec<String>,

    /// Keep only the most relevant fields of each resource
    #[arg(short = 'l', long)]
    pub light_scan: bool,

    /// Log filter, e.g. "info" or "gcp_scanner=debug"
    #[arg(long, default_value = "info", value_name = "FILTER")]
    pub log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Print a sample scan configuration and exit
    #[arg(long)]
    pub print_default_config: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        let args = Self::parse();
        if let Err(e) = args.validate() {
            e.exit();
        }
        args
    }

    /// Checks constraints clap cannot express declaratively
    pub fn validate(&self) -> Result<(), clap::Error> {
        if !self.print_default_config && self.credential_selection().is_empty() {
            return Err(Self::command().error(
                ErrorKind::MissingRequiredArgument,
                "at least one credential source is required: \
                 --sa-key-path, --use-metadata, --gcloud-profile-path, \
                 --access-token-files or --refresh-token-files",
            ));
        }
        Ok(())
    }

    pub fn credential_selection(&self) -> CredentialSelection {
        CredentialSelection {
            key_dir: self.sa_key_path.clone(),
            use_metadata: self.use_metadata,
            gcloud_profile_dir: self.gcloud_profile_path.clone(),
            key_name: self.key_name.clone(),
            access_token_files: self.access_token_files.clone(),
            refresh_token_files: self.refresh_token_files.clone(),
        }
    }
}
