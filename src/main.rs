use anyhow::Result;
use clap::Parser;
use identityuser_installer::config::load_config;
use identityuser_installer::logging;
use identityuser_installer::setup::{Installer, SuffixPolicy};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Install the identityuser module into a Next.js project",
    long_about = None
)]
struct Args {
    /// Project root (defaults to the current directory)
    #[arg(long, env = "IDENTITYUSER_PROJECT_ROOT")]
    project_root: Option<PathBuf>,

    /// Template folder to install
    #[arg(long, env = "IDENTITYUSER_TEMPLATE_DIR")]
    template: Option<PathBuf>,

    /// Config file (defaults to identityuser.yaml in the project root)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How to name the folder when the default one is taken
    #[arg(long, value_enum, env = "IDENTITYUSER_SUFFIX_POLICY")]
    suffix_policy: Option<SuffixPolicy>,

    /// Increase diagnostic output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: Args) -> Result<()> {
    let project_root = match args.project_root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    let mut config = load_config(&project_root, args.config.as_deref())?;
    if let Some(template) = args.template {
        config.template_dir = template;
    }
    if let Some(policy) = args.suffix_policy {
        config.suffix_policy = policy;
    }

    Installer::new(config).run()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ Error during installation: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
