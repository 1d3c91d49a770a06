//! Tessella - CLI host

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use tessella::bridge::{self, PathConfig};
use tessella::util::logger;
use tessella::{NAME, VERSION};

/// A lifecycle-guarded bridge around an embedded script interpreter
#[derive(Parser, Debug)]
#[command(name = "tessella")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Where the interpreter's search paths come from: a manifest file, or
/// all four roles given explicitly.
#[derive(ClapArgs, Debug)]
struct PathArgs {
    /// Load paths from a tessella.toml manifest
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Interpreter home (standard modules)
    #[arg(long, value_name = "DIR")]
    home: Option<PathBuf>,

    /// Application code directory
    #[arg(long, value_name = "DIR")]
    app: Option<PathBuf>,

    /// Third-party packages directory
    #[arg(long, value_name = "DIR")]
    packages: Option<PathBuf>,

    /// Native-extension libraries directory
    #[arg(long, value_name = "DIR")]
    extensions: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize the interpreter, run one module, and finalize
    Run {
        #[command(flatten)]
        paths: PathArgs,

        /// Module to run
        #[arg(value_name = "MODULE")]
        module: String,
    },

    /// Validate the configured paths and report interpreter status
    Check {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        logger::init_debug();
    } else {
        logger::init();
    }

    match args.command {
        Commands::Run { paths, module } => {
            let config = resolve_paths(paths)?;
            let bridge = bridge::global();
            bridge
                .initialize(config)
                .context("interpreter initialization failed")?;
            let result = bridge
                .run_module(&module)
                .with_context(|| format!("failed to run module: {}", module));
            bridge.finalize_with_reason("run complete");
            result?;
        }
        Commands::Check { paths } => {
            let config = resolve_paths(paths)?;
            let bridge = bridge::global();
            bridge
                .initialize(config)
                .context("interpreter initialization failed")?;
            let status = bridge.status();
            bridge.finalize_with_reason("check complete");
            println!("initialized: {}", status.initialized);
            println!("modules run: {}", status.modules_run);
            eprintln!("Check passed!");
        }
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
        }
    }

    Ok(())
}

fn resolve_paths(paths: PathArgs) -> Result<PathConfig> {
    if let Some(manifest) = paths.manifest {
        return PathConfig::from_manifest(&manifest)
            .with_context(|| format!("failed to load manifest: {}", manifest.display()));
    }

    match (paths.home, paths.app, paths.packages, paths.extensions) {
        (Some(home), Some(app), Some(packages), Some(extensions)) => {
            Ok(PathConfig::new(home, app, packages, extensions))
        }
        _ => bail!("either --manifest or all of --home/--app/--packages/--extensions are required"),
    }
}
