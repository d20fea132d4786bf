use clap::{Parser, Subcommand};
use kiln_build::{compile_command, Manifest, DEFAULT_COMPILER};
use kiln_xcode::{write_project, ProjectWriter, XcodeConfig};
use miette::Result;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kiln")]
#[command(author, version, about = "Turn a build description into a compiler command or an Xcode project")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate <name>.xcodeproj/project.pbxproj
    Xcode {
        /// Project manifest
        #[arg(short, long, default_value = "kiln.toml")]
        manifest: PathBuf,

        /// Directory the .xcodeproj bundle is created in
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Print the command that compiles the project directly
    #[command(name = "command")]
    Compile {
        /// Project manifest
        #[arg(short, long, default_value = "kiln.toml")]
        manifest: PathBuf,

        /// C compiler
        #[arg(long, env = "CC", default_value = DEFAULT_COMPILER)]
        compiler: String,
    },

    /// List every object of the Xcode project with its identifier
    Ids {
        /// Project manifest
        #[arg(short, long, default_value = "kiln.toml")]
        manifest: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Xcode { manifest, out_dir } => {
            let manifest = Manifest::from_file(&manifest)?;
            let project = manifest.to_project();
            let config = xcode_config(&manifest);

            let path = write_project(&out_dir, &project, &config)?;
            println!("Wrote {}", path.display());
        }

        Commands::Compile { manifest, compiler } => {
            let project = Manifest::from_file(&manifest)?.to_project();
            println!("{}", compile_command(&project, &compiler)?);
        }

        Commands::Ids { manifest } => {
            let manifest = Manifest::from_file(&manifest)?;
            let project = manifest.to_project();
            let config = xcode_config(&manifest);

            let file = ProjectWriter::new(&project, &config).write()?;
            for (id, key) in file.objects.iter() {
                println!("{}  {}", id, key);
            }
        }
    }

    Ok(())
}

fn xcode_config(manifest: &Manifest) -> XcodeConfig {
    let mut config = XcodeConfig::new();
    if let Some(organization) = &manifest.xcode.organization {
        config = config.organization_name(organization.clone());
    }
    config
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
