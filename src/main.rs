use clap::{Parser, Subcommand};

use version_bump_hooks::config;
use version_bump_hooks::git::Git2Repository;
use version_bump_hooks::hooks;
use version_bump_hooks::logs::LogManager;
use version_bump_hooks::ui;

#[derive(Parser)]
#[command(
    name = "version-bump-hooks",
    about = "Git hooks that bump sub-project versions and publish composite deployment tags"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(name = "pre-commit", about = "Bump changed sub-project versions and refresh the pending tag")]
    PreCommit,

    #[command(name = "post-commit", about = "Create and push the deployment tag when the commit requests it")]
    PostCommit,

    #[command(about = "Install the pre-commit and post-commit hooks into .git/hooks")]
    Install,
}

fn main() {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    if let Command::Install = args.command {
        run_install();
        return;
    }

    let log = match LogManager::new(&config.logs) {
        Ok(log) => log,
        Err(e) => {
            ui::display_error(&format!("Cannot initialize logs: {}", e));
            std::process::exit(1);
        }
    };

    let repo = match Git2Repository::discover() {
        Ok(repo) => repo,
        Err(e) => {
            log.error(&format!("Not in a git repository: {}", e));
            ui::display_error(&format!("Not in a git repository: {}", e));
            std::process::exit(1);
        }
    };

    let result = match args.command {
        Command::PreCommit => hooks::pre_commit::run(&config, &repo, &log),
        Command::PostCommit => hooks::post_commit::run(&config, &repo, &log),
        Command::Install => unreachable!("handled above"),
    };

    if let Err(e) = result {
        log.error(&e.to_string());
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run_install() {
    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            ui::display_error(&format!("Cannot determine working directory: {}", e));
            std::process::exit(1);
        }
    };

    match hooks::install::install_hooks(&cwd) {
        Ok(installed) => {
            for hook_path in installed {
                ui::display_success(&format!(
                    "{} hook installed successfully in {}",
                    hook_path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    hook_path
                        .parent()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default()
                ));
            }
        }
        Err(e) => {
            ui::display_error(&format!("Error installing hooks: {}", e));
            std::process::exit(1);
        }
    }
}
