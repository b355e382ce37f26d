use anyhow::Result;
use clap::Parser;

use bump_release::git::Git2SourceControl;
use bump_release::lockfile::CargoCheck;
use bump_release::orchestrator::Orchestrator;
use bump_release::rewriter::BumpversionTool;
use bump_release::ui;
use bump_release::version::Target;

#[derive(clap::Parser)]
#[command(
    name = "bump-release",
    about = "Bump the project version, patch the changelog, and create a signed release commit"
)]
struct Args {
    #[arg(
        long,
        value_enum,
        default_value_t = Target::Dev,
        help = "The target of the version bump"
    )]
    target: Target,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let root = std::env::current_dir()?;
    let rewriter = BumpversionTool::new(&root);
    let source_control = match Git2SourceControl::discover(&root) {
        Ok(scm) => scm,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };
    let lockfile = CargoCheck::new(&root);

    let orchestrator = Orchestrator::new(&root, &rewriter, &source_control, &lockfile);

    ui::display_status(&format!("Bumping version (target: {})", args.target));
    let outcome = orchestrator.run(args.target)?;
    ui::display_success(&outcome.commit_message);

    Ok(())
}
