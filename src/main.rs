use catdesc::cli::{Cli, Commands};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE so piping to `head` or `grep -q` exits quietly.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    let level = if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Describe(args) => catdesc::cli::commands::describe::run(args, &global),
        Commands::Import(args) => catdesc::cli::commands::import::run(args, &global),
        Commands::Units(args) => catdesc::cli::commands::units::run(args, &global),
        Commands::Config(cmd) => catdesc::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => catdesc::cli::commands::completions::run(args),
    }
}
