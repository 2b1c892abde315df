mod cli;
mod config;
mod logging;
mod paths;
mod runner;
mod templates;
mod workspace;

fn main() -> anyhow::Result<()> {
    logging::init();
    let invocation = cli::parse();
    runner::run(invocation)
}
