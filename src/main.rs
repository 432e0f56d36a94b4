use anyhow::Context;
use noteit::options::{self, RunMode};
use noteit::{error, logging, TuiApplication};

fn main() -> anyhow::Result<()> {
    let options = match options::parse_args(std::env::args().skip(1)) {
        Ok(RunMode::Edit(options)) => options,
        Ok(RunMode::Help) => {
            print!("{}", options::usage());
            return Ok(());
        }
        Ok(RunMode::Version) => {
            println!("noteit {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Err(err) => {
            eprintln!("{}", options::usage());
            return Err(err).context("invalid command line");
        }
    };

    logging::init(options.log_level, options.debug_log.as_deref());
    error::setup_panic_handler();
    log::info!("noteit {} starting", env!("CARGO_PKG_VERSION"));

    let mut app = TuiApplication::new(&options).context("failed to start editor")?;
    app.run().context("terminal session failed")?;

    log::info!("noteit exiting");
    Ok(())
}
