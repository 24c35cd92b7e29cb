//! Entry point for the `voltsite` command-line interface.
#![forbid(unsafe_code)]

fn main() -> eyre::Result<()> {
    env_logger::init();
    voltsite_cli::run()?;
    Ok(())
}
