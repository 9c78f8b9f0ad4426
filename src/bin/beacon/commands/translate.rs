//! `beacon translate` command

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::TranslateArgs;
use crate::commands::{emit_report, load_locator};

pub fn execute(config: &Path, args: TranslateArgs) -> Result<()> {
    let (locator, report) = load_locator(config)?;
    emit_report(&report);

    match locator.compilation_path(&args.path) {
        Some(backend) => {
            println!("{}", backend);
            Ok(())
        }
        None => bail!("no configured container maps {}", args.path.display()),
    }
}
