//! `beacon resolve` command

use std::path::Path;

use anyhow::{bail, Result};

use beacon::core::Resolution;
use beacon::DuplicatePolicy;

use crate::cli::ResolveArgs;
use crate::commands::{emit_report, load_locator};

pub fn execute(config: &Path, args: ResolveArgs) -> Result<()> {
    let (locator, report) = load_locator(config)?;
    emit_report(&report);

    if args.all {
        locator.set_policy(DuplicatePolicy::CollectAll);
    }

    let resolution = locator.resolve(&args.name);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    match resolution {
        Resolution::Found(artifacts) => {
            for artifact in artifacts {
                println!("{}", artifact);
            }
            Ok(())
        }
        Resolution::NotFound(marker) => bail!("{}", marker.description),
    }
}
