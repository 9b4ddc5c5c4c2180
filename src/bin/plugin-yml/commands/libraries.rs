//! `plugin-yml libraries` command
//!
//! Prints what a libraries file would contain, without writing it.

use anyhow::{Context, Result};

use super::Session;
use crate::cli::{GlobalArgs, LibrariesArgs};
use pluginyml::ops::{project_libraries, ProjectOptions};

pub fn execute(global: &GlobalArgs, args: LibrariesArgs) -> Result<()> {
    let session = Session::load(global)?;

    let opts = ProjectOptions {
        graph: session.cli_path(args.graph),
        ..Default::default()
    };

    let libraries = project_libraries(&session.manifest, &session.config, &opts)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&libraries)
    } else {
        libraries.to_json()
    }
    .context("failed to serialize libraries")?;

    println!("{}", json);
    Ok(())
}
