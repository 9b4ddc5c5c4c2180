//! `plugin-yml validate` command

use anyhow::Result;

use super::Session;
use crate::cli::{GlobalArgs, ValidateArgs};
use pluginyml::ops::{validate_project, ProjectOptions};

pub fn execute(global: &GlobalArgs, args: ValidateArgs) -> Result<()> {
    let session = Session::load(global)?;

    let opts = ProjectOptions {
        platforms: args.platform,
        graph: session.cli_path(args.graph),
        ..Default::default()
    };

    let platforms = validate_project(&session.manifest, &session.config, &opts)
        .map_err(|e| session.report(e))?;

    for platform in platforms {
        println!("{}: ok", platform.display_name());
    }

    Ok(())
}
