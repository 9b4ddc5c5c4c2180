//! `plugin-yml generate` command

use anyhow::Result;

use super::Session;
use crate::cli::{GenerateArgs, GlobalArgs};
use pluginyml::ops::{generate_project, ProjectOptions};

pub fn execute(global: &GlobalArgs, args: GenerateArgs) -> Result<()> {
    let session = Session::load(global)?;

    let opts = ProjectOptions {
        platforms: args.platform,
        output_dir: session.cli_path(args.out_dir),
        graph: session.cli_path(args.graph),
    };

    let results = generate_project(&session.manifest, &session.config, &opts)
        .map_err(|e| session.report(e))?;

    for (platform, result) in &results {
        eprintln!(
            "   Generated {} ({})",
            result.description_path.display(),
            platform.display_name()
        );
        if let Some(path) = &result.libraries_path {
            eprintln!(
                "   Generated {} ({} libraries)",
                path.display(),
                result.libraries.len()
            );
        }
    }

    Ok(())
}
