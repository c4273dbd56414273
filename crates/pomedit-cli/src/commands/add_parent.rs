use super::common::{edit_manifest, Context, ManifestArgs};
use anyhow::Result;
use clap::Args;
use pomedit_core::{set_parent, Parent};

#[derive(Args, Debug, Clone)]
pub struct AddParentArgs {
    /// Parent groupId
    #[arg(long)]
    pub group_id: String,

    /// Parent artifactId
    #[arg(long)]
    pub artifact_id: String,

    /// Parent version
    #[arg(long)]
    pub version: String,

    /// Relative path to the parent POM
    #[arg(long)]
    pub relative_path: Option<String>,

    #[command(flatten)]
    pub manifest: ManifestArgs,
}

/// Set the parent reference, replacing any existing one
pub fn run(args: AddParentArgs, ctx: &Context) -> Result<()> {
    let parent = Parent {
        relative_path: args.relative_path,
        ..Parent::new(args.group_id, args.artifact_id, args.version)
    };

    edit_manifest(ctx, &args.manifest, |document| Ok(set_parent(document, parent)))
}
