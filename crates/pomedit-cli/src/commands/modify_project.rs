use super::common::{edit_manifest, Context, ManifestArgs};
use anyhow::Result;
use clap::Args;
use pomedit_core::{apply_identity, IdentityFields};
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct ModifyProjectArgs {
    /// New groupId
    #[arg(long)]
    pub group_id: Option<String>,

    /// New artifactId
    #[arg(long)]
    pub artifact_id: Option<String>,

    /// New version
    #[arg(long)]
    pub version: Option<String>,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New URL
    #[arg(long)]
    pub url: Option<String>,

    #[command(flatten)]
    pub manifest: ManifestArgs,
}

/// Overwrite the project's identity fields
pub fn run(args: ModifyProjectArgs, ctx: &Context) -> Result<()> {
    let fields = IdentityFields {
        group_id: args.group_id,
        artifact_id: args.artifact_id,
        version: args.version,
        name: args.name,
        description: args.description,
        url: args.url,
    };
    if fields.is_empty() {
        warn!("No project field given, the manifest is only rewritten");
    }

    edit_manifest(ctx, &args.manifest, |document| Ok(apply_identity(document, &fields)))
}
