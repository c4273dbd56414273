use super::common::{edit_manifest, Context, ManifestArgs};
use anyhow::Result;
use clap::Args;
use pomedit_core::{count_matches, delete_dependency, DependencyKey, Error};
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct DeleteDependencyArgs {
    /// groupId to match
    #[arg(long)]
    pub group_id: Option<String>,

    /// artifactId to match
    #[arg(long)]
    pub artifact_id: Option<String>,

    /// version to match
    #[arg(long)]
    pub version: Option<String>,

    /// Also delete matching entries from dependencyManagement
    #[arg(long)]
    pub modify_dependency_management: bool,

    #[command(flatten)]
    pub manifest: ManifestArgs,
}

/// Delete every dependency matching the given coordinates
pub fn run(args: DeleteDependencyArgs, ctx: &Context) -> Result<()> {
    let key = DependencyKey::new(args.group_id, args.artifact_id, args.version);
    if key.is_empty() {
        return Err(Error::usage(
            "An artifactId, groupId or version is needed for dependency deletion",
        )
        .into());
    }
    info!(key = %key, "Removing dependency");

    let affect_management = args.modify_dependency_management;
    edit_manifest(ctx, &args.manifest, |document| {
        if count_matches(&document, &key, affect_management) == 0 {
            warn!(key = %key, "No dependency matches");
        }
        Ok(delete_dependency(document, &key, affect_management)?)
    })
}
