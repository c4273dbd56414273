use super::common::{edit_manifest, Context, ManifestArgs};
use anyhow::Result;
use clap::Args;
use pomedit_core::{add_dependency, Dependency, DependencyKey};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct AddDependencyArgs {
    /// Dependency groupId
    #[arg(long)]
    pub group_id: String,

    /// Dependency artifactId
    #[arg(long)]
    pub artifact_id: String,

    /// Dependency version
    #[arg(long)]
    pub version: Option<String>,

    /// Path of a system-scoped dependency
    #[arg(long)]
    pub system_path: Option<String>,

    /// Dependency type (jar, pom, war, ...)
    #[arg(long = "type", value_name = "TYPE")]
    pub dep_type: Option<String>,

    /// Dependency scope (compile, test, provided, ...)
    #[arg(long)]
    pub scope: Option<String>,

    /// Mark the dependency optional
    #[arg(long)]
    pub optional: bool,

    /// Also add the dependency to dependencyManagement
    #[arg(long)]
    pub modify_dependency_management: bool,

    #[command(flatten)]
    pub manifest: ManifestArgs,
}

impl AddDependencyArgs {
    fn dependency(&self) -> Dependency {
        Dependency {
            version: self.version.clone(),
            system_path: self.system_path.clone(),
            dep_type: self.dep_type.clone(),
            scope: self.scope.clone(),
            optional: self.optional.then(|| "true".to_string()),
            ..Dependency::new(self.group_id.as_str(), self.artifact_id.as_str())
        }
    }
}

/// Add (or replace) a dependency, keyed on groupId and artifactId
pub fn run(args: AddDependencyArgs, ctx: &Context) -> Result<()> {
    let dependency = args.dependency();
    let key = DependencyKey::coordinates(args.group_id.as_str(), args.artifact_id.as_str());
    info!(dependency = %dependency, "Adding the dependency");

    edit_manifest(ctx, &args.manifest, |document| {
        Ok(add_dependency(
            document,
            dependency,
            &key,
            args.modify_dependency_management,
        ))
    })
}
