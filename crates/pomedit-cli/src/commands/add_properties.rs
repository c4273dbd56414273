use super::common::{edit_manifest, Context, ManifestArgs};
use anyhow::{Context as _, Result};
use clap::Args;
use pomedit_core::{apply_properties, PropertiesEncoding, PropertySources};
use pomedit_fs::NativeFileSystem;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct AddPropertiesArgs {
    /// Properties file to read
    #[arg(long, value_name = "FILE")]
    pub properties_file: Option<PathBuf>,

    /// Comma-separated key=value pairs; these win over the file
    #[arg(long, value_name = "KEY=VALUE", value_delimiter = ',')]
    pub properties: Vec<String>,

    /// Add the properties to this profile instead of the global section
    #[arg(long)]
    pub profile: Option<String>,

    /// Encoding of the properties file [default: UTF-8]
    #[arg(long, value_name = "ENCODING")]
    pub properties_encoding: Option<String>,

    #[command(flatten)]
    pub manifest: ManifestArgs,
}

/// Add properties globally or to a profile
pub fn run(args: AddPropertiesArgs, ctx: &Context) -> Result<()> {
    let encoding_name = args
        .properties_encoding
        .as_deref()
        .unwrap_or(&ctx.config.properties_encoding);

    let sources = PropertySources {
        file: args.properties_file,
        inline: args.properties,
        encoding: encoding_name.parse::<PropertiesEncoding>()?,
    };

    if sources.is_empty() {
        warn!("This command needs the properties list or a properties file, nothing to do");
        return Ok(());
    }

    let fs = Arc::new(NativeFileSystem::current_dir().context("Failed to open working directory")?);
    let entries = sources.load(&fs)?;
    let profile = args.profile;

    edit_manifest(ctx, &args.manifest, |document| {
        Ok(apply_properties(document, &entries, profile.as_deref()))
    })
}
