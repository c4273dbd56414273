//! Property injection into the global scope or a named profile

use crate::types::{Document, Profile, Properties};
use tracing::info;

/// Merge `entries` into the document
///
/// Without `profile_id` the entries go into the global properties. With a
/// profile id they go into that profile, which is appended to the document
/// when it does not exist yet. Existing keys are overwritten.
pub fn apply_properties(
    mut document: Document,
    entries: &Properties,
    profile_id: Option<&str>,
) -> Document {
    match profile_id {
        None => {
            info!(count = entries.len(), "Adding general properties to the model");
            merge_into(&mut document.properties, entries);
        }
        Some(id) => match document.profile_mut(id) {
            Some(profile) => {
                info!(profile = id, count = entries.len(), "Adding properties to profile");
                merge_into(&mut profile.properties, entries);
            }
            None => {
                info!(profile = id, count = entries.len(), "Creating profile with properties");
                document.profiles.push(Profile::new(id, entries.clone()));
            }
        },
    }
    document
}

fn merge_into(target: &mut Properties, entries: &Properties) {
    for (key, value) in entries {
        target.insert(key.clone(), value.clone());
    }
}
