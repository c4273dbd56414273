pub mod add_dependency;
pub mod add_parent;
pub mod add_properties;
pub mod common;
pub mod delete_dependency;
pub mod modify_project;

pub use add_dependency::AddDependencyArgs;
pub use add_parent::AddParentArgs;
pub use add_properties::AddPropertiesArgs;
pub use common::{Context, ManifestArgs};
pub use delete_dependency::DeleteDependencyArgs;
pub use modify_project::ModifyProjectArgs;
