//! Installer steps: destination resolution, tree copy, alias rewriting,
//! route generation, and the dependency advisory

pub mod alias;
pub mod copy;
pub mod dependency_checker;
pub mod destination;
pub mod installer;
pub mod routes;

pub use alias::{rewrite_alias_references, AliasRewriter};
pub use copy::copy_tree;
pub use dependency_checker::{DependencyReport, DependencyStatus};
pub use destination::{next_available_name, resolve_destination, SuffixPolicy};
pub use installer::{InstallReport, Installer};
pub use routes::{emit_route_files, get_route_templates, RouteTemplate};
