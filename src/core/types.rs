//! Path component helpers shared by the matcher, walker and checker

use std::path::{Component, Path};

/// Relative path split into its normal components, e.g. `["src", "main.rs"]`.
///
/// Patterns are matched against components rather than against `Path`s so
/// that matching never depends on the platform separator.
pub type Components = Vec<String>;

/// Split a relative path into its normal components.
///
/// `.` components are dropped; `..` and root/prefix components are rejected
/// with `None` since they cannot name a location below a walk root.
pub fn split_components(path: &Path) -> Option<Components> {
    let mut out = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(name) => out.push(name.to_string_lossy().into_owned()),
            Component::CurDir => {},
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}

/// Join components with `/` for display.
pub fn join_components(components: &[String]) -> String {
    components.join("/")
}
