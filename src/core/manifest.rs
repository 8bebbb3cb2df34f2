//! Scheme manifests: the build artifacts that map a scheme to candidate
//! implementation identifiers.
//!
//! A manifest lives at `registry/schemes/<scheme>` below a build output
//! directory. It is plain UTF-8 with one implementation identifier per line.
//! Blank lines and lines starting with `#` are ignored.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// Directory (relative to a build output root) holding scheme manifests.
pub const MANIFEST_DIR: &str = "registry/schemes";

/// Header written as the first line of every generated manifest.
pub const GENERATED_HEADER: &str = "# generated by schemeport, do not edit";

/// RFC 3986 scheme grammar: `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*$").expect("valid scheme regex"));

/// Check whether `scheme` is a syntactically valid URI scheme.
///
/// Valid schemes are also safe to use as a single path component.
pub fn is_valid_scheme(scheme: &str) -> bool {
    SCHEME_RE.is_match(scheme)
}

/// Top-level directory of generated artifacts below the build output `root`.
pub fn registry_dir(root: &Path) -> PathBuf {
    root.join("registry")
}

/// Directory holding every scheme manifest below the build output `root`.
pub fn schemes_dir(root: &Path) -> PathBuf {
    registry_dir(root).join("schemes")
}

/// Path of the manifest for `scheme` below the build output `root`.
pub fn manifest_path(root: &Path, scheme: &str) -> PathBuf {
    schemes_dir(root).join(scheme)
}

/// Resource name of the manifest for `scheme`, independent of any root.
pub fn resource_name(scheme: &str) -> String {
    format!("{}/{}", MANIFEST_DIR, scheme)
}

/// Parse manifest contents into implementation identifiers, in file order.
pub fn parse_entries(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Render a manifest from its entries, including the generated header.
pub fn render(entries: &[String]) -> String {
    let mut out = String::from(GENERATED_HEADER);
    out.push('\n');
    for entry in entries {
        out.push_str(entry);
        out.push('\n');
    }
    out
}
