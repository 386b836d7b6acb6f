//! Import specifier rewriting module
//!
//! JavaScript sources are delivered through an injected rewrite capability
//! so `import`/`export` specifiers written for a package-manager layout
//! (bare module names, package-relative paths) can run unmodified in a
//! browser. The pipeline hands the capability the file's full text and the
//! configured rewrite map and uses its return value verbatim.

use crate::config::RewriteMap;

/// Rewrites module specifiers in JavaScript source text.
///
/// Implementations must be synchronous and side-effect-free from the
/// pipeline's point of view; the pipeline invokes the capability exactly
/// once per request and has no retry or error path of its own.
pub trait ImportRewriter: Send + Sync {
    fn rewrite(&self, source: &str, rewrites: &RewriteMap) -> String;
}

/// Table-driven rewriter: replaces quoted specifiers that appear as keys
/// in the rewrite map.
///
/// Both quote styles are handled, so `import x from 'pkg'` and
/// `export { y } from "pkg"` rewrite alike. Specifiers absent from the map
/// pass through untouched.
pub struct SpecifierRewriter;

impl ImportRewriter for SpecifierRewriter {
    fn rewrite(&self, source: &str, rewrites: &RewriteMap) -> String {
        // Apply replacements in sorted key order so the result does not
        // depend on map iteration order.
        let mut pairs: Vec<(&String, &String)> = rewrites.iter().collect();
        pairs.sort();

        let mut output = source.to_string();
        for (from, to) in pairs {
            output = output.replace(&format!("'{from}'"), &format!("'{to}'"));
            output = output.replace(&format!("\"{from}\""), &format!("\"{to}\""));
        }
        output
    }
}
