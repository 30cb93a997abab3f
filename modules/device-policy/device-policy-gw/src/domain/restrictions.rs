//! Projection of a restriction bundle onto its enabled keys.

use std::collections::BTreeSet;

/// Keeps exactly the restriction keys whose flag is `true`.
pub fn enabled_restrictions<K, I>(bundle: I) -> BTreeSet<String>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, bool)>,
{
    bundle
        .into_iter()
        .filter_map(|(key, enabled)| enabled.then(|| key.into()))
        .collect()
}
