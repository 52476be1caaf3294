//! Application of parsed overrides to externally owned parameter
//! collections.

use indexmap::IndexMap;
use tracing::debug;

use crate::models::ParameterCollection;
use crate::params::parse::OverrideKey;

/// Apply overrides to every parameter whose (name, context) matches exactly.
///
/// Parameters without a matching override are left untouched, and unmatched
/// overrides are simply unused; neither is an error.  Returns the number of
/// parameters updated.
pub fn apply_overrides(
    overrides: &IndexMap<OverrideKey, f64>,
    collections: &mut [ParameterCollection],
) -> usize {
    let mut applied = 0;
    for collection in collections.iter_mut() {
        for parameter in &mut collection.parameters {
            let key = (
                parameter.name.clone(),
                parameter.context_label().to_string(),
            );
            if let Some(&value) = overrides.get(&key) {
                debug!(
                    collection = %collection.name,
                    parameter = %parameter.name,
                    context = %key.1,
                    value,
                    "applying parameter override"
                );
                parameter.value = value;
                applied += 1;
            }
        }
    }
    applied
}
