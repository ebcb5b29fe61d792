use std::collections::HashMap;

/// Bestiary files compiled into the binary, keyed by id.
pub fn builtin_bestiaries() -> HashMap<&'static str, &'static str> {
    HashMap::from([("srd", include_str!("../content/bestiary/srd.json"))])
}
