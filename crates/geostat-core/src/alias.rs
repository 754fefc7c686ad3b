// crates/geostat-core/src/alias.rs

//! # Region Aliases
//!
//! Raw region names show up in several spellings: the English admin names of
//! the map (`ADM1_EN`), the Russian statistical names and the occasional
//! Kazakh form. [`AliasTable`] maps every known variant onto one canonical
//! Region Key.

use crate::text::normalize;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// (variant, canonical) pairs for the 17 oblasts and 3 cities of republican
/// significance.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("Abai Region", "ОБЛАСТЬ АБАЙ"),
    ("ОБЛАСТЬ АБАЙ", "ОБЛАСТЬ АБАЙ"),
    ("Jetisu Region", "ОБЛАСТЬ ЖЕТІСУ"),
    ("ОБЛАСТЬ ЖЕТІСУ", "ОБЛАСТЬ ЖЕТІСУ"),
    ("Ulytau Region", "ОБЛАСТЬ ҰЛЫТАУ"),
    ("ОБЛАСТЬ ҰЛЫТАУ", "ОБЛАСТЬ ҰЛЫТАУ"),
    ("Akmola Region", "АКМОЛИНСКАЯ ОБЛАСТЬ"),
    ("АКМОЛИНСКАЯ ОБЛАСТЬ", "АКМОЛИНСКАЯ ОБЛАСТЬ"),
    ("Aktobe Region", "АКТЮБИНСКАЯ ОБЛАСТЬ"),
    ("АКТЮБИНСКАЯ ОБЛАСТЬ", "АКТЮБИНСКАЯ ОБЛАСТЬ"),
    ("Almaty Region", "АЛМАТИНСКАЯ ОБЛАСТЬ"),
    ("АЛМАТИНСКАЯ ОБЛАСТЬ", "АЛМАТИНСКАЯ ОБЛАСТЬ"),
    ("Atyrau Region", "АТЫРАУСКАЯ ОБЛАСТЬ"),
    ("АТЫРАУСКАЯ ОБЛАСТЬ", "АТЫРАУСКАЯ ОБЛАСТЬ"),
    ("West Kazakhstan Region", "ЗАПАДНО-КАЗАХСТАНСКАЯ ОБЛАСТЬ"),
    ("ЗАПАДНО-КАЗАХСТАНСКАЯ ОБЛАСТЬ", "ЗАПАДНО-КАЗАХСТАНСКАЯ ОБЛАСТЬ"),
    ("Jambyl Region", "ЖАМБЫЛСКАЯ ОБЛАСТЬ"),
    ("ЖАМБЫЛСКАЯ ОБЛАСТЬ", "ЖАМБЫЛСКАЯ ОБЛАСТЬ"),
    ("Karaganda Region", "КАРАГАНДИНСКАЯ ОБЛАСТЬ"),
    ("КАРАГАНДИНСКАЯ ОБЛАСТЬ", "КАРАГАНДИНСКАЯ ОБЛАСТЬ"),
    ("Kostanay Region", "КОСТАНАЙСКАЯ ОБЛАСТЬ"),
    ("КОСТАНАЙСКАЯ ОБЛАСТЬ", "КОСТАНАЙСКАЯ ОБЛАСТЬ"),
    ("Kyzylorda Region", "КЫЗЫЛОРДИНСКАЯ ОБЛАСТЬ"),
    ("КЫЗЫЛОРДИНСКАЯ ОБЛАСТЬ", "КЫЗЫЛОРДИНСКАЯ ОБЛАСТЬ"),
    ("Mangystau Region", "МАНГИСТАУСКАЯ ОБЛАСТЬ"),
    ("МАНГИСТАУСКАЯ ОБЛАСТЬ", "МАНГИСТАУСКАЯ ОБЛАСТЬ"),
    ("Pavlodar Region", "ПАВЛОДАРСКАЯ ОБЛАСТЬ"),
    ("ПАВЛОДАРСКАЯ ОБЛАСТЬ", "ПАВЛОДАРСКАЯ ОБЛАСТЬ"),
    ("North Kazakhstan Region", "СЕВЕРО-КАЗАХСТАНСКАЯ ОБЛАСТЬ"),
    ("СЕВЕРО-КАЗАХСТАНСКАЯ ОБЛАСТЬ", "СЕВЕРО-КАЗАХСТАНСКАЯ ОБЛАСТЬ"),
    ("East Kazakhstan Region", "ВОСТОЧНО-КАЗАХСТАНСКАЯ ОБЛАСТЬ"),
    ("ВОСТОЧНО-КАЗАХСТАНСКАЯ ОБЛАСТЬ", "ВОСТОЧНО-КАЗАХСТАНСКАЯ ОБЛАСТЬ"),
    ("Turkistan Region", "ТУРКЕСТАНСКАЯ ОБЛАСТЬ"),
    ("ТУРКЕСТАНСКАЯ ОБЛАСТЬ", "ТУРКЕСТАНСКАЯ ОБЛАСТЬ"),
    ("Astana City", "Г.АСТАНА"),
    ("Г.АСТАНА", "Г.АСТАНА"),
    ("Astana", "Г.АСТАНА"),
    ("Almaty City", "Г.АЛМАТЫ"),
    ("Г.АЛМАТЫ", "Г.АЛМАТЫ"),
    ("Almaty", "Г.АЛМАТЫ"),
    ("Shymkent City", "Г.ШЫМКЕНТ"),
    ("Г.ШЫМКЕНТ", "Г.ШЫМКЕНТ"),
    ("Shymkent", "Г.ШЫМКЕНТ"),
];

static BUILTIN: Lazy<AliasTable> =
    Lazy::new(|| AliasTable::from_pairs(BUILTIN_ALIASES.iter().copied()));

/// Immutable many-to-one map from raw name variants to Region Keys.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// The built-in Kazakhstan table, shared for the whole process.
    pub fn builtin() -> &'static AliasTable {
        &BUILTIN
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(variant, canonical)| (variant.to_owned(), canonical.to_owned()))
            .collect();
        Self { entries }
    }

    /// Returns a copy of this table with `extra` entries layered on top.
    /// Extra entries win over existing variants with the same spelling.
    pub fn extended<'a, I>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut entries = self.entries.clone();
        for (variant, canonical) in extra {
            entries.insert(variant.clone(), canonical.clone());
        }
        Self { entries }
    }

    /// Exact lookup of a variant spelling.
    pub fn get(&self, variant: &str) -> Option<&str> {
        self.entries.get(variant).map(String::as_str)
    }

    /// Resolves a raw name to its Region Key.
    ///
    /// Order: exact variant, normalized variant, then the normalized raw name
    /// itself. The result is always normalized.
    ///
    /// ```rust
    /// use geostat_core::alias::AliasTable;
    ///
    /// let aliases = AliasTable::builtin();
    /// assert_eq!(aliases.resolve("Astana City"), "Г.АСТАНА");
    /// assert_eq!(aliases.resolve(" г.астана "), "Г.АСТАНА");
    /// assert_eq!(aliases.resolve("Unknown land"), "UNKNOWN LAND");
    /// ```
    pub fn resolve(&self, raw: &str) -> String {
        let folded = normalize(raw);
        let target = self
            .get(raw)
            .or_else(|| self.get(&folded))
            .unwrap_or(folded.as_str());
        normalize(target)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_admin_names_resolve_to_russian_keys() {
        let t = AliasTable::builtin();
        assert_eq!(t.resolve("Astana City"), "Г.АСТАНА");
        assert_eq!(t.resolve("West Kazakhstan Region"), "ЗАПАДНО-КАЗАХСТАНСКАЯ ОБЛАСТЬ");
        assert_eq!(t.resolve("Ulytau Region"), "ОБЛАСТЬ ҰЛЫТАУ");
    }

    #[test]
    fn normalized_lookup_is_second_chance() {
        let t = AliasTable::builtin();
        // Not an exact variant, but its normalized form is.
        assert_eq!(t.resolve("Область Абай"), "ОБЛАСТЬ АБАЙ");
        // English variants are stored mixed-case, so upper-casing misses them
        // and the raw name falls through normalized.
        assert_eq!(t.resolve("ASTANA CITY"), "ASTANA CITY");
    }

    #[test]
    fn extra_entries_override_builtin() {
        let extra: HashMap<String, String> = [
            ("Astana".to_string(), "НУР-СУЛТАН".to_string()),
            ("Nur-Sultan".to_string(), "г.астана".to_string()),
        ]
        .into_iter()
        .collect();
        let t = AliasTable::builtin().extended(&extra);
        assert_eq!(t.resolve("Astana"), "НУР-СУЛТАН");
        // Canonical values are normalized on the way out.
        assert_eq!(t.resolve("Nur-Sultan"), "Г.АСТАНА");
        assert_eq!(t.len(), AliasTable::builtin().len() + 1);
    }

    #[test]
    fn every_builtin_canonical_is_already_normalized() {
        for (_, canonical) in BUILTIN_ALIASES {
            assert_eq!(normalize(canonical), *canonical);
        }
    }
}
