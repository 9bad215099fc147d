//! Keyword tables driving the title classifier.
//!
//! The built-in table targets Korean livestock bulletins with English
//! synonyms. A sources file may replace any section through its optional
//! `keywords` key; sections it omits keep the built-in lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::events::Species;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTable {
    /// Substrings that tag a title with a species.
    pub species: BTreeMap<Species, Vec<String>>,
    /// Substrings that force `HIGH` severity.
    pub severity_high: Vec<String>,
    /// Substrings that raise severity to `MID` when no `HIGH` keyword matched.
    pub severity_mid: Vec<String>,
    /// Substrings that mark an official item as a disease update.
    pub disease: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

impl Default for KeywordTable {
    fn default() -> Self {
        let species = BTreeMap::from([
            (Species::Beef, owned(&["한우", "소고기", "우육", "beef"])),
            (Species::Pork, owned(&["돼지", "돈육", "삼겹", "pork"])),
            (Species::Poultry, owned(&["닭", "계육", "가금", "chicken"])),
            (Species::Duck, owned(&["오리", "duck"])),
            (Species::Egg, owned(&["계란", "달걀", "egg"])),
        ]);

        Self {
            species,
            severity_high: owned(&[
                "확진",
                "발생",
                "긴급",
                "살처분",
                "경보",
                "outbreak",
                "confirmed",
                "emergency",
                "culling",
                "alert",
            ]),
            severity_mid: owned(&["주의", "우려", "확대", "caution", "concern", "expanding"]),
            // " ai" keeps the leading space so words like "said" do not match.
            disease: owned(&[
                "asf",
                "돼지열병",
                "고병원성",
                " ai",
                "구제역",
                "swine fever",
                "foot-and-mouth",
                "hpai",
            ]),
        }
    }
}
