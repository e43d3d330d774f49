//! Catalog of Gemini prebuilt voices and their characteristics.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Broad voice category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VoiceCategory {
    Female,
    Male,
    Neutral,
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceEntry {
    pub name: &'static str,
    pub characteristic: &'static str,
    pub category: VoiceCategory,
}

const fn voice(
    name: &'static str,
    characteristic: &'static str,
    category: VoiceCategory,
) -> VoiceEntry {
    VoiceEntry {
        name,
        characteristic,
        category,
    }
}

use VoiceCategory::{Female, Male, Neutral};

const GEMINI_VOICES: &[VoiceEntry] = &[
    voice("Zephyr", "Bright", Neutral),
    voice("Autonoe", "Bright", Female),
    voice("Puck", "Upbeat", Male),
    voice("Laomedeia", "Upbeat", Female),
    voice("Charon", "Informative", Male),
    voice("Rasalgethi", "Informative", Male),
    voice("Sadaltager", "Knowledgeable", Male),
    voice("Kore", "Firm", Female),
    voice("Orus", "Firm", Male),
    voice("Alnilam", "Firm", Male),
    voice("Fenrir", "Excitable", Male),
    voice("Leda", "Youthful", Female),
    voice("Aoede", "Breezy", Female),
    voice("Callirrhoe", "Easy-going", Female),
    voice("Umbriel", "Easy-going", Female),
    voice("Enceladus", "Breathy", Male),
    voice("Iapetus", "Clear", Male),
    voice("Erinome", "Clear", Female),
    voice("Algieba", "Smooth", Male),
    voice("Despina", "Smooth", Female),
    voice("Algenib", "Gravelly", Male),
    voice("Achernar", "Soft", Male),
    voice("Schedar", "Even", Female),
    voice("Gacrux", "Mature", Male),
    voice("Pulcherrima", "Forward", Female),
    voice("Achird", "Friendly", Female),
    voice("Zubenelgenubi", "Casual", Male),
    voice("Vindemiatrix", "Gentle", Female),
    voice("Sadachbia", "Lively", Female),
    voice("Sulafat", "Warm", Female),
];

/// Keyword groups driving [`VoiceRegistry::suggestions`].
const SUGGESTION_RULES: &[(&[&str], &[&str])] = &[
    (
        &["friendly", "warm", "casual"],
        &["Achird", "Sulafat", "Zubenelgenubi"],
    ),
    (
        &["professional", "formal", "business"],
        &["Kore", "Alnilam", "Charon"],
    ),
    (
        &["energetic", "exciting", "dynamic"],
        &["Fenrir", "Laomedeia", "Sadachbia"],
    ),
    (
        &["calm", "gentle", "soft"],
        &["Vindemiatrix", "Achernar", "Callirrhoe"],
    ),
];

static REGISTRY: OnceLock<VoiceRegistry> = OnceLock::new();

/// Read-only voice catalog. Built once per process and never mutated.
#[derive(Debug)]
pub struct VoiceRegistry {
    entries: &'static [VoiceEntry],
    index: HashMap<&'static str, usize>,
}

impl VoiceRegistry {
    fn new(entries: &'static [VoiceEntry]) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.name, i))
            .collect();
        Self { entries, index }
    }

    /// The process-wide Gemini voice catalog.
    pub fn global() -> &'static VoiceRegistry {
        REGISTRY.get_or_init(|| Self::new(GEMINI_VOICES))
    }

    pub fn lookup(&self, name: &str) -> Option<&VoiceEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Whether `name` is a known voice. Exact, case-sensitive match.
    pub fn validate(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All entries in catalog order.
    pub fn all(&self) -> &[VoiceEntry] {
        self.entries
    }

    /// All voice names in catalog order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Voices whose characteristic contains `characteristic` (case-insensitive).
    pub fn by_characteristic(&self, characteristic: &str) -> Vec<&'static str> {
        let needle = characteristic.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.characteristic.to_lowercase().contains(&needle))
            .map(|e| e.name)
            .collect()
    }

    pub fn by_category(&self, category: VoiceCategory) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.name)
            .collect()
    }

    /// Keyword-based voice suggestions for a free-text context.
    pub fn suggestions(&self, context: &str) -> Vec<&'static str> {
        let context = context.to_lowercase();
        let mut suggested: Vec<&'static str> = Vec::new();
        for (keywords, voices) in SUGGESTION_RULES {
            if keywords.iter().any(|k| context.contains(k)) {
                for v in voices.iter() {
                    if !suggested.contains(v) {
                        suggested.push(*v);
                    }
                }
            }
        }
        suggested
    }
}
