//! Ordered item sequence with a single advancing cursor.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An immutable record presented on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, reported with every decision.
    pub id: String,
    /// Headline shown on the card.
    pub caption: String,
    /// Image reference (URL or path). Opaque to the deck.
    #[serde(default)]
    pub image: Option<String>,
    /// Any further display fields (age, bio, ...).
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Item {
    pub fn new(id: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            caption: caption.into(),
            image: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("Failed to read deck file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse deck file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Duplicate item id '{id}' in deck")]
    DuplicateId { id: String },
}

#[derive(Debug, Deserialize)]
struct DeckFile {
    #[serde(default)]
    items: Vec<Item>,
}

/// Invariant: `cursor <= items.len()`. `cursor == items.len()` means exhausted.
#[derive(Debug, Clone)]
pub struct Deck {
    items: Vec<Item>,
    cursor: usize,
}

impl Deck {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items, cursor: 0 }
    }

    /// Loads `[[items]]` tables from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, DeckError> {
        let content = fs::read_to_string(path).map_err(|e| DeckError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file: DeckFile = toml::from_str(&content).map_err(|e| DeckError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut seen = std::collections::HashSet::new();
        for item in &file.items {
            if !seen.insert(item.id.as_str()) {
                return Err(DeckError::DuplicateId {
                    id: item.id.clone(),
                });
            }
        }

        Ok(Self::new(file.items))
    }

    /// Built-in five-profile deck used when no deck file is configured.
    pub fn sample() -> Self {
        let profiles = [
            ("Sarah", "24", "Coffee enthusiast | Adventure seeker | Dog mom", "photo-1494790108377-be9c29b29330"),
            ("Jessica", "26", "Artist | Yoga lover | Plant parent", "photo-1438761681033-6461ffad8d80"),
            ("Emily", "23", "Foodie | Traveler | Music festival addict", "photo-1534528741775-53994a69daeb"),
            ("Amanda", "27", "Fitness junkie | Bookworm | Beach lover", "photo-1517841905240-472988babdf9"),
            ("Rachel", "25", "Chef in training | Wine enthusiast | Comedy fan", "photo-1524504388940-b1c1722653e1"),
        ];

        let items = profiles
            .into_iter()
            .map(|(name, age, bio, photo)| {
                Item::new(name.to_lowercase(), name)
                    .with_image(format!(
                        "https://images.unsplash.com/{}?w=500&h=600&fit=crop",
                        photo
                    ))
                    .with_attribute("age", age)
                    .with_attribute("bio", bio)
            })
            .collect();

        Self::new(items)
    }

    /// Item under the cursor, or `None` once the deck is exhausted.
    pub fn current(&self) -> Option<&Item> {
        self.items.get(self.cursor)
    }

    /// Moves the cursor forward by one.
    ///
    /// Callers must check [`Deck::current`] first. Advancing an exhausted
    /// deck is a programming error; release builds leave the cursor alone.
    pub fn advance(&mut self) {
        debug_assert!(!self.is_exhausted(), "advance() on an exhausted deck");
        if self.cursor < self.items.len() {
            self.cursor += 1;
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.items.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}
