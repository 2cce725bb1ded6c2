use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Collection prefix for document references on the content API.
pub const ITEM_PREFIX: &str = "catalog/austalk/";

/// One catalogue row: who spoke which prompt, and where the recording lives remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueRecord {
    pub speaker: String,
    pub item: String,
    pub media: String,
    pub prompt: String,
}

impl CatalogueRecord {
    pub fn new(
        speaker: impl Into<String>,
        item: impl Into<String>,
        media: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            speaker: speaker.into(),
            item: item.into(),
            media: media.into(),
            prompt: prompt.into(),
        }
    }

    /// Reference of the recording on the content API,
    /// e.g. `catalog/austalk/1_122_2_16_001/document/1_122_2_16_001-ch6-speaker16.wav`.
    pub fn document_reference(&self) -> String {
        format!("{ITEM_PREFIX}{}/document/{}", self.item, self.media)
    }
}

/// A catalogue record with every field the generated data files need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedRecord {
    pub speaker: String,
    /// Prompt in digit/underscore form, e.g. `1_2_1_9`.
    pub encoded_prompt: String,
    /// `<audio_root>/<speaker>/<encoded_prompt>.wav`
    pub file_path: PathBuf,
    /// `<speaker>__<encoded_prompt>`, the join key across all data files.
    pub utterance_id: String,
    /// Prompt words separated by single spaces, e.g. `one two one nine`.
    pub display_prompt: String,
}

/// Separator between speaker and encoded prompt in an utterance identifier.
pub const UTTERANCE_SEPARATOR: &str = "__";

impl EnrichedRecord {
    /// Split the utterance identifier back into `(speaker, encoded_prompt)`.
    ///
    /// Only unambiguous when the speaker contains no `__`.
    pub fn split_utterance_id(&self) -> Option<(&str, &str)> {
        self.utterance_id.split_once(UTTERANCE_SEPARATOR)
    }
}

/// The two partitions of a prepared corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Test,
}

impl Split {
    /// Directory name under `<kaldi_root>/data`.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
