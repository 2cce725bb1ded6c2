use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::types::EnrichedRecord;

/// A Kaldi data file generated from a sorted record set.
///
/// One line per record, fields joined by a single space, every line
/// newline-terminated. Files are rewritten from scratch on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Artifact {
    /// `<utterance_id> <file_path>`
    WavScp,
    /// `<utterance_id> <display_prompt>`
    Text,
    /// `<utterance_id> <speaker>`
    Utt2Spk,
    /// `<display_prompt> ` (note the trailing space)
    Corpus,
}

impl Artifact {
    /// Files written into each of `data/train` and `data/test`.
    pub const PER_SPLIT: [Artifact; 3] = [Artifact::WavScp, Artifact::Text, Artifact::Utt2Spk];

    /// File name as Kaldi expects it.
    pub fn file_name(&self) -> &'static str {
        match self {
            Artifact::WavScp => "wav.scp",
            Artifact::Text => "text",
            Artifact::Utt2Spk => "utt2spk",
            Artifact::Corpus => "corpus.txt",
        }
    }

    /// Render the file contents for `records`, in the order given.
    pub fn render(&self, records: &[EnrichedRecord]) -> String {
        let mut out = String::new();
        for r in records {
            let line = match self {
                Artifact::WavScp => format!("{} {}\n", r.utterance_id, r.file_path.display()),
                Artifact::Text => format!("{} {}\n", r.utterance_id, r.display_prompt),
                Artifact::Utt2Spk => format!("{} {}\n", r.utterance_id, r.speaker),
                Artifact::Corpus => format!("{} \n", r.display_prompt),
            };
            out.push_str(&line);
        }
        out
    }

    /// Write the rendered file into `dir`, replacing any previous contents.
    pub fn write(&self, records: &[EnrichedRecord], dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        std::fs::write(&path, self.render(records))?;
        debug!(path = %path.display(), lines = records.len(), "wrote {}", self.file_name());
        Ok(path)
    }
}
