use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::numerate;
use crate::types::{CatalogueRecord, EnrichedRecord, UTTERANCE_SEPARATOR};

/// Derive every downstream field of a catalogue record.
///
/// Nothing is validated, so an empty speaker or prompt still yields a
/// syntactically valid path and identifier. A relative `audio_root` is made
/// absolute against the current directory; only that lookup can fail.
pub fn enrich(record: &CatalogueRecord, audio_root: &Path) -> Result<EnrichedRecord> {
    let audio_root = std::path::absolute(audio_root)?;
    Ok(enrich_under(record, &audio_root))
}

/// Enrich a whole catalogue, preserving input order.
pub fn enrich_all(records: &[CatalogueRecord], audio_root: &Path) -> Result<Vec<EnrichedRecord>> {
    let audio_root = std::path::absolute(audio_root)?;
    Ok(records.iter().map(|r| enrich_under(r, &audio_root)).collect())
}

/// `audio_root` must already be absolute.
fn enrich_under(record: &CatalogueRecord, audio_root: &Path) -> EnrichedRecord {
    let encoded_prompt = numerate::encode(&record.prompt);
    let file_path = audio_root
        .join(&record.speaker)
        .join(format!("{encoded_prompt}.wav"));
    let utterance_id = format!("{}{UTTERANCE_SEPARATOR}{encoded_prompt}", record.speaker);
    let display_prompt = numerate::display_format(&record.prompt);

    EnrichedRecord {
        speaker: record.speaker.clone(),
        encoded_prompt,
        file_path,
        utterance_id,
        display_prompt,
    }
}

/// Utterance identifiers shared by more than one record, with their counts.
///
/// Colliding records overwrite each other's audio file and appear under one
/// identifier in every data file. This only reports them; output is unchanged.
pub fn find_collisions(records: &[EnrichedRecord]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.utterance_id.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(id, n)| (id.to_string(), n))
        .collect()
}
