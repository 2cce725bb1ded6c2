use crate::types::EnrichedRecord;

/// Put records in canonical order.
///
/// Two stable passes: by speaker, then by utterance identifier. The second pass
/// dominates, so the result is ordered by utterance identifier with ties kept in
/// the order left by the first pass. Every data file of a partition is written
/// from the same canonical order, so line `i` names the same utterance in each.
pub fn canonical_sort(mut records: Vec<EnrichedRecord>) -> Vec<EnrichedRecord> {
    records.sort_by(|a, b| a.speaker.cmp(&b.speaker));
    records.sort_by(|a, b| a.utterance_id.cmp(&b.utterance_id));
    records
}
