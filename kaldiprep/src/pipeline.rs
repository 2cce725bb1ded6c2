use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::artifact::Artifact;
use crate::config::PrepareOptions;
use crate::enrich::{enrich, enrich_all, find_collisions};
use crate::error::Result;
use crate::partition::partition;
use crate::sort::canonical_sort;
use crate::source::DocumentSource;
use crate::types::{CatalogueRecord, EnrichedRecord, Split};

/// Outcome of downloading the recordings of a catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DownloadSummary {
    pub files: usize,
    pub bytes: u64,
}

/// One data file written by [`generate_data`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenArtifact {
    pub artifact: Artifact,
    /// `None` for the corpus file, which covers the full record set.
    pub split: Option<Split>,
    pub path: PathBuf,
    pub lines: usize,
}

/// Outcome of generating the Kaldi data directories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSummary {
    pub total: usize,
    pub train: usize,
    pub test: usize,
    pub collisions: usize,
    pub artifacts: Vec<WrittenArtifact>,
}

/// Full summary of [`prepare`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrepareSummary {
    pub download: DownloadSummary,
    pub data: DataSummary,
}

/// Create `<audio_root>` and one directory per distinct speaker.
pub fn create_speaker_dirs(records: &[CatalogueRecord], audio_root: &Path) -> Result<()> {
    info!(path = %audio_root.display(), "creating audio directory");
    std::fs::create_dir_all(audio_root)?;

    let speakers: BTreeSet<&str> = records.iter().map(|r| r.speaker.as_str()).collect();
    for speaker in speakers {
        std::fs::create_dir_all(audio_root.join(speaker))?;
    }
    Ok(())
}

/// Fetch every recording into `<audio_root>/<speaker>/<encoded_prompt>.wav`.
///
/// Records are fetched one at a time in catalogue order. The first failure
/// aborts the run; files already written stay on disk.
pub async fn download_audio<S: DocumentSource>(
    records: &[CatalogueRecord],
    source: &S,
    audio_root: &Path,
) -> Result<DownloadSummary> {
    let audio_root = std::path::absolute(audio_root)?;
    create_speaker_dirs(records, &audio_root)?;

    info!(records = records.len(), "retrieving recordings");

    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let mut summary = DownloadSummary::default();
    for record in records {
        let reference = record.document_reference();
        let dest = enrich(record, &audio_root)?.file_path;

        debug!(%reference, path = %dest.display(), "downloading");
        pb.set_message(record.speaker.clone());

        let bytes = match source.download_document(&reference, &dest).await {
            Ok(n) => n,
            Err(e) => {
                pb.abandon();
                return Err(e);
            }
        };
        summary.files += 1;
        summary.bytes += bytes;
        pb.inc(1);
    }

    pb.finish_with_message("all recordings retrieved");
    info!(files = summary.files, bytes = summary.bytes, "download complete");
    Ok(summary)
}

/// Write the Kaldi data directories for a catalogue.
///
/// Enriches every record, partitions the canonically sorted set, sorts each
/// partition on its own and writes `wav.scp`, `text` and `utt2spk` per
/// partition, then `local/corpus.txt` over the full sorted set. Any I/O
/// failure aborts the run without cleaning up files already written.
pub fn generate_data(records: &[CatalogueRecord], options: &PrepareOptions) -> Result<DataSummary> {
    let train_dir = options.data_subdir(Split::Train.dir_name());
    let test_dir = options.data_subdir(Split::Test.dir_name());
    let local_dir = options.local_dir();
    for dir in [&train_dir, &test_dir, &local_dir] {
        std::fs::create_dir_all(dir)?;
    }

    let audio_root = options.resolve_audio_root()?;
    let full = canonical_sort(enrich_all(records, &audio_root)?);

    let collisions = find_collisions(&full);
    for (utterance_id, count) in &collisions {
        warn!(%utterance_id, count, "records share an utterance id and audio path");
    }

    let (train, test) = partition(&full, options.split.train_fraction, options.split.seed)?;
    let train = canonical_sort(train);
    let test = canonical_sort(test);

    let mut artifacts = Vec::new();
    for (split, set, dir) in [
        (Split::Train, &train, &train_dir),
        (Split::Test, &test, &test_dir),
    ] {
        info!(%split, records = set.len(), "generating data files");
        artifacts.extend(write_split(split, set, dir)?);
    }

    info!("generating corpus");
    let path = Artifact::Corpus.write(&full, &local_dir)?;
    artifacts.push(WrittenArtifact {
        artifact: Artifact::Corpus,
        split: None,
        path,
        lines: full.len(),
    });

    Ok(DataSummary {
        total: full.len(),
        train: train.len(),
        test: test.len(),
        collisions: collisions.len(),
        artifacts,
    })
}

fn write_split(split: Split, records: &[EnrichedRecord], dir: &Path) -> Result<Vec<WrittenArtifact>> {
    Artifact::PER_SPLIT
        .iter()
        .map(|artifact| -> Result<WrittenArtifact> {
            let path = artifact.write(records, dir)?;
            Ok(WrittenArtifact {
                artifact: *artifact,
                split: Some(split),
                path,
                lines: records.len(),
            })
        })
        .collect()
}

/// Load the catalogue, download every recording, then generate the data files.
pub async fn prepare<S: DocumentSource>(
    options: &PrepareOptions,
    source: &S,
) -> Result<PrepareSummary> {
    let records = crate::catalogue::load(options.catalogue())?;
    let download = download_audio(&records, source, &options.audio_root).await?;
    let data = generate_data(&records, options)?;
    info!("all operations completed successfully");
    Ok(PrepareSummary { download, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SplitOptions;
    use crate::error::Error;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::fs;

    /// Writes the reference itself as the document body.
    #[derive(Default)]
    struct EchoSource {
        requested: RefCell<Vec<String>>,
        fail_on: Option<String>,
    }

    impl DocumentSource for EchoSource {
        async fn download_document(&self, reference: &str, dest: &Path) -> Result<u64> {
            self.requested.borrow_mut().push(reference.to_string());
            if self.fail_on.as_deref() == Some(reference) {
                return Err(Error::Download(format!("{reference}: 404 Not Found")));
            }
            fs::write(dest, reference.as_bytes())?;
            Ok(reference.len() as u64)
        }
    }

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("kaldiprep_test_pipeline_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn catalogue() -> Vec<CatalogueRecord> {
        let prompts = [
            "one, two, one, nine",
            "three, two, four, four",
            "one, zero, nine, two",
            "five, six, seven, eight",
            "nine, oh, two, one",
        ];
        let mut records = Vec::new();
        for speaker in ["1_122", "1_248", "1_242"] {
            for (i, prompt) in prompts.iter().enumerate() {
                records.push(CatalogueRecord::new(
                    speaker,
                    format!("{speaker}_2_16_00{i}"),
                    format!("{speaker}_2_16_00{i}-ch6-speaker16.wav"),
                    *prompt,
                ));
            }
        }
        records
    }

    fn options(root: &Path) -> PrepareOptions {
        PrepareOptions::new()
            .audio_root(root.join("audio_data"))
            .kaldi_root(root.join("kaldi"))
            .split(SplitOptions::new().seed(42))
    }

    fn ids(contents: &str) -> Vec<String> {
        contents
            .lines()
            .map(|l| l.split(' ').next().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_generate_data_layout() {
        let root = scratch("layout");
        let opts = options(&root);

        let summary = generate_data(&catalogue(), &opts).unwrap();
        assert_eq!(summary.total, 15);
        assert_eq!(summary.train, 12);
        assert_eq!(summary.test, 3);
        assert_eq!(summary.collisions, 0);
        assert_eq!(summary.artifacts.len(), 7);

        for split in ["train", "test"] {
            for file in ["wav.scp", "text", "utt2spk"] {
                assert!(root.join("kaldi/data").join(split).join(file).is_file());
            }
        }
        assert!(root.join("kaldi/data/local/corpus.txt").is_file());

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_generate_data_cross_file_consistency() {
        let root = scratch("consistency");
        let opts = options(&root);
        generate_data(&catalogue(), &opts).unwrap();

        let mut seen = HashSet::new();
        let mut total = 0;
        for split in ["train", "test"] {
            let dir = root.join("kaldi/data").join(split);
            let wav = fs::read_to_string(dir.join("wav.scp")).unwrap();
            let text = fs::read_to_string(dir.join("text")).unwrap();
            let utt2spk = fs::read_to_string(dir.join("utt2spk")).unwrap();

            let wav_ids = ids(&wav);
            assert_eq!(wav_ids, ids(&text));
            assert_eq!(wav_ids, ids(&utt2spk));

            let mut sorted = wav_ids.clone();
            sorted.sort();
            assert_eq!(wav_ids, sorted);

            for id in wav_ids {
                assert!(seen.insert(id), "utterance in both partitions");
                total += 1;
            }
        }
        assert_eq!(total, 15);

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_generate_data_line_contents() {
        let root = scratch("contents");
        let opts = options(&root);
        generate_data(&catalogue(), &opts).unwrap();

        let mut text = String::new();
        let mut utt2spk = String::new();
        let mut wav = String::new();
        for split in ["train", "test"] {
            let dir = root.join("kaldi/data").join(split);
            text.push_str(&fs::read_to_string(dir.join("text")).unwrap());
            utt2spk.push_str(&fs::read_to_string(dir.join("utt2spk")).unwrap());
            wav.push_str(&fs::read_to_string(dir.join("wav.scp")).unwrap());
        }
        assert!(text.lines().any(|l| l == "1_122__1_2_1_9 one two one nine"));
        assert!(utt2spk.lines().any(|l| l == "1_122__1_2_1_9 1_122"));

        let wav_line = wav
            .lines()
            .find(|l| l.starts_with("1_122__1_2_1_9 "))
            .unwrap();
        let path = Path::new(wav_line.split_once(' ').unwrap().1);
        assert!(path.is_absolute());
        assert!(path.ends_with("audio_data/1_122/1_2_1_9.wav"));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_generate_data_corpus_covers_full_set() {
        let root = scratch("corpus");
        let opts = options(&root);
        generate_data(&catalogue(), &opts).unwrap();

        let corpus = fs::read_to_string(root.join("kaldi/data/local/corpus.txt")).unwrap();
        assert_eq!(corpus.lines().count(), 15);
        assert!(corpus.lines().all(|l| l.ends_with(' ')));
        assert!(!corpus.contains("__"));
        assert_eq!(corpus.lines().next(), Some("one zero nine two "));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_generate_data_reproducible() {
        let root = scratch("reproducible");
        let opts = options(&root);

        generate_data(&catalogue(), &opts).unwrap();
        let first = fs::read_to_string(root.join("kaldi/data/test/text")).unwrap();

        // Reversed input must not change the split or the order.
        let mut reversed = catalogue();
        reversed.reverse();
        generate_data(&reversed, &opts).unwrap();
        let second = fs::read_to_string(root.join("kaldi/data/test/text")).unwrap();

        assert_eq!(first, second);

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_generate_data_keeps_collisions() {
        let root = scratch("collisions");
        let opts = options(&root);
        let mut records = catalogue();
        records.push(CatalogueRecord::new("1_122", "dup", "dup.wav", "one, two, one, nine"));

        let summary = generate_data(&records, &opts).unwrap();
        assert_eq!(summary.total, 16);
        assert_eq!(summary.collisions, 1);

        let corpus = fs::read_to_string(root.join("kaldi/data/local/corpus.txt")).unwrap();
        assert_eq!(corpus.lines().count(), 16);

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_generate_data_empty_catalogue() {
        let root = scratch("empty");
        let result = generate_data(&[], &options(&root));
        assert!(matches!(result, Err(Error::EmptyCatalogue)));
        fs::remove_dir_all(&root).ok();
    }

    #[tokio::test]
    async fn test_download_audio_writes_files() {
        let root = scratch("download");
        let audio_root = root.join("audio_data");
        let source = EchoSource::default();
        let records = catalogue();

        let summary = download_audio(&records, &source, &audio_root).await.unwrap();
        assert_eq!(summary.files, 15);

        let requested = source.requested.borrow();
        assert_eq!(requested.len(), 15);
        assert_eq!(
            requested[0],
            "catalog/austalk/1_122_2_16_000/document/1_122_2_16_000-ch6-speaker16.wav"
        );

        let saved = audio_root.join("1_248").join("3_2_4_4.wav");
        assert_eq!(
            fs::read_to_string(&saved).unwrap(),
            "catalog/austalk/1_248_2_16_001/document/1_248_2_16_001-ch6-speaker16.wav"
        );

        fs::remove_dir_all(&root).ok();
    }

    #[tokio::test]
    async fn test_download_audio_aborts_on_first_error() {
        let root = scratch("download_error");
        let audio_root = root.join("audio_data");
        let records = catalogue();
        let source = EchoSource {
            fail_on: Some(records[1].document_reference()),
            ..Default::default()
        };

        let result = download_audio(&records, &source, &audio_root).await;
        assert!(matches!(result, Err(Error::Download(_))));
        assert_eq!(source.requested.borrow().len(), 2);
        assert!(audio_root.join("1_122").join("1_2_1_9.wav").is_file());
        assert!(!audio_root.join("1_122").join("3_2_4_4.wav").exists());

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_create_speaker_dirs_idempotent() {
        let root = scratch("speaker_dirs");
        let audio_root = root.join("audio_data");
        create_speaker_dirs(&catalogue(), &audio_root).unwrap();
        create_speaker_dirs(&catalogue(), &audio_root).unwrap();

        for speaker in ["1_122", "1_248", "1_242"] {
            assert!(audio_root.join(speaker).is_dir());
        }

        fs::remove_dir_all(&root).ok();
    }

    #[tokio::test]
    async fn test_prepare_end_to_end() {
        let root = scratch("prepare");
        let csv_path = root.join("dataset.csv");
        fs::write(
            &csv_path,
            "speaker,item,media,prompt\n\
             1_122,1_122_2_16_001,a.wav,\"one, two, one, nine\"\n\
             1_248,1_248_2_16_002,b.wav,\"three, two, four, four\"\n\
             1_242,1_242_2_16_003,c.wav,\"one, zero, nine, two\"\n",
        )
        .unwrap();
        let opts = options(&root).catalogue_path(&csv_path);

        let summary = prepare(&opts, &EchoSource::default()).await.unwrap();
        assert_eq!(summary.download.files, 3);
        assert_eq!(summary.data.total, 3);
        assert_eq!(summary.data.train + summary.data.test, 3);
        assert!(root.join("audio_data/1_242/1_0_9_2.wav").is_file());

        fs::remove_dir_all(&root).ok();
    }
}
