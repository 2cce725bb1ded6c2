//! Speech corpus preparation for Kaldi — catalogue in, audio files and data directories out.
//!
//! **kaldiprep** reads a recording catalogue (`speaker, item, media, prompt`),
//! downloads every recording from the Alveo content API into
//! `<audio_root>/<speaker>/<encoded_prompt>.wav`, and writes the Kaldi data files
//! for a reproducible train/test split:
//!
//! ```text
//! <kaldi_root>/data/train/{wav.scp,text,utt2spk}
//! <kaldi_root>/data/test/{wav.scp,text,utt2spk}
//! <kaldi_root>/data/local/corpus.txt
//! ```
//!
//! Every data file of a partition lists the same utterance identifiers
//! (`<speaker>__<encoded_prompt>`, e.g. `1_122__1_2_1_9`) in the same order.
//!
//! # Quick start
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> kaldiprep::Result<()> {
//! use kaldiprep::{AlveoClient, Credentials, PrepareOptions};
//!
//! let options = PrepareOptions::new().kaldi_root("egs/digits");
//! let client = AlveoClient::new(Credentials::from_env()?);
//! let summary = kaldiprep::prepare(&options, &client).await?;
//! println!("{} train / {} test", summary.data.train, summary.data.test);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "download")]
pub mod alveo;
pub mod artifact;
pub mod catalogue;
pub mod config;
pub mod enrich;
pub mod error;
pub mod numerate;
pub mod partition;
pub mod pipeline;
pub mod sort;
pub mod source;
pub mod types;

#[cfg(feature = "download")]
pub use alveo::AlveoClient;
pub use artifact::Artifact;
pub use config::{Credentials, PrepareOptions, SplitOptions};
pub use error::{Error, Result};
pub use pipeline::{
    download_audio, generate_data, prepare, DataSummary, DownloadSummary, PrepareSummary,
};
pub use source::DocumentSource;
pub use types::{CatalogueRecord, EnrichedRecord, Split};
