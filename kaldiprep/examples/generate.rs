//! Regenerate the Kaldi data files from a catalogue, without downloading audio.
//!
//! Usage: cargo run --example generate -- path/to/dataset.csv path/to/kaldi/recipe

use kaldiprep::PrepareOptions;

fn main() -> kaldiprep::Result<()> {
    let mut args = std::env::args().skip(1);
    let catalogue = args.next().expect("usage: generate <catalogue.csv> <kaldi-root>");
    let kaldi_root = args.next().expect("usage: generate <catalogue.csv> <kaldi-root>");

    let options = PrepareOptions::new()
        .catalogue_path(catalogue)
        .kaldi_root(kaldi_root);

    let records = kaldiprep::catalogue::load(options.catalogue())?;
    let summary = kaldiprep::generate_data(&records, &options)?;

    for artifact in &summary.artifacts {
        println!("{:>6}  {}", artifact.lines, artifact.path.display());
    }

    Ok(())
}
