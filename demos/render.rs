//! Render a word cloud to a PNG.
//!
//! Usage:
//!   cargo run --example render -- [WORDS | @words.json] [OUT.png] [FONT...]
//!
//! WORDS is whitespace-separated text that gets random weights. A JSON file may
//! hold a string, a list of words, or an object mapping words to weights. With no
//! fonts given, the platform's installed Odia fonts are used.
//! Set CONJUNCT_CLOUD_SEED to make the output reproducible.

use std::path::PathBuf;

use anyhow::Context;

use conjunct_cloud::{make_word_cloud, CloudConfig, WordInput};

const DEFAULT_WORDS: &str =
    "ଶ୍ରୀଜଗନ୍ନାଥ ଓଡ଼ିଶା ଦୁର୍ଗାପୂଜା କଟକ ପୁରୀ ଭୁବନେଶ୍ୱର ନବରଙ୍ଗପୁର କୋରାପୁଟ ମୟୂରଭଞ୍ଜ";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let words = args.next().unwrap_or_else(|| DEFAULT_WORDS.to_string());
    let input = match words.strip_prefix('@') {
        Some(path) => {
            let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
            let value = serde_json::from_str(&json).with_context(|| format!("parsing {}", path))?;
            WordInput::from_json(&value)?
        }
        None => WordInput::text(words),
    };
    let out = args.next().unwrap_or_else(|| "wordcloud.png".to_string());
    let fonts: Vec<PathBuf> = args.map(PathBuf::from).collect();

    let mut config = CloudConfig::default()
        .with_orientations(vec![-90.0, -60.0, -30.0, 0.0, 30.0, 60.0, 90.0]);
    if let Ok(seed) = std::env::var("CONJUNCT_CLOUD_SEED") {
        config = config.with_seed(seed.parse().context("CONJUNCT_CLOUD_SEED")?);
    }

    let fonts = if fonts.is_empty() {
        None
    } else {
        Some(fonts.as_slice())
    };
    let cloud = make_word_cloud(input, fonts, &config)?;
    for word in &cloud.skipped {
        eprintln!("skipped {:?}", word);
    }
    cloud
        .image
        .save(&out)
        .with_context(|| format!("writing {}", out))?;
    println!(
        "wrote {} ({}x{}, {} words, {} attempt(s))",
        out,
        cloud.width(),
        cloud.height(),
        cloud.words.len(),
        cloud.attempts
    );
    Ok(())
}
