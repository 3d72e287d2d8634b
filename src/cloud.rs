//! Cloud layout: per-word styling, placement, and canvas growth.
//!
//! Words are laid out heaviest first. Each word is shaped, rotated and then
//! dropped into the first free slot of a radial search around the canvas
//! center. If any word finds no slot the whole attempt is thrown away and
//! retried on a larger canvas, with fresh styling.

use image::{imageops, Rgb, Rgba, RgbaImage};
use rand::Rng;

use crate::error::{CloudError, Result, ShapingError};
use crate::input::{RandomWeights, WeightedWords, WordEntry};
use crate::placement::{find_slot, PlacedBox, Placement};
use crate::word_image::{rotate, TRANSPARENT};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// What the "previous color" is before any word has been drawn.
const INITIAL_LAST_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Canvas growth per retry, before scaling by the expanding factor.
const GROWTH_BASE: f32 = 50.0;

#[derive(Clone, Debug, PartialEq)]
pub enum ColorMode {
    /// Every word in black.
    Black,
    /// Uniformly random RGB per word.
    Random,
    /// Uniform choice from a fixed palette.
    Palette(Vec<Rgb<u8>>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CloudConfig {
    pub width: u32,
    pub height: u32,
    /// Gap kept around every word, in pixels.
    pub padding: u32,
    /// Each retry grows both sides by `50 * expanding_factor` pixels.
    pub expanding_factor: f32,
    /// Candidate rotations in degrees, counter-clockwise.
    pub orientations: Vec<f32>,
    pub colors: ColorMode,
    pub background: Rgba<u8>,
    pub max_attempts: usize,
    /// Largest canvas side the retry loop may grow to.
    pub max_canvas_size: u32,
    /// Weights for text and list input.
    pub random_weights: RandomWeights,
    pub seed: Option<u64>,
}

impl Default for CloudConfig {
    fn default() -> Self {
        CloudConfig {
            width: 800,
            height: 800,
            padding: 5,
            expanding_factor: 2.0,
            orientations: vec![0.0, 90.0],
            colors: ColorMode::Random,
            background: TRANSPARENT,
            max_attempts: 64,
            max_canvas_size: 16384,
            random_weights: RandomWeights::default(),
            seed: None,
        }
    }
}

impl CloudConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_expanding_factor(mut self, factor: f32) -> Self {
        self.expanding_factor = factor;
        self
    }

    pub fn with_orientations(mut self, orientations: Vec<f32>) -> Self {
        self.orientations = orientations;
        self
    }

    pub fn with_colors(mut self, colors: ColorMode) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_background(mut self, background: Rgba<u8>) -> Self {
        self.background = background;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_max_canvas_size(mut self, max_canvas_size: u32) -> Self {
        self.max_canvas_size = max_canvas_size;
        self
    }

    pub fn with_random_weights(mut self, random_weights: RandomWeights) -> Self {
        self.random_weights = random_weights;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Pixels added to each side per retry.
    pub fn growth_step(&self) -> u32 {
        (GROWTH_BASE * self.expanding_factor) as u32
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(CloudError::InvalidConfig(msg.to_owned()));
        if self.width == 0 || self.height == 0 {
            return invalid("canvas dimensions must be non-zero");
        }
        if self.width.max(self.height) > self.max_canvas_size {
            return invalid("initial canvas exceeds max_canvas_size");
        }
        if self.orientations.is_empty() {
            return invalid("at least one orientation is required");
        }
        if self.orientations.iter().any(|o| !o.is_finite()) {
            return invalid("orientations must be finite");
        }
        if matches!(&self.colors, ColorMode::Palette(p) if p.is_empty()) {
            return invalid("color palette is empty");
        }
        if !self.expanding_factor.is_finite() || self.growth_step() == 0 {
            return invalid("expanding factor must grow the canvas by at least one pixel");
        }
        if self.padding > self.max_canvas_size {
            return invalid("padding exceeds max_canvas_size");
        }
        if self.max_attempts == 0 {
            return invalid("max_attempts must be at least 1");
        }
        Ok(())
    }
}

/// Styling drawn for one word in one attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct WordStyle {
    pub font_index: usize,
    pub font_size: f32,
    pub color: Rgb<u8>,
    pub orientation: f32,
}

/// Turns a word into an upright, tinted image.
pub trait WordRenderer {
    fn font_count(&self) -> usize;

    fn render_word(&self, text: &str, style: &WordStyle) -> Result<RgbaImage, ShapingError>;

    /// Pixels per em `render_word` will draw `style` at.
    fn pixel_size(&self, style: &WordStyle) -> f32 {
        style.font_size
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub weight: f64,
    /// Padded footprint on the canvas.
    pub bounds: PlacedBox,
    pub style: WordStyle,
}

#[derive(Clone, Debug)]
pub struct WordCloud {
    pub image: RgbaImage,
    /// In placement order.
    pub words: Vec<PlacedWord>,
    /// Words that could not be shaped in the final attempt.
    pub skipped: Vec<String>,
    pub attempts: usize,
}

impl WordCloud {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

enum AttemptOutcome {
    Complete {
        image: RgbaImage,
        words: Vec<PlacedWord>,
        skipped: Vec<String>,
    },
    Exhausted {
        word: String,
    },
    /// The word's em alone is larger than any canvas the budget allows.
    Oversized {
        word: String,
        pixel_size: f32,
    },
}

struct StylePicker<'a> {
    config: &'a CloudConfig,
    font_count: usize,
    last_color: Rgb<u8>,
}

impl<'a> StylePicker<'a> {
    fn new(config: &'a CloudConfig, font_count: usize) -> StylePicker<'a> {
        StylePicker {
            config,
            font_count,
            last_color: INITIAL_LAST_COLOR,
        }
    }

    fn pick<G: Rng + ?Sized>(&mut self, weight: f64, rng: &mut G) -> WordStyle {
        let font_index = rng.random_range(0..self.font_count);
        let font_size = (weight * 10.0 + 20.0) as f32;
        let color = self.pick_color(rng);
        let orientations = &self.config.orientations;
        let orientation = orientations[rng.random_range(0..orientations.len())];
        WordStyle {
            font_index,
            font_size,
            color,
            orientation,
        }
    }

    /// Redraws once if the draw repeats the previous word's color.
    fn pick_color<G: Rng + ?Sized>(&mut self, rng: &mut G) -> Rgb<u8> {
        let last = self.last_color;
        let color = redraw_once(last, || self.draw_color(rng));
        self.last_color = color;
        color
    }

    fn draw_color<G: Rng + ?Sized>(&self, rng: &mut G) -> Rgb<u8> {
        match &self.config.colors {
            ColorMode::Black => BLACK,
            ColorMode::Random => Rgb(rng.random()),
            ColorMode::Palette(palette) => palette[rng.random_range(0..palette.len())],
        }
    }
}

/// Take `draw()`, or one more `draw()` if the first equals `last`.
fn redraw_once(last: Rgb<u8>, mut draw: impl FnMut() -> Rgb<u8>) -> Rgb<u8> {
    let color = draw();
    if color == last {
        draw()
    } else {
        color
    }
}

fn run_attempt<R, G>(
    order: &[&WordEntry],
    renderer: &R,
    config: &CloudConfig,
    picker: &mut StylePicker<'_>,
    (width, height): (u32, u32),
    rng: &mut G,
) -> AttemptOutcome
where
    R: WordRenderer + ?Sized,
    G: Rng + ?Sized,
{
    let mut image = RgbaImage::from_pixel(width, height, config.background);
    let mut boxes: Vec<PlacedBox> = Vec::with_capacity(order.len());
    let mut words = Vec::with_capacity(order.len());
    let mut skipped = Vec::new();
    let inset = (config.padding / 2) as i64;

    for entry in order {
        let style = picker.pick(entry.weight, rng);
        let pixel_size = renderer.pixel_size(&style);
        if pixel_size.is_nan() || pixel_size > config.max_canvas_size as f32 {
            return AttemptOutcome::Oversized {
                word: entry.text.clone(),
                pixel_size,
            };
        }
        let word_image = match renderer.render_word(&entry.text, &style) {
            Ok(upright) => rotate(&upright, style.orientation),
            Err(e) => {
                warn!("skipping {:?}: {}", entry.text, e);
                skipped.push(entry.text.clone());
                continue;
            }
        };
        let padded_w = word_image.width().saturating_add(config.padding);
        let padded_h = word_image.height().saturating_add(config.padding);
        match find_slot(width, height, &boxes, padded_w, padded_h) {
            Placement::Placed(bounds) => {
                debug!(
                    "placed {:?} (weight {}) at {:?}",
                    entry.text, entry.weight, bounds
                );
                imageops::overlay(
                    &mut image,
                    &word_image,
                    bounds.left + inset,
                    bounds.top + inset,
                );
                boxes.push(bounds);
                words.push(PlacedWord {
                    text: entry.text.clone(),
                    weight: entry.weight,
                    bounds,
                    style,
                });
            }
            Placement::Exhausted => {
                return AttemptOutcome::Exhausted {
                    word: entry.text.clone(),
                }
            }
        }
    }
    AttemptOutcome::Complete {
        image,
        words,
        skipped,
    }
}

/// Lay out `words` heaviest first, growing the canvas until every word fits.
pub fn render_cloud<R, G>(
    words: &WeightedWords,
    renderer: &R,
    config: &CloudConfig,
    rng: &mut G,
) -> Result<WordCloud>
where
    R: WordRenderer + ?Sized,
    G: Rng + ?Sized,
{
    config.validate()?;
    if renderer.font_count() == 0 {
        return Err(CloudError::NoFonts);
    }
    let order = words.by_weight();
    let mut picker = StylePicker::new(config, renderer.font_count());
    let step = config.growth_step();
    let (mut width, mut height) = (config.width, config.height);
    let mut attempts = 0;
    loop {
        attempts += 1;
        let outcome = run_attempt(&order, renderer, config, &mut picker, (width, height), rng);
        match outcome {
            AttemptOutcome::Complete {
                image,
                words,
                skipped,
            } => {
                info!(
                    "placed {} words on {}x{} after {} attempt(s)",
                    words.len(),
                    width,
                    height,
                    attempts
                );
                return Ok(WordCloud {
                    image,
                    words,
                    skipped,
                    attempts,
                });
            }
            AttemptOutcome::Exhausted { word } => {
                let next_w = width.saturating_add(step);
                let next_h = height.saturating_add(step);
                if attempts >= config.max_attempts
                    || next_w.max(next_h) > config.max_canvas_size
                {
                    return Err(CloudError::AttemptBudgetExceeded {
                        attempts,
                        width,
                        height,
                    });
                }
                info!(
                    "no room for {:?} on {}x{}, retrying on {}x{}",
                    word, width, height, next_w, next_h
                );
                width = next_w;
                height = next_h;
            }
            AttemptOutcome::Oversized { word, pixel_size } => {
                warn!(
                    "{:?} at {}px per em cannot fit a {}px canvas",
                    word, pixel_size, config.max_canvas_size
                );
                return Err(CloudError::AttemptBudgetExceeded {
                    attempts,
                    width,
                    height,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::cell::RefCell;

    /// Renders every word as a solid block: half the font size wide per char, one font size tall.
    #[derive(Default)]
    struct BlockRenderer {
        fonts: usize,
        broken: Vec<&'static str>,
        attempted: RefCell<Vec<String>>,
    }

    impl BlockRenderer {
        fn new() -> BlockRenderer {
            BlockRenderer {
                fonts: 2,
                ..BlockRenderer::default()
            }
        }
    }

    impl WordRenderer for BlockRenderer {
        fn font_count(&self) -> usize {
            self.fonts
        }

        fn render_word(&self, text: &str, style: &WordStyle) -> Result<RgbaImage, ShapingError> {
            self.attempted.borrow_mut().push(text.to_owned());
            if self.broken.iter().any(|b| *b == text) {
                return Err(ShapingError::NoGlyphs {
                    text: text.to_owned(),
                });
            }
            let width = (text.chars().count() as f32 * style.font_size * 0.5).ceil() as u32;
            let height = style.font_size.ceil() as u32;
            let Rgb([r, g, b]) = style.color;
            Ok(RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255])))
        }
    }

    fn upright() -> CloudConfig {
        CloudConfig::default().with_orientations(vec![0.0])
    }

    fn words(pairs: &[(&str, f64)]) -> WeightedWords {
        WeightedWords::from_pairs(pairs.iter().copied()).unwrap()
    }

    fn assert_pairwise_disjoint(cloud: &WordCloud) {
        for (i, a) in cloud.words.iter().enumerate() {
            assert!(a.bounds.fits_within(cloud.width(), cloud.height()));
            for b in &cloud.words[i + 1..] {
                assert!(a.bounds.is_disjoint(&b.bounds), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn two_words_heaviest_first() {
        let renderer = BlockRenderer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let cloud = render_cloud(
            &words(&[("B", 1.0), ("A", 5.0)]),
            &renderer,
            &upright(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(*renderer.attempted.borrow(), ["A", "B"]);
        assert_eq!(cloud.attempts, 1);
        assert_eq!(cloud.words.len(), 2);
        assert_eq!(cloud.words[0].text, "A");
        assert_eq!(cloud.words[0].style.font_size, 70.0);
        assert_eq!(cloud.words[1].style.font_size, 30.0);
        assert_pairwise_disjoint(&cloud);

        // Each word is painted inside its own padded box.
        for word in &cloud.words {
            let inset = 2;
            let x = (word.bounds.left + inset) as u32;
            let y = (word.bounds.top + inset) as u32;
            let px = cloud.image.get_pixel(x, y);
            assert_eq!(px.0[3], 255);
            assert_eq!(px.0[..3], word.style.color.0);
        }
        // The heaviest word sits on the canvas center.
        assert_eq!(cloud.words[0].bounds, PlacedBox::new(380, 363, 40, 75));
    }

    #[test]
    fn words_are_attempted_in_non_increasing_weight() {
        let renderer = BlockRenderer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let input = words(&[
            ("e", 2.0),
            ("bb", 7.5),
            ("c", 7.5),
            ("dddd", 1.0),
            ("a", 12.0),
        ]);
        let cloud = render_cloud(&input, &renderer, &upright(), &mut rng).unwrap();
        assert_eq!(*renderer.attempted.borrow(), ["a", "bb", "c", "e", "dddd"]);
        let weights: Vec<f64> = cloud.words.iter().map(|w| w.weight).collect();
        assert!(weights.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn many_rotated_words_never_overlap() {
        let renderer = BlockRenderer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let pairs: Vec<(String, f64)> = (0..25)
            .map(|i| ("w".repeat(1 + i % 6), (1 + (i * 7) % 13) as f64))
            .enumerate()
            .map(|(i, (w, f))| (format!("{}{}", w, i), f))
            .collect();
        let input = WeightedWords::from_pairs(pairs).unwrap();
        let config = CloudConfig::default()
            .with_size(300, 300)
            .with_orientations(vec![0.0, 90.0, -30.0]);
        let cloud = render_cloud(&input, &renderer, &config, &mut rng).unwrap();
        assert_eq!(cloud.words.len(), 25);
        assert_pairwise_disjoint(&cloud);
        let step = config.growth_step();
        assert_eq!((cloud.width() - 300) % step, 0);
        assert_eq!(cloud.width(), cloud.height());
    }

    #[test]
    fn oversized_word_grows_the_canvas() {
        let renderer = BlockRenderer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        // 10 chars at size 120: 600x120, padded to 605x125.
        let input = words(&[("WWWWWWWWWW", 10.0)]);
        let config = upright().with_size(300, 300);
        let cloud = render_cloud(&input, &renderer, &config, &mut rng).unwrap();
        assert_eq!(cloud.attempts, 5);
        assert_eq!(cloud.image.dimensions(), (700, 700));
        assert_eq!(cloud.words.len(), 1);
    }

    #[test]
    fn attempt_budget_is_enforced() {
        let renderer = BlockRenderer::new();
        let input = words(&[("WWWWWWWWWW", 10.0)]);

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = upright().with_size(300, 300).with_max_attempts(2);
        match render_cloud(&input, &renderer, &config, &mut rng) {
            Err(CloudError::AttemptBudgetExceeded {
                attempts,
                width,
                height,
            }) => assert_eq!((attempts, width, height), (2, 400, 400)),
            other => panic!("expected budget error, got {:?}", other.map(|c| c.attempts)),
        }

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = upright().with_size(300, 300).with_max_canvas_size(450);
        assert!(matches!(
            render_cloud(&input, &renderer, &config, &mut rng),
            Err(CloudError::AttemptBudgetExceeded { attempts: 2, .. })
        ));
    }

    #[test]
    fn empty_input_gives_blank_canvas() {
        let renderer = BlockRenderer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let background = Rgba([10, 20, 30, 255]);
        let config = CloudConfig::default()
            .with_size(120, 90)
            .with_background(background);
        let cloud = render_cloud(&WeightedWords::new(), &renderer, &config, &mut rng).unwrap();
        assert_eq!(cloud.image.dimensions(), (120, 90));
        assert!(cloud.words.is_empty());
        assert!(cloud.image.pixels().all(|p| *p == background));
    }

    #[test]
    fn unshapeable_words_are_skipped() {
        let renderer = BlockRenderer {
            broken: vec!["bad"],
            ..BlockRenderer::new()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let input = words(&[("good", 3.0), ("bad", 9.0), ("fine", 1.0)]);
        let cloud = render_cloud(&input, &renderer, &upright(), &mut rng).unwrap();
        assert_eq!(cloud.skipped, ["bad"]);
        let placed: Vec<&str> = cloud.words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(placed, ["good", "fine"]);
    }

    #[test]
    fn same_seed_same_cloud() {
        let renderer = BlockRenderer::new();
        let input = words(&[("alpha", 4.0), ("beta", 2.0), ("gamma", 3.0)]);
        let config = CloudConfig::default().with_size(200, 200);
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            render_cloud(&input, &renderer, &config, &mut rng).unwrap()
        };
        let (a, b) = (run(42), run(42));
        assert_eq!(a.words, b.words);
        assert_eq!(a.image, b.image);
    }

    #[test]
    fn color_modes() {
        let renderer = BlockRenderer::new();
        let input = words(&[("a", 1.0), ("b", 1.0), ("c", 1.0), ("d", 1.0)]);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = upright().with_colors(ColorMode::Black);
        let cloud = render_cloud(&input, &renderer, &config, &mut rng).unwrap();
        assert!(cloud.words.iter().all(|w| w.style.color == BLACK));

        let palette = vec![Rgb([148, 0, 211]), Rgb([0, 0, 255]), Rgb([5, 108, 8])];
        let config = upright().with_colors(ColorMode::Palette(palette.clone()));
        let cloud = render_cloud(&input, &renderer, &config, &mut rng).unwrap();
        assert!(cloud.words.iter().all(|w| palette.contains(&w.style.color)));
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let renderer = BlockRenderer::new();
        let input = words(&[("a", 1.0)]);
        let bad = [
            CloudConfig::default().with_orientations(Vec::new()),
            CloudConfig::default().with_colors(ColorMode::Palette(Vec::new())),
            CloudConfig::default().with_expanding_factor(0.0),
            CloudConfig::default().with_size(0, 100),
            CloudConfig::default().with_max_attempts(0),
            CloudConfig::default().with_padding(u32::MAX),
        ];
        for config in &bad {
            let mut rng = ChaCha8Rng::seed_from_u64(0);
            assert!(matches!(
                render_cloud(&input, &renderer, config, &mut rng),
                Err(CloudError::InvalidConfig(_))
            ));
        }

        let fontless = BlockRenderer::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            render_cloud(&input, &fontless, &CloudConfig::default(), &mut rng),
            Err(CloudError::NoFonts)
        ));
    }

    #[test]
    fn huge_weight_ends_in_budget_error() {
        let renderer = BlockRenderer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let input = words(&[("small", 2.0), ("A", 100_000.0)]);
        let result = render_cloud(&input, &renderer, &upright(), &mut rng);
        assert!(matches!(
            result,
            Err(CloudError::AttemptBudgetExceeded {
                attempts: 1,
                width: 800,
                height: 800
            })
        ));
        // Rejected before anything was rendered.
        assert!(renderer.attempted.borrow().is_empty());
    }

    fn draw_from(script: &[Rgb<u8>], last: Rgb<u8>) -> (Rgb<u8>, usize) {
        let mut draws = 0;
        let color = redraw_once(last, || {
            draws += 1;
            script[draws - 1]
        });
        (color, draws)
    }

    #[test]
    fn repeated_color_is_redrawn_once() {
        let red = INITIAL_LAST_COLOR;
        let blue = Rgb([0, 0, 255]);
        assert_eq!(draw_from(&[blue, red], red), (blue, 1));
        assert_eq!(draw_from(&[red, blue], red), (blue, 2));
        // A second collision is kept.
        assert_eq!(draw_from(&[red, red, blue], red), (red, 2));
    }

    #[test]
    fn single_color_palette_forces_the_redraw() {
        let config = upright().with_colors(ColorMode::Palette(vec![INITIAL_LAST_COLOR]));
        let mut picker = StylePicker::new(&config, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut replay = rng.clone();

        for _ in 0..3 {
            let style = picker.pick(3.0, &mut rng);
            assert_eq!(style.color, INITIAL_LAST_COLOR);
            assert_eq!(picker.last_color, INITIAL_LAST_COLOR);
            // font, color, color again, orientation
            let _ = replay.random_range(0..2usize);
            let _ = replay.random_range(0..1usize);
            let _ = replay.random_range(0..1usize);
            let _ = replay.random_range(0..1usize);
        }
        assert_eq!(rng.next_u64(), replay.next_u64());
    }

    /// Replays the picker's draws: font, color (redrawn once on a repeat), orientation.
    fn replay_color(
        replay: &mut ChaCha8Rng,
        palette: &[Rgb<u8>],
        last: Rgb<u8>,
    ) -> (Rgb<u8>, bool) {
        let _ = replay.random_range(0..2usize);
        let first = palette[replay.random_range(0..palette.len())];
        let (color, collided) = if first == last {
            (palette[replay.random_range(0..palette.len())], true)
        } else {
            (first, false)
        };
        let _ = replay.random_range(0..1usize);
        (color, collided)
    }

    #[test]
    fn palette_collision_takes_the_second_draw() {
        let palette = vec![INITIAL_LAST_COLOR, Rgb([0, 0, 255])];
        let config = upright().with_colors(ColorMode::Palette(palette.clone()));
        let mut picker = StylePicker::new(&config, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut replay = rng.clone();

        let mut last = INITIAL_LAST_COLOR;
        let mut collisions = 0;
        for _ in 0..64 {
            let color = picker.pick(1.0, &mut rng).color;
            let (expected, collided) = replay_color(&mut replay, &palette, last);
            assert_eq!(color, expected);
            collisions += collided as usize;
            last = expected;
        }
        assert!(collisions > 0);
        assert_eq!(rng.next_u64(), replay.next_u64());
    }

    #[test]
    fn last_color_carries_across_attempts() {
        let renderer = BlockRenderer::new();
        let palette = vec![INITIAL_LAST_COLOR, Rgb([0, 0, 255])];
        let config = upright()
            .with_size(300, 300)
            .with_colors(ColorMode::Palette(palette.clone()));
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut replay = rng.clone();
        let cloud = render_cloud(&words(&[("WWWWWWWWWW", 10.0)]), &renderer, &config, &mut rng)
            .unwrap();
        assert_eq!(cloud.attempts, 5);

        let mut last = INITIAL_LAST_COLOR;
        for _ in 0..cloud.attempts {
            last = replay_color(&mut replay, &palette, last).0;
        }
        assert_eq!(cloud.words[0].style.color, last);
        assert_eq!(rng.next_u64(), replay.next_u64());
    }
}
