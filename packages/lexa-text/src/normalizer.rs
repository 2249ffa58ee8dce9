use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::lemmatizer;

/// Turns a document into the token sequence used for term weighting.
///
/// Implementations must be deterministic and keep duplicates, since term frequency is counted
/// downstream.
pub trait Normalizer
where
	Self: Send + Sync,
{
	fn normalize(&self, text: &str) -> Vec<String>;
}

/// Case-folds, strips punctuation, splits on UAX #29 word boundaries and lemmatizes.
#[derive(Clone, Copy, Debug, Default)]
pub struct LemmaNormalizer;
impl Normalizer for LemmaNormalizer {
	fn normalize(&self, text: &str) -> Vec<String> {
		let folded: String = text.nfkc().collect::<String>().to_lowercase();
		let stripped: String = folded.chars().filter(|ch| !is_punctuation(*ch)).collect();

		stripped.unicode_words().map(lemmatizer::lemmatize).collect()
	}
}

/// Lower-cases and splits on whitespace only. Useful as a stand-in when lemmatization would
/// obscure what a test is checking.
#[derive(Clone, Copy, Debug, Default)]
pub struct WhitespaceNormalizer;
impl Normalizer for WhitespaceNormalizer {
	fn normalize(&self, text: &str) -> Vec<String> {
		text.split_whitespace().map(str::to_lowercase).collect()
	}
}

pub fn is_punctuation(ch: char) -> bool {
	if ch.is_ascii() {
		return ch.is_ascii_punctuation();
	}

	matches!(
		ch,
		'\u{00A1}' | '\u{00A7}' | '\u{00AB}' | '\u{00B6}' | '\u{00B7}' | '\u{00BB}' | '\u{00BF}'
			| '\u{2010}'..='\u{2027}'
			| '\u{2030}'..='\u{205E}'
			| '\u{2E00}'..='\u{2E4F}'
			| '\u{3001}'..='\u{3003}'
			| '\u{3008}'..='\u{3011}'
			| '\u{3014}'..='\u{301F}'
			| '\u{FE10}'..='\u{FE19}'
			| '\u{FE30}'..='\u{FE4F}'
			| '\u{FF01}'..='\u{FF0F}'
			| '\u{FF1A}'..='\u{FF20}'
			| '\u{FF3B}'..='\u{FF3D}'
			| '\u{FF3F}'
			| '\u{FF5B}'
			| '\u{FF5D}'
	)
}
