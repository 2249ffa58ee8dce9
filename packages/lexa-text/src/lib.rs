pub mod lemmatizer;
pub mod normalizer;
pub mod segmenter;
pub mod stop_words;

pub use lemmatizer::lemmatize;
pub use normalizer::{LemmaNormalizer, Normalizer, WhitespaceNormalizer, is_punctuation};
pub use segmenter::{Segmentation, segment};
pub use stop_words::{ENGLISH_STOP_WORDS, StopWordSet};
