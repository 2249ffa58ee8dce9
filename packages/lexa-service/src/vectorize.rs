use std::collections::BTreeMap;

use lexa_text::{Normalizer, StopWordSet};

/// Sparse row of term weights, ordered by term id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SparseVector {
	entries: Vec<(usize, f64)>,
}
impl SparseVector {
	pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
		entries.retain(|(_, weight)| *weight != 0.0);
		entries.sort_by_key(|(term, _)| *term);
		entries.dedup_by_key(|(term, _)| *term);

		Self { entries }
	}

	pub fn entries(&self) -> &[(usize, f64)] {
		&self.entries
	}

	pub fn is_zero(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn norm(&self) -> f64 {
		self.entries.iter().map(|(_, weight)| weight * weight).sum::<f64>().sqrt()
	}

	pub fn dot(&self, other: &Self) -> f64 {
		let (mut i, mut j) = (0_usize, 0_usize);
		let mut sum = 0.0_f64;

		while i < self.entries.len() && j < other.entries.len() {
			let (left_term, left_weight) = self.entries[i];
			let (right_term, right_weight) = other.entries[j];

			match left_term.cmp(&right_term) {
				std::cmp::Ordering::Less => i += 1,
				std::cmp::Ordering::Greater => j += 1,
				std::cmp::Ordering::Equal => {
					sum += left_weight * right_weight;
					i += 1;
					j += 1;
				},
			}
		}

		sum
	}

	pub fn cosine(&self, other: &Self) -> f64 {
		let denominator = self.norm() * other.norm();

		if denominator == 0.0 {
			return 0.0;
		}

		(self.dot(other) / denominator).clamp(0.0, 1.0)
	}
}

/// TF-IDF rows over one document set, sharing a single vocabulary.
#[derive(Clone, Debug, Default)]
pub struct TermMatrix {
	vocabulary: BTreeMap<String, usize>,
	rows: Vec<SparseVector>,
}
impl TermMatrix {
	pub fn from_rows(rows: Vec<SparseVector>) -> Self {
		Self { vocabulary: BTreeMap::new(), rows }
	}

	pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
		&self.vocabulary
	}

	pub fn rows(&self) -> &[SparseVector] {
		&self.rows
	}

	pub fn row(&self, index: usize) -> Option<&SparseVector> {
		self.rows.get(index)
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	pub fn weight(&self, row: usize, term: &str) -> f64 {
		let Some(term_id) = self.vocabulary.get(term) else { return 0.0 };
		let Some(row) = self.rows.get(row) else { return 0.0 };

		row.entries
			.binary_search_by_key(term_id, |(id, _)| *id)
			.map(|pos| row.entries[pos].1)
			.unwrap_or(0.0)
	}
}

pub struct VectorSpaceBuilder<'a> {
	normalizer: &'a dyn Normalizer,
	stop_words: &'a StopWordSet,
}
impl<'a> VectorSpaceBuilder<'a> {
	pub fn new(normalizer: &'a dyn Normalizer, stop_words: &'a StopWordSet) -> Self {
		Self { normalizer, stop_words }
	}

	/// Builds one L2-normalized row per document using smoothed IDF,
	/// `ln((1 + n) / (1 + df)) + 1`.
	///
	/// Documents without surviving terms get a zero row; an empty vocabulary is not an error.
	pub fn build<S>(&self, documents: &[S]) -> TermMatrix
	where
		S: AsRef<str>,
	{
		let counts: Vec<BTreeMap<String, u32>> =
			documents.iter().map(|document| self.term_counts(document.as_ref())).collect();
		let mut document_frequency: BTreeMap<&str, u32> = BTreeMap::new();

		for doc in &counts {
			for term in doc.keys() {
				*document_frequency.entry(term.as_str()).or_insert(0) += 1;
			}
		}

		let vocabulary: BTreeMap<String, usize> = document_frequency
			.keys()
			.enumerate()
			.map(|(id, term)| ((*term).to_string(), id))
			.collect();
		let n = documents.len() as f64;
		let idf: Vec<f64> = document_frequency
			.values()
			.map(|df| ((1.0 + n) / (1.0 + f64::from(*df))).ln() + 1.0)
			.collect();
		let rows = counts
			.iter()
			.map(|doc| {
				let mut entries: Vec<(usize, f64)> = doc
					.iter()
					.filter_map(|(term, tf)| {
						vocabulary.get(term).map(|id| (*id, f64::from(*tf) * idf[*id]))
					})
					.collect();
				let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();

				if norm > 0.0 {
					for (_, weight) in &mut entries {
						*weight /= norm;
					}
				}

				SparseVector::from_entries(entries)
			})
			.collect();

		TermMatrix { vocabulary, rows }
	}

	fn term_counts(&self, document: &str) -> BTreeMap<String, u32> {
		let mut counts = BTreeMap::new();

		for token in self.normalizer.normalize(document) {
			if token.is_empty() || self.stop_words.contains(&token) {
				continue;
			}

			*counts.entry(token).or_insert(0) += 1;
		}

		counts
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use lexa_text::{LemmaNormalizer, WhitespaceNormalizer};

	fn approx(left: f64, right: f64) -> bool {
		(left - right).abs() < 1e-9
	}

	#[test]
	fn weights_follow_smoothed_idf_and_unit_norm() {
		let stop_words = StopWordSet::none();
		let builder = VectorSpaceBuilder::new(&WhitespaceNormalizer, &stop_words);
		let matrix = builder.build(&["cat sat", "cat"]);
		let shared = 1.0_f64;
		let rare = (3.0_f64 / 2.0).ln() + 1.0;
		let norm = (shared * shared + rare * rare).sqrt();

		assert_eq!(matrix.len(), 2);
		assert_eq!(matrix.vocabulary().len(), 2);
		assert!(approx(matrix.weight(0, "cat"), shared / norm));
		assert!(approx(matrix.weight(0, "sat"), rare / norm));
		assert!(approx(matrix.weight(1, "cat"), 1.0));
		assert!(approx(matrix.weight(1, "sat"), 0.0));

		for row in matrix.rows() {
			assert!(approx(row.norm(), 1.0));
		}
	}

	#[test]
	fn term_frequency_counts_duplicates() {
		let stop_words = StopWordSet::none();
		let builder = VectorSpaceBuilder::new(&WhitespaceNormalizer, &stop_words);
		let matrix = builder.build(&["dog dog cat", "cat"]);

		assert!(matrix.weight(0, "dog") > matrix.weight(0, "cat"));
	}

	#[test]
	fn stop_words_are_excluded_from_the_vocabulary() {
		let stop_words = StopWordSet::english();
		let builder = VectorSpaceBuilder::new(&LemmaNormalizer, &stop_words);
		let matrix = builder.build(&["the cat sat on the mat.", "where did the cat sit"]);

		assert!(!matrix.vocabulary().contains_key("the"));
		assert!(matrix.vocabulary().contains_key("cat"));
	}

	#[test]
	fn empty_vocabulary_yields_zero_rows() {
		let stop_words = StopWordSet::english();
		let builder = VectorSpaceBuilder::new(&LemmaNormalizer, &stop_words);
		let matrix = builder.build(&["the of and", "", "!!!"]);

		assert_eq!(matrix.len(), 3);
		assert!(matrix.vocabulary().is_empty());
		assert!(matrix.rows().iter().all(SparseVector::is_zero));
		assert_eq!(matrix.rows()[0].cosine(&matrix.rows()[1]), 0.0);
	}

	#[test]
	fn sparse_dot_matches_on_shared_terms_only() {
		let left = SparseVector::from_entries(vec![(3, 2.0), (1, 1.0)]);
		let right = SparseVector::from_entries(vec![(1, 4.0), (2, 5.0)]);

		assert!(approx(left.dot(&right), 4.0));
		assert!(approx(left.cosine(&left), 1.0));
		assert_eq!(left.cosine(&SparseVector::default()), 0.0);
	}
}
