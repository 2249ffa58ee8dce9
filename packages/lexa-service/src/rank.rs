use serde::Serialize;

use crate::vectorize::TermMatrix;

/// How the ranker turns similarity scores into candidates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QueryMode {
	/// Every sentence scoring at least `threshold`, at most `top_k` of them.
	TopKAboveThreshold { threshold: f64, top_k: usize },
	/// The single best sentence, only if it scores strictly above `min_score`.
	BestSingleMatch { min_score: f64 },
}
impl Default for QueryMode {
	fn default() -> Self {
		Self::TopKAboveThreshold { threshold: 0.1, top_k: 5 }
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RankedCandidate {
	pub index: usize,
	pub score: f64,
}

/// Cosine similarity of `query_row` against every earlier row.
pub fn cosine_scores(matrix: &TermMatrix, query_row: usize) -> Vec<f64> {
	let Some(query) = matrix.row(query_row) else { return Vec::new() };

	matrix.rows()[..query_row].iter().map(|row| row.cosine(query)).collect()
}

/// Orders scores descending with ties on ascending index, then applies the mode's filter.
pub fn select(scores: &[f64], mode: &QueryMode) -> Vec<RankedCandidate> {
	let mut ranked: Vec<RankedCandidate> = scores
		.iter()
		.enumerate()
		.map(|(index, score)| RankedCandidate { index, score: *score })
		.collect();

	ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));

	match *mode {
		QueryMode::TopKAboveThreshold { threshold, top_k } => {
			ranked.retain(|candidate| candidate.score >= threshold);
			ranked.truncate(top_k);
		},
		QueryMode::BestSingleMatch { min_score } => {
			ranked.truncate(1);
			ranked.retain(|candidate| candidate.score > min_score);
		},
	}

	ranked
}

pub fn rank(matrix: &TermMatrix, query_row: usize, mode: &QueryMode) -> Vec<RankedCandidate> {
	let ranked = select(&cosine_scores(matrix, query_row), mode);

	tracing::debug!(matches = ranked.len(), "Ranked corpus sentences.");

	ranked
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::vectorize::{SparseVector, VectorSpaceBuilder};
	use lexa_text::{LemmaNormalizer, StopWordSet};

	fn indices(ranked: &[RankedCandidate]) -> Vec<usize> {
		ranked.iter().map(|candidate| candidate.index).collect()
	}

	#[test]
	fn ties_keep_ascending_index_order() {
		let ranked = select(
			&[0.4, 0.9, 0.4, 0.9],
			&QueryMode::TopKAboveThreshold { threshold: 0.0, top_k: 10 },
		);

		assert_eq!(indices(&ranked), vec![1, 3, 0, 2]);
	}

	#[test]
	fn threshold_is_inclusive_and_top_k_caps() {
		let scores = [0.1, 0.09, 0.5, 0.3, 0.2, 0.15, 0.12];
		let ranked = select(&scores, &QueryMode::TopKAboveThreshold { threshold: 0.1, top_k: 5 });

		assert_eq!(indices(&ranked), vec![2, 3, 4, 5, 6]);

		let ranked = select(&scores, &QueryMode::TopKAboveThreshold { threshold: 0.1, top_k: 10 });

		assert_eq!(indices(&ranked), vec![2, 3, 4, 5, 6, 0]);
	}

	#[test]
	fn best_single_match_floor_is_exclusive() {
		let floor = QueryMode::BestSingleMatch { min_score: 0.0 };

		assert!(select(&[0.0, 0.0], &floor).is_empty());
		assert_eq!(indices(&select(&[0.0, 0.01], &floor)), vec![1]);
		assert!(select(&[0.3], &QueryMode::BestSingleMatch { min_score: 0.3 }).is_empty());
	}

	#[test]
	fn query_row_is_excluded_from_scores() {
		let matrix = TermMatrix::from_rows(vec![
			SparseVector::from_entries(vec![(0, 1.0)]),
			SparseVector::from_entries(vec![(1, 1.0)]),
			SparseVector::from_entries(vec![(0, 1.0)]),
		]);
		let scores = cosine_scores(&matrix, 2);

		assert_eq!(scores, vec![1.0, 0.0]);
		assert_eq!(indices(&rank(&matrix, 2, &QueryMode::default())), vec![0]);
	}

	#[test]
	fn empty_corpus_ranks_nothing() {
		let matrix = TermMatrix::from_rows(vec![SparseVector::default()]);

		assert!(cosine_scores(&matrix, 0).is_empty());
		assert!(rank(&matrix, 0, &QueryMode::BestSingleMatch { min_score: 0.0 }).is_empty());
	}

	#[test]
	fn disjoint_query_scores_exactly_zero() {
		let stop_words = StopWordSet::english();
		let builder = VectorSpaceBuilder::new(&LemmaNormalizer, &stop_words);
		let matrix = builder.build(&[
			"paris is the capital of france.",
			"berlin is the capital of germany.",
			"banana smoothie recipe",
		]);
		let scores = cosine_scores(&matrix, 2);

		assert_eq!(scores, vec![0.0, 0.0]);
		assert!(rank(&matrix, 2, &QueryMode::default()).is_empty());
	}
}
