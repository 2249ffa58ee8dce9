use crate::rank::RankedCandidate;

const SEPARATOR: &str = ". ";

/// Joins the ranked sentences in rank order, or returns `fallback` when nothing ranked.
///
/// Sentences keep their own terminators, so a sentence ending in `.` is followed by `.. `.
pub fn compose(ranked: &[RankedCandidate], sentences: &[String], fallback: &str) -> String {
	let picked: Vec<&str> = ranked
		.iter()
		.filter_map(|candidate| sentences.get(candidate.index))
		.map(|sentence| sentence.trim())
		.filter(|sentence| !sentence.is_empty())
		.collect();

	if picked.is_empty() {
		return fallback.to_string();
	}

	picked
		.iter()
		.map(|sentence| capitalize(sentence))
		.collect::<Vec<_>>()
		.join(SEPARATOR)
}

fn capitalize(sentence: &str) -> String {
	let mut chars = sentence.chars();

	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
