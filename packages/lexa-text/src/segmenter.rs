use unicode_segmentation::UnicodeSegmentation;

const ABBREVIATIONS: &[&str] = &[
	"dr", "mr", "mrs", "ms", "prof", "sr", "jr", "st", "mt", "vs", "etc", "fig", "figs", "no",
	"vol", "pp", "ed", "eds", "inc", "ltd", "co", "corp", "dept", "approx", "ca", "cf", "al",
	"jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "gen",
	"col", "lt", "capt", "sgt", "rev", "gov", "sen", "rep",
];
const TERMINATORS: [char; 3] = ['.', '!', '?'];
const CLOSERS: [char; 6] = ['"', '\'', ')', ']', '\u{201D}', '\u{2019}'];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Segmentation {
	pub sentences: Vec<String>,
	/// Raw word tokens, punctuation included. Not used for ranking.
	pub words: Vec<String>,
}

pub fn segment(raw_text: &str) -> Segmentation {
	let text = preprocess(raw_text);

	if text.is_empty() {
		return Segmentation::default();
	}

	let sentences = split_sentences(&text);
	let words = text
		.split_word_bounds()
		.filter(|word| !word.trim().is_empty())
		.map(str::to_string)
		.collect();

	tracing::debug!(sentences = sentences.len(), "Segmented corpus text.");

	Segmentation { sentences, words }
}

/// Replaces `[<digits>]` citation markers with a space and collapses whitespace runs.
pub fn preprocess(raw_text: &str) -> String {
	let mut out = String::with_capacity(raw_text.len());
	let mut rest = raw_text;

	while let Some(open) = rest.find('[') {
		out.push_str(&rest[..open]);

		let after = &rest[open + 1..];
		let digits = after.len() - after.trim_start_matches(|ch: char| ch.is_ascii_digit()).len();

		if after[digits..].starts_with(']') {
			out.push(' ');

			rest = &after[digits + 1..];
		} else {
			out.push('[');

			rest = after;
		}
	}

	out.push_str(rest);

	out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn split_sentences(text: &str) -> Vec<String> {
	let chars: Vec<(usize, char)> = text.char_indices().collect();
	let mut sentences = Vec::new();
	let mut start = 0_usize;
	let mut i = 0_usize;

	while i < chars.len() {
		let (_, ch) = chars[i];

		if !TERMINATORS.contains(&ch) {
			i += 1;

			continue;
		}

		let run_start = i;

		while i + 1 < chars.len() && TERMINATORS.contains(&chars[i + 1].1) {
			i += 1;
		}

		let single_period = i == run_start && ch == '.';

		while i + 1 < chars.len() && CLOSERS.contains(&chars[i + 1].1) {
			i += 1;
		}

		let end = chars.get(i + 1).map(|(idx, _)| *idx).unwrap_or(text.len());
		let at_space = chars.get(i + 1).map(|(_, next)| next.is_whitespace()).unwrap_or(true);

		if at_space
			&& !(single_period
				&& ends_with_abbreviation(&text[start..chars[run_start].0], &text[end..]))
		{
			push_sentence(&mut sentences, &text[start..end]);

			start = end;
		}

		i += 1;
	}

	push_sentence(&mut sentences, &text[start..]);

	sentences
}

fn ends_with_abbreviation(prefix: &str, rest: &str) -> bool {
	let mut words = prefix.split_whitespace().rev();
	let Some(last) = words.next() else { return false };
	let word = last.trim_start_matches(|ch: char| !ch.is_alphanumeric()).to_lowercase();

	// A lone letter only counts inside a run of initials such as "j. r. r.".
	if is_letter(&word) {
		let previous = words.next().is_some_and(is_initial);
		let next = rest.split_whitespace().next().is_some_and(is_initial);

		return previous || next;
	}
	// Dotted forms such as "e.g" or "u.s", but not "9.81".
	if word.contains('.') {
		return word.split('.').all(|part| !part.is_empty() && part.chars().all(char::is_alphabetic));
	}

	ABBREVIATIONS.contains(&word.as_str())
}

fn is_letter(word: &str) -> bool {
	let mut chars = word.chars();

	chars.next().is_some_and(char::is_alphabetic) && chars.next().is_none()
}

fn is_initial(token: &str) -> bool {
	token.strip_suffix('.').is_some_and(is_letter)
}

fn push_sentence(sentences: &mut Vec<String>, candidate: &str) {
	let trimmed = candidate.trim();

	if !trimmed.is_empty() {
		sentences.push(trimmed.to_string());
	}
}
