//! Rule-based noun lemmatizer.
//!
//! Irregular plurals come from a fixed table. Regular plurals are reduced by suffix rules that
//! mirror the WordNet noun detachment rules, with guards for words that only look plural.

const IRREGULAR: &[(&str, &str)] = &[
	("children", "child"),
	("feet", "foot"),
	("geese", "goose"),
	("lice", "louse"),
	("men", "man"),
	("mice", "mouse"),
	("oxen", "ox"),
	("teeth", "tooth"),
	("women", "woman"),
	("criteria", "criterion"),
	("phenomena", "phenomenon"),
	("data", "datum"),
	("indices", "index"),
	("matrices", "matrix"),
	("vertices", "vertex"),
	("analyses", "analysis"),
	("hypotheses", "hypothesis"),
	("theses", "thesis"),
	("axes", "axis"),
	("leaves", "leaf"),
	("lives", "life"),
	("knives", "knife"),
	("wives", "wife"),
	("halves", "half"),
	("wolves", "wolf"),
	("shelves", "shelf"),
	("buses", "bus"),
	("gases", "gas"),
];

const INVARIANT: &[&str] = &[
	"always", "news", "series", "species", "physics", "mathematics", "economics", "politics",
	"perhaps", "various", "thus", "this", "does", "has", "was", "his", "hers", "its", "ours",
	"yours", "theirs", "whereas", "unless", "yes", "lens", "chaos", "gas", "bias", "atlas",
	"canvas",
];

// Singular nouns that end in "men" without being a plural of "-man".
const MEN_SINGULARS: &[&str] = &[
	"specimen", "omen", "abdomen", "stamen", "regimen", "acumen", "hymen", "semen", "noumen",
];

const GUARDED_ENDINGS: &[&str] = &["ss", "us", "is", "ous", "ics"];

pub fn lemmatize(token: &str) -> String {
	if let Some((_, lemma)) = IRREGULAR.iter().find(|(plural, _)| *plural == token) {
		return (*lemma).to_string();
	}
	if token.chars().count() <= 3
		|| INVARIANT.contains(&token)
		|| !token.chars().all(char::is_alphabetic)
		|| GUARDED_ENDINGS.iter().any(|ending| token.ends_with(ending))
	{
		return token.to_string();
	}
	if let Some(stem) = token.strip_suffix("men")
		&& (token.ends_with("women") || !MEN_SINGULARS.iter().any(|word| token.ends_with(word)))
	{
		return format!("{stem}man");
	}
	if let Some(stem) = token.strip_suffix("ies")
		&& stem.len() >= 2
	{
		return format!("{stem}y");
	}

	for (suffix, replacement) in
		[("sses", "ss"), ("shes", "sh"), ("ches", "ch"), ("xes", "x"), ("zes", "z")]
	{
		if let Some(stem) = token.strip_suffix(suffix) {
			return format!("{stem}{replacement}");
		}
	}

	match token.strip_suffix('s') {
		Some(stem) => stem.to_string(),
		None => token.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reduces_regular_plurals() {
		assert_eq!(lemmatize("cats"), "cat");
		assert_eq!(lemmatize("algorithms"), "algorithm");
		assert_eq!(lemmatize("cities"), "city");
		assert_eq!(lemmatize("boxes"), "box");
		assert_eq!(lemmatize("churches"), "church");
		assert_eq!(lemmatize("firemen"), "fireman");
	}

	#[test]
	fn uses_irregular_table() {
		assert_eq!(lemmatize("children"), "child");
		assert_eq!(lemmatize("mice"), "mouse");
		assert_eq!(lemmatize("vertices"), "vertex");
	}

	#[test]
	fn leaves_look_alike_words_untouched() {
		for word in ["glass", "bus", "analysis", "famous", "physics", "was", "has", "this", "gas"] {
			assert_eq!(lemmatize(word), word);
		}
	}

	#[test]
	fn singular_men_words_and_bus_plurals() {
		for word in ["specimen", "omen", "abdomen", "stamen", "regimen", "acumen", "noumen"] {
			assert_eq!(lemmatize(word), word);
		}

		assert_eq!(lemmatize("specimens"), "specimen");
		assert_eq!(lemmatize("buses"), "bus");
		assert_eq!(lemmatize("gases"), "gas");
		assert_eq!(lemmatize("policemen"), "policeman");
		assert_eq!(lemmatize("sportswomen"), "sportswoman");
	}

	#[test]
	fn leaves_numbers_and_short_tokens_untouched() {
		assert_eq!(lemmatize("314"), "314");
		assert_eq!(lemmatize("1990s"), "1990s");
		assert_eq!(lemmatize("is"), "is");
	}
}
