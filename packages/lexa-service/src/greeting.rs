const GREETING_WORDS: &[&str] = &["hello", "hi", "greetings", "sup", "hey"];
const GREETING_PHRASES: &[&str] = &["what's up"];
const GREETING_REPLIES: &[&str] = &[
	"Hello! Ask me anything about the current topic.",
	"Hi there!",
	"Greetings!",
	"Hey! What would you like to know?",
	"I am glad you are talking to me.",
];

/// Returns a canned greeting when `message` greets, choosing the same reply for the same message.
pub fn greeting_reply(message: &str) -> Option<&'static str> {
	let lowered = message.trim().to_lowercase();

	if !is_greeting(&lowered) {
		return None;
	}

	let digest = blake3::hash(lowered.as_bytes());
	let pick = usize::from(digest.as_bytes()[0]) % GREETING_REPLIES.len();

	GREETING_REPLIES.get(pick).copied()
}

fn is_greeting(lowered: &str) -> bool {
	let words = lowered
		.split_whitespace()
		.map(|word| word.trim_matches(|ch: char| !ch.is_alphanumeric() && ch != '\''));

	for word in words {
		if GREETING_WORDS.contains(&word) {
			return true;
		}
	}

	let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

	GREETING_PHRASES.iter().any(|phrase| collapsed.contains(phrase))
}
