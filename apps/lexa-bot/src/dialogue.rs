/// One line of chat input, classified.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
	Hello,
	Topic,
	ChangeTopic,
	Cancel,
	Exit,
	Text(&'a str),
}
impl<'a> Command<'a> {
	/// Returns `None` for blank lines and unknown slash commands.
	pub fn parse(line: &'a str, exit_words: &[String]) -> Option<Self> {
		let line = line.trim();

		if line.is_empty() {
			return None;
		}
		if let Some(rest) = line.strip_prefix('/') {
			let name = rest.split_whitespace().next().unwrap_or_default();

			return match name.to_ascii_lowercase().as_str() {
				"hello" | "start" => Some(Self::Hello),
				"topic" => Some(Self::Topic),
				"change_topic" => Some(Self::ChangeTopic),
				"cancel" => Some(Self::Cancel),
				_ => None,
			};
		}

		let lowered = line.to_lowercase();

		if exit_words.iter().any(|word| *word == lowered) {
			return Some(Self::Exit);
		}

		Some(Self::Text(line))
	}
}

/// What the front end should do for a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
	Greet,
	ShowTopic,
	PromptTopic,
	SetTopic(String),
	Cancelled,
	Reply(&'static str),
	Answer(String),
	Exit,
	Ignore,
}

/// Tracks whether the next free-text line is a new topic.
#[derive(Debug, Default)]
pub struct Dialogue {
	exit_words: Vec<String>,
	greetings: bool,
	awaiting_topic: bool,
}
impl Dialogue {
	pub fn new(exit_words: Vec<String>, greetings: bool) -> Self {
		Self { exit_words, greetings, awaiting_topic: false }
	}

	pub fn awaiting_topic(&self) -> bool {
		self.awaiting_topic
	}

	pub fn step(&mut self, line: &str) -> Action {
		let Some(command) = Command::parse(line, &self.exit_words) else { return Action::Ignore };

		match command {
			Command::Hello => Action::Greet,
			Command::Topic => Action::ShowTopic,
			Command::ChangeTopic => {
				self.awaiting_topic = true;

				Action::PromptTopic
			},
			Command::Cancel if self.awaiting_topic => {
				self.awaiting_topic = false;

				Action::Cancelled
			},
			Command::Cancel => Action::Ignore,
			Command::Exit => Action::Exit,
			Command::Text(topic) if self.awaiting_topic => {
				self.awaiting_topic = false;

				Action::SetTopic(topic.to_string())
			},
			Command::Text(text) => {
				if self.greetings
					&& let Some(reply) = lexa_service::greeting_reply(text)
				{
					return Action::Reply(reply);
				}

				Action::Answer(text.to_string())
			},
		}
	}
}
