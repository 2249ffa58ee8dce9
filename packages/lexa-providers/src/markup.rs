use scraper::{Html, Selector};

use crate::{Error, Result};

/// Extracts paragraph text from an HTML page.
pub struct MarkupStripper {
	paragraph: Selector,
}
impl MarkupStripper {
	pub fn new() -> Result<Self> {
		let paragraph = Selector::parse("p")
			.map_err(|err| Error::InvalidSelector { message: err.to_string() })?;

		Ok(Self { paragraph })
	}

	/// Concatenates the text of every `<p>` element, one paragraph per line.
	///
	/// Entities are decoded by the parser; comments and non-paragraph elements are skipped.
	pub fn paragraph_text(&self, html: &str) -> String {
		let document = Html::parse_document(html);
		let mut out = String::new();

		for paragraph in document.select(&self.paragraph) {
			let text = paragraph.text().collect::<String>();

			out.push_str(text.trim());
			out.push('\n');
		}

		out
	}
}
