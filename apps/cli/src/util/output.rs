use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
	match serde_json::to_string_pretty(value) {
		Ok(json) => println!("{json}"),
		Err(e) => eprintln!("Failed to serialize output: {e}"),
	}
}

/// First `max` characters of `text`, with an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
	if text.chars().count() <= max {
		return text.to_string();
	}

	let mut short = text.chars().take(max.saturating_sub(1)).collect::<String>();
	short.push('…');
	short
}
