//! Colon-delimited key/value line parsing.

/// Split block text into `key: value` pairs, one pair per line.
///
/// Only the first colon on a line delimits; both sides are trimmed and a
/// pair is dropped when either side is blank. A repeated key keeps its
/// first position but takes the later value.
pub fn parse_key_values(text: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        match pairs.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => pairs.push((key.to_string(), value.to_string())),
        }
    }
    pairs
}
