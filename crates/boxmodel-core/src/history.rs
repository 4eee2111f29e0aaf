use tracing::debug;

/// In-memory input history, newest entry first.
///
/// Navigation keeps a cursor into the list. [`History::next`] walks towards
/// older entries and [`History::prev`] back towards newer ones, both
/// optionally restricted to entries containing a substring.
#[derive(Debug, Clone, Default)]
pub struct History {
    lines: Vec<String>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text` as the newest entry. A repeated entry moves to the front.
    pub fn add(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.lines.retain(|line| line != text);
        self.lines.insert(0, text.to_string());
        debug!("History now holds {} entries", self.lines.len());
    }

    /// Next older entry containing `substring` (case-insensitive)
    pub fn next(&mut self, substring: &str) -> Option<&str> {
        let needle = substring.to_lowercase();
        let start = self.cursor.map_or(0, |c| c + 1);
        let found = (start..self.lines.len()).find(|&i| matches(&self.lines[i], &needle))?;
        self.cursor = Some(found);
        Some(&self.lines[found])
    }

    /// Next newer entry containing `substring`. Walking past the newest
    /// entry resets the iterator.
    pub fn prev(&mut self, substring: &str) -> Option<&str> {
        let needle = substring.to_lowercase();
        let found = self
            .cursor
            .and_then(|c| (0..c).rev().find(|&i| matches(&self.lines[i], &needle)));
        self.cursor = found;
        found.map(|i| self.lines[i].as_str())
    }

    pub fn reset_iterator(&mut self) {
        self.cursor = None;
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.lines
    }
}

fn matches(line: &str, needle: &str) -> bool {
    needle.is_empty() || line.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(entries: &[&str]) -> History {
        let mut h = History::new();
        // oldest first so the last one ends up in front
        for e in entries {
            h.add(e);
        }
        h
    }

    #[test]
    fn test_add_ignores_empty_and_moves_repeats_to_front() {
        let mut h = history(&["a", "b", "c"]);
        h.add("");
        h.add("a");
        assert_eq!(h.entries(), ["a", "c", "b"]);
    }

    #[test]
    fn test_next_walks_older() {
        let mut h = history(&["first", "second", "third"]);
        assert_eq!(h.next(""), Some("third"));
        assert_eq!(h.next(""), Some("second"));
        assert_eq!(h.next(""), Some("first"));
        assert_eq!(h.next(""), None);
        // cursor stays on the oldest match
        assert_eq!(h.prev(""), Some("second"));
    }

    #[test]
    fn test_next_filters_by_substring() {
        let mut h = history(&["firefox", "files", "Fire drill", "calc"]);
        assert_eq!(h.next("fire"), Some("Fire drill"));
        assert_eq!(h.next("fire"), Some("firefox"));
        assert_eq!(h.next("fire"), None);
    }

    #[test]
    fn test_prev_past_newest_resets() {
        let mut h = history(&["a", "b"]);
        assert_eq!(h.next(""), Some("b"));
        assert_eq!(h.prev(""), None);
        assert_eq!(h.next(""), Some("b"));
    }

    #[test]
    fn test_prev_without_cursor() {
        let mut h = history(&["a"]);
        assert_eq!(h.prev(""), None);
    }

    #[test]
    fn test_reset_iterator() {
        let mut h = history(&["a", "b"]);
        h.next("");
        h.next("");
        h.reset_iterator();
        assert_eq!(h.next(""), Some("b"));
    }
}
