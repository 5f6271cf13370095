//! Console Document Module
//!
//! The scrollback-plus-input text buffer. Everything before the input
//! boundary is immutable history; everything after it is the line the user
//! is currently typing. All offsets are byte offsets into `text` and always
//! sit on character boundaries.

/// Cursor movement directions inside the input region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorDirection {
    Left,
    Right,
    Home,
    End,
}

/// Scrollback and live input line of the console
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    prompt_marker: String,
    input_boundary: usize,
    cursor: usize,
    selecting: bool,
}

impl Document {
    /// Create a document holding a single prompt line
    pub fn new(prompt_marker: impl Into<String>) -> Self {
        let prompt_marker = prompt_marker.into();
        let mut document = Self {
            text: String::new(),
            prompt_marker,
            input_boundary: 0,
            cursor: 0,
            selecting: false,
        };
        document.clear();
        document
    }

    /// Full visible content
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn prompt_marker(&self) -> &str {
        &self.prompt_marker
    }

    /// Offset just past the most recent prompt marker
    pub fn input_boundary(&self) -> usize {
        self.input_boundary
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    pub fn set_selecting(&mut self, selecting: bool) {
        self.selecting = selecting;
    }

    /// The user's in-progress input, without the prompt marker
    pub fn current_input_text(&self) -> &str {
        &self.text[self.input_boundary..]
    }

    /// Start of the line holding the live prompt
    fn prompt_line_start(&self) -> usize {
        self.input_boundary - self.prompt_marker.len()
    }

    /// Add output to the scrollback.
    ///
    /// The text lands directly above the live prompt line and is always
    /// newline-terminated, so the scrollback ends in exactly `text` and the
    /// input region is left untouched.
    pub fn append_output(&mut self, text: &str) {
        let mut block = text.to_string();
        if !block.ends_with('\n') {
            block.push('\n');
        }

        let at = self.prompt_line_start();
        self.text.insert_str(at, &block);
        self.input_boundary += block.len();
        if self.cursor >= at {
            self.cursor += block.len();
        }
    }

    /// Reset to a single, empty prompt line
    pub fn clear(&mut self) {
        self.text.clear();
        self.text.push_str(&self.prompt_marker);
        self.input_boundary = self.text.len();
        self.cursor = self.input_boundary;
        self.selecting = false;
    }

    /// Replace the whole input region with `new_text`; the cursor ends up at
    /// end-of-document.
    pub fn replace_current_input(&mut self, new_text: &str) {
        self.text.truncate(self.input_boundary);
        self.text.extend(new_text.chars().filter(|c| !c.is_control()));
        self.cursor = self.text.len();
    }

    /// Finish the current line: returns the typed text and opens a fresh
    /// prompt line after it.
    pub fn commit_line(&mut self) -> String {
        let captured = self.current_input_text().to_string();
        self.text.push('\n');
        self.text.push_str(&self.prompt_marker);
        self.input_boundary = self.text.len();
        self.cursor = self.input_boundary;
        captured
    }

    /// Insert a printable character at end-of-document.
    ///
    /// Returns false for control characters, which never enter the buffer.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.cursor = self.text.len();
        self.text.push(ch);
        self.cursor = self.text.len();
        true
    }

    /// Backspace. Refused when the cursor is at or before the boundary.
    pub fn try_delete_one_back(&mut self) -> bool {
        if self.cursor <= self.input_boundary {
            return false;
        }
        let prev = self.prev_char_boundary(self.cursor);
        self.text.replace_range(prev..self.cursor, "");
        self.cursor = prev;
        true
    }

    /// Delete the character under the cursor, inside the input region only
    pub fn try_delete_one_forward(&mut self) -> bool {
        if self.cursor < self.input_boundary || self.cursor >= self.text.len() {
            return false;
        }
        let next = self.next_char_boundary(self.cursor);
        self.text.replace_range(self.cursor..next, "");
        true
    }

    /// Move the cursor, never leaving `[input_boundary, end]`
    pub fn move_cursor(&mut self, direction: CursorDirection) {
        let end = self.text.len();
        self.cursor = match direction {
            CursorDirection::Left if self.cursor <= self.input_boundary => self.input_boundary,
            CursorDirection::Left => self.prev_char_boundary(self.cursor),
            CursorDirection::Right if self.cursor < self.input_boundary => end,
            CursorDirection::Right if self.cursor >= end => end,
            CursorDirection::Right => self.next_char_boundary(self.cursor),
            CursorDirection::Home => self.input_boundary,
            CursorDirection::End => end,
        };
    }

    /// Pointer placement. May land in scrollback; edits snap back to the
    /// input region on their own.
    pub fn place_cursor(&mut self, offset: usize) {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        self.cursor = offset;
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Cursor as (line index, column in characters)
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
        (line, before[line_start..].chars().count())
    }

    fn prev_char_boundary(&self, offset: usize) -> usize {
        self.text[..offset]
            .char_indices()
            .next_back()
            .map_or(0, |(idx, _)| idx)
    }

    fn next_char_boundary(&self, offset: usize) -> usize {
        self.text[offset..]
            .chars()
            .next()
            .map_or(offset, |ch| offset + ch.len_utf8())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(crate::cli::config::DEFAULT_PROMPT_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typed(document: &mut Document, text: &str) {
        for ch in text.chars() {
            document.insert_char(ch);
        }
    }

    #[test]
    fn test_new_document_has_one_prompt() {
        let document = Document::new(">>> ");
        assert_eq!(document.text(), ">>> ");
        assert_eq!(document.input_boundary(), 4);
        assert_eq!(document.cursor(), 4);
        assert_eq!(document.current_input_text(), "");
    }

    #[test]
    fn test_typing_and_commit() {
        let mut document = Document::new("$ ");
        typed(&mut document, "echo hi");
        assert_eq!(document.current_input_text(), "echo hi");

        let captured = document.commit_line();
        assert_eq!(captured, "echo hi");
        assert_eq!(document.text(), "$ echo hi\n$ ");
        assert_eq!(document.input_boundary(), document.text().len());
        assert_eq!(document.current_input_text(), "");
    }

    #[test]
    fn test_commit_empty_line_still_reprompts() {
        let mut document = Document::new(">>> ");
        assert_eq!(document.commit_line(), "");
        assert_eq!(document.text(), ">>> \n>>> ");
    }

    #[test]
    fn test_backspace_refused_at_boundary() {
        let mut document = Document::new(">>> ");
        typed(&mut document, "ab");
        document.commit_line();
        let before = document.text().to_string();

        assert!(!document.try_delete_one_back());
        assert_eq!(document.text(), before);
    }

    #[test]
    fn test_backspace_after_home_is_refused() {
        let mut document = Document::new(">>> ");
        typed(&mut document, "pwd");
        document.move_cursor(CursorDirection::Home);
        assert_eq!(document.cursor(), document.input_boundary());

        assert!(!document.try_delete_one_back());
        assert_eq!(document.text(), ">>> pwd");
    }

    #[test]
    fn test_backspace_removes_multibyte_char() {
        let mut document = Document::new(">>> ");
        typed(&mut document, "né");
        assert!(document.try_delete_one_back());
        assert_eq!(document.current_input_text(), "n");
    }

    #[test]
    fn test_typing_after_drift_lands_at_end() {
        let mut document = Document::new(">>> ");
        typed(&mut document, "ls");
        document.commit_line();
        typed(&mut document, "p");

        document.place_cursor(1);
        assert!(document.cursor() < document.input_boundary());
        typed(&mut document, "wd");

        assert_eq!(document.text(), ">>> ls\n>>> pwd");
        assert_eq!(document.current_input_text(), "pwd");
    }

    #[test]
    fn test_backspace_in_scrollback_is_refused() {
        let mut document = Document::new(">>> ");
        typed(&mut document, "ls");
        document.commit_line();
        document.place_cursor(3);

        assert!(!document.try_delete_one_back());
        assert_eq!(document.text(), ">>> ls\n>>> ");
    }

    #[test]
    fn test_cursor_movement_is_clamped() {
        let mut document = Document::new(">>> ");
        typed(&mut document, "ab");

        document.move_cursor(CursorDirection::Left);
        document.move_cursor(CursorDirection::Left);
        document.move_cursor(CursorDirection::Left);
        assert_eq!(document.cursor(), document.input_boundary());

        document.move_cursor(CursorDirection::Right);
        assert_eq!(document.cursor(), document.input_boundary() + 1);
        assert!(document.try_delete_one_back());
        assert_eq!(document.current_input_text(), "b");

        document.move_cursor(CursorDirection::End);
        document.move_cursor(CursorDirection::Right);
        assert_eq!(document.cursor(), document.text().len());
    }

    #[test]
    fn test_left_from_scrollback_snaps_to_boundary() {
        let mut document = Document::new(">>> ");
        typed(&mut document, "x");
        document.place_cursor(0);
        document.move_cursor(CursorDirection::Left);
        assert_eq!(document.cursor(), document.input_boundary());

        document.place_cursor(0);
        document.move_cursor(CursorDirection::Right);
        assert_eq!(document.cursor(), document.text().len());
    }

    #[test]
    fn test_delete_forward() {
        let mut document = Document::new(">>> ");
        typed(&mut document, "abc");
        assert!(!document.try_delete_one_forward());

        document.move_cursor(CursorDirection::Home);
        assert!(document.try_delete_one_forward());
        assert_eq!(document.current_input_text(), "bc");

        document.place_cursor(0);
        assert!(!document.try_delete_one_forward());
        assert_eq!(document.text(), ">>> bc");
    }

    #[test]
    fn test_replace_current_input() {
        let mut document = Document::new(">>> ");
        typed(&mut document, "ls");
        document.commit_line();
        typed(&mut document, "garbage");

        document.replace_current_input("pwd");
        assert_eq!(document.text(), ">>> ls\n>>> pwd");
        assert_eq!(document.cursor(), document.text().len());

        document.replace_current_input("");
        assert_eq!(document.text(), ">>> ls\n>>> ");
        assert_eq!(document.input_boundary(), document.text().len());
    }

    #[test]
    fn test_append_output_goes_above_prompt() {
        let mut document = Document::new(">>> ");
        typed(&mut document, "ls");
        document.commit_line();
        document.append_output("a.txt\nb.txt");
        typed(&mut document, "pw");

        assert_eq!(document.text(), ">>> ls\na.txt\nb.txt\n>>> pw");
        assert_eq!(document.current_input_text(), "pw");

        let scrollback = &document.text()[..document.input_boundary() - 4];
        assert!(scrollback.ends_with("a.txt\nb.txt\n"));
    }

    #[test]
    fn test_append_output_keeps_pending_input_and_cursor() {
        let mut document = Document::new(">>> ");
        typed(&mut document, "ech");
        document.move_cursor(CursorDirection::Left);
        let offset_in_input = document.cursor() - document.input_boundary();

        document.append_output("echo  echoes");
        assert_eq!(document.current_input_text(), "ech");
        assert_eq!(document.cursor() - document.input_boundary(), offset_in_input);
    }

    #[test]
    fn test_clear() {
        let mut document = Document::new(">>> ");
        typed(&mut document, "ls");
        document.commit_line();
        document.append_output("out");
        document.set_selecting(true);

        document.clear();
        assert_eq!(document.text(), ">>> ");
        assert_eq!(document.input_boundary(), 4);
        assert!(!document.is_selecting());
    }

    #[test]
    fn test_control_chars_are_rejected() {
        let mut document = Document::new(">>> ");
        assert!(!document.insert_char('\n'));
        assert!(!document.insert_char('\t'));
        document.replace_current_input("a\nb");
        assert_eq!(document.current_input_text(), "ab");
    }

    #[test]
    fn test_cursor_line_col() {
        let mut document = Document::new(">>> ");
        typed(&mut document, "ls");
        document.commit_line();
        typed(&mut document, "é");
        assert_eq!(document.cursor_line_col(), (1, 5));
        assert_eq!(document.lines().count(), 2);
    }
}
