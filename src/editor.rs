//! Editor panel: owns the source text being checked

use crate::theme::Theme;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace};

const DEFAULT_PLACEHOLDER: &str = "Paste your program's source code here...";

/// Language the editor is configured for. The checking service only
/// understands Java.
pub const SYNTAX_MODE: &str = "java";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EditorSettings {
    pub theme: Theme,
    /// Sent to the service only with the wrapped request shape
    pub tab_size: u8,
    pub font_size: u16,
    pub placeholder: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            tab_size: 4,
            font_size: 16,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

type ChangeListener = Box<dyn FnMut(&str) + Send>;

pub struct EditorPanel {
    text: String,
    settings: EditorSettings,
    on_change: Option<ChangeListener>,
}

impl std::fmt::Debug for EditorPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorPanel")
            .field("text_len", &self.text.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl EditorPanel {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            text: String::new(),
            settings,
            on_change: None,
        }
    }

    /// Register the listener invoked with the full text after every edit
    pub fn on_change(mut self, listener: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut EditorSettings {
        &mut self.settings
    }

    /// Replace the whole buffer. Any text, including empty, is accepted.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
        trace!("Editor text changed ({} bytes)", self.text.len());
        if let Some(listener) = self.on_change.as_mut() {
            listener(&self.text);
        }
    }

    /// Append one line to the buffer as a single edit
    pub fn append_line(&mut self, line: &str) {
        let mut text = std::mem::take(&mut self.text);
        text.push_str(line);
        text.push('\n');
        self.edit(text);
    }

    pub fn clear(&mut self) {
        self.edit(String::new());
    }

    /// Replace the buffer with the contents of a file
    pub fn load(&mut self, path: &Path) -> anyhow::Result<()> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        debug!("Loaded {} bytes from {}", text.len(), path.display());
        self.edit(text);
        Ok(())
    }

    /// Buffer with line numbers, or the placeholder when empty
    pub fn preview(&self) -> String {
        if self.text.is_empty() {
            return self.settings.placeholder.clone();
        }

        let lines: Vec<&str> = self.text.lines().collect();
        let width = lines.len().to_string().len();
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:>width$} | {}", i + 1, line, width = width))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Read source text from a file, or from stdin for `None` / `-`
pub fn read_source(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        Some(p) if p != "-" => {
            std::fs::read_to_string(p).with_context(|| format!("Failed to read {}", p))
        }
        _ => {
            debug!("Reading source from stdin");
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read source from stdin")?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_edit_emits_full_text() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut editor = EditorPanel::new(EditorSettings::default())
            .on_change(move |text| sink.lock().unwrap().push(text.to_string()));

        editor.append_line("class A {");
        editor.append_line("}");
        editor.edit("");

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec!["class A {\n".to_string(), "class A {\n}\n".to_string(), String::new()]
        );
        assert_eq!(editor.text(), "");
    }

    #[test]
    fn test_preview_placeholder_and_line_numbers() {
        let mut editor = EditorPanel::new(EditorSettings::default());
        assert_eq!(editor.preview(), DEFAULT_PLACEHOLDER);

        editor.edit((1..=10).map(|i| format!("l{}", i)).collect::<Vec<_>>().join("\n"));
        let preview = editor.preview();
        assert!(preview.starts_with(" 1 | l1\n"));
        assert!(preview.ends_with("10 | l10"));
    }

    #[test]
    fn test_load_replaces_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Test.java");
        std::fs::write(&path, "public class Test {}\n").unwrap();

        let mut editor = EditorPanel::new(EditorSettings::default());
        editor.edit("old");
        editor.load(&path).unwrap();
        assert_eq!(editor.text(), "public class Test {}\n");

        assert!(editor.load(&dir.path().join("missing.java")).is_err());
        assert_eq!(editor.text(), "public class Test {}\n");
    }

    #[test]
    fn test_read_source_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("A.java");
        std::fs::write(&path, "int x = 1;").unwrap();
        assert_eq!(read_source(path.to_str()).unwrap(), "int x = 1;");
    }
}
