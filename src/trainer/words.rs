use std::path::Path;

use super::session::TrainerError;

/// Split a plain-text word list into words.
///
/// One word per line, `\n` or `\r\n` line endings. Lines are trimmed and
/// blank lines are dropped. Duplicates are kept.
pub fn parse_words(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load a word list from a file, always reading it fresh from disk.
///
/// Fails when the file cannot be read or contains no words.
pub fn load_words(path: &Path) -> Result<Vec<String>, TrainerError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        TrainerError::WordSource(format!(
            "Failed to load vocabulary list ({}): {e}",
            path.display()
        ))
    })?;

    let words = parse_words(&content);
    if words.is_empty() {
        return Err(TrainerError::EmptyDeck);
    }

    log::info!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::{load_words, parse_words};
    use crate::trainer::TrainerError;
    use std::io::Write;

    #[test]
    fn trims_and_drops_blank_lines() {
        let words = parse_words("  chat \r\n\r\nchien\n   \noiseau\n");
        assert_eq!(words, vec!["chat", "chien", "oiseau"]);
    }

    #[test]
    fn keeps_duplicates_and_inner_spaces() {
        let words = parse_words("pomme de terre\nchat\nchat");
        assert_eq!(words, vec!["pomme de terre", "chat", "chat"]);
    }

    #[test]
    fn whitespace_only_text_has_no_words() {
        assert!(parse_words(" \n\t\r\n").is_empty());
    }

    #[test]
    fn loads_words_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "maison\n\nvoiture").unwrap();

        assert_eq!(load_words(file.path()).unwrap(), vec!["maison", "voiture"]);
    }

    #[test]
    fn empty_file_is_an_empty_deck() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(load_words(file.path()), Err(TrainerError::EmptyDeck)));
    }

    #[test]
    fn missing_file_is_a_word_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_words(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, TrainerError::WordSource(_)));
        assert!(err.to_string().contains("Failed to load vocabulary list"));
    }
}
