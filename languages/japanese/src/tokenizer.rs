use std::io::Write;
use std::process::{Command, Stdio};

use hindo_core::{TokenizeError, Tokenizer};

/// Runs the `mecab` binary and keeps the surface form of every node
pub struct MecabTokenizer {
    program: String,
}

impl MecabTokenizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for MecabTokenizer {
    fn default() -> Self {
        Self::new("mecab")
    }
}

impl Tokenizer for MecabTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| TokenizeError::Process("mecab stdin unavailable".to_string()))?;
        let input = text.to_string();
        // Feed stdin from another thread so a full stdout pipe cannot stall us
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        let written = writer
            .join()
            .map_err(|_| TokenizeError::Process("mecab stdin writer panicked".to_string()))?;

        if !output.status.success() {
            return Err(TokenizeError::Process(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        written?;

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| TokenizeError::Process(format!("mecab output is not UTF-8: {e}")))?;
        Ok(parse_mecab_output(&stdout))
    }
}

/// Surface forms from MeCab's default output (`surface\tfeatures`, one `EOS` per sentence)
pub fn parse_mecab_output(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| *line != "EOS")
        .filter_map(|line| line.split('\t').next())
        .filter(|surface| !surface.is_empty())
        .map(str::to_string)
        .collect()
}

/// For text that is already segmented with whitespace
#[derive(Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        Ok(text.split_whitespace().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_surfaces_across_sentences() {
        let output = "猫\t名詞,一般,*,*,*,*,猫,ネコ,ネコ\n\
                      が\t助詞,格助詞,一般,*,*,*,が,ガ,ガ\n\
                      EOS\n\
                      犬\t名詞,一般,*,*,*,*,犬,イヌ,イヌ\n\
                      EOS\n";

        assert_eq!(parse_mecab_output(output), vec!["猫", "が", "犬"]);
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_mecab_output("\nEOS\n\n"), Vec::<String>::new());
    }

    #[test]
    fn whitespace_split() {
        let tokens = WhitespaceTokenizer.tokenize("猫 が\n猫　を").unwrap();
        // U+3000 is whitespace too
        assert_eq!(tokens, vec!["猫", "が", "猫", "を"]);
    }

    #[test]
    fn missing_binary_is_an_error() {
        let tokenizer = MecabTokenizer::new("hindo-no-such-mecab-binary");
        assert!(matches!(
            tokenizer.tokenize("猫"),
            Err(TokenizeError::Io(_))
        ));
    }
}
