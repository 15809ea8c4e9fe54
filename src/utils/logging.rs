use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Optional append-only transcript log, driven by the `/log` command or the
/// `--log` flag. Separate from the tracing-based debug log.
pub struct LoggingState {
    file_path: Option<String>,
    is_active: bool,
}

impl LoggingState {
    pub fn new(log_file: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut logging = LoggingState {
            file_path: log_file,
            is_active: false,
        };

        // A file provided at startup enables logging immediately.
        if let Some(path) = logging.file_path.clone() {
            logging.test_file_access(&path)?;
            logging.is_active = true;
        }

        Ok(logging)
    }

    pub fn set_log_file(&mut self, path: String) -> Result<String, Box<dyn std::error::Error>> {
        // Test if we can create/write to the file
        self.test_file_access(&path)?;

        self.file_path = Some(path.clone());
        self.is_active = true;

        Ok(format!("Logging enabled to: {path}"))
    }

    pub fn toggle_logging(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        match &self.file_path {
            Some(path) => {
                if self.is_active {
                    // Record the pause in the log before going quiet.
                    self.log_message("## Logging paused")?;
                    self.is_active = false;
                    Ok(format!("Logging paused (file: {path})"))
                } else {
                    self.is_active = true;
                    Ok(format!("Logging resumed to: {path}"))
                }
            }
            None => {
                Err("No log file specified. Use /log <filename> to enable logging first.".into())
            }
        }
    }

    pub fn log_message(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        let Some(file_path) = self.file_path.as_ref().filter(|_| self.is_active) else {
            return Ok(());
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;

        let mut writer = BufWriter::new(file);

        // Write each line of content, preserving the exact formatting
        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }

        // Empty line after each message for spacing, matching the screen
        writeln!(writer)?;

        writer.flush()?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn get_status_string(&self) -> String {
        match (&self.file_path, self.is_active) {
            (None, _) => "disabled".to_string(),
            (Some(path), true) => format!(
                "active ({})",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
            (Some(path), false) => format!(
                "paused ({})",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
        }
    }

    fn test_file_access(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn no_file_means_disabled_and_silent() {
        let logging = LoggingState::new(None).unwrap();
        assert!(!logging.is_active());
        assert_eq!(logging.get_status_string(), "disabled");
        assert!(logging.log_message("ignored").is_ok());
    }

    #[test]
    fn startup_file_enables_logging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.log");
        let logging = LoggingState::new(Some(path.to_string_lossy().into_owned())).unwrap();

        assert!(logging.is_active());
        logging.log_message("You: Hello").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "You: Hello\n\n");
    }

    #[test]
    fn toggle_pauses_and_resumes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.log");
        let mut logging = LoggingState::new(None).unwrap();
        logging
            .set_log_file(path.to_string_lossy().into_owned())
            .unwrap();

        let status = logging.toggle_logging().unwrap();
        assert!(status.starts_with("Logging paused"));
        logging.log_message("dropped while paused").unwrap();

        let status = logging.toggle_logging().unwrap();
        assert!(status.starts_with("Logging resumed"));
        logging.log_message("kept").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("## Logging paused"));
        assert!(!contents.contains("dropped while paused"));
        assert!(contents.contains("kept"));
    }

    #[test]
    fn toggle_without_file_is_an_error() {
        let mut logging = LoggingState::new(None).unwrap();
        assert!(logging.toggle_logging().is_err());
    }
}
