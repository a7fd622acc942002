//! Tesseract command-line OCR.
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use docrank_core::config::OcrSettings;
use docrank_core::traits::OcrEngine;
use docrank_core::ExtractionError;
use tokio::process::Command;

/// Runs `<binary> <image> stdout -l <langs> [--tessdata-dir <dir>]` and reads
/// the recognized text from stdout. The child is killed if the call times out.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    binary: PathBuf,
    languages: String,
    tessdata_dir: Option<PathBuf>,
    timeout: Duration,
}

impl TesseractOcr {
    pub fn new(settings: &OcrSettings) -> Self {
        Self {
            binary: settings.binary_path(),
            languages: settings.languages.join("+"),
            tessdata_dir: settings.tessdata_path(),
            timeout: settings.timeout(),
        }
    }

    fn args(&self, image: &Path) -> Vec<String> {
        let mut args = vec![
            image.to_string_lossy().to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.languages.clone(),
        ];
        if let Some(dir) = &self.tessdata_dir {
            args.push("--tessdata-dir".to_string());
            args.push(dir.to_string_lossy().to_string());
        }
        args
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, image: &Path) -> Result<String, ExtractionError> {
        if !image.is_file() {
            return Err(ExtractionError::EngineFailure(format!("image not readable: {}", image.display())));
        }

        let child = Command::new(&self.binary)
            .args(self.args(image))
            .kill_on_drop(true)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ExtractionError::EngineFailure(format!("failed to spawn {}: {e}", self.binary.display())))?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(res) => res.map_err(|e| ExtractionError::EngineFailure(format!("failed waiting for ocr: {e}")))?,
            Err(_) => {
                return Err(ExtractionError::EngineFailure(format!(
                    "ocr timed out after {:?} on {}",
                    self.timeout,
                    image.display()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ExtractionError::EngineFailure(format!("ocr exited with {}: {stderr}", output.status)));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
