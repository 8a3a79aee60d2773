//! Review submission commands

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use coderev_core::ReviewService;

use super::print_review;

/// Upload size bound, matching the service boundary contract
const MAX_UPLOAD_BYTES: u64 = 2 * 1024 * 1024;

/// Review a code snippet with an explicit language
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File to read the snippet from; stdin when omitted
    pub file: Option<PathBuf>,

    /// Language tag of the snippet (e.g. python, javascript, go)
    #[arg(short, long)]
    pub language: String,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub async fn execute(&self, service: &ReviewService, owner: &str) -> anyhow::Result<()> {
        let code = match &self.file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read code from stdin")?;
                buffer
            }
        };

        let review = service.analyze(owner, &code, &self.language).await?;
        print_review(&review);

        Ok(())
    }
}

/// Review a source file, inferring the language from its name
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// File to review
    pub file: PathBuf,

    /// Language tag override; inferred from the file name when omitted
    #[arg(short, long)]
    pub language: Option<String>,
}

impl UploadArgs {
    /// Execute the upload command
    pub async fn execute(&self, service: &ReviewService, owner: &str) -> anyhow::Result<()> {
        let metadata = std::fs::metadata(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;

        if metadata.len() > MAX_UPLOAD_BYTES {
            anyhow::bail!(
                "{} is {} bytes, above the {} byte upload limit",
                self.file.display(),
                metadata.len(),
                MAX_UPLOAD_BYTES
            );
        }

        let bytes = std::fs::read(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;

        let file_name = self
            .file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        let review = service
            .analyze_upload(owner, &bytes, file_name, self.language.as_deref())
            .await?;
        print_review(&review);

        Ok(())
    }
}
