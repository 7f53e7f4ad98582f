//! File-backed profile data for the persona.
//!
//! The profile directory holds:
//! - `linkedin.pdf`: exported LinkedIn profile (preferred)
//! - `linkedin.txt`: plain-text fallback for the same content
//! - `summary.txt`: short professional summary
//!
//! Missing or unreadable files degrade to placeholder text. Loading never fails.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::sync::OnceCell;

/// Well-known profile file names.
pub mod paths {
    pub const LINKEDIN_PDF: &str = "linkedin.pdf";
    pub const LINKEDIN_TXT: &str = "linkedin.txt";
    pub const SUMMARY: &str = "summary.txt";
}

/// Used when neither linkedin.pdf nor linkedin.txt can be read.
pub const PROFILE_PLACEHOLDER: &str = "LinkedIn profile not available";

/// Used when summary.txt can't be read.
pub const SUMMARY_PLACEHOLDER: &str = "Professional summary not available";

/// The persona's profile. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub summary_text: String,
    pub profile_text: String,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        summary_text: impl Into<String>,
        profile_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            summary_text: summary_text.into(),
            profile_text: profile_text.into(),
        }
    }

    /// A profile with both texts set to their placeholders.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self::new(name, SUMMARY_PLACEHOLDER, PROFILE_PLACEHOLDER)
    }
}

/// Loads the profile once and hands out the cached value afterwards.
pub struct ProfileLoader {
    name: String,
    dir: PathBuf,
    cell: OnceCell<Arc<Profile>>,
}

impl ProfileLoader {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            cell: OnceCell::new(),
        }
    }

    /// Return the profile, reading the files on the first call only.
    ///
    /// Concurrent first callers wait on the same initialization.
    pub async fn load(&self) -> Arc<Profile> {
        self.cell
            .get_or_init(|| async {
                let (profile_text, summary_text) =
                    tokio::join!(read_profile_text(&self.dir), read_summary(&self.dir));
                tracing::info!(
                    name = %self.name,
                    dir = %self.dir.display(),
                    profile_chars = profile_text.len(),
                    summary_chars = summary_text.len(),
                    "Profile loaded"
                );
                Arc::new(Profile::new(self.name.clone(), summary_text, profile_text))
            })
            .await
            .clone()
    }

    /// Whether `load()` has already run.
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}

/// PDF first, then plain text, then the placeholder.
async fn read_profile_text(dir: &Path) -> String {
    let pdf_path = dir.join(paths::LINKEDIN_PDF);
    match read_pdf_text(&pdf_path).await {
        Ok(text) => return text,
        Err(e) => tracing::debug!(path = %pdf_path.display(), error = %e, "No usable profile PDF"),
    }

    let txt_path = dir.join(paths::LINKEDIN_TXT);
    match fs::read_to_string(&txt_path).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                path = %txt_path.display(),
                error = %e,
                "Profile text unavailable, using placeholder"
            );
            PROFILE_PLACEHOLDER.to_string()
        }
    }
}

async fn read_summary(dir: &Path) -> String {
    let path = dir.join(paths::SUMMARY);
    match fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Summary unavailable, using placeholder"
            );
            SUMMARY_PLACEHOLDER.to_string()
        }
    }
}

/// Extract text from a PDF on the blocking pool.
async fn read_pdf_text(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path).await?;
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await??;

    let cleaned = text
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if cleaned.is_empty() {
        anyhow::bail!("PDF contained no extractable text");
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_files_yield_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ProfileLoader::new("Test Person", dir.path());

        let profile = loader.load().await;
        assert_eq!(profile.name, "Test Person");
        assert_eq!(profile.profile_text, PROFILE_PLACEHOLDER);
        assert_eq!(profile.summary_text, SUMMARY_PLACEHOLDER);
        assert_eq!(*profile, Profile::placeholder("Test Person"));
    }

    #[tokio::test]
    async fn test_reads_text_fallback_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(paths::LINKEDIN_TXT), "Staff engineer at Acme").unwrap();
        std::fs::write(dir.path().join(paths::SUMMARY), "Builds distributed systems").unwrap();

        let loader = ProfileLoader::new("Test Person", dir.path());
        let profile = loader.load().await;
        assert_eq!(profile.profile_text, "Staff engineer at Acme");
        assert_eq!(profile.summary_text, "Builds distributed systems");
    }

    #[tokio::test]
    async fn test_corrupt_pdf_falls_back_to_text() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(paths::LINKEDIN_PDF), b"not really a pdf").unwrap();
        std::fs::write(dir.path().join(paths::LINKEDIN_TXT), "from the text file").unwrap();

        let loader = ProfileLoader::new("Test Person", dir.path());
        let profile = loader.load().await;
        assert_eq!(profile.profile_text, "from the text file");
        assert_eq!(profile.summary_text, SUMMARY_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_load_reads_files_only_once() {
        let dir = tempfile::tempdir().unwrap();
        let summary_path = dir.path().join(paths::SUMMARY);
        std::fs::write(&summary_path, "first").unwrap();

        let loader = ProfileLoader::new("Test Person", dir.path());
        assert!(!loader.is_loaded());
        let first = loader.load().await;
        assert!(loader.is_loaded());

        std::fs::write(&summary_path, "second").unwrap();
        let second = loader.load().await;

        assert_eq!(second.summary_text, "first");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_concurrent_first_loads_share_one_profile() {
        let dir = tempfile::tempdir().unwrap();
        let loader = Arc::new(ProfileLoader::new("Test Person", dir.path()));

        let a = tokio::spawn({
            let loader = Arc::clone(&loader);
            async move { loader.load().await }
        });
        let b = tokio::spawn({
            let loader = Arc::clone(&loader);
            async move { loader.load().await }
        });

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert!(Arc::ptr_eq(&a, &b));
    }
}
