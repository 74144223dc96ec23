use crate::http::models::PdfEntry;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

/// Persistent store for generated PDFs. The directory doubles as the
/// listing index; nothing is tracked in memory.
pub struct ArtifactStore {
    pdf_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(pdf_dir: impl Into<PathBuf>) -> Self {
        Self {
            pdf_dir: pdf_dir.into(),
        }
    }

    pub async fn save(&self, name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.pdf_dir).await?;

        let path = self.pdf_dir.join(name);
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }

    /// List generated PDFs, most recently modified first. A missing
    /// directory yields an empty list.
    pub async fn list(&self) -> std::io::Result<Vec<PdfEntry>> {
        let mut entries = Vec::new();

        let mut dir = match tokio::fs::read_dir(&self.pdf_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(entries),
            Err(e) => return Err(e),
        };

        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.ends_with(".pdf") {
                continue;
            }

            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }

            let modified = metadata.modified().unwrap_or(UNIX_EPOCH);

            entries.push(PdfEntry {
                path: format!("/pdfs/{}", name),
                name,
                size: metadata.len(),
                created: DateTime::<Utc>::from(modified),
            });
        }

        entries.sort_by(|a, b| b.created.cmp(&a.created));

        Ok(entries)
    }
}

/// Reduce a client name to a filename-safe token: lowercase, alphanumerics
/// and single hyphens only, never empty.
pub fn sanitize_client_name(raw: &str) -> String {
    let mut token = String::with_capacity(raw.len());

    for c in raw.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            token.push(c);
        } else if !token.is_empty() && !token.ends_with('-') {
            token.push('-');
        }
    }

    let token = token.trim_end_matches('-');

    if token.is_empty() {
        "client".to_string()
    } else {
        token.to_string()
    }
}

/// `inspection-<token>-<YYYYMMDDHHMMSS>.pdf`
pub fn pdf_filename(client_name: &str, now: DateTime<Utc>) -> String {
    format!(
        "inspection-{}-{}.pdf",
        sanitize_client_name(client_name),
        now.format("%Y%m%d%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sanitize_replaces_and_lowercases() {
        assert_eq!(sanitize_client_name("Acme Corp!"), "acme-corp");
        assert_eq!(sanitize_client_name("J. Smith & Sons"), "j-smith-sons");
        assert_eq!(sanitize_client_name("already-safe-42"), "already-safe-42");
    }

    #[test]
    fn sanitize_is_total() {
        assert_eq!(sanitize_client_name(""), "client");
        assert_eq!(sanitize_client_name("!!!"), "client");
        assert_eq!(sanitize_client_name("  éüç  "), "client");
        assert_eq!(sanitize_client_name("Café"), "caf");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for raw in ["Acme Corp!", "a--b__c", "  spaced  out  ", "MiXeD123"] {
            let once = sanitize_client_name(raw);
            assert_eq!(sanitize_client_name(&once), once);
            assert!(once
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }

    #[test]
    fn filename_shape() {
        let now = Utc.with_ymd_and_hms(2024, 3, 7, 14, 30, 5).unwrap();
        let name = pdf_filename("Acme Corp!", now);
        assert_eq!(name, "inspection-acme-corp-20240307143005.pdf");

        let stamp = name
            .trim_start_matches("inspection-acme-corp-")
            .trim_end_matches(".pdf");
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn list_missing_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path().join("does-not-exist"));

        let entries = store.list().await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn list_sorts_newest_first_and_skips_non_pdfs() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path());

        store.save("inspection-a-20240101000000.pdf", b"a").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        store.save("inspection-b-20240101000001.pdf", b"bb").await.unwrap();
        tokio::fs::write(tmp.path().join("notes.txt"), b"not a pdf")
            .await
            .unwrap();

        let entries = store.list().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "inspection-b-20240101000001.pdf");
        assert_eq!(entries[0].size, 2);
        assert_eq!(entries[0].path, "/pdfs/inspection-b-20240101000001.pdf");
        assert_eq!(entries[1].name, "inspection-a-20240101000000.pdf");
    }
}
