//! Draft export: write a finished wizard result to disk as plain text.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("draft has no content to export")]
    Empty,
    #[error("could not create export directory {dir}")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write draft to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Filename-safe slug from a draft title.
pub fn slugify(title: &str) -> String {
    let mut slug = String::new();
    let mut last_dash = true;
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "draft".to_string()
    } else {
        slug
    }
}

/// Write `body` under `dir` as `<slug>.md`, suffixing on collision.
pub fn export(dir: &Path, title: &str, body: &str) -> Result<PathBuf, DraftError> {
    if body.trim().is_empty() {
        return Err(DraftError::Empty);
    }

    std::fs::create_dir_all(dir).map_err(|source| DraftError::CreateDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let slug = slugify(title);
    let mut path = dir.join(format!("{slug}.md"));
    let mut counter = 1;
    while path.exists() {
        path = dir.join(format!("{slug}-{counter}.md"));
        counter += 1;
    }

    std::fs::write(&path, body).map_err(|source| DraftError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!("Exported draft to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_flattens_punctuation_and_case() {
        assert_eq!(slugify("Composting 101: A Guide!"), "composting-101-a-guide");
        assert_eq!(slugify("  ***  "), "draft");
    }

    #[test]
    fn export_writes_and_dedupes() {
        let dir = std::env::temp_dir().join(format!("penna-test-{}", std::process::id()));
        let first = export(&dir, "My Draft", "body one").unwrap();
        let second = export(&dir, "My Draft", "body two").unwrap();
        assert_ne!(first, second);
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "body two");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_rejects_empty_body() {
        let dir = std::env::temp_dir();
        assert!(matches!(export(&dir, "x", "  \n"), Err(DraftError::Empty)));
    }
}
