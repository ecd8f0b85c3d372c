//! Writing the merged document and its line map.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDateTime;
use lm_core::MergeReport;

/// `<dir>/logmerger_<YYYYMMDD_HHMMSS>.log`, with `dir` defaulting to the OS
/// temp directory.
pub fn default_output_path(dir: Option<&Path>, now: NaiveDateTime) -> PathBuf {
    let dir = dir.map(Path::to_path_buf).unwrap_or_else(std::env::temp_dir);
    dir.join(format!("logmerger_{}.log", now.format("%Y%m%d_%H%M%S")))
}

/// Write the document to `output` and, if requested, the line map as pretty
/// JSON to `line_map`. Parent directories are created as needed.
pub async fn write_outputs(
    report: &MergeReport,
    output: &Path,
    line_map: Option<&Path>,
) -> anyhow::Result<()> {
    write_file(output, report.text.as_bytes()).await?;
    tracing::debug!(path = %output.display(), bytes = report.text.len(), "wrote merged document");

    if let Some(path) = line_map {
        let json = serde_json::to_vec_pretty(&report.line_map)?;
        write_file(path, &json).await?;
        tracing::debug!(path = %path.display(), lines = report.line_map.len(), "wrote line map");
    }
    Ok(())
}

async fn write_file(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lm_core::{LogMerger, MergerConfig, SourceFile, Theme};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 1)
            .unwrap()
    }

    #[test]
    fn default_path_uses_timestamp() {
        let path = default_output_path(Some(Path::new("/srv/logs")), now());
        assert_eq!(path, PathBuf::from("/srv/logs/logmerger_20240309_070501.log"));

        let path = default_output_path(None, now());
        assert!(path.starts_with(std::env::temp_dir()));
    }

    #[tokio::test]
    async fn writes_document_and_line_map() {
        let merger = LogMerger::from_config(&MergerConfig::default()).unwrap();
        let report = merger.run(
            &[SourceFile::new("app.log", "2024-03-09 07:00:00,000 up\n")],
            Theme::Light,
            now(),
        );

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested/merged.log");
        let map = dir.path().join("merged.json");
        write_outputs(&report, &output, Some(&map)).await.unwrap();

        let text = tokio::fs::read_to_string(&output).await.unwrap();
        assert_eq!(text, report.text);

        let json: serde_json::Value =
            serde_json::from_slice(&tokio::fs::read(&map).await.unwrap()).unwrap();
        assert_eq!(json["7"]["file"], "app.log");
        assert!(json.get("6").is_none());
    }
}
