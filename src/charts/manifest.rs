use std::{fmt::Write as _, fs, path::Path};

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub size_bytes: u64,
}

impl Artifact {
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}

/// Every entry directly inside `dir`, sorted by name. Sizes are the entries'
/// metadata lengths (symlinks followed), so a subdirectory reports its
/// directory size.
pub fn list_artifacts(dir: &Path) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Listing output directory {dir:?}"))? {
        let entry = entry.with_context(|| format!("Reading entry in {dir:?}"))?;
        let path = entry.path();
        let metadata =
            fs::metadata(&path).with_context(|| format!("Reading metadata for {path:?}"))?;
        artifacts.push(Artifact {
            name: entry.file_name().to_string_lossy().into_owned(),
            size_bytes: metadata.len(),
        });
    }
    artifacts.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(artifacts)
}

pub fn render_manifest(artifacts: &[Artifact]) -> String {
    let mut output = String::new();
    for (idx, artifact) in artifacts.iter().enumerate() {
        let _ = writeln!(
            output,
            "  {}. {:<45} ({:.1} KB)",
            idx + 1,
            artifact.name,
            artifact.size_kb()
        );
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_manifest_numbers_and_pads_entries() {
        let artifacts = vec![
            Artifact {
                name: "01_histogram_salary.png".to_string(),
                size_bytes: 2048,
            },
            Artifact {
                name: "02_boxplot_salary_by_department.png".to_string(),
                size_bytes: 1536,
            },
        ];
        let rendered = render_manifest(&artifacts);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines[0],
            format!("  1. {:<45} (2.0 KB)", "01_histogram_salary.png")
        );
        assert!(lines[1].starts_with("  2. 02_boxplot_salary_by_department.png "));
        assert!(lines[1].ends_with("(1.5 KB)"));
    }
}
