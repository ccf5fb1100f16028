#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    pub fn add_dir(&self, path: &str) -> PathBuf {
        let dir_path = self.dir.path().join(path);
        fs::create_dir_all(&dir_path).expect("Failed to create dir");
        dir_path
    }

    /// Write a zip schema artifact with the given entries.
    pub fn add_dacpac(&self, path: &str, entries: &[(&str, &str)]) -> PathBuf {
        let file_path = self.dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        let file = fs::File::create(&file_path).expect("Failed to create dacpac");
        let mut zip = zip::ZipWriter::new(file);
        for (name, content) in entries {
            zip.start_file(*name, SimpleFileOptions::default())
                .expect("Failed to start zip entry");
            zip.write_all(content.as_bytes())
                .expect("Failed to write zip entry");
        }
        zip.finish().expect("Failed to finish dacpac");
        file_path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }
}

/// A schema model carrying build-machine paths under `root`.
pub fn model_xml(root: &str, table: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<DataSchemaModel FileFormatVersion="1.2" SchemaVersion="2.9">
  <Header>
    <Metadata Name="FileName" Value="{root}\bin\Release\Shop.Database.dacpac" />
    <Metadata Name="AssemblySymbolsName" Value="{root}\bin\Release\Shop.Database.pdb" />
  </Header>
  <Model>
    <Element Type="SqlTable" Name="[dbo].[{table}]" />
  </Model>
</DataSchemaModel>"#
    )
}
