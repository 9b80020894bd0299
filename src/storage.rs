use crate::model::RosterInputs;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge les entrées depuis un support.
    fn load(&self) -> anyhow::Result<RosterInputs>;
    /// Sauvegarde de manière atomique.
    fn save(&self, inputs: &RosterInputs) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Charge les entrées, ou des entrées vides si le fichier n'existe pas encore.
    pub fn load_or_default(&self) -> anyhow::Result<RosterInputs> {
        if self.path.exists() {
            self.load()
        } else {
            Ok(RosterInputs::default())
        }
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<RosterInputs> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let inputs: RosterInputs =
            serde_json::from_slice(&data).with_context(|| "parsing roster inputs")?;
        Ok(inputs)
    }

    fn save(&self, inputs: &RosterInputs) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(inputs)?;
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(parent).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
