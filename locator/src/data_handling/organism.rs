use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::data_handling::fna::parse_sequence;
use crate::data_handling::ptt::parse_annotations;
use crate::helper_functions::LocatorConfig;
use crate::models::{GenomeRecord, GenomeSource, LoadError, LoadedGenome};

/// Loads `<organism>.ptt` and `<organism>.fna` pairs from one directory.
#[derive(Debug, Clone)]
pub struct OrganismLoader {
    pub data_dir: PathBuf,
    pub annotation_extension: String,
    pub sequence_extension: String,
}

impl OrganismLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let defaults = LocatorConfig::default();
        Self {
            data_dir: data_dir.into(),
            annotation_extension: defaults.annotation_extension,
            sequence_extension: defaults.sequence_extension,
        }
    }

    pub fn from_config(data_dir: impl Into<PathBuf>, config: &LocatorConfig) -> Self {
        Self {
            data_dir: data_dir.into(),
            annotation_extension: config.annotation_extension.clone(),
            sequence_extension: config.sequence_extension.clone(),
        }
    }

    pub fn annotation_path(&self, organism: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", organism, self.annotation_extension))
    }

    pub fn sequence_path(&self, organism: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", organism, self.sequence_extension))
    }
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    info!("Attempt to open filename: {}", path.display());
    fs::read_to_string(path).map_err(|source| {
        error!("Failed to read {}: {}", path.display(), source);
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

impl GenomeSource for OrganismLoader {
    fn load(&self, organism: &str) -> Result<LoadedGenome, LoadError> {
        let organism = organism.trim();
        if organism.is_empty() {
            return Err(LoadError::EmptyOrganismName);
        }

        info!("Attempt to load protein table for organism {}", organism);
        let annotation_path = self.annotation_path(organism);
        let parsed = parse_annotations(&read_file(&annotation_path)?);
        for diagnostic in &parsed.diagnostics {
            warn!("{}: {}", annotation_path.display(), diagnostic);
        }
        match parsed.table.declared_count {
            Some(count) => info!(
                "{} declares {} genes, {} parsed",
                annotation_path.display(),
                count,
                parsed.table.len()
            ),
            None => info!("{} parsed {} genes", annotation_path.display(), parsed.table.len()),
        }

        info!("Attempt to load DNA for organism {}", organism);
        let sequence_path = self.sequence_path(organism);
        let sequence = match parse_sequence(&read_file(&sequence_path)?) {
            Ok(sequence) => sequence,
            Err(source) => {
                error!("Failed to parse {}: {}", sequence_path.display(), source);
                return Err(LoadError::Sequence {
                    path: sequence_path,
                    source,
                });
            }
        };
        if let Some(length) = sequence.declared_length {
            info!("{} header declares {}", sequence_path.display(), length);
        }
        info!(
            "Loaded {} nucleotides for {}",
            sequence.sequence.len(),
            organism
        );

        Ok(LoadedGenome {
            genome: GenomeRecord::new(organism, parsed.table, sequence),
            diagnostics: parsed.diagnostics,
        })
    }
}
