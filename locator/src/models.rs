use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Strand a gene is annotated on, kept as the single character the table uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl Strand {
    pub fn from_field(field: &str) -> Option<Self> {
        match field {
            "+" => Some(Strand::Forward),
            "-" => Some(Strand::Reverse),
            _ => None,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strand::Forward => "+",
            Strand::Reverse => "-",
        };
        write!(f, "{s}")
    }
}

/// One row of a protein table.
///
/// Coordinates are 1-based and inclusive, exactly as the table states them.
/// `start_bp <= end_bp` is expected of the file but not re-checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneRecord {
    pub start_bp: u64,
    pub end_bp: u64,
    pub strand: Strand,
    pub protein_length: u64,
    pub protein_id: String,
    pub name: String,
    pub product: String,
}

/// Genes in file order plus the count the metadata line claims.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationTable {
    pub genes: Vec<GeneRecord>,
    /// Never reconciled against `genes.len()`.
    pub declared_count: Option<u64>,
}

impl AnnotationTable {
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceRecord {
    pub header: String,
    pub declared_length: Option<u64>,
    /// Body with line breaks removed. Characters are not checked against any alphabet.
    pub sequence: String,
}

/// Annotation and sequence of the one organism currently loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomeRecord {
    organism: String,
    annotations: AnnotationTable,
    sequence: SequenceRecord,
}

impl GenomeRecord {
    /// Assembles a genome, ordering genes by `start_bp`.
    ///
    /// The sort is stable, so genes sharing a start keep their file order and
    /// the first of them still wins when both contain a match.
    pub fn new(organism: impl Into<String>, mut annotations: AnnotationTable, sequence: SequenceRecord) -> Self {
        let organism = organism.into();
        let already_sorted = annotations
            .genes
            .windows(2)
            .all(|pair| pair[0].start_bp <= pair[1].start_bp);
        if !already_sorted {
            debug!("Gene table for {} was not ordered by start; sorting", organism);
            annotations.genes.sort_by_key(|gene| gene.start_bp);
        }
        Self {
            organism,
            annotations,
            sequence,
        }
    }

    pub fn organism(&self) -> &str {
        &self.organism
    }

    pub fn annotations(&self) -> &AnnotationTable {
        &self.annotations
    }

    pub fn genes(&self) -> &[GeneRecord] {
        &self.annotations.genes
    }

    pub fn sequence_record(&self) -> &SequenceRecord {
        &self.sequence
    }

    pub fn sequence(&self) -> &str {
        &self.sequence.sequence
    }
}

/// A skipped or partially understood line in an annotation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number in the file.
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    #[error("metadata line has no gene count")]
    MissingDeclaredCount,
    #[error("gene count `{0}` is not an integer")]
    InvalidDeclaredCount(String),
    #[error("expected at least 9 tab-separated fields, found {found}")]
    TooFewFields { found: usize },
    #[error("location `{0}` is not of the form start..end")]
    InvalidLocation(String),
    #[error("protein length `{0}` is not an integer")]
    InvalidProteinLength(String),
    #[error("strand `{0}` is neither + nor -")]
    InvalidStrand(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("sequence file has a header but no body")]
    MalformedSequenceFile,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("organism name can't be empty")]
    EmptyOrganismName,
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Sequence {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// A genome together with whatever its annotation file made us skip.
#[derive(Debug, Clone)]
pub struct LoadedGenome {
    pub genome: GenomeRecord,
    pub diagnostics: Vec<Diagnostic>,
}

/// Anything able to hand out a genome by organism name.
pub trait GenomeSource {
    fn load(&self, organism: &str) -> Result<LoadedGenome, LoadError>;
}
