//! Find a nucleotide motif in a genome and report the gene it falls in, or
//! the two genes flanking the gap it falls in.
//!
//! Organisms are loaded from a protein table (`.ptt`) and a sequence file
//! (`.fna`) sharing a name:
//!
//! ```rust,no_run
//! use motif_locator::{locate, GenomeSource, MotifResult, OrganismLoader};
//!
//! let loaded = OrganismLoader::new("./data").load("Ecoli")?;
//! if let MotifResult::WithinGene { offset, gene } = locate(&loaded.genome, "GATTACA") {
//!     println!("{offset} is inside {}", gene.name);
//! }
//! # Ok::<(), motif_locator::LoadError>(())
//! ```

pub mod analysis;
pub mod data_handling;
pub mod helper_functions;
pub mod models;
pub mod session;

pub use analysis::motif_search::{locate, MotifResult};
pub use data_handling::fna::parse_sequence;
pub use data_handling::organism::OrganismLoader;
pub use data_handling::ptt::{parse_annotations, ParsedAnnotations};
pub use models::{
    AnnotationTable, Diagnostic, DiagnosticKind, GeneRecord, GenomeRecord, GenomeSource, LoadError,
    LoadedGenome, ParseError, SequenceRecord, Strand,
};
