//! Classify where a motif first occurs relative to the annotated genes.
//!
//! Only the lowest offset occurrence is considered. Its 0-based offset and
//! exclusive end are compared directly against the table's 1-based inclusive
//! gene coordinates:
//!
//! * inside a gene when `start_bp <= offset` and `end_bp >= offset + len`
//! * between genes `i - 1` and `i` when gene `i` starts after `offset + len`
//!   and gene `i - 1` starts at or before `offset`
//!
//! Genes are scanned in table order and the first rule that fires wins.

use serde::Serialize;

use crate::models::{GeneRecord, GenomeRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MotifResult<'a> {
    /// The motif does not occur in the sequence.
    NotFound,
    WithinGene {
        offset: u64,
        gene: &'a GeneRecord,
    },
    BetweenGenes {
        offset: u64,
        upstream: &'a GeneRecord,
        downstream: &'a GeneRecord,
    },
    /// The motif occurs, but neither inside a gene nor in a gap flanked by two.
    Unclassified { offset: u64 },
}

impl MotifResult<'_> {
    /// Offset of the classified occurrence, if there was one.
    pub fn offset(&self) -> Option<u64> {
        match *self {
            MotifResult::NotFound => None,
            MotifResult::WithinGene { offset, .. }
            | MotifResult::BetweenGenes { offset, .. }
            | MotifResult::Unclassified { offset } => Some(offset),
        }
    }
}

/// Find the first occurrence of `motif` and place it against the gene table.
///
/// An empty motif occurs at offset 0 and is classified from there.
pub fn locate<'a>(genome: &'a GenomeRecord, motif: &str) -> MotifResult<'a> {
    match genome.sequence().find(motif) {
        Some(offset) => classify(genome.genes(), offset as u64, motif.len() as u64),
        None => MotifResult::NotFound,
    }
}

fn classify(genes: &[GeneRecord], offset: u64, length: u64) -> MotifResult<'_> {
    let match_start = offset;
    let match_end = offset + length;

    for (idx, gene) in genes.iter().enumerate() {
        if gene.start_bp <= match_start && gene.end_bp >= match_end {
            return MotifResult::WithinGene { offset, gene };
        }
        if gene.start_bp > match_end && idx > 0 {
            let upstream = &genes[idx - 1];
            if upstream.start_bp <= match_start {
                return MotifResult::BetweenGenes {
                    offset,
                    upstream,
                    downstream: gene,
                };
            }
        }
    }

    MotifResult::Unclassified { offset }
}
