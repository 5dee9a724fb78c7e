use std::fmt::Write;

use serde_json::{json, Value};

use crate::analysis::motif_search::MotifResult;
use crate::models::{AnnotationTable, GeneRecord, SequenceRecord};

fn describe(gene: &GeneRecord) -> String {
    format!(
        "Name: {} Start: {} End: {} PID: {}",
        gene.name, gene.start_bp, gene.end_bp, gene.protein_id
    )
}

/// Human readable report for one query, one line per `\n`.
pub fn render_text(motif: &str, result: &MotifResult<'_>) -> String {
    match result {
        MotifResult::NotFound => "Not Found".to_string(),
        MotifResult::WithinGene { offset, gene } => format!(
            "{motif} found at bp {offset}\nWITHIN GENE {}",
            describe(gene)
        ),
        MotifResult::BetweenGenes {
            offset,
            upstream,
            downstream,
        } => format!(
            "{motif} found at bp {offset}\n\tIn between genes:\n\t\tUPSTREAM {}\n\t\tand\n\t\tDOWNSTREAM {}",
            describe(upstream),
            describe(downstream)
        ),
        MotifResult::Unclassified { offset } => format!(
            "{motif} found at bp {offset}\nNot within or between annotated genes"
        ),
    }
}

pub fn render_json(motif: &str, result: &MotifResult<'_>) -> Value {
    json!({
        "motif": motif,
        "match": result,
    })
}

/// First `n` genes, tab separated, with a count line on top.
pub fn gene_table_preview(table: &AnnotationTable, n: usize) -> String {
    let mut out = match table.declared_count {
        Some(declared) => format!("{} genes loaded ({} declared)\n", table.len(), declared),
        None => format!("{} genes loaded\n", table.len()),
    };
    out.push_str("Location\tStrand\tLength\tPID\tGene\tProduct\n");
    for gene in table.genes.iter().take(n) {
        // writing into a String can't fail
        let _ = writeln!(
            out,
            "{}..{}\t{}\t{}\t{}\t{}\t{}",
            gene.start_bp,
            gene.end_bp,
            gene.strand,
            gene.protein_length,
            gene.protein_id,
            gene.name,
            gene.product
        );
    }
    out
}

/// Header line followed by the first `n` characters of the sequence.
pub fn sequence_head(record: &SequenceRecord, n: usize) -> String {
    let head: String = record.sequence.chars().take(n).collect();
    format!("{}\n{}", record.header, head)
}
