// Protein table (.ptt) parsing.
//
// Layout:
//   line 1  free-text title
//   line 2  "<n> proteins" - only the first token is read
//   line 3  column header
//   line 4+ Location  Strand  Length  PID  Gene  Synonym  Code  COG  Product

use csv::{ReaderBuilder, StringRecord, Terminator};

use crate::models::{AnnotationTable, Diagnostic, DiagnosticKind, GeneRecord, Strand};

const MIN_FIELDS: usize = 9;
const HEADER_LINES: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct ParsedAnnotations {
    pub table: AnnotationTable,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse the text of a protein table.
///
/// Never fails: lines that cannot be turned into a [`GeneRecord`] are skipped
/// and reported in `diagnostics`, and the remaining genes keep file order.
pub fn parse_annotations(text: &str) -> ParsedAnnotations {
    let mut parsed = ParsedAnnotations::default();

    let mut lines = text.trim().splitn(HEADER_LINES + 1, '\n');
    let _title = lines.next();
    if let Some(metadata) = lines.next() {
        match parse_declared_count(metadata.trim_end_matches('\r')) {
            Ok(count) => parsed.table.declared_count = Some(count),
            Err(kind) => parsed.diagnostics.push(Diagnostic { line: 2, kind }),
        }
    }
    let _columns = lines.next();
    let body = lines.next().unwrap_or("");

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .terminator(Terminator::Any(b'\n'))
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(body.as_bytes());

    // the reader drops empty lines, so gaps in its line numbers are blank lines
    let mut next_line = 1;
    // text is valid UTF-8 and unquoted, so no record can fail to read
    for record in reader.records().filter_map(Result::ok) {
        let body_line = record.position().map_or(next_line, |p| p.line() as usize);
        for blank in next_line..body_line {
            parsed.diagnostics.push(Diagnostic {
                line: HEADER_LINES + blank,
                kind: DiagnosticKind::TooFewFields { found: 1 },
            });
        }
        next_line = body_line + 1;

        match parse_gene(&record) {
            Ok(gene) => parsed.table.genes.push(gene),
            Err(kind) => parsed.diagnostics.push(Diagnostic {
                line: HEADER_LINES + body_line,
                kind,
            }),
        }
    }

    parsed
}

fn parse_declared_count(line: &str) -> Result<u64, DiagnosticKind> {
    let token = line
        .split_whitespace()
        .next()
        .ok_or(DiagnosticKind::MissingDeclaredCount)?;
    token
        .parse()
        .map_err(|_| DiagnosticKind::InvalidDeclaredCount(token.to_string()))
}

/// Field `idx` with the `\r` of a CRLF line ending removed from the last field.
fn field(record: &StringRecord, idx: usize) -> &str {
    if idx + 1 == record.len() {
        record[idx].trim_end_matches('\r')
    } else {
        &record[idx]
    }
}

fn parse_gene(record: &StringRecord) -> Result<GeneRecord, DiagnosticKind> {
    if record.len() < MIN_FIELDS {
        return Err(DiagnosticKind::TooFewFields {
            found: record.len(),
        });
    }

    let protein_length = field(record, 2)
        .parse()
        .map_err(|_| DiagnosticKind::InvalidProteinLength(field(record, 2).to_string()))?;
    let (start_bp, end_bp) = parse_location(field(record, 0))?;
    let strand = Strand::from_field(field(record, 1))
        .ok_or_else(|| DiagnosticKind::InvalidStrand(field(record, 1).to_string()))?;

    Ok(GeneRecord {
        start_bp,
        end_bp,
        strand,
        protein_length,
        protein_id: field(record, 3).to_string(),
        name: field(record, 4).to_string(),
        product: field(record, 8).to_string(),
    })
}

/// `start..end`; anything after a second `..` is ignored.
fn parse_location(field: &str) -> Result<(u64, u64), DiagnosticKind> {
    let invalid = || DiagnosticKind::InvalidLocation(field.to_string());
    let mut halves = field.split("..");
    let start = halves.next().ok_or_else(invalid)?;
    let end = halves.next().ok_or_else(invalid)?;
    let start = start.parse().map_err(|_| invalid())?;
    let end = end.parse().map_err(|_| invalid())?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ECOLI_HEAD: &str = "Escherichia coli str. K-12 substr. MG1655, complete genome - 1..4641652\n\
4140 proteins\n\
Location\tStrand\tLength\tPID\tGene\tSynonym\tCode\tCOG\tProduct\n\
190..255\t+\t21\t16127995\tthrL\tb0001\t-\t-\tthr operon leader peptide\n\
337..2799\t+\t820\t16127996\tthrA\tb0002\t-\tCOG0460E\tbifunctional aspartokinase\n\
2801..3733\t+\t310\t16127997\tthrB\tb0003\t-\tCOG0083E\thomoserine kinase\n";

    #[test]
    fn parses_well_formed_table_in_file_order() {
        let parsed = parse_annotations(ECOLI_HEAD);
        assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
        assert_eq!(parsed.table.declared_count, Some(4140));
        assert_eq!(parsed.table.len(), 3);

        let thr_l = &parsed.table.genes[0];
        assert_eq!(thr_l.start_bp, 190);
        assert_eq!(thr_l.end_bp, 255);
        assert_eq!(thr_l.strand, Strand::Forward);
        assert_eq!(thr_l.protein_length, 21);
        assert_eq!(thr_l.protein_id, "16127995");
        assert_eq!(thr_l.name, "thrL");
        assert_eq!(thr_l.product, "thr operon leader peptide");

        let names: Vec<&str> = parsed.table.genes.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["thrL", "thrA", "thrB"]);
        for gene in &parsed.table.genes {
            assert!(gene.end_bp >= gene.start_bp);
        }
    }

    #[test]
    fn non_numeric_metadata_is_not_fatal() {
        let text = "title\nmany proteins\ncolumns\n1..9\t-\t2\tp1\tg1\ts\tc\tcog\tprod\n";
        let parsed = parse_annotations(text);
        assert_eq!(parsed.table.declared_count, None);
        assert_eq!(parsed.table.len(), 1);
        assert_eq!(parsed.table.genes[0].strand, Strand::Reverse);
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic {
                line: 2,
                kind: DiagnosticKind::InvalidDeclaredCount("many".to_string()),
            }]
        );
    }

    #[test]
    fn blank_metadata_line_reports_missing_count() {
        let parsed = parse_annotations("title\n   \ncolumns\n");
        assert_eq!(parsed.table.declared_count, None);
        assert!(parsed.table.is_empty());
        assert_eq!(parsed.diagnostics[0].kind, DiagnosticKind::MissingDeclaredCount);
    }

    #[test]
    fn malformed_lines_are_skipped_and_reported() {
        let text = "title\n5 proteins\ncolumns\n\
10..20\t+\t3\tp1\tgeneA\ts\tc\tcog\tfirst\n\
short\tline\n\
30..40\t+\tabc\tp2\tgeneB\ts\tc\tcog\tbad length\n\
50-60\t+\t3\tp3\tgeneC\ts\tc\tcog\tbad location\n\
70..x\t+\t3\tp4\tgeneD\ts\tc\tcog\tbad end\n\
80..90\t?\t3\tp5\tgeneE\ts\tc\tcog\tbad strand\n\
100..120\t-\t6\tp6\tgeneF\ts\tc\tcog\tlast\n";
        let parsed = parse_annotations(text);

        let names: Vec<&str> = parsed.table.genes.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["geneA", "geneF"]);
        assert_eq!(parsed.table.declared_count, Some(5));

        let found: Vec<(usize, DiagnosticKind)> = parsed
            .diagnostics
            .into_iter()
            .map(|d| (d.line, d.kind))
            .collect();
        assert_eq!(
            found,
            vec![
                (5, DiagnosticKind::TooFewFields { found: 2 }),
                (6, DiagnosticKind::InvalidProteinLength("abc".to_string())),
                (7, DiagnosticKind::InvalidLocation("50-60".to_string())),
                (8, DiagnosticKind::InvalidLocation("70..x".to_string())),
                (9, DiagnosticKind::InvalidStrand("?".to_string())),
            ]
        );
    }

    #[test]
    fn extra_columns_and_empty_identifiers_are_kept() {
        let text = "t\n1\nc\n5..8\t+\t0\t\t\t\t\t\t\textra\n";
        let parsed = parse_annotations(text);
        assert!(parsed.diagnostics.is_empty());
        let gene = &parsed.table.genes[0];
        assert_eq!(gene.protein_length, 0);
        assert!(gene.name.is_empty());
        assert!(gene.product.is_empty());
    }

    #[test]
    fn windows_line_endings_do_not_leak_into_fields() {
        let text = "title\r\n1 proteins\r\ncolumns\r\n1..4\t+\t1\tp\tg\ts\tc\tcog\tproduct\r\n";
        let parsed = parse_annotations(text);
        assert_eq!(parsed.table.declared_count, Some(1));
        assert_eq!(parsed.table.genes[0].product, "product");
    }

    #[test]
    fn empty_or_header_only_input_yields_empty_table() {
        assert!(parse_annotations("").table.is_empty());
        let parsed = parse_annotations("title\n0 proteins\ncolumns");
        assert!(parsed.table.is_empty());
        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.table.declared_count, Some(0));
    }

    #[test]
    fn blank_body_lines_are_reported_as_too_few_fields() {
        let text = "title\n2 proteins\ncolumns\n\
10..20\t+\t3\tp1\tgeneA\ts\tc\tcog\tfirst\n\
\n\
\n\
50..60\t-\t3\tp2\tgeneB\ts\tc\tcog\tsecond\n";
        let parsed = parse_annotations(text);
        assert_eq!(parsed.table.len(), 2);
        assert_eq!(
            parsed.diagnostics,
            vec![
                Diagnostic {
                    line: 5,
                    kind: DiagnosticKind::TooFewFields { found: 1 },
                },
                Diagnostic {
                    line: 6,
                    kind: DiagnosticKind::TooFewFields { found: 1 },
                },
            ]
        );
    }

    #[test]
    fn stray_carriage_return_stays_inside_its_line() {
        let text = "t\n2\nc\n\
1..4\t+\t1\tp\tg\ts\tc\tcog\tsplit\rproduct\n\
5..9\t+\t1\tq\th\ts\tc\tcog\tnext\n";
        let parsed = parse_annotations(text);
        assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
        assert_eq!(parsed.table.len(), 2);
        assert_eq!(parsed.table.genes[0].product, "split\rproduct");
        assert_eq!(parsed.table.genes[1].name, "h");
    }

    #[test]
    fn location_takes_first_two_parts() {
        assert_eq!(parse_location("1..2..3"), Ok((1, 2)));
        assert_eq!(parse_location("7..9"), Ok((7, 9)));
        assert_eq!(
            parse_location("12"),
            Err(DiagnosticKind::InvalidLocation("12".to_string()))
        );
    }
}
