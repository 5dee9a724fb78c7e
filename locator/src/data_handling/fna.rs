use crate::models::{ParseError, SequenceRecord};

/// Parse a single-record nucleotide file: one `|`-delimited header line
/// followed by the sequence wrapped over any number of lines.
pub fn parse_sequence(text: &str) -> Result<SequenceRecord, ParseError> {
    let (header, body) = text
        .split_once('\n')
        .ok_or(ParseError::MalformedSequenceFile)?;
    let header = header.trim_end_matches('\r');

    // informational only, so a bad value just stays unset
    let declared_length = header
        .split('|')
        .nth(1)
        .and_then(|field| field.trim().parse().ok());

    let sequence: String = body.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();

    Ok(SequenceRecord {
        header: header.to_string(),
        declared_length,
        sequence,
    })
}
