use std::io::{self, BufRead, Write};

use tracing::{error, info};

use crate::analysis::motif_search::locate;
use crate::analysis::report::{gene_table_preview, render_json, render_text, sequence_head};
use crate::models::{GenomeRecord, GenomeSource, LoadError};

const LINE: &str = "----------------------------------------------------------";
const DOUBLE_LINE: &str = "==========================================================================";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Drives lookups against whichever organism is currently loaded.
pub struct Session<S> {
    source: S,
    pub format: OutputFormat,
    pub show_genes: Option<usize>,
    pub head: Option<usize>,
}

impl<S: GenomeSource> Session<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            format: OutputFormat::default(),
            show_genes: None,
            head: None,
        }
    }

    pub fn open(&self, organism: &str) -> Result<GenomeRecord, LoadError> {
        let loaded = self.source.load(organism)?;
        if !loaded.diagnostics.is_empty() {
            info!(
                "{} annotation lines skipped for {}",
                loaded.diagnostics.len(),
                loaded.genome.organism()
            );
        }
        Ok(loaded.genome)
    }

    /// Print whichever of the gene table and sequence previews were requested.
    pub fn preview<W: Write>(&self, genome: &GenomeRecord, out: &mut W) -> io::Result<()> {
        if let Some(n) = self.show_genes {
            writeln!(out, "{}", gene_table_preview(genome.annotations(), n))?;
        }
        if let Some(n) = self.head {
            writeln!(out, "{}", sequence_head(genome.sequence_record(), n))?;
        }
        Ok(())
    }

    pub fn query<W: Write>(&self, genome: &GenomeRecord, motif: &str, out: &mut W) -> io::Result<()> {
        let result = locate(genome, motif);
        match self.format {
            OutputFormat::Text => writeln!(out, "{}", render_text(motif, &result)),
            OutputFormat::Json => writeln!(out, "{}", render_json(motif, &result)),
        }
    }

    /// Prompt for organisms and motifs until the user declines or input ends.
    ///
    /// A failed load is reported and the organism prompt shown again.
    pub fn run_interactive<R: BufRead, W: Write>(&self, mut input: R, mut out: W) -> io::Result<()> {
        'organisms: loop {
            writeln!(out, "{DOUBLE_LINE}")?;
            let Some(organism) = prompt(&mut input, &mut out, "Enter the Organism name (e.g., Ecoli): ")? else {
                break;
            };
            if organism.is_empty() {
                continue;
            }

            let genome = match self.open(&organism) {
                Ok(genome) => genome,
                Err(e) => {
                    error!("Failed to load {}: {}", organism, e);
                    writeln!(out, "Could not load {organism}: {e}")?;
                    continue;
                }
            };
            self.preview(&genome, &mut out)?;

            loop {
                let Some(motif) = prompt(&mut input, &mut out, "What motif would you like to find >> ")? else {
                    break 'organisms;
                };
                if motif.is_empty() {
                    continue;
                }
                self.query(&genome, &motif, &mut out)?;
                writeln!(out, "{LINE}")?;

                match ask_until_answered(&mut input, &mut out, "Do you want to search for another motif? (Y/n): ")? {
                    Some(true) => {}
                    Some(false) => break,
                    None => break 'organisms,
                }
            }

            let Some(answer) = prompt(&mut input, &mut out, "Do you want to try another organism? (Y/n):")? else {
                break;
            };
            writeln!(out, "{LINE}")?;
            if is_no(&answer) {
                break;
            }
        }

        writeln!(out, "{DOUBLE_LINE}")?;
        Ok(())
    }
}

/// `None` once input is exhausted.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> io::Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn ask_until_answered<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> io::Result<Option<bool>> {
    loop {
        let Some(answer) = prompt(input, out, message)? else {
            return Ok(None);
        };
        writeln!(out, "{LINE}")?;
        if !answer.is_empty() {
            return Ok(Some(!is_no(&answer)));
        }
    }
}

fn is_no(answer: &str) -> bool {
    answer.starts_with(['n', 'N'])
}
