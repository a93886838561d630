use crate::aligner::{Aligner, Cigar};
use crate::utils::{Result, Sequence, SequenceReader};
use crossbeam_channel::Sender;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct MappingParams {
    /// Pairs whose score grid would exceed this many cells are skipped.
    pub max_cells: usize,
}

/// Best alignment of a fragment against one reference record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub reference_name: String,
    pub reference_len: usize,
    pub target_begin: usize,
    pub score: i32,
    pub cigar: Cigar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingResult {
    pub fragment_name: String,
    pub fragment_len: usize,
    pub hit: Option<Hit>,
}

/// Aligns `fragment` against every reference record and keeps the highest
/// score; the earliest reference wins ties.
pub fn map_fragment(
    fragment: &Sequence,
    references: &[Sequence],
    aligner: &Aligner,
    params: &MappingParams,
) -> Result<MappingResult> {
    let mut best: Option<Hit> = None;
    for reference in references {
        let cells = (fragment.len() + 1).saturating_mul(reference.len() + 1);
        if cells > params.max_cells {
            log::warn!(
                "Skipping {} vs {}: {} grid cells exceed the limit of {}",
                fragment.name,
                reference.name,
                cells,
                params.max_cells
            );
            continue;
        }

        let aln = aligner
            .align(&fragment.data, &reference.data)
            .map_err(|e| format!("{} vs {}: {}", fragment.name, reference.name, e))?;
        if best.as_ref().is_some_and(|hit| aln.score <= hit.score) {
            continue;
        }
        best = Some(Hit {
            reference_name: reference.name.clone(),
            reference_len: reference.len(),
            target_begin: aln.target_begin.unwrap_or(0),
            score: aln.score,
            cigar: aln.cigar.unwrap_or_default(),
        });
    }

    Ok(MappingResult {
        fragment_name: fragment.name.clone(),
        fragment_len: fragment.len(),
        hit: best,
    })
}

/// Streams fragment records from all `paths` into `sender`, file by file.
/// Stops at the first unreadable file or malformed record.
pub fn stream_fragments_into_channel(paths: &[PathBuf], sender: Sender<Sequence>) -> Result<()> {
    for path in paths {
        log::debug!("Streaming fragments from {}", path.display());
        for record in SequenceReader::from_path(path)? {
            sender
                .send(record?)
                .map_err(|_| "Fragment channel closed before all records were sent".to_string())?;
        }
    }
    Ok(())
}
