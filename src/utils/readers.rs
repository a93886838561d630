use super::Result;
use bio::io::{fasta, fastq};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read as ioRead};
use std::path::Path;

const FASTA_EXTENSIONS: [&str; 3] = ["fasta", "fna", "fa"];
const FASTQ_EXTENSIONS: [&str; 2] = ["fastq", "fq"];

/// A named sequence record. Quality is only present for FASTQ input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub name: String,
    pub data: Vec<u8>,
    pub quality: Option<Vec<u8>>,
}

impl Sequence {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            quality: None,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceFormat {
    Fasta,
    Fastq,
}

impl SequenceFormat {
    /// Infers the format from the file extension, ignoring a trailing `.gz`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path.to_string_lossy().to_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        let extension = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        if FASTA_EXTENSIONS.contains(&extension) {
            Ok(SequenceFormat::Fasta)
        } else if FASTQ_EXTENSIONS.contains(&extension) {
            Ok(SequenceFormat::Fastq)
        } else {
            Err(format!("Unsupported file type: {}", path.display()))
        }
    }
}

fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".gzip")
}

pub fn open_sequence_reader(path: &Path) -> Result<Box<dyn ioRead>> {
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(BufReader::new(file));
        if gz_decoder.header().is_some() {
            Ok(Box::new(gz_decoder))
        } else {
            Err(format!("Invalid gzip header: {}", path.to_string_lossy()))
        }
    } else {
        Ok(Box::new(file))
    }
}

enum Records {
    Fasta(fasta::Records<BufReader<Box<dyn ioRead>>>),
    Fastq(fastq::Records<BufReader<Box<dyn ioRead>>>),
}

/// Streams FASTA or FASTQ records, optionally gzip-compressed.
pub struct SequenceReader {
    records: Records,
    path: String,
}

impl SequenceReader {
    pub fn from_path(path: &Path) -> Result<Self> {
        let format = SequenceFormat::from_path(path)?;
        let reader = open_sequence_reader(path)?;
        Ok(Self::new(reader, format, &path.to_string_lossy()))
    }

    pub fn new(reader: Box<dyn ioRead>, format: SequenceFormat, source: &str) -> Self {
        let records = match format {
            SequenceFormat::Fasta => Records::Fasta(fasta::Reader::new(reader).records()),
            SequenceFormat::Fastq => Records::Fastq(fastq::Reader::new(reader).records()),
        };
        Self {
            records,
            path: source.to_string(),
        }
    }
}

impl Iterator for SequenceReader {
    type Item = Result<Sequence>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = &self.path;
        match &mut self.records {
            Records::Fasta(records) => records.next().map(|result| {
                result
                    .map(|rec| Sequence::new(rec.id(), rec.seq()))
                    .map_err(|e| format!("Failed to parse FASTA record in {}: {}", path, e))
            }),
            Records::Fastq(records) => records.next().map(|result| {
                result
                    .map(|rec| Sequence {
                        name: rec.id().to_string(),
                        data: rec.seq().to_vec(),
                        quality: Some(rec.qual().to_vec()),
                    })
                    .map_err(|e| format!("Failed to parse FASTQ record in {}: {}", path, e))
            }),
        }
    }
}

/// Reads every record of a FASTA reference file.
pub fn read_reference(path: &Path) -> Result<Vec<Sequence>> {
    if SequenceFormat::from_path(path)? != SequenceFormat::Fasta {
        return Err(format!(
            "Reference must be in FASTA format: {}",
            path.display()
        ));
    }
    SequenceReader::from_path(path)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::io::{Cursor, Write};
    use tempfile::Builder;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            SequenceFormat::from_path(Path::new("ref.fa")),
            Ok(SequenceFormat::Fasta)
        );
        assert_eq!(
            SequenceFormat::from_path(Path::new("dir/ref.FASTA.gz")),
            Ok(SequenceFormat::Fasta)
        );
        assert_eq!(
            SequenceFormat::from_path(Path::new("reads.fq.gz")),
            Ok(SequenceFormat::Fastq)
        );
        assert_eq!(
            SequenceFormat::from_path(Path::new("reads.bam")),
            Err("Unsupported file type: reads.bam".to_string())
        );
        assert!(SequenceFormat::from_path(Path::new("fasta")).is_err());
    }

    #[test]
    fn read_fasta_records() {
        let data = ">seq1 first\nACGT\nAC\n>seq2\nGG\n";
        let reader = SequenceReader::new(
            Box::new(Cursor::new(data)),
            SequenceFormat::Fasta,
            "test",
        );
        let records: Vec<Sequence> = reader.collect::<Result<_>>().unwrap();
        assert_eq!(
            records,
            vec![Sequence::new("seq1", "ACGTAC"), Sequence::new("seq2", "GG")]
        );
    }

    #[test]
    fn read_fastq_records() {
        let data = "@read1\nACG\n+\nIII\n@read2\nTT\n+\n##\n";
        let reader = SequenceReader::new(
            Box::new(Cursor::new(data)),
            SequenceFormat::Fastq,
            "test",
        );
        let records: Vec<Sequence> = reader.collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "read1");
        assert_eq!(records[0].data, b"ACG");
        assert_eq!(records[1].quality.as_deref(), Some(&b"##"[..]));
    }

    #[test]
    fn read_gzipped_reference() {
        let mut file = Builder::new().suffix(".fa.gz").tempfile().unwrap();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b">chr1\nGATTACA\n>chr2\nGCATGCU\n").unwrap();
        file.write_all(&encoder.finish().unwrap()).unwrap();
        file.flush().unwrap();

        let records = read_reference(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], Sequence::new("chr2", "GCATGCU"));
    }

    #[test]
    fn reference_rejects_fastq() {
        let file = Builder::new().suffix(".fq").tempfile().unwrap();
        assert!(read_reference(file.path())
            .unwrap_err()
            .starts_with("Reference must be in FASTA format"));
    }

    #[test]
    fn invalid_gzip_is_reported() {
        let mut file = Builder::new().suffix(".fa.gz").tempfile().unwrap();
        file.write_all(b">chr1\nACGT\n").unwrap();
        file.flush().unwrap();
        assert!(open_sequence_reader(file.path()).is_err());
    }
}
