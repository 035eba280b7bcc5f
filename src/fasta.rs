/// fasta.rs — Minimal FASTA reader (ambient supplement)
///
/// Parses `>`-delimited FASTA text into uppercase `{A,C,G,T,N}` byte
/// buffers. Bare base text with no header line is accepted as a single
/// implicit record, matching this codebase's existing "inline text or
/// `--file`" pattern.
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub name: String,
    pub bases: Vec<u8>,
}

pub fn parse(bytes: &[u8]) -> Result<Vec<FastaRecord>> {
    let text = std::str::from_utf8(bytes).map_err(|_| Error::FastaNotUtf8)?;

    if !text.trim_start().starts_with('>') {
        let bases = normalize(text.as_bytes(), "<input>")?;
        if bases.is_empty() {
            return Err(Error::EmptyRecord {
                name: "<input>".to_string(),
            });
        }
        return Ok(vec![FastaRecord {
            name: "<input>".to_string(),
            bases,
        }]);
    }

    let mut records = Vec::new();
    let mut name: Option<String> = None;
    let mut seq = String::new();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if let Some(header) = line.strip_prefix('>') {
            if let Some(prev_name) = name.take() {
                let bases = normalize(seq.as_bytes(), &prev_name)?;
                records.push(FastaRecord {
                    name: prev_name,
                    bases,
                });
            }
            name = Some(header.trim().to_string());
            seq.clear();
        } else {
            seq.push_str(line.trim());
        }
    }
    if let Some(prev_name) = name {
        let bases = normalize(seq.as_bytes(), &prev_name)?;
        records.push(FastaRecord {
            name: prev_name,
            bases,
        });
    }

    if records.is_empty() {
        return Err(Error::EmptyFasta);
    }
    for record in &records {
        if record.bases.is_empty() {
            return Err(Error::EmptyRecord {
                name: record.name.clone(),
            });
        }
    }
    Ok(records)
}

fn normalize(bytes: &[u8], record: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        let upper = b.to_ascii_uppercase();
        match upper {
            b'A' | b'C' | b'G' | b'T' | b'N' => out.push(upper),
            b'-' => {
                return Err(Error::ReservedSentinelInInput {
                    record: record.to_string(),
                })
            }
            other => {
                return Err(Error::InvalidBase {
                    record: record.to_string(),
                    byte: other as char,
                })
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_text_is_one_implicit_record() {
        let records = parse(b"acgtACGTnN").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "<input>");
        assert_eq!(records[0].bases, b"ACGTACGTNN");
    }

    #[test]
    fn multi_record_fasta_keeps_every_record_in_order() {
        let text = b">first\nACGT\n>second\nTTTT\nGGGG\n";
        let records = parse(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "first");
        assert_eq!(records[0].bases, b"ACGT");
        assert_eq!(records[1].name, "second");
        assert_eq!(records[1].bases, b"TTTTGGGG");
    }

    #[test]
    fn lowercase_bases_are_upper_cased() {
        let records = parse(b">r\nacgtn\n").unwrap();
        assert_eq!(records[0].bases, b"ACGTN");
    }

    #[test]
    fn invalid_byte_is_a_parse_error_not_a_panic() {
        let err = parse(b">r\nACGTX\n").unwrap_err();
        assert!(matches!(err, Error::InvalidBase { byte: 'X', .. }));
    }

    #[test]
    fn reserved_sentinel_in_input_is_rejected() {
        let err = parse(b">r\nAC-GT\n").unwrap_err();
        assert!(matches!(err, Error::ReservedSentinelInInput { .. }));
    }

    #[test]
    fn empty_record_is_rejected() {
        let err = parse(b">only-header-no-sequence\n").unwrap_err();
        assert!(matches!(err, Error::EmptyRecord { .. }));
    }
}
