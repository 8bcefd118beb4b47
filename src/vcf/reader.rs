use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use log::{debug, info};
use noodles::bgzf;
use noodles_vcf as vcf;

use crate::vcf::{VcfHeader, VcfRecord};

fn is_bgzf_path(path: &Path) -> bool {
    matches!(path.extension().and_then(|ext| ext.to_str()), Some("gz" | "bgz"))
}

/// Opens the input VCF. `None` or `-` reads from stdin, paths ending in
/// `.gz` or `.bgz` are decompressed as BGZF.
pub fn open_input(path: Option<&Path>) -> anyhow::Result<Box<dyn BufRead>> {
    match path {
        Some(fp) if fp != Path::new("-") => {
            let fh = File::open(fp).with_context(|| {
                format!("failed to open input VCF {}", fp.display())
            })?;
            if is_bgzf_path(fp) {
                debug!("reading {} as BGZF", fp.display());
                Ok(Box::new(bgzf::Reader::new(fh)))
            } else {
                Ok(Box::new(BufReader::new(fh)))
            }
        }
        _ => {
            info!("reading VCF from stdin");
            Ok(Box::new(std::io::stdin().lock()))
        }
    }
}

/// Streams records from a VCF. The header is read when the reader is
/// created, records are parsed against it.
pub struct VcfReader<R> {
    inner: vcf::io::Reader<R>,
    header: VcfHeader,
    record: vcf::Record,
    n_records: usize,
}

impl<R: BufRead> VcfReader<R> {
    pub fn new(inner: R) -> anyhow::Result<Self> {
        let mut inner = vcf::io::Reader::new(inner);
        let header =
            inner.read_header().context("failed to parse VCF header")?;
        debug!(
            "read VCF header, {} INFO, {} FORMAT declarations, {} samples",
            header.infos().len(),
            header.formats().len(),
            header.sample_names().len()
        );
        Ok(Self { inner, header, record: vcf::Record::default(), n_records: 0 })
    }

    pub fn header(&self) -> &VcfHeader {
        &self.header
    }

    /// Reads the next record, `None` at the end of the input.
    pub fn read_record(&mut self) -> anyhow::Result<Option<VcfRecord>> {
        let n_bytes =
            self.inner.read_record(&mut self.record).with_context(|| {
                format!("failed to read record {}", self.n_records + 1)
            })?;
        if n_bytes == 0 {
            return Ok(None);
        }
        self.n_records += 1;
        VcfRecord::try_from_variant_record(&self.header, &self.record)
            .map(Some)
            .with_context(|| {
                format!("failed to parse record {}", self.n_records)
            })
    }

    pub fn records(
        &mut self,
    ) -> impl Iterator<Item = anyhow::Result<VcfRecord>> + '_ {
        std::iter::from_fn(move || self.read_record().transpose())
    }
}
