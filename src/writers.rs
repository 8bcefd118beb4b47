use std::io::{BufWriter, Write};

use anyhow::Context;
use noodles_vcf as vcf;
use noodles_vcf::variant::io::Write as VariantWrite;

use crate::vcf::{locus, VcfHeader, VcfRecord};

pub trait OutWriter<T> {
    fn write(&mut self, item: T) -> anyhow::Result<u64>;
}

/// Writes the header and records of one VCF, records are encoded against
/// the header given at construction.
pub struct VcfWriter<W: Write> {
    inner: vcf::io::Writer<BufWriter<W>>,
    header: VcfHeader,
}

impl<W: Write> VcfWriter<W> {
    pub fn new(writer: W, header: VcfHeader) -> Self {
        Self { inner: vcf::io::Writer::new(BufWriter::new(writer)), header }
    }

    pub fn write_header(&mut self) -> anyhow::Result<()> {
        self.inner
            .write_header(&self.header)
            .context("failed to write VCF header")
    }

    /// Flushes buffered output, write errors surface here rather than when
    /// the writer is dropped.
    pub fn finish(mut self) -> anyhow::Result<()> {
        self.inner.get_mut().flush().context("failed to flush output")
    }
}

impl<W: Write> OutWriter<&VcfRecord> for VcfWriter<W> {
    fn write(&mut self, item: &VcfRecord) -> anyhow::Result<u64> {
        self.inner
            .write_variant_record(&self.header, item)
            .with_context(|| format!("failed to write record at {}", locus(item)))?;
        Ok(1)
    }
}
