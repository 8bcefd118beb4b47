//! VCF input through `noodles-vcf`: header and records are parsed by
//! noodles, records are handed out as `RecordBuf` so INFO can be edited in
//! place before they are written back out.
mod reader;

pub use noodles_vcf::variant::RecordBuf as VcfRecord;
pub use noodles_vcf::Header as VcfHeader;
pub use reader::{open_input, VcfReader};

/// `CHROM:POS` of a record, for messages.
pub fn locus(record: &VcfRecord) -> String {
    let pos = record.variant_start().map(usize::from).unwrap_or_default();
    format!("{}:{pos}", record.reference_sequence_name())
}
