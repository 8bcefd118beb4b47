use std::path::PathBuf;

use anyhow::Context;
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use log::{debug, info};
use log_once::warn_once;

use crate::aggregate::{
    augment_header, Aggregation, AggregationConfig, SampleAggregator,
};
use crate::logging::init_logging;
use crate::stats::StatKind;
use crate::util::get_ticker;
use crate::vcf::{locus, open_input, VcfReader};
use crate::writers::{OutWriter, VcfWriter};

#[derive(Parser, Debug)]
#[command(name = "sample2info", version)]
#[command(term_width = 80, args_override_self = true)]
/// Take annotations given in the per-sample fields and add the mean, median,
/// min, or max to the site-level INFO. Writes the VCF to stdout.
pub struct Sample2Info {
    /// Input VCF, read from stdin when omitted or "-". Files ending in .gz or
    /// .bgz are read as BGZF-compressed.
    in_vcf: Option<PathBuf>,
    /// Add information about this field in samples to the INFO column.
    #[arg(short = 'f', long = "field", value_parser = NonEmptyStringValueParser::new())]
    field: String,
    /// Store the computed statistic in this INFO field.
    #[arg(short = 'i', long = "info", value_parser = NonEmptyStringValueParser::new())]
    info: String,
    /// Take the mean of samples for the field (default).
    #[arg(short = 'a', long = "average", overrides_with_all = ["median", "min", "max"])]
    average: bool,
    /// Use the median, the value at index n/2 of the ordered sample values.
    #[arg(short = 'm', long = "median", overrides_with_all = ["average", "min", "max"])]
    median: bool,
    /// Use the min.
    #[arg(short = 'n', long = "min", overrides_with_all = ["average", "median", "max"])]
    min: bool,
    /// Use the max.
    #[arg(short = 'x', long = "max", overrides_with_all = ["average", "median", "min"])]
    max: bool,
    /// Specify a file to write debug logs to.
    #[arg(long, alias = "log")]
    log_filepath: Option<PathBuf>,
    /// Don't log to stderr or show progress, errors are still reported.
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

impl Sample2Info {
    /// The selected statistic. At most one selector is set, a later selector
    /// on the command line overrides an earlier one.
    pub fn stat_kind(&self) -> StatKind {
        if self.median {
            StatKind::Median
        } else if self.min {
            StatKind::Min
        } else if self.max {
            StatKind::Max
        } else {
            StatKind::Mean
        }
    }

    pub fn aggregation_config(&self) -> anyhow::Result<AggregationConfig> {
        AggregationConfig::new(&self.field, &self.info, self.stat_kind())
            .context("invalid configuration")
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let _handle = init_logging(self.log_filepath.as_ref(), self.quiet)?;
        let config = self.aggregation_config()?;
        info!(
            "writing the {} of sample field {} to INFO field {}",
            config.stat(),
            config.sample_field(),
            config.info_field()
        );

        let input = open_input(self.in_vcf.as_deref())?;
        let mut reader =
            VcfReader::new(input).context("failed to read VCF header")?;
        let header = augment_header(reader.header().clone(), &config);
        let sample_names =
            header.sample_names().iter().cloned().collect::<Vec<String>>();
        debug!("{} samples in input", sample_names.len());

        let mut writer = VcfWriter::new(std::io::stdout().lock(), header);
        writer.write_header()?;

        let aggregator = SampleAggregator::new(config, sample_names);
        let ticker = get_ticker(self.quiet);
        ticker.set_message("aggregating sample values");
        let mut n_records = 0u64;
        let mut n_without_values = 0u64;
        for record in reader.records() {
            let mut record = record?;
            let outcome = aggregator.aggregate(&mut record);
            let outcome = outcome.with_context(|| {
                format!(
                    "failed to aggregate {} for record at {}",
                    aggregator.config().sample_field(),
                    locus(&record)
                )
            })?;
            if outcome == Aggregation::NoValues {
                warn_once!(
                    "found record(s) without any {} values, these are written \
                     without {}",
                    aggregator.config().sample_field(),
                    aggregator.config().info_field()
                );
                n_without_values += 1;
            }
            n_records += writer.write(&record)?;
            ticker.inc(1);
        }
        ticker.finish_and_clear();
        writer.finish()?;

        info!(
            "processed {n_records} records, {n_without_values} had no {} values",
            aggregator.config().sample_field()
        );
        Ok(())
    }
}
