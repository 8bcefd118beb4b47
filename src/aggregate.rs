use derive_new::new;
use log::debug;
use noodles_vcf::header::record::value::map::info::{Number, Type};
use noodles_vcf::header::record::value::{map::Info, Map};
use noodles_vcf::variant::record_buf::info::field::Value as InfoValue;
use noodles_vcf::variant::record_buf::samples::sample::value::Array;
use noodles_vcf::variant::record_buf::samples::sample::Value;

use crate::errs::{AggregationError, ConfigError};
use crate::stats::{format_float, StatKind};
use crate::vcf::{locus, VcfHeader, VcfRecord};

const MISSING: &str = ".";

/// Which per-sample field to summarize, where to put the result, and how to
/// summarize it. Fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationConfig {
    sample_field: String,
    info_field: String,
    stat: StatKind,
}

impl AggregationConfig {
    pub fn new(
        sample_field: &str,
        info_field: &str,
        stat: StatKind,
    ) -> Result<Self, ConfigError> {
        if sample_field.is_empty() {
            return Err(ConfigError::EmptySampleField);
        }
        if info_field.is_empty() {
            return Err(ConfigError::EmptyInfoField);
        }
        Ok(Self {
            sample_field: sample_field.to_string(),
            info_field: info_field.to_string(),
            stat,
        })
    }

    pub fn sample_field(&self) -> &str {
        &self.sample_field
    }

    pub fn info_field(&self) -> &str {
        &self.info_field
    }

    pub fn stat(&self) -> StatKind {
        self.stat
    }

    /// Description of the computed annotation in its `##INFO` declaration.
    pub fn description(&self) -> String {
        format!(
            "Summary statistic generated by {} of per-sample values of {} ",
            self.stat, self.sample_field
        )
    }
}

/// Declares the computed INFO annotation in `header`, after the INFO
/// declarations already there. A declaration of the same ID in the input is
/// dropped, the header can only hold one. Called once, before any record is
/// written.
pub fn augment_header(
    mut header: VcfHeader,
    config: &AggregationConfig,
) -> VcfHeader {
    let info = Map::<Info>::new(
        Number::Count(1),
        Type::Float,
        config.description(),
    );
    let infos = header.infos_mut();
    if infos.shift_remove(config.info_field()).is_some() {
        debug!(
            "input already declares INFO {}, replacing its declaration",
            config.info_field()
        );
    }
    infos.insert(config.info_field().to_string(), info);
    header
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Aggregation {
    /// The statistic was computed and written to INFO.
    Written(f64),
    /// No sample carried a value for the field, the record is unchanged.
    NoValues,
}

/// Text of each value a sample holds, `None` for missing ones. Genotypes have
/// no numeric reading.
fn values_as_text(value: &Value) -> Option<Vec<Option<String>>> {
    let values = match value {
        Value::Integer(n) => vec![Some(n.to_string())],
        Value::Float(x) => vec![Some(x.to_string())],
        Value::Character(c) => vec![Some(c.to_string())],
        Value::String(s) => s.split(',').map(|v| Some(v.to_string())).collect(),
        Value::Genotype(_) => return None,
        Value::Array(Array::Integer(values)) => {
            values.iter().map(|v| v.map(|n| n.to_string())).collect()
        }
        Value::Array(Array::Float(values)) => {
            values.iter().map(|v| v.map(|x| x.to_string())).collect()
        }
        Value::Array(Array::Character(values)) => {
            values.iter().map(|v| v.map(|c| c.to_string())).collect()
        }
        Value::Array(Array::String(values)) => values.clone(),
    };
    Some(values)
}

#[derive(new)]
pub struct SampleAggregator {
    config: AggregationConfig,
    /// Header sample names, in column order.
    sample_names: Vec<String>,
}

impl SampleAggregator {
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Collects the values of the configured field from every sample, in
    /// sample order. Samples without the field, or with the missing value
    /// `.`, are skipped.
    fn collect_values(
        &self,
        record: &VcfRecord,
    ) -> Result<Vec<f64>, AggregationError> {
        let field = self.config.sample_field();
        let samples = record.samples();
        let mut values = Vec::with_capacity(self.sample_names.len());
        for (sample, fields) in self.sample_names.iter().zip(samples.values()) {
            let Some(Some(value)) = fields.get(field) else {
                continue;
            };
            let raw_values = values_as_text(value).ok_or_else(|| {
                AggregationError::Genotype {
                    sample: sample.to_string(),
                    field: field.to_string(),
                }
            })?;
            let raw = match raw_values.as_slice() {
                [Some(raw)] => raw,
                [None] | [] => continue,
                _ => {
                    return Err(AggregationError::MultiValueField {
                        sample: sample.to_string(),
                        field: field.to_string(),
                        n_values: raw_values.len(),
                    })
                }
            };
            if raw == MISSING {
                continue;
            }
            let value = raw.parse::<f64>().map_err(|source| {
                AggregationError::NumericParse {
                    sample: sample.to_string(),
                    field: field.to_string(),
                    value: raw.to_string(),
                    source,
                }
            })?;
            // "nan" and "inf" parse, but have no place in a summary
            if !value.is_finite() {
                return Err(AggregationError::NonFinite {
                    sample: sample.to_string(),
                    field: field.to_string(),
                    value: raw.to_string(),
                });
            }
            values.push(value);
        }
        Ok(values)
    }

    /// Computes the statistic over the per-sample values of `record` and
    /// stores it in INFO, replacing any value already there.
    pub fn aggregate(
        &self,
        record: &mut VcfRecord,
    ) -> Result<Aggregation, AggregationError> {
        let mut values = self.collect_values(record)?;
        match self.config.stat().compute(&mut values) {
            Some(result) => {
                record.info_mut().insert(
                    self.config.info_field().to_string(),
                    Some(InfoValue::String(format_float(result))),
                );
                Ok(Aggregation::Written(result))
            }
            None => {
                debug!(
                    "no values for {} at {}",
                    self.config.sample_field(),
                    locus(record)
                );
                Ok(Aggregation::NoValues)
            }
        }
    }
}
