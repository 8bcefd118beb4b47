use std::num::ParseFloatError;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "both a sample field and an info field are required, sample field \
         name is empty"
    )]
    EmptySampleField,
    #[error(
        "both a sample field and an info field are required, info field name \
         is empty"
    )]
    EmptyInfoField,
}

/// Failures while collecting per-sample values for one record. All of these
/// abort the run.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    #[error(
        "cannot handle sample fields with multiple values, sample {sample} \
         has {n_values} values for {field}"
    )]
    MultiValueField { sample: String, field: String, n_values: usize },
    #[error(
        "failed to parse value \"{value}\" of {field} in sample {sample} as a \
         number"
    )]
    NumericParse {
        sample: String,
        field: String,
        value: String,
        #[source]
        source: ParseFloatError,
    },
    #[error(
        "value \"{value}\" of {field} in sample {sample} is not a finite number"
    )]
    NonFinite { sample: String, field: String, value: String },
    #[error("{field} in sample {sample} is a genotype, not a number")]
    Genotype { sample: String, field: String },
    #[error("unknown statistic \"{0}\", expected mean, median, min, or max")]
    UnknownStatKind(String),
}
