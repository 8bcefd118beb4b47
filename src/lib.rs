pub mod aggregate;
pub mod commands;
pub mod errs;
pub mod logging;
pub mod stats;
pub mod vcf;
pub mod writers;

mod util;
