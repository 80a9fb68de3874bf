mod args;

pub use args::{
    CliArgs, CompressionLevel, OutputFormat, ResizeFilter, ResizeMode, check_power_of_two,
    parse_power_of_two,
};
