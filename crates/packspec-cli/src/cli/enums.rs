use clap::ValueEnum;

/// Serialization format for `show`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DescriptorFormat {
    /// TOML, the native descriptor format
    Toml,
    /// Pretty-printed JSON
    Json,
}
