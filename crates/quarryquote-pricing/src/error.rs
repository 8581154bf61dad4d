use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("failed to open price sheet {path}: {source}")]
    SourceIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("surcharge must not be negative, got {0}")]
    NegativeSurcharge(Decimal),

    #[error("invalid material id \"{0}\": expected AUTO or an integer id")]
    InvalidMaterialId(String),
}
