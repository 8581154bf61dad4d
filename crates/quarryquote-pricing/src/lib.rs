pub mod error;
pub mod filter;
pub mod haul;
pub mod normalize;
mod parse;
pub mod priced;
pub mod quote;
pub mod sheet;

pub use error::PricingError;
pub use filter::{filter_products, LocationFilter};
pub use haul::HaulRates;
pub use normalize::{PriceNormalizer, RawPriceRow};
pub use priced::PricedItem;
pub use quote::{
    find_cheapest, round_money, total_cost, MaterialSelection, QuoteEngine, QuoteRequest,
};
pub use sheet::{
    load_price_sheet, read_price_sheet, read_price_sheet_from_reader, write_price_sheet,
    SHEET_HEADERS,
};
