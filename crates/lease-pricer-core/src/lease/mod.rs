pub mod buyout;
pub mod pricing;

pub use buyout::{
    buyout_range, check_buyout, validate_buyout, BuyoutCheck, BuyoutRange, BUYOUT_RULES,
    DEFAULT_BUYOUT_RANGE,
};
pub use pricing::{
    compute, compute_breakdown, quote_lease, LeaseBreakdown, LeaseQuote, LeaseQuoteInput,
    LeaseRequest, LeaseResult, BUYOUT_INTEREST_THRESHOLD, SUPPORTED_DURATIONS,
};
