//! # Analytics
//!
//! Calculators run over immutable inputs and report sparse data as
//! `None` or an empty [`Series`](crate::Series). The only error paths
//! are contract violations such as an inverted [`DateWindow`].
//!
//! | Module | Contents |
//! |--------|----------|
//! | `window` | [`DateWindow`] and slice selection |
//! | `resample` | last-observation-per-bucket resampling |
//! | `returns` | percent change, cumulative and investment return, benchmark curves |
//! | `risk` | volatility, Sharpe ratio, [`RiskFreeSeries`] |
//! | `prices` | trailing price levels and mean traded volume |
//! | `aggregate` | sector and index rollups |

mod aggregate;
mod prices;
mod resample;
mod returns;
mod risk;
mod window;

pub use aggregate::{
    compute_investment_returns, compute_mean_volume, compute_risk_return,
    return_distribution, sector_cumulative_return_history, sector_fundamentals,
    sector_mean_return_long, sector_mean_returns, sector_mean_returns_with, HistogramBin,
    InvestmentReturnRow, ReturnDistribution, ReturnTable, RiskReturnRow, SectorFundamentals,
    SectorMean, SectorReturnPoint, VolumeRank,
};
pub use prices::PriceLevels;
pub use resample::resample_last;
pub use returns::{
    cumulative_return, log_returns, pct_change, BenchmarkReturns, InvestmentReturn, TickerReturns,
};
pub use risk::{annualized_volatility, mean, sample_std, sharpe_ratio, RiskFreeSeries};
pub use window::{select, select_range, DateWindow};
