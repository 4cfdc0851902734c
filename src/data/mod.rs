mod data_sample;
pub use data_sample::DataSample;

mod time_series;
pub use time_series::TimeSeries;
