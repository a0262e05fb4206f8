pub mod formatter;

pub use formatter::{
    format_bars, format_json, format_scorecard_detail, format_summary, should_use_colors,
    ScoreBand,
};
