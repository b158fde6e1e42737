//! SPIDER protein druggability prediction.

mod config;
mod parse;
mod service;


pub use config::{
    DEFAULT_HOME, DEFAULT_MM_ENV, HOME_ENV, INPUT_DIR, INPUT_FILE, ISOLATE_ENV, MM_ENV_ENV,
    MODEL_DIR, OUTPUT_DIR, OUTPUT_FILE, SCRIPT, SpiderConfig,
};
pub use parse::{PredictionResult, parse_prediction};
pub use service::{DESCRIPTION, PREDICTION_COMPLETED, SpiderService, TOOL_NAME, VERSION};
