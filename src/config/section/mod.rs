//! Configuration section definitions.
//!
//! | Module   | TOML Section | Purpose                          |
//! |----------|--------------|----------------------------------|
//! | `detect` | `[detect]`   | Layout heuristic thresholds      |
//! | `job`    | `[[jobs]]`   | Screenshots and their label list |

mod detect;
mod job;

pub use detect::DetectConfig;
pub use job::{GridShape, JobConfig, validate_unique_outputs};
