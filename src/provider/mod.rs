//! Definition and explanation-judging capabilities
//!
//! Fetching definitions and judging a learner's free-text explanation both
//! happen outside the scheduler. They are modelled as traits so review flows
//! can run against a deterministic judge in tests and offline use, and so raw
//! responses from a text-generation service are normalized before they touch
//! scheduling state.

mod keyword;
mod response;
mod traits;

pub use keyword::KeywordJudge;
pub use response::{parse_batch_details, parse_judgement, parse_word_details, strip_code_fence};
pub use traits::*;
