/*!
 * Rule-based cleanup of subtitle text.
 *
 * - `rules`: the individual text rewrites
 * - `delimiters`: removal patterns built from configured delimiter pairs
 * - `pipeline`: ordered application of the rules and the change report
 */

pub mod delimiters;
pub mod pipeline;
pub mod rules;

pub use delimiters::DelimiterPattern;
pub use pipeline::{apply_all, TransformationLog, TransformationRecord, Transformer};
