// Screening engine: document text extraction, whole-word keyword matching,
// the recruiter's in-memory working set, and report export. The matching
// core is pure; the store and filesystem only appear in handlers.

pub mod export;
pub mod extract;
pub mod handlers;
pub mod matching;
pub mod workspace;
