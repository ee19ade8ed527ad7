//! External collaborator contracts and their HTTP implementations.
//!
//! The pipeline core only depends on the traits in [`protocols`]; the
//! `Http*` types are the default network-backed implementations.

mod code_host;
mod extractor;
mod post_reader;
mod protocols;

pub use code_host::HttpCodeHostApi;
pub use extractor::{HttpContentExtractor, HttpPageFetcher};
pub use post_reader::HttpPostReader;
pub use protocols::{
    is_numeric_id, BookmarkSource, CodeHostApi, ContentExtractor, Extraction, FetchOptions,
    PageFetcher, PostReader, RawPost, RepoInfo, SourceMode,
};
