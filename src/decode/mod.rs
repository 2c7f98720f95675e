//! Response decoder module
//!
//! Turns the body of a Solr `/select` response into a [`Page`].
//!
//! # Overview
//!
//! A cursor page is a JSON object carrying the documents under
//! `response.docs` and the mark for the following page under
//! `nextCursorMark`. Bodies that are not JSON fail with `Error::Decode`,
//! JSON of the wrong shape fails with `Error::Protocol`.

mod decoders;
mod types;

pub use decoders::SelectDecoder;
pub use types::Page;
