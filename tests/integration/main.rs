//! Integration tests for chatposter.

mod helpers;

mod cli_test;
mod pipeline_test;
mod transcript_test;
