/// Network adapters for fetching fixtures over HTTP
mod http_fixture_source;

pub use http_fixture_source::HttpFixtureSource;
