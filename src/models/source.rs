//! Search source (seed) definitions.

use serde::{Deserialize, Serialize};

/// One configured search endpoint to seed a crawl from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Display name (e.g., "Wikipedia")
    pub name: String,

    /// URL template with a `{query}` placeholder for the encoded keyword
    pub url_template: String,

    /// Literal replacement for each space in the keyword.
    ///
    /// Most sources use `+`; Wikipedia uses the path-style `%2Fwiki%2F`
    /// encoding inherited from the original seed table.
    #[serde(default = "default_space_encoding")]
    pub space_encoding: String,
}

fn default_space_encoding() -> String {
    "+".into()
}

impl Source {
    /// Build the search URL for a keyword.
    ///
    /// Spaces in the keyword are replaced with this source's
    /// `space_encoding` before substitution into the template.
    pub fn search_url(&self, keyword: &str) -> String {
        let query = keyword.replace(' ', &self.space_encoding);
        self.url_template.replace("{query}", &query)
    }
}
